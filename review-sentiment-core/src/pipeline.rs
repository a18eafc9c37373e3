use {
    std::time::Duration,
    serde::Serialize,
    tracing::info,
    crate::{
        aggregation::review_sentiment,
        filter::filter_tokens,
        lexicon::{inner_join_on_word, Lexicon},
        models::{RefinedLexiconEntry, Review, ReviewSentiment, WordSummary},
        stop_words::StopWords,
        support::{count_word_occurrences, filter_by_support, refine_lexicon, summarize_words, SupportThresholds},
        tokenization::tokenize_reviews,
    },
};

/// Row counts of every stage of a run.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub reviews: usize,
    pub tokens: usize,
    pub filtered_tokens: usize,
    pub scored_tokens: usize,
    pub reviews_with_sentiment: usize,
    pub distinct_words: usize,
    pub supported_words: usize,
    pub refined_words: usize,
}

#[derive(Debug)]
pub struct PipelineOutput {
    pub review_sentiment: Vec<ReviewSentiment>,
    pub word_summary: Vec<WordSummary>,
    pub refined_lexicon: Vec<RefinedLexiconEntry>,
    pub stats: PipelineStats,
}

/// Resources of a run, loaded once and handed to each stage.
pub struct Pipeline {
    lexicon: Lexicon,
    stop_words: StopWords,
    thresholds: SupportThresholds,
    progress_interval: Duration,
}

impl Pipeline {
    pub fn new(lexicon: Lexicon, stop_words: StopWords, thresholds: SupportThresholds) -> Self {
        Self {
            lexicon,
            stop_words,
            thresholds,
            progress_interval: Duration::from_secs(10),
        }
    }

    pub fn with_progress_interval(mut self, progress_interval: Duration) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    /// Review ids must be unique, as `loading::read_reviews` guarantees.
    pub fn run(&self, reviews: &[Review]) -> PipelineOutput {
        info!("running pipeline over {} reviews", reviews.len());

        let tokens = tokenize_reviews(reviews, self.progress_interval);
        let token_count = tokens.len();
        let tokens = filter_tokens(tokens, &self.stop_words);

        let scored = inner_join_on_word(&tokens, &self.lexicon);
        info!("{} tokens have a lexicon score", scored.len());
        let review_sentiment = review_sentiment(&scored);

        let word_summary = summarize_words(&count_word_occurrences(&tokens));
        let supported = filter_by_support(&word_summary, &self.thresholds);
        let refined_lexicon = refine_lexicon(&supported, &self.lexicon);

        let stats = PipelineStats {
            reviews: reviews.len(),
            tokens: token_count,
            filtered_tokens: tokens.len(),
            scored_tokens: scored.len(),
            reviews_with_sentiment: review_sentiment.len(),
            distinct_words: word_summary.len(),
            supported_words: supported.len(),
            refined_words: refined_lexicon.len(),
        };

        PipelineOutput {
            review_sentiment,
            word_summary,
            refined_lexicon,
            stats,
        }
    }
}
