use {
    std::collections::{BTreeMap, HashMap, HashSet, hash_map::Entry},
    serde::Deserialize,
    tracing::{info, warn},
    crate::{
        lexicon::{inner_join_on_word, Lexicon},
        models::{RefinedLexiconEntry, TokenRow, WordOccurrence, WordSummary},
    },
};

/// Minimum breadth a word needs before it is trusted in the refined lexicon.
/// Both bounds are inclusive.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct SupportThresholds {
    pub min_reviews: usize,
    pub min_businesses: usize,
}

impl Default for SupportThresholds {
    fn default() -> Self {
        Self {
            min_reviews: 200,
            min_businesses: 10,
        }
    }
}

impl SupportThresholds {
    pub fn new(min_reviews: usize, min_businesses: usize) -> Self {
        Self {
            min_reviews,
            min_businesses,
        }
    }

    pub fn is_supported(&self, summary: &WordSummary) -> bool {
        summary.reviews >= self.min_reviews && summary.businesses >= self.min_businesses
    }
}

/// Counts each word once per review, in order of first appearance.
pub fn count_word_occurrences<'a>(tokens: &'a [TokenRow<'_>]) -> Vec<WordOccurrence<'a>> {
    let mut index: HashMap<(&str, &str), usize> = HashMap::new();
    let mut occurrences: Vec<WordOccurrence> = Vec::new();

    for token in tokens {
        let key = (token.review_id(), token.word.as_str());
        match index.entry(key) {
            Entry::Occupied(entry) => occurrences[*entry.get()].n += 1,
            Entry::Vacant(entry) => {
                entry.insert(occurrences.len());
                occurrences.push(WordOccurrence {
                    review: token.review,
                    word: &token.word,
                    n: 1,
                });
            },
        }
    }

    occurrences
}

#[derive(Default)]
struct SupportAccumulator<'a> {
    businesses: HashSet<&'a str>,
    reviews: usize,
    uses: usize,
    stars_total: f64,
}

/// Per-word support, sorted by word. `uses` counts every occurrence, while
/// `reviews` and `average_stars` count each review once.
pub fn summarize_words(occurrences: &[WordOccurrence<'_>]) -> Vec<WordSummary> {
    let mut groups: BTreeMap<&str, SupportAccumulator> = BTreeMap::new();

    for occurrence in occurrences {
        let group = groups.entry(occurrence.word).or_default();
        group.businesses.insert(occurrence.review.business_id.as_str());
        group.reviews += 1;
        group.uses += occurrence.n;
        group.stars_total += occurrence.review.stars as f64;
    }

    let summaries: Vec<_> = groups.into_iter()
        .map(|(word, group)| WordSummary::builder()
            .word(word)
            .businesses(group.businesses.len())
            .reviews(group.reviews)
            .uses(group.uses)
            .average_stars(group.stars_total / group.reviews as f64)
            .build())
        .collect();

    info!("summarized support for {} distinct words", summaries.len());
    summaries
}

pub fn filter_by_support<'a>(summaries: &'a [WordSummary], thresholds: &SupportThresholds) -> Vec<&'a WordSummary> {
    let supported: Vec<_> = summaries.iter()
        .filter(|summary| thresholds.is_supported(summary))
        .collect();

    if supported.is_empty() {
        warn!(
            "no word appears in at least {} reviews across {} businesses",
            thresholds.min_reviews,
            thresholds.min_businesses,
        );
    } else {
        info!("{} of {} words pass the support thresholds", supported.len(), summaries.len());
    }

    supported
}

/// Joins supported words with the lexicon. Words without a score are dropped.
pub fn refine_lexicon(supported: &[&WordSummary], lexicon: &Lexicon) -> Vec<RefinedLexiconEntry> {
    let refined: Vec<RefinedLexiconEntry> = inner_join_on_word(supported.iter().copied(), lexicon)
        .into_iter()
        .map(RefinedLexiconEntry::from)
        .collect();

    info!("refined lexicon has {} words", refined.len());
    refined
}
