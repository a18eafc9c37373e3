use {
    std::collections::HashMap,
    tracing::{info, warn},
    crate::{
        lexicon::Scored,
        models::{Review, ReviewSentiment, TokenRow},
    },
};

struct SentimentAccumulator<'a> {
    review: &'a Review,
    total: f64,
    count: usize,
}

/// Mean score of the scored tokens of each review, with repeated words
/// counted every time they occur. Reviews without scored tokens get no row.
/// Rows come out in order of first appearance.
pub fn review_sentiment<'a>(scored: &[Scored<&TokenRow<'a>>]) -> Vec<ReviewSentiment> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<SentimentAccumulator> = Vec::new();

    for scored_token in scored {
        let review = scored_token.row.review;
        let position = *index.entry(review.review_id.as_str()).or_insert_with(|| {
            groups.push(SentimentAccumulator {
                review,
                total: 0.0,
                count: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[position];
        group.total += scored_token.score as f64;
        group.count += 1;
    }

    let sentiment: Vec<_> = groups.into_iter()
        .map(|group| ReviewSentiment {
            review_id: group.review.review_id.clone(),
            stars: group.review.stars,
            sentiment: group.total / group.count as f64,
        })
        .collect();

    if sentiment.is_empty() {
        warn!("no review contains a lexicon word");
    } else {
        info!("computed sentiment for {} reviews", sentiment.len());
    }

    sentiment
}
