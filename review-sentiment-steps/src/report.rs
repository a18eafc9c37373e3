use {
    tracing::{info, warn},
    review_sentiment_core::{
        distributions::{Distributions, DistributionSummary},
        loading::LoadedReviews,
        models::RefinedLexiconEntry,
        pipeline::PipelineStats,
    },
};

pub fn report_stats(loaded: &LoadedReviews, stats: &PipelineStats) {
    info!(
        reviews = stats.reviews,
        skipped_lines = loaded.skipped_lines,
        tokens = stats.tokens,
        filtered_tokens = stats.filtered_tokens,
        scored_tokens = stats.scored_tokens,
        reviews_with_sentiment = stats.reviews_with_sentiment,
        distinct_words = stats.distinct_words,
        supported_words = stats.supported_words,
        refined_words = stats.refined_words,
        "run summary"
    );
}

pub fn report_distributions(distributions: &Distributions) {
    if distributions.sentiment_by_stars.is_empty() {
        warn!("no review sentiment to compare against star ratings");
    }
    for group in &distributions.sentiment_by_stars {
        info!("sentiment of {} star reviews: {}", group.stars, describe(&group.sentiment));
    }

    if distributions.average_stars_by_score.is_empty() {
        warn!("refined lexicon is empty, nothing to compare against lexicon scores");
    }
    for group in &distributions.average_stars_by_score {
        info!("average stars of words scored {:+}: {}", group.score, describe(&group.average_stars));
    }
}

/// Logs the most used words of the refined lexicon.
pub fn report_top_words(refined_lexicon: &[RefinedLexiconEntry], limit: usize) {
    let mut words: Vec<_> = refined_lexicon.iter().collect();
    words.sort_by(|a, b| b.uses.cmp(&a.uses).then_with(|| a.word.cmp(&b.word)));

    for entry in words.into_iter().take(limit) {
        info!(
            "{:>16} score {:+} avg stars {:.2} ({} uses in {} reviews of {} businesses)",
            entry.word,
            entry.score,
            entry.average_stars,
            entry.uses,
            entry.reviews,
            entry.businesses,
        );
    }
}

fn describe(summary: &DistributionSummary) -> String {
    format!(
        "n={} min={:.2} q1={:.2} median={:.2} q3={:.2} max={:.2} mean={:.2}",
        summary.count,
        summary.min,
        summary.q1,
        summary.median,
        summary.q3,
        summary.max,
        summary.mean,
    )
}
