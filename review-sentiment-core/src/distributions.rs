use {
    std::collections::BTreeMap,
    serde::Serialize,
    crate::models::{RefinedLexiconEntry, ReviewSentiment},
};

/// Box plot statistics of one group. Quartiles interpolate linearly between
/// closest ranks.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DistributionSummary {
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct StarsDistribution {
    pub stars: u8,
    pub sentiment: DistributionSummary,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ScoreDistribution {
    pub score: i32,
    pub average_stars: DistributionSummary,
}

/// What the external charting step plots: sentiment by rating, and word
/// rating by lexicon score.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Distributions {
    pub sentiment_by_stars: Vec<StarsDistribution>,
    pub average_stars_by_score: Vec<ScoreDistribution>,
}

impl DistributionSummary {
    pub fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        values.sort_by(f64::total_cmp);
        let count = values.len();

        Some(Self {
            count,
            min: values[0],
            q1: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q3: quantile(&values, 0.75),
            max: values[count - 1],
            mean: values.iter().sum::<f64>() / count as f64,
        })
    }
}

impl Distributions {
    pub fn compute(review_sentiment: &[ReviewSentiment], refined_lexicon: &[RefinedLexiconEntry]) -> Self {
        Self {
            sentiment_by_stars: sentiment_by_stars(review_sentiment),
            average_stars_by_score: average_stars_by_score(refined_lexicon),
        }
    }
}

pub fn sentiment_by_stars(review_sentiment: &[ReviewSentiment]) -> Vec<StarsDistribution> {
    let mut groups: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for row in review_sentiment {
        groups.entry(row.stars).or_default().push(row.sentiment);
    }

    groups.into_iter()
        .filter_map(|(stars, values)| DistributionSummary::from_values(values)
            .map(|sentiment| StarsDistribution { stars, sentiment }))
        .collect()
}

pub fn average_stars_by_score(refined_lexicon: &[RefinedLexiconEntry]) -> Vec<ScoreDistribution> {
    let mut groups: BTreeMap<i32, Vec<f64>> = BTreeMap::new();
    for entry in refined_lexicon {
        groups.entry(entry.score).or_default().push(entry.average_stars);
    }

    groups.into_iter()
        .filter_map(|(score, values)| DistributionSummary::from_values(values)
            .map(|average_stars| ScoreDistribution { score, average_stars }))
        .collect()
}

// values must be sorted and non-empty
fn quantile(values: &[f64], p: f64) -> f64 {
    let position = p * (values.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    values[lower] + (values[upper] - values[lower]) * (position - lower as f64)
}
