use {
    serde::{Serialize, Deserialize, Deserializer, de::Error as _},
    typed_builder::TypedBuilder,
};

/// One line of the review corpus. Extra fields in the source are ignored.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub review_id: String,
    pub business_id: String,
    #[serde(deserialize_with = "deserialize_stars")]
    pub stars: u8,
    pub text: String,
}

/// A single word occurrence. Borrows its review, so identifiers and the
/// rating are shared by every token of that review.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenRow<'a> {
    pub review: &'a Review,
    pub word: String,
}

/// Occurrences of a word within one review.
#[derive(Debug, Clone, PartialEq)]
pub struct WordOccurrence<'a> {
    pub review: &'a Review,
    pub word: &'a str,
    pub n: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ReviewSentiment {
    pub review_id: String,
    pub stars: u8,
    pub sentiment: f64,
}

#[derive(TypedBuilder, Serialize, Debug, Clone, PartialEq)]
pub struct WordSummary {
    #[builder(setter(into))]
    pub word: String,
    pub businesses: usize,
    pub reviews: usize,
    pub uses: usize,
    pub average_stars: f64,
}

#[derive(TypedBuilder, Serialize, Debug, Clone, PartialEq)]
pub struct RefinedLexiconEntry {
    #[builder(setter(into))]
    pub word: String,
    pub businesses: usize,
    pub reviews: usize,
    pub uses: usize,
    pub average_stars: f64,
    pub score: i32,
}

impl Review {
    pub fn new(review_id: &str, business_id: &str, stars: u8, text: &str) -> Self {
        Self {
            review_id: review_id.to_owned(),
            business_id: business_id.to_owned(),
            stars,
            text: text.to_owned(),
        }
    }
}

impl<'a> TokenRow<'a> {
    pub fn review_id(&self) -> &'a str {
        &self.review.review_id
    }

    pub fn business_id(&self) -> &'a str {
        &self.review.business_id
    }

    pub fn stars(&self) -> u8 {
        self.review.stars
    }
}

// the dump stores ratings either as `5` or `5.0`
fn deserialize_stars<'de, D>(deserializer: D) -> Result<u8, D::Error> where D: Deserializer<'de> {
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(1.0..=5.0).contains(&value) {
        return Err(D::Error::custom(format!("stars must be a whole number between 1 and 5, got {}", value)));
    }

    Ok(value as u8)
}
