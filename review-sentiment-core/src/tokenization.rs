use {
    std::time::Duration,
    once_cell::sync::Lazy,
    regex::Regex,
    tracing::info,
    crate::{
        models::{Review, TokenRow},
        progress::Progress,
    },
};

// letters, digits and underscores, with inner apostrophes kept ("don't")
static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+(?:['’]\w+)*").unwrap());

/// Splits text on non-word boundaries and lowercases ascii letters only, so
/// a non-ascii letter never folds into `a-z`. Typographic apostrophes are
/// folded into `'`. Digits and non-ascii letters are kept here and dropped by
/// the token filter.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD.find_iter(text)
        .map(|word| word.as_str().to_ascii_lowercase().replace('’', "'"))
}

pub fn tokenize_reviews(reviews: &[Review], progress_interval: Duration) -> Vec<TokenRow<'_>> {
    let mut progress = Progress::new("tokenizing reviews".to_owned(), progress_interval);
    let mut tokens = Vec::new();

    for review in reviews {
        tokens.extend(tokenize(&review.text).map(|word| TokenRow { review, word }));
        progress.update();
    }

    progress.finish();
    info!("produced {} tokens from {} reviews", tokens.len(), reviews.len());

    tokens
}
