use {
    once_cell::sync::Lazy,
    regex::Regex,
    tracing::info,
    crate::{
        models::TokenRow,
        stop_words::StopWords,
    },
};

static LOWERCASE_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z']+$").unwrap());

pub fn is_kept_word(word: &str, stop_words: &StopWords) -> bool {
    LOWERCASE_WORD.is_match(word) && !stop_words.contains(word)
}

/// Drops stop words and anything that is not made of ascii lowercase letters
/// and apostrophes. Order is preserved.
pub fn filter_tokens<'a>(tokens: Vec<TokenRow<'a>>, stop_words: &StopWords) -> Vec<TokenRow<'a>> {
    let before = tokens.len();
    let kept: Vec<_> = tokens.into_iter()
        .filter(|token| is_kept_word(&token.word, stop_words))
        .collect();

    info!("kept {} of {} tokens after filtering", kept.len(), before);
    kept
}

#[cfg(test)]
mod tests {
    use {
        std::time::Duration,
        crate::{models::Review, tokenization::tokenize_reviews},
        super::*,
    };

    #[test]
    fn rejects_digits_punctuation_and_accents() {
        let stop_words = StopWords::empty();

        assert!(is_kept_word("great", &stop_words));
        assert!(is_kept_word("don't", &stop_words));
        assert!(!is_kept_word("10", &stop_words));
        assert!(!is_kept_word("b12", &stop_words));
        assert!(!is_kept_word("café", &stop_words));
        assert!(!is_kept_word("snake_case", &stop_words));
        assert!(!is_kept_word("Great", &stop_words));
        assert!(!is_kept_word("", &stop_words));
    }

    #[test]
    fn removes_stop_words_and_keeps_order() {
        let reviews = vec![Review::new("r1", "b1", 4, "The 2 tacos were great and the salsa was fresh")];
        let tokens = tokenize_reviews(&reviews, Duration::from_secs(10));

        let kept = filter_tokens(tokens, &StopWords::english());

        let words: Vec<_> = kept.iter().map(|token| token.word.as_str()).collect();
        assert_eq!(words, vec!["tacos", "great", "salsa", "fresh"]);
    }

    #[test]
    fn every_kept_word_is_lowercase_ascii_and_not_a_stop_word() {
        let reviews = vec![
            Review::new("r1", "b1", 3, "Über-good crêpes!!! 5/5 would go again... It's the BEST"),
            Review::new("r2", "b2", 1, "never_again, 0 stars; we're done"),
        ];
        let stop_words = StopWords::english();

        let kept = filter_tokens(tokenize_reviews(&reviews, Duration::from_secs(10)), &stop_words);

        assert!(!kept.is_empty());
        for token in &kept {
            assert!(token.word.chars().all(|c| c.is_ascii_lowercase() || c == '\''), "{}", token.word);
            assert!(!stop_words.contains(&token.word));
        }
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(filter_tokens(Vec::new(), &StopWords::english()).is_empty());
    }
}
