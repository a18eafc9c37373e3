use {
    std::{
        collections::HashMap,
        fs::File,
        io::Read,
        path::Path,
    },
    tracing::info,
    crate::{
        error::{PipelineError, Result},
        models::{TokenRow, WordSummary, RefinedLexiconEntry},
    },
};

pub const MIN_SCORE: i32 = -5;
pub const MAX_SCORE: i32 = 5;

/// Word to polarity score. Words are unique and scores are within
/// `MIN_SCORE..=MAX_SCORE`.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    scores: HashMap<String, i32>,
}

/// Rows that can be joined against the lexicon.
pub trait WordKeyed {
    fn word(&self) -> &str;
}

/// A row paired with the lexicon score of its word.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub row: T,
    pub score: i32,
}

impl Lexicon {
    /// Builds a lexicon from in-memory pairs, applying the same checks as
    /// the file loader. Errors point at the 1-based position of the pair.
    pub fn from_entries<I, S>(entries: I) -> Result<Self> where I: IntoIterator<Item = (S, i32)>, S: Into<String> {
        let mut lexicon = Self::default();
        for (index, (word, score)) in entries.into_iter().enumerate() {
            lexicon.insert(word.into(), score)
                .map_err(|reason| PipelineError::Lexicon {
                    origin: "<memory>".to_owned(),
                    line: index + 1,
                    reason,
                })?;
        }
        Ok(lexicon)
    }

    pub fn score(&self, word: &str) -> Option<i32> {
        self.scores.get(word).copied()
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    fn insert(&mut self, word: String, score: i32) -> std::result::Result<(), String> {
        if word.is_empty() {
            return Err("empty word".to_owned());
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(format!("score {} for {:?} is outside {}..={}", score, word, MIN_SCORE, MAX_SCORE));
        }
        if self.scores.contains_key(&word) {
            return Err(format!("duplicate word {:?}", word));
        }

        self.scores.insert(word, score);
        Ok(())
    }
}

/// Pairs every row whose word is in the lexicon with its score. Rows without
/// a lexicon entry are dropped silently. Lexicon words are unique, so each
/// input row yields at most one output row, and input order is kept.
pub fn inner_join_on_word<T, I>(rows: I, lexicon: &Lexicon) -> Vec<Scored<T>> where T: WordKeyed, I: IntoIterator<Item = T> {
    rows.into_iter()
        .filter_map(|row| lexicon.score(row.word()).map(|score| Scored { row, score }))
        .collect()
}

/// Reads AFINN-style `word<TAB>score` lines without a header.
pub fn read_lexicon<R: Read>(reader: R, origin: &str) -> Result<Lexicon> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut lexicon = Lexicon::default();
    let mut record = csv::StringRecord::new();
    loop {
        let line = reader.position().line() as usize;
        let has_record = reader.read_record(&mut record)
            .map_err(|err| lexicon_error(origin, line, err.to_string()))?;
        if !has_record {
            break;
        }

        let line = record.position().map(|position| position.line() as usize).unwrap_or(line);
        if record.len() != 2 {
            return Err(lexicon_error(origin, line, format!("expected 2 tab-separated fields, got {}", record.len())));
        }

        let score = record[1].trim().parse::<i32>()
            .map_err(|err| lexicon_error(origin, line, format!("bad score {:?}: {}", &record[1], err)))?;

        lexicon.insert(record[0].trim().to_lowercase(), score)
            .map_err(|reason| lexicon_error(origin, line, reason))?;
    }

    Ok(lexicon)
}

pub fn load_lexicon(path: &Path) -> Result<Lexicon> {
    let file = File::open(path).map_err(|err| PipelineError::io(path, err))?;
    let lexicon = read_lexicon(file, &path.display().to_string())?;
    info!("loaded {} lexicon words from {}", lexicon.len(), path.display());
    Ok(lexicon)
}

fn lexicon_error(origin: &str, line: usize, reason: String) -> PipelineError {
    PipelineError::Lexicon {
        origin: origin.to_owned(),
        line,
        reason,
    }
}

impl<'a> WordKeyed for TokenRow<'a> {
    fn word(&self) -> &str {
        &self.word
    }
}

impl WordKeyed for WordSummary {
    fn word(&self) -> &str {
        &self.word
    }
}

impl<T: WordKeyed> WordKeyed for &T {
    fn word(&self) -> &str {
        (*self).word()
    }
}

impl From<Scored<&WordSummary>> for RefinedLexiconEntry {
    fn from(scored: Scored<&WordSummary>) -> Self {
        let summary = scored.row;
        RefinedLexiconEntry::builder()
            .word(summary.word.as_str())
            .businesses(summary.businesses)
            .reviews(summary.reviews)
            .uses(summary.uses)
            .average_stars(summary.average_stars)
            .score(scored.score)
            .build()
    }
}
