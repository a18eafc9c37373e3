use {
    std::{
        collections::HashSet,
        fs::File,
        io::{BufRead, BufReader},
        path::Path,
    },
    tracing::info,
    crate::error::{PipelineError, Result},
};

// snowball english list
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "aren't", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can't", "cannot", "could", "couldn't", "did", "didn't", "do", "does", "doesn't",
    "doing", "don't", "down", "during", "each", "few", "for", "from", "further", "had", "hadn't",
    "has", "hasn't", "have", "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here",
    "here's", "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself", "let's", "me",
    "more", "most", "mustn't", "my", "myself", "no", "nor", "not", "of", "off", "on", "once",
    "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same",
    "shan't", "she", "she'd", "she'll", "she's", "should", "shouldn't", "so", "some", "such",
    "than", "that", "that's", "the", "their", "theirs", "them", "themselves", "then", "there",
    "there's", "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we", "we'd",
    "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when", "when's", "where",
    "where's", "which", "while", "who", "who's", "whom", "why", "why's", "with", "won't",
    "would", "wouldn't", "you", "you'd", "you'll", "you're", "you've", "your", "yours",
    "yourself", "yourselves",
];

#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    pub fn from_words<I, S>(words: I) -> Self where I: IntoIterator<Item = S>, S: AsRef<str> {
        Self {
            words: words.into_iter().map(|word| word.as_ref().trim().to_lowercase()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// One word per line. Blank lines and `#` comments are ignored.
pub fn read_stop_words<R: BufRead>(reader: R) -> std::io::Result<StopWords> {
    let mut words = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let word = line.trim();
        if !word.is_empty() && !word.starts_with('#') {
            words.push(word.to_owned());
        }
    }

    Ok(StopWords::from_words(words))
}

pub fn load_stop_words(path: Option<&Path>) -> Result<StopWords> {
    let stop_words = match path {
        Some(path) => {
            let file = File::open(path).map_err(|err| PipelineError::io(path, err))?;
            let stop_words = read_stop_words(BufReader::new(file)).map_err(|err| PipelineError::io(path, err))?;
            info!("loaded {} stop words from {}", stop_words.len(), path.display());
            stop_words
        },
        None => {
            let stop_words = StopWords::english();
            info!("using built-in english stop words ({} words)", stop_words.len());
            stop_words
        },
    };

    Ok(stop_words)
}
