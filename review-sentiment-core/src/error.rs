use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Fatal errors of a run. Empty stage output is never an error.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{origin}:{line}: malformed review record: {reason}")]
    Parse {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("{origin}:{line}: invalid lexicon entry: {reason}")]
    Lexicon {
        origin: String,
        line: usize,
        reason: String,
    },

    #[error("invalid config {origin}: {reason}")]
    Config {
        origin: String,
        reason: String,
    },
}

impl PipelineError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
