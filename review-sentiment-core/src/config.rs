use {
    std::{
        env,
        fs::read_to_string,
        io::ErrorKind,
        path::{Path, PathBuf},
        time::Duration,
    },
    serde::Deserialize,
    crate::{
        error::{PipelineError, Result},
        loading::LoadOptions,
        support::SupportThresholds,
    },
};

pub const CONFIG_PATH_ENV: &str = "REVIEW_SENTIMENT_CONFIG";

const CONFIG_PATHS: &[&str] = &["./config.toml", "/config/config.toml"];

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub input: InputConfig,
    pub resources: ResourcesConfig,
    pub support: SupportThresholds,
    pub output: OutputConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    pub path: PathBuf,
    pub max_records: usize,
    pub skip_malformed: bool,
    pub progress_interval_secs: u64,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ResourcesConfig {
    lexicon_path: PathBuf,
    stop_words_path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub write_csv: bool,
    pub report_top_words: usize,
}

/// Where the configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_owned(),
            log_format: LogFormat::Text,
            input: InputConfig::default(),
            resources: ResourcesConfig::default(),
            support: SupportThresholds::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for LogFormat {
    fn default() -> Self {
        Self::Text
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/yelp_academic_dataset_review.json"),
            max_records: 200_000,
            skip_malformed: false,
            progress_interval_secs: 10,
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            lexicon_path: PathBuf::from("data/AFINN-111.txt"),
            stop_words_path: None,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("output"),
            write_csv: true,
            report_top_words: 20,
        }
    }
}

impl Config {
    /// Reads the file named by `REVIEW_SENTIMENT_CONFIG`, or the first of
    /// `./config.toml` and `/config/config.toml` that exists. Without any
    /// file the defaults are used. A file that exists but is invalid is an
    /// error.
    pub fn load() -> Result<(Self, ConfigSource)> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            let path = PathBuf::from(path);
            let config = Self::from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        for path in CONFIG_PATHS {
            let path = Path::new(path);
            match read_to_string(path) {
                Ok(content) => {
                    let config = Self::from_toml_str(&content, &path.display().to_string())?;
                    return Ok((config, ConfigSource::File(path.to_owned())));
                },
                Err(err) if err.kind() == ErrorKind::NotFound => continue,
                Err(err) => return Err(PipelineError::io(path, err)),
            }
        }

        Ok((Config::default(), ConfigSource::Defaults))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = read_to_string(path).map_err(|err| PipelineError::io(path, err))?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|err| PipelineError::Config {
                origin: origin.to_owned(),
                reason: err.to_string(),
            })?;
        config.validate(origin)?;
        Ok(config)
    }

    fn validate(&self, origin: &str) -> Result<()> {
        let reason = if self.input.max_records == 0 {
            Some("input.max_records must be at least 1")
        } else if self.support.min_reviews == 0 {
            Some("support.min_reviews must be at least 1")
        } else if self.support.min_businesses == 0 {
            Some("support.min_businesses must be at least 1")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(PipelineError::Config {
                origin: origin.to_owned(),
                reason: reason.to_owned(),
            }),
            None => Ok(()),
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            max_records: self.input.max_records,
            skip_malformed: self.input.skip_malformed,
            progress_interval: self.input.progress_interval(),
        }
    }
}

impl InputConfig {
    pub fn progress_interval(&self) -> Duration {
        Duration::from_secs(self.progress_interval_secs)
    }
}

impl ResourcesConfig {
    pub fn lexicon_path(&self) -> &Path {
        &self.lexicon_path
    }

    /// An empty path in the file means the built-in list.
    pub fn stop_words_path(&self) -> Option<&Path> {
        self.stop_words_path.as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::from_toml_str("", "test").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.input.max_records, 200_000);
        assert_eq!(config.support, SupportThresholds::new(200, 10));
        assert_eq!(config.resources.stop_words_path(), None);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml_str(r#"
log_format = "json"

[input]
path = "reviews.json"
max_records = 1000
skip_malformed = true

[resources]
stop_words_path = "stop_words.txt"

[support]
min_reviews = 50
"#, "test").unwrap();

        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.input.path, PathBuf::from("reviews.json"));
        assert_eq!(config.input.progress_interval_secs, 10);
        assert_eq!(config.resources.lexicon_path(), Path::new("data/AFINN-111.txt"));
        assert_eq!(config.resources.stop_words_path(), Some(Path::new("stop_words.txt")));
        assert_eq!(config.support, SupportThresholds::new(50, 10));

        let options = config.load_options();
        assert_eq!(options.max_records, 1000);
        assert!(options.skip_malformed);
    }

    #[test]
    fn empty_stop_words_path_means_builtin_list() {
        let config = Config::from_toml_str("[resources]\nstop_words_path = \"\"\n", "test").unwrap();
        assert_eq!(config.resources.stop_words_path(), None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(Config::from_toml_str("[support]\nmin_reviews = 0\n", "test"), Err(PipelineError::Config { .. })));
        assert!(matches!(Config::from_toml_str("[input]\nmax_records = 0\n", "test"), Err(PipelineError::Config { .. })));
        assert!(matches!(Config::from_toml_str("[input]\nmax_records = \"many\"\n", "test"), Err(PipelineError::Config { .. })));
        assert!(matches!(Config::from_toml_str("log_format = \"xml\"\n", "test"), Err(PipelineError::Config { .. })));
    }
}
