use {
    std::{
        fs::{self, File},
        io::ErrorKind,
        path::{Path, PathBuf},
    },
    anyhow::{Context, Result},
    serde::Serialize,
    tracing::{info, warn},
    review_sentiment_core::{
        distributions::Distributions,
        pipeline::PipelineOutput,
    },
};

const REVIEW_SENTIMENT_HEADER: &[&str] = &["review_id", "stars", "sentiment"];
const WORD_SUMMARY_HEADER: &[&str] = &["word", "businesses", "reviews", "uses", "average_stars"];
const REFINED_LEXICON_HEADER: &[&str] = &["word", "businesses", "reviews", "uses", "average_stars", "score"];

/// Writes every table next to its final name first and renames them into
/// place only once all of them were written. On failure the staged files are
/// removed and no final file is touched.
pub fn export_tables(directory: &Path, output: &PipelineOutput, distributions: &Distributions) -> Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create output directory {}", directory.display()))?;

    let mut staged = Vec::new();
    if let Err(err) = stage_tables(directory, output, distributions, &mut staged) {
        discard_staged(&staged);
        return Err(err);
    }

    for (staged_path, path) in &staged {
        fs::rename(staged_path, path)
            .with_context(|| format!("failed to move {} to {}", staged_path.display(), path.display()))?;
    }
    info!("exported {} files to {}", staged.len(), directory.display());

    Ok(())
}

fn stage_tables(
    directory: &Path,
    output: &PipelineOutput,
    distributions: &Distributions,
    staged: &mut Vec<(PathBuf, PathBuf)>,
) -> Result<()> {
    let path = staged_path(directory, "review_sentiment.csv", staged);
    write_csv(&path, REVIEW_SENTIMENT_HEADER, &output.review_sentiment)?;

    let path = staged_path(directory, "word_summary.csv", staged);
    write_csv(&path, WORD_SUMMARY_HEADER, &output.word_summary)?;

    let path = staged_path(directory, "refined_lexicon.csv", staged);
    write_csv(&path, REFINED_LEXICON_HEADER, &output.refined_lexicon)?;

    let path = staged_path(directory, "distributions.json", staged);
    let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(file, distributions)
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote distributions to {}", path.display());

    Ok(())
}

// registered before writing so that a half written file is cleaned up too
fn staged_path(directory: &Path, name: &str, staged: &mut Vec<(PathBuf, PathBuf)>) -> PathBuf {
    let path = directory.join(format!("{}.tmp", name));
    staged.push((path.clone(), directory.join(name)));
    path
}

fn discard_staged(staged: &[(PathBuf, PathBuf)]) {
    for (staged_path, _) in staged {
        match fs::remove_file(staged_path) {
            Ok(()) => {},
            Err(err) if err.kind() == ErrorKind::NotFound => {},
            Err(err) => warn!("failed to remove {}: {}", staged_path.display(), err),
        }
    }
}

// header is written by hand so that empty tables still get one
fn write_csv<T: Serialize>(path: &Path, header: &[&str], rows: &[T]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    csv_writer.write_record(header)
        .with_context(|| format!("failed to write header to {}", path.display()))?;
    for row in rows {
        csv_writer.serialize(row)
            .with_context(|| format!("failed to write row to {}", path.display()))?;
    }

    csv_writer.flush().with_context(|| format!("failed to flush {}", path.display()))?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use {
        std::env,
        review_sentiment_core::{models::ReviewSentiment, pipeline::PipelineStats},
        super::*,
    };

    const FINAL_FILES: &[&str] = &["review_sentiment.csv", "word_summary.csv", "refined_lexicon.csv", "distributions.json"];

    fn output() -> PipelineOutput {
        PipelineOutput {
            review_sentiment: vec![ReviewSentiment { review_id: "r1".to_owned(), stars: 5, sentiment: 4.0 }],
            word_summary: Vec::new(),
            refined_lexicon: Vec::new(),
            stats: PipelineStats::default(),
        }
    }

    fn fresh_directory(name: &str) -> PathBuf {
        let directory = env::temp_dir().join(format!("review-sentiment-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&directory);
        directory
    }

    #[test]
    fn writes_header_and_rows() {
        let path = env::temp_dir().join(format!("review-sentiment-export-{}.csv", std::process::id()));
        let rows = vec![ReviewSentiment { review_id: "r1".to_owned(), stars: 5, sentiment: 4.0 }];

        write_csv(&path, REVIEW_SENTIMENT_HEADER, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(content, "review_id,stars,sentiment\nr1,5,4.0\n");
    }

    #[test]
    fn empty_table_still_has_header() {
        let path = env::temp_dir().join(format!("review-sentiment-export-empty-{}.csv", std::process::id()));
        let rows: Vec<ReviewSentiment> = Vec::new();

        write_csv(&path, REVIEW_SENTIMENT_HEADER, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(content, "review_id,stars,sentiment\n");
    }

    #[test]
    fn exports_every_file_without_leftovers() {
        let directory = fresh_directory("export-ok");
        let output = output();
        let distributions = Distributions::compute(&output.review_sentiment, &output.refined_lexicon);

        export_tables(&directory, &output, &distributions).unwrap();

        for name in FINAL_FILES {
            assert!(directory.join(name).is_file(), "{} is missing", name);
            assert!(!directory.join(format!("{}.tmp", name)).exists());
        }
        let content = fs::read_to_string(directory.join("review_sentiment.csv")).unwrap();
        fs::remove_dir_all(&directory).unwrap();
        assert_eq!(content, "review_id,stars,sentiment\nr1,5,4.0\n");
    }

    #[test]
    fn failed_write_leaves_no_output() {
        let directory = fresh_directory("export-fail");
        // a directory where the third table goes makes its write fail
        fs::create_dir_all(directory.join("refined_lexicon.csv.tmp")).unwrap();
        let output = output();
        let distributions = Distributions::compute(&output.review_sentiment, &output.refined_lexicon);

        let result = export_tables(&directory, &output, &distributions);

        let leftovers: Vec<_> = FINAL_FILES.iter()
            .flat_map(|name| vec![name.to_string(), format!("{}.tmp", name)])
            .filter(|name| directory.join(name).is_file())
            .collect();
        fs::remove_dir_all(&directory).unwrap();
        assert!(result.is_err());
        assert!(leftovers.is_empty(), "left behind: {:?}", leftovers);
    }
}
