use {
    std::{
        collections::HashSet,
        fs::File,
        io::{BufRead, BufReader, ErrorKind},
        path::Path,
        time::Duration,
    },
    tracing::{info, warn},
    crate::{
        error::{PipelineError, Result},
        models::Review,
        progress::Progress,
    },
};

#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub max_records: usize,
    pub skip_malformed: bool,
    pub progress_interval: Duration,
}

#[derive(Debug)]
pub struct LoadedReviews {
    pub reviews: Vec<Review>,
    pub skipped_lines: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            max_records: 200_000,
            skip_malformed: false,
            progress_interval: Duration::from_secs(10),
        }
    }
}

pub fn load_reviews(path: &Path, options: &LoadOptions) -> Result<LoadedReviews> {
    info!("loading at most {} reviews from {}", options.max_records, path.display());

    let file = File::open(path).map_err(|err| PipelineError::io(path, err))?;
    read_reviews(BufReader::new(file), &path.display().to_string(), options)
        .map_err(|err| match err {
            // read_reviews only knows the origin name, put the real path back
            PipelineError::Io { source, .. } => PipelineError::io(path, source),
            other => other,
        })
}

/// Reads at most `options.max_records` lines. Lines past the cap are never
/// read from the underlying reader. A repeated `review_id` is treated like a
/// malformed line.
pub fn read_reviews<R: BufRead>(reader: R, origin: &str, options: &LoadOptions) -> Result<LoadedReviews> {
    let mut progress = Progress::new("loading reviews".to_owned(), options.progress_interval);
    let mut reviews = Vec::new();
    let mut skipped_lines = 0;
    let mut seen_ids = HashSet::new();

    for (index, line) in reader.lines().take(options.max_records).enumerate() {
        let line_number = index + 1;

        let parsed = match line {
            Ok(line) => serde_json::from_str::<Review>(&line).map_err(|err| err.to_string()),
            Err(err) if err.kind() == ErrorKind::InvalidData => Err(err.to_string()),
            Err(err) => return Err(PipelineError::io(origin, err)),
        };
        let parsed = parsed.and_then(|review| if seen_ids.insert(review.review_id.clone()) {
            Ok(review)
        } else {
            Err(format!("duplicate review_id {:?}", review.review_id))
        });

        match parsed {
            Ok(review) => reviews.push(review),
            Err(reason) if options.skip_malformed => {
                warn!("skipping malformed line {} of {}: {}", line_number, origin, reason);
                skipped_lines += 1;
            },
            Err(reason) => return Err(PipelineError::Parse {
                origin: origin.to_owned(),
                line: line_number,
                reason,
            }),
        }

        progress.update();
    }

    progress.finish();
    info!("loaded {} reviews ({} malformed lines skipped)", reviews.len(), skipped_lines);

    Ok(LoadedReviews {
        reviews,
        skipped_lines,
    })
}

#[cfg(test)]
mod tests {
    use {
        std::io::Cursor,
        super::*,
    };

    const CORPUS: &str = concat!(
        r#"{"review_id":"r1","business_id":"b1","stars":5,"text":"Great food!"}"#, "\n",
        r#"{"review_id":"r2","business_id":"b2","stars":1,"text":"Awful.","cool":3}"#, "\n",
        r#"{"review_id":"r3","business_id":"b1","stars":3,"text":"Fine"}"#, "\n",
    );

    fn options(max_records: usize, skip_malformed: bool) -> LoadOptions {
        LoadOptions {
            max_records,
            skip_malformed,
            ..LoadOptions::default()
        }
    }

    #[test]
    fn reads_records_in_file_order() {
        let loaded = read_reviews(Cursor::new(CORPUS), "corpus", &options(10, false)).unwrap();

        let ids: Vec<_> = loaded.reviews.iter().map(|review| review.review_id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
        assert_eq!(loaded.reviews[1], Review::new("r2", "b2", 1, "Awful."));
        assert_eq!(loaded.skipped_lines, 0);
    }

    #[test]
    fn stops_at_max_records() {
        let loaded = read_reviews(Cursor::new(CORPUS), "corpus", &options(2, false)).unwrap();
        assert_eq!(loaded.reviews.len(), 2);
    }

    #[test]
    fn lines_past_the_cap_are_not_parsed() {
        let corpus = format!("{}not json\n", CORPUS);
        let loaded = read_reviews(Cursor::new(corpus), "corpus", &options(3, false)).unwrap();
        assert_eq!(loaded.reviews.len(), 3);
    }

    #[test]
    fn malformed_line_aborts_with_line_number() {
        let corpus = concat!(
            r#"{"review_id":"r1","business_id":"b1","stars":5,"text":"ok"}"#, "\n",
            r#"{"review_id":"r2","business_id":"b2","stars":1}"#, "\n",
        );

        let err = read_reviews(Cursor::new(corpus), "corpus", &options(10, false)).unwrap_err();
        match err {
            PipelineError::Parse { origin, line, .. } => {
                assert_eq!(origin, "corpus");
                assert_eq!(line, 2);
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn malformed_lines_are_skipped_when_configured() {
        let corpus = format!("{{broken\n{}", CORPUS);
        let loaded = read_reviews(Cursor::new(corpus), "corpus", &options(10, true)).unwrap();

        assert_eq!(loaded.reviews.len(), 3);
        assert_eq!(loaded.skipped_lines, 1);
    }

    #[test]
    fn repeated_review_id_aborts() {
        let corpus = concat!(
            r#"{"review_id":"r1","business_id":"b1","stars":5,"text":"good"}"#, "\n",
            r#"{"review_id":"r1","business_id":"b2","stars":1,"text":"good"}"#, "\n",
        );

        let err = read_reviews(Cursor::new(corpus), "corpus", &options(10, false)).unwrap_err();
        match err {
            PipelineError::Parse { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("duplicate review_id"));
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn repeated_review_id_is_skipped_when_configured() {
        let corpus = concat!(
            r#"{"review_id":"r1","business_id":"b1","stars":5,"text":"good"}"#, "\n",
            r#"{"review_id":"r1","business_id":"b2","stars":1,"text":"good"}"#, "\n",
            r#"{"review_id":"r2","business_id":"b2","stars":1,"text":"bad"}"#, "\n",
        );

        let loaded = read_reviews(Cursor::new(corpus), "corpus", &options(10, true)).unwrap();

        assert_eq!(loaded.reviews, vec![
            Review::new("r1", "b1", 5, "good"),
            Review::new("r2", "b2", 1, "bad"),
        ]);
        assert_eq!(loaded.skipped_lines, 1);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_reviews(Path::new("/nonexistent/reviews.json"), &LoadOptions::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/reviews.json"));
    }

    #[test]
    fn empty_input_yields_no_reviews() {
        let loaded = read_reviews(Cursor::new(""), "corpus", &LoadOptions::default()).unwrap();
        assert!(loaded.reviews.is_empty());
    }
}
