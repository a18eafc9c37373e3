mod export;
mod report;
mod utils;

use {
    anyhow::{Context, Result},
    tracing::{info, warn},
    review_sentiment_core::{
        config::{Config, ConfigSource},
        distributions::Distributions,
        lexicon::load_lexicon,
        loading::load_reviews,
        pipeline::Pipeline,
        stop_words::load_stop_words,
    },
    crate::{
        export::export_tables,
        report::{report_distributions, report_stats, report_top_words},
        utils::init_logging,
    },
};

fn main() -> Result<()> {
    let (config, source) = Config::load().context("failed to load config")?;
    init_logging(&config.log_level, config.log_format);

    info!("review sentiment vs. star rating");
    match &source {
        ConfigSource::File(path) => info!("using config from {}", path.display()),
        ConfigSource::Defaults => warn!("no config file found, using defaults"),
    }

    let stop_words = load_stop_words(config.resources.stop_words_path())
        .context("failed to load stop words")?;
    let lexicon = load_lexicon(config.resources.lexicon_path())
        .context("failed to load lexicon")?;

    let loaded = load_reviews(&config.input.path, &config.load_options())
        .context("failed to load reviews")?;

    let pipeline = Pipeline::new(lexicon, stop_words, config.support)
        .with_progress_interval(config.input.progress_interval());
    let output = pipeline.run(&loaded.reviews);
    let distributions = Distributions::compute(&output.review_sentiment, &output.refined_lexicon);

    if config.output.write_csv {
        export_tables(&config.output.directory, &output, &distributions)
            .context("failed to export results")?;
    }

    report_distributions(&distributions);
    report_top_words(&output.refined_lexicon, config.output.report_top_words);
    report_stats(&loaded, &output.stats);

    Ok(())
}
