pub mod aggregation;
pub mod config;
pub mod distributions;
pub mod error;
pub mod filter;
pub mod lexicon;
pub mod loading;
pub mod models;
pub mod pipeline;
pub mod progress;
pub mod stop_words;
pub mod support;
pub mod tokenization;
