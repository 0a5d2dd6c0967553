use crate::minimize::MinimizeError;
use crate::model::ModelError;
use crate::output::OutputError;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{msg}: {source}")]
    ConfigReadError {
        msg: String,
        source: config::ConfigError,
    },
    #[error("failure reading input feed: {0}")]
    FeedReadError(#[from] ModelError),
    #[error("failure minimizing feed: {0}")]
    MinimizeError(#[from] MinimizeError),
    #[error("failure writing output feed: {0}")]
    OutputError(#[from] OutputError),
    #[error("failure writing summary to '{filename}': {msg}")]
    SummaryWriteError { filename: String, msg: String },
    #[error("failure serializing feed summary: {0}")]
    SummarySerializeError(#[from] serde_json::Error),
    #[error("failure building thread pool: {0}")]
    ThreadPoolError(#[from] rayon::ThreadPoolBuildError),
}
