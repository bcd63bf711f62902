use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Source dataset not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Missing expected column: {0}")]
    MissingColumn(String),

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Corpus is empty after cleaning")]
    EmptyCorpus,

    #[error("Empty vocabulary: no document contains a usable term")]
    EmptyVocabulary,

    #[error("User not found: {0}")]
    UserNotFound(u64),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
