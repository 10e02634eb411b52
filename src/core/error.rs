

use thiserror::Error;

use crate::corpus::CorpusError;


#[derive(Error, Debug)]
pub enum AssistantError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusError),
}

impl From<config::ConfigError> for AssistantError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, AssistantError>;
