

pub mod config;
pub mod error;

pub use self::config::AssistantConfig;
pub use error::{AssistantError, Result};
