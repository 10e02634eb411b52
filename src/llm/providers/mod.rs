

pub mod base;
pub mod openrouter;

pub use base::{Completion, CompletionRequest, CompletionUsage, LlmProvider, LlmProviderError};
pub use openrouter::OpenRouterProvider;
