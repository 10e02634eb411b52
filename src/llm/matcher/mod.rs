

pub mod engine;
pub mod http;
pub mod models;
pub mod prompt;

pub use engine::{LlmSemanticMatcher, SemanticMatcher};
pub use http::HttpSemanticMatcher;
pub use models::{MatcherError, RemoteMatch};
