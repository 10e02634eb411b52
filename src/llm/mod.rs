

pub mod factory;
pub mod generation;
pub mod matcher;
pub mod providers;

pub use factory::{GeneratorFactory, LlmProviderFactory, MatcherFactory};
pub use generation::{GenerationContext, ProseGenerator};
pub use matcher::{HttpSemanticMatcher, LlmSemanticMatcher, MatcherError, RemoteMatch, SemanticMatcher};
pub use providers::{LlmProvider, LlmProviderError, OpenRouterProvider};
