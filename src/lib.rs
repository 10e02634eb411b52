

pub mod assistant;
pub mod core;
pub mod corpus;
pub mod intent;
pub mod llm;
pub mod search;
pub mod utils;

pub use utils::{safe_truncate, safe_truncate_ellipsis};


pub use assistant::{PolicyAssistant, Reply, Resolution, Resolver};
pub use crate::core::config::AssistantConfig;
pub use crate::core::error::{AssistantError, Result};
pub use corpus::{Category, Corpus, CorpusError, KnowledgeItem};
pub use intent::Intent;
pub use search::RankedItem;


pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";


pub const DEFAULT_LLM_MODEL: &str = "meta-llama/llama-3.1-70b-instruct:floor";


pub const DEFAULT_MAX_RESULTS: usize = 6;


pub const MAX_QUERY_CHARS: usize = 300;
