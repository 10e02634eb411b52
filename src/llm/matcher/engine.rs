

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::models::{parse_matches, MatchRequest, MatcherError, RemoteMatch};
use super::prompt::{build_system_prompt, build_user_prompt};
use crate::corpus::KnowledgeItem;
use crate::llm::providers::{CompletionRequest, LlmProvider};

lazy_static! {
    static ref JSON_BLOCK: Regex = Regex::new(r"(?s)\{.*\}").unwrap();
}


/// Ranks corpus items against a query out of process.
#[async_trait]
pub trait SemanticMatcher: Send + Sync {

    async fn match_items(
        &self,
        query: &str,
        items: &[KnowledgeItem],
        max_results: usize,
    ) -> Result<Vec<RemoteMatch>, MatcherError>;

    fn name(&self) -> &str;
}


/// Outermost `{...}` span of a model reply, tolerating fences and chatter.
pub fn extract_json_block(content: &str) -> &str {
    JSON_BLOCK
        .find(content)
        .map(|m| m.as_str())
        .unwrap_or(content)
}


/// Prompts an LLM to rank the items and parses its JSON reply.
pub struct LlmSemanticMatcher {
    llm: Arc<dyn LlmProvider>,
    temperature: f64,
    max_tokens: u32,
}

impl LlmSemanticMatcher {

    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        info!(
            "LlmSemanticMatcher initialized: provider={}, model={}",
            llm.provider_name(),
            llm.model_name()
        );
        Self {
            llm,
            temperature: 0.2,
            max_tokens: 400,
        }
    }

    pub fn with_sampling(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }
}

#[async_trait]
impl SemanticMatcher for LlmSemanticMatcher {
    async fn match_items(
        &self,
        query: &str,
        items: &[KnowledgeItem],
        max_results: usize,
    ) -> Result<Vec<RemoteMatch>, MatcherError> {
        let system_prompt = build_system_prompt(items);
        let user_prompt = build_user_prompt(MatchRequest::new(query, items, max_results))?;

        let completion = self
            .llm
            .complete(CompletionRequest {
                system_prompt: &system_prompt,
                user_prompt: &user_prompt,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .await?;

        let block = extract_json_block(&completion.content);
        let payload: Value = serde_json::from_str(block).map_err(|e| {
            warn!(
                "Matcher reply is not JSON: {}",
                crate::safe_truncate(&completion.content, 200)
            );
            MatcherError::Malformed(e.to_string())
        })?;

        let matches = parse_matches(payload, max_results)?;
        debug!("LLM matcher returned {} matches", matches.len());
        Ok(matches)
    }

    fn name(&self) -> &str {
        "llm"
    }
}
