

use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use super::generation::ProseGenerator;
use super::matcher::{HttpSemanticMatcher, LlmSemanticMatcher, SemanticMatcher};
use super::providers::{LlmProvider, LlmProviderError, OpenRouterProvider};
use crate::core::config::AssistantConfig;

const CHAT_TIMEOUT: Duration = Duration::from_secs(30);


pub struct LlmProviderFactory;

impl LlmProviderFactory {

    pub fn create(
        config: &AssistantConfig,
        model: &str,
        timeout: Duration,
    ) -> Result<Arc<dyn LlmProvider>, LlmProviderError> {
        let api_key = config
            .llm_api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| LlmProviderError::NotConfigured("llm_api_key is not set".to_string()))?;

        let provider = OpenRouterProvider::new(&config.llm_base_url, api_key, model, timeout)
            .with_attribution(&config.llm_referer, &config.llm_app_title);
        Ok(Arc::new(provider))
    }
}


pub struct MatcherFactory;

impl MatcherFactory {

    /// A dedicated endpoint wins over prompting the LLM. `None` when the
    /// matcher is disabled or nothing is configured.
    pub fn from_config(config: &AssistantConfig) -> Option<Arc<dyn SemanticMatcher>> {
        if !config.remote_matching_available() {
            info!("Remote matching disabled; local ranking only");
            return None;
        }

        if let Some(endpoint) = &config.matcher_endpoint {
            let matcher = HttpSemanticMatcher::new(endpoint.clone(), config.matcher_timeout())
                .with_api_key(config.llm_api_key.clone());
            return Some(Arc::new(matcher));
        }

        let llm = LlmProviderFactory::create(config, &config.matcher_model, config.matcher_timeout()).ok()?;
        let matcher = LlmSemanticMatcher::new(llm)
            .with_sampling(config.matcher_temperature, config.matcher_max_tokens);
        Some(Arc::new(matcher))
    }
}


pub struct GeneratorFactory;

impl GeneratorFactory {

    pub fn from_config(config: &AssistantConfig) -> Option<ProseGenerator> {
        let llm = LlmProviderFactory::create(config, &config.chat_model, CHAT_TIMEOUT).ok()?;
        Some(ProseGenerator::new(llm).with_sampling(config.chat_temperature, config.chat_max_tokens))
    }
}
