

use config::{Config, Environment};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use super::error::{AssistantError, Result};
use crate::{DEFAULT_MAX_RESULTS, DEFAULT_OPENROUTER_URL, MAX_QUERY_CHARS};

/// Prefix shared by every environment variable the assistant reads.
pub const ENV_PREFIX: &str = "POLICY_ASSISTANT";


#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {

    pub llm_base_url: String,
    pub llm_api_key: Option<String>,
    pub llm_referer: String,
    pub llm_app_title: String,


    pub matcher_enabled: bool,
    pub matcher_endpoint: Option<String>,
    pub matcher_model: String,
    pub matcher_temperature: f64,
    pub matcher_max_tokens: u32,
    pub matcher_timeout_secs: u64,


    pub chat_model: String,
    pub chat_temperature: f64,
    pub chat_max_tokens: u32,


    pub max_results: usize,
    pub max_query_chars: usize,
}

impl AssistantConfig {

    pub fn from_env() -> Result<Self> {
        Self::from_environment(Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads from an explicit environment source; tests feed a map through
    /// `Environment::source` instead of mutating the process environment.
    pub fn from_environment(environment: Environment) -> Result<Self> {
        let config: Self = Config::builder()
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }


    pub fn validate(&self) -> Result<()> {
        Url::parse(&self.llm_base_url).map_err(|e| {
            AssistantError::Config(format!("invalid llm_base_url '{}': {}", self.llm_base_url, e))
        })?;

        if let Some(endpoint) = &self.matcher_endpoint {
            Url::parse(endpoint).map_err(|e| {
                AssistantError::Config(format!("invalid matcher_endpoint '{}': {}", endpoint, e))
            })?;
        }

        if self.max_results == 0 {
            return Err(AssistantError::Config("max_results must be at least 1".to_string()));
        }
        if self.max_query_chars == 0 {
            return Err(AssistantError::Config("max_query_chars must be at least 1".to_string()));
        }
        if self.matcher_timeout_secs == 0 {
            return Err(AssistantError::Config(
                "matcher_timeout_secs must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.matcher_temperature)
            || !(0.0..=2.0).contains(&self.chat_temperature)
        {
            return Err(AssistantError::Config("temperatures must be within 0.0..=2.0".to_string()));
        }

        Ok(())
    }


    pub fn matcher_timeout(&self) -> Duration {
        Duration::from_secs(self.matcher_timeout_secs)
    }

    /// The remote matcher needs either a dedicated endpoint or an LLM key.
    pub fn remote_matching_available(&self) -> bool {
        self.matcher_enabled && (self.matcher_endpoint.is_some() || self.llm_api_key.is_some())
    }
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            llm_base_url: DEFAULT_OPENROUTER_URL.to_string(),
            llm_api_key: None,
            llm_referer: "https://policy.winstonforcongress.com".to_string(),
            llm_app_title: "Winston Policy Assistant".to_string(),

            matcher_enabled: true,
            matcher_endpoint: None,
            matcher_model: crate::DEFAULT_LLM_MODEL.to_string(),
            matcher_temperature: 0.2,
            matcher_max_tokens: 400,
            matcher_timeout_secs: 8,

            chat_model: crate::DEFAULT_LLM_MODEL.to_string(),
            chat_temperature: 0.7,
            chat_max_tokens: 500,

            max_results: DEFAULT_MAX_RESULTS,
            max_query_chars: MAX_QUERY_CHARS,
        }
    }
}
