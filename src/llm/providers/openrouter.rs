

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::base::{Completion, CompletionRequest, CompletionUsage, LlmProvider, LlmProviderError};

/// Ceiling in USD per million tokens passed to OpenRouter's router.
const MAX_PRICE_PROMPT: f64 = 1.0;
const MAX_PRICE_COMPLETION: f64 = 2.0;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
    max_tokens: u32,
    stream: bool,
    provider: ProviderRouting,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ProviderRouting {
    sort: &'static str,
    max_price: MaxPrice,
    allow_fallbacks: bool,
    quantizations: [&'static str; 3],
}

#[derive(Debug, Serialize)]
struct MaxPrice {
    prompt: f64,
    completion: f64,
}

impl Default for ProviderRouting {
    fn default() -> Self {
        Self {
            sort: "price",
            max_price: MaxPrice {
                prompt: MAX_PRICE_PROMPT,
                completion: MAX_PRICE_COMPLETION,
            },
            allow_fallbacks: true,
            quantizations: ["fp8", "fp16", "bf16"],
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<CompletionUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}


/// OpenAI-compatible chat completions against OpenRouter.
pub struct OpenRouterProvider {
    base_url: String,
    api_key: String,
    model: String,
    referer: String,
    app_title: String,
    client: Client,
}

impl OpenRouterProvider {

    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let model = model.into();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        info!("OpenRouter provider initialized (model={}, base_url={})", model, base_url);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            base_url,
            api_key: api_key.into(),
            model,
            referer: String::new(),
            app_title: String::new(),
            client,
        }
    }

    /// Attribution headers OpenRouter shows on its dashboard.
    pub fn with_attribution(mut self, referer: impl Into<String>, app_title: impl Into<String>) -> Self {
        self.referer = referer.into();
        self.app_title = app_title.into();
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmProvider for OpenRouterProvider {
    async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, LlmProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: request.system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: request.user_prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            stream: false,
            provider: ProviderRouting::default(),
        };

        debug!(
            "OpenRouter request: model={}, max_tokens={}, prompt_chars={}",
            self.model,
            request.max_tokens,
            request.system_prompt.len() + request.user_prompt.len()
        );

        let mut builder = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body);
        if !self.referer.is_empty() {
            builder = builder.header("HTTP-Referer", &self.referer);
        }
        if !self.app_title.is_empty() {
            builder = builder.header("X-Title", &self.app_title);
        }

        let response = builder
            .send()
            .await?
            .error_for_status()
            .map_err(LlmProviderError::Http)?
            .json::<ChatResponse>()
            .await?;

        let content = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmProviderError::Provider("No choices in response".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(Completion {
            content,
            provider: "openrouter".to_string(),
            model: self.model.clone(),
            usage: response.usage,
        })
    }

    fn provider_name(&self) -> &str {
        "openrouter"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
