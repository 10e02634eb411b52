

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

use super::engine::SemanticMatcher;
use super::models::{parse_matches, MatchRequest, MatcherError, RemoteMatch};
use crate::corpus::KnowledgeItem;


/// Posts `{query, items, maxResults}` to a hosted matcher endpoint.
pub struct HttpSemanticMatcher {
    endpoint: String,
    api_key: Option<String>,
    client: Client,
}

impl HttpSemanticMatcher {

    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let endpoint = endpoint.into();
        info!("HttpSemanticMatcher initialized: endpoint={}", endpoint);

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            endpoint,
            api_key: None,
            client,
        }
    }

    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

#[async_trait]
impl SemanticMatcher for HttpSemanticMatcher {
    async fn match_items(
        &self,
        query: &str,
        items: &[KnowledgeItem],
        max_results: usize,
    ) -> Result<Vec<RemoteMatch>, MatcherError> {
        let mut request = self
            .client
            .post(&self.endpoint)
            .json(&MatchRequest::new(query, items, max_results));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let payload = request
            .send()
            .await?
            .error_for_status()?
            .json::<Value>()
            .await?;

        let matches = parse_matches(payload, max_results)?;
        debug!("HTTP matcher returned {} matches", matches.len());
        Ok(matches)
    }

    fn name(&self) -> &str {
        "http"
    }
}
