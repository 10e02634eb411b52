

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::composer::{compose, compose_pinned, compose_remote, Resolution};
use crate::corpus::Corpus;
use crate::intent::classify;
use crate::llm::{MatcherError, SemanticMatcher};
use crate::search::{rank, QueryContext};
use crate::DEFAULT_MAX_RESULTS;

const DEFAULT_MATCHER_TIMEOUT: Duration = Duration::from_secs(8);


/// Remote matcher first, local ranking second. A remote failure of any kind
/// only demotes the turn to the local path.
pub struct Resolver {
    corpus: Arc<Corpus>,
    matcher: Option<Arc<dyn SemanticMatcher>>,
    max_results: usize,
    matcher_timeout: Duration,
}

impl Resolver {

    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self {
            corpus,
            matcher: None,
            max_results: DEFAULT_MAX_RESULTS,
            matcher_timeout: DEFAULT_MATCHER_TIMEOUT,
        }
    }

    pub fn with_matcher(mut self, matcher: Arc<dyn SemanticMatcher>) -> Self {
        info!("Resolver using remote matcher: {}", matcher.name());
        self.matcher = Some(matcher);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.matcher_timeout = timeout;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }


    pub async fn resolve(&self, query: &str, pinned_topic: Option<&str>) -> Resolution<'_> {
        if let Some(topic) = pinned_topic {
            return self.resolve_pinned(topic);
        }

        if let Some(resolution) = self.try_remote(query).await {
            return resolution;
        }
        self.resolve_local(query)
    }


    /// Detail view of one item. Never calls the remote matcher.
    pub fn resolve_pinned(&self, topic: &str) -> Resolution<'_> {
        debug!("Resolving pinned topic: {}", topic);
        compose_pinned(topic, &self.corpus, self.max_results)
    }

    pub fn resolve_local(&self, query: &str) -> Resolution<'_> {
        let ctx = QueryContext::new(query, self.corpus.vocabulary());
        let ranked = rank(&ctx, &self.corpus, self.max_results);
        let classification = classify(query, &ranked);

        debug!(
            "Local resolution: intent={:?}, ranked={}",
            classification.intent,
            ranked.len()
        );
        compose(classification, &ranked, &self.corpus, self.max_results)
    }

    async fn try_remote(&self, query: &str) -> Option<Resolution<'_>> {
        let matcher = self.matcher.as_ref()?;
        if query.trim().is_empty() {
            return None;
        }

        let outcome = tokio::time::timeout(
            self.matcher_timeout,
            matcher.match_items(query, self.corpus.items(), self.max_results),
        )
        .await
        .unwrap_or(Err(MatcherError::Timeout(self.matcher_timeout)));

        let matches = match outcome {
            Ok(matches) => matches,
            Err(e) => {
                warn!("Remote matcher '{}' failed, using local ranking: {}", matcher.name(), e);
                return None;
            }
        };

        let resolution = compose_remote(&matches, &self.corpus, self.max_results);
        if resolution.is_none() {
            warn!(
                "Remote matcher '{}' returned no known ids ({} matches), using local ranking",
                matcher.name(),
                matches.len()
            );
        }
        resolution
    }
}
