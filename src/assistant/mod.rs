

pub mod composer;
pub mod resolver;

pub use composer::{Resolution, REMOTE_LEAD};
pub use resolver::Resolver;

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::core::config::AssistantConfig;
use crate::core::error::Result;
use crate::corpus::Corpus;
use crate::intent::Intent;
use crate::llm::generation::{is_bad_faith, DEFLECTION};
use crate::llm::{GenerationContext, GeneratorFactory, MatcherFactory, ProseGenerator};
use crate::utils::bound_query;
use crate::MAX_QUERY_CHARS;


/// Final answer for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<'a> {
    pub text: String,
    pub resolution: Resolution<'a>,
    pub moderation_flagged: bool,
}

impl Reply<'_> {
    pub fn is_stance_answer(&self) -> bool {
        self.resolution.is_stance_answer
    }

    pub fn intent(&self) -> Intent {
        self.resolution.intent
    }
}


/// Entry point: bounds the input, resolves it, then asks the prose
/// generator to phrase the answer. Without a generator, or when it fails,
/// the resolution summary is the reply.
pub struct PolicyAssistant {
    resolver: Resolver,
    generator: Option<ProseGenerator>,
    max_query_chars: usize,
}

impl PolicyAssistant {

    pub fn new(resolver: Resolver) -> Self {
        Self {
            resolver,
            generator: None,
            max_query_chars: MAX_QUERY_CHARS,
        }
    }

    /// Loads the built-in corpus and wires the collaborators the config
    /// enables. Refuses to start on an invalid config or corpus.
    pub fn from_config(config: &AssistantConfig) -> Result<Self> {
        config.validate()?;

        let corpus = Arc::new(Corpus::builtin()?);
        let mut resolver = Resolver::new(corpus)
            .with_max_results(config.max_results)
            .with_timeout(config.matcher_timeout());
        if let Some(matcher) = MatcherFactory::from_config(config) {
            resolver = resolver.with_matcher(matcher);
        }

        let mut assistant = Self::new(resolver).with_max_query_chars(config.max_query_chars);
        if let Some(generator) = GeneratorFactory::from_config(config) {
            assistant = assistant.with_generator(generator);
        }

        info!(
            "PolicyAssistant ready: items={}, generator={}",
            assistant.resolver.corpus().len(),
            assistant.generator.is_some()
        );
        Ok(assistant)
    }

    pub fn with_generator(mut self, generator: ProseGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_max_query_chars(mut self, max_query_chars: usize) -> Self {
        self.max_query_chars = max_query_chars.max(1);
        self
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }


    pub async fn respond(&self, query: &str) -> Reply<'_> {
        self.answer(query, None).await
    }

    /// "Tell me more" on one item, by id or title.
    pub async fn explain(&self, topic: &str) -> Reply<'_> {
        let question = format!("Tell me about Winston's \"{}\" policy", topic.trim());
        self.answer(&question, Some(topic)).await
    }

    async fn answer(&self, raw: &str, pinned_topic: Option<&str>) -> Reply<'_> {
        let query = bound_query(raw, self.max_query_chars);
        debug!("Answering: {}", crate::safe_truncate_ellipsis(&query, 80));

        // A pinned request naming a corpus item is on-topic by construction.
        let pinned_item = pinned_topic.and_then(|topic| self.resolver.corpus().find(topic));
        if pinned_item.is_none() && is_bad_faith(&query) {
            warn!("Moderation flagged query: {}", crate::safe_truncate(&query, 80));
            let resolution = match pinned_topic {
                Some(topic) => self.resolver.resolve_pinned(topic),
                None => self.resolver.resolve_local(&query),
            };
            return Reply {
                text: DEFLECTION.to_string(),
                resolution,
                moderation_flagged: true,
            };
        }

        let resolution = self.resolver.resolve(&query, pinned_topic).await;
        let summary = resolution.summary();

        let Some(generator) = self.generator.as_ref().filter(|_| !query.is_empty()) else {
            return Reply {
                text: summary,
                resolution,
                moderation_flagged: false,
            };
        };

        let pinned_title = pinned_topic
            .map(|topic| pinned_item.map_or(topic.trim(), |item| item.title.as_str()));
        let ctx = GenerationContext {
            query: &query,
            summary: &summary,
            related: &resolution.items,
            pinned_title,
        };

        let generated = generator.generate(&ctx).await;
        let text = match generated {
            Ok(text) => text,
            Err(e) => {
                warn!("Prose generation failed, replying with summary: {}", e);
                summary
            }
        };
        Reply {
            text,
            resolution,
            moderation_flagged: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::KnowledgeItem;
    use crate::intent::StanceTopic;
    use crate::llm::providers::{Completion, CompletionRequest, LlmProvider, LlmProviderError};
    use crate::llm::{MatcherError, RemoteMatch, SemanticMatcher};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedProvider(Option<&'static str>);

    #[async_trait]
    impl LlmProvider for FixedProvider {
        async fn complete(&self, _request: CompletionRequest<'_>) -> std::result::Result<Completion, LlmProviderError> {
            match self.0 {
                Some(content) => Ok(Completion {
                    content: content.to_string(),
                    provider: "fixed".to_string(),
                    model: "fixed".to_string(),
                    usage: None,
                }),
                None => Err(LlmProviderError::Provider("upstream 502".to_string())),
            }
        }

        fn provider_name(&self) -> &str {
            "fixed"
        }

        fn model_name(&self) -> &str {
            "fixed"
        }
    }

    /// Counts calls and never matches anything.
    #[derive(Default)]
    struct CountingMatcher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SemanticMatcher for CountingMatcher {
        async fn match_items(
            &self,
            _query: &str,
            _items: &[KnowledgeItem],
            _max_results: usize,
        ) -> std::result::Result<Vec<RemoteMatch>, MatcherError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    fn offline() -> PolicyAssistant {
        PolicyAssistant::from_config(&AssistantConfig::default()).unwrap()
    }

    fn with_provider(reply: Option<&'static str>) -> PolicyAssistant {
        offline().with_generator(ProseGenerator::new(Arc::new(FixedProvider(reply))))
    }

    #[tokio::test]
    async fn test_offline_reply_is_summary() {
        let assistant = offline();
        let reply = assistant.respond("Do you support privatizing Medicare?").await;
        assert!(reply.is_stance_answer());
        assert!(reply.text.starts_with("No."));
        assert!(reply.text.contains("\n\nHighlights:\n- "));
        assert!(!reply.moderation_flagged);
    }

    #[tokio::test]
    async fn test_explain_pins_item() {
        let assistant = offline();
        let reply = assistant.explain("Human Dignity Income").await;
        assert_eq!(reply.intent(), Intent::Pinned);
        assert!(reply.text.starts_with("Here are the details of Winston's \"Human Dignity Income\" policy."));
    }

    #[tokio::test]
    async fn test_long_query_is_bounded() {
        let assistant = offline().with_max_query_chars(23);
        let long = format!("what about teacher pay {}", "and more ".repeat(100));
        let reply = assistant.respond(&long).await;
        assert_eq!(reply.resolution, assistant.resolver().resolve_local("what about teacher pay"));
    }

    #[tokio::test]
    async fn test_moderation_without_generator() {
        let assistant = offline();
        let reply = assistant.respond("Is Winston a fraud?").await;
        assert!(reply.moderation_flagged);
        assert_eq!(reply.text, DEFLECTION);
    }

    #[tokio::test]
    async fn test_flagged_query_skips_remote_matcher() {
        let matcher = Arc::new(CountingMatcher::default());
        let resolver = Resolver::new(Arc::new(Corpus::builtin().unwrap())).with_matcher(matcher.clone());
        let assistant = PolicyAssistant::new(resolver);

        let reply = assistant.respond("Is Winston a fraud?").await;
        assert!(reply.moderation_flagged);
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 0);

        assistant.respond("broadband").await;
        assert_eq!(matcher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pinned_corpus_item_is_never_deflected() {
        let assistant = with_provider(Some("Universal background checks."));
        let reply = assistant.explain("Gun Violence Prevention").await;
        assert_eq!(reply.intent(), Intent::Pinned);
        assert!(!reply.moderation_flagged);
        assert_eq!(reply.text, "Universal background checks.");
    }

    #[tokio::test]
    async fn test_policy_questions_reach_stance_rules() {
        let assistant = offline();

        let reply = assistant.respond("Do you support single payer healthcare?").await;
        assert!(!reply.moderation_flagged);
        assert_eq!(reply.intent(), Intent::Stance(StanceTopic::UniversalHealthcare));
        assert_eq!(reply.text, reply.resolution.summary());

        let reply = assistant.respond("Is Winston for trans rights?").await;
        assert!(!reply.moderation_flagged);
        assert_eq!(reply.intent(), Intent::Stance(StanceTopic::LgbtqEquality));

        let reply = assistant.explain("Gun Violence Prevention").await;
        assert!(!reply.moderation_flagged);
        assert!(reply.text.starts_with("Here are the details of Winston's \"Gun Violence Prevention\" policy."));
    }

    #[tokio::test]
    async fn test_unknown_pinned_topic_still_screened() {
        let assistant = offline();
        let reply = assistant.explain("Is Winston a fraud").await;
        assert!(reply.moderation_flagged);
        assert_eq!(reply.intent(), Intent::Pinned);
    }

    #[tokio::test]
    async fn test_generated_text_used() {
        let assistant = with_provider(Some("Winston backs\nMedicare-for-All."));
        let reply = assistant.respond("medicare for all").await;
        assert_eq!(reply.text, "Winston backs Medicare-for-All.");
    }

    #[tokio::test]
    async fn test_generation_failure_falls_back_to_summary() {
        let assistant = with_provider(None);
        let reply = assistant.respond("broadband").await;
        assert_eq!(reply.text, reply.resolution.summary());
        assert_eq!(reply.intent(), Intent::InferredCategory(crate::corpus::Category::DigitalEquity));
    }

    #[test]
    fn test_invalid_config_refuses_to_start() {
        let config = AssistantConfig {
            max_results: 0,
            ..Default::default()
        };
        assert!(PolicyAssistant::from_config(&config).is_err());
    }
}
