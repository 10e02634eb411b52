

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::corpus::{Category, KnowledgeItem};
use crate::llm::providers::LlmProviderError;

pub const DEFAULT_MATCH_REASON: &str = "Relevant";


#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LLM provider failed: {0}")]
    Provider(#[from] LlmProviderError),

    #[error("Malformed matcher payload: {0}")]
    Malformed(String),

    #[error("Matcher timed out after {0:?}")]
    Timeout(Duration),
}


/// Item fields exposed to the remote matcher.
#[derive(Debug, Clone, Serialize)]
pub struct MatcherItem<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub category: Category,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<&'a str>,
}

impl<'a> From<&'a KnowledgeItem> for MatcherItem<'a> {
    fn from(item: &'a KnowledgeItem) -> Self {
        Self {
            id: &item.id,
            title: &item.title,
            category: item.category,
            description: &item.description,
            example: item.example.as_deref(),
        }
    }
}


#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRequest<'a> {
    pub query: &'a str,
    pub items: Vec<MatcherItem<'a>>,
    pub max_results: usize,
}

impl<'a> MatchRequest<'a> {
    pub fn new(query: &'a str, items: &'a [KnowledgeItem], max_results: usize) -> Self {
        Self {
            query,
            items: items.iter().map(MatcherItem::from).collect(),
            max_results,
        }
    }
}


#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RemoteMatch {
    pub id: String,
    /// Clamped to `0.0..=1.0`.
    pub score: f64,
    pub reason: String,
}

#[derive(Debug, Deserialize)]
struct MatchEnvelope {
    #[serde(rename = "relevantItems", alias = "relevantPolicies")]
    relevant_items: Vec<Value>,
}


/// Reads `{relevantItems: [...]}` (or the older `relevantPolicies`) leniently:
/// entries without a string id are skipped, scores clamped, reasons defaulted.
pub fn parse_matches(payload: Value, max_results: usize) -> Result<Vec<RemoteMatch>, MatcherError> {
    let envelope: MatchEnvelope = serde_json::from_value(payload)
        .map_err(|e| MatcherError::Malformed(format!("missing relevantItems: {}", e)))?;

    let matches = envelope
        .relevant_items
        .iter()
        .filter_map(|entry| {
            let id = entry
                .get("id")
                .or_else(|| entry.get("policyId"))
                .and_then(Value::as_str)?;
            Some(RemoteMatch {
                id: id.to_string(),
                score: clamp_score(entry.get("score")),
                reason: entry
                    .get("reason")
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|r| !r.is_empty())
                    .unwrap_or(DEFAULT_MATCH_REASON)
                    .to_string(),
            })
        })
        .take(max_results)
        .collect();

    Ok(matches)
}

fn clamp_score(raw: Option<&Value>) -> f64 {
    let score = match raw {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    };
    if score.is_nan() { 0.0 } else { score.clamp(0.0, 1.0) }
}
