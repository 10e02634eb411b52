

use tracing::debug;

use super::patterns::is_yes_no;
use super::scope::ItemScope;
use super::stance::{match_stance, StanceTopic};
use super::topic::{match_topic, TopicIntent};
use crate::corpus::Category;
use crate::search::ScoredMatch;

pub const NO_MATCH_LEAD: &str = "I couldn't find a direct match. Try asking about specific areas like health care, economy, environment, education, democracy, housing, Social Security, or AI-driven worker displacement.";


/// What the classifier sees of one turn.
#[derive(Debug, Clone, Copy)]
pub struct IntentSignals<'t> {
    pub text: &'t str,
    pub yes_no: bool,
    pub top_category: Option<Category>,
}

impl<'t> IntentSignals<'t> {
    /// `text` must already be lowercased.
    pub fn new(text: &'t str, ranked: &[ScoredMatch<'_>]) -> Self {
        Self {
            text,
            yes_no: is_yes_no(text),
            top_category: infer_top_category(ranked.iter().map(|m| m.item.category)),
        }
    }
}


/// Lead sentence of a rule; `Resolved` picks among variants from the query.
#[derive(Clone, Copy)]
pub enum Answer {
    Fixed(&'static str),
    Resolved(fn(&IntentSignals<'_>) -> &'static str),
}

impl Answer {
    pub fn text(&self, signals: &IntentSignals<'_>) -> &'static str {
        match self {
            Self::Fixed(text) => *text,
            Self::Resolved(resolve) => resolve(signals),
        }
    }
}


/// Route that produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Stance(StanceTopic),
    Topic(TopicIntent),
    InferredCategory(Category),
    Pinned,
    Remote,
    NoMatch,
}


#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub intent: Intent,
    pub lead: String,
    /// `None` only for the no-match response, which carries no items.
    pub scope: Option<ItemScope>,
    pub is_stance_answer: bool,
}


/// Most frequent category; ties go to the one seen first.
pub fn infer_top_category(categories: impl IntoIterator<Item = Category>) -> Option<Category> {
    let mut counts: Vec<(Category, usize)> = Vec::new();
    for category in categories {
        match counts.iter_mut().find(|(c, _)| *c == category) {
            Some((_, n)) => *n += 1,
            None => counts.push((category, 1)),
        }
    }

    let mut top: Option<(Category, usize)> = None;
    for (category, n) in counts {
        if top.is_none_or(|(_, max)| n > max) {
            top = Some((category, n));
        }
    }
    top.map(|(category, _)| category)
}


/// Stance tier, then generic topics, then the inferred category, then no match.
pub fn classify(query: &str, ranked: &[ScoredMatch<'_>]) -> Classification {
    let text = query.to_lowercase();
    let signals = IntentSignals::new(&text, ranked);

    if let Some(rule) = match_stance(&signals) {
        debug!("Stance rule matched: {:?}", rule.topic);
        return Classification {
            intent: Intent::Stance(rule.topic),
            lead: rule.answer.text(&signals).to_string(),
            scope: Some(rule.scope),
            is_stance_answer: true,
        };
    }

    if let Some(rule) = match_topic(&signals) {
        debug!("Topic rule matched: {:?} (yes_no={})", rule.intent, signals.yes_no);
        return Classification {
            intent: Intent::Topic(rule.intent),
            lead: rule.answer.text(&signals).to_string(),
            scope: Some(rule.scope),
            is_stance_answer: false,
        };
    }

    if let Some(category) = signals.top_category {
        debug!("Falling back to inferred category: {}", category);
        return Classification {
            intent: Intent::InferredCategory(category),
            lead: format!(
                "Here's a concise summary of Winston's policies on {}.",
                category.label().to_lowercase()
            ),
            scope: Some(ItemScope::Category(category)),
            is_stance_answer: false,
        };
    }

    debug!("No intent matched and no ranked items");
    Classification {
        intent: Intent::NoMatch,
        lead: NO_MATCH_LEAD.to_string(),
        scope: None,
        is_stance_answer: false,
    }
}
