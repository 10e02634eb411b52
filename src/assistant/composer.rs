

use crate::corpus::{Corpus, KnowledgeItem};
use crate::intent::{Classification, Intent, ItemScope};
use crate::llm::RemoteMatch;
use crate::search::{rank, QueryContext, RankedItem, ScoredMatch};

pub const REMOTE_LEAD: &str = "Top policy matches for your question:";

pub const PINNED_REASON: &str = "Selected policy";

const HIGHLIGHT_COUNT: usize = 4;


/// Outcome of one turn: the lead sentence, the items behind it and the
/// route that produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'a> {
    pub lead_text: String,
    pub items: Vec<RankedItem<'a>>,
    pub is_stance_answer: bool,
    pub intent: Intent,
}

impl<'a> Resolution<'a> {

    /// Lead followed by up to four `- title: description` lines.
    pub fn summary(&self) -> String {
        if self.items.is_empty() {
            return self.lead_text.clone();
        }

        let bullets: Vec<String> = self
            .items
            .iter()
            .take(HIGHLIGHT_COUNT)
            .map(|r| format!("- {}: {}", r.item.title, r.item.description))
            .collect();

        match self.intent {
            Intent::Remote => format!("{}\n\n{}", self.lead_text, bullets.join("\n")),
            _ => format!("{}\n\nHighlights:\n{}", self.lead_text, bullets.join("\n")),
        }
    }

    pub fn item_ids(&self) -> Vec<&'a str> {
        self.items.iter().map(|r| r.item.id.as_str()).collect()
    }
}


/// Ranked matches admitted by the scope, else every corpus item it admits.
pub fn select_items<'a>(
    scope: ItemScope,
    ranked: &[ScoredMatch<'a>],
    corpus: &'a Corpus,
    max_results: usize,
) -> Vec<RankedItem<'a>> {
    let admitted: Vec<RankedItem<'a>> = ranked
        .iter()
        .filter(|m| scope.admits(m.item))
        .take(max_results)
        .map(RankedItem::from)
        .collect();
    if !admitted.is_empty() {
        return admitted;
    }

    let reason = scope.reason();
    corpus
        .filter(move |item| scope.admits(item))
        .take(max_results)
        .map(|item| RankedItem::new(item, reason.clone()))
        .collect()
}


pub fn compose<'a>(
    classification: Classification,
    ranked: &[ScoredMatch<'a>],
    corpus: &'a Corpus,
    max_results: usize,
) -> Resolution<'a> {
    let items = match classification.scope {
        Some(scope) => select_items(scope, ranked, corpus, max_results),
        None => Vec::new(),
    };

    Resolution {
        lead_text: classification.lead,
        items,
        is_stance_answer: classification.is_stance_answer,
        intent: classification.intent,
    }
}


/// Maps remote ids back onto the corpus. Unknown ids are dropped; `None`
/// when nothing survives.
pub fn compose_remote<'a>(
    matches: &[RemoteMatch],
    corpus: &'a Corpus,
    max_results: usize,
) -> Option<Resolution<'a>> {
    let items: Vec<RankedItem<'a>> = matches
        .iter()
        .filter_map(|m| corpus.get(&m.id).map(|item| RankedItem::new(item, m.reason.as_str())))
        .take(max_results)
        .collect();

    if items.is_empty() {
        return None;
    }

    Some(Resolution {
        lead_text: REMOTE_LEAD.to_string(),
        items,
        is_stance_answer: false,
        intent: Intent::Remote,
    })
}


pub fn pinned_lead(title: &str) -> String {
    format!("Here are the details of Winston's \"{}\" policy.", title)
}

/// Detail view of one item: the item itself, then its lexical neighbours.
pub fn compose_pinned<'a>(topic: &str, corpus: &'a Corpus, max_results: usize) -> Resolution<'a> {
    let pinned: Option<&'a KnowledgeItem> = corpus.find(topic);
    let title = pinned.map_or(topic.trim(), |item| item.title.as_str());

    let ctx = QueryContext::new(title, corpus.vocabulary());
    let neighbours = rank(&ctx, corpus, max_results + 1);

    let mut items: Vec<RankedItem<'a>> = Vec::with_capacity(max_results);
    if let Some(item) = pinned {
        items.push(RankedItem::new(item, PINNED_REASON));
    }
    items.extend(
        neighbours
            .iter()
            .filter(|m| pinned.is_none_or(|p| p.id != m.item.id))
            .map(RankedItem::from),
    );
    items.truncate(max_results);

    Resolution {
        lead_text: pinned_lead(title),
        items,
        is_stance_answer: false,
        intent: Intent::Pinned,
    }
}
