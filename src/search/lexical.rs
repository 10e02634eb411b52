

use std::collections::HashSet;
use lazy_static::lazy_static;

use crate::corpus::KnowledgeItem;

lazy_static! {
    /// Articles, auxiliaries, pronouns, filler request words and stance verbs.
    /// Stance verbs live here so "do you support X" scores on X alone.
    pub static ref STOP_WORDS: HashSet<&'static str> = [
        "the", "and", "for", "about", "what", "which", "this", "that", "these", "those",
        "with", "have", "has", "had", "are", "is", "was", "were", "be", "being", "been",
        "on", "in", "of", "to", "from", "by", "at", "as", "it", "its", "an", "a", "or",
        "if", "but", "can", "could", "should", "would", "do", "does", "did",
        "you", "your", "yours", "me", "my", "we", "our", "us", "they", "their", "them",
        "policy", "policies", "tell", "more", "question", "ask", "asks", "asking",
        "support", "supports", "supporting", "oppose", "opposes", "opposing",
        "favor", "favors", "back", "backs", "endorse", "endorses", "endorsing",
    ]
    .into_iter()
    .collect();
}

const MIN_TERM_LEN: usize = 3;


pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn is_stopword(token: &str) -> bool {
    STOP_WORDS.contains(token)
}


pub fn filter_stopwords(tokens: &[String]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| !is_stopword(t))
        .cloned()
        .collect()
}


pub fn bigrams(tokens: &[String]) -> Vec<String> {
    tokens
        .windows(2)
        .map(|pair| format!("{} {}", pair[0], pair[1]))
        .collect()
}

fn is_term(token: &str) -> bool {
    token.len() >= MIN_TERM_LEN && !is_stopword(token)
}

/// Every non-stop-word token of length > 2 found in any field of any item.
pub fn content_vocabulary(items: &[KnowledgeItem]) -> HashSet<String> {
    let mut vocabulary = HashSet::new();
    for item in items {
        let fields = [
            Some(item.title.as_str()),
            Some(item.category.label()),
            Some(item.description.as_str()),
            item.example.as_deref(),
        ];
        for field in fields.into_iter().flatten() {
            vocabulary.extend(tokenize(field).into_iter().filter(|t| is_term(t)));
        }
    }
    vocabulary
}


/// Per-turn view of a query.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub text: String,
    pub tokens: Vec<String>,
    pub terms: Vec<String>,
    pub bigrams: Vec<String>,
    pub content_terms: Vec<String>,
    padded: String,
}

impl QueryContext {

    pub fn new(query: &str, vocabulary: &HashSet<String>) -> Self {
        let text = query.to_lowercase();
        let tokens = tokenize(&text);
        let terms: Vec<String> = tokens.iter().filter(|t| is_term(t)).cloned().collect();
        let bigrams = bigrams(&terms);
        let content_terms = terms
            .iter()
            .filter(|t| vocabulary.contains(t.as_str()))
            .cloned()
            .collect();
        let padded = format!(" {} ", tokens.join(" "));

        Self {
            text,
            tokens,
            terms,
            bigrams,
            content_terms,
            padded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn is_content_term(&self, term: &str) -> bool {
        self.content_terms.iter().any(|t| t == term)
    }

    pub fn has_content_terms(&self) -> bool {
        !self.content_terms.is_empty()
    }

    /// True when any raw token, short ones included, equals one of `words`.
    pub fn mentions_any(&self, words: &[&str]) -> bool {
        self.tokens.iter().any(|t| words.contains(&t.as_str()))
    }

    pub fn mentions_all(&self, words: &[&str]) -> bool {
        words.iter().all(|w| self.tokens.iter().any(|t| t == w))
    }

    /// Whole-token phrase containment, e.g. "nj 12" for "NJ-12".
    pub fn mentions_phrase(&self, phrase: &str) -> bool {
        self.padded.contains(&format!(" {} ", phrase))
    }

    pub fn mentions_any_phrase(&self, phrases: &[&str]) -> bool {
        phrases.iter().any(|p| self.mentions_phrase(p))
    }
}
