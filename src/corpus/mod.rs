

mod models;

pub use models::{Category, KnowledgeItem};

use std::collections::HashSet;
use thiserror::Error;
use tracing::info;

use crate::search::lexical::content_vocabulary;
use models::RawItem;

const BUILTIN_POLICIES: &str = include_str!("../../data/policies.json");


#[derive(Error, Debug)]
pub enum CorpusError {
    #[error("Malformed corpus data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Duplicate item id: {0}")]
    DuplicateId(String),

    #[error("Unknown category '{category}' on item {id}")]
    UnknownCategory { id: String, category: String },

    #[error("Corpus contains no items")]
    Empty,
}


/// Immutable knowledge base plus the vocabulary derived from it.
///
/// Built once at startup. The content vocabulary is computed here so the
/// matcher never pays for it on the first query.
#[derive(Debug, Clone)]
pub struct Corpus {
    items: Vec<KnowledgeItem>,
    vocabulary: HashSet<String>,
}

impl Corpus {

    pub fn builtin() -> Result<Self, CorpusError> {
        Self::from_json(BUILTIN_POLICIES)
    }


    pub fn from_json(data: &str) -> Result<Self, CorpusError> {
        let raw: Vec<RawItem> = serde_json::from_str(data)?;
        let items = raw
            .into_iter()
            .map(|r| -> Result<KnowledgeItem, CorpusError> {
                let category = Category::parse_label(&r.category).ok_or_else(|| {
                    CorpusError::UnknownCategory {
                        id: r.id.clone(),
                        category: r.category.clone(),
                    }
                })?;
                Ok(KnowledgeItem {
                    id: r.id,
                    category,
                    title: r.title,
                    description: r.description,
                    example: r.example.filter(|e| !e.trim().is_empty()),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_items(items)
    }


    pub fn from_items(items: Vec<KnowledgeItem>) -> Result<Self, CorpusError> {
        if items.is_empty() {
            return Err(CorpusError::Empty);
        }

        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CorpusError::DuplicateId(item.id.clone()));
            }
        }

        let vocabulary = content_vocabulary(&items);
        info!(
            "Corpus loaded: {} items, {} content terms",
            items.len(),
            vocabulary.len()
        );

        Ok(Self { items, vocabulary })
    }


    pub fn items(&self) -> &[KnowledgeItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }


    pub fn vocabulary(&self) -> &HashSet<String> {
        &self.vocabulary
    }


    pub fn get(&self, id: &str) -> Option<&KnowledgeItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Resolves a pinned topic by id first, then by case-insensitive title.
    pub fn find(&self, topic: &str) -> Option<&KnowledgeItem> {
        let topic = topic.trim();
        self.get(topic).or_else(|| {
            self.items
                .iter()
                .find(|item| item.title.eq_ignore_ascii_case(topic))
        })
    }


    pub fn filter<'a, F>(&'a self, predicate: F) -> impl Iterator<Item = &'a KnowledgeItem> + 'a
    where
        F: Fn(&KnowledgeItem) -> bool + 'a,
    {
        self.items.iter().filter(move |item| predicate(item))
    }
}
