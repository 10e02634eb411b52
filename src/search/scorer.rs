

use strum::{EnumIter, IntoEnumIterator, IntoStaticStr};

use super::lexical::QueryContext;
use crate::corpus::KnowledgeItem;

pub const DEFAULT_REASON: &str = "General relevance to your query";


/// Scored fields in phrase-credit priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Title,
    Description,
    Example,
    Category,
}

impl Field {
    pub fn base_weight(&self) -> u32 {
        match self {
            Self::Title => 3,
            Self::Description => 2,
            Self::Example | Self::Category => 1,
        }
    }

    pub fn content_bonus(&self) -> u32 {
        match self {
            Self::Title => 2,
            Self::Description | Self::Example | Self::Category => 1,
        }
    }

    /// Always above `base_weight + content_bonus` for the same field.
    pub fn phrase_bonus(&self) -> u32 {
        match self {
            Self::Title => 6,
            Self::Description => 4,
            Self::Example | Self::Category => 3,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}


/// Lowercased field text of one item, built once per query.
#[derive(Debug, Clone)]
pub struct ItemFields<'a> {
    pub item: &'a KnowledgeItem,
    pub title: String,
    pub description: String,
    pub example: String,
    pub category: String,
}

impl<'a> ItemFields<'a> {
    pub fn new(item: &'a KnowledgeItem) -> Self {
        Self {
            item,
            title: item.title.to_lowercase(),
            description: item.description.to_lowercase(),
            example: item.example.as_deref().unwrap_or_default().to_lowercase(),
            category: item.category.label().to_lowercase(),
        }
    }

    pub fn text(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Description => &self.description,
            Field::Example => &self.example,
            Field::Category => &self.category,
        }
    }

    pub fn title_or_description_contains(&self, needle: &str) -> bool {
        self.title.contains(needle) || self.description.contains(needle)
    }
}


#[derive(Debug, Clone)]
pub struct ScoredMatch<'a> {
    pub item: &'a KnowledgeItem,
    pub score: u32,
    pub matched_content_term: bool,
    pub reasons: Vec<String>,
}

impl<'a> ScoredMatch<'a> {

    pub fn reason(&self) -> String {
        if self.reasons.is_empty() {
            DEFAULT_REASON.to_string()
        } else {
            self.reasons.join("; ")
        }
    }

    /// Heuristic bonus; does not count as a content-term match.
    pub fn boost(&mut self, bonus: u32, annotation: &str) {
        self.score += bonus;
        self.reasons.push(annotation.to_string());
    }
}


pub fn score_item<'a>(ctx: &QueryContext, fields: &ItemFields<'a>) -> ScoredMatch<'a> {
    let mut score = 0;
    let mut matched_content_term = false;
    let mut field_matches: [Vec<&str>; 4] = Default::default();
    let mut phrase_matches: Vec<&str> = Vec::new();

    for term in &ctx.terms {
        let is_content = ctx.is_content_term(term);
        for field in Field::iter() {
            if !fields.text(field).contains(term.as_str()) {
                continue;
            }
            score += field.base_weight();
            if is_content {
                score += field.content_bonus();
                matched_content_term = true;
            }
            let seen = &mut field_matches[field.index()];
            if !seen.contains(&term.as_str()) {
                seen.push(term.as_str());
            }
        }
    }

    for phrase in &ctx.bigrams {
        if let Some(field) = Field::iter().find(|f| fields.text(*f).contains(phrase.as_str())) {
            score += field.phrase_bonus();
            phrase_matches.push(phrase.as_str());
            matched_content_term = true;
        }
    }

    let mut reasons = Vec::new();
    for field in [Field::Title, Field::Description, Field::Example] {
        let matched = &field_matches[field.index()];
        if !matched.is_empty() {
            let name: &'static str = field.into();
            reasons.push(format!("{} matched: {}", name, matched.join(", ")));
        }
    }
    if !field_matches[Field::Category.index()].is_empty() {
        reasons.push(format!("category matched: {}", fields.category));
    }
    if !phrase_matches.is_empty() {
        reasons.push(format!("phrase matched: {}", phrase_matches.join(", ")));
    }

    ScoredMatch {
        item: fields.item,
        score,
        matched_content_term,
        reasons,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Category;
    use std::collections::HashSet;

    fn item() -> KnowledgeItem {
        KnowledgeItem::new(
            "VII.1",
            Category::EducationOpportunity,
            "Increase Teacher Pay",
            "Raise salaries for public school teachers",
            Some("Plainfield classrooms"),
        )
    }

    fn ctx(query: &str, vocabulary: &[&str]) -> QueryContext {
        let vocabulary: HashSet<String> = vocabulary.iter().map(|w| w.to_string()).collect();
        QueryContext::new(query, &vocabulary)
    }

    #[test]
    fn test_title_content_term_scores_and_flags() {
        let item = item();
        let fields = ItemFields::new(&item);
        let scored = score_item(&ctx("teacher", &["teacher"]), &fields);
        // title 3+2, description "teachers" 2+1
        assert_eq!(scored.score, 8);
        assert!(scored.matched_content_term);
        assert_eq!(
            scored.reason(),
            "title matched: teacher; description matched: teacher"
        );
    }

    #[test]
    fn test_non_content_term_does_not_flag() {
        let item = item();
        let fields = ItemFields::new(&item);
        let scored = score_item(&ctx("teach", &[]), &fields);
        assert_eq!(scored.score, 5);
        assert!(!scored.matched_content_term);
    }

    #[test]
    fn test_phrase_credited_to_first_field_only() {
        let item = KnowledgeItem::new(
            "X.1",
            Category::SustainableFuture,
            "Clean Energy Jobs",
            "Clean energy for every town",
            None,
        );
        let fields = ItemFields::new(&item);
        let scored = score_item(&ctx("clean energy", &[]), &fields);
        // tokens: (3 + 2) * 2, phrase in title only: 6
        assert_eq!(scored.score, 16);
        assert!(scored.reason().ends_with("phrase matched: clean energy"));
    }

    #[test]
    fn test_phrase_bonus_dominates_token_credit() {
        for field in Field::iter() {
            assert!(field.phrase_bonus() > field.base_weight() + field.content_bonus());
        }
    }

    #[test]
    fn test_category_reason_uses_label() {
        let item = item();
        let fields = ItemFields::new(&item);
        let scored = score_item(&ctx("opportunity", &["opportunity"]), &fields);
        assert_eq!(scored.score, 2);
        assert_eq!(scored.reason(), "category matched: education & opportunity");
    }

    #[test]
    fn test_unmatched_item_has_default_reason() {
        let item = item();
        let fields = ItemFields::new(&item);
        let mut scored = score_item(&ctx("ukraine", &["ukraine"]), &fields);
        assert_eq!(scored.score, 0);
        assert_eq!(scored.reason(), DEFAULT_REASON);

        scored.boost(5, "campaign finance emphasis");
        assert_eq!(scored.score, 5);
        assert!(!scored.matched_content_term);
    }
}
