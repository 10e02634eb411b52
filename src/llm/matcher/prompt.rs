

use serde::Serialize;

use super::models::{MatchRequest, MatcherItem};
use crate::corpus::KnowledgeItem;


pub const MATCHER_PREAMBLE: &str = r#"You are Winston Jordan's policy matching assistant for NJ-12. Given a user query and a list of policies, return the most semantically relevant policies.

CONTEXT ANALYSIS RULES:
- "Gay rights" and related terms map to LGBTQ+ equality, anti-discrimination protections, marriage equality, civil rights protections.
- "Healthcare" = medical access, Medicare/Medicaid, insurance, mental health.
- "Economy" = jobs, wages, small business, unions, financial protections.
- "Climate/Environment" = clean energy, flooding, heat, sustainability.
- Prefer matches that align with the user's intent over shallow keyword overlaps like the word "rights" (avoid mapping LGBTQ rights to "voting rights")."#;

const OUTPUT_FORMAT: &str = r#"STRICT OUTPUT FORMAT:
Return ONLY a compact JSON object with this exact shape and no extra commentary:
{"relevantItems": [{"id": "ID", "score": 0.0, "reason": "short explanation"}, ...]}"#;


/// System prompt listing the distinct categories of `items`, sorted.
pub fn build_system_prompt(items: &[KnowledgeItem]) -> String {
    let mut categories: Vec<&str> = items.iter().map(|i| i.category.label()).collect();
    categories.sort_unstable();
    categories.dedup();

    format!(
        "{MATCHER_PREAMBLE}\n\nCATEGORIES:\n{}\n\n{OUTPUT_FORMAT}",
        categories.join("\n")
    )
}


#[derive(Serialize)]
struct UserContent<'a> {
    query: &'a str,
    items: Vec<MatcherItem<'a>>,
    instructions: String,
}

/// User turn: the query, the items and the ranking instructions as one JSON document.
pub fn build_user_prompt(request: MatchRequest<'_>) -> Result<String, serde_json::Error> {
    let content = UserContent {
        query: request.query,
        items: request.items,
        instructions: format!(
            "Rank up to {} items by semantic relevance. Score between 0 and 1. Avoid unrelated categories even if keywords overlap.",
            request.max_results
        ),
    };
    serde_json::to_string(&content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Category;

    fn items() -> Vec<KnowledgeItem> {
        vec![
            KnowledgeItem::new("XV.1", Category::ForeignPolicy, "Diplomacy First", "Talks", None),
            KnowledgeItem::new("VI.1", Category::HealthcarePublicHealth, "Single-Payer", "Care", None),
            KnowledgeItem::new("XV.2", Category::ForeignPolicy, "End Wars", "Peace", None),
        ]
    }

    #[test]
    fn test_system_prompt_lists_sorted_unique_categories() {
        let prompt = build_system_prompt(&items());
        assert!(prompt.contains("CATEGORIES:\nForeign Policy\nHealthcare & Public Health\n\n"));
        assert!(prompt.contains("\"relevantItems\""));
    }

    #[test]
    fn test_user_prompt_is_json() {
        let items = items();
        let prompt = build_user_prompt(MatchRequest::new("peace talks", &items, 4)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&prompt).unwrap();
        assert_eq!(value["query"], "peace talks");
        assert_eq!(value["items"].as_array().map(Vec::len), Some(3));
        assert!(value["instructions"].as_str().unwrap().contains("up to 4 items"));
    }
}
