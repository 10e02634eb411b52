

use tracing::debug;

use super::heuristics::{active_boosts, active_exclusions};
use super::lexical::QueryContext;
use super::scorer::{score_item, ItemFields, ScoredMatch};
use crate::corpus::{Corpus, KnowledgeItem};


/// An item surfaced to the user with its match explanation.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedItem<'a> {
    pub item: &'a KnowledgeItem,
    pub reason: String,
}

impl<'a> RankedItem<'a> {
    pub fn new(item: &'a KnowledgeItem, reason: impl Into<String>) -> Self {
        Self {
            item,
            reason: reason.into(),
        }
    }
}

impl<'a> From<&ScoredMatch<'a>> for RankedItem<'a> {
    fn from(scored: &ScoredMatch<'a>) -> Self {
        Self::new(scored.item, scored.reason())
    }
}


/// Local relevance pipeline: exclusions, scoring, boosts, guard, sort, cap.
pub fn rank<'a>(ctx: &QueryContext, corpus: &'a Corpus, max_results: usize) -> Vec<ScoredMatch<'a>> {
    if ctx.is_empty() {
        return Vec::new();
    }

    let exclusions = active_exclusions(ctx);
    let boosts = active_boosts(ctx);

    let mut matches: Vec<ScoredMatch<'a>> = corpus
        .items()
        .iter()
        .filter_map(|item| {
            let fields = ItemFields::new(item);
            if exclusions.iter().any(|rule| (rule.excludes)(ctx, &fields)) {
                return None;
            }

            let mut scored = score_item(ctx, &fields);
            for rule in &boosts {
                if (rule.targets)(&fields) {
                    scored.boost(rule.bonus, rule.annotation);
                }
            }
            Some(scored)
        })
        .filter(|m| m.score > 0)
        .collect();

    if ctx.has_content_terms() {
        matches.retain(|m| m.matched_content_term);
    }

    // stable: ties keep corpus order
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(max_results);

    debug!(
        "Ranked {} matches for '{}' (terms={}, content_terms={})",
        matches.len(),
        crate::safe_truncate(&ctx.text, 60),
        ctx.terms.len(),
        ctx.content_terms.len()
    );

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Category;
    use crate::DEFAULT_MAX_RESULTS;

    fn ranked_ids(query: &str, corpus: &Corpus) -> Vec<String> {
        let ctx = QueryContext::new(query, corpus.vocabulary());
        rank(&ctx, corpus, DEFAULT_MAX_RESULTS)
            .into_iter()
            .map(|m| m.item.id.clone())
            .collect()
    }

    #[test]
    fn test_empty_query_yields_nothing() {
        let corpus = Corpus::builtin().unwrap();
        assert!(ranked_ids("", &corpus).is_empty());
        assert!(ranked_ids("   ", &corpus).is_empty());
    }

    #[test]
    fn test_guard_skipped_without_content_terms() {
        let corpus = Corpus::builtin().unwrap();
        let ctx = QueryContext::new("roa", corpus.vocabulary());
        assert!(!ctx.has_content_terms());

        let matches = rank(&ctx, &corpus, DEFAULT_MAX_RESULTS);
        assert!(!matches.is_empty());
        assert!(matches.iter().all(|m| !m.matched_content_term));
    }

    #[test]
    fn test_stopword_query_with_boost_survives_guard() {
        let corpus = Corpus::builtin().unwrap();
        let ctx = QueryContext::new("is ai", corpus.vocabulary());
        assert!(ctx.terms.is_empty());

        let matches = rank(&ctx, &corpus, DEFAULT_MAX_RESULTS);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].item.title, "Human Dignity Income");
    }

    #[test]
    fn test_guard_drops_items_without_content_match() {
        let corpus = Corpus::from_items(vec![
            KnowledgeItem::new("A", Category::Transportation, "Safer Roads", "Fix potholes", None),
            KnowledgeItem::new("B", Category::Transportation, "Broadway Buses", "More routes", None),
        ])
        .unwrap();
        // "roads" is vocabulary; "broa" only overlaps item B by substring
        let ids = ranked_ids("roads broa", &corpus);
        assert_eq!(ids, vec!["A"]);
    }

    #[test]
    fn test_title_token_sets_content_flag() {
        let corpus = Corpus::builtin().unwrap();
        for item in corpus.items().iter().take(20) {
            let token = crate::search::lexical::tokenize(&item.title)
                .into_iter()
                .find(|t| t.len() > 2 && !crate::search::lexical::is_stopword(t));
            let Some(token) = token else { continue };

            let ctx = QueryContext::new(&token, corpus.vocabulary());
            let scored = score_item(&ctx, &ItemFields::new(item));
            assert!(scored.matched_content_term, "token '{}' in '{}'", token, item.title);
        }
    }

    #[test]
    fn test_flooding_never_surfaces_foreign_policy() {
        let corpus = Corpus::builtin().unwrap();
        for query in [
            "flooding",
            "flooding in bound brook",
            "what is the plan for flooding and refugees",
            "flooding international aid",
        ] {
            let ctx = QueryContext::new(query, corpus.vocabulary());
            let matches = rank(&ctx, &corpus, corpus.len());
            assert!(
                matches.iter().all(|m| m.item.category != Category::ForeignPolicy),
                "{query}"
            );
        }
    }

    #[test]
    fn test_social_security_scenario() {
        let corpus = Corpus::from_items(vec![
            KnowledgeItem::new(
                "S.1",
                Category::CostOfLivingRelief,
                "Strengthen Social Security",
                "Double payments for seniors",
                None,
            ),
            KnowledgeItem::new(
                "F.1",
                Category::ForeignPolicy,
                "Collective Security",
                "Work with allies on security",
                None,
            ),
        ])
        .unwrap();
        assert_eq!(ranked_ids("social security", &corpus), vec!["S.1"]);
    }

    #[test]
    fn test_results_capped_and_sorted() {
        let corpus = Corpus::builtin().unwrap();
        let ctx = QueryContext::new("clean energy jobs", corpus.vocabulary());
        let matches = rank(&ctx, &corpus, DEFAULT_MAX_RESULTS);
        assert!(matches.len() <= DEFAULT_MAX_RESULTS);
        assert!(matches.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let corpus = Corpus::builtin().unwrap();
        let first = ranked_ids("affordable housing for seniors", &corpus);
        let second = ranked_ids("affordable housing for seniors", &corpus);
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
