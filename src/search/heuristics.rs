

use super::lexical::{tokenize, QueryContext};
use super::scorer::ItemFields;
use crate::corpus::Category;


/// Removes candidates before scoring when the query has a given shape.
pub struct ExclusionRule {
    pub name: &'static str,
    pub applies: fn(&QueryContext) -> bool,
    pub excludes: fn(&QueryContext, &ItemFields<'_>) -> bool,
}

/// Adds a fixed bonus to targeted items regardless of keyword overlap.
pub struct BoostRule {
    pub name: &'static str,
    pub applies: fn(&QueryContext) -> bool,
    pub targets: fn(&ItemFields<'_>) -> bool,
    pub bonus: u32,
    pub annotation: &'static str,
}


pub static EXCLUSION_RULES: &[ExclusionRule] = &[
    ExclusionRule {
        name: "social_security",
        applies: is_social_security_query,
        excludes: is_foreign_policy,
    },
    ExclusionRule {
        name: "healthcare_focus",
        applies: is_healthcare_query,
        excludes: lacks_health_framing,
    },
    ExclusionRule {
        name: "climate",
        applies: is_climate_query,
        excludes: is_foreign_policy,
    },
    ExclusionRule {
        name: "local_place",
        applies: is_local_place_query,
        excludes: is_unrequested_foreign_policy,
    },
];

pub static BOOST_RULES: &[BoostRule] = &[
    BoostRule {
        name: "automation",
        applies: is_automation_query,
        targets: is_human_dignity_item,
        bonus: 10,
        annotation: "automation emphasis: human dignity",
    },
    BoostRule {
        name: "campaign_finance",
        applies: is_campaign_finance_query,
        targets: is_campaign_finance_item,
        bonus: 5,
        annotation: "campaign finance emphasis",
    },
];


/// Exclusion rules whose predicate fires for this query, in table order.
pub fn active_exclusions(ctx: &QueryContext) -> Vec<&'static ExclusionRule> {
    EXCLUSION_RULES.iter().filter(|r| (r.applies)(ctx)).collect()
}

pub fn active_boosts(ctx: &QueryContext) -> Vec<&'static BoostRule> {
    BOOST_RULES.iter().filter(|r| (r.applies)(ctx)).collect()
}


fn is_social_security_query(ctx: &QueryContext) -> bool {
    ctx.mentions_all(&["social", "security"])
}

fn is_healthcare_query(ctx: &QueryContext) -> bool {
    ctx.mentions_any(&["healthcare", "medical", "medicare", "medicaid"])
}

fn is_climate_query(ctx: &QueryContext) -> bool {
    ctx.mentions_any(&[
        "climate", "environment", "flood", "flooding", "storm", "heat", "energy", "renewable",
        "solar", "wind",
    ])
}

fn is_local_place_query(ctx: &QueryContext) -> bool {
    ctx.mentions_phrase("nj 12")
        || ctx.mentions_any(&[
            "nj12", "trenton", "princeton", "brunswick", "bound", "brook", "manville",
            "plainfield", "somerville",
        ])
}

fn names_foreign_affairs(ctx: &QueryContext) -> bool {
    ctx.mentions_any(&["war", "foreign", "international"])
}

fn is_automation_query(ctx: &QueryContext) -> bool {
    ctx.mentions_any(&[
        "ai", "artificial", "intelligence", "robotics", "automation", "dignity", "corporate",
        "taxes", "displacement",
    ]) || ctx.mentions_any_phrase(&[
        "human dignity",
        "corporate taxes",
        "worker displacement",
        "ai displacement",
        "automation jobs",
    ])
}

fn is_campaign_finance_query(ctx: &QueryContext) -> bool {
    ctx.mentions_any(&[
        "campaign", "finance", "reform", "donor", "donation", "money", "corporate", "pac",
        "citizens", "united",
    ]) || ctx.mentions_any_phrase(&[
        "campaign finance",
        "citizens united",
        "dark money",
        "corporate donations",
        "corporate money",
    ])
}


fn is_foreign_policy(_: &QueryContext, fields: &ItemFields<'_>) -> bool {
    fields.item.category == Category::ForeignPolicy
}

fn is_unrequested_foreign_policy(ctx: &QueryContext, fields: &ItemFields<'_>) -> bool {
    is_foreign_policy(ctx, fields) && !names_foreign_affairs(ctx)
}

/// No "health" anywhere and no query term in title or description.
fn lacks_health_framing(ctx: &QueryContext, fields: &ItemFields<'_>) -> bool {
    let health_framed = fields.item.category.is_health()
        || fields.category.contains("health")
        || fields.title_or_description_contains("health");
    if health_framed {
        return false;
    }
    !ctx
        .terms
        .iter()
        .any(|t| fields.title_or_description_contains(t))
}

fn is_human_dignity_item(fields: &ItemFields<'_>) -> bool {
    fields.title.contains("human dignity")
}

fn is_campaign_finance_item(fields: &ItemFields<'_>) -> bool {
    let category = fields.item.category;
    let mentions_pac = tokenize(&fields.description)
        .iter()
        .any(|t| t == "pac" || t == "pacs");

    (fields.title.contains("zero") && fields.description.contains("donor"))
        || (fields.title.contains("accountability") && fields.description.contains("corporate"))
        || (fields.title.contains("citizens") && fields.title.contains("united"))
        || fields.description.contains("dark money")
        || mentions_pac
        || category.is_democracy_reform()
        || category.is_accountability()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::KnowledgeItem;
    use std::collections::HashSet;

    fn ctx(query: &str) -> QueryContext {
        QueryContext::new(query, &HashSet::new())
    }

    fn names(rules: Vec<&'static ExclusionRule>) -> Vec<&'static str> {
        rules.into_iter().map(|r| r.name).collect()
    }

    #[test]
    fn test_rule_tables_are_ordered() {
        let exclusions: Vec<_> = EXCLUSION_RULES.iter().map(|r| r.name).collect();
        assert_eq!(
            exclusions,
            vec!["social_security", "healthcare_focus", "climate", "local_place"]
        );
        let boosts: Vec<_> = BOOST_RULES.iter().map(|r| r.name).collect();
        assert_eq!(boosts, vec!["automation", "campaign_finance"]);
    }

    #[test]
    fn test_active_exclusions() {
        assert_eq!(names(active_exclusions(&ctx("social security"))), vec!["social_security"]);
        assert_eq!(
            names(active_exclusions(&ctx("flooding in Bound Brook"))),
            vec!["climate", "local_place"]
        );
        assert_eq!(names(active_exclusions(&ctx("NJ-12 roads"))), vec!["local_place"]);
        assert!(active_exclusions(&ctx("teacher pay")).is_empty());
    }

    #[test]
    fn test_local_place_allows_requested_foreign_affairs() {
        let item = KnowledgeItem::new("XV.1", Category::ForeignPolicy, "End Endless Wars", "Diplomacy first", None);
        let fields = ItemFields::new(&item);
        assert!(is_unrequested_foreign_policy(&ctx("trenton veterans"), &fields));
        assert!(!is_unrequested_foreign_policy(&ctx("trenton and the war"), &fields));
    }

    #[test]
    fn test_healthcare_focus_keeps_term_matches() {
        let hospital = KnowledgeItem::new("A", Category::Transportation, "Hospital Shuttles", "Rides to care", None);
        let roads = KnowledgeItem::new("B", Category::Transportation, "Safer Roads", "Fix potholes", None);
        let clinic = KnowledgeItem::new("C", Category::Transportation, "Clinic Access", "Public health vans", None);
        let query = ctx("medicaid hospital");

        assert!(!lacks_health_framing(&query, &ItemFields::new(&hospital)));
        assert!(lacks_health_framing(&query, &ItemFields::new(&roads)));
        assert!(!lacks_health_framing(&query, &ItemFields::new(&clinic)));
    }

    #[test]
    fn test_short_tokens_trigger_boosts() {
        let boosts: Vec<_> = active_boosts(&ctx("is ai coming for my job")).iter().map(|r| r.name).collect();
        assert_eq!(boosts, vec!["automation"]);
        let boosts: Vec<_> = active_boosts(&ctx("pac money")).iter().map(|r| r.name).collect();
        assert_eq!(boosts, vec!["campaign_finance"]);
        let boosts: Vec<_> = active_boosts(&ctx("corporate")).iter().map(|r| r.name).collect();
        assert_eq!(boosts, vec!["automation", "campaign_finance"]);
    }

    #[test]
    fn test_campaign_finance_targets() {
        let zero = KnowledgeItem::new("I.1", Category::MissionAccountability, "Zero-Donor Pledge", "No donor money", None);
        let pac = KnowledgeItem::new("X", Category::Transportation, "Transit", "No PAC funding", None);
        let impact = KnowledgeItem::new("Y", Category::Transportation, "Transit", "Measure impact", None);

        assert!(is_campaign_finance_item(&ItemFields::new(&zero)));
        assert!(is_campaign_finance_item(&ItemFields::new(&pac)));
        assert!(!is_campaign_finance_item(&ItemFields::new(&impact)));
    }
}
