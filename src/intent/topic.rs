use lazy_static::lazy_static;
use regex::Regex;
use strum::IntoStaticStr;

use super::classifier::{Answer, IntentSignals};
use super::scope::ItemScope;
use crate::corpus::Category;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum TopicIntent {
    Automation,
    Healthcare,
    Economy,
    Environment,
    Education,
    Democracy,
    CampaignFinance,
    Housing,
    Retirement,
    ForeignAffairs,
}


pub struct TopicRule {
    pub intent: TopicIntent,
    pub pattern: Regex,
    /// Also fires when the top ranked category satisfies this predicate.
    pub category_hint: Option<fn(&Category) -> bool>,
    pub answer: Answer,
    pub scope: ItemScope,
}

impl TopicRule {
    pub fn fires(&self, signals: &IntentSignals<'_>) -> bool {
        if self.pattern.is_match(signals.text) {
            return true;
        }
        match (self.category_hint, signals.top_category) {
            (Some(hint), Some(category)) => hint(&category),
            _ => false,
        }
    }
}

fn rule(
    intent: TopicIntent,
    pattern: &str,
    category_hint: Option<fn(&Category) -> bool>,
    answer: Answer,
    scope: ItemScope,
) -> TopicRule {
    TopicRule {
        intent,
        pattern: Regex::new(pattern).unwrap(),
        category_hint,
        answer,
        scope,
    }
}

lazy_static! {
    pub static ref TOPIC_RULES: Vec<TopicRule> = vec![
        rule(
            TopicIntent::Automation,
            r"\bai\b|artificial.?intelligence|robotics|automation|dignity|corporate.?taxes|displacement",
            None,
            Answer::Fixed("Winston's vision ensures human dignity in an AI-driven economy by taxing corporations to fund a Human Dignity Income, guaranteeing all Americans benefit from technological progress without punishing workers for automation-driven displacement."),
            ItemScope::Automation,
        ),
        rule(
            TopicIntent::Healthcare,
            r"health|medical|medicare|medicaid",
            Some(Category::is_health),
            Answer::Resolved(healthcare_lead),
            ItemScope::Health,
        ),
        rule(
            TopicIntent::Economy,
            r"economy|economic|jobs|wages|employment|\bwork",
            None,
            Answer::Fixed("Winston's economic plan grows good-paying jobs, supports small businesses, raises family incomes, and includes a Human Dignity Income to support workers displaced by AI and automation."),
            ItemScope::HouseholdEconomy,
        ),
        rule(
            TopicIntent::Environment,
            r"environment|climate|clean energy|pollution|flood|heat wave",
            None,
            Answer::Fixed("Winston's climate plan invests in clean energy, protects waterways, and builds flood/heat resilience across NJ-12."),
            ItemScope::Environment,
        ),
        rule(
            TopicIntent::Education,
            r"education|school|teacher|college|tuition|student loan",
            None,
            Answer::Fixed("Winston's education agenda raises teacher pay, protects K-12 funding, expands Pre-K/childcare, and makes college more affordable."),
            ItemScope::Education,
        ),
        rule(
            TopicIntent::Democracy,
            r"democracy|voting|election|ranked.?choice|gerrymander|citizens united",
            None,
            Answer::Fixed("Winston strengthens democracy with verified digital townhalls, voting rights protections, ranked-choice voting, and an end to gerrymandering."),
            ItemScope::Democracy,
        ),
        rule(
            TopicIntent::CampaignFinance,
            r"campaign.*(finance|reform|money)|finance.*(reform|campaign)|dark.?money|corporate.*(donation|money)|\bpacs?\b.*(donation|money)|zero.?donor",
            None,
            Answer::Fixed("Winston strongly supports campaign finance reform: a zero-donor campaign, overturning Citizens United, and stricter limits on corporate contributions."),
            ItemScope::CampaignFinance,
        ),
        rule(
            TopicIntent::Housing,
            r"housing|\brent|affordable|homebuyer|mortgage",
            None,
            Answer::Fixed("Winston expands affordable housing, protects renters, supports first-time homebuyers, and advances paid family leave."),
            ItemScope::Housing,
        ),
        rule(
            TopicIntent::Retirement,
            r"social security|retirement|seniors|pension",
            None,
            Answer::Fixed("Winston protects retirement security by strengthening Social Security and guaranteeing dignified, livable benefits through doubled payments for seniors."),
            ItemScope::SocialSecurity,
        ),
        rule(
            TopicIntent::ForeignAffairs,
            r"foreign|international|\bwars?\b|peace|middle east|palestine|israel|ukraine|russia",
            None,
            Answer::Fixed("Winston advances diplomacy-first foreign policy, ends endless wars, supports a two-state solution, and defends Ukraine's territorial integrity."),
            ItemScope::Category(Category::ForeignPolicy),
        ),
    ];
}

fn healthcare_lead(signals: &IntentSignals<'_>) -> &'static str {
    if signals.yes_no {
        "Yes. Winston supports comprehensive healthcare reform centered on single-payer (Medicare-for-All)."
    } else {
        "Winston supports single-payer (Medicare-for-All): universal coverage with no premiums or copays at point of care, free provider choice, and negotiated drug/provider prices to lower costs for NJ-12."
    }
}


pub fn match_topic(signals: &IntentSignals<'_>) -> Option<&'static TopicRule> {
    TOPIC_RULES.iter().find(|rule| rule.fires(signals))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signals(text: &str, top_category: Option<Category>) -> IntentSignals<'_> {
        IntentSignals {
            text,
            yes_no: text.ends_with('?'),
            top_category,
        }
    }

    fn topic(text: &str) -> Option<TopicIntent> {
        match_topic(&signals(text, None)).map(|r| r.intent)
    }

    #[test]
    fn test_topic_priority() {
        assert_eq!(topic("will ai replace my job"), Some(TopicIntent::Automation));
        assert_eq!(topic("medicaid and jobs"), Some(TopicIntent::Healthcare));
        assert_eq!(topic("jobs in trenton"), Some(TopicIntent::Economy));
        assert_eq!(topic("flood insurance"), Some(TopicIntent::Environment));
        assert_eq!(topic("what about teacher pay"), Some(TopicIntent::Education));
        assert_eq!(topic("rent is too high"), Some(TopicIntent::Housing));
        assert_eq!(topic("pension for seniors"), Some(TopicIntent::Retirement));
        assert_eq!(topic("what about the war in ukraine"), Some(TopicIntent::ForeignAffairs));
        assert_eq!(topic("broadband"), None);
    }

    #[test]
    fn test_short_words_need_boundaries() {
        assert_eq!(topic("maintain current laws"), None);
        assert_eq!(topic("parents want answers"), None);
        assert_eq!(topic("network access"), None);
    }

    #[test]
    fn test_healthcare_fires_on_top_category() {
        let rule = match_topic(&signals("tell me about drug prices", Some(Category::HealthcareAccess)));
        assert_eq!(rule.map(|r| r.intent), Some(TopicIntent::Healthcare));
    }

    #[test]
    fn test_healthcare_lead_tracks_yes_no() {
        let question = signals("is healthcare a right?", None);
        let rule = match_topic(&question).unwrap();
        assert!(rule.answer.text(&question).starts_with("Yes."));

        let statement = signals("healthcare costs", None);
        assert!(rule.answer.text(&statement).starts_with("Winston supports single-payer"));
    }
}
