use lazy_static::lazy_static;
use regex::Regex;
use strum::IntoStaticStr;

use super::classifier::{Answer, IntentSignals};
use super::patterns::{OPPOSES_PRIVATIZATION, OVERTURN, SUPPORTS_CITIZENS_UNITED};
use super::scope::ItemScope;


#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum StanceTopic {
    AutomationSupport,
    PrivatizeSocialSecurity,
    PrivatizeMedicare,
    UniversalHealthcare,
    ReproductiveHealth,
    ExpandMedicare,
    RankedChoice,
    CitizensUnited,
    Gerrymandering,
    ElectoralCollege,
    Statehood,
    TermLimits,
    RaisingWages,
    Unions,
    TaxLoopholes,
    CorporateDonations,
    CampaignFinanceReform,
    CleanEnergy,
    ClimateAction,
    TeacherPay,
    PublicSchools,
    LgbtqEquality,
}


pub struct StanceRule {
    pub topic: StanceTopic,
    pub pattern: Regex,
    pub answer: Answer,
    pub scope: ItemScope,
}

fn rule(topic: StanceTopic, pattern: &str, answer: Answer, scope: ItemScope) -> StanceRule {
    StanceRule {
        topic,
        pattern: Regex::new(pattern).unwrap(),
        answer,
        scope,
    }
}

lazy_static! {
    /// Evaluated top to bottom; the first match answers. Corporate donations
    /// stays ahead of campaign finance reform.
    pub static ref STANCE_RULES: Vec<StanceRule> = vec![
        rule(
            StanceTopic::AutomationSupport,
            r"\b(support|favor|back|endorse)\w*\b.*(\bai\b|robotics|automation|human.?dignity|corporate.?taxes)",
            Answer::Fixed("Yes. Winston supports policies to address AI and robotics-driven displacement, including a Human Dignity Income funded by higher corporate taxes to ensure shared prosperity."),
            ItemScope::Automation,
        ),
        rule(
            StanceTopic::PrivatizeSocialSecurity,
            r"privati[sz](e|ation|ing).*social.?security|social.?security.*privati[sz](e|ation|ing)",
            Answer::Resolved(privatize_social_security),
            ItemScope::SocialSecurity,
        ),
        rule(
            StanceTopic::PrivatizeMedicare,
            r"privati[sz](e|ation|ing).*medicare|medicare.*privati[sz](e|ation|ing)",
            Answer::Resolved(privatize_medicare),
            ItemScope::Health,
        ),
        rule(
            StanceTopic::UniversalHealthcare,
            r"universal.*(healthcare|health.?care)|single.?payer|medicare.?for.?all",
            Answer::Fixed("Yes. Winston supports universal healthcare through single-payer (Medicare-for-All)."),
            ItemScope::Health,
        ),
        rule(
            StanceTopic::ReproductiveHealth,
            r"reproductive.*(health|rights)|abortion.*(access|rights)|protect.*(abortion|reproductive)",
            Answer::Fixed("Yes. Winston supports protecting reproductive health and guaranteeing abortion access."),
            ItemScope::Health,
        ),
        rule(
            StanceTopic::ExpandMedicare,
            r"(expand|strengthen).*(medicare|medicaid)",
            Answer::Fixed("Yes. Winston supports expanding and strengthening Medicare and Medicaid."),
            ItemScope::Health,
        ),
        rule(
            StanceTopic::RankedChoice,
            r"ranked.?choice.*(voting|elections)|support.*ranked.?choice",
            Answer::Fixed("Yes. Winston supports ranked-choice voting for fairer elections."),
            ItemScope::Democracy,
        ),
        rule(
            StanceTopic::CitizensUnited,
            r"citizens.?united|overturn.*citizens|dark.?money|corporate.*(money|donations)",
            Answer::Resolved(citizens_united),
            ItemScope::Democracy,
        ),
        rule(
            StanceTopic::Gerrymandering,
            r"gerrymander|redistrict",
            Answer::Fixed("Yes. Winston supports ending gerrymandering through independent redistricting."),
            ItemScope::Democracy,
        ),
        rule(
            StanceTopic::ElectoralCollege,
            r"electoral.?college|abolish.*electoral|popular.?vote",
            Answer::Fixed("Yes. Winston supports abolishing/neutralizing the Electoral College through the National Popular Vote Interstate Compact."),
            ItemScope::Democracy,
        ),
        rule(
            StanceTopic::Statehood,
            r"statehood.*(\bdc\b|puerto.?rico)|\bdc\b.*statehood|puerto.?rico.*statehood",
            Answer::Fixed("Yes. Winston supports statehood for DC and Puerto Rico for equal representation."),
            ItemScope::Democracy,
        ),
        rule(
            StanceTopic::TermLimits,
            r"term.?limits|limits.*congress|limits.*supreme.?court",
            Answer::Fixed("Yes. Winston supports 18-year term limits for Congress and the Supreme Court."),
            ItemScope::Democracy,
        ),
        rule(
            StanceTopic::RaisingWages,
            r"rais(e|ing).*(wage|pay)|increase.*(wage|pay)|fair.?pay",
            Answer::Fixed("Yes. Winston supports raising wages and enforcing fair pay to protect NJ-12 workers."),
            ItemScope::Economic,
        ),
        rule(
            StanceTopic::Unions,
            r"\bunions?\b|labor.*(rights|protect)",
            Answer::Fixed("Yes. Winston supports protecting unions and labor rights to strengthen the NJ-12 workforce."),
            ItemScope::Economic,
        ),
        rule(
            StanceTopic::TaxLoopholes,
            r"tax.?loopholes|corporate.?tax|close.*loopholes",
            Answer::Fixed("Yes. Winston supports closing corporate tax loopholes and tying incentives to NJ job creation."),
            ItemScope::Economic,
        ),
        rule(
            StanceTopic::CorporateDonations,
            r"corporate.*(donation|money)|\bpacs?\b.*(donation|money)|accept.*(corporate|\bpacs?\b)",
            Answer::Fixed("No. Winston does not accept PAC or corporate donations; he runs a zero-donor, people-powered campaign."),
            ItemScope::Accountability,
        ),
        rule(
            StanceTopic::CampaignFinanceReform,
            r"campaign.*(finance|reform|money)|finance.*(reform|campaign)|reform.*(campaign|finance)",
            Answer::Fixed("Yes. Winston strongly supports campaign finance reform; he runs a zero-donor campaign, supports overturning Citizens United, and backs stricter limits on corporate contributions."),
            ItemScope::CampaignFinance,
        ),
        rule(
            StanceTopic::CleanEnergy,
            r"clean.?energy|renewable.*(energy|power)|solar|wind.*(energy|power)",
            Answer::Fixed("Yes. Winston supports expanding clean energy including solar, wind, and renewable energy in New Jersey."),
            ItemScope::Environment,
        ),
        rule(
            StanceTopic::ClimateAction,
            r"green.?new.?deal|climate.*(action|policy)",
            Answer::Fixed("Yes. Winston supports comprehensive climate action including clean energy job pipelines and sustainable infrastructure."),
            ItemScope::Environment,
        ),
        rule(
            StanceTopic::TeacherPay,
            r"teacher.*(pay|wage)|increase.*teacher|rais.*teacher",
            Answer::Fixed("Yes. Winston supports increasing teacher pay and enforcing pay equity in NJ schools."),
            ItemScope::Education,
        ),
        rule(
            StanceTopic::PublicSchools,
            r"public.?school.*(fund|support)|protect.*public.?school",
            Answer::Fixed("Yes. Winston supports protecting K-12 public school funding and stopping cuts in NJ-12 districts."),
            ItemScope::Education,
        ),
        rule(
            StanceTopic::LgbtqEquality,
            r"lgbtq|lgbt|\bgay\b|lesbian|transgender|\btrans\b|queer|sexual.*(orientation|identity)|gender.*(identity|equality)|marriage.*(equality|equal)|same.?sex",
            Answer::Fixed("Yes. Winston supports LGBTQ+ equality including marriage equality, anti-discrimination protections, and comprehensive healthcare access for all."),
            ItemScope::SocialEquality,
        ),
    ];
}


fn privatize_social_security(signals: &IntentSignals<'_>) -> &'static str {
    if OPPOSES_PRIVATIZATION.is_match(signals.text) {
        "Yes. Winston opposes privatizing Social Security and supports strengthening it."
    } else {
        "No. Winston does not support privatizing Social Security; he supports strengthening Social Security with doubled payments for livable retirements."
    }
}

fn privatize_medicare(signals: &IntentSignals<'_>) -> &'static str {
    if OPPOSES_PRIVATIZATION.is_match(signals.text) {
        "Yes. Winston opposes privatizing Medicare and supports strengthening Medicare, moving toward single-payer (Medicare-for-All)."
    } else {
        "No. Winston does not support privatizing Medicare; he supports strengthening Medicare and moving toward single-payer (Medicare-for-All)."
    }
}

fn citizens_united(signals: &IntentSignals<'_>) -> &'static str {
    let asks_supporting =
        SUPPORTS_CITIZENS_UNITED.is_match(signals.text) && !OVERTURN.is_match(signals.text);
    if asks_supporting {
        "No. Winston does not support Citizens United; he supports overturning it and banning dark money."
    } else {
        "Yes. Winston supports overturning Citizens United and banning dark money."
    }
}


/// First stance rule matching a yes/no query.
pub fn match_stance(signals: &IntentSignals<'_>) -> Option<&'static StanceRule> {
    if !signals.yes_no {
        return None;
    }
    STANCE_RULES.iter().find(|rule| rule.pattern.is_match(signals.text))
}
