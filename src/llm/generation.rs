

use lazy_static::lazy_static;
use regex::Regex;
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::providers::{CompletionRequest, LlmProvider, LlmProviderError};
use crate::corpus::Category;
use crate::search::RankedItem;

pub const DEFLECTION: &str = "I'm here to discuss Winston's policy positions for NJ-12. I can't engage with allegations, personal attacks and non-policy discourse. Would you like info on his accountability pledges or a specific policy area?";

pub const GUARDRAIL: &str = "Guardrails: Stay policy-focused. If asked about allegations or personal attacks, decline and redirect to policies. Avoid making unverified claims about individuals. Be civil and constructive.";

lazy_static! {
    static ref BAD_FAITH_PATTERNS: Vec<Regex> = [
        r"(?i)\b(is|was)\s+[^?!.]*\s+(criminal|felon|fraud|corrupt)\b",
        r"(?i)\b(sc(am|ammer)|liar)\b",
        r"(?i)\b(pedophile|traitor|terrorist)\b",
        // threats of harm, not questions about violence policy
        r"(?i)\b(kill|murder|shoot|assassinate|hurt)\s+(him|her|them|you|winston|jordan)\b",
        r"(?i)\b(deserves?\s+to\s+die|should\s+be\s+(killed|shot|hanged))\b",
        r"(?i)\b(is|was)\s+(he|she|winston(\s+jordan)?|jordan)\s+(secretly\s+|really\s+|a\s+)*(gay|lesbian|bisexual|straight|trans|transgender)\b",
        r"(?i)\b(married|dating|girlfriend|boyfriend|wife|husband|single)\b",
        r"(?i)\b(personal|private)\s+(life|relationship|family)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect();

    /// Blanked out before screening so the `single` pattern only sees gossip.
    static ref SINGLE_PAYER: Regex = Regex::new(r"(?i)\bsingle[\s-]*payer\b").unwrap();

    static ref LIST_LINE: Regex = Regex::new(r"^([-*]|[0-9]+\.)").unwrap();
    static ref NUMBERED_LINE: Regex = Regex::new(r"^([0-9]+)\.\s*(.*)$").unwrap();
}

const PERSONA: &str = "You are Winston Jordan's campaign policy assistant for New Jersey's 12th Congressional District.";

const CORE_PRINCIPLES: &str = r#"CORE PRINCIPLES:
- Zero-donor, people-powered campaign
- Direct democracy through district polling guides votes
- Focus on NJ-12 specific examples across Union, Somerset, Mercer, and Middlesex counties (Trenton, New Brunswick, Princeton, Plainfield, Somerville, East Brunswick, etc.)
- Comprehensive progressive platform with measurable outcomes
- Forward-looking vision to ensure human dignity through shared prosperity, addressing AI and robotics-driven worker displacement"#;

const RESPONSE_GUIDELINES: &str = r#"CRITICAL RESPONSE GUIDELINES:
- If a specific policy title is provided, focus EXCLUSIVELY on that policy's details.
- STAY FOCUSED on the specific topic being asked about
- For LOCAL NJ-12 questions, stick to LOCAL policies only; do not drift into unrelated national/foreign policy topics
- Use specific NJ-12 examples when available (Bound Brook flooding, Manville retrofits, etc.)
- If asked about climate/flooding in NJ-12, focus ONLY on environmental protection and sustainable future policies
- For AI/automation displacement queries, emphasize the Human Dignity Income policy: taxing corporations to fund income for displaced workers, ensuring shared prosperity
- Do not connect unrelated policy areas unless directly relevant
- Keep responses grounded, practical, and measured; avoid hyperbolic language
- Do not invent or exaggerate policies beyond what's documented
- If information isn't available, say so clearly rather than improvising
- Format responses in Markdown for clarity:
  - Use paragraphs separated by blank lines
  - Use bullet points (- ) for lists
  - Use numbered lists (1. ) for steps or ranked items
  - Ensure proper indentation and spacing"#;

fn category_focus(category: Category) -> &'static str {
    match category {
        Category::MissionAccountability => "Zero-donor campaign, direct democracy, term commitment",
        Category::DirectDemocracy => "24/7 digital townhall, real-time constituent voting, transparency",
        Category::LegislativeRenewal => "Repeal harmful laws, direct compensation, enforce founding promise",
        Category::EconomicDevelopmentJobs => {
            "Small business support, infrastructure investment, college affordability"
        }
        Category::HealthcareAccess => {
            "Medicare/Medicaid expansion, local hospital support, mental health services"
        }
        Category::CostOfLivingRelief => "Property tax relief, Social Security expansion, utility oversight",
        Category::Transportation => "NJ Transit reliability, safer roads, EV charging, climate resilience",
        Category::EnvironmentalProtection => "Clean energy incentives, waterway protection, green jobs",
        Category::EconomicGuarantees => {
            "Fair wages, small business expansion, infrastructure jobs, financial protections, human dignity income"
        }
        Category::HealthcarePublicHealth => {
            "Single-payer Medicare-for-All, drug price caps, reproductive health"
        }
        Category::EducationOpportunity => "Teacher pay increases, K-12 funding protection, Pre-K expansion",
        Category::DemocracyGovernmentReform => {
            "Voting rights, redistricting reform, Citizens United repeal"
        }
        Category::PublicSafetyWellbeing => {
            "Mental health crisis response, gun violence prevention, community policing"
        }
        Category::SustainableFuture => "Clean energy jobs, utility bill reduction, pollution enforcement",
        Category::DigitalEquity => {
            "Broadband access, digital literacy programs, tech workforce development"
        }
        Category::VeteransInstitutions => "VA healthcare, veteran services, institutional accountability",
        Category::HousingFamilySupport => {
            "Affordable housing initiatives, family leave policies, renter protections"
        }
        Category::ProvenModels => {
            "Evidence-based policy implementation, successful program replication"
        }
        Category::ForeignPolicy => "Diplomacy-first approach, end endless wars, two-state solution support",
        Category::InstitutionalRestorationAccountability => {
            "Government transparency, corruption prevention"
        }
        Category::CivilRightsEquality => {
            "Equal protection, anti-discrimination enforcement, justice reform"
        }
    }
}


/// True when the query reads as an allegation, a personal attack or gossip.
pub fn is_bad_faith(query: &str) -> bool {
    let screened = SINGLE_PAYER.replace_all(query, " ");
    BAD_FAITH_PATTERNS.iter().any(|re| re.is_match(&screened))
}


/// Everything the prose prompt is built from.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext<'a> {
    pub query: &'a str,
    /// Lead plus highlights from the resolution.
    pub summary: &'a str,
    pub related: &'a [RankedItem<'a>],
    /// Set when the user asked about one specific item.
    pub pinned_title: Option<&'a str>,
}


pub fn build_system_prompt(ctx: &GenerationContext<'_>) -> String {
    let mut prompt = String::from(GUARDRAIL);
    prompt.push_str("\n\n");
    prompt.push_str(PERSONA);

    prompt.push_str(&format!(
        "\n\nWINSTON'S {} POLICY CATEGORIES:\n",
        Category::iter().count()
    ));
    for (index, category) in Category::iter().enumerate() {
        prompt.push_str(&format!(
            "{}. {} - {}\n",
            index + 1,
            category.label(),
            category_focus(category)
        ));
    }

    prompt.push('\n');
    prompt.push_str(CORE_PRINCIPLES);
    prompt.push_str("\n\n");

    match ctx.pinned_title {
        Some(title) => prompt.push_str(&format!(
            "SPECIFIC POLICY QUERY: The user is asking about \"{}\". Provide a detailed explanation of this policy, including its description, goals, and any NJ-12 specific examples.",
            title
        )),
        None => prompt.push_str(&format!("CURRENT QUERY CONTEXT: {}", ctx.summary)),
    }

    let related: Vec<String> = ctx
        .related
        .iter()
        .map(|r| format!("{}: {} ({})", r.item.title, r.item.description, r.reason))
        .collect();
    prompt.push_str("\n\nRELATED POLICIES: ");
    prompt.push_str(&related.join("\n"));

    prompt.push_str("\n\n");
    prompt.push_str(RESPONSE_GUIDELINES);
    prompt
}


/// Normalizes model Markdown: paragraphs rejoined onto one line each, list
/// paragraphs kept line by line with `- ` bullets and `N. ` numbering.
pub fn format_reply(raw: &str) -> String {
    raw.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|paragraph| {
            let lines: Vec<&str> = paragraph.lines().map(str::trim).collect();
            let is_list = lines.iter().all(|line| LIST_LINE.is_match(line));
            if !is_list {
                return lines
                    .into_iter()
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ");
            }

            lines
                .into_iter()
                .map(|line| {
                    if let Some(rest) = line.strip_prefix(['-', '*']) {
                        format!("- {}", rest.trim())
                    } else if let Some(caps) = NUMBERED_LINE.captures(line) {
                        format!("{}. {}", &caps[1], caps[2].trim())
                    } else {
                        line.to_string()
                    }
                })
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}


/// Prompts the LLM and formats its reply. Callers screen the query first.
pub struct ProseGenerator {
    llm: Arc<dyn LlmProvider>,
    temperature: f64,
    max_tokens: u32,
}

impl ProseGenerator {

    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        info!(
            "ProseGenerator initialized: provider={}, model={}",
            llm.provider_name(),
            llm.model_name()
        );
        Self {
            llm,
            temperature: 0.7,
            max_tokens: 500,
        }
    }

    pub fn with_sampling(mut self, temperature: f64, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }


    pub async fn generate(&self, ctx: &GenerationContext<'_>) -> Result<String, LlmProviderError> {
        let system_prompt = build_system_prompt(ctx);
        let completion = self
            .llm
            .complete(CompletionRequest {
                system_prompt: &system_prompt,
                user_prompt: ctx.query,
                temperature: self.temperature,
                max_tokens: self.max_tokens,
            })
            .await?;

        let text = format_reply(&completion.content);
        if text.is_empty() {
            return Err(LlmProviderError::Provider(format!(
                "{} returned an empty reply",
                completion.provider
            )));
        }

        debug!(
            "Generated {} chars with {}/{}",
            text.len(),
            completion.provider,
            completion.model
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::KnowledgeItem;
    use crate::llm::providers::Completion;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records the system prompt it was sent and replies with a fixed text.
    struct EchoProvider {
        reply: &'static str,
        seen: Mutex<Option<String>>,
    }

    impl EchoProvider {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                seen: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for EchoProvider {
        async fn complete(&self, request: CompletionRequest<'_>) -> Result<Completion, LlmProviderError> {
            *self.seen.lock().unwrap() = Some(request.system_prompt.to_string());
            Ok(Completion {
                content: self.reply.to_string(),
                provider: "echo".to_string(),
                model: "echo".to_string(),
                usage: None,
            })
        }

        fn provider_name(&self) -> &str {
            "echo"
        }

        fn model_name(&self) -> &str {
            "echo"
        }
    }

    fn context<'a>(query: &'a str, related: &'a [RankedItem<'a>]) -> GenerationContext<'a> {
        GenerationContext {
            query,
            summary: "Winston supports universal healthcare.",
            related,
            pinned_title: None,
        }
    }

    #[test]
    fn test_bad_faith_patterns() {
        assert!(is_bad_faith("Is Winston a criminal?"));
        assert!(is_bad_faith("what a liar"));
        assert!(is_bad_faith("is he married"));
        assert!(is_bad_faith("tell me about his personal life"));
        assert!(is_bad_faith("is he single?"));
        assert!(is_bad_faith("Is Winston gay?"));
        assert!(is_bad_faith("someone should kill him"));
        assert!(!is_bad_faith("Does Winston support Medicare for All?"));
        assert!(!is_bad_faith("single-payer healthcare"));
        assert!(!is_bad_faith("what is the plan for flooding"));
    }

    #[test]
    fn test_policy_questions_pass_screen() {
        assert!(!is_bad_faith("Do you support single payer healthcare?"));
        assert!(!is_bad_faith("Single Payer or public option?"));
        assert!(!is_bad_faith("Is Winston for trans rights?"));
        assert!(!is_bad_faith("How will Winston reduce gun violence?"));
        assert!(!is_bad_faith("Tell me about Winston's \"Gun Violence Prevention\" policy"));
        assert!(is_bad_faith("is he single or single-payer curious"));
    }

    #[test]
    fn test_format_reply_joins_paragraph_lines() {
        let raw = "Winston supports\nsingle-payer care.\n\n\n* Caps drug prices\n-  Funds clinics\n\n1.First step\n2. Second step";
        assert_eq!(
            format_reply(raw),
            "Winston supports single-payer care.\n\n- Caps drug prices\n- Funds clinics\n\n1. First step\n2. Second step"
        );
    }

    #[test]
    fn test_system_prompt_sections() {
        let item = KnowledgeItem::new("VI.1", Category::HealthcarePublicHealth, "Single-Payer", "Care for all", None);
        let related = vec![RankedItem::new(&item, "title matched: payer")];
        let prompt = build_system_prompt(&context("medicare", &related));

        assert!(prompt.starts_with(GUARDRAIL));
        assert!(prompt.contains("WINSTON'S 21 POLICY CATEGORIES:\n1. Mission & Accountability - "));
        assert!(prompt.contains("21. Civil Rights & Equality - "));
        assert!(prompt.contains("CURRENT QUERY CONTEXT: Winston supports universal healthcare."));
        assert!(prompt.contains("RELATED POLICIES: Single-Payer: Care for all (title matched: payer)"));
        assert!(prompt.ends_with("Ensure proper indentation and spacing"));
    }

    #[test]
    fn test_pinned_prompt_replaces_context() {
        let ctx = GenerationContext {
            pinned_title: Some("Human Dignity Income"),
            ..context("Tell me more", &[])
        };
        let prompt = build_system_prompt(&ctx);
        assert!(prompt.contains("SPECIFIC POLICY QUERY: The user is asking about \"Human Dignity Income\""));
        assert!(!prompt.contains("CURRENT QUERY CONTEXT"));
    }

    #[tokio::test]
    async fn test_generate_formats_reply() {
        let provider = EchoProvider::new("Yes.\nWinston backs it.\n\n* Point one");
        let generator = ProseGenerator::new(provider.clone()).with_sampling(0.3, 200);

        let reply = generator.generate(&context("medicare for all?", &[])).await.unwrap();
        assert_eq!(reply, "Yes. Winston backs it.\n\n- Point one");
        assert!(provider.seen.lock().unwrap().as_deref().is_some_and(|p| p.contains(PERSONA)));
    }

    #[tokio::test]
    async fn test_blank_reply_is_error() {
        let generator = ProseGenerator::new(EchoProvider::new("  \n\n "));
        let result = generator.generate(&context("medicare", &[])).await;
        assert!(matches!(result, Err(LlmProviderError::Provider(_))));
    }
}
