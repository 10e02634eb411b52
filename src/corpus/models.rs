use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};


/// Closed set of policy categories. The legacy "Economic Opportunity" label
/// parses to `EconomicGuarantees`, so only current labels survive loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum Category {
    #[strum(serialize = "Mission & Accountability")]
    MissionAccountability,
    #[strum(serialize = "Direct Democracy")]
    DirectDemocracy,
    #[strum(serialize = "Legislative Renewal")]
    LegislativeRenewal,
    #[strum(serialize = "Economic Development & Jobs")]
    EconomicDevelopmentJobs,
    #[strum(serialize = "Healthcare Access")]
    HealthcareAccess,
    #[strum(serialize = "Cost of Living Relief")]
    CostOfLivingRelief,
    #[strum(serialize = "Transportation")]
    Transportation,
    #[strum(serialize = "Environmental Protection")]
    EnvironmentalProtection,
    #[strum(to_string = "Economic Guarantees", serialize = "Economic Opportunity")]
    EconomicGuarantees,
    #[strum(serialize = "Healthcare & Public Health")]
    HealthcarePublicHealth,
    #[strum(serialize = "Education & Opportunity")]
    EducationOpportunity,
    #[strum(serialize = "Democracy & Government Reform")]
    DemocracyGovernmentReform,
    #[strum(serialize = "Public Safety & Wellbeing")]
    PublicSafetyWellbeing,
    #[strum(serialize = "Sustainable Future")]
    SustainableFuture,
    #[strum(serialize = "Digital Equity")]
    DigitalEquity,
    #[strum(serialize = "Veterans & Institutions")]
    VeteransInstitutions,
    #[strum(serialize = "Housing & Family Support")]
    HousingFamilySupport,
    #[strum(serialize = "Proven Models")]
    ProvenModels,
    #[strum(serialize = "Foreign Policy")]
    ForeignPolicy,
    #[strum(serialize = "Institutional Restoration & Accountability")]
    InstitutionalRestorationAccountability,
    #[strum(serialize = "Civil Rights & Equality")]
    CivilRightsEquality,
}

impl Category {

    pub fn parse_label(label: &str) -> Option<Self> {
        label.trim().parse().ok()
    }


    pub fn label(&self) -> &'static str {
        (*self).into()
    }

    pub fn is_health(&self) -> bool {
        matches!(self, Self::HealthcareAccess | Self::HealthcarePublicHealth)
    }

    pub fn is_democracy(&self) -> bool {
        matches!(self, Self::DirectDemocracy | Self::DemocracyGovernmentReform)
    }

    pub fn is_democracy_reform(&self) -> bool {
        matches!(self, Self::DemocracyGovernmentReform)
    }

    pub fn is_economic(&self) -> bool {
        matches!(self, Self::EconomicDevelopmentJobs | Self::EconomicGuarantees)
    }

    pub fn is_accountability(&self) -> bool {
        matches!(
            self,
            Self::MissionAccountability | Self::InstitutionalRestorationAccountability
        )
    }

    pub fn is_environmental(&self) -> bool {
        matches!(self, Self::EnvironmentalProtection | Self::SustainableFuture)
    }

    pub fn is_education(&self) -> bool {
        matches!(self, Self::EducationOpportunity)
    }

    /// Economy in the broad sense: jobs, guarantees, cost of living, family support.
    pub fn is_household_economy(&self) -> bool {
        self.is_economic() || matches!(self, Self::CostOfLivingRelief | Self::HousingFamilySupport)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}


#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgeItem {
    pub id: String,
    pub category: Category,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<String>,
}

impl KnowledgeItem {

    pub fn new(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        description: impl Into<String>,
        example: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            description: description.into(),
            example: example.map(str::to_string),
        }
    }
}

/// Item shape as stored in the embedded data file, before category parsing.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawItem {
    pub id: String,
    pub category: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub example: Option<String>,
}
