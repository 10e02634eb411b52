

use crate::corpus::{Category, KnowledgeItem};


/// Which items an intent may surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemScope {
    Health,
    Democracy,
    Economic,
    HouseholdEconomy,
    Housing,
    Accountability,
    CampaignFinance,
    Environment,
    Education,
    SocialEquality,
    Automation,
    SocialSecurity,
    Category(Category),
}

impl ItemScope {

    pub fn admits(&self, item: &KnowledgeItem) -> bool {
        let category = item.category;
        match self {
            Self::Health => category.is_health(),
            Self::Democracy => category.is_democracy(),
            Self::Economic => category.is_economic(),
            Self::HouseholdEconomy => category.is_household_economy(),
            Self::Housing => matches!(
                category,
                Category::HousingFamilySupport | Category::CostOfLivingRelief
            ),
            Self::Accountability => category.is_accountability(),
            Self::CampaignFinance => category.is_accountability() || category.is_democracy_reform(),
            Self::Environment => category.is_environmental(),
            Self::Education => category.is_education(),
            Self::SocialEquality => {
                category.is_health()
                    || category.is_democracy()
                    || mentions(item, "equality")
            }
            Self::Automation => {
                category.is_economic() || item.title.to_lowercase().contains("human dignity")
            }
            Self::SocialSecurity => {
                mentions(item, "social security") || mentions(item, "retirement")
            }
            Self::Category(c) => category == *c,
        }
    }

    /// Reason attached to items pulled from the whole corpus for this scope.
    pub fn reason(&self) -> String {
        let reason = match self {
            Self::Health => "Healthcare related",
            Self::Democracy => "Democracy related",
            Self::Economic => "Economic related",
            Self::HouseholdEconomy => "Economy related",
            Self::Housing => "Housing related",
            Self::Accountability => "Accountability related",
            Self::CampaignFinance => "Campaign finance reform related",
            Self::Environment => "Environmental related",
            Self::Education => "Education related",
            Self::SocialEquality => "Social equality related",
            Self::Automation => "Automation and human dignity related",
            Self::SocialSecurity => "Social Security related",
            Self::Category(c) => return format!("{} related", c),
        };
        reason.to_string()
    }
}

fn mentions(item: &KnowledgeItem, needle: &str) -> bool {
    item.title.to_lowercase().contains(needle) || item.description.to_lowercase().contains(needle)
}
