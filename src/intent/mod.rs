

pub mod classifier;
pub mod patterns;
pub mod scope;
pub mod stance;
pub mod topic;

pub use classifier::{classify, infer_top_category, Classification, Intent, IntentSignals, NO_MATCH_LEAD};
pub use scope::ItemScope;
pub use stance::StanceTopic;
pub use topic::TopicIntent;
