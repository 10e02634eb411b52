

pub mod heuristics;
pub mod lexical;
pub mod ranker;
pub mod scorer;

pub use lexical::QueryContext;
pub use ranker::{rank, RankedItem};
pub use scorer::{ItemFields, ScoredMatch};
