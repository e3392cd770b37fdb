pub mod ranker;
pub mod resolver;

pub use ranker::{rank, ScoredCandidate};
pub use resolver::{resolve, Resolution};
