pub mod engine;
pub mod filters;

pub use engine::{
    rank_candidates, CandidateMatch, EvaluateError, Evaluator, MatchScore, MatchingEngine,
};
pub use filters::{run_all_filters, FilterDecision, FilterReport};
