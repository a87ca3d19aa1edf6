//! Classifier strategies

mod delegated;
mod factory;
mod heuristic;
mod patterns;
mod set;

pub use delegated::{parse_reply, system_instruction, DelegatedClassifier};
pub use factory::ClassifierFactory;
pub use heuristic::{base_score, estimate_tokens, HeuristicClassifier, HeuristicThresholds};
pub use patterns::{PatternBank, Signal, TaskPatterns};
pub use set::ClassifierSet;
