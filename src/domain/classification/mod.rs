//! Classification domain - task categories, results and the classifier capability

mod classifier;
mod result;
mod task_type;

pub use classifier::Classifier;
pub use result::{
    clamp_confidence, clamp_score, ClassificationResult, ClassifierBackend, ClassifierMode,
    MAX_COMPLEXITY, MIN_COMPLEXITY,
};
pub use task_type::TaskType;

#[cfg(test)]
pub use classifier::mock::MockClassifier;
