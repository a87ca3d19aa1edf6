use std::fmt::Debug;

use async_trait::async_trait;

use super::{ClassificationResult, ClassifierMode};
use crate::domain::DomainError;

/// Capability shared by every classification strategy
#[async_trait]
pub trait Classifier: Send + Sync + Debug {
    /// Classify a prompt into a complexity score and task category
    async fn classify(&self, text: &str) -> Result<ClassificationResult, DomainError>;

    /// Strategy tag of this classifier
    fn mode(&self) -> ClassifierMode;
}
