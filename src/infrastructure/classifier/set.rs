//! Strategy dispatch over the configured classifiers

use std::sync::Arc;

use crate::domain::classification::{ClassificationResult, Classifier, ClassifierMode};
use crate::domain::DomainError;

use super::HeuristicClassifier;

/// Heuristic classifier plus an optional delegated one, selected per call
#[derive(Debug, Clone)]
pub struct ClassifierSet {
    heuristic: HeuristicClassifier,
    delegated: Option<Arc<dyn Classifier>>,
    default_mode: ClassifierMode,
}

impl ClassifierSet {
    pub fn new(heuristic: HeuristicClassifier, default_mode: ClassifierMode) -> Self {
        Self {
            heuristic,
            delegated: None,
            default_mode,
        }
    }

    pub fn with_delegated(mut self, delegated: Arc<dyn Classifier>) -> Self {
        self.delegated = Some(delegated);
        self
    }

    pub fn default_mode(&self) -> ClassifierMode {
        self.default_mode
    }

    pub fn has_delegated(&self) -> bool {
        self.delegated.is_some()
    }

    /// Resolve an optional per-request mode against the default
    pub fn resolve_mode(&self, requested: Option<ClassifierMode>) -> ClassifierMode {
        requested.unwrap_or(self.default_mode)
    }

    /// Classify with the given strategy
    pub async fn classify(
        &self,
        text: &str,
        mode: ClassifierMode,
    ) -> Result<ClassificationResult, DomainError> {
        match mode {
            ClassifierMode::Heuristic => self.heuristic.classify(text).await,
            ClassifierMode::Delegated => match &self.delegated {
                Some(classifier) => classifier.classify(text).await,
                None => Err(DomainError::classifier_unavailable(
                    "delegated",
                    "no delegated classifier backend is configured",
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classification::{MockClassifier, TaskType};

    #[tokio::test]
    async fn test_dispatches_by_mode() {
        let delegated = Arc::new(MockClassifier::new(ClassifierMode::Delegated, 9, TaskType::Math));
        let set = ClassifierSet::new(HeuristicClassifier::with_defaults(), ClassifierMode::Heuristic)
            .with_delegated(delegated.clone());

        let heuristic = set
            .classify("What is the capital of France?", ClassifierMode::Heuristic)
            .await
            .unwrap();
        let remote = set
            .classify("What is the capital of France?", ClassifierMode::Delegated)
            .await
            .unwrap();

        assert_eq!(heuristic.task_type(), TaskType::SimpleQa);
        assert_eq!(remote.task_type(), TaskType::Math);
        assert_eq!(delegated.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_delegated_is_unavailable() {
        let set = ClassifierSet::new(HeuristicClassifier::with_defaults(), ClassifierMode::Heuristic);

        let err = set.classify("hi", ClassifierMode::Delegated).await.unwrap_err();

        assert!(matches!(err, DomainError::ClassifierUnavailable { .. }));
        assert!(!set.has_delegated());
    }

    #[test]
    fn test_resolve_mode() {
        let set = ClassifierSet::new(HeuristicClassifier::with_defaults(), ClassifierMode::Delegated);

        assert_eq!(set.resolve_mode(None), ClassifierMode::Delegated);
        assert_eq!(
            set.resolve_mode(Some(ClassifierMode::Heuristic)),
            ClassifierMode::Heuristic
        );
    }
}
