use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use na_core::{normalize, Category, Classifier, Error, InferenceModel, Result};
use tracing::{debug, warn};

use crate::keywords::fallback_categories;

/// Classifies with a generative model when one is configured and falls back
/// to the keyword table whenever that attempt fails.
pub struct ArticleClassifier {
    model: Option<Arc<dyn InferenceModel>>,
    timeout: Duration,
}

impl fmt::Debug for ArticleClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArticleClassifier")
            .field("model", &self.model.as_ref().map(|m| m.name().to_string()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ArticleClassifier {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(model: Option<Arc<dyn InferenceModel>>) -> Self {
        Self {
            model,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn keywords_only() -> Self {
        Self::new(None)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model_name(&self) -> &str {
        self.model.as_ref().map(|m| m.name()).unwrap_or("keywords")
    }

    async fn categorize_with(&self, model: &dyn InferenceModel, text: &str) -> Result<Vec<Category>> {
        match tokio::time::timeout(self.timeout, model.categorize(text)).await {
            Ok(result) => result,
            Err(_) => Err(Error::Inference(format!(
                "{} did not answer within {:?}",
                model.name(),
                self.timeout
            ))),
        }
    }
}

#[async_trait]
impl Classifier for ArticleClassifier {
    async fn classify(&self, text: &str) -> Vec<Category> {
        if let Some(model) = &self.model {
            match self.categorize_with(model.as_ref(), text).await {
                Ok(categories) => {
                    let categories = normalize(categories);
                    debug!("{} classified article as {:?}", model.name(), categories);
                    return categories;
                }
                Err(e) => {
                    warn!("AI classification with {} failed, using keyword fallback: {}", model.name(), e);
                }
            }
        }

        normalize(fallback_categories(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedModel(Vec<Category>);

    #[async_trait]
    impl InferenceModel for FixedModel {
        fn name(&self) -> &str {
            "Fixed"
        }

        async fn categorize(&self, _text: &str) -> Result<Vec<Category>> {
            Ok(self.0.clone())
        }
    }

    struct FailingModel;

    #[async_trait]
    impl InferenceModel for FailingModel {
        fn name(&self) -> &str {
            "Failing"
        }

        async fn categorize(&self, _text: &str) -> Result<Vec<Category>> {
            Err(Error::Inference("quota exceeded".to_string()))
        }
    }

    struct SlowModel;

    #[async_trait]
    impl InferenceModel for SlowModel {
        fn name(&self) -> &str {
            "Slow"
        }

        async fn categorize(&self, _text: &str) -> Result<Vec<Category>> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(vec![Category::Physics])
        }
    }

    fn with_model(model: impl InferenceModel + 'static) -> ArticleClassifier {
        ArticleClassifier::new(Some(Arc::new(model)))
    }

    #[tokio::test]
    async fn test_model_answer_is_normalized() {
        let classifier = with_model(FixedModel(vec![Category::Other, Category::Ai]));
        assert_eq!(classifier.classify("anything").await, vec![Category::Ai]);

        let classifier = with_model(FixedModel(vec![]));
        assert_eq!(classifier.classify("anything").await, vec![Category::Other]);

        let classifier = with_model(FixedModel(vec![
            Category::Space,
            Category::Physics,
            Category::Engineering,
            Category::Aeronautics,
        ]));
        assert_eq!(classifier.classify("anything").await.len(), 3);
    }

    #[tokio::test]
    async fn test_model_failure_falls_back_to_keywords() {
        let classifier = with_model(FailingModel);
        assert_eq!(
            classifier.classify("New cancer treatment approved").await,
            vec![Category::MedicalScience]
        );
        assert_eq!(
            classifier.classify("Solar panels improve efficiency").await,
            vec![Category::Other]
        );
    }

    #[tokio::test]
    async fn test_timeout_falls_back_to_keywords() {
        let classifier = with_model(SlowModel).with_timeout(Duration::from_millis(50));
        assert_eq!(
            classifier.classify("Rocket reaches orbit").await,
            vec![Category::Space]
        );
    }

    #[tokio::test]
    async fn test_keywords_only() {
        let classifier = ArticleClassifier::keywords_only();
        assert_eq!(classifier.model_name(), "keywords");
        assert_eq!(
            classifier.classify("Hospital robots cut pollution").await,
            vec![Category::MedicalScience, Category::Robotics, Category::Environment]
        );
    }
}
