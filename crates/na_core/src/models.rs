use async_trait::async_trait;
use crate::category::Category;
use crate::Result;

/// A generative service that can label text in one attempt.
#[async_trait]
pub trait InferenceModel: Send + Sync {
    fn name(&self) -> &str;

    /// Ask the service for the categories of `text`.
    ///
    /// Any failure, including a well-formed answer of the wrong shape, is an error.
    async fn categorize(&self, text: &str) -> Result<Vec<Category>>;
}

/// Maps article text to its categories. Never fails.
#[async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, text: &str) -> Vec<Category>;
}
