use std::fmt;
use std::time::Duration;

pub mod classifier;
pub mod keywords;
pub mod models;
pub mod prompt;

pub use classifier::ArticleClassifier;
pub use keywords::fallback_categories;
pub use models::create_model;
pub use prompt::build_prompt;

#[derive(Clone)]
pub struct Config {
    pub api_key: Option<String>,
    /// `gemini`, `deepseek` or `none`
    pub model_name: Option<String>,
    /// Provider-side model identifier, e.g. `gemini-2.5-flash`
    pub model_id: Option<String>,
    pub model_url: Option<String>,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model_name: None,
            model_id: None,
            model_url: None,
            timeout: ArticleClassifier::DEFAULT_TIMEOUT,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("model_id", &self.model_id)
            .field("model_url", &self.model_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Build the classifier described by `config`.
pub fn create_classifier(config: &Config) -> na_core::Result<ArticleClassifier> {
    let model = create_model(config)?;
    Ok(ArticleClassifier::new(model).with_timeout(config.timeout))
}

pub mod prelude {
    pub use super::{create_classifier, ArticleClassifier, Config};
    pub use na_core::{Category, Classifier, Error, InferenceModel, Result};
}
