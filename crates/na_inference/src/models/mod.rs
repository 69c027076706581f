use std::sync::Arc;
use na_core::{Category, Error, InferenceModel, Result};
use serde::Deserialize;
use url::Url;

use crate::Config;

pub mod deepseek;
pub mod gemini;

pub use deepseek::DeepSeekModel;
pub use gemini::GeminiModel;

/// The only shape a model answer may take.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CategoryResponse {
    categories: Vec<Category>,
}

/// Decode a model's JSON answer.
///
/// Markdown code fences around the object are tolerated; anything else that
/// is not exactly `{"categories": [<taxonomy label>, ...]}` is an error.
pub(crate) fn parse_categories(text: &str) -> Result<Vec<Category>> {
    let text = strip_code_fence(text.trim());
    let response: CategoryResponse = serde_json::from_str(text)?;
    Ok(response.categories)
}

fn strip_code_fence(text: &str) -> &str {
    match text.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.strip_prefix("json").unwrap_or(rest);
            rest.strip_suffix("```").unwrap_or(rest).trim()
        }
        None => text,
    }
}

pub(crate) fn parse_base_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::Config(format!("Invalid model URL {}: {}", url, e)))?;
    Ok(parsed.as_str().trim_end_matches('/').to_string())
}

/// Build the primary model named in the configuration.
///
/// `none` (or `keywords`) yields no model, leaving only the keyword fallback.
pub fn create_model(config: &Config) -> Result<Option<Arc<dyn InferenceModel>>> {
    let name = config.model_name.as_deref().unwrap_or("gemini").to_lowercase();

    let api_key = || {
        config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("An API key is required for the {} model", name)))
    };

    match name.as_str() {
        "gemini" => {
            let mut model = GeminiModel::new(api_key()?);
            if let Some(id) = &config.model_id {
                model = model.with_model(id);
            }
            if let Some(url) = &config.model_url {
                model = model.with_base_url(url)?;
            }
            Ok(Some(Arc::new(model)))
        }
        "deepseek" => {
            let mut model = DeepSeekModel::new(api_key()?);
            if let Some(id) = &config.model_id {
                model = model.with_model(id);
            }
            if let Some(url) = &config.model_url {
                model = model.with_base_url(url)?;
            }
            Ok(Some(Arc::new(model)))
        }
        "none" | "keywords" => Ok(None),
        other => Err(Error::Config(format!(
            "Unknown model '{}'. Available models: gemini (default), deepseek, none",
            other
        ))),
    }
}
