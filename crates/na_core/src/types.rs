use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub headline: String,
    pub body: String,
    pub categories: Vec<Category>,
    pub countries: Option<Vec<String>>,
    pub views: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an article; categories are assigned by the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewArticle {
    pub headline: String,
    pub body: String,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
}

/// Payload for replacing an article's content.
///
/// Without `categories` the new body is classified again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub headline: String,
    pub body: String,
    #[serde(default)]
    pub categories: Option<Vec<Category>>,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
}

/// A fully resolved article record, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleDraft {
    pub headline: String,
    pub body: String,
    pub categories: Vec<Category>,
    pub countries: Option<Vec<String>>,
}

impl NewArticle {
    pub fn validate(&self) -> Result<()> {
        validate_content(&self.headline, &self.body)
    }
}

impl ArticleUpdate {
    pub fn validate(&self) -> Result<()> {
        validate_content(&self.headline, &self.body)
    }
}

fn validate_content(headline: &str, body: &str) -> Result<()> {
    if headline.trim().is_empty() {
        return Err(Error::Validation("headline must not be empty".to_string()));
    }
    if body.trim().is_empty() {
        return Err(Error::Validation("body must not be empty".to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub hashed_password: String,
}
