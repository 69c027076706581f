use async_trait::async_trait;
use chrono::Utc;
use na_core::{Article, ArticleDraft, ArticleStorage, Error, Result, User, UserStorage};
use std::sync::Arc;
use tokio::sync::RwLock;
use crate::StorageBackend;

#[derive(Default)]
pub struct MemoryStore {
    articles: Vec<Article>,
    users: Vec<User>,
    last_article_id: i64,
    last_user_id: i64,
}

impl MemoryStore {
    pub fn insert_article(&mut self, draft: &ArticleDraft) -> Article {
        self.last_article_id += 1;
        let now = Utc::now();
        let article = Article {
            id: self.last_article_id,
            headline: draft.headline.clone(),
            body: draft.body.clone(),
            categories: draft.categories.clone(),
            countries: draft.countries.clone(),
            views: Some(0),
            created_at: now,
            updated_at: now,
        };
        self.articles.push(article.clone());
        article
    }

    pub fn update_article(&mut self, id: i64, draft: &ArticleDraft) -> Option<Article> {
        let article = self.articles.iter_mut().find(|a| a.id == id)?;
        article.headline = draft.headline.clone();
        article.body = draft.body.clone();
        article.categories = draft.categories.clone();
        article.countries = draft.countries.clone();
        article.updated_at = Utc::now();
        Some(article.clone())
    }

    pub fn delete_article(&mut self, id: i64) -> bool {
        let before = self.articles.len();
        self.articles.retain(|a| a.id != id);
        self.articles.len() != before
    }

    pub fn increment_views(&mut self, id: i64) -> Option<Article> {
        let article = self.articles.iter_mut().find(|a| a.id == id)?;
        article.views = Some(article.views.unwrap_or(0) + 1);
        Some(article.clone())
    }

    pub fn create_user(&mut self, email: &str, hashed_password: &str) -> Result<User> {
        if self.users.iter().any(|u| u.email == email) {
            return Err(Error::Conflict(format!("Email already registered: {}", email)));
        }
        self.last_user_id += 1;
        let user = User {
            id: self.last_user_id,
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        self.users.push(user.clone());
        Ok(user)
    }
}

/// Process-local storage; everything is lost on shutdown.
#[derive(Default)]
pub struct MemoryStorage {
    store: Arc<RwLock<MemoryStore>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn get_error_message() -> &'static str {
        "Memory storage should be available"
    }

    async fn new(_url: Option<&str>) -> Result<Self> where Self: Sized {
        Ok(MemoryStorage::new())
    }
}

#[async_trait]
impl ArticleStorage for MemoryStorage {
    async fn insert_article(&self, draft: &ArticleDraft) -> Result<Article> {
        let mut store = self.store.write().await;
        Ok(store.insert_article(draft))
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        let store = self.store.read().await;
        Ok(store.articles.clone())
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let store = self.store.read().await;
        Ok(store.articles.iter().find(|a| a.id == id).cloned())
    }

    async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<Option<Article>> {
        let mut store = self.store.write().await;
        Ok(store.update_article(id, draft))
    }

    async fn delete_article(&self, id: i64) -> Result<bool> {
        let mut store = self.store.write().await;
        Ok(store.delete_article(id))
    }

    async fn increment_views(&self, id: i64) -> Result<Option<Article>> {
        let mut store = self.store.write().await;
        Ok(store.increment_views(id))
    }
}

#[async_trait]
impl UserStorage for MemoryStorage {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User> {
        let mut store = self.store.write().await;
        store.create_user(email, hashed_password)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.email == email).cloned())
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.iter().find(|u| u.id == id).cloned())
    }
}
