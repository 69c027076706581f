use async_trait::async_trait;
use crate::types::{Article, ArticleDraft, User};
use crate::Result;

#[async_trait]
pub trait ArticleStorage: Send + Sync {
    /// Store a new article with zero views
    async fn insert_article(&self, draft: &ArticleDraft) -> Result<Article>;

    /// All articles, oldest id first
    async fn list_articles(&self) -> Result<Vec<Article>>;

    async fn get_article(&self, id: i64) -> Result<Option<Article>>;

    /// Replace the content of an article, keeping its views and creation time
    async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<Option<Article>>;

    /// Returns false when there was nothing to delete
    async fn delete_article(&self, id: i64) -> Result<bool>;

    async fn increment_views(&self, id: i64) -> Result<Option<Article>>;
}

#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Fails with `Error::Conflict` if the email is taken
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

    async fn get_user(&self, id: i64) -> Result<Option<User>>;
}

pub trait Storage: ArticleStorage + UserStorage {}

impl<T: ArticleStorage + UserStorage> Storage for T {}
