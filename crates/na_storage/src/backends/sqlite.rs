use async_trait::async_trait;
use chrono::{DateTime, Utc};
use na_core::{Article, ArticleDraft, ArticleStorage, Category, Error, Result, User, UserStorage};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use crate::StorageBackend;

const DEFAULT_DB_PATH: &str = "news.db";
const IN_MEMORY: &str = ":memory:";

const MIGRATIONS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS news (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        headline TEXT NOT NULL,
        body TEXT NOT NULL,
        categories TEXT NOT NULL DEFAULT '[]',
        countries TEXT,
        views INTEGER DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        email TEXT NOT NULL UNIQUE,
        hashed_password TEXT NOT NULL
    )
    "#,
    // Add future migrations here
];

pub struct SQLiteStorage {
    pool: Arc<SqlitePool>,
    db_path: PathBuf,
}

#[async_trait]
impl StorageBackend for SQLiteStorage {
    fn get_error_message() -> &'static str {
        "SQLite database should be writable at the configured path (default ./news.db)"
    }

    async fn new(url: Option<&str>) -> Result<Self> {
        let path = url
            .map(|url| url.trim_start_matches("sqlite://").trim_start_matches("sqlite:"))
            .unwrap_or(DEFAULT_DB_PATH);
        if path == IN_MEMORY {
            return Self::new_in_memory().await;
        }
        Self::new_with_path(Path::new(path)).await
    }
}

impl SQLiteStorage {
    pub async fn new_with_path(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);
        Self::connect(SqlitePoolOptions::new(), options, db_path.to_path_buf()).await
    }

    /// A private database that lives as long as this storage.
    pub async fn new_in_memory() -> Result<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| Error::Database(format!("Invalid in-memory database options: {}", e)))?;
        // Every connection to :memory: opens a separate database, so keep exactly one alive.
        let pool_options = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
        Self::connect(pool_options, options, PathBuf::from(IN_MEMORY)).await
    }

    async fn connect(
        pool_options: SqlitePoolOptions,
        options: SqliteConnectOptions,
        db_path: PathBuf,
    ) -> Result<Self> {
        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| Error::Database(format!("Failed to connect to database: {}", e)))?;

        for (i, migration) in MIGRATIONS.iter().enumerate() {
            sqlx::query(migration)
                .execute(&pool)
                .await
                .map_err(|e| Error::Database(format!("Failed to run migration {}: {}", i, e)))?;
        }

        Ok(Self {
            pool: Arc::new(pool),
            db_path,
        })
    }

    pub fn get_db_path(&self) -> &Path {
        &self.db_path
    }
}

fn parse_timestamp(row: &SqliteRow, column: &str) -> Result<DateTime<Utc>> {
    let raw: String = row
        .try_get(column)
        .map_err(|e| Error::Database(format!("Failed to read {}: {}", column, e)))?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| Error::Database(format!("Failed to parse {} '{}': {}", column, raw, e)))
}

fn article_from_row(row: &SqliteRow) -> Result<Article> {
    let read = |e: sqlx::Error| Error::Database(format!("Failed to read article row: {}", e));

    let categories: String = row.try_get("categories").map_err(read)?;
    let categories: Vec<Category> = serde_json::from_str(&categories)?;
    let countries: Option<String> = row.try_get("countries").map_err(read)?;
    let countries = countries
        .map(|c| serde_json::from_str::<Vec<String>>(&c))
        .transpose()?;

    Ok(Article {
        id: row.try_get("id").map_err(read)?,
        headline: row.try_get("headline").map_err(read)?,
        body: row.try_get("body").map_err(read)?,
        categories,
        countries,
        views: row.try_get("views").map_err(read)?,
        created_at: parse_timestamp(row, "created_at")?,
        updated_at: parse_timestamp(row, "updated_at")?,
    })
}

fn user_from_row(row: &SqliteRow) -> Result<User> {
    let read = |e: sqlx::Error| Error::Database(format!("Failed to read user row: {}", e));
    Ok(User {
        id: row.try_get("id").map_err(read)?,
        email: row.try_get("email").map_err(read)?,
        hashed_password: row.try_get("hashed_password").map_err(read)?,
    })
}

fn encode_draft(draft: &ArticleDraft) -> Result<(String, Option<String>)> {
    let categories = serde_json::to_string(&draft.categories)?;
    let countries = draft
        .countries
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;
    Ok((categories, countries))
}

#[async_trait]
impl ArticleStorage for SQLiteStorage {
    async fn insert_article(&self, draft: &ArticleDraft) -> Result<Article> {
        let (categories, countries) = encode_draft(draft)?;
        let now = Utc::now().to_rfc3339();

        let result = sqlx::query(
            r#"
            INSERT INTO news (headline, body, categories, countries, views, created_at, updated_at)
            VALUES (?, ?, ?, ?, 0, ?, ?)
            "#,
        )
        .bind(&draft.headline)
        .bind(&draft.body)
        .bind(categories)
        .bind(countries)
        .bind(&now)
        .bind(&now)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to store article: {}", e)))?;

        let id = result.last_insert_rowid();
        self.get_article(id)
            .await?
            .ok_or_else(|| Error::Storage(format!("Article {} vanished after insert", id)))
    }

    async fn list_articles(&self) -> Result<Vec<Article>> {
        let rows = sqlx::query("SELECT * FROM news ORDER BY id ASC")
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to list articles: {}", e)))?;

        rows.iter().map(article_from_row).collect()
    }

    async fn get_article(&self, id: i64) -> Result<Option<Article>> {
        let row = sqlx::query("SELECT * FROM news WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to get article {}: {}", id, e)))?;

        row.as_ref().map(article_from_row).transpose()
    }

    async fn update_article(&self, id: i64, draft: &ArticleDraft) -> Result<Option<Article>> {
        let (categories, countries) = encode_draft(draft)?;

        let result = sqlx::query(
            r#"
            UPDATE news
            SET headline = ?, body = ?, categories = ?, countries = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.headline)
        .bind(&draft.body)
        .bind(categories)
        .bind(countries)
        .bind(Utc::now().to_rfc3339())
        .bind(id)
        .execute(&*self.pool)
        .await
        .map_err(|e| Error::Database(format!("Failed to update article {}: {}", id, e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_article(id).await
    }

    async fn delete_article(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM news WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to delete article {}: {}", id, e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn increment_views(&self, id: i64) -> Result<Option<Article>> {
        let result = sqlx::query("UPDATE news SET views = COALESCE(views, 0) + 1 WHERE id = ?")
            .bind(id)
            .execute(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to count view of article {}: {}", id, e)))?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.get_article(id).await
    }
}

#[async_trait]
impl UserStorage for SQLiteStorage {
    async fn create_user(&self, email: &str, hashed_password: &str) -> Result<User> {
        let result = sqlx::query("INSERT INTO users (email, hashed_password) VALUES (?, ?)")
            .bind(email)
            .bind(hashed_password)
            .execute(&*self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_unique_violation() => {
                    Error::Conflict(format!("Email already registered: {}", email))
                }
                e => Error::Database(format!("Failed to create user: {}", e)),
            })?;

        Ok(User {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            hashed_password: hashed_password.to_string(),
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to look up user: {}", e)))?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn get_user(&self, id: i64) -> Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| Error::Database(format!("Failed to get user {}: {}", id, e)))?;

        row.as_ref().map(user_from_row).transpose()
    }
}
