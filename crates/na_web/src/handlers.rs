use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Json,
};
use na_core::{normalize, Article, ArticleDraft, ArticleUpdate, NewArticle};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ApiError, ApiResult};
use crate::extract::{ApiJson, ApiPath};
use crate::AppState;

const INDEX_HTML: &str = include_str!("../static/index.html");
const NOT_FOUND: &str = "News not found";

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn list_news(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Article>>> {
    let articles = state.storage.list_articles().await?;
    debug!("Listing {} articles", articles.len());
    Ok(Json(articles))
}

pub async fn get_news(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Article>> {
    state
        .storage
        .get_article(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn create_news(
    State(state): State<Arc<AppState>>,
    ApiJson(article): ApiJson<NewArticle>,
) -> ApiResult<(StatusCode, Json<Article>)> {
    article.validate()?;

    let categories = state.classifier.classify(&article.body).await;
    let draft = ArticleDraft {
        headline: article.headline,
        body: article.body,
        categories,
        countries: article.countries,
    };

    let created = state.storage.insert_article(&draft).await?;
    info!("Created article {} as {:?}", created.id, created.categories);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_news(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<ArticleUpdate>,
) -> ApiResult<Json<Article>> {
    update.validate()?;

    // Skip classification for articles that are not there.
    if state.storage.get_article(id).await?.is_none() {
        return Err(ApiError::not_found(NOT_FOUND));
    }

    let categories = match update.categories {
        Some(labels) => normalize(labels),
        None => state.classifier.classify(&update.body).await,
    };
    let draft = ArticleDraft {
        headline: update.headline,
        body: update.body,
        categories,
        countries: update.countries,
    };

    let updated = state
        .storage
        .update_article(id, &draft)
        .await?
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))?;
    info!("Updated article {} as {:?}", updated.id, updated.categories);
    Ok(Json(updated))
}

pub async fn delete_news(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<StatusCode> {
    if state.storage.delete_article(id).await? {
        info!("Deleted article {}", id);
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(NOT_FOUND))
    }
}

pub async fn view_news(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<Article>> {
    state
        .storage
        .increment_views(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}
