use std::sync::Arc;

use axum::{extract::Query, Extension, Json};
use common::config::Config;
use serde::Deserialize;

use super::{fetch_articles, NewsRequestError, NewsResponse};

#[derive(Deserialize)]
pub(super) struct SearchQuery {
    #[serde(default)]
    q: Option<String>,
}

/// Search agricultural news.
pub(super) async fn search(
    Query(query): Query<SearchQuery>,
    Extension(config): Extension<Arc<Config>>,
) -> Result<Json<NewsResponse>, NewsRequestError> {
    let query = query
        .q
        .filter(|q| !q.trim().is_empty())
        .ok_or(NewsRequestError::EmptyQuery)?;

    let articles = fetch_articles(&config, Some(&query), "Failed to search news").await?;

    Ok(Json(NewsResponse {
        query: Some(query),
        ..NewsResponse::new(articles)
    }))
}
