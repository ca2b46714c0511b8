use std::sync::Arc;

use axum::{extract::Path, Extension, Json};
use common::config::Config;

use super::{fetch_articles, NewsRequestError, NewsResponse};

/// Fetch agricultural news related to a category, e.g. `organic` or `irrigation`.
pub(super) async fn category(
    Path(category): Path<String>,
    Extension(config): Extension<Arc<Config>>,
) -> Result<Json<NewsResponse>, NewsRequestError> {
    let category = category.to_lowercase();

    let articles = fetch_articles(
        &config,
        Some(&category),
        format!("Failed to fetch {category} news"),
    )
    .await?;

    Ok(Json(NewsResponse {
        category: Some(category),
        ..NewsResponse::new(articles)
    }))
}
