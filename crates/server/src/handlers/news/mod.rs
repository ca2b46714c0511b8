/// News by category route.
mod category;

/// Latest agricultural news route.
mod latest;

/// News search route.
mod search;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::{
    config::Config,
    news::{Article, NewsClient, NewsError},
};
use db::DatabaseConnection;
use derive_more::{Display, Error};
use serde::Serialize;
use serde_json::json;
use tracing::error;

pub(crate) fn routes() -> Router<Arc<DatabaseConnection>> {
    Router::new()
        .route("/", get(latest::latest))
        .route("/category/:category", get(category::category))
        .route("/search", get(search::search))
}

/// Errors that may occur while proxying the news feed.
#[derive(Debug, Display, Error)]
pub(super) enum NewsRequestError {
    /// Unable to fetch or parse the upstream feed.
    #[display(fmt = "{}", message)]
    Fetch { message: String, source: NewsError },

    /// Search request without a query.
    #[display(fmt = "Search query is required")]
    EmptyQuery,
}

impl IntoResponse for NewsRequestError {
    fn into_response(self) -> Response {
        let message = self.to_string();

        match self {
            NewsRequestError::Fetch { source, .. } => {
                error!(%source, "{}", message);

                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "message": message,
                        "error": source.to_string(),
                    })),
                )
                    .into_response()
            }
            NewsRequestError::EmptyQuery => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "message": message,
                })),
            )
                .into_response(),
        }
    }
}

/// News list response.
#[derive(Serialize)]
pub(super) struct NewsResponse {
    success: bool,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
    articles: Vec<Article>,
}

impl NewsResponse {
    fn new(articles: Vec<Article>) -> Self {
        Self {
            success: true,
            count: articles.len(),
            category: None,
            query: None,
            articles,
        }
    }
}

/// Fetch articles matching the configured topic and extra search terms.
///
/// `message` describes the failure to a client.
async fn fetch_articles(
    config: &Config,
    terms: Option<&str>,
    message: impl Into<String>,
) -> Result<Vec<Article>, NewsRequestError> {
    let result = match NewsClient::new(&config.news) {
        Ok(client) => client.articles(terms).await,
        Err(err) => Err(err),
    };

    result.map_err(|source| NewsRequestError::Fetch {
        message: message.into(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use std::{collections::HashMap, net::SocketAddr};

    use axum::{extract::Query, http::header::CONTENT_TYPE, routing::get, Router};
    use common::config::Config;

    use crate::testing::serve;

    /// Serve an RSS feed that echoes the search query as its single item title.
    pub(crate) async fn feed_server() -> SocketAddr {
        let router = Router::new()
            .route(
                "/rss/search",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let query = params.get("q").cloned().unwrap_or_default();

                    (
                        [(CONTENT_TYPE, "application/rss+xml")],
                        format!(
                            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>{query}</title>
      <link>https://example.com/article</link>
      <pubDate>Mon, 01 Jul 2024 10:00:00 GMT</pubDate>
      <description>Summary</description>
      <source url="https://example.com">Krishi Jagran</source>
    </item>
  </channel>
</rss>"#
                        ),
                    )
                }),
            )
            .route(
                "/broken/search",
                get(|| async { (axum::http::StatusCode::BAD_GATEWAY, "unavailable") }),
            );

        serve(router).await
    }

    /// Test configuration with the news feed pointing to the provided path of a local server.
    pub(crate) fn config(address: SocketAddr, path: &str) -> Config {
        let mut config = Config::for_tests();
        config.news.feed_url = format!("http://{address}{path}");
        config
    }
}
