//! Agricultural news feed client.
//!
//! News are proxied from the Google News RSS search endpoint. Every request
//! builds a fresh search URL and reshapes the parsed feed items into
//! [`Article`] values; nothing is cached.

use std::time::Duration;

use derive_more::{Display, Error, From};
use reqwest::{Client, Url};
use rss::Channel;
use serde::Serialize;

use crate::config;

/// Source name used when neither the item nor the feed provide one.
pub const DEFAULT_SOURCE: &str = "Google News";

/// Errors that may occur while fetching news.
#[derive(Debug, Display, From, Error)]
pub enum NewsError {
    /// HTTP request error.
    Http(reqwest::Error),

    /// Response body is not a valid RSS feed.
    Feed(rss::Error),

    /// Configured feed URL is not valid.
    #[display(fmt = "invalid feed URL")]
    InvalidUrl,
}

/// A single news article.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Article {
    /// Position of an article within the feed.
    pub id: usize,
    pub title: String,
    pub link: String,
    pub published: Option<String>,
    pub summary: String,
    pub source: String,
}

/// Configured news feed client.
pub struct NewsClient<'a> {
    config: &'a config::News,
    client: Client,
}

impl<'a> NewsClient<'a> {
    /// Create new [`NewsClient`] from the provided [`News`] configuration.
    ///
    /// [`News`]: config::News
    pub fn new(config: &'a config::News) -> Result<NewsClient<'a>, NewsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(NewsClient { config, client })
    }

    /// Build a feed search URL for the configured topic and optional extra search terms.
    pub fn feed_url(&self, terms: Option<&str>) -> Result<Url, NewsError> {
        let query = match terms.map(str::trim).filter(|terms| !terms.is_empty()) {
            Some(terms) => format!("{} {}", self.config.topic, terms),
            None => self.config.topic.clone(),
        };

        let language = self
            .config
            .language
            .split('-')
            .next()
            .unwrap_or(&self.config.language);

        let edition = format!("{}:{}", self.config.country, language);

        Url::parse_with_params(
            &self.config.feed_url,
            &[
                ("q", query.as_str()),
                ("hl", self.config.language.as_str()),
                ("gl", self.config.country.as_str()),
                ("ceid", edition.as_str()),
            ],
        )
        .map_err(|_| NewsError::InvalidUrl)
    }

    /// Fetch news articles for the configured topic and optional extra search terms.
    pub async fn articles(&self, terms: Option<&str>) -> Result<Vec<Article>, NewsError> {
        let url = self.feed_url(terms)?;

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        parse_feed(&body)
    }
}

/// Parse RSS feed contents into a list of articles.
pub fn parse_feed(body: &[u8]) -> Result<Vec<Article>, NewsError> {
    let channel = Channel::read_from(body)?;

    let feed_title = Some(channel.title()).filter(|title| !title.is_empty());

    let articles = channel
        .items()
        .iter()
        .enumerate()
        .map(|(id, item)| Article {
            id,
            title: item.title().unwrap_or_default().to_string(),
            link: item.link().unwrap_or_default().to_string(),
            published: item.pub_date().map(str::to_string),
            summary: item.description().unwrap_or_default().to_string(),
            source: item
                .source()
                .and_then(|source| source.title())
                .or(feed_title)
                .unwrap_or(DEFAULT_SOURCE)
                .to_string(),
        })
        .collect();

    Ok(articles)
}

#[cfg(test)]
mod tests {
    use crate::config::News;

    use super::{parse_feed, NewsClient};

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>"agriculture india" - Google News</title>
    <link>https://news.google.com</link>
    <description>Google News</description>
    <item>
      <title>Monsoon boosts kharif sowing</title>
      <link>https://example.com/kharif</link>
      <pubDate>Mon, 01 Jul 2024 10:00:00 GMT</pubDate>
      <description>Sowing is up 10% year on year.</description>
      <source url="https://example.com">Agri Times</source>
    </item>
    <item>
      <title>MSP for paddy raised</title>
      <link>https://example.com/msp</link>
    </item>
  </channel>
</rss>"#;

    #[test]
    fn default_url() {
        let config = News::default();
        let client = NewsClient::new(&config).unwrap();

        assert_eq!(
            client.feed_url(None).unwrap().as_str(),
            "https://news.google.com/rss/search?q=agriculture+india&hl=en-IN&gl=IN&ceid=IN%3Aen"
        );
    }

    #[test]
    fn url_with_terms() {
        let config = News::default();
        let client = NewsClient::new(&config).unwrap();

        assert_eq!(
            client.feed_url(Some("organic farming")).unwrap().as_str(),
            "https://news.google.com/rss/search?q=agriculture+india+organic+farming&hl=en-IN&gl=IN&ceid=IN%3Aen"
        );

        assert_eq!(
            client.feed_url(Some("  ")).unwrap(),
            client.feed_url(None).unwrap()
        );
    }

    #[test]
    fn feed_items() {
        let articles = parse_feed(FEED.as_bytes()).unwrap();

        assert_eq!(articles.len(), 2);

        assert_eq!(articles[0].id, 0);
        assert_eq!(articles[0].title, "Monsoon boosts kharif sowing");
        assert_eq!(
            articles[0].published.as_deref(),
            Some("Mon, 01 Jul 2024 10:00:00 GMT")
        );
        assert_eq!(articles[0].summary, "Sowing is up 10% year on year.");
        assert_eq!(articles[0].source, "Agri Times");

        assert_eq!(articles[1].id, 1);
        assert_eq!(articles[1].published, None);
        assert_eq!(articles[1].summary, "");
        assert_eq!(articles[1].source, r#""agriculture india" - Google News"#);
    }

    #[test]
    fn invalid_feed() {
        assert!(parse_feed(b"not a feed").is_err());
    }
}
