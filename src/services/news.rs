use anyhow::{anyhow, Context, Result};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
const PAGE_SIZE: u8 = 5;

/// News categories offered in the news menu.
pub const CATEGORIES: &[&str] = &[
    "general",
    "business",
    "health",
    "science",
    "sports",
    "technology",
];

/// Client for the newsapi.org top-headlines endpoint.
#[derive(Clone)]
pub struct NewsService {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Headlines {
    pub status: String,
    #[serde(rename = "totalResults")]
    pub total_results: u32,
    pub articles: Vec<Article>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub title: String,
    pub source: Source,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Source {
    pub name: String,
}

impl NewsService {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(
        client: reqwest::Client,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.into(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn top_headlines(&self, category: &str) -> Result<Headlines> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("news API key not configured"))?;

        let url = format!("{}/top-headlines", self.base_url);
        let page_size = PAGE_SIZE.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("category", category),
                ("pageSize", page_size.as_str()),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .context("news request failed")?
            .error_for_status()
            .context("news provider returned an error status")?;

        response
            .json::<Headlines>()
            .await
            .context("failed to decode news response")
    }
}

/// Renders up to five headlines for one category.
pub fn format_headlines(category: &str, headlines: &Headlines) -> String {
    if headlines.status != "ok" || headlines.total_results == 0 {
        return format!("No news available for the {category} category at the moment.");
    }

    let mut out = format!("📰 Top {} News:\n\n", capitalize(category));
    for (i, article) in headlines.articles.iter().take(PAGE_SIZE as usize).enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, article.title));
        out.push_str(&format!("Source: {}\n", article.source.name));
        out.push_str(article.description.as_deref().unwrap_or("No description available"));
        out.push_str("\n\n");
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Fixed apology shown when the provider fails.
pub const UNAVAILABLE_MESSAGE: &str =
    "Sorry, I couldn't fetch the news right now. Please try again later.";

/// Shown when no API key is configured.
pub const NOT_CONFIGURED_MESSAGE: &str =
    "News headlines are not configured. Ask the bot operator to set NEWS_API_KEY.";

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    const FIXTURE: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "title": "First headline",
                "source": {"name": "Example Times"},
                "description": "Something happened."
            },
            {
                "title": "Second headline",
                "source": {"name": "Daily Sample"},
                "description": null
            }
        ]
    }"#;

    #[test]
    fn test_headlines_deserialize() {
        let headlines: Headlines = serde_json::from_str(FIXTURE).unwrap();
        assert_eq!(headlines.total_results, 2);
        assert_eq!(headlines.articles[0].source.name, "Example Times");
        assert_eq!(headlines.articles[1].description, None);
    }

    #[test]
    fn test_format_headlines() {
        let headlines: Headlines = serde_json::from_str(FIXTURE).unwrap();
        let text = format_headlines("technology", &headlines);

        assert!(text.contains("Top Technology News"));
        assert!(text.contains("1. First headline"));
        assert!(text.contains("Source: Example Times"));
        assert!(text.contains("No description available"));
    }

    #[test]
    fn test_format_headlines_empty() {
        let headlines = Headlines {
            status: "ok".into(),
            total_results: 0,
            articles: vec![],
        };
        let text = format_headlines("science", &headlines);

        assert!(text.contains("No news available for the science category"));
    }

    #[tokio::test]
    async fn test_headlines_without_api_key_error() {
        let service = NewsService::new(reqwest::Client::new(), None);
        assert!(!service.is_configured());
        assert!(service.top_headlines("general").await.is_err());
    }
}
