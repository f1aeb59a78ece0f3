//! Upstream game API client.
//!
//! Fetches player profiles, battle logs and the brawler catalog as JSON.
//! Handlers talk to the [`GameApi`] trait so they can run against an
//! in-memory source in tests.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use crate::config::ApiConfig;
use crate::models::{BattleLog, BrawlerCatalog, CatalogBrawler, Player, PlayerTag};

/// Errors that can occur during fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid API token")]
    InvalidToken,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Source of player, battle-log and catalog data.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Fetch a player profile.
    async fn player(&self, tag: &PlayerTag) -> Result<Player, FetchError>;

    /// Fetch a player's recent battles.
    async fn battle_log(&self, tag: &PlayerTag) -> Result<BattleLog, FetchError>;

    /// Fetch the brawler catalog.
    async fn brawlers(&self) -> Result<BrawlerCatalog, FetchError>;

    /// Like [`GameApi::player`], but an unknown tag yields `Ok(None)`.
    async fn player_safe(&self, tag: &PlayerTag) -> Result<Option<Player>, FetchError> {
        match self.player(tag).await {
            Ok(player) => Ok(Some(player)),
            Err(FetchError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Catalog entries, or an empty catalog when the upstream call failed.
pub fn catalog_or_empty(result: Result<BrawlerCatalog, FetchError>) -> Vec<CatalogBrawler> {
    match result {
        Ok(catalog) => catalog.items,
        Err(e) => {
            warn!("Brawler catalog unavailable, continuing without it: {}", e);
            Vec::new()
        }
    }
}

/// A failed lookup counts as a missing player so a comparison can degrade.
pub fn settle_player(tag: &PlayerTag, result: Result<Option<Player>, FetchError>) -> Option<Player> {
    match result {
        Ok(Some(player)) => Some(player),
        Ok(None) => {
            info!("Player {} not found", tag);
            None
        }
        Err(e) => {
            warn!("Failed to load player {}: {}", tag, e);
            None
        }
    }
}

/// Everything a head-to-head comparison needs, fetched concurrently.
///
/// Each lookup settles on its own: a failed player becomes `None` and a
/// failed catalog becomes empty.
pub async fn fetch_comparison(
    api: &dyn GameApi,
    a: &PlayerTag,
    b: &PlayerTag,
) -> (Option<Player>, Option<Player>, Vec<CatalogBrawler>) {
    let (a_res, b_res, catalog) =
        tokio::join!(api.player_safe(a), api.player_safe(b), api.brawlers());
    (
        settle_player(a, a_res),
        settle_player(b, b_res),
        catalog_or_empty(catalog),
    )
}

/// HTTP client for the official game API.
pub struct BrawlClient {
    client: Client,
    base_url: String,
    host: String,
}

impl BrawlClient {
    /// Create a client from the `[api]` config section.
    pub fn new(config: &ApiConfig) -> Result<Self, FetchError> {
        let parsed = Url::parse(&config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("brawl-insights/", env!("CARGO_PKG_VERSION"))),
        );
        match config.token.as_deref() {
            Some(token) => {
                let value = HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| FetchError::InvalidToken)?;
                headers.insert(AUTHORIZATION, value);
            }
            None => warn!("No API token configured, upstream requests will be rejected"),
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            host: parsed.host_str().unwrap_or("unknown").to_string(),
        })
    }

    fn player_url(&self, tag: &PlayerTag) -> String {
        format!("{}/players/{}", self.base_url, tag.api_path_segment())
    }

    fn battle_log_url(&self, tag: &PlayerTag) -> String {
        format!("{}/battlelog", self.player_url(tag))
    }

    fn brawlers_url(&self) -> String {
        format!("{}/brawlers", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(url.to_string()));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(FetchError::RateLimited {
                host: self.host.clone(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("Unknown").to_string()
                } else {
                    body
                },
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl GameApi for BrawlClient {
    fn name(&self) -> &'static str {
        "brawl-api"
    }

    async fn player(&self, tag: &PlayerTag) -> Result<Player, FetchError> {
        info!("Fetching player {}", tag);
        self.get_json(&self.player_url(tag)).await
    }

    async fn battle_log(&self, tag: &PlayerTag) -> Result<BattleLog, FetchError> {
        info!("Fetching battle log for {}", tag);
        let log: BattleLog = self.get_json(&self.battle_log_url(tag)).await?;
        debug!("Battle log for {} has {} records", tag, log.items.len());
        Ok(log)
    }

    async fn brawlers(&self) -> Result<BrawlerCatalog, FetchError> {
        info!("Fetching brawler catalog");
        self.get_json(&self.brawlers_url()).await
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockGameApi;
    use super::*;

    fn client(base_url: &str) -> BrawlClient {
        BrawlClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            token: Some("secret".to_string()),
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_urls_encode_tag() {
        let c = client("https://api.example.com/v1/");
        let tag = PlayerTag::new("#abc123");

        assert_eq!(c.player_url(&tag), "https://api.example.com/v1/players/%23ABC123");
        assert_eq!(
            c.battle_log_url(&tag),
            "https://api.example.com/v1/players/%23ABC123/battlelog"
        );
        assert_eq!(c.brawlers_url(), "https://api.example.com/v1/brawlers");
        assert_eq!(c.host, "api.example.com");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = BrawlClient::new(&ApiConfig {
            base_url: "::not a url".to_string(),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(FetchError::InvalidUrl(_))));
    }

    #[test]
    fn test_invalid_token() {
        let result = BrawlClient::new(&ApiConfig {
            token: Some("bad\ntoken".to_string()),
            ..ApiConfig::default()
        });
        assert!(matches!(result, Err(FetchError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_player_safe_maps_not_found() {
        let api = MockGameApi::default().with_player(Player {
            tag: "#KNOWN".to_string(),
            ..Default::default()
        });

        let known = api.player_safe(&PlayerTag::new("known")).await.unwrap();
        assert!(known.is_some());

        let unknown = api.player_safe(&PlayerTag::new("GHOST")).await.unwrap();
        assert!(unknown.is_none());
    }

    #[tokio::test]
    async fn test_fetch_comparison_settles_each_lookup() {
        let api = MockGameApi::default()
            .with_player(Player {
                tag: "#KNOWN".to_string(),
                ..Default::default()
            })
            .with_broken("DOWN");

        let (a, b, catalog) =
            fetch_comparison(&api, &PlayerTag::new("KNOWN"), &PlayerTag::new("DOWN")).await;
        assert!(a.is_some());
        assert!(b.is_none());
        assert!(catalog.is_empty());

        let (a, b, _) =
            fetch_comparison(&api, &PlayerTag::new("GHOST"), &PlayerTag::new("KNOWN")).await;
        assert!(a.is_none());
        assert!(b.is_some());
    }

    #[test]
    fn test_catalog_or_empty() {
        let catalog = BrawlerCatalog {
            items: vec![CatalogBrawler::default()],
        };
        assert_eq!(catalog_or_empty(Ok(catalog)).len(), 1);
        assert!(catalog_or_empty(Err(FetchError::InvalidToken)).is_empty());
    }

    #[tokio::test]
    async fn test_player_safe_propagates_other_errors() {
        let api = MockGameApi::default().with_broken("DOWN");
        let result = api.player_safe(&PlayerTag::new("DOWN")).await;
        assert!(matches!(result, Err(FetchError::HttpStatus { status: 503, .. })));
    }
}
