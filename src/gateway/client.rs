use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::error::{GatewayError, Result};
use super::source::CricketDataSource;
use crate::model::provider::{ProviderMatch, ProviderPlayer, ProviderSeries, SeriesBundle};

/// Which upstream route a request binds to. The player endpoints
/// historically lived behind separate credentials; both routes now resolve
/// through this one client, with the player route falling back to the
/// primary credentials when no override is configured.
#[derive(Debug, Clone, Copy)]
enum Route {
    Primary,
    Player,
}

/// Explicit gateway configuration, built once at startup and read-only
/// thereafter.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// Requests fail closed (no network attempt) when this is unset.
    pub api_key: Option<String>,
    pub player_base_url: Option<String>,
    pub player_api_key: Option<String>,
    pub timeout: Duration,
}

/// Client for the cricket-data provider API. The single choke point for all
/// outbound calls; stateless between calls.
#[derive(Clone)]
pub struct CricApiClient {
    http: Client,
    config: ApiConfig,
}

/// Provider JSON envelope: payload nested under `data`, with an
/// application-level status and a failure reason on bad requests.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    status: Option<String>,
    reason: Option<String>,
    data: Option<T>,
}

impl CricApiClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(CricApiClient { http, config })
    }

    fn route_base(&self, route: Route) -> &str {
        match route {
            Route::Primary => &self.config.base_url,
            Route::Player => self
                .config
                .player_base_url
                .as_deref()
                .unwrap_or(&self.config.base_url),
        }
    }

    fn route_key(&self, route: Route) -> Option<&str> {
        match route {
            Route::Primary => self.config.api_key.as_deref(),
            Route::Player => self
                .config
                .player_api_key
                .as_deref()
                .or(self.config.api_key.as_deref()),
        }
    }

    /// Fetch one resource from the provider and unwrap its `data` payload.
    /// Every failure class is logged here; callers only need the outcome.
    async fn fetch_resource<T: DeserializeOwned>(
        &self,
        route: Route,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        match self.fetch_inner(route, endpoint, params).await {
            Ok(data) => Ok(data),
            Err(err) => {
                warn!("cricket api fetch failed: {err}");
                Err(err)
            }
        }
    }

    async fn fetch_inner<T: DeserializeOwned>(
        &self,
        route: Route,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T> {
        let api_key = self.route_key(route).ok_or_else(|| GatewayError::Config {
            endpoint: endpoint.to_string(),
            reason: "no api key set".to_string(),
        })?;

        // Log/diagnostic URL stays key-free.
        let display_url = format!(
            "{}/{}",
            self.route_base(route).trim_end_matches('/'),
            endpoint
        );
        let mut url = Url::parse(&display_url).map_err(|e| GatewayError::Config {
            endpoint: endpoint.to_string(),
            reason: format!("invalid base url: {e}"),
        })?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("apikey", api_key);
            for (key, value) in params {
                query.append_pair(key, value);
            }
        }

        debug!("GET {}", display_url);

        let resp = self
            .http
            .get(url)
            // Every call must reflect current upstream state; defeat any
            // intermediary response cache.
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| GatewayError::Transport {
                url: display_url.clone(),
                source: e,
            })?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream {
                url: display_url,
                status,
                reason: extract_reason(&body).unwrap_or_else(|| snippet(&body)),
            });
        }

        let envelope: Envelope<T> = resp.json().await.map_err(|e| GatewayError::Envelope {
            url: display_url.clone(),
            reason: format!("undecodable body: {e}"),
        })?;

        if let Some(data) = envelope.data {
            return Ok(data);
        }
        let reason = envelope
            .reason
            .or_else(|| {
                envelope
                    .status
                    .map(|s| format!("provider status '{s}' with no data"))
            })
            .unwrap_or_else(|| "missing `data` field".to_string());
        Err(GatewayError::Envelope {
            url: display_url,
            reason,
        })
    }
}

#[async_trait]
impl CricketDataSource for CricApiClient {
    async fn current_matches(&self) -> Result<Vec<ProviderMatch>> {
        self.fetch_resource(Route::Primary, "currentMatches", &[])
            .await
    }

    async fn match_info(&self, id: &str) -> Result<ProviderMatch> {
        self.fetch_resource(Route::Primary, "match_info", &[("id", id)])
            .await
    }

    async fn series_list(&self) -> Result<Vec<ProviderSeries>> {
        self.fetch_resource(Route::Primary, "series", &[]).await
    }

    async fn series_info(&self, id: &str) -> Result<SeriesBundle> {
        self.fetch_resource(Route::Primary, "series_info", &[("id", id)])
            .await
    }

    async fn player_list(&self, offset: u32) -> Result<Vec<ProviderPlayer>> {
        let offset = offset.to_string();
        self.fetch_resource(Route::Player, "players", &[("offset", offset.as_str())])
            .await
    }

    async fn player_info(&self, id: &str) -> Result<ProviderPlayer> {
        self.fetch_resource(Route::Player, "players_info", &[("id", id)])
            .await
    }

    fn name(&self) -> &str {
        "CricAPI"
    }
}

/// Pull the provider's `reason` (or `message`) diagnostic out of an error
/// body, if it is JSON at all.
fn extract_reason(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value["reason"]
        .as_str()
        .or_else(|| value["message"].as_str())
        .map(str::to_string)
}

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty error body".to_string();
    }
    let mut out: String = trimmed.chars().take(200).collect();
    if out.len() < trimmed.len() {
        out.push('…');
    }
    out
}
