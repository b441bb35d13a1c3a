// Sleeper API integration: best-effort player id lookup and CDN URL
// helpers.
//
// The lookup is advisory. A transport error, a non-success status, or an
// empty search result all resolve to "no id" with a warning; they never
// fail the caller, so a parsed sheet is returned intact either way.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::config::{Config, SleeperConfig};
use crate::extract::sheet::RankSheet;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const SLEEPER_API_BASE: &str = "https://api.sleeper.app/v1";
const SLEEPER_CDN_BASE: &str = "https://sleepercdn.com";

// ---------------------------------------------------------------------------
// PlayerIdLookup
// ---------------------------------------------------------------------------

/// Best-effort resolution of a normalized player name to a stable id.
#[async_trait]
pub trait PlayerIdLookup: Send + Sync {
    /// The id for `name`, or `None` when there is no match or the lookup
    /// fails for any reason.
    async fn player_id(&self, name: &str) -> Option<String>;
}

// ---------------------------------------------------------------------------
// SleeperClient
// ---------------------------------------------------------------------------

/// One element of the Sleeper player search response; only the first is
/// ever used.
#[derive(Debug, Deserialize)]
struct SearchHit {
    player_id: String,
}

/// reqwest-backed Sleeper API client.
pub struct SleeperClient {
    http: reqwest::Client,
    base_url: String,
}

impl SleeperClient {
    /// Build a client from the `[sleeper]` config section.
    pub fn new(config: &SleeperConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// `GET {base}/search/players?query=<name>`.
    async fn search(&self, name: &str) -> reqwest::Result<Vec<SearchHit>> {
        self.http
            .get(format!("{}/search/players", self.base_url))
            .query(&[("query", name)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl PlayerIdLookup for SleeperClient {
    async fn player_id(&self, name: &str) -> Option<String> {
        match self.search(name).await {
            Ok(hits) => hits.into_iter().next().map(|hit| hit.player_id),
            Err(e) => {
                warn!("sleeper lookup failed for '{name}': {e}");
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Lookup wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that is either an active Sleeper client or disabled.
pub enum Lookup {
    /// Lookup is configured and ready.
    Active(SleeperClient),
    /// Lookup is switched off; every query resolves to `None`.
    Disabled,
}

impl Lookup {
    /// Build a `Lookup` from the application config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        if config.sleeper.lookup_enabled {
            Ok(Lookup::Active(SleeperClient::new(&config.sleeper)?))
        } else {
            Ok(Lookup::Disabled)
        }
    }
}

#[async_trait]
impl PlayerIdLookup for Lookup {
    async fn player_id(&self, name: &str) -> Option<String> {
        match self {
            Lookup::Active(client) => client.player_id(name).await,
            Lookup::Disabled => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Sheet-level attachment
// ---------------------------------------------------------------------------

/// Fill `player_id` on every record in the sheet, best effort. Records
/// whose lookup fails are left otherwise untouched.
pub async fn attach_player_ids(sheet: &mut RankSheet, lookup: &dyn PlayerIdLookup) {
    for player in sheet.iter_mut() {
        if player.player_id.is_none() {
            player.player_id = lookup.player_id(&player.name).await;
        }
    }
}

// ---------------------------------------------------------------------------
// CDN URL helpers
// ---------------------------------------------------------------------------

/// Headshot image URL for a Sleeper player id.
pub fn player_image_url(player_id: &str) -> String {
    format!("{SLEEPER_CDN_BASE}/content/nfl/players/{player_id}.jpg")
}

/// Logo image URL for an NFL team code.
pub fn team_logo_url(team: &str) -> String {
    format!("{SLEEPER_CDN_BASE}/images/team_logos/nfl/{team}.png")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
