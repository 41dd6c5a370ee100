// Marketplace listing search: role-driven query construction.
//
// A role translates into a listings query: its required position plus a
// per-slot attribute floor taken from the Iron tier thresholds. The bearer
// credential is the caller's and is forwarded verbatim.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::catalog::{Role, Tier};
use crate::inventory::InventoryError;
use crate::player::Player;

#[derive(Debug, Error)]
pub enum MarketplaceError {
    #[error("marketplace request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("marketplace request returned status {status}")]
    Status { status: u16 },
}

impl From<MarketplaceError> for InventoryError {
    fn from(e: MarketplaceError) -> Self {
        match e {
            MarketplaceError::Request(e) => InventoryError::Request(e),
            MarketplaceError::Status { status } => InventoryError::Status { status },
        }
    }
}

/// One marketplace listing: a player record and its asking price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub price: f64,
    pub player: Player,
}

/// Build the listings query for a role.
///
/// Fixed base parameters (available player listings, full view) plus the
/// role's required position and a `<field>Min` floor per attribute slot at
/// the Iron thresholds. Empty slots add no floor.
pub fn listing_query(role: &Role, limit: u32) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = vec![
        ("limit".into(), limit.to_string()),
        ("type".into(), "PLAYER".into()),
        ("status".into(), "AVAILABLE".into()),
        ("view".into(), "full".into()),
    ];

    if let Some(position) = role.position.as_deref() {
        params.push(("positions".into(), position.to_string()));
    }

    let thresholds = Tier::Iron.thresholds();
    for (i, slot) in role.attributes.iter().enumerate() {
        let Some(code) = slot else { continue };
        params.push((format!("{}Min", code.field_name()), thresholds[i].to_string()));
    }

    params
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListingsResponse {
    Bare(Vec<ListingWire>),
    Wrapped { listings: Vec<ListingWire> },
}

#[derive(Debug, Deserialize)]
struct ListingWire {
    #[serde(default)]
    price: f64,
    player: Option<crate::inventory::PlayerWire>,
}

fn flatten_listings(response: ListingsResponse) -> Vec<Listing> {
    let wires = match response {
        ListingsResponse::Bare(listings) => listings,
        ListingsResponse::Wrapped { listings } => listings,
    };
    wires
        .into_iter()
        .filter_map(|wire| {
            let player = wire.player?.into_player()?;
            Some(Listing {
                price: wire.price,
                player,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Marketplace listings client. Same discipline as the inventory source:
/// one fixed timeout, no retries.
pub struct MarketClient {
    http: reqwest::Client,
    base_url: String,
}

impl MarketClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, MarketplaceError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(MarketClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search listings matching a role's position and attribute floors.
    /// `bearer_token` is opaque to us and forwarded as-is.
    pub async fn search(
        &self,
        role: &Role,
        limit: u32,
        bearer_token: &str,
    ) -> Result<Vec<Listing>, MarketplaceError> {
        let url = format!("{}/listings", self.base_url);
        let params = listing_query(role, limit);
        let response = self
            .http
            .get(&url)
            .bearer_auth(bearer_token)
            .query(&params)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(MarketplaceError::Status {
                status: response.status().as_u16(),
            });
        }
        let body: ListingsResponse = response.json().await?;
        let listings = flatten_listings(body);
        debug!(role = %role.name, count = listings.len(), "marketplace search complete");
        Ok(listings)
    }
}
