// Upstream inventory API: transient player records fetched per request.
//
// The API wraps each player's attributes in a `metadata` object and answers
// either a bare list or `{ "players": [...] }` depending on the endpoint
// version; both shapes flatten into `Player` here, at the boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, warn};

use crate::player::{normalize_position, Player};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("inventory request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("inventory request returned status {status}")]
    Status { status: u16 },
}

/// Source of player records. Implemented over HTTP in production and by
/// in-memory stubs in tests.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// All players held by an owner.
    async fn fetch_players(&self, owner: &str) -> Result<Vec<Player>, InventoryError>;

    /// One player by id, or `None` when the upstream reports not-found.
    async fn fetch_player(&self, id: u64) -> Result<Option<Player>, InventoryError>;
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// The two response shapes the players endpoint emits.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlayersResponse {
    Bare(Vec<PlayerWire>),
    Wrapped { players: Vec<PlayerWire> },
}

impl PlayersResponse {
    fn into_players(self) -> Vec<PlayerWire> {
        match self {
            PlayersResponse::Bare(players) => players,
            PlayersResponse::Wrapped { players } => players,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PlayerWire {
    id: Option<u64>,
    #[serde(default)]
    metadata: PlayerMetadata,
}

/// Attribute block nested under `metadata`. Missing numerics read as 0.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerMetadata {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    positions: Vec<String>,
    #[serde(default)]
    overall: f64,
    #[serde(default)]
    pace: f64,
    #[serde(default)]
    shooting: f64,
    #[serde(default)]
    passing: f64,
    #[serde(default)]
    dribbling: f64,
    #[serde(default)]
    defense: f64,
    #[serde(default)]
    physical: f64,
    #[serde(default)]
    goalkeeping: f64,
}

impl PlayerWire {
    /// Flatten into the core model. Records without an id are dropped;
    /// positions are normalized here so the core never sees raw codes.
    pub(crate) fn into_player(self) -> Option<Player> {
        let id = self.id?;
        let m = self.metadata;
        Some(Player {
            id,
            first_name: m.first_name,
            last_name: m.last_name,
            positions: m.positions.iter().map(|p| normalize_position(p)).collect(),
            overall: m.overall,
            pace: m.pace,
            shooting: m.shooting,
            passing: m.passing,
            dribbling: m.dribbling,
            defense: m.defense,
            physical: m.physical,
            goalkeeping: m.goalkeeping,
        })
    }
}

pub(crate) fn flatten_players(wires: Vec<PlayerWire>) -> Vec<Player> {
    let total = wires.len();
    let players: Vec<Player> = wires.into_iter().filter_map(PlayerWire::into_player).collect();
    if players.len() != total {
        warn!(
            dropped = total - players.len(),
            "inventory records without an id were dropped"
        );
    }
    players
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

/// Inventory source backed by the third-party players API.
///
/// One fixed timeout, no retries: a failed or slow call surfaces as a single
/// error and the caller re-issues the request.
pub struct HttpInventory {
    http: reqwest::Client,
    base_url: String,
    page_limit: u32,
}

impl HttpInventory {
    pub fn new(base_url: &str, timeout: Duration, page_limit: u32) -> Result<Self, InventoryError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(HttpInventory {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            page_limit,
        })
    }
}

#[async_trait]
impl InventorySource for HttpInventory {
    async fn fetch_players(&self, owner: &str) -> Result<Vec<Player>, InventoryError> {
        let url = format!("{}/players", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("limit", self.page_limit.to_string()),
                ("ownerWalletAddress", owner.to_string()),
            ])
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(InventoryError::Status {
                status: response.status().as_u16(),
            });
        }
        let body: PlayersResponse = response.json().await?;
        let players = flatten_players(body.into_players());
        debug!(owner, count = players.len(), "inventory fetched");
        Ok(players)
    }

    async fn fetch_player(&self, id: u64) -> Result<Option<Player>, InventoryError> {
        let url = format!("{}/players/{}", self.base_url, id);
        let response = self.http.get(&url).send().await?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(InventoryError::Status {
                status: response.status().as_u16(),
            });
        }
        let wire: PlayerWire = response.json().await?;
        Ok(wire.into_player())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIRE_PLAYER: &str = r#"{
        "id": 101,
        "metadata": {
            "firstName": "Jo",
            "lastName": "Keeper",
            "positions": ["gk"],
            "overall": 82,
            "pace": 40,
            "shooting": 30,
            "passing": 61,
            "dribbling": 44,
            "defense": 35,
            "physical": 70,
            "goalkeeping": 85
        }
    }"#;

    #[test]
    fn wire_player_flattens_and_normalizes() {
        let wire: PlayerWire = serde_json::from_str(WIRE_PLAYER).unwrap();
        let player = wire.into_player().unwrap();
        assert_eq!(player.id, 101);
        assert_eq!(player.full_name(), "Jo Keeper");
        assert_eq!(player.positions, vec!["GK"]);
        assert_eq!(player.goalkeeping, 85.0);
    }

    #[test]
    fn missing_metadata_fields_read_as_zero() {
        let wire: PlayerWire =
            serde_json::from_str(r#"{"id": 5, "metadata": {"firstName": "Bare"}}"#).unwrap();
        let player = wire.into_player().unwrap();
        assert_eq!(player.pace, 0.0);
        assert_eq!(player.goalkeeping, 0.0);
        assert!(player.positions.is_empty());
    }

    #[test]
    fn missing_metadata_object_is_tolerated() {
        let wire: PlayerWire = serde_json::from_str(r#"{"id": 6}"#).unwrap();
        let player = wire.into_player().unwrap();
        assert_eq!(player.id, 6);
        assert_eq!(player.full_name(), "");
    }

    #[test]
    fn record_without_id_is_dropped() {
        let wires: Vec<PlayerWire> = serde_json::from_str(&format!(
            r#"[{WIRE_PLAYER}, {{"metadata": {{"firstName": "No", "lastName": "Id"}}}}]"#
        ))
        .unwrap();
        let players = flatten_players(wires);
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].id, 101);
    }

    #[test]
    fn bare_list_response_parses() {
        let body: PlayersResponse = serde_json::from_str(&format!("[{WIRE_PLAYER}]")).unwrap();
        assert_eq!(body.into_players().len(), 1);
    }

    #[test]
    fn wrapped_response_parses() {
        let body: PlayersResponse =
            serde_json::from_str(&format!(r#"{{"players": [{WIRE_PLAYER}]}}"#)).unwrap();
        assert_eq!(body.into_players().len(), 1);
    }

    #[test]
    fn wingback_positions_fold_on_ingest() {
        let wire: PlayerWire = serde_json::from_str(
            r#"{"id": 7, "metadata": {"positions": ["LWB", "rw", "CB-L"]}}"#,
        )
        .unwrap();
        let player = wire.into_player().unwrap();
        assert_eq!(player.positions, vec!["LB", "RM", "CB"]);
    }
}
