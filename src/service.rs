// Boundary facade: owns the catalogs, the document store, and the upstream
// clients, and exposes the operations a request handler calls.
//
// Catalogs are copy-on-write: each one lives behind an `RwLock<Arc<..>>`,
// readers clone the Arc and work on an immutable snapshot, and every
// successful write persists the whole document and swaps in a fresh Arc.
// Concurrent writers racing on the same document are not serialized
// beyond that; last write wins.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::{
    default_formations, Formation, FormationCatalog, RoleCatalog, RoleRecord, Tier,
};
use crate::club::{Club, ClubRegistry};
use crate::config::Config;
use crate::inventory::{HttpInventory, InventoryError, InventorySource};
use crate::marketplace::{Listing, MarketClient};
use crate::player::Player;
use crate::scoring::{best_fit, score_fit, BestFit, FitResult};
use crate::squad::{
    assign_with_exclusions, simulate, AssignmentPolicy, SlotAssignment, SlotRequest,
};
use crate::store::{JsonDocument, StoreError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} already exists: {name}")]
    Conflict { kind: &'static str, name: String },

    #[error("invalid {kind}: {message}")]
    Invalid { kind: &'static str, message: String },

    #[error(transparent)]
    Upstream(#[from] InventoryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    fn not_found(kind: &'static str, name: &str) -> Self {
        ServiceError::NotFound {
            kind,
            name: name.to_string(),
        }
    }
}

pub struct Service {
    config: Config,
    inventory: Arc<dyn InventorySource>,
    market: MarketClient,
    roles_doc: JsonDocument,
    formations_doc: JsonDocument,
    clubs_doc: JsonDocument,
    roles: RwLock<Arc<RoleCatalog>>,
    formations: RwLock<Arc<FormationCatalog>>,
    clubs: RwLock<Arc<ClubRegistry>>,
}

impl Service {
    /// Open the service against the real HTTP inventory.
    pub fn open(config: Config) -> Result<Self, ServiceError> {
        let inventory = HttpInventory::new(
            &config.inventory.base_url,
            config.inventory.timeout(),
            config.inventory.page_limit,
        )?;
        Self::with_inventory(config, Arc::new(inventory))
    }

    /// Open the service with a caller-supplied inventory source (tests use
    /// an in-memory stub here).
    pub fn with_inventory(
        config: Config,
        inventory: Arc<dyn InventorySource>,
    ) -> Result<Self, ServiceError> {
        let market = MarketClient::new(&config.marketplace.base_url, config.inventory.timeout())
            .map_err(InventoryError::from)?;

        let roles_doc = JsonDocument::new(&config.data.roles);
        let formations_doc = JsonDocument::new(&config.data.formations);
        let clubs_doc = JsonDocument::new(&config.data.clubs);

        let roles = RoleCatalog::from_records(roles_doc.load::<Vec<RoleRecord>>());

        // A formation document that has never been written gets the built-in
        // layouts; an existing (even empty) document is respected as-is.
        let formations: FormationCatalog = if formations_doc.exists() {
            formations_doc.load()
        } else {
            let seeded = default_formations();
            formations_doc.save(&seeded)?;
            info!(path = %formations_doc.path().display(), "seeded default formations");
            seeded
        };

        let clubs: ClubRegistry = clubs_doc.load();

        info!(
            roles = roles.len(),
            formations = formations.len(),
            clubs = clubs.len(),
            "catalogs loaded"
        );

        Ok(Service {
            config,
            inventory,
            market,
            roles_doc,
            formations_doc,
            clubs_doc,
            roles: RwLock::new(Arc::new(roles)),
            formations: RwLock::new(Arc::new(formations)),
            clubs: RwLock::new(Arc::new(clubs)),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -- catalog snapshots --------------------------------------------------

    /// Immutable snapshot of the role catalog.
    pub fn roles(&self) -> Arc<RoleCatalog> {
        Arc::clone(&read(&self.roles))
    }

    pub fn formations(&self) -> Arc<FormationCatalog> {
        Arc::clone(&read(&self.formations))
    }

    pub fn clubs(&self) -> Arc<ClubRegistry> {
        Arc::clone(&read(&self.clubs))
    }

    /// Resolve a tier name with the configured fallback behavior.
    pub fn resolve_tier(&self, name: &str) -> Tier {
        Tier::from_name(name)
            .unwrap_or_else(|| Tier::from_name_or_default(&self.config.squad.default_tier))
    }

    // -- scoring ------------------------------------------------------------

    pub fn score_fit(&self, player: &Player, role_name: &str, tier_name: &str) -> FitResult {
        score_fit(player, role_name, self.resolve_tier(tier_name), &self.roles())
    }

    pub fn best_fit(&self, player: &Player) -> BestFit {
        best_fit(player, &self.roles())
    }

    /// Fetch an owner's inventory and label every player with the best
    /// tier/role pair it qualifies for.
    pub async fn inventory_report(
        &self,
        owner: &str,
    ) -> Result<Vec<(Player, BestFit)>, ServiceError> {
        let players = self.inventory.fetch_players(owner).await?;
        let roles = self.roles();
        Ok(players
            .into_iter()
            .map(|player| {
                let fit = best_fit(&player, &roles);
                (player, fit)
            })
            .collect())
    }

    // -- squad building -----------------------------------------------------

    /// Fetch the configured owner's inventory and allocate it onto the named
    /// formation's slots. The formation must exist; the role map supplies the
    /// role per slot and its order drives the output order.
    pub async fn assign_squad(
        &self,
        formation_name: &str,
        role_map: &[SlotRequest],
        tier_name: &str,
    ) -> Result<Vec<SlotAssignment>, ServiceError> {
        if self.formations().get(formation_name).is_none() {
            return Err(ServiceError::not_found("formation", formation_name));
        }

        let pool = self
            .inventory
            .fetch_players(&self.config.inventory.owner_wallet)
            .await?;

        let excluded: HashSet<u64> = match self.config.squad.assignment_policy {
            AssignmentPolicy::AllowRostered => HashSet::new(),
            AssignmentPolicy::ExcludeRostered => self.clubs().rostered_ids(),
        };

        Ok(assign_with_exclusions(
            role_map,
            &pool,
            &excluded,
            self.resolve_tier(tier_name),
            &self.roles(),
        ))
    }

    /// Slot-major preview over an explicit candidate id set. Ids the
    /// inventory cannot resolve are skipped.
    pub async fn simulate_squad(
        &self,
        role_map: &[SlotRequest],
        player_ids: &[u64],
        tier_name: &str,
    ) -> Result<Vec<SlotAssignment>, ServiceError> {
        let mut candidates = Vec::with_capacity(player_ids.len());
        for &id in player_ids {
            match self.inventory.fetch_player(id).await? {
                Some(player) => candidates.push(player),
                None => warn!(id, "simulation candidate not found upstream, skipped"),
            }
        }
        Ok(simulate(
            role_map,
            &candidates,
            self.resolve_tier(tier_name),
            &self.roles(),
        ))
    }

    // -- marketplace ----------------------------------------------------------

    /// Search marketplace listings matching a role. The bearer token is the
    /// caller's credential, forwarded verbatim.
    pub async fn market_search(
        &self,
        role_name: &str,
        bearer_token: &str,
    ) -> Result<Vec<Listing>, ServiceError> {
        let roles = self.roles();
        let role = roles
            .get(role_name)
            .ok_or_else(|| ServiceError::not_found("role", role_name))?;
        let listings = self
            .market
            .search(role, self.config.marketplace.listing_limit, bearer_token)
            .await
            .map_err(InventoryError::from)?;
        Ok(listings)
    }

    // -- role CRUD ------------------------------------------------------------

    pub fn list_roles(&self) -> Vec<RoleRecord> {
        self.roles().to_records()
    }

    pub fn upsert_role(&self, record: RoleRecord) -> Result<(), ServiceError> {
        let role = record.into_role().ok_or(ServiceError::Invalid {
            kind: "role",
            message: "record carries no role name".into(),
        })?;
        let mut catalog = (*self.roles()).clone();
        catalog.upsert(role);
        self.roles_doc.save(&catalog.to_records())?;
        *write(&self.roles) = Arc::new(catalog);
        Ok(())
    }

    pub fn delete_role(&self, name: &str) -> Result<(), ServiceError> {
        let mut catalog = (*self.roles()).clone();
        if !catalog.remove(name) {
            return Err(ServiceError::not_found("role", name));
        }
        self.roles_doc.save(&catalog.to_records())?;
        *write(&self.roles) = Arc::new(catalog);
        Ok(())
    }

    // -- formation CRUD -------------------------------------------------------

    pub fn list_formations(&self) -> Vec<String> {
        self.formations().names()
    }

    pub fn get_formation(&self, name: &str) -> Result<Formation, ServiceError> {
        self.formations()
            .get(name)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("formation", name))
    }

    pub fn upsert_formation(&self, formation: Formation) -> Result<(), ServiceError> {
        let mut catalog = (*self.formations()).clone();
        catalog.upsert(formation);
        self.formations_doc.save(&catalog)?;
        *write(&self.formations) = Arc::new(catalog);
        Ok(())
    }

    pub fn delete_formation(&self, name: &str) -> Result<(), ServiceError> {
        let mut catalog = (*self.formations()).clone();
        if !catalog.remove(name) {
            return Err(ServiceError::not_found("formation", name));
        }
        self.formations_doc.save(&catalog)?;
        *write(&self.formations) = Arc::new(catalog);
        Ok(())
    }

    // -- club CRUD ------------------------------------------------------------

    pub fn list_clubs(&self) -> Vec<Club> {
        self.clubs().iter().cloned().collect()
    }

    pub fn create_club(&self, name: &str, tier: &str) -> Result<(), ServiceError> {
        let mut registry = (*self.clubs()).clone();
        if !registry.create(name, tier) {
            return Err(ServiceError::Conflict {
                kind: "club",
                name: name.to_string(),
            });
        }
        self.clubs_doc.save(&registry)?;
        *write(&self.clubs) = Arc::new(registry);
        Ok(())
    }

    pub fn delete_club(&self, name: &str) -> Result<(), ServiceError> {
        let mut registry = (*self.clubs()).clone();
        if !registry.delete(name) {
            return Err(ServiceError::not_found("club", name));
        }
        self.clubs_doc.save(&registry)?;
        *write(&self.clubs) = Arc::new(registry);
        Ok(())
    }

    /// Add a player id to a club roster. Returns whether the roster changed
    /// (re-assigning an already-rostered id is a no-op, not an error).
    pub fn assign_player(&self, club: &str, player_id: u64) -> Result<bool, ServiceError> {
        let mut registry = (*self.clubs()).clone();
        let changed = registry
            .assign(club, player_id)
            .ok_or_else(|| ServiceError::not_found("club", club))?;
        if changed {
            self.clubs_doc.save(&registry)?;
            *write(&self.clubs) = Arc::new(registry);
        }
        Ok(changed)
    }

    /// Remove a player id from a club roster. Returns whether it was there.
    pub fn unassign_player(&self, club: &str, player_id: u64) -> Result<bool, ServiceError> {
        let mut registry = (*self.clubs()).clone();
        let changed = registry
            .unassign(club, player_id)
            .ok_or_else(|| ServiceError::not_found("club", club))?;
        if changed {
            self.clubs_doc.save(&registry)?;
            *write(&self.clubs) = Arc::new(registry);
        }
        Ok(changed)
    }
}

/// Panics if the lock is poisoned (another thread panicked while holding
/// it). This should never happen in normal operation.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().expect("catalog lock poisoned")
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().expect("catalog lock poisoned")
}
