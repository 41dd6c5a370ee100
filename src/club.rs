// Club registry: named squads holding player id references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A club: a named roster of player ids plus an informational tier label.
///
/// Only ids are stored; the player records themselves live upstream and are
/// fetched per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub name: String,
    /// Informational only; nothing enforces that rostered players actually
    /// rate at this tier.
    pub tier: String,
    /// Player ids, duplicate-free within one club. Insertion order preserved.
    pub roster: Vec<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    pub fn new(name: &str, tier: &str) -> Self {
        let now = Utc::now();
        Club {
            name: name.to_string(),
            tier: tier.to_string(),
            roster: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// The club registry persisted as one whole document.
///
/// The same player id landing in two different clubs is a soft invariant:
/// nothing here prevents it, and both memberships persist. Callers that
/// care (the free-agent allocation policy) consult `rostered_ids`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClubRegistry {
    clubs: Vec<Club>,
}

impl ClubRegistry {
    pub fn get(&self, name: &str) -> Option<&Club> {
        self.clubs.iter().find(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Club> {
        self.clubs.iter()
    }

    pub fn len(&self) -> usize {
        self.clubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clubs.is_empty()
    }

    /// Create a club. Returns `false` (and changes nothing) when the name is
    /// already taken; create never overwrites an existing roster.
    pub fn create(&mut self, name: &str, tier: &str) -> bool {
        if self.get(name).is_some() {
            return false;
        }
        self.clubs.push(Club::new(name, tier));
        true
    }

    /// Delete a club by name. Returns whether one was removed.
    pub fn delete(&mut self, name: &str) -> bool {
        let before = self.clubs.len();
        self.clubs.retain(|c| c.name != name);
        self.clubs.len() != before
    }

    /// Add a player id to a club's roster. Returns `None` when the club does
    /// not exist, `Some(false)` when the id was already rostered there.
    pub fn assign(&mut self, name: &str, player_id: u64) -> Option<bool> {
        let club = self.clubs.iter_mut().find(|c| c.name == name)?;
        if club.roster.contains(&player_id) {
            return Some(false);
        }
        club.roster.push(player_id);
        club.updated_at = Utc::now();
        Some(true)
    }

    /// Remove a player id from a club's roster. Returns `None` when the club
    /// does not exist, `Some(false)` when the id was not rostered there.
    pub fn unassign(&mut self, name: &str, player_id: u64) -> Option<bool> {
        let club = self.clubs.iter_mut().find(|c| c.name == name)?;
        let before = club.roster.len();
        club.roster.retain(|&id| id != player_id);
        if club.roster.len() == before {
            return Some(false);
        }
        club.updated_at = Utc::now();
        Some(true)
    }

    /// The union of every club's roster, fed to the allocator's
    /// free-agent exclusion.
    pub fn rostered_ids(&self) -> std::collections::HashSet<u64> {
        self.clubs
            .iter()
            .flat_map(|c| c.roster.iter().copied())
            .collect()
    }
}
