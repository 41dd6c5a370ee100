// Formation templates: named slot layouts awaiting player assignment.

use serde::{Deserialize, Serialize};

use crate::player::normalize_position;

/// One slot in a formation: a stable identifier and the position it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationSlot {
    pub slot: String,
    pub position: String,
}

/// A named formation template. Slot order is preserved; assignment output
/// follows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Formation {
    pub name: String,
    pub slots: Vec<FormationSlot>,
}

impl Formation {
    /// Build a formation from (slot id, position) pairs, normalizing the
    /// position codes.
    pub fn new(name: &str, slots: &[(&str, &str)]) -> Self {
        Formation {
            name: name.to_string(),
            slots: slots
                .iter()
                .map(|(slot, position)| FormationSlot {
                    slot: (*slot).to_string(),
                    position: normalize_position(position),
                })
                .collect(),
        }
    }
}

/// Formation lookup table preserving document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormationCatalog {
    formations: Vec<Formation>,
}

impl FormationCatalog {
    /// Exact-name lookup. Formation names are case-sensitive identifiers
    /// (unlike role names, which are normalized keys).
    pub fn get(&self, name: &str) -> Option<&Formation> {
        self.formations.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> Vec<String> {
        self.formations.iter().map(|f| f.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formation> {
        self.formations.iter()
    }

    pub fn len(&self) -> usize {
        self.formations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formations.is_empty()
    }

    /// Insert or replace a formation by name.
    pub fn upsert(&mut self, formation: Formation) {
        match self.formations.iter_mut().find(|f| f.name == formation.name) {
            Some(existing) => *existing = formation,
            None => self.formations.push(formation),
        }
    }

    /// Remove a formation by name. Returns whether one was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.formations.len();
        self.formations.retain(|f| f.name != name);
        self.formations.len() != before
    }
}

/// The built-in formation layouts used to seed an empty store.
pub fn default_formations() -> FormationCatalog {
    let mut catalog = FormationCatalog::default();
    catalog.upsert(Formation::new(
        "4-2-3-1",
        &[
            ("GK", "GK"),
            ("LB", "LB"),
            ("RB", "RB"),
            ("CB1", "CB"),
            ("CB2", "CB"),
            ("CDM1", "CDM"),
            ("CDM2", "CDM"),
            ("LM", "LM"),
            ("RM", "RM"),
            ("CAM", "CAM"),
            ("ST", "ST"),
        ],
    ));
    catalog.upsert(Formation::new(
        "3-5-2",
        &[
            ("GK", "GK"),
            ("CB1", "CB"),
            ("CB2", "CB"),
            ("CB3", "CB"),
            ("CDM", "CDM"),
            ("CM1", "CM"),
            ("CM2", "CM"),
            ("LM", "LM"),
            ("RM", "RM"),
            ("ST1", "ST"),
            ("ST2", "ST"),
        ],
    ));
    catalog
}
