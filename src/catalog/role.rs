// Role catalog: positional archetypes with up to four weighted attributes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::player::normalize_position;

// ---------------------------------------------------------------------------
// Attribute codes
// ---------------------------------------------------------------------------

/// The fixed attribute vocabulary a role slot may name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeCode {
    Pac,
    Sho,
    Pas,
    Dri,
    Def,
    Phy,
    Gk,
}

impl AttributeCode {
    /// Parse a role-document code (case-insensitive, trimmed).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PAC" => Some(AttributeCode::Pac),
            "SHO" => Some(AttributeCode::Sho),
            "PAS" => Some(AttributeCode::Pas),
            "DRI" => Some(AttributeCode::Dri),
            "DEF" => Some(AttributeCode::Def),
            "PHY" => Some(AttributeCode::Phy),
            "GK" => Some(AttributeCode::Gk),
            _ => None,
        }
    }

    /// The document code for this attribute.
    pub fn code(self) -> &'static str {
        match self {
            AttributeCode::Pac => "PAC",
            AttributeCode::Sho => "SHO",
            AttributeCode::Pas => "PAS",
            AttributeCode::Dri => "DRI",
            AttributeCode::Def => "DEF",
            AttributeCode::Phy => "PHY",
            AttributeCode::Gk => "GK",
        }
    }

    /// The marketplace/inventory field name this attribute filters on.
    pub fn field_name(self) -> &'static str {
        match self {
            AttributeCode::Pac => "pace",
            AttributeCode::Sho => "shooting",
            AttributeCode::Pas => "passing",
            AttributeCode::Dri => "dribbling",
            AttributeCode::Def => "defense",
            AttributeCode::Phy => "physical",
            AttributeCode::Gk => "goalkeeping",
        }
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// Canonical lookup key for a role name: trimmed and uppercased.
pub fn role_key(name: &str) -> String {
    name.trim().to_uppercase()
}

/// A named archetype requiring a position and up to four weighted attributes.
///
/// Attribute slots are positionally weighted: slot 0 counts most. Empty slots
/// contribute nothing and do not shift the weights of later slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    /// Canonical (uppercased, trimmed) role name.
    pub name: String,
    /// Required position, normalized. `None` means any player is
    /// positionally eligible.
    pub position: Option<String>,
    pub attributes: [Option<AttributeCode>; 4],
}

// ---------------------------------------------------------------------------
// Wire format
// ---------------------------------------------------------------------------

/// Raw role document record.
///
/// Historical documents name the role under either `Role` or `RoleType`;
/// both are accepted here and collapsed into the canonical `Role.name`
/// during conversion, so nothing downstream ever branches on field names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoleRecord {
    #[serde(rename = "Role", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "RoleType", default, skip_serializing_if = "Option::is_none")]
    pub role_type: Option<String>,
    #[serde(rename = "Position", default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(rename = "Attribute1", default, skip_serializing_if = "Option::is_none")]
    pub attribute1: Option<String>,
    #[serde(rename = "Attribute2", default, skip_serializing_if = "Option::is_none")]
    pub attribute2: Option<String>,
    #[serde(rename = "Attribute3", default, skip_serializing_if = "Option::is_none")]
    pub attribute3: Option<String>,
    #[serde(rename = "Attribute4", default, skip_serializing_if = "Option::is_none")]
    pub attribute4: Option<String>,
}

impl RoleRecord {
    /// Convert a raw record into a canonical `Role`.
    ///
    /// Returns `None` when the record carries no usable name. Unknown
    /// attribute codes and blank fields become empty slots; a blank position
    /// becomes "no positional requirement".
    pub fn into_role(self) -> Option<Role> {
        let raw_name = self
            .role
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .or(self.role_type.as_deref().filter(|s| !s.trim().is_empty()))?;
        let name = role_key(raw_name);

        let position = self
            .position
            .as_deref()
            .map(normalize_position)
            .filter(|p| !p.is_empty());

        let parse = |field: &Option<String>| field.as_deref().and_then(AttributeCode::from_code);
        let attributes = [
            parse(&self.attribute1),
            parse(&self.attribute2),
            parse(&self.attribute3),
            parse(&self.attribute4),
        ];

        Some(Role {
            name,
            position,
            attributes,
        })
    }

    /// Build a record for persistence from a canonical role.
    ///
    /// Always writes the `Role` field; the `RoleType` spelling is accepted
    /// on read only.
    pub fn from_role(role: &Role) -> Self {
        let code = |slot: Option<AttributeCode>| slot.map(|c| c.code().to_string());
        RoleRecord {
            role: Some(role.name.clone()),
            role_type: None,
            position: role.position.clone(),
            attribute1: code(role.attributes[0]),
            attribute2: code(role.attributes[1]),
            attribute3: code(role.attributes[2]),
            attribute4: code(role.attributes[3]),
        }
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Role lookup table preserving document order.
///
/// Iteration order matters: the best-fit search and its tie-breaking are
/// defined in terms of catalog order, so this keeps roles in a `Vec` and
/// indexes them by canonical name on the side.
#[derive(Debug, Clone, Default)]
pub struct RoleCatalog {
    roles: Vec<Role>,
    index: HashMap<String, usize>,
}

impl RoleCatalog {
    /// Build a catalog from raw document records, dropping nameless records.
    /// A duplicated name keeps the later record (last writer wins, matching
    /// the document store's semantics).
    pub fn from_records(records: Vec<RoleRecord>) -> Self {
        let mut catalog = RoleCatalog::default();
        for record in records {
            if let Some(role) = record.into_role() {
                catalog.upsert(role);
            }
        }
        catalog
    }

    /// Persistable records in catalog order.
    pub fn to_records(&self) -> Vec<RoleRecord> {
        self.roles.iter().map(RoleRecord::from_role).collect()
    }

    /// Look up a role by name (case/whitespace normalized).
    pub fn get(&self, name: &str) -> Option<&Role> {
        self.index.get(&role_key(name)).map(|&i| &self.roles[i])
    }

    /// Roles in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.roles.iter()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Insert or replace a role. Replacement keeps the original catalog
    /// position; an insert appends.
    pub fn upsert(&mut self, role: Role) {
        match self.index.get(&role.name) {
            Some(&i) => self.roles[i] = role,
            None => {
                self.index.insert(role.name.clone(), self.roles.len());
                self.roles.push(role);
            }
        }
    }

    /// Remove a role by name. Returns whether a role was removed.
    pub fn remove(&mut self, name: &str) -> bool {
        let key = role_key(name);
        let Some(i) = self.index.remove(&key) else {
            return false;
        };
        self.roles.remove(i);
        for idx in self.index.values_mut() {
            if *idx > i {
                *idx -= 1;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, position: &str, attrs: &[&str]) -> RoleRecord {
        RoleRecord {
            role: Some(name.to_string()),
            position: Some(position.to_string()),
            attribute1: attrs.first().map(|s| s.to_string()),
            attribute2: attrs.get(1).map(|s| s.to_string()),
            attribute3: attrs.get(2).map(|s| s.to_string()),
            attribute4: attrs.get(3).map(|s| s.to_string()),
            ..RoleRecord::default()
        }
    }

    #[test]
    fn attribute_code_roundtrip() {
        for code in [
            AttributeCode::Pac,
            AttributeCode::Sho,
            AttributeCode::Pas,
            AttributeCode::Dri,
            AttributeCode::Def,
            AttributeCode::Phy,
            AttributeCode::Gk,
        ] {
            assert_eq!(AttributeCode::from_code(code.code()), Some(code));
        }
    }

    #[test]
    fn attribute_code_case_insensitive_and_unknown() {
        assert_eq!(AttributeCode::from_code(" pac "), Some(AttributeCode::Pac));
        assert_eq!(AttributeCode::from_code("XYZ"), None);
        assert_eq!(AttributeCode::from_code(""), None);
    }

    #[test]
    fn role_key_normalizes() {
        assert_eq!(role_key("  st-complete "), "ST-COMPLETE");
    }

    #[test]
    fn record_with_role_field_converts() {
        let role = record("ST-Complete", "st", &["SHO", "PAC"]).into_role().unwrap();
        assert_eq!(role.name, "ST-COMPLETE");
        assert_eq!(role.position.as_deref(), Some("ST"));
        assert_eq!(role.attributes[0], Some(AttributeCode::Sho));
        assert_eq!(role.attributes[1], Some(AttributeCode::Pac));
        assert_eq!(role.attributes[2], None);
        assert_eq!(role.attributes[3], None);
    }

    #[test]
    fn record_with_role_type_field_converts() {
        let rec = RoleRecord {
            role_type: Some("GK-Sweeper".into()),
            position: Some("GK".into()),
            attribute1: Some("GK".into()),
            ..RoleRecord::default()
        };
        let role = rec.into_role().unwrap();
        assert_eq!(role.name, "GK-SWEEPER");
        assert_eq!(role.attributes[0], Some(AttributeCode::Gk));
    }

    #[test]
    fn role_field_wins_over_role_type() {
        let rec = RoleRecord {
            role: Some("Primary".into()),
            role_type: Some("Secondary".into()),
            ..RoleRecord::default()
        };
        assert_eq!(rec.into_role().unwrap().name, "PRIMARY");
    }

    #[test]
    fn blank_role_name_falls_back_then_drops() {
        let rec = RoleRecord {
            role: Some("   ".into()),
            role_type: Some("Fallback".into()),
            ..RoleRecord::default()
        };
        assert_eq!(rec.into_role().unwrap().name, "FALLBACK");

        let nameless = RoleRecord::default();
        assert!(nameless.into_role().is_none());
    }

    #[test]
    fn blank_position_means_no_requirement() {
        let rec = RoleRecord {
            role: Some("Any".into()),
            position: Some("  ".into()),
            ..RoleRecord::default()
        };
        assert_eq!(rec.into_role().unwrap().position, None);
    }

    #[test]
    fn position_alias_folded_on_load() {
        let role = record("Winger", "LW", &["PAC"]).into_role().unwrap();
        assert_eq!(role.position.as_deref(), Some("LM"));
    }

    #[test]
    fn unknown_attribute_codes_become_empty_slots() {
        let role = record("Odd", "ST", &["SHO", "???", "PAC"]).into_role().unwrap();
        assert_eq!(role.attributes[0], Some(AttributeCode::Sho));
        assert_eq!(role.attributes[1], None);
        assert_eq!(role.attributes[2], Some(AttributeCode::Pac));
    }

    #[test]
    fn catalog_lookup_is_case_insensitive() {
        let catalog = RoleCatalog::from_records(vec![record("ST-Complete", "ST", &["SHO"])]);
        assert!(catalog.get("st-complete").is_some());
        assert!(catalog.get(" ST-COMPLETE ").is_some());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn catalog_preserves_document_order() {
        let catalog = RoleCatalog::from_records(vec![
            record("B-Role", "ST", &[]),
            record("A-Role", "ST", &[]),
            record("C-Role", "ST", &[]),
        ]);
        let names: Vec<_> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B-ROLE", "A-ROLE", "C-ROLE"]);
    }

    #[test]
    fn duplicate_name_keeps_later_record_in_place() {
        let catalog = RoleCatalog::from_records(vec![
            record("Dup", "ST", &["SHO"]),
            record("Other", "GK", &[]),
            record("Dup", "CB", &["DEF"]),
        ]);
        assert_eq!(catalog.len(), 2);
        let dup = catalog.get("DUP").unwrap();
        assert_eq!(dup.position.as_deref(), Some("CB"));
        // Replacement keeps the original slot in catalog order.
        assert_eq!(catalog.iter().next().unwrap().name, "DUP");
    }

    #[test]
    fn remove_shifts_index_correctly() {
        let mut catalog = RoleCatalog::from_records(vec![
            record("First", "ST", &[]),
            record("Second", "CB", &[]),
            record("Third", "GK", &[]),
        ]);
        assert!(catalog.remove("first"));
        assert!(!catalog.remove("first"));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get("Second").unwrap().position.as_deref(), Some("CB"));
        assert_eq!(catalog.get("Third").unwrap().position.as_deref(), Some("GK"));
        let names: Vec<_> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["SECOND", "THIRD"]);
    }

    #[test]
    fn records_roundtrip_through_persistence_shape() {
        let original = RoleCatalog::from_records(vec![
            record("ST-Complete", "ST", &["SHO", "PAC", "DRI", "PHY"]),
            record("GK-Sweeper", "GK", &["GK", "PAS"]),
        ]);
        let json = serde_json::to_string(&original.to_records()).unwrap();
        let parsed: Vec<RoleRecord> = serde_json::from_str(&json).unwrap();
        let reloaded = RoleCatalog::from_records(parsed);
        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get("st-complete").unwrap().attributes,
            original.get("ST-COMPLETE").unwrap().attributes
        );
    }

    #[test]
    fn wire_json_with_role_type_parses() {
        let json = r#"[{"RoleType": "CDM-Anchor", "Position": "CDM", "Attribute1": "DEF", "Attribute2": "PHY"}]"#;
        let records: Vec<RoleRecord> = serde_json::from_str(json).unwrap();
        let catalog = RoleCatalog::from_records(records);
        let role = catalog.get("CDM-ANCHOR").unwrap();
        assert_eq!(role.position.as_deref(), Some("CDM"));
        assert_eq!(role.attributes[1], Some(AttributeCode::Phy));
    }
}
