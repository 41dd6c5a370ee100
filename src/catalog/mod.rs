// Static catalogs: tiers, roles, and formation templates.

pub mod formation;
pub mod role;
pub mod tier;

pub use formation::{default_formations, Formation, FormationCatalog, FormationSlot};
pub use role::{role_key, AttributeCode, Role, RoleCatalog, RoleRecord};
pub use tier::Tier;
