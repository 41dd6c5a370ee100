// Configuration loading and parsing (config/squadfit.toml).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::squad::AssignmentPolicy;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },
}

// ---------------------------------------------------------------------------
// squadfit.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire squadfit.toml file.
#[derive(Debug, Clone, Deserialize)]
struct ConfigFile {
    inventory: InventoryConfig,
    marketplace: MarketplaceConfig,
    data: DataPaths,
    squad: SquadConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InventoryConfig {
    pub base_url: String,
    pub owner_wallet: String,
    pub timeout_secs: u64,
    /// Page size for the owner inventory fetch.
    pub page_limit: u32,
}

impl InventoryConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    pub base_url: String,
    pub listing_limit: u32,
}

/// Paths of the three whole-document catalogs, relative to the working
/// directory unless absolute.
#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub roles: String,
    pub formations: String,
    pub clubs: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SquadConfig {
    /// Tier assumed when a request names none (or an unknown one).
    pub default_tier: String,
    /// Whether squad assignment may use players already on a club roster.
    #[serde(default)]
    pub assignment_policy: AssignmentPolicy,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub inventory: InventoryConfig,
    pub marketplace: MarketplaceConfig,
    pub data: DataPaths,
    pub squad: SquadConfig,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/squadfit.toml` relative to
/// the given `base_dir`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join("squadfit.toml");
    let text = std::fs::read_to_string(&path).map_err(|_| ConfigError::FileNotFound {
        path: path.clone(),
    })?;
    let file: ConfigFile = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    let config = Config {
        inventory: file.inventory,
        marketplace: file.marketplace,
        data: file.data,
        squad: file.squad,
    };

    validate(&config)?;

    Ok(config)
}

/// Convenience wrapper: loads config relative to the current working directory.
pub fn load_config() -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    load_config_from(&cwd)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config) -> Result<(), ConfigError> {
    if config.inventory.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "inventory.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.inventory.owner_wallet.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "inventory.owner_wallet".into(),
            message: "must not be empty".into(),
        });
    }

    if config.inventory.timeout_secs == 0 {
        return Err(ConfigError::ValidationError {
            field: "inventory.timeout_secs".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.inventory.page_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "inventory.page_limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.marketplace.base_url.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "marketplace.base_url".into(),
            message: "must not be empty".into(),
        });
    }

    if config.marketplace.listing_limit == 0 {
        return Err(ConfigError::ValidationError {
            field: "marketplace.listing_limit".into(),
            message: "must be greater than 0".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const VALID_TOML: &str = r#"
[inventory]
base_url = "https://example.invalid/prod"
owner_wallet = "0x5d4143c95673cba6"
timeout_secs = 30
page_limit = 1500

[marketplace]
base_url = "https://example.invalid/prod"
listing_limit = 25

[data]
roles = "data/roles.json"
formations = "data/formations.json"
clubs = "data/clubs.json"

[squad]
default_tier = "Iron"
assignment_policy = "exclude_rostered"
"#;

    fn write_config(dir_name: &str, toml_text: &str) -> PathBuf {
        let tmp = std::env::temp_dir().join(dir_name);
        let config_dir = tmp.join("config");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(config_dir.join("squadfit.toml"), toml_text).unwrap();
        tmp
    }

    #[test]
    fn loads_valid_config() {
        let tmp = write_config("squadfit_config_valid", VALID_TOML);
        let config = load_config_from(&tmp).expect("should load valid config");

        assert_eq!(config.inventory.owner_wallet, "0x5d4143c95673cba6");
        assert_eq!(config.inventory.timeout(), Duration::from_secs(30));
        assert_eq!(config.inventory.page_limit, 1500);
        assert_eq!(config.marketplace.listing_limit, 25);
        assert_eq!(config.data.roles, "data/roles.json");
        assert_eq!(config.squad.default_tier, "Iron");
        assert_eq!(
            config.squad.assignment_policy,
            AssignmentPolicy::ExcludeRostered
        );

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn assignment_policy_defaults_to_allow_rostered() {
        let toml_text = VALID_TOML.replace("assignment_policy = \"exclude_rostered\"\n", "");
        let tmp = write_config("squadfit_config_default_policy", &toml_text);
        let config = load_config_from(&tmp).unwrap();
        assert_eq!(
            config.squad.assignment_policy,
            AssignmentPolicy::AllowRostered
        );
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let tmp = std::env::temp_dir().join("squadfit_config_missing");
        let _ = fs::remove_dir_all(&tmp);
        fs::create_dir_all(tmp.join("config")).unwrap();

        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::FileNotFound { path } => assert!(path.ends_with("squadfit.toml")),
            other => panic!("expected FileNotFound, got: {other}"),
        }

        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let tmp = write_config("squadfit_config_invalid", "this is not [[[ toml");
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ParseError { path, .. } => assert!(path.ends_with("squadfit.toml")),
            other => panic!("expected ParseError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_base_url() {
        let toml_text = VALID_TOML.replacen(
            "base_url = \"https://example.invalid/prod\"",
            "base_url = \"  \"",
            1,
        );
        let tmp = write_config("squadfit_config_empty_url", &toml_text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "inventory.base_url");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_timeout() {
        let toml_text = VALID_TOML.replace("timeout_secs = 30", "timeout_secs = 0");
        let tmp = write_config("squadfit_config_zero_timeout", &toml_text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "inventory.timeout_secs");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_zero_listing_limit() {
        let toml_text = VALID_TOML.replace("listing_limit = 25", "listing_limit = 0");
        let tmp = write_config("squadfit_config_zero_limit", &toml_text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "marketplace.listing_limit");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }

    #[test]
    fn rejects_empty_owner_wallet() {
        let toml_text = VALID_TOML.replace(
            "owner_wallet = \"0x5d4143c95673cba6\"",
            "owner_wallet = \"\"",
        );
        let tmp = write_config("squadfit_config_empty_owner", &toml_text);
        let err = load_config_from(&tmp).unwrap_err();
        match &err {
            ConfigError::ValidationError { field, .. } => {
                assert_eq!(field, "inventory.owner_wallet");
            }
            other => panic!("expected ValidationError, got: {other}"),
        }
        let _ = fs::remove_dir_all(&tmp);
    }
}
