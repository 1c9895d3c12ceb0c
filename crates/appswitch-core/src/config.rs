use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// What `register` does when a driver with the same name is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Add another entry; the earlier one still wins dispatch.
    #[default]
    Append,
    /// Keep the existing entry and drop the new driver.
    Ignore,
    /// Put the new driver in the existing entry's slot.
    Replace,
}

impl DuplicatePolicy {
    /// Name as spelled in config.toml.
    pub fn as_str(self) -> &'static str {
        match self {
            DuplicatePolicy::Append => "append",
            DuplicatePolicy::Ignore => "ignore",
            DuplicatePolicy::Replace => "replace",
        }
    }
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheme-matching driver declared in config (`[[drivers]]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Name reported when the driver claims a URL.
    pub name: String,
    /// URL scheme the driver claims (case-insensitive).
    pub scheme: String,
    /// Optional host the URL must also carry.
    #[serde(default)]
    pub host: Option<String>,
}

/// Global configuration loaded from `~/.config/appswitch/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitcherConfig {
    /// Duplicate registration handling: "append" (default), "ignore" or "replace".
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
    /// Scheme the host app registered for return URLs, if any.
    #[serde(default)]
    pub return_url_scheme: Option<String>,
    /// Drivers registered in file order.
    #[serde(default)]
    pub drivers: Vec<DriverConfig>,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("appswitch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SwitcherConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<SwitcherConfig> {
    if !path.exists() {
        let default_cfg = SwitcherConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)?;
    let cfg: SwitcherConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = SwitcherConfig::default();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Append);
        assert!(cfg.return_url_scheme.is_none());
        assert!(cfg.drivers.is_empty());
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let cfg: SwitcherConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, SwitcherConfig::default());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = SwitcherConfig {
            duplicate_policy: DuplicatePolicy::Replace,
            return_url_scheme: Some("com.example.payments".to_string()),
            drivers: vec![DriverConfig {
                name: "paypal".to_string(),
                scheme: "com.example.payments".to_string(),
                host: Some("onetouch".to_string()),
            }],
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: SwitcherConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            duplicate_policy = "ignore"
            return_url_scheme = "com.example.payments"

            [[drivers]]
            name = "paypal"
            scheme = "com.example.payments"
            host = "onetouch"

            [[drivers]]
            name = "venmo"
            scheme = "venmo"
        "#;
        let cfg: SwitcherConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Ignore);
        assert_eq!(cfg.return_url_scheme.as_deref(), Some("com.example.payments"));
        assert_eq!(cfg.drivers.len(), 2);
        assert_eq!(cfg.drivers[0].host.as_deref(), Some("onetouch"));
        assert_eq!(cfg.drivers[1].name, "venmo");
        assert!(cfg.drivers[1].host.is_none());
    }

    #[test]
    fn duplicate_policy_display_matches_toml_spelling() {
        for policy in [
            DuplicatePolicy::Append,
            DuplicatePolicy::Ignore,
            DuplicatePolicy::Replace,
        ] {
            let cfg = SwitcherConfig {
                duplicate_policy: policy,
                ..SwitcherConfig::default()
            };
            let toml = toml::to_string(&cfg).unwrap();
            assert!(
                toml.contains(&format!("duplicate_policy = \"{policy}\"")),
                "{toml}"
            );
        }
    }

    #[test]
    fn unknown_duplicate_policy_is_rejected() {
        let toml = r#"duplicate_policy = "merge""#;
        assert!(toml::from_str::<SwitcherConfig>(toml).is_err());
    }

    #[test]
    fn load_or_init_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg, SwitcherConfig::default());
        assert!(path.exists());

        let again = load_or_init_at(&path).unwrap();
        assert_eq!(again, cfg);
    }

    #[test]
    fn load_or_init_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "duplicate_policy = \"replace\"\n").unwrap();

        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.duplicate_policy, DuplicatePolicy::Replace);
    }

    #[test]
    fn load_or_init_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "drivers = 3\n").unwrap();

        let err = load_or_init_at(&path).unwrap_err();
        assert!(format!("{err:#}").contains("config.toml"));
    }
}
