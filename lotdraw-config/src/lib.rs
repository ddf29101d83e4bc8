//! # lotdraw Configuration System
//!
//! Hierarchical configuration for the draw engine and its front ends.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth for layout, storage and telemetry
//! - **Validation**: Field rules via `validator`, plus a cross-field layout check
//! - **Environment Awareness**: Per-environment overrides and `LOTDRAW_*` variables

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod draw;
mod error;
mod storage;
mod telemetry;
mod validation;

pub use draw::DrawConfig;
pub use draw::TopicConfig;
pub use error::ConfigError;
pub use storage::StorageConfig;
pub use telemetry::TelemetryConfig;

/// Base configuration file, relative to the working directory.
pub const BASE_CONFIG_FILE: &str = "config/lotdraw.yaml";

/// Top‑level configuration container.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct LotdrawConfig {
    /// Slot table, topic catalog and designated participant.
    #[serde(default)]
    #[validate(nested)]
    pub draw: DrawConfig,

    /// Snapshot persistence.
    #[serde(default)]
    #[validate(nested)]
    pub storage: StorageConfig,

    /// Logging parameters.
    #[serde(default)]
    #[validate(nested)]
    pub telemetry: TelemetryConfig,
}

impl LotdrawConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default Values
    /// 2. `config/lotdraw.yaml` - Base settings. If missing, defaults are used.
    /// 3. `config/<environment>.yaml` - Environment‑specific overrides
    ///    (`LOTDRAW_ENV`, default `production`).
    /// 4. `LOTDRAW_*` environment variables, `__` separating nested keys.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(LotdrawConfig::default()));

        if Path::new(BASE_CONFIG_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_CONFIG_FILE));
        }

        let env = std::env::var("LOTDRAW_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        Self::extract(figment)
    }

    /// Load configuration from a specific file, still honouring environment
    /// overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(
                path.to_string_lossy().to_string(),
            )));
        }

        let figment =
            Figment::from(Serialized::defaults(LotdrawConfig::default())).merge(Yaml::file(path));
        Self::extract(figment)
    }

    /// Runs field validation and the cross-field layout check.
    pub fn check(&self) -> Result<(), ConfigError> {
        self.validate()?;
        self.draw.check_layout()
    }

    /// Renders the effective configuration as YAML.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        figment
            .merge(Env::prefixed("LOTDRAW_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.check()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn full_config_validation() {
        let config = LotdrawConfig::default();
        config.check().expect("Default config should validate");
    }

    #[test]
    fn defaults_without_files() {
        Jail::expect_with(|_jail| {
            let config = LotdrawConfig::load().expect("defaults load");
            assert_eq!(config.draw.slot_count, 13);
            assert_eq!(config.draw.reserved_slot_number, 10);
            assert_eq!(config.draw.reserved_topic_id, 5);
            assert!(config.storage.enabled);
            Ok(())
        });
    }

    #[test]
    fn environment_override() {
        Jail::expect_with(|jail| {
            jail.set_env("LOTDRAW_DRAW__SLOT_COUNT", "20");
            jail.set_env("LOTDRAW_DRAW__ADMIN_NAME", "Host");
            let config = LotdrawConfig::load().expect("env override loads");
            assert_eq!(config.draw.slot_count, 20);
            assert_eq!(config.draw.admin_name, "Host");
            Ok(())
        });
    }

    #[test]
    fn file_hierarchy() {
        Jail::expect_with(|jail| {
            std::fs::create_dir_all(jail.directory().join("config")).expect("config dir");
            jail.create_file(
                "config/lotdraw.yaml",
                r#"
draw:
  admin_name: Host
  slot_count: 4
  reserved_slot_number: 2
  reserved_topic_id: 1
  topics:
    - { id: 1, text: "first" }
    - { id: 2, text: "second" }
storage:
  snapshot_path: state/cycle.json
"#,
            )?;
            jail.create_file("config/staging.yaml", "telemetry:\n  log_level: debug\n")?;
            jail.set_env("LOTDRAW_ENV", "staging");

            let config = LotdrawConfig::load().expect("layered config loads");
            assert_eq!(config.draw.admin_name, "Host");
            assert_eq!(config.draw.topics.len(), 2);
            assert_eq!(config.storage.snapshot_path, PathBuf::from("state/cycle.json"));
            assert_eq!(config.telemetry.log_level, "debug");
            Ok(())
        });
    }

    #[test]
    fn inconsistent_layout_is_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "draw.yaml",
                "draw:\n  slot_count: 3\n  reserved_slot_number: 7\n",
            )?;
            let err = LotdrawConfig::load_from_path("draw.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Layout(_)), "{err}");
            Ok(())
        });
    }

    #[test]
    fn duplicate_topics_fail_validation() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "dup.yaml",
                r#"
draw:
  reserved_topic_id: 1
  topics:
    - { id: 1, text: "same" }
    - { id: 1, text: "other" }
"#,
            )?;
            let err = LotdrawConfig::load_from_path("dup.yaml").unwrap_err();
            assert!(matches!(err, ConfigError::Validation(_)));
            assert!(err.to_string().contains("duplicate_topic_id"), "{err}");
            Ok(())
        });
    }

    #[test]
    fn missing_explicit_file() {
        let err = LotdrawConfig::load_from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn renders_yaml() {
        let yaml = LotdrawConfig::default().to_yaml().unwrap();
        assert!(yaml.contains("slot_count: 13"));
        assert!(yaml.contains("snapshot_path: data/draw-state.json"));
    }
}
