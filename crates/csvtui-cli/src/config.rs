// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use csvtui_app::{DataType, NamedAction};
use csvtui_tui::{KeyBinding, Keymap, Theme, default_color_hex, default_keys};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "csvtui";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub keys: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
    #[serde(default)]
    pub logging: Logging,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            keys: BTreeMap::new(),
            colors: BTreeMap::new(),
            logging: Logging::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Logging {
    pub level: Option<String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("CSVTUI_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set CSVTUI_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` at the top",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (action, keys) in self.key_overrides(path)? {
            for raw in keys {
                KeyBinding::parse(&raw).with_context(|| {
                    format!("keys.{} in {}", action.as_str(), path.display())
                })?;
            }
        }

        for (data_type, value) in self.color_overrides(path)? {
            Theme::with_overrides(&BTreeMap::from([(data_type, value)])).with_context(|| {
                format!("colors.{} in {}", data_type.as_str(), path.display())
            })?;
        }

        if let Some(level) = &self.logging.level {
            EnvFilter::try_new(level).with_context(|| {
                format!("logging.level in {} is not a valid filter", path.display())
            })?;
        }

        Ok(())
    }

    fn key_overrides(&self, path: &Path) -> Result<BTreeMap<NamedAction, Vec<String>>> {
        self.keys
            .iter()
            .map(|(name, keys)| {
                let action = NamedAction::parse(name).ok_or_else(|| {
                    anyhow!("keys.{name} in {} is not a known action", path.display())
                })?;
                Ok((action, keys.clone()))
            })
            .collect()
    }

    fn color_overrides(&self, path: &Path) -> Result<BTreeMap<DataType, String>> {
        self.colors
            .iter()
            .map(|(name, value)| {
                let data_type = DataType::parse(name).ok_or_else(|| {
                    anyhow!(
                        "colors.{name} in {} is not a data type; use string, int, float, bool or empty",
                        path.display()
                    )
                })?;
                Ok((data_type, value.clone()))
            })
            .collect()
    }

    pub fn keymap(&self, path: &Path) -> Result<Keymap> {
        Keymap::with_overrides(&self.key_overrides(path)?)
            .with_context(|| format!("build key bindings from {}", path.display()))
    }

    pub fn theme(&self, path: &Path) -> Result<Theme> {
        Theme::with_overrides(&self.color_overrides(path)?)
            .with_context(|| format!("build colors from {}", path.display()))
    }

    pub fn log_level(&self) -> &str {
        self.logging.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn example_config(path: &Path) -> String {
        let mut out = format!(
            "# csvtui config\n# Place this file at: {}\n\nversion = 1\n\n[keys]\n# Each list replaces the default keys for that action.\n",
            path.display()
        );
        for action in NamedAction::ALL {
            let keys: Vec<String> = default_keys(action)
                .iter()
                .map(|key| format!("{key:?}"))
                .collect();
            out.push_str(&format!("{} = [{}]\n", action.as_str(), keys.join(", ")));
        }

        out.push_str(
            "\n[colors]\n# \"#RRGGBB\", a color name, or a 256-color index. Setting one\n# turns off row striping for that type.\n",
        );
        for data_type in DataType::ALL {
            out.push_str(&format!(
                "# {} = \"{}\"\n",
                data_type.as_str(),
                default_color_hex(data_type)
            ));
        }

        out.push_str(&format!(
            "\n[logging]\n# Any RUST_LOG style directive. RUST_LOG wins when set.\nlevel = \"{DEFAULT_LOG_LEVEL}\"\n"
        ));
        out
    }
}
