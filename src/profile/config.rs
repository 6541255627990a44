//! TOML profile configuration.
//!
//! ```toml
//! replace_defaults = false
//!
//! [[profile]]
//! kind = "river_gauge"
//! label = "River gauge level"
//! unit = "m"
//! x_min = 0.0
//! x_max = 8.0
//! m_min = 0.9
//! m_max = 2.0
//! ```
//!
//! Entries are validated one by one. A degenerate entry is dropped (and
//! reported) while the others still register; a kind listed twice fails
//! the whole file.

use std::path::Path;

use serde::Deserialize;

use super::{ParameterKind, ParameterProfile, ProfileRegistry, RegistryBuilder};
use crate::error::{self, FloodError, Result};

/// Top-level shape of a profile configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileConfig {
    /// Start from an empty registry instead of the built-in envelope.
    #[serde(default)]
    pub replace_defaults: bool,
    #[serde(default, rename = "profile")]
    pub profiles: Vec<ProfileEntry>,
}

/// One `[[profile]]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProfileEntry {
    pub kind: ParameterKind,
    pub label: Option<String>,
    #[serde(default)]
    pub unit: String,
    pub x_min: f64,
    pub x_max: f64,
    pub m_min: f64,
    pub m_max: f64,
}

impl ProfileEntry {
    fn into_profile(self) -> Result<ParameterProfile> {
        let label = self.label.unwrap_or_else(|| self.kind.to_string());
        ParameterProfile::new(
            self.kind,
            label,
            self.unit,
            (self.x_min, self.x_max),
            (self.m_min, self.m_max),
        )
    }
}

/// A frozen registry plus the entries that failed validation.
#[derive(Debug)]
pub struct LoadedProfiles {
    pub registry: ProfileRegistry,
    pub rejected: Vec<FloodError>,
}

/// Read, parse and apply a profile configuration file.
pub fn load(path: &Path) -> Result<LoadedProfiles> {
    let content = error::read_file(path)?;
    let config = parse(&content, path)?;
    let loaded = build_registry(config)?;
    log::info!(
        "{}: {} profiles active, {} rejected",
        path.display(),
        loaded.registry.len(),
        loaded.rejected.len()
    );
    Ok(loaded)
}

pub fn parse(content: &str, path: &Path) -> Result<ProfileConfig> {
    toml::from_str(content).map_err(|source| FloodError::Config {
        path: path.to_path_buf(),
        source,
    })
}

pub fn build_registry(config: ProfileConfig) -> Result<LoadedProfiles> {
    let mut builder = if config.replace_defaults {
        RegistryBuilder::new()
    } else {
        RegistryBuilder::with_builtins()
    };
    let mut rejected = Vec::new();

    for entry in config.profiles {
        match entry.into_profile() {
            Ok(profile) => {
                builder.register(profile)?;
            }
            Err(err @ FloodError::DegenerateProfile { .. }) => {
                log::warn!("skipping profile: {err}");
                rejected.push(err);
            }
            Err(err) => return Err(err),
        }
    }

    Ok(LoadedProfiles {
        registry: builder.build(),
        rejected,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
