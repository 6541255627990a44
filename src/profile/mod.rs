//! Parameter profiles and the frozen registry that holds them.
//!
//! A profile is the `(x_min, x_max, m_min, m_max)` tuple that maps one
//! physical observable onto a dimensionless multiplier. The built-in
//! envelope covers rainfall, soil moisture and relative humidity; extra
//! observables (river gauge level, wind speed, ...) can be added through a
//! TOML file, see [`config`].
//!
//! Registries are built once with [`RegistryBuilder`] and never mutated
//! afterwards, so a `&ProfileRegistry` can be shared across threads freely.

pub mod config;
mod report;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{FloodError, Result};

pub use report::{print_json, print_report};

/// Identifier of an observable. Built-in kinds come first in sort order,
/// configured kinds follow alphabetically.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParameterKind {
    Rainfall,
    SoilMoisture,
    RelativeHumidity,
    Custom(String),
}

impl ParameterKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Rainfall => "rainfall",
            Self::SoilMoisture => "soil_moisture",
            Self::RelativeHumidity => "relative_humidity",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses snake_case identifiers case-insensitively; `-` and spaces are
/// accepted as word separators. Any other well-formed name becomes a
/// `Custom` kind, which only resolves if a profile was configured for it.
impl FromStr for ParameterKind {
    type Err = FloodError;

    fn from_str(raw: &str) -> Result<Self> {
        let name: String = raw
            .trim()
            .chars()
            .map(|c| match c {
                '-' | ' ' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();
        let well_formed = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !well_formed {
            return Err(FloodError::UnknownParameterKind(raw.to_string()));
        }
        Ok(match name.as_str() {
            "rainfall" | "rain" => Self::Rainfall,
            "soil_moisture" | "soil" => Self::SoilMoisture,
            "relative_humidity" | "humidity" | "rh" => Self::RelativeHumidity,
            _ => Self::Custom(name),
        })
    }
}

impl Serialize for ParameterKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ParameterKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Static envelope for one observable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterProfile {
    pub kind: ParameterKind,
    pub label: String,
    pub unit: String,
    /// Lower physical bound; readings below are clipped up to it.
    pub x_min: f64,
    /// Upper physical bound; readings above are clipped down to it.
    pub x_max: f64,
    /// Multiplier at `x_min`.
    pub m_min: f64,
    /// Multiplier at `x_max`.
    pub m_max: f64,
}

/// Built-in global operating envelope: (kind, label, unit, x_min, x_max, m_min, m_max).
const BUILTIN_TABLE: [(ParameterKind, &str, &str, f64, f64, f64, f64); 3] = [
    (ParameterKind::Rainfall, "Rainfall", "mm/6h", 0.0, 150.0, 0.2, 2.5),
    (ParameterKind::SoilMoisture, "Soil moisture", "m³/m³", 0.0, 0.60, 0.8, 1.4),
    (ParameterKind::RelativeHumidity, "Relative humidity", "%", 30.0, 100.0, 0.95, 1.05),
];

impl ParameterProfile {
    /// Build a profile, rejecting ranges that would make interpolation
    /// undefined. Called for every profile before it enters a registry.
    pub fn new(
        kind: ParameterKind,
        label: impl Into<String>,
        unit: impl Into<String>,
        (x_min, x_max): (f64, f64),
        (m_min, m_max): (f64, f64),
    ) -> Result<Self> {
        let profile = Self {
            kind,
            label: label.into(),
            unit: unit.into(),
            x_min,
            x_max,
            m_min,
            m_max,
        };
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<()> {
        let degenerate = |reason: String| FloodError::DegenerateProfile {
            kind: self.kind.clone(),
            reason,
        };
        let bounds = [self.x_min, self.x_max, self.m_min, self.m_max];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(degenerate("bounds must be finite".to_string()));
        }
        if self.x_min >= self.x_max {
            return Err(degenerate(format!(
                "x_min ({}) must be below x_max ({})",
                self.x_min, self.x_max
            )));
        }
        if self.m_min == self.m_max {
            return Err(degenerate(format!(
                "m_min and m_max are both {}",
                self.m_min
            )));
        }
        // finite bounds can still overflow when subtracted
        if !(self.x_max - self.x_min).is_finite() || !(self.m_max - self.m_min).is_finite() {
            return Err(degenerate("range span overflows f64".to_string()));
        }
        Ok(())
    }

    /// Force `value` into `[x_min, x_max]`.
    pub fn clip(&self, value: f64) -> f64 {
        value.min(self.x_max).max(self.x_min)
    }

    /// Linear map from a clipped value to its multiplier. `t` stays in
    /// `[0, 1]` as long as the input went through [`clip`](Self::clip).
    /// The endpoints return the declared multipliers exactly.
    pub fn interpolate(&self, clipped: f64) -> f64 {
        if clipped <= self.x_min {
            return self.m_min;
        }
        if clipped >= self.x_max {
            return self.m_max;
        }
        let t = (clipped - self.x_min) / (self.x_max - self.x_min);
        let (lo, hi) = self.multiplier_range();
        // rounding must not push the result past the declared range
        (self.m_min + t * (self.m_max - self.m_min)).clamp(lo, hi)
    }

    /// Inclusive multiplier range, lowest first.
    pub fn multiplier_range(&self) -> (f64, f64) {
        (self.m_min.min(self.m_max), self.m_min.max(self.m_max))
    }

    pub fn is_increasing(&self) -> bool {
        self.m_max > self.m_min
    }
}

/// Immutable map from kind to profile.
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: BTreeMap<ParameterKind, ParameterProfile>,
}

impl ProfileRegistry {
    /// Registry holding only the built-in envelope.
    pub fn builtin() -> Self {
        RegistryBuilder::with_builtins().build()
    }

    pub fn get(&self, kind: &ParameterKind) -> Option<&ParameterProfile> {
        self.profiles.get(kind)
    }

    /// Profiles in kind order (built-ins first).
    pub fn iter(&self) -> impl Iterator<Item = &ParameterProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Collects profiles, then freezes them into a [`ProfileRegistry`].
///
/// Built-in profiles may be overridden once by an explicit registration;
/// registering the same kind explicitly twice is a configuration error.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    profiles: BTreeMap<ParameterKind, ParameterProfile>,
    explicit: BTreeSet<ParameterKind>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut builder = Self::new();
        for (kind, label, unit, x_min, x_max, m_min, m_max) in BUILTIN_TABLE {
            let profile = ParameterProfile {
                kind: kind.clone(),
                label: label.to_string(),
                unit: unit.to_string(),
                x_min,
                x_max,
                m_min,
                m_max,
            };
            builder.profiles.insert(kind, profile);
        }
        builder
    }

    pub fn register(&mut self, profile: ParameterProfile) -> Result<&mut Self> {
        profile.validate()?;
        if !self.explicit.insert(profile.kind.clone()) {
            return Err(FloodError::DuplicateProfile(profile.kind));
        }
        if self.profiles.contains_key(&profile.kind) {
            log::debug!("overriding built-in profile {}", profile.kind);
        }
        self.profiles.insert(profile.kind.clone(), profile);
        Ok(self)
    }

    pub fn build(self) -> ProfileRegistry {
        log::debug!("profile registry frozen with {} profiles", self.profiles.len());
        ProfileRegistry {
            profiles: self.profiles,
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
