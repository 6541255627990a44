//! Clip-then-interpolate normalization of a single observable.
//!
//! Each reading is forced into its profile's `[x_min, x_max]` envelope and
//! mapped linearly onto `[m_min, m_max]`. Nothing is ever extrapolated: a
//! reading far beyond the envelope (say a 771 mm storm total against the
//! 150 mm rainfall ceiling) saturates at `m_max`.

use serde::{Deserialize, Serialize};

use crate::error::{FloodError, Result};
use crate::profile::{ParameterKind, ProfileRegistry};

/// A raw reading for one observable.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub kind: ParameterKind,
    pub value: f64,
}

impl Observation {
    pub fn new(kind: ParameterKind, value: f64) -> Self {
        Self { kind, value }
    }
}

/// Output of [`normalize`]: the reading after clipping and its multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredObservation {
    pub kind: ParameterKind,
    pub clipped_value: f64,
    pub multiplier: f64,
}

/// Normalize one reading against the registry.
///
/// Fails with `UnknownParameterKind` when no profile is registered for
/// `kind` and with `InvalidInput` for NaN or infinite values; those are
/// never clipped to a bound.
pub fn normalize(
    registry: &ProfileRegistry,
    kind: &ParameterKind,
    value: f64,
) -> Result<ScoredObservation> {
    let profile = registry
        .get(kind)
        .ok_or_else(|| FloodError::UnknownParameterKind(kind.to_string()))?;

    if value.is_nan() {
        return Err(FloodError::invalid_input(kind, "value is NaN"));
    }
    if value.is_infinite() {
        return Err(FloodError::invalid_input(kind, format!("value is {value}")));
    }

    let clipped_value = profile.clip(value);
    if clipped_value != value {
        log::debug!("{kind}: {value} clipped to {clipped_value}");
    }

    Ok(ScoredObservation {
        kind: kind.clone(),
        clipped_value,
        multiplier: profile.interpolate(clipped_value),
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
