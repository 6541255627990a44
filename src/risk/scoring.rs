//! Composite scoring: multiply per-parameter multipliers and classify.
//!
//! Each observable scales the risk independently; a multiplier of 1.0
//! leaves the composite unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::band::{RiskBand, score_to_band};
use super::normalize::{Observation, ScoredObservation, normalize};
use crate::error::{FloodError, Result};
use crate::profile::{ParameterKind, ProfileRegistry};

/// Result of one evaluation. Built fresh per call and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub multipliers: BTreeMap<ParameterKind, f64>,
    pub observations: Vec<ScoredObservation>,
    pub composite_score: f64,
    pub band: RiskBand,
}

/// Score a set of observations, at most one per kind.
///
/// Multipliers are combined in kind order, so the composite is
/// bit-identical whatever order the caller passes the observations in.
/// Any normalization failure aborts the whole evaluation.
pub fn score(registry: &ProfileRegistry, observations: &[Observation]) -> Result<RiskAssessment> {
    if observations.is_empty() {
        return Err(FloodError::NoObservations);
    }

    let mut by_kind: BTreeMap<&ParameterKind, f64> = BTreeMap::new();
    for obs in observations {
        if by_kind.insert(&obs.kind, obs.value).is_some() {
            return Err(FloodError::DuplicateParameter(obs.kind.clone()));
        }
    }

    let scored = by_kind
        .into_iter()
        .map(|(kind, value)| normalize(registry, kind, value))
        .collect::<Result<Vec<_>>>()?;

    let composite_score = scored.iter().map(|s| s.multiplier).product::<f64>();
    let band = score_to_band(composite_score);
    log::debug!("composite {composite_score:.4} ({band}) from {} observations", scored.len());

    Ok(RiskAssessment {
        multipliers: scored
            .iter()
            .map(|s| (s.kind.clone(), s.multiplier))
            .collect(),
        observations: scored,
        composite_score,
        band,
    })
}

/// Parse `kind=value` pairs as given on the command line.
pub fn parse_observations<S: AsRef<str>>(pairs: &[S]) -> Result<Vec<Observation>> {
    pairs
        .iter()
        .map(|pair| {
            let pair = pair.as_ref();
            let (kind, value) = pair.split_once('=').ok_or_else(|| {
                FloodError::invalid_input(pair, "expected kind=value")
            })?;
            let kind: ParameterKind = kind.parse()?;
            let value: f64 = value
                .trim()
                .parse()
                .map_err(|_| FloodError::invalid_input(&kind, format!("not a number: {value:?}")))?;
            Ok(Observation::new(kind, value))
        })
        .collect()
}

#[cfg(test)]
#[path = "scoring_test.rs"]
mod tests;
