//! Flood risk engine: per-parameter normalization, composite scoring and
//! band classification, plus the `evaluate` command built on top of them.

pub mod band;
pub mod normalize;
pub mod report;
pub mod scoring;

use std::error::Error;

use crate::profile::ProfileRegistry;

pub use band::RiskBand;
pub use normalize::{Observation, normalize};
pub use scoring::{RiskAssessment, parse_observations, score};

/// Evaluate one observation set given as `kind=value` pairs.
pub fn run(registry: &ProfileRegistry, pairs: &[String], json: bool) -> Result<(), Box<dyn Error>> {
    let observations = parse_observations(pairs)?;
    let assessment = score(registry, &observations)?;

    if json {
        report::print_json(&assessment)?;
    } else {
        report::print_report(&assessment, registry);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
