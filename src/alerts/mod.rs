//! Band transitions between two batch runs.
//!
//! Compares a previous and a current `batch` output site by site and reports
//! the changes worth alerting on: a site appearing at an alert-worthy band,
//! an upgrade into one, or a downgrade out of one. Steady bands are silent.

mod report;

use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::path::Path;

use serde::Serialize;

use crate::error;
use crate::risk::RiskBand;
use crate::sites::{BatchResult, SiteResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    New,
    Upgrade,
    Downgrade,
}

impl ChangeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Upgrade => "Upgrade",
            Self::Downgrade => "Downgrade",
        }
    }
}

/// Which directions of change produce an alert.
#[derive(Debug, Clone, Copy)]
pub struct AlertPolicy {
    pub on_upgrades: bool,
    pub on_downgrades: bool,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            on_upgrades: true,
            on_downgrades: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandTransition {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub change: ChangeKind,
    pub before: Option<RiskBand>,
    pub after: RiskBand,
    pub before_score: Option<f64>,
    pub after_score: f64,
}

/// Ids that appear on more than one site, each reported once.
fn duplicate_ids(result: &BatchResult) -> Vec<&str> {
    let mut seen = BTreeSet::new();
    let mut dups = BTreeSet::new();
    for site in &result.sites {
        if !seen.insert(site.id.as_str()) {
            dups.insert(site.id.as_str());
        }
    }
    dups.into_iter().collect()
}

/// Scored sites keyed by id. Sites that failed to score are left out; of
/// two sites sharing an id, the later one wins.
fn scored_by_id(result: &BatchResult) -> BTreeMap<&str, &SiteResult> {
    result
        .sites
        .iter()
        .filter(|s| s.assessment.is_some())
        .map(|s| (s.id.as_str(), s))
        .collect()
}

/// Sites that errored in the previous run, so they are not taken as new.
fn failed_ids(result: &BatchResult) -> Vec<&str> {
    result
        .sites
        .iter()
        .filter(|s| s.assessment.is_none())
        .map(|s| s.id.as_str())
        .collect()
}

/// Compare two runs and return alert-worthy transitions ordered by site id.
pub fn compare(before: &BatchResult, after: &BatchResult, policy: AlertPolicy) -> Vec<BandTransition> {
    for (side, result) in [("before", before), ("after", after)] {
        for id in duplicate_ids(result) {
            log::warn!("{side}: site id {id:?} appears more than once, using the last one");
        }
    }

    let previous = scored_by_id(before);
    let previously_failed = failed_ids(before);
    let mut transitions = Vec::new();

    for (id, site) in scored_by_id(after) {
        let Some(current) = &site.assessment else {
            continue;
        };
        let cur_band = current.band;
        let prev = previous.get(id).and_then(|p| p.assessment.as_ref());

        let change = match prev {
            None if previously_failed.contains(&id) => None,
            None => cur_band.is_alert_worthy().then_some(ChangeKind::New),
            Some(p) if p.band == cur_band => None,
            Some(p) if cur_band > p.band => {
                (policy.on_upgrades && cur_band.is_alert_worthy()).then_some(ChangeKind::Upgrade)
            }
            Some(p) => (policy.on_downgrades && p.band.is_alert_worthy()).then_some(ChangeKind::Downgrade),
        };

        if let Some(change) = change {
            transitions.push(BandTransition {
                id: id.to_string(),
                name: site.name.clone(),
                change,
                before: prev.map(|p| p.band),
                after: cur_band,
                before_score: prev.map(|p| p.composite_score),
                after_score: current.composite_score,
            });
        }
    }

    transitions
}

pub fn run(
    before: &Path,
    after: &Path,
    json: bool,
    policy: AlertPolicy,
) -> Result<(), Box<dyn Error>> {
    let before_result: BatchResult = error::parse_json(before)?;
    let after_result: BatchResult = error::parse_json(after)?;
    let transitions = compare(&before_result, &after_result, policy);
    log::info!("{} band transitions", transitions.len());

    if json {
        report::print_json(&transitions)?;
    } else {
        report::print_report(&transitions);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
