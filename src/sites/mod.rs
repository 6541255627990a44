//! Batch evaluation of many sites.
//!
//! Input is a JSON document listing sites with their observations; each site
//! is scored on its own, and a site that fails (unknown kind, missing value,
//! duplicate parameter) gets an error entry instead of aborting the batch.
//! The JSON output of this command is also the input of `diff`.
//!
//! A site may carry a `base_risk`, the static hazard of its location. The
//! composite is left untouched; `weighted_score` is `base_risk * composite`
//! with negative base risks floored at zero. `min_base_risk` skips every
//! site whose base risk is not strictly above the threshold.

mod report;

use std::error::Error;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{self, FloodError, Result};
use crate::profile::{ParameterKind, ProfileRegistry};
use crate::risk::{Observation, RiskAssessment, RiskBand, score};

/// Input document: `{"sites": [...]}`.
#[derive(Debug, Deserialize)]
pub struct SiteBatch {
    pub sites: Vec<SiteInput>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteInput {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub base_risk: Option<f64>,
    /// Kept as ordered pairs so a repeated key reaches the scorer as a
    /// duplicate instead of being silently overwritten.
    #[serde(deserialize_with = "deserialize_pairs")]
    pub observations: Vec<(String, Option<f64>)>,
}

/// One scored (or failed) site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_risk: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assessment: Option<RiskAssessment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weighted_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SiteResult {
    pub fn band(&self) -> Option<RiskBand> {
        self.assessment.as_ref().map(|a| a.band)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandCount {
    pub band: RiskBand,
    pub sites: usize,
}

/// Output document of a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchResult {
    pub sites: Vec<SiteResult>,
    #[serde(default)]
    pub band_counts: Vec<BandCount>,
    #[serde(default)]
    pub errors: usize,
    /// Sites left out by the base-risk threshold.
    #[serde(default)]
    pub skipped: usize,
}

impl SiteInput {
    fn observations(&self) -> Result<Vec<Observation>> {
        self.observations
            .iter()
            .map(|(raw_kind, value)| {
                let kind: ParameterKind = raw_kind.parse()?;
                let value = value.ok_or_else(|| FloodError::invalid_input(&kind, "value is missing"))?;
                Ok(Observation::new(kind, value))
            })
            .collect()
    }
}

/// Score one site.
pub fn evaluate_site(registry: &ProfileRegistry, site: &SiteInput) -> Result<RiskAssessment> {
    if let Some(base) = site.base_risk.filter(|b| !b.is_finite()) {
        return Err(FloodError::invalid_input("base_risk", format!("value is {base}")));
    }
    let observations = site.observations()?;
    score(registry, &observations)
}

/// Composite scaled by the site's base risk, when it has one.
pub fn weighted_score(base_risk: Option<f64>, assessment: &RiskAssessment) -> Option<f64> {
    base_risk.map(|base| base.max(0.0) * assessment.composite_score)
}

/// Whether a site passes the base-risk threshold. Sites without a base
/// risk only pass when no threshold is set.
fn above_threshold(site: &SiteInput, min_base_risk: Option<f64>) -> bool {
    match (min_base_risk, site.base_risk) {
        (None, _) => true,
        (Some(min), Some(base)) => base > min,
        (Some(_), None) => false,
    }
}

/// Score every site, collecting per-site failures instead of stopping.
pub fn evaluate_batch(registry: &ProfileRegistry, batch: &SiteBatch, min_base_risk: Option<f64>) -> BatchResult {
    let (selected, left_out): (Vec<&SiteInput>, Vec<&SiteInput>) = batch
        .sites
        .iter()
        .partition(|site| above_threshold(site, min_base_risk));
    for site in &left_out {
        log::debug!("site {}: base risk below threshold, skipped", site.id);
    }

    let sites: Vec<SiteResult> = selected
        .into_iter()
        .map(|site| {
            let (assessment, error) = match evaluate_site(registry, site) {
                Ok(a) => (Some(a), None),
                Err(e) => {
                    log::warn!("site {}: {e}", site.id);
                    (None, Some(e.to_string()))
                }
            };
            SiteResult {
                id: site.id.clone(),
                name: site.name.clone(),
                latitude: site.latitude,
                longitude: site.longitude,
                base_risk: site.base_risk,
                weighted_score: assessment.as_ref().and_then(|a| weighted_score(site.base_risk, a)),
                assessment,
                error,
            }
        })
        .collect();

    let band_counts = RiskBand::ALL
        .into_iter()
        .map(|band| BandCount {
            band,
            sites: sites.iter().filter(|s| s.band() == Some(band)).count(),
        })
        .collect();
    let errors = sites.iter().filter(|s| s.error.is_some()).count();

    BatchResult {
        sites,
        band_counts,
        errors,
        skipped: left_out.len(),
    }
}

pub fn load_batch(path: &Path) -> Result<SiteBatch> {
    error::parse_json(path)
}

pub fn run(
    registry: &ProfileRegistry,
    path: &Path,
    json: bool,
    top: usize,
    min_base_risk: Option<f64>,
    output: Option<&Path>,
) -> std::result::Result<(), Box<dyn Error>> {
    let batch = load_batch(path)?;
    let result = evaluate_batch(registry, &batch, min_base_risk);
    log::info!(
        "{}: {} sites scored, {} failed, {} skipped",
        path.display(),
        result.sites.len() - result.errors,
        result.errors,
        result.skipped
    );

    if let Some(out) = output {
        let content = serde_json::to_string_pretty(&result)?;
        std::fs::write(out, content).map_err(|source| FloodError::Io {
            path: out.to_path_buf(),
            source,
        })?;
    }

    if json {
        report::print_json(&result)?;
    } else {
        report::print_report(&result, top);
    }

    Ok(())
}

/// Deserialize a JSON object into ordered `(key, value)` pairs, keeping
/// repeated keys.
fn deserialize_pairs<'de, D>(deserializer: D) -> std::result::Result<Vec<(String, Option<f64>)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct PairsVisitor;

    impl<'de> Visitor<'de> for PairsVisitor {
        type Value = Vec<(String, Option<f64>)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping parameter kinds to numbers")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
            let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some(entry) = map.next_entry::<String, Option<f64>>()? {
                pairs.push(entry);
            }
            Ok(pairs)
        }
    }

    deserializer.deserialize_map(PairsVisitor)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
