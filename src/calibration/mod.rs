//! Replay of historical 24-hour rainfall extremes through the rainfall
//! profile.
//!
//! The harness checks that the envelope saturates for every documented
//! extreme, that the dry-day control sits at the floor, and that ranking
//! events by rainfall never ranks their multipliers the other way round.

mod events;
mod report;

use std::error::Error;

use serde::Serialize;

use crate::error::Result;
use crate::profile::{ParameterKind, ProfileRegistry};
use crate::risk::normalize;

pub use events::{HistoricalEvent, historical_events};

/// The rainfall profile is per 6 hours; the table reports 24-hour totals.
/// Totals are fed in as-is, so every realistic extreme clips at the ceiling.
pub const UNIT_CAVEAT: &str = "Historical totals are 24 h; the rainfall profile is per 6 h. \
Totals are not converted, so extremes are expected to saturate.";

/// One replayed event.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationRow {
    pub location: &'static str,
    pub date: String,
    pub rainfall_mm_24h: f64,
    pub clipped_value: f64,
    pub multiplier: f64,
    pub saturated: bool,
}

/// Outcome of replaying the whole table.
#[derive(Debug, Clone, Serialize)]
pub struct CalibrationReport {
    pub rows: Vec<CalibrationRow>,
    pub events: usize,
    pub saturated: usize,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
    /// Ordering events by rainfall moves the multiplier in the profile's
    /// direction only.
    pub monotonic: bool,
    pub caveat: &'static str,
}

/// Normalize every event's 24 h total as a rainfall observation.
pub fn replay(registry: &ProfileRegistry, events: &[HistoricalEvent]) -> Result<CalibrationReport> {
    let rainfall = registry.get(&ParameterKind::Rainfall);
    let ceiling = rainfall.map_or(f64::INFINITY, |p| p.x_max);
    let increasing = rainfall.is_none_or(|p| p.is_increasing());

    let mut rows = events
        .iter()
        .map(|event| {
            let scored = normalize(registry, &ParameterKind::Rainfall, event.rainfall_mm_24h)?;
            Ok(CalibrationRow {
                location: event.location,
                date: event.date.format("%Y-%m-%d").to_string(),
                rainfall_mm_24h: event.rainfall_mm_24h,
                clipped_value: scored.clipped_value,
                multiplier: scored.multiplier,
                saturated: scored.clipped_value >= ceiling,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| b.rainfall_mm_24h.total_cmp(&a.rainfall_mm_24h));
    // rows run from heaviest to lightest rainfall
    let monotonic = rows.windows(2).all(|w| {
        if increasing {
            w[0].multiplier >= w[1].multiplier
        } else {
            w[0].multiplier <= w[1].multiplier
        }
    });
    let multipliers = rows.iter().map(|r| r.multiplier);
    let min_multiplier = multipliers.clone().fold(f64::INFINITY, f64::min);
    let max_multiplier = multipliers.fold(f64::NEG_INFINITY, f64::max);

    Ok(CalibrationReport {
        events: rows.len(),
        saturated: rows.iter().filter(|r| r.saturated).count(),
        min_multiplier,
        max_multiplier,
        monotonic,
        caveat: UNIT_CAVEAT,
        rows,
    })
}

pub fn run(registry: &ProfileRegistry, json: bool) -> std::result::Result<(), Box<dyn Error>> {
    let report = replay(registry, &historical_events())?;
    if !report.monotonic {
        log::warn!("rainfall multipliers are not monotonic over the historical table");
    }

    if json {
        report::print_json(&report)?;
    } else {
        report::print_report(&report);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
