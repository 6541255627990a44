//! Aggregation of an hourly forecast series into one observation set.
//!
//! Precipitation is summed over the window; relative humidity and soil
//! moisture are averaged. The default window is 6 hours, the basis of the
//! rainfall profile. Gaps are errors: a short series or a null/NaN hour is
//! never padded with a default value.

use std::collections::BTreeMap;
use std::error::Error;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{self, FloodError, Result};
use crate::profile::{ParameterKind, ProfileRegistry};
use crate::risk::{self, Observation, RiskAssessment, score};

/// Hours covered by the rainfall profile.
pub const DEFAULT_WINDOW_HOURS: usize = 6;

/// Input document: `{"hourly": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Forecast {
    pub hourly: HourlySeries,
}

/// Hourly values; a series left out of the document is not scored.
/// Open-Meteo names (`relative_humidity_2m`, `soil_moisture_0_to_7cm`) are
/// accepted as aliases. Any other key lands in `other` and is reported.
#[derive(Debug, Default, Deserialize)]
pub struct HourlySeries {
    #[serde(default)]
    pub precipitation: Option<Vec<Option<f64>>>,
    #[serde(default, alias = "relative_humidity_2m")]
    pub relative_humidity: Option<Vec<Option<f64>>>,
    #[serde(default, alias = "soil_moisture_0_to_7cm")]
    pub soil_moisture: Option<Vec<Option<f64>>>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl HourlySeries {
    /// Keys present in the document that are not scored. `time` is the
    /// timestamp axis and is not reported.
    pub fn ignored_series(&self) -> Vec<&str> {
        self.other
            .keys()
            .map(String::as_str)
            .filter(|k| *k != "time")
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowSummary {
    pub start: usize,
    pub hours: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rain_sum_mm: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity_avg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_moisture_avg: Option<f64>,
}

impl WindowSummary {
    pub fn observations(&self) -> Vec<Observation> {
        [
            (ParameterKind::Rainfall, self.rain_sum_mm),
            (ParameterKind::RelativeHumidity, self.humidity_avg),
            (ParameterKind::SoilMoisture, self.soil_moisture_avg),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|v| Observation::new(kind, v)))
        .collect()
    }
}

/// Values of one series inside `[start, start + hours)`, all present and finite.
fn window_values(
    kind: &ParameterKind,
    series: &[Option<f64>],
    start: usize,
    hours: usize,
) -> Result<Vec<f64>> {
    let end = start.saturating_add(hours);
    let slice = series.get(start..end).ok_or_else(|| {
        FloodError::invalid_input(
            kind,
            format!("window {start}..{end} runs past {} hourly values", series.len()),
        )
    })?;
    slice
        .iter()
        .enumerate()
        .map(|(i, v)| match v {
            Some(v) if v.is_finite() => Ok(*v),
            _ => Err(FloodError::invalid_input(
                kind,
                format!("hour {} has no usable value", start + i),
            )),
        })
        .collect()
}

pub fn aggregate(series: &HourlySeries, start: usize, hours: usize) -> Result<WindowSummary> {
    if hours == 0 {
        return Err(FloodError::invalid_input("window", "length must be at least one hour"));
    }

    let sum = |kind: ParameterKind, s: &Option<Vec<Option<f64>>>| -> Result<Option<f64>> {
        s.as_deref()
            .map(|values| window_values(&kind, values, start, hours).map(|v| v.iter().sum::<f64>()))
            .transpose()
    };
    let mean = |kind: ParameterKind, s: &Option<Vec<Option<f64>>>| -> Result<Option<f64>> {
        Ok(sum(kind, s)?.map(|total| total / hours as f64))
    };

    Ok(WindowSummary {
        start,
        hours,
        rain_sum_mm: sum(ParameterKind::Rainfall, &series.precipitation)?,
        humidity_avg: mean(ParameterKind::RelativeHumidity, &series.relative_humidity)?,
        soil_moisture_avg: mean(ParameterKind::SoilMoisture, &series.soil_moisture)?,
    })
}

/// Aggregate a window and score it.
pub fn evaluate(
    registry: &ProfileRegistry,
    series: &HourlySeries,
    start: usize,
    hours: usize,
) -> Result<(WindowSummary, RiskAssessment)> {
    let summary = aggregate(series, start, hours)?;
    for key in series.ignored_series() {
        log::warn!("hourly series {key:?} is not a scored parameter, ignoring it");
    }
    if hours != DEFAULT_WINDOW_HOURS {
        log::warn!(
            "window is {hours} h but the rainfall profile is calibrated per {DEFAULT_WINDOW_HOURS} h"
        );
    }
    let assessment = score(registry, &summary.observations())?;
    Ok((summary, assessment))
}

#[derive(Serialize)]
struct JsonWindow<'a> {
    window: &'a WindowSummary,
    assessment: &'a RiskAssessment,
}

pub fn run(
    registry: &ProfileRegistry,
    path: &Path,
    start: usize,
    hours: usize,
    json: bool,
) -> std::result::Result<(), Box<dyn Error>> {
    let forecast: Forecast = error::parse_json(path)?;
    let (summary, assessment) = evaluate(registry, &forecast.hourly, start, hours)?;

    if json {
        crate::report_helpers::print_json_stdout(&JsonWindow {
            window: &summary,
            assessment: &assessment,
        })?;
    } else {
        println!(
            "Forecast window: hours {}..{} ({} h)",
            summary.start,
            summary.start + summary.hours,
            summary.hours
        );
        risk::report::print_report(&assessment, registry);
    }

    Ok(())
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
