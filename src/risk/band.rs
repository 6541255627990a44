use std::fmt;

use serde::{Deserialize, Serialize};

/// Qualitative severity band for a composite score, lowest first.
///
/// Thresholds:
///   <0.95        Below baseline
///   0.95-1.05    Baseline
///   1.05-1.5     Elevated
///   1.5-2.5      High
///   >=2.5        Severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    BelowBaseline,
    Baseline,
    Elevated,
    High,
    Severe,
}

/// Lower edge of each band above `BelowBaseline`, in ascending order.
pub const BASELINE_MIN: f64 = 0.95;
pub const ELEVATED_MIN: f64 = 1.05;
pub const HIGH_MIN: f64 = 1.5;
pub const SEVERE_MIN: f64 = 2.5;

impl RiskBand {
    pub const ALL: [RiskBand; 5] = [
        RiskBand::BelowBaseline,
        RiskBand::Baseline,
        RiskBand::Elevated,
        RiskBand::High,
        RiskBand::Severe,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BelowBaseline => "Below baseline",
            Self::Baseline => "Baseline",
            Self::Elevated => "Elevated",
            Self::High => "High",
            Self::Severe => "Severe",
        }
    }

    /// Bands that warrant an alert when a site enters or leaves them.
    pub fn is_alert_worthy(self) -> bool {
        self >= Self::Elevated
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a composite score to its band. Total over every `f64`: anything that
/// fails all the `<` comparisons (including NaN) lands in `Severe`.
pub fn score_to_band(score: f64) -> RiskBand {
    if score < BASELINE_MIN {
        RiskBand::BelowBaseline
    } else if score < ELEVATED_MIN {
        RiskBand::Baseline
    } else if score < HIGH_MIN {
        RiskBand::Elevated
    } else if score < SEVERE_MIN {
        RiskBand::High
    } else {
        RiskBand::Severe
    }
}

#[cfg(test)]
#[path = "band_test.rs"]
mod tests;
