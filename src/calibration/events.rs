//! Historical 24-hour extreme-rainfall records used to calibrate the
//! rainfall profile.
//!
//! Totals are consumed as literal calibration input; they are reported over
//! 24 hours while the rainfall profile is defined per 6 hours. No conversion
//! is applied here (see `calibration::UNIT_CAVEAT`).

use chrono::NaiveDate;

/// One historical event: where, when, and how much rain fell in 24 hours.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoricalEvent {
    pub location: &'static str,
    pub date: NaiveDate,
    pub rainfall_mm_24h: f64,
}

/// (location, year, month, day, 24 h total in mm).
const RECORDS: [(&str, i32, u32, u32, f64); 24] = [
    ("Foc-Foc, La Réunion", 1966, 1, 8, 1825.0),
    ("Alishan, Taiwan", 2009, 8, 8, 1624.0),
    ("Cherrapunji, India", 1995, 6, 16, 1563.0),
    ("Baguio, Philippines", 1911, 7, 15, 1168.0),
    ("Alvin, Texas, USA", 1979, 7, 26, 1092.0),
    ("Mumbai (Santacruz), India", 2005, 7, 26, 944.0),
    ("Hakone, Japan", 2019, 10, 12, 922.5),
    ("Crohamhurst, Queensland, Australia", 1893, 2, 3, 907.0),
    ("Oliva, Valencia, Spain", 1987, 11, 3, 817.0),
    ("Chiva, Valencia, Spain", 2024, 10, 29, 771.0),
    ("Zagora, Greece", 2023, 9, 5, 754.0),
    ("Fort Lauderdale, Florida, USA", 2023, 4, 12, 658.0),
    ("Zhengzhou, Henan, China", 2021, 7, 20, 617.0),
    ("Tambaram, Chennai, India", 2015, 12, 1, 494.0),
    ("McEwen, Tennessee, USA", 2021, 8, 21, 432.0),
    ("Al-Bayda, Libya", 2023, 9, 10, 414.0),
    ("Seoul (Dongjak), South Korea", 2022, 8, 8, 381.5),
    ("Honister Pass, Cumbria, UK", 2015, 12, 5, 341.4),
    ("Zinnwald-Georgenfeld, Germany", 2002, 8, 12, 312.0),
    ("Petrópolis, Brazil", 2022, 2, 15, 258.0),
    ("Khatm Al Shakla, UAE", 2024, 4, 16, 254.8),
    ("Auckland, New Zealand", 2023, 1, 27, 249.0),
    ("New York (Central Park), USA", 2021, 9, 1, 181.0),
    (DRY_CONTROL, 2024, 7, 1, 0.0),
];

/// Location of the dry-day control record.
pub const DRY_CONTROL: &str = "Dry-day control";

/// The full calibration table, in the order above (descending rainfall).
pub fn historical_events() -> Vec<HistoricalEvent> {
    RECORDS
        .iter()
        .filter_map(|&(location, y, m, d, rainfall_mm_24h)| {
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(HistoricalEvent {
                location,
                date,
                rainfall_mm_24h,
            })
        })
        .collect()
}
