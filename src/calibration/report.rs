use super::CalibrationReport;
use crate::report_helpers;

/// Print the replay table, heaviest event first.
pub fn print_report(report: &CalibrationReport) {
    let width = report_helpers::max_display_width(report.rows.iter().map(|r| r.location), 8);
    let separator = report_helpers::separator(width + 48);

    println!("Rainfall Calibration (historical 24 h extremes)");
    println!("{separator}");
    println!(
        " {}  {:<10}  {:>8}  {:>7}  {:>10}",
        report_helpers::pad_right("Location", width),
        "Date",
        "mm/24h",
        "Clipped",
        "Multiplier"
    );
    println!("{separator}");

    for r in &report.rows {
        let marker = if r.saturated { " *" } else { "" };
        println!(
            " {}  {:<10}  {:>8.1}  {:>7.1}  {:>9.3}x{marker}",
            report_helpers::pad_right(r.location, width),
            r.date,
            r.rainfall_mm_24h,
            r.clipped_value,
            r.multiplier
        );
    }

    println!("{separator}");
    println!(
        " {} events, {} saturated (*), multipliers {:.3}..{:.3}, monotonic: {}",
        report.events,
        report.saturated,
        report.min_multiplier,
        report.max_multiplier,
        if report.monotonic { "yes" } else { "NO" }
    );
    println!(" Note: {}", report.caveat);
}

pub fn print_json(report: &CalibrationReport) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(report)
}
