use super::scoring::RiskAssessment;
use crate::profile::ProfileRegistry;
use crate::report_helpers;

/// Print one assessment: a row per observable, then the composite and band.
pub fn print_report(assessment: &RiskAssessment, registry: &ProfileRegistry) {
    let separator = report_helpers::separator(60);
    let labels: Vec<&str> = assessment
        .observations
        .iter()
        .map(|o| registry.get(&o.kind).map_or(o.kind.as_str(), |p| p.label.as_str()))
        .collect();
    let width = report_helpers::max_display_width(labels.iter().copied(), 9);

    println!("Flood Risk Assessment");
    println!("{separator}");
    println!(
        " {}  {:>10}  {:<7}  {:>10}",
        report_helpers::pad_right("Parameter", width),
        "Clipped",
        "Unit",
        "Multiplier"
    );
    println!("{separator}");

    for (obs, label) in assessment.observations.iter().zip(&labels) {
        let unit = registry.get(&obs.kind).map_or("", |p| p.unit.as_str());
        println!(
            " {}  {:>10.2}  {}  {:>9.3}x",
            report_helpers::pad_right(label, width),
            obs.clipped_value,
            report_helpers::pad_right(unit, 7),
            obs.multiplier
        );
    }

    println!("{separator}");
    println!(" Composite score: {:.3}", assessment.composite_score);
    println!(" Risk band:       {}", assessment.band);
    println!("{separator}");
}

pub fn print_json(assessment: &RiskAssessment) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(assessment)
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
