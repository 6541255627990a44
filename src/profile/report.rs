use serde::Serialize;

use super::{ParameterProfile, ProfileRegistry};
use crate::report_helpers;

/// One table line. `kind` is the identifier `fl evaluate` accepts.
fn profile_row(p: &ParameterProfile, kind_width: usize, label_width: usize) -> String {
    format!(
        " {}  {}  {}  {:>9.2}  {:>9.2}  {:>6.2}  {:>6.2}  {}",
        report_helpers::pad_right(p.kind.as_str(), kind_width),
        report_helpers::pad_right(&p.label, label_width),
        report_helpers::pad_right(&p.unit, 7),
        p.x_min,
        p.x_max,
        p.m_min,
        p.m_max,
        if p.is_increasing() { "↑" } else { "↓" }
    )
}

/// Print the active profile table.
pub fn print_report(registry: &ProfileRegistry) {
    let kind_width = report_helpers::max_display_width(registry.iter().map(|p| p.kind.as_str()), 4);
    let label_width = report_helpers::max_display_width(registry.iter().map(|p| p.label.as_str()), 5);
    let separator = report_helpers::separator(kind_width + label_width + 59);

    println!("Parameter Profiles");
    println!("{separator}");
    println!(
        " {}  {}  {:<7}  {:>9}  {:>9}  {:>6}  {:>6}  Dir",
        report_helpers::pad_right("Kind", kind_width),
        report_helpers::pad_right("Label", label_width),
        "Unit",
        "x_min",
        "x_max",
        "m_min",
        "m_max"
    );
    println!("{separator}");

    for p in registry.iter() {
        println!("{}", profile_row(p, kind_width, label_width));
    }

    println!("{separator}");
    println!(" {} profiles. Values outside [x_min, x_max] are clipped.", registry.len());
}

#[derive(Serialize)]
struct JsonProfiles<'a> {
    profiles: Vec<&'a ParameterProfile>,
}

pub fn print_json(registry: &ProfileRegistry) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&JsonProfiles {
        profiles: registry.iter().collect(),
    })
}

#[cfg(test)]
#[path = "report_test.rs"]
mod tests;
