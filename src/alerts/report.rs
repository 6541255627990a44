//! Table and JSON output for band transitions.
//! Upgrades are red, downgrades green, new alerts yellow.

use super::{BandTransition, ChangeKind};
use crate::report_helpers;

// ANSI color codes.
const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn colored_change(change: ChangeKind) -> String {
    let color = match change {
        ChangeKind::New => YELLOW,
        ChangeKind::Upgrade => RED,
        ChangeKind::Downgrade => GREEN,
    };
    format!("{color}{:<9}{RESET}", change.as_str())
}

pub fn print_report(transitions: &[BandTransition]) {
    if transitions.is_empty() {
        println!("No alert-worthy band transitions.");
        return;
    }

    let width = report_helpers::max_display_width(
        transitions
            .iter()
            .map(|t| t.name.as_deref().unwrap_or(&t.id)),
        4,
    );
    let separator = report_helpers::separator(width + 50);

    println!("Band Transitions");
    println!("{separator}");
    println!(
        " {}  {:<9}  {:<14}    {:<14}",
        report_helpers::pad_right("Site", width),
        "Change",
        "Before",
        "After"
    );
    println!("{separator}");

    for t in transitions {
        let before = t.before.map_or("-", |b| b.as_str());
        println!(
            " {}  {}  {:<14} →  {:<14} ({:.3})",
            report_helpers::pad_right(t.name.as_deref().unwrap_or(&t.id), width),
            colored_change(t.change),
            before,
            t.after.as_str(),
            t.after_score
        );
    }

    println!("{separator}");
    println!(" {} transitions", transitions.len());
}

pub fn print_json(transitions: &[BandTransition]) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(&transitions)
}
