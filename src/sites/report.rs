use super::{BatchResult, SiteResult};
use crate::report_helpers;

/// Print the highest-scoring `top` sites, then failures and band counts.
pub fn print_report(result: &BatchResult, top: usize) {
    let mut scored: Vec<&SiteResult> = result.sites.iter().filter(|s| s.assessment.is_some()).collect();
    scored.sort_by(|a, b| {
        let composite = |s: &SiteResult| s.assessment.as_ref().map_or(0.0, |x| x.composite_score);
        composite(*b)
            .total_cmp(&composite(*a))
            .then_with(|| a.id.cmp(&b.id))
    });
    scored.truncate(top);

    let width = report_helpers::max_display_width(scored.iter().map(|s| s.display_name()), 4);
    let separator = report_helpers::separator(width + 45);

    println!("Site Flood Risk");
    println!("{separator}");
    println!(
        " {}  {:>9}  {:>9}  {:<15}",
        report_helpers::pad_right("Site", width),
        "Composite",
        "Weighted",
        "Band"
    );
    println!("{separator}");

    for site in &scored {
        if let Some(a) = &site.assessment {
            let weighted = site.weighted_score.map_or("-".to_string(), |w| format!("{w:.3}"));
            println!(
                " {}  {:>9.3}  {:>9}  {:<15}",
                report_helpers::pad_right(site.display_name(), width),
                a.composite_score,
                weighted,
                a.band.as_str()
            );
        }
    }
    println!("{separator}");

    let failed: Vec<&SiteResult> = result.sites.iter().filter(|s| s.error.is_some()).collect();
    if !failed.is_empty() {
        println!();
        println!(" Failed sites");
        println!("{separator}");
        for site in failed {
            println!(
                " {}  {}",
                site.display_name(),
                site.error.as_deref().unwrap_or_default()
            );
        }
        println!("{separator}");
    }

    let counts: Vec<String> = result
        .band_counts
        .iter()
        .filter(|c| c.sites > 0)
        .map(|c| format!("{}: {}", c.band, c.sites))
        .collect();
    println!(
        " {} sites, {} failed, {} below base-risk threshold. {}",
        result.sites.len(),
        result.errors,
        result.skipped,
        counts.join(", ")
    );
}

pub fn print_json(result: &BatchResult) -> Result<(), Box<dyn std::error::Error>> {
    report_helpers::print_json_stdout(result)
}
