use std::collections::BTreeMap;
use std::fs;

use super::*;
use crate::profile::{ParameterKind, ProfileRegistry};
use crate::risk::{Observation, score};

/// A scored site whose only observation is rainfall.
fn site(id: &str, rainfall: f64) -> SiteResult {
    let assessment = score(
        &ProfileRegistry::builtin(),
        &[Observation::new(ParameterKind::Rainfall, rainfall)],
    )
    .unwrap();
    SiteResult {
        id: id.to_string(),
        name: None,
        latitude: None,
        longitude: None,
        base_risk: None,
        weighted_score: None,
        assessment: Some(assessment),
        error: None,
    }
}

fn failed(id: &str) -> SiteResult {
    SiteResult {
        id: id.to_string(),
        name: None,
        latitude: None,
        longitude: None,
        base_risk: None,
        weighted_score: None,
        assessment: None,
        error: Some("value is missing".to_string()),
    }
}

fn batch(sites: Vec<SiteResult>) -> BatchResult {
    BatchResult {
        sites,
        band_counts: vec![],
        errors: 0,
        skipped: 0,
    }
}

// rainfall → band with the built-in profile:
//   10 mm → 0.353 BelowBaseline, 70 mm → 1.273 Elevated,
//   110 mm → 1.887 High, 150 mm → 2.5 Severe
fn changes(before: Vec<SiteResult>, after: Vec<SiteResult>, policy: AlertPolicy) -> BTreeMap<String, ChangeKind> {
    compare(&batch(before), &batch(after), policy)
        .into_iter()
        .map(|t| (t.id, t.change))
        .collect()
}

#[test]
fn new_site_at_alert_band_is_reported() {
    let c = changes(vec![], vec![site("a", 110.0)], AlertPolicy::default());
    assert_eq!(c.get("a"), Some(&ChangeKind::New));
}

#[test]
fn new_site_below_alert_band_is_silent() {
    let c = changes(vec![], vec![site("a", 10.0)], AlertPolicy::default());
    assert!(c.is_empty());
}

#[test]
fn steady_band_is_silent() {
    let c = changes(vec![site("a", 150.0)], vec![site("a", 400.0)], AlertPolicy::default());
    assert!(c.is_empty());
}

#[test]
fn upgrade_into_alert_band() {
    let c = changes(vec![site("a", 10.0)], vec![site("a", 70.0)], AlertPolicy::default());
    assert_eq!(c.get("a"), Some(&ChangeKind::Upgrade));
}

#[test]
fn downgrade_from_alert_band() {
    let c = changes(vec![site("a", 150.0)], vec![site("a", 10.0)], AlertPolicy::default());
    assert_eq!(c.get("a"), Some(&ChangeKind::Downgrade));
}

#[test]
fn policy_can_silence_each_direction() {
    let quiet = AlertPolicy {
        on_upgrades: false,
        on_downgrades: false,
    };
    let c = changes(
        vec![site("up", 10.0), site("down", 150.0)],
        vec![site("up", 150.0), site("down", 10.0)],
        quiet,
    );
    assert!(c.is_empty());
}

#[test]
fn transition_records_before_and_after() {
    let t = compare(
        &batch(vec![site("a", 70.0)]),
        &batch(vec![site("a", 110.0)]),
        AlertPolicy::default(),
    );
    assert_eq!(t.len(), 1);
    assert_eq!(t[0].before, Some(RiskBand::Elevated));
    assert_eq!(t[0].after, RiskBand::High);
    assert!(t[0].before_score.unwrap() < t[0].after_score);
}

#[test]
fn failed_sites_are_ignored_on_both_sides() {
    let c = changes(
        vec![failed("a"), site("b", 150.0)],
        vec![site("a", 150.0), failed("b")],
        AlertPolicy::default(),
    );
    assert!(c.is_empty(), "got {c:?}");
}

#[test]
fn output_is_ordered_by_id() {
    let t = compare(
        &batch(vec![]),
        &batch(vec![site("zeta", 150.0), site("alpha", 150.0), site("mid", 110.0)]),
        AlertPolicy::default(),
    );
    let ids: Vec<&str> = t.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["alpha", "mid", "zeta"]);
}

#[test]
fn run_reads_two_batch_files() {
    let dir = tempfile::tempdir().unwrap();
    let before = dir.path().join("before.json");
    let after = dir.path().join("after.json");
    fs::write(&before, serde_json::to_string(&batch(vec![site("a", 10.0)])).unwrap()).unwrap();
    fs::write(&after, serde_json::to_string(&batch(vec![site("a", 150.0)])).unwrap()).unwrap();
    run(&before, &after, false, AlertPolicy::default()).unwrap();
    run(&before, &after, true, AlertPolicy::default()).unwrap();
}

#[test]
fn print_report_empty_does_not_panic() {
    report::print_report(&[]);
}

#[test]
fn duplicate_ids_are_detected() {
    let b = batch(vec![site("a", 10.0), site("b", 10.0), site("a", 150.0), failed("b"), site("c", 1.0)]);
    assert_eq!(duplicate_ids(&b), ["a", "b"]);
    assert!(duplicate_ids(&batch(vec![site("a", 10.0)])).is_empty());
}

#[test]
fn duplicate_id_uses_the_last_site() {
    let c = changes(
        vec![],
        vec![site("a", 150.0), site("a", 10.0)],
        AlertPolicy::default(),
    );
    assert!(c.is_empty(), "got {c:?}");
}
