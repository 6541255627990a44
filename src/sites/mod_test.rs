use super::*;
use std::fs;

const SAMPLE: &str = r#"{
  "sites": [
    {
      "id": "mad-001",
      "name": "Arroyo del Culebro",
      "latitude": 40.3,
      "longitude": -3.75,
      "observations": { "rainfall": 150.0, "soil_moisture": 0.6, "relative_humidity": 100.0 }
    },
    {
      "id": "mad-002",
      "observations": { "rainfall": 0.0, "soil_moisture": 0.0, "relative_humidity": 30.0 }
    },
    {
      "id": "mad-003",
      "name": "Sensor fault",
      "observations": { "rainfall": null }
    },
    {
      "id": "mad-004",
      "observations": { "rainfall": 10.0, "rainfall": 20.0 }
    },
    {
      "id": "mad-005",
      "observations": { "temperature": 21.0 }
    }
  ]
}"#;

fn sample_batch() -> SiteBatch {
    serde_json::from_str(SAMPLE).unwrap()
}

#[test]
fn parses_sites_and_keeps_repeated_keys() {
    let batch = sample_batch();
    assert_eq!(batch.sites.len(), 5);
    assert_eq!(batch.sites[0].name.as_deref(), Some("Arroyo del Culebro"));
    assert_eq!(batch.sites[3].observations.len(), 2);
}

#[test]
fn scores_valid_sites() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &sample_batch(), None);
    let first = result.sites[0].assessment.as_ref().unwrap();
    assert!((first.composite_score - 3.675).abs() < 1e-12);
    assert_eq!(first.band, RiskBand::Severe);
    let second = result.sites[1].assessment.as_ref().unwrap();
    assert!((second.composite_score - 0.152).abs() < 1e-12);
}

#[test]
fn failures_are_per_site() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &sample_batch(), None);
    assert_eq!(result.errors, 3);
    let missing = result.sites[2].error.as_deref().unwrap();
    assert!(missing.contains("missing"), "got {missing}");
    let dup = result.sites[3].error.as_deref().unwrap();
    assert!(dup.contains("duplicate parameter"), "got {dup}");
    let unknown = result.sites[4].error.as_deref().unwrap();
    assert!(unknown.contains("unknown parameter kind"), "got {unknown}");
    assert!(result.sites[4].assessment.is_none());
}

#[test]
fn band_counts_cover_every_band() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &sample_batch(), None);
    assert_eq!(result.band_counts.len(), RiskBand::ALL.len());
    let count = |band| {
        result
            .band_counts
            .iter()
            .find(|c| c.band == band)
            .map(|c| c.sites)
            .unwrap()
    };
    assert_eq!(count(RiskBand::Severe), 1);
    assert_eq!(count(RiskBand::BelowBaseline), 1);
    assert_eq!(count(RiskBand::High), 0);
}

#[test]
fn result_round_trips_through_json() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &sample_batch(), None);
    let json = serde_json::to_string(&result).unwrap();
    let back: BatchResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back.sites.len(), result.sites.len());
    assert_eq!(back.sites[0].band(), Some(RiskBand::Severe));
    assert_eq!(back.sites[2].band(), None);
}

#[test]
fn display_name_falls_back_to_id() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &sample_batch(), None);
    assert_eq!(result.sites[0].display_name(), "Arroyo del Culebro");
    assert_eq!(result.sites[1].display_name(), "mad-002");
}

#[test]
fn observations_must_be_an_object() {
    let err = serde_json::from_str::<SiteBatch>(r#"{"sites":[{"id":"x","observations":[1,2]}]}"#)
        .unwrap_err();
    assert!(err.to_string().contains("object"), "got {err}");
}

#[test]
fn run_reads_file_and_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sites.json");
    let output = dir.path().join("scored.json");
    fs::write(&input, SAMPLE).unwrap();
    run(&ProfileRegistry::builtin(), &input, false, 10, None, Some(&output)).unwrap();
    let written: BatchResult = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.sites.len(), 5);
    assert_eq!(written.errors, 3);
}

#[test]
fn run_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sites.json");
    fs::write(&input, SAMPLE).unwrap();
    run(&ProfileRegistry::builtin(), &input, true, 10, None, None).unwrap();
}

#[test]
fn run_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(&ProfileRegistry::builtin(), &dir.path().join("nope.json"), false, 10, None, None)
        .unwrap_err();
    assert!(err.to_string().contains("nope.json"));
}

const WEIGHTED: &str = r#"{
  "sites": [
    { "id": "gis-high", "base_risk": 9.2, "observations": { "rainfall": 150.0 } },
    { "id": "gis-low", "base_risk": 4.0, "observations": { "rainfall": 150.0 } },
    { "id": "gis-edge", "base_risk": 8.5, "observations": { "rainfall": 150.0 } },
    { "id": "no-base", "observations": { "rainfall": 150.0 } },
    { "id": "negative", "base_risk": -3.0, "observations": { "rainfall": 150.0 } }
  ]
}"#;

fn weighted_batch() -> SiteBatch {
    serde_json::from_str(WEIGHTED).unwrap()
}

#[test]
fn weighted_score_scales_composite_by_base_risk() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &weighted_batch(), None);
    let high = &result.sites[0];
    assert_eq!(high.base_risk, Some(9.2));
    assert_eq!(high.assessment.as_ref().unwrap().composite_score, 2.5);
    assert!((high.weighted_score.unwrap() - 23.0).abs() < 1e-12);
    assert_eq!(result.sites[3].weighted_score, None);
    assert_eq!(result.sites[4].weighted_score, Some(0.0));
    assert_eq!(result.skipped, 0);
}

#[test]
fn threshold_keeps_only_sites_strictly_above() {
    let result = evaluate_batch(&ProfileRegistry::builtin(), &weighted_batch(), Some(8.5));
    let ids: Vec<&str> = result.sites.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["gis-high"]);
    assert_eq!(result.skipped, 4);
    assert_eq!(result.errors, 0);
}

#[test]
fn non_finite_base_risk_fails_the_site() {
    let site = SiteInput {
        id: "bad".into(),
        name: None,
        latitude: None,
        longitude: None,
        base_risk: Some(f64::NAN),
        observations: vec![("rainfall".into(), Some(10.0))],
    };
    let err = evaluate_site(&ProfileRegistry::builtin(), &site).unwrap_err();
    assert!(err.to_string().contains("base_risk"), "got {err}");
}

#[test]
fn run_with_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sites.json");
    let output = dir.path().join("scored.json");
    fs::write(&input, WEIGHTED).unwrap();
    run(&ProfileRegistry::builtin(), &input, false, 10, Some(8.5), Some(&output)).unwrap();
    let written: BatchResult = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written.sites.len(), 1);
    assert_eq!(written.skipped, 4);
}
