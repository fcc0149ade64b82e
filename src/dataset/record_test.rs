use super::*;

fn raw_row(status: &str) -> serde_json::Value {
    serde_json::json!({
        "Blocks": "Kanke",
        "District": "Ranchi",
        "Achievement (Mar, 24) ": 96.3,
        "Achievement (Mar, 25) ": 105.8,
        "Change ": 9.5,
        "Absolute Rank (Mar, 24) ": 2,
        "Absolute Rank (Mar, 25) ": 1,
        "Absolute Score (Mar, 24) ": 82.0,
        "Absolute Score (Mar, 25) ": 88.9,
        "Achievement (Mar, 25 ) Status w.r.t. State Average (Mar,25 ) ": status
    })
}

#[test]
fn parse_maps_raw_headers_to_typed_fields() {
    let json = serde_json::Value::Array(vec![raw_row("Above")]).to_string();
    let records = parse_records(&json).unwrap();
    assert_eq!(records.len(), 1);

    let rec = &records[0];
    assert_eq!(rec.block, "Kanke");
    assert_eq!(rec.district, "Ranchi");
    assert!((rec.achievement_current - 105.8).abs() < f64::EPSILON);
    assert!((rec.achievement_prior - 96.3).abs() < f64::EPSILON);
    assert!((rec.change - 9.5).abs() < f64::EPSILON);
    assert_eq!(rec.rank_current, 1);
    assert_eq!(rec.rank_prior, 2);
    assert!((rec.score_current - 88.9).abs() < f64::EPSILON);
    assert!((rec.score_prior - 82.0).abs() < f64::EPSILON);
    assert_eq!(rec.status, StateAverageStatus::Above);
}

#[test]
fn parse_rejects_missing_header() {
    let mut row = raw_row("Above");
    row.as_object_mut().unwrap().remove("Change ");
    let json = serde_json::Value::Array(vec![row]).to_string();
    assert!(parse_records(&json).is_err());
}

#[test]
fn parse_rejects_trimmed_header_names() {
    // The source keys carry a trailing space; a trimmed key is a different column.
    let json = serde_json::json!([{
        "Blocks": "Kanke",
        "District": "Ranchi",
        "Achievement (Mar, 25)": 1.0
    }])
    .to_string();
    assert!(parse_records(&json).is_err());
}

#[test]
fn parse_empty_array_is_empty() {
    assert!(parse_records("[]").unwrap().is_empty());
}

#[test]
fn status_only_exact_above_is_above() {
    assert!(StateAverageStatus::from("Above".to_owned()).is_above());
    assert!(!StateAverageStatus::from("above".to_owned()).is_above());
    assert_eq!(StateAverageStatus::from("Below".to_owned()), StateAverageStatus::Below);
    assert_eq!(
        StateAverageStatus::from("Equal".to_owned()),
        StateAverageStatus::Other("Equal".to_owned())
    );
}

#[test]
fn status_serializes_as_label() {
    let json = serde_json::to_string(&StateAverageStatus::Other("N/A".into())).unwrap();
    assert_eq!(json, "\"N/A\"");
    assert_eq!(serde_json::to_string(&StateAverageStatus::Above).unwrap(), "\"Above\"");
}

#[test]
fn improvement_is_current_minus_prior() {
    let json = serde_json::Value::Array(vec![raw_row("Below")]).to_string();
    let rec = &parse_records(&json).unwrap()[0];
    assert!((rec.improvement() - (105.8 - 96.3)).abs() < 1e-9);
}
