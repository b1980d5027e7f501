//! Tests for matcher module

use super::*;
use crate::error::Error;
use crate::record::{Record, Value};
use crate::schema::{Column, ColumnType, Schema};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_case::test_case;

fn schema(name: &str, columns: Vec<Column>) -> Schema {
    Schema::builder(name).columns(columns).build().unwrap()
}

fn abc(name: &str) -> Schema {
    schema(
        name,
        vec![
            Column::fixed_point("a"),
            Column::floating_point("b"),
            Column::text("c"),
        ],
    )
}

fn ab(name: &str) -> Schema {
    schema(
        name,
        vec![Column::fixed_point("a"), Column::floating_point("b")],
    )
}

fn row(values: Vec<Value>) -> Record {
    values
}

fn mismatch_column(err: &Error) -> &str {
    match err {
        Error::SchemaMismatch { column, .. } => column,
        other => panic!("expected schema mismatch, got {other}"),
    }
}

// ============================================================================
// NameMatcher Scenarios
// ============================================================================

#[test]
fn test_same_schema_copies_values() {
    let matcher = NameMatcher::new(abc("FROM-1"), abc("TO-1"));
    let out = matcher
        .reconcile(row(vec![1.into(), 2.0.into(), "x".into()]))
        .unwrap();

    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0), Value::from("x")]);
}

#[test]
fn test_extra_nullable_destination_column_is_null_filled() {
    let matcher = NameMatcher::new(ab("FROM-2"), abc("TO-1"));
    let out = matcher.reconcile(row(vec![1.into(), 2.0.into()])).unwrap();

    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0), Value::Null]);
}

#[test]
fn test_extra_source_column_is_dropped() {
    let matcher = NameMatcher::new(abc("FROM-1"), ab("TO-2"));
    let out = matcher
        .reconcile(row(vec![1.into(), 2.0.into(), "x".into()]))
        .unwrap();

    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0)]);
}

#[test]
fn test_missing_non_nullable_column_is_rejected() {
    let from = schema("FROM", vec![Column::fixed_point("a")]);
    let to = schema(
        "TO",
        vec![
            Column::fixed_point("a"),
            Column::not_null("z", ColumnType::Text),
        ],
    );
    let matcher = NameMatcher::new(from, to);

    let err = matcher.reconcile(row(vec![1.into()])).unwrap_err();
    assert!(err.is_schema_mismatch());
    assert_eq!(mismatch_column(&err), "z");
    assert!(err.to_string().contains("'TO'"));
}

#[test]
fn test_both_empty_passes_through() {
    let matcher = NameMatcher::new(Schema::empty("FROM-EMPTY"), Schema::empty("TO-EMPTY"));
    let blob = Value::Binary(b"\"It has no structure.\"".to_vec());

    let out = matcher.reconcile(row(vec![blob.clone()])).unwrap();
    assert_eq!(out, vec![blob]);
}

#[test]
fn test_empty_destination_passes_through_any_shape() {
    let matcher = NameMatcher::new(abc("FROM-1"), Schema::empty("TO-EMPTY"));
    let input = row(vec![1.into(), "only two".into()]);

    assert_eq!(matcher.reconcile(input.clone()).unwrap(), input);
    assert_eq!(matcher.reconcile(Vec::new()).unwrap(), Vec::<Value>::new());
}

#[test]
fn test_empty_destination_keeps_source_null_token() {
    let config = MatcherConfig::default().with_null_token("NULL");
    let matcher = select_matcher_with(abc("FROM-1"), Schema::empty("TO"), &config);
    let input = row(vec!["NULL".into()]);

    assert_eq!(matcher.reconcile(input.clone()).unwrap(), input);
}

#[test]
fn test_empty_source_all_nullable_destination_succeeds() {
    let matcher = NameMatcher::new(Schema::empty("FROM-EMPTY"), abc("TO-1"));
    let out = matcher.reconcile(row(vec!["blob".into()])).unwrap();

    assert_eq!(out, vec![Value::Null, Value::Null, Value::Null]);
}

#[test]
fn test_empty_source_non_nullable_destination_fails() {
    let to = schema(
        "TO",
        vec![Column::text("x"), Column::not_null("id", ColumnType::FixedPoint)],
    );
    let matcher = NameMatcher::new(Schema::empty("FROM-EMPTY"), to);

    let err = matcher.reconcile(row(vec!["blob".into()])).unwrap_err();
    assert_eq!(mismatch_column(&err), "id");
}

#[test]
fn test_reordered_columns_match_by_name() {
    let from = schema(
        "FROM",
        vec![Column::text("c"), Column::fixed_point("a"), Column::floating_point("b")],
    );
    let matcher = NameMatcher::new(from, abc("TO"));

    let out = matcher
        .reconcile(row(vec!["x".into(), 1.into(), 2.0.into()]))
        .unwrap();
    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0), Value::from("x")]);
}

#[test]
fn test_short_record_falls_back_to_null_fill() {
    let matcher = NameMatcher::new(abc("FROM"), abc("TO"));

    let out = matcher.reconcile(row(vec![1.into()])).unwrap();
    assert_eq!(out, vec![Value::Integer(1), Value::Null, Value::Null]);
}

#[test]
fn test_short_record_rejects_non_nullable() {
    let to = schema(
        "TO",
        vec![Column::fixed_point("a"), Column::not_null("b", ColumnType::FloatingPoint)],
    );
    let matcher = NameMatcher::new(ab("FROM"), to);

    let err = matcher.reconcile(row(vec![1.into()])).unwrap_err();
    assert_eq!(mismatch_column(&err), "b");
}

#[test]
fn test_source_null_copied_into_non_nullable_column() {
    // A present source null is a match, not an unexpected column
    let to = schema("TO", vec![Column::not_null("a", ColumnType::FixedPoint)]);
    let matcher = NameMatcher::new(ab("FROM"), to);

    let out = matcher.reconcile(row(vec![Value::Null, 2.0.into()])).unwrap();
    assert_eq!(out, vec![Value::Null]);
}

#[test]
fn test_null_token_maps_to_canonical_null() {
    let config = MatcherConfig::default().with_null_token("NULL");
    let matcher = select_matcher_with(abc("FROM"), abc("TO"), &config);

    let out = matcher
        .reconcile(row(vec![1.into(), Value::Null, "NULL".into()]))
        .unwrap();
    assert_eq!(out, vec![Value::Integer(1), Value::Null, Value::Null]);
}

#[test]
fn test_without_null_token_text_is_kept() {
    let matcher = select_matcher(abc("FROM"), abc("TO"));

    let out = matcher
        .reconcile(row(vec![1.into(), 2.0.into(), "NULL".into()]))
        .unwrap();
    assert_eq!(out[2], Value::from("NULL"));
}

// Parameterized over the schema pairs of the end-to-end matching job
#[test_case(Schema::empty("FROM-EMPTY"), Schema::empty("TO-EMPTY"), true ; "both empty")]
#[test_case(abc("FROM-1"), Schema::empty("TO-EMPTY"), true ; "destination empty")]
#[test_case(Schema::empty("FROM-EMPTY"), abc("TO-1"), true ; "source empty nullable destination")]
#[test_case(abc("FROM-1"), abc("TO-1"), true ; "same schema")]
#[test_case(ab("FROM-2"), abc("TO-1"), true ; "destination wider")]
#[test_case(abc("FROM-1"), ab("TO-2"), true ; "destination narrower")]
#[test_case(abc("FROM-1"), strict("TO-4"), false ; "required destination column missing")]
#[test_case(Schema::empty("FROM-EMPTY"), strict("TO-4"), false ; "source empty required destination")]
fn test_schema_pairs(from: Schema, to: Schema, succeeds: bool) {
    let to_len = to.len();
    let matcher = select_matcher(from, to);
    let input = row(vec![1.into(), 1.0.into(), "1".into()]);

    let result = matcher.reconcile(input.clone());
    assert_eq!(result.is_ok(), succeeds);

    match result {
        Ok(out) if to_len == 0 => assert_eq!(out, input),
        Ok(out) => assert_eq!(out.len(), to_len),
        Err(err) => assert_eq!(mismatch_column(&err), "z"),
    }
}

fn strict(name: &str) -> Schema {
    schema(
        name,
        vec![Column::fixed_point("a"), Column::not_null("z", ColumnType::Text)],
    )
}

// ============================================================================
// Null-fill helper
// ============================================================================

#[test]
fn test_fill_null_writes_exactly_one_slot() {
    let to = abc("TO");
    let mut out = vec![Value::Integer(7), Value::Integer(8), Value::Integer(9)];

    fill_null_for_unexpected_column(&to.columns()[1], &to, &mut out, 1).unwrap();
    assert_eq!(out, vec![Value::Integer(7), Value::Null, Value::Integer(9)]);
}

#[test]
fn test_fill_null_rejects_non_nullable() {
    let to = schema("TO", vec![Column::not_null("id", ColumnType::FixedPoint)]);
    let mut out = vec![Value::Integer(7)];

    let err = fill_null_for_unexpected_column(&to.columns()[0], &to, &mut out, 0).unwrap_err();
    assert_eq!(mismatch_column(&err), "id");
    assert_eq!(out, vec![Value::Integer(7)]);
}

// ============================================================================
// LocationMatcher
// ============================================================================

#[test]
fn test_location_matches_by_position() {
    let from = schema("FROM", vec![Column::fixed_point("x"), Column::floating_point("y")]);
    let matcher = LocationMatcher::new(from, ab("TO"));

    let out = matcher.reconcile(row(vec![1.into(), 2.0.into()])).unwrap();
    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0)]);
    assert_eq!(matcher.strategy(), MatchStrategy::Location);
}

#[test]
fn test_location_null_fills_trailing_columns() {
    let matcher = LocationMatcher::new(ab("FROM"), abc("TO"));

    let out = matcher.reconcile(row(vec![1.into(), 2.0.into()])).unwrap();
    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0), Value::Null]);
}

#[test]
fn test_location_drops_extra_values_and_rejects_missing() {
    let matcher = LocationMatcher::new(abc("FROM"), ab("TO"));
    let out = matcher
        .reconcile(row(vec![1.into(), 2.0.into(), "x".into()]))
        .unwrap();
    assert_eq!(out.len(), 2);

    let to = schema("TO", vec![Column::fixed_point("a"), Column::not_null("b", ColumnType::Text)]);
    let matcher = LocationMatcher::new(ab("FROM"), to);
    let err = matcher.reconcile(row(vec![1.into()])).unwrap_err();
    assert_eq!(mismatch_column(&err), "b");
}

#[test]
fn test_location_empty_destination_passes_through() {
    let matcher = LocationMatcher::new(abc("FROM"), Schema::empty("TO"));
    let input = row(vec!["raw".into()]);
    assert_eq!(matcher.reconcile(input.clone()).unwrap(), input);
}

// ============================================================================
// Selection & Plan
// ============================================================================

#[test]
fn test_select_matcher_defaults_to_name() {
    let matcher = select_matcher(Schema::empty("F"), Schema::empty("T"));
    assert_eq!(matcher.strategy(), MatchStrategy::Name);
    assert_eq!(matcher.from_schema().name(), "F");
    assert_eq!(matcher.to_schema().name(), "T");
}

#[test]
fn test_select_matcher_with_location() {
    let config = MatcherConfig::new(MatchStrategy::Location);
    let matcher = select_matcher_with(ab("F"), ab("T"), &config);
    assert_eq!(matcher.strategy(), MatchStrategy::Location);
}

#[test]
fn test_matcher_config_deserialize() {
    let config: MatcherConfig = serde_yaml::from_str("strategy: location\nnull_token: \"\\\\N\"").unwrap();
    assert_eq!(config.strategy, MatchStrategy::Location);
    assert_eq!(config.null_token.as_deref(), Some("\\N"));

    let config: MatcherConfig = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config, MatcherConfig::default());
}

#[test]
fn test_name_plan() {
    let to = schema(
        "TO",
        vec![
            Column::text("c"),
            Column::fixed_point("a"),
            Column::text("note"),
            Column::not_null("z", ColumnType::Text),
        ],
    );
    let matcher = NameMatcher::new(abc("FROM"), to);
    let plan = matcher.plan();

    assert_eq!(
        plan.iter().map(|r| r.resolution).collect::<Vec<_>>(),
        vec![
            Resolution::Copy { source_position: 2 },
            Resolution::Copy { source_position: 0 },
            Resolution::NullFill,
            Resolution::Reject,
        ]
    );
    assert!(plan[3].is_rejected());
    assert_eq!(plan[3].to_string(), "[3] z REJECTED (not nullable, no source value)");
    assert_eq!(plan[0].to_string(), "[0] c <- source[2]");
}

#[test]
fn test_plan_empty_destination_is_empty() {
    let matcher = NameMatcher::new(abc("FROM"), Schema::empty("TO"));
    assert!(matcher.plan().is_empty());
}

#[test]
fn test_location_plan() {
    let matcher = LocationMatcher::new(ab("FROM"), abc("TO"));
    let plan = matcher.plan();

    assert_eq!(plan[1].resolution, Resolution::Copy { source_position: 1 });
    assert_eq!(plan[2].resolution, Resolution::NullFill);
}

/// Reconcile `input` and check every output slot against the plan
fn assert_plan_agrees(matcher: &dyn Matcher, input: &Record) {
    let plan = matcher.plan();
    let result = matcher.reconcile(input.clone());

    match plan.iter().find(|entry| entry.is_rejected()) {
        Some(rejected) => {
            let err = result.unwrap_err();
            assert_eq!(mismatch_column(&err), rejected.column);
        }
        None => {
            let out = result.unwrap();
            for entry in &plan {
                let expected = match entry.resolution {
                    Resolution::Copy { source_position } => input[source_position].clone(),
                    _ => Value::Null,
                };
                assert_eq!(out[entry.position], expected, "column {}", entry.column);
            }
        }
    }
}

#[test_case(MatchStrategy::Name, Schema::empty("FROM-EMPTY"), strict("TO-4") ; "name source empty strict")]
#[test_case(MatchStrategy::Location, Schema::empty("FROM-EMPTY"), strict("TO-4") ; "location source empty strict")]
#[test_case(MatchStrategy::Location, Schema::empty("FROM-EMPTY"), abc("TO-1") ; "location source empty nullable")]
#[test_case(MatchStrategy::Location, ab("FROM-2"), abc("TO-1") ; "location destination wider")]
#[test_case(MatchStrategy::Location, ab("FROM-2"), strict("TO-4") ; "location required column at source position")]
#[test_case(MatchStrategy::Name, ab("FROM-2"), abc("TO-1") ; "name destination wider")]
fn test_plan_agrees_with_reconcile(strategy: MatchStrategy, from: Schema, to: Schema) {
    let matcher = select_matcher_with(from, to, &MatcherConfig::new(strategy));
    let input = row(vec!["blob".into(), 2.0.into(), "extra".into()]);

    assert_plan_agrees(matcher.as_ref(), &input);
}

#[test]
fn test_location_empty_source_matches_nothing() {
    let to = schema("TO", vec![Column::not_null("a", ColumnType::Text)]);
    let matcher = LocationMatcher::new(Schema::empty("FROM-EMPTY"), to);

    assert_eq!(matcher.plan()[0].resolution, Resolution::Reject);
    let err = matcher.reconcile(row(vec!["blob".into()])).unwrap_err();
    assert_eq!(mismatch_column(&err), "a");
}

#[test]
fn test_location_ignores_values_beyond_source_schema() {
    let matcher = LocationMatcher::new(ab("FROM"), abc("TO"));
    let out = matcher
        .reconcile(row(vec![1.into(), 2.0.into(), "undeclared".into()]))
        .unwrap();

    assert_eq!(out, vec![Value::Integer(1), Value::Float(2.0), Value::Null]);
}

#[test]
fn test_plan_serializes_flat() {
    let matcher = NameMatcher::new(ab("FROM"), abc("TO"));
    let json = serde_json::to_value(matcher.plan()).unwrap();

    assert_eq!(json[0]["outcome"], "copy");
    assert_eq!(json[0]["source_position"], 0);
    assert_eq!(json[2]["outcome"], "null_fill");
    assert_eq!(json[2]["column"], "c");
}

// ============================================================================
// Concurrency
// ============================================================================

#[test]
fn test_shared_matcher_across_threads() {
    let matcher: Arc<dyn Matcher> = Arc::from(select_matcher(ab("FROM"), abc("TO")));

    let handles: Vec<_> = (0..4_i64)
        .map(|n| {
            let matcher = Arc::clone(&matcher);
            std::thread::spawn(move || {
                (0..100_i64)
                    .map(|i| matcher.reconcile(vec![(n * 100 + i).into(), 1.0.into()]))
                    .collect::<Result<Vec<_>, _>>()
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let rows = handle.join().unwrap().unwrap();
        assert_eq!(rows.len(), 100);
        assert_eq!(rows[0][0], Value::Integer(n as i64 * 100));
        assert_eq!(rows[0][2], Value::Null);
    }
}
