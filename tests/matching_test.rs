//! End-to-end properties of the matching pipeline, run against a
//! deterministic stub embedding provider.

mod helpers;

use fieldmap::matching::{match_fields, MatchParams};
use helpers::{blend, source_field, spike, target_field, StubProvider};

fn default_params() -> MatchParams {
    MatchParams {
        desc_weight: 0.7,
        field_weight: 0.3,
        threshold: 0.5,
    }
}

/// The reference scenario: a source `cust_id` field must pair with the
/// semantically close `customer_id` target and not with `order_id`.
#[test]
fn customer_id_scenario_produces_exactly_one_match() {
    let provider = StubProvider::new(&[
        // Descriptions: source sits close to the first target, far from the second.
        ("Customer identifier", spike(0)),
        ("Unique ID of a customer", blend(0, 1, 0.95)),
        ("Identifier of a sales order", spike(2)),
        // Field names: same structure on an independent set of directions.
        ("cust_id", spike(4)),
        ("customer_id", blend(4, 5, 0.9)),
        ("order_id", spike(6)),
    ]);
    let sources = vec![source_field("customers", "cust_id", "Customer identifier")];
    let targets = vec![
        target_field("client", "customer_id", "Unique ID of a customer"),
        target_field("sales", "order_id", "Identifier of a sales order"),
    ];

    let records = match_fields(&provider, &sources, &targets, &default_params()).unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].source_field, "cust_id");
    assert_eq!(records[0].target_field, "customer_id");
    assert!(records[0].combined_score >= 0.5);
}

#[test]
fn identical_texts_yield_perfect_scores() {
    let provider = StubProvider::new(&[
        ("Account balance in cents", spike(0)),
        ("balance_cents", spike(1)),
    ]);
    let sources = vec![source_field("acct", "balance_cents", "Account balance in cents")];
    let targets = vec![target_field("account", "balance_cents", "Account balance in cents")];

    let records = match_fields(&provider, &sources, &targets, &default_params()).unwrap();

    assert_eq!(records.len(), 1);
    assert!((records[0].description_score - 1.0).abs() < 1e-6);
    assert!((records[0].field_name_score - 1.0).abs() < 1e-6);
    // combined = desc_weight + field_weight for self-similar texts
    assert!((records[0].combined_score - 1.0).abs() < 1e-6);
}

#[test]
fn empty_source_or_target_yields_empty_result() {
    let provider = StubProvider::new(&[]);
    let target = vec![target_field("t", "f", "d")];
    let source = vec![source_field("s", "f", "d")];

    assert!(match_fields(&provider, &[], &target, &default_params())
        .unwrap()
        .is_empty());
    assert!(match_fields(&provider, &source, &[], &default_params())
        .unwrap()
        .is_empty());
}

#[test]
fn every_emitted_record_meets_the_threshold() {
    let provider = StubProvider::new(&[
        ("alpha description", spike(0)),
        ("beta description", blend(0, 1, 0.8)),
        ("gamma description", blend(0, 1, 0.6)),
        ("delta description", spike(3)),
        ("alpha", spike(4)),
        ("beta", blend(4, 5, 0.8)),
        ("gamma", blend(4, 5, 0.6)),
        ("delta", spike(7)),
    ]);
    let sources = vec![source_field("s", "alpha", "alpha description")];
    let targets = vec![
        target_field("t", "beta", "beta description"),
        target_field("t", "gamma", "gamma description"),
        target_field("t", "delta", "delta description"),
    ];

    let records = match_fields(&provider, &sources, &targets, &default_params()).unwrap();

    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.combined_score >= 0.5));
    // delta is orthogonal on both signals and must not appear
    assert!(records.iter().all(|r| r.target_field != "delta"));
}

#[test]
fn raising_the_threshold_never_adds_matches() {
    let provider = StubProvider::new(&[
        ("first thing", spike(0)),
        ("a first thing", blend(0, 1, 0.9)),
        ("sort of first", blend(0, 1, 0.65)),
        ("first", spike(4)),
        ("first_one", blend(4, 5, 0.9)),
        ("firstish", blend(4, 5, 0.65)),
    ]);
    let sources = vec![source_field("s", "first", "first thing")];
    let targets = vec![
        target_field("t", "first_one", "a first thing"),
        target_field("t", "firstish", "sort of first"),
    ];

    let loose = match_fields(
        &provider,
        &sources,
        &targets,
        &MatchParams { threshold: 0.5, ..default_params() },
    )
    .unwrap();
    let strict = match_fields(
        &provider,
        &sources,
        &targets,
        &MatchParams { threshold: 0.8, ..default_params() },
    )
    .unwrap();

    assert!(strict.len() <= loose.len());
    for record in &strict {
        assert!(loose
            .iter()
            .any(|l| l.source_field == record.source_field
                && l.target_field == record.target_field));
    }
}

#[test]
fn identical_runs_are_deterministic() {
    let provider = StubProvider::new(&[
        ("x description", spike(0)),
        ("y description", blend(0, 2, 0.85)),
        ("z description", blend(0, 2, 0.85)),
        ("x", spike(4)),
        ("y", blend(4, 6, 0.85)),
        ("z", blend(4, 6, 0.85)),
    ]);
    let sources = vec![source_field("s", "x", "x description")];
    let targets = vec![
        target_field("t", "y", "y description"),
        target_field("t", "z", "z description"),
    ];

    let first = match_fields(&provider, &sources, &targets, &default_params()).unwrap();
    let second = match_fields(&provider, &sources, &targets, &default_params()).unwrap();

    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.target_field, b.target_field);
        assert_eq!(a.combined_score, b.combined_score);
    }
}

#[test]
fn unit_description_weight_reduces_combined_to_description_score() {
    let provider = StubProvider::new(&[
        ("the description", spike(0)),
        ("a very close description", blend(0, 1, 0.9)),
        ("name_a", spike(4)),
        ("name_b", spike(5)),
    ]);
    let sources = vec![source_field("s", "name_a", "the description")];
    let targets = vec![target_field("t", "name_b", "a very close description")];

    let records = match_fields(
        &provider,
        &sources,
        &targets,
        &MatchParams {
            desc_weight: 1.0,
            field_weight: 0.0,
            threshold: 0.5,
        },
    )
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].combined_score, records[0].description_score);
}

/// Inclusive cutoff: identical vectors give cosine exactly 1.0 on both
/// signals, so weights of 0.25 + 0.25 land combined exactly on a 0.5
/// threshold — and the record must be emitted.
#[test]
fn score_equal_to_threshold_is_included() {
    let provider = StubProvider::new(&[
        ("shared description", spike(0)),
        ("shared_name", spike(1)),
    ]);
    let sources = vec![source_field("s", "shared_name", "shared description")];
    let targets = vec![target_field("t", "shared_name", "shared description")];

    let records = match_fields(
        &provider,
        &sources,
        &targets,
        &MatchParams {
            desc_weight: 0.25,
            field_weight: 0.25,
            threshold: 0.5,
        },
    )
    .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].combined_score, 0.5);
}

#[test]
fn report_is_globally_sorted_across_source_rows() {
    let provider = StubProvider::new(&[
        ("one description", blend(0, 1, 0.75)),
        ("two description", spike(0)),
        ("common description", spike(0)),
        ("one", blend(4, 5, 0.75)),
        ("two", spike(4)),
        ("common", spike(4)),
    ]);
    // The second source row scores higher than the first; the report must
    // lead with it even though ranking runs per row.
    let sources = vec![
        source_field("s", "one", "one description"),
        source_field("s", "two", "two description"),
    ];
    let targets = vec![target_field("t", "common", "common description")];

    let records = match_fields(&provider, &sources, &targets, &default_params()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].source_field, "two");
    assert!(records[0].combined_score >= records[1].combined_score);
}

#[test]
fn one_source_field_may_match_many_targets() {
    let provider = StubProvider::new(&[
        ("the concept", spike(0)),
        ("concept one", blend(0, 1, 0.9)),
        ("concept two", blend(0, 1, 0.85)),
        ("concept", spike(4)),
        ("concept_a", blend(4, 5, 0.9)),
        ("concept_b", blend(4, 5, 0.85)),
    ]);
    let sources = vec![source_field("s", "concept", "the concept")];
    let targets = vec![
        target_field("t", "concept_a", "concept one"),
        target_field("t", "concept_b", "concept two"),
    ];

    let records = match_fields(&provider, &sources, &targets, &default_params()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].source_field, records[1].source_field);
}
