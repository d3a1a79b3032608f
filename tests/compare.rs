mod common;

use neuromorpho_compare::compare::{pairwise_comparisons, run_metric_comparison};
use neuromorpho_compare::domain::{CanonicalStrain, Metric, MetricSample};
use neuromorpho_compare::metric::metric_samples;
use neuromorpho_compare::normalize::RecordNormalizer;

use common::hippocampal_mouse;

fn sample(strain: CanonicalStrain, value: f64) -> MetricSample {
    MetricSample { strain, value }
}

#[test]
fn emits_all_unordered_pairs_for_four_strains() {
    let strains = [
        CanonicalStrain::C57bl6,
        CanonicalStrain::ApoeKnockout,
        CanonicalStrain::HumanizedApoe3,
        CanonicalStrain::HumanizedApoe4,
    ];
    let mut samples = Vec::new();
    for (i, &strain) in strains.iter().enumerate() {
        for j in 0..5 {
            samples.push(sample(strain, (i * 10 + j) as f64));
        }
    }

    let rows = pairwise_comparisons(&samples);
    assert_eq!(rows.len(), 6);

    let mut pairs: Vec<(CanonicalStrain, CanonicalStrain)> = Vec::new();
    for row in &rows {
        assert_ne!(row.group1, row.group2);
        assert!(row.p_value >= 0.0 && row.p_value <= 1.0);
        let pair = (row.group1, row.group2);
        let flipped = (row.group2, row.group1);
        assert!(!pairs.contains(&pair) && !pairs.contains(&flipped));
        pairs.push(pair);
    }
}

#[test]
fn three_records_two_strains_yield_one_row() {
    let records = vec![
        hippocampal_mouse("n1", "C57BL/6J", 100.0),
        hippocampal_mouse("n2", "Humanized ApoE4", 140.0),
        hippocampal_mouse("n3", "Humanized ApoE4", 160.0),
    ];
    let normalized = RecordNormalizer::normalize(&records);
    assert_eq!(normalized.len(), 3);

    let comparison = run_metric_comparison(&normalized, Metric::Volume, false);
    assert_eq!(comparison.samples.len(), 3);
    assert_eq!(comparison.rows.len(), 1);
    let row = &comparison.rows[0];
    assert_eq!(row.group1, CanonicalStrain::C57bl6);
    assert_eq!(row.group2, CanonicalStrain::HumanizedApoe4);
    assert!(row.p_value >= 0.0 && row.p_value <= 1.0);
}

#[test]
fn non_numeric_value_is_dropped_for_that_metric_only() {
    let mut record = hippocampal_mouse("n1", "C57BL/6", 100.0);
    record.volume = Some("Not reported".to_string());
    record.surface = Some("250.5".to_string());
    let normalized = RecordNormalizer::normalize(&[record]);

    assert!(metric_samples(&normalized, Metric::Volume, false).is_empty());
    let surfaces = metric_samples(&normalized, Metric::Surface, false);
    assert_eq!(surfaces.len(), 1);
    assert_eq!(surfaces[0].value, 250.5);
}

#[test]
fn outlier_fencing_is_a_fixed_point() {
    let values = [10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 200.0];
    let records: Vec<_> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| hippocampal_mouse(&format!("n{i}"), "C57BL/6", v))
        .collect();
    let normalized = RecordNormalizer::normalize(&records);

    let fenced = metric_samples(&normalized, Metric::Volume, true);
    assert_eq!(fenced.len(), values.len() - 1);

    // re-fencing the surviving values removes nothing further
    let refenced_records: Vec<_> = fenced
        .iter()
        .enumerate()
        .map(|(i, s)| hippocampal_mouse(&format!("m{i}"), "C57BL/6", s.value))
        .collect();
    let renormalized = RecordNormalizer::normalize(&refenced_records);
    let refenced = metric_samples(&renormalized, Metric::Volume, true);
    assert_eq!(refenced.len(), fenced.len());
}

#[test]
fn degenerate_pair_with_identical_values_does_not_error() {
    let samples = vec![
        sample(CanonicalStrain::C57bl6, 7.0),
        sample(CanonicalStrain::C57bl6, 7.0),
        sample(CanonicalStrain::HumanizedApoe4, 7.0),
        sample(CanonicalStrain::HumanizedApoe4, 7.0),
    ];
    let rows = pairwise_comparisons(&samples);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].p_value, 1.0);
    assert_eq!(rows[0].p_signif, "ns");
}
