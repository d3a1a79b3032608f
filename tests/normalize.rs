mod common;

use neuromorpho_compare::domain::CanonicalStrain;
use neuromorpho_compare::normalize::RecordNormalizer;

use common::hippocampal_mouse;

#[test]
fn accepts_a_fully_conforming_record() {
    let records = vec![hippocampal_mouse("n1", "C57BL/6", 100.0)];
    let normalized = RecordNormalizer::normalize(&records);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].strain, CanonicalStrain::C57bl6);
}

#[test]
fn excludes_experimental_manipulation_by_substring() {
    let mut record = hippocampal_mouse("n1", "C57BL/6", 100.0);
    record.experiment_condition =
        vec!["Chronic Experimental Manipulation (stress)".to_string()];
    assert!(RecordNormalizer::normalize(&[record]).is_empty());
}

#[test]
fn species_match_is_case_insensitive() {
    let mut mouse = hippocampal_mouse("n1", "C57BL/6", 100.0);
    mouse.species = Some("Mouse".to_string());
    let mut rat = hippocampal_mouse("n2", "C57BL/6", 100.0);
    rat.species = Some("rat".to_string());
    let normalized = RecordNormalizer::normalize(&[mouse, rat]);
    assert_eq!(normalized.len(), 1);
}

#[test]
fn age_set_is_exact_and_case_sensitive() {
    let mut young_adult = hippocampal_mouse("n1", "C57BL/6", 100.0);
    young_adult.age_classification = Some("young adult".to_string());
    let mut titled = hippocampal_mouse("n2", "C57BL/6", 100.0);
    titled.age_classification = Some("Young Adult".to_string());
    let mut aged = hippocampal_mouse("n3", "C57BL/6", 100.0);
    aged.age_classification = Some("old".to_string());
    let normalized = RecordNormalizer::normalize(&[young_adult, titled, aged]);
    assert_eq!(normalized.len(), 1);
    assert_eq!(
        normalized[0].record.age_classification.as_deref(),
        Some("young adult")
    );
}

#[test]
fn wild_type_passes_the_filter_but_fails_canonicalization() {
    let record = hippocampal_mouse("n1", "wild type", 100.0);
    assert!(RecordNormalizer::normalize(&[record]).is_empty());
}

#[test]
fn unrecognized_strain_is_excluded() {
    let record = hippocampal_mouse("n1", "BALB/c", 100.0);
    assert!(RecordNormalizer::normalize(&[record]).is_empty());
}

#[test]
fn substrain_text_canonicalizes_via_priority_order() {
    let record = hippocampal_mouse("n1", "C57BL/6J (substrain)", 100.0);
    let normalized = RecordNormalizer::normalize(&[record]);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].strain, CanonicalStrain::C57bl6);
    assert_eq!(normalized[0].strain.as_str(), "C57BL/6");
}

#[test]
fn hippocampus_membership_is_case_insensitive_across_tags() {
    let mut multi = hippocampal_mouse("n1", "C57BL/6", 100.0);
    multi.brain_region = vec!["Neocortex".to_string(), "Hippocampus".to_string()];
    let mut cortex_only = hippocampal_mouse("n2", "C57BL/6", 100.0);
    cortex_only.brain_region = vec!["Neocortex".to_string()];
    let normalized = RecordNormalizer::normalize(&[multi, cortex_only]);
    assert_eq!(normalized.len(), 1);
    assert_eq!(normalized[0].record.neuron_name.as_deref(), Some("n1"));
}

#[test]
fn records_missing_metadata_are_excluded() {
    let mut record = hippocampal_mouse("n1", "C57BL/6", 100.0);
    record.species = None;
    assert!(RecordNormalizer::normalize(&[record]).is_empty());
}

#[test]
fn duplicate_records_normalize_once() {
    let record = hippocampal_mouse("n1", "C57BL/6", 100.0);
    let normalized = RecordNormalizer::normalize(&[record.clone(), record]);
    assert_eq!(normalized.len(), 1);
}
