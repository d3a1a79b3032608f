use crate::domain::{
    CanonicalStrain, NormalizedRecord, RawRecord, RECOGNIZED_AGES, STRAIN_INCLUDE_PATTERNS,
    canonicalize_strain,
};

const EXCLUDED_CONDITION: &str = "experimental manipulation";
const REQUIRED_SPECIES: &str = "mouse";
const REQUIRED_REGION: &str = "hippocampus";

pub struct RecordNormalizer;

impl RecordNormalizer {
    /// Applies the inclusion filters in fixed order, rewrites strain to its
    /// canonical label, and drops exact duplicates while preserving
    /// insertion order.
    pub fn normalize(records: &[RawRecord]) -> Vec<NormalizedRecord> {
        let mut normalized: Vec<NormalizedRecord> = Vec::new();
        for record in records {
            let Some(strain) = Self::admit(record) else {
                continue;
            };
            let entry = NormalizedRecord {
                strain,
                record: record.clone(),
            };
            if !normalized.contains(&entry) {
                normalized.push(entry);
            }
        }
        tracing::debug!(
            raw = records.len(),
            kept = normalized.len(),
            "normalized records"
        );
        normalized
    }

    /// Runs the filter chain; returns the canonical strain if the record
    /// passes every filter. The canonicalization at the end is a recheck:
    /// "wild type" passes the strain filter but has no canonical label.
    fn admit(record: &RawRecord) -> Option<CanonicalStrain> {
        if record
            .experiment_condition
            .iter()
            .any(|c| c.to_lowercase().contains(EXCLUDED_CONDITION))
        {
            return None;
        }
        if record.species.as_deref()?.to_lowercase() != REQUIRED_SPECIES {
            return None;
        }
        let age = record.age_classification.as_deref()?;
        if !RECOGNIZED_AGES.contains(&age) {
            return None;
        }
        let strain = record.strain.as_deref()?;
        let lowered = strain.to_lowercase();
        if !STRAIN_INCLUDE_PATTERNS
            .iter()
            .any(|pattern| lowered.contains(pattern))
        {
            return None;
        }
        if !record
            .brain_region
            .iter()
            .any(|r| r.to_lowercase() == REQUIRED_REGION)
        {
            return None;
        }
        canonicalize_strain(strain)
    }
}
