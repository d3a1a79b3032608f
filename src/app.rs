use serde::Serialize;

use crate::collector::{PaginatedCollector, RetrievalSummary};
use crate::compare::{MetricComparison, run_metric_comparison};
use crate::config::ResolvedConfig;
use crate::domain::{CanonicalStrain, NormalizedRecord};
use crate::neuromorpho::PageClient;
use crate::normalize::RecordNormalizer;

/// Full pipeline output, serializable for the JSON report consumed by
/// downstream plotting/export tools.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub retrieved_at: String,
    pub retrieval: RetrievalSummary,
    pub normalized_records: usize,
    pub strain_counts: Vec<StrainCount>,
    pub comparisons: Vec<MetricComparison>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StrainCount {
    pub strain: CanonicalStrain,
    pub records: usize,
}

pub struct Pipeline<C> {
    client: C,
}

impl<C: PageClient> Pipeline<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Retrieval, normalization, then one independent comparison per
    /// configured metric. Retrieval problems degrade to partial data and
    /// are reported in the retrieval summary, never as an error.
    pub fn run(self, config: &ResolvedConfig) -> PipelineReport {
        let collector = PaginatedCollector::new(self.client, config.max_pages, config.page_size);
        let collection = collector.collect();
        let retrieval = collection.summary();

        let normalized = RecordNormalizer::normalize(&collection.records);
        let strain_counts = strain_counts(&normalized);

        let comparisons = config
            .metrics
            .iter()
            .map(|plan| run_metric_comparison(&normalized, plan.metric, plan.remove_outliers))
            .collect();

        PipelineReport {
            retrieved_at: chrono::Utc::now().to_rfc3339(),
            retrieval,
            normalized_records: normalized.len(),
            strain_counts,
            comparisons,
        }
    }
}

fn strain_counts(records: &[NormalizedRecord]) -> Vec<StrainCount> {
    let mut counts: Vec<StrainCount> = Vec::new();
    for record in records {
        match counts.iter_mut().find(|c| c.strain == record.strain) {
            Some(count) => count.records += 1,
            None => counts.push(StrainCount {
                strain: record.strain,
                records: 1,
            }),
        }
    }
    counts
}
