use serde::Serialize;

use crate::domain::{CanonicalStrain, Metric, MetricSample, NormalizedRecord};
use crate::metric::metric_samples;
use crate::stats::mann_whitney_u;

/// One unordered strain pair's test result. Rows are emitted in pair
/// enumeration order; any display sorting is the consumer's concern.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub group1: CanonicalStrain,
    pub group2: CanonicalStrain,
    pub p_value: f64,
    pub p_signif: &'static str,
}

/// Full comparison output for one metric.
#[derive(Debug, Serialize)]
pub struct MetricComparison {
    pub metric: Metric,
    pub remove_outliers: bool,
    pub samples: Vec<MetricSample>,
    pub rows: Vec<ComparisonRow>,
}

/// Maps a p-value to its significance band. Intervals are right-closed
/// (`cut` style): a p-value exactly at a cutpoint takes the more
/// significant band.
pub fn significance_band(p: f64) -> &'static str {
    if p <= 0.0001 {
        "****"
    } else if p <= 0.001 {
        "***"
    } else if p <= 0.01 {
        "**"
    } else if p <= 0.05 {
        "*"
    } else {
        "ns"
    }
}

/// Enumerates every unordered pair of strains present in the samples, in
/// first-encounter order, and runs the rank-sum test on each. With fewer
/// than two strains there is nothing to compare and the table is empty.
pub fn pairwise_comparisons(samples: &[MetricSample]) -> Vec<ComparisonRow> {
    let mut strains: Vec<CanonicalStrain> = Vec::new();
    for sample in samples {
        if !strains.contains(&sample.strain) {
            strains.push(sample.strain);
        }
    }

    let values = |strain: CanonicalStrain| -> Vec<f64> {
        samples
            .iter()
            .filter(|s| s.strain == strain)
            .map(|s| s.value)
            .collect()
    };

    let mut rows = Vec::with_capacity(strains.len() * strains.len().saturating_sub(1) / 2);
    for (i, &group1) in strains.iter().enumerate() {
        for &group2 in &strains[i + 1..] {
            let test = mann_whitney_u(&values(group1), &values(group2));
            rows.push(ComparisonRow {
                group1,
                group2,
                p_value: test.p_value,
                p_signif: significance_band(test.p_value),
            });
        }
    }
    rows
}

/// The per-metric pipeline: sample extraction (with optional outlier
/// fencing) followed by exhaustive pairwise testing. Invoked once per
/// metric; the metric pipelines share no state.
pub fn run_metric_comparison(
    records: &[NormalizedRecord],
    metric: Metric,
    remove_outliers: bool,
) -> MetricComparison {
    let samples = metric_samples(records, metric, remove_outliers);
    let rows = pairwise_comparisons(&samples);
    tracing::info!(
        metric = %metric,
        samples = samples.len(),
        pairs = rows.len(),
        "metric comparison complete"
    );
    MetricComparison {
        metric,
        remove_outliers,
        samples,
        rows,
    }
}
