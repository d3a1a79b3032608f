use crate::domain::{Metric, MetricSample, NormalizedRecord};

/// Reduces normalized records to (strain, value) samples for one metric.
///
/// Coercion failures and missing values drop the record from this metric's
/// sample only; the record stays available to the other metrics. Outlier
/// fencing, when requested, runs on this metric's own distribution.
pub fn metric_samples(
    records: &[NormalizedRecord],
    metric: Metric,
    remove_outliers: bool,
) -> Vec<MetricSample> {
    let mut samples: Vec<MetricSample> = records
        .iter()
        .filter_map(|entry| {
            let value = coerce(metric.raw(&entry.record)?)?;
            Some(MetricSample {
                strain: entry.strain,
                value,
            })
        })
        .collect();

    if remove_outliers {
        if let Some((lo, hi)) = iqr_fences(&samples) {
            let before = samples.len();
            samples.retain(|s| s.value >= lo && s.value <= hi);
            tracing::debug!(
                metric = %metric,
                removed = before - samples.len(),
                "outlier fencing applied"
            );
        }
    }
    samples
}

fn coerce(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Tukey fences `[Q1 - 1.5 IQR, Q3 + 1.5 IQR]` over the sample values,
/// quartiles by linear interpolation. `None` when there is nothing to fence.
fn iqr_fences(samples: &[MetricSample]) -> Option<(f64, f64)> {
    if samples.is_empty() {
        return None;
    }
    let mut values: Vec<f64> = samples.iter().map(|s| s.value).collect();
    values.sort_by(|a, b| a.total_cmp(b));
    let q1 = quantile(&values, 0.25);
    let q3 = quantile(&values, 0.75);
    let iqr = q3 - q1;
    Some((q1 - 1.5 * iqr, q3 + 1.5 * iqr))
}

/// Linear-interpolated quantile over sorted values, q in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}
