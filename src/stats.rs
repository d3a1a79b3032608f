//! Two-sample Mann–Whitney U (Wilcoxon rank-sum) test.
//!
//! Exact null distribution when both samples are small and tie-free,
//! otherwise the normal approximation with tie correction and continuity
//! correction, following `scipy.stats.mannwhitneyu`'s automatic method
//! selection so results line up with the usual analysis tooling.

/// Largest per-sample size for which the exact null distribution is used.
const EXACT_LIMIT: usize = 8;

#[derive(Debug, Clone, Copy)]
pub struct MannWhitney {
    /// U statistic of the first sample.
    pub u: f64,
    /// Two-sided p-value, always within [0, 1].
    pub p_value: f64,
}

/// Runs the two-sided test. Degenerate inputs (identical values, zero
/// variance) yield p = 1.0 rather than an error. Callers guarantee both
/// samples are non-empty.
pub fn mann_whitney_u(xs: &[f64], ys: &[f64]) -> MannWhitney {
    let n1 = xs.len();
    let n2 = ys.len();

    let mut combined: Vec<(f64, bool)> = xs
        .iter()
        .map(|&v| (v, true))
        .chain(ys.iter().map(|&v| (v, false)))
        .collect();
    combined.sort_by(|a, b| a.0.total_cmp(&b.0));

    let (ranks, tie_term) = average_ranks(&combined);
    let r1: f64 = ranks
        .iter()
        .zip(&combined)
        .filter(|(_, (_, is_x))| *is_x)
        .map(|(rank, _)| rank)
        .sum();
    let u1 = r1 - (n1 * (n1 + 1)) as f64 / 2.0;

    let has_ties = tie_term > 0.0;
    let p_value = if !has_ties && n1 <= EXACT_LIMIT && n2 <= EXACT_LIMIT {
        exact_two_sided_p(u1.round() as usize, n1, n2)
    } else {
        asymptotic_two_sided_p(u1, n1, n2, tie_term)
    };

    MannWhitney {
        u: u1,
        p_value: p_value.clamp(0.0, 1.0),
    }
}

/// Assigns average ranks over the sorted combined sample and accumulates
/// the tie correction term `sum(t^3 - t)` over tie groups.
fn average_ranks(sorted: &[(f64, bool)]) -> (Vec<f64>, f64) {
    let n = sorted.len();
    let mut ranks = vec![0.0; n];
    let mut tie_term = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i;
        while j + 1 < n && sorted[j + 1].0 == sorted[i].0 {
            j += 1;
        }
        let count = j - i + 1;
        // ranks are 1-based; tied values share the group's mean rank
        let mean_rank = (i + 1 + j + 1) as f64 / 2.0;
        for rank in ranks.iter_mut().take(j + 1).skip(i) {
            *rank = mean_rank;
        }
        if count > 1 {
            let t = count as f64;
            tie_term += t * t * t - t;
        }
        i = j + 1;
    }
    (ranks, tie_term)
}

/// Exact two-sided p via the full null distribution of U, enumerated over
/// all placements of the first sample among the combined ranks. Bounded by
/// [`EXACT_LIMIT`], so at most 2^16 placements.
fn exact_two_sided_p(u1: usize, n1: usize, n2: usize) -> f64 {
    let n = n1 + n2;
    let max_u = n1 * n2;
    let mut counts = vec![0u64; max_u + 1];
    let mut total = 0u64;
    for mask in 0u32..(1u32 << n) {
        if mask.count_ones() as usize != n1 {
            continue;
        }
        let mut u = 0usize;
        let mut ys_seen = 0usize;
        for position in 0..n {
            if mask >> position & 1 == 1 {
                u += ys_seen;
            } else {
                ys_seen += 1;
            }
        }
        counts[u] += 1;
        total += 1;
    }
    // the distribution is symmetric around n1*n2/2
    let u_small = u1.min(max_u - u1);
    let tail: u64 = counts[..=u_small].iter().sum();
    (2.0 * tail as f64 / total as f64).min(1.0)
}

/// Normal approximation with tie correction and continuity correction.
fn asymptotic_two_sided_p(u1: f64, n1: usize, n2: usize, tie_term: f64) -> f64 {
    let n1f = n1 as f64;
    let n2f = n2 as f64;
    let n = n1f + n2f;
    let mean = n1f * n2f / 2.0;
    let variance = n1f * n2f / 12.0 * ((n + 1.0) - tie_term / (n * (n - 1.0)));
    if variance <= 0.0 {
        // all observations identical
        return 1.0;
    }
    // two-sided: z from the larger of the two U statistics, continuity
    // correction shrinks the deviation by one half; the caller clamps the
    // result into [0, 1] when z goes slightly negative near the center
    let u_max = u1.max(n1f * n2f - u1);
    let z = (u_max - mean - 0.5) / variance.sqrt();
    erfc(z / std::f64::consts::SQRT_2)
}

/// Complementary error function, rational Chebyshev approximation with
/// fractional error below 1.2e-7 everywhere.
pub fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let ans = t
        * (-z * z - 1.26551223
            + t * (1.00002368
                + t * (0.37409196
                    + t * (0.09678418
                        + t * (-0.18628806
                            + t * (0.27886807
                                + t * (-1.13520398
                                    + t * (1.48851587
                                        + t * (-0.82215223 + t * 0.17087277)))))))))
            .exp();
    if x >= 0.0 { ans } else { 2.0 - ans }
}
