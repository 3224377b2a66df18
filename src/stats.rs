//! Weighted statistics used by the window aggregator.
//!
//! Pure functions only: no I/O, no shared state. Each takes `(value, weight)`
//! pairs and returns `None` when the spec calls for "null" rather than a
//! numeric sentinel.

/// Weighted median: sort ascending, return the first value whose cumulative
/// weight reaches half the total weight. `weight <= 0.0` entries are dropped.
pub fn weighted_median(mut samples: Vec<(f64, f64)>) -> Option<f64> {
    samples.retain(|&(_, w)| w > 0.0);
    if samples.is_empty() {
        return None;
    }
    samples.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap());
    let total_weight: f64 = samples.iter().map(|&(_, w)| w).sum();
    let half = total_weight / 2.0;
    let mut cumulative = 0.0;
    for (value, weight) in samples {
        cumulative += weight;
        if cumulative >= half {
            return Some(value);
        }
    }
    None
}

/// Biased weighted standard deviation: `sqrt(sum(w*(x - mean)^2) / sum(w))`.
/// Returns `None` when fewer than two positive-weight samples are present.
pub fn weighted_stddev(samples: &[(f64, f64)]) -> Option<f64> {
    let positive: Vec<&(f64, f64)> = samples.iter().filter(|&&(_, w)| w > 0.0).collect();
    if positive.len() < 2 {
        return None;
    }
    let total_weight: f64 = positive.iter().map(|&&(_, w)| w).sum();
    if total_weight <= 0.0 {
        return None;
    }
    let mean = positive.iter().map(|&&(x, w)| x * w).sum::<f64>() / total_weight;
    let variance = positive
        .iter()
        .map(|&&(x, w)| w * (x - mean).powi(2))
        .sum::<f64>()
        / total_weight;
    Some(variance.sqrt())
}

/// Sample standard deviation (denominator n-1). `None` when fewer than two
/// distinct-in-count samples are present (the caller decides what "distinct"
/// means; this just needs len >= 2).
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() as f64 - 1.0);
    Some(variance.sqrt())
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn weighted_median_picks_middle_value() {
        let samples = vec![(10.0, 1.0), (20.0, 1.0), (30.0, 1.0)];
        assert_eq!(weighted_median(samples), Some(20.0));
    }

    #[test]
    fn weighted_median_ignores_zero_weight() {
        let samples = vec![(10.0, 0.0), (20.0, 1.0)];
        assert_eq!(weighted_median(samples), Some(20.0));
    }

    #[test]
    fn weighted_median_empty_is_none() {
        assert_eq!(weighted_median(vec![]), None);
    }

    #[test]
    fn weighted_stddev_requires_two_samples() {
        assert_eq!(weighted_stddev(&[(5.0, 1.0)]), None);
        assert!(weighted_stddev(&[(5.0, 1.0), (7.0, 1.0)]).is_some());
    }

    #[test]
    fn weighted_stddev_zero_for_identical_values() {
        let samples = vec![(5.0, 1.0), (5.0, 1.0), (5.0, 1.0)];
        assert_eq!(weighted_stddev(&samples), Some(0.0));
    }

    #[test]
    fn sample_stddev_needs_two_values() {
        assert_eq!(sample_stddev(&[1.0]), None);
        assert!(sample_stddev(&[1.0, 2.0, 3.0]).is_some());
    }

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn mean_averages_values() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
    }
}
