//running sum of a pnl series
pub fn cumulative_sum(values: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    values
        .iter()
        .map(|v| {
            total += v;
            total
        })
        .collect()
}

//distance of each cumulative value below its running peak (always <= 0)
pub fn drawdown_series(cumulative: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    cumulative
        .iter()
        .map(|&value| {
            //update peak
            if value > peak {
                peak = value;
            }
            value - peak
        })
        .collect()
}

//calculates maximum drawdown of a cumulative pnl curve
//zero for an empty or never-declining curve
pub fn max_drawdown(cumulative: &[f64]) -> f64 {
    drawdown_series(cumulative).into_iter().fold(0.0, f64::min)
}

//quantile with linear interpolation between order statistics
//h = (n - 1) * q; `sorted` must be ascending and non-empty
pub fn quantile_linear(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=1.0).contains(&q) {
        return None;
    }

    let h = (sorted.len() - 1) as f64 * q;
    let lower = h.floor() as usize;
    let upper = (lower + 1).min(sorted.len() - 1);
    let fraction = h - lower as f64;

    Some(sorted[lower] + fraction * (sorted[upper] - sorted[lower]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cumulative_sum_accumulates() {
        assert_eq!(cumulative_sum(&[1.0, -2.0, 3.5]), vec![1.0, -1.0, 2.5]);
        assert!(cumulative_sum(&[]).is_empty());
    }

    #[test]
    fn drawdown_measures_from_running_peak() {
        let dd = drawdown_series(&[0.0, 5.0, 3.0, 6.0, 1.0]);
        assert_eq!(dd, vec![0.0, 0.0, -2.0, 0.0, -5.0]);
        assert_eq!(max_drawdown(&[0.0, 5.0, 3.0, 6.0, 1.0]), -5.0);
    }

    #[test]
    fn first_value_is_its_own_peak() {
        //a curve that starts negative has no drawdown until it falls further
        assert_eq!(max_drawdown(&[-3.0, -1.0, -2.0]), -1.0);
    }

    #[test]
    fn non_decreasing_curve_has_no_drawdown() {
        assert_eq!(max_drawdown(&[0.0, 0.0, 1.0, 4.0, 4.0, 9.0]), 0.0);
        assert_eq!(max_drawdown(&[]), 0.0);
    }

    #[test]
    fn quantile_interpolates_linearly() {
        let sorted = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(quantile_linear(&sorted, 0.0), Some(1.0));
        assert_eq!(quantile_linear(&sorted, 1.0), Some(5.0));
        assert_eq!(quantile_linear(&sorted, 0.5), Some(3.0));
        //h = 4 * 0.05 = 0.2
        assert_relative_eq!(quantile_linear(&sorted, 0.05).unwrap(), 1.2, epsilon = 1e-12);
    }

    #[test]
    fn quantile_of_single_value_is_that_value() {
        assert_eq!(quantile_linear(&[7.0], 0.05), Some(7.0));
    }

    #[test]
    fn quantile_rejects_empty_or_out_of_range() {
        assert_eq!(quantile_linear(&[], 0.05), None);
        assert_eq!(quantile_linear(&[1.0], 1.5), None);
    }
}
