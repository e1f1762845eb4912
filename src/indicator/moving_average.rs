//helper function to calculate simple moving average
pub fn sma(prices: &[f64]) -> Option<f64> {
    if prices.is_empty() {
        return None;
    }
    Some(prices.iter().sum::<f64>() / prices.len() as f64)
}

//trailing simple moving average, aligned with `values`
//the first window - 1 entries are none
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        if i + 1 < window {
            out.push(None);
        } else {
            out.push(sma(&values[i + 1 - window..=i]));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sma_of_empty_slice_is_none() {
        assert_eq!(sma(&[]), None);
        assert_eq!(sma(&[4.0, 6.0]), Some(5.0));
    }

    #[test]
    fn undefined_during_warmup() {
        let values: Vec<f64> = (1..=12).map(|v| v as f64).collect();
        let out = rolling_mean(&values, 10);

        assert_eq!(out.len(), 12);
        assert!(out[..9].iter().all(Option::is_none));
        assert!(out[9..].iter().all(Option::is_some));
    }

    #[test]
    fn constant_series_mean_is_price() {
        let values = vec![100.0; 40];
        let out = rolling_mean(&values, 30);

        for v in out.iter().skip(29) {
            assert_eq!(*v, Some(100.0));
        }
    }

    #[test]
    fn linear_series_mean_is_window_midpoint() {
        let values: Vec<f64> = (0..50).map(|v| 100.0 + v as f64).collect();
        let out = rolling_mean(&values, 10);

        for i in 9..values.len() {
            //midpoint of values[i-9..=i]
            let expected = values[i] - 4.5;
            assert_relative_eq!(out[i].unwrap(), expected, epsilon = 1e-9);
        }
    }

    #[test]
    fn window_longer_than_input_is_all_none() {
        let out = rolling_mean(&[1.0, 2.0, 3.0], 5);
        assert_eq!(out, vec![None, None, None]);
    }

    #[test]
    fn window_of_one_is_identity() {
        let out = rolling_mean(&[1.0, 2.0, 3.0], 1);
        assert_eq!(out, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }
}
