//smoothing factor for a given span: 2 / (span + 1)
pub fn smoothing_factor(span: usize) -> f64 {
    2.0 / (span as f64 + 1.0)
}

//recursive exponential moving average seeded with the first value
//y[0] = x[0], y[t] = alpha * x[t] + (1 - alpha) * y[t-1]
pub fn ewm(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = smoothing_factor(span);
    let mut out = Vec::with_capacity(values.len());

    let mut prev: Option<f64> = None;
    for &x in values {
        let next = match prev {
            None => x,
            Some(y) => alpha * x + (1.0 - alpha) * y,
        };
        out.push(next);
        prev = Some(next);
    }
    out
}

//same recursion over a column with gaps
//seeded by the first defined value; a gap yields none and leaves the state untouched
pub fn ewm_optional(values: &[Option<f64>], span: usize) -> Vec<Option<f64>> {
    let alpha = smoothing_factor(span);
    let mut out = Vec::with_capacity(values.len());

    let mut prev: Option<f64> = None;
    for value in values {
        match (*value, prev) {
            (None, _) => out.push(None),
            (Some(x), None) => {
                prev = Some(x);
                out.push(Some(x));
            }
            (Some(x), Some(y)) => {
                let next = alpha * x + (1.0 - alpha) * y;
                prev = Some(next);
                out.push(Some(next));
            }
        }
    }
    out
}
