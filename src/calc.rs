/// Sum of all values; `0.0` for an empty slice.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, value| acc + value)
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let count = values.len() as f64;
    Some(sum(values) / count)
}
