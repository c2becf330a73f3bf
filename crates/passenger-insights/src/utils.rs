//! Shared numeric helpers used by the cleaning and statistics code.

/// Round `value` to `decimals` places, as its fixed-point decimal rendering.
///
/// The exact binary value is rounded, so `1.45` (stored as 1.4499999...)
/// gives `1.4`. Exact midpoints such as `0.25` round away from zero.
///
/// ```rust,ignore
/// assert_eq!(round_to(28.666, 1), 28.7);
/// assert_eq!(round_to(1.45, 1), 1.4);
/// assert_eq!(round_to(0.25, 1), 0.3);
/// ```
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }

    // Scaling by a power of two is exact: an odd result means `value` sits
    // exactly halfway between two candidates.
    let halves = value * 2f64.powi(decimals as i32 + 1);
    if halves.fract() == 0.0 && halves.abs() % 2.0 == 1.0 {
        let factor = 10f64.powi(decimals as i32);
        return (value * factor).round() / factor;
    }

    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// Arithmetic mean, or `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sort ascending in place.
pub fn sort_ascending(values: &mut [f64]) {
    values.sort_by(f64::total_cmp);
}

/// Element at index `len / 2` of an ascending slice.
///
/// For even lengths this is the upper of the two middle values, not their
/// average.
pub fn upper_median(sorted: &[f64]) -> Option<f64> {
    sorted.get(sorted.len() / 2).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(28.666_666, 1), 28.7);
        assert_eq!(round_to(28.666_666, 2), 28.67);
        assert_eq!(round_to(22.0, 1), 22.0);
    }

    #[test]
    fn test_round_to_uses_exact_binary_value() {
        // 1.45 and 2.675 are stored slightly below the written value
        assert_eq!(round_to(1.45, 1), 1.4);
        assert_eq!(round_to(2.675, 2), 2.67);
        assert_eq!(round_to(1.55, 1), 1.6);
    }

    #[test]
    fn test_round_to_exact_midpoints() {
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(30.125, 2), 30.13);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-0.25, 1), -0.3);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[22.0, 38.0, 26.0]), Some(86.0 / 3.0));
    }

    #[test]
    fn test_upper_median_even_length() {
        let mut values = vec![4.0, 1.0, 3.0, 2.0];
        sort_ascending(&mut values);
        // Index 2 of [1, 2, 3, 4], not (2 + 3) / 2
        assert_eq!(upper_median(&values), Some(3.0));
    }

    #[test]
    fn test_upper_median_odd_length() {
        assert_eq!(upper_median(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(upper_median(&[]), None);
    }
}
