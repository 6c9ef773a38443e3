use argminmax::ArgMinMax;

/// Largest value in a non-empty slice
pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

/// Smallest value in a non-empty slice
pub fn get_min(vec: &[f64]) -> f64 {
    let min_index: usize = vec.argmin();
    vec[min_index]
}

/// `None` for an empty slice, so callers never index out of bounds
pub fn get_min_max(vec: &[f64]) -> Option<(f64, f64)> {
    if vec.is_empty() {
        return None;
    }
    Some((get_min(vec), get_max(vec)))
}

/// Percentage move from `from` to `to`. Zero when `from` is zero.
pub fn pct_change(from: f64, to: f64) -> f64 {
    if from == 0.0 {
        return 0.0;
    }
    (to - from) / from * 100.0
}

/// Number of C(n, 2) unordered pairs
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_max() {
        let prices = vec![101.5, 99.0, 120.25, 100.0];
        assert_eq!(get_min_max(&prices), Some((99.0, 120.25)));
        assert_eq!(get_min_max(&[]), None);
    }

    #[test]
    fn test_pct_change() {
        assert!((pct_change(100.0, 110.0) - 10.0).abs() < 1e-12);
        assert!((pct_change(200.0, 150.0) + 25.0).abs() < 1e-12);
        assert_eq!(pct_change(0.0, 10.0), 0.0);
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(4), 6);
        assert_eq!(pair_count(8), 28);
    }
}
