//! Aggregate statistics

/// Arithmetic mean; 0.0 for an empty input
pub fn mean<I>(values: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Mean of the values whose flag is false; `None` when every value is flagged
pub fn mean_unflagged<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, bool)>,
{
    let genuine: Vec<f64> = values
        .into_iter()
        .filter(|(_, flagged)| !flagged)
        .map(|(v, _)| v)
        .collect();
    if genuine.is_empty() {
        None
    } else {
        Some(mean(genuine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(Vec::new()), 0.0);
        assert!((mean(vec![1.0, 2.0, 6.0]) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_mean_unflagged() {
        assert_eq!(mean_unflagged(vec![(1.0, false), (50.0, true), (3.0, false)]), Some(2.0));
        assert_eq!(mean_unflagged(vec![(50.0, true)]), None);
    }
}
