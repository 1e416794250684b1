//! Summary statistics over a yield series

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error computing statistics over a series
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("Cannot summarize an empty series")]
    EmptySeries,
}

/// Min, max and mean of a series
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

/// Compute `{min, max, mean}` of a non-empty series.
///
/// The mean is clamped into `[min, max]` so that accumulated rounding in the
/// sum can never place it outside the observed range.
pub fn summarize(values: &[f64]) -> Result<SeriesStats, SeriesError> {
    let (first, rest) = values.split_first().ok_or(SeriesError::EmptySeries)?;

    let (min, max, sum) = rest
        .iter()
        .fold((*first, *first, *first), |(min, max, sum), &v| {
            (min.min(v), max.max(v), sum + v)
        });
    let mean = (sum / values.len() as f64).max(min).min(max);

    Ok(SeriesStats { min, max, mean })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_element() {
        let stats = summarize(&[42.5]).unwrap();
        assert_eq!(
            stats,
            SeriesStats {
                min: 42.5,
                max: 42.5,
                mean: 42.5
            }
        );
    }

    #[test]
    fn test_empty_series() {
        assert_eq!(summarize(&[]), Err(SeriesError::EmptySeries));
    }

    #[test]
    fn test_known_series() {
        let stats = summarize(&[10.0, 5.0, 20.0, 25.0]).unwrap();
        assert_eq!(stats.min, 5.0);
        assert_eq!(stats.max, 25.0);
        assert_eq!(stats.mean, 15.0);
    }

    #[test]
    fn test_repeated_values_do_not_drift() {
        let stats = summarize(&[0.1, 0.1, 0.1]).unwrap();
        assert_eq!(stats.mean, 0.1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// min <= mean <= max for every non-empty series
        #[test]
        fn prop_mean_between_min_and_max(
            values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200)
        ) {
            let stats = summarize(&values).unwrap();
            prop_assert!(stats.min <= stats.mean);
            prop_assert!(stats.mean <= stats.max);
        }

        /// Input order does not change the extremes
        #[test]
        fn prop_extremes_independent_of_order(
            values in prop::collection::vec(0.0f64..500.0, 1..50)
        ) {
            let mut reversed = values.clone();
            reversed.reverse();
            let a = summarize(&values).unwrap();
            let b = summarize(&reversed).unwrap();
            prop_assert_eq!(a.min, b.min);
            prop_assert_eq!(a.max, b.max);
        }
    }
}
