//! Bar-chart projection of a yield series

use serde::{Deserialize, Serialize};

/// One renderable bar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartBar {
    /// Bar height relative to the tallest bar, in `[0, 1]`
    pub normalized_height: f64,
    /// Value label, rounded to 2 decimal places
    pub label: String,
    /// Optional axis caption (e.g. the forecast date)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

/// Format a value for display: 2 decimal places for finite numbers,
/// anything else rendered as-is.
pub fn format_value(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}", value)
    } else {
        value.to_string()
    }
}

fn series_max(values: &[f64]) -> f64 {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max)
}

fn normalize(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !(max > 0.0) {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}

/// Project a series into bars, heights normalized against the series max.
///
/// A series whose max is zero (or which has no positive finite value) yields
/// all-zero heights instead of dividing by zero.
pub fn project(values: &[f64]) -> Vec<ChartBar> {
    let max = series_max(values);
    values
        .iter()
        .map(|&v| ChartBar {
            normalized_height: normalize(v, max),
            label: format_value(v),
            caption: None,
        })
        .collect()
}

/// Project a series and attach one caption per bar.
///
/// Extra captions are ignored; bars without a caption keep `None`.
pub fn project_with_captions<C: ToString>(values: &[f64], captions: &[C]) -> Vec<ChartBar> {
    let mut bars = project(values);
    for (bar, caption) in bars.iter_mut().zip(captions) {
        bar.caption = Some(caption.to_string());
    }
    bars
}

/// The trailing `len` points of a series (the whole series if shorter)
pub fn trailing_window(values: &[f64], len: usize) -> &[f64] {
    &values[values.len().saturating_sub(len)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn heights(bars: &[ChartBar]) -> Vec<f64> {
        bars.iter().map(|b| b.normalized_height).collect()
    }

    #[test]
    fn test_project_known_series() {
        let bars = project(&[10.0, 5.0, 20.0]);
        assert_eq!(heights(&bars), vec![0.5, 0.25, 1.0]);
        assert_eq!(bars[0].label, "10.00");
        assert_eq!(bars[1].label, "5.00");
    }

    #[test]
    fn test_zero_max_gives_zero_heights() {
        let bars = project(&[0.0, 0.0, 0.0]);
        assert_eq!(heights(&bars), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_negative_values_clamp_to_zero() {
        let bars = project(&[-5.0, 10.0]);
        assert_eq!(heights(&bars), vec![0.0, 1.0]);
        assert_eq!(heights(&project(&[-5.0, -1.0])), vec![0.0, 0.0]);
    }

    #[test]
    fn test_non_finite_values() {
        let bars = project(&[f64::NAN, 4.0, f64::INFINITY]);
        assert_eq!(heights(&bars), vec![0.0, 1.0, 0.0]);
        assert_eq!(bars[0].label, "NaN");
        assert_eq!(bars[2].label, "inf");
    }

    #[test]
    fn test_project_does_not_mutate_source() {
        let values = vec![3.0, 6.0];
        let _ = project(&values);
        assert_eq!(values, vec![3.0, 6.0]);
    }

    #[test]
    fn test_format_value_rounds() {
        assert_eq!(format_value(101.456), "101.46");
        assert_eq!(format_value(7.0), "7.00");
    }

    #[test]
    fn test_captions() {
        let bars = project_with_captions(&[1.0, 2.0], &["2024-01-01", "2024-01-02", "extra"]);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].caption.as_deref(), Some("2024-01-02"));

        let bars = project_with_captions::<&str>(&[1.0, 2.0], &["only"]);
        assert!(bars[1].caption.is_none());
    }

    #[test]
    fn test_trailing_window() {
        let values: Vec<f64> = (0..40).map(f64::from).collect();
        let window = trailing_window(&values, 30);
        assert_eq!(window.len(), 30);
        assert_eq!(window[0], 10.0);
        assert_eq!(trailing_window(&values[..5], 30).len(), 5);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_heights_bounded(values in prop::collection::vec(-1.0e4f64..1.0e4, 0..100)) {
            let bars = project(&values);
            prop_assert_eq!(bars.len(), values.len());
            for bar in &bars {
                prop_assert!((0.0..=1.0).contains(&bar.normalized_height));
            }
        }

        #[test]
        fn prop_max_bar_is_full_height(values in prop::collection::vec(0.1f64..1.0e4, 1..100)) {
            let bars = project(&values);
            prop_assert!(bars.iter().any(|b| b.normalized_height == 1.0));
        }
    }
}
