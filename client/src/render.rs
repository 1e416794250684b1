//! Plain-text rendering of the derived views

use std::fmt::Write;

use shared::{
    format_value, ChartBar, CropId, ForecastView, HistoryView, PerformanceSummary,
    PerformanceView, SeriesStats,
};

/// Width of a full-height bar, in characters
const BAR_WIDTH: usize = 40;

fn bar(height: f64) -> String {
    "#".repeat((height * BAR_WIDTH as f64).round() as usize)
}

fn write_chart(out: &mut String, bars: &[ChartBar]) {
    for b in bars {
        let caption = b.caption.as_deref().unwrap_or("");
        let _ = writeln!(
            out,
            "  {:>10} {:>10} |{}",
            caption,
            b.label,
            bar(b.normalized_height)
        );
    }
}

fn write_stats(out: &mut String, noun: &str, stats: Option<&SeriesStats>) {
    match stats {
        Some(s) => {
            let _ = writeln!(out, "Average {}: {}", noun, format_value(s.mean));
            let _ = writeln!(out, "Maximum {}: {}", noun, format_value(s.max));
            let _ = writeln!(out, "Minimum {}: {}", noun, format_value(s.min));
        }
        None => {
            let _ = writeln!(out, "No values to summarize");
        }
    }
}

pub fn render_crops(crops: &[CropId], selected: &CropId) -> String {
    let mut out = String::new();
    for crop in crops {
        let marker = if crop == selected { "*" } else { " " };
        let _ = writeln!(out, "{} {}", marker, crop);
    }
    out
}

pub fn render_forecast(crop: &CropId, view: &ForecastView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Yield Forecast", crop);
    let _ = writeln!(out, "Forecast Period: {} days", view.period_days);
    if let (Some(start), Some(end)) = (view.start_date, view.end_date) {
        let _ = writeln!(out, "Start Date: {}", start);
        let _ = writeln!(out, "End Date: {}", end);
    }
    write_chart(&mut out, &view.chart);
    write_stats(&mut out, "Predicted Yield", view.stats.as_ref());
    out
}

pub fn render_history(crop: &CropId, view: &HistoryView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Historical Data", crop);
    let _ = writeln!(out, "Period: Last {} days", view.period_days);
    let _ = writeln!(out, "Data Points: {}", view.data_points);
    write_chart(&mut out, &view.windowed_chart);
    write_stats(&mut out, "Historical Yield", view.full_series_stats.as_ref());
    out
}

pub fn render_performance(crop: &CropId, view: &PerformanceView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} Model Performance", crop);
    let _ = writeln!(out, "RMSE: {} ({})", view.rmse, view.rmse_rating);
    let _ = writeln!(out, "MAE: {}", view.mae);
    let _ = writeln!(out, "R²: {} ({})", view.r2, view.fit_rating);
    let _ = writeln!(out, "Test Samples: {}", view.test_samples);
    let _ = writeln!(out, "Model Quality: {}", view.quality);
    out
}

pub fn render_summary(summary: &PerformanceSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Trained models: {}", summary.total_crops);
    for p in &summary.crop_performance {
        let crop = p.crop.as_ref().map(CropId::as_str).unwrap_or("?");
        let _ = writeln!(
            out,
            "  {:<12} RMSE {:>8}  MAE {:>8}  R² {:>6}  n={}",
            crop,
            format_value(p.rmse),
            format_value(p.mae),
            format_value(p.r2),
            p.test_samples
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared::{project, HistoryResult, PerformanceResult};

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(1.0).len(), BAR_WIDTH);
        assert_eq!(bar(0.5).len(), BAR_WIDTH / 2);
        assert!(bar(0.0).is_empty());
    }

    #[test]
    fn test_render_crops_marks_selection() {
        let crops = vec![CropId::from("Wheat"), CropId::from("Rice")];
        let out = render_crops(&crops, &CropId::from("Rice"));
        assert_eq!(out, "  Wheat\n* Rice\n");
    }

    #[test]
    fn test_render_history_reports_full_stats() {
        let view = HistoryView::from_result(&HistoryResult {
            period_days: 3,
            values: vec![2.0, 4.0, 6.0],
            dates: Vec::new(),
            crop: None,
        });
        let out = render_history(&CropId::from("Corn"), &view);
        assert!(out.starts_with("Corn Historical Data\n"));
        assert!(out.contains("Data Points: 3"));
        assert!(out.contains("Average Historical Yield: 4.00"));
    }

    #[test]
    fn test_render_performance() {
        let view = PerformanceView::from_result(&PerformanceResult {
            rmse: 40.0,
            mae: 30.0,
            r2: 0.5,
            test_samples: 12,
            crop: None,
        });
        let out = render_performance(&CropId::from("Rice"), &view);
        assert!(out.contains("RMSE: 40.00 (Needs Improvement)"));
        assert!(out.contains("R²: 0.50 (Poor fit)"));
        assert!(out.contains("Model Quality: Medium Quality"));
    }

    proptest! {
        #[test]
        fn prop_chart_lines_never_exceed_bar_width(
            values in prop::collection::vec(-1_000.0f64..1_000.0, 0..50)
        ) {
            let mut out = String::new();
            write_chart(&mut out, &project(&values));
            prop_assert_eq!(out.lines().count(), values.len());
            for line in out.lines() {
                let hashes = line.rsplit('|').next().unwrap_or("");
                prop_assert!(hashes.len() <= BAR_WIDTH);
            }
        }
    }
}
