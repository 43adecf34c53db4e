use plotters::prelude::*;
use thiserror::Error;

use crate::services::analysis_types::{AnalysisReport, DailyTotalsReport};
use crate::services::report_file::{ReportFileError, load_report_file};

#[derive(Error, Debug)]
pub enum BurndownPlotError {
    #[error("failed to read report: {0}")]
    ReadReport(#[from] ReportFileError),
    #[error("report has no daily totals")]
    EmptyTotals,
    #[error("failed to render burn-down plot: {0}")]
    Plot(String),
}

pub fn plot_burndown_from_report_file(
    input_path: &str,
    output_path: &str,
) -> Result<(), BurndownPlotError> {
    let report = load_report_file(input_path)?;
    plot_burndown(output_path, &report)
}

pub fn plot_burndown(output_path: &str, report: &AnalysisReport) -> Result<(), BurndownPlotError> {
    if report.daily_totals.is_empty() {
        return Err(BurndownPlotError::EmptyTotals);
    }
    render_plot_png(output_path, &report.daily_totals)
}

fn render_plot_png(
    output_path: &str,
    totals: &[DailyTotalsReport],
) -> Result<(), BurndownPlotError> {
    let max_hours = totals
        .iter()
        .map(|item| item.total_hours.max(item.remaining_hours))
        .fold(0.0_f64, f64::max);
    let max_y = (max_hours * 1.1).max(1.0);
    let max_x = totals.len().saturating_sub(1).max(1) as i32;

    let root = BitMapBackend::new(output_path, (900, 600)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .caption("Burn-down", ("sans-serif", 30))
        .x_label_area_size(55)
        .y_label_area_size(65)
        .build_cartesian_2d(0..max_x, 0.0..max_y)
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?;

    let label_count = totals.len().clamp(1, 10);
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Snapshot date")
        .y_desc("Hours")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .x_labels(label_count)
        .x_label_formatter(&|index| {
            if *index < 0 {
                return String::new();
            }
            totals
                .get(*index as usize)
                .map(|item| item.date.clone())
                .unwrap_or_default()
        })
        .draw()
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?;

    let total_color = RGBColor(30, 122, 204);
    chart
        .draw_series(LineSeries::new(
            totals
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx as i32, item.total_hours)),
            total_color.stroke_width(2),
        ))
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?
        .label("Total")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &total_color));

    chart
        .draw_series(LineSeries::new(
            totals
                .iter()
                .enumerate()
                .map(|(idx, item)| (idx as i32, item.remaining_hours)),
            RED.stroke_width(2),
        ))
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?
        .label("Remaining")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?;

    root.present()
        .map_err(|e| BurndownPlotError::Plot(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::build_report;

    #[test]
    fn plot_burndown_rejects_report_without_totals() {
        let output_file = assert_fs::NamedTempFile::new("empty.png").unwrap();
        let mut report = build_report();
        report.daily_totals.clear();

        let error = plot_burndown(output_file.path().to_str().unwrap(), &report)
            .expect_err("expected empty totals error");

        assert!(matches!(error, BurndownPlotError::EmptyTotals));
    }

    #[test]
    fn plot_burndown_from_missing_report_fails_to_read() {
        let temp = assert_fs::TempDir::new().unwrap();
        let input = temp.path().join("missing.yaml");
        let output = temp.path().join("chart.png");

        let error = plot_burndown_from_report_file(input.to_str().unwrap(), output.to_str().unwrap())
            .expect_err("expected read error");

        assert!(matches!(error, BurndownPlotError::ReadReport(_)));
    }

    #[test]
    fn plot_burndown_writes_png() {
        let output_file = assert_fs::NamedTempFile::new("burndown.png").unwrap();
        let output_path = output_file.path().to_str().unwrap();

        plot_burndown(output_path, &build_report()).unwrap();

        let metadata = std::fs::metadata(output_path).unwrap();
        assert!(metadata.len() > 0);
    }
}
