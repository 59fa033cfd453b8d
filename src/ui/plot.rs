use std::f64::consts::TAU;

use eframe::egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Ui, Vec2};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints, Polygon};

use crate::charts::{
    CdfSeries, ChartKind, ChartResult, ChartSet, CorrelationMatrix, McsUsage, TimingShare,
};
use crate::color::{diverging, generate_palette};
use crate::config::AxisLimits;
use crate::data::model::Cell;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 240.0;
const COLUMNS: usize = 4;

// ---------------------------------------------------------------------------
// Dashboard grid (central panel)
// ---------------------------------------------------------------------------

/// Render the configured chart grid in the central panel.
pub fn dashboard_grid(ui: &mut Ui, state: &AppState) {
    let Some(charts) = &state.charts else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a measurement file to begin  (File → Open…)");
        });
        return;
    };

    let limits = state.config.axis_limits;
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (r, row) in state.config.layout.chunks(COLUMNS).enumerate() {
                ui.columns(COLUMNS, |cols: &mut [Ui]| {
                    for (c, (col, kind)) in cols.iter_mut().zip(row).enumerate() {
                        col.push_id((r, c), |ui: &mut Ui| {
                            ui.heading(kind.title());
                            chart_slot(ui, *kind, charts, &limits);
                        });
                    }
                });
                ui.separator();
            }
        });
}

fn chart_slot(ui: &mut Ui, kind: ChartKind, charts: &ChartSet, limits: &AxisLimits) {
    match kind {
        ChartKind::TimingPie => show_or_info(ui, &charts.timing, timing_pie),
        ChartKind::ThroughputCdf => show_or_info(ui, &charts.throughput_cdf, |ui, cdf| {
            cdf_plot(ui, "throughput_cdf", "Mbps", limits.throughput_max, &[("Throughput (iperf)", cdf)])
        }),
        ChartKind::JitterCdf => show_or_info(ui, &charts.jitter_cdf, |ui, cdf| {
            cdf_plot(ui, "jitter_cdf", "ms", limits.jitter_max, &[("Jitter", cdf)])
        }),
        ChartKind::RetryCdf => retry_cdf(ui, charts, limits.retry_max),
        ChartKind::McsUsage => mcs_bars(ui, &charts.mcs_initial, &charts.mcs_retry),
        ChartKind::Correlation => show_or_info(ui, &charts.correlation, correlation_heatmap),
        ChartKind::BurstModes => burst_modes(ui, charts),
        ChartKind::SgiRetry => sgi_retry(ui, charts),
    }
}

/// Draw `result` with `draw`, or an info line when it is unavailable.
fn show_or_info<T>(ui: &mut Ui, result: &ChartResult<T>, draw: impl FnOnce(&mut Ui, &T)) {
    match result {
        Ok(value) => draw(ui, value),
        Err(why) => info(ui, why),
    }
}

fn info(ui: &mut Ui, why: impl std::fmt::Display) {
    ui.label(RichText::new(format!("ℹ {why}")).italics().color(Color32::GRAY));
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

fn timing_pie(ui: &mut Ui, share: &TimingShare) {
    let labels = TimingShare::labels();
    let percentages = share.percentages();
    let colors = generate_palette(labels.len());

    Plot::new("timing_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for ((label, pct), color) in labels.iter().zip(percentages).zip(colors) {
                let sweep = pct / 100.0 * TAU;
                if sweep > 0.0 {
                    let slice = Polygon::new(PlotPoints::from(slice_points(start, sweep)))
                        .name(format!("{label} ({pct:.1}%)"))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE));
                    plot_ui.polygon(slice);
                }
                start += sweep;
            }
        });
}

/// Outline of a unit-circle sector starting at 12 o'clock, clockwise.
fn slice_points(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * 96.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for k in 0..=steps {
        let angle = start + sweep * k as f64 / steps as f64;
        points.push([angle.sin(), angle.cos()]);
    }
    points
}

// ---------------------------------------------------------------------------
// CDFs
// ---------------------------------------------------------------------------

fn cdf_plot(ui: &mut Ui, id: &str, unit: &str, x_max: f64, series: &[(&str, &CdfSeries)]) {
    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(unit)
        .y_axis_label("CDF")
        .include_x(0.0)
        .include_x(x_max)
        .include_y(0.0)
        .include_y(1.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (i, (name, cdf)) in series.iter().enumerate() {
                let mut line = Line::new(PlotPoints::from(cdf.points())).name(*name);
                if i > 0 {
                    line = line.style(LineStyle::dashed_loose());
                }
                plot_ui.line(line);
            }
        });
}

fn retry_cdf(ui: &mut Ui, charts: &ChartSet, x_max: f64) {
    let mut series = Vec::new();
    if let Ok(app) = &charts.app_retry_cdf {
        series.push(("Retry % (App)", app));
    }
    if let Ok(mac) = &charts.mac_retry_cdf {
        series.push(("Retry Rate (MAC)", mac));
    }
    if series.is_empty() {
        match (&charts.app_retry_cdf, &charts.mac_retry_cdf) {
            (Err(why), _) | (_, Err(why)) => info(ui, why),
            _ => {}
        }
        return;
    }
    cdf_plot(ui, "retry_cdf", "%", x_max, &series);
}

// ---------------------------------------------------------------------------
// MCS bars
// ---------------------------------------------------------------------------

fn mcs_bars(ui: &mut Ui, initial: &ChartResult<McsUsage>, retry: &ChartResult<McsUsage>) {
    if let (Err(why), Err(_)) = (initial, retry) {
        info(ui, why);
        return;
    }

    const WIDTH: f64 = 0.35;
    let bars = |usage: &McsUsage, offset: f64| -> Vec<Bar> {
        usage
            .bins
            .iter()
            .map(|b| Bar::new(b.index as f64 + offset, b.percent).width(WIDTH))
            .collect()
    };

    Plot::new("mcs_usage")
        .height(CHART_HEIGHT)
        .x_axis_label("MCS Index")
        .y_axis_label("Percentage (%)")
        .include_y(0.0)
        .include_y(100.0)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if let Ok(r0) = initial {
                plot_ui.bar_chart(
                    BarChart::new(bars(r0, -WIDTH / 2.0))
                        .name("R0")
                        .color(Color32::from_rgb(40, 90, 220)),
                );
            }
            if let Ok(r1) = retry {
                plot_ui.bar_chart(
                    BarChart::new(bars(r1, WIDTH / 2.0))
                        .name("R1")
                        .color(Color32::from_rgb(220, 50, 50)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Heatmap
// ---------------------------------------------------------------------------

fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    let n = matrix.labels.len();
    let label_width = 110.0;
    let cell = ((ui.available_width() - label_width) / n as f32).clamp(24.0, 56.0);
    let size = Vec2::new(label_width + cell * n as f32, cell * n as f32 + label_width * 0.6);

    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min;
    let font = FontId::proportional(11.0);

    for i in 0..n {
        let y = origin.y + cell * i as f32;
        painter.text(
            egui::pos2(origin.x + label_width - 4.0, y + cell / 2.0),
            Align2::RIGHT_CENTER,
            matrix.labels[i],
            font.clone(),
            ui.visuals().text_color(),
        );
        for j in 0..n {
            let value = matrix.values[i][j];
            let rect = egui::Rect::from_min_size(
                egui::pos2(origin.x + label_width + cell * j as f32, y),
                Vec2::splat(cell),
            );
            painter.rect_filled(rect.shrink(0.5), 0.0, diverging(value));
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                format!("{value:.2}"),
                font.clone(),
                Color32::BLACK,
            );
        }
    }

    // Column labels, abbreviated to fit under each cell.
    let bottom = origin.y + cell * n as f32 + 2.0;
    for (j, label) in matrix.labels.iter().enumerate() {
        let short: String = label.chars().take(8).collect();
        painter.text(
            egui::pos2(origin.x + label_width + cell * (j as f32 + 0.5), bottom),
            Align2::CENTER_TOP,
            short,
            font.clone(),
            ui.visuals().text_color(),
        );
    }
    response.on_hover_text(format!("{} complete rows", matrix.samples));
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

fn metric(ui: &mut Ui, label: &str, value: String) {
    ui.label(label);
    ui.label(RichText::new(value).size(26.0).strong());
    ui.add_space(8.0);
}

fn burst_modes(ui: &mut Ui, charts: &ChartSet) {
    let show = |cell: &ChartResult<Cell>| match cell {
        Ok(v) => format!("{v}"),
        Err(_) => "N/A".to_string(),
    };
    metric(ui, "MSDU per TXOP", show(&charts.most_msdu));
    metric(ui, "AMPDU per TXOP", show(&charts.most_ampdu));
}

fn sgi_retry(ui: &mut Ui, charts: &ChartSet) {
    ui.columns(2, |cols: &mut [Ui]| {
        match &charts.sgi_share {
            Ok(pct) => metric(&mut cols[0], "SGI %", format!("{pct:.2} %")),
            Err(why) => info(&mut cols[0], why),
        }
        match &charts.mean_retry {
            Ok(pct) => metric(&mut cols[1], "Retry %", format!("{pct:.2} %")),
            Err(why) => info(&mut cols[1], why),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_outline_starts_at_centre() {
        let pts = slice_points(0.0, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        assert!((pts[1][1] - 1.0).abs() < 1e-12);
        let last = pts.last().unwrap();
        assert!((last[0] - 1.0).abs() < 1e-12);
        assert!(last[1].abs() < 1e-12);
    }
}
