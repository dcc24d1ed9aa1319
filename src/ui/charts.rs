use std::ops::RangeInclusive;

use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::data::aggregate;
use crate::data::model::{GasSeries, Session};
use crate::data::present;
use crate::state::AppState;

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ---------------------------------------------------------------------------
// Charts tab
// ---------------------------------------------------------------------------

pub fn show(ui: &mut Ui, state: &AppState) {
    let session = match &state.session {
        Some(s) => s,
        None => {
            super::empty_state(ui);
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            scatter_chart(ui, state, session);
            ui.add_space(16.0);
            monthly_chart(ui, state, session);
            ui.add_space(16.0);
            // Per-country variability makes no sense for a single
            // selection; shown for the all-countries view only.
            if state.filters.entity.is_none() {
                variability_chart(ui, session);
                ui.add_space(16.0);
            }
            gas_chart(ui, state, session);
        });
}

// ---------------------------------------------------------------------------
// Scatter: temperature change over time
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, state: &AppState, session: &Session) {
    let shown = state.filters.entity.as_deref().unwrap_or("All Countries");
    ui.heading(format!("Temperature Change Over Time – {shown}"));

    let series = present::scatter_series(&session.annual, &state.views.scatter);
    if series.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let max_abs = color::max_abs(
        state
            .views
            .scatter
            .iter()
            .map(|&i| session.annual[i].value),
    );

    Plot::new("scatter_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Year")
        .y_axis_label("Temp Change (°C)")
        .show(ui, |plot_ui| {
            for s in &series {
                let mean = s.points.iter().map(|p| p[1]).sum::<f64>() / s.points.len() as f64;
                let points: PlotPoints = PlotPoints::from(s.points.clone());
                plot_ui.points(
                    Points::new(points)
                        .name(&s.entity)
                        .color(color::diverging(mean / max_abs))
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Monthly lines: one line per year, hotter years darker
// ---------------------------------------------------------------------------

fn monthly_chart(ui: &mut Ui, state: &AppState, session: &Session) {
    ui.heading(format!(
        "Monthly Average Temperature Change – {}",
        state.views.resolved_entity
    ));

    let yearly_avg = aggregate::grouped_mean(state.views.monthly.iter().map(|&i| {
        let r = &session.monthly[i];
        (r.year, r.value)
    }));
    let series = present::monthly_series(&session.monthly, &state.views.monthly, &yearly_avg);
    if series.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    // Rank years by their average so the ramp spreads over the shown span.
    let (avg_lo, avg_hi) = yearly_avg
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let avg_span = (avg_hi - avg_lo).max(f64::EPSILON);

    Plot::new("monthly_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Month")
        .y_axis_label("Monthly Avg Temp Change (°C)")
        .x_axis_formatter(|mark: GridMark, _range: &RangeInclusive<f64>| {
            let month = mark.value.round();
            if (1.0..=12.0).contains(&month) && (mark.value - month).abs() < 1e-6 {
                MONTH_LABELS[month as usize - 1].to_string()
            } else {
                String::new()
            }
        })
        .show(ui, |plot_ui| {
            for s in &series {
                let color = match s.yearly_avg {
                    Some(avg) => color::sequential_red((avg - avg_lo) / avg_span),
                    None => Color32::GRAY,
                };
                plot_ui.line(
                    Line::new(PlotPoints::from(s.points.clone()))
                        .name(s.year.to_string())
                        .color(color)
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Variability bars: countries that calmed down after the pivot year
// ---------------------------------------------------------------------------

fn variability_chart(ui: &mut Ui, session: &Session) {
    ui.heading("Countries with Decreasing Temperature Variability");

    let rows = aggregate::variability_delta(&session.annual, session.config.pivot_year);
    if rows.is_empty() {
        ui.label("No countries with decreasing variability.");
        return;
    }

    let max_abs = color::max_abs(rows.iter().map(|r| r.delta));
    let bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.delta)
                .name(&r.entity)
                .width(0.7)
                .fill(color::diverging(r.delta / max_abs))
        })
        .collect();
    let chart = BarChart::new(bars)
        .horizontal()
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}: {:.3}", bar.name, bar.value)
        }));

    let height = (rows.len() as f32 * 14.0).clamp(200.0, 600.0);
    Plot::new("variability_plot")
        .height(height)
        .x_axis_label("Δ Std Dev (late – early)")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

// ---------------------------------------------------------------------------
// Gas stacks: warming contribution by gas and source
// ---------------------------------------------------------------------------

fn gas_chart(ui: &mut Ui, state: &AppState, session: &Session) {
    ui.heading(format!(
        "Warming by Gas and Source ({})",
        state.views.resolved_entity
    ));

    let stacks = present::gas_stacks(&session.gas, &state.views.gas);
    if stacks.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    // One color per series position so colors stay stable when a
    // series has no rows in view.
    let palette = color::generate_palette(GasSeries::ALL.len());

    let mut layers: Vec<BarChart> = Vec::new();
    for stack in &stacks {
        let label = stack.series.to_string();
        let position = GasSeries::ALL
            .iter()
            .position(|s| *s == stack.series)
            .unwrap_or(0);
        let bars: Vec<Bar> = stack
            .bars
            .iter()
            .map(|p| Bar::new(p[0], p[1]).width(0.8).name(&label))
            .collect();
        let mut chart = BarChart::new(bars).name(&label).color(palette[position]);
        {
            let below: Vec<&BarChart> = layers.iter().collect();
            chart = chart.stack_on(&below);
        }
        layers.push(chart);
    }

    Plot::new("gas_plot")
        .legend(Legend::default())
        .height(320.0)
        .x_axis_label("Year")
        .y_axis_label("Temp Change (°C)")
        .show(ui, |plot_ui| {
            for chart in layers {
                plot_ui.bar_chart(chart);
            }
        });
}
