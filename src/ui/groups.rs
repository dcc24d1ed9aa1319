use eframe::egui::{ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use crate::color;
use crate::data::aggregate::{self, five_year_bucket};
use crate::data::model::{GroupLabel, Session};
use crate::data::present;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Developed vs Developing tab
// ---------------------------------------------------------------------------

/// All sources here read the range-only view: the Groups tab reacts to
/// the year-range slider but never to the country/year selectors.
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
            ui.heading("Average Temperature Change: Developed vs Developing");
            ui.add_space(4.0);
            yearly_mean_chart(ui, state, session);
            ui.add_space(16.0);
            bucket_mean_chart(ui, state, session);
            ui.add_space(16.0);
            share_chart(ui, state, session);
        });
}

// ---------------------------------------------------------------------------
// Yearly group means
// ---------------------------------------------------------------------------

fn yearly_mean_chart(ui: &mut Ui, state: &AppState, session: &Session) {
    let (lo, hi) = state.filters.year_range;
    ui.strong(format!("Average Temp Change ({lo}–{hi})"));

    let means = aggregate::grouped_mean(state.views.range_only.iter().map(|&i| {
        let r = &session.annual[i];
        ((r.year, r.group), r.value)
    }));
    let series = present::group_series(&means);
    if series.is_empty() {
        ui.label("No data in the selected year range.");
        return;
    }

    Plot::new("group_year_plot")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label("Year")
        .y_axis_label("Avg Temp Change (°C)")
        .show(ui, |plot_ui| {
            for s in &series {
                let c = color::group_color(s.group);
                plot_ui.line(
                    Line::new(PlotPoints::from(s.points.clone()))
                        .name(s.group.to_string())
                        .color(c)
                        .width(1.5),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(s.points.clone()))
                        .color(c)
                        .radius(2.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// 5-year bucket group means
// ---------------------------------------------------------------------------

fn bucket_mean_chart(ui: &mut Ui, state: &AppState, session: &Session) {
    ui.strong("5-Year Avg Temp Change by Development Status");

    let means = aggregate::grouped_mean(state.views.range_only.iter().map(|&i| {
        let r = &session.annual[i];
        ((five_year_bucket(r.year), r.group), r.value)
    }));
    let series = present::group_series(&means);
    if series.is_empty() {
        ui.label("No data in the selected year range.");
        return;
    }

    Plot::new("group_bucket_plot")
        .legend(Legend::default())
        .height(300.0)
        .x_axis_label("5-Year Group")
        .y_axis_label("Avg Temp Change (°C)")
        .show(ui, |plot_ui| {
            for s in &series {
                // Buckets are 5 wide; put the two group bars side by side.
                let offset = match s.group {
                    GroupLabel::Developed => -1.05,
                    GroupLabel::Developing => 1.05,
                };
                let bars: Vec<Bar> = s
                    .points
                    .iter()
                    .map(|p| Bar::new(p[0] + offset, p[1]).width(2.0))
                    .collect();
                plot_ui.bar_chart(
                    BarChart::new(bars)
                        .name(s.group.to_string())
                        .color(color::group_color(s.group)),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Contribution shares of the bloc aggregates
// ---------------------------------------------------------------------------

fn share_chart(ui: &mut Ui, state: &AppState, session: &Session) {
    ui.strong("Share of Contribution to Global Warming – Developed vs Developing Blocs");

    let series = present::share_series(&session.shares, &state.views.share);
    if series.is_empty() {
        ui.label("No contribution-share data loaded.");
        return;
    }

    let palette = color::generate_palette(series.len());
    Plot::new("share_plot")
        .legend(Legend::default())
        .height(280.0)
        .x_axis_label("Year")
        .y_axis_label("Share of contribution (%)")
        .show(ui, |plot_ui| {
            for (i, s) in series.iter().enumerate() {
                plot_ui.line(
                    Line::new(PlotPoints::from(s.points.clone()))
                        .name(&s.entity)
                        .color(palette[i])
                        .width(1.5)
                        .fill(0.0),
                );
            }
        });
}
