use eframe::egui::{CollapsingHeader, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::present;
use crate::state::AppState;

/// Rows rendered per table before truncation; the full views stay
/// available to the charts regardless.
const MAX_TABLE_ROWS: usize = 500;

// ---------------------------------------------------------------------------
// Data tab – raw filtered tables
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
            section(
                ui,
                "Filtered Data (Charts Filters)",
                "annual_table",
                &present::ANNUAL_COLUMNS,
                state
                    .views
                    .annual
                    .iter()
                    .map(|&i| present::annual_row(&session.annual[i]))
                    .collect(),
            );
            section(
                ui,
                "Global Warming by Gas and Source",
                "gas_table",
                &present::GAS_COLUMNS,
                state
                    .views
                    .gas
                    .iter()
                    .map(|&i| present::gas_row(&session.gas[i]))
                    .collect(),
            );
            section(
                ui,
                "Monthly Average Surface Temperatures by Year",
                "monthly_table",
                &present::MONTHLY_COLUMNS,
                state
                    .views
                    .monthly
                    .iter()
                    .map(|&i| present::monthly_row(&session.monthly[i]))
                    .collect(),
            );
            section(
                ui,
                "Contributions to Global Climate Change",
                "share_table",
                &present::SHARE_COLUMNS,
                session.shares.iter().map(present::share_row).collect(),
            );
        });
}

fn section<const N: usize>(
    ui: &mut Ui,
    title: &str,
    id: &str,
    columns: &[&str; N],
    rows: Vec<[String; N]>,
) {
    CollapsingHeader::new(RichText::new(title).strong())
        .id_salt(id)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            if rows.is_empty() {
                ui.label("No rows for the current filters.");
                return;
            }
            let shown = rows.len().min(MAX_TABLE_ROWS);
            if shown < rows.len() {
                ui.label(format!("Showing first {shown} of {} rows.", rows.len()));
            }
            ui.push_id(id, |ui: &mut Ui| {
                TableBuilder::new(ui)
                    .striped(true)
                    .vscroll(false)
                    .columns(Column::auto().resizable(true), N)
                    .header(20.0, |mut header| {
                        for column in columns {
                            header.col(|ui| {
                                ui.strong(*column);
                            });
                        }
                    })
                    .body(|body| {
                        body.rows(18.0, shown, |mut row| {
                            let cells = &rows[row.index()];
                            for cell in cells {
                                row.col(|ui| {
                                    ui.label(cell.as_str());
                                });
                            }
                        });
                    });
            });
        });
}
