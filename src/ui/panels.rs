use std::path::Path;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::loader;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let session = match &state.session {
        Some(s) => s,
        None => {
            ui.label("No data loaded.");
            return;
        }
    };

    // Clone what we need so we can mutate state inside the widgets.
    let entities = session.entities.clone();
    let years = session.years.clone();
    let (span_lo, span_hi) = session.year_span;

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Country selector ----
            ui.strong("Country");
            let current_entity = state
                .filters
                .entity
                .clone()
                .unwrap_or_else(|| "All".to_string());
            egui::ComboBox::from_id_salt("country_filter")
                .selected_text(&current_entity)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.filters.entity.is_none(), "All")
                        .clicked()
                    {
                        state.filters.entity = None;
                        changed = true;
                    }
                    for entity in &entities {
                        if ui
                            .selectable_label(current_entity == *entity, entity)
                            .clicked()
                        {
                            state.filters.entity = Some(entity.clone());
                            changed = true;
                        }
                    }
                });
            ui.separator();

            // ---- Year selector ----
            ui.strong("Year");
            let current_year = state
                .filters
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "All".to_string());
            egui::ComboBox::from_id_salt("year_filter")
                .selected_text(&current_year)
                .show_ui(ui, |ui: &mut Ui| {
                    if ui
                        .selectable_label(state.filters.year.is_none(), "All")
                        .clicked()
                    {
                        state.filters.year = None;
                        changed = true;
                    }
                    for &year in &years {
                        if ui
                            .selectable_label(state.filters.year == Some(year), year.to_string())
                            .clicked()
                        {
                            state.filters.year = Some(year);
                            changed = true;
                        }
                    }
                });
            ui.separator();

            // ---- Year range (inclusive, lower kept <= upper) ----
            ui.strong("Year range");
            let mut lower = state.filters.year_range.0;
            if ui
                .add(egui::Slider::new(&mut lower, span_lo..=span_hi).text("From"))
                .changed()
            {
                state.filters.set_range_lower(lower);
                changed = true;
            }
            let mut upper = state.filters.year_range.1;
            if ui
                .add(egui::Slider::new(&mut upper, span_lo..=span_hi).text("To"))
                .changed()
            {
                state.filters.set_range_upper(upper);
                changed = true;
            }
        });

    // Recompute the cached views after any widget change.
    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(session) = &state.session {
            ui.label(format!(
                "{} countries, {} annual rows, {} visible",
                session.entities.len(),
                session.annual.len(),
                state.views.annual.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Data directory loading
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open climate data folder")
        .pick_folder();

    if let Some(dir) = folder {
        load_data_dir(state, &dir);
    }
}

/// Load a session from `dir` into the state; on failure the previous
/// session stays and the error is surfaced in the status bar.
pub fn load_data_dir(state: &mut AppState, dir: &Path) {
    state.loading = true;
    match loader::load_session(dir) {
        Ok(session) => {
            log::info!(
                "Loaded {} annual, {} monthly, {} gas, {} share rows ({} countries in all tables)",
                session.annual.len(),
                session.monthly.len(),
                session.gas.len(),
                session.shares.len(),
                session.entities.len()
            );
            state.set_session(session);
        }
        Err(e) => {
            log::error!("Failed to load data directory: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
            state.loading = false;
        }
    }
}
