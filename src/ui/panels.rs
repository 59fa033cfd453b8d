use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::Choice;
use crate::state::AppState;

const ALL_LABEL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    if state.dataset.is_none() {
        ui.label("No dataset loaded.");
        return;
    }

    // Clone what we need so we can mutate state inside the closures.
    let options = state.options.clone();

    ui.strong("RSSI Quality");
    let mut category = state.filters.category.clone();
    choice_combo(ui, "rssi_filter", &mut category, &options.categories, |c| {
        c.label().to_string()
    });
    state.set_category(category);
    ui.add_space(6.0);

    ui.strong("Device");
    let mut device = state.filters.device.clone();
    choice_combo(ui, "device_filter", &mut device, &options.devices, String::clone);
    state.set_device(device);
    ui.add_space(6.0);

    ui.strong("Traffic");
    let mut traffic = state.filters.traffic.clone();
    choice_combo(ui, "traffic_filter", &mut traffic, &options.traffic, String::clone);
    state.set_traffic(traffic);

    ui.separator();
    ui.small(format!("CDF formula: {:?}", state.config.cdf_method));
}

/// A combo box offering "All" followed by every observed value.
fn choice_combo<T: Clone + PartialEq>(
    ui: &mut Ui,
    id: &str,
    current: &mut Choice<T>,
    values: &[T],
    label: impl Fn(&T) -> String,
) {
    let selected_text = match current.as_only() {
        Some(v) => label(v),
        None => ALL_LABEL.to_string(),
    };

    egui::ComboBox::from_id_salt(id)
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(*current == Choice::All, ALL_LABEL)
                .clicked()
            {
                *current = Choice::All;
            }
            for v in values {
                let is_selected = current.as_only() == Some(v);
                if ui.selectable_label(is_selected, label(v)).clicked() {
                    *current = Choice::Only(v.clone());
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some((total, visible)) = state.row_counts() {
            ui.label(format!("{total} rows loaded, {visible} visible"));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open measurement table")
        .add_filter("Supported files", &["csv", "tsv", "tab", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("TSV", &["tsv", "tab"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        if let Err(e) = state.load(&path) {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
