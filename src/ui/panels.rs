use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the server's model status.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.strong("Scan Assist");
        ui.separator();
        ui.label("Brain MRI & chest X-ray classification");

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if let Some(status) = &state.status_message {
                ui.label(RichText::new(status).monospace().color(Color32::GRAY));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Footer
// ---------------------------------------------------------------------------

pub fn footer(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(format!("© {}", state.year)).small());
        ui.separator();
        ui.label(
            RichText::new("For education and research only. Not a medical device.")
                .small()
                .color(Color32::GRAY),
        );
    });
}
