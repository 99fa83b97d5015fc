use eframe::egui::{self, Color32, RichText, Stroke, Ui};

use crate::dropzone::Dropzone;
use crate::state::ZonePanel;
use crate::view::{PredictionView, RUNNING_MESSAGE, ResultView};

const ERROR_COLOR: Color32 = Color32::from_rgb(0xfc, 0xa5, 0xa5);
const ACTIVE_STROKE: Color32 = Color32::from_rgb(0x60, 0xa5, 0xfa);
const PREVIEW_MAX_HEIGHT: f32 = 220.0;

/// What the user asked for this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ZoneActions {
    pub analyze: bool,
}

/// Render one zone. Returns the clicked actions and the drop-target rect.
pub fn zone_panel(ui: &mut Ui, panel: &mut ZonePanel) -> (ZoneActions, egui::Rect) {
    let zone = panel.zone();
    let mut actions = ZoneActions::default();

    ui.heading(zone.title());
    ui.add_space(4.0);

    let drop_rect = dropzone_frame(ui, &mut panel.dropzone);
    ui.add_space(6.0);

    let analysis = &panel.analysis;
    ui.horizontal(|ui: &mut Ui| {
        let button = egui::Button::new(analysis.button_label());
        if ui.add_enabled(!analysis.is_busy(), button).clicked() {
            actions.analyze = true;
        }
    });
    ui.add(
        egui::ProgressBar::new(analysis.progress())
            .desired_height(6.0)
            .desired_width(ui.available_width()),
    );
    ui.add_space(6.0);

    result_area(ui, analysis.result());

    (actions, drop_rect)
}

// ---------------------------------------------------------------------------
// Dropzone
// ---------------------------------------------------------------------------

fn dropzone_frame(ui: &mut Ui, dropzone: &mut Dropzone) -> egui::Rect {
    let stroke = if dropzone.is_drag_active() {
        Stroke::new(2.0, ACTIVE_STROKE)
    } else {
        ui.visuals().widgets.noninteractive.bg_stroke
    };

    let frame = egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.vertical_centered(|ui: &mut Ui| {
            ui.label("Drop an image here, or");
            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Choose image…").clicked() {
                    dropzone.pick_file();
                }
                if dropzone.file().is_some() && ui.small_button("Clear").clicked() {
                    dropzone.clear();
                }
            });
            ui.label(RichText::new(dropzone.info()).small());

            if let Some(preview) = dropzone.preview() {
                ui.add(
                    egui::Image::from_bytes(preview.uri.clone(), preview.bytes.clone())
                        .max_height(PREVIEW_MAX_HEIGHT)
                        .maintain_aspect_ratio(true),
                );
            }
        });
    });
    frame.response.rect
}

// ---------------------------------------------------------------------------
// Result area
// ---------------------------------------------------------------------------

fn result_area(ui: &mut Ui, result: &ResultView) {
    match result {
        ResultView::Empty => {}
        ResultView::Running => {
            ui.horizontal(|ui: &mut Ui| {
                ui.spinner();
                ui.label(RUNNING_MESSAGE);
            });
        }
        ResultView::Error(msg) => {
            ui.label(RichText::new(msg).color(ERROR_COLOR));
        }
        ResultView::Prediction(view) => prediction_panel(ui, view),
    }
}

fn prediction_panel(ui: &mut Ui, view: &PredictionView) {
    ui.horizontal_wrapped(|ui: &mut Ui| {
        ui.strong("Prediction:");
        ui.label(&view.label);
        ui.label(RichText::new(format!("({})", view.confidence)).color(Color32::GRAY));
    });

    ui.horizontal_wrapped(|ui: &mut Ui| {
        for tag in view.tags {
            egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
                ui.label(RichText::new(format!("{} {}", tag.icon, tag.text)).small());
            });
        }
    });

    ui.add_space(10.0);
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(&view.heading).strong().size(16.0));
        ui.add_space(6.0);
        // Generic fallback text reads as secondary.
        let what = RichText::new(view.what);
        ui.label(if view.has_education { what } else { what.weak().italics() });
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong("Why it happens:");
            ui.label(view.why);
        });
        ui.horizontal_wrapped(|ui: &mut Ui| {
            ui.strong("What to do next:");
            ui.label(view.next);
        });
        ui.add_space(8.0);
        ui.label(RichText::new(view.disclaimer).small().color(Color32::GRAY));
    });
}
