use std::time::{Duration, Instant};

use eframe::egui;

use crate::dropzone::SelectedFile;
use crate::inference::model::Zone;
use crate::state::AppState;
use crate::ui::{panels, zone};

/// Repaint cadence while a request or progress reset is outstanding.
const TICK: Duration = Duration::from_millis(50);

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct ScanAssistApp {
    pub state: AppState,
    /// Zone panel rects from the previous frame, for routing file drops.
    drop_targets: Vec<(Zone, egui::Rect)>,
}

impl ScanAssistApp {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            drop_targets: Vec::new(),
        }
    }

    /// Zone under the pointer, if any.
    fn target_at(&self, pos: Option<egui::Pos2>) -> Option<Zone> {
        let pos = pos?;
        self.drop_targets
            .iter()
            .find(|(_, rect)| rect.contains(pos))
            .map(|(zone, _)| *zone)
    }

    /// Highlight the hovered zone and hand dropped files to it.
    fn route_file_drag(&mut self, ctx: &egui::Context) {
        let (hovering, dropped, pointer) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
                i.pointer.latest_pos(),
            )
        });
        let target = self.target_at(pointer);

        for panel in &mut self.state.panels {
            if hovering && target == Some(panel.zone()) {
                panel.dropzone.drag_over();
            } else {
                panel.dropzone.drag_leave();
            }
        }

        if dropped.is_empty() {
            return;
        }
        let first = dropped.first().map(SelectedFile::from_dropped);
        self.state.drop_file(target, first);
    }
}

impl eframe::App for ScanAssistApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.poll(Instant::now());
        self.route_file_drag(ctx);

        // ---- Top panel: title + model status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Bottom panel: footer ----
        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui, &self.state);
        });

        // ---- Central panel: one column per zone ----
        let mut targets = Vec::with_capacity(self.state.panels.len());
        let mut to_analyze = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    let n = self.state.panels.len();
                    ui.columns(n, |columns| {
                        for (col, panel) in columns.iter_mut().zip(self.state.panels.iter_mut()) {
                            let (actions, rect) = zone::zone_panel(col, panel);
                            targets.push((panel.zone(), rect));
                            if actions.analyze {
                                to_analyze.push(panel.zone());
                            }
                        }
                    });
                });
        });
        self.drop_targets = targets;

        for zone in to_analyze {
            self.state.analyze(zone);
        }

        if self.state.needs_tick() {
            ctx.request_repaint_after(TICK);
        }
    }
}
