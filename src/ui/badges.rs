use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::session::{EditMode, EditSession};
use crate::theme;
use crate::viewport::Viewport;

use super::detection_panel::anomaly_count_text;

/// Badge text and color for the current mode, if any badge applies.
fn status_badge(session: &EditSession) -> Option<(String, egui::Color32)> {
    match session.mode {
        EditMode::Viewing if !session.working.is_empty() => Some((
            anomaly_count_text(session.working.len()),
            theme::ui::COUNT_BADGE,
        )),
        EditMode::Viewing => None,
        EditMode::Editing | EditMode::ConfirmingNewBox => {
            let text = if session.selected.is_some() {
                "Edit Mode: Move or resize box"
            } else {
                "Edit Mode: Click a box to select"
            };
            Some((text.to_string(), theme::ui::EDIT_BADGE))
        }
        EditMode::DrawingNew => Some((
            "Draw Mode: Drag to draw a new box".to_string(),
            theme::ui::DRAW_BADGE,
        )),
    }
}

/// Mode badge in the canvas corner, or the placeholder while no image is shown
pub fn status_badges_ui(
    mut contexts: EguiContexts,
    session: Res<EditSession>,
    viewport: Res<Viewport>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let area = viewport.canvas_area;

    if viewport.is_idle() {
        egui::Area::new(egui::Id::new("canvas_placeholder"))
            .fixed_pos(egui::pos2(area.center().x, area.center().y))
            .pivot(egui::Align2::CENTER_CENTER)
            .interactable(false)
            .order(egui::Order::Background)
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new("Loading image...")
                        .color(theme::ui::HINT_TEXT)
                        .size(16.0),
                );
            });
        return Ok(());
    }

    let Some((text, color)) = status_badge(&session) else {
        return Ok(());
    };

    egui::Area::new(egui::Id::new("canvas_status_badge"))
        .fixed_pos(egui::pos2(area.min.x + 12.0, area.min.y + 12.0))
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::new()
                .fill(color)
                .corner_radius(4.0)
                .inner_margin(egui::Margin::symmetric(10, 4))
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(text)
                            .color(egui::Color32::WHITE)
                            .size(12.0)
                            .strong(),
                    );
                });
        });

    Ok(())
}
