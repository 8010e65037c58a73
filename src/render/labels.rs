//! Fills, resize handles and class tags, painted with egui on the canvas area.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::constants::{HANDLE_SIZE, LABEL_FONT_SIZE, LABEL_PADDING};
use crate::session::EditSession;
use crate::theme;
use crate::viewport::Viewport;

use super::overlay::{self, BoxVisual};

fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_max(
        egui::pos2(rect.min.x, rect.min.y),
        egui::pos2(rect.max.x, rect.max.y),
    )
}

fn paint_box(painter: &egui::Painter, visual: &BoxVisual) {
    let rect = to_egui_rect(visual.rect);

    if visual.filled {
        painter.rect_filled(
            rect,
            0.0,
            theme::with_alpha(visual.color, theme::EMPHASIS_FILL_ALPHA),
        );
    }

    // Same on-screen size as the handle hit zone
    for anchor in &visual.handles {
        painter.rect_filled(
            egui::Rect::from_center_size(
                egui::pos2(anchor.x, anchor.y),
                egui::vec2(HANDLE_SIZE, HANDLE_SIZE),
            ),
            0.0,
            visual.color,
        );
    }

    let galley = painter.layout_no_wrap(
        visual.label.clone(),
        egui::FontId::proportional(LABEL_FONT_SIZE),
        egui::Color32::WHITE,
    );
    let text_size = galley.size();
    let tag = egui::Rect::from_min_size(
        egui::pos2(
            rect.min.x,
            rect.min.y - text_size.y - LABEL_PADDING * 2.0,
        ),
        text_size + egui::vec2(LABEL_PADDING * 2.0, LABEL_PADDING * 2.0),
    );
    painter.rect_filled(
        tag,
        0.0,
        theme::with_alpha(visual.color, theme::LABEL_BACKGROUND_ALPHA),
    );
    painter.galley(
        tag.min + egui::vec2(LABEL_PADDING, LABEL_PADDING),
        galley,
        egui::Color32::WHITE,
    );
}

pub fn paint_box_labels(
    mut contexts: EguiContexts,
    session: Res<EditSession>,
    viewport: Res<Viewport>,
) -> Result {
    let visuals = overlay::build_overlay(&session, &viewport);
    if visuals.is_empty() {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;
    let painter = ctx
        .layer_painter(egui::LayerId::background())
        .with_clip_rect(to_egui_rect(viewport.canvas_area));

    for visual in &visuals {
        paint_box(&painter, visual);
    }
    Ok(())
}
