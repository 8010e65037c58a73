//! What to draw for each box this frame, in pointer space.
//!
//! Kept free of Bevy systems so the rendering contract can be tested directly.

use bevy::math::{Rect, Vec2};
use bevy_egui::egui::Color32;

use crate::annotation::{class_color, geometry};
use crate::common::ResizeHandle;
use crate::session::{EditMode, EditSession};
use crate::viewport::Viewport;

pub const STROKE_NORMAL: f32 = 3.0;
pub const STROKE_HOVERED: f32 = 3.5;
pub const STROKE_SELECTED: f32 = 4.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BoxVisual {
    pub index: usize,
    /// Box rectangle in pointer space
    pub rect: Rect,
    pub color: Color32,
    pub stroke_width: f32,
    /// Translucent fill for selected, hovered or highlighted boxes
    pub filled: bool,
    pub highlighted: bool,
    pub label: String,
    /// Handle centers, only for the selected box while editing
    pub handles: Vec<Vec2>,
}

impl BoxVisual {
    pub fn emphasized(&self) -> bool {
        self.stroke_width > STROKE_NORMAL
    }
}

/// Map a canvas-space rect into pointer space.
fn canvas_rect_to_pointer(rect: Rect, viewport: &Viewport) -> Rect {
    Rect::from_corners(
        viewport.canvas_to_pointer(rect.min),
        viewport.canvas_to_pointer(rect.max),
    )
}

/// Visuals in draw order (index order, so the last box is on top). Empty while idle.
pub fn build_overlay(session: &EditSession, viewport: &Viewport) -> Vec<BoxVisual> {
    let editing = session.mode != EditMode::Viewing;

    session
        .working
        .iter()
        .enumerate()
        .filter_map(|(index, annotation)| {
            let rect = canvas_rect_to_pointer(
                geometry::to_screen_rect(annotation, viewport)?,
                viewport,
            );
            let selected = editing && session.selected == Some(index);
            let hovered = editing && session.hovered == Some(index);
            let highlighted = session.highlighted == Some(index);

            let stroke_width = if selected {
                STROKE_SELECTED
            } else if hovered {
                STROKE_HOVERED
            } else {
                STROKE_NORMAL
            };

            let handles = if selected && session.mode == EditMode::Editing {
                ResizeHandle::ALL.iter().map(|h| h.anchor(rect)).collect()
            } else {
                Vec::new()
            };

            Some(BoxVisual {
                index,
                rect,
                color: class_color(&annotation.class_label),
                stroke_width,
                filled: selected || hovered || highlighted,
                highlighted,
                label: annotation.label_text(),
                handles,
            })
        })
        .collect()
}

/// The rubber-band rectangle of an in-progress draw, in pointer space.
pub fn draw_preview_rect(session: &EditSession, viewport: &Viewport) -> Option<Rect> {
    let image_rect = session.draw_preview()?;
    if viewport.is_idle() {
        return None;
    }
    Some(Rect::from_corners(
        viewport.image_to_screen(image_rect.min),
        viewport.image_to_screen(image_rect.max),
    ))
}
