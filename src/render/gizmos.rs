//! Box outlines, the highlight ring and the rubber band, drawn as gizmos.

use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

use crate::session::EditSession;
use crate::theme;
use crate::viewport::Viewport;

use super::overlay::{self, STROKE_HOVERED, STROKE_NORMAL, STROKE_SELECTED};

/// Pixels between a highlighted box and its outer ring
const HIGHLIGHT_GAP: f32 = 3.0;

/// Outlines of boxes that are neither hovered nor selected
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct BoxGizmoGroup;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct HoverGizmoGroup;

/// Selected outline and the highlight ring
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct EmphasisGizmoGroup;

pub fn configure_box_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<BoxGizmoGroup>();
    config.line.width = STROKE_NORMAL;

    let (config, _) = config_store.config_mut::<HoverGizmoGroup>();
    config.line.width = STROKE_HOVERED;

    let (config, _) = config_store.config_mut::<EmphasisGizmoGroup>();
    config.line.width = STROKE_SELECTED;
}

/// Center and size of a pointer-space rect in world space.
fn world_rect(rect: Rect, viewport: &Viewport) -> (Vec2, Vec2) {
    (viewport.pointer_to_world(rect.center()), rect.size())
}

pub fn draw_box_outlines(
    mut normal: Gizmos<BoxGizmoGroup>,
    mut hovered: Gizmos<HoverGizmoGroup>,
    mut emphasis: Gizmos<EmphasisGizmoGroup>,
    session: Res<EditSession>,
    viewport: Res<Viewport>,
) {
    for visual in overlay::build_overlay(&session, &viewport) {
        let (center, size) = world_rect(visual.rect, &viewport);
        let iso = Isometry2d::from_translation(center);
        let color = theme::egui_to_bevy(visual.color);

        if visual.stroke_width >= STROKE_SELECTED {
            emphasis.rect_2d(iso, size, color);
        } else if visual.emphasized() {
            hovered.rect_2d(iso, size, color);
        } else {
            normal.rect_2d(iso, size, color);
        }

        if visual.highlighted {
            emphasis.rect_2d(
                iso,
                size + Vec2::splat(HIGHLIGHT_GAP * 2.0),
                theme::HIGHLIGHT_OUTLINE,
            );
        }
    }
}

pub fn draw_new_box_preview(
    mut gizmos: Gizmos<BoxGizmoGroup>,
    session: Res<EditSession>,
    viewport: Res<Viewport>,
) {
    let Some(rect) = overlay::draw_preview_rect(&session, &viewport) else {
        return;
    };
    let (center, size) = world_rect(rect, &viewport);
    gizmos.rect_2d(
        Isometry2d::from_translation(center),
        size,
        theme::DRAFT_OUTLINE,
    );
}
