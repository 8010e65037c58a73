//! Canvas rendering: the image sprite, box outlines as gizmos and the egui
//! overlay for fills, handles and class tags.
//!
//! Everything here reads [`EditSession`](crate::session::EditSession) and
//! [`Viewport`](crate::viewport::Viewport) and never writes them.

mod gizmos;
mod image;
mod labels;
pub mod overlay;

use gizmos::{BoxGizmoGroup, EmphasisGizmoGroup, HoverGizmoGroup};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::ui::UiPanels;

pub struct RenderPlugin;

impl Plugin for RenderPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<BoxGizmoGroup>()
            .init_gizmo_group::<HoverGizmoGroup>()
            .init_gizmo_group::<EmphasisGizmoGroup>()
            .add_systems(
                Startup,
                (gizmos::configure_box_gizmos, image::spawn_canvas_image),
            )
            .add_systems(
                Update,
                (
                    image::sync_canvas_image,
                    gizmos::draw_box_outlines,
                    gizmos::draw_new_box_preview,
                ),
            )
            .add_systems(
                EguiPrimaryContextPass,
                labels::paint_box_labels.after(UiPanels),
            );
    }
}
