//! Viewport transform engine: fit rectangle, pan, zoom and the conversions
//! between pointer, canvas and image space.

pub mod params;
mod systems;
mod transform;

pub use params::CanvasPointer;
pub use transform::Viewport;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::ui::UiPanels;

pub struct ViewportPlugin;

impl Plugin for ViewportPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                (systems::track_window_size, systems::wheel_zoom),
            )
            .add_systems(
                EguiPrimaryContextPass,
                systems::record_canvas_area.after(UiPanels),
            );
    }
}
