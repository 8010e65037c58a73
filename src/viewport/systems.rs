use bevy::input::mouse::MouseWheel;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use super::params::CanvasPointer;
use super::transform::Viewport;

#[derive(Component)]
pub struct CanvasCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, CanvasCamera));
}

/// Keep the logical window size in sync so pointer space can be mapped to world space.
pub fn track_window_size(
    window: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<Viewport>,
) {
    let Ok(window) = window.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    if viewport.window_size != size {
        viewport.window_size = size;
    }
}

/// Record the area egui left free after all panels were laid out.
pub fn record_canvas_area(mut contexts: EguiContexts, mut viewport: ResMut<Viewport>) -> Result {
    let available = contexts.ctx_mut()?.available_rect();
    let area = Rect::new(
        available.min.x,
        available.min.y,
        available.max.x,
        available.max.y,
    );
    if viewport.canvas_area != area {
        viewport.canvas_area = area;
    }
    Ok(())
}

pub fn wheel_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    mut pointer: CanvasPointer,
    mut viewport: ResMut<Viewport>,
) {
    let over_canvas = pointer
        .position()
        .is_some_and(|p| viewport.contains_pointer(p));
    if !over_canvas || pointer.blocked() {
        scroll_events.clear();
        return;
    }

    for event in scroll_events.read() {
        viewport.wheel_zoom(event.y);
    }
}
