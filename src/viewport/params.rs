//! SystemParam bundle for reading the pointer over the canvas.
//!
//! Both the wheel zoom and the edit session need the same three things: the
//! primary window's cursor, whether egui owns the pointer, and whether a modal
//! dialog is open. Bundling them keeps those systems under the parameter limit.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContexts;

use crate::ui::DialogState;

#[derive(SystemParam)]
pub struct CanvasPointer<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub contexts: EguiContexts<'w, 's>,
    pub dialog_state: Res<'w, DialogState>,
}

impl CanvasPointer<'_, '_> {
    /// Cursor position in pointer space, if the cursor is inside the window
    pub fn position(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    /// True when egui or a modal dialog should receive pointer input instead of the canvas
    pub fn blocked(&mut self) -> bool {
        self.dialog_state.any_modal_open || is_cursor_over_ui(&mut self.contexts)
    }

    /// True when egui has keyboard focus (a text field is being edited)
    pub fn keyboard_captured(&mut self) -> bool {
        self.contexts
            .ctx_mut()
            .map(|ctx| ctx.wants_keyboard_input())
            .unwrap_or(false)
    }
}

/// Check if the cursor is over egui UI
pub fn is_cursor_over_ui(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false)
}
