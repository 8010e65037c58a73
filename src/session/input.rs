//! Pointer, keyboard and cursor wiring for the edit session.

use bevy::prelude::*;
use bevy::window::{CursorIcon, PrimaryWindow};

use crate::config::AppConfig;
use crate::viewport::{CanvasPointer, Viewport};

use super::messages::{
    HighlightChanged, PersistAcknowledged, SeedAnnotations, SessionOutput, SetHighlight,
};
use super::state::{EditMode, EditSession, Gesture};

/// Translate mouse input over the canvas into session pointer events.
pub fn handle_canvas_pointer(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut pointer: CanvasPointer,
    mut session: ResMut<EditSession>,
    mut viewport: ResMut<Viewport>,
    mut was_inside: Local<bool>,
) {
    let position = pointer.position();
    let inside = position.is_some_and(|p| viewport.contains_pointer(p));

    if *was_inside && !inside {
        session.pointer_leave();
    }
    *was_inside = inside;

    let Some(position) = position.filter(|_| inside) else {
        if mouse_button.just_released(MouseButton::Left) {
            session.pointer_up();
        }
        return;
    };

    if mouse_button.just_pressed(MouseButton::Left) && !pointer.blocked() {
        session.pointer_down(position, &viewport);
    }

    // Skip the hover work when nothing would change
    if session.gesture != Gesture::None || session.mode == EditMode::Editing {
        session.pointer_move(position, &mut viewport);
    }

    if mouse_button.just_released(MouseButton::Left) {
        session.pointer_up();
    }
}

/// Delete/Backspace, Escape, Ctrl+S and the zoom keys.
pub fn handle_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut pointer: CanvasPointer,
    mut session: ResMut<EditSession>,
    mut viewport: ResMut<Viewport>,
    config: Res<AppConfig>,
    mut output: SessionOutput,
) {
    // Don't trigger if typing in UI or a dialog owns input
    if pointer.keyboard_captured() || pointer.dialog_state.any_modal_open {
        return;
    }

    let ctrl_held = keyboard.pressed(KeyCode::ControlLeft)
        || keyboard.pressed(KeyCode::ControlRight)
        || keyboard.pressed(KeyCode::SuperLeft)
        || keyboard.pressed(KeyCode::SuperRight);

    if keyboard.any_just_pressed([KeyCode::Delete, KeyCode::Backspace]) {
        session.request_delete();
    }

    if keyboard.just_pressed(KeyCode::Escape) {
        match session.mode {
            EditMode::DrawingNew => session.stop_drawing(),
            EditMode::Editing => session.cancel(),
            EditMode::Viewing | EditMode::ConfirmingNewBox => {}
        }
    }

    if ctrl_held
        && keyboard.just_pressed(KeyCode::KeyS)
        && let Some(annotations) = session.save(config.data.actor(), chrono::Utc::now())
    {
        let highlight = session.highlighted;
        output.commit(annotations, highlight, highlight);
    }

    if ctrl_held {
        return;
    }
    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        viewport.zoom_in();
    }
    if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        viewport.zoom_out();
    }
    if keyboard.any_just_pressed([KeyCode::Digit0, KeyCode::Numpad0]) {
        viewport.reset();
    }
}

/// Reflect the session's cursor feedback on the window.
pub fn update_canvas_cursor(
    session: Res<EditSession>,
    viewport: Res<Viewport>,
    mut pointer: CanvasPointer,
    window_query: Query<Entity, With<PrimaryWindow>>,
    mut commands: Commands,
    mut last_icon: Local<Option<CursorIcon>>,
) {
    let Ok(entity) = window_query.single() else {
        return;
    };

    let over_canvas = pointer
        .position()
        .is_some_and(|p| viewport.contains_pointer(p));
    let icon = if over_canvas && (!pointer.blocked() || session.gesture != Gesture::None) {
        session.cursor().cursor_icon()
    } else {
        crate::common::CanvasCursor::Default.cursor_icon()
    };

    if last_icon.as_ref() != Some(&icon) {
        commands.entity(entity).insert(icon.clone());
        *last_icon = Some(icon);
    }
}

pub fn apply_seed(
    mut events: MessageReader<SeedAnnotations>,
    mut session: ResMut<EditSession>,
    mut highlight: MessageWriter<HighlightChanged>,
) {
    for event in events.read() {
        let had_highlight = session.highlighted.is_some();
        session.seed(event.annotations.clone());
        info!("Seeded session with {} annotations", event.annotations.len());
        if had_highlight {
            highlight.write(HighlightChanged { index: None });
        }
    }
}

pub fn apply_persist_ack(
    mut events: MessageReader<PersistAcknowledged>,
    mut session: ResMut<EditSession>,
    mut highlight: MessageWriter<HighlightChanged>,
) {
    for event in events.read() {
        let before = session.highlighted;
        session.persist_acknowledged(event.annotations.clone());
        if session.highlighted != before {
            highlight.write(HighlightChanged {
                index: session.highlighted,
            });
        }
    }
}

pub fn apply_set_highlight(
    mut events: MessageReader<SetHighlight>,
    mut session: ResMut<EditSession>,
    mut highlight: MessageWriter<HighlightChanged>,
) {
    for event in events.read() {
        if session.set_highlight(event.index) {
            highlight.write(HighlightChanged {
                index: session.highlighted,
            });
        }
    }
}

pub fn log_highlight_changes(mut events: MessageReader<HighlightChanged>) {
    for event in events.read() {
        match event.index {
            Some(index) => debug!("Highlighting annotation {}", index),
            None => debug!("Highlight cleared"),
        }
    }
}
