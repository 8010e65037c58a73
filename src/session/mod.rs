//! Edit session: view/edit/draw modes, selection, gestures and the commit protocol.
//!
//! ## Module Structure
//!
//! - [`state`] - The [`EditSession`] state machine (pure, tested without an `App`)
//! - [`draft`] - Form state and validation for a just-drawn box
//! - [`messages`] - Messages crossing the session boundary
//! - `input` - Pointer, keyboard and cursor systems

pub mod draft;
mod input;
pub mod messages;
pub mod state;


pub use messages::{
    AnnotationsChanged, PersistAcknowledged, SeedAnnotations, SessionOutput, SetHighlight,
};
pub use state::{EditMode, EditSession};

use bevy::prelude::*;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EditSession>()
            .add_message::<AnnotationsChanged>()
            .add_message::<messages::HighlightChanged>()
            .add_message::<SetHighlight>()
            .add_message::<SeedAnnotations>()
            .add_message::<PersistAcknowledged>()
            .add_systems(
                Update,
                (
                    input::apply_seed.run_if(on_message::<SeedAnnotations>),
                    input::apply_persist_ack.run_if(on_message::<PersistAcknowledged>),
                    input::apply_set_highlight.run_if(on_message::<SetHighlight>),
                    input::handle_shortcuts,
                    input::handle_canvas_pointer,
                    input::update_canvas_cursor,
                    input::log_highlight_changes.run_if(on_message::<messages::HighlightChanged>),
                )
                    .chain(),
            );
    }
}
