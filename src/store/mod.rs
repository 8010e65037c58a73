//! Persistence boundary: image loading and annotation sidecar files.
//!
//! All I/O runs on the `IoTaskPool`; results come back as result structs polled
//! each frame, the same way for loads and saves.
//!
//! ## Module Structure
//!
//! - [`source`] - Image references (path or URL) and their sidecar locations
//! - [`record`] - On-disk detection format
//! - [`io`] - Blocking read/write/decode helpers
//! - [`error`] - [`StoreError`](error::StoreError)
//! - `tasks` - Systems that spawn and poll the async work

pub mod error;
pub mod io;
pub mod record;
pub mod source;
mod tasks;

pub use source::ImageSource;

use bevy::prelude::*;

use crate::config::ConfigLoaded;

/// Open an image by path or URL
#[derive(Message, Clone, Debug)]
pub struct OpenImageRequest {
    pub source: String,
}

/// The image currently shown on the canvas
#[derive(Resource, Default)]
pub struct CurrentImage {
    pub source: Option<ImageSource>,
    pub handle: Option<Handle<Image>>,
    /// True between an open request and the bitmap arriving (or failing)
    pub loading: bool,
}

/// Store failures waiting to be shown to the operator
#[derive(Resource, Default)]
pub struct StoreErrorDialog {
    pub message: Option<String>,
}

pub struct StorePlugin;

impl Plugin for StorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentImage>()
            .init_resource::<StoreErrorDialog>()
            .add_message::<OpenImageRequest>()
            .add_systems(Startup, tasks::reopen_last_image.after(ConfigLoaded))
            .add_systems(
                Update,
                (
                    tasks::open_image_system.run_if(on_message::<OpenImageRequest>),
                    tasks::poll_image_tasks,
                    tasks::poll_annotation_tasks,
                    tasks::persist_annotations_system
                        .run_if(on_message::<crate::session::AnnotationsChanged>),
                    tasks::poll_save_tasks,
                ),
            );
    }
}
