//! Async load/save systems and task polling.

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::tasks::IoTaskPool;
use futures_lite::future;
use image::DynamicImage;

use crate::annotation::Annotation;
use crate::config::{AddRecentImageRequest, AppConfig};
use crate::paths;
use crate::session::{AnnotationsChanged, PersistAcknowledged, SeedAnnotations};
use crate::viewport::Viewport;

use super::error::StoreError;
use super::io;
use super::source::ImageSource;
use super::{CurrentImage, OpenImageRequest, StoreErrorDialog};

/// Result of an async image fetch and decode
pub struct LoadImageResult {
    pub source: ImageSource,
    pub image: Result<DynamicImage, StoreError>,
}

/// Result of an async sidecar read
pub struct LoadAnnotationsResult {
    pub source: ImageSource,
    pub annotations: Result<Vec<Annotation>, StoreError>,
}

/// Result of an async sidecar write
pub struct SaveAnnotationsResult {
    pub annotations: Result<Vec<Annotation>, StoreError>,
}

#[derive(Component)]
pub struct LoadImageTask(pub bevy::tasks::Task<LoadImageResult>);

#[derive(Component)]
pub struct LoadAnnotationsTask(pub bevy::tasks::Task<LoadAnnotationsResult>);

#[derive(Component)]
pub struct SaveAnnotationsTask(pub bevy::tasks::Task<SaveAnnotationsResult>);

/// Start loading an image and its annotations.
pub fn open_image_system(
    mut commands: Commands,
    mut events: MessageReader<OpenImageRequest>,
    mut current: ResMut<CurrentImage>,
    mut viewport: ResMut<Viewport>,
    mut seed: MessageWriter<SeedAnnotations>,
    mut recent: MessageWriter<AddRecentImageRequest>,
) {
    for event in events.read() {
        let source = ImageSource::parse(&event.source);
        info!("Opening image {:?}", source);

        // Back to the idle "Loading image..." state until the new bitmap arrives
        current.source = Some(source.clone());
        current.handle = None;
        current.loading = true;
        viewport.image_size = None;
        viewport.reset();
        seed.write(SeedAnnotations {
            annotations: Vec::new(),
        });
        recent.write(AddRecentImageRequest {
            source: source.to_config_string(),
        });

        let task_pool = IoTaskPool::get();

        let image_source = source.clone();
        let task = task_pool.spawn(async move {
            let image = io::read_image_bytes(&image_source).and_then(|bytes| io::decode_image(&bytes));
            LoadImageResult {
                source: image_source,
                image,
            }
        });
        commands.spawn(LoadImageTask(task));

        let sidecar = source.sidecar_path(&paths::annotations_dir());
        let task = task_pool.spawn(async move {
            LoadAnnotationsResult {
                annotations: io::load_annotations(&sidecar),
                source,
            }
        });
        commands.spawn(LoadAnnotationsTask(task));
    }
}

pub fn poll_image_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadImageTask)>,
    mut current: ResMut<CurrentImage>,
    mut viewport: ResMut<Viewport>,
    mut images: ResMut<Assets<Image>>,
    mut error_dialog: ResMut<StoreErrorDialog>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        // A newer open superseded this one
        if current.source.as_ref() != Some(&result.source) {
            debug!("Dropping stale image load for {:?}", result.source);
            continue;
        }
        current.loading = false;

        match result.image {
            Ok(dynamic) => {
                let size = Vec2::new(dynamic.width() as f32, dynamic.height() as f32);
                let image = Image::from_dynamic(dynamic, true, RenderAssetUsages::RENDER_WORLD);
                current.handle = Some(images.add(image));
                viewport.image_size = Some(size);
                info!("Loaded {} ({}x{})", result.source.display_name(), size.x, size.y);
            }
            Err(e) => {
                error!("Failed to load image {:?}: {}", result.source, e);
                error_dialog.message = Some(format!(
                    "Could not load {}: {}",
                    result.source.display_name(),
                    e
                ));
            }
        }
    }
}

pub fn poll_annotation_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut LoadAnnotationsTask)>,
    current: Res<CurrentImage>,
    mut seed: MessageWriter<SeedAnnotations>,
    mut error_dialog: ResMut<StoreErrorDialog>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        if current.source.as_ref() != Some(&result.source) {
            continue;
        }

        match result.annotations {
            Ok(annotations) => {
                info!(
                    "Loaded {} annotations for {}",
                    annotations.len(),
                    result.source.display_name()
                );
                seed.write(SeedAnnotations { annotations });
            }
            Err(e) => {
                error!("Failed to load annotations: {}", e);
                error_dialog.message = Some(format!("Could not load annotations: {}", e));
            }
        }
    }
}

/// Persist every committed list change to the sidecar of the current image.
pub fn persist_annotations_system(
    mut commands: Commands,
    mut events: MessageReader<AnnotationsChanged>,
    current: Res<CurrentImage>,
    mut ack: MessageWriter<PersistAcknowledged>,
    mut error_dialog: ResMut<StoreErrorDialog>,
) {
    for event in events.read() {
        let Some(source) = current.source.clone() else {
            warn!("Annotations changed with no image open; not persisted");
            error_dialog.message = Some(StoreError::NoImage.to_string());
            ack.write(PersistAcknowledged { annotations: None });
            continue;
        };

        let annotations = event.annotations.clone();
        let sidecar = source.sidecar_path(&paths::annotations_dir());
        let image = source.to_config_string();
        let task = IoTaskPool::get().spawn(async move {
            SaveAnnotationsResult {
                annotations: io::save_annotations(&sidecar, &image, &annotations),
            }
        });
        commands.spawn(SaveAnnotationsTask(task));
    }
}

pub fn poll_save_tasks(
    mut commands: Commands,
    mut tasks: Query<(Entity, &mut SaveAnnotationsTask)>,
    mut ack: MessageWriter<PersistAcknowledged>,
    mut error_dialog: ResMut<StoreErrorDialog>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.0)) else {
            continue;
        };
        commands.entity(entity).despawn();

        match result.annotations {
            Ok(annotations) => {
                ack.write(PersistAcknowledged {
                    annotations: Some(annotations),
                });
            }
            Err(e) => {
                error!("Failed to save annotations: {}", e);
                error_dialog.message = Some(format!("Could not save annotations: {}", e));
                ack.write(PersistAcknowledged { annotations: None });
            }
        }
    }
}

/// Reopen the last image from config on startup.
pub fn reopen_last_image(config: Res<AppConfig>, mut open: MessageWriter<OpenImageRequest>) {
    if let Some(last) = config.data.last_image.as_ref().filter(|s| !s.trim().is_empty()) {
        info!("Reopening last image {}", last);
        open.write(OpenImageRequest {
            source: last.clone(),
        });
    }
}
