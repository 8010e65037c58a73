use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{DEFAULT_ACTOR_ID, MAX_RECENT_IMAGES};

/// Startup systems that need the loaded config order themselves after this set
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

fn default_actor_id() -> String {
    DEFAULT_ACTOR_ID.to_string()
}

/// Application configuration persisted to disk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfigData {
    /// Identity stamped into createdBy/modifiedBy of edited annotations
    #[serde(default = "default_actor_id")]
    pub actor_id: String,

    /// Last opened image (path or URL), reopened on startup
    #[serde(default)]
    pub last_image: Option<String>,

    /// Recently opened images for quick access, most recent first
    #[serde(default)]
    pub recent_images: Vec<String>,
}

impl Default for AppConfigData {
    fn default() -> Self {
        Self {
            actor_id: default_actor_id(),
            last_image: None,
            recent_images: Vec::new(),
        }
    }
}

impl AppConfigData {
    /// Move `source` to the front of the recent list and remember it as the last image.
    pub fn push_recent(&mut self, source: &str) {
        self.recent_images.retain(|s| s != source);
        self.recent_images.insert(0, source.to_string());
        self.recent_images.truncate(MAX_RECENT_IMAGES);
        self.last_image = Some(source.to_string());
    }

    /// The actor id, or the default when the field was cleared.
    pub fn actor(&self) -> &str {
        let trimmed = self.actor_id.trim();
        if trimmed.is_empty() {
            DEFAULT_ACTOR_ID
        } else {
            trimmed
        }
    }
}

#[derive(Resource)]
pub struct AppConfig {
    pub data: AppConfigData,
    pub config_path: PathBuf,
    /// Set by every mutation, cleared once written
    pub dirty: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: AppConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Raised when a broken config file was replaced with defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    pub show: bool,
    pub reason: Option<String>,
}

/// Write the config if it is dirty
#[derive(Message)]
pub struct SaveConfigRequest;

/// Remember an opened image in the recent list
#[derive(Message)]
pub struct AddRecentImageRequest {
    pub source: String,
}

/// Message to change the actor identity
#[derive(Message)]
pub struct SetActorRequest {
    pub actor_id: String,
}

fn parse_config(json: &str) -> (AppConfigData, Option<String>) {
    serde_json::from_str(json)
        .map(|data| (data, None))
        .unwrap_or_else(|e| {
            warn!("Config file is not valid JSON: {}", e);
            (
                AppConfigData::default(),
                Some(format!("Configuration file was corrupted: {}", e)),
            )
        })
}

/// Read the config file. The second value explains a fallback to defaults.
fn read_config(path: &std::path::Path) -> (AppConfigData, Option<String>) {
    match std::fs::read_to_string(path) {
        Ok(json) => parse_config(&json),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            info!("No config at {:?}; starting with defaults", path);
            (AppConfigData::default(), None)
        }
        Err(e) => {
            warn!("Could not read {:?}: {}", path, e);
            (
                AppConfigData::default(),
                Some(format!("Could not read configuration file: {}", e)),
            )
        }
    }
}

fn load_config_system(
    mut config: ResMut<AppConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    let path = crate::paths::config_file();
    let (data, reset_reason) = read_config(&path);
    if reset_reason.is_none() {
        debug!("Config: actor {:?}, {} recent images", data.actor_id, data.recent_images.len());
    }

    *config = AppConfig {
        data,
        config_path: path,
        dirty: false,
    };

    if let Some(reason) = reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

fn write_config(config: &AppConfig) -> Result<(), String> {
    let json = serde_json::to_string_pretty(&config.data).map_err(|e| e.to_string())?;
    std::fs::write(&config.config_path, json).map_err(|e| e.to_string())
}

/// Flush the config when something marked it dirty
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<AppConfig>,
) {
    // Several requests in one frame still mean one write
    if events.read().count() == 0 || !config.dirty {
        return;
    }
    match write_config(&config) {
        Ok(()) => {
            debug!("Config written to {:?}", config.config_path);
            config.dirty = false;
        }
        Err(e) => error!("Failed to save config: {}", e),
    }
}

/// System to add an image to the recent list
fn add_recent_image_system(
    mut events: MessageReader<AddRecentImageRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.push_recent(&event.source);
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }
}

/// System to update the actor identity
fn set_actor_system(
    mut events: MessageReader<SetActorRequest>,
    mut config: ResMut<AppConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        if config.data.actor_id == event.actor_id {
            continue;
        }
        config.data.actor_id = event.actor_id.clone();
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("Actor set to {:?}", event.actor_id);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AppConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<AddRecentImageRequest>()
            .add_message::<SetActorRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    add_recent_image_system.run_if(on_message::<AddRecentImageRequest>),
                    set_actor_system.run_if(on_message::<SetActorRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_data_default() {
        let data = AppConfigData::default();
        assert_eq!(data.actor_id, DEFAULT_ACTOR_ID);
        assert!(data.last_image.is_none());
        assert!(data.recent_images.is_empty());
    }

    #[test]
    fn test_app_config_data_serialization() {
        let data = AppConfigData {
            actor_id: "alice".into(),
            last_image: Some("/data/t1.jpg".into()),
            recent_images: vec!["/data/t1.jpg".into(), "https://example.com/t2.png".into()],
        };

        let json = serde_json::to_string(&data).unwrap();
        let parsed: AppConfigData = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.actor_id, data.actor_id);
        assert_eq!(parsed.last_image, data.last_image);
        assert_eq!(parsed.recent_images, data.recent_images);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let (data, reason) = parse_config("{}");
        assert!(reason.is_none());
        assert_eq!(data.actor_id, DEFAULT_ACTOR_ID);
    }

    #[test]
    fn test_corrupt_config_falls_back() {
        let (data, reason) = parse_config("{ nope");
        assert!(reason.unwrap().contains("corrupted"));
        assert!(data.recent_images.is_empty());
    }

    #[test]
    fn test_push_recent_is_mru_and_bounded() {
        let mut data = AppConfigData::default();
        for i in 0..7 {
            data.push_recent(&format!("img{}.png", i));
        }
        data.push_recent("img3.png");

        assert_eq!(data.recent_images.len(), MAX_RECENT_IMAGES);
        assert_eq!(data.recent_images[0], "img3.png");
        assert_eq!(data.recent_images[1], "img6.png");
        assert_eq!(data.recent_images.iter().filter(|s| *s == "img3.png").count(), 1);
        assert_eq!(data.last_image.as_deref(), Some("img3.png"));
    }

    #[test]
    fn test_blank_actor_falls_back() {
        let data = AppConfigData {
            actor_id: "  ".into(),
            ..Default::default()
        };
        assert_eq!(data.actor(), DEFAULT_ACTOR_ID);
    }
}
