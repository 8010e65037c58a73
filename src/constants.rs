//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1400.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 860.0;

/// Maximum number of recent images to remember in config
pub const MAX_RECENT_IMAGES: usize = 5;

/// Actor identity stamped on edits when the config does not name one
pub const DEFAULT_ACTOR_ID: &str = "inspector";

/// Smallest width or height (in image pixels) a box may have after any edit
pub const MIN_BOX_SIZE: f32 = 10.0;

/// Zoom limits for the canvas
pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 5.0;

/// Zoom factor applied by the toolbar zoom buttons and keyboard shortcuts
pub const ZOOM_BUTTON_STEP: f32 = 1.2;

/// Zoom factors applied per scroll-wheel notch
pub const WHEEL_ZOOM_IN: f32 = 1.1;
pub const WHEEL_ZOOM_OUT: f32 = 0.9;

/// Resize handle hit zone and drawn size, in on-screen pixels
pub const HANDLE_SIZE: f32 = 8.0;

/// Label tag font size and padding, in on-screen pixels
pub const LABEL_FONT_SIZE: f32 = 14.0;
pub const LABEL_PADDING: f32 = 4.0;
