//! Centralized color theme for the application.
//!
//! This module provides all colors used throughout the inspector UI and the
//! canvas overlay. Modify values here to change the application's color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Anomaly Class Colors
// ============================================================================

pub mod class {
    use bevy_egui::egui;

    /// #ff0000
    pub const FAULTY: egui::Color32 = egui::Color32::from_rgb(0xff, 0x00, 0x00);

    /// #ff9800
    pub const POTENTIALLY_FAULTY: egui::Color32 = egui::Color32::from_rgb(0xff, 0x98, 0x00);

    /// #00ff00
    pub const NORMAL: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0x00);

    /// #ffeb3b
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(0xff, 0xeb, 0x3b);

    /// #f44336
    pub const CRITICAL: egui::Color32 = egui::Color32::from_rgb(0xf4, 0x43, 0x36);

    /// #00bcd4, used for any label outside the known palette
    pub const FALLBACK: egui::Color32 = egui::Color32::from_rgb(0x00, 0xbc, 0xd4);
}

// ============================================================================
// Severity Colors
// ============================================================================

pub mod severity {
    use bevy_egui::egui;

    pub const CRITICAL: egui::Color32 = egui::Color32::from_rgb(220, 38, 38);
    pub const HIGH: egui::Color32 = egui::Color32::from_rgb(234, 88, 12);
    pub const MEDIUM: egui::Color32 = egui::Color32::from_rgb(202, 138, 4);
    pub const LOW: egui::Color32 = egui::Color32::from_rgb(37, 99, 235);
}

// ============================================================================
// Canvas Overlay Colors
// ============================================================================

/// Outline drawn around an externally highlighted box
pub const HIGHLIGHT_OUTLINE: Color = Color::srgba(1.0, 1.0, 1.0, 0.9);

/// Outline of the rubber-band rectangle while drawing a new box
pub const DRAFT_OUTLINE: Color = Color::srgba(0.2, 0.6, 1.0, 0.9);

/// Background behind the image when nothing is loaded
pub const CANVAS_BACKGROUND: Color = Color::srgb(0.09, 0.09, 0.10);

/// Alpha of the translucent fill for selected/hovered/highlighted boxes (~12%)
pub const EMPHASIS_FILL_ALPHA: f32 = 0.125;

/// Alpha of the label tag background (~80%)
pub const LABEL_BACKGROUND_ALPHA: f32 = 0.8;

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Dark grey panel background
    pub const PANEL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(45, 45, 48);

    /// Light grey for label text
    pub const LABEL_TEXT: egui::Color32 = egui::Color32::LIGHT_GRAY;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Blue pill shown while editing
    pub const EDIT_BADGE: egui::Color32 = egui::Color32::from_rgba_premultiplied(59, 130, 246, 230);

    /// Green pill showing the anomaly count
    pub const COUNT_BADGE: egui::Color32 = egui::Color32::from_rgba_premultiplied(34, 197, 94, 230);

    /// Purple pill shown while drawing a new box
    pub const DRAW_BADGE: egui::Color32 = egui::Color32::from_rgba_premultiplied(147, 51, 234, 230);

    /// Card background in the detection panel
    pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(38, 38, 42);

    /// Card border when the card is the focused detection
    pub const CARD_FOCUSED_BORDER: egui::Color32 = egui::Color32::from_rgb(59, 130, 246);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert an egui Color32 to Bevy Color
pub fn egui_to_bevy(color: egui::Color32) -> Color {
    Color::srgba(
        color.r() as f32 / 255.0,
        color.g() as f32 / 255.0,
        color.b() as f32 / 255.0,
        color.a() as f32 / 255.0,
    )
}

/// Same color with a new alpha, for translucent fills and tags
pub fn with_alpha(color: egui::Color32, alpha: f32) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (alpha.clamp(0.0, 1.0) * 255.0) as u8,
    )
}
