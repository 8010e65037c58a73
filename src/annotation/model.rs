//! The annotation entity: one labeled box in image-pixel space.

use bevy::math::{Rect, Vec2};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How an annotation's current state came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    #[default]
    #[serde(alias = "ai_detected")]
    ModelDetected,
    UserAdded,
    UserEdited,
}

impl Provenance {
    pub fn display_name(&self) -> &'static str {
        match self {
            Provenance::ModelDetected => "Model detected",
            Provenance::UserAdded => "User added",
            Provenance::UserEdited => "User edited",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub id: String,
    pub class_label: String,
    /// In `[0, 1]`
    pub confidence: f32,
    /// Box center in image pixels
    pub center: Vec2,
    /// Box width and height in image pixels
    pub size: Vec2,
    pub provenance: Provenance,
    pub comments: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub created_by: Option<String>,
    pub modified_at: Option<DateTime<Utc>>,
    pub modified_by: Option<String>,
}

impl Annotation {
    /// A box drawn by the operator, committed immediately with `UserAdded` provenance.
    pub fn new_user_added(
        bounds: Rect,
        class_label: impl Into<String>,
        confidence: f32,
        comments: Option<String>,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("user_{}", uuid::Uuid::new_v4().simple()),
            class_label: class_label.into(),
            confidence,
            center: bounds.center(),
            size: bounds.size(),
            provenance: Provenance::UserAdded,
            comments,
            created_at: Some(now),
            created_by: Some(actor.to_string()),
            modified_at: Some(now),
            modified_by: Some(actor.to_string()),
        }
    }

    /// Axis-aligned bounds in image pixels.
    pub fn bounds(&self) -> Rect {
        Rect::from_center_size(self.center, self.size)
    }

    pub fn area(&self) -> f32 {
        self.size.x * self.size.y
    }

    /// Tag text drawn above the box, e.g. `faulty (87.5%)`.
    pub fn label_text(&self) -> String {
        format!("{} ({:.1}%)", self.class_label, self.confidence * 100.0)
    }

    /// True when geometry, class or confidence differ. Metadata is ignored.
    pub fn differs_from(&self, other: &Annotation) -> bool {
        self.center != other.center
            || self.size != other.size
            || self.class_label != other.class_label
            || self.confidence != other.confidence
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A model-detected box with the given center and size.
    pub fn detected(id: &str, class_label: &str, center: Vec2, size: Vec2) -> Annotation {
        Annotation {
            id: id.to_string(),
            class_label: class_label.to_string(),
            confidence: 0.9,
            center,
            size,
            provenance: Provenance::ModelDetected,
            comments: None,
            created_at: None,
            created_by: None,
            modified_at: None,
            modified_by: None,
        }
    }
}
