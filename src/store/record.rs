//! On-disk annotation format, field-compatible with the backend's detection DTO.

use bevy::math::Vec2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, Provenance};

pub const SIDECAR_VERSION: u32 = 1;

/// One detection. `x`/`y` are the box center in image pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    #[serde(alias = "id")]
    pub detection_id: String,
    pub class: String,
    pub confidence: f32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    #[serde(rename = "annotationType", default)]
    pub annotation_type: Provenance,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "createdBy", default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(rename = "modifiedAt", default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
    #[serde(rename = "modifiedBy", default, skip_serializing_if = "Option::is_none")]
    pub modified_by: Option<String>,
}

impl From<&Annotation> for AnnotationRecord {
    fn from(annotation: &Annotation) -> Self {
        Self {
            detection_id: annotation.id.clone(),
            class: annotation.class_label.clone(),
            confidence: annotation.confidence,
            x: annotation.center.x,
            y: annotation.center.y,
            width: annotation.size.x,
            height: annotation.size.y,
            annotation_type: annotation.provenance,
            comments: annotation.comments.clone(),
            created_at: annotation.created_at,
            created_by: annotation.created_by.clone(),
            modified_at: annotation.modified_at,
            modified_by: annotation.modified_by.clone(),
        }
    }
}

impl From<AnnotationRecord> for Annotation {
    fn from(record: AnnotationRecord) -> Self {
        Self {
            id: record.detection_id,
            class_label: record.class,
            confidence: record.confidence,
            center: Vec2::new(record.x, record.y),
            size: Vec2::new(record.width, record.height),
            provenance: record.annotation_type,
            comments: record.comments,
            created_at: record.created_at,
            created_by: record.created_by,
            modified_at: record.modified_at,
            modified_by: record.modified_by,
        }
    }
}

/// The sidecar document written next to an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SidecarFile {
    pub version: u32,
    /// Image the detections belong to, as stored in config
    #[serde(default)]
    pub image: String,
    pub detections: Vec<AnnotationRecord>,
}

/// Accepts both the sidecar document and a bare detection array exported by the backend.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum SidecarContents {
    Document(SidecarFile),
    Bare(Vec<AnnotationRecord>),
}

impl SidecarContents {
    pub fn into_annotations(self) -> Vec<Annotation> {
        let records = match self {
            SidecarContents::Document(file) => file.detections,
            SidecarContents::Bare(records) => records,
        };
        records.into_iter().map(Annotation::from).collect()
    }
}
