//! The form state of a just-drawn box waiting for its label.

use bevy::math::Rect;
use thiserror::Error;

use crate::annotation::AnomalyClass;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DraftError {
    #[error("Confidence must be a number")]
    ConfidenceNotNumeric,

    #[error("Confidence must be between 0 and 1 (got {0})")]
    ConfidenceOutOfRange(f32),

    #[error("A class label is required")]
    EmptyClassLabel,

    #[error("No drawn box is waiting for confirmation")]
    NoPendingBox,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewBoxDraft {
    /// Drawn rectangle in image pixels, normalized
    pub bounds: Rect,
    pub class_label: String,
    /// Raw text of the confidence field, parsed on confirm
    pub confidence_input: String,
    pub comments: String,
    /// Inline validation message shown in the form
    pub error: Option<String>,
}

impl NewBoxDraft {
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            class_label: AnomalyClass::Faulty.label().to_string(),
            confidence_input: "1.0".to_string(),
            comments: String::new(),
            error: None,
        }
    }

    /// Parse and range-check the confidence field.
    pub fn confidence(&self) -> Result<f32, DraftError> {
        let value: f32 = self
            .confidence_input
            .trim()
            .parse()
            .map_err(|_| DraftError::ConfidenceNotNumeric)?;
        if !value.is_finite() {
            return Err(DraftError::ConfidenceNotNumeric);
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(DraftError::ConfidenceOutOfRange(value));
        }
        Ok(value)
    }

    /// Everything the confirmed annotation needs: class label, confidence and comments.
    pub fn validate(&self) -> Result<(String, f32, Option<String>), DraftError> {
        let class_label = self.class_label.trim();
        if class_label.is_empty() {
            return Err(DraftError::EmptyClassLabel);
        }
        let confidence = self.confidence()?;
        let comments = Some(self.comments.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        Ok((class_label.to_string(), confidence, comments))
    }
}
