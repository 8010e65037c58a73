//! Annotation geometry model.
//!
//! ## Module Structure
//!
//! - [`model`] - The [`Annotation`] entity and its [`Provenance`]
//! - [`class`] - Anomaly class palette and severity bands
//! - [`geometry`] - Hit testing, resize handles, move and resize in image space
//! - [`provenance`] - Pure diff that stamps provenance on save
//!
//! Boxes are stored as center + size in source-image pixels. Nothing here knows
//! about Bevy entities; the session owns the lists and the renderer reads them.

pub mod class;
pub mod geometry;
pub mod model;
pub mod provenance;

pub use class::{AnomalyClass, Severity, class_color};
pub use model::{Annotation, Provenance};
pub use provenance::reconcile;
