//! The edit session state machine.
//!
//! Two buffers are kept: `working` (what the canvas shows and the operator mutates)
//! and `original` (the last committed list, the diff baseline on save). Drag and
//! resize frames only touch `working`. Delete and new-box confirm commit to both
//! immediately; save reconciles `working` against `original` and commits the result.
//!
//! Operations that must reach the persistence boundary return the committed list;
//! the calling system turns that into an [`AnnotationsChanged`](super::AnnotationsChanged).

use bevy::prelude::*;
use chrono::{DateTime, Utc};

use crate::annotation::{geometry, reconcile, Annotation};
use crate::common::{CanvasCursor, ResizeHandle};
use crate::viewport::Viewport;

use super::draft::{DraftError, NewBoxDraft};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    /// Pan and zoom only; the overlay is read-only
    #[default]
    Viewing,
    /// Select, move, resize and delete
    Editing,
    /// Crosshair box-draw gesture
    DrawingNew,
    /// The label form for a just-drawn box is open
    ConfirmingNewBox,
}

/// The pointer gesture in progress, decided by where the pointer went down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    None,
    Pan {
        last_pointer: Vec2,
    },
    Move {
        index: usize,
        /// Canvas-space offset from the box's top-left to the pointer
        grab_offset: Vec2,
    },
    Resize {
        index: usize,
        handle: ResizeHandle,
    },
    /// Both corners in image pixels
    Draw {
        start: Vec2,
        current: Vec2,
    },
}

#[derive(Resource, Debug, Default)]
pub struct EditSession {
    pub mode: EditMode,
    pub working: Vec<Annotation>,
    pub original: Vec<Annotation>,
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    /// Handle of the selected box under the pointer, for cursor feedback
    pub hovered_handle: Option<ResizeHandle>,
    /// Externally driven emphasis, independent of the edit mode
    pub highlighted: Option<usize>,
    pub gesture: Gesture,
    pub draft: Option<NewBoxDraft>,
    /// Index awaiting delete confirmation
    pub pending_delete: Option<usize>,
    /// A save is in flight; edits stay disabled until the store replies
    pub saving: bool,
}

impl EditSession {
    /// Replace both buffers with a fresh list (new image or initial load).
    pub fn seed(&mut self, annotations: Vec<Annotation>) {
        self.original = annotations.clone();
        self.working = annotations;
        self.mode = EditMode::Viewing;
        self.highlighted = None;
        self.saving = false;
        self.clear_interaction();
    }

    fn clear_interaction(&mut self) {
        self.selected = None;
        self.hovered = None;
        self.hovered_handle = None;
        self.gesture = Gesture::None;
        self.draft = None;
        self.pending_delete = None;
    }

    pub fn is_editing(&self) -> bool {
        self.mode != EditMode::Viewing
    }

    pub fn can_enter_edit(&self) -> bool {
        self.mode == EditMode::Viewing && !self.working.is_empty() && !self.saving
    }

    pub fn enter_edit(&mut self) -> bool {
        if !self.can_enter_edit() {
            return false;
        }
        self.mode = EditMode::Editing;
        self.clear_interaction();
        info!("Entered edit mode with {} annotations", self.working.len());
        true
    }

    pub fn begin_draw_new(&mut self) -> bool {
        if self.mode != EditMode::Editing || self.saving {
            return false;
        }
        self.mode = EditMode::DrawingNew;
        self.clear_interaction();
        debug!("Draw mode armed");
        true
    }

    /// Leave draw mode without drawing, back to editing.
    pub fn stop_drawing(&mut self) {
        if self.mode == EditMode::DrawingNew {
            self.mode = EditMode::Editing;
            self.gesture = Gesture::None;
        }
    }

    /// Pointer pressed inside the canvas. `pointer` is in pointer space.
    pub fn pointer_down(&mut self, pointer: Vec2, viewport: &Viewport) {
        match self.mode {
            EditMode::Viewing => self.start_pan(pointer),
            EditMode::Editing => {
                let canvas = viewport.pointer_to_canvas(pointer);

                if let Some(index) = self.selected
                    && let Some(rect) = self
                        .working
                        .get(index)
                        .and_then(|a| geometry::to_screen_rect(a, viewport))
                    && let Some(handle) = geometry::resize_handle_at(canvas, rect, viewport.scale)
                {
                    self.gesture = Gesture::Resize { index, handle };
                    return;
                }

                if let Some(index) = geometry::hit_test(&self.working, viewport, canvas)
                    && let Some(grab_offset) =
                        geometry::grab_offset(&self.working[index], viewport, canvas)
                {
                    self.selected = Some(index);
                    self.gesture = Gesture::Move { index, grab_offset };
                    return;
                }

                self.selected = None;
                self.start_pan(pointer);
            }
            EditMode::DrawingNew => {
                if viewport.is_idle() {
                    return;
                }
                let start = viewport.screen_to_image(pointer);
                self.gesture = Gesture::Draw {
                    start,
                    current: start,
                };
            }
            EditMode::ConfirmingNewBox => {}
        }
    }

    fn start_pan(&mut self, pointer: Vec2) {
        self.gesture = Gesture::Pan {
            last_pointer: pointer,
        };
    }

    /// Pointer moved inside the canvas. Pans the viewport or mutates `working`.
    pub fn pointer_move(&mut self, pointer: Vec2, viewport: &mut Viewport) {
        let canvas = viewport.pointer_to_canvas(pointer);

        match &mut self.gesture {
            Gesture::Pan { last_pointer } => {
                let delta = viewport.pointer_delta_to_canvas(pointer - *last_pointer);
                viewport.pan(delta);
                *last_pointer = pointer;
                self.update_hover(canvas, viewport);
            }
            Gesture::Move { index, grab_offset } => {
                if let Some(annotation) = self.working.get_mut(*index) {
                    geometry::move_to(annotation, viewport, canvas, *grab_offset);
                }
            }
            Gesture::Resize { index, handle } => {
                if viewport.is_idle() {
                    return;
                }
                let image = viewport.screen_to_image(pointer);
                if let Some(annotation) = self.working.get_mut(*index) {
                    geometry::resize_by_handle(annotation, *handle, image);
                }
            }
            Gesture::Draw { current, .. } => {
                if !viewport.is_idle() {
                    *current = viewport.screen_to_image(pointer);
                }
            }
            Gesture::None => self.update_hover(canvas, viewport),
        }
    }

    fn update_hover(&mut self, canvas: Vec2, viewport: &Viewport) {
        if self.mode != EditMode::Editing {
            self.hovered = None;
            self.hovered_handle = None;
            return;
        }
        self.hovered = geometry::hit_test(&self.working, viewport, canvas);
        self.hovered_handle = self
            .selected
            .and_then(|index| self.working.get(index))
            .and_then(|a| geometry::to_screen_rect(a, viewport))
            .and_then(|rect| geometry::resize_handle_at(canvas, rect, viewport.scale));
    }

    /// Pointer released. Finishes a draw gesture into a draft when it is large enough.
    pub fn pointer_up(&mut self) {
        let gesture = std::mem::take(&mut self.gesture);
        if let Gesture::Draw { start, current } = gesture
            && self.mode == EditMode::DrawingNew
        {
            let bounds = geometry::normalized_rect(start, current);
            if geometry::meets_minimum(bounds) {
                debug!("Drew new box {:?}", bounds);
                self.draft = Some(NewBoxDraft::new(bounds));
                self.mode = EditMode::ConfirmingNewBox;
            } else {
                debug!("Discarded undersized box {:?}", bounds.size());
            }
        }
    }

    /// Pointer left the canvas: end any gesture and drop hover.
    pub fn pointer_leave(&mut self) {
        self.gesture = Gesture::None;
        self.hovered = None;
        self.hovered_handle = None;
    }

    /// Commit the drawn box. On a validation failure the form stays open with the error.
    pub fn confirm_new_box(
        &mut self,
        actor: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Annotation>, DraftError> {
        if self.mode != EditMode::ConfirmingNewBox {
            return Err(DraftError::NoPendingBox);
        }
        let Some(draft) = self.draft.as_mut() else {
            return Err(DraftError::NoPendingBox);
        };

        let (class_label, confidence, comments) = match draft.validate() {
            Ok(fields) => fields,
            Err(e) => {
                draft.error = Some(e.to_string());
                return Err(e);
            }
        };

        let annotation = Annotation::new_user_added(
            draft.bounds,
            class_label,
            confidence,
            comments,
            actor,
            now,
        );
        info!(
            "Added {} box {} by {}",
            annotation.class_label, annotation.id, actor
        );
        self.working.push(annotation.clone());
        self.original.push(annotation);
        self.draft = None;
        self.mode = EditMode::Editing;
        Ok(self.original.clone())
    }

    pub fn cancel_new_box(&mut self) {
        if self.mode == EditMode::ConfirmingNewBox {
            self.draft = None;
            self.mode = EditMode::Editing;
        }
    }

    /// Open the delete confirmation for the selection.
    pub fn request_delete(&mut self) -> bool {
        if self.mode != EditMode::Editing || self.saving {
            return false;
        }
        match self.selected {
            Some(index) if index < self.working.len() => {
                self.pending_delete = Some(index);
                true
            }
            _ => false,
        }
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Remove the pending box from both buffers and return the committed list.
    pub fn confirm_delete(&mut self) -> Option<Vec<Annotation>> {
        let index = self.pending_delete.take()?;
        if index >= self.working.len() {
            return None;
        }

        let removed = self.working.remove(index);
        if index < self.original.len() {
            self.original.remove(index);
        }
        info!("Deleted annotation {} ({})", removed.id, removed.class_label);

        self.highlighted = match self.highlighted {
            Some(h) if h == index => None,
            Some(h) if h > index => Some(h - 1),
            other => other,
        };
        self.selected = None;
        self.hovered = None;
        self.hovered_handle = None;
        self.gesture = Gesture::None;

        if self.working.is_empty() {
            self.mode = EditMode::Viewing;
        }
        Some(self.original.clone())
    }

    /// Stamp provenance, commit the working list and return it for persistence.
    pub fn save(&mut self, actor: &str, now: DateTime<Utc>) -> Option<Vec<Annotation>> {
        if !matches!(self.mode, EditMode::Editing | EditMode::DrawingNew) || self.saving {
            return None;
        }
        let result = reconcile(&self.original, &self.working, actor, now);
        self.working = result.clone();
        self.original = result.clone();
        self.mode = EditMode::Viewing;
        self.saving = true;
        self.clear_interaction();
        info!("Saved {} annotations as {}", result.len(), actor);
        Some(result)
    }

    /// Discard every uncommitted mutation and return to viewing.
    pub fn cancel(&mut self) {
        if self.mode == EditMode::Viewing {
            return;
        }
        self.working = self.original.clone();
        self.mode = EditMode::Viewing;
        self.clear_interaction();
        info!("Edit session cancelled");
    }

    /// The store finished a save. `Some` carries the authoritative list it persisted.
    pub fn persist_acknowledged(&mut self, annotations: Option<Vec<Annotation>>) {
        if !self.saving {
            return;
        }
        self.saving = false;
        if let Some(list) = annotations
            && self.mode == EditMode::Viewing
        {
            if self.highlighted.is_some_and(|h| h >= list.len()) {
                self.highlighted = None;
            }
            self.original = list.clone();
            self.working = list;
        }
    }

    /// Set the external highlight. Returns `true` when it changed.
    pub fn set_highlight(&mut self, index: Option<usize>) -> bool {
        let index = index.filter(|i| *i < self.working.len());
        if self.highlighted == index {
            return false;
        }
        self.highlighted = index;
        true
    }

    /// The box the detail view describes: the highlight wins over the selection.
    pub fn focused_index(&self) -> Option<usize> {
        self.highlighted.or(self.selected)
    }

    pub fn cursor(&self) -> CanvasCursor {
        match self.gesture {
            Gesture::Resize { handle, .. } => return CanvasCursor::Resize(handle),
            Gesture::Move { .. } | Gesture::Pan { .. } => return CanvasCursor::Grabbing,
            Gesture::Draw { .. } => return CanvasCursor::Crosshair,
            Gesture::None => {}
        }
        match self.mode {
            EditMode::DrawingNew => CanvasCursor::Crosshair,
            EditMode::Editing => {
                if let Some(handle) = self.hovered_handle {
                    CanvasCursor::Resize(handle)
                } else if self.hovered.is_some() {
                    CanvasCursor::Grab
                } else {
                    CanvasCursor::Default
                }
            }
            EditMode::Viewing | EditMode::ConfirmingNewBox => CanvasCursor::Default,
        }
    }

    /// Rubber-band rectangle of an in-progress draw, in image pixels.
    pub fn draw_preview(&self) -> Option<Rect> {
        match self.gesture {
            Gesture::Draw { start, current } => Some(geometry::normalized_rect(start, current)),
            _ => None,
        }
    }
}
