use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::annotation::Annotation;

/// The committed list changed: fired once per save, delete confirm and new-box confirm.
#[derive(Message, Clone, Debug)]
pub struct AnnotationsChanged {
    pub annotations: Vec<Annotation>,
}

/// The externally visible highlight changed.
#[derive(Message, Clone, Copy, Debug)]
pub struct HighlightChanged {
    pub index: Option<usize>,
}

/// Request to highlight a box (or clear the highlight) from outside the canvas.
#[derive(Message, Clone, Copy, Debug)]
pub struct SetHighlight {
    pub index: Option<usize>,
}

/// Replace the session's lists, e.g. after an image and its annotations loaded.
#[derive(Message, Clone, Debug)]
pub struct SeedAnnotations {
    pub annotations: Vec<Annotation>,
}

/// The store finished persisting. `None` when the write failed.
#[derive(Message, Clone, Debug)]
pub struct PersistAcknowledged {
    pub annotations: Option<Vec<Annotation>>,
}

/// Writers for everything a committing operation can announce.
#[derive(SystemParam)]
pub struct SessionOutput<'w> {
    pub changed: MessageWriter<'w, AnnotationsChanged>,
    pub highlight: MessageWriter<'w, HighlightChanged>,
}

impl SessionOutput<'_> {
    /// Publish a committed list, plus the highlight when the commit moved it.
    pub fn commit(
        &mut self,
        annotations: Vec<Annotation>,
        highlight_before: Option<usize>,
        highlight_after: Option<usize>,
    ) {
        self.changed.write(AnnotationsChanged { annotations });
        if highlight_before != highlight_after {
            self.highlight.write(HighlightChanged {
                index: highlight_after,
            });
        }
    }
}
