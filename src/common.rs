//! Common types shared across multiple modules.
//!
//! The resize handle model is used by the geometry code (hit testing and
//! edge replacement), by the renderer (handle placement) and by the cursor
//! feedback system, so it lives here rather than in any one of them.

use bevy::math::{Rect, Vec2};
use bevy::window::{CursorIcon, SystemCursorIcon};

/// One of the eight resize handles around a selected box.
///
/// Canvas and image space are both y-down, so `Top` is the edge with the
/// smaller y coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ResizeHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl ResizeHandle {
    /// Corners first: they win over edges when hit zones overlap on small boxes.
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
        ResizeHandle::Top,
        ResizeHandle::Bottom,
        ResizeHandle::Left,
        ResizeHandle::Right,
    ];

    pub fn is_corner(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft
                | ResizeHandle::TopRight
                | ResizeHandle::BottomLeft
                | ResizeHandle::BottomRight
        )
    }

    pub fn moves_left(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::BottomLeft | ResizeHandle::Left
        )
    }

    pub fn moves_right(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopRight | ResizeHandle::BottomRight | ResizeHandle::Right
        )
    }

    pub fn moves_top(&self) -> bool {
        matches!(
            self,
            ResizeHandle::TopLeft | ResizeHandle::TopRight | ResizeHandle::Top
        )
    }

    pub fn moves_bottom(&self) -> bool {
        matches!(
            self,
            ResizeHandle::BottomLeft | ResizeHandle::BottomRight | ResizeHandle::Bottom
        )
    }

    /// Center of this handle on a rectangle (any y-down space).
    pub fn anchor(&self, rect: Rect) -> Vec2 {
        let center = rect.center();
        match self {
            ResizeHandle::TopLeft => rect.min,
            ResizeHandle::TopRight => Vec2::new(rect.max.x, rect.min.y),
            ResizeHandle::BottomLeft => Vec2::new(rect.min.x, rect.max.y),
            ResizeHandle::BottomRight => rect.max,
            ResizeHandle::Top => Vec2::new(center.x, rect.min.y),
            ResizeHandle::Bottom => Vec2::new(center.x, rect.max.y),
            ResizeHandle::Left => Vec2::new(rect.min.x, center.y),
            ResizeHandle::Right => Vec2::new(rect.max.x, center.y),
        }
    }

    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            ResizeHandle::TopLeft | ResizeHandle::BottomRight => {
                CursorIcon::System(SystemCursorIcon::NwseResize)
            }
            ResizeHandle::TopRight | ResizeHandle::BottomLeft => {
                CursorIcon::System(SystemCursorIcon::NeswResize)
            }
            ResizeHandle::Top | ResizeHandle::Bottom => {
                CursorIcon::System(SystemCursorIcon::NsResize)
            }
            ResizeHandle::Left | ResizeHandle::Right => {
                CursorIcon::System(SystemCursorIcon::EwResize)
            }
        }
    }
}

/// Pointer feedback for the canvas, derived from the edit session each frame.
#[derive(Default, Clone, Copy, PartialEq, Eq, Debug)]
pub enum CanvasCursor {
    #[default]
    Default,
    Grab,
    Grabbing,
    Crosshair,
    Resize(ResizeHandle),
}

impl CanvasCursor {
    pub fn cursor_icon(&self) -> CursorIcon {
        match self {
            CanvasCursor::Default => CursorIcon::System(SystemCursorIcon::Default),
            CanvasCursor::Grab => CursorIcon::System(SystemCursorIcon::Grab),
            CanvasCursor::Grabbing => CursorIcon::System(SystemCursorIcon::Grabbing),
            CanvasCursor::Crosshair => CursorIcon::System(SystemCursorIcon::Crosshair),
            CanvasCursor::Resize(handle) => handle.cursor_icon(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_cursor_default() {
        assert_eq!(CanvasCursor::default(), CanvasCursor::Default);
    }

    #[test]
    fn test_handle_edges_are_exclusive() {
        for handle in ResizeHandle::ALL {
            assert!(!(handle.moves_left() && handle.moves_right()));
            assert!(!(handle.moves_top() && handle.moves_bottom()));
        }
    }

    #[test]
    fn test_corners_move_two_edges() {
        for handle in ResizeHandle::ALL {
            let moved = [
                handle.moves_left(),
                handle.moves_right(),
                handle.moves_top(),
                handle.moves_bottom(),
            ]
            .iter()
            .filter(|m| **m)
            .count();
            assert_eq!(moved, if handle.is_corner() { 2 } else { 1 });
        }
    }

    #[test]
    fn test_anchor_positions() {
        let rect = Rect::new(10.0, 20.0, 50.0, 60.0);
        assert_eq!(ResizeHandle::TopLeft.anchor(rect), Vec2::new(10.0, 20.0));
        assert_eq!(ResizeHandle::BottomRight.anchor(rect), Vec2::new(50.0, 60.0));
        assert_eq!(ResizeHandle::Top.anchor(rect), Vec2::new(30.0, 20.0));
        assert_eq!(ResizeHandle::Right.anchor(rect), Vec2::new(50.0, 40.0));
    }

    #[test]
    fn test_resize_cursor_matches_handle() {
        assert_eq!(
            CanvasCursor::Resize(ResizeHandle::Top).cursor_icon(),
            CursorIcon::System(SystemCursorIcon::NsResize)
        );
        assert_eq!(
            CanvasCursor::Resize(ResizeHandle::TopLeft).cursor_icon(),
            CursorIcon::System(SystemCursorIcon::NwseResize)
        );
    }
}
