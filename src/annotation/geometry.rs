//! Geometry of boxes: hit testing, handles, move and resize.
//!
//! All pointer comparisons happen in canvas space (the unzoomed drawing surface),
//! so the caller converts the pointer once with [`Viewport::pointer_to_canvas`].
//! Edits are written back in image space.

use bevy::math::{Rect, Vec2};

use crate::common::ResizeHandle;
use crate::constants::{HANDLE_SIZE, MIN_BOX_SIZE};
use crate::viewport::Viewport;

use super::model::Annotation;

/// The box as drawn, top-left anchored, in canvas space. `None` while the viewport is idle.
pub fn to_screen_rect(annotation: &Annotation, viewport: &Viewport) -> Option<Rect> {
    let bounds = annotation.bounds();
    let min = viewport.image_to_canvas(bounds.min)?;
    let max = viewport.image_to_canvas(bounds.max)?;
    Some(Rect::from_corners(min, max))
}

/// Topmost (highest index) box containing the point. Bounds are inclusive.
pub fn hit_test(annotations: &[Annotation], viewport: &Viewport, point: Vec2) -> Option<usize> {
    annotations
        .iter()
        .enumerate()
        .rev()
        .find(|(_, annotation)| {
            to_screen_rect(annotation, viewport).is_some_and(|rect| rect.contains(point))
        })
        .map(|(index, _)| index)
}

/// Which resize handle of `rect` the point falls on.
///
/// The hit zone is `HANDLE_SIZE / zoom` canvas pixels so it stays the same size on
/// screen. Corners are checked first; an edge only counts strictly between its corners.
pub fn resize_handle_at(point: Vec2, rect: Rect, zoom: f32) -> Option<ResizeHandle> {
    let zone = HANDLE_SIZE / zoom;
    let near = |a: f32, b: f32| (a - b).abs() < zone;
    let within_x = point.x > rect.min.x && point.x < rect.max.x;
    let within_y = point.y > rect.min.y && point.y < rect.max.y;

    ResizeHandle::ALL.into_iter().find(|handle| {
        if handle.is_corner() {
            let anchor = handle.anchor(rect);
            near(point.x, anchor.x) && near(point.y, anchor.y)
        } else {
            match handle {
                ResizeHandle::Top => near(point.y, rect.min.y) && within_x,
                ResizeHandle::Bottom => near(point.y, rect.max.y) && within_x,
                ResizeHandle::Left => near(point.x, rect.min.x) && within_y,
                ResizeHandle::Right => near(point.x, rect.max.x) && within_y,
                _ => false,
            }
        }
    })
}

/// Offset from the box's top-left corner to the pointer, captured at drag start.
pub fn grab_offset(annotation: &Annotation, viewport: &Viewport, point: Vec2) -> Option<Vec2> {
    to_screen_rect(annotation, viewport).map(|rect| point - rect.min)
}

/// Move the box so its top-left sits under `point - grab_offset`.
///
/// Returns `false` (no change) while the viewport is idle.
pub fn move_to(
    annotation: &mut Annotation,
    viewport: &Viewport,
    point: Vec2,
    grab_offset: Vec2,
) -> bool {
    let Some(top_left) = viewport.canvas_to_image(point - grab_offset) else {
        return false;
    };
    annotation.center = top_left + annotation.size / 2.0;
    true
}

/// Replace the edges implied by `handle` with the pointer's image position.
///
/// Opposite edges stay fixed. If the result would be narrower or shorter than
/// `MIN_BOX_SIZE` nothing changes and `false` is returned.
pub fn resize_by_handle(
    annotation: &mut Annotation,
    handle: ResizeHandle,
    pointer_image: Vec2,
) -> bool {
    let bounds = annotation.bounds();
    let mut left = bounds.min.x;
    let mut right = bounds.max.x;
    let mut top = bounds.min.y;
    let mut bottom = bounds.max.y;

    if handle.moves_left() {
        left = pointer_image.x;
    }
    if handle.moves_right() {
        right = pointer_image.x;
    }
    if handle.moves_top() {
        top = pointer_image.y;
    }
    if handle.moves_bottom() {
        bottom = pointer_image.y;
    }

    if right - left < MIN_BOX_SIZE || bottom - top < MIN_BOX_SIZE {
        return false;
    }

    annotation.center = Vec2::new((left + right) / 2.0, (top + bottom) / 2.0);
    annotation.size = Vec2::new(right - left, bottom - top);
    true
}

/// Rectangle spanned by two drag points, with positive width and height.
pub fn normalized_rect(a: Vec2, b: Vec2) -> Rect {
    Rect::from_corners(a, b)
}

/// Whether a drawn rectangle is large enough to become a box.
pub fn meets_minimum(rect: Rect) -> bool {
    rect.width() >= MIN_BOX_SIZE && rect.height() >= MIN_BOX_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::model::fixtures::detected;
    use proptest::prelude::*;

    /// Square canvas and image of the same size: canvas and image space coincide at zoom 1.
    fn identity_viewport() -> Viewport {
        Viewport {
            canvas_area: Rect::new(0.0, 0.0, 800.0, 800.0),
            window_size: Vec2::new(800.0, 800.0),
            image_size: Some(Vec2::new(800.0, 800.0)),
            ..Default::default()
        }
    }

    #[test]
    fn test_to_screen_rect_is_none_when_idle() {
        let annotation = detected("a", "faulty", Vec2::splat(50.0), Vec2::splat(20.0));
        assert!(to_screen_rect(&annotation, &Viewport::default()).is_none());
    }

    #[test]
    fn test_to_screen_rect_follows_fit_scale() {
        let mut viewport = identity_viewport();
        viewport.image_size = Some(Vec2::new(1600.0, 1600.0));
        let annotation = detected("a", "faulty", Vec2::new(200.0, 200.0), Vec2::new(40.0, 20.0));
        let rect = to_screen_rect(&annotation, &viewport).unwrap();
        assert!(rect.min.abs_diff_eq(Vec2::new(90.0, 95.0), 1e-3));
        assert!(rect.max.abs_diff_eq(Vec2::new(110.0, 105.0), 1e-3));
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let viewport = identity_viewport();
        let annotations = vec![
            detected("a", "faulty", Vec2::new(100.0, 100.0), Vec2::splat(60.0)),
            detected("b", "normal", Vec2::new(120.0, 120.0), Vec2::splat(60.0)),
        ];
        assert_eq!(hit_test(&annotations, &viewport, Vec2::new(110.0, 110.0)), Some(1));
        assert_eq!(hit_test(&annotations, &viewport, Vec2::new(75.0, 75.0)), Some(0));
        assert_eq!(hit_test(&annotations, &viewport, Vec2::new(400.0, 400.0)), None);
    }

    #[test]
    fn test_hit_test_bounds_inclusive() {
        let viewport = identity_viewport();
        let annotations = vec![detected("a", "faulty", Vec2::new(100.0, 100.0), Vec2::splat(40.0))];
        assert_eq!(hit_test(&annotations, &viewport, Vec2::new(80.0, 80.0)), Some(0));
        assert_eq!(hit_test(&annotations, &viewport, Vec2::new(120.0, 120.0)), Some(0));
    }

    #[test]
    fn test_resize_handle_corners_then_edges() {
        let rect = Rect::new(100.0, 100.0, 200.0, 160.0);
        assert_eq!(
            resize_handle_at(Vec2::new(102.0, 97.0), rect, 1.0),
            Some(ResizeHandle::TopLeft)
        );
        assert_eq!(
            resize_handle_at(Vec2::new(199.0, 161.0), rect, 1.0),
            Some(ResizeHandle::BottomRight)
        );
        assert_eq!(
            resize_handle_at(Vec2::new(150.0, 103.0), rect, 1.0),
            Some(ResizeHandle::Top)
        );
        assert_eq!(
            resize_handle_at(Vec2::new(196.0, 130.0), rect, 1.0),
            Some(ResizeHandle::Right)
        );
        assert_eq!(resize_handle_at(Vec2::new(150.0, 130.0), rect, 1.0), None);
    }

    #[test]
    fn test_resize_handle_zone_shrinks_with_zoom() {
        let rect = Rect::new(100.0, 100.0, 200.0, 160.0);
        let point = Vec2::new(150.0, 106.0);
        assert_eq!(resize_handle_at(point, rect, 1.0), Some(ResizeHandle::Top));
        assert_eq!(resize_handle_at(point, rect, 2.0), None);
    }

    #[test]
    fn test_move_keeps_grab_offset() {
        let viewport = identity_viewport();
        let mut annotation = detected("a", "faulty", Vec2::new(100.0, 100.0), Vec2::splat(40.0));
        let grab = grab_offset(&annotation, &viewport, Vec2::new(90.0, 85.0)).unwrap();
        assert_eq!(grab, Vec2::new(10.0, 5.0));

        assert!(move_to(&mut annotation, &viewport, Vec2::new(110.0, 95.0), grab));
        assert_eq!(annotation.center, Vec2::new(120.0, 110.0));
        assert_eq!(annotation.size, Vec2::splat(40.0));
    }

    #[test]
    fn test_resize_replaces_edges() {
        let mut annotation = detected("a", "faulty", Vec2::new(100.0, 100.0), Vec2::splat(40.0));
        assert!(resize_by_handle(
            &mut annotation,
            ResizeHandle::BottomRight,
            Vec2::new(150.0, 140.0)
        ));
        assert_eq!(annotation.bounds().min, Vec2::new(80.0, 80.0));
        assert_eq!(annotation.bounds().max, Vec2::new(150.0, 140.0));
    }

    #[test]
    fn test_resize_below_minimum_is_rejected() {
        let mut annotation = detected("a", "faulty", Vec2::new(100.0, 100.0), Vec2::splat(40.0));
        let before = annotation.clone();
        assert!(!resize_by_handle(&mut annotation, ResizeHandle::Left, Vec2::new(115.0, 0.0)));
        assert_eq!(annotation, before);
    }

    #[test]
    fn test_normalized_rect_and_minimum() {
        let rect = normalized_rect(Vec2::new(30.0, 50.0), Vec2::new(15.0, 30.0));
        assert_eq!(rect.min, Vec2::new(15.0, 30.0));
        assert_eq!(rect.size(), Vec2::new(15.0, 20.0));
        assert!(meets_minimum(rect));
        assert!(!meets_minimum(Rect::new(0.0, 0.0, 8.0, 8.0)));
    }

    fn any_handle() -> impl Strategy<Value = ResizeHandle> {
        (0usize..8).prop_map(|i| ResizeHandle::ALL[i])
    }

    proptest! {
        #[test]
        fn test_resize_never_goes_below_minimum(
            cx in 0.0f32..1000.0,
            cy in 0.0f32..1000.0,
            w in MIN_BOX_SIZE..300.0,
            h in MIN_BOX_SIZE..300.0,
            handle in any_handle(),
            dx in -600.0f32..600.0,
            dy in -600.0f32..600.0,
        ) {
            let mut annotation = detected("p", "faulty", Vec2::new(cx, cy), Vec2::new(w, h));
            let pointer = handle.anchor(annotation.bounds()) + Vec2::new(dx, dy);
            resize_by_handle(&mut annotation, handle, pointer);
            prop_assert!(annotation.size.x >= MIN_BOX_SIZE - 1e-3);
            prop_assert!(annotation.size.y >= MIN_BOX_SIZE - 1e-3);
        }
    }
}
