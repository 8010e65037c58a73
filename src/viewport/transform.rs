//! Coordinate spaces of the canvas.
//!
//! - **pointer**: window logical pixels, y-down, as reported by `Window::cursor_position`
//! - **canvas**: the unzoomed drawing surface, y-down, origin at the top-left of the
//!   canvas area. The fitted image and all hit zones live here.
//! - **image**: source-image pixels, y-down. The only space that is ever persisted.
//!
//! Rendering maps canvas to pointer space as `C + s * ((d + offset) - C)` where `C`
//! is the canvas center, `s` the zoom scale and `offset` the pan offset. Every
//! conversion below is the exact inverse of that chain.

use bevy::prelude::*;

use crate::constants::{MAX_ZOOM, MIN_ZOOM, WHEEL_ZOOM_IN, WHEEL_ZOOM_OUT, ZOOM_BUTTON_STEP};

/// The centered, aspect-preserving rectangle the image is drawn into (canvas space).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitRect {
    pub origin: Vec2,
    pub draw_size: Vec2,
    /// Canvas pixels per image pixel along each axis
    pub scale: Vec2,
}

impl FitRect {
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.origin, self.origin + self.draw_size)
    }
}

/// Fit an image into the canvas, preserving aspect ratio and centering it.
///
/// Returns `None` when either size is degenerate; callers treat that as idle.
pub fn compute_image_fit_rect(canvas_size: Vec2, image_size: Vec2) -> Option<FitRect> {
    if canvas_size.x <= 0.0 || canvas_size.y <= 0.0 || image_size.x <= 0.0 || image_size.y <= 0.0
    {
        return None;
    }

    let image_aspect = image_size.x / image_size.y;
    let canvas_aspect = canvas_size.x / canvas_size.y;

    let draw_size = if image_aspect > canvas_aspect {
        Vec2::new(canvas_size.x, canvas_size.x / image_aspect)
    } else {
        Vec2::new(canvas_size.y * image_aspect, canvas_size.y)
    };

    Some(FitRect {
        origin: (canvas_size - draw_size) / 2.0,
        draw_size,
        scale: draw_size / image_size,
    })
}

/// Pan/zoom state plus the geometry it is applied to.
#[derive(Resource, Debug, Clone)]
pub struct Viewport {
    /// Zoom about the canvas center, clamped to `[MIN_ZOOM, MAX_ZOOM]`
    pub scale: f32,
    /// Pan offset in canvas pixels
    pub offset: Vec2,
    /// Canvas area in pointer space (the part of the window not covered by panels)
    pub canvas_area: Rect,
    /// Logical window size, needed to map pointer space to world space
    pub window_size: Vec2,
    /// Pixel size of the loaded image, `None` until an image finishes loading
    pub image_size: Option<Vec2>,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec2::ZERO,
            canvas_area: Rect::default(),
            window_size: Vec2::ZERO,
            image_size: None,
        }
    }
}

impl Viewport {
    pub fn canvas_size(&self) -> Vec2 {
        self.canvas_area.size()
    }

    fn canvas_center(&self) -> Vec2 {
        self.canvas_size() / 2.0
    }

    /// Current fit rectangle, recomputed from the live canvas and image sizes.
    pub fn fit_rect(&self) -> Option<FitRect> {
        compute_image_fit_rect(self.canvas_size(), self.image_size?)
    }

    pub fn is_idle(&self) -> bool {
        self.fit_rect().is_none()
    }

    /// Canvas point to pointer space (the render chain).
    pub fn canvas_to_pointer(&self, canvas: Vec2) -> Vec2 {
        let center = self.canvas_center();
        self.canvas_area.min + center + self.scale * ((canvas + self.offset) - center)
    }

    /// Pointer to canvas space: undo zoom-about-center, then the pan offset.
    pub fn pointer_to_canvas(&self, pointer: Vec2) -> Vec2 {
        let center = self.canvas_center();
        (pointer - self.canvas_area.min - center) / self.scale + center - self.offset
    }

    /// A pointer-space movement expressed in canvas pixels.
    pub fn pointer_delta_to_canvas(&self, delta: Vec2) -> Vec2 {
        delta / self.scale
    }

    pub fn image_to_canvas(&self, image: Vec2) -> Option<Vec2> {
        let fit = self.fit_rect()?;
        Some(fit.origin + image * fit.scale)
    }

    pub fn canvas_to_image(&self, canvas: Vec2) -> Option<Vec2> {
        let fit = self.fit_rect()?;
        Some((canvas - fit.origin) / fit.scale)
    }

    /// Pointer to image pixels. Zero while idle.
    pub fn screen_to_image(&self, pointer: Vec2) -> Vec2 {
        self.canvas_to_image(self.pointer_to_canvas(pointer))
            .unwrap_or(Vec2::ZERO)
    }

    /// Image pixels to pointer space. Zero while idle.
    pub fn image_to_screen(&self, image: Vec2) -> Vec2 {
        self.image_to_canvas(image)
            .map(|canvas| self.canvas_to_pointer(canvas))
            .unwrap_or(Vec2::ZERO)
    }

    /// Pointer space to the 2D world of a default `Camera2d` at the origin.
    pub fn pointer_to_world(&self, pointer: Vec2) -> Vec2 {
        Vec2::new(
            pointer.x - self.window_size.x / 2.0,
            self.window_size.y / 2.0 - pointer.y,
        )
    }

    pub fn canvas_to_world(&self, canvas: Vec2) -> Vec2 {
        self.pointer_to_world(self.canvas_to_pointer(canvas))
    }

    /// Whether a pointer position falls inside the canvas area.
    pub fn contains_pointer(&self, pointer: Vec2) -> bool {
        self.canvas_area.contains(pointer)
    }

    pub fn zoom(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    pub fn zoom_in(&mut self) {
        self.zoom(ZOOM_BUTTON_STEP);
    }

    pub fn zoom_out(&mut self) {
        self.zoom(1.0 / ZOOM_BUTTON_STEP);
    }

    /// Scroll-wheel zoom: only the sign of the scroll matters.
    pub fn wheel_zoom(&mut self, scroll_y: f32) {
        if scroll_y > 0.0 {
            self.zoom(WHEEL_ZOOM_IN);
        } else if scroll_y < 0.0 {
            self.zoom(WHEEL_ZOOM_OUT);
        }
    }

    /// Additive pan in canvas pixels.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    pub fn reset(&mut self) {
        self.scale = 1.0;
        self.offset = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_viewport() -> Viewport {
        Viewport {
            canvas_area: Rect::new(0.0, 40.0, 800.0, 640.0),
            window_size: Vec2::new(1100.0, 640.0),
            image_size: Some(Vec2::new(640.0, 480.0)),
            ..default()
        }
    }

    #[test]
    fn test_fit_rect_wide_image_letterboxes_vertically() {
        let fit = compute_image_fit_rect(Vec2::new(800.0, 600.0), Vec2::new(1600.0, 400.0)).unwrap();
        assert_eq!(fit.draw_size, Vec2::new(800.0, 200.0));
        assert_eq!(fit.origin, Vec2::new(0.0, 200.0));
        assert_eq!(fit.scale, Vec2::new(0.5, 0.5));
    }

    #[test]
    fn test_fit_rect_tall_image_pillarboxes() {
        let fit = compute_image_fit_rect(Vec2::new(800.0, 600.0), Vec2::new(300.0, 600.0)).unwrap();
        assert_eq!(fit.draw_size, Vec2::new(300.0, 600.0));
        assert_eq!(fit.origin, Vec2::new(250.0, 0.0));
        assert_eq!(fit.scale, Vec2::ONE);
    }

    #[test]
    fn test_fit_rect_degenerate_sizes() {
        assert!(compute_image_fit_rect(Vec2::ZERO, Vec2::new(10.0, 10.0)).is_none());
        assert!(compute_image_fit_rect(Vec2::new(10.0, 10.0), Vec2::new(0.0, 10.0)).is_none());
    }

    #[test]
    fn test_idle_conversions_return_zero() {
        let viewport = Viewport::default();
        assert!(viewport.is_idle());
        assert_eq!(viewport.screen_to_image(Vec2::new(50.0, 50.0)), Vec2::ZERO);
        assert_eq!(viewport.image_to_screen(Vec2::new(50.0, 50.0)), Vec2::ZERO);
    }

    #[test]
    fn test_zoom_clamps() {
        let mut viewport = Viewport::default();
        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.scale, MAX_ZOOM);
        for _ in 0..50 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.scale, MIN_ZOOM);
    }

    #[test]
    fn test_wheel_zoom_uses_sign_only() {
        let mut viewport = Viewport::default();
        viewport.wheel_zoom(120.0);
        assert!((viewport.scale - 1.1).abs() < 1e-6);
        viewport.reset();
        viewport.wheel_zoom(-0.01);
        assert!((viewport.scale - 0.9).abs() < 1e-6);
        viewport.reset();
        viewport.wheel_zoom(0.0);
        assert_eq!(viewport.scale, 1.0);
    }

    #[test]
    fn test_pan_is_additive_and_reset_clears() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(10.0, -5.0));
        viewport.pan(Vec2::new(2.0, 1.0));
        assert_eq!(viewport.offset, Vec2::new(12.0, -4.0));
        viewport.zoom(2.0);
        viewport.reset();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert_eq!(viewport.scale, 1.0);
    }

    #[test]
    fn test_zoom_keeps_canvas_center_fixed() {
        let mut viewport = test_viewport();
        let center_pointer = viewport.canvas_area.center();
        let before = viewport.screen_to_image(center_pointer);
        viewport.zoom(3.0);
        let after = viewport.screen_to_image(center_pointer);
        assert!((before - after).length() < 1e-3);
    }

    #[test]
    fn test_pointer_to_world_flips_y() {
        let viewport = test_viewport();
        assert_eq!(viewport.pointer_to_world(Vec2::new(550.0, 320.0)), Vec2::ZERO);
        assert_eq!(viewport.pointer_to_world(Vec2::ZERO), Vec2::new(-550.0, 320.0));
    }

    proptest! {
        #[test]
        fn test_screen_image_round_trip(
            scale in 0.5f32..=5.0,
            offset_x in -2000.0f32..2000.0,
            offset_y in -2000.0f32..2000.0,
            u in 0.0f32..=1.0,
            v in 0.0f32..=1.0,
        ) {
            let mut viewport = test_viewport();
            viewport.scale = scale;
            viewport.offset = Vec2::new(offset_x, offset_y);
            let image_point = Vec2::new(u * 640.0, v * 480.0);

            let recovered = viewport.screen_to_image(viewport.image_to_screen(image_point));
            prop_assert!((recovered - image_point).length() < 0.05);
        }
    }
}
