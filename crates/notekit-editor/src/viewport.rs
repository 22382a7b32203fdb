//! View transform: zoom plus scroll offsets.
//!
//! Scene space and view space are both y-down:
//!
//! ```text
//! view  = scene * zoom - scroll
//! scene = (view + scroll) / zoom
//! ```

use std::fmt;

use notekit_settings::CanvasSettings;

use crate::geometry::{Point, Rect};

#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    zoom: f64,
    scroll_x: f64,
    scroll_y: f64,
    view_width: f64,
    view_height: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Viewport {
    pub fn new(view_width: f64, view_height: f64) -> Self {
        Self {
            zoom: 1.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            view_width,
            view_height,
            min_zoom: 0.05,
            max_zoom: 50.0,
        }
    }

    /// Takes zoom bounds from the canvas settings.
    pub fn with_settings(mut self, settings: &CanvasSettings) -> Self {
        self.min_zoom = settings.min_zoom;
        self.max_zoom = settings.max_zoom;
        self.zoom = self.zoom.clamp(self.min_zoom, self.max_zoom);
        self
    }

    pub fn view_width(&self) -> f64 {
        self.view_width
    }

    pub fn view_height(&self) -> f64 {
        self.view_height
    }

    /// Sets the widget size; called when the host window resizes.
    pub fn set_view_size(&mut self, width: f64, height: f64) {
        self.view_width = width;
        self.view_height = height;
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn zoom_bounds(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the zoom level, clamped to the configured bounds.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            tracing::warn!("Ignoring invalid zoom {}", zoom);
            return;
        }
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Multiplies the zoom by `factor`, keeping the scene point at the
    /// middle of the view in place.
    pub fn zoom_by(&mut self, factor: f64) {
        let center = self.view_to_scene(Point::new(self.view_width / 2.0, self.view_height / 2.0));
        self.set_zoom(self.zoom * factor);
        self.center_on(center);
    }

    pub fn scroll(&self) -> (f64, f64) {
        (self.scroll_x, self.scroll_y)
    }

    pub fn set_scroll(&mut self, x: f64, y: f64) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Drags the paper by a pixel delta.
    pub fn pan_by_pixels(&mut self, dx: f64, dy: f64) {
        self.scroll_x -= dx;
        self.scroll_y -= dy;
    }

    pub fn center_on(&mut self, scene_point: Point) {
        self.scroll_x = scene_point.x * self.zoom - self.view_width / 2.0;
        self.scroll_y = scene_point.y * self.zoom - self.view_height / 2.0;
    }

    /// Zooms so that `rect` fits the view with its aspect ratio kept, and
    /// centers on it. Degenerate rectangles are ignored.
    pub fn fit_rect(&mut self, rect: &Rect) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let zoom_x = self.view_width / rect.width();
        let zoom_y = self.view_height / rect.height();
        self.set_zoom(zoom_x.min(zoom_y));
        self.center_on(rect.center());
    }

    pub fn view_to_scene(&self, view: Point) -> Point {
        Point::new(
            (view.x + self.scroll_x) / self.zoom,
            (view.y + self.scroll_y) / self.zoom,
        )
    }

    pub fn scene_to_view(&self, scene: Point) -> Point {
        Point::new(
            scene.x * self.zoom - self.scroll_x,
            scene.y * self.zoom - self.scroll_y,
        )
    }

    /// Scene rectangle currently visible.
    pub fn visible_scene_rect(&self) -> Rect {
        Rect::from_points(
            self.view_to_scene(Point::new(0.0, 0.0)),
            self.view_to_scene(Point::new(self.view_width, self.view_height)),
        )
    }
}

impl fmt::Display for Viewport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Scroll: ({:.1}, {:.1})",
            self.zoom, self.scroll_x, self.scroll_y
        )
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1200.0, 800.0)
    }
}
