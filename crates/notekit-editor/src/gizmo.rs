//! Transform gizmo overlay.
//!
//! The gizmo is not part of the scene. It is recomputed from the selection
//! bounds and drawn by the host on top of the canvas. Handle sizes are in
//! view pixels and are divided by the zoom so they keep a constant on-screen
//! size.

use crate::geometry::{Point, Rect};

/// Role of a gizmo handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
    Rotate,
}

impl HandleRole {
    pub const ALL: [HandleRole; 9] = [
        HandleRole::Rotate,
        HandleRole::TopLeft,
        HandleRole::TopRight,
        HandleRole::BottomLeft,
        HandleRole::BottomRight,
        HandleRole::Top,
        HandleRole::Bottom,
        HandleRole::Left,
        HandleRole::Right,
    ];

    pub fn is_scale(&self) -> bool {
        !matches!(self, HandleRole::Rotate)
    }

    /// Top and bottom handles only scale vertically.
    pub fn locks_x(&self) -> bool {
        matches!(self, HandleRole::Top | HandleRole::Bottom)
    }

    /// Left and right handles only scale horizontally.
    pub fn locks_y(&self) -> bool {
        matches!(self, HandleRole::Left | HandleRole::Right)
    }

    /// Position relative to the gizmo center in units of half extents;
    /// the rotate handle is placed separately.
    fn unit_offset(&self) -> (f64, f64) {
        match self {
            HandleRole::TopLeft => (-1.0, -1.0),
            HandleRole::TopRight => (1.0, -1.0),
            HandleRole::BottomLeft => (-1.0, 1.0),
            HandleRole::BottomRight => (1.0, 1.0),
            HandleRole::Top => (0.0, -1.0),
            HandleRole::Bottom => (0.0, 1.0),
            HandleRole::Left => (-1.0, 0.0),
            HandleRole::Right => (1.0, 0.0),
            HandleRole::Rotate => (0.0, -1.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Gizmo {
    center: Point,
    width: f64,
    height: f64,
    /// Accumulated rotation of the current selection, degrees.
    angle: f64,
    handle_size: f64,
    rotate_offset: f64,
    visible: bool,
}

impl Gizmo {
    pub fn new(handle_size: f64, rotate_offset: f64) -> Self {
        Self {
            center: Point::default(),
            width: 0.0,
            height: 0.0,
            angle: 0.0,
            handle_size,
            rotate_offset,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn set_angle(&mut self, angle: f64) {
        self.angle = angle;
    }

    pub fn rotate_by(&mut self, delta: f64) {
        self.angle += delta;
    }

    /// Places the gizmo around `bounds`; `None` hides it.
    pub fn update(&mut self, bounds: Option<Rect>) {
        match bounds {
            Some(rect) => {
                self.center = rect.center();
                self.width = rect.width();
                self.height = rect.height();
                self.visible = true;
            }
            None => self.hide(),
        }
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    fn to_scene(&self, local: Point) -> Point {
        self.center + local.rotated(self.angle)
    }

    fn to_local(&self, scene: Point) -> Point {
        (scene - self.center).rotated(-self.angle)
    }

    fn local_handle_position(&self, role: HandleRole, zoom: f64) -> Point {
        let (ux, uy) = role.unit_offset();
        let mut local = Point::new(ux * self.width / 2.0, uy * self.height / 2.0);
        if role == HandleRole::Rotate {
            local.y -= self.rotate_offset / zoom;
        }
        local
    }

    /// Scene position of a handle at the given zoom.
    pub fn handle_position(&self, role: HandleRole, zoom: f64) -> Point {
        self.to_scene(self.local_handle_position(role, zoom))
    }

    /// Scene positions of every handle, for drawing.
    pub fn handles(&self, zoom: f64) -> Vec<(HandleRole, Point)> {
        HandleRole::ALL
            .iter()
            .map(|role| (*role, self.handle_position(*role, zoom)))
            .collect()
    }

    /// Handle under `scene_point`, tested in the gizmo's rotated frame.
    pub fn handle_at(&self, scene_point: Point, zoom: f64) -> Option<HandleRole> {
        if !self.visible || zoom <= 0.0 {
            return None;
        }
        let local = self.to_local(scene_point);
        let half = self.handle_size / zoom / 2.0;
        HandleRole::ALL.iter().copied().find(|role| {
            let pos = self.local_handle_position(*role, zoom);
            (local.x - pos.x).abs() <= half && (local.y - pos.y).abs() <= half
        })
    }
}

impl Default for Gizmo {
    fn default() -> Self {
        Self::new(8.0, 20.0)
    }
}
