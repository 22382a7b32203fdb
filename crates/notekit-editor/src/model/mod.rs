//! Drawable items.
//!
//! Items are a closed set of variants sharing one transform. Layers own
//! items by value; everything else refers to them by [`ItemId`].

mod text;
mod transform;

pub use text::{ApproximateTextMetrics, TextMetrics};
pub use transform::ItemTransform;

use notekit_core::{ItemId, PageFormatError};
use std::fmt;
use std::str::FromStr;

use crate::geometry::{PathGeometry, Point, Rect};

/// An sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl FromStr for Color {
    type Err = PageFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PageFormatError::InvalidColor(s.to_string());
        let digits = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        match digits.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color {
                r: channel(0)?,
                g: channel(2)?,
                b: channel(4)?,
                a: channel(6)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Outline paint. Caps and joins are always round.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokePaint {
    pub color: Color,
    pub width: f64,
}

/// Freehand stroke or shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PathItem {
    pub geometry: PathGeometry,
    pub stroke: Option<StrokePaint>,
    pub fill: Option<Color>,
}

impl PathItem {
    /// Outline-only path, as drawn by the pen and shape tools.
    pub fn stroked(geometry: PathGeometry, color: Color, width: f64) -> Self {
        Self {
            geometry,
            stroke: Some(StrokePaint { color, width }),
            fill: None,
        }
    }

    /// Fill-only path.
    pub fn filled(geometry: PathGeometry, color: Color) -> Self {
        Self {
            geometry,
            stroke: None,
            fill: Some(color),
        }
    }

    /// Neither outline nor fill: nothing would be painted.
    pub fn is_invisible(&self) -> bool {
        self.stroke.is_none() && self.fill.is_none()
    }
}

/// Plain text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub content: String,
    pub font_family: String,
    /// Points.
    pub font_size: u32,
    pub color: Color,
}

/// Reference to pixel data stored next to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageItem {
    pub filename: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    Path(PathItem),
    Text(TextItem),
    Image(ImageItem),
}

impl ItemKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ItemKind::Path(_) => "path",
            ItemKind::Text(_) => "text",
            ItemKind::Image(_) => "image",
        }
    }
}

/// A drawable scene entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub transform: ItemTransform,
    /// Derived paint order, rewritten by the scene after structural changes.
    pub z: i64,
    pub kind: ItemKind,
}

impl Item {
    pub fn new(kind: ItemKind, transform: ItemTransform) -> Self {
        Self {
            id: ItemId::next(),
            transform,
            z: 0,
            kind,
        }
    }

    pub fn path(path: PathItem) -> Self {
        Self::new(ItemKind::Path(path), ItemTransform::default())
    }

    pub fn text(text: TextItem, position: Point) -> Self {
        Self::new(ItemKind::Text(text), ItemTransform::at(position))
    }

    pub fn image(image: ImageItem, transform: ItemTransform) -> Self {
        Self::new(ItemKind::Image(image), transform)
    }

    pub fn as_path(&self) -> Option<&PathItem> {
        match &self.kind {
            ItemKind::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_path_mut(&mut self) -> Option<&mut PathItem> {
        match &mut self.kind {
            ItemKind::Path(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&TextItem> {
        match &self.kind {
            ItemKind::Text(t) => Some(t),
            _ => None,
        }
    }

    /// Bounds in item coordinates, including half the stroke width.
    pub fn local_bounds(&self, metrics: &dyn TextMetrics) -> Option<Rect> {
        match &self.kind {
            ItemKind::Path(p) => {
                let bounds = p.geometry.bounds()?;
                let pad = p.stroke.map_or(0.0, |s| s.width / 2.0);
                Some(bounds.inflate(pad))
            }
            ItemKind::Text(t) => {
                let (w, h) = metrics.measure(t);
                Some(Rect::from_xywh(0.0, 0.0, w, h))
            }
            ItemKind::Image(img) => Some(Rect::from_xywh(
                0.0,
                0.0,
                img.width as f64,
                img.height as f64,
            )),
        }
    }

    /// Axis-aligned bounds of the transformed item in scene space.
    pub fn scene_bounds(&self, metrics: &dyn TextMetrics) -> Option<Rect> {
        self.local_bounds(metrics)
            .map(|r| self.transform.map_rect(&r))
    }

    /// Hit test at a scene point with a scene-space tolerance.
    pub fn hit_test(&self, scene_point: Point, tolerance: f64, metrics: &dyn TextMetrics) -> bool {
        let Some(bounds) = self.scene_bounds(metrics) else {
            return false;
        };
        if !bounds.inflate(tolerance).contains(scene_point) {
            return false;
        }
        match &self.kind {
            ItemKind::Path(p) => path_hit(p, &self.transform, scene_point, tolerance),
            ItemKind::Text(_) | ItemKind::Image(_) => {
                match self.transform.map_from_scene(scene_point) {
                    Some(local) => self
                        .local_bounds(metrics)
                        .is_some_and(|r| r.inflate(tolerance).contains(local)),
                    None => false,
                }
            }
        }
    }
}

fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.x * ab.x + ab.y * ab.y;
    if len_sq < f64::EPSILON {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * ab.x + (p.y - a.y) * ab.y) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&a.lerp(&b, t))
}

fn inside_even_odd(p: Point, rings: &[Vec<Point>]) -> bool {
    let mut inside = false;
    for ring in rings {
        let n = ring.len();
        for i in 0..n {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
        }
    }
    inside
}

fn path_hit(path: &PathItem, transform: &ItemTransform, p: Point, tolerance: f64) -> bool {
    let scene_path = path.geometry.transformed(|q| transform.map_to_scene(q));
    let rings = scene_path.flatten(notekit_core::constants::FLATTEN_TOLERANCE);

    if path.fill.is_some() && inside_even_odd(p, &rings) {
        return true;
    }

    let reach = tolerance
        + path
            .stroke
            .map_or(0.0, |s| s.width * transform.mean_scale() / 2.0);
    rings.iter().any(|ring| {
        ring.windows(2)
            .any(|seg| distance_to_segment(p, seg[0], seg[1]) <= reach)
            || (ring.len() == 1 && ring[0].distance_to(&p) <= reach)
    })
}
