//! Page records: the JSON form of one notebook page.
//!
//! A page is a list of layer records, topmost first, each holding its item
//! records in paint order. Missing fields take documented defaults so old
//! pages keep loading; a page that cannot be parsed at all loads as a
//! single empty layer. Legacy pages used `capas`/`nombre` for the layer
//! list and layer name, and a uniform `scale` instead of a matrix.
//!
//! Path elements follow the legacy Qt element stream: `t` is 0 for move, 1
//! for line, and a cubic curve is the triple (2, 3, 3) holding the first
//! control point, the second control point and the end point. Quadratic
//! segments are raised to that cubic form on save and reduced back to a
//! quadratic on load. A curve start without its two data elements reads as
//! a line to that point.
//!
//! `pen_width` and `font_size` are integers on disk. Fractional widths
//! from other writers are rounded, and a non-positive font size falls back
//! to the default.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use notekit_core::constants::DEFAULT_LAYER_NAME;
use notekit_core::PageFormatError;
use serde::{Deserialize, Deserializer, Serialize};

use crate::geometry::{PathCommand, PathGeometry, Point};
use crate::layer::Layer;
use crate::model::{
    Color, ImageItem, Item, ItemKind, ItemTransform, PathItem, StrokePaint, TextItem,
};
use crate::scene::Scene;

const ELEMENT_MOVE: u8 = 0;
const ELEMENT_LINE: u8 = 1;
const ELEMENT_CURVE: u8 = 2;
const ELEMENT_CURVE_DATA: u8 = 3;

const DEFAULT_FONT_FAMILY: &str = "Arial";
const DEFAULT_FONT_SIZE: u32 = 12;
const DEFAULT_PEN_WIDTH: i64 = 1;

/// Locates image files referenced by page records.
pub trait AssetResolver: Send + Sync {
    /// Full path of an asset, if it exists.
    fn resolve(&self, filename: &str) -> Option<PathBuf>;

    /// Pixel size of an image asset.
    fn dimensions(&self, filename: &str) -> Option<(u32, u32)> {
        let path = self.resolve(filename)?;
        match image::image_dimensions(&path) {
            Ok(dims) => Some(dims),
            Err(e) => {
                tracing::warn!("Cannot read image size of {}: {}", path.display(), e);
                None
            }
        }
    }
}

/// Resolves assets inside one directory, usually a page's `assets/`.
#[derive(Debug, Clone)]
pub struct DirAssetResolver {
    dir: PathBuf,
}

impl DirAssetResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl AssetResolver for DirAssetResolver {
    fn resolve(&self, filename: &str) -> Option<PathBuf> {
        let path = self.dir.join(filename);
        path.is_file().then_some(path)
    }
}

/// Resolver for pages without an asset directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetResolver for NoAssets {
    fn resolve(&self, _filename: &str) -> Option<PathBuf> {
        None
    }
}

/// One page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageRecord {
    #[serde(default, alias = "capas")]
    pub layers: Vec<LayerRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerRecord {
    /// Defaults to "Layer 1".
    #[serde(default = "default_layer_name", alias = "nombre")]
    pub name: String,
    /// Defaults to true.
    #[serde(default = "default_true")]
    pub visible: bool,
    /// Defaults to false.
    #[serde(default)]
    pub locked: bool,
    /// Records that fail to decode are dropped with a warning.
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Vec<ItemRecord>,
}

/// Flat item record; which fields are meaningful depends on `kind`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRecord {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub pos_x: f64,
    #[serde(default)]
    pub pos_y: f64,
    /// Rotation in degrees.
    #[serde(default)]
    pub rot: f64,
    /// Legacy uniform scale, multiplied into the matrix. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m11: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m12: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m21: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub m22: Option<f64>,
    /// Advisory; recomputed on load.
    #[serde(default)]
    pub z: f64,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path_elements: Vec<PathElement>,
    /// Defaults to black.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pen_color: Option<String>,
    /// Whole scene units, defaults to 1.
    #[serde(
        default,
        deserialize_with = "rounded_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub pen_width: Option<i64>,
    /// Defaults to true.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_pen: Option<bool>,
    /// Defaults to false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,

    /// Defaults to an empty string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Defaults to "Arial".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// Point size, defaults to 12. Legacy pages use -1 for "unset".
    #[serde(
        default,
        deserialize_with = "rounded_int",
        skip_serializing_if = "Option::is_none"
    )]
    pub font_size: Option<i64>,
    /// Text color, defaults to black.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_filename: Option<String>,
    /// When absent the size is read from the asset file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_height: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathElement {
    pub t: u8,
    pub x: f64,
    pub y: f64,
}

impl PathElement {
    fn new(t: u8, p: Point) -> Self {
        Self { t, x: p.x, y: p.y }
    }

    fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

fn default_layer_name() -> String {
    DEFAULT_LAYER_NAME.to_string()
}

fn default_true() -> bool {
    true
}

/// Reads an optional number, rounding fractional values.
fn rounded_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<f64> = Option::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite()).map(|v| v.round() as i64))
}

fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<ItemRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<ItemRecord>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("Skipping malformed item record: {}", e);
                None
            }
        })
        .collect())
}

impl PageRecord {
    pub fn from_json(json: &str) -> Result<Self, PageFormatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, PageFormatError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, PageFormatError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), PageFormatError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_json()?)?;
        tracing::info!("Saved page to {}", path.display());
        Ok(())
    }

    pub fn item_count(&self) -> usize {
        self.layers.iter().map(|l| l.items.len()).sum()
    }
}

/// Snapshot of a scene, layers in current order.
pub fn save_scene(scene: &Scene) -> PageRecord {
    PageRecord {
        layers: scene
            .layers()
            .iter()
            .map(|layer| LayerRecord {
                name: layer.name.clone(),
                visible: layer.visible,
                locked: layer.locked,
                items: layer
                    .items()
                    .iter()
                    .filter(|item| scene.contains_item(item.id))
                    .map(encode_item)
                    .collect(),
            })
            .collect(),
    }
}

/// Builds a scene from a page record. Unknown or unusable item records are
/// skipped; an empty record yields one empty layer.
pub fn load_scene(record: &PageRecord, assets: &dyn AssetResolver, z_band: i64) -> Scene {
    let layers = record
        .layers
        .iter()
        .map(|layer_record| {
            let items = layer_record
                .items
                .iter()
                .filter_map(|r| match decode_item(r, assets) {
                    Ok(item) => Some(item),
                    Err(e) => {
                        tracing::warn!("Skipping item in layer '{}': {}", layer_record.name, e);
                        None
                    }
                })
                .collect();
            let mut layer = Layer::with_items(layer_record.name.clone(), items);
            layer.visible = layer_record.visible;
            layer.locked = layer_record.locked;
            layer
        })
        .collect();
    Scene::from_layers(layers, z_band)
}

/// Parses and loads page JSON, falling back to a single empty layer when
/// the data cannot be read at all.
pub fn load_scene_from_json(json: &str, assets: &dyn AssetResolver, z_band: i64) -> Scene {
    match PageRecord::from_json(json) {
        Ok(record) => load_scene(&record, assets, z_band),
        Err(e) => {
            tracing::warn!("Unreadable page, starting with an empty layer: {}", e);
            Scene::new(z_band)
        }
    }
}

fn encode_item(item: &Item) -> ItemRecord {
    let (m11, m12, m21, m22) = item.transform.matrix_entries();
    let mut record = ItemRecord {
        kind: item.kind.type_name().to_string(),
        pos_x: item.transform.position.x,
        pos_y: item.transform.position.y,
        rot: item.transform.rotation,
        scale: Some(1.0),
        m11: Some(m11),
        m12: Some(m12),
        m21: Some(m21),
        m22: Some(m22),
        z: item.z as f64,
        ..Default::default()
    };
    match &item.kind {
        ItemKind::Path(path) => {
            record.path_elements = encode_path(&path.geometry);
            record.has_pen = Some(path.stroke.is_some());
            record.has_fill = Some(path.fill.is_some());
            let (pen_color, pen_width) = match path.stroke {
                Some(stroke) => (stroke.color, (stroke.width.round() as i64).max(1)),
                None => (Color::BLACK, DEFAULT_PEN_WIDTH),
            };
            record.pen_color = Some(pen_color.to_hex());
            record.pen_width = Some(pen_width);
            record.fill_color = path.fill.map(|c| c.to_hex());
        }
        ItemKind::Text(text) => {
            record.content = Some(text.content.clone());
            record.font_family = Some(text.font_family.clone());
            record.font_size = Some(i64::from(text.font_size));
            record.color = Some(text.color.to_hex());
        }
        ItemKind::Image(image) => {
            record.img_filename = Some(image.filename.clone());
            record.img_width = Some(image.width);
            record.img_height = Some(image.height);
        }
    }
    record
}

fn decode_transform(record: &ItemRecord) -> ItemTransform {
    let uniform = record.scale.unwrap_or(1.0);
    let transform = ItemTransform::at(Point::new(record.pos_x, record.pos_y));
    let mut transform = ItemTransform {
        rotation: record.rot,
        ..transform
    };
    match (record.m11, record.m12, record.m21, record.m22) {
        (Some(m11), Some(m12), Some(m21), Some(m22)) => {
            transform = transform.with_matrix(m11, m12, m21, m22);
            if uniform != 1.0 {
                transform = transform.scaled_locally(uniform, uniform);
            }
        }
        _ => transform = transform.with_uniform_scale(uniform),
    }
    transform
}

fn parse_color(value: Option<&str>, field: &str) -> Color {
    match value.map(Color::from_str) {
        Some(Ok(color)) => color,
        Some(Err(e)) => {
            tracing::warn!("{} for '{}', using black", e, field);
            Color::BLACK
        }
        None => Color::BLACK,
    }
}

fn decode_item(record: &ItemRecord, assets: &dyn AssetResolver) -> Result<Item, PageFormatError> {
    let kind = match record.kind.as_str() {
        "path" => {
            let geometry = decode_path(&record.path_elements);
            if geometry.is_empty() {
                return Err(PageFormatError::MalformedRecord {
                    record: "path".to_string(),
                    reason: "no drawable elements".to_string(),
                });
            }
            let stroke = record.has_pen.unwrap_or(true).then(|| StrokePaint {
                color: parse_color(record.pen_color.as_deref(), "pen_color"),
                width: record.pen_width.filter(|w| *w > 0).unwrap_or(DEFAULT_PEN_WIDTH) as f64,
            });
            let fill = record
                .has_fill
                .unwrap_or(false)
                .then(|| parse_color(record.fill_color.as_deref(), "fill_color"));
            ItemKind::Path(PathItem {
                geometry,
                stroke,
                fill,
            })
        }
        "text" => ItemKind::Text(TextItem {
            content: record.content.clone().unwrap_or_default(),
            font_family: record
                .font_family
                .clone()
                .unwrap_or_else(|| DEFAULT_FONT_FAMILY.to_string()),
            font_size: record
                .font_size
                .and_then(|size| u32::try_from(size).ok())
                .filter(|size| *size > 0)
                .unwrap_or(DEFAULT_FONT_SIZE),
            color: parse_color(record.color.as_deref(), "color"),
        }),
        "image" => {
            let Some(filename) = record.img_filename.clone().filter(|f| !f.is_empty()) else {
                return Err(PageFormatError::MalformedRecord {
                    record: "image".to_string(),
                    reason: "missing img_filename".to_string(),
                });
            };
            let (width, height) = match (record.img_width, record.img_height) {
                (Some(w), Some(h)) => (w, h),
                _ => assets.dimensions(&filename).unwrap_or_else(|| {
                    tracing::warn!("Image '{}' not found, loading with zero size", filename);
                    (0, 0)
                }),
            };
            ItemKind::Image(ImageItem {
                filename,
                width,
                height,
            })
        }
        other => {
            return Err(PageFormatError::MalformedRecord {
                record: "item".to_string(),
                reason: format!("unknown type '{}'", other),
            })
        }
    };
    Ok(Item::new(kind, decode_transform(record)))
}

fn encode_path(path: &PathGeometry) -> Vec<PathElement> {
    let mut elements = Vec::with_capacity(path.len());
    let mut current = Point::default();
    for cmd in path.commands() {
        match *cmd {
            PathCommand::MoveTo(p) => elements.push(PathElement::new(ELEMENT_MOVE, p)),
            PathCommand::LineTo(p) => elements.push(PathElement::new(ELEMENT_LINE, p)),
            PathCommand::QuadTo { ctrl, to } => {
                let c1 = current + (ctrl - current) * (2.0 / 3.0);
                let c2 = to + (ctrl - to) * (2.0 / 3.0);
                elements.push(PathElement::new(ELEMENT_CURVE, c1));
                elements.push(PathElement::new(ELEMENT_CURVE_DATA, c2));
                elements.push(PathElement::new(ELEMENT_CURVE_DATA, to));
            }
        }
        current = cmd.end();
    }
    elements
}

fn decode_path(elements: &[PathElement]) -> PathGeometry {
    let mut path = PathGeometry::new();
    let Some(first) = elements.first() else {
        return path;
    };
    path.move_to(first.point());
    let mut i = 1;
    while i < elements.len() {
        let e = elements[i];
        match e.t {
            ELEMENT_LINE => {
                path.line_to(e.point());
                i += 1;
            }
            ELEMENT_CURVE if i + 2 < elements.len() => {
                path.cubic_to(e.point(), elements[i + 1].point(), elements[i + 2].point());
                i += 3;
            }
            ELEMENT_CURVE => {
                path.line_to(e.point());
                i += 1;
            }
            _ => {
                path.move_to(e.point());
                i += 1;
            }
        }
    }
    path
}
