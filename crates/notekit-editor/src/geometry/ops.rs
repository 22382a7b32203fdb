//! Boolean path operations and stroke outlining.
//!
//! Regions are built with the even-odd rule: every flattened subpath of a
//! geometry is XOR-ed into the region, so holes written as inner subpaths
//! stay holes whatever their winding. The csgrs 2D sketch backend does the
//! polygon clipping; results come back as closed subpaths, exteriors first
//! then their holes.

use csgrs::sketch::Sketch;
use csgrs::traits::CSG;
use nalgebra::{Matrix4, Vector3};
use notekit_core::constants::FLATTEN_TOLERANCE;
use notekit_core::GeometryError;
use std::panic;

use super::{PathGeometry, Point, Rect};

const CIRCLE_SEGMENTS: usize = 32;
const MIN_RING_AREA: f64 = 1e-6;

/// End cap of an outlined stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    #[default]
    Round,
    Butt,
}

/// Corner join of an outlined stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    #[default]
    Round,
    Bevel,
}

type Region = Sketch<()>;

fn guarded(op: &str, f: impl FnOnce() -> Region) -> Result<Region, GeometryError> {
    panic::catch_unwind(panic::AssertUnwindSafe(f)).map_err(|_| {
        tracing::warn!("Panic during boolean '{}'", op);
        GeometryError::BooleanFailed {
            op: op.to_string(),
            reason: "clipping backend panicked".to_string(),
        }
    })
}

fn ensure_finite(path: &PathGeometry, context: &str) -> Result<(), GeometryError> {
    if path.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::NonFinite {
            context: context.to_string(),
        })
    }
}

fn signed_area(ring: &[[f64; 2]]) -> f64 {
    let n = ring.len();
    (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a[0] * b[1] - b[0] * a[1]
        })
        .sum::<f64>()
        / 2.0
}

fn ring_to_region(ring: &[Point]) -> Option<Region> {
    let mut pts: Vec<[f64; 2]> = Vec::with_capacity(ring.len());
    for p in ring {
        if pts.last() != Some(&[p.x, p.y]) {
            pts.push([p.x, p.y]);
        }
    }
    if pts.len() > 1 && pts.first() == pts.last() {
        pts.pop();
    }
    if pts.len() < 3 || signed_area(&pts).abs() < MIN_RING_AREA {
        return None;
    }
    Some(Sketch::polygon(&pts, None))
}

fn xor(a: &Region, b: &Region) -> Region {
    a.union(b).difference(&a.intersection(b))
}

fn region_from_path(path: &PathGeometry, op: &str) -> Result<Region, GeometryError> {
    ensure_finite(path, op)?;
    let mut region: Option<Region> = None;
    for ring in path.flatten(FLATTEN_TOLERANCE) {
        let Some(r) = ring_to_region(&ring) else {
            continue;
        };
        region = Some(match region {
            None => r,
            Some(acc) => guarded(op, || xor(&acc, &r))?,
        });
    }
    Ok(region.unwrap_or_else(Sketch::new))
}

fn push_ring(path: &mut PathGeometry, ring: &[Point]) {
    let mut points = ring.to_vec();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return;
    }
    path.move_to(points[0]);
    for p in &points[1..] {
        path.line_to(*p);
    }
    path.close();
}

/// One path per outer polygon of `region`, each followed by its holes.
fn region_components(region: &Region) -> Vec<PathGeometry> {
    let mp = region.to_multipolygon();
    let mut components = Vec::with_capacity(mp.0.len());
    for poly in mp.0.iter() {
        let mut path = PathGeometry::new();
        let exterior: Vec<Point> = poly
            .exterior()
            .0
            .iter()
            .map(|c| Point::new(c.x, c.y))
            .collect();
        push_ring(&mut path, &exterior);
        for interior in poly.interiors() {
            let hole: Vec<Point> = interior.0.iter().map(|c| Point::new(c.x, c.y)).collect();
            push_ring(&mut path, &hole);
        }
        if !path.is_empty() {
            components.push(path);
        }
    }
    components
}

fn region_to_path(region: &Region) -> PathGeometry {
    let mut path = PathGeometry::new();
    for component in region_components(region) {
        path.extend(&component);
    }
    path
}

/// `a` minus `b`, as filled regions.
pub fn subtract(a: &PathGeometry, b: &PathGeometry) -> Result<PathGeometry, GeometryError> {
    let ra = region_from_path(a, "subtract")?;
    let rb = region_from_path(b, "subtract")?;
    let result = guarded("subtract", || ra.difference(&rb))?;
    Ok(region_to_path(&result))
}

/// Overlap of `a` and `b`, as filled regions.
pub fn intersect(a: &PathGeometry, b: &PathGeometry) -> Result<PathGeometry, GeometryError> {
    let ra = region_from_path(a, "intersect")?;
    let rb = region_from_path(b, "intersect")?;
    let result = guarded("intersect", || ra.intersection(&rb))?;
    Ok(region_to_path(&result))
}

/// True when the path encloses no area.
pub fn region_is_empty(path: &PathGeometry) -> Result<bool, GeometryError> {
    let region = region_from_path(path, "area")?;
    Ok(region.to_multipolygon().0.is_empty())
}

/// Splits a filled path into its connected components.
pub fn split_components(path: &PathGeometry) -> Result<Vec<PathGeometry>, GeometryError> {
    let region = region_from_path(path, "split")?;
    Ok(region_components(&region))
}

fn disc(center: Point, radius: f64) -> Region {
    let circle: Region = Sketch::circle(radius, CIRCLE_SEGMENTS, None);
    circle.transform(&Matrix4::new_translation(&Vector3::new(
        center.x, center.y, 0.0,
    )))
}

fn thick_segment(p1: Point, p2: Point, half_width: f64) -> Option<Region> {
    let delta = p2 - p1;
    let len = delta.length();
    if len < f64::EPSILON {
        return None;
    }
    let half_l = len / 2.0;
    let pts = vec![
        [-half_l, -half_width],
        [half_l, -half_width],
        [half_l, half_width],
        [-half_l, half_width],
    ];
    let rect: Region = Sketch::polygon(&pts, None);

    let center = p1.midpoint(&p2);
    let angle = delta.y.atan2(delta.x);
    let rotation = Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle));
    let translation = Matrix4::new_translation(&Vector3::new(center.x, center.y, 0.0));
    Some(rect.transform(&(translation * rotation)))
}

fn bevel(prev: Point, vertex: Point, next: Point, half_width: f64) -> Option<Region> {
    let normal = |a: Point, b: Point| {
        let d = b - a;
        let len = d.length();
        Point::new(-d.y / len, d.x / len) * half_width
    };
    let n1 = normal(prev, vertex);
    let n2 = normal(vertex, next);
    let ring = [vertex + n1, vertex + n2, vertex - n1, vertex - n2];
    ring_to_region(&ring)
}

/// Filled outline of `path` stroked with `width`.
///
/// Each flattened segment becomes a rectangle of the stroke width; round
/// joins and caps add a disc at the vertices. An empty path gives an empty
/// outline.
pub fn stroke_to_fill(
    path: &PathGeometry,
    width: f64,
    cap: LineCap,
    join: LineJoin,
) -> Result<PathGeometry, GeometryError> {
    if !width.is_finite() || width <= 0.0 {
        return Err(GeometryError::InvalidWidth { width });
    }
    ensure_finite(path, "stroke")?;
    let half = width / 2.0;

    let mut pieces: Vec<Region> = Vec::new();
    for polyline in path.flatten(FLATTEN_TOLERANCE) {
        let mut pts: Vec<Point> = Vec::with_capacity(polyline.len());
        for p in polyline {
            if pts.last() != Some(&p) {
                pts.push(p);
            }
        }
        let Some((&first, _)) = pts.split_first() else {
            continue;
        };
        let last = pts[pts.len() - 1];

        if pts.len() == 1 {
            if cap == LineCap::Round {
                pieces.push(disc(first, half));
            }
            continue;
        }

        for pair in pts.windows(2) {
            if let Some(seg) = thick_segment(pair[0], pair[1], half) {
                pieces.push(seg);
            }
        }

        for window in pts.windows(3) {
            match join {
                LineJoin::Round => pieces.push(disc(window[1], half)),
                LineJoin::Bevel => pieces.extend(bevel(window[0], window[1], window[2], half)),
            }
        }

        let closed = first == last;
        if closed && join == LineJoin::Round {
            pieces.push(disc(first, half));
        } else if !closed && cap == LineCap::Round {
            pieces.push(disc(first, half));
            pieces.push(disc(last, half));
        }
    }

    match union_all(pieces, "stroke")? {
        Some(outline) => Ok(region_to_path(&outline)),
        None => Ok(PathGeometry::new()),
    }
}

/// Unions regions pairwise, level by level, so each boolean works on
/// operands of similar size instead of growing one accumulator.
fn union_all(mut regions: Vec<Region>, op: &str) -> Result<Option<Region>, GeometryError> {
    while regions.len() > 1 {
        let mut merged = Vec::with_capacity(regions.len().div_ceil(2));
        let mut iter = regions.into_iter();
        while let Some(a) = iter.next() {
            match iter.next() {
                Some(b) => merged.push(guarded(op, || a.union(&b))?),
                None => merged.push(a),
            }
        }
        regions = merged;
    }
    Ok(regions.pop())
}

/// Closed polygonal approximation of a circle.
pub fn circle_path(center: Point, radius: f64) -> PathGeometry {
    let points: Vec<Point> = (0..CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = i as f64 / CIRCLE_SEGMENTS as f64 * std::f64::consts::TAU;
            Point::new(
                center.x + radius * angle.cos(),
                center.y + radius * angle.sin(),
            )
        })
        .collect();
    PathGeometry::polygon(&points)
}

/// Closed path around a rectangle.
pub fn rect_path(rect: &Rect) -> PathGeometry {
    PathGeometry::polygon(&rect.corners())
}
