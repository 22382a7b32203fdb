//! Vector path values.

use lyon::math::point;
use lyon::path::iterator::*;
use lyon::path::Path;

use super::{Point, Rect};

/// One drawing command of a [`PathGeometry`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Quadratic Bézier segment with a single control point.
    QuadTo { ctrl: Point, to: Point },
}

impl PathCommand {
    /// End point of the command.
    pub fn end(&self) -> Point {
        match *self {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => p,
            PathCommand::QuadTo { to, .. } => to,
        }
    }

    fn map(&self, f: &impl Fn(Point) -> Point) -> PathCommand {
        match *self {
            PathCommand::MoveTo(p) => PathCommand::MoveTo(f(p)),
            PathCommand::LineTo(p) => PathCommand::LineTo(f(p)),
            PathCommand::QuadTo { ctrl, to } => PathCommand::QuadTo {
                ctrl: f(ctrl),
                to: f(to),
            },
        }
    }
}

/// An ordered list of path commands.
///
/// A non-empty path always starts with `MoveTo`; the builder methods insert
/// one when a segment is appended to an empty path. Closed subpaths end with
/// an explicit `LineTo` back to their start point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathGeometry {
    commands: Vec<PathCommand>,
}

impl PathGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a path from raw commands, prepending a `MoveTo` when the
    /// first command is a segment.
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        let mut path = Self::new();
        for cmd in commands {
            path.push(cmd);
        }
        path
    }

    /// Open polyline through `points`.
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        if let Some((first, rest)) = points.split_first() {
            path.move_to(*first);
            for p in rest {
                path.line_to(*p);
            }
        }
        path
    }

    /// Closed polygon through `points`.
    pub fn polygon(points: &[Point]) -> Self {
        let mut path = Self::polyline(points);
        path.close();
        path
    }

    pub fn push(&mut self, cmd: PathCommand) {
        if self.commands.is_empty() {
            match cmd {
                PathCommand::MoveTo(_) => {}
                PathCommand::LineTo(p) => self.commands.push(PathCommand::MoveTo(p)),
                PathCommand::QuadTo { ctrl, .. } => self.commands.push(PathCommand::MoveTo(ctrl)),
            }
        }
        self.commands.push(cmd);
    }

    pub fn move_to(&mut self, p: Point) {
        self.push(PathCommand::MoveTo(p));
    }

    pub fn line_to(&mut self, p: Point) {
        self.push(PathCommand::LineTo(p));
    }

    pub fn quad_to(&mut self, ctrl: Point, to: Point) {
        self.push(PathCommand::QuadTo { ctrl, to });
    }

    /// Appends a cubic segment reduced to one quadratic. The reduction is
    /// exact for cubics that are degree-elevated quadratics.
    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        let from = self.last_point().unwrap_or(ctrl1);
        let ctrl = (ctrl1 + ctrl2) * 0.75 - (from + to) * 0.25;
        self.quad_to(ctrl, to);
    }

    /// Closes the current subpath with a line back to its start.
    pub fn close(&mut self) {
        let start = self.commands.iter().rev().find_map(|c| match c {
            PathCommand::MoveTo(p) => Some(*p),
            _ => None,
        });
        if let (Some(start), Some(last)) = (start, self.commands.last()) {
            if last.end() != start {
                self.commands.push(PathCommand::LineTo(start));
            }
        }
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// A path without any drawable segment is empty.
    pub fn is_empty(&self) -> bool {
        !self
            .commands
            .iter()
            .any(|c| !matches!(c, PathCommand::MoveTo(_)))
    }

    /// Number of on-curve points (command end points).
    pub fn point_count(&self) -> usize {
        self.commands.len()
    }

    /// All points including control points, in command order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|c| match *c {
            PathCommand::MoveTo(p) | PathCommand::LineTo(p) => [Some(p), None],
            PathCommand::QuadTo { ctrl, to } => [Some(ctrl), Some(to)],
        })
        .flatten()
    }

    pub fn first_point(&self) -> Option<Point> {
        self.commands.first().map(PathCommand::end)
    }

    pub fn last_point(&self) -> Option<Point> {
        self.commands.last().map(PathCommand::end)
    }

    pub fn is_finite(&self) -> bool {
        self.points().all(|p| p.is_finite())
    }

    /// Applies `f` to every point. Affine maps keep quadratic segments exact.
    pub fn transformed(&self, f: impl Fn(Point) -> Point) -> PathGeometry {
        PathGeometry {
            commands: self.commands.iter().map(|c| c.map(&f)).collect(),
        }
    }

    /// Tight bounds of the drawn curve, `None` for a path without commands.
    pub fn bounds(&self) -> Option<Rect> {
        if self.commands.is_empty() {
            return None;
        }
        if self.commands.len() == 1 {
            return self.first_point().map(|p| Rect { min: p, max: p });
        }
        let bb = lyon::algorithms::aabb::bounding_box(self.to_lyon().iter());
        Some(Rect {
            min: Point::new(bb.min.x as f64, bb.min.y as f64),
            max: Point::new(bb.max.x as f64, bb.max.y as f64),
        })
    }

    /// Converts to a lyon path. Every subpath is left open; closure is
    /// carried by the explicit closing segment.
    pub fn to_lyon(&self) -> Path {
        let mut builder = Path::builder();
        let mut open = false;
        for cmd in &self.commands {
            match *cmd {
                PathCommand::MoveTo(p) => {
                    if open {
                        builder.end(false);
                    }
                    builder.begin(point(p.x as f32, p.y as f32));
                    open = true;
                }
                PathCommand::LineTo(p) => {
                    builder.line_to(point(p.x as f32, p.y as f32));
                }
                PathCommand::QuadTo { ctrl, to } => {
                    builder.quadratic_bezier_to(
                        point(ctrl.x as f32, ctrl.y as f32),
                        point(to.x as f32, to.y as f32),
                    );
                }
            }
        }
        if open {
            builder.end(false);
        }
        builder.build()
    }

    /// Builds a path from a lyon path. Cubic segments are reduced to a
    /// single quadratic; closed subpaths gain their closing segment.
    pub fn from_lyon(path: &Path) -> PathGeometry {
        let to_point = |p: lyon::math::Point| Point::new(p.x as f64, p.y as f64);
        let mut geometry = PathGeometry::new();
        for event in path.iter() {
            match event {
                lyon::path::Event::Begin { at } => geometry.move_to(to_point(at)),
                lyon::path::Event::Line { to, .. } => geometry.line_to(to_point(to)),
                lyon::path::Event::Quadratic { ctrl, to, .. } => {
                    geometry.quad_to(to_point(ctrl), to_point(to))
                }
                lyon::path::Event::Cubic {
                    ctrl1, ctrl2, to, ..
                } => geometry.cubic_to(to_point(ctrl1), to_point(ctrl2), to_point(to)),
                lyon::path::Event::End { close, .. } => {
                    if close {
                        geometry.close();
                    }
                }
            }
        }
        geometry
    }

    /// Flattens every subpath into a polyline within `tolerance`.
    pub fn flatten(&self, tolerance: f64) -> Vec<Vec<Point>> {
        let path = self.to_lyon();
        let mut polylines: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();

        for event in path.iter().flattened(tolerance as f32) {
            match event {
                lyon::path::Event::Begin { at } => {
                    current = vec![Point::new(at.x as f64, at.y as f64)];
                }
                lyon::path::Event::Line { to, .. } => {
                    current.push(Point::new(to.x as f64, to.y as f64));
                }
                lyon::path::Event::End { .. } => {
                    polylines.push(std::mem::take(&mut current));
                }
                _ => {}
            }
        }
        if !current.is_empty() {
            polylines.push(current);
        }
        polylines
    }

    /// Splits the path at every `MoveTo`.
    pub fn subpaths(&self) -> Vec<PathGeometry> {
        let mut result: Vec<PathGeometry> = Vec::new();
        for cmd in &self.commands {
            match cmd {
                PathCommand::MoveTo(_) => result.push(PathGeometry {
                    commands: vec![*cmd],
                }),
                _ => {
                    if let Some(last) = result.last_mut() {
                        last.commands.push(*cmd);
                    }
                }
            }
        }
        result
    }

    /// Appends every command of `other`.
    pub fn extend(&mut self, other: &PathGeometry) {
        for cmd in &other.commands {
            self.push(*cmd);
        }
    }
}
