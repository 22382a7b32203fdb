//! Freehand stroke smoothing.

use super::{PathGeometry, Point};

/// Sampling stride used for a smoothing level: one raw point in `stride`
/// is kept as an anchor.
pub fn smoothing_stride(smoothing_level: u32) -> usize {
    ((smoothing_level / 10) as usize).max(1)
}

/// Reduces a captured polyline to a smoothed path.
///
/// Level 0 keeps every raw point and joins them with straight lines.
/// Higher levels keep every `stride`-th point (the last raw point is always
/// kept) and join the samples with quadratic segments that end halfway
/// between the next two samples; the final segment is a straight line to
/// the last sample. Fewer than two raw points give an empty path.
pub fn smooth_stroke(raw_points: &[Point], smoothing_level: u32) -> PathGeometry {
    if raw_points.len() < 2 {
        return PathGeometry::new();
    }

    if smoothing_level == 0 {
        return PathGeometry::polyline(raw_points);
    }

    let stride = smoothing_stride(smoothing_level);
    let mut samples: Vec<Point> = raw_points.iter().step_by(stride).copied().collect();
    if (raw_points.len() - 1) % stride != 0 {
        samples.push(raw_points[raw_points.len() - 1]);
    }

    let mut path = PathGeometry::new();
    path.move_to(samples[0]);

    for i in 0..samples.len() - 1 {
        if i + 2 < samples.len() {
            let ctrl = samples[i + 1];
            let end = ctrl.midpoint(&samples[i + 2]);
            path.quad_to(ctrl, end);
        } else {
            path.line_to(samples[i + 1]);
        }
    }

    path
}
