//! Curve flattening shared by font and markup outlines.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use mesh_types::{Point2, Vector2};

/// Segments per quadratic or cubic curve.
pub const CURVE_STEPS: usize = 8;

/// Points along a quadratic Bezier, excluding the start point.
pub(crate) fn quadratic(
    p0: Point2<f64>,
    c: Point2<f64>,
    p1: Point2<f64>,
    steps: usize,
) -> impl Iterator<Item = Point2<f64>> {
    let steps = steps.max(1);
    (1..=steps).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / steps as f64;
        let mt = 1.0 - t;
        Point2::from(p0.coords * (mt * mt) + c.coords * (2.0 * mt * t) + p1.coords * (t * t))
    })
}

/// Points along a cubic Bezier, excluding the start point.
pub(crate) fn cubic(
    p0: Point2<f64>,
    c1: Point2<f64>,
    c2: Point2<f64>,
    p1: Point2<f64>,
    steps: usize,
) -> impl Iterator<Item = Point2<f64>> {
    let steps = steps.max(1);
    (1..=steps).map(move |i| {
        #[allow(clippy::cast_precision_loss)]
        let t = i as f64 / steps as f64;
        let mt = 1.0 - t;
        Point2::from(
            p0.coords * (mt * mt * mt)
                + c1.coords * (3.0 * mt * mt * t)
                + c2.coords * (3.0 * mt * t * t)
                + p1.coords * (t * t * t),
        )
    })
}

/// Points along an SVG elliptical arc from `p0` to `p1`, excluding the start
/// point.
///
/// Follows the endpoint-to-center conversion of SVG 1.1 appendix F.6.5,
/// including the radius correction for arcs whose radii are too small. Zero
/// radii degrade to a straight line.
#[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
pub(crate) fn elliptical_arc(
    p0: Point2<f64>,
    rx: f64,
    ry: f64,
    x_rotation_deg: f64,
    large_arc: bool,
    sweep: bool,
    p1: Point2<f64>,
    steps_per_quarter: usize,
) -> Vec<Point2<f64>> {
    let (mut rx, mut ry) = (rx.abs(), ry.abs());
    if rx < f64::EPSILON || ry < f64::EPSILON || (p1 - p0).norm() < f64::EPSILON {
        return vec![p1];
    }

    let phi = x_rotation_deg.to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();

    // Step 1: midpoint in the rotated frame
    let half = (p0 - p1) / 2.0;
    let x1 = cos_phi * half.x + sin_phi * half.y;
    let y1 = -sin_phi * half.x + cos_phi * half.y;

    // Radii correction
    let lambda = (x1 * x1) / (rx * rx) + (y1 * y1) / (ry * ry);
    if lambda > 1.0 {
        let s = lambda.sqrt();
        rx *= s;
        ry *= s;
    }

    // Step 2: center in the rotated frame
    let num = (rx * rx * ry * ry - rx * rx * y1 * y1 - ry * ry * x1 * x1).max(0.0);
    let den = rx * rx * y1 * y1 + ry * ry * x1 * x1;
    let mut coef = if den > 0.0 { (num / den).sqrt() } else { 0.0 };
    if large_arc == sweep {
        coef = -coef;
    }
    let cxp = coef * rx * y1 / ry;
    let cyp = -coef * ry * x1 / rx;

    // Step 3: center in user space
    let mid = Point2::from((p0.coords + p1.coords) / 2.0);
    let center = Point2::new(
        cos_phi * cxp - sin_phi * cyp + mid.x,
        sin_phi * cxp + cos_phi * cyp + mid.y,
    );

    // Step 4: start angle and sweep
    let u = Vector2::new((x1 - cxp) / rx, (y1 - cyp) / ry);
    let v = Vector2::new((-x1 - cxp) / rx, (-y1 - cyp) / ry);
    let theta1 = u.y.atan2(u.x);
    let mut delta = (u.x * v.y - u.y * v.x).atan2(u.dot(&v));
    if !sweep && delta > 0.0 {
        delta -= TAU;
    } else if sweep && delta < 0.0 {
        delta += TAU;
    }
    delta = delta.clamp(-TAU, TAU);

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let steps = ((delta.abs() / FRAC_PI_2) * steps_per_quarter.max(1) as f64)
        .ceil()
        .max(1.0) as usize;

    let mut points = Vec::with_capacity(steps);
    for i in 1..steps {
        #[allow(clippy::cast_precision_loss)]
        let angle = theta1 + delta * (i as f64) / (steps as f64);
        let (s, c) = angle.sin_cos();
        let (ex, ey) = (rx * c, ry * s);
        points.push(Point2::new(
            cos_phi * ex - sin_phi * ey + center.x,
            sin_phi * ex + cos_phi * ey + center.y,
        ));
    }
    // Land exactly on the endpoint.
    points.push(p1);
    points
}

/// Closed ellipse sampled with `segments` points, counter-clockwise in a
/// Y-up frame.
pub(crate) fn ellipse(center: Point2<f64>, rx: f64, ry: f64, segments: usize) -> Vec<Point2<f64>> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            #[allow(clippy::cast_precision_loss)]
            let angle = 2.0 * PI * (i as f64) / (segments as f64);
            Point2::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}
