//! Vector icon markup (SVG) to planar shapes.
//!
//! Every drawable element is treated as filled, whatever its style says:
//! paths, circles, ellipses, rectangles (including rounded corners), polygons
//! and polylines. Lines carry no area and are ignored, as is anything inside
//! `<defs>`, `<clipPath>`, `<mask>` or `<symbol>`. Group and element
//! `transform` attributes are applied. Coordinates stay in the markup's own
//! frame, with Y pointing down.

use std::f64::consts::FRAC_PI_2;

use mesh_types::{Contour, Point2, Shape, group_contours};
use svg::node::Attributes;
use svg::node::element::path::{self, Command, Position};
use svg::node::element::tag::{self, Type};
use svg::parser::Event;
use tracing::{debug, warn};

use crate::curve::{CURVE_STEPS, cubic, elliptical_arc, ellipse, quadratic};
use crate::error::{OutlineError, OutlineResult};

/// Points used to sample circles and ellipses.
const ELLIPSE_SEGMENTS: usize = 32;

/// Elements whose children are never rendered directly.
const HIDDEN_CONTAINERS: [&str; 4] = ["defs", "clipPath", "mask", "symbol"];

/// Convert icon markup into filled shapes in the markup's coordinate frame.
///
/// Empty, malformed or shapeless markup yields an empty set; the failure is
/// logged and the icon is simply left off the label.
///
/// # Example
///
/// ```
/// use label_outline::vector_markup_to_shapes;
///
/// let markup = r#"<svg viewBox="0 0 24 24">
///     <path d="M2 2 H22 V22 H2 Z M8 8 V16 H16 V8 Z"/>
/// </svg>"#;
/// let shapes = vector_markup_to_shapes(markup);
/// assert_eq!(shapes.len(), 1);
/// assert_eq!(shapes[0].holes().len(), 1);
///
/// assert!(vector_markup_to_shapes("").is_empty());
/// ```
#[must_use]
pub fn vector_markup_to_shapes(markup: &str) -> Vec<Shape> {
    if markup.trim().is_empty() {
        return Vec::new();
    }
    match parse_markup(markup) {
        Ok(contours) => {
            let shapes = group_contours(contours);
            debug!(shapes = shapes.len(), "icon outlined");
            shapes
        }
        Err(e) => {
            warn!(error = %e, "ignoring unreadable icon markup");
            Vec::new()
        }
    }
}

/// Collect every filled ring in the markup, with transforms applied.
///
/// # Errors
///
/// Returns [`OutlineError::MalformedMarkup`] if the XML cannot be read and
/// [`OutlineError::MalformedPath`] if path data or a numeric attribute cannot
/// be interpreted.
pub fn parse_markup(markup: &str) -> OutlineResult<Vec<Contour>> {
    let parser = svg::read(markup).map_err(|e| OutlineError::MalformedMarkup(e.to_string()))?;

    let mut contours = Vec::new();
    let mut transforms = vec![Affine::IDENTITY];
    let mut hidden_depth = 0_usize;

    for event in parser {
        match event {
            Event::Error(e) => return Err(OutlineError::MalformedMarkup(e.to_string())),

            Event::Tag(name, Type::Start, _) if HIDDEN_CONTAINERS.contains(&name) => {
                hidden_depth += 1;
            }
            Event::Tag(name, Type::End, _) if HIDDEN_CONTAINERS.contains(&name) => {
                hidden_depth = hidden_depth.saturating_sub(1);
            }
            _ if hidden_depth > 0 => {}

            Event::Tag(tag::Group, Type::Start, attrs) => {
                let parent = transforms.last().copied().unwrap_or(Affine::IDENTITY);
                transforms.push(parent.then(&element_transform(&attrs)?));
            }
            Event::Tag(tag::Group, Type::End, _) => {
                if transforms.len() > 1 {
                    transforms.pop();
                }
            }

            Event::Tag(name, Type::Start | Type::Empty, attrs) => {
                let rings = element_rings(name, &attrs)?;
                if rings.is_empty() {
                    continue;
                }
                let parent = transforms.last().copied().unwrap_or(Affine::IDENTITY);
                let t = parent.then(&element_transform(&attrs)?);
                contours.extend(rings.iter().map(|r| r.map_points(|p| t.apply(p))));
            }

            _ => {}
        }
    }

    Ok(contours)
}

/// Filled rings drawn by one element, in its local frame.
fn element_rings(name: &str, attrs: &Attributes) -> OutlineResult<Vec<Contour>> {
    let rings = match name {
        tag::Path => match attrs.get("d") {
            Some(d) => {
                let data = path::Data::parse(d)
                    .map_err(|e| OutlineError::MalformedPath(e.to_string()))?;
                let mut builder = PathBuilder::new();
                builder.trace(&data)?;
                builder.finish()
            }
            None => Vec::new(),
        },
        tag::Circle => {
            let r = number(attrs, "r")?;
            let center = Point2::new(number(attrs, "cx")?, number(attrs, "cy")?);
            vec![Contour::new(ellipse(center, r, r, ELLIPSE_SEGMENTS))]
        }
        tag::Ellipse => {
            let center = Point2::new(number(attrs, "cx")?, number(attrs, "cy")?);
            let (rx, ry) = (number(attrs, "rx")?, number(attrs, "ry")?);
            vec![Contour::new(ellipse(center, rx, ry, ELLIPSE_SEGMENTS))]
        }
        tag::Rectangle => vec![Contour::new(rect_points(attrs)?)],
        tag::Polygon | tag::Polyline => match attrs.get("points") {
            Some(points) => vec![Contour::new(point_list(points)?)],
            None => Vec::new(),
        },
        _ => Vec::new(),
    };
    Ok(rings.into_iter().filter(|r| !r.is_degenerate()).collect())
}

/// Numeric attribute; absent means zero. A trailing `px` is accepted.
fn number(attrs: &Attributes, name: &str) -> OutlineResult<f64> {
    let Some(raw) = attrs.get(name) else {
        return Ok(0.0);
    };
    let text = raw.trim();
    finite(text.strip_suffix("px").unwrap_or(text))
        .map_err(|e| OutlineError::MalformedPath(format!("{name}=\"{text}\": {e}")))
}

/// Parse one number, rejecting `nan` and the infinities.
fn finite(text: &str) -> Result<f64, String> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err("not a finite number".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

/// Outline of a `<rect>`, honoring `rx`/`ry` corner radii.
fn rect_points(attrs: &Attributes) -> OutlineResult<Vec<Point2<f64>>> {
    let (x, y) = (number(attrs, "x")?, number(attrs, "y")?);
    let (w, h) = (number(attrs, "width")?, number(attrs, "height")?);

    // A missing radius takes the other one's value.
    let (rx, ry) = match (attrs.contains_key("rx"), attrs.contains_key("ry")) {
        (true, false) => {
            let r = number(attrs, "rx")?;
            (r, r)
        }
        (false, true) => {
            let r = number(attrs, "ry")?;
            (r, r)
        }
        _ => (number(attrs, "rx")?, number(attrs, "ry")?),
    };
    let rx = rx.clamp(0.0, w.abs() / 2.0);
    let ry = ry.clamp(0.0, h.abs() / 2.0);

    if rx <= 0.0 || ry <= 0.0 {
        return Ok(vec![
            Point2::new(x, y),
            Point2::new(x + w, y),
            Point2::new(x + w, y + h),
            Point2::new(x, y + h),
        ]);
    }

    let corners = [
        (x + w - rx, y + ry, -FRAC_PI_2),
        (x + w - rx, y + h - ry, 0.0),
        (x + rx, y + h - ry, FRAC_PI_2),
        (x + rx, y + ry, 2.0 * FRAC_PI_2),
    ];
    let mut points = Vec::with_capacity(4 * (CURVE_STEPS + 1));
    for (cx, cy, start) in corners {
        for i in 0..=CURVE_STEPS {
            #[allow(clippy::cast_precision_loss)]
            let angle = start + FRAC_PI_2 * (i as f64) / (CURVE_STEPS as f64);
            points.push(Point2::new(cx + rx * angle.cos(), cy + ry * angle.sin()));
        }
    }
    Ok(points)
}

/// Parse a `points` attribute (`x,y x,y ...`).
fn point_list(raw: &str) -> OutlineResult<Vec<Point2<f64>>> {
    let numbers = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(finite)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| OutlineError::MalformedPath(format!("points: {e}")))?;
    if numbers.len() % 2 != 0 {
        return Err(OutlineError::MalformedPath(format!(
            "points has an odd number of coordinates ({})",
            numbers.len()
        )));
    }
    Ok(numbers.chunks(2).map(|xy| Point2::new(xy[0], xy[1])).collect())
}

fn element_transform(attrs: &Attributes) -> OutlineResult<Affine> {
    attrs
        .get("transform")
        .map_or(Ok(Affine::IDENTITY), |t| Affine::parse(t))
}

/// 2D affine map `(x, y) -> (a x + c y + e, b x + d y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Affine([f64; 6]);

impl Affine {
    const IDENTITY: Self = Self([1.0, 0.0, 0.0, 1.0, 0.0, 0.0]);

    fn apply(&self, p: Point2<f64>) -> Point2<f64> {
        let [a, b, c, d, e, f] = self.0;
        Point2::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }

    /// `self` applied after `inner`.
    fn then(&self, inner: &Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.0;
        let [a2, b2, c2, d2, e2, f2] = inner.0;
        Self([
            a1 * a2 + c1 * b2,
            b1 * a2 + d1 * b2,
            a1 * c2 + c1 * d2,
            b1 * c2 + d1 * d2,
            a1 * e2 + c1 * f2 + e1,
            b1 * e2 + d1 * f2 + f1,
        ])
    }

    /// Parse a transform list such as `translate(4 2) scale(2)`.
    fn parse(raw: &str) -> OutlineResult<Self> {
        let mut result = Self::IDENTITY;
        let mut rest = raw.trim();
        while !rest.is_empty() {
            let (name, tail) = rest
                .split_once('(')
                .ok_or_else(|| OutlineError::MalformedPath(format!("transform \"{raw}\"")))?;
            let (args, tail) = tail
                .split_once(')')
                .ok_or_else(|| OutlineError::MalformedPath(format!("transform \"{raw}\"")))?;
            let args = args
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|s| !s.is_empty())
                .map(finite)
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| OutlineError::MalformedPath(format!("transform \"{raw}\": {e}")))?;

            let step = match (name.trim(), args.as_slice()) {
                ("matrix", &[a, b, c, d, e, f]) => Self([a, b, c, d, e, f]),
                ("translate", &[tx]) => Self([1.0, 0.0, 0.0, 1.0, tx, 0.0]),
                ("translate", &[tx, ty]) => Self([1.0, 0.0, 0.0, 1.0, tx, ty]),
                ("scale", &[s]) => Self([s, 0.0, 0.0, s, 0.0, 0.0]),
                ("scale", &[sx, sy]) => Self([sx, 0.0, 0.0, sy, 0.0, 0.0]),
                ("rotate", &[deg]) => Self::rotation(deg),
                ("rotate", &[deg, cx, cy]) => Self([1.0, 0.0, 0.0, 1.0, cx, cy])
                    .then(&Self::rotation(deg))
                    .then(&Self([1.0, 0.0, 0.0, 1.0, -cx, -cy])),
                ("skewX", &[deg]) => Self([1.0, 0.0, deg.to_radians().tan(), 1.0, 0.0, 0.0]),
                ("skewY", &[deg]) => Self([1.0, deg.to_radians().tan(), 0.0, 1.0, 0.0, 0.0]),
                (other, _) => {
                    return Err(OutlineError::MalformedPath(format!(
                        "unsupported transform {other}({} args)",
                        args.len()
                    )));
                }
            };
            result = result.then(&step);
            rest = tail.trim_start_matches(|c: char| c == ',' || c.is_whitespace());
        }
        Ok(result)
    }

    fn rotation(deg: f64) -> Self {
        let (s, c) = deg.to_radians().sin_cos();
        Self([c, s, -s, c, 0.0, 0.0])
    }
}

/// Flattens path commands into closed rings.
struct PathBuilder {
    rings: Vec<Contour>,
    current: Vec<Point2<f64>>,
    position: Point2<f64>,
    start: Point2<f64>,
    /// Second control point of the previous cubic segment, for `S`.
    prev_cubic: Option<Point2<f64>>,
    /// Control point of the previous quadratic segment, for `T`.
    prev_quad: Option<Point2<f64>>,
}

impl PathBuilder {
    fn new() -> Self {
        Self {
            rings: Vec::new(),
            current: Vec::new(),
            position: Point2::origin(),
            start: Point2::origin(),
            prev_cubic: None,
            prev_quad: None,
        }
    }

    fn trace(&mut self, data: &path::Data) -> OutlineResult<()> {
        for command in data.iter() {
            match command {
                Command::Move(pos, params) => {
                    for (i, xy) in groups(params, 2, "M")?.enumerate() {
                        let p = self.resolve(pos, xy[0], xy[1]);
                        // Extra pairs after a move are implicit line-tos.
                        if i == 0 {
                            self.move_to(p);
                        } else {
                            self.line_to(p);
                        }
                    }
                }
                Command::Line(pos, params) => {
                    for xy in groups(params, 2, "L")? {
                        let p = self.resolve(pos, xy[0], xy[1]);
                        self.line_to(p);
                    }
                }
                Command::HorizontalLine(pos, params) => {
                    for x in groups(params, 1, "H")? {
                        let x = f64::from(x[0]);
                        let x = if matches!(pos, Position::Relative) { self.position.x + x } else { x };
                        self.line_to(Point2::new(x, self.position.y));
                    }
                }
                Command::VerticalLine(pos, params) => {
                    for y in groups(params, 1, "V")? {
                        let y = f64::from(y[0]);
                        let y = if matches!(pos, Position::Relative) { self.position.y + y } else { y };
                        self.line_to(Point2::new(self.position.x, y));
                    }
                }
                Command::QuadraticCurve(pos, params) => {
                    for v in groups(params, 4, "Q")? {
                        let c = self.resolve(pos, v[0], v[1]);
                        let p = self.resolve(pos, v[2], v[3]);
                        self.quad_to(c, p);
                    }
                }
                Command::SmoothQuadraticCurve(pos, params) => {
                    for v in groups(params, 2, "T")? {
                        let c = self.reflect(self.prev_quad);
                        let p = self.resolve(pos, v[0], v[1]);
                        self.quad_to(c, p);
                    }
                }
                Command::CubicCurve(pos, params) => {
                    for v in groups(params, 6, "C")? {
                        let c1 = self.resolve(pos, v[0], v[1]);
                        let c2 = self.resolve(pos, v[2], v[3]);
                        let p = self.resolve(pos, v[4], v[5]);
                        self.cubic_to(c1, c2, p);
                    }
                }
                Command::SmoothCubicCurve(pos, params) => {
                    for v in groups(params, 4, "S")? {
                        let c1 = self.reflect(self.prev_cubic);
                        let c2 = self.resolve(pos, v[0], v[1]);
                        let p = self.resolve(pos, v[2], v[3]);
                        self.cubic_to(c1, c2, p);
                    }
                }
                Command::EllipticalArc(pos, params) => {
                    for v in groups(params, 7, "A")? {
                        let p = self.resolve(pos, v[5], v[6]);
                        let points = elliptical_arc(
                            self.position,
                            f64::from(v[0]),
                            f64::from(v[1]),
                            f64::from(v[2]),
                            v[3] != 0.0,
                            v[4] != 0.0,
                            p,
                            CURVE_STEPS,
                        );
                        self.extend(points, p);
                    }
                }
                Command::Close => self.close(),
            }
        }
        Ok(())
    }

    fn resolve(&self, pos: &Position, x: f32, y: f32) -> Point2<f64> {
        let p = Point2::new(f64::from(x), f64::from(y));
        match pos {
            Position::Absolute => p,
            Position::Relative => self.position + p.coords,
        }
    }

    /// Mirror of the previous control point about the current point.
    fn reflect(&self, control: Option<Point2<f64>>) -> Point2<f64> {
        control.map_or(self.position, |c| self.position + (self.position - c))
    }

    /// A drawing command after a close continues from the subpath start.
    fn ensure_started(&mut self) {
        if self.current.is_empty() {
            self.current.push(self.position);
        }
    }

    fn move_to(&mut self, p: Point2<f64>) {
        self.flush();
        self.current.push(p);
        self.position = p;
        self.start = p;
        self.prev_cubic = None;
        self.prev_quad = None;
    }

    fn line_to(&mut self, p: Point2<f64>) {
        self.extend(std::iter::once(p), p);
    }

    fn quad_to(&mut self, c: Point2<f64>, p: Point2<f64>) {
        self.extend(quadratic(self.position, c, p, CURVE_STEPS), p);
        self.prev_quad = Some(c);
    }

    fn cubic_to(&mut self, c1: Point2<f64>, c2: Point2<f64>, p: Point2<f64>) {
        self.extend(cubic(self.position, c1, c2, p, CURVE_STEPS), p);
        self.prev_cubic = Some(c2);
    }

    fn extend(&mut self, points: impl IntoIterator<Item = Point2<f64>>, end: Point2<f64>) {
        self.ensure_started();
        self.current.extend(points);
        self.position = end;
        self.prev_cubic = None;
        self.prev_quad = None;
    }

    fn close(&mut self) {
        self.flush();
        self.position = self.start;
        self.prev_cubic = None;
        self.prev_quad = None;
    }

    /// Open subpaths are closed implicitly, as a fill would.
    fn flush(&mut self) {
        if self.current.len() >= 3 {
            let ring = Contour::new(std::mem::take(&mut self.current));
            if !ring.is_degenerate() {
                self.rings.push(ring);
            }
        }
        self.current.clear();
    }

    fn finish(mut self) -> Vec<Contour> {
        self.flush();
        self.rings
    }
}

/// Split command parameters into groups of `n`, rejecting leftovers.
fn groups<'a>(params: &'a [f32], n: usize, command: &str) -> OutlineResult<std::slice::Chunks<'a, f32>> {
    if params.is_empty() || params.len() % n != 0 {
        return Err(OutlineError::MalformedPath(format!(
            "{command} expects a multiple of {n} parameters, got {}",
            params.len()
        )));
    }
    Ok(params.chunks(n))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::shapes_bounds;

    fn svg(body: &str) -> String {
        format!(r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24">{body}</svg>"#)
    }

    #[test]
    fn square_with_counter_is_one_shape() {
        let shapes = vector_markup_to_shapes(&svg(r#"<path d="M0 0 L10 0 L10 10 L0 10 Z M3 3 L3 7 L7 7 L7 3 Z"/>"#));
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0].holes().len(), 1);
        assert_relative_eq!(shapes[0].area(), 100.0 - 16.0, epsilon = 1e-9);
    }

    #[test]
    fn relative_commands_follow_the_pen() {
        let shapes = vector_markup_to_shapes(&svg(r#"<path d="m2 3 h4 v5 h-4 z"/>"#));
        let b = shapes_bounds(&shapes);
        assert_relative_eq!(b.min.x, 2.0);
        assert_relative_eq!(b.min.y, 3.0);
        assert_relative_eq!(b.max.x, 6.0);
        assert_relative_eq!(b.max.y, 8.0);
    }

    #[test]
    fn subpath_after_close_restarts_at_its_start() {
        // The second triangle is drawn relative to the first subpath start.
        let shapes =
            vector_markup_to_shapes(&svg(r#"<path d="M0 0 l2 0 l0 2 z m10 0 l2 0 l0 2 z"/>"#));
        assert_eq!(shapes.len(), 2);
        assert_relative_eq!(shapes[1].bounds().min.x, 10.0);
    }

    #[test]
    fn unclosed_path_is_filled() {
        let shapes = vector_markup_to_shapes(&svg(r#"<path d="M0 0 L4 0 L4 4"/>"#));
        assert_eq!(shapes.len(), 1);
        assert_relative_eq!(shapes[0].area(), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn curves_are_flattened() {
        let contours = parse_markup(&svg(r#"<path d="M0 0 Q5 10 10 0 C10 -4 0 -4 0 0 Z"/>"#)).unwrap();
        assert_eq!(contours.len(), 1);
        assert!(contours[0].len() > 2 * CURVE_STEPS - 2);
    }

    #[test]
    fn smooth_cubic_reflects_previous_control() {
        let contours =
            parse_markup(&svg(r#"<path d="M0 0 C0 4 4 4 4 0 S8 -4 8 0 V-8 H0 Z"/>"#)).unwrap();
        // Mirroring (4, 4) about (4, 0) puts the second hump's peak at
        // (6, -3); an unreflected control would only reach y = -1.78.
        assert!(
            contours[0]
                .points()
                .iter()
                .any(|p| (p.x - 6.0).abs() < 1e-9 && (p.y + 3.0).abs() < 1e-9)
        );
    }

    #[test]
    fn arc_circle_has_expected_area() {
        let shapes =
            vector_markup_to_shapes(&svg(r#"<path d="M2 12 A10 10 0 1 0 22 12 A10 10 0 1 0 2 12 Z"/>"#));
        assert_eq!(shapes.len(), 1);
        let area = shapes[0].area();
        assert!((area - std::f64::consts::PI * 100.0).abs() < 3.0, "{area}");
    }

    #[test]
    fn basic_shapes_are_supported() {
        let markup = svg(
            r#"<circle cx="4" cy="4" r="3"/>
               <ellipse cx="12" cy="4" rx="3" ry="2"/>
               <rect x="16" y="1" width="6" height="6" rx="1"/>
               <polygon points="1,10 7,10 4,16"/>
               <polyline points="10 10 16 10 16 16"/>
               <line x1="0" y1="20" x2="24" y2="20"/>"#,
        );
        assert_eq!(vector_markup_to_shapes(&markup).len(), 5);
    }

    #[test]
    fn rounded_rect_has_arc_corners() {
        let contours = parse_markup(&svg(r#"<rect x="0" y="0" width="10" height="4" rx="1"/>"#)).unwrap();
        assert_eq!(contours[0].len(), 4 * (CURVE_STEPS + 1));
        let b = contours[0].bounds();
        assert_relative_eq!(b.max.x, 10.0, epsilon = 1e-12);
        assert_relative_eq!(b.max.y, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn group_transforms_compose() {
        let markup = svg(
            r#"<g transform="translate(10 20)"><g transform="scale(2)">
                 <rect x="1" y="1" width="2" height="2"/>
               </g></g>
               <rect x="0" y="0" width="1" height="1"/>"#,
        );
        let contours = parse_markup(&markup).unwrap();
        assert_eq!(contours.len(), 2);
        let b = contours[0].bounds();
        assert_relative_eq!(b.min.x, 12.0);
        assert_relative_eq!(b.min.y, 22.0);
        assert_relative_eq!(b.max.x, 16.0);
        // The closing groups restore the identity.
        assert_relative_eq!(contours[1].bounds().max.x, 1.0);
    }

    #[test]
    fn rotate_about_point() {
        let t = Affine::parse("rotate(90 1 1)").unwrap();
        let p = t.apply(Point2::new(2.0, 1.0));
        assert_relative_eq!(p, Point2::new(1.0, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn defs_are_not_drawn() {
        let markup = svg(r#"<defs><circle cx="4" cy="4" r="3"/></defs><circle cx="12" cy="12" r="2"/>"#);
        let shapes = vector_markup_to_shapes(&markup);
        assert_eq!(shapes.len(), 1);
        assert_relative_eq!(shapes[0].bounds().center().x, 12.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_and_unreadable_markup_yield_nothing() {
        assert!(vector_markup_to_shapes("").is_empty());
        assert!(vector_markup_to_shapes("   \n").is_empty());
        assert!(vector_markup_to_shapes("not markup at all").is_empty());
        assert!(vector_markup_to_shapes(&svg(r#"<path d="M0 0 L10"/>"#)).is_empty());
        assert!(vector_markup_to_shapes(&svg(r#"<circle cx="a" cy="1" r="2"/>"#)).is_empty());
    }

    #[test]
    fn non_finite_attributes_are_rejected() {
        for rect in [
            r#"<rect x="0" y="0" width="nan" height="4"/>"#,
            r#"<rect x="0" y="0" width="4" height="inf" rx="1"/>"#,
            r#"<rect x="NaN" y="0" width="4" height="4"/>"#,
        ] {
            assert!(vector_markup_to_shapes(&svg(rect)).is_empty(), "{rect}");
            let err = parse_markup(&svg(rect)).unwrap_err();
            assert!(matches!(err, OutlineError::MalformedPath(_)));
        }
        assert!(vector_markup_to_shapes(&svg(r#"<polygon points="0,0 nan,4 4,4"/>"#)).is_empty());
        assert!(vector_markup_to_shapes(&svg(r#"<rect width="4" height="4" transform="scale(inf)"/>"#)).is_empty());
    }

    #[test]
    fn bad_parameter_counts_are_errors() {
        let err = parse_markup(&svg(r#"<path d="M0 0 L10"/>"#)).unwrap_err();
        assert!(matches!(err, OutlineError::MalformedPath(_)));
    }

    #[test]
    fn bad_transform_is_an_error() {
        let err = parse_markup(&svg(r#"<rect width="1" height="1" transform="wobble(3)"/>"#)).unwrap_err();
        assert!(matches!(err, OutlineError::MalformedPath(_)));
    }
}
