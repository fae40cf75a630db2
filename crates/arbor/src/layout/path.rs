//! Edge geometry.

use svg::node::element::path::Data;

use arbor_core::geometry::{Bounds, Point};

/// The drawn shape of a parent-child edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgePath {
    /// Cubic Bézier curve.
    Cubic {
        start: Point,
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Horizontal, vertical, horizontal run turning at `mid_x`.
    Elbow { start: Point, mid_x: f32, end: Point },
    /// Outline indentation guide: down from `start`, then across to `end`.
    Guide { start: Point, end: Point },
}

impl EdgePath {
    pub fn start(&self) -> Point {
        match *self {
            Self::Cubic { start, .. }
            | Self::Elbow { start, .. }
            | Self::Guide { start, .. } => start,
        }
    }

    pub fn end(&self) -> Point {
        match *self {
            Self::Cubic { end, .. }
            | Self::Elbow { end, .. }
            | Self::Guide { end, .. } => end,
        }
    }

    /// The defining polyline of the path, or the control polygon for curves.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => vec![start, control1, control2, end],
            Self::Elbow { start, mid_x, end } => vec![
                start,
                start.with_x(mid_x),
                end.with_x(mid_x),
                end,
            ],
            Self::Guide { start, end } => vec![start, start.with_y(end.y()), end],
        }
    }

    /// Tight axis-aligned bounds of the drawn path.
    ///
    /// Curves are bounded by their endpoints and their interior extrema, not
    /// by the control polygon.
    pub fn bounds(&self) -> Bounds {
        let start = self.start();
        let initial = Bounds::new_from_top_left(start, Default::default());

        match *self {
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => {
                let xs = [start.x(), control1.x(), control2.x(), end.x()];
                let ys = [start.y(), control1.y(), control2.y(), end.y()];
                let mut params = cubic_extrema(xs);
                params.extend(cubic_extrema(ys));

                params
                    .into_iter()
                    .map(|t| Point::new(cubic_at(xs, t), cubic_at(ys, t)))
                    .fold(initial.include_point(end), Bounds::include_point)
            }
            _ => self
                .points()
                .into_iter()
                .fold(initial, Bounds::include_point),
        }
    }

    /// SVG path data for the `d` attribute.
    pub fn to_svg_data(&self) -> Data {
        let start = self.start();
        let data = Data::new().move_to((start.x(), start.y()));

        match *self {
            Self::Cubic {
                control1,
                control2,
                end,
                ..
            } => data.cubic_curve_to((
                control1.x(),
                control1.y(),
                control2.x(),
                control2.y(),
                end.x(),
                end.y(),
            )),
            Self::Elbow { mid_x, end, .. } => data
                .horizontal_line_to(mid_x)
                .vertical_line_to(end.y())
                .horizontal_line_to(end.x()),
            Self::Guide { end, .. } => data.vertical_line_to(end.y()).horizontal_line_to(end.x()),
        }
    }

    /// Moves every point of the path by `offset`.
    pub fn translate(&self, offset: Point) -> Self {
        match *self {
            Self::Cubic {
                start,
                control1,
                control2,
                end,
            } => Self::Cubic {
                start: start.add_point(offset),
                control1: control1.add_point(offset),
                control2: control2.add_point(offset),
                end: end.add_point(offset),
            },
            Self::Elbow { start, mid_x, end } => Self::Elbow {
                start: start.add_point(offset),
                mid_x: mid_x + offset.x(),
                end: end.add_point(offset),
            },
            Self::Guide { start, end } => Self::Guide {
                start: start.add_point(offset),
                end: end.add_point(offset),
            },
        }
    }
}

/// Evaluates one coordinate of a cubic Bézier at `t`.
fn cubic_at(p: [f32; 4], t: f32) -> f32 {
    let mt = 1.0 - t;
    mt * mt * mt * p[0] + 3.0 * mt * mt * t * p[1] + 3.0 * mt * t * t * p[2] + t * t * t * p[3]
}

/// Parameters in `(0, 1)` where one coordinate of the curve has a zero derivative.
fn cubic_extrema(p: [f32; 4]) -> Vec<f32> {
    // B'(t) / 3 = a·t² + b·t + c
    let a = -p[0] + 3.0 * p[1] - 3.0 * p[2] + p[3];
    let b = 2.0 * (p[0] - 2.0 * p[1] + p[2]);
    let c = p[1] - p[0];

    let roots = if a.abs() < f32::EPSILON {
        if b.abs() < f32::EPSILON {
            Vec::new()
        } else {
            vec![-c / b]
        }
    } else {
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            Vec::new()
        } else {
            let root = discriminant.sqrt();
            vec![(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)]
        }
    };

    roots
        .into_iter()
        .filter(|t| *t > 0.0 && *t < 1.0)
        .collect()
}
