use crate::error::{MockwarpError, MockwarpResult};

/// A 2D coordinate in template pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Relative tolerance for collinearity / zero-area checks.
const GEOM_EPS: f64 = 1e-6;

/// Four corners of a print area, ordered so that `top_left -> top_right` and
/// `bottom_left -> bottom_right` are the horizontal edges and
/// `top_left -> bottom_left` is a vertical edge.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quad {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl Quad {
    pub fn new(top_left: Point, top_right: Point, bottom_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        }
    }

    /// Axis-aligned rectangle with origin `(x, y)`.
    pub fn axis_aligned(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            top_left: Point::new(x, y),
            top_right: Point::new(x + w, y),
            bottom_left: Point::new(x, y + h),
            bottom_right: Point::new(x + w, y + h),
        }
    }

    /// Corners in winding order (top-left, top-right, bottom-right, bottom-left).
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// Max of the top and bottom edge lengths. Tolerates skewed quads.
    pub fn width(&self) -> f64 {
        let top = self.top_left.distance(self.top_right);
        let bottom = self.bottom_left.distance(self.bottom_right);
        top.max(bottom)
    }

    /// Max of the left and right edge lengths.
    pub fn height(&self) -> f64 {
        let left = self.top_left.distance(self.bottom_left);
        let right = self.top_right.distance(self.bottom_right);
        left.max(right)
    }

    /// Top-left corner of the axis-aligned bounding box.
    pub fn bounding_min(&self) -> Point {
        let xs = self.corners().map(|p| p.x);
        let ys = self.corners().map(|p| p.y);
        Point::new(
            xs.iter().copied().fold(f64::INFINITY, f64::min),
            ys.iter().copied().fold(f64::INFINITY, f64::min),
        )
    }

    /// Rounded pixel dimensions of the axis-aligned bounding box.
    pub fn bounding_size(&self) -> (u32, u32) {
        let xs = self.corners().map(|p| p.x);
        let ys = self.corners().map(|p| p.y);
        let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (
            (max_x - min_x).round().max(0.0) as u32,
            (max_y - min_y).round().max(0.0) as u32,
        )
    }

    /// Signed shoelace area over the winding order of [`Quad::corners`].
    pub fn signed_area(&self) -> f64 {
        let c = self.corners();
        let mut acc = 0.0;
        for i in 0..4 {
            let a = c[i];
            let b = c[(i + 1) % 4];
            acc += a.x * b.y - b.x * a.y;
        }
        acc / 2.0
    }

    /// True when the quad is an axis-aligned rectangle (uniform-scale fast path).
    pub fn is_axis_aligned_rect(&self) -> bool {
        let eps = self.scale_eps();
        (self.top_left.y - self.top_right.y).abs() <= eps
            && (self.bottom_left.y - self.bottom_right.y).abs() <= eps
            && (self.top_left.x - self.bottom_left.x).abs() <= eps
            && (self.top_right.x - self.bottom_right.x).abs() <= eps
    }

    /// Rejects degenerate quads: near-zero signed area, or any three corners
    /// collinear within tolerance.
    pub fn validate(&self) -> MockwarpResult<()> {
        let scale = self.width().max(self.height());
        if scale <= 0.0 {
            return Err(MockwarpError::geometry("quad has zero extent"));
        }
        if self.signed_area().abs() < GEOM_EPS * scale * scale {
            return Err(MockwarpError::geometry("quad has (near) zero area"));
        }

        let c = self.corners();
        for skip in 0..4 {
            let tri: Vec<Point> = (0..4).filter(|&i| i != skip).map(|i| c[i]).collect();
            let cross = (tri[1].x - tri[0].x) * (tri[2].y - tri[0].y)
                - (tri[2].x - tri[0].x) * (tri[1].y - tri[0].y);
            if cross.abs() < GEOM_EPS * scale * scale {
                return Err(MockwarpError::geometry(format!(
                    "three corners are collinear (corner {skip} excluded)"
                )));
            }
        }
        Ok(())
    }

    fn scale_eps(&self) -> f64 {
        GEOM_EPS * self.width().max(self.height()).max(1.0)
    }
}
