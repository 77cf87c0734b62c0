use crate::{
    error::{MockwarpError, MockwarpResult},
    geom::{Point, Quad},
};

/// A 3x3 projective transform, row-major, normalized so `m[8] == 1`.
///
/// Solved from four point correspondences: the classic 8-parameter system
/// (h33 fixed at 1) via Gaussian elimination with partial pivoting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Homography {
    m: [f64; 9],
}

impl Homography {
    pub const IDENTITY: Homography = Homography {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    /// Transform mapping the axis-aligned rectangle `(0,0)-(w,h)` onto `dst`.
    ///
    /// Corner correspondence: `(0,0) -> top_left`, `(w,0) -> top_right`,
    /// `(0,h) -> bottom_left`, `(w,h) -> bottom_right`.
    pub fn from_rect_to_quad(w: f64, h: f64, dst: &Quad) -> MockwarpResult<Self> {
        if w <= 0.0 || h <= 0.0 {
            return Err(MockwarpError::geometry(
                "homography source rectangle must have positive extent",
            ));
        }
        let src = Quad::axis_aligned(0.0, 0.0, w, h);
        Self::from_quad_to_quad(&src, dst)
    }

    pub fn from_quad_to_quad(src: &Quad, dst: &Quad) -> MockwarpResult<Self> {
        src.validate()?;
        dst.validate()?;

        let s = [src.top_left, src.top_right, src.bottom_left, src.bottom_right];
        let d = [dst.top_left, dst.top_right, dst.bottom_left, dst.bottom_right];

        // Two equations per correspondence:
        //   x' = h0 x + h1 y + h2 - h6 x x' - h7 y x'
        //   y' = h3 x + h4 y + h5 - h6 x y' - h7 y y'
        let mut a = [[0.0f64; 9]; 8];
        for i in 0..4 {
            let (x, y) = (s[i].x, s[i].y);
            let (xp, yp) = (d[i].x, d[i].y);
            a[2 * i] = [x, y, 1.0, 0.0, 0.0, 0.0, -x * xp, -y * xp, xp];
            a[2 * i + 1] = [0.0, 0.0, 0.0, x, y, 1.0, -x * yp, -y * yp, yp];
        }

        let h = solve_8x8(&mut a)?;
        Ok(Self {
            m: [h[0], h[1], h[2], h[3], h[4], h[5], h[6], h[7], 1.0],
        })
    }

    pub fn apply(&self, p: Point) -> Point {
        let m = &self.m;
        let w = m[6] * p.x + m[7] * p.y + m[8];
        // Points on the line at infinity do not occur for valid print areas.
        let w = if w.abs() < 1e-12 { 1e-12 } else { w };
        Point::new(
            (m[0] * p.x + m[1] * p.y + m[2]) / w,
            (m[3] * p.x + m[4] * p.y + m[5]) / w,
        )
    }

    /// Inverse transform via the adjugate matrix.
    pub fn inverse(&self) -> MockwarpResult<Self> {
        let m = &self.m;
        let det = m[0] * (m[4] * m[8] - m[5] * m[7]) - m[1] * (m[3] * m[8] - m[5] * m[6])
            + m[2] * (m[3] * m[7] - m[4] * m[6]);
        if det.abs() < 1e-12 {
            return Err(MockwarpError::geometry("homography is singular"));
        }

        let adj = [
            m[4] * m[8] - m[5] * m[7],
            m[2] * m[7] - m[1] * m[8],
            m[1] * m[5] - m[2] * m[4],
            m[5] * m[6] - m[3] * m[8],
            m[0] * m[8] - m[2] * m[6],
            m[2] * m[3] - m[0] * m[5],
            m[3] * m[7] - m[4] * m[6],
            m[1] * m[6] - m[0] * m[7],
            m[0] * m[4] - m[1] * m[3],
        ];

        let mut out = [0.0f64; 9];
        let norm = adj[8] / det;
        if norm.abs() < 1e-12 {
            for (o, a) in out.iter_mut().zip(adj.iter()) {
                *o = a / det;
            }
        } else {
            // Renormalize so m[8] == 1 when possible.
            for (o, a) in out.iter_mut().zip(adj.iter()) {
                *o = a / (det * norm);
            }
        }
        Ok(Self { m: out })
    }
}

/// Solves `A h = b` for the augmented rows `a[i] = [A_i | b_i]`.
fn solve_8x8(a: &mut [[f64; 9]; 8]) -> MockwarpResult<[f64; 8]> {
    for col in 0..8 {
        let pivot_row = (col..8)
            .max_by(|&r1, &r2| {
                a[r1][col]
                    .abs()
                    .partial_cmp(&a[r2][col].abs())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(col);
        if a[pivot_row][col].abs() < 1e-10 {
            return Err(MockwarpError::geometry(
                "homography system is singular (degenerate correspondences)",
            ));
        }
        a.swap(col, pivot_row);

        let pivot = a[col][col];
        for row in (col + 1)..8 {
            let factor = a[row][col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for k in col..9 {
                a[row][k] -= factor * a[col][k];
            }
        }
    }

    let mut h = [0.0f64; 8];
    for row in (0..8).rev() {
        let mut acc = a[row][8];
        for col in (row + 1)..8 {
            acc -= a[row][col] * h[col];
        }
        h[row] = acc / a[row][row];
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(p: Point, q: Point) {
        assert!(
            (p.x - q.x).abs() < 1e-6 && (p.y - q.y).abs() < 1e-6,
            "{p:?} != {q:?}"
        );
    }

    #[test]
    fn rect_to_same_rect_is_identity_on_corners() {
        let q = Quad::axis_aligned(0.0, 0.0, 640.0, 480.0);
        let h = Homography::from_rect_to_quad(640.0, 480.0, &q).unwrap();
        for p in q.corners() {
            assert_close(h.apply(p), p);
        }
        assert_close(h.apply(Point::new(320.0, 240.0)), Point::new(320.0, 240.0));
    }

    #[test]
    fn corners_map_to_target_corners() {
        let dst = Quad::new(
            Point::new(100.0, 50.0),
            Point::new(420.0, 80.0),
            Point::new(90.0, 300.0),
            Point::new(400.0, 340.0),
        );
        let h = Homography::from_rect_to_quad(512.0, 512.0, &dst).unwrap();
        assert_close(h.apply(Point::new(0.0, 0.0)), dst.top_left);
        assert_close(h.apply(Point::new(512.0, 0.0)), dst.top_right);
        assert_close(h.apply(Point::new(0.0, 512.0)), dst.bottom_left);
        assert_close(h.apply(Point::new(512.0, 512.0)), dst.bottom_right);
    }

    #[test]
    fn inverse_round_trips_interior_points() {
        let dst = Quad::new(
            Point::new(10.0, 5.0),
            Point::new(200.0, 30.0),
            Point::new(20.0, 150.0),
            Point::new(210.0, 170.0),
        );
        let h = Homography::from_rect_to_quad(100.0, 100.0, &dst).unwrap();
        let inv = h.inverse().unwrap();
        for p in [
            Point::new(10.0, 10.0),
            Point::new(50.0, 80.0),
            Point::new(99.0, 1.0),
        ] {
            assert_close(inv.apply(h.apply(p)), p);
        }
    }

    #[test]
    fn degenerate_target_is_rejected() {
        let p = Point::new(1.0, 1.0);
        let dst = Quad::new(p, p, p, p);
        assert!(Homography::from_rect_to_quad(10.0, 10.0, &dst).is_err());
    }
}
