use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::{
    error::{MockwarpError, MockwarpResult},
    geom::Quad,
    homography::Homography,
    raster::Raster,
};

/// Tunable presets for the cylindrical warp.
///
/// `strip_count` and `curve_factor` are carried over from the original mockup
/// renderer as-is (50 strips, 0.1 vertical amplitude). They are presets, not
/// physically derived values: more strips trade compute for smoothness, and
/// the factor scales how pronounced the bulge looks at `curve_intensity = 1`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WarpSettings {
    pub strip_count: u32,
    pub curve_factor: f64,
}

impl Default for WarpSettings {
    fn default() -> Self {
        Self {
            strip_count: 50,
            curve_factor: 0.1,
        }
    }
}

impl WarpSettings {
    pub fn validate(&self) -> MockwarpResult<()> {
        if self.strip_count == 0 {
            return Err(MockwarpError::invalid_parameter(
                "strip_count must be >= 1",
            ));
        }
        if !self.curve_factor.is_finite() || self.curve_factor < 0.0 {
            return Err(MockwarpError::invalid_parameter(
                "curve_factor must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

/// Cooperative cancellation handle, checked between strip/scanline bands.
///
/// The engine never cancels itself; a host task holding a clone flips the
/// flag and the in-flight warp returns [`MockwarpError::Cancelled`] at the
/// next check point.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Vertical strip displacement of the cylindrical warp.
///
/// `t` is the strip midpoint in `[0, 1]` across the target width. The profile
/// is `sin(t * pi)`: zero at both edges, maximal at the center, matching a
/// convex cylinder (mug) viewed frontally where the center bulges toward the
/// viewer.
pub fn strip_offset(t: f64, curve_intensity: f64, target_height: f64, curve_factor: f64) -> f64 {
    (t * std::f64::consts::PI).sin() * curve_intensity * target_height * curve_factor
}

/// Warps `src` into the shape of `print_area` with default [`WarpSettings`]
/// and no cancellation. See [`project_design_with`].
pub fn project_design(
    src: &Raster,
    print_area: &Quad,
    perspective: bool,
    curve_intensity: f64,
) -> MockwarpResult<Raster> {
    project_design_with(
        src,
        print_area,
        perspective,
        curve_intensity,
        &WarpSettings::default(),
        None,
    )
}

/// Warps a rectangular design into the shape of a target print area.
///
/// Strategy selection, first match wins:
/// 1. `curve_intensity > 0`: cylindrical warp (vertical strips, sinusoidal
///    displacement), approximating wrap around a convex cylinder.
/// 2. `perspective`: true projective homography, resampled by inverse
///    mapping with bilinear filtering.
/// 3. otherwise: uniform bilinear scale into the target's bounding box.
///
/// The output raster is sized to the print area's bounding box; pixels the
/// mapping does not reach stay transparent. Deterministic for identical
/// inputs. `curve_intensity` is clamped to `[0, 1]`.
#[tracing::instrument(skip(src, settings, cancel), fields(src_w = src.width(), src_h = src.height()))]
pub fn project_design_with(
    src: &Raster,
    print_area: &Quad,
    perspective: bool,
    curve_intensity: f64,
    settings: &WarpSettings,
    cancel: Option<&CancelToken>,
) -> MockwarpResult<Raster> {
    settings.validate()?;
    print_area.validate()?;
    if !curve_intensity.is_finite() {
        return Err(MockwarpError::invalid_parameter(
            "curve_intensity must be finite",
        ));
    }
    let curve = curve_intensity.clamp(0.0, 1.0);

    let (out_w, out_h) = print_area.bounding_size();
    if out_w == 0 || out_h == 0 {
        return Err(MockwarpError::geometry(
            "print area bounding box rounds to zero pixels",
        ));
    }

    if curve > 0.0 {
        tracing::debug!(curve, strips = settings.strip_count, "cylindrical warp");
        cylindrical_warp(src, out_w, out_h, curve, settings, cancel)
    } else if perspective {
        tracing::debug!("perspective homography");
        homography_warp(src, print_area, out_w, out_h, cancel)
    } else {
        tracing::debug!("uniform scale");
        uniform_scale(src, out_w, out_h, cancel)
    }
}

fn uniform_scale(
    src: &Raster,
    out_w: u32,
    out_h: u32,
    cancel: Option<&CancelToken>,
) -> MockwarpResult<Raster> {
    let mut out = Raster::new(out_w, out_h)?;
    let sx = f64::from(src.width()) / f64::from(out_w);
    let sy = f64::from(src.height()) / f64::from(out_h);

    for y in 0..out_h {
        check_cancel(cancel)?;
        let src_y = (f64::from(y) + 0.5) * sy - 0.5;
        for x in 0..out_w {
            let src_x = (f64::from(x) + 0.5) * sx - 0.5;
            out.set_pixel(x, y, src.sample_bilinear(src_x, src_y));
        }
    }
    Ok(out)
}

fn homography_warp(
    src: &Raster,
    print_area: &Quad,
    out_w: u32,
    out_h: u32,
    cancel: Option<&CancelToken>,
) -> MockwarpResult<Raster> {
    // Work in the bounding box's local frame so output pixel (0,0) sits at
    // the quad's bounding-box origin.
    let origin = print_area.bounding_min();
    let local = Quad::new(
        crate::geom::Point::new(print_area.top_left.x - origin.x, print_area.top_left.y - origin.y),
        crate::geom::Point::new(
            print_area.top_right.x - origin.x,
            print_area.top_right.y - origin.y,
        ),
        crate::geom::Point::new(
            print_area.bottom_left.x - origin.x,
            print_area.bottom_left.y - origin.y,
        ),
        crate::geom::Point::new(
            print_area.bottom_right.x - origin.x,
            print_area.bottom_right.y - origin.y,
        ),
    );

    let sw = f64::from(src.width());
    let sh = f64::from(src.height());
    let forward = Homography::from_rect_to_quad(sw, sh, &local)?;
    let inverse = forward.inverse()?;

    let mut out = Raster::new(out_w, out_h)?;
    for y in 0..out_h {
        check_cancel(cancel)?;
        for x in 0..out_w {
            let dst = crate::geom::Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let s = inverse.apply(dst);
            if s.x < 0.0 || s.y < 0.0 || s.x > sw || s.y > sh {
                continue; // outside the mapped region, stays transparent
            }
            out.set_pixel(x, y, src.sample_bilinear(s.x - 0.5, s.y - 0.5));
        }
    }
    Ok(out)
}

fn cylindrical_warp(
    src: &Raster,
    out_w: u32,
    out_h: u32,
    curve: f64,
    settings: &WarpSettings,
    cancel: Option<&CancelToken>,
) -> MockwarpResult<Raster> {
    let strips = settings.strip_count.min(out_w).max(1);
    let mut out = Raster::new(out_w, out_h)?;

    let sw = f64::from(src.width());
    let sh = f64::from(src.height());
    let w = f64::from(out_w);
    let h = f64::from(out_h);

    for i in 0..strips {
        check_cancel(cancel)?;
        let x0 = (u64::from(i) * u64::from(out_w) / u64::from(strips)) as u32;
        let x1 = (u64::from(i + 1) * u64::from(out_w) / u64::from(strips)) as u32;
        let t = (f64::from(i) + 0.5) / f64::from(strips);
        let offset = strip_offset(t, curve, h, settings.curve_factor);

        for x in x0..x1 {
            let src_x = (f64::from(x) + 0.5) / w * sw - 0.5;
            for y in 0..out_h {
                // Strip content shifted down by `offset`; rows shifted past
                // either edge clip, vacated rows stay transparent.
                let local_y = f64::from(y) + 0.5 - offset;
                if local_y < 0.0 || local_y > h {
                    continue;
                }
                let src_y = local_y / h * sh - 0.5;
                out.set_pixel(x, y, src.sample_bilinear(src_x, src_y));
            }
        }
    }
    Ok(out)
}

fn check_cancel(cancel: Option<&CancelToken>) -> MockwarpResult<()> {
    if let Some(token) = cancel
        && token.is_cancelled()
    {
        return Err(MockwarpError::Cancelled);
    }
    Ok(())
}
