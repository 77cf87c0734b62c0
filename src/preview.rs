use crate::{
    error::{MockwarpError, MockwarpResult},
    project::{CancelToken, WarpSettings, project_design_with},
    raster::Raster,
    template::MockupTemplate,
};

/// Knobs for [`render_mockup_preview_with`].
#[derive(Clone, Debug, Default)]
pub struct PreviewOptions {
    pub warp: WarpSettings,
    pub cancel: Option<CancelToken>,
}

/// Projects `design` per the template's warp flags and composites it onto
/// `background`, producing a preview of exactly `(out_w, out_h)` pixels.
///
/// `background` is the decoded image referenced by `template.mockup_image`;
/// resolving that path/URL is the host's job, which keeps this call free of
/// I/O.
pub fn render_mockup_preview(
    template: &MockupTemplate,
    design: &Raster,
    background: &Raster,
    out_w: u32,
    out_h: u32,
) -> MockwarpResult<Raster> {
    render_mockup_preview_with(
        template,
        design,
        background,
        out_w,
        out_h,
        &PreviewOptions::default(),
    )
}

#[tracing::instrument(skip_all, fields(template = %template.id, out_w, out_h))]
pub fn render_mockup_preview_with(
    template: &MockupTemplate,
    design: &Raster,
    background: &Raster,
    out_w: u32,
    out_h: u32,
    opts: &PreviewOptions,
) -> MockwarpResult<Raster> {
    template.validate()?;
    let projected = project_design_with(
        design,
        &template.print_area,
        template.perspective,
        template.curve_intensity,
        &opts.warp,
        opts.cancel.as_ref(),
    )?;
    compose_preview(template, background, &projected, out_w, out_h)
}

/// Places an already-projected design over the template background.
///
/// Scaling policy (deterministic): `scale = min(out_w / template.width,
/// out_h / template.height)`. The background is drawn at the template's
/// native aspect, scaled by `scale` and centered; any remaining border is
/// left transparent (letterbox). The projected design lands at the print
/// area's bounding-box origin times `scale`, plus the letterbox offset, and
/// is scaled by the same factor. For axis-aligned print areas the anchor is
/// exactly `print_area.top_left`.
///
/// Compositing is atomic: either a complete `(out_w, out_h)` raster is
/// returned or an error, never a partial preview.
pub fn compose_preview(
    template: &MockupTemplate,
    background: &Raster,
    projected: &Raster,
    out_w: u32,
    out_h: u32,
) -> MockwarpResult<Raster> {
    if out_w == 0 || out_h == 0 {
        return Err(MockwarpError::invalid_parameter(format!(
            "preview dimensions must be non-zero, got {out_w}x{out_h}"
        )));
    }

    let scale = (f64::from(out_w) / f64::from(template.width))
        .min(f64::from(out_h) / f64::from(template.height));

    let bg_w = (f64::from(template.width) * scale).round().max(1.0) as u32;
    let bg_h = (f64::from(template.height) * scale).round().max(1.0) as u32;
    let off_x = (out_w - bg_w.min(out_w)) / 2;
    let off_y = (out_h - bg_h.min(out_h)) / 2;

    let mut out = Raster::new(out_w, out_h)?;

    // Background fills the letterboxed template rect.
    let bx = f64::from(background.width()) / f64::from(bg_w);
    let by = f64::from(background.height()) / f64::from(bg_h);
    for y in 0..bg_h.min(out_h) {
        let src_y = (f64::from(y) + 0.5) * by - 0.5;
        for x in 0..bg_w.min(out_w) {
            let src_x = (f64::from(x) + 0.5) * bx - 0.5;
            out.set_pixel(off_x + x, off_y + y, background.sample_bilinear(src_x, src_y));
        }
    }

    // Projected design over the background, anchored at the print area's
    // bounding-box origin in template space.
    let origin = template.print_area.bounding_min();
    let dst_x0 = f64::from(off_x) + origin.x * scale;
    let dst_y0 = f64::from(off_y) + origin.y * scale;
    let dst_w = f64::from(projected.width()) * scale;
    let dst_h = f64::from(projected.height()) * scale;
    if dst_w < 0.5 || dst_h < 0.5 {
        return Err(MockwarpError::geometry(
            "projected design scales to zero pixels at this preview size",
        ));
    }

    out.draw_scaled_over(projected, dst_x0, dst_y0, dst_w, dst_h);

    Ok(out)
}
