use mockwarp::{Raster, TemplateCatalog, render_mockup_preview};

fn gradient_design(w: u32, h: u32) -> Raster {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            data.extend_from_slice(&[
                (x * 255 / w.max(1)) as u8,
                (y * 255 / h.max(1)) as u8,
                90,
                255,
            ]);
        }
    }
    Raster::from_rgba8(w, h, data).unwrap()
}

#[test]
fn preview_dimensions_are_always_the_requested_ones() {
    let catalog = TemplateCatalog::builtin().unwrap();
    let design = gradient_design(256, 256);

    for template in catalog.all() {
        let bg = Raster::solid(template.width, template.height, [230, 230, 230, 255]).unwrap();
        let preview = render_mockup_preview(template, &design, &bg, 640, 480).unwrap();
        assert_eq!(
            (preview.width(), preview.height()),
            (640, 480),
            "template {}",
            template.id
        );
    }
}

#[test]
fn poster_preview_is_an_undistorted_scale() {
    let catalog = TemplateCatalog::builtin().unwrap();
    let poster = catalog.get("poster-unframed-24x36").unwrap();
    assert!(!poster.perspective);
    assert_eq!(poster.curve_intensity, 0.0);

    let design = gradient_design(600, 900);
    let bg = Raster::solid(poster.width, poster.height, [255, 255, 255, 255]).unwrap();
    let preview = render_mockup_preview(poster, &design, &bg, 400, 550).unwrap();

    // scale = min(400/800, 550/1100) = 0.5; print area spans template
    // (100,70)-(700,970), so the preview print region is (50,35)-(350,485).
    // Red increases left to right inside the design; check the linear ramp.
    let left = preview.pixel(80, 250);
    let right = preview.pixel(320, 250);
    assert!(right[0] > left[0] + 100, "{left:?} vs {right:?}");

    // Green increases top to bottom.
    let top = preview.pixel(200, 60);
    let bottom = preview.pixel(200, 460);
    assert!(bottom[1] > top[1] + 100, "{top:?} vs {bottom:?}");

    // Outside the print area the white background shows through.
    assert_eq!(preview.pixel(20, 250), [255, 255, 255, 255]);
}

#[test]
fn mug_preview_shows_curved_design_inside_print_area() {
    let catalog = TemplateCatalog::builtin().unwrap();
    let mug = catalog.get("mug-white-11oz").unwrap();

    let design = Raster::solid(512, 512, [255, 0, 0, 255]).unwrap();
    let bg = Raster::solid(mug.width, mug.height, [250, 250, 250, 255]).unwrap();
    let preview = render_mockup_preview(mug, &design, &bg, mug.width, mug.height).unwrap();

    // scale 1.0: print area center (450, 320) carries the red design.
    let center = preview.pixel(450, 320);
    assert!(center[0] > 200 && center[1] < 60, "{center:?}");
    // Far corner is untouched background.
    assert_eq!(preview.pixel(20, 20), [250, 250, 250, 255]);
}

#[test]
fn preview_is_deterministic() {
    let catalog = TemplateCatalog::builtin().unwrap();
    let card = catalog.get("business-card-angled").unwrap();
    let design = gradient_design(350, 200);
    let bg = Raster::solid(card.width, card.height, [40, 40, 40, 255]).unwrap();

    let a = render_mockup_preview(card, &design, &bg, 800, 600).unwrap();
    let b = render_mockup_preview(card, &design, &bg, 800, 600).unwrap();
    assert_eq!(a.data(), b.data());
}
