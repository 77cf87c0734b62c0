use mockwarp::{Raster, TemplateCatalog, render_mockup_preview};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let catalog = TemplateCatalog::builtin()?;
    let mug = catalog.get("mug-white-11oz")?;

    let (w, h) = mug.recommended_canvas_dimensions();
    let design = striped_design(w, h);
    let background = Raster::solid(mug.width, mug.height, [244, 244, 244, 255])?;

    let preview = render_mockup_preview(mug, &design, &background, 800, 800)?;
    std::fs::write("mug_preview.png", preview.encode_png()?)?;
    println!(
        "wrote mug_preview.png ({}x{}, design {w}x{h})",
        preview.width(),
        preview.height()
    );

    Ok(())
}

fn striped_design(w: u32, h: u32) -> Raster {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for _x in 0..w {
            let px: [u8; 4] = if (y / 24) % 2 == 0 {
                [220, 50, 60, 255]
            } else {
                [250, 245, 235, 255]
            };
            data.extend_from_slice(&px);
        }
    }
    Raster::from_rgba8(w, h, data).expect("non-zero dimensions")
}
