use anyhow::Context as _;

use crate::error::{MockwarpError, MockwarpResult};

/// Owned RGBA8 pixel buffer with **premultiplied** alpha.
///
/// This is the engine's pixel contract: images are premultiplied at ingest
/// ([`Raster::from_rgba8`], [`Raster::decode_png`]) and unpremultiplied only
/// at the PNG boundary ([`Raster::encode_png`]). All sampling and compositing
/// assumes premultiplied channels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Fully transparent buffer.
    pub fn new(width: u32, height: u32) -> MockwarpResult<Self> {
        let len = buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0u8; len],
        })
    }

    /// Buffer filled with one straight-alpha RGBA color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> MockwarpResult<Self> {
        let mut out = Self::new(width, height)?;
        let px = premultiply(rgba);
        for chunk in out.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        Ok(out)
    }

    /// Wraps a straight-alpha RGBA8 buffer, premultiplying in place.
    pub fn from_rgba8(width: u32, height: u32, mut data: Vec<u8>) -> MockwarpResult<Self> {
        let len = buffer_len(width, height)?;
        if data.len() != len {
            return Err(MockwarpError::invalid_source(format!(
                "rgba8 buffer length {} does not match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        for px in data.chunks_exact_mut(4) {
            let p = premultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn decode_png(bytes: &[u8]) -> MockwarpResult<Self> {
        let dyn_img = image::load_from_memory(bytes)
            .context("decode image from memory")
            .map_err(|e| MockwarpError::invalid_source(format!("{e:#}")))?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(MockwarpError::invalid_source("decoded image is empty"));
        }
        Self::from_rgba8(width, height, rgba.into_raw())
    }

    /// Encodes as PNG, unpremultiplying back to straight alpha.
    pub fn encode_png(&self) -> MockwarpResult<Vec<u8>> {
        let mut straight = self.data.clone();
        for px in straight.chunks_exact_mut(4) {
            let p = unpremultiply([px[0], px[1], px[2], px[3]]);
            px.copy_from_slice(&p);
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| MockwarpError::invalid_source("raster buffer length mismatch"))?;
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode png")?;
        Ok(out)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Premultiplied pixel data, row-major RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, px: [u8; 4]) {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        self.data[idx..idx + 4].copy_from_slice(&px);
    }

    /// Bilinear sample at fractional coordinates. Coordinates outside the
    /// buffer sample as fully transparent, so edges fade rather than smear.
    pub fn sample_bilinear(&self, x: f64, y: f64) -> [u8; 4] {
        let x0 = x.floor();
        let y0 = y.floor();
        let fx = x - x0;
        let fy = y - y0;

        let mut acc = [0.0f64; 4];
        let weights = [
            (x0, y0, (1.0 - fx) * (1.0 - fy)),
            (x0 + 1.0, y0, fx * (1.0 - fy)),
            (x0, y0 + 1.0, (1.0 - fx) * fy),
            (x0 + 1.0, y0 + 1.0, fx * fy),
        ];
        for (sx, sy, w) in weights {
            if w <= 0.0 {
                continue;
            }
            let px = self.pixel_or_transparent(sx, sy);
            for c in 0..4 {
                acc[c] += w * f64::from(px[c]);
            }
        }

        let mut out = [0u8; 4];
        for c in 0..4 {
            out[c] = acc[c].round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    /// Blends `src` over this raster inside the fractional destination rect
    /// `(dst_x, dst_y, dst_w, dst_h)`, bilinear-resampling `src` to fit.
    /// Both buffers are premultiplied; blending is source-over. Parts of the
    /// rect outside this raster clip silently.
    pub fn draw_scaled_over(&mut self, src: &Raster, dst_x: f64, dst_y: f64, dst_w: f64, dst_h: f64) {
        if dst_w <= 0.0 || dst_h <= 0.0 {
            return;
        }
        let x0 = dst_x.floor().max(0.0) as u32;
        let y0 = dst_y.floor().max(0.0) as u32;
        let x1 = (dst_x + dst_w).ceil().min(f64::from(self.width)) as u32;
        let y1 = (dst_y + dst_h).ceil().min(f64::from(self.height)) as u32;

        for y in y0..y1 {
            let src_y = (f64::from(y) + 0.5 - dst_y) / dst_h * f64::from(src.height) - 0.5;
            for x in x0..x1 {
                let src_x = (f64::from(x) + 0.5 - dst_x) / dst_w * f64::from(src.width) - 0.5;
                let src_px = src.sample_bilinear(src_x, src_y);
                if src_px[3] == 0 {
                    continue;
                }
                let blended = over(self.pixel(x, y), src_px);
                self.set_pixel(x, y, blended);
            }
        }
    }

    fn pixel_or_transparent(&self, x: f64, y: f64) -> [u8; 4] {
        if x < 0.0 || y < 0.0 {
            return [0; 4];
        }
        let (x, y) = (x as u32, y as u32);
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        self.pixel(x, y)
    }
}

/// Source-over for premultiplied pixels: `out = src + dst * (1 - src_a)`.
fn over(dst: [u8; 4], src: [u8; 4]) -> [u8; 4] {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }
    let inv = 255u32 - u32::from(src[3]);
    let mut out = [0u8; 4];
    for c in 0..4 {
        let v = u32::from(src[c]) + (u32::from(dst[c]) * inv + 127) / 255;
        out[c] = v.min(255) as u8;
    }
    out
}

fn buffer_len(width: u32, height: u32) -> MockwarpResult<usize> {
    if width == 0 || height == 0 {
        return Err(MockwarpError::invalid_source(format!(
            "raster dimensions must be non-zero, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| MockwarpError::invalid_source("raster buffer size overflow"))
}

fn premultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        ((u16::from(px[0]) * a + 127) / 255) as u8,
        ((u16::from(px[1]) * a + 127) / 255) as u8,
        ((u16::from(px[2]) * a + 127) / 255) as u8,
        px[3],
    ]
}

fn unpremultiply(px: [u8; 4]) -> [u8; 4] {
    let a = u16::from(px[3]);
    if a == 0 {
        return [0, 0, 0, 0];
    }
    [
        ((u16::from(px[0]) * 255 + a / 2) / a).min(255) as u8,
        ((u16::from(px[1]) * 255 + a / 2) / a).min(255) as u8,
        ((u16::from(px[2]) * 255 + a / 2) / a).min(255) as u8,
        px[3],
    ]
}
