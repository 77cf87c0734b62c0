use crate::error::{MockwarpError, MockwarpResult};

/// Straight-alpha RGBA color used by effect/style configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const BLACK: Rgba = Rgba::new(0, 0, 0, 255);
    pub const WHITE: Rgba = Rgba::new(255, 255, 255, 255);

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    fn lerp(a: Rgba, b: Rgba, t: f64) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |x: u8, y: u8| -> u8 {
            (f64::from(x) + (f64::from(y) - f64::from(x)) * t)
                .round()
                .clamp(0.0, 255.0) as u8
        };
        Rgba::new(
            mix(a.r, b.r),
            mix(a.g, b.g),
            mix(a.b, b.b),
            mix(a.a, b.a),
        )
    }
}

/// Display grouping for palettes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaletteCategory {
    Brand,
    Theme,
    Custom,
    Harmony,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorSwatch {
    pub name: String,
    pub color: Rgba,
}

/// Named, ordered collection of swatches.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorPalette {
    pub name: String,
    pub category: PaletteCategory,
    pub swatches: Vec<ColorSwatch>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GradientKind {
    Linear,
    Radial,
}

/// Behavior outside the `[0, 100]` stop range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpreadMethod {
    Pad,
    Repeat,
    Reflect,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    pub color: Rgba,
    /// Position along the gradient axis, in `[0, 100]`.
    pub position: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub kind: GradientKind,
    /// Axis angle for linear gradients, degrees clockwise from horizontal.
    #[serde(default)]
    pub angle_deg: f64,
    pub stops: Vec<GradientStop>,
    pub spread_method: SpreadMethod,
}

impl Gradient {
    pub fn validate(&self) -> MockwarpResult<()> {
        if self.stops.len() < 2 {
            return Err(MockwarpError::invalid_parameter(
                "gradient needs at least 2 stops",
            ));
        }
        let mut prev = f64::NEG_INFINITY;
        for stop in &self.stops {
            if !stop.position.is_finite() || !(0.0..=100.0).contains(&stop.position) {
                return Err(MockwarpError::invalid_parameter(format!(
                    "gradient stop position {} outside [0, 100]",
                    stop.position
                )));
            }
            if stop.position < prev {
                return Err(MockwarpError::invalid_parameter(
                    "gradient stops must be in non-decreasing position order",
                ));
            }
            prev = stop.position;
        }
        if !self.angle_deg.is_finite() {
            return Err(MockwarpError::invalid_parameter(
                "gradient angle must be finite",
            ));
        }
        Ok(())
    }

    /// Color at `position`, linearly interpolated between the surrounding
    /// stops after applying the spread method. An unvalidated gradient with
    /// no stops samples as fully transparent instead of panicking.
    pub fn color_at(&self, position: f64) -> Rgba {
        let Some(first) = self.stops.first() else {
            return Rgba::new(0, 0, 0, 0);
        };
        let p = match self.spread_method {
            SpreadMethod::Pad => position.clamp(0.0, 100.0),
            SpreadMethod::Repeat => position.rem_euclid(100.0),
            SpreadMethod::Reflect => {
                let cycle = position.rem_euclid(200.0);
                if cycle > 100.0 { 200.0 - cycle } else { cycle }
            }
        };

        if p <= first.position {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if p <= b.position {
                let span = b.position - a.position;
                let t = if span <= 0.0 { 1.0 } else { (p - a.position) / span };
                return Rgba::lerp(a.color, b.color, t);
            }
        }
        self.stops[self.stops.len() - 1].color
    }
}
