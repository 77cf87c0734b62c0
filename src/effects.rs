use crate::{
    color::Rgba,
    error::{MockwarpError, MockwarpResult},
};

/// Per-layer blend mode applied when an effect's output is composited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    SoftLight,
    HardLight,
    Difference,
    Exclusion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectCategory {
    Shadow,
    Glow,
    Blur,
    Distortion,
    ColorAdjustment,
    Artistic,
    Stylize,
}

/// One effect in a layer's stack: common controls plus a kind-specific
/// parameter payload, discriminated by the `type` tag.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub blend_mode: BlendMode,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(flatten)]
    pub kind: EffectKind,
}

fn default_enabled() -> bool {
    true
}

fn default_opacity() -> f64 {
    1.0
}

impl Effect {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            enabled: true,
            blend_mode: BlendMode::Normal,
            opacity: 1.0,
            kind,
        }
    }

    pub fn category(&self) -> EffectCategory {
        self.kind.category()
    }

    pub fn validate(&self) -> MockwarpResult<()> {
        in_range("opacity", self.opacity, 0.0, 1.0)?;
        self.kind.validate()
    }
}

/// Closed, discriminated union of effect kinds. The `type` tag uniquely
/// determines the parameter shape; adding a kind means adding a variant
/// here, never ad-hoc fields.
///
/// These records are pure configuration: an out-of-scope rasterizer consumes
/// them to produce the styled design image the projection engine warps.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum EffectKind {
    // Shadow
    DropShadow { offset_x: f64, offset_y: f64, blur: f64, spread: f64, color: Rgba },
    InnerShadow { offset_x: f64, offset_y: f64, blur: f64, spread: f64, color: Rgba },
    LongShadow { angle_deg: f64, length: f64, color: Rgba },

    // Glow
    OuterGlow { radius: f64, intensity: f64, color: Rgba },
    InnerGlow { radius: f64, intensity: f64, color: Rgba },
    NeonGlow { radius: f64, intensity: f64, color: Rgba },

    // Blur
    GaussianBlur { radius: f64 },
    MotionBlur { angle_deg: f64, distance: f64 },
    RadialBlur { amount: f64, center_x: f64, center_y: f64 },
    ZoomBlur { amount: f64, center_x: f64, center_y: f64 },

    // Distortion
    Wave { amplitude: f64, wavelength: f64 },
    Ripple { amplitude: f64, frequency: f64 },
    Twirl { angle_deg: f64, radius: f64 },
    Spherize { amount: f64 },
    Bulge { amount: f64, center_x: f64, center_y: f64 },
    Pinch { amount: f64, center_x: f64, center_y: f64 },

    // Color adjustment
    HueSaturation { hue: f64, saturation: f64, lightness: f64 },
    BrightnessContrast { brightness: f64, contrast: f64 },
    ColorBalance { cyan_red: f64, magenta_green: f64, yellow_blue: f64 },
    Levels { black_point: u8, white_point: u8, gamma: f64 },
    Exposure { stops: f64 },
    Vibrance { amount: f64 },
    Invert {},
    Grayscale {},

    // Artistic
    OilPaint { radius: f64, levels: u32 },
    Watercolor { intensity: f64 },
    Sketch { strength: f64 },
    Halftone { dot_size: f64, angle_deg: f64 },
    Duotone { highlight: Rgba, shadow: Rgba },

    // Stylize
    Posterize { levels: u32 },
    Pixelate { block_size: u32 },
    Threshold { level: u8 },
    Emboss { strength: f64, angle_deg: f64 },
    Outline { thickness: f64, color: Rgba },
}

impl EffectKind {
    pub fn category(&self) -> EffectCategory {
        use EffectKind::*;
        match self {
            DropShadow { .. } | InnerShadow { .. } | LongShadow { .. } => EffectCategory::Shadow,
            OuterGlow { .. } | InnerGlow { .. } | NeonGlow { .. } => EffectCategory::Glow,
            GaussianBlur { .. } | MotionBlur { .. } | RadialBlur { .. } | ZoomBlur { .. } => {
                EffectCategory::Blur
            }
            Wave { .. } | Ripple { .. } | Twirl { .. } | Spherize { .. } | Bulge { .. }
            | Pinch { .. } => EffectCategory::Distortion,
            HueSaturation { .. }
            | BrightnessContrast { .. }
            | ColorBalance { .. }
            | Levels { .. }
            | Exposure { .. }
            | Vibrance { .. }
            | Invert {}
            | Grayscale {} => EffectCategory::ColorAdjustment,
            OilPaint { .. } | Watercolor { .. } | Sketch { .. } | Halftone { .. }
            | Duotone { .. } => EffectCategory::Artistic,
            Posterize { .. } | Pixelate { .. } | Threshold { .. } | Emboss { .. }
            | Outline { .. } => EffectCategory::Stylize,
        }
    }

    pub fn validate(&self) -> MockwarpResult<()> {
        use EffectKind::*;
        match *self {
            DropShadow { offset_x, offset_y, blur, spread, .. }
            | InnerShadow { offset_x, offset_y, blur, spread, .. } => {
                finite("offsetX", offset_x)?;
                finite("offsetY", offset_y)?;
                non_negative("blur", blur)?;
                finite("spread", spread)
            }
            LongShadow { angle_deg, length, .. } => {
                finite("angleDeg", angle_deg)?;
                non_negative("length", length)
            }
            OuterGlow { radius, intensity, .. }
            | InnerGlow { radius, intensity, .. }
            | NeonGlow { radius, intensity, .. } => {
                non_negative("radius", radius)?;
                in_range("intensity", intensity, 0.0, 1.0)
            }
            GaussianBlur { radius } => non_negative("radius", radius),
            MotionBlur { angle_deg, distance } => {
                finite("angleDeg", angle_deg)?;
                non_negative("distance", distance)
            }
            RadialBlur { amount, center_x, center_y } | ZoomBlur { amount, center_x, center_y } => {
                in_range("amount", amount, 0.0, 1.0)?;
                in_range("centerX", center_x, 0.0, 1.0)?;
                in_range("centerY", center_y, 0.0, 1.0)
            }
            Wave { amplitude, wavelength } => {
                non_negative("amplitude", amplitude)?;
                positive("wavelength", wavelength)
            }
            Ripple { amplitude, frequency } => {
                non_negative("amplitude", amplitude)?;
                positive("frequency", frequency)
            }
            Twirl { angle_deg, radius } => {
                finite("angleDeg", angle_deg)?;
                non_negative("radius", radius)
            }
            Spherize { amount } => in_range("amount", amount, -1.0, 1.0),
            Bulge { amount, center_x, center_y } | Pinch { amount, center_x, center_y } => {
                in_range("amount", amount, -1.0, 1.0)?;
                in_range("centerX", center_x, 0.0, 1.0)?;
                in_range("centerY", center_y, 0.0, 1.0)
            }
            HueSaturation { hue, saturation, lightness } => {
                in_range("hue", hue, -180.0, 180.0)?;
                in_range("saturation", saturation, -100.0, 100.0)?;
                in_range("lightness", lightness, -100.0, 100.0)
            }
            BrightnessContrast { brightness, contrast } => {
                in_range("brightness", brightness, -100.0, 100.0)?;
                in_range("contrast", contrast, -100.0, 100.0)
            }
            ColorBalance { cyan_red, magenta_green, yellow_blue } => {
                in_range("cyanRed", cyan_red, -100.0, 100.0)?;
                in_range("magentaGreen", magenta_green, -100.0, 100.0)?;
                in_range("yellowBlue", yellow_blue, -100.0, 100.0)
            }
            Levels { black_point, white_point, gamma } => {
                if black_point >= white_point {
                    return Err(MockwarpError::invalid_parameter(
                        "levels blackPoint must be < whitePoint",
                    ));
                }
                in_range("gamma", gamma, 0.1, 10.0)
            }
            Exposure { stops } => in_range("stops", stops, -5.0, 5.0),
            Vibrance { amount } => in_range("amount", amount, -100.0, 100.0),
            Invert {} | Grayscale {} => Ok(()),
            OilPaint { radius, levels } => {
                non_negative("radius", radius)?;
                levels_in_range(levels)
            }
            Watercolor { intensity } => in_range("intensity", intensity, 0.0, 1.0),
            Sketch { strength } => in_range("strength", strength, 0.0, 1.0),
            Halftone { dot_size, angle_deg } => {
                positive("dotSize", dot_size)?;
                finite("angleDeg", angle_deg)
            }
            Duotone { .. } => Ok(()),
            Posterize { levels } => levels_in_range(levels),
            Pixelate { block_size } => {
                if block_size < 1 {
                    return Err(MockwarpError::invalid_parameter(
                        "pixelate blockSize must be >= 1",
                    ));
                }
                Ok(())
            }
            Threshold { .. } => Ok(()),
            Emboss { strength, angle_deg } => {
                in_range("strength", strength, 0.0, 10.0)?;
                finite("angleDeg", angle_deg)
            }
            Outline { thickness, .. } => non_negative("thickness", thickness),
        }
    }
}

/// Ordered effect stack for one design layer. Composite order is bottom to
/// top: each entry blends over the accumulated result using its blend mode
/// and opacity.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct EffectStack {
    pub effects: Vec<Effect>,
}

impl EffectStack {
    pub fn new(effects: Vec<Effect>) -> Self {
        Self { effects }
    }

    pub fn validate(&self) -> MockwarpResult<()> {
        for (i, e) in self.effects.iter().enumerate() {
            e.validate().map_err(|err| {
                MockwarpError::invalid_parameter(format!("effect {i}: {err}"))
            })?;
        }
        Ok(())
    }

    /// Effects that actually participate in compositing.
    pub fn enabled(&self) -> impl Iterator<Item = &Effect> {
        self.effects.iter().filter(|e| e.enabled)
    }
}

fn finite(name: &str, v: f64) -> MockwarpResult<()> {
    if !v.is_finite() {
        return Err(MockwarpError::invalid_parameter(format!(
            "{name} must be finite"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, v: f64) -> MockwarpResult<()> {
    finite(name, v)?;
    if v < 0.0 {
        return Err(MockwarpError::invalid_parameter(format!(
            "{name} must be >= 0"
        )));
    }
    Ok(())
}

fn positive(name: &str, v: f64) -> MockwarpResult<()> {
    finite(name, v)?;
    if v <= 0.0 {
        return Err(MockwarpError::invalid_parameter(format!(
            "{name} must be > 0"
        )));
    }
    Ok(())
}

fn in_range(name: &str, v: f64, lo: f64, hi: f64) -> MockwarpResult<()> {
    finite(name, v)?;
    if !(lo..=hi).contains(&v) {
        return Err(MockwarpError::invalid_parameter(format!(
            "{name} must be in [{lo}, {hi}], got {v}"
        )));
    }
    Ok(())
}

fn levels_in_range(levels: u32) -> MockwarpResult<()> {
    if !(2..=256).contains(&levels) {
        return Err(MockwarpError::invalid_parameter(
            "levels must be in [2, 256]",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_tag_roundtrips_through_json() {
        let e = Effect::new(EffectKind::DropShadow {
            offset_x: 4.0,
            offset_y: 4.0,
            blur: 8.0,
            spread: 0.0,
            color: Rgba::new(0, 0, 0, 160),
        });
        let s = serde_json::to_string(&e).unwrap();
        assert!(s.contains("\"type\":\"drop-shadow\""));
        assert!(s.contains("\"offsetX\""));
        let de: Effect = serde_json::from_str(&s).unwrap();
        assert_eq!(de, e);
    }

    #[test]
    fn category_follows_kind() {
        let glow = Effect::new(EffectKind::NeonGlow {
            radius: 10.0,
            intensity: 0.8,
            color: Rgba::new(0, 255, 180, 255),
        });
        assert_eq!(glow.category(), EffectCategory::Glow);

        let pixelate = Effect::new(EffectKind::Pixelate { block_size: 8 });
        assert_eq!(pixelate.category(), EffectCategory::Stylize);
    }

    #[test]
    fn opacity_out_of_range_is_rejected() {
        let mut e = Effect::new(EffectKind::GaussianBlur { radius: 2.0 });
        e.opacity = 1.5;
        assert!(matches!(
            e.validate(),
            Err(MockwarpError::InvalidParameter(_))
        ));
    }

    #[test]
    fn posterize_levels_bounds() {
        assert!(EffectKind::Posterize { levels: 2 }.validate().is_ok());
        assert!(EffectKind::Posterize { levels: 256 }.validate().is_ok());
        assert!(EffectKind::Posterize { levels: 1 }.validate().is_err());
        assert!(EffectKind::Posterize { levels: 257 }.validate().is_err());
    }

    #[test]
    fn pixelate_block_size_must_be_at_least_one() {
        assert!(EffectKind::Pixelate { block_size: 1 }.validate().is_ok());
        assert!(EffectKind::Pixelate { block_size: 0 }.validate().is_err());
    }

    #[test]
    fn hue_bounds_are_checked() {
        let ok = EffectKind::HueSaturation {
            hue: -180.0,
            saturation: 0.0,
            lightness: 0.0,
        };
        assert!(ok.validate().is_ok());
        let bad = EffectKind::HueSaturation {
            hue: 181.0,
            saturation: 0.0,
            lightness: 0.0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn levels_black_below_white() {
        let bad = EffectKind::Levels {
            black_point: 200,
            white_point: 100,
            gamma: 1.0,
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn stack_validation_reports_offending_index() {
        let stack = EffectStack::new(vec![
            Effect::new(EffectKind::GaussianBlur { radius: 2.0 }),
            Effect::new(EffectKind::Posterize { levels: 1 }),
        ]);
        let err = stack.validate().unwrap_err().to_string();
        assert!(err.contains("effect 1"));
    }

    #[test]
    fn disabled_effects_are_filtered() {
        let mut off = Effect::new(EffectKind::Invert {});
        off.enabled = false;
        let stack = EffectStack::new(vec![off, Effect::new(EffectKind::Grayscale {})]);
        assert_eq!(stack.enabled().count(), 1);
    }
}
