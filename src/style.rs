//! Text styling configuration records.
//!
//! Pure input data for an out-of-scope text rasterizer; nothing here draws
//! glyphs. Validation only guards documented numeric ranges.

use crate::{
    color::Rgba,
    error::{MockwarpError, MockwarpResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextCase {
    #[default]
    None,
    Uppercase,
    Lowercase,
    TitleCase,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Which side of the path glyphs sit on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathSide {
    #[default]
    Above,
    Below,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub font_family: String,
    pub font_size: f64,
    /// CSS-style weight, 100..=900.
    #[serde(default = "default_weight")]
    pub font_weight: u16,
    #[serde(default)]
    pub font_style: FontStyle,
    #[serde(default = "default_fill")]
    pub fill: Rgba,
}

fn default_weight() -> u16 {
    400
}

fn default_fill() -> Rgba {
    Rgba::BLACK
}

impl TextStyle {
    pub fn validate(&self) -> MockwarpResult<()> {
        if self.font_family.trim().is_empty() {
            return Err(MockwarpError::invalid_parameter(
                "fontFamily must be non-empty",
            ));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(MockwarpError::invalid_parameter("fontSize must be > 0"));
        }
        if !(100..=900).contains(&self.font_weight) {
            return Err(MockwarpError::invalid_parameter(
                "fontWeight must be in [100, 900]",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    #[serde(default)]
    pub alignment: TextAlignment,
    /// Multiple of the font size; 1.0 is single spacing.
    #[serde(default = "default_line_height")]
    pub line_height: f64,
    #[serde(default)]
    pub paragraph_spacing: f64,
    #[serde(default)]
    pub indent: f64,
}

fn default_line_height() -> f64 {
    1.2
}

impl ParagraphStyle {
    pub fn validate(&self) -> MockwarpResult<()> {
        if !self.line_height.is_finite() || self.line_height <= 0.0 {
            return Err(MockwarpError::invalid_parameter("lineHeight must be > 0"));
        }
        if !self.paragraph_spacing.is_finite() || self.paragraph_spacing < 0.0 {
            return Err(MockwarpError::invalid_parameter(
                "paragraphSpacing must be >= 0",
            ));
        }
        if !self.indent.is_finite() || self.indent < 0.0 {
            return Err(MockwarpError::invalid_parameter("indent must be >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterStyle {
    /// Letter spacing in em units, may be negative for tight tracking.
    #[serde(default)]
    pub tracking: f64,
    #[serde(default)]
    pub baseline_shift: f64,
    #[serde(default)]
    pub case: TextCase,
}

impl CharacterStyle {
    pub fn validate(&self) -> MockwarpResult<()> {
        if !self.tracking.is_finite() || self.tracking.abs() > 10.0 {
            return Err(MockwarpError::invalid_parameter(
                "tracking must be finite and within [-10, 10] em",
            ));
        }
        if !self.baseline_shift.is_finite() {
            return Err(MockwarpError::invalid_parameter(
                "baselineShift must be finite",
            ));
        }
        Ok(())
    }
}

/// Path-following configuration for text-on-path layers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextPathConfig {
    /// SVG path data the glyph baseline follows.
    pub path: String,
    /// Fraction of path length where text starts, in `[0, 1]`.
    #[serde(default)]
    pub start_offset: f64,
    #[serde(default = "default_end_offset")]
    pub end_offset: f64,
    #[serde(default)]
    pub side: PathSide,
}

fn default_end_offset() -> f64 {
    1.0
}

impl TextPathConfig {
    pub fn validate(&self) -> MockwarpResult<()> {
        if self.path.trim().is_empty() {
            return Err(MockwarpError::invalid_parameter("path must be non-empty"));
        }
        for (name, v) in [("startOffset", self.start_offset), ("endOffset", self.end_offset)] {
            if !v.is_finite() || !(0.0..=1.0).contains(&v) {
                return Err(MockwarpError::invalid_parameter(format!(
                    "{name} must be in [0, 1]"
                )));
            }
        }
        if self.start_offset >= self.end_offset {
            return Err(MockwarpError::invalid_parameter(
                "startOffset must be < endOffset",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_style() -> TextStyle {
        TextStyle {
            font_family: "Inter".to_string(),
            font_size: 24.0,
            font_weight: 600,
            font_style: FontStyle::Normal,
            fill: Rgba::BLACK,
        }
    }

    #[test]
    fn valid_style_passes() {
        text_style().validate().unwrap();
    }

    #[test]
    fn zero_font_size_fails() {
        let mut s = text_style();
        s.font_size = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn weight_bounds_are_checked() {
        let mut s = text_style();
        s.font_weight = 950;
        assert!(s.validate().is_err());
    }

    #[test]
    fn paragraph_defaults_deserialize() {
        let p: ParagraphStyle = serde_json::from_str("{}").unwrap();
        assert_eq!(p.alignment, TextAlignment::Left);
        assert_eq!(p.line_height, 1.2);
        p.validate().unwrap();
    }

    #[test]
    fn text_path_offsets_must_be_ordered() {
        let cfg = TextPathConfig {
            path: "M 0 0 C 50 -40 150 -40 200 0".to_string(),
            start_offset: 0.8,
            end_offset: 0.2,
            side: PathSide::Above,
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn text_path_roundtrip() {
        let cfg = TextPathConfig {
            path: "M 0 0 L 100 0".to_string(),
            start_offset: 0.0,
            end_offset: 1.0,
            side: PathSide::Below,
        };
        cfg.validate().unwrap();
        let s = serde_json::to_string(&cfg).unwrap();
        assert!(s.contains("startOffset"));
        let de: TextPathConfig = serde_json::from_str(&s).unwrap();
        assert_eq!(de, cfg);
    }
}
