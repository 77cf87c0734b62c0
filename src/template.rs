use crate::{
    error::{MockwarpError, MockwarpResult},
    geom::Quad,
};

/// Physical product surface a template mocks up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductType {
    TShirt,
    Mug,
    Poster,
    Hoodie,
    ToteBag,
    BusinessCard,
}

impl ProductType {
    pub const ALL: [ProductType; 6] = [
        ProductType::TShirt,
        ProductType::Mug,
        ProductType::Poster,
        ProductType::Hoodie,
        ProductType::ToteBag,
        ProductType::BusinessCard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::TShirt => "t-shirt",
            ProductType::Mug => "mug",
            ProductType::Poster => "poster",
            ProductType::Hoodie => "hoodie",
            ProductType::ToteBag => "tote-bag",
            ProductType::BusinessCard => "business-card",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Static configuration for one mockup surface: background photo, canvas
/// size, the print-area quad, and which warp the projection engine applies.
///
/// Templates are loaded once at startup and never mutated at request time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MockupTemplate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    pub category: String,
    /// Path or URL of the background photograph; resolved by the host.
    pub mockup_image: String,
    pub width: u32,
    pub height: u32,
    pub print_area: Quad,
    /// Recommended design aspect ratio, e.g. `"3:4"`.
    pub aspect_ratio: String,
    #[serde(default)]
    pub perspective: bool,
    #[serde(default)]
    pub curve_intensity: f64,
}

impl MockupTemplate {
    pub fn validate(&self) -> MockwarpResult<()> {
        if self.id.trim().is_empty() {
            return Err(MockwarpError::invalid_parameter("template id must be non-empty"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(MockwarpError::invalid_parameter(format!(
                "template '{}' canvas must be non-zero, got {}x{}",
                self.id, self.width, self.height
            )));
        }
        if !(0.0..=1.0).contains(&self.curve_intensity) {
            return Err(MockwarpError::invalid_parameter(format!(
                "template '{}' curveIntensity must be in [0, 1]",
                self.id
            )));
        }
        self.print_area
            .validate()
            .map_err(|e| MockwarpError::geometry(format!("template '{}': {e}", self.id)))
    }

    /// Pixel dimensions a design should be authored at to fill the print
    /// area without resampling loss: the quad's edge-length width/height.
    pub fn recommended_canvas_dimensions(&self) -> (u32, u32) {
        (
            self.print_area.width().round() as u32,
            self.print_area.height().round() as u32,
        )
    }
}
