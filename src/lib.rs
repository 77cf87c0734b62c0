#![forbid(unsafe_code)]

pub mod catalog;
pub mod color;
pub mod effects;
pub mod error;
pub mod geom;
pub mod homography;
pub mod preview;
pub mod project;
pub mod raster;
pub mod style;
pub mod template;

pub use catalog::{TemplateCatalog, TemplateFilter};
pub use color::{ColorPalette, ColorSwatch, Gradient, GradientStop, Rgba, SpreadMethod};
pub use effects::{BlendMode, Effect, EffectCategory, EffectKind, EffectStack};
pub use error::{MockwarpError, MockwarpResult};
pub use geom::{Point, Quad};
pub use homography::Homography;
pub use preview::{
    PreviewOptions, compose_preview, render_mockup_preview, render_mockup_preview_with,
};
pub use project::{CancelToken, WarpSettings, project_design, project_design_with};
pub use raster::Raster;
pub use style::{CharacterStyle, ParagraphStyle, TextPathConfig, TextStyle};
pub use template::{MockupTemplate, ProductType};
