pub mod bounds;
pub mod color;
pub mod layout;
pub mod page;
pub mod render_config;
pub mod svg;

pub use bounds::{parameter_bounds, state_bounds};
pub use render_config::{BoundsMode, NormalizationBounds, RenderConfig};
pub use svg::{render_parameters, render_state, RenderedSvg};
