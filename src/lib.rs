pub mod codec;
pub mod error;
pub mod math;
pub mod network;
pub mod render;

// Convenience re-exports
pub use error::{FormatError, RenderError};
pub use math::matrix::Matrix;
pub use network::parameters::{Hyperparameters, LayerParameters, ParameterModel};
pub use network::state::{CompactEntry, StateFormat, StateModel, StateValues};
pub use network::topology::Topology;
pub use render::render_config::{BoundsMode, NormalizationBounds, RenderConfig};
pub use render::svg::{render_parameters, render_state, RenderedSvg};
