use thiserror::Error;

use crate::error::format_error::FormatError;
use crate::network::state::StateFormat;

/// Failures raised by the SVG renderer. Every one of them is detected before
/// the first byte of the document is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error("layer {layer} has {size} node(s); no per-node coordinate can be computed")]
    DegenerateLayer { layer: usize, size: usize },

    #[error("Compact format supported only (got `{0}` state)")]
    UnsupportedStateFormat(StateFormat),

    #[error("invalid render config: {0}")]
    InvalidConfig(String),
}
