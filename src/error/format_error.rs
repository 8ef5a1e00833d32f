use thiserror::Error;

use crate::network::state::StateFormat;

/// Everything that can go wrong while turning dump text (or JSON) into a model.
///
/// `position` fields are zero-based token indices into the whitespace-split
/// input, so a message can be traced back to the offending token.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("truncated input: expected {expected} at token {position}")]
    TruncatedInput {
        position: usize,
        expected: &'static str,
    },

    #[error("not a number: expected {expected} at token {position}, got `{token}`")]
    NotANumber {
        position: usize,
        token: String,
        expected: &'static str,
    },

    #[error("non-finite value `{token}` at token {position}")]
    NonFinite { position: usize, token: String },

    #[error("non-finite value in {table}")]
    NonFiniteValue { table: String },

    #[error("cannot divide parameters by {0}")]
    InvalidDivisor(f64),

    #[error("unknown state format `{0}` (expected `full` or `compact`)")]
    UnknownStateFormat(String),

    #[error("unexpected state format: wanted {expected}, found {found}")]
    UnexpectedStateFormat {
        expected: StateFormat,
        found: StateFormat,
    },

    #[error("topology mismatch in {table}: expected {expected} entries, found {found}")]
    TopologyMismatch {
        table: String,
        expected: usize,
        found: usize,
    },

    #[error("topology declares no layers")]
    EmptyTopology,

    #[error("node {node} does not exist in layer {layer}")]
    NodeOutOfRange { layer: usize, node: usize },
}

impl FormatError {
    pub(crate) fn mismatch(table: impl Into<String>, expected: usize, found: usize) -> Self {
        FormatError::TopologyMismatch {
            table: table.into(),
            expected,
            found,
        }
    }

    /// `Ok` when every value in `values` is finite.
    pub(crate) fn check_finite<'a>(
        table: impl Into<String>,
        values: impl IntoIterator<Item = &'a f64>,
    ) -> Result<(), Self> {
        if values.into_iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(FormatError::NonFiniteValue { table: table.into() })
        }
    }
}
