//! Text codec for activation snapshots.
//!
//! ```text
//! <layer_count> <size_0> ... <size_{n-1}> full    <value_0_0> ... (every node, layer-major)
//! <layer_count> <size_0> ... <size_{n-1}> compact (<layer> <i> <j> <value>)*
//! ```

use crate::codec::tokens::{push_f64, push_topology, push_usize, push_word, Tokens};
use crate::error::FormatError;
use crate::network::state::{CompactEntry, StateFormat, StateModel, StateValues};

/// Decodes a state dump. When `expected_format` is given, a dump in the other
/// format is rejected with `UnexpectedStateFormat`.
pub fn decode(text: &str, expected_format: Option<StateFormat>) -> Result<StateModel, FormatError> {
    let mut tokens = Tokens::new(text);
    let topology = tokens.topology()?;

    let keyword = tokens.next_token("state format")?;
    let format = StateFormat::from_keyword(keyword)
        .ok_or_else(|| FormatError::UnknownStateFormat(keyword.to_owned()))?;
    if let Some(expected) = expected_format {
        if expected != format {
            return Err(FormatError::UnexpectedStateFormat { expected, found: format });
        }
    }

    let model = match format {
        StateFormat::Full => {
            // nothing is allocated until the values are known to be present
            let found = tokens.remaining();
            let expected = topology
                .node_count()
                .ok_or_else(|| FormatError::mismatch("full state values", usize::MAX, found))?;
            if found != expected {
                return Err(FormatError::mismatch("full state values", expected, found));
            }
            let mut values = Vec::with_capacity(topology.layer_count());
            for &size in topology.layer_sizes() {
                let mut layer = Vec::with_capacity(size);
                for _ in 0..size {
                    layer.push(tokens.next_f64("activation value")?);
                }
                values.push(layer);
            }
            StateModel::full(topology, values)?
        }
        StateFormat::Compact => {
            let mut entries = Vec::with_capacity(tokens.remaining() / 4);
            while !tokens.is_empty() {
                entries.push(CompactEntry {
                    layer: tokens.next_usize("entry layer")?,
                    i: tokens.next_usize("entry node")?,
                    j: tokens.next_usize("entry source node")?,
                    value: tokens.next_f64("entry value")?,
                });
            }
            StateModel::compact(topology, entries)?
        }
    };

    log::debug!(
        "decoded {} state dump: layers {:?}, {} values",
        model.format(),
        model.topology().layer_sizes(),
        model.value_count()
    );
    Ok(model)
}

pub fn encode(model: &StateModel) -> String {
    let mut out = String::new();
    push_topology(&mut out, model.topology());
    push_word(&mut out, model.format().keyword());
    match model.values() {
        StateValues::Full(values) => {
            for &v in values.iter().flatten() {
                push_f64(&mut out, v);
            }
        }
        StateValues::Compact(entries) => {
            for e in entries {
                push_usize(&mut out, e.layer);
                push_usize(&mut out, e.i);
                push_usize(&mut out, e.j);
                push_f64(&mut out, e.value);
            }
        }
    }
    out
}

impl std::str::FromStr for StateModel {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s, None)
    }
}
