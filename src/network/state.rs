use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::FormatError;
use crate::network::topology::Topology;

/// Layout of the values in a state dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFormat {
    /// One activation per node, every layer, dense.
    Full,
    /// Sparse `(layer, i, j, value)` entries in any order.
    Compact,
}

impl StateFormat {
    /// Discriminator token used in the text format.
    pub const fn keyword(&self) -> &'static str {
        match self {
            StateFormat::Full => "full",
            StateFormat::Compact => "compact",
        }
    }

    pub fn from_keyword(token: &str) -> Option<StateFormat> {
        match token {
            "full" => Some(StateFormat::Full),
            "compact" => Some(StateFormat::Compact),
            _ => None,
        }
    }
}

impl fmt::Display for StateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One sparse activation record.
///
/// `j` is kept verbatim; it mirrors the weight addressing scheme and the
/// renderer reads it as the source node in layer `layer - 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompactEntry {
    pub layer: usize,
    pub i: usize,
    pub j: usize,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValues {
    /// `values[l][i]` for every node of every layer.
    Full(Vec<Vec<f64>>),
    /// Entries in insertion order.
    Compact(Vec<CompactEntry>),
}

/// Per-node activation snapshot of a network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateJson", into = "StateJson")]
pub struct StateModel {
    topology: Topology,
    values: StateValues,
}

impl StateModel {
    /// Dense snapshot; `values[l]` must hold exactly `layer_sizes[l]` values.
    pub fn full(topology: Topology, values: Vec<Vec<f64>>) -> Result<StateModel, FormatError> {
        let sizes = topology.layer_sizes();
        if values.len() != sizes.len() {
            return Err(FormatError::mismatch("state layers", sizes.len(), values.len()));
        }
        for (l, (layer, &size)) in values.iter().zip(sizes).enumerate() {
            if layer.len() != size {
                return Err(FormatError::mismatch(format!("state values of layer {}", l), size, layer.len()));
            }
            FormatError::check_finite(format!("state values of layer {}", l), layer)?;
        }
        Ok(StateModel {
            topology,
            values: StateValues::Full(values),
        })
    }

    /// Sparse snapshot; each entry must name an existing `(layer, i)` node
    /// and carry a finite value.
    pub fn compact(topology: Topology, entries: Vec<CompactEntry>) -> Result<StateModel, FormatError> {
        if let Some(bad) = entries.iter().find(|e| !topology.contains(e.layer, e.i)) {
            return Err(FormatError::NodeOutOfRange {
                layer: bad.layer,
                node: bad.i,
            });
        }
        FormatError::check_finite("compact entries", entries.iter().map(|e| &e.value))?;
        Ok(StateModel {
            topology,
            values: StateValues::Compact(entries),
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn format(&self) -> StateFormat {
        match self.values {
            StateValues::Full(_) => StateFormat::Full,
            StateValues::Compact(_) => StateFormat::Compact,
        }
    }

    pub fn values(&self) -> &StateValues {
        &self.values
    }

    /// Compact entries, or `None` for a full snapshot.
    pub fn compact_entries(&self) -> Option<&[CompactEntry]> {
        match &self.values {
            StateValues::Compact(entries) => Some(entries),
            StateValues::Full(_) => None,
        }
    }

    /// Number of values carried, whatever the format.
    pub fn value_count(&self) -> usize {
        match &self.values {
            StateValues::Full(values) => values.iter().map(Vec::len).sum(),
            StateValues::Compact(entries) => entries.len(),
        }
    }

    /// Iterates every carried value in dump order.
    pub fn scalars(&self) -> Box<dyn Iterator<Item = f64> + '_> {
        match &self.values {
            StateValues::Full(values) => Box::new(values.iter().flatten().copied()),
            StateValues::Compact(entries) => Box::new(entries.iter().map(|e| e.value)),
        }
    }

    pub fn summary(&self) -> String {
        let layers = self
            .topology
            .layer_sizes()
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        let rule = "----------------------------------";
        format!(
            "{rule}\n  LAYERS: [{layers}]\n  FORMAT: {}\n  VALUES: {}\n{rule}",
            self.format(),
            self.value_count(),
        )
    }
}

#[derive(Serialize, Deserialize)]
struct StateJson {
    layers: Vec<usize>,
    format: StateFormat,
    values: StateValues,
}

impl TryFrom<StateJson> for StateModel {
    type Error = FormatError;

    fn try_from(json: StateJson) -> Result<Self, Self::Error> {
        let topology = Topology::new(json.layers)?;
        match (json.format, json.values) {
            (StateFormat::Full, StateValues::Full(values)) => StateModel::full(topology, values),
            (StateFormat::Compact, StateValues::Compact(entries)) => StateModel::compact(topology, entries),
            // an empty list deserialises as Full under `untagged`
            (StateFormat::Compact, StateValues::Full(values)) if values.is_empty() => {
                StateModel::compact(topology, Vec::new())
            }
            (expected, values) => {
                let found = match values {
                    StateValues::Full(_) => StateFormat::Full,
                    StateValues::Compact(_) => StateFormat::Compact,
                };
                Err(FormatError::UnexpectedStateFormat { expected, found })
            }
        }
    }
}

impl From<StateModel> for StateJson {
    fn from(model: StateModel) -> Self {
        StateJson {
            format: model.format(),
            layers: model.topology.into(),
            values: model.values,
        }
    }
}
