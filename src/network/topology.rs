use serde::{Deserialize, Serialize};

use crate::error::FormatError;

/// Layer-size sequence of a feed-forward network, input layer first.
///
/// Zero-sized layers are tolerated: they own no nodes, no biases and no
/// weights. A topology always has at least one layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    layer_sizes: Vec<usize>,
}

impl Topology {
    pub fn new(layer_sizes: Vec<usize>) -> Result<Topology, FormatError> {
        if layer_sizes.is_empty() {
            return Err(FormatError::EmptyTopology);
        }
        Ok(Topology { layer_sizes })
    }

    pub fn layer_count(&self) -> usize {
        self.layer_sizes.len()
    }

    pub fn layer_sizes(&self) -> &[usize] {
        &self.layer_sizes
    }

    /// Size of layer `l`, or `None` past the output layer.
    pub fn size(&self, l: usize) -> Option<usize> {
        self.layer_sizes.get(l).copied()
    }

    /// Total node count across every layer, input layer included, or `None`
    /// when it overflows `usize`.
    pub fn node_count(&self) -> Option<usize> {
        self.layer_sizes.iter().try_fold(0usize, |acc, &size| acc.checked_add(size))
    }

    /// Number of weights feeding layer `l` (`0` for the input layer), or
    /// `None` when it overflows `usize`.
    pub fn weight_count(&self, l: usize) -> Option<usize> {
        if l == 0 || l >= self.layer_sizes.len() {
            return Some(0);
        }
        self.layer_sizes[l].checked_mul(self.layer_sizes[l - 1])
    }

    /// Number of scalars a parameter dump carries after its header: one bias
    /// plus one weight per source node, for every non-input node.
    ///
    /// `None` when the count does not fit in `usize`, which no real input can
    /// satisfy anyway.
    pub fn parameter_body_len(&self) -> Option<usize> {
        self.layer_sizes.windows(2).try_fold(0usize, |acc, pair| {
            let per_node = pair[0].checked_add(1)?;
            acc.checked_add(pair[1].checked_mul(per_node)?)
        })
    }

    /// `true` when `(layer, node)` addresses an existing node.
    pub fn contains(&self, layer: usize, node: usize) -> bool {
        self.size(layer).is_some_and(|size| node < size)
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = FormatError;

    fn try_from(layer_sizes: Vec<usize>) -> Result<Self, Self::Error> {
        Topology::new(layer_sizes)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Self {
        topology.layer_sizes
    }
}
