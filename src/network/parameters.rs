use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::FormatError;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;

/// Initial biases and weights of a fresh network are drawn from this range.
pub const INIT_RANGE: (f64, f64) = (0.2, 0.4);

/// Network-wide training hyperparameters carried by every parameter dump.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hyperparameters {
    pub momentum: f64,
    pub learning_rate: f64,
    pub bias: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Hyperparameters {
            momentum: 0.3,
            learning_rate: 0.1,
            bias: -1.0,
        }
    }
}

/// Biases and incoming weights of one non-input layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerParameters {
    biases: Vec<f64>,
    weights: Matrix,
}

impl LayerParameters {
    /// `weights` has one row per node of this layer and one column per node
    /// of the previous layer. Shapes are checked by `ParameterModel::new`.
    pub fn new(biases: Vec<f64>, weights: Matrix) -> LayerParameters {
        LayerParameters { biases, weights }
    }

    pub fn biases(&self) -> &[f64] {
        &self.biases
    }

    pub fn weights(&self) -> &Matrix {
        &self.weights
    }
}

/// A complete trained network: topology, hyperparameters, biases, weights.
///
/// Immutable once built apart from the explicit arithmetic helpers; every
/// constructor checks that each table matches the topology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterJson", into = "ParameterJson")]
pub struct ParameterModel {
    topology: Topology,
    hyper: Hyperparameters,
    // layers[k] holds the parameters of network layer k + 1
    layers: Vec<LayerParameters>,
}

impl ParameterModel {
    pub fn new(
        topology: Topology,
        hyper: Hyperparameters,
        layers: Vec<LayerParameters>,
    ) -> Result<ParameterModel, FormatError> {
        let sizes = topology.layer_sizes();
        if layers.len() != sizes.len() - 1 {
            return Err(FormatError::mismatch("layer tables", sizes.len() - 1, layers.len()));
        }
        for (k, layer) in layers.iter().enumerate() {
            let l = k + 1;
            if layer.biases.len() != sizes[l] {
                return Err(FormatError::mismatch(
                    format!("bias table of layer {}", l),
                    sizes[l],
                    layer.biases.len(),
                ));
            }
            if layer.weights.rows != sizes[l] || layer.weights.cols != sizes[l - 1] {
                return Err(FormatError::mismatch(
                    format!("weight table of layer {}", l),
                    topology.weight_count(l).unwrap_or(usize::MAX),
                    layer.weights.len(),
                ));
            }
            FormatError::check_finite(format!("bias table of layer {}", l), &layer.biases)?;
            let weights = layer.weights.data.iter().flatten();
            FormatError::check_finite(format!("weight table of layer {}", l), weights)?;
        }
        FormatError::check_finite("hyperparameters", &[hyper.momentum, hyper.learning_rate, hyper.bias])?;
        Ok(ParameterModel { topology, hyper, layers })
    }

    /// Fresh network with every bias and weight drawn from [`INIT_RANGE`].
    /// Fails only on non-finite hyperparameters.
    pub fn random<R: Rng + ?Sized>(
        topology: Topology,
        hyper: Hyperparameters,
        rng: &mut R,
    ) -> Result<ParameterModel, FormatError> {
        let (low, high) = INIT_RANGE;
        let layers = topology
            .layer_sizes()
            .windows(2)
            .map(|pair| {
                let biases = (0..pair[1]).map(|_| rng.gen_range(low..high)).collect();
                LayerParameters::new(biases, Matrix::uniform(pair[1], pair[0], low, high, rng))
            })
            .collect();
        ParameterModel::new(topology, hyper, layers)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn hyperparameters(&self) -> Hyperparameters {
        self.hyper
    }

    pub fn momentum(&self) -> f64 {
        self.hyper.momentum
    }

    pub fn learning_rate(&self) -> f64 {
        self.hyper.learning_rate
    }

    pub fn bias(&self) -> f64 {
        self.hyper.bias
    }

    /// Parameters of layer `l`. The input layer has none.
    pub fn layer(&self, l: usize) -> Option<&LayerParameters> {
        l.checked_sub(1).and_then(|k| self.layers.get(k))
    }

    /// Iterates `(l, layer)` for every non-input layer.
    pub fn layers(&self) -> impl Iterator<Item = (usize, &LayerParameters)> + '_ {
        self.layers.iter().enumerate().map(|(k, layer)| (k + 1, layer))
    }

    /// Weight of the edge from node `j` of layer `l - 1` to node `i` of layer `l`.
    pub fn weight(&self, l: usize, i: usize, j: usize) -> Option<f64> {
        let layer = self.layer(l)?;
        layer.weights.data.get(i)?.get(j).copied()
    }

    /// Iterates `(l, i, j, weight)` in dump order.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize, usize, f64)> + '_ {
        self.layers()
            .flat_map(|(l, layer)| layer.weights.iter().map(move |(i, j, w)| (l, i, j, w)))
    }

    /// Element-wise `self += other` over biases and weights. Hyperparameters
    /// are left as they are.
    ///
    /// On error `self` is unchanged.
    pub fn try_add_assign(&mut self, other: &ParameterModel) -> Result<(), FormatError> {
        self.check_same_topology(other)?;
        let layers = self
            .layers
            .iter()
            .zip(other.layers.iter())
            .map(|(mine, theirs)| LayerParameters {
                biases: mine.biases.iter().zip(&theirs.biases).map(|(b, o)| b + o).collect(),
                weights: &mine.weights + &theirs.weights,
            })
            .collect();
        self.replace_layers(layers)
    }

    /// Element-wise `self -= other` over biases and weights.
    pub fn try_sub_assign(&mut self, other: &ParameterModel) -> Result<(), FormatError> {
        self.check_same_topology(other)?;
        let layers = self
            .layers
            .iter()
            .zip(other.layers.iter())
            .map(|(mine, theirs)| LayerParameters {
                biases: mine.biases.iter().zip(&theirs.biases).map(|(b, o)| b - o).collect(),
                weights: &mine.weights - &theirs.weights,
            })
            .collect();
        self.replace_layers(layers)
    }

    /// Divides every bias and weight by `n`, which must be finite and non-zero.
    pub fn div_assign_scalar(&mut self, n: f64) -> Result<(), FormatError> {
        if n == 0.0 || !n.is_finite() {
            return Err(FormatError::InvalidDivisor(n));
        }
        let layers = self
            .layers
            .iter()
            .map(|layer| LayerParameters {
                biases: layer.biases.iter().map(|b| b / n).collect(),
                weights: layer.weights.map(|w| w / n),
            })
            .collect();
        self.replace_layers(layers)
    }

    // Arithmetic can still overflow to infinity; such a result is dropped.
    fn replace_layers(&mut self, layers: Vec<LayerParameters>) -> Result<(), FormatError> {
        for (k, layer) in layers.iter().enumerate() {
            FormatError::check_finite(format!("bias table of layer {}", k + 1), &layer.biases)?;
            let weights = layer.weights.data.iter().flatten();
            FormatError::check_finite(format!("weight table of layer {}", k + 1), weights)?;
        }
        self.layers = layers;
        Ok(())
    }

    /// Element-wise mean of several networks sharing one topology. The
    /// hyperparameters of the first model are kept.
    pub fn average(models: &[ParameterModel]) -> Result<ParameterModel, FormatError> {
        let (first, rest) = models.split_first().ok_or(FormatError::EmptyTopology)?;
        let mut acc = first.clone();
        for model in rest {
            acc.try_add_assign(model)?;
        }
        acc.div_assign_scalar(models.len() as f64)?;
        Ok(acc)
    }

    fn check_same_topology(&self, other: &ParameterModel) -> Result<(), FormatError> {
        if self.topology == other.topology {
            return Ok(());
        }
        let mine = self.topology.layer_sizes();
        let theirs = other.topology.layer_sizes();
        // report the first layer that differs, or the layer count
        match mine.iter().zip(theirs.iter()).position(|(a, b)| a != b) {
            Some(l) => Err(FormatError::mismatch(format!("operand layer {}", l), mine[l], theirs[l])),
            None => Err(FormatError::mismatch("operand layer count", mine.len(), theirs.len())),
        }
    }

    /// Human-readable banner describing the network.
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
            "{rule}\n  LAYERS: [{layers}]\n  MOMENTUM: {}\n  LEARNING RATE: {}\n  BIAS: {}\n  WEIGHTS: {}\n{rule}",
            self.hyper.momentum,
            self.hyper.learning_rate,
            self.hyper.bias,
            self.edges().count(),
        )
    }
}

/// JSON shape of a parameter model. Biases and weights are indexed by layer
/// with empty entries for the input layer.
#[derive(Serialize, Deserialize)]
struct ParameterJson {
    layers: Vec<usize>,
    momentum: f64,
    learning_rate: f64,
    bias: f64,
    biases: Vec<Vec<f64>>,
    weights: Vec<Vec<Vec<f64>>>,
}

impl TryFrom<ParameterJson> for ParameterModel {
    type Error = FormatError;

    fn try_from(json: ParameterJson) -> Result<Self, Self::Error> {
        let topology = Topology::new(json.layers)?;
        let n = topology.layer_count();
        if json.biases.len() != n {
            return Err(FormatError::mismatch("biases", n, json.biases.len()));
        }
        if json.weights.len() != n {
            return Err(FormatError::mismatch("weights", n, json.weights.len()));
        }
        if !json.biases[0].is_empty() || !json.weights[0].is_empty() {
            let found = json.biases[0].len().max(json.weights[0].len());
            return Err(FormatError::mismatch("input layer parameters", 0, found));
        }

        let sizes = topology.layer_sizes().to_vec();
        let mut layers = Vec::with_capacity(n - 1);
        for (l, (biases, rows)) in json.biases.into_iter().zip(json.weights).enumerate().skip(1) {
            let found = rows.iter().map(Vec::len).sum();
            let weights = Matrix::from_rows(rows, sizes[l - 1]).ok_or_else(|| {
                FormatError::mismatch(
                    format!("weight table of layer {}", l),
                    topology.weight_count(l).unwrap_or(usize::MAX),
                    found,
                )
            })?;
            layers.push(LayerParameters::new(biases, weights));
        }

        let hyper = Hyperparameters {
            momentum: json.momentum,
            learning_rate: json.learning_rate,
            bias: json.bias,
        };
        ParameterModel::new(topology, hyper, layers)
    }
}

impl From<ParameterModel> for ParameterJson {
    fn from(model: ParameterModel) -> Self {
        let mut biases = vec![Vec::new()];
        let mut weights = vec![Vec::new()];
        for layer in model.layers {
            biases.push(layer.biases);
            weights.push(layer.weights.data);
        }
        ParameterJson {
            layers: model.topology.into(),
            momentum: model.hyper.momentum,
            learning_rate: model.hyper.learning_rate,
            bias: model.hyper.bias,
            biases,
            weights,
        }
    }
}
