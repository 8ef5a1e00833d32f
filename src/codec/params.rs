//! Text codec for full parameter dumps.
//!
//! ```text
//! <layer_count> <size_0> ... <size_{n-1}>
//! <momentum> <learning_rate> <bias>
//! for l in 1..n, for i in 0..size_l:
//!     <bias_l_i> <weight_l_i_0> ... <weight_l_i_{size_{l-1}-1}>
//! ```
//!
//! Everything is one line of space-separated tokens.

use crate::codec::tokens::{push_f64, push_topology, Tokens};
use crate::error::FormatError;
use crate::math::matrix::Matrix;
use crate::network::parameters::{Hyperparameters, LayerParameters, ParameterModel};

pub fn decode(text: &str) -> Result<ParameterModel, FormatError> {
    let mut tokens = Tokens::new(text);
    let topology = tokens.topology()?;
    let hyper = Hyperparameters {
        momentum: tokens.next_f64("momentum")?,
        learning_rate: tokens.next_f64("learning rate")?,
        bias: tokens.next_f64("bias")?,
    };

    // The body length is fixed by the topology; check it before reading so a
    // short or long table is reported as such rather than as a stray token.
    let found = tokens.remaining();
    let expected = topology
        .parameter_body_len()
        .ok_or_else(|| FormatError::mismatch("parameter body", usize::MAX, found))?;
    if found != expected {
        return Err(FormatError::mismatch("parameter body", expected, found));
    }

    let sizes = topology.layer_sizes().to_vec();
    let mut layers = Vec::with_capacity(sizes.len() - 1);
    for l in 1..sizes.len() {
        let mut biases = Vec::with_capacity(sizes[l]);
        let mut weights = Matrix::zeros(sizes[l], sizes[l - 1]);
        for i in 0..sizes[l] {
            biases.push(tokens.next_f64("bias value")?);
            for j in 0..sizes[l - 1] {
                weights.data[i][j] = tokens.next_f64("weight value")?;
            }
        }
        layers.push(LayerParameters::new(biases, weights));
    }

    log::debug!(
        "decoded parameter dump: layers {:?}, {} scalars",
        topology.layer_sizes(),
        expected
    );
    ParameterModel::new(topology, hyper, layers)
}

pub fn encode(model: &ParameterModel) -> String {
    let mut out = String::new();
    push_topology(&mut out, model.topology());
    push_f64(&mut out, model.momentum());
    push_f64(&mut out, model.learning_rate());
    push_f64(&mut out, model.bias());
    for (_, layer) in model.layers() {
        for (i, &bias) in layer.biases().iter().enumerate() {
            push_f64(&mut out, bias);
            for &w in layer.weights().row(i) {
                push_f64(&mut out, w);
            }
        }
    }
    out
}

impl std::str::FromStr for ParameterModel {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode(s)
    }
}
