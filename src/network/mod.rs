pub mod parameters;
pub mod state;
pub mod topology;

pub use parameters::{Hyperparameters, LayerParameters, ParameterModel};
pub use state::{CompactEntry, StateFormat, StateModel, StateValues};
pub use topology::Topology;
