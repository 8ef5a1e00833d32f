use crate::network::parameters::ParameterModel;
use crate::network::state::StateModel;
use crate::render::render_config::{BoundsMode, NormalizationBounds};

/// Pre-run over every weight of the network. Biases do not take part.
pub fn parameter_bounds(model: &ParameterModel) -> NormalizationBounds {
    let bounds = NormalizationBounds::from_values(model.edges().map(|(_, _, _, w)| w));
    log::debug!("parameter pre-run: Wmin {} Wmax {}", bounds.min, bounds.max);
    bounds
}

/// Pre-run over every value carried by the snapshot.
pub fn state_bounds(model: &StateModel) -> NormalizationBounds {
    let bounds = NormalizationBounds::from_values(model.scalars());
    log::debug!("state pre-run: Wmin {} Wmax {}", bounds.min, bounds.max);
    bounds
}

/// Settles a `BoundsMode`, running `pre_run` only when asked to compute.
pub fn resolve<F>(mode: BoundsMode, pre_run: F) -> NormalizationBounds
where
    F: FnOnce() -> NormalizationBounds,
{
    match mode {
        BoundsMode::ComputeBounds => pre_run(),
        BoundsMode::UseSuppliedBounds(bounds) => bounds,
    }
}
