use std::fmt::Write;

use crate::error::RenderError;
use crate::network::parameters::ParameterModel;
use crate::network::state::{StateFormat, StateModel};
use crate::render::bounds::{parameter_bounds, resolve, state_bounds};
use crate::render::color::{diverging, Rgb};
use crate::render::layout::Layout;
use crate::render::render_config::{NormalizationBounds, RenderConfig, STROKE_WIDTH};

/// One segment that passed the threshold filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
    pub color: Rgb,
}

/// A finished SVG document plus what went into it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSvg {
    pub document: String,
    /// Number of `<line>` elements in `document`.
    pub edges: usize,
    /// Values that passed the threshold but had no place on the canvas.
    pub skipped: usize,
    pub bounds: NormalizationBounds,
}

/// Draws every weight with `|w| > threshold` as a segment from its source
/// node to its destination node.
pub fn render_parameters(model: &ParameterModel, config: &RenderConfig) -> Result<RenderedSvg, RenderError> {
    config.validate()?;
    let bounds = resolve(config.bounds, || parameter_bounds(model));
    let layout = Layout::new(config.width, config.height, model.topology());

    let mut edges = Vec::new();
    for (l, i, j, w) in model.edges() {
        if w.abs() <= config.threshold {
            continue;
        }
        let (x1, y1, x2, y2) = layout.segment(l, i, j)?;
        edges.push(Edge { x1, y1, x2, y2, color: diverging(w, bounds) });
    }

    log::debug!(
        "rendered parameters: {} of {} edges above {}",
        edges.len(),
        model.edges().count(),
        config.threshold
    );
    Ok(finish(config, edges, 0, bounds))
}

/// Draws a compact activation snapshot. Entry `(l, i, j, v)` becomes a
/// segment from node `j` of layer `l - 1` to node `i` of layer `l`.
///
/// Full snapshots are refused with `UnsupportedStateFormat`.
pub fn render_state(model: &StateModel, config: &RenderConfig) -> Result<RenderedSvg, RenderError> {
    let entries = model
        .compact_entries()
        .ok_or(RenderError::UnsupportedStateFormat(StateFormat::Full))?;
    config.validate()?;
    let bounds = resolve(config.bounds, || state_bounds(model));
    let topology = model.topology();
    let layout = Layout::new(config.width, config.height, topology);

    let mut edges = Vec::new();
    let mut skipped = 0;
    for entry in entries {
        if entry.value.abs() <= config.threshold {
            continue;
        }
        if entry.layer == 0 || !topology.contains(entry.layer - 1, entry.j) {
            log::warn!(
                "skipping state entry ({}, {}, {}): no source node {} in the previous layer",
                entry.layer,
                entry.i,
                entry.j,
                entry.j
            );
            skipped += 1;
            continue;
        }
        let (x1, y1, x2, y2) = layout.segment(entry.layer, entry.i, entry.j)?;
        edges.push(Edge { x1, y1, x2, y2, color: diverging(entry.value, bounds) });
    }

    log::debug!(
        "rendered state: {} of {} entries above {}, {} skipped",
        edges.len(),
        entries.len(),
        config.threshold,
        skipped
    );
    Ok(finish(config, edges, skipped, bounds))
}

fn finish(config: &RenderConfig, edges: Vec<Edge>, skipped: usize, bounds: NormalizationBounds) -> RenderedSvg {
    RenderedSvg {
        document: document(config.width, config.height, &edges),
        edges: edges.len(),
        skipped,
        bounds,
    }
}

/// Serialises the collected segments; never fails.
fn document(width: u32, height: u32, edges: &[Edge]) -> String {
    let mut svg = String::with_capacity(96 + edges.len() * 96);
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        width, height
    );
    for e in edges {
        let _ = writeln!(
            svg,
            "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" style=\"stroke:{};stroke-width:{}\" />",
            e.x1, e.y1, e.x2, e.y2, e.color, STROKE_WIDTH
        );
    }
    svg.push_str("</svg>\n");
    svg
}
