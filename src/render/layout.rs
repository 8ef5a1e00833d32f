use crate::error::{FormatError, RenderError};
use crate::network::topology::Topology;

/// Screen placement of layers (columns) and nodes (rows) on the canvas.
pub struct Layout<'a> {
    width: u32,
    height: u32,
    topology: &'a Topology,
}

impl<'a> Layout<'a> {
    pub fn new(width: u32, height: u32, topology: &'a Topology) -> Layout<'a> {
        Layout { width, height, topology }
    }

    /// `floor(width / (layer_count - 1) * l)`; a lone layer sits mid-canvas.
    pub fn column_x(&self, l: usize) -> u32 {
        spread(self.width, self.topology.layer_count(), l)
    }

    /// `floor(height / (size - 1) * i)`; a lone node sits mid-canvas.
    pub fn node_y(&self, l: usize, i: usize) -> Result<u32, RenderError> {
        let size = self
            .topology
            .size(l)
            .ok_or(FormatError::NodeOutOfRange { layer: l, node: i })?;
        if size == 0 {
            return Err(RenderError::DegenerateLayer { layer: l, size });
        }
        if i >= size {
            return Err(FormatError::NodeOutOfRange { layer: l, node: i }.into());
        }
        Ok(spread(self.height, size, i))
    }

    /// Endpoints of the segment from node `j` of layer `l - 1` to node `i`
    /// of layer `l`, as `(x1, y1, x2, y2)`. The input layer has no incoming
    /// segments.
    pub fn segment(&self, l: usize, i: usize, j: usize) -> Result<(u32, u32, u32, u32), RenderError> {
        let source = l
            .checked_sub(1)
            .ok_or(FormatError::NodeOutOfRange { layer: l, node: i })?;
        Ok((
            self.column_x(source),
            self.node_y(source, j)?,
            self.column_x(l),
            self.node_y(l, i)?,
        ))
    }
}

fn spread(extent: u32, count: usize, index: usize) -> u32 {
    if count <= 1 {
        return extent / 2;
    }
    (extent as f64 / (count - 1) as f64 * index as f64).floor() as u32
}
