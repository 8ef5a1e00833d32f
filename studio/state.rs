use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ferrite_visu::codec::{params, state};
use ferrite_visu::render::page::render_page;
use ferrite_visu::{render_parameters, render_state, RenderConfig, RenderError, RenderedSvg};

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// Everything the viewer serves, rendered once at start-up.
///
/// Rendering is pure, so the pages never change while the server runs and
/// request threads share them without locking.
#[derive(Debug)]
pub struct StudioPages {
    pub network_page: String,
    pub network_svg: String,
    /// `None` when no state file was given or it was not compact.
    pub state_page: Option<String>,
}

pub type SharedPages = Arc<StudioPages>;

impl StudioPages {
    pub fn load(net_path: &Path, state_path: Option<&Path>) -> Result<StudioPages> {
        let text = fs::read_to_string(net_path).with_context(|| format!("reading {}", net_path.display()))?;
        let model = params::decode(&text).with_context(|| format!("decoding {}", net_path.display()))?;
        let rendered = render_parameters(&model, &RenderConfig::for_parameters())?;
        let network_page = page_for(net_path, &rendered);

        let state_page = match state_path {
            Some(path) => {
                let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
                let snapshot = state::decode(&text, None).with_context(|| format!("decoding {}", path.display()))?;
                match render_state(&snapshot, &RenderConfig::for_state()) {
                    Ok(rendered) => Some(page_for(path, &rendered)),
                    Err(RenderError::UnsupportedStateFormat(_)) => {
                        log::warn!("Compact format supported only; {} is not served", path.display());
                        None
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            None => None,
        };

        Ok(StudioPages {
            network_page,
            network_svg: rendered.document,
            state_page,
        })
    }
}

fn page_for(path: &Path, rendered: &RenderedSvg) -> String {
    let caption = format!(
        "{} edges drawn, bounds [{}, {}]",
        rendered.edges, rendered.bounds.min, rendered.bounds.max
    );
    render_page(&path.display().to_string(), &caption, &rendered.document)
}
