// Command-line front end over the ferrite-visu library.
// Run with:
//   cargo run -- visu-nn nn.out > nn.svg
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};

use ferrite_visu::codec::{params, state};
use ferrite_visu::render::page::render_page;
use ferrite_visu::render::{parameter_bounds, state_bounds};
use ferrite_visu::{
    render_parameters, render_state, BoundsMode, Hyperparameters, NormalizationBounds, ParameterModel,
    RenderConfig, RenderError, RenderedSvg, StateFormat, StateModel, Topology,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Decode, inspect and draw feed-forward network dumps")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a parameter dump with the default weight scale
    Visu {
        /// Parameter dump as written by the engine's `to_string`
        net: PathBuf,
        /// State dump; decoded for validation, overlays are not drawn
        state: Option<PathBuf>,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Render a parameter dump, or only report its weight bounds
    VisuNn {
        net: PathBuf,
        /// Print Wmin/Wmax instead of rendering
        #[arg(long)]
        pre_run: bool,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Render a compact state dump
    VisuState {
        state: PathBuf,
        /// Print Wmin/Wmax instead of rendering
        #[arg(long)]
        pre_run: bool,
        #[command(flatten)]
        canvas: CanvasArgs,
    },
    /// Print a dump as JSON
    ToJson {
        file: PathBuf,
        /// Treat the file as a state dump
        #[arg(long)]
        state: bool,
    },
    /// Print a short summary of a dump
    Inspect {
        file: PathBuf,
        /// Treat the file as a state dump
        #[arg(long)]
        state: bool,
    },
    /// Write a freshly initialised parameter dump
    Generate {
        /// Layer sizes, input layer first
        #[arg(required = true)]
        layers: Vec<usize>,
        #[arg(long, default_value = "0.3", allow_hyphen_values = true)]
        momentum: f64,
        #[arg(long, default_value = "0.1", allow_hyphen_values = true)]
        learning_rate: f64,
        #[arg(long, default_value = "-1.0", allow_hyphen_values = true)]
        bias: f64,
        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Average several parameter dumps sharing one topology
    Average {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
}

/// Canvas and colour-scale overrides shared by the render commands.
#[derive(Args, Debug)]
struct CanvasArgs {
    /// JSON render config used as the base instead of the built-in defaults
    #[arg(long)]
    config: Option<String>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Draw only values with |v| above this
    #[arg(long)]
    threshold: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    wmin: Option<f64>,
    #[arg(long, allow_hyphen_values = true)]
    wmax: Option<f64>,
    /// Run the bounds pre-pass instead of using supplied bounds
    #[arg(long, conflicts_with_all = ["wmin", "wmax"])]
    compute_bounds: bool,
    /// Wrap the SVG in an HTML page
    #[arg(long)]
    html: bool,
}

impl CanvasArgs {
    fn resolve(&self, defaults: RenderConfig) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load_json(path).with_context(|| format!("loading render config {}", path))?,
            None => defaults,
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(threshold) = self.threshold {
            config.threshold = threshold;
        }
        if self.compute_bounds {
            config.bounds = BoundsMode::ComputeBounds;
        } else if self.wmin.is_some() || self.wmax.is_some() {
            let base = match config.bounds {
                BoundsMode::UseSuppliedBounds(b) => b,
                BoundsMode::ComputeBounds => NormalizationBounds::new(0.0, 0.0),
            };
            config.bounds = BoundsMode::UseSuppliedBounds(NormalizationBounds::new(
                self.wmin.unwrap_or(base.min),
                self.wmax.unwrap_or(base.max),
            ));
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Visu { net, state, canvas } => {
            let model = read_parameters(&net)?;
            if let Some(path) = state {
                let snapshot = read_state(&path)?;
                log::warn!(
                    "state overlay from {} ({} values) is not drawn",
                    path.display(),
                    snapshot.value_count()
                );
            }
            let config = canvas.resolve(RenderConfig::for_parameters())?;
            let rendered = render_parameters(&model, &config)?;
            print!("{}", rendered_text(&rendered, canvas.html, &net));
        }
        Command::VisuNn { net, pre_run, canvas } => {
            let model = read_parameters(&net)?;
            if pre_run {
                println!("PRE-RUN:");
                println!("momentum: {}", model.momentum());
                println!("bias : {}", model.bias());
                print!("{}", bounds_text(parameter_bounds(&model)));
                return Ok(());
            }
            let config = canvas.resolve(RenderConfig::for_parameters())?;
            let rendered = render_parameters(&model, &config)?;
            print!("{}", rendered_text(&rendered, canvas.html, &net));
        }
        Command::VisuState { state, pre_run, canvas } => {
            let snapshot = read_state(&state)?;
            let config = if pre_run {
                None
            } else {
                Some(canvas.resolve(RenderConfig::for_state())?)
            };
            let report = visu_state(&snapshot, config.as_ref(), canvas.html, &state)?;
            print!("{}", report.stdout);
            eprint!("{}", report.stderr);
        }
        Command::ToJson { file, state } => {
            let json = if state {
                serde_json::to_string_pretty(&read_state(&file)?)?
            } else {
                serde_json::to_string_pretty(&read_parameters(&file)?)?
            };
            println!("{}", json);
        }
        Command::Inspect { file, state } => {
            if state {
                println!("{}", read_state(&file)?.summary());
            } else {
                println!("{}", read_parameters(&file)?.summary());
            }
        }
        Command::Generate { layers, momentum, learning_rate, bias, seed } => {
            let topology = Topology::new(layers)?;
            let hyper = Hyperparameters { momentum, learning_rate, bias };
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let model = ParameterModel::random(topology, hyper, &mut rng)?;
            println!("{}", params::encode(&model));
        }
        Command::Average { files } => {
            let models = files.iter().map(|f| read_parameters(f)).collect::<Result<Vec<_>>>()?;
            let averaged = ParameterModel::average(&models)?;
            log::info!("averaged {} parameter dumps", models.len());
            println!("{}", params::encode(&averaged));
        }
    }
    Ok(())
}

fn read_parameters(path: &Path) -> Result<ParameterModel> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    params::decode(&text).with_context(|| format!("decoding parameter dump {}", path.display()))
}

fn read_state(path: &Path) -> Result<StateModel> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    state::decode(&text, None).with_context(|| format!("decoding state dump {}", path.display()))
}

fn bounds_text(bounds: NormalizationBounds) -> String {
    format!("Wmax : {}\nWmin : {}\n", bounds.max, bounds.min)
}

const COMPACT_ONLY: &str = "Compact format supported only";

/// What a command writes to stdout and stderr.
#[derive(Debug, Default, PartialEq)]
struct Report {
    stdout: String,
    stderr: String,
}

impl Report {
    fn out(stdout: String) -> Report {
        Report { stdout, ..Report::default() }
    }

    fn compact_only() -> Report {
        Report {
            stderr: format!("{}\n", COMPACT_ONLY),
            ..Report::default()
        }
    }
}

/// `visu-state`: renders a compact snapshot, or runs the pre-pass when
/// `config` is `None`. A full snapshot yields only the stderr notice and
/// the command still exits 0.
fn visu_state(
    snapshot: &StateModel,
    config: Option<&RenderConfig>,
    html: bool,
    source: &Path,
) -> Result<Report, RenderError> {
    let Some(config) = config else {
        if snapshot.format() != StateFormat::Compact {
            return Ok(Report::compact_only());
        }
        return Ok(Report::out(format!("PRE-RUN:\n{}", bounds_text(state_bounds(snapshot)))));
    };
    match render_state(snapshot, config) {
        Ok(rendered) => Ok(Report::out(rendered_text(&rendered, html, source))),
        Err(RenderError::UnsupportedStateFormat(_)) => Ok(Report::compact_only()),
        Err(e) => Err(e),
    }
}

fn rendered_text(rendered: &RenderedSvg, html: bool, source: &Path) -> String {
    log::info!(
        "{}: {} edges drawn, {} skipped, bounds [{}, {}]",
        source.display(),
        rendered.edges,
        rendered.skipped,
        rendered.bounds.min,
        rendered.bounds.max
    );
    if html {
        let caption = format!("{} edges, bounds [{}, {}]", rendered.edges, rendered.bounds.min, rendered.bounds.max);
        render_page(&source.display().to_string(), &caption, &rendered.document)
    } else {
        rendered.document.clone()
    }
}
