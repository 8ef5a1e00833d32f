/// ferrite-visu Studio
///
/// A small browser viewer for network dumps. Served by a synchronous
/// tiny_http server; the pages are plain HTML with inline SVG.
///
/// Run with:
///   cargo run --bin studio -- nn.out --state nn.state
/// Then open http://127.0.0.1:7878
///
/// Routes:
///   /             — network page
///   /network.svg  — raw network SVG
///   /state        — compact state page (404 without a state file)

mod routes;
mod state;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use clap::Parser;
use tiny_http::Server;

use state::StudioPages;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve rendered network dumps over HTTP")]
struct Args {
    /// Parameter dump
    net: PathBuf,
    /// Compact state dump
    #[arg(long)]
    state: Option<PathBuf>,
    #[arg(long, default_value = "127.0.0.1:7878")]
    addr: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let pages = Arc::new(StudioPages::load(&args.net, args.state.as_deref())?);
    let server = Server::http(&args.addr).map_err(|e| anyhow!("failed to bind {}: {}", args.addr, e))?;

    log::info!("ferrite-visu studio listening on http://{}", args.addr);

    // One thread per request, as the pages are immutable.
    for request in server.incoming_requests() {
        let pages = pages.clone();
        std::thread::spawn(move || {
            routes::dispatch(request, pages);
        });
    }
    Ok(())
}
