use clap::Parser;
use dual_rasterizer::app::{run_cli, run_gui};
use dual_rasterizer::error::RenderError;
use dual_rasterizer::io::config::Config;
use log::info;
use std::path::PathBuf;

/// Software / hardware dual rasterizer.
#[derive(Parser, Debug)]
#[command(name = "dual-rasterizer", version, about)]
struct Cli {
    /// Configuration file (TOML). Built-in defaults are used when absent.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Render without opening a window and save the result.
    #[arg(long)]
    headless: bool,

    /// Frames to render in headless mode.
    #[arg(long, default_value_t = 1)]
    frames: usize,

    /// Output image for headless mode (format from the extension).
    #[arg(short, long, value_name = "FILE", default_value = "output.png")]
    output: PathBuf,
}

fn main() -> Result<(), RenderError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            Config::load(path)?
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    };

    if cli.headless {
        run_cli(config, cli.frames, &cli.output)
    } else {
        run_gui(config, cli.config.as_deref())
    }
}
