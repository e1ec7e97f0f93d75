use clap::Parser;
use dual_rasterizer::app;
use dual_rasterizer::io::config::Config;
use log::{error, info};
use std::process::ExitCode;

/// Software rasterizer for a textured, normal-mapped mesh.
#[derive(Parser, Debug)]
#[command(name = "dual-rasterizer", version)]
struct Cli {
    /// Configuration file (TOML). Defaults apply when omitted.
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Frames to render in headless mode.
    #[arg(short, long)]
    frames: Option<u32>,

    /// Output image path for headless mode.
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Render without opening a window.
    #[arg(long)]
    headless: bool,
}

fn load_config(cli: &Cli) -> Result<Config, String> {
    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading config: {}", path);
            Config::load(path).map_err(|e| e.to_string())?
        }
        None => {
            info!("No config file given, using defaults.");
            Config::default()
        }
    };
    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }
    if let Some(output) = &cli.output {
        config.render.output = output.clone();
    }
    Ok(config)
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(&cli)?;

    #[cfg(feature = "gui")]
    if !cli.headless {
        return app::run_gui(&config).map_err(|e| e.to_string());
    }
    #[cfg(not(feature = "gui"))]
    if !cli.headless {
        info!("Built without the `gui` feature; rendering headless.");
    }

    app::run_cli(&config).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
