//! terraflight - a heightmap flight-simulation demo
//!
//! A plane flies over tiled heightmap terrain, viewed through a chase
//! camera, with fog, directional lighting, and a sky gradient.

mod config;
mod game;
mod input;
mod scripted_controls;

use anyhow::Result;
use config::GameConfig;
use game::{GameAction, GameWorld};
use scripted_controls::ScriptedControls;
use std::path::PathBuf;
use tracing::info;
use winit::event_loop::{ControlFlow, EventLoop};

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (override via RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting terraflight v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(std::env::args().skip(1))?;
    if cli.help {
        print_help();
        return Ok(());
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::load_from_path(path),
        None => GameConfig::load(),
    };
    if let Some((width, height)) = cli.resolution {
        config.window.width = width;
        config.window.height = height;
    }

    let script = cli
        .script
        .as_deref()
        .map(ScriptedControls::from_path)
        .transpose()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut game = GameWorld::new(&event_loop, config, script, cli.max_ticks)?;

    event_loop.run(move |event, elwt| {
        if let GameAction::Quit = game.handle_event(&event, elwt) {
            info!("Quitting");
            elwt.exit();
        }
    })?;

    Ok(())
}

/// Command-line options.
#[derive(Debug, Default)]
struct CliOptions {
    help: bool,
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    max_ticks: Option<u64>,
    resolution: Option<(u32, u32)>,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut width: Option<u32> = None;
        let mut height: Option<u32> = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => options.help = true,
                "--config" => options.config = Some(PathBuf::from(required(&mut args, &arg)?)),
                "--script" => options.script = Some(PathBuf::from(required(&mut args, &arg)?)),
                "--max-ticks" => {
                    options.max_ticks = Some(required(&mut args, &arg)?.parse()?);
                }
                "--width" => width = Some(required(&mut args, &arg)?.parse()?),
                "--height" => height = Some(required(&mut args, &arg)?.parse()?),
                other => anyhow::bail!("unknown argument: {other} (try --help)"),
            }
        }

        options.resolution = match (width, height) {
            (Some(w), Some(h)) => Some((w, h)),
            (None, None) => None,
            _ => anyhow::bail!("--width and --height must be set together"),
        };

        Ok(options)
    }
}

fn required(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))
}

fn print_help() {
    println!(
        "terraflight - a heightmap flight-simulation demo

USAGE:
    terraflight [OPTIONS]

OPTIONS:
    --config <PATH>      Config file (default: {})
    --script <PATH>      Play a JSON control script instead of the keyboard
    --max-ticks <N>      Exit after N simulation ticks (for automation)
    --width <W>          Window width (requires --height)
    --height <H>         Window height (requires --width)
    -h, --help           Show this help",
        config::DEFAULT_CONFIG_PATH
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_empty_args() {
        let options = parse(&[]).unwrap();
        assert!(options.config.is_none());
        assert!(options.max_ticks.is_none());
    }

    #[test]
    fn parses_flags() {
        let options = parse(&[
            "--config",
            "custom.toml",
            "--max-ticks",
            "600",
            "--width",
            "800",
            "--height",
            "600",
        ])
        .unwrap();
        assert_eq!(options.config.as_deref(), Some(Path::new("custom.toml")));
        assert_eq!(options.max_ticks, Some(600));
        assert_eq!(options.resolution, Some((800, 600)));
    }

    #[test]
    fn rejects_unknown_and_incomplete_args() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--width", "800"]).is_err());
    }
}
