//! Windowed launch path: merges CLI flags with the optional settings file,
//! builds the renderer configuration, and hands control to the event loop.
//!
//! Functions:
//!
//! - `run` drives the main execution path.
//! - `initialise_tracing` configures logging.
//! - `resolve_config` translates CLI/settings input into a `RendererConfig`.

use anyhow::{Context, Result};
use renderer::{Renderer, RendererConfig};
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::settings::Settings;

const DEFAULT_SIZE: (u32, u32) = (1280, 720);
const DEFAULT_TITLE: &str = "pulsegrid";

pub fn initialise_tracing() {
    let default_filter = "warn,pulsegrid=info,renderer=info,scene=info,naga=error,wgpu=error,wgpu_core=error,wgpu_hal=error,winit=error";
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

pub fn run(args: RunArgs) -> Result<()> {
    let settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };

    let config = resolve_config(&args, &settings)?;
    tracing::info!(
        width = config.surface_size.0,
        height = config.surface_size.1,
        antialiasing = ?config.antialiasing,
        "starting windowed renderer"
    );

    Renderer::new(config).run()
}

fn resolve_config(args: &RunArgs, settings: &Settings) -> Result<RendererConfig> {
    let surface_size = args.size.or_else(|| settings.size()).unwrap_or(DEFAULT_SIZE);

    let antialiasing = match args.antialias {
        Some(mode) => mode,
        None => settings
            .antialias()
            .context("invalid antialias mode in settings file")?
            .unwrap_or_default(),
    };

    let window_title = args
        .title
        .clone()
        .or_else(|| settings.window.title.clone())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());

    Ok(RendererConfig {
        surface_size,
        window_title,
        antialiasing,
        fragment_source: scene::FRAGMENT_SHADER.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use renderer::Antialiasing;

    fn bare_args() -> RunArgs {
        RunArgs {
            size: None,
            antialias: None,
            title: None,
            settings: None,
        }
    }

    #[test]
    fn defaults_apply_when_nothing_is_specified() {
        let config = resolve_config(&bare_args(), &Settings::default()).unwrap();
        assert_eq!(config.surface_size, DEFAULT_SIZE);
        assert_eq!(config.window_title, DEFAULT_TITLE);
        assert_eq!(config.antialiasing, Antialiasing::Auto);
        assert!(!config.fragment_source.is_empty());
    }

    #[test]
    fn cli_flags_override_the_settings_file() {
        let settings = Settings::parse(
            "[window]\nwidth = 800\nheight = 600\ntitle = \"from file\"\nantialias = \"off\"\n",
        )
        .unwrap();

        let mut args = bare_args();
        args.size = Some((1920, 1080));
        args.antialias = Some(Antialiasing::Samples(4));

        let config = resolve_config(&args, &settings).unwrap();
        assert_eq!(config.surface_size, (1920, 1080));
        assert_eq!(config.antialiasing, Antialiasing::Samples(4));
        // Title not set on the CLI, so the file value survives.
        assert_eq!(config.window_title, "from file");
    }

    #[test]
    fn settings_file_fills_unset_flags() {
        let settings =
            Settings::parse("[window]\nwidth = 640\nheight = 480\nantialias = \"2\"\n").unwrap();
        let config = resolve_config(&bare_args(), &settings).unwrap();
        assert_eq!(config.surface_size, (640, 480));
        assert_eq!(config.antialiasing, Antialiasing::Samples(2));
    }
}
