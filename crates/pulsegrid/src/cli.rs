use std::path::PathBuf;

use clap::{Parser, Subcommand};
use renderer::Antialiasing;

pub fn parse() -> Cli {
    Cli::parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "pulsegrid",
    author,
    version,
    about = "Raymarched box-frame lattice demo",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Window size (e.g. `1280x720`).
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub size: Option<(u32, u32)>,

    /// Anti-aliasing policy: `auto`, `off`, or an explicit MSAA sample count (e.g. `4`).
    #[arg(long, value_name = "MODE", value_parser = parse_antialias)]
    pub antialias: Option<Antialiasing>,

    /// Window title override.
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// TOML settings file supplying defaults for the flags above.
    #[arg(long, value_name = "FILE", env = "PULSEGRID_SETTINGS")]
    pub settings: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render a single frame on the CPU and write it as a PNG.
    Still(StillArgs),
}

#[derive(Parser, Debug)]
pub struct StillArgs {
    /// Output image path.
    #[arg(long, value_name = "PATH")]
    pub out: PathBuf,

    /// Scene time in seconds to evaluate.
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub time: f32,

    /// Image size.
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_size,
        default_value = "1920x1080"
    )]
    pub size: (u32, u32),

    /// Pointer position in pixels, bottom-left origin (e.g. `640,360`).
    #[arg(long, value_name = "X,Y", value_parser = parse_pointer)]
    pub pointer: Option<(f32, f32)>,
}

pub fn parse_size(raw: &str) -> Result<(u32, u32), String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got `{raw}`"))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid width `{w}`"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid height `{h}`"))?;
    if width == 0 || height == 0 {
        return Err("size components must be nonzero".to_string());
    }
    Ok((width, height))
}

pub fn parse_antialias(raw: &str) -> Result<Antialiasing, String> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "auto" => Ok(Antialiasing::Auto),
        "off" | "none" | "1" => Ok(Antialiasing::Off),
        other => {
            let samples = other.parse::<u32>().map_err(|_| {
                format!("expected `auto`, `off`, or a sample count, got `{raw}`")
            })?;
            if samples < 2 || !samples.is_power_of_two() {
                return Err(format!(
                    "MSAA sample count must be a power of two of at least 2, got `{raw}`"
                ));
            }
            Ok(Antialiasing::Samples(samples))
        }
    }
}

pub fn parse_pointer(raw: &str) -> Result<(f32, f32), String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{raw}`"))?;
    let x = x
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid pointer x `{x}`"))?;
    let y = y
        .trim()
        .parse::<f32>()
        .map_err(|_| format!("invalid pointer y `{y}`"))?;
    if !x.is_finite() || !y.is_finite() {
        return Err("pointer components must be finite".to_string());
    }
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_size_variants() {
        assert_eq!(parse_size("1280x720").unwrap(), (1280, 720));
        assert_eq!(parse_size("800X600").unwrap(), (800, 600));
        assert!(parse_size("1280").is_err());
        assert!(parse_size("0x600").is_err());
        assert!(parse_size("axb").is_err());
    }

    #[test]
    fn parses_antialias_variants() {
        assert_eq!(parse_antialias("auto").unwrap(), Antialiasing::Auto);
        assert_eq!(parse_antialias("off").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("1").unwrap(), Antialiasing::Off);
        assert_eq!(parse_antialias("4").unwrap(), Antialiasing::Samples(4));
        assert!(parse_antialias("3").is_err());
        assert!(parse_antialias("fancy").is_err());
    }

    #[test]
    fn parses_pointer_positions() {
        assert_eq!(parse_pointer("640,360").unwrap(), (640.0, 360.0));
        assert_eq!(parse_pointer("12.5, 80").unwrap(), (12.5, 80.0));
        assert!(parse_pointer("640").is_err());
        assert!(parse_pointer("x,y").is_err());
    }

    #[test]
    fn still_subcommand_round_trips() {
        let cli = Cli::parse_from([
            "pulsegrid",
            "still",
            "--out",
            "frame.png",
            "--time",
            "2.5",
            "--size",
            "640x480",
        ]);
        match cli.command {
            Some(Command::Still(args)) => {
                assert_eq!(args.out, PathBuf::from("frame.png"));
                assert_eq!(args.time, 2.5);
                assert_eq!(args.size, (640, 480));
                assert_eq!(args.pointer, None);
            }
            other => panic!("expected still subcommand, got {other:?}"),
        }
    }
}
