//! Entry point wiring that stitches together the CLI surface, the optional
//! settings file, and the windowed or still-frame execution paths.
//!
//! Types:
//!
//! - None; this module focuses on orchestrating submodules.
//!
//! Functions:
//!
//! - `main` parses CLI input, initialises tracing, and dispatches to modes.

mod cli;
mod run;
mod settings;
mod still;

use anyhow::Result;
use cli::Command;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Still(args)) => still::run(args),
        None => run::run(cli.run),
    }
}
