//! Still-frame export: evaluates one frame on the CPU and writes a PNG.

use std::time::Instant;

use anyhow::{Context, Result};
use glam::vec2;
use scene::PointerInput;

use crate::cli::StillArgs;

pub fn run(args: StillArgs) -> Result<()> {
    let (width, height) = args.size;

    let pointer = match args.pointer {
        Some((x, y)) => PointerInput::from_pixels(vec2(x, y)),
        None => PointerInput::Inactive,
    };

    tracing::info!(width, height, time = args.time, "rendering still frame on the CPU");
    let started = Instant::now();
    let pixels = scene::render_rgba8(width, height, args.time, pointer);
    let rendered_in = started.elapsed();

    let image = image::RgbaImage::from_raw(width, height, pixels)
        .context("rendered buffer did not match the requested dimensions")?;
    image
        .save(&args.out)
        .with_context(|| format!("failed to write still frame to {}", args.out.display()))?;

    tracing::info!(
        path = %args.out.display(),
        elapsed_ms = rendered_in.as_millis() as u64,
        "wrote still frame"
    );
    Ok(())
}
