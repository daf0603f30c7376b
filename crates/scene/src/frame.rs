//! Whole-frame rendering on the CPU.
//!
//! Pixels are independent, so rows are filled in parallel with rayon. Output
//! is tightly packed RGBA8 in row-major, top-left origin order — exactly what
//! PNG encoders and window blitters expect — while the evaluator itself works
//! in the bottom-left origin convention of the fragment shader.

use glam::{vec2, Vec2};
use rayon::prelude::*;

use crate::camera::PointerInput;
use crate::evaluator::SceneEvaluator;
use crate::FrameInput;

/// Renders one frame at `width` x `height` and returns RGBA8 bytes.
pub fn render_rgba8(width: u32, height: u32, time: f32, pointer: PointerInput) -> Vec<u8> {
    let input = FrameInput::new(
        Vec2::new(width as f32, height as f32),
        time,
        pointer,
    );
    let evaluator = SceneEvaluator::new(&input);

    let row_bytes = width as usize * 4;
    let mut pixels = vec![0u8; row_bytes * height as usize];

    pixels
        .par_chunks_exact_mut(row_bytes)
        .enumerate()
        .for_each(|(row, out)| {
            // Image rows run top-down; fragment coordinates bottom-up.
            let y = (height - 1 - row as u32) as f32 + 0.5;
            for x in 0..width as usize {
                let col = evaluator.shade(vec2(x as f32 + 0.5, y));
                let px = &mut out[x * 4..x * 4 + 4];
                px[0] = quantize(col.x);
                px[1] = quantize(col.y);
                px[2] = quantize(col.z);
                px[3] = 255;
            }
        });

    pixels
}

fn quantize(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}
