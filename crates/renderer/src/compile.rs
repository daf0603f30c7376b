//! Shader wrapping and compilation.
//!
//! The scene crate ships a plain GLSL fragment body written against three
//! loose uniforms (`resolution`, `time`, `pointer`) and a ShaderToy-style
//! `mainImage` entry point. Before it reaches the GPU the body is wrapped:
//! a header replaces the loose uniforms with the std140 block the renderer
//! actually uploads, and a footer remaps `gl_FragCoord` to a bottom-left
//! origin and calls `mainImage`. Compilation goes through wgpu's GLSL (naga)
//! frontend.

use std::borrow::Cow;

use anyhow::Result;
use wgpu::naga::ShaderStage;

/// GLSL prologue injected ahead of the scene fragment body.
///
/// The uniform block layout must match `SceneUniforms` in `gpu::uniforms`.
const HEADER: &str = r"#version 450
layout(location = 0) in vec2 v_uv;
layout(location = 0) out vec4 outColor;

layout(std140, set = 0, binding = 0) uniform SceneParams {
    vec2 _resolution;
    float _time;
    float _pad0;
    vec2 _pointer;
    vec2 _pad1;
} ubo;

// Map the body's uniform names onto UBO fields to avoid name clashes.
#define resolution ubo._resolution
#define time ubo._time
#define pointer ubo._pointer

vec4 pulsegrid_frag_coord;
#define gl_FragCoord pulsegrid_frag_coord
";

/// GLSL epilogue that remaps coordinates and delegates to `mainImage`.
const FOOTER: &str = r"void main() {
    // Capture the real builtin gl_FragCoord, then remap to a bottom-left
    // origin. The macro is undefined briefly so the hardware builtin is
    // readable.
    #undef gl_FragCoord
    vec2 builtinFC = vec2(gl_FragCoord.x, gl_FragCoord.y);
    #define gl_FragCoord pulsegrid_frag_coord

    vec2 fragCoord = vec2(builtinFC.x, resolution.y - builtinFC.y);
    pulsegrid_frag_coord = vec4(fragCoord, 0.0, 1.0);

    vec4 color = vec4(0.0);
    mainImage(color, fragCoord);
    outColor = color;
}
";

/// Minimal full-screen triangle vertex shader.
const VERTEX_SHADER_GLSL: &str = r"#version 450
layout(location = 0) out vec2 v_uv;

const vec2 positions[3] = vec2[3](
    vec2(-1.0, -3.0),
    vec2(3.0, 1.0),
    vec2(-1.0, 1.0)
);

void main() {
    uint vertex_index = uint(gl_VertexIndex);
    vec2 pos = positions[vertex_index];
    v_uv = pos * 0.5 + vec2(0.5, 0.5);
    gl_Position = vec4(pos, 0.0, 1.0);
}
";

/// Produces a self-contained GLSL fragment shader from the scene body.
///
/// Loose `uniform` declarations for the names the header redefines are
/// stripped so the body stays compilable standalone (for editors and
/// reference) without tripping the wrapped compile.
fn wrap_fragment(source: &str) -> String {
    let mut sanitized = String::new();
    for line in source.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#version") {
            continue;
        }
        let is_wrapped_uniform = trimmed.starts_with("uniform ")
            && (trimmed.contains("resolution")
                || trimmed.contains("time")
                || trimmed.contains("pointer"));
        if is_wrapped_uniform {
            continue;
        }
        sanitized.push_str(line);
        sanitized.push('\n');
    }

    format!("{HEADER}\n#line 1\n{sanitized}{FOOTER}")
}

/// Wraps the scene body and hands it to naga as a fragment stage.
pub(crate) fn compile_fragment_shader(
    device: &wgpu::Device,
    source: &str,
) -> Result<wgpu::ShaderModule> {
    let wrapped = wrap_fragment(source);

    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene fragment"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Owned(wrapped),
            stage: ShaderStage::Fragment,
            defines: &[],
        },
    }))
}

/// Compiles the static full-screen triangle vertex shader.
pub(crate) fn compile_vertex_shader(device: &wgpu::Device) -> Result<wgpu::ShaderModule> {
    Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("fullscreen triangle vertex"),
        source: wgpu::ShaderSource::Glsl {
            shader: Cow::Borrowed(VERTEX_SHADER_GLSL),
            stage: ShaderStage::Vertex,
            defines: &[],
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = "#version 300 es\n\
                        uniform vec2 resolution;\n\
                        uniform float time;\n\
                        uniform vec2 pointer;\n\
                        void mainImage(out vec4 fragColor, in vec2 fragCoord) {\n\
                            fragColor = vec4(fragCoord / resolution, sin(time), 1.);\n\
                        }\n";

    #[test]
    fn wrapped_shader_strips_loose_uniforms_and_version() {
        let wrapped = wrap_fragment(BODY);
        assert!(!wrapped.contains("uniform vec2 resolution;"));
        assert!(!wrapped.contains("uniform float time;"));
        assert!(!wrapped.contains("uniform vec2 pointer;"));
        assert!(!wrapped.contains("300 es"));
    }

    #[test]
    fn wrapped_shader_keeps_the_body_and_entry_points() {
        let wrapped = wrap_fragment(BODY);
        assert!(wrapped.starts_with("#version 450"));
        assert!(wrapped.contains("void mainImage"));
        assert!(wrapped.contains("mainImage(color, fragCoord);"));
        assert_eq!(wrapped.matches("#version").count(), 1);
    }

    #[test]
    fn scene_body_wraps_cleanly() {
        let wrapped = wrap_fragment(scene::FRAGMENT_SHADER);
        assert!(!wrapped.contains("uniform vec2 resolution;"));
        assert!(!wrapped.contains("uniform float time;"));
        assert!(!wrapped.contains("uniform vec2 pointer;"));
        assert!(wrapped.contains("void mainImage"));
    }

    #[test]
    fn wrapped_shader_flips_to_bottom_left_origin() {
        let wrapped = wrap_fragment(BODY);
        assert!(wrapped.contains("resolution.y - builtinFC.y"));
    }
}
