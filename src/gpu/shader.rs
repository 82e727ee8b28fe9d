//! Point sprite shader and its uniform block.

use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Uniforms {
    pub view_proj: [[f32; 4]; 4],
    /// Point size in world units.
    pub point_size: f32,
    pub aspect: f32,
    /// Surface height in physical pixels.
    pub viewport_height: f32,
    pub pixel_ratio: f32,
}

/// Camera-facing square sprites with size attenuation.
///
/// A point of `point_size` spans `point_size / 2` in clip space either side
/// of its center, so it shrinks with distance. Sprites never get smaller than
/// one logical pixel.
pub const POINTS_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    point_size: f32,
    aspect: f32,
    viewport_height: f32,
    pixel_ratio: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) point_pos: vec3<f32>,
    @location(1) point_color: vec3<f32>,
) -> VertexOutput {
    var quad_vertices = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>(-1.0,  1.0),
        vec2<f32>( 1.0, -1.0),
        vec2<f32>( 1.0,  1.0),
    );

    let quad_pos = quad_vertices[vertex_index];

    var clip_pos = uniforms.view_proj * vec4<f32>(point_pos, 1.0);

    let min_half = uniforms.pixel_ratio / max(uniforms.viewport_height, 1.0) * clip_pos.w;
    let half_y = max(uniforms.point_size * 0.5, min_half);
    let half_x = half_y / max(uniforms.aspect, 0.0001);

    clip_pos.x += quad_pos.x * half_x;
    clip_pos.y += quad_pos.y * half_y;

    var out: VertexOutput;
    out.clip_position = clip_pos;
    out.color = point_color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_are_16_byte_aligned() {
        assert_eq!(std::mem::size_of::<Uniforms>() % 16, 0);
    }

    #[test]
    fn test_points_shader_validates() {
        let module = naga::front::wgsl::parse_str(POINTS_SHADER).expect("WGSL parse error");
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).expect("WGSL validation error");
    }
}
