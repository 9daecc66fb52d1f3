// src/rendering_lib/shader.rs

pub const WGSL_SHADER_SOURCE: &str = r#"
struct Layer {
    screen: vec2<f32>,   // Surface size in pixels
    marker_size: f32,    // Edge length of each square marker in pixels
    _padding: f32,
    color: vec4<f32>,
}

@group(0) @binding(0)
var<uniform> layer: Layer;

struct InstanceInput {
    @location(0) center: vec2<f32>, // Screen-space pixels, origin top-left
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
}

@vertex
fn vs_main(@builtin(vertex_index) corner_index: u32, instance: InstanceInput) -> VertexOutput {
    // Two triangles covering a unit square centred on the instance.
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-0.5, -0.5),
        vec2<f32>( 0.5, -0.5),
        vec2<f32>( 0.5,  0.5),
        vec2<f32>(-0.5, -0.5),
        vec2<f32>( 0.5,  0.5),
        vec2<f32>(-0.5,  0.5),
    );
    let position = instance.center + corners[corner_index] * layer.marker_size;

    // Screen y grows downwards, NDC y grows upwards.
    let normalized_x = (position.x / (layer.screen.x / 2.0)) - 1.0;
    let normalized_y = 1.0 - (position.y / (layer.screen.y / 2.0));

    var out: VertexOutput;
    out.clip_position = vec4<f32>(normalized_x, normalized_y, 0.0, 1.0);
    out.color = layer.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
