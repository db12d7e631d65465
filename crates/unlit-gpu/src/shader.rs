/// Unlit textured quad. The vertex stage stretches two triangles over clip
/// space (no vertex buffer) and hands each fragment an interpolated UV; the
/// fragment stage samples the bound texture once and writes the sampled rgb
/// with alpha pinned to 1.0.
///
/// UVs come from remapping the quad corners through the group-0 `uv_window`
/// uniform, so the host can feed the fragment stage any coordinate range,
/// including values outside [0, 1]. Group 1 holds the material: the sampled
/// texture at binding 0 and its sampler at binding 1.
pub const UNLIT_WGSL: &str = r#"
struct VertexOut {
    @builtin(position) pos: vec4<f32>,
    @location(0)       uv:  vec2<f32>,
};

// UV range fed to the fragment stage: (min u, min v, max u, max v).
@group(0) @binding(0) var<uniform> uv_window: vec4<f32>;

@vertex
fn vs_main(@builtin(vertex_index) vi: u32) -> VertexOut {
    // Two triangles covering clip space
    var positions = array<vec2<f32>, 6>(
        vec2(-1.0, -1.0), vec2( 1.0, -1.0), vec2(-1.0,  1.0),
        vec2(-1.0,  1.0), vec2( 1.0, -1.0), vec2( 1.0,  1.0),
    );
    let p = positions[vi];
    // v runs top to bottom, so the +y clip corner is the v = min edge
    let corner = vec2(p.x * 0.5 + 0.5, 0.5 - p.y * 0.5);
    var out: VertexOut;
    out.pos = vec4(p, 0.0, 1.0);
    out.uv  = mix(uv_window.xy, uv_window.zw, corner);
    return out;
}

@group(1) @binding(0) var t_color: texture_2d<f32>;
@group(1) @binding(1) var s_color: sampler;

@fragment
fn fs_main(in: VertexOut) -> @location(0) vec4<f32> {
    return vec4<f32>(textureSample(t_color, s_color, in.uv).rgb, 1.0);
}
"#;

// ---------------------------------------------------------------------------
// Tests: reflect the WGSL with naga and pin the binding layout
// ---------------------------------------------------------------------------
