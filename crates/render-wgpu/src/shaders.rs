/// WGSL shader for the whole town: flat-coloured or textured triangles lit
/// by one directional sun.
pub const TOWN_SHADER: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    sun_dir: vec4<f32>,
    viewport: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0) var tex0: texture_2d<f32>;
@group(1) @binding(1) var tex1: texture_2d<f32>;
@group(1) @binding(2) var tex2: texture_2d<f32>;
@group(1) @binding(3) var tex3: texture_2d<f32>;
@group(1) @binding(4) var tex4: texture_2d<f32>;
@group(1) @binding(5) var tex5: texture_2d<f32>;
@group(1) @binding(6) var tex_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) color: vec3<f32>,
    @location(3) texcoord: vec2<f32>,
    @location(4) tex_flag: f32,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_normal: vec3<f32>,
    @location(1) color: vec3<f32>,
    @location(2) texcoord: vec2<f32>,
    @location(3) @interpolate(flat) tex_flag: f32,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * vec4<f32>(vertex.position, 1.0);
    out.world_normal = vertex.normal;
    out.color = vertex.color;
    // Texture rows are stored top-down; texcoords have a bottom-left origin.
    out.texcoord = vec2<f32>(vertex.texcoord.x, 1.0 - vertex.texcoord.y);
    out.tex_flag = vertex.tex_flag;
    return out;
}

fn sample_slot(slot: i32, uv: vec2<f32>) -> vec4<f32> {
    switch slot {
        case 0: { return textureSampleLevel(tex0, tex_sampler, uv, 0.0); }
        case 1: { return textureSampleLevel(tex1, tex_sampler, uv, 0.0); }
        case 2: { return textureSampleLevel(tex2, tex_sampler, uv, 0.0); }
        case 3: { return textureSampleLevel(tex3, tex_sampler, uv, 0.0); }
        case 4: { return textureSampleLevel(tex4, tex_sampler, uv, 0.0); }
        case 5: { return textureSampleLevel(tex5, tex_sampler, uv, 0.0); }
        default: { return vec4<f32>(1.0, 1.0, 1.0, 1.0); }
    }
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    var base = in.color;
    if (in.tex_flag > 0.5) {
        let slot = i32(round(in.tex_flag)) - 1;
        base = sample_slot(slot, in.texcoord).rgb * in.color;
    }

    let n = normalize(in.world_normal);
    let sun = normalize(uniforms.sun_dir.xyz);
    let ambient = 0.35;
    let diffuse = max(dot(n, sun), 0.0);
    let lighting = ambient + diffuse * 0.65;

    // Slight darkening towards the window edges.
    let screen = in.clip_position.xy / max(uniforms.viewport.xy, vec2<f32>(1.0, 1.0));
    let edge = length(screen - vec2<f32>(0.5, 0.5));
    let vignette = 1.0 - 0.25 * smoothstep(0.45, 0.75, edge);

    return vec4<f32>(base * lighting * vignette, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_declares_entry_points_and_slots() {
        assert!(TOWN_SHADER.contains("fn vs_main"));
        assert!(TOWN_SHADER.contains("fn fs_main"));
        for slot in 0..6 {
            let binding = format!("var tex{slot}: texture_2d<f32>");
            assert!(TOWN_SHADER.contains(&binding), "{binding}");
        }
    }
}
