/// Instanced, flat-lit cube shader.
///
/// Each instance is a unit cube scaled to `scale.xyz`, turned by `placement.w`
/// around +Y and moved to `placement.xyz`.
pub const ROAD_SHADER: &str = r#"
struct Camera {
    view_proj: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: Camera;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct InstanceInput {
    @location(2) placement: vec4<f32>,
    @location(3) scale: vec4<f32>,
    @location(4) tint: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) tint: vec4<f32>,
    @location(2) depth: f32,
};

fn rotate_y(v: vec3<f32>, angle: f32) -> vec3<f32> {
    let c = cos(angle);
    let s = sin(angle);
    return vec3<f32>(v.x * c + v.z * s, v.y, -v.x * s + v.z * c);
}

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let local = rotate_y(vertex.position * instance.scale.xyz, instance.placement.w);
    let world = local + instance.placement.xyz;

    var out: VertexOutput;
    out.clip_position = camera.view_proj * vec4<f32>(world, 1.0);
    out.normal = rotate_y(vertex.normal, instance.placement.w);
    out.tint = instance.tint;
    out.depth = out.clip_position.w;
    return out;
}

const SKY: vec3<f32> = vec3<f32>(0.55, 0.72, 0.9);
const FOG_START: f32 = 90.0;
const FOG_END: f32 = 200.0;

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light = normalize(vec3<f32>(0.35, 0.9, 0.45));
    let diffuse = max(dot(normalize(in.normal), light), 0.0);
    let lit = in.tint.rgb * (0.35 + 0.65 * diffuse);

    // Fade distant geometry into the sky so spawns do not pop in
    let fog = clamp((in.depth - FOG_START) / (FOG_END - FOG_START), 0.0, 1.0);
    return vec4<f32>(mix(lit, SKY, fog), in.tint.a);
}
"#;
