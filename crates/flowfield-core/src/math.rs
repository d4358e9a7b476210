/// GLSL-style `mix(a, b, t)` for scalars.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// GLSL-style `smoothstep`: cubic ease between the edges, clamped outside
/// them. Drives the speed-to-alpha ramp in the trail colors.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Deterministic 2-D coordinate hash into [0, 1), the shader hash12.
/// Gives each particle its noise phase offset.
pub fn hash12(x: f32, y: f32) -> f32 {
    let p3x = (x * 0.1031).fract();
    let p3y = (x * 0.1031).fract(); // fract(vec3(x, x, y) * .1031): the .xyx swizzle
    let p3z = (y * 0.1031).fract();
    let dot_val = p3x * (p3y + 33.33) + p3y * (p3z + 33.33) + p3z * (p3x + 33.33);
    let p3x = p3x + dot_val;
    let p3y = p3y + dot_val;
    let p3z = p3z + dot_val;
    ((p3x + p3y) * p3z).fract()
}
