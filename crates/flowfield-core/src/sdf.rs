//! Signed-distance math for the ray-marched blob demo: two spheres orbiting
//! on unit circles, blended with a polynomial smooth minimum. The shader
//! text itself stays in the host; this is the scene function, sphere
//! tracer, and shading used by the software renderer and the tests.

use glam::Vec3;

use crate::math::mix;

/// Smooth-minimum blend radius used throughout the scene.
pub const BLEND_K: f32 = 0.5;

/// Polynomial smooth minimum. Equals `min(a, b)` far from the crossover
/// and dips below it inside the blend region of width `k`.
pub fn smin(a: f32, b: f32, k: f32) -> f32 {
    let h = (0.5 + 0.5 * (b - a) / k).clamp(0.0, 1.0);
    mix(b, a, h) - k * h * (1.0 - h)
}

/// Distance from `p` to a sphere surface.
pub fn sd_sphere(p: Vec3, center: Vec3, radius: f32) -> f32 {
    p.distance(center) - radius
}

/// Sphere-tracing iteration limits.
pub struct MarchSettings {
    pub eps: f32,
    pub max_dist: f32,
    pub max_steps: u32,
}

impl Default for MarchSettings {
    fn default() -> Self {
        Self {
            eps: 0.001,
            max_dist: 1000.0,
            max_steps: 100,
        }
    }
}

/// The demo scene at a fixed animation time.
pub struct BlobScene {
    pub time: f32,
}

impl BlobScene {
    pub fn new(time: f32) -> Self {
        Self { time }
    }

    fn centers(&self) -> (Vec3, Vec3) {
        let (s, c) = self.time.sin_cos();
        (Vec3::new(c, s, 0.0), Vec3::new(s, c, 0.0))
    }

    /// Scene SDF: smooth union of the two orbiting spheres (radii 1.0 and
    /// 0.75).
    pub fn distance(&self, p: Vec3) -> f32 {
        let (c1, c2) = self.centers();
        let d1 = sd_sphere(p, c1, 1.0);
        let d2 = sd_sphere(p, c2, 0.75);
        smin(d1, d2, BLEND_K)
    }

    /// Surface color: red-to-blue mix by the same blend factor the smooth
    /// minimum uses, so the seam matches the geometry.
    pub fn color(&self, p: Vec3) -> Vec3 {
        let (c1, c2) = self.centers();
        let d1 = sd_sphere(p, c1, 1.0);
        let d2 = sd_sphere(p, c2, 0.75);
        let h = (0.5 + 0.5 * (d2 - d1) / BLEND_K).clamp(0.0, 1.0);
        Vec3::new(1.0, 0.0, 0.0).lerp(Vec3::new(0.0, 0.0, 1.0), h)
    }

    /// Tetrahedral 4-tap numeric gradient, normalized.
    pub fn normal(&self, p: Vec3, eps: f32) -> Vec3 {
        let mut n = Vec3::ZERO;
        for i in 0..4 {
            let e = 0.5773
                * (2.0
                    * Vec3::new(
                        (((i + 3) >> 1) & 1) as f32,
                        ((i >> 1) & 1) as f32,
                        (i & 1) as f32,
                    )
                    - Vec3::ONE);
            n += e * self.distance(p + e * eps);
        }
        n.normalize_or_zero()
    }
}

/// Sphere tracing from `ro` along unit direction `rd`. Returns the total
/// distance travelled; a result at or beyond `max_dist` is a miss.
pub fn ray_march(scene: &BlobScene, ro: Vec3, rd: Vec3, settings: &MarchSettings) -> f32 {
    let mut d = 0.0;
    for _ in 0..settings.max_steps {
        let p = ro + rd * d;
        let cd = scene.distance(p);
        if cd < settings.eps || d >= settings.max_dist {
            break;
        }
        d += cd;
    }
    d
}

/// Blinn-less Phong: diffuse, specular raised from the diffuse term, and a
/// constant ambient floor, matching the demo's fragment shader.
pub struct Shading {
    pub light_dir: Vec3,
    pub light_color: Vec3,
    pub diffuse: f32,
    pub specular: f32,
    pub ambient: f32,
    pub shininess: f32,
}

impl Default for Shading {
    fn default() -> Self {
        Self {
            light_dir: Vec3::new(1.0, 1.0, 1.0).normalize(),
            light_color: Vec3::ONE,
            diffuse: 0.5,
            specular: 3.0,
            ambient: 0.15,
            shininess: 16.0,
        }
    }
}

impl Shading {
    pub fn shade(&self, surface_color: Vec3, normal: Vec3) -> Vec3 {
        let diff = normal.dot(self.light_dir).max(0.0) * self.diffuse;
        let spec = diff.powf(self.shininess) * self.specular;
        self.light_color * (surface_color * (spec + self.ambient + diff))
    }
}
