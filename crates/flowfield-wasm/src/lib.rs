//! Browser bindings for the sketch cores.
//!
//! [`FlowFieldApp`] drives the flow-field simulator against a 2-D canvas
//! context. [`BlobRenderer`] and [`DotCloud`] expose flat buffers by
//! pointer so the JS host can blit pixels / build line geometry without
//! copying through serde.

use flowfield_core::cloud::link_pairs;
use flowfield_core::config::SimConfig;
use flowfield_core::palette::Rgb;
use flowfield_core::sdf::{ray_march, BlobScene, MarchSettings, Shading};
use flowfield_core::simulator::{Segment, Simulator};
use glam::Vec3;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::CanvasRenderingContext2d;

/// RGBA8 buffer size in bytes, widened before multiplying so large
/// canvases do not overflow u32.
fn pixel_buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

fn css_rgba(color: [f32; 4]) -> String {
    format!(
        "rgba({}, {}, {}, {:.4})",
        (color[0] * 255.0).round() as u8,
        (color[1] * 255.0).round() as u8,
        (color[2] * 255.0).round() as u8,
        color[3]
    )
}

#[wasm_bindgen]
pub struct FlowFieldApp {
    sim: Simulator,
    ctx: CanvasRenderingContext2d,
    last_segments: Vec<Segment>,
}

#[wasm_bindgen]
impl FlowFieldApp {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: web_sys::HtmlCanvasElement, seed: u32) -> Result<FlowFieldApp, JsValue> {
        let width = canvas.width() as f32;
        let height = canvas.height() as f32;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let config = SimConfig::default();
        web_sys::console::log_1(
            &format!(
                "FlowFieldApp created: {}x{}, {} particles",
                width, height, config.particle_count
            )
            .into(),
        );

        Ok(FlowFieldApp {
            sim: Simulator::new(width, height, config, seed as u64),
            ctx,
            last_segments: Vec::new(),
        })
    }

    /// Advance one display frame and draw it. `dt` is the frame delta in
    /// seconds (feeds the palette-rotation clock). Returns elapsed ms.
    #[wasm_bindgen]
    pub fn frame(&mut self, dt: f32) -> f32 {
        let start = js_sys::Date::now();

        self.sim.advance_clock(dt);
        let frame = self.sim.step();

        // Low-alpha fill over the previous frame: the trail effect.
        self.ctx.set_fill_style_str(&css_rgba(frame.fade));
        self.ctx
            .fill_rect(0.0, 0.0, self.sim.width() as f64, self.sim.height() as f64);

        for seg in &frame.segments {
            self.ctx.set_stroke_style_str(&css_rgba(seg.color));
            self.ctx.set_line_width(seg.width as f64);
            self.ctx.begin_path();
            self.ctx.move_to(seg.from[0] as f64, seg.from[1] as f64);
            self.ctx.line_to(seg.to[0] as f64, seg.to[1] as f64);
            self.ctx.stroke();
        }

        self.last_segments = frame.segments;
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.sim.resize(width, height);
    }

    #[wasm_bindgen]
    pub fn set_particle_count(&mut self, count: usize) {
        self.sim.set_particle_count(count);
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.sim.particles.count
    }

    #[wasm_bindgen]
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.sim.set_max_speed(max_speed);
    }

    #[wasm_bindgen]
    pub fn set_rotation_interval(&mut self, seconds: f32) {
        self.sim.set_rotation_interval(seconds);
    }

    #[wasm_bindgen]
    pub fn select_palette(&mut self, name: &str) -> bool {
        self.sim.select_palette(name)
    }

    #[wasm_bindgen]
    pub fn advance_palette(&mut self) {
        self.sim.advance_palette();
    }

    #[wasm_bindgen]
    pub fn active_palette(&self) -> String {
        self.sim.palettes.active_name().to_string()
    }

    /// Register a palette from flat RGB triples. A trailing partial triple
    /// is ignored.
    #[wasm_bindgen]
    pub fn add_palette(&mut self, name: &str, rgb: &[u8]) {
        let colors = rgb
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        self.sim.add_palette(name, colors);
    }

    /// Last frame's segments as a flat f32 buffer (from.xy, to.xy, rgba,
    /// width per segment), for hosts that render the trails themselves.
    #[wasm_bindgen]
    pub fn segments_ptr(&self) -> *const f32 {
        bytemuck::cast_slice::<Segment, f32>(&self.last_segments).as_ptr()
    }

    #[wasm_bindgen]
    pub fn segments_byte_length(&self) -> usize {
        self.last_segments.len() * std::mem::size_of::<Segment>()
    }
}

/// Software sphere tracer for the blob demo: renders RGBA8 into an
/// internal buffer the host blits into a canvas ImageData.
#[wasm_bindgen]
pub struct BlobRenderer {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    settings: MarchSettings,
    shading: Shading,
    clear_color: Vec3,
}

#[wasm_bindgen]
impl BlobRenderer {
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32) -> BlobRenderer {
        web_sys::console::log_1(&format!("BlobRenderer created: {}x{}", width, height).into());
        BlobRenderer {
            width,
            height,
            pixels: vec![0u8; pixel_buffer_len(width, height)],
            settings: MarchSettings::default(),
            shading: Shading::default(),
            // Matches the demo's 0x3399ee clear color.
            clear_color: Vec3::new(0x33 as f32, 0x99 as f32, 0xee as f32) / 255.0,
        }
    }

    /// Trace every pixel for the scene at `time`. Camera sits at
    /// (0, 0, 5) looking down -z with a 75 degree vertical fov.
    #[wasm_bindgen]
    pub fn render(&mut self, time: f32) {
        let scene = BlobScene::new(time);
        let ro = Vec3::new(0.0, 0.0, 5.0);
        let half_v = (75.0_f32 / 2.0).to_radians().tan();
        let aspect = self.width as f32 / self.height.max(1) as f32;

        for y in 0..self.height {
            for x in 0..self.width {
                let ndc_x = (x as f32 + 0.5) / self.width as f32 * 2.0 - 1.0;
                let ndc_y = 1.0 - (y as f32 + 0.5) / self.height as f32 * 2.0;
                let rd = Vec3::new(ndc_x * half_v * aspect, ndc_y * half_v, -1.0).normalize();

                let d = ray_march(&scene, ro, rd, &self.settings);
                let color = if d >= self.settings.max_dist {
                    self.clear_color
                } else {
                    let hit = ro + rd * d;
                    let normal = scene.normal(hit, self.settings.eps);
                    self.shading.shade(scene.color(hit), normal)
                };

                let i = (y as usize * self.width as usize + x as usize) * 4;
                self.pixels[i] = (color.x.clamp(0.0, 1.0) * 255.0) as u8;
                self.pixels[i + 1] = (color.y.clamp(0.0, 1.0) * 255.0) as u8;
                self.pixels[i + 2] = (color.z.clamp(0.0, 1.0) * 255.0) as u8;
                self.pixels[i + 3] = 255;
            }
        }
    }

    #[wasm_bindgen]
    pub fn pixels_ptr(&self) -> *const u8 {
        self.pixels.as_ptr()
    }

    #[wasm_bindgen]
    pub fn pixels_byte_length(&self) -> usize {
        self.pixels.len()
    }
}

/// Proximity line pairs for a glyph point cloud sampled by the host.
#[wasm_bindgen]
pub struct DotCloud {
    pairs: Vec<u32>,
}

#[wasm_bindgen]
impl DotCloud {
    /// `points` is a flat xyz array; a trailing partial point is ignored.
    #[wasm_bindgen(constructor)]
    pub fn new(points: &[f32], max_dist: f32) -> DotCloud {
        let cloud: Vec<Vec3> = points
            .chunks_exact(3)
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();
        let pairs = link_pairs(&cloud, max_dist)
            .into_iter()
            .flat_map(|(i, j)| [i, j])
            .collect();
        DotCloud { pairs }
    }

    #[wasm_bindgen]
    pub fn pair_count(&self) -> usize {
        self.pairs.len() / 2
    }

    /// Flat (i, j) index pairs into the host's point array.
    #[wasm_bindgen]
    pub fn pairs_ptr(&self) -> *const u32 {
        self.pairs.as_ptr()
    }
}

#[cfg(test)]
mod tests {
    use super::pixel_buffer_len;

    #[test]
    fn pixel_buffer_len_survives_large_canvases() {
        assert_eq!(pixel_buffer_len(100, 50), 100 * 50 * 4);
        // Would overflow if the multiply happened in u32.
        assert_eq!(pixel_buffer_len(40_000, 40_000), 6_400_000_000);
    }
}
