//! The flow-field update-and-render loop.
//!
//! One [`Simulator::step`] is the whole per-frame state transition: drain
//! queued control events, rebuild the field at the current time offset,
//! advect every particle, and emit the trail segments for the host to
//! composite over the faded previous frame.

use std::collections::VecDeque;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::SimConfig;
use crate::field::FlowField;
use crate::math::{mix, smoothstep};
use crate::noise_source::{NoiseSource, PerlinSource};
use crate::palette::{PaletteTable, Rgb};
use crate::particle::ParticleSet;

/// One trail stroke: previous position to current position.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Segment {
    pub from: [f32; 2],
    pub to: [f32; 2],
    /// Premultiplied nothing: straight RGBA in [0, 1].
    pub color: [f32; 4],
    pub width: f32,
}

/// Output of one step. `fade` is the low-alpha background fill the host
/// must paint before the segments; the trailing effect depends on it.
pub struct Frame {
    pub fade: [f32; 4],
    pub segments: Vec<Segment>,
}

/// Control mutations applied at the start of the next step, so timer
/// firings racing the render loop stay deterministic.
pub enum ControlEvent {
    AdvancePalette,
    SelectPalette(String),
}

/// Fixed-interval rotation clock fed with frame deltas instead of wall
/// time. Re-arming resets the accumulated elapsed time.
struct RotationClock {
    interval: f32,
    elapsed: f32,
}

impl RotationClock {
    fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
        }
    }

    fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
        self.elapsed = 0.0;
    }

    /// Number of whole intervals that elapsed after adding `dt`.
    fn tick(&mut self, dt: f32) -> u32 {
        if self.interval <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        if self.elapsed < self.interval {
            return 0;
        }
        // Whole-interval count by division: repeated subtraction stalls
        // at f32 precision once `elapsed` dwarfs the interval.
        let fires = (self.elapsed / self.interval).floor();
        self.elapsed = (self.elapsed - fires * self.interval).max(0.0);
        fires as u32
    }
}

pub struct Simulator {
    pub particles: ParticleSet,
    pub field: FlowField,
    pub palettes: PaletteTable,
    pub config: SimConfig,
    noise: Box<dyn NoiseSource>,
    rng: StdRng,
    width: f32,
    height: f32,
    zoff: f32,
    color_offset: f32,
    clock: RotationClock,
    pending: VecDeque<ControlEvent>,
}

impl Simulator {
    pub fn new(width: f32, height: f32, config: SimConfig, seed: u64) -> Self {
        Self::with_noise(
            width,
            height,
            config,
            seed,
            Box::new(PerlinSource::new(seed as u32)),
        )
    }

    /// Construct with an explicit noise source (tests inject closures).
    pub fn with_noise(
        width: f32,
        height: f32,
        config: SimConfig,
        seed: u64,
        noise: Box<dyn NoiseSource>,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = ParticleSet::new(
            config.particle_count,
            width,
            height,
            config.max_speed,
            config.stroke_width,
            &mut rng,
        );
        let field = FlowField::new(width, height, config.scale);
        let clock = RotationClock::new(config.rotation_interval);
        Self {
            particles,
            field,
            palettes: PaletteTable::builtin(),
            config,
            noise,
            rng,
            width,
            height,
            zoff: 0.0,
            color_offset: 0.0,
            clock,
            pending: VecDeque::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn zoff(&self) -> f32 {
        self.zoff
    }

    /// Advance the whole simulation by one display frame.
    pub fn step(&mut self) -> Frame {
        while let Some(event) = self.pending.pop_front() {
            match event {
                ControlEvent::AdvancePalette => self.palettes.advance(),
                ControlEvent::SelectPalette(name) => {
                    self.palettes.select(&name);
                }
            }
        }

        self.field.recompute(
            self.noise.as_ref(),
            self.zoff,
            self.config.spatial_step,
            self.config.turns,
            self.config.force_magnitude,
        );
        self.zoff += self.config.time_step;
        self.color_offset += self.config.color_offset_step;

        let mut segments = Vec::with_capacity(self.particles.count);
        for i in 0..self.particles.count {
            // Follow: steer by the containing cell, if any.
            if let Some(force) = self.field.force_at(self.particles.position[i]) {
                self.particles.acceleration[i] += force;
            }

            // Integrate with a hard speed cap, then clear the accumulator.
            let mut vel = self.particles.velocity[i] + self.particles.acceleration[i];
            let speed = vel.length();
            let cap = self.particles.max_speed[i];
            if speed > cap {
                vel *= cap / speed;
            }
            self.particles.velocity[i] = vel;
            self.particles.position[i] += vel;
            self.particles.acceleration[i] = Vec2::ZERO;

            let pos = self.particles.position[i];
            let out_of_bounds =
                pos.x < 0.0 || pos.x > self.width || pos.y < 0.0 || pos.y > self.height;
            if out_of_bounds {
                // Reborn particles draw nothing this frame.
                self.particles.rebirth(i, self.width, self.height, &mut self.rng);
                continue;
            }

            let color = self.particle_color(i, pos, vel.length());
            segments.push(Segment {
                from: self.particles.prev_position[i].into(),
                to: pos.into(),
                color,
                width: self.particles.size[i],
            });
            self.particles.prev_position[i] = pos;
        }

        Frame {
            fade: [
                5.0 / 255.0,
                5.0 / 255.0,
                5.0 / 255.0,
                self.config.fade_alpha,
            ],
            segments,
        }
    }

    /// Base palette color drifted toward the next palette color by a noise
    /// sample of position and the slow global color offset; alpha eases up
    /// with speed so fast particles read brighter.
    fn particle_color(&self, i: usize, pos: Vec2, speed: f32) -> [f32; 4] {
        let slot = self.particles.palette_slot[i];
        let base = self.palettes.base_color(slot).to_unit();
        let next = self.palettes.next_color(slot).to_unit();
        let t = self.noise.sample(
            pos.x * self.config.color_noise_scale,
            pos.y * self.config.color_noise_scale,
            self.color_offset + self.particles.hash[i],
        );
        let cap = self.particles.max_speed[i].max(f32::EPSILON);
        let alpha = mix(0.3, 1.0, smoothstep(0.0, cap, speed));
        [
            mix(base[0], next[0], t),
            mix(base[1], next[1], t),
            mix(base[2], next[2], t),
            alpha,
        ]
    }

    // ---------- control surface ----------

    /// Feed the palette-rotation clock. Each whole interval elapsed queues
    /// one rotation for the next step.
    pub fn advance_clock(&mut self, dt: f32) {
        // A backlog of rotations collapses to its net effect on the cycle.
        let fires = self.clock.tick(dt) as usize % self.palettes.len().max(1);
        for _ in 0..fires {
            self.pending.push_back(ControlEvent::AdvancePalette);
        }
    }

    pub fn set_rotation_interval(&mut self, seconds: f32) {
        self.config.rotation_interval = seconds;
        self.clock.set_interval(seconds);
    }

    /// Queue an explicit palette switch. Returns false (and queues nothing)
    /// when the name is unknown.
    pub fn select_palette(&mut self, name: &str) -> bool {
        if self.palettes.contains(name) {
            self.pending
                .push_back(ControlEvent::SelectPalette(name.to_string()));
            true
        } else {
            false
        }
    }

    pub fn advance_palette(&mut self) {
        self.pending.push_back(ControlEvent::AdvancePalette);
    }

    pub fn add_palette(&mut self, name: &str, colors: Vec<Rgb>) {
        self.palettes.insert(name, colors);
    }

    /// Retarget the population. Growth appends fresh spawns, shrink drops
    /// the newest particles first.
    pub fn set_particle_count(&mut self, count: usize) {
        self.config.particle_count = count;
        self.particles.resize(
            count,
            self.width,
            self.height,
            self.config.max_speed,
            self.config.stroke_width,
            &mut self.rng,
        );
    }

    /// Apply a new speed cap to every live particle and future spawns.
    pub fn set_max_speed(&mut self, max_speed: f32) {
        self.config.max_speed = max_speed;
        for v in self.particles.max_speed.iter_mut() {
            *v = max_speed;
        }
    }

    /// Host-reported viewport change. The grid is rebuilt synchronously;
    /// particles keep their coordinates and are simulated against the new
    /// field from the next step on.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
        self.field.resize(width, height);
    }
}
