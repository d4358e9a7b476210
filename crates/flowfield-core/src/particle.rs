use glam::Vec2;
use rand::Rng;

use crate::math::hash12;

/// SoA particle storage.
///
/// Particles are never destroyed: the population is fixed-size (adjustable
/// via [`ParticleSet::resize`]) and membership is replaced in place by
/// [`ParticleSet::rebirth`] when a particle leaves the viewport.
pub struct ParticleSet {
    pub count: usize,
    pub position: Vec<Vec2>,
    pub velocity: Vec<Vec2>,
    /// Force accumulator, zeroed after every integration step.
    pub acceleration: Vec<Vec2>,
    /// Trail anchor: the position drawn from on the next frame.
    pub prev_position: Vec<Vec2>,
    pub max_speed: Vec<f32>,
    pub size: Vec<f32>,
    /// Index into the active palette's color list.
    pub palette_slot: Vec<usize>,
    /// Per-particle hash in [0,1) for color phase offsets.
    pub hash: Vec<f32>,
}

impl ParticleSet {
    pub fn new(
        count: usize,
        width: f32,
        height: f32,
        max_speed: f32,
        size: f32,
        rng: &mut impl Rng,
    ) -> Self {
        let mut set = Self {
            count: 0,
            position: Vec::with_capacity(count),
            velocity: Vec::with_capacity(count),
            acceleration: Vec::with_capacity(count),
            prev_position: Vec::with_capacity(count),
            max_speed: Vec::with_capacity(count),
            size: Vec::with_capacity(count),
            palette_slot: Vec::with_capacity(count),
            hash: Vec::with_capacity(count),
        };
        set.resize(count, width, height, max_speed, size, rng);
        set
    }

    /// Grow by appending freshly spawned particles or shrink by truncating
    /// from the end. Surviving particles keep their state untouched.
    pub fn resize(
        &mut self,
        count: usize,
        width: f32,
        height: f32,
        max_speed: f32,
        size: f32,
        rng: &mut impl Rng,
    ) {
        if count < self.count {
            self.position.truncate(count);
            self.velocity.truncate(count);
            self.acceleration.truncate(count);
            self.prev_position.truncate(count);
            self.max_speed.truncate(count);
            self.size.truncate(count);
            self.palette_slot.truncate(count);
            self.hash.truncate(count);
        } else {
            for i in self.count..count {
                let pos = random_point(width, height, rng);
                self.position.push(pos);
                self.velocity.push(Vec2::ZERO);
                self.acceleration.push(Vec2::ZERO);
                self.prev_position.push(pos);
                self.max_speed.push(max_speed);
                self.size.push(size);
                self.palette_slot.push(i);
                self.hash.push(hash12(i as f32 * 0.613, i as f32 * 0.377));
            }
        }
        self.count = count;
    }

    /// Reset particle `i` to a fresh uniform-random in-bounds state. The
    /// previous position snaps to the new one so no trail is drawn across
    /// the teleport.
    pub fn rebirth(&mut self, i: usize, width: f32, height: f32, rng: &mut impl Rng) {
        let pos = random_point(width, height, rng);
        self.position[i] = pos;
        self.velocity[i] = Vec2::ZERO;
        self.acceleration[i] = Vec2::ZERO;
        self.prev_position[i] = pos;
    }
}

fn random_point(width: f32, height: f32, rng: &mut impl Rng) -> Vec2 {
    let x = if width > 0.0 { rng.gen_range(0.0..width) } else { 0.0 };
    let y = if height > 0.0 { rng.gen_range(0.0..height) } else { 0.0 };
    Vec2::new(x, y)
}
