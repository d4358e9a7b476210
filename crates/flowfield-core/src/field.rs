use glam::Vec2;

use crate::noise_source::NoiseSource;

/// Dense 2-D grid of steering vectors sampled from 3-D noise.
///
/// Dimensions follow the viewport: `cols = floor(width / scale)`,
/// `rows = floor(height / scale)`, cell index `x + y * cols`. The whole
/// field is overwritten on every [`FlowField::recompute`], so for a fixed
/// noise source and time offset it is a pure function of cell coordinates.
pub struct FlowField {
    cols: usize,
    rows: usize,
    scale: f32,
    vectors: Vec<Vec2>,
}

impl FlowField {
    pub fn new(width: f32, height: f32, scale: f32) -> Self {
        let (cols, rows) = dims(width, height, scale);
        Self {
            cols,
            rows,
            scale,
            vectors: vec![Vec2::ZERO; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Reallocate for a new viewport size. Vectors are zeroed until the
    /// next `recompute`; live particles are the caller's concern and keep
    /// their coordinates.
    pub fn resize(&mut self, width: f32, height: f32) {
        let (cols, rows) = dims(width, height, self.scale);
        self.cols = cols;
        self.rows = rows;
        self.vectors.clear();
        self.vectors.resize(cols * rows, Vec2::ZERO);
    }

    /// Rebuild every cell from the noise source at time offset `zoff`.
    ///
    /// Cell `(x, y)` samples at `(x * spatial_step, y * spatial_step, zoff)`
    /// and maps the unit-range sample to `angle = n * TAU * turns`. The
    /// sketch runs `turns = 2.0` on purpose: the double turn adds curl and
    /// is part of the visual contract, not a wrap bug. Each vector is unit
    /// length scaled to `magnitude`.
    pub fn recompute(
        &mut self,
        noise: &dyn NoiseSource,
        zoff: f32,
        spatial_step: f32,
        turns: f32,
        magnitude: f32,
    ) {
        let cols = self.cols;

        let cell = |x: usize, y: usize| -> Vec2 {
            let n = noise.sample(x as f32 * spatial_step, y as f32 * spatial_step, zoff);
            let angle = n * std::f32::consts::TAU * turns;
            Vec2::from_angle(angle) * magnitude
        };

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            self.vectors
                .par_chunks_mut(cols.max(1))
                .enumerate()
                .for_each(|(y, row)| {
                    for (x, v) in row.iter_mut().enumerate() {
                        *v = cell(x, y);
                    }
                });
        }

        #[cfg(not(feature = "parallel"))]
        for y in 0..self.rows {
            for x in 0..cols {
                self.vectors[x + y * cols] = cell(x, y);
            }
        }
    }

    /// Steering vector for the cell containing `pos`, or `None` when the
    /// position falls outside the grid. Out-of-bounds is not an error: the
    /// particle simply gets no force this frame.
    pub fn force_at(&self, pos: Vec2) -> Option<Vec2> {
        let cx = (pos.x / self.scale).floor();
        let cy = (pos.y / self.scale).floor();
        if cx < 0.0 || cy < 0.0 {
            return None;
        }
        let (cx, cy) = (cx as usize, cy as usize);
        if cx >= self.cols || cy >= self.rows {
            return None;
        }
        Some(self.vectors[cx + cy * self.cols])
    }
}

fn dims(width: f32, height: f32, scale: f32) -> (usize, usize) {
    let cols = (width / scale).floor().max(0.0) as usize;
    let rows = (height / scale).floor().max(0.0) as usize;
    (cols, rows)
}
