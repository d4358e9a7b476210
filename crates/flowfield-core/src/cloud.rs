//! Proximity linking for the dot-matrix text effect.
//!
//! The host samples rendered glyph pixels into a 3-D point cloud; this
//! module produces the index pairs of points close enough to connect with
//! a line. A uniform hash grid keeps linking near-linear for bounded
//! density instead of the naive all-pairs scan.

use glam::Vec3;

/// Uniform spatial hash grid over a point cloud.
///
/// Counting-sort construction: count points per cell, prefix sum, scatter.
struct PointGrid {
    cell_size: f32,
    inv_cell_size: f32,
    table_size: usize,
    cell_count: Vec<u32>,
    cell_start: Vec<u32>,
    sorted_indices: Vec<u32>,
}

impl PointGrid {
    fn build(points: &[Vec3], cell_size: f32) -> Self {
        let table_size = (points.len() * 2).next_power_of_two().max(64);
        let mut grid = Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            table_size,
            cell_count: vec![0u32; table_size],
            cell_start: vec![0u32; table_size],
            sorted_indices: vec![0u32; points.len()],
        };

        let mut hashes = vec![0u32; points.len()];
        for (i, &p) in points.iter().enumerate() {
            let (cx, cy, cz) = grid.cell_coords(p);
            let h = grid.hash_cell(cx, cy, cz);
            hashes[i] = h as u32;
            grid.cell_count[h] += 1;
        }

        grid.cell_start[0] = 0;
        for k in 1..table_size {
            grid.cell_start[k] = grid.cell_start[k - 1] + grid.cell_count[k - 1];
        }

        for v in grid.cell_count.iter_mut() {
            *v = 0;
        }
        for (i, &h) in hashes.iter().enumerate() {
            let h = h as usize;
            let idx = grid.cell_start[h] + grid.cell_count[h];
            grid.sorted_indices[idx as usize] = i as u32;
            grid.cell_count[h] += 1;
        }

        grid
    }

    /// Visit every point in the 3x3x3 cell block around `pos`. Hash
    /// collisions can surface far points and duplicates; the caller must
    /// distance-check and dedupe.
    fn visit_neighbors<F: FnMut(u32)>(&self, pos: Vec3, mut callback: F) {
        let (cx, cy, cz) = self.cell_coords(pos);
        for dx in -1..=1_i32 {
            for dy in -1..=1_i32 {
                for dz in -1..=1_i32 {
                    let h = self.hash_cell(cx + dx, cy + dy, cz + dz);
                    let start = self.cell_start[h] as usize;
                    let end = start + self.cell_count[h] as usize;
                    for idx in start..end {
                        callback(self.sorted_indices[idx]);
                    }
                }
            }
        }
    }

    #[inline]
    fn hash_cell(&self, cx: i32, cy: i32, cz: i32) -> usize {
        let h = (cx as u32).wrapping_mul(73856093)
            ^ (cy as u32).wrapping_mul(19349663)
            ^ (cz as u32).wrapping_mul(83492791);
        (h as usize) % self.table_size
    }

    #[inline]
    fn cell_coords(&self, pos: Vec3) -> (i32, i32, i32) {
        (
            (pos.x * self.inv_cell_size).floor() as i32,
            (pos.y * self.inv_cell_size).floor() as i32,
            (pos.z * self.inv_cell_size).floor() as i32,
        )
    }
}

/// All unordered index pairs `(i, j)` with `i < j` whose points lie
/// strictly closer than `max_dist`. Each pair appears exactly once; output
/// is sorted. Empty input or a non-positive distance yields no pairs.
pub fn link_pairs(points: &[Vec3], max_dist: f32) -> Vec<(u32, u32)> {
    if points.len() < 2 || max_dist <= 0.0 {
        return Vec::new();
    }

    let grid = PointGrid::build(points, max_dist);
    let max_sq = max_dist * max_dist;
    let mut pairs = Vec::new();

    for (i, &p) in points.iter().enumerate() {
        grid.visit_neighbors(p, |j| {
            let j = j as usize;
            if j > i && p.distance_squared(points[j]) < max_sq {
                pairs.push((i as u32, j as u32));
            }
        });
    }

    // Colliding table slots can be visited more than once per query.
    pairs.sort_unstable();
    pairs.dedup();
    pairs
}
