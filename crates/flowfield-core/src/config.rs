/// Flow-field simulation parameters. Defaults match the sketch.
pub struct SimConfig {
    /// Grid cell size in pixels.
    pub scale: f32,
    /// Target particle population.
    pub particle_count: usize,
    /// Velocity magnitude cap per particle.
    pub max_speed: f32,
    /// Steering vector magnitude stored in every field cell.
    pub force_magnitude: f32,
    /// Noise coordinate step between adjacent grid cells.
    pub spatial_step: f32,
    /// Time-axis noise increment applied once per frame.
    pub time_step: f32,
    /// Angle range multiplier: noise * TAU * turns. The sketch uses 2.0
    /// (a double full turn) for extra curl.
    pub turns: f32,
    /// Alpha of the per-frame background fill that fades old trails.
    pub fade_alpha: f32,
    /// Trail stroke width in pixels.
    pub stroke_width: f32,
    /// Spatial scale for the per-frame color noise sample.
    pub color_noise_scale: f32,
    /// Per-frame advance of the global color offset.
    pub color_offset_step: f32,
    /// Seconds between automatic palette rotations.
    pub rotation_interval: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            scale: 20.0,
            particle_count: 300,
            max_speed: 3.0,
            force_magnitude: 0.5,
            spatial_step: 0.1,
            time_step: 0.005,
            turns: 2.0,
            fade_alpha: 25.0 / 255.0,
            stroke_width: 1.5,
            color_noise_scale: 0.01,
            color_offset_step: 0.002,
            rotation_interval: 10.0,
        }
    }
}
