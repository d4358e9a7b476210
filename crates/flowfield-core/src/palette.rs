//! Named color palettes with cyclic rotation.
//!
//! Exactly one palette is active at a time; switching is a global mutation
//! read by the next frame's color derivation, never per-particle state.

/// Base color triple as declared in a palette.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as floats in [0, 1] for blending.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Ordered palette table. Declaration order defines the rotation cycle.
pub struct PaletteTable {
    entries: Vec<(String, Vec<Rgb>)>,
    active: usize,
}

impl PaletteTable {
    /// The sketch's stock rotation set, in its cycling order.
    pub fn builtin() -> Self {
        let mut table = Self {
            entries: Vec::new(),
            active: 0,
        };
        table.insert(
            "twilight",
            vec![
                Rgb::new(94, 53, 177),
                Rgb::new(171, 71, 188),
                Rgb::new(240, 98, 146),
                Rgb::new(255, 183, 77),
            ],
        );
        table.insert(
            "lagoon",
            vec![
                Rgb::new(0, 77, 102),
                Rgb::new(0, 150, 167),
                Rgb::new(77, 208, 225),
                Rgb::new(178, 235, 242),
            ],
        );
        table.insert(
            "ember",
            vec![
                Rgb::new(191, 54, 12),
                Rgb::new(230, 81, 0),
                Rgb::new(255, 143, 0),
                Rgb::new(255, 202, 40),
            ],
        );
        table.insert(
            "meadow",
            vec![
                Rgb::new(27, 94, 32),
                Rgb::new(67, 160, 71),
                Rgb::new(156, 204, 101),
                Rgb::new(220, 237, 200),
            ],
        );
        table.insert(
            "frost",
            vec![
                Rgb::new(120, 144, 156),
                Rgb::new(176, 190, 197),
                Rgb::new(224, 247, 250),
                Rgb::new(255, 255, 255),
            ],
        );
        table
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a palette at runtime. Replacing an existing name keeps its
    /// position in the rotation order.
    pub fn insert(&mut self, name: &str, colors: Vec<Rgb>) {
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| n == name) {
            entry.1 = colors;
        } else {
            self.entries.push((name.to_string(), colors));
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    /// Activate a palette by name. Unknown names change nothing.
    pub fn select(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                self.active = idx;
                true
            }
            None => false,
        }
    }

    /// Advance to the next palette in declaration order, wrapping.
    pub fn advance(&mut self) {
        if !self.entries.is_empty() {
            self.active = (self.active + 1) % self.entries.len();
        }
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_name(&self) -> &str {
        self.entries
            .get(self.active)
            .map(|(n, _)| n.as_str())
            .unwrap_or("")
    }

    pub fn active_colors(&self) -> &[Rgb] {
        self.entries
            .get(self.active)
            .map(|(_, c)| c.as_slice())
            .unwrap_or(&[])
    }

    /// Base color for a particle slot in the active palette.
    pub fn base_color(&self, slot: usize) -> Rgb {
        pick(self.active_colors(), slot)
    }

    /// The color following `slot` in the active palette, the blend target
    /// for noise-driven color drift.
    pub fn next_color(&self, slot: usize) -> Rgb {
        pick(self.active_colors(), slot + 1)
    }
}

fn pick(colors: &[Rgb], slot: usize) -> Rgb {
    if colors.is_empty() {
        Rgb::new(255, 255, 255)
    } else {
        colors[slot % colors.len()]
    }
}
