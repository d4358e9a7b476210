//! Deterministic simulation cores for a set of browser visual sketches:
//! a Perlin-noise flow-field particle simulator with palette cycling, the
//! signed-distance math behind a ray-marched two-sphere blob, and the
//! proximity linking used by the dot-matrix text effect.
//!
//! Rendering and DOM wiring live in the host (see `flowfield-wasm`); this
//! crate only produces frame data and is fully testable natively.

pub mod cloud;
pub mod config;
pub mod field;
pub mod math;
pub mod noise_source;
pub mod palette;
pub mod particle;
pub mod sdf;
pub mod simulator;
