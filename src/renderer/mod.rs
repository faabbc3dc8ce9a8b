//! Renderer-facing view of the laser simulation
//!
//! The simulation hands out read-only records per visible beam. Texture keys
//! stay symbolic: resolving them to atlas rects is the renderer's job.

pub mod records;
pub mod vertex;

pub use records::{BeamKind, BeamRecord, BentLaserRecord, LaserRecord, TextureKey};
pub use vertex::{LaserInstanceRaw, TrailVertex};
