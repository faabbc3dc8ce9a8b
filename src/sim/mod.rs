//! Deterministic laser simulation
//!
//! All beam logic lives here. This module must stay pure and deterministic:
//! - One `update` per pool per frame, before any hit-test
//! - Hit-tests are read-only
//! - No rendering or platform dependencies

pub mod bent;
pub mod collision;
pub mod fade;
pub mod field;
pub mod laser;
pub mod pool;
pub mod tick;
pub mod trail;

pub use bent::{BentLaser, BentLaserSpec};
pub use collision::{bent_hit, point_segment_distance_sq, straight_hit};
pub use fade::{BeamPhase, FadeAnimator};
pub use field::{LaserField, LaserHit, Query, UpdateStats};
pub use laser::{Laser, LaserSpec};
pub use pool::{Beam, BeamPool, BentLaserId, BentLaserPool, LaserId, LaserPool};
pub use tick::{TickInput, TickReport, tick};
pub use trail::TrailRing;
