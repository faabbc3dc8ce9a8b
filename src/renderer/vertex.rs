//! GPU-ready layouts for laser draw data

use bytemuck::{Pod, Zeroable};

/// One straight laser as a per-instance record
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct LaserInstanceRaw {
    pub origin: [f32; 2],
    pub angle: f32,
    /// Head, body, tail lengths
    pub lengths: [f32; 3],
    pub width: f32,
    pub opacity: f32,
    pub texture_id: u32,
    pub color_index: u32,
}

/// One bent laser trail sample as a strip vertex
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct TrailVertex {
    pub position: [f32; 2],
    /// Distance along the trail from the oldest sample
    pub distance: f32,
    pub width: f32,
    pub opacity: f32,
    pub color_index: u32,
}

impl TrailVertex {
    pub const fn new(x: f32, y: f32, distance: f32, width: f32, opacity: f32, color_index: u32) -> Self {
        Self {
            position: [x, y],
            distance,
            width,
            opacity,
            color_index,
        }
    }
}
