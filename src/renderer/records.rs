//! Per-beam render records

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::vertex::{LaserInstanceRaw, TrailVertex};
use crate::sim::{BentLaser, BentLaserId, Laser, LaserId};

/// Atlas image used for every bent laser
pub const BENT_LASER_TEXTURE_ID: u32 = 0;

/// Symbolic atlas lookup: which image and which palette row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureKey {
    pub texture_id: u32,
    /// Palette row, 1..=16
    pub color_index: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamKind {
    Straight,
    Bent,
}

/// Snapshot of a visible straight laser
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserRecord {
    pub id: LaserId,
    pub origin: Vec2,
    /// Direction (radians)
    pub angle: f32,
    pub l1: f32,
    pub l2: f32,
    pub l3: f32,
    pub width: f32,
    pub opacity: f32,
    pub texture: TextureKey,
    pub node: f32,
    pub head_node: f32,
    /// Frames since spawn (for animated decorations)
    pub age: u32,
}

impl LaserRecord {
    pub const KIND: BeamKind = BeamKind::Straight;

    /// `None` when there is nothing to draw
    pub fn from_laser(id: LaserId, laser: &Laser) -> Option<Self> {
        let fade = laser.fade();
        if !fade.is_visible() || fade.width() <= 0.0 {
            return None;
        }

        let (l1, l2, l3) = laser.lengths();
        Some(Self {
            id,
            origin: laser.origin,
            angle: laser.angle,
            l1,
            l2,
            l3,
            width: fade.width(),
            opacity: fade.opacity(),
            texture: laser.texture_key(),
            node: laser.node,
            head_node: laser.head_node,
            age: fade.age(),
        })
    }

    pub fn to_raw(&self) -> LaserInstanceRaw {
        LaserInstanceRaw {
            origin: self.origin.to_array(),
            angle: self.angle,
            lengths: [self.l1, self.l2, self.l3],
            width: self.width,
            opacity: self.opacity,
            texture_id: self.texture.texture_id,
            color_index: self.texture.color_index as u32,
        }
    }
}

/// Snapshot of a visible bent laser, borrowing its trail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BentLaserRecord<'a> {
    pub id: BentLaserId,
    pub head: Vec2,
    /// Trail oldest to newest, split where the ring wraps
    pub trail: (&'a [Vec2], &'a [Vec2]),
    pub width: f32,
    pub opacity: f32,
    pub texture: TextureKey,
}

impl<'a> BentLaserRecord<'a> {
    pub const KIND: BeamKind = BeamKind::Bent;

    /// `None` when there is nothing to draw
    pub fn from_laser(id: BentLaserId, laser: &'a BentLaser) -> Option<Self> {
        let fade = laser.fade();
        if !fade.is_visible() || fade.width() <= 0.0 || laser.valid_samples() < 2 {
            return None;
        }

        Some(Self {
            id,
            head: laser.head(),
            trail: laser.trail().as_slices(),
            width: fade.width(),
            opacity: fade.opacity(),
            texture: TextureKey {
                texture_id: BENT_LASER_TEXTURE_ID,
                color_index: laser.color_index(),
            },
        })
    }

    /// Trail samples oldest to newest
    pub fn points(&self) -> impl Iterator<Item = Vec2> + 'a {
        let (older, newer) = self.trail;
        older.iter().chain(newer.iter()).copied()
    }

    pub fn point_count(&self) -> usize {
        self.trail.0.len() + self.trail.1.len()
    }

    /// Append one strip vertex per trail sample
    pub fn write_vertices(&self, out: &mut Vec<TrailVertex>) {
        out.reserve(self.point_count());
        let mut distance = 0.0;
        let mut prev: Option<Vec2> = None;
        for p in self.points() {
            if let Some(q) = prev {
                distance += p.distance(q);
            }
            out.push(TrailVertex::new(
                p.x,
                p.y,
                distance,
                self.width,
                self.opacity,
                self.texture.color_index as u32,
            ));
            prev = Some(p);
        }
    }
}

/// Either kind of record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BeamRecord<'a> {
    Straight(LaserRecord),
    Bent(BentLaserRecord<'a>),
}

impl BeamRecord<'_> {
    pub fn kind(&self) -> BeamKind {
        match self {
            BeamRecord::Straight(_) => BeamKind::Straight,
            BeamRecord::Bent(_) => BeamKind::Bent,
        }
    }

    pub fn texture(&self) -> TextureKey {
        match self {
            BeamRecord::Straight(r) => r.texture,
            BeamRecord::Bent(r) => r.texture,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{BentLaserSpec, LaserField, LaserSpec};

    #[test]
    fn test_invisible_until_width_grows() {
        let mut field = LaserField::with_capacity(4, 4);
        let id = field
            .create_laser(&LaserSpec {
                l2: 10.0,
                width: 8.0,
                texture_id: 2,
                color_index: 5,
                activation_frames: Some(4),
                ..Default::default()
            })
            .unwrap();

        // Width is still zero before the first update
        assert_eq!(field.query().lasers().count(), 0);

        field.update();
        let record = field.query().lasers().next().unwrap();
        assert_eq!(record.id, id);
        assert!((record.width - 2.0).abs() < 1e-5);
        assert_eq!(record.texture, TextureKey { texture_id: 2, color_index: 5 });

        let raw = record.to_raw();
        assert_eq!(raw.lengths, [0.0, 10.0, 0.0]);
        assert_eq!(raw.color_index, 5);
    }

    #[test]
    fn test_bent_record_vertices() {
        let mut field = LaserField::with_capacity(1, 1);
        let id = field
            .create_bent_laser(&BentLaserSpec {
                width: 4.0,
                sample_rate: 1,
                activation_frames: Some(1),
                color_index: 7,
                ..Default::default()
            })
            .unwrap();
        field.update();
        field.bent_lasers_mut().update_head(id, Vec2::new(0.0, 0.0));
        assert_eq!(field.query().bent_lasers().count(), 0);

        field.bent_lasers_mut().update_head(id, Vec2::new(3.0, 4.0));
        field.bent_lasers_mut().update_head(id, Vec2::new(3.0, 10.0));

        let query = field.query();
        let record = query.bent_lasers().next().unwrap();
        assert_eq!(BentLaserRecord::KIND, BeamKind::Bent);
        assert_eq!(record.point_count(), 3);
        assert_eq!(record.texture.texture_id, BENT_LASER_TEXTURE_ID);

        let mut verts = Vec::new();
        record.write_vertices(&mut verts);
        assert_eq!(verts.len(), 3);
        assert_eq!(verts[0].distance, 0.0);
        assert!((verts[1].distance - 5.0).abs() < 1e-5);
        assert!((verts[2].distance - 11.0).abs() < 1e-5);
        assert_eq!(verts[2].color_index, 7);
    }
}
