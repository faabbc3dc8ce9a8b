//! Fixed-step laser frame
//!
//! One frame is: optional teardown, advance every beam, then probe the
//! player. Probing after the whole update keeps every beam on the same frame.

use glam::Vec2;

use super::field::{LaserField, LaserHit, UpdateStats};

/// Inputs for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player hitbox center, if the player is on screen
    pub player: Option<Vec2>,
    /// Player hitbox radius
    pub player_radius: f32,
    /// Stage teardown: drop all beams before stepping
    pub clear: bool,
}

/// What happened during a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub hit: Option<LaserHit>,
    pub update: UpdateStats,
}

/// Advance the laser field by one frame
pub fn tick(field: &mut LaserField, input: &TickInput) -> TickReport {
    if input.clear {
        field.clear();
    }

    let update = field.update();
    let hit = input
        .player
        .and_then(|player| field.first_hit(player, input.player_radius));

    TickReport { hit, update }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::LaserSpec;

    #[test]
    fn test_hit_sees_this_frames_state() {
        let mut field = LaserField::with_capacity(4, 4);
        let id = field
            .create_laser(&LaserSpec {
                l2: 100.0,
                width: 10.0,
                activation_frames: Some(2),
                ..Default::default()
            })
            .unwrap();

        let input = TickInput {
            player: Some(Vec2::new(50.0, 0.0)),
            player_radius: 2.0,
            ..Default::default()
        };

        assert_eq!(tick(&mut field, &input).hit, None);
        // Becomes steady during this frame's update, so the probe already sees it
        assert_eq!(tick(&mut field, &input).hit, Some(LaserHit::Straight(id)));
    }

    #[test]
    fn test_no_player_no_probe() {
        let mut field = LaserField::with_capacity(4, 4);
        field
            .create_laser(&LaserSpec {
                l2: 100.0,
                width: 10.0,
                activation_frames: Some(1),
                ..Default::default()
            })
            .unwrap();
        let report = tick(&mut field, &TickInput::default());
        assert_eq!(report.hit, None);
    }

    #[test]
    fn test_clear_input() {
        let mut field = LaserField::with_capacity(4, 4);
        field.create_laser(&LaserSpec::default()).unwrap();
        let input = TickInput {
            clear: true,
            ..Default::default()
        };
        tick(&mut field, &input);
        assert_eq!(field.laser_count(), 0);
    }
}
