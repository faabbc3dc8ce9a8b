//! Laser test level
//!
//! A fixed spawn pattern that exercises every beam feature: telegraphed
//! straight lasers, a rotating eight-way burst, an orbiting bent laser and
//! lasers aimed at a wandering player. Used by the headless binary for soak
//! runs and by tests as a determinism check.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::LaserSettings;
use crate::sim::{BentLaserId, BentLaserSpec, LaserField, LaserId, LaserSpec, TickInput, tick};

/// Playfield size in pixels
pub const PLAYFIELD: Vec2 = Vec2::new(384.0, 448.0);
/// Player hitbox radius
pub const PLAYER_RADIUS: f32 = 3.0;
/// Player movement per frame
const PLAYER_SPEED: f32 = 2.5;

/// Rotation of the eight-way burst (degrees per frame)
const BURST_SPIN: f32 = 0.25;
/// Frames a bent laser orbits before being killed
const ORBIT_FRAMES: u64 = 180;

#[derive(Debug, Clone, Copy)]
enum Scheduled {
    /// Fire a telegraphed laser at full strength
    Fire { id: LaserId, at: u64 },
    /// Retract a laser
    Retire { id: LaserId, at: u64 },
}

#[derive(Debug, Clone, Copy)]
struct Orbiter {
    id: BentLaserId,
    start: u64,
}

/// Scripted spawner for the laser test level
#[derive(Debug, Clone)]
pub struct LaserTestLevel {
    frame: u64,
    activation_frames: u32,
    center: Vec2,
    schedule: Vec<Scheduled>,
    burst: Vec<LaserId>,
    orbiters: Vec<Orbiter>,
    /// Spawns rejected by a full pool
    pub dropped_spawns: u32,
}

impl LaserTestLevel {
    pub fn new(settings: &LaserSettings) -> Self {
        Self {
            frame: 0,
            activation_frames: settings.default_activation_frames,
            center: PLAYFIELD * 0.5,
            schedule: Vec::new(),
            burst: Vec::new(),
            orbiters: Vec::new(),
            dropped_spawns: 0,
        }
    }

    /// Run this frame's script; call before the field is stepped
    pub fn step(&mut self, field: &mut LaserField, player: Vec2) {
        self.frame += 1;
        let frame = self.frame;

        if frame % 120 == 0 {
            // Warning strip first, full beam 40 frames later
            let spawned = field.create_laser(&LaserSpec {
                x: self.center.x,
                y: 400.0,
                angle_degrees: 270.0,
                l1: 30.0,
                l2: 200.0,
                l3: 30.0,
                width: 24.0,
                texture_id: 1,
                color_index: 1,
                ..Default::default()
            });
            if let Some(id) = self.track(spawned) {
                if let Some(laser) = field.lasers_mut().get_mut(id) {
                    laser.turn_half_on(self.activation_frames);
                }
                self.schedule.push(Scheduled::Fire { id, at: frame + 40 });
                self.schedule.push(Scheduled::Retire { id, at: frame + 100 });
            }
        }

        if frame % 180 == 60 {
            for i in 0..8 {
                let spawned = field.create_laser(&LaserSpec {
                    x: self.center.x,
                    y: self.center.y,
                    angle_degrees: i as f32 * 45.0,
                    l1: 5.0,
                    l2: 180.0,
                    l3: 15.0,
                    width: 16.0,
                    texture_id: 2,
                    color_index: 9,
                    activation_frames: Some(20),
                    node: 8.0,
                    ..Default::default()
                });
                if let Some(id) = self.track(spawned) {
                    self.burst.push(id);
                    self.schedule.push(Scheduled::Retire { id, at: frame + 150 });
                }
            }
        }

        if frame % 240 == 120 {
            let spawned = field.create_bent_laser(&BentLaserSpec {
                x: 100.0,
                y: 300.0,
                trail_length: 50,
                width: 20.0,
                color_index: 5,
                sample_rate: 4,
                activation_frames: Some(20),
            });
            if let Some(id) = spawned {
                self.orbiters.push(Orbiter { id, start: frame });
            } else {
                self.dropped_spawns += 1;
            }
        }

        if frame % 60 == 0 {
            let source = Vec2::new(self.center.x, 300.0);
            let aim = player - source;
            let spawned = field.create_laser(&LaserSpec {
                x: source.x,
                y: source.y,
                angle_degrees: aim.y.atan2(aim.x).to_degrees(),
                l1: 60.0,
                l2: 120.0,
                l3: 60.0,
                width: 20.0,
                texture_id: 3,
                color_index: 3,
                activation_frames: Some(25),
                head_node: 6.0,
                ..Default::default()
            });
            if let Some(id) = self.track(spawned) {
                self.schedule.push(Scheduled::Retire { id, at: frame + 90 });
            }
        }

        self.spin_burst(field);
        self.move_orbiters(field);
        self.run_schedule(field);
    }

    fn track(&mut self, spawned: Option<LaserId>) -> Option<LaserId> {
        if spawned.is_none() {
            self.dropped_spawns += 1;
        }
        spawned
    }

    fn spin_burst(&mut self, field: &mut LaserField) {
        let pool = field.lasers_mut();
        self.burst.retain(|&id| match pool.get_mut(id) {
            Some(laser) => {
                let angle = laser.angle_degrees() + BURST_SPIN;
                laser.set_angle_degrees(angle);
                true
            }
            None => false,
        });
    }

    fn move_orbiters(&mut self, field: &mut LaserField) {
        let frame = self.frame;
        let center = self.center;
        let pool = field.bent_lasers_mut();
        self.orbiters.retain(|orbiter| {
            let elapsed = frame - orbiter.start;
            let angle = elapsed as f32 * 0.05;
            let head = center + crate::direction(angle) * 100.0;
            if !pool.update_head(orbiter.id, head) {
                return false;
            }
            if elapsed > ORBIT_FRAMES {
                pool.kill(orbiter.id);
                return false;
            }
            true
        });
    }

    fn run_schedule(&mut self, field: &mut LaserField) {
        let frame = self.frame;
        let pool = field.lasers_mut();
        self.schedule.retain(|task| match *task {
            Scheduled::Fire { id, at } if at <= frame => {
                if let Some(laser) = pool.get_mut(id) {
                    laser.turn_on(10);
                }
                false
            }
            Scheduled::Retire { id, at } if at <= frame => {
                pool.kill(id);
                false
            }
            _ => true,
        });
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }
}

/// Player that drifts randomly around the lower half of the screen
#[derive(Debug, Clone)]
pub struct WanderingPlayer {
    pub pos: Vec2,
    heading: Vec2,
    rng: Pcg32,
}

impl WanderingPlayer {
    pub fn new(seed: u64) -> Self {
        Self {
            pos: Vec2::new(PLAYFIELD.x * 0.5, PLAYFIELD.y * 0.2),
            heading: Vec2::ZERO,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn step(&mut self) {
        // Pick a new heading now and then
        if self.rng.random_range(0..30) == 0 {
            let turn = Vec2::new(self.rng.random_range(-1.0..1.0), self.rng.random_range(-1.0..1.0));
            self.heading = turn.normalize_or_zero();
        }
        self.pos += self.heading * PLAYER_SPEED;
        self.pos = self
            .pos
            .clamp(Vec2::splat(8.0), Vec2::new(PLAYFIELD.x - 8.0, PLAYFIELD.y * 0.5));
    }
}

/// Outcome of a soak run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SoakSummary {
    pub seed: u64,
    pub frames: u64,
    /// Frames on which the player was inside a live beam
    pub hit_frames: u64,
    pub peak_lasers: usize,
    pub peak_bent_lasers: usize,
    pub dropped_spawns: u32,
    pub final_player: (f32, f32),
}

/// Play the test level for `frames` frames
pub fn run_soak(seed: u64, frames: u64, settings: &LaserSettings) -> SoakSummary {
    let mut field = LaserField::new(settings);
    let mut level = LaserTestLevel::new(settings);
    let mut player = WanderingPlayer::new(seed);
    let mut summary = SoakSummary {
        seed,
        frames,
        ..Default::default()
    };

    for _ in 0..frames {
        player.step();
        level.step(&mut field, player.pos);

        let report = tick(
            &mut field,
            &TickInput {
                player: Some(player.pos),
                player_radius: PLAYER_RADIUS,
                clear: false,
            },
        );

        if let Some(hit) = report.hit {
            summary.hit_frames += 1;
            log::debug!("Frame {}: player hit by {:?}", level.frame(), hit);
        }
        summary.peak_lasers = summary.peak_lasers.max(field.laser_count());
        summary.peak_bent_lasers = summary.peak_bent_lasers.max(field.bent_laser_count());
    }

    summary.dropped_spawns = level.dropped_spawns;
    summary.final_player = (player.pos.x, player.pos.y);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soak_is_deterministic() {
        let settings = LaserSettings::default();
        let a = run_soak(12345, 900, &settings);
        let b = run_soak(12345, 900, &settings);
        assert_eq!(a, b);
        assert!(a.peak_lasers > 0);
        assert!(a.peak_bent_lasers > 0);
    }

    #[test]
    fn test_small_pool_drops_spawns() {
        let settings = LaserSettings {
            max_lasers: 4,
            ..Default::default()
        };
        let summary = run_soak(7, 400, &settings);
        assert!(summary.peak_lasers <= 4);
        assert!(summary.dropped_spawns > 0);
    }

    #[test]
    fn test_orbiter_is_killed() {
        let settings = LaserSettings::default();
        let mut field = LaserField::new(&settings);
        let mut level = LaserTestLevel::new(&settings);
        for _ in 0..120 {
            level.step(&mut field, Vec2::ZERO);
            field.update();
        }
        assert_eq!(field.bent_laser_count(), 1);

        // Orbit time plus the retract
        for _ in 0..(ORBIT_FRAMES + 40) {
            level.step(&mut field, Vec2::ZERO);
            field.update();
        }
        assert!(level.orbiters.is_empty());
    }

    #[test]
    fn test_player_stays_in_bounds() {
        let mut player = WanderingPlayer::new(99);
        for _ in 0..2000 {
            player.step();
            assert!(player.pos.x >= 8.0 && player.pos.x <= PLAYFIELD.x - 8.0);
            assert!(player.pos.y >= 8.0 && player.pos.y <= PLAYFIELD.y * 0.5);
        }
    }
}
