//! Enemy AI: patrol until the player is close, then chase
//!
//! Patrol headings are a deterministic function of simulated time and the
//! enemy's anchor, so idle enemies drift in repeatable loops instead of
//! standing still.

use glam::Vec3;

use super::state::Enemy;
use crate::tuning::Tuning;

/// Patrol heading for an enemy anchored at `anchor` at patrol phase `phase`
pub fn patrol_heading(anchor: Vec3, phase: f32) -> Vec3 {
    Vec3::new((phase + anchor.z).sin(), 0.0, phase.cos()).normalize_or_zero()
}

/// Advance one enemy by `dt` toward the player or along its patrol.
///
/// Returns true if the enemy was within contact radius of the player. The
/// distance is taken before the enemy moves, the same one detection uses.
pub fn step_enemy(enemy: &mut Enemy, player_pos: Vec3, phase: f32, dt: f32, tuning: &Tuning) -> bool {
    let stats = enemy.stats(tuning);
    let distance = enemy.position.distance(player_pos);

    enemy.chasing = distance < stats.detect_radius;
    enemy.heading = if enemy.chasing {
        let to_player = player_pos - enemy.position;
        Vec3::new(to_player.x, 0.0, to_player.z).normalize_or_zero()
    } else {
        patrol_heading(enemy.anchor, phase)
    };

    enemy.position += enemy.heading * stats.speed * dt;

    distance < tuning.enemy_contact_radius
}

/// Advance every enemy; returns true if any touched the player
pub fn advance_enemies(
    enemies: &mut [Enemy],
    player_pos: Vec3,
    phase: f32,
    dt: f32,
    tuning: &Tuning,
) -> bool {
    let mut contact = false;
    for enemy in enemies.iter_mut() {
        contact |= step_enemy(enemy, player_pos, phase, dt, tuning);
    }
    contact
}
