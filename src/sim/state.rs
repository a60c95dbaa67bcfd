//! Session state and core simulation types
//!
//! Everything that changes during a run lives in [`Session`]. Route data is
//! kept separately and only borrowed.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::route::{EnemyKind, EnemySpawn, RouteData};
use crate::tuning::{EnemyStats, Tuning};

/// Something that happened during a tick, for presentation to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Player advanced to this checkpoint index
    CheckpointReached(u32),
    /// Coin with this id was picked up
    CoinCollected(u32),
    HazardHit,
    EnemyHit,
    Respawned,
    /// Landed while falling faster than the hard-landing threshold
    HardLanding,
    Jumped,
    /// Progress was explicitly cleared
    ProgressReset,
}

/// The player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Sprint stamina, always within [0, 1]
    pub stamina: f32,
    pub grounded: bool,
    /// Seconds of enemy immunity remaining (never negative)
    pub invulnerable: f32,
    /// Highest checkpoint reached this session
    pub checkpoint: u32,
    /// Anchor of `checkpoint`
    pub respawn_point: Vec3,
}

impl Player {
    pub fn new(checkpoint: u32, respawn_point: Vec3) -> Self {
        Self {
            position: respawn_point,
            velocity: Vec3::ZERO,
            stamina: 1.0,
            grounded: false,
            invulnerable: 0.0,
            checkpoint,
            respawn_point,
        }
    }

    #[inline]
    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable > 0.0
    }

    /// Put the player back at the respawn point and start the immunity window
    pub fn respawn(&mut self, tuning: &Tuning) {
        self.place_at_respawn(tuning);
        self.invulnerable = tuning.respawn_invulnerability;
    }

    /// Put the player above the respawn point at rest (no immunity)
    pub fn place_at_respawn(&mut self, tuning: &Tuning) {
        self.position = self.respawn_point + Vec3::Y * tuning.respawn_height;
        self.velocity = Vec3::ZERO;
    }

    /// Move progression to `index` and retarget the respawn point
    pub fn set_checkpoint(&mut self, index: u32, route: &RouteData) {
        self.checkpoint = index;
        self.respawn_point = route.checkpoint_anchor(index);
    }
}

/// An enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub position: Vec3,
    /// Patrol reference point (initial placement)
    pub anchor: Vec3,
    /// Current horizontal heading (unit length or zero)
    pub heading: Vec3,
    /// Whether the enemy chased the player last tick
    pub chasing: bool,
}

impl Enemy {
    pub fn from_spawn(id: u32, spawn: &EnemySpawn) -> Self {
        Self {
            id,
            kind: spawn.kind,
            position: spawn.position,
            anchor: spawn.position,
            heading: Vec3::ZERO,
            chasing: false,
        }
    }

    pub fn stats(&self, tuning: &Tuning) -> EnemyStats {
        match self.kind {
            EnemyKind::Walker => tuning.enemies.walker,
            EnemyKind::Sprinter => tuning.enemies.sprinter,
            EnemyKind::Guard => tuning.enemies.guard,
        }
    }
}

/// A one-shot collectible
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub position: Vec3,
    pub collected: bool,
}

/// Mutable state for one play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub coins: Vec<Coin>,
    /// Simulated seconds elapsed (drives enemy patrol phase)
    pub clock: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Session {
    /// Create a session starting at `checkpoint` (clamped into the route)
    pub fn new(route: &RouteData, tuning: &Tuning, checkpoint: u32) -> Self {
        let checkpoint = checkpoint.min(route.last_checkpoint());
        let mut player = Player::new(checkpoint, route.checkpoint_anchor(checkpoint));
        player.place_at_respawn(tuning);

        let enemies = route
            .enemies
            .iter()
            .enumerate()
            .map(|(i, spawn)| Enemy::from_spawn(i as u32, spawn))
            .collect();

        let coins = route
            .coins
            .iter()
            .enumerate()
            .map(|(i, &position)| Coin {
                id: i as u32,
                position,
                collected: false,
            })
            .collect();

        Self {
            player,
            enemies,
            coins,
            clock: 0.0,
            time_ticks: 0,
        }
    }

    /// Number of coins collected so far
    pub fn coins_collected(&self) -> usize {
        self.coins.iter().filter(|c| c.collected).count()
    }
}
