//! Movement and balance tuning
//!
//! Every number the simulation uses lives here so tests and level designers
//! can override values without touching the algorithms. Loaded from JSON;
//! missing fields fall back to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Per-enemy-kind movement constants
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    /// Movement speed (units/s)
    pub speed: f32,
    /// Distance at which the enemy switches from patrol to chase
    pub detect_radius: f32,
}

/// Enemy stats by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub walker: EnemyStats,
    pub sprinter: EnemyStats,
    pub guard: EnemyStats,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            walker: EnemyStats {
                speed: 1.2,
                detect_radius: 9.0,
            },
            sprinter: EnemyStats {
                speed: 2.4,
                detect_radius: 12.0,
            },
            guard: EnemyStats {
                speed: 0.9,
                detect_radius: 6.0,
            },
        }
    }
}

/// Simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Kinematics ===
    /// Downward acceleration (units/s²)
    pub gravity: f32,
    /// Vertical velocity applied by a jump
    pub jump_impulse: f32,
    /// Walking speed (units/s)
    pub base_speed: f32,
    /// Sprint speed = base_speed * sprint_multiplier
    pub sprint_multiplier: f32,
    /// Landing faster than this (downward) signals a hard landing
    pub hard_landing_speed: f32,
    /// Falling below this height respawns the player
    pub fall_limit: f32,

    // === Stamina ===
    pub stamina_drain: f32,
    pub stamina_regen: f32,
    /// Sprint is refused at or below this stamina
    pub sprint_min_stamina: f32,

    // === Collision ===
    pub player_radius: f32,
    /// Feet may sit this far below a platform top and still land
    pub landing_band_below: f32,
    /// Feet may hover this far above a platform top and still land
    pub landing_band_above: f32,
    /// Rising faster than this never lands
    pub max_landing_rise_speed: f32,
    /// Per-tick blend toward the platform interior on landing
    pub magnetic_blend: f32,
    /// Distance kept from platform edges by magnetic landing
    pub magnetic_margin: f32,

    // === Respawn ===
    /// Height above the checkpoint anchor the player respawns at
    pub respawn_height: f32,
    /// Seconds of enemy immunity after a respawn
    pub respawn_invulnerability: f32,

    // === Triggers ===
    pub hazard_half_height: f32,
    pub checkpoint_radius: f32,
    pub coin_radius: f32,
    pub enemy_contact_radius: f32,

    // === Enemies ===
    /// Patrol phase advance (radians per simulated second)
    pub patrol_rate: f32,
    pub enemies: EnemyTuning,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            gravity: 18.0,
            jump_impulse: 10.0,
            base_speed: 6.0,
            sprint_multiplier: 1.5,
            hard_landing_speed: 12.0,
            fall_limit: -20.0,

            stamina_drain: 0.6,
            stamina_regen: 0.35,
            sprint_min_stamina: 0.08,

            player_radius: 0.9,
            landing_band_below: 1.2,
            landing_band_above: 0.6,
            max_landing_rise_speed: 2.0,
            magnetic_blend: 0.08,
            magnetic_margin: 0.5,

            respawn_height: 2.0,
            respawn_invulnerability: 1.2,

            hazard_half_height: 2.0,
            checkpoint_radius: 2.8,
            coin_radius: 1.5,
            enemy_contact_radius: 1.4,

            patrol_rate: 1.0,
            enemies: EnemyTuning::default(),
        }
    }
}

impl Tuning {
    /// Sprint speed (units/s)
    pub fn sprint_speed(&self) -> f32 {
        self.base_speed * self.sprint_multiplier
    }

    /// Parse tuning from JSON (partial documents allowed)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    log::warn!("Malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}
