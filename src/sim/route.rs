//! Route data: the static layout the simulation runs against
//!
//! Platforms, checkpoint anchors, hazards, coins and enemy placements are
//! produced once (by a level generator or [`RouteData::reference`]) and never
//! change during a session.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Number of checkpoints in the reference layout
pub const REFERENCE_CHECKPOINTS: usize = 45;

/// Height of the catch-all ground plane in the reference layout
pub const REFERENCE_GROUND_HEIGHT: f32 = 0.5;

/// An axis-aligned platform slab
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Platform {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    /// Height of the walkable top surface
    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }

    /// Whether a point lies strictly inside the platform's XZ footprint
    #[inline]
    pub fn contains_xz(&self, pos: Vec3) -> bool {
        (pos.x - self.center.x).abs() < self.half_extents.x
            && (pos.z - self.center.z).abs() < self.half_extents.z
    }
}

/// An always-active danger zone
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub center: Vec3,
    /// Half-width along X
    pub half_width: f32,
    /// Half-depth along Z
    pub half_depth: f32,
}

/// Enemy archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Walker,
    Sprinter,
    Guard,
}

/// Initial enemy placement
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub position: Vec3,
}

/// Immutable layout for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteData {
    pub platforms: Vec<Platform>,
    /// Checkpoint anchors in progression order
    pub checkpoints: Vec<Vec3>,
    pub hazards: Vec<Hazard>,
    /// Coin positions; a coin's id is its index
    pub coins: Vec<Vec3>,
    pub enemies: Vec<EnemySpawn>,
    /// Catch-all floor height (None = bottomless)
    #[serde(default)]
    pub ground_height: Option<f32>,
}

impl RouteData {
    /// Number of checkpoints
    pub fn checkpoint_count(&self) -> u32 {
        self.checkpoints.len() as u32
    }

    /// Highest valid checkpoint index
    pub fn last_checkpoint(&self) -> u32 {
        self.checkpoint_count().saturating_sub(1)
    }

    /// Anchor of checkpoint `index`, clamped into range.
    ///
    /// An empty checkpoint list anchors everything at the origin.
    pub fn checkpoint_anchor(&self, index: u32) -> Vec3 {
        let index = index.min(self.last_checkpoint()) as usize;
        self.checkpoints.get(index).copied().unwrap_or(Vec3::ZERO)
    }

    /// Index the player should reach next, or None at the final checkpoint
    pub fn next_checkpoint(&self, current: u32) -> Option<u32> {
        let next = current.saturating_add(1).min(self.last_checkpoint());
        (next > current).then_some(next)
    }

    /// Build the reference 45-checkpoint layout.
    ///
    /// Deterministic for a given seed: the only randomness is a small height
    /// jitter per platform.
    pub fn reference(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut route = Self {
            ground_height: Some(REFERENCE_GROUND_HEIGHT),
            ..Self::default()
        };

        let directions = [1.0f32, -1.0];
        let (mut x, mut z) = (0.0f32, 0.0f32);
        for cp in 0..REFERENCE_CHECKPOINTS {
            let difficulty = (cp / 5) as f32;
            let gap = 5.0 + difficulty * 0.8;
            let jitter =
                ((cp as f32 * 0.4).sin() + rng.random::<f32>() * 0.3) * (difficulty * 0.5);
            x += gap * directions[cp % 2];
            z += 6.0;
            let y = (3.0 + jitter).max(2.0);
            let scale = 1.0 + (2.0 - difficulty * 0.2).max(0.0);
            let half = 7.0 / scale;

            route.platforms.push(Platform::new(
                Vec3::new(x, y, z),
                Vec3::new(half, 0.5, half),
            ));
            route.checkpoints.push(Vec3::new(x, y + 3.0, z));
        }

        for anchor in route.checkpoints.iter().skip(8).step_by(7) {
            route.hazards.push(Hazard {
                center: *anchor + Vec3::new(2.0, 0.5, -2.0),
                half_width: 3.0,
                half_depth: 3.0,
            });
        }

        for anchor in route.checkpoints.iter().skip(14).step_by(5) {
            route.coins.push(*anchor + Vec3::new(1.5, 1.2, -1.5));
        }

        let placements = [
            (EnemyKind::Walker, 7, Vec3::new(2.0, -2.0, 0.0)),
            (EnemyKind::Sprinter, 20, Vec3::new(-2.0, -1.0, -2.0)),
            (EnemyKind::Guard, 33, Vec3::new(0.0, -1.0, 0.0)),
        ];
        for (kind, index, offset) in placements {
            route.enemies.push(EnemySpawn {
                kind,
                position: route.checkpoint_anchor(index) + offset,
            });
        }

        log::debug!(
            "Reference route (seed {}): {} platforms, {} hazards, {} coins, {} enemies",
            seed,
            route.platforms.len(),
            route.hazards.len(),
            route.coins.len(),
            route.enemies.len()
        );

        route
    }
}
