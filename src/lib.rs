//! Sandrun - movement, collision and progression core for a desert obstacle course
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player kinematics, collisions, triggers, enemies, driver)
//! - `persistence`: Checkpoint progress storage
//! - `tuning`: Data-driven movement and balance constants

pub mod persistence;
pub mod sim;
pub mod tuning;

pub use persistence::{FileStore, MemoryStore, ProgressError, ProgressStore};
pub use tuning::{EnemyStats, Tuning};

use glam::Vec3;

/// Simulation timing constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Longest frame the driver will accept before clamping (prevents spiral of death)
    pub const MAX_FRAME_DT: f32 = 0.05;
}

/// Rotate a (strafe, forward) movement intent by camera yaw into world XZ.
///
/// The intent is normalized first so diagonal movement is not faster than
/// straight movement. A zero intent stays zero.
#[inline]
pub fn yaw_to_world(strafe: f32, forward: f32, yaw: f32) -> Vec3 {
    let dir = Vec3::new(strafe, 0.0, forward).normalize_or_zero();
    let (sin, cos) = yaw.sin_cos();
    Vec3::new(dir.x * cos - dir.z * sin, 0.0, dir.x * sin + dir.z * cos)
}

/// Camera yaw that makes a forward intent move along `dir` (XZ plane)
#[inline]
pub fn yaw_facing(dir: Vec3) -> f32 {
    (-dir.x).atan2(dir.z)
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
