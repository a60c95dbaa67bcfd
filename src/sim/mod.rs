//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Stable iteration order (route order for platforms, hazards, coins, enemies)
//! - No rendering, audio or platform dependencies
//!
//! The only I/O happens in [`Driver`], through a [`crate::ProgressStore`].

pub mod collision;
pub mod driver;
pub mod enemy;
pub mod route;
pub mod state;
pub mod tick;
pub mod triggers;

pub use collision::{Contact, Support, resolve_collision};
pub use driver::Driver;
pub use enemy::{advance_enemies, patrol_heading};
pub use route::{EnemyKind, EnemySpawn, Hazard, Platform, REFERENCE_CHECKPOINTS, RouteData};
pub use state::{Coin, Enemy, GameEvent, Player, Session};
pub use tick::{TickInput, autopilot, tick};
pub use triggers::{advance_checkpoint, collect_coins, guidance_heading, hazard_hit};
