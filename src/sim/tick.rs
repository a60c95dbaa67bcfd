//! Fixed timestep simulation tick
//!
//! Advances a [`Session`] by one step. The pipeline runs in a fixed order
//! every tick: stamina, horizontal movement, gravity, collision and jump,
//! fall limit, hazards, checkpoints, enemies, coins, invulnerability decay.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::collision::resolve_collision;
use super::enemy::advance_enemies;
use super::route::RouteData;
use super::state::{GameEvent, Player, Session};
use super::triggers::{advance_checkpoint, collect_coins, hazard_hit};
use crate::tuning::Tuning;
use crate::{yaw_facing, yaw_to_world};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// -1 back, 0 none, 1 forward (other values are reduced to their sign)
    pub forward: i8,
    /// -1 left, 0 none, 1 right
    pub strafe: i8,
    /// Jump held
    pub jump: bool,
    /// Sprint held
    pub sprint: bool,
    /// Camera yaw (radians) used to rotate movement into world space
    pub camera_yaw: f32,
}

/// Why the player was sent back to their checkpoint
#[derive(Debug, Clone, Copy)]
enum RespawnCause {
    Fell,
    Hazard,
    Enemy,
}

fn respawn(player: &mut Player, tuning: &Tuning, cause: RespawnCause, events: &mut Vec<GameEvent>) {
    log::debug!(
        "Respawn ({:?}) at checkpoint {} from {:?}",
        cause,
        player.checkpoint,
        player.position
    );
    player.respawn(tuning);
    events.push(GameEvent::Respawned);
}

/// Advance the session by one fixed timestep, returning the events it produced
/// in pipeline order.
pub fn tick(
    session: &mut Session,
    route: &RouteData,
    input: &TickInput,
    tuning: &Tuning,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let Session {
        player,
        enemies,
        coins,
        clock,
        time_ticks,
    } = session;

    *time_ticks += 1;
    *clock += dt;

    // Stamina & sprint
    let sprinting = input.sprint && player.stamina > tuning.sprint_min_stamina;
    let stamina_rate = if sprinting {
        -tuning.stamina_drain
    } else {
        tuning.stamina_regen
    };
    player.stamina = (player.stamina + stamina_rate * dt).clamp(0.0, 1.0);
    let speed = if sprinting {
        tuning.sprint_speed()
    } else {
        tuning.base_speed
    };

    // Horizontal movement
    let yaw = if input.camera_yaw.is_finite() {
        input.camera_yaw
    } else {
        0.0
    };
    let strafe = f32::from(input.strafe.signum());
    let forward = f32::from(input.forward.signum());
    player.position += yaw_to_world(strafe, forward, yaw) * speed * dt;

    // Gravity
    player.velocity.y -= tuning.gravity * dt;
    player.position.y += player.velocity.y * dt;

    // Collision, landing & jump
    let impact_speed = player.velocity.y;
    let contact = resolve_collision(
        &mut player.position,
        &mut player.velocity,
        &route.platforms,
        route.ground_height,
        tuning,
    );
    player.grounded = contact.grounded;
    if contact.grounded {
        if impact_speed < -tuning.hard_landing_speed {
            events.push(GameEvent::HardLanding);
        }
        player.velocity.y = 0.0;
        if input.jump {
            player.velocity.y = tuning.jump_impulse;
            events.push(GameEvent::Jumped);
        }
    }

    // Fell off the route
    if player.position.y < tuning.fall_limit {
        respawn(player, tuning, RespawnCause::Fell, &mut events);
    }

    // Hazards are not gated by invulnerability
    if hazard_hit(player.position, &route.hazards, tuning).is_some() {
        events.push(GameEvent::HazardHit);
        respawn(player, tuning, RespawnCause::Hazard, &mut events);
    }

    if let Some(index) = advance_checkpoint(player, route, tuning) {
        events.push(GameEvent::CheckpointReached(index));
    }

    // Enemies
    let phase = *clock * tuning.patrol_rate;
    let touched = advance_enemies(enemies, player.position, phase, dt, tuning);
    if touched && !player.is_invulnerable() {
        events.push(GameEvent::EnemyHit);
        respawn(player, tuning, RespawnCause::Enemy, &mut events);
    }

    collect_coins(player.position, coins, tuning, &mut events);

    player.invulnerable = (player.invulnerable - dt).max(0.0);

    events
}

/// Idle/demo input: face the next checkpoint, run at it and keep jumping.
///
/// Sprints while stamina is above half so the bar recovers between bursts.
pub fn autopilot(session: &Session, route: &RouteData) -> TickInput {
    let player = &session.player;
    let Some(next) = route.next_checkpoint(player.checkpoint) else {
        return TickInput::default();
    };

    let to_target = route.checkpoint_anchor(next) - player.position;
    let flat = Vec3::new(to_target.x, 0.0, to_target.z);
    if flat.length_squared() < 1e-6 {
        return TickInput {
            jump: true,
            ..Default::default()
        };
    }

    TickInput {
        forward: 1,
        strafe: 0,
        jump: true,
        sprint: player.stamina > 0.5,
        camera_yaw: yaw_facing(flat),
    }
}
