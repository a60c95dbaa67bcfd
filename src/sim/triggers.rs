//! Hazard, checkpoint and coin triggers
//!
//! Pure predicates over the player position and static entity lists. State
//! changes are limited to the player's checkpoint and the coins' collected
//! flags; each change is reported as a [`GameEvent`].

use glam::Vec3;

use super::route::{Hazard, RouteData};
use super::state::{Coin, GameEvent, Player};
use crate::tuning::Tuning;

/// Index of the first hazard containing `pos`, if any
pub fn hazard_hit(pos: Vec3, hazards: &[Hazard], tuning: &Tuning) -> Option<usize> {
    hazards.iter().position(|h| {
        (pos.x - h.center.x).abs() < h.half_width
            && (pos.z - h.center.z).abs() < h.half_depth
            && (pos.y - h.center.y).abs() < tuning.hazard_half_height
    })
}

/// Advance the player one checkpoint if they are close to the next anchor.
///
/// Only `checkpoint + 1` is ever considered, so checkpoints cannot be
/// skipped. Returns the new index when the player advanced.
pub fn advance_checkpoint(player: &mut Player, route: &RouteData, tuning: &Tuning) -> Option<u32> {
    let next = route.next_checkpoint(player.checkpoint)?;
    let anchor = route.checkpoint_anchor(next);
    if player.position.distance(anchor) >= tuning.checkpoint_radius {
        return None;
    }

    player.set_checkpoint(next, route);
    log::debug!("Checkpoint {} reached", next);
    Some(next)
}

/// Collect every uncollected coin within reach, emitting one event per coin
pub fn collect_coins(pos: Vec3, coins: &mut [Coin], tuning: &Tuning, events: &mut Vec<GameEvent>) {
    for coin in coins.iter_mut().filter(|c| !c.collected) {
        if coin.position.distance(pos) < tuning.coin_radius {
            coin.collected = true;
            events.push(GameEvent::CoinCollected(coin.id));
        }
    }
}

/// Horizontal angle from the player toward the next checkpoint.
///
/// Measured as atan2(dx, dz), so 0 points along +Z. None once the final
/// checkpoint has been reached.
pub fn guidance_heading(player: &Player, route: &RouteData) -> Option<f32> {
    let next = route.next_checkpoint(player.checkpoint)?;
    let to_target = route.checkpoint_anchor(next) - player.position;
    let flat = Vec3::new(to_target.x, 0.0, to_target.z).normalize_or_zero();
    Some(flat.x.atan2(flat.z))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_route(count: usize, spacing: f32) -> RouteData {
        RouteData {
            checkpoints: (0..count)
                .map(|i| Vec3::new(0.0, 5.0, i as f32 * spacing))
                .collect(),
            ..RouteData::default()
        }
    }

    #[test]
    fn test_hazard_box_containment() {
        let tuning = Tuning::default();
        let hazards = [
            Hazard {
                center: Vec3::new(10.0, 0.0, 0.0),
                half_width: 1.0,
                half_depth: 1.0,
            },
            Hazard {
                center: Vec3::new(0.0, 3.0, 0.0),
                half_width: 3.0,
                half_depth: 3.0,
            },
        ];

        assert_eq!(hazard_hit(Vec3::new(2.9, 4.9, -2.9), &hazards, &tuning), Some(1));
        assert_eq!(hazard_hit(Vec3::new(3.0, 4.0, 0.0), &hazards, &tuning), None);
        // Vertical band is ±2 regardless of footprint
        assert_eq!(hazard_hit(Vec3::new(0.0, 5.1, 0.0), &hazards, &tuning), None);
        assert_eq!(hazard_hit(Vec3::new(10.5, 1.0, 0.5), &hazards, &tuning), Some(0));
    }

    #[test]
    fn test_first_hazard_wins() {
        let tuning = Tuning::default();
        let hazard = Hazard {
            center: Vec3::ZERO,
            half_width: 3.0,
            half_depth: 3.0,
        };
        assert_eq!(hazard_hit(Vec3::ZERO, &[hazard, hazard], &tuning), Some(0));
        assert_eq!(hazard_hit(Vec3::ZERO, &[], &tuning), None);
    }

    #[test]
    fn test_checkpoint_advances_within_radius() {
        let tuning = Tuning::default();
        let route = line_route(4, 10.0);
        let mut player = Player::new(0, route.checkpoints[0]);
        player.position = route.checkpoints[1] + Vec3::new(2.0, 0.0, 0.0);

        assert_eq!(advance_checkpoint(&mut player, &route, &tuning), Some(1));
        assert_eq!(player.checkpoint, 1);
        assert_eq!(player.respawn_point, route.checkpoints[1]);
    }

    #[test]
    fn test_checkpoint_out_of_radius() {
        let tuning = Tuning::default();
        let route = line_route(4, 10.0);
        let mut player = Player::new(0, route.checkpoints[0]);
        player.position = route.checkpoints[1] + Vec3::new(2.8, 0.0, 0.0);

        assert_eq!(advance_checkpoint(&mut player, &route, &tuning), None);
        assert_eq!(player.checkpoint, 0);
    }

    #[test]
    fn test_checkpoint_never_skips() {
        let tuning = Tuning::default();
        // Checkpoints 1 and 2 are both within reach of the player
        let route = line_route(4, 2.0);
        let mut player = Player::new(0, route.checkpoints[0]);
        player.position = route.checkpoints[2];

        assert_eq!(advance_checkpoint(&mut player, &route, &tuning), Some(1));
        assert_eq!(player.checkpoint, 1);
        assert_eq!(advance_checkpoint(&mut player, &route, &tuning), Some(2));
        assert_eq!(player.checkpoint, 2);
    }

    #[test]
    fn test_final_checkpoint_disables_advancement() {
        let tuning = Tuning::default();
        let route = line_route(3, 10.0);
        let mut player = Player::new(2, route.checkpoints[2]);
        player.position = route.checkpoints[2];

        assert_eq!(advance_checkpoint(&mut player, &route, &tuning), None);
        assert_eq!(player.checkpoint, 2);
    }

    #[test]
    fn test_coins_collect_once() {
        let tuning = Tuning::default();
        let mut coins = vec![
            Coin {
                id: 0,
                position: Vec3::new(1.0, 0.0, 0.0),
                collected: false,
            },
            Coin {
                id: 1,
                position: Vec3::new(9.0, 0.0, 0.0),
                collected: false,
            },
        ];
        let mut events = Vec::new();

        collect_coins(Vec3::ZERO, &mut coins, &tuning, &mut events);
        collect_coins(Vec3::ZERO, &mut coins, &tuning, &mut events);
        assert_eq!(events, vec![GameEvent::CoinCollected(0)]);
        assert!(coins[0].collected);
        assert!(!coins[1].collected);
    }

    #[test]
    fn test_guidance_heading_points_at_next_checkpoint() {
        let route = line_route(3, 10.0);
        let mut player = Player::new(0, route.checkpoints[0]);
        player.position = route.checkpoints[0];
        let heading = guidance_heading(&player, &route).unwrap();
        assert!(heading.abs() < 1e-6);

        player.position = route.checkpoints[1] + Vec3::new(5.0, 0.0, 0.0);
        player.set_checkpoint(2, &route);
        assert_eq!(guidance_heading(&player, &route), None);
    }
}
