//! Collision resolution against platform slabs and the ground plane
//!
//! Only vertical landing is modelled: the player passes through platform
//! sides and undersides, and lands when their feet are inside a band around
//! a platform's top while not rising fast. A soft "magnetic landing" then
//! nudges the player toward the platform interior over several ticks.

use glam::Vec3;

use super::route::Platform;
use crate::lerp;
use crate::tuning::Tuning;

/// What the player is standing on after resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    /// Resting on the platform with this index
    Platform(usize),
    /// Resting on the catch-all ground plane
    Ground,
}

/// Result of a collision pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Whether the player rests on something this tick
    pub grounded: bool,
    /// The surface that won (last match), if grounded
    pub support: Option<Support>,
}

impl Contact {
    pub fn airborne() -> Self {
        Self {
            grounded: false,
            support: None,
        }
    }
}

/// Resolve the player against every platform and the optional ground plane.
///
/// Mutates `pos`/`vel` to enforce non-penetration. Downward velocity is
/// zeroed on landing; upward velocity is never reduced. Platforms are tested
/// independently and the last match's correction wins.
pub fn resolve_collision(
    pos: &mut Vec3,
    vel: &mut Vec3,
    platforms: &[Platform],
    ground_height: Option<f32>,
    tuning: &Tuning,
) -> Contact {
    let radius = tuning.player_radius;
    let mut contact = Contact::airborne();

    for (index, platform) in platforms.iter().enumerate() {
        if !platform.contains_xz(*pos) {
            continue;
        }

        let top = platform.top();
        let feet = pos.y - radius;
        let in_band = feet <= top + tuning.landing_band_above && feet >= top - tuning.landing_band_below;
        if !in_band || vel.y > tuning.max_landing_rise_speed {
            continue;
        }

        pos.y = top + radius;
        vel.y = vel.y.max(0.0);
        magnetic_pull(pos, platform, tuning);

        contact = Contact {
            grounded: true,
            support: Some(Support::Platform(index)),
        };
    }

    if let Some(ground) = ground_height {
        if pos.y - radius <= ground {
            pos.y = ground + radius;
            vel.y = vel.y.max(0.0);
            contact = Contact {
                grounded: true,
                support: Some(Support::Ground),
            };
        }
    }

    contact
}

/// Blend the horizontal position toward the platform's safe interior.
///
/// Uses max/min rather than clamp: on a platform narrower than twice the
/// margin the bounds cross, and the pull then targets the centre line.
fn magnetic_pull(pos: &mut Vec3, platform: &Platform, tuning: &Tuning) {
    let margin = tuning.magnetic_margin;
    let blend = tuning.magnetic_blend;

    let (lo_x, hi_x) = (
        platform.center.x - platform.half_extents.x + margin,
        platform.center.x + platform.half_extents.x - margin,
    );
    let (lo_z, hi_z) = (
        platform.center.z - platform.half_extents.z + margin,
        platform.center.z + platform.half_extents.z - margin,
    );

    let target_x = if lo_x <= hi_x { pos.x.max(lo_x).min(hi_x) } else { platform.center.x };
    let target_z = if lo_z <= hi_z { pos.z.max(lo_z).min(hi_z) } else { platform.center.z };

    pos.x = lerp(pos.x, target_x, blend);
    pos.z = lerp(pos.z, target_z, blend);
}
