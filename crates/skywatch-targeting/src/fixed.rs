//! Fixed-mount target selection.
//!
//! Fixed weapons point wherever the carrier points, so they share one
//! target. When any of them needs a new target, every candidate is scored
//! against the carrier's heading and the best one that at least one fixed
//! weapon can engage is handed to all of them. A held target stays valid
//! while any fixed weapon on the carrier can still reach it.

use glam::DVec3;

use skywatch_core::config::TargetingConfig;
use skywatch_core::constants::SCORE_INVALID;
use skywatch_core::enums::MountType;
use skywatch_core::events::TargetEvent;
use skywatch_core::types::{ItemKey, Transform};
use skywatch_radar::Blip;

use crate::acquisition::{
    engageable, resolve_candidate, Evaluation, TargetRef, WeaponContext, WeaponTargeting,
};
use crate::collaborators::Collaborators;
use crate::scoring::desirability;

/// A fixed-mount weapon paired with its acquisition state.
pub struct FixedWeapon<'a> {
    pub ctx: WeaponContext<'a>,
    pub targeting: &'a mut WeaponTargeting,
}

/// Best-scoring candidate any of `weapons` can engage, with its score.
///
/// Candidates are scanned in scope order and only a strictly higher score
/// replaces the current best, so ties go to the first one scanned.
pub fn select_best_target(
    carrier: &Transform,
    weapons: &[WeaponContext<'_>],
    candidates: &[Blip],
    collaborators: &Collaborators<'_>,
) -> Option<(TargetRef, f64)> {
    best_target(carrier, weapons, candidates, collaborators, &[])
}

fn best_target(
    carrier: &Transform,
    weapons: &[WeaponContext<'_>],
    candidates: &[Blip],
    collaborators: &Collaborators<'_>,
    skip: &[ItemKey],
) -> Option<(TargetRef, f64)> {
    let mut best: Option<(TargetRef, f64)> = None;

    for blip in candidates {
        if skip.contains(&blip.key) {
            continue;
        }
        let score = desirability(carrier, blip.position);
        if score <= SCORE_INVALID {
            continue;
        }
        if best.is_some_and(|(_, best_score)| score <= best_score) {
            continue;
        }
        let Some(engaging) = weapons
            .iter()
            .find(|ctx| ctx.armed && ctx.is_valid() && engageable(ctx, blip, collaborators))
        else {
            continue;
        };
        if let Some(target) = resolve_candidate(engaging, blip, collaborators) {
            best = Some((target, score));
        }
    }

    best
}

/// Run one tick for every fixed-mount weapon on a carrier.
///
/// Turret weapons in `weapons` are ignored.
pub fn update_fixed_group(
    carrier: &Transform,
    weapons: &mut [FixedWeapon<'_>],
    candidates: &[Blip],
    collaborators: &Collaborators<'_>,
    config: &TargetingConfig,
    dt: f64,
    events: &mut Vec<TargetEvent>,
) {
    let group: Vec<WeaponContext<'_>> = weapons
        .iter()
        .map(|weapon| weapon.ctx)
        .filter(|ctx| ctx.profile.mount == MountType::Fixed && ctx.armed && ctx.is_valid())
        .collect();
    let in_reach = |position: DVec3| group.iter().any(|ctx| ctx.in_range(position));

    let outcomes: Vec<Evaluation> = weapons
        .iter_mut()
        .map(|weapon| {
            if weapon.ctx.profile.mount != MountType::Fixed {
                return Evaluation::Skipped;
            }
            weapon
                .targeting
                .evaluate(&weapon.ctx, candidates, collaborators, config, dt, in_reach)
        })
        .collect();

    for (weapon, outcome) in weapons.iter_mut().zip(&outcomes) {
        if *outcome == Evaluation::Empty {
            weapon.targeting.clear(&weapon.ctx, events);
        }
    }

    let searching = outcomes
        .iter()
        .any(|outcome| matches!(outcome, Evaluation::Search { .. }));
    if searching {
        let lost: Vec<ItemKey> = outcomes
            .iter()
            .filter_map(|outcome| match outcome {
                Evaluation::Search { lost } => *lost,
                _ => None,
            })
            .collect();

        match best_target(carrier, &group, candidates, collaborators, &lost) {
            Some((target, _)) => {
                for (weapon, outcome) in weapons.iter_mut().zip(&outcomes) {
                    if *outcome != Evaluation::Skipped {
                        weapon.targeting.assign(&weapon.ctx, target, events);
                    }
                }
            }
            None => {
                for (weapon, outcome) in weapons.iter_mut().zip(&outcomes) {
                    if matches!(outcome, Evaluation::Search { .. }) {
                        weapon.targeting.clear(&weapon.ctx, events);
                    }
                }
            }
        }
    }

    for (weapon, outcome) in weapons.iter_mut().zip(&outcomes) {
        if *outcome != Evaluation::Skipped {
            weapon.targeting.settle(&weapon.ctx, candidates, collaborators);
        }
    }
}
