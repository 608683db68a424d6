//! Per-weapon target acquisition state machine.
//!
//! Each tick a weapon first ages its current target (invalid-target and
//! assigned-time timers), then decides whether it needs a new one. Turret
//! weapons search the scope's candidates for the first one they can bring
//! to bear; fixed-mount weapons are handled as a group by
//! `fixed::update_fixed_group`.
//!
//! The candidate slice is the carrier's latest radar scope: already range
//! and faction filtered and sorted nearest first.

use glam::DVec3;
use tracing::debug;

use skywatch_core::config::{TargetingConfig, WeaponProfile};
use skywatch_core::entity::{EntityRef, SubComponentRef, WeaponId};
use skywatch_core::enums::{BlipCategory, MountType, TargetingState};
use skywatch_core::events::TargetEvent;
use skywatch_core::types::{ItemKey, Transform};
use skywatch_radar::Blip;

use crate::collaborators::Collaborators;
use crate::cone::in_firing_cone;

/// Everything about a weapon that the state machine reads but never owns.
#[derive(Debug, Clone, Copy)]
pub struct WeaponContext<'a> {
    pub id: WeaponId,
    pub profile: &'a WeaponProfile,
    /// World transform of the weapon (the turret base for turret mounts).
    pub transform: Transform,
    pub armed: bool,
    /// Seeker lock on the current target, reported by the weapon.
    pub locked: bool,
}

impl WeaponContext<'_> {
    /// A weapon with a non-positive range or a non-finite position cannot
    /// target anything; its update is skipped.
    pub fn is_valid(&self) -> bool {
        self.profile.range > 0.0 && self.transform.position.is_finite()
    }

    pub fn in_range(&self, position: DVec3) -> bool {
        let range_sq = self.profile.range * self.profile.range;
        (position - self.transform.position).length_squared() <= range_sq
    }

    fn lock_ok(&self) -> bool {
        !self.profile.require_lock || self.locked || self.profile.mount == MountType::Fixed
    }
}

/// The target a weapon is holding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetRef {
    pub key: ItemKey,
    pub entity: EntityRef,
    pub category: BlipCategory,
    pub sub_component: Option<SubComponentRef>,
}

/// Acquisition state for one weapon.
#[derive(Debug, Clone, Default)]
pub struct WeaponTargeting {
    state: TargetingState,
    target: Option<TargetRef>,
    /// Seconds the target has been missing line of sight or lock.
    invalid_secs: f64,
    /// Seconds since the target was assigned.
    assigned_secs: f64,
}

/// Outcome of the first half of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Evaluation {
    /// Update skipped (disarmed or invalid weapon).
    Skipped,
    /// Current target stays.
    Keep,
    /// A new target should be searched for. `lost` is the held target when
    /// it passed the lost threshold; the search must not pick it again.
    Search { lost: Option<ItemKey> },
    /// A new target is needed but the scope is empty. The caller clears the
    /// target without searching.
    Empty,
}

impl WeaponTargeting {
    pub fn state(&self) -> TargetingState {
        self.state
    }

    pub fn target(&self) -> Option<&TargetRef> {
        self.target.as_ref()
    }

    pub fn invalid_secs(&self) -> f64 {
        self.invalid_secs
    }

    pub fn assigned_secs(&self) -> f64 {
        self.assigned_secs
    }

    /// Age the current target and decide whether a new one is needed.
    ///
    /// `in_reach` decides whether the held target is still close enough:
    /// the weapon's own range for turrets, any fixed weapon's range for a
    /// fixed-mount group.
    pub(crate) fn evaluate(
        &mut self,
        ctx: &WeaponContext<'_>,
        candidates: &[Blip],
        collaborators: &Collaborators<'_>,
        config: &TargetingConfig,
        dt: f64,
        in_reach: impl Fn(DVec3) -> bool,
    ) -> Evaluation {
        if !ctx.armed {
            self.state = TargetingState::Unarmed;
            return Evaluation::Skipped;
        }
        if !ctx.is_valid() {
            return Evaluation::Skipped;
        }

        let current = self
            .target
            .and_then(|target| candidates.iter().find(|blip| blip.key == target.key));

        if self.target.is_some() {
            let requirements_met =
                current.is_some_and(|blip| requirements_met(ctx, blip, collaborators));
            if requirements_met {
                self.invalid_secs = 0.0;
            } else {
                self.invalid_secs += dt;
            }
            self.assigned_secs += dt;
        }

        let reassign_due = self.target.is_some()
            && config
                .reassign_interval_secs
                .is_some_and(|interval| self.assigned_secs > interval);
        let lost = self.target.filter(|_| self.invalid_secs > config.target_lost_secs);
        let still_valid = lost.is_none() && current.is_some_and(|blip| in_reach(blip.position));

        if !reassign_due && still_valid {
            return Evaluation::Keep;
        }
        if candidates.is_empty() {
            return Evaluation::Empty;
        }
        Evaluation::Search {
            lost: lost.map(|target| target.key),
        }
    }

    /// Take `target`, or keep the current one if it is the same object.
    /// Emits `Acquired` only on an actual change.
    pub(crate) fn assign(
        &mut self,
        ctx: &WeaponContext<'_>,
        target: TargetRef,
        events: &mut Vec<TargetEvent>,
    ) {
        if self.target.is_some_and(|current| current.key == target.key) {
            self.assigned_secs = 0.0;
            return;
        }
        if let Some(previous) = self.target {
            events.push(TargetEvent::Cleared {
                weapon: ctx.id,
                key: previous.key,
            });
        }
        debug!(weapon = ?ctx.id, key = ?target.key, "target acquired");
        self.target = Some(target);
        self.invalid_secs = 0.0;
        self.assigned_secs = 0.0;
        events.push(TargetEvent::Acquired {
            weapon: ctx.id,
            key: target.key,
            entity: target.entity,
            sub_component: target.sub_component,
        });
    }

    /// Drop the current target and reset both timers.
    pub(crate) fn clear(&mut self, ctx: &WeaponContext<'_>, events: &mut Vec<TargetEvent>) {
        if let Some(previous) = self.target.take() {
            debug!(weapon = ?ctx.id, key = ?previous.key, "target lost");
            events.push(TargetEvent::Cleared {
                weapon: ctx.id,
                key: previous.key,
            });
        }
        self.invalid_secs = 0.0;
        self.assigned_secs = 0.0;
    }

    /// Recompute the reported state from the target now held.
    pub(crate) fn settle(
        &mut self,
        ctx: &WeaponContext<'_>,
        candidates: &[Blip],
        collaborators: &Collaborators<'_>,
    ) {
        self.state = match self.target {
            None => TargetingState::NoTarget,
            Some(target) => {
                let ready = candidates
                    .iter()
                    .find(|blip| blip.key == target.key)
                    .is_some_and(|blip| requirements_met(ctx, blip, collaborators));
                if ready {
                    TargetingState::Locked
                } else {
                    TargetingState::Evaluating
                }
            }
        };
    }
}

/// Line of sight (when required) and lock (when required, turrets only).
fn requirements_met(
    ctx: &WeaponContext<'_>,
    blip: &Blip,
    collaborators: &Collaborators<'_>,
) -> bool {
    let los_ok = !ctx.profile.require_line_of_sight || collaborators.line_of_sight(ctx, blip);
    los_ok && ctx.lock_ok()
}

/// Turn a blip into a target, resolving sub-components. `None` when the
/// blip is the weapon's own carrier or an unresolvable sub-component.
pub(crate) fn resolve_candidate(
    ctx: &WeaponContext<'_>,
    blip: &Blip,
    collaborators: &Collaborators<'_>,
) -> Option<TargetRef> {
    if !blip.owner.is_none() && blip.owner == ctx.id.carrier {
        return None;
    }
    let sub_component = if blip.category == BlipCategory::SubComponent {
        Some(collaborators.sub_component(blip)?)
    } else {
        None
    };
    Some(TargetRef {
        key: blip.key,
        entity: blip.owner,
        category: blip.category,
        sub_component,
    })
}

/// Whether a single weapon could engage `blip`: in range, and in line of
/// sight when required. Cone checks are separate.
pub(crate) fn engageable(
    ctx: &WeaponContext<'_>,
    blip: &Blip,
    collaborators: &Collaborators<'_>,
) -> bool {
    ctx.in_range(blip.position)
        && (!ctx.profile.require_line_of_sight || collaborators.line_of_sight(ctx, blip))
}

/// Run one tick for a turret-mounted weapon.
///
/// The first candidate in scope order that is in range, inside the firing
/// cone and (if required) in line of sight is taken. A target dropped for
/// passing the lost threshold is skipped for that search. Fixed-mount
/// weapons passed here are ignored.
pub fn update_turret(
    weapon: &mut WeaponTargeting,
    ctx: &WeaponContext<'_>,
    candidates: &[Blip],
    collaborators: &Collaborators<'_>,
    config: &TargetingConfig,
    dt: f64,
    events: &mut Vec<TargetEvent>,
) {
    if ctx.profile.mount != MountType::Turret {
        return;
    }

    let in_reach = |position: DVec3| ctx.in_range(position);
    match weapon.evaluate(ctx, candidates, collaborators, config, dt, in_reach) {
        Evaluation::Skipped => return,
        Evaluation::Keep => {}
        Evaluation::Empty => weapon.clear(ctx, events),
        Evaluation::Search { lost } => {
            let cone = &ctx.profile.firing_cone;
            let found = candidates
                .iter()
                .filter(|blip| Some(blip.key) != lost)
                .filter(|blip| ctx.in_range(blip.position))
                .filter(|blip| in_firing_cone(cone, &ctx.transform, blip.position))
                .filter(|blip| {
                    !ctx.profile.require_line_of_sight || collaborators.line_of_sight(ctx, blip)
                })
                .find_map(|blip| resolve_candidate(ctx, blip, collaborators));
            match found {
                Some(target) => weapon.assign(ctx, target, events),
                None => weapon.clear(ctx, events),
            }
        }
    }

    weapon.settle(ctx, candidates, collaborators);
}
