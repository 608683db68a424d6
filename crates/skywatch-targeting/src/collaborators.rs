//! Capabilities supplied by the world/physics layer.
//!
//! Both are optional. A missing line-of-sight check always passes; a
//! missing sub-component lookup means sub-component blips cannot be
//! resolved and are never targeted.

use skywatch_core::entity::{EntityRef, SubComponentRef};
use skywatch_radar::Blip;

use crate::acquisition::WeaponContext;

pub trait LineOfSight {
    /// Whether `weapon` has an unobstructed line to the object behind `target`.
    fn has_line_of_sight(&self, weapon: &WeaponContext<'_>, target: &Blip) -> bool;
}

pub trait SubComponentLookup {
    /// Damage region on `carrier` identified by `content_hash`.
    fn sub_component(&self, carrier: EntityRef, content_hash: u64) -> Option<SubComponentRef>;
}

#[derive(Clone, Copy, Default)]
pub struct Collaborators<'a> {
    pub line_of_sight: Option<&'a dyn LineOfSight>,
    pub sub_components: Option<&'a dyn SubComponentLookup>,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        line_of_sight: Option<&'a dyn LineOfSight>,
        sub_components: Option<&'a dyn SubComponentLookup>,
    ) -> Self {
        Self {
            line_of_sight,
            sub_components,
        }
    }

    pub(crate) fn line_of_sight(&self, weapon: &WeaponContext<'_>, target: &Blip) -> bool {
        self.line_of_sight
            .map_or(true, |los| los.has_line_of_sight(weapon, target))
    }

    pub(crate) fn sub_component(&self, blip: &Blip) -> Option<SubComponentRef> {
        self.sub_components
            .and_then(|lookup| lookup.sub_component(blip.owner, blip.content_hash))
    }
}
