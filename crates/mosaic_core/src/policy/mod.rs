//! Permission collaborator contracts and an in-process default.
//!
//! # Responsibility
//! - Define the base (ownership-independent) permission checks the access
//!   delegator consults before falling back to owner delegation.
//! - Define the per-element visibility check the materializer filters with.
//!
//! # Invariants
//! - Base checks know nothing about ownership; delegated answers come from
//!   the resolved owner record, not from here.

use crate::model::actor::{Actor, ActorId};
use crate::model::area::Area;
use crate::model::element::Element;
use std::collections::BTreeSet;
use uuid::Uuid;

/// Ownership-independent permission primitives for an area record.
///
/// Typically backed by the host store's record-level grants plus a superuser
/// override.
pub trait AreaBasePolicy: Send + Sync {
    /// Whether the actor holds a direct edit grant on the area itself.
    fn base_can_edit(&self, area: &Area, actor: &Actor) -> bool;
    /// Whether the actor holds a direct view grant on the area itself.
    ///
    /// Present for contract completeness; the access delegator's view check
    /// short-circuits on `base_can_edit`, mirroring the container's
    /// historical behavior.
    fn base_can_view(&self, area: &Area, actor: &Actor) -> bool;
}

/// Per-element visibility check consulted by the materializer.
pub trait ElementPolicy: Send + Sync {
    /// Whether the actor may view the element.
    fn can_view(&self, element: &Element, actor: &Actor) -> bool;
}

/// Explicit per-record grant table with admin override.
///
/// In-process default implementation of both policy traits; hosts with their
/// own permission engine implement the traits directly instead.
#[derive(Debug, Default)]
pub struct GrantTable {
    edit_grants: BTreeSet<(Uuid, ActorId)>,
    view_grants: BTreeSet<(Uuid, ActorId)>,
}

impl GrantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants the actor edit (and implicitly view) on one record.
    pub fn grant_edit(&mut self, record: Uuid, actor: ActorId) {
        self.edit_grants.insert((record, actor));
    }

    /// Grants the actor view on one record.
    pub fn grant_view(&mut self, record: Uuid, actor: ActorId) {
        self.view_grants.insert((record, actor));
    }

    fn has_edit(&self, record: Option<Uuid>, actor: &Actor) -> bool {
        if actor.is_admin {
            return true;
        }
        record.is_some_and(|record| self.edit_grants.contains(&(record, actor.uuid)))
    }

    fn has_view(&self, record: Option<Uuid>, actor: &Actor) -> bool {
        if actor.is_admin {
            return true;
        }
        record.is_some_and(|record| {
            self.view_grants.contains(&(record, actor.uuid))
                || self.edit_grants.contains(&(record, actor.uuid))
        })
    }
}

impl AreaBasePolicy for GrantTable {
    fn base_can_edit(&self, area: &Area, actor: &Actor) -> bool {
        self.has_edit(area.uuid, actor)
    }

    fn base_can_view(&self, area: &Area, actor: &Actor) -> bool {
        self.has_view(area.uuid, actor)
    }
}

impl ElementPolicy for GrantTable {
    fn can_view(&self, element: &Element, actor: &Actor) -> bool {
        self.has_view(Some(element.uuid), actor)
    }
}
