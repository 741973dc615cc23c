//! Ownership contracts: owner records, owner-store queries, resolution.
//!
//! # Responsibility
//! - Define the collaborator traits a host application implements so areas
//!   can discover which content record owns them.
//! - House the owner-type registry, the process-wide lookup cache, and the
//!   two-phase resolver built on top of both.
//!
//! # Invariants
//! - At most one owner record references a given area identity across the
//!   draft stage; resolution is first-match-wins in registration order when
//!   that invariant is violated upstream.

use crate::model::actor::Actor;
use crate::model::area::AreaId;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

pub mod cache;
pub mod registry;
pub mod resolver;

/// Versioned-store stage an owner query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Unpublished working records.
    Draft,
    /// Live records.
    Published,
}

/// A resolved owning content record.
///
/// Owners are polymorphic across the host application; this trait is the
/// capability surface the container core needs: identity, labeling for the
/// summary breadcrumb, and delegated permission answers.
pub trait OwnerRecord: Send + Sync {
    /// Stable ID of the owning record.
    fn uuid(&self) -> Uuid;
    /// Registered type tag of the owning record.
    fn type_tag(&self) -> &str;
    /// User-facing title.
    fn title(&self) -> &str;
    /// CMS edit-link target for the record.
    fn edit_link(&self) -> String;
    /// Whether the actor may edit the owning record.
    fn can_edit(&self, actor: &Actor) -> bool;
    /// Whether the actor may view the owning record.
    fn can_view(&self, actor: &Actor) -> bool;
}

impl std::fmt::Debug for dyn OwnerRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OwnerRecord")
            .field("uuid", &self.uuid())
            .field("type_tag", &self.type_tag())
            .field("title", &self.title())
            .finish()
    }
}

/// Shared handle to a resolved owner.
pub type OwnerHandle = Arc<dyn OwnerRecord>;

/// Store query capability for one owner type.
///
/// Implemented by the host's object store per registered type; the registry
/// carries one handle per descriptor.
pub trait OwnerQuery: Send + Sync {
    /// First record whose `relation_field` equals `area_uuid`, in the store's
    /// natural order, at the given stage.
    fn first_by_relation(
        &self,
        relation_field: &str,
        area_uuid: AreaId,
        stage: Stage,
    ) -> Result<Option<OwnerHandle>, OwnerStoreError>;
}

/// Failure reported by an owner-store query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerStoreError {
    /// The store could not execute the relation query.
    Query(String),
}

impl Display for OwnerStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Query(message) => write!(f, "owner store query failed: {message}"),
        }
    }
}

impl Error for OwnerStoreError {}
