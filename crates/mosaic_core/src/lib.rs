//! Content-block container core.
//!
//! An `Area` holds an ordered collection of polymorphic content elements and
//! attaches to one owning content record. This crate owns the container's
//! identity, the ownership-discovery algorithm (hint fast path, candidate
//! scan, process-wide memoization), permission delegation to the resolved
//! owner, and the visibility-filtered materialization of child elements.
//! Owner records, their versioned store, and template engines stay behind
//! collaborator traits.

pub mod db;
pub mod logging;
pub mod model;
pub mod owner;
pub mod policy;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::actor::{Actor, ActorId};
pub use model::area::{Area, AreaId};
pub use model::element::{Element, ElementId};
pub use owner::cache::{CacheSlot, OwnerCache};
pub use owner::registry::{OwnerRegistryError, OwnerTypeDescriptor, OwnerTypeRegistry};
pub use owner::resolver::{OwnerResolution, OwnerResolver, ResolveError};
pub use owner::{OwnerHandle, OwnerQuery, OwnerRecord, OwnerStoreError, Stage};
pub use policy::{AreaBasePolicy, ElementPolicy, GrantTable};
pub use repo::area_repo::{AreaRepository, SqliteAreaRepository};
pub use repo::element_repo::{ElementRepository, SqliteElementRepository};
pub use repo::{RepoError, RepoResult};
pub use service::area_service::{AreaService, AreaServiceError, ServiceResult};
pub use view::breadcrumb::Breadcrumb;
pub use view::element_view::ElementView;
pub use view::{RenderError, TemplateRenderer};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
