//! Area use-case service: resolution, access delegation, materialization.
//!
//! # Responsibility
//! - Run ownership resolution and persist hint corrections write-through.
//! - Answer view/edit permission by delegation to the resolved owner.
//! - Materialize visibility-filtered element views for presentation.
//!
//! # Invariants
//! - A failed hint persist surfaces as an error; it is never swallowed.
//! - Permission checks degrade to deny when no owner resolves.
//! - The materializer never queries storage for a transient area.

use crate::model::actor::Actor;
use crate::model::area::Area;
use crate::owner::cache::OwnerCache;
use crate::owner::registry::OwnerTypeRegistry;
use crate::owner::resolver::{OwnerResolver, ResolveError};
use crate::owner::{OwnerHandle, Stage};
use crate::policy::{AreaBasePolicy, ElementPolicy};
use crate::repo::area_repo::AreaRepository;
use crate::repo::element_repo::ElementRepository;
use crate::repo::RepoError;
use crate::view::breadcrumb::Breadcrumb;
use crate::view::element_view::ElementView;
use crate::view::{RenderError, TemplateRenderer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub type ServiceResult<T> = Result<T, AreaServiceError>;

/// Errors surfaced by area use-case operations.
#[derive(Debug)]
pub enum AreaServiceError {
    /// Ownership resolution failed (store query or configuration defect).
    Resolve(ResolveError),
    /// Repository persistence failed (including hint write-through).
    Repo(RepoError),
}

impl Display for AreaServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Resolve(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AreaServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Resolve(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<ResolveError> for AreaServiceError {
    fn from(value: ResolveError) -> Self {
        Self::Resolve(value)
    }
}

impl From<RepoError> for AreaServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Use-case facade over one area store, owner registry, and policy set.
pub struct AreaService<A: AreaRepository, E: ElementRepository> {
    areas: A,
    elements: E,
    registry: OwnerTypeRegistry,
    resolver: OwnerResolver,
    cache: OwnerCache,
    base_policy: Arc<dyn AreaBasePolicy>,
    element_policy: Arc<dyn ElementPolicy>,
}

impl<A: AreaRepository, E: ElementRepository> AreaService<A, E> {
    /// Creates a service resolving against the draft stage.
    pub fn new(
        areas: A,
        elements: E,
        registry: OwnerTypeRegistry,
        base_policy: Arc<dyn AreaBasePolicy>,
        element_policy: Arc<dyn ElementPolicy>,
    ) -> Self {
        Self {
            areas,
            elements,
            registry,
            resolver: OwnerResolver::new(),
            cache: OwnerCache::new(),
            base_policy,
            element_policy,
        }
    }

    /// Creates a service whose hint fast path resolves at the given stage.
    pub fn with_stage(
        areas: A,
        elements: E,
        registry: OwnerTypeRegistry,
        base_policy: Arc<dyn AreaBasePolicy>,
        element_policy: Arc<dyn ElementPolicy>,
        stage: Stage,
    ) -> Self {
        Self {
            resolver: OwnerResolver::with_stage(stage),
            ..Self::new(areas, elements, registry, base_policy, element_policy)
        }
    }

    /// Resolves the record owning `area`, persisting any hint correction.
    ///
    /// The correction write-through is a separate, non-atomic persist; its
    /// failure propagates so callers never observe a silently stale hint.
    pub fn resolve_owner(&self, area: &mut Area) -> ServiceResult<Option<OwnerHandle>> {
        let resolution = self.resolver.resolve(area, &self.registry, &self.cache)?;

        if let Some(tag) = resolution.corrected_hint {
            if let Some(uuid) = area.uuid {
                self.areas.update_owner_hint(uuid, &tag)?;
                area.owner_type_hint = Some(tag);
            }
        }

        Ok(resolution.owner)
    }

    /// Whether the actor may edit this area.
    ///
    /// A base (ownership-independent) edit grant answers immediately;
    /// otherwise the resolved owner decides, and no owner means deny.
    pub fn can_edit(&self, area: &mut Area, actor: &Actor) -> ServiceResult<bool> {
        if self.base_policy.base_can_edit(area, actor) {
            return Ok(true);
        }

        match self.resolve_owner(area)? {
            Some(owner) => Ok(owner.can_edit(actor)),
            None => Ok(false),
        }
    }

    /// Whether the actor may view this area.
    ///
    /// The short-circuit deliberately tests the base *edit* grant, matching
    /// the container's long-standing behavior; the delegated check is the
    /// owner's view check.
    pub fn can_view(&self, area: &mut Area, actor: &Actor) -> ServiceResult<bool> {
        if self.base_policy.base_can_edit(area, actor) {
            return Ok(true);
        }

        match self.resolve_owner(area)? {
            Some(owner) => Ok(owner.can_view(actor)),
            None => Ok(false),
        }
    }

    /// Materializes visibility-filtered element views in stored order.
    ///
    /// Transient areas yield an empty sequence without querying storage,
    /// regardless of staged in-memory elements.
    pub fn visible_element_views(
        &self,
        area: &Area,
        actor: &Actor,
    ) -> ServiceResult<Vec<ElementView>> {
        let Some(area_uuid) = area.uuid else {
            return Ok(Vec::new());
        };

        let elements = self.elements.list_for_area(area_uuid)?;
        Ok(elements
            .into_iter()
            .filter(|element| self.element_policy.can_view(element, actor))
            .map(ElementView::for_element)
            .collect())
    }

    /// Summary label for listing UIs: the resolved owner's edit anchor.
    ///
    /// `None` when no owner resolves; never an error for that case.
    pub fn breadcrumb(&self, area: &mut Area) -> ServiceResult<Option<Breadcrumb>> {
        Ok(self
            .resolve_owner(area)?
            .map(|owner| Breadcrumb::new(owner.edit_link(), owner.title())))
    }

    /// Renders the whole area through the host's template engine by name.
    pub fn render_area(
        &self,
        area: &Area,
        renderer: &dyn TemplateRenderer,
    ) -> Result<String, RenderError> {
        let context =
            serde_json::to_value(area).map_err(|err| RenderError::Context(err.to_string()))?;
        renderer.render(area.template_name(), &context)
    }

    /// Process-wide owner cache backing this service.
    pub fn owner_cache(&self) -> &OwnerCache {
        &self.cache
    }

    /// Registered owner-type table backing this service.
    pub fn owner_registry(&self) -> &OwnerTypeRegistry {
        &self.registry
    }
}
