//! Two-phase ownership resolution.
//!
//! # Responsibility
//! - Discover the unique content record owning an area: trust the cached
//!   type hint first, fall back to a full candidate scan when no hint exists.
//! - Memoize positive results in the process-wide owner cache.
//!
//! # Invariants
//! - Resolution never writes to storage. A hint correction discovered by the
//!   fallback scan is returned to the caller, who decides when to persist it.
//! - Negative results are not cached: an ownerless area repeats its scan on
//!   every call.
//! - When the hint is present, resolution ends with it; a hint that matches
//!   nothing yields no owner and no fallback scan.

use crate::model::area::Area;
use crate::owner::cache::{CacheSlot, OwnerCache};
use crate::owner::registry::OwnerTypeRegistry;
use crate::owner::{OwnerHandle, OwnerStoreError, Stage};
use log::debug;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors surfaced by ownership resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The hinted type tag has no registry entry: a configuration defect,
    /// not a runtime data condition.
    UnregisteredType(String),
    /// The owner store failed to execute a relation query.
    Store(OwnerStoreError),
}

impl Display for ResolveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnregisteredType(tag) => {
                write!(f, "owner type is not registered: {tag}")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ResolveError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::UnregisteredType(_) => None,
            Self::Store(err) => Some(err),
        }
    }
}

impl From<OwnerStoreError> for ResolveError {
    fn from(value: OwnerStoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of one resolution.
#[derive(Clone)]
pub struct OwnerResolution {
    /// The discovered owner, when any candidate matched.
    pub owner: Option<OwnerHandle>,
    /// Tag the caller should persist onto the area's owner-type hint.
    ///
    /// Set only when the fallback scan discovered an owner whose tag differs
    /// from the stored hint.
    pub corrected_hint: Option<String>,
}

impl OwnerResolution {
    fn none() -> Self {
        Self {
            owner: None,
            corrected_hint: None,
        }
    }

    fn found(owner: OwnerHandle) -> Self {
        Self {
            owner: Some(owner),
            corrected_hint: None,
        }
    }
}

/// Stateless ownership resolver.
pub struct OwnerResolver {
    stage: Stage,
}

impl OwnerResolver {
    /// Creates a resolver reading from the draft stage.
    pub fn new() -> Self {
        Self {
            stage: Stage::Draft,
        }
    }

    /// Creates a resolver whose hint fast path reads from the given stage.
    ///
    /// The fallback scan always runs against draft, where ownership is
    /// authoritative.
    pub fn with_stage(stage: Stage) -> Self {
        Self { stage }
    }

    /// Resolves the record owning `area`.
    ///
    /// Transient areas resolve to no owner without touching the store. A
    /// cached positive result short-circuits everything else. Otherwise the
    /// hint fast path runs when a hint exists; the full candidate scan runs
    /// only when it does not.
    pub fn resolve(
        &self,
        area: &Area,
        registry: &OwnerTypeRegistry,
        cache: &OwnerCache,
    ) -> Result<OwnerResolution, ResolveError> {
        let Some(area_uuid) = area.uuid else {
            return Ok(OwnerResolution::none());
        };

        if let Some(owner) = cache.get(CacheSlot::Hint, area_uuid) {
            debug!("event=owner_resolve module=owner status=cache_hit area={area_uuid}");
            return Ok(OwnerResolution::found(owner));
        }

        if let Some(hint) = area.hint_tag() {
            let descriptor = registry
                .get(hint)
                .ok_or_else(|| ResolveError::UnregisteredType(hint.to_string()))?;

            if !descriptor.is_introspectable() {
                debug!(
                    "event=owner_resolve module=owner status=unsupported_type area={area_uuid} tag={hint}"
                );
                return Ok(OwnerResolution::none());
            }

            for field in descriptor.relation_fields() {
                let found = descriptor
                    .query()
                    .first_by_relation(field, area_uuid, self.stage)?;
                if let Some(owner) = found {
                    cache.put(CacheSlot::Hint, area_uuid, owner.clone());
                    debug!(
                        "event=owner_resolve module=owner status=hint_hit area={area_uuid} tag={hint} relation={field}"
                    );
                    return Ok(OwnerResolution::found(owner));
                }
            }

            // A present hint ends resolution even when it matched nothing.
            debug!("event=owner_resolve module=owner status=hint_miss area={area_uuid} tag={hint}");
            return Ok(OwnerResolution::none());
        }

        for descriptor in registry.candidates() {
            if !descriptor.is_introspectable() {
                // Strict short-circuit: one opaque candidate ends the whole
                // scan, it is not skipped.
                debug!(
                    "event=owner_resolve module=owner status=unsupported_type area={area_uuid} tag={}",
                    descriptor.tag()
                );
                return Ok(OwnerResolution::none());
            }

            for field in descriptor.relation_fields() {
                let found = descriptor
                    .query()
                    .first_by_relation(field, area_uuid, Stage::Draft)?;
                if let Some(owner) = found {
                    let corrected_hint = (area.hint_tag() != Some(descriptor.tag()))
                        .then(|| descriptor.tag().to_string());
                    cache.put(CacheSlot::Scan, area_uuid, owner.clone());
                    debug!(
                        "event=owner_resolve module=owner status=scan_hit area={area_uuid} tag={} relation={field}",
                        descriptor.tag()
                    );
                    return Ok(OwnerResolution {
                        owner: Some(owner),
                        corrected_hint,
                    });
                }
            }
        }

        debug!("event=owner_resolve module=owner status=no_owner area={area_uuid}");
        Ok(OwnerResolution::none())
    }
}

impl Default for OwnerResolver {
    fn default() -> Self {
        Self::new()
    }
}
