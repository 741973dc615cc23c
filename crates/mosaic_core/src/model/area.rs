//! Area domain model.
//!
//! # Responsibility
//! - Define the content-block container record: identity, owner-type hint,
//!   and elements staged before first persist.
//! - Provide lifecycle helpers around persisted/transient state.
//!
//! # Invariants
//! - `uuid` is `None` until the store assigns identity and is immutable after.
//! - `owner_type_hint` may be empty, stale, or wrong; ownership resolution is
//!   the source of truth and corrects the hint on discovery.

use crate::model::element::Element;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a persisted content area.
pub type AreaId = Uuid;

/// Content-block container attached to one owning content record.
///
/// The area does not know its owner directly; it carries only a cached type
/// hint. Discovery of the owning record lives in `owner::resolver`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    /// Store-assigned identity. `None` means the area has not been persisted.
    pub uuid: Option<AreaId>,
    /// Cached tag of the owning record's type. Not authoritative.
    pub owner_type_hint: Option<String>,
    /// Elements attached in memory before the area is first persisted.
    ///
    /// Flushed into storage by `AreaRepository::create_area`; never read by
    /// the element materializer, which only serves persisted collections.
    #[serde(skip)]
    pub staged_elements: Vec<Element>,
}

impl Area {
    /// Creates a transient area with no identity and no hint.
    pub fn new() -> Self {
        Self {
            uuid: None,
            owner_type_hint: None,
            staged_elements: Vec::new(),
        }
    }

    /// Creates an area with a store-assigned identity.
    ///
    /// Used by repository load/create paths; application code should go
    /// through `Area::new` and the repository.
    pub fn with_id(uuid: AreaId) -> Self {
        Self {
            uuid: Some(uuid),
            owner_type_hint: None,
            staged_elements: Vec::new(),
        }
    }

    /// Returns whether the store has assigned identity to this area.
    pub fn is_persisted(&self) -> bool {
        self.uuid.is_some()
    }

    /// Returns the hint tag when present and non-empty.
    pub fn hint_tag(&self) -> Option<&str> {
        self.owner_type_hint
            .as_deref()
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
    }

    /// Attaches one element to the in-memory staging list.
    pub fn stage_element(&mut self, element: Element) {
        self.staged_elements.push(element);
    }

    /// Template name used for name-based rendering of the whole area.
    pub fn template_name(&self) -> &'static str {
        "content_area"
    }
}

impl Default for Area {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::Area;
    use crate::model::element::Element;
    use uuid::Uuid;

    #[test]
    fn new_area_is_transient_with_empty_hint() {
        let area = Area::new();
        assert!(!area.is_persisted());
        assert!(area.hint_tag().is_none());
        assert!(area.staged_elements.is_empty());
    }

    #[test]
    fn hint_tag_filters_blank_values() {
        let mut area = Area::with_id(Uuid::new_v4());
        area.owner_type_hint = Some("   ".to_string());
        assert!(area.hint_tag().is_none());

        area.owner_type_hint = Some(" landing_page ".to_string());
        assert_eq!(area.hint_tag(), Some("landing_page"));
    }

    #[test]
    fn stage_element_preserves_insertion_order() {
        let mut area = Area::new();
        area.stage_element(Element::new("text", "first"));
        area.stage_element(Element::new("image", "second"));
        assert_eq!(area.staged_elements[0].title, "first");
        assert_eq!(area.staged_elements[1].title, "second");
    }
}
