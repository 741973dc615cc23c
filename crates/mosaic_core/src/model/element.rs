//! Element domain model.
//!
//! # Responsibility
//! - Define one content block belonging to an area.
//!
//! # Invariants
//! - `area_uuid` is the weak back-reference to the containing area; it is
//!   assigned when the element is persisted under an area.
//! - Sibling order is `sort_order ASC, uuid ASC` and nothing else.

use crate::model::area::AreaId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a content element.
pub type ElementId = Uuid;

/// One content block inside an area.
///
/// `element_type` is an open tag (type registration is owned by the host
/// application, not this core); this record carries only what the container
/// needs for ordering, visibility filtering, and presentation wrapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Stable global ID.
    pub uuid: ElementId,
    /// Containing area. `None` while staged on an unsaved area.
    pub area_uuid: Option<AreaId>,
    /// Open type tag, e.g. `text`, `image`, `form`.
    pub element_type: String,
    /// User-facing label.
    pub title: String,
    /// Serialized block payload; opaque to the container.
    pub content: String,
    /// Stable sibling order key within one area.
    pub sort_order: i64,
}

impl Element {
    /// Creates a detached element with a generated stable ID.
    pub fn new(element_type: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            area_uuid: None,
            element_type: element_type.into(),
            title: title.into(),
            content: String::new(),
            sort_order: 0,
        }
    }

    /// Returns a copy attached to the given area.
    pub fn attached_to(mut self, area_uuid: AreaId) -> Self {
        self.area_uuid = Some(area_uuid);
        self
    }

    /// Returns a copy with the given sibling order key.
    pub fn ordered(mut self, sort_order: i64) -> Self {
        self.sort_order = sort_order;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::Element;
    use uuid::Uuid;

    #[test]
    fn new_element_is_detached() {
        let element = Element::new("text", "intro");
        assert!(element.area_uuid.is_none());
        assert_eq!(element.element_type, "text");
        assert_eq!(element.sort_order, 0);
    }

    #[test]
    fn builder_helpers_set_attachment_and_order() {
        let area = Uuid::new_v4();
        let element = Element::new("image", "hero").attached_to(area).ordered(3);
        assert_eq!(element.area_uuid, Some(area));
        assert_eq!(element.sort_order, 3);
    }
}
