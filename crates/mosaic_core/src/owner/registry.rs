//! Owner-type registry: the statically-registered candidate table.
//!
//! # Responsibility
//! - Map one type tag to its descriptor: relation field names, capability
//!   flags, and the store query handle for that type.
//! - Enumerate candidates deterministically in registration order.
//!
//! # Invariants
//! - Tags are unique and validated at registration.
//! - Candidate enumeration order is registration order; the fallback scan
//!   relies on it for first-match-wins tie-breaking.

use crate::owner::OwnerQuery;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Registration/lookup errors for the owner-type table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerRegistryError {
    InvalidTypeTag(String),
    DuplicateTypeTag(String),
}

impl Display for OwnerRegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTypeTag(value) => write!(f, "owner type tag is invalid: {value}"),
            Self::DuplicateTypeTag(value) => {
                write!(f, "owner type tag already registered: {value}")
            }
        }
    }
}

impl Error for OwnerRegistryError {}

/// One registered owner-capable type.
pub struct OwnerTypeDescriptor {
    tag: String,
    relation_fields: Vec<String>,
    introspectable: bool,
    query: Arc<dyn OwnerQuery>,
}

impl OwnerTypeDescriptor {
    /// Creates a descriptor whose relation fields are known to the registry.
    pub fn new(
        tag: impl Into<String>,
        relation_fields: Vec<String>,
        query: Arc<dyn OwnerQuery>,
    ) -> Self {
        Self {
            tag: tag.into(),
            relation_fields,
            introspectable: true,
            query,
        }
    }

    /// Creates a descriptor that does not support relation introspection.
    ///
    /// Such a type can be registered (it hosts areas) but the resolver cannot
    /// enumerate its relation fields; hitting it ends resolution with no
    /// owner.
    pub fn opaque(tag: impl Into<String>, query: Arc<dyn OwnerQuery>) -> Self {
        Self {
            tag: tag.into(),
            relation_fields: Vec::new(),
            introspectable: false,
            query,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Relation field names pointing at areas, in declaration order.
    pub fn relation_fields(&self) -> &[String] {
        &self.relation_fields
    }

    /// Whether the resolver may enumerate this type's relation fields.
    pub fn is_introspectable(&self) -> bool {
        self.introspectable
    }

    /// Store query handle for this type.
    pub fn query(&self) -> &Arc<dyn OwnerQuery> {
        &self.query
    }
}

/// Registration-ordered table of owner-capable types.
#[derive(Default)]
pub struct OwnerTypeRegistry {
    entries: Vec<OwnerTypeDescriptor>,
    index: BTreeMap<String, usize>,
}

impl OwnerTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one owner type descriptor.
    pub fn register(&mut self, descriptor: OwnerTypeDescriptor) -> Result<(), OwnerRegistryError> {
        let tag = descriptor.tag().trim().to_string();
        if !is_valid_type_tag(&tag) {
            return Err(OwnerRegistryError::InvalidTypeTag(tag));
        }
        if self.index.contains_key(tag.as_str()) {
            return Err(OwnerRegistryError::DuplicateTypeTag(tag));
        }

        self.index.insert(tag, self.entries.len());
        self.entries.push(descriptor);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns one descriptor by tag.
    pub fn get(&self, tag: &str) -> Option<&OwnerTypeDescriptor> {
        self.index
            .get(tag.trim())
            .map(|position| &self.entries[*position])
    }

    /// Candidate descriptors in registration order.
    pub fn candidates(&self) -> impl Iterator<Item = &OwnerTypeDescriptor> {
        self.entries.iter()
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> Vec<&str> {
        self.entries.iter().map(OwnerTypeDescriptor::tag).collect()
    }
}

/// Tag charset shared with owner-hint validation in the repository layer.
pub(crate) fn is_valid_type_tag(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::{OwnerRegistryError, OwnerTypeDescriptor, OwnerTypeRegistry};
    use crate::model::area::AreaId;
    use crate::owner::{OwnerHandle, OwnerQuery, OwnerStoreError, Stage};
    use std::sync::Arc;

    struct NullQuery;

    impl OwnerQuery for NullQuery {
        fn first_by_relation(
            &self,
            _relation_field: &str,
            _area_uuid: AreaId,
            _stage: Stage,
        ) -> Result<Option<OwnerHandle>, OwnerStoreError> {
            Ok(None)
        }
    }

    fn descriptor(tag: &str) -> OwnerTypeDescriptor {
        OwnerTypeDescriptor::new(
            tag,
            vec!["content_area".to_string()],
            Arc::new(NullQuery),
        )
    }

    #[test]
    fn registers_and_looks_up_descriptor() {
        let mut registry = OwnerTypeRegistry::new();
        registry
            .register(descriptor("landing_page"))
            .expect("descriptor should register");
        assert_eq!(registry.len(), 1);
        assert!(registry.get("landing_page").is_some());
        assert!(registry.get("missing_page").is_none());
    }

    #[test]
    fn rejects_invalid_or_duplicate_tag() {
        let mut registry = OwnerTypeRegistry::new();
        let invalid = registry.register(descriptor("Landing Page"));
        assert!(matches!(
            invalid,
            Err(OwnerRegistryError::InvalidTypeTag(_))
        ));
        let blank = registry.register(descriptor("   "));
        assert!(matches!(blank, Err(OwnerRegistryError::InvalidTypeTag(_))));

        registry
            .register(descriptor("landing_page"))
            .expect("first registration should succeed");
        let duplicate = registry.register(descriptor("landing_page"));
        assert!(matches!(
            duplicate,
            Err(OwnerRegistryError::DuplicateTypeTag(_))
        ));
    }

    #[test]
    fn candidates_preserve_registration_order() {
        let mut registry = OwnerTypeRegistry::new();
        registry
            .register(descriptor("zebra_page"))
            .expect("zebra registers");
        registry
            .register(descriptor("alpha_page"))
            .expect("alpha registers");

        // Registration order, not lexical order.
        assert_eq!(registry.tags(), vec!["zebra_page", "alpha_page"]);
    }

    #[test]
    fn opaque_descriptor_is_not_introspectable() {
        let descriptor = OwnerTypeDescriptor::opaque("legacy_page", Arc::new(NullQuery));
        assert!(!descriptor.is_introspectable());
        assert!(descriptor.relation_fields().is_empty());
    }

    #[test]
    fn get_trims_lookup_tag() {
        let mut registry = OwnerTypeRegistry::new();
        registry
            .register(descriptor("landing_page"))
            .expect("descriptor should register");
        assert!(registry.get("  landing_page  ").is_some());
    }
}
