//! Breadcrumb-style summary label for listing UIs.
//!
//! # Responsibility
//! - Derive the "Title" summary column of an area from its resolved owner:
//!   an anchor pointing at the owner's edit link.
//!
//! # Invariants
//! - An unresolved owner yields no breadcrumb, never an error.

use serde::{Deserialize, Serialize};

/// `(link, text)` pair derived from the resolved owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Owner's CMS edit-link target.
    pub href: String,
    /// Owner's title.
    pub text: String,
}

impl Breadcrumb {
    pub fn new(href: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            text: text.into(),
        }
    }

    /// Renders the label as an escaped HTML anchor.
    pub fn anchor_html(&self) -> String {
        format!(
            "<a href=\"{}\">{}</a>",
            html_escape::encode_double_quoted_attribute(&self.href),
            html_escape::encode_text(&self.text)
        )
    }
}
