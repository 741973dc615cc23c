//! Presentation contracts: breadcrumb summary, element wrappers, rendering.
//!
//! # Responsibility
//! - Define the presentation-ready shapes the container exposes to listing
//!   UIs and templates.
//! - Keep the template engine behind a name-based trait seam.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod breadcrumb;
pub mod element_view;

/// Name-based template rendering collaborator.
///
/// The engine is opaque to this core; templates are addressed by name and
/// fed a serialized context.
pub trait TemplateRenderer {
    /// Renders one named template with the given context.
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String, RenderError>;
}

/// Failures reported by the template collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// No template registered under the requested name.
    TemplateNotFound(String),
    /// The engine failed while rendering.
    Render(String),
    /// The context could not be serialized.
    Context(String),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TemplateNotFound(name) => write!(f, "template not found: {name}"),
            Self::Render(message) => write!(f, "template rendering failed: {message}"),
            Self::Context(message) => write!(f, "template context is invalid: {message}"),
        }
    }
}

impl Error for RenderError {}
