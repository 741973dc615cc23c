//! Presentation wrapper for one visible element.

use crate::model::element::Element;
use crate::view::{RenderError, TemplateRenderer};
use serde::{Deserialize, Serialize};

/// One element wrapped for presentation.
///
/// Produced by the materializer after visibility filtering; carries the
/// element plus the name-derived template the host's engine should render it
/// with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementView {
    /// The wrapped element record.
    pub element: Element,
    /// Template name derived from the element type, e.g. `elements/text`.
    pub template: String,
}

impl ElementView {
    /// Wraps one element, deriving its template name from the type tag.
    pub fn for_element(element: Element) -> Self {
        let template = format!("elements/{}", element.element_type);
        Self { element, template }
    }

    /// Renders the wrapper through the host's template engine.
    pub fn render(&self, renderer: &dyn TemplateRenderer) -> Result<String, RenderError> {
        let context = serde_json::to_value(&self.element)
            .map_err(|err| RenderError::Context(err.to_string()))?;
        renderer.render(&self.template, &context)
    }
}

#[cfg(test)]
mod tests {
    use super::ElementView;
    use crate::model::element::Element;

    #[test]
    fn template_name_derives_from_element_type() {
        let view = ElementView::for_element(Element::new("image", "hero"));
        assert_eq!(view.template, "elements/image");
        assert_eq!(view.element.title, "hero");
    }
}
