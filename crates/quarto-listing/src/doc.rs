/*
 * doc.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Document-model boundary for fragment injection.
 */

//! Document-model boundary for fragment injection.
//!
//! The orchestration layer mutates the host's HTML document only through
//! [`TargetDocument`]: locate or create the target element, decorate it, and
//! replace its content. Hosts with a live DOM implement the trait over it;
//! [`FragmentDocument`] is a minimal in-memory implementation for hosts that
//! splice serialized fragments into their output (and for tests).

use indexmap::IndexMap;

use crate::error::{ListingError, Result};

/// The document mutations listing injection needs, keyed by element id.
pub trait TargetDocument {
    /// Locate the element with the given id, creating an empty one if the
    /// document has none.
    fn ensure_element(&mut self, id: &str) -> Result<()>;

    /// Add a CSS class to the element.
    fn add_class(&mut self, id: &str, class: &str) -> Result<()>;

    /// Set an attribute on the element.
    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<()>;

    /// Replace the element's content with an HTML fragment.
    fn set_content(&mut self, id: &str, html: &str) -> Result<()>;

    /// Append a script to the end of the document body.
    fn append_script(&mut self, script: &str) -> Result<()>;
}

#[derive(Debug, Clone, Default)]
struct FragmentElement {
    classes: Vec<String>,
    attributes: IndexMap<String, String>,
    content: String,
}

/// In-memory [`TargetDocument`] that serializes its elements on demand.
#[derive(Debug, Clone, Default)]
pub struct FragmentDocument {
    elements: IndexMap<String, FragmentElement>,
    scripts: Vec<String>,
}

impl FragmentDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize all elements and scripts to HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for (id, element) in &self.elements {
            out.push_str(&format!("<div id=\"{}\"", escape_html(id)));
            if !element.classes.is_empty() {
                out.push_str(&format!(
                    " class=\"{}\"",
                    escape_html(&element.classes.join(" "))
                ));
            }
            for (name, value) in &element.attributes {
                out.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            out.push('>');
            out.push('\n');
            out.push_str(&element.content);
            out.push_str("\n</div>\n");
        }
        for script in &self.scripts {
            out.push_str("<script>\n");
            out.push_str(script);
            out.push_str("</script>\n");
        }
        out
    }

    fn element_mut(&mut self, id: &str) -> Result<&mut FragmentElement> {
        self.elements
            .get_mut(id)
            .ok_or_else(|| ListingError::Document(format!("no element with id `{}`", id)))
    }
}

impl TargetDocument for FragmentDocument {
    fn ensure_element(&mut self, id: &str) -> Result<()> {
        self.elements.entry(id.to_string()).or_default();
        Ok(())
    }

    fn add_class(&mut self, id: &str, class: &str) -> Result<()> {
        let element = self.element_mut(id)?;
        if !element.classes.iter().any(|c| c == class) {
            element.classes.push(class.to_string());
        }
        Ok(())
    }

    fn set_attribute(&mut self, id: &str, name: &str, value: &str) -> Result<()> {
        self.element_mut(id)?
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn set_content(&mut self, id: &str, html: &str) -> Result<()> {
        self.element_mut(id)?.content = html.to_string();
        Ok(())
    }

    fn append_script(&mut self, script: &str) -> Result<()> {
        self.scripts.push(script.to_string());
        Ok(())
    }
}

/// Escape HTML special characters.
fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_then_decorate_and_fill() {
        let mut doc = FragmentDocument::new();
        doc.ensure_element("posts").unwrap();
        doc.add_class("posts", "quarto-listing").unwrap();
        doc.add_class("posts", "quarto-listing").unwrap(); // no duplicates
        doc.set_attribute("posts", "data-listing", "posts").unwrap();
        doc.set_content("posts", "<p>items</p>").unwrap();
        doc.append_script("console.log(1);").unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"<div id="posts" class="quarto-listing" data-listing="posts">"#));
        assert!(html.contains("<p>items</p>"));
        assert!(html.contains("<script>\nconsole.log(1);</script>"));
    }

    #[test]
    fn test_mutating_missing_element_is_an_error() {
        let mut doc = FragmentDocument::new();
        assert!(doc.set_content("absent", "x").is_err());
        assert!(doc.add_class("absent", "x").is_err());
    }

    #[test]
    fn test_ensure_is_idempotent() {
        let mut doc = FragmentDocument::new();
        doc.ensure_element("a").unwrap();
        doc.add_class("a", "one").unwrap();
        doc.ensure_element("a").unwrap();

        // Re-ensuring must not clear the existing element.
        assert!(doc.to_html().contains("class=\"one\""));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut doc = FragmentDocument::new();
        doc.ensure_element("a").unwrap();
        doc.set_attribute("a", "data-title", "\"quoted\" & <tagged>")
            .unwrap();
        let html = doc.to_html();
        assert!(html.contains("&quot;quoted&quot; &amp; &lt;tagged&gt;"));
    }
}
