/*
 * template.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Template-engine boundary and template data assembly.
 */

//! Template-engine boundary and template data assembly.
//!
//! Listings are rendered by an external template engine; this module defines
//! the contract ([`TemplateEngine`]) and builds the data payload a template
//! receives: the reshaped listing under `listing` and the item records under
//! `items`. Template parsing and evaluation are entirely the engine's
//! business.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};

use crate::error::{ListingError, Result};
use crate::reshape::ReshapedListing;

/// Contract for the external template-rendering engine.
pub trait TemplateEngine {
    /// Render the template at `template` with the given data.
    ///
    /// `escape_output` controls whether the engine HTML-escapes interpolated
    /// values; listing templates are trusted to produce markdown and pass
    /// `false`.
    fn render(&self, template: &Path, data: &Value, escape_output: bool) -> Result<String>;
}

/// Assemble the data payload for a listing template.
pub fn template_data(listing: &ReshapedListing, items: Vec<Value>) -> Result<Value> {
    Ok(json!({
        "listing": serde_json::to_value(listing)?,
        "items": items,
    }))
}

/// Engine that serves canned template output from an in-memory map.
///
/// Useful for testing and for hosts that render a fixed set of built-in
/// fragments without a real engine. The registered text is returned verbatim;
/// interpolation is a real engine's job.
#[derive(Debug, Clone, Default)]
pub struct MemoryEngine {
    templates: HashMap<PathBuf, String>,
}

impl MemoryEngine {
    /// Create an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register canned output for a template path.
    pub fn insert(&mut self, template: impl Into<PathBuf>, output: impl Into<String>) {
        self.templates.insert(template.into(), output.into());
    }
}

impl TemplateEngine for MemoryEngine {
    fn render(&self, template: &Path, _data: &Value, _escape_output: bool) -> Result<String> {
        self.templates
            .get(template)
            .cloned()
            .ok_or_else(|| ListingError::Template(format!("no template registered for {}", template.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Listing;
    use crate::reshape::reshape_listing;

    #[test]
    fn test_template_data_shape() {
        let listing = Listing::new("posts").with_columns(["title"]);
        let reshaped = reshape_listing(&listing);
        let items = vec![json!({"title": "Hello"})];

        let data = template_data(&reshaped, items).unwrap();
        assert_eq!(data.get("listing").unwrap().get("id").unwrap(), "posts");
        assert_eq!(data.get("items").unwrap()[0].get("title").unwrap(), "Hello");
    }

    #[test]
    fn test_memory_engine_returns_registered_output() {
        let mut engine = MemoryEngine::new();
        engine.insert("listing.ejs", "::: {.listing}\n:::");

        let out = engine
            .render(Path::new("listing.ejs"), &Value::Null, false)
            .unwrap();
        assert_eq!(out, "::: {.listing}\n:::");
    }

    #[test]
    fn test_memory_engine_misses_are_errors() {
        let engine = MemoryEngine::new();
        let err = engine
            .render(Path::new("absent.ejs"), &Value::Null, false)
            .unwrap_err();
        assert!(err.to_string().contains("absent.ejs"));
    }
}
