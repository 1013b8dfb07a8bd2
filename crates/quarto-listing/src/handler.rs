/*
 * handler.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Listing render orchestration.
 */

//! Listing render orchestration.
//!
//! A [`ListingHandler`] drives one listing through the two phases of
//! document generation:
//!
//! 1. [`unrendered`](ListingHandler::unrendered) — resolve items, reshape
//!    the listing, and run the template engine, producing the markdown
//!    payload (keyed by listing id) that the surrounding pipeline renders
//!    with the rest of the document.
//! 2. [`process_rendered`](ListingHandler::process_rendered) — once the
//!    document is rendered, inject the fragment: locate or create the target
//!    element, apply classes and attributes, replace its content, and append
//!    the client interaction script.
//!
//! All of the domain logic lives in the leaf modules; this layer is glue
//! over the template and document collaborators.

use std::path::PathBuf;

use indexmap::IndexMap;

use crate::config::Listing;
use crate::doc::TargetDocument;
use crate::error::Result;
use crate::item::{ListingItem, item_record, resolve_item};
use crate::reshape::reshape_listing;
use crate::script::generate_script;
use crate::template::{TemplateEngine, template_data};

/// Orchestrates rendering and injection for one listing.
pub struct ListingHandler<'a> {
    listing: &'a Listing,
    items: &'a [ListingItem],
    template: PathBuf,
    attributes: IndexMap<String, String>,
}

impl<'a> ListingHandler<'a> {
    /// Create a handler for a listing, its items, and its template path.
    pub fn new(listing: &'a Listing, items: &'a [ListingItem], template: impl Into<PathBuf>) -> Self {
        Self {
            listing,
            items,
            template: template.into(),
            attributes: IndexMap::new(),
        }
    }

    /// Add an attribute to set on the target element.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Phase one: produce the unrendered markdown payload, keyed by listing
    /// id.
    ///
    /// The template receives the reshaped listing and the resolved item
    /// records; output escaping is disabled since listing templates are
    /// trusted to produce markdown.
    pub fn unrendered(&self, engine: &dyn TemplateEngine) -> Result<IndexMap<String, String>> {
        tracing::debug!(
            listing = %self.listing.id,
            items = self.items.len(),
            "Rendering listing template"
        );

        let records: Vec<serde_json::Value> = self
            .items
            .iter()
            .map(|item| {
                let resolved = resolve_item(item, self.listing);
                item_record(&resolved, self.listing)
            })
            .collect();

        let reshaped = reshape_listing(self.listing);
        let data = template_data(&reshaped, records)?;
        let markdown = engine.render(&self.template, &data, false)?;

        let mut payload = IndexMap::new();
        payload.insert(self.listing.id.clone(), markdown);
        Ok(payload)
    }

    /// Phase two: inject the rendered fragment into the target document.
    pub fn process_rendered(&self, rendered: &str, doc: &mut dyn TargetDocument) -> Result<()> {
        tracing::debug!(listing = %self.listing.id, "Injecting rendered listing");

        let id = &self.listing.id;
        doc.ensure_element(id)?;
        for class in &self.listing.classes {
            doc.add_class(id, class)?;
        }
        for (name, value) in &self.attributes {
            doc.set_attribute(id, name, value)?;
        }
        doc.set_content(id, rendered)?;
        doc.append_script(&generate_script(id, self.listing, self.items.len()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnType;
    use crate::doc::FragmentDocument;
    use crate::error::ListingError;
    use chrono::TimeZone;
    use serde_json::Value;
    use std::cell::RefCell;
    use std::path::Path;

    /// Engine double that captures the data it is asked to render.
    #[derive(Default)]
    struct RecordingEngine {
        data: RefCell<Option<Value>>,
        escape: RefCell<Option<bool>>,
    }

    impl TemplateEngine for RecordingEngine {
        fn render(&self, _template: &Path, data: &Value, escape_output: bool) -> Result<String> {
            *self.data.borrow_mut() = Some(data.clone());
            *self.escape.borrow_mut() = Some(escape_output);
            Ok("::: rendered :::".to_string())
        }
    }

    struct FailingEngine;

    impl TemplateEngine for FailingEngine {
        fn render(&self, _template: &Path, _data: &Value, _escape: bool) -> Result<String> {
            Err(ListingError::Template("engine exploded".to_string()))
        }
    }

    fn sample_listing() -> Listing {
        let mut listing = Listing::new("posts")
            .with_columns(["title", "date"])
            .with_column_type("date", ColumnType::Date)
            .with_column_link("title");
        listing.classes = vec!["quarto-listing".to_string()];
        listing
    }

    fn sample_items() -> Vec<ListingItem> {
        let date = chrono::Utc.with_ymd_and_hms(2024, 3, 5, 0, 0, 0).unwrap();
        vec![
            ListingItem::new()
                .with_field("title", "First post")
                .with_field("date", date),
            ListingItem::new().with_field("title", "Second post"),
        ]
    }

    #[test]
    fn test_unrendered_payload_is_keyed_by_listing_id() {
        let listing = sample_listing();
        let items = sample_items();
        let handler = ListingHandler::new(&listing, &items, "listing.ejs");

        let payload = handler.unrendered(&RecordingEngine::default()).unwrap();
        assert_eq!(payload.get("posts").unwrap(), "::: rendered :::");
    }

    #[test]
    fn test_unrendered_feeds_listing_and_items_to_engine() {
        let listing = sample_listing();
        let items = sample_items();
        let handler = ListingHandler::new(&listing, &items, "listing.ejs");
        let engine = RecordingEngine::default();

        handler.unrendered(&engine).unwrap();

        let data = engine.data.borrow().clone().unwrap();
        assert_eq!(data["listing"]["id"], "posts");
        assert_eq!(
            data["listing"]["column-sort-targets"]["date"],
            "date-value"
        );

        let first = &data["items"][0];
        assert_eq!(first["title"], "First post");
        assert_eq!(first["date"], "5 Mar 2024");
        assert_eq!(first["sortable-values"]["title"], "First post");
        assert!(first["sortable-values"]["date"].is_string());

        // Second item has no date; nothing sortable for it.
        let second = &data["items"][1];
        assert_eq!(second["sortable-values"]["title"], "Second post");
        assert!(second["sortable-values"].get("date").is_none());

        assert_eq!(*engine.escape.borrow(), Some(false));
    }

    #[test]
    fn test_unrendered_propagates_engine_errors() {
        let listing = sample_listing();
        let items = sample_items();
        let handler = ListingHandler::new(&listing, &items, "listing.ejs");

        let err = handler.unrendered(&FailingEngine).unwrap_err();
        assert!(matches!(err, ListingError::Template(_)));
    }

    #[test]
    fn test_process_rendered_decorates_and_fills_target() {
        let listing = sample_listing();
        let items = sample_items();
        let handler = ListingHandler::new(&listing, &items, "listing.ejs")
            .with_attribute("data-listing", "posts");
        let mut doc = FragmentDocument::new();

        handler.process_rendered("<p>fragment</p>", &mut doc).unwrap();

        let html = doc.to_html();
        assert!(html.contains(r#"id="posts""#));
        assert!(html.contains(r#"class="quarto-listing""#));
        assert!(html.contains(r#"data-listing="posts""#));
        assert!(html.contains("<p>fragment</p>"));
        assert!(html.contains(r#"new List("posts", options)"#));
    }
}
