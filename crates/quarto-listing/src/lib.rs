//! Interactive listing rendering for Quarto websites.
//!
//! This crate turns a declarative listing definition and a set of content
//! items into (a) a markdown/HTML fragment suitable for embedding in a
//! rendered document and (b) a client-side script that makes the rendered
//! list sortable, pageable, and filterable in the browser. It is invoked
//! once per listing during document generation.
//!
//! # Architecture
//!
//! The pipeline is organized around these key types:
//!
//! - [`Listing`] - Declarative configuration for one listing instance
//! - [`ListingItem`] - One entry to render, with typed field values
//! - [`ReshapedListing`] - Render-ready copy with computed layout and
//!   sort-target data
//! - [`ListingHandler`] - Two-phase orchestration over the template engine
//!   and document model
//!
//! Template rendering and document mutation stay behind the
//! [`TemplateEngine`] and [`TargetDocument`] traits; everything else is
//! deterministic, pure computation over in-memory data.
//!
//! # Example
//!
//! ```ignore
//! use quarto_listing::{Listing, ListingHandler, ListingItem, ColumnType};
//!
//! let listing = Listing::new("posts")
//!     .with_columns(["title", "date"])
//!     .with_column_type("date", ColumnType::Date)
//!     .with_column_link("title");
//!
//! let items: Vec<ListingItem> = scan_documents()?;
//! let handler = ListingHandler::new(&listing, &items, "listing.ejs");
//!
//! // Phase 1: template output goes into the document for rendering
//! let payload = handler.unrendered(&engine)?;
//!
//! // Phase 2: the rendered fragment is injected into the output document
//! handler.process_rendered(&rendered_html, &mut doc)?;
//! ```

pub mod config;
pub mod doc;
pub mod error;
pub mod handler;
pub mod item;
pub mod layout;
pub mod reshape;
pub mod script;
pub mod sort;
pub mod template;
pub mod truncate;

// Re-export commonly used types
pub use config::{ColumnType, DEFAULT_ROW_COUNT, Listing, ListingType};
pub use doc::{FragmentDocument, TargetDocument};
pub use error::{ListingError, Result};
pub use handler::ListingHandler;
pub use item::{FieldValue, ListingItem, item_record, resolve_item};
pub use layout::column_span;
pub use reshape::{ReshapedListing, reshape_listing};
pub use script::{generate_script, page_capacity};
pub use sort::{compute_sorting_targets, needs_value_binding, sort_target};
pub use template::{MemoryEngine, TemplateEngine, template_data};
pub use truncate::truncate_text;
