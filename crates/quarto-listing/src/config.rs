/*
 * config.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Listing configuration types.
 */

//! Listing configuration.
//!
//! A [`Listing`] describes how one set of content items is displayed and made
//! interactive: which columns appear, how their values are typed, which are
//! rendered as links, and the layout/pagination parameters.
//!
//! The configuration is an explicit struct with named optional fields rather
//! than a string-keyed map. Serde renames give the kebab-case wire form used
//! in document metadata (`column-types`, `row-count`, ...), so a listing can
//! be read directly from the merged metadata for a document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ListingError, Result};

/// Page size applied when a listing does not set `row-count`.
pub const DEFAULT_ROW_COUNT: usize = 50;

/// The presentation variant of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    /// Stacked cards (the default presentation).
    #[default]
    Default,
    /// Tabular rows.
    Table,
    /// Card grid; enables column-span computation.
    Grid,
    /// User-supplied template with no built-in layout.
    Custom,
}

impl ListingType {
    /// Get the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingType::Default => "default",
            ListingType::Table => "table",
            ListingType::Grid => "grid",
            ListingType::Custom => "custom",
        }
    }
}

impl std::fmt::Display for ListingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The value type of a listing column.
///
/// Date and number columns sort by a derived sortable value rather than by
/// their rendered text (see [`crate::sort`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Plain text; the rendered value doubles as the sort key.
    #[default]
    String,
    /// Date value; sorts by epoch milliseconds.
    Date,
    /// Numeric value; sorts numerically rather than lexically.
    Number,
}

/// Configuration for one listing instance.
///
/// Constructed by the surrounding document-generation process (usually via
/// [`Listing::from_metadata`]) before rendering; read-only from then on.
/// Reshaping works on a clone and never mutates the original.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Listing {
    /// Identifier, unique per document. Render target and script binding
    /// target.
    pub id: String,

    /// Presentation variant.
    #[serde(rename = "type", default)]
    pub listing_type: ListingType,

    /// Ordered columns to display and sort.
    #[serde(default)]
    pub columns: Vec<String>,

    /// Column name -> value type. Missing entries default to
    /// [`ColumnType::String`].
    #[serde(default)]
    pub column_types: IndexMap<String, ColumnType>,

    /// Columns whose rendered value is wrapped in a hyperlink.
    #[serde(default)]
    pub column_links: Vec<String>,

    /// Number of grid columns (Grid type only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<u32>,

    /// Page size for pagination. Defaults to [`DEFAULT_ROW_COUNT`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,

    /// Format string applied to date-valued fields (chrono strftime syntax).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,

    /// When positive, description text is truncated to this length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_description_length: Option<i64>,

    /// CSS classes applied to the render target.
    #[serde(default)]
    pub classes: Vec<String>,
}

impl Listing {
    /// Create a listing with the given id and all-default options.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            listing_type: ListingType::Default,
            columns: Vec::new(),
            column_types: IndexMap::new(),
            column_links: Vec::new(),
            column_count: None,
            row_count: None,
            date_format: None,
            max_description_length: None,
            classes: Vec::new(),
        }
    }

    /// Set the listing type.
    pub fn with_type(mut self, listing_type: ListingType) -> Self {
        self.listing_type = listing_type;
        self
    }

    /// Set the display columns.
    pub fn with_columns(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Declare the type of a column.
    pub fn with_column_type(mut self, column: impl Into<String>, column_type: ColumnType) -> Self {
        self.column_types.insert(column.into(), column_type);
        self
    }

    /// Mark a column as link-wrapped.
    pub fn with_column_link(mut self, column: impl Into<String>) -> Self {
        self.column_links.push(column.into());
        self
    }

    /// Parse a listing from document metadata.
    ///
    /// Unknown keys are ignored and missing keys take their documented
    /// defaults; only a malformed value or a violated column invariant is an
    /// error.
    pub fn from_metadata(value: &serde_json::Value) -> Result<Self> {
        let listing: Listing = serde_json::from_value(value.clone())?;
        listing.validate()?;
        Ok(listing)
    }

    /// Check internal consistency: every column referenced by `column-types`
    /// or `column-links` must appear in `columns`.
    pub fn validate(&self) -> Result<()> {
        for column in self.column_types.keys().chain(self.column_links.iter()) {
            if !self.columns.contains(column) {
                return Err(ListingError::config(format!(
                    "column `{}` is not declared in `columns`",
                    column
                )));
            }
        }
        Ok(())
    }

    /// The declared type of a column (String when undeclared).
    pub fn column_type(&self, column: &str) -> ColumnType {
        self.column_types.get(column).copied().unwrap_or_default()
    }

    /// Whether a column's rendered value is wrapped in a hyperlink.
    pub fn is_linked(&self, column: &str) -> bool {
        self.column_links.iter().any(|c| c == column)
    }
}
