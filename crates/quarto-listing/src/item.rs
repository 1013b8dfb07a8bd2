/*
 * item.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Listing item model, sortable-value resolution, and template records.
 */

//! Listing items and their render-ready representations.
//!
//! A [`ListingItem`] is one entry to render: a bag of named, typed field
//! values plus a map of sortable values. Two operations turn items into
//! template input:
//!
//! - [`resolve_item`] derives sortable string representations for date,
//!   number, and link-wrapped columns. It returns an augmented copy; callers
//!   that want the item updated reassign the result.
//! - [`item_record`] flattens an item into the plain record the template
//!   engine consumes, collapsing author lists, formatting date fields, and
//!   truncating descriptions.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde_json::Value;

use crate::config::{ColumnType, Listing};
use crate::truncate::truncate_text;

/// Field holding an item's author names; collapsed to a comma-joined string
/// for rendering.
pub const FIELD_AUTHOR: &str = "author";

/// Field holding an item's primary date.
pub const FIELD_DATE: &str = "date";

/// Field holding an item's file-modification date.
pub const FIELD_FILE_MODIFIED: &str = "filemodified";

/// Field holding an item's description text.
pub const FIELD_DESCRIPTION: &str = "description";

/// Display format used when a listing sets no `date-format`.
///
/// chrono carries no locale data, so this fixed format stands in for
/// locale-default formatting.
pub const DEFAULT_DATE_FORMAT: &str = "%-d %b %Y";

/// A typed field value on a listing item.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Plain text.
    Str(String),
    /// Numeric value.
    Num(f64),
    /// Date value.
    Date(DateTime<Utc>),
    /// List of strings (author names, categories, ...).
    List(Vec<String>),
}

impl FieldValue {
    /// The raw string form of this value, bypassing any display formatting.
    pub fn raw_string(&self) -> String {
        match self {
            FieldValue::Str(s) => s.clone(),
            FieldValue::Num(n) => n.to_string(),
            FieldValue::Date(d) => d.to_rfc3339(),
            FieldValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Num(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

/// One entry to render in a listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingItem {
    /// Named field values (column name -> value).
    pub fields: IndexMap<String, FieldValue>,

    /// Column name -> sort-friendly string representation. Initially empty;
    /// populated by [`resolve_item`].
    pub sortable_values: IndexMap<String, String>,
}

impl ListingItem {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Set the author list.
    pub fn with_authors(mut self, authors: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.fields.insert(
            FIELD_AUTHOR.to_string(),
            FieldValue::List(authors.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Look up a field value by name.
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }
}

/// Derive sortable values for an item's typed and linked columns.
///
/// Returns a copy of `item` whose `sortable_values` map is populated:
///
/// - date columns get the epoch-millisecond value, stringified, so
///   chronological order is independent of display formatting;
/// - number columns get the stringified numeric value, so sorting is numeric
///   rather than lexical;
/// - linked columns get the raw field value, bypassing the link markup that
///   wraps the rendered text.
///
/// The link pass runs after the type pass and overwrites it on collision, so
/// a linked date column sorts by its raw value. Fields with no value on the
/// item are skipped.
pub fn resolve_item(item: &ListingItem, listing: &Listing) -> ListingItem {
    let mut resolved = item.clone();

    for (column, column_type) in &listing.column_types {
        match column_type {
            ColumnType::Date => {
                if let Some(FieldValue::Date(date)) = item.field(column) {
                    resolved
                        .sortable_values
                        .insert(column.clone(), date.timestamp_millis().to_string());
                }
            }
            ColumnType::Number => {
                if let Some(FieldValue::Num(number)) = item.field(column) {
                    resolved
                        .sortable_values
                        .insert(column.clone(), number.to_string());
                }
            }
            ColumnType::String => {}
        }
    }

    for column in &listing.column_links {
        if let Some(value) = item.field(column) {
            resolved
                .sortable_values
                .insert(column.clone(), value.raw_string());
        }
    }

    resolved
}

/// Flatten an item into the plain record handed to the template engine.
///
/// All fields are copied; on top of that the author list collapses to a
/// comma-joined string, the `date` and `filemodified` fields are formatted
/// with the listing's `date-format` (or [`DEFAULT_DATE_FORMAT`]), and the
/// description is truncated when `max-description-length` is positive. The
/// item's sortable values ride along under `sortable-values` so the template
/// can emit `data-<column>-value` attributes.
pub fn item_record(item: &ListingItem, listing: &Listing) -> Value {
    let mut record = serde_json::Map::new();

    for (name, value) in &item.fields {
        record.insert(name.clone(), field_to_json(value));
    }

    if let Some(FieldValue::List(authors)) = item.field(FIELD_AUTHOR) {
        record.insert(FIELD_AUTHOR.to_string(), Value::String(authors.join(", ")));
    }

    let date_format = listing.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT);
    for field in [FIELD_DATE, FIELD_FILE_MODIFIED] {
        if let Some(FieldValue::Date(date)) = item.field(field) {
            record.insert(
                field.to_string(),
                Value::String(format_date(date, date_format)),
            );
        }
    }

    if let Some(max_length) = listing.max_description_length {
        if max_length > 0 {
            if let Some(FieldValue::Str(description)) = item.field(FIELD_DESCRIPTION) {
                record.insert(
                    FIELD_DESCRIPTION.to_string(),
                    Value::String(truncate_text(description, max_length as usize)),
                );
            }
        }
    }

    if !item.sortable_values.is_empty() {
        let sortable: serde_json::Map<String, Value> = item
            .sortable_values
            .iter()
            .map(|(column, value)| (column.clone(), Value::String(value.clone())))
            .collect();
        record.insert("sortable-values".to_string(), Value::Object(sortable));
    }

    Value::Object(record)
}

/// Format a date for display, falling back to [`DEFAULT_DATE_FORMAT`] when
/// the configured format string is invalid.
pub fn format_date(date: &DateTime<Utc>, format: &str) -> String {
    use chrono::format::{Item, StrftimeItems};

    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return date.format(DEFAULT_DATE_FORMAT).to_string();
    }
    date.format_with_items(items.into_iter()).to_string()
}

fn field_to_json(value: &FieldValue) -> Value {
    match value {
        FieldValue::Str(s) => Value::String(s.clone()),
        // NaN and infinities have no JSON form
        FieldValue::Num(n) => serde_json::Number::from_f64(*n).map_or(Value::Null, Value::Number),
        FieldValue::Date(d) => Value::String(d.to_rfc3339()),
        FieldValue::List(items) => Value::Array(
            items
                .iter()
                .map(|item| Value::String(item.clone()))
                .collect(),
        ),
    }
}
