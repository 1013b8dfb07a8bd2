/*
 * sort.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Sort-target derivation for listing columns.
 */

//! Sort-target derivation for listing columns.
//!
//! The client-side list script sorts by the rendered text of a column unless
//! that text is unsuitable as a sort key: formatted dates and numbers would
//! sort lexically, and link-wrapped values carry markup. Those columns bind
//! to a separate `<column>-value` key instead, which the item resolver
//! populates (see [`crate::item`]).
//!
//! [`needs_value_binding`] is the single predicate behind both the
//! sort-target mapping and the script generator's `valueNames` bindings, so
//! the two cannot drift apart.

use indexmap::IndexMap;

use crate::config::{ColumnType, Listing};

/// Whether a column must sort by a derived value rather than its rendered
/// text.
pub fn needs_value_binding(listing: &Listing, column: &str) -> bool {
    matches!(
        listing.column_type(column),
        ColumnType::Date | ColumnType::Number
    ) || listing.is_linked(column)
}

/// The sort key the client script binds to for `column`.
pub fn sort_target(listing: &Listing, column: &str) -> String {
    if needs_value_binding(listing, column) {
        format!("{}-value", column)
    } else {
        column.to_string()
    }
}

/// Compute the column -> sort-key mapping for every column of a listing.
///
/// Pure function of the listing's column metadata; item data plays no part.
pub fn compute_sorting_targets(listing: &Listing) -> IndexMap<String, String> {
    listing
        .columns
        .iter()
        .map(|column| (column.clone(), sort_target(listing, column)))
        .collect()
}
