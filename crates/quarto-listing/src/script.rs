/*
 * script.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Client-side interaction script generation.
 */

//! Client-side interaction script generation.
//!
//! Listings become interactive in the browser through a List-style
//! list-interaction object. This module emits the small configuration script
//! that constructs it on document ready: a `valueNames` array describing how
//! each column binds to the rendered markup, plus pagination settings when
//! the item count exceeds one page.
//!
//! Columns that sort by a derived value (see [`crate::sort`]) bind through a
//! `data-<column>-value` attribute; all other columns bind to the element
//! class named after the column. The predicate deciding which form a column
//! takes is shared with the sort-target calculator.

use crate::config::{DEFAULT_ROW_COUNT, Listing};
use crate::sort::needs_value_binding;

/// Number of items shown before pagination controls are required.
///
/// Grid listings multiply the row count by the column count so that a page
/// is `row-count` rows of cards, not `row-count` cards.
pub fn page_capacity(listing: &Listing) -> usize {
    let row_count = listing.row_count.unwrap_or(DEFAULT_ROW_COUNT);
    match listing.column_count.unwrap_or(0) {
        0 => row_count,
        columns => row_count * columns as usize,
    }
}

/// Generate the configuration script for one listing.
///
/// The output is JavaScript source consumed by the browser at view time. It
/// constructs a `List` object bound to the element with the given `id` once
/// the document has loaded. Pagination settings appear only when `item_count`
/// exceeds the listing's page capacity.
pub fn generate_script(id: &str, listing: &Listing, item_count: usize) -> String {
    let value_names: Vec<String> = listing
        .columns
        .iter()
        .map(|column| {
            if needs_value_binding(listing, column) {
                format!(
                    "{{ attr: {}, name: {} }}",
                    js_string(&format!("data-{}-value", column)),
                    js_string(&format!("{}-value", column))
                )
            } else {
                js_string(column)
            }
        })
        .collect();

    let capacity = page_capacity(listing);
    let pagination = if item_count > capacity {
        format!("\n    page: {},\n    pagination: true,", capacity)
    } else {
        String::new()
    };

    format!(
        r#"window.document.addEventListener("DOMContentLoaded", function (_event) {{
  const options = {{
    valueNames: [{value_names}],{pagination}
  }};
  window["quarto-listing-{id}"] = new List({id_string}, options);
}});
"#,
        value_names = value_names.join(", "),
        pagination = pagination,
        id = id,
        id_string = js_string(id),
    )
}

/// Quote a string as a JavaScript string literal.
fn js_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
