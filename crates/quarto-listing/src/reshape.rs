/*
 * reshape.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Render-ready listing reshaping.
 */

//! Render-ready listing reshaping.
//!
//! [`reshape_listing`] produces the augmented copy of a listing that the
//! template engine consumes: the original configuration plus the computed
//! layout span (Grid listings) and the column sort-target mapping. The
//! caller's listing is never mutated; derived values are recomputed on every
//! render rather than persisted.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::{Listing, ListingType};
use crate::layout::column_span;
use crate::sort::compute_sorting_targets;

/// A listing augmented with render-time computed values.
///
/// Serializes with the listing's own fields flattened alongside the computed
/// keys (`card-column-span`, `column-sort-targets`), which is the shape
/// templates address.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReshapedListing {
    #[serde(flatten)]
    pub listing: Listing,

    /// Grid-span bucket each item card occupies (Grid listings only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_column_span: Option<u32>,

    /// Column name -> sort-key identifier.
    pub column_sort_targets: IndexMap<String, String>,
}

/// Produce the render-ready copy of a listing.
pub fn reshape_listing(listing: &Listing) -> ReshapedListing {
    let card_column_span = match listing.listing_type {
        ListingType::Grid => Some(column_span(listing.column_count.unwrap_or(0))),
        _ => None,
    };

    ReshapedListing {
        card_column_span,
        column_sort_targets: compute_sorting_targets(listing),
        listing: listing.clone(),
    }
}
