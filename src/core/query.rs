//! Mapping between [`FilterSpec`] and the page's query string.
//!
//! Keys: `search`, `mode`, `spec` (repeated, order kept), `sort`. Values are
//! `application/x-www-form-urlencoded`. Unset fields are left out entirely.
//!
//! `decode` always yields `specs: Some(..)`, possibly empty, so an unset
//! specialty list comes back as an empty one after a round trip. Every
//! consumer treats the two the same.

use crate::domain::model::{ConsultMode, FilterSpec, SortKey};
use url::form_urlencoded;

pub const SEARCH_KEY: &str = "search";
pub const MODE_KEY: &str = "mode";
pub const SPEC_KEY: &str = "spec";
pub const SORT_KEY: &str = "sort";

pub fn encode(filters: &FilterSpec) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if let Some(search) = filters.search.as_deref().filter(|s| !s.is_empty()) {
        query.append_pair(SEARCH_KEY, search);
    }
    if let Some(mode) = filters.mode {
        query.append_pair(MODE_KEY, mode.label());
    }
    for spec in filters.selected_specialties() {
        query.append_pair(SPEC_KEY, spec);
    }
    if let Some(sort) = filters.sort {
        query.append_pair(SORT_KEY, sort.as_str());
    }

    query.finish()
}

/// Accepts the query with or without its leading `?`. For single-valued
/// keys the first occurrence wins; empty or unrecognised values are unset.
pub fn decode(query: &str) -> FilterSpec {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut search = None;
    let mut mode = None;
    let mut sort = None;
    let mut specs = Vec::new();
    let mut seen_search = false;
    let mut seen_mode = false;
    let mut seen_sort = false;

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            SEARCH_KEY if !seen_search => {
                seen_search = true;
                search = Some(value.into_owned()).filter(|s| !s.is_empty());
            }
            MODE_KEY if !seen_mode => {
                seen_mode = true;
                mode = ConsultMode::from_label(&value);
                if mode.is_none() && !value.is_empty() {
                    tracing::warn!("Ignoring unknown consultation mode {:?}", value);
                }
            }
            SORT_KEY if !seen_sort => {
                seen_sort = true;
                sort = SortKey::from_key(&value);
                if sort.is_none() && !value.is_empty() {
                    tracing::warn!("Ignoring unknown sort key {:?}", value);
                }
            }
            SPEC_KEY => specs.push(value.into_owned()),
            _ => {}
        }
    }

    FilterSpec {
        search,
        mode,
        specs: Some(specs),
        sort,
    }
}
