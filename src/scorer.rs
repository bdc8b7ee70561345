//! Substring matching and relevance scoring.
//!
//! Matching is a plain case-insensitive substring test on the `name` and
//! `index` fields. Scoring rewards exact and prefix matches on top of that,
//! but those two tiers compare bytes case-sensitively, so a query that only
//! matches after case folding never scores above the containment tier.

use crate::types::{Item, MatchedField};

const EXACT: f32 = 1.0;
const PREFIX: f32 = 0.8;
const CONTAINS: f32 = 0.6;

const NAME_BOOST: f32 = 0.2;
const INDEX_BOOST: f32 = 0.1;

/// Case-insensitive (ASCII) substring test.
///
/// Returns `false` when either side is empty, so an empty query matches
/// nothing rather than everything.
pub fn contains(text: &str, query: &str) -> bool {
  if text.is_empty() || query.is_empty() {
    return false;
  }
  text
    .to_ascii_lowercase()
    .contains(&query.to_ascii_lowercase())
}

/// Finds the field of `item` that contains `query`, checking `name` before
/// `index`. An item matching both is reported as a name match.
pub fn match_item(item: &Item, query: &str) -> Option<MatchedField> {
  if contains(&item.name, query) {
    Some(MatchedField::Name)
  } else if contains(&item.index, query) {
    Some(MatchedField::Index)
  } else {
    None
  }
}

/// Scores `item` against `query`, given the field that matched.
///
/// The base tier is 1.0 for an exact match on name or index, 0.8 for a
/// byte prefix, 0.6 for a case-insensitive substring and 0.0 otherwise. A
/// name match adds 0.2 and an index match 0.1. The sum is capped at 1.0.
pub fn score(item: &Item, query: &str, matched_field: Option<MatchedField>) -> f32 {
  let base = if item.name == query || item.index == query {
    EXACT
  } else if item.name.starts_with(query) || item.index.starts_with(query) {
    PREFIX
  } else if contains(&item.name, query) || contains(&item.index, query) {
    CONTAINS
  } else {
    0.0
  };

  let boost = match matched_field {
    Some(MatchedField::Name) => NAME_BOOST,
    Some(MatchedField::Index) => INDEX_BOOST,
    None => 0.0,
  };

  (base + boost).min(1.0)
}
