mod common;

use common::{approx, monsters, spells, FakeSource};
use compendium::prelude::*;
use std::sync::Arc;

fn engine_over(source: Arc<FakeSource>, endpoints: &[&str]) -> SearchEngine {
  SearchEngine::builder(source)
    .registry(Arc::new(StaticRegistry::new(endpoints.iter().copied())))
    .build()
}

fn catalog() -> Arc<FakeSource> {
  Arc::new(
    FakeSource::new()
      .with_items("spells", &spells())
      .with_items("monsters", &monsters()),
  )
}

fn indexes(hits: &[Hit]) -> Vec<&str> {
  hits.iter().map(|h| h.item.index.as_str()).collect()
}

#[test]
fn test_search_in_endpoint_ranks_prefix_above_contains() {
  let engine = engine_over(catalog(), &["spells", "monsters"]);
  let hits = engine.search_in_endpoint("fire", "spells", 10);

  // Prefix matches on the index score 1.0, mid-name matches 0.8. Ties keep
  // upstream order.
  assert_eq!(
    indexes(&hits),
    vec!["fire-bolt", "fireball", "fire-shield", "delayed-blast-fireball", "wall-of-fire"]
  );
  assert!(hits.iter().all(|h| h.endpoint == "spells"));
  assert!(hits.iter().all(|h| h.matched_field == MatchedField::Name));
  assert!(approx(hits[0].relevance_score, 1.0));
  assert!(approx(hits[3].relevance_score, 0.8));
}

#[test]
fn test_exact_name_match() {
  let engine = engine_over(catalog(), &["spells"]);
  let hits = engine.search_in_endpoint("Fireball", "spells", 10);
  assert_eq!(indexes(&hits), vec!["fireball", "delayed-blast-fireball"]);
  assert!(approx(hits[0].relevance_score, 1.0));
  assert!(approx(hits[1].relevance_score, 0.8));
}

#[test]
fn test_index_only_match() {
  let engine = engine_over(catalog(), &["spells"]);
  let hits = engine.search_in_endpoint("wall-of", "spells", 10);
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].matched_field, MatchedField::Index);
  assert!(approx(hits[0].relevance_score, 0.9));
}

#[test]
fn test_case_insensitive_only_match() {
  let source = Arc::new(FakeSource::new().with_items("spells", &[("fireball", "fireball")]));
  let engine = engine_over(source, &["spells"]);
  let hits = engine.search_in_endpoint("FIRE", "spells", 10);
  assert_eq!(hits.len(), 1);
  assert_eq!(hits[0].matched_field, MatchedField::Name);
  assert!(approx(hits[0].relevance_score, 0.8));
}

#[test]
fn test_hits_share_cached_items() {
  let engine = engine_over(catalog(), &["spells"]);
  let first = engine.search_in_endpoint("Fireball", "spells", 1);
  let second = engine.search_in_endpoint("fireball", "spells", 1);
  assert!(Arc::ptr_eq(&first[0].item, &second[0].item));
}

#[test]
fn test_results_respect_limit_and_order() {
  let engine = engine_over(catalog(), &["spells", "monsters"]);
  for max in 1..=6 {
    let hits = engine.search_in_endpoint("fire", "spells", max);
    assert!(hits.len() <= max);
    assert!(hits
      .windows(2)
      .all(|w| w[0].relevance_score >= w[1].relevance_score));

    let merged = engine.search("i", &[], max);
    assert!(merged.len() <= max);
    assert!(merged
      .windows(2)
      .all(|w| w[0].relevance_score >= w[1].relevance_score));
  }
}

#[test]
fn test_zero_limit_returns_nothing() {
  let source = catalog();
  let engine = engine_over(source.clone(), &["spells", "monsters"]);
  assert!(engine.search_in_endpoint("fire", "spells", 0).is_empty());
  assert!(engine.search("fire", &[], 0).is_empty());
  // The cache is still populated.
  assert_eq!(source.fetches("spells"), 1);
}

#[test]
fn test_empty_query_matches_nothing() {
  let engine = engine_over(catalog(), &["spells", "monsters"]);
  assert!(engine.search("", &[], 100).is_empty());
}

#[test]
fn test_each_endpoint_truncated_before_merge() {
  let source = Arc::new(
    FakeSource::new()
      .with_items(
        "a",
        &[("a-x1", "ax1"), ("a-x2", "ax2"), ("a-x3", "ax3"), ("a-x4", "ax4"), ("a-x5", "ax5")],
      )
      .with_items(
        "b",
        &[("x-b1", "x b1"), ("x-b2", "x b2"), ("x-b3", "x b3"), ("x-b4", "x b4"), ("x-b5", "x b5")],
      ),
  );
  let engine = engine_over(source, &["a", "b"]);

  assert_eq!(engine.search_in_endpoint("x", "a", 3).len(), 3);
  assert_eq!(engine.search_in_endpoint("x", "b", 3).len(), 3);

  let hits = engine.search("x", &["a".to_string(), "b".to_string()], 3);
  assert_eq!(indexes(&hits), vec!["x-b1", "x-b2", "x-b3"]);
  assert!(hits.iter().all(|h| approx(h.relevance_score, 1.0)));

  // Only three of each endpoint's five matches survive to the merge.
  let all = engine.search("x", &["a".to_string(), "b".to_string()], 10);
  assert_eq!(all.len(), 10);
  let capped = engine.search("x", &["a".to_string(), "b".to_string()], 4);
  assert_eq!(indexes(&capped), vec!["x-b1", "x-b2", "x-b3", "x-b4"]);
}

#[test]
fn test_ties_keep_endpoint_order() {
  let engine = engine_over(catalog(), &["spells", "monsters"]);
  let hits = engine.search("fire", &["monsters".to_string(), "spells".to_string()], 4);
  // Every prefix hit scores 1.0; monsters were requested first.
  assert_eq!(
    indexes(&hits),
    vec!["fire-elemental", "fire-giant", "fire-snake", "fire-bolt"]
  );
}

#[test]
fn test_empty_endpoint_list_searches_registry() {
  let source = catalog();
  let engine = engine_over(source.clone(), &["spells", "monsters", "classes"]);
  let hits = engine.search("salamander", &[], 10);
  assert_eq!(indexes(&hits), vec!["salamander"]);
  assert_eq!(hits[0].endpoint, "monsters");
  assert_eq!(source.fetches("spells"), 1);
  assert_eq!(source.fetches("monsters"), 1);
  assert_eq!(source.fetches("classes"), 1);
}

#[test]
fn test_failing_endpoint_degrades_to_no_hits() {
  let source = Arc::new(
    FakeSource::new()
      .with_items("spells", &spells())
      .failing("monsters"),
  );
  let engine = engine_over(source.clone(), &["spells", "monsters"]);

  let hits = engine.search("fire", &[], 100);
  assert_eq!(hits.len(), 5);
  assert!(hits.iter().all(|h| h.endpoint == "spells"));

  let stats = engine.cache_stats();
  assert_eq!(stats.get("spells"), Some(&7));
  assert!(!stats.contains_key("monsters"));

  // Failures are not cached, so the next search tries again.
  engine.search("fire", &[], 100);
  assert_eq!(source.fetches("monsters"), 2);
  assert_eq!(source.fetches("spells"), 1);
}

#[test]
fn test_preload_and_stats() {
  let source = Arc::new(
    FakeSource::new()
      .with_items("spells", &spells())
      .failing("monsters"),
  );
  let engine = engine_over(source.clone(), &["spells", "monsters"]);
  assert!(engine.cache_stats().is_empty());

  let report = engine.preload(&["spells".to_string()]);
  assert_eq!(report.loaded, vec!["spells"]);
  assert_eq!(engine.cache_stats().get("spells"), Some(&7));

  let report = engine.preload(&[]);
  assert_eq!(report.failed, vec!["monsters"]);
  let stats = engine.cache_stats();
  assert_eq!(stats.len(), 1);
  assert!(!stats.contains_key("monsters"));

  // Preloaded endpoints are served from the cache.
  engine.search("fire", &["spells".to_string()], 10);
  assert_eq!(source.fetches("spells"), 1);
}

#[test]
fn test_clear_cache_triggers_refetch() {
  let source = catalog();
  let engine = engine_over(source.clone(), &["spells", "monsters"]);

  engine.search("fire", &[], 10);
  engine.search("fire", &[], 10);
  assert_eq!(source.total_fetches(), 2);

  let held = engine.search("Fireball", &["spells".to_string()], 1);
  engine.clear_cache();
  assert!(engine.cache_stats().is_empty());
  assert_eq!(held[0].item.name, "Fireball");

  engine.search("fire", &[], 10);
  assert_eq!(source.fetches("spells"), 2);
  assert_eq!(source.fetches("monsters"), 2);
}

#[test]
fn test_concurrent_searches_agree() {
  let engine = engine_over(catalog(), &["spells", "monsters"]);
  let expected: Vec<String> = engine
    .search("fire", &[], 50)
    .iter()
    .map(|h| h.item.index.clone())
    .collect();

  std::thread::scope(|scope| {
    for _ in 0..8 {
      scope.spawn(|| {
        let got: Vec<String> = engine
          .search("fire", &[], 50)
          .iter()
          .map(|h| h.item.index.clone())
          .collect();
        assert_eq!(got, expected);
      });
    }
  });
}
