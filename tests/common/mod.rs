#![allow(dead_code)]

use compendium::prelude::*;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory item source that counts list fetches per endpoint and can be
/// told to fail specific endpoints.
#[derive(Default)]
pub struct FakeSource {
  lists: HashMap<String, Vec<Item>>,
  details: HashMap<(String, String), serde_json::Value>,
  failing: Vec<String>,
  fetches: Mutex<HashMap<String, usize>>,
}

impl FakeSource {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_items(mut self, endpoint: &str, items: &[(&str, &str)]) -> Self {
    let items = items
      .iter()
      .map(|(index, name)| Item::new(*index, *name, format!("/api/2014/{endpoint}/{index}")))
      .collect();
    self.lists.insert(endpoint.to_string(), items);
    self
  }

  pub fn with_detail(mut self, endpoint: &str, index: &str, record: serde_json::Value) -> Self {
    self.details.insert((endpoint.to_string(), index.to_string()), record);
    self
  }

  pub fn failing(mut self, endpoint: &str) -> Self {
    self.failing.push(endpoint.to_string());
    self
  }

  pub fn fetches(&self, endpoint: &str) -> usize {
    self.fetches.lock().unwrap().get(endpoint).copied().unwrap_or(0)
  }

  pub fn total_fetches(&self) -> usize {
    self.fetches.lock().unwrap().values().sum()
  }
}

impl ItemSource for FakeSource {
  fn list_items(&self, endpoint: &str) -> Result<ItemList, SourceError> {
    *self.fetches.lock().unwrap().entry(endpoint.to_string()).or_insert(0) += 1;
    if self.failing.iter().any(|e| e == endpoint) {
      return Err(SourceError::Status {
        url: format!("https://example.test/{endpoint}"),
        status: 503,
      });
    }
    let results = self.lists.get(endpoint).cloned().unwrap_or_default();
    Ok(ItemList {
      count: results.len(),
      results,
    })
  }

  fn get_item_detail(&self, endpoint: &str, index: &str) -> Result<serde_json::Value, SourceError> {
    self
      .details
      .get(&(endpoint.to_string(), index.to_string()))
      .cloned()
      .ok_or_else(|| SourceError::Status {
        url: format!("https://example.test/{endpoint}/{index}"),
        status: 404,
      })
  }
}

pub fn spells() -> Vec<(&'static str, &'static str)> {
  vec![
    ("acid-arrow", "Acid Arrow"),
    ("fire-bolt", "Fire Bolt"),
    ("fireball", "Fireball"),
    ("delayed-blast-fireball", "Delayed Blast Fireball"),
    ("fire-shield", "Fire Shield"),
    ("wall-of-fire", "Wall of Fire"),
    ("shield", "Shield"),
  ]
}

pub fn monsters() -> Vec<(&'static str, &'static str)> {
  vec![
    ("fire-elemental", "Fire Elemental"),
    ("fire-giant", "Fire Giant"),
    ("hell-hound", "Hell Hound"),
    ("salamander", "Salamander"),
    ("fire-snake", "Fire Snake"),
    ("azer", "Azer"),
  ]
}

pub fn approx(a: f32, b: f32) -> bool {
  (a - b).abs() < 1e-6
}
