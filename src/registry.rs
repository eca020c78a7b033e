//! Combination registry: the program's symbol table.
//!
//! Names are added in file order as definitions compile. A bare identifier is
//! only legal in a top-level expression once its name is in here, which is
//! what forbids forward references.

use indexmap::IndexMap;

#[derive(Debug, Default, Clone)]
pub struct Registry {
  combinations: IndexMap<String, String>,
}

impl Registry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Record `name` with its compiled body. Redefining a name replaces the
  /// body but keeps its first position; the old body is returned.
  pub fn define(&mut self, name: impl Into<String>, body: impl Into<String>) -> Option<String> {
    self.combinations.insert(name.into(), body.into())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.combinations.contains_key(name)
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self.combinations.get(name).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.combinations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.combinations.is_empty()
  }

  /// Iterate `(name, body)` pairs in definition order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .combinations
      .iter()
      .map(|(name, body)| (name.as_str(), body.as_str()))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn lookups_follow_definitions() {
    let mut registry = Registry::new();
    assert!(!registry.contains("Zero"));
    registry.define("Zero", "(f) => (a) => a");
    assert!(registry.contains("Zero"));
    assert_eq!(registry.get("Zero"), Some("(f) => (a) => a"));
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn redefinition_overwrites_in_place() {
    let mut registry = Registry::new();
    registry.define("True", "(a) => (b) => a");
    registry.define("False", "(a) => (b) => b");
    let previous = registry.define("True", "Kestrel");

    assert_eq!(previous.as_deref(), Some("(a) => (b) => a"));
    let names: Vec<&str> = registry.iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["True", "False"]);
    assert_eq!(registry.get("True"), Some("Kestrel"));
  }
}
