//! Per-widget attribute storage.
//!
//! Attributes are ordered key/value entries, newest first. A widget holds at
//! most one entry per key: setting an existing key replaces its value in
//! place, preserving the entry's id and position. Entries may carry an
//! optional symbolic name so hosts can update them without knowing which
//! widget they live on.

use crate::ui::tree::next_entity_id;
use compact_str::CompactString;

#[derive(Debug, Clone)]
/// One attribute entry.
pub struct KvEntry {
  id: i32,
  key: CompactString,
  value: CompactString,
  name: Option<CompactString>,
}

impl KvEntry {
  /// Process-unique entry id, drawn from the same counter as widget ids.
  pub fn id(&self) -> i32 {
    self.id
  }

  pub fn key(&self) -> &str {
    self.key.as_str()
  }

  pub fn value(&self) -> &str {
    self.value.as_str()
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }
}

#[derive(Debug, Clone, Default)]
/// Ordered attribute entries of one widget, newest first.
pub struct AttrStore {
  entries: Vec<KvEntry>,
}

impl AttrStore {
  pub fn new() -> Self {
    AttrStore {
      entries: Vec::new(),
    }
  }

  /// Set `key` to `value`. An existing entry is updated in place (id and
  /// position preserved), otherwise a new entry is prepended.
  pub fn set(
    &mut self,
    key: impl Into<CompactString>,
    value: impl Into<CompactString>,
  ) -> &KvEntry {
    self.set_named(key, value, None)
  }

  /// Like [`set`](AttrStore::set), also attaching a symbolic name to a newly
  /// created entry. An existing entry keeps its name.
  pub fn set_named(
    &mut self,
    key: impl Into<CompactString>,
    value: impl Into<CompactString>,
    name: Option<CompactString>,
  ) -> &KvEntry {
    let key = key.into();
    let value = value.into();
    if let Some(pos) = self.entries.iter().position(|kv| kv.key == key) {
      self.entries[pos].value = value;
      return &self.entries[pos];
    }
    self.entries.insert(
      0,
      KvEntry {
        id: next_entity_id(),
        key,
        value,
        name,
      },
    );
    &self.entries[0]
  }

  /// Linear scan by key.
  pub fn get(&self, key: &str) -> Option<&KvEntry> {
    self.entries.iter().find(|kv| kv.key == key)
  }

  /// Linear scan by symbolic entry name.
  pub fn get_by_name(&self, name: &str) -> Option<&KvEntry> {
    self.entries.iter().find(|kv| kv.name.as_deref() == Some(name))
  }

  /// Update the value of the entry named `name`, if present.
  pub fn set_by_name(&mut self, name: &str, value: impl Into<CompactString>) -> bool {
    match self
      .entries
      .iter_mut()
      .find(|kv| kv.name.as_deref() == Some(name))
    {
      Some(kv) => {
        kv.value = value.into();
        true
      }
      None => false,
    }
  }

  pub fn iter(&self) -> std::slice::Iter<'_, KvEntry> {
    self.entries.iter()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Parse the leading decimal number of an attribute value.
///
/// Leading whitespace and a sign are accepted, trailing garbage is ignored.
/// Returns `None` when no digits are present.
pub fn parse_int_prefix(value: &str) -> Option<isize> {
  let t = value.trim_start();
  let (neg, digits) = match t.strip_prefix('-') {
    Some(rest) => (true, rest),
    None => (false, t.strip_prefix('+').unwrap_or(t)),
  };
  let end = digits
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(digits.len());
  if end == 0 {
    return None;
  }
  digits[..end].parse::<isize>().ok().map(|v| if neg { -v } else { v })
}
