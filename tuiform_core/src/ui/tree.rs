//! The widget tree that manages all the widget components.
//!
//! Every widget is an id-keyed node in an arena; parent links and
//! insertion-ordered children vectors express the tree. Cross-references go
//! through ids and symbolic names rather than long-lived pointers into the
//! tree.

use crate::prelude::*;
use crate::ui::tree::attr::parse_int_prefix;
use crate::ui::tree::node::Widget;
use crate::ui::widget::{self, WidgetKind};
use compact_str::CompactString;
use itertools::Itertools;
use std::sync::atomic::{AtomicI32, Ordering};

pub mod attr;
pub mod node;

#[cfg(test)]
mod attr_tests;
#[cfg(test)]
mod tree_tests;

/// Widget (and attribute entry) id. Process-unique, monotonic, positive.
pub type WidgetId = i32;

/// The id no live widget or attribute entry ever has.
pub const INVALID_WIDGET_ID: WidgetId = 0;

/// Next process-unique entity id. Widgets and attribute entries draw from
/// the same counter.
pub fn next_entity_id() -> WidgetId {
  static COUNTER: AtomicI32 = AtomicI32::new(1);
  COUNTER.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Default)]
/// The widget tree.
///
/// # Guarantees
///
/// ## Ownership
///
/// A parent owns all its children: removing a widget removes its whole
/// subtree. The tree owns every node; the root is the single entry point for
/// layout and draw.
///
/// ## Order
///
/// Children keep insertion order. Sibling order is what layout, focus
/// traversal and name search walk.
pub struct Tree {
  nodes: HashMap<WidgetId, Widget>,
  parent: HashMap<WidgetId, WidgetId>,
  children: HashMap<WidgetId, Vec<WidgetId>>,
  root: Option<WidgetId>,
}

// Node {
impl Tree {
  /// Make an empty widget tree.
  pub fn new() -> Self {
    Tree {
      nodes: HashMap::new(),
      parent: HashMap::new(),
      children: HashMap::new(),
      root: None,
    }
  }

  #[cfg(not(test))]
  fn _internal_check(&self) {}

  #[cfg(test)]
  fn _internal_check(&self) {
    for (id, _node) in self.nodes.iter() {
      debug_assert!(self.children.contains_key(id));
      if let Some(parent_id) = self.parent.get(id) {
        debug_assert!(self.nodes.contains_key(parent_id));
        debug_assert_eq!(
          self
            .children
            .get(parent_id)
            .unwrap()
            .iter()
            .filter(|c| **c == *id)
            .count(),
          1
        );
      }
      for child_id in self.children.get(id).unwrap() {
        debug_assert_eq!(self.parent.get(child_id).copied(), Some(*id));
      }
    }
    if let Some(root) = self.root {
      debug_assert!(self.nodes.contains_key(&root));
      debug_assert!(!self.parent.contains_key(&root));
    }
  }

  /// Nodes count, include detached widgets.
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Root widget id.
  pub fn root_id(&self) -> Option<WidgetId> {
    self.root
  }

  /// Declare an existing widget the tree root.
  pub fn set_root(&mut self, id: WidgetId) {
    debug_assert!(self.nodes.contains_key(&id));
    debug_assert!(!self.parent.contains_key(&id));
    self.root = Some(id);
  }

  pub fn contains(&self, id: WidgetId) -> bool {
    self.nodes.contains_key(&id)
  }

  /// Whether `id` is reachable from the root through parent links.
  pub fn is_attached(&self, id: WidgetId) -> bool {
    let Some(root) = self.root else {
      return false;
    };
    if !self.nodes.contains_key(&id) {
      return false;
    }
    let mut cur = id;
    while let Some(parent_id) = self.parent.get(&cur) {
      cur = *parent_id;
    }
    cur == root
  }

  /// Get the node struct by its `id`.
  pub fn node(&self, id: WidgetId) -> Option<&Widget> {
    self.nodes.get(&id)
  }

  /// Get mutable node struct by its `id`.
  pub fn node_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
    self.nodes.get_mut(&id)
  }

  /// Get the parent id by a node `id`.
  pub fn parent_id(&self, id: WidgetId) -> Option<WidgetId> {
    self.parent.get(&id).copied()
  }

  /// Get the children ids by a node `id`, in sibling order.
  pub fn children_ids(&self, id: WidgetId) -> &[WidgetId] {
    self
      .children
      .get(&id)
      .map(|c| c.as_slice())
      .unwrap_or(&[])
  }
}
// Node }

// Create/Append/Remove {
impl Tree {
  /// Create a detached widget from a type name.
  ///
  /// Leading `!` bytes request focus on the next form step. The type name is
  /// matched against the widget type registry in order.
  pub fn new_widget(&mut self, type_name: &str) -> FormResult<WidgetId> {
    let mut name = type_name;
    let mut setfocus = false;
    while let Some(rest) = name.strip_prefix('!') {
      setfocus = true;
      name = rest;
    }

    let kind = WidgetKind::by_name(name)
      .ok_or_else(|| FormError::UnknownWidgetType(CompactString::new(name)))?;

    let id = next_entity_id();
    self.nodes.insert(id, Widget::new(id, kind, setfocus));
    self.children.insert(id, vec![]);
    widget::init(self, id);
    self._internal_check();
    Ok(id)
  }

  /// Append an existing detached widget as the last child of `parent_id`.
  pub fn append_child(&mut self, parent_id: WidgetId, child_id: WidgetId) {
    debug_assert!(self.nodes.contains_key(&parent_id));
    debug_assert!(self.nodes.contains_key(&child_id));
    debug_assert!(!self.parent.contains_key(&child_id));
    debug_assert_ne!(self.root, Some(child_id));
    self.children.get_mut(&parent_id).unwrap().push(child_id);
    self.parent.insert(child_id, parent_id);
    self._internal_check();
  }

  /// Remove a widget and its whole subtree, running each widget's `done`
  /// hook and unlinking the subtree root from its parent.
  pub fn remove(&mut self, id: WidgetId) {
    if !self.nodes.contains_key(&id) {
      return;
    }

    // Children first, bottom-up.
    let mut order: Vec<WidgetId> = Vec::new();
    let mut stack = vec![id];
    while let Some(wid) = stack.pop() {
      order.push(wid);
      stack.extend_from_slice(self.children_ids(wid));
    }
    for wid in order.iter().rev() {
      widget::done(self, *wid);
    }

    if let Some(parent_id) = self.parent.remove(&id) {
      let pos = self
        .children
        .get(&parent_id)
        .unwrap()
        .iter()
        .find_position(|c| **c == id)
        .unwrap()
        .0;
      self.children.get_mut(&parent_id).unwrap().remove(pos);
    }

    for wid in order {
      self.nodes.remove(&wid);
      self.children.remove(&wid);
      self.parent.remove(&wid);
    }

    if self.root == Some(id) {
      self.root = None;
    }
    self._internal_check();
  }
}
// Create/Append/Remove }

// Search {
impl Tree {
  /// Find the first widget named `name` in the subtree of `start`,
  /// pre-order.
  pub fn widget_by_name(&self, start: WidgetId, name: &str) -> Option<WidgetId> {
    let node = self.node(start)?;
    if node.name() == Some(name) {
      return Some(start);
    }
    for child_id in self.children_ids(start) {
      if let Some(found) = self.widget_by_name(*child_id, name) {
        return Some(found);
      }
    }
    None
  }

  /// Find the first attribute entry named `name` in the subtree of `start`,
  /// pre-order. Returns the owning widget and the entry key.
  pub fn kv_by_name(&self, start: WidgetId, name: &str) -> Option<(WidgetId, CompactString)> {
    let node = self.node(start)?;
    if let Some(kv) = node.attrs().get_by_name(name) {
      return Some((start, CompactString::new(kv.key())));
    }
    for child_id in self.children_ids(start) {
      if let Some(found) = self.kv_by_name(*child_id, name) {
        return Some(found);
      }
    }
    None
  }

  /// The child of `ancestor` whose subtree contains `id`.
  pub fn find_child_tree(&self, ancestor: WidgetId, id: WidgetId) -> Option<WidgetId> {
    let mut cur = id;
    loop {
      let parent_id = self.parent_id(cur)?;
      if parent_id == ancestor {
        return Some(cur);
      }
      cur = parent_id;
    }
  }
}
// Search }

// Attributes {
impl Tree {
  /// Set attribute `key` directly on widget `id`.
  pub fn setkv(
    &mut self,
    id: WidgetId,
    key: impl Into<CompactString>,
    value: impl Into<CompactString>,
  ) {
    if let Some(node) = self.node_mut(id) {
      node.attrs_mut().set(key, value);
    }
  }

  /// Set attribute `key` on widget `id` with a symbolic entry name.
  pub fn setkv_named(
    &mut self,
    id: WidgetId,
    key: impl Into<CompactString>,
    value: impl Into<CompactString>,
    name: impl Into<CompactString>,
  ) {
    if let Some(node) = self.node_mut(id) {
      node.attrs_mut().set_named(key, value, Some(name.into()));
    }
  }

  /// Formatted integer variant of [`setkv`](Tree::setkv).
  pub fn setkv_int(&mut self, id: WidgetId, key: impl Into<CompactString>, value: isize) {
    self.setkv(id, key, value.to_string());
  }

  /// Update the value of the attribute entry named `name` anywhere in the
  /// subtree of `start`.
  pub fn setkv_by_name(
    &mut self,
    start: WidgetId,
    name: &str,
    value: impl Into<CompactString>,
  ) -> bool {
    match self.kv_by_name(start, name) {
      Some((wid, _key)) => {
        self
          .node_mut(wid)
          .unwrap()
          .attrs_mut()
          .set_by_name(name, value)
      }
      None => false,
    }
  }

  /// Cascading attribute lookup.
  ///
  /// A plain key set directly on the widget short-circuits the cascade.
  /// Otherwise `@<class>#<key>`, `@<type>#<key>` and `@<key>` (class and
  /// type taken from the starting widget) are tried in that order at the
  /// widget and then at each ancestor up to the root.
  pub fn getkv(&self, id: WidgetId, key: &str) -> Option<&str> {
    let start = self.node(id)?;
    if let Some(kv) = start.attrs().get(key) {
      return Some(kv.value());
    }

    let key_plain = format!("@{key}");
    let key_type = format!("@{}#{key}", start.kind().type_name());
    let key_cls = start.cls().map(|cls| format!("@{cls}#{key}"));

    let mut cur = Some(id);
    while let Some(wid) = cur {
      let node = self.node(wid)?;
      if let Some(k) = &key_cls {
        if let Some(kv) = node.attrs().get(k) {
          return Some(kv.value());
        }
      }
      if let Some(kv) = node.attrs().get(&key_type) {
        return Some(kv.value());
      }
      if let Some(kv) = node.attrs().get(&key_plain) {
        return Some(kv.value());
      }
      cur = self.parent_id(wid);
    }
    None
  }

  /// Cascading lookup with a caller default.
  pub fn getkv_str<'a>(&'a self, id: WidgetId, key: &str, default: &'a str) -> &'a str {
    self.getkv(id, key).unwrap_or(default)
  }

  /// Cascading lookup parsed as a decimal number. Empty values and parse
  /// failures fall back to the caller default.
  pub fn getkv_int(&self, id: WidgetId, key: &str, default: isize) -> isize {
    match self.getkv(id, key) {
      Some(value) if !value.is_empty() => parse_int_prefix(value).unwrap_or(default),
      _ => default,
    }
  }

  /// Lookup by symbolic entry name in the subtree of `start`.
  pub fn getkv_by_name_str<'a>(
    &'a self,
    start: WidgetId,
    name: &str,
    default: &'a str,
  ) -> &'a str {
    match self.kv_by_name(start, name) {
      Some((wid, _key)) => self
        .node(wid)
        .and_then(|n| n.attrs().get_by_name(name))
        .map(|kv| kv.value())
        .unwrap_or(default),
      None => default,
    }
  }

  /// Integer variant of [`getkv_by_name_str`](Tree::getkv_by_name_str).
  pub fn getkv_by_name_int(&self, start: WidgetId, name: &str, default: isize) -> isize {
    let value = self.getkv_by_name_str(start, name, "");
    if value.is_empty() {
      return default;
    }
    parse_int_prefix(value).unwrap_or(default)
  }
}
// Attributes }
