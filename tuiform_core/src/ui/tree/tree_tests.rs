#![allow(unused_imports, dead_code, unused_variables)]

use super::*;
use crate::ui::widget::WidgetKind;

fn sample_tree() -> (Tree, WidgetId, WidgetId, WidgetId) {
  // vbox (root) -> vbox (mid) -> label (leaf)
  let mut tree = Tree::new();
  let root = tree.new_widget("vbox").unwrap();
  let mid = tree.new_widget("vbox").unwrap();
  let leaf = tree.new_widget("label").unwrap();
  tree.set_root(root);
  tree.append_child(root, mid);
  tree.append_child(mid, leaf);
  (tree, root, mid, leaf)
}

#[test]
fn factory() {
  let mut tree = Tree::new();
  let id = tree.new_widget("hbox").unwrap();
  assert_eq!(tree.node(id).unwrap().kind(), WidgetKind::Hbox);
  assert!(!tree.node(id).unwrap().setfocus());

  let focused = tree.new_widget("!checkbox").unwrap();
  assert_eq!(tree.node(focused).unwrap().kind(), WidgetKind::Checkbox);
  assert!(tree.node(focused).unwrap().setfocus());

  assert!(matches!(
    tree.new_widget("nosuch"),
    Err(FormError::UnknownWidgetType(_))
  ));
}

#[test]
fn widget_ids_unique_and_positive() {
  let mut tree = Tree::new();
  let mut ids = vec![];
  for _ in 0..8 {
    let id = tree.new_widget("label").unwrap();
    tree.setkv(id, "text", "x");
    ids.push(id);
    // Attribute entries draw from the same counter as widgets.
    ids.push(tree.node(id).unwrap().attrs().get("text").unwrap().id());
  }
  assert!(ids.iter().all(|id| *id > 0));
  ids.sort_unstable();
  ids.dedup();
  assert_eq!(ids.len(), 16);
}

#[test]
fn parent_child_links() {
  let (tree, root, mid, leaf) = sample_tree();
  assert_eq!(tree.root_id(), Some(root));
  assert_eq!(tree.parent_id(mid), Some(root));
  assert_eq!(tree.parent_id(leaf), Some(mid));
  assert_eq!(tree.children_ids(root), &[mid]);
  assert_eq!(tree.children_ids(mid), &[leaf]);
  assert!(tree.is_attached(leaf));
  assert_eq!(tree.find_child_tree(root, leaf), Some(mid));
}

#[test]
fn sibling_order() {
  let mut tree = Tree::new();
  let root = tree.new_widget("hbox").unwrap();
  tree.set_root(root);
  let a = tree.new_widget("label").unwrap();
  let b = tree.new_widget("label").unwrap();
  let c = tree.new_widget("label").unwrap();
  tree.append_child(root, a);
  tree.append_child(root, b);
  tree.append_child(root, c);
  assert_eq!(tree.children_ids(root), &[a, b, c]);
}

#[test]
fn remove_subtree() {
  let (mut tree, root, mid, leaf) = sample_tree();
  tree.remove(mid);
  assert!(!tree.contains(mid));
  assert!(!tree.contains(leaf));
  assert!(tree.contains(root));
  assert!(tree.children_ids(root).is_empty());

  tree.remove(root);
  assert!(tree.is_empty());
  assert_eq!(tree.root_id(), None);
}

#[test]
fn widget_by_name_preorder() {
  let mut tree = Tree::new();
  let root = tree.new_widget("vbox").unwrap();
  tree.set_root(root);
  let a = tree.new_widget("vbox").unwrap();
  let a1 = tree.new_widget("label").unwrap();
  let b = tree.new_widget("label").unwrap();
  tree.append_child(root, a);
  tree.append_child(a, a1);
  tree.append_child(root, b);
  tree.node_mut(a1).unwrap().set_name("target");
  tree.node_mut(b).unwrap().set_name("target");

  // Pre-order: the one inside the earlier subtree wins.
  assert_eq!(tree.widget_by_name(root, "target"), Some(a1));
  assert_eq!(tree.widget_by_name(b, "target"), Some(b));
  assert_eq!(tree.widget_by_name(root, "nosuch"), None);
}

#[test]
fn direct_key_shortcircuits_cascade() {
  let (mut tree, root, mid, leaf) = sample_tree();
  tree.setkv(root, "@color", "blue");
  tree.setkv(leaf, "color", "green");
  assert_eq!(tree.getkv_str(leaf, "color", ""), "green");
}

#[test]
fn cascade_precedence() {
  let (mut tree, root, mid, leaf) = sample_tree();

  // Nothing set: caller default.
  assert_eq!(tree.getkv_str(leaf, "color", "fallback"), "fallback");

  // Unqualified ancestor attribute.
  tree.setkv(root, "@color", "blue");
  assert_eq!(tree.getkv_str(leaf, "color", ""), "blue");

  // Type-qualified entry on a closer ancestor wins.
  tree.setkv(mid, "@label#color", "red");
  assert_eq!(tree.getkv_str(leaf, "color", ""), "red");

  // Class qualification outranks type qualification at the same widget.
  tree.node_mut(leaf).unwrap().set_cls("warn");
  tree.setkv(mid, "@warn#color", "yellow");
  assert_eq!(tree.getkv_str(leaf, "color", ""), "yellow");

  // The mid widget itself has a different type, its lookup skips the
  // label-qualified entries.
  assert_eq!(tree.getkv_str(mid, "color", ""), "blue");
}

#[test]
fn getkv_int_semantics() {
  let (mut tree, root, mid, leaf) = sample_tree();
  tree.setkv(leaf, "n", "42");
  assert_eq!(tree.getkv_int(leaf, "n", 7), 42);
  tree.setkv(leaf, "n", "");
  assert_eq!(tree.getkv_int(leaf, "n", 7), 7);
  tree.setkv(leaf, "n", "junk");
  assert_eq!(tree.getkv_int(leaf, "n", 7), 7);
  assert_eq!(tree.getkv_int(leaf, "nosuch", -1), -1);
}

#[test]
fn kv_by_name_subtree() {
  let (mut tree, root, mid, leaf) = sample_tree();
  tree.setkv_named(leaf, "text", "hello", "greeting");

  assert_eq!(tree.getkv_by_name_str(root, "greeting", ""), "hello");
  assert!(tree.setkv_by_name(root, "greeting", "bye"));
  assert_eq!(tree.getkv_by_name_str(root, "greeting", ""), "bye");
  assert!(!tree.setkv_by_name(root, "nosuch", "x"));

  tree.setkv_named(mid, "count", "3", "counter");
  assert_eq!(tree.getkv_by_name_int(root, "counter", 0), 3);
  assert_eq!(tree.getkv_by_name_int(root, "nosuch", 9), 9);
}
