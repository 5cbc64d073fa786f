//! Key binding resolution.
//!
//! A binding group (`left`, `right`, `toggle`, ...) resolves to a
//! whitespace-separated list of symbolic key names, either authored as a
//! `bind_<group>` attribute or supplied by the widget type as an
//! auto-description.

use crate::ui::key::{Key, keyname};
use crate::ui::tree::{Tree, WidgetId};

/// Whether `key` matches the binding group `group` on widget `id`.
///
/// The authored `bind_<group>` attribute is looked up with the cascade; when
/// missing, the type's `auto_desc` applies unless `autobind` resolves to
/// zero. A literal `**` token in the authored list additionally authorizes
/// one scan of the auto-description; the `**` token itself never matches.
pub fn matchbind(tree: &Tree, id: WidgetId, key: Key, group: &str, auto_desc: &str) -> bool {
  let event = keyname(key);
  let kvname = format!("bind_{group}");

  let auto_desc = if tree.getkv_int(id, "autobind", 1) == 0 {
    ""
  } else {
    auto_desc
  };
  let desc = tree.getkv_str(id, &kvname, auto_desc);

  let mut retry_auto_desc = false;
  for token in desc.split_whitespace() {
    if token == "**" {
      retry_auto_desc = true;
      continue;
    }
    if token == event.as_str() {
      return true;
    }
  }

  if retry_auto_desc {
    for token in auto_desc.split_whitespace() {
      if token != "**" && token == event.as_str() {
        return true;
      }
    }
  }

  false
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ui::key::FuncKey;
  use crate::ui::tree::Tree;

  fn hbox() -> (Tree, crate::ui::tree::WidgetId) {
    let mut tree = Tree::new();
    let id = tree.new_widget("hbox").unwrap();
    tree.set_root(id);
    (tree, id)
  }

  const LEFT: Key = Key::Func(FuncKey::Left);

  #[test]
  fn autobind_fallback() {
    let (tree, id) = hbox();
    assert!(matchbind(&tree, id, LEFT, "left", "LEFT"));
    assert!(!matchbind(&tree, id, Key::Func(FuncKey::Right), "left", "LEFT"));
  }

  #[test]
  fn autobind_disabled() {
    let (mut tree, id) = hbox();
    tree.setkv(id, "autobind", "0");
    assert!(!matchbind(&tree, id, LEFT, "left", "LEFT"));
  }

  #[test]
  fn authored_binding_replaces_auto() {
    let (mut tree, id) = hbox();
    tree.setkv(id, "bind_left", "X h");
    assert!(matchbind(&tree, id, Key::Char('X'), "left", "LEFT"));
    assert!(matchbind(&tree, id, Key::Char('h'), "left", "LEFT"));
    assert!(!matchbind(&tree, id, LEFT, "left", "LEFT"));
  }

  #[test]
  fn binding_cascades_from_ancestors() {
    let (mut tree, root) = hbox();
    let inner = tree.new_widget("hbox").unwrap();
    tree.append_child(root, inner);
    tree.setkv(root, "@bind_left", "h");
    assert!(matchbind(&tree, inner, Key::Char('h'), "left", "LEFT"));
  }

  #[test]
  fn star_star_retries_auto_description() {
    let (mut tree, id) = hbox();
    tree.setkv(id, "bind_left", "X **");
    assert!(matchbind(&tree, id, Key::Char('X'), "left", "LEFT"));
    assert!(matchbind(&tree, id, LEFT, "left", "LEFT"));
    assert!(!matchbind(&tree, id, Key::Char('Y'), "left", "LEFT"));
  }

  #[test]
  fn star_star_itself_never_matches() {
    let (mut tree, id) = hbox();
    tree.setkv(id, "bind_left", "**");
    assert!(!matchbind(&tree, id, Key::Char('*'), "left", ""));
    assert!(!matchbind(&tree, id, LEFT, "left", ""));
  }

  #[test]
  fn partial_tokens_do_not_match() {
    let (mut tree, id) = hbox();
    tree.setkv(id, "bind_left", "LEFTMOST");
    assert!(!matchbind(&tree, id, LEFT, "left", ""));
  }
}
