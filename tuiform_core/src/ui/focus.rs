//! The focus state machine.
//!
//! Focus transitions always run the old widget's `leave` hook, the new
//! widget's `enter` hook, and update the form's current focus id. Global
//! TAB/BTAB traversal walks the tree in pre-order with wrap-around.

use crate::ui::form::FormState;
use crate::ui::tree::{INVALID_WIDGET_ID, Tree, WidgetId};
use crate::ui::widget;

/// Whether `id` can receive focus: type-permitted, author-permitted and
/// displayed.
pub fn is_focusable(tree: &Tree, id: WidgetId) -> bool {
  let Some(node) = tree.node(id) else {
    return false;
  };
  node.allow_focus()
    && tree.getkv_int(id, "can_focus", 1) != 0
    && tree.getkv_int(id, ".display", 1) != 0
}

/// First focusable widget in the subtree of `id`, pre-order. Only
/// displayable children are descended into.
pub fn find_first_focusable(tree: &Tree, id: WidgetId) -> Option<WidgetId> {
  if is_focusable(tree, id) {
    return Some(id);
  }
  for child_id in tree.children_ids(id) {
    if tree.getkv_int(*child_id, ".display", 1) != 0 {
      if let Some(found) = find_first_focusable(tree, *child_id) {
        return Some(found);
      }
    }
  }
  None
}

/// Run the leave/enter hooks and latch the new focus id.
fn transition(form: &mut FormState, old_fw: Option<WidgetId>, new_fw: WidgetId) {
  if let Some(old) = old_fw {
    widget::leave(form, old);
  }
  widget::enter(form, new_fw);
  form.current_focus_id = new_fw;
}

/// Move focus to the nearest focusable widget in a sibling subtree left of
/// the one containing `old_fw`, within parent `w`.
pub fn focus_prev(form: &mut FormState, w: WidgetId, old_fw: WidgetId) -> bool {
  let Some(stop) = form.tree.find_child_tree(w, old_fw) else {
    return false;
  };
  let children = form.tree.children_ids(w).to_vec();
  let Some(stop_idx) = children.iter().position(|c| *c == stop) else {
    return false;
  };
  for idx in (0..stop_idx).rev() {
    if let Some(new_fw) = find_first_focusable(&form.tree, children[idx]) {
      transition(form, Some(old_fw), new_fw);
      return true;
    }
  }
  false
}

/// Move focus to the nearest focusable widget in a sibling subtree right of
/// the one containing `old_fw`, within parent `w`.
pub fn focus_next(form: &mut FormState, w: WidgetId, old_fw: WidgetId) -> bool {
  let Some(stop) = form.tree.find_child_tree(w, old_fw) else {
    return false;
  };
  let children = form.tree.children_ids(w).to_vec();
  let Some(stop_idx) = children.iter().position(|c| *c == stop) else {
    return false;
  };
  for child_id in children.iter().skip(stop_idx + 1) {
    if let Some(new_fw) = find_first_focusable(&form.tree, *child_id) {
      transition(form, Some(old_fw), new_fw);
      return true;
    }
  }
  false
}

/// Explicitly move focus to `new_fw`, if its type permits focus.
pub fn switch_focus(form: &mut FormState, old_fw: Option<WidgetId>, new_fw: WidgetId) -> bool {
  match form.tree.node(new_fw) {
    Some(node) if node.allow_focus() => {}
    _ => return false,
  }
  let old_fw = old_fw.or_else(|| {
    let cur = form.current_focus_id;
    (cur != INVALID_WIDGET_ID && form.tree.contains(cur)).then_some(cur)
  });
  transition(form, old_fw, new_fw);
  true
}

/// Consume pending one-shot `setfocus` flags, pre-order. The latest flagged
/// widget in document order wins. Idempotent once the flags are cleared.
pub fn check_setfocus(form: &mut FormState) {
  let Some(root) = form.tree.root_id() else {
    return;
  };
  let mut stack = vec![root];
  while let Some(id) = stack.pop() {
    if let Some(node) = form.tree.node_mut(id) {
      if node.setfocus() {
        node.set_setfocus(false);
        form.current_focus_id = id;
      }
    }
    stack.extend(form.tree.children_ids(id).iter().rev().copied());
  }
}

/// Pre-order successor: first child, else next sibling, else up-and-right.
pub fn pre_order_next(tree: &Tree, id: WidgetId) -> Option<WidgetId> {
  if let Some(first) = tree.children_ids(id).first() {
    return Some(*first);
  }
  let mut cur = id;
  loop {
    let parent_id = tree.parent_id(cur)?;
    let siblings = tree.children_ids(parent_id);
    let idx = siblings.iter().position(|c| *c == cur)?;
    if idx + 1 < siblings.len() {
      return Some(siblings[idx + 1]);
    }
    cur = parent_id;
  }
}

/// Global forward TAB traversal: walk pre-order from the focused widget to
/// the next focusable one, wrapping around to the root once.
///
/// Returns whether there was a focused widget to start from.
pub fn tab_forward(form: &mut FormState) -> bool {
  let old_fw = form.current_focus_id;
  if old_fw == INVALID_WIDGET_ID || !form.tree.is_attached(old_fw) {
    return false;
  }

  let mut fw = Some(old_fw);
  let mut wrapped = false;
  loop {
    fw = fw.and_then(|cur| pre_order_next(&form.tree, cur));
    if fw.is_none() {
      if wrapped {
        break;
      }
      wrapped = true;
      fw = form.tree.root_id();
    }
    let Some(cur) = fw else {
      break;
    };
    if is_focusable(&form.tree, cur) {
      break;
    }
    if cur == old_fw {
      // Came full circle without finding a candidate.
      break;
    }
  }

  if let Some(new_fw) = fw {
    if new_fw != old_fw {
      transition(form, Some(old_fw), new_fw);
    }
    form.current_focus_id = new_fw;
  }
  true
}

/// Global backward BTAB traversal: the latest focusable widget seen in a
/// pre-order scan before the focused one; restarts with the root's last
/// child as the stop to effect wrap-around.
pub fn tab_backward(form: &mut FormState) {
  let Some(root) = form.tree.root_id() else {
    return;
  };
  let cur = form.current_focus_id;
  let old_fw = (cur != INVALID_WIDGET_ID && form.tree.is_attached(cur)).then_some(cur);

  let mut fw: Option<WidgetId> = None;
  let mut tmp = Some(root);
  let mut stop = old_fw;
  for pass in 0..2 {
    while let Some(t) = tmp {
      if stop == Some(t) {
        break;
      }
      if is_focusable(&form.tree, t) {
        fw = Some(t);
      }
      tmp = pre_order_next(&form.tree, t);
    }
    if pass == 0 && fw.is_none() && old_fw.is_some() {
      // Wrap around: keep scanning up to the root's last child.
      stop = form.tree.children_ids(root).last().copied();
      continue;
    }
    break;
  }

  if let Some(new_fw) = fw {
    if old_fw != Some(new_fw) {
      transition(form, old_fw, new_fw);
    }
    form.current_focus_id = new_fw;
  }
}
