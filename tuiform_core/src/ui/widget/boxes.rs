//! Widget types `vbox` and `hbox`: the generic containers.
//!
//! A box stacks its visible children along one axis. Layout is two passes:
//! prepare aggregates the children's minimum sizes, draw assigns each child
//! a rectangle inside the box's own rectangle and recurses.

use crate::prelude::*;
use crate::ui::bind::matchbind;
use crate::ui::canvas::frame::Frame;
use crate::ui::focus;
use crate::ui::form::FormState;
use crate::ui::key::Key;
use crate::ui::tree::{Tree, WidgetId};
use crate::ui::widget::{self, WidgetState};
use crate::irect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Main axis of a box container.
pub enum BoxAxis {
  Horizontal,
  Vertical,
}

impl BoxAxis {
  /// The `.expand` flag letter selecting this axis.
  fn expand_flag(self) -> char {
    match self {
      BoxAxis::Horizontal => 'h',
      BoxAxis::Vertical => 'v',
    }
  }

  /// The author-declared size attribute along this axis.
  fn size_key(self) -> &'static str {
    match self {
      BoxAxis::Horizontal => ".width",
      BoxAxis::Vertical => ".height",
    }
  }
}

#[derive(Debug, Clone)]
/// Internal state of a box widget.
pub struct BoxState {
  pub axis: BoxAxis,
}

pub fn init(tree: &mut Tree, id: WidgetId, axis: BoxAxis) {
  if let Some(node) = tree.node_mut(id) {
    node.set_state(WidgetState::Box(BoxState { axis }));
  }
}

fn axis_of(tree: &Tree, id: WidgetId) -> BoxAxis {
  match tree.node(id).map(|n| n.state()) {
    Some(WidgetState::Box(b)) => b.axis,
    _ => BoxAxis::Vertical,
  }
}

/// Whether `id` absorbs extra space along `axis`.
fn expands(tree: &Tree, id: WidgetId, axis: BoxAxis) -> bool {
  tree
    .getkv_str(id, ".expand", "vh")
    .contains(axis.expand_flag())
}

/// The child's effective size along both axes: the author-declared
/// `.width`/`.height`, floored by the prepared minimum.
fn child_size(tree: &Tree, id: WidgetId) -> ISize {
  let min = tree.node(id).map(|n| n.min_size()).unwrap_or_default();
  let w = tree.getkv_int(id, ".width", 0).max(min.width());
  let h = tree.getkv_int(id, ".height", 0).max(min.height());
  ISize::new(w, h)
}

/// Tie/centering adjustment of one axis: `(origin, extent)` of the outer
/// rectangle shrunk or shifted around `min` according to the `lo`/`hi` flags
/// (`l`/`r` horizontally, `t`/`b` vertically).
fn tie_axis(tie: &str, lo: char, hi: char, origin: isize, extent: isize, min: isize) -> (isize, isize) {
  let has_lo = tie.contains(lo);
  let has_hi = tie.contains(hi);
  let mut origin = origin;
  let mut extent = extent;
  if !has_lo && !has_hi {
    origin += (extent - min) / 2;
  }
  if !has_lo && has_hi {
    origin += extent - min;
  }
  if !has_lo || !has_hi {
    extent = min;
  }
  (origin, extent)
}

pub fn prepare(tree: &mut Tree, id: WidgetId) {
  let axis = axis_of(tree, id);
  let children = tree.children_ids(id).to_vec();

  let mut min_w = 0isize;
  let mut min_h = 0isize;
  for c in children {
    if tree.getkv_int(c, ".display", 1) == 0 {
      continue;
    }
    widget::prepare(tree, c);
    let m = tree.node(c).map(|n| n.min_size()).unwrap_or_default();
    match axis {
      BoxAxis::Horizontal => {
        min_h = min_h.max(m.height());
        min_w += m.width();
      }
      BoxAxis::Vertical => {
        min_w = min_w.max(m.width());
        min_h += m.height();
      }
    }
  }
  if let Some(node) = tree.node_mut(id) {
    node.set_min_size(ISize::new(min_w, min_h));
  }
}

pub fn draw(tree: &mut Tree, focus_id: WidgetId, frame: &mut Frame, id: WidgetId) {
  let axis = axis_of(tree, id);
  let children = tree.children_ids(id).to_vec();

  // Occupied minimum and expandable count over the visible children.
  let mut num_dyn = 0isize;
  let mut min_w = 0isize;
  let mut min_h = 0isize;
  for c in &children {
    if tree.getkv_int(*c, ".display", 1) == 0 {
      continue;
    }
    let size = child_size(tree, *c);
    if expands(tree, *c, axis) {
      num_dyn += 1;
    }
    match axis {
      BoxAxis::Horizontal => {
        min_w += size.width();
        min_h = min_h.max(size.height());
      }
      BoxAxis::Vertical => {
        min_h += size.height();
        min_w = min_w.max(size.width());
      }
    }
  }

  let rect = match tree.node(id) {
    Some(node) => *node.rect(),
    None => return,
  };

  let style = widget::widget_style(tree, focus_id, id);
  frame.fill_rect(&rect, ' ', &style);

  let tie = tree.getkv_str(id, "tie", "lrtb").to_string();
  let (box_x, box_w) = tie_axis(&tie, 'l', 'r', rect.min().x, rect.width(), min_w);
  let (box_y, box_h) = tie_axis(&tie, 't', 'b', rect.min().y, rect.height(), min_h);

  let mut sizes_extra = match axis {
    BoxAxis::Horizontal => box_w - min_w,
    BoxAxis::Vertical => box_h - min_h,
  };
  let mut cursor = match axis {
    BoxAxis::Horizontal => box_x,
    BoxAxis::Vertical => box_y,
  };

  for c in children {
    if tree.getkv_int(c, ".display", 1) == 0 {
      continue;
    }

    let declared = child_size(tree, c);
    let mut size = match axis {
      BoxAxis::Horizontal => declared.width(),
      BoxAxis::Vertical => declared.height(),
    };

    if expands(tree, c, axis) {
      // Stable tie-break in sibling order, any remainder accrues to the
      // earlier children.
      let extra = if sizes_extra >= 0 {
        (sizes_extra + num_dyn - 1) / num_dyn
      } else {
        sizes_extra / num_dyn
      };
      num_dyn -= 1;
      sizes_extra -= extra;
      size += extra;
    }

    let (mut cx, mut cy, mut cw, mut ch) = match axis {
      BoxAxis::Horizontal => (cursor, box_y, size, box_h),
      BoxAxis::Vertical => (box_x, cursor, box_w, size),
    };
    cursor += size;

    let min = tree.node(c).map(|n| n.min_size()).unwrap_or_default();
    let ctie = tree.getkv_str(c, ".tie", "lrtb").to_string();
    (cx, cw) = tie_axis(&ctie, 'l', 'r', cx, cw, min.width());
    (cy, ch) = tie_axis(&ctie, 't', 'b', cy, ch, min.height());

    if let Some(node) = tree.node_mut(c) {
      node.set_rect(irect!(cx, cy, cw, ch));
    }
    widget::draw(tree, focus_id, frame, c);
  }
}

pub fn process(form: &mut FormState, id: WidgetId, fw: WidgetId, key: Key) -> bool {
  match axis_of(&form.tree, id) {
    BoxAxis::Horizontal => {
      if matchbind(&form.tree, id, key, "left", "LEFT") {
        return focus::focus_prev(form, id, fw);
      }
      if matchbind(&form.tree, id, key, "right", "RIGHT") {
        return focus::focus_next(form, id, fw);
      }
      false
    }
    BoxAxis::Vertical => {
      if matchbind(&form.tree, id, key, "up", "UP") {
        return focus::focus_prev(form, id, fw);
      }
      if matchbind(&form.tree, id, key, "down", "DOWN") {
        return focus::focus_next(form, id, fw);
      }
      false
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::irect;
  use crate::ui::canvas::Frame;
  use crate::ui::tree::{INVALID_WIDGET_ID, Tree};

  /// An hbox of `width`x1 cells with one single-cell label per entry.
  fn hbox_with_labels(count: usize, width: isize) -> (Tree, WidgetId, Vec<WidgetId>) {
    let mut tree = Tree::new();
    let root = tree.new_widget("hbox").unwrap();
    tree.set_root(root);
    let mut children = vec![];
    for i in 0..count {
      let label = tree.new_widget("label").unwrap();
      tree.setkv(label, "text", ((b'a' + i as u8) as char).to_string());
      tree.append_child(root, label);
      children.push(label);
    }
    widget::prepare(&mut tree, root);
    tree.node_mut(root).unwrap().set_rect(irect!(0, 0, width, 1));
    (tree, root, children)
  }

  fn draw_into(tree: &mut Tree, root: WidgetId, width: u16) -> Frame {
    let mut frame = Frame::new(U16Size::new(width, 1));
    widget::draw(tree, INVALID_WIDGET_ID, &mut frame, root);
    frame
  }

  #[test]
  fn prepare_aggregates_minimums() {
    let (tree, root, _children) = hbox_with_labels(3, 7);
    assert_eq!(tree.node(root).unwrap().min_size(), ISize::new(3, 1));
  }

  #[test]
  fn tie_break_two_children() {
    let (mut tree, root, children) = hbox_with_labels(2, 5);
    let frame = draw_into(&mut tree, root, 5);
    let widths: Vec<isize> = children
      .iter()
      .map(|c| tree.node(*c).unwrap().rect().width())
      .collect();
    assert_eq!(widths, vec![3, 2]);
    assert_eq!(frame.row_text(0), "a  b ");
  }

  #[test]
  fn tie_break_three_children() {
    let (mut tree, root, children) = hbox_with_labels(3, 7);
    draw_into(&mut tree, root, 7);
    let widths: Vec<isize> = children
      .iter()
      .map(|c| tree.node(*c).unwrap().rect().width())
      .collect();
    assert_eq!(widths, vec![3, 2, 2]);
  }

  #[test]
  fn expandable_children_fill_the_box() {
    for (count, width) in [(1, 9), (2, 9), (3, 10), (4, 11)] {
      let (mut tree, root, children) = hbox_with_labels(count, width);
      draw_into(&mut tree, root, width as u16);
      let total: isize = children
        .iter()
        .map(|c| tree.node(*c).unwrap().rect().width())
        .sum();
      assert_eq!(total, width);
      // Stable in sibling order: earlier children never narrower.
      let widths: Vec<isize> = children
        .iter()
        .map(|c| tree.node(*c).unwrap().rect().width())
        .collect();
      assert!(widths.windows(2).all(|w| w[0] >= w[1]));
    }
  }

  #[test]
  fn author_size_floors_minimum() {
    let (mut tree, root, children) = hbox_with_labels(2, 8);
    tree.setkv(children[0], ".width", "5");
    tree.setkv(children[0], ".expand", "");
    tree.node_mut(root).unwrap().set_rect(irect!(0, 0, 8, 1));
    draw_into(&mut tree, root, 8);
    assert_eq!(tree.node(children[0]).unwrap().rect().width(), 5);
    assert_eq!(tree.node(children[1]).unwrap().rect().width(), 3);
  }

  #[test]
  fn hidden_child_gets_no_space() {
    let (mut tree, root, children) = hbox_with_labels(2, 6);
    tree.setkv(children[0], ".display", "0");
    widget::prepare(&mut tree, root);
    assert_eq!(tree.node(root).unwrap().min_size(), ISize::new(1, 1));
    let frame = draw_into(&mut tree, root, 6);
    assert_eq!(tree.node(children[1]).unwrap().rect().width(), 6);
    assert_eq!(frame.row_text(0), "b     ");
  }

  #[test]
  fn container_tie_centers_content() {
    let (mut tree, root, children) = hbox_with_labels(1, 5);
    tree.setkv(root, "tie", "");
    tree.setkv(children[0], ".expand", "");
    draw_into(&mut tree, root, 5);
    let rect = *tree.node(children[0]).unwrap().rect();
    assert_eq!(rect.min().x, 2);
    assert_eq!(rect.width(), 1);
  }

  #[test]
  fn container_tie_right_sticks_content() {
    let (mut tree, root, children) = hbox_with_labels(1, 5);
    tree.setkv(root, "tie", "r");
    tree.setkv(children[0], ".expand", "");
    draw_into(&mut tree, root, 5);
    assert_eq!(tree.node(children[0]).unwrap().rect().min().x, 4);
  }

  #[test]
  fn vbox_stacks_vertically() {
    let mut tree = Tree::new();
    let root = tree.new_widget("vbox").unwrap();
    tree.set_root(root);
    let a = tree.new_widget("label").unwrap();
    let b = tree.new_widget("label").unwrap();
    tree.setkv(a, "text", "aa");
    tree.setkv(b, "text", "b");
    tree.append_child(root, a);
    tree.append_child(root, b);
    widget::prepare(&mut tree, root);
    assert_eq!(tree.node(root).unwrap().min_size(), ISize::new(2, 2));

    tree.node_mut(root).unwrap().set_rect(irect!(0, 0, 2, 2));
    let mut frame = Frame::new(U16Size::new(2, 2));
    widget::draw(&mut tree, INVALID_WIDGET_ID, &mut frame, root);
    assert_eq!(frame.row_text(0), "aa");
    assert_eq!(frame.row_text(1), "b ");
  }
}
