//! Widget type `checkbox`: a focusable on/off toggle.
//!
//! The on/off state lives in the widget's `value` attribute so hosts can
//! read and write it like any other attribute.

use crate::prelude::*;
use crate::ui::bind::matchbind;
use crate::ui::canvas::frame::Frame;
use crate::ui::form::FormState;
use crate::ui::key::Key;
use crate::ui::richtext;
use crate::ui::tree::{Tree, WidgetId};
use crate::ui::widget;
use geo::point;

pub fn prepare(tree: &mut Tree, id: WidgetId) {
  let text = tree.getkv_str(id, "text", "").to_string();
  let mut min_w = 3isize;
  if !text.is_empty() {
    min_w += 1 + richtext::text_width(&text) as isize;
  }
  if let Some(node) = tree.node_mut(id) {
    node.set_min_size(ISize::new(min_w, 1));
  }
}

pub fn draw(tree: &mut Tree, focus_id: WidgetId, frame: &mut Frame, id: WidgetId) {
  let rect = match tree.node(id) {
    Some(node) => *node.rect(),
    None => return,
  };
  let style = widget::widget_style(tree, focus_id, id);
  frame.fill_rect(&rect, ' ', &style);

  let checked = tree.getkv_int(id, "value", 0) != 0;
  let marker = if checked { "[X]" } else { "[ ]" };
  let x = rect.min().x;
  let y = rect.min().y;
  frame.set_str(x, y, marker, &style);

  let text = tree.getkv_str(id, "text", "").to_string();
  if !text.is_empty() {
    richtext::print_richtext(
      tree,
      id,
      frame,
      y,
      x + 4,
      &text,
      rect.width() - 4,
      &style,
      focus_id == id,
    );
  }

  // Park the hardware cursor on the mark while focused.
  let hint_x = rect.min().x + 1;
  let hint = if focus_id == id && hint_x >= 0 && y >= 0 {
    Some(point!(x: hint_x as u16, y: y as u16))
  } else {
    None
  };
  if let Some(node) = tree.node_mut(id) {
    node.set_cursor(hint);
  }
}

pub fn process(form: &mut FormState, id: WidgetId, _fw: WidgetId, key: Key) -> bool {
  if matchbind(&form.tree, id, key, "toggle", "SPACE ENTER") {
    let checked = form.tree.getkv_int(id, "value", 0) != 0;
    form.tree.setkv_int(id, "value", if checked { 0 } else { 1 });
    return true;
  }
  false
}
