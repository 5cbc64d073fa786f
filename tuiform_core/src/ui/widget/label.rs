//! Widget type `label`: one line of styled text.

use crate::prelude::*;
use crate::ui::canvas::frame::Frame;
use crate::ui::richtext;
use crate::ui::tree::{Tree, WidgetId};
use crate::ui::widget;

pub fn prepare(tree: &mut Tree, id: WidgetId) {
  let text = tree.getkv_str(id, "text", "").to_string();
  let min_w = richtext::text_width(&text) as isize;
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

  let text = tree.getkv_str(id, "text", "").to_string();
  richtext::print_richtext(
    tree,
    id,
    frame,
    rect.min().y,
    rect.min().x,
    &text,
    rect.width(),
    &style,
    focus_id == id,
  );
}
