//! Rich-text painting.
//!
//! Text may carry inline `<...>` markup switching the style mid-string:
//! `<>` prints a literal `<`, `</>` restores the caller's base style, and
//! `<name>` switches to the widget's `style_<name>_focus` or
//! `style_<name>_normal` attribute depending on focus. Painting clips to a
//! cell budget; the return value counts painted source code points, not
//! cells, so callers can measure source length.

use crate::ui::canvas::frame::Frame;
use crate::ui::canvas::style::Style;
use crate::ui::tree::{Tree, WidgetId};
use unicode_width::UnicodeWidthChar;

/// Paint `text` at `(y, x)` clipped to `width` cells.
///
/// Returns the number of source code points painted (markup excluded).
pub fn print_richtext(
  tree: &Tree,
  id: WidgetId,
  frame: &mut Frame,
  y: isize,
  x: isize,
  text: &str,
  width: isize,
  base_style: &Style,
  has_focus: bool,
) -> usize {
  let chars: Vec<char> = text.chars().collect();
  let end_col = x + width.max(0);

  let mut style = base_style.clone();
  let mut painted = 0usize;
  let mut cx = x;
  let mut i = 0usize;

  while i < chars.len() {
    if chars[i] == '<' {
      // An unterminated tag ends the paint.
      let Some(rel) = chars[i + 1..].iter().position(|&c| c == '>') else {
        break;
      };
      let name: String = chars[i + 1..i + 1 + rel].iter().collect();
      if name.is_empty() {
        if cx < end_col {
          frame.set_char(cx, y, '<', &style);
          cx += 1;
          painted += 1;
        }
      } else if name == "/" {
        style = base_style.clone();
      } else {
        let lookup = if has_focus {
          format!("style_{name}_focus")
        } else {
          format!("style_{name}_normal")
        };
        let descr = tree.getkv_str(id, &lookup, "").to_string();
        style = Style::parse(&descr);
      }
      i += rel + 2;
      continue;
    }

    // Plain segment up to the next tag; what exceeds the budget is dropped
    // while the tail of the string is still scanned for tags.
    let seg_end = chars[i..]
      .iter()
      .position(|&c| c == '<')
      .map(|p| i + p)
      .unwrap_or(chars.len());
    while i < seg_end {
      let ch = chars[i];
      let Some(ch_width) = ch.width() else {
        break;
      };
      if cx + ch_width as isize > end_col {
        break;
      }
      frame.set_char(cx, y, ch, &style);
      cx += ch_width as isize;
      painted += 1;
      i += 1;
    }
    i = seg_end;
  }

  painted
}

/// Cell width of `text` with the markup stripped: `<>` counts one cell,
/// tags count nothing.
pub fn text_width(text: &str) -> usize {
  let chars: Vec<char> = text.chars().collect();
  let mut width = 0usize;
  let mut i = 0usize;
  while i < chars.len() {
    if chars[i] == '<' {
      let Some(rel) = chars[i + 1..].iter().position(|&c| c == '>') else {
        break;
      };
      if rel == 0 {
        width += 1;
      }
      i += rel + 2;
      continue;
    }
    width += chars[i].width().unwrap_or(0);
    i += 1;
  }
  width
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::prelude::*;
  use crate::ui::tree::Tree;
  use crossterm::style::Color;

  fn setup(width: u16) -> (Tree, crate::ui::tree::WidgetId, Frame) {
    let mut tree = Tree::new();
    let label = tree.new_widget("label").unwrap();
    let frame = Frame::new(U16Size::new(width, 1));
    (tree, label, frame)
  }

  #[test]
  fn style_switching() {
    let (mut tree, label, mut frame) = setup(8);
    tree.setkv(label, "style_hi_normal", "fg=red");

    let base = Style::default();
    let n = print_richtext(&tree, label, &mut frame, 0, 0, "a<hi>b</>c", 8, &base, false);
    assert_eq!(n, 3);
    assert_eq!(frame.row_text(0), "abc     ");
    assert_eq!(frame.get_cell(0, 0).fg(), Color::Reset);
    assert_eq!(frame.get_cell(1, 0).fg(), Color::DarkRed);
    assert_eq!(frame.get_cell(2, 0).fg(), Color::Reset);
  }

  #[test]
  fn focused_style_variant() {
    let (mut tree, label, mut frame) = setup(4);
    tree.setkv(label, "style_hi_normal", "fg=red");
    tree.setkv(label, "style_hi_focus", "fg=blue");

    let base = Style::default();
    print_richtext(&tree, label, &mut frame, 0, 0, "<hi>x", 4, &base, true);
    assert_eq!(frame.get_cell(0, 0).fg(), Color::DarkBlue);
  }

  #[test]
  fn unknown_style_name() {
    let (tree, label, mut frame) = setup(4);
    let base = Style::parse("fg=green");
    print_richtext(&tree, label, &mut frame, 0, 0, "<nosuch>x", 4, &base, false);
    // Unknown names resolve to the empty descriptor, the default style.
    assert_eq!(frame.get_cell(0, 0).fg(), Color::Reset);
  }

  #[test]
  fn empty_tag_paints_literal_lt() {
    let (tree, label, mut frame) = setup(4);
    let n = print_richtext(&tree, label, &mut frame, 0, 0, "<>", 4, &Style::default(), false);
    assert_eq!(n, 1);
    assert_eq!(frame.row_text(0), "<   ");
  }

  #[test]
  fn width_clipping() {
    let (tree, label, mut frame) = setup(8);
    let n = print_richtext(
      &tree,
      label,
      &mut frame,
      0,
      2,
      "abcdef",
      3,
      &Style::default(),
      false,
    );
    assert_eq!(n, 3);
    assert_eq!(frame.row_text(0), "  abc   ");
  }

  #[test]
  fn wide_char_stops_at_budget() {
    let (tree, label, mut frame) = setup(8);
    // The second wide character does not fit into the 3-cell budget.
    let n = print_richtext(&tree, label, &mut frame, 0, 0, "你好", 3, &Style::default(), false);
    assert_eq!(n, 1);
    assert_eq!(frame.row_text(0), "你      ");
  }

  #[test]
  fn unterminated_tag_stops() {
    let (tree, label, mut frame) = setup(8);
    let n = print_richtext(&tree, label, &mut frame, 0, 0, "a<hi", 8, &Style::default(), false);
    assert_eq!(n, 1);
    assert_eq!(frame.row_text(0), "a       ");
  }

  #[test]
  fn stripped_width() {
    assert_eq!(text_width("abc"), 3);
    assert_eq!(text_width("a<hi>b</>c"), 3);
    assert_eq!(text_width("<>"), 1);
    assert_eq!(text_width("你"), 2);
    assert_eq!(text_width(""), 0);
  }
}
