//! One character cell of a frame.

use crate::ui::canvas::style::Style;
use compact_str::CompactString;
use compact_str::ToCompactString;
use crossterm::style::{Attributes, Color};

#[derive(Debug, Clone, Eq, PartialEq)]
/// One cell: a (possibly wide or clustered) symbol plus its style.
///
/// The cell to the right of a double-width symbol holds an empty symbol and
/// prints nothing itself.
pub struct Cell {
  symbol: CompactString,
  fg: Color,
  bg: Color,
  attrs: Attributes,
}

impl Default for Cell {
  fn default() -> Self {
    Cell {
      symbol: " ".to_compact_string(),
      fg: Color::Reset,
      bg: Color::Reset,
      attrs: Attributes::default(),
    }
  }
}

impl Cell {
  pub fn symbol(&self) -> &str {
    self.symbol.as_str()
  }

  pub fn set_symbol(&mut self, symbol: &str) -> &mut Self {
    self.symbol = CompactString::new(symbol);
    self
  }

  pub fn set_char(&mut self, ch: char) -> &mut Self {
    let mut buf = [0; 4];
    self.symbol = CompactString::new(ch.encode_utf8(&mut buf));
    self
  }

  /// Append a zero-width character to the symbol cluster.
  pub fn push_char(&mut self, ch: char) -> &mut Self {
    self.symbol.push(ch);
    self
  }

  /// Whether this cell is covered by a wide symbol to its left.
  pub fn is_continuation(&self) -> bool {
    self.symbol.is_empty()
  }

  pub fn fg(&self) -> Color {
    self.fg
  }

  pub fn bg(&self) -> Color {
    self.bg
  }

  pub fn attrs(&self) -> Attributes {
    self.attrs
  }

  pub fn style(&self) -> Style {
    Style {
      fg: self.fg,
      bg: self.bg,
      attrs: self.attrs,
    }
  }

  pub fn set_style(&mut self, style: &Style) -> &mut Self {
    self.fg = style.fg;
    self.bg = style.bg;
    self.attrs = style.attrs;
    self
  }
}
