//! Cell styles and their descriptor strings.
//!
//! Styles are authored as comma-separated descriptor strings like
//! `fg=red,bg=blue,attr=bold`. Unrecognized parts are ignored; an empty
//! descriptor is the terminal default style.

use crossterm::style::{Attribute, Attributes, Color};

#[derive(Debug, Clone, PartialEq, Eq)]
/// One resolved cell style.
pub struct Style {
  pub fg: Color,
  pub bg: Color,
  pub attrs: Attributes,
}

impl Default for Style {
  fn default() -> Self {
    Style {
      fg: Color::Reset,
      bg: Color::Reset,
      attrs: Attributes::default(),
    }
  }
}

impl Style {
  /// Parse a style descriptor string.
  pub fn parse(descr: &str) -> Style {
    let mut style = Style::default();
    for part in descr.split(',') {
      let Some((key, value)) = part.split_once('=') else {
        continue;
      };
      match key.trim() {
        "fg" => {
          if let Some(color) = color_by_name(value.trim()) {
            style.fg = color;
          }
        }
        "bg" => {
          if let Some(color) = color_by_name(value.trim()) {
            style.bg = color;
          }
        }
        "attr" => {
          if let Some(attr) = attr_by_name(value.trim()) {
            style.attrs.set(attr);
          }
        }
        _ => {}
      }
    }
    style
  }
}

/// Terminal color by its classic name, `default`, or `color<n>`.
fn color_by_name(name: &str) -> Option<Color> {
  match name {
    "black" => Some(Color::Black),
    "red" => Some(Color::DarkRed),
    "green" => Some(Color::DarkGreen),
    "yellow" => Some(Color::DarkYellow),
    "blue" => Some(Color::DarkBlue),
    "magenta" => Some(Color::DarkMagenta),
    "cyan" => Some(Color::DarkCyan),
    "white" => Some(Color::Grey),
    "default" => Some(Color::Reset),
    _ => name
      .strip_prefix("color")
      .and_then(|n| n.parse::<u8>().ok())
      .map(Color::AnsiValue),
  }
}

/// Display attribute by its classic name.
fn attr_by_name(name: &str) -> Option<Attribute> {
  match name {
    "bold" => Some(Attribute::Bold),
    "dim" => Some(Attribute::Dim),
    "underline" => Some(Attribute::Underlined),
    "blink" => Some(Attribute::SlowBlink),
    "reverse" | "standout" => Some(Attribute::Reverse),
    "invis" => Some(Attribute::Hidden),
    _ => None,
  }
}
