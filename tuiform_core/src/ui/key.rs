//! Keystrokes and their symbolic names.
//!
//! A keystroke is either a plain character (including control codes below 32)
//! or a function key. Every keystroke resolves to a symbolic name, which is
//! what bindings and `on_<EVENT>` handlers are written against.

use compact_str::CompactString;
use compact_str::ToCompactString;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// One decoded keystroke.
pub enum Key {
  /// A plain (possibly control) character.
  Char(char),
  /// A function or navigation key.
  Func(FuncKey),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
/// Function keys, named after their classic terminal key codes.
pub enum FuncKey {
  Up,
  Down,
  Left,
  Right,
  Home,
  End,
  PageUp,
  PageDown,
  Insert,
  Delete,
  BackTab,
  /// Terminal resize, delivered through the input stream like a key.
  Resize,
  /// `F0`..=`F63`.
  F(u8),
  Unknown,
}

/// Highest numbered `F<n>` key that still gets a symbolic name.
pub const MAX_FKEY: u8 = 63;

/// Caret notation for a control character, e.g. `^A` for 0x01.
fn control_keyname(ch: char) -> CompactString {
  let code = (ch as u32) + 64;
  match char::from_u32(code) {
    Some(c) => format!("^{c}").to_compact_string(),
    None => "UNKNOWN".to_compact_string(),
  }
}

/// Translate one keystroke into its owned symbolic name.
///
/// Plain carriage return or newline is `ENTER`, space is `SPACE`, tab is
/// `TAB`, escape is `ESC`, delete is `BACKSPACE`. Other control characters
/// get caret names, other printables name themselves. Function keys `F0`
/// through `F63` are `F<n>`, the remaining function keys carry their
/// terminal names, and anything unrecognized is `UNKNOWN`.
pub fn keyname(key: Key) -> CompactString {
  match key {
    Key::Char(ch) => match ch {
      '\r' | '\n' => "ENTER".to_compact_string(),
      ' ' => "SPACE".to_compact_string(),
      '\t' => "TAB".to_compact_string(),
      '\u{1b}' => "ESC".to_compact_string(),
      '\u{7f}' => "BACKSPACE".to_compact_string(),
      c if (c as u32) < 32 => control_keyname(c),
      c => c.to_compact_string(),
    },
    Key::Func(fk) => match fk {
      FuncKey::Up => "UP".to_compact_string(),
      FuncKey::Down => "DOWN".to_compact_string(),
      FuncKey::Left => "LEFT".to_compact_string(),
      FuncKey::Right => "RIGHT".to_compact_string(),
      FuncKey::Home => "HOME".to_compact_string(),
      FuncKey::End => "END".to_compact_string(),
      FuncKey::PageUp => "PPAGE".to_compact_string(),
      FuncKey::PageDown => "NPAGE".to_compact_string(),
      FuncKey::Insert => "IC".to_compact_string(),
      FuncKey::Delete => "DC".to_compact_string(),
      FuncKey::BackTab => "BTAB".to_compact_string(),
      FuncKey::Resize => "RESIZE".to_compact_string(),
      FuncKey::F(n) if n <= MAX_FKEY => format!("F{n}").to_compact_string(),
      FuncKey::F(_) => "UNKNOWN".to_compact_string(),
      FuncKey::Unknown => "UNKNOWN".to_compact_string(),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn named_chars() {
    assert_eq!(keyname(Key::Char('\r')), "ENTER");
    assert_eq!(keyname(Key::Char('\n')), "ENTER");
    assert_eq!(keyname(Key::Char(' ')), "SPACE");
    assert_eq!(keyname(Key::Char('\t')), "TAB");
    assert_eq!(keyname(Key::Char('\u{1b}')), "ESC");
    assert_eq!(keyname(Key::Char('\u{7f}')), "BACKSPACE");
  }

  #[test]
  fn printable_chars() {
    assert_eq!(keyname(Key::Char('A')), "A");
    assert_eq!(keyname(Key::Char('ä')), "ä");
    assert_eq!(keyname(Key::Char('0')), "0");
  }

  #[test]
  fn control_chars() {
    assert_eq!(keyname(Key::Char('\u{01}')), "^A");
    assert_eq!(keyname(Key::Char('\u{18}')), "^X");
    assert_eq!(keyname(Key::Char('\u{00}')), "^@");
  }

  #[test]
  fn function_keys() {
    assert_eq!(keyname(Key::Func(FuncKey::F(3))), "F3");
    assert_eq!(keyname(Key::Func(FuncKey::F(0))), "F0");
    assert_eq!(keyname(Key::Func(FuncKey::F(63))), "F63");
    assert_eq!(keyname(Key::Func(FuncKey::F(64))), "UNKNOWN");
    assert_eq!(keyname(Key::Func(FuncKey::Left)), "LEFT");
    assert_eq!(keyname(Key::Func(FuncKey::PageDown)), "NPAGE");
    assert_eq!(keyname(Key::Func(FuncKey::BackTab)), "BTAB");
    assert_eq!(keyname(Key::Func(FuncKey::Unknown)), "UNKNOWN");
  }
}
