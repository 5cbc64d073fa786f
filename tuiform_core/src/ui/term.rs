//! Terminal device handling.
//!
//! The terminal is a process-global resource, initialized at most once and
//! shared by every form: raw mode plus the alternate screen. Setup and
//! teardown are serialized by a process-global mutex so concurrent forms
//! cannot race the device.

use crate::prelude::*;
use crate::ui::canvas::{Shader, ShaderCommand};
use crate::ui::key::{FuncKey, Key};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{execute, queue};
use parking_lot::Mutex;
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::trace;

static TERM_ACTIVE: AtomicBool = AtomicBool::new(false);
static TERM_MUTEX: Mutex<()> = parking_lot::const_mutex(());

/// Whether the terminal has been initialized and not yet torn down.
pub fn terminal_active() -> bool {
  TERM_ACTIVE.load(Ordering::Acquire)
}

/// Initialize the terminal once: raw mode, alternate screen, cleared.
pub fn init_terminal() -> IoResult<()> {
  let _guard = TERM_MUTEX.lock();
  if TERM_ACTIVE.load(Ordering::Acquire) {
    return Ok(());
  }

  if !crossterm::terminal::is_raw_mode_enabled()? {
    crossterm::terminal::enable_raw_mode()?;
  }
  let mut out = std::io::stdout();
  execute!(
    out,
    crossterm::terminal::EnterAlternateScreen,
    crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
  )?;

  TERM_ACTIVE.store(true, Ordering::Release);
  trace!("terminal initialized");
  Ok(())
}

/// Tear the terminal down again, if it is up.
pub fn shutdown_terminal() -> IoResult<()> {
  let _guard = TERM_MUTEX.lock();
  if !TERM_ACTIVE.load(Ordering::Acquire) {
    return Ok(());
  }

  let mut out = std::io::stdout();
  execute!(out, crossterm::terminal::LeaveAlternateScreen)?;
  if crossterm::terminal::is_raw_mode_enabled()? {
    crossterm::terminal::disable_raw_mode()?;
  }

  TERM_ACTIVE.store(false, Ordering::Release);
  trace!("terminal shut down");
  Ok(())
}

/// Query the terminal size.
pub fn screen_size() -> IoResult<U16Size> {
  let (width, height) = crossterm::terminal::size()?;
  Ok(U16Size::new(width, height))
}

/// Read one keystroke.
///
/// `timeout` is in milliseconds; `0` blocks indefinitely. Returns `None` on
/// timeout. Terminal resizes are delivered as the `RESIZE` function key.
pub fn read_key(timeout: i32) -> IoResult<Option<Key>> {
  debug_assert!(timeout >= 0);
  let deadline = (timeout > 0).then(|| Instant::now() + Duration::from_millis(timeout as u64));

  loop {
    if let Some(deadline) = deadline {
      let now = Instant::now();
      if now >= deadline || !crossterm::event::poll(deadline - now)? {
        return Ok(None);
      }
    }
    match crossterm::event::read()? {
      Event::Key(ev) if ev.kind != KeyEventKind::Release => {
        if let Some(key) = key_from_event(ev) {
          return Ok(Some(key));
        }
      }
      Event::Resize(_, _) => return Ok(Some(Key::Func(FuncKey::Resize))),
      _ => {}
    }
  }
}

/// Translate a terminal key event into a [`Key`].
///
/// Ctrl-letter chords fold to the classic control codes so they name as
/// `^A`..`^Z` like any terminal would deliver them.
fn key_from_event(ev: KeyEvent) -> Option<Key> {
  match ev.code {
    KeyCode::Char(c) => {
      if ev.modifiers.contains(KeyModifiers::CONTROL) {
        let upper = c.to_ascii_uppercase() as u32;
        if (0x40..=0x5f).contains(&upper) {
          return Some(Key::Char(char::from_u32(upper & 0x1f)?));
        }
      }
      Some(Key::Char(c))
    }
    KeyCode::Enter => Some(Key::Char('\r')),
    KeyCode::Tab => Some(Key::Char('\t')),
    KeyCode::BackTab => Some(Key::Func(FuncKey::BackTab)),
    KeyCode::Backspace => Some(Key::Char('\u{7f}')),
    KeyCode::Esc => Some(Key::Char('\u{1b}')),
    KeyCode::Up => Some(Key::Func(FuncKey::Up)),
    KeyCode::Down => Some(Key::Func(FuncKey::Down)),
    KeyCode::Left => Some(Key::Func(FuncKey::Left)),
    KeyCode::Right => Some(Key::Func(FuncKey::Right)),
    KeyCode::Home => Some(Key::Func(FuncKey::Home)),
    KeyCode::End => Some(Key::Func(FuncKey::End)),
    KeyCode::PageUp => Some(Key::Func(FuncKey::PageUp)),
    KeyCode::PageDown => Some(Key::Func(FuncKey::PageDown)),
    KeyCode::Insert => Some(Key::Func(FuncKey::Insert)),
    KeyCode::Delete => Some(Key::Func(FuncKey::Delete)),
    KeyCode::F(n) => Some(Key::Func(FuncKey::F(n))),
    _ => Some(Key::Func(FuncKey::Unknown)),
  }
}

/// Execute a shader against the terminal device.
pub fn flush(shader: Shader) -> IoResult<()> {
  let mut out = std::io::stdout();
  for command in shader {
    match command {
      ShaderCommand::CursorMoveTo(c) => queue!(out, c)?,
      ShaderCommand::CursorShow(c) => queue!(out, c)?,
      ShaderCommand::CursorHide(c) => queue!(out, c)?,
      ShaderCommand::StyleResetAttributes(c) => queue!(out, c)?,
      ShaderCommand::StyleSetForegroundColor(c) => queue!(out, c)?,
      ShaderCommand::StyleSetBackgroundColor(c) => queue!(out, c)?,
      ShaderCommand::StyleSetAttributes(c) => queue!(out, c)?,
      ShaderCommand::StylePrintString(c) => queue!(out, c)?,
      ShaderCommand::TerminalClearAll(c) => queue!(out, c)?,
    }
  }
  out.flush()
}
