//! Canvas.
//!
//! It manages both the current frame and the last flushed frame as a
//! screenshot, and internally uses a diff-algorithm to compare the changes,
//! thus only flushing the changed parts to reduce IO operations.

use crate::prelude::*;

// Re-export
pub use crate::ui::canvas::frame::Frame;
pub use crate::ui::canvas::frame::cell::Cell;
pub use crate::ui::canvas::style::Style;

use compact_str::CompactString;
use crossterm::style::Attribute;

pub mod frame;
pub mod style;


#[derive(Debug, Clone)]
/// One terminal output command.
pub enum ShaderCommand {
  CursorMoveTo(crossterm::cursor::MoveTo),
  CursorShow(crossterm::cursor::Show),
  CursorHide(crossterm::cursor::Hide),
  StyleResetAttributes(crossterm::style::SetAttribute),
  StyleSetForegroundColor(crossterm::style::SetForegroundColor),
  StyleSetBackgroundColor(crossterm::style::SetBackgroundColor),
  StyleSetAttributes(crossterm::style::SetAttributes),
  StylePrintString(crossterm::style::Print<String>),
  TerminalClearAll(crossterm::terminal::Clear),
}

/// The command sequence produced by one shade pass.
pub type Shader = Vec<ShaderCommand>;

#[derive(Debug, Clone)]
/// Logical canvas.
///
/// NOTE: APIs named without `prev_` are for the current frame, with `prev_`
/// are for the previously flushed frame.
pub struct Canvas {
  frame: Frame,
  prev_frame: Frame,
}

impl Canvas {
  /// Make new canvas with terminal actual size.
  pub fn new(size: U16Size) -> Self {
    Canvas {
      frame: Frame::new(size),
      prev_frame: Frame::new(size),
    }
  }

  pub fn size(&self) -> U16Size {
    self.frame.size()
  }

  /// Resize the current frame, blanking it.
  pub fn set_size(&mut self, size: U16Size) {
    if size != self.frame.size() {
      self.frame.set_size(size);
    }
  }

  /// Get current frame.
  pub fn frame(&self) -> &Frame {
    &self.frame
  }

  /// Get mutable current frame.
  pub fn frame_mut(&mut self) -> &mut Frame {
    &mut self.frame
  }

  /// Get previous frame.
  pub fn prev_frame(&self) -> &Frame {
    &self.prev_frame
  }

  /// Drop the previous-frame screenshot so the next shade repaints
  /// everything.
  pub fn reset_prev(&mut self) {
    self.prev_frame = Frame::new(U16Size::new(0, 0));
  }

  /// Get the shader commands that should print to the terminal device, it
  /// internally uses a diff-algorithm to reduce the outputs.
  pub fn shade(&mut self) -> Shader {
    let mut shader = Shader::new();
    if self.frame.size() == self.prev_frame.size() {
      self._diff_rows(&mut shader);
    } else {
      // Size changed, diffing against the old frame is invalid.
      shader.push(ShaderCommand::TerminalClearAll(crossterm::terminal::Clear(
        crossterm::terminal::ClearType::All,
      )));
      self._repaint_all(&mut shader);
    }
    self._shade_done();
    shader
  }

  /// Shade done: save the current frame as screenshot.
  fn _shade_done(&mut self) {
    self.prev_frame = self.frame.clone();
  }

  /// Find the next column in `row` where current and previous frame agree
  /// again. Returns the frame width if they never do.
  fn _next_same_cell_in_row(&self, row: u16, col: u16) -> u16 {
    let width = self.frame.size().width();
    let mut col_end_at = col;
    while col_end_at < width {
      let cell = self.frame.get_cell(col_end_at as usize, row as usize);
      let prev_cell = self.prev_frame.get_cell(col_end_at as usize, row as usize);
      if cell == prev_cell {
        break;
      }
      col_end_at += 1;
    }
    col_end_at
  }

  /// Emit print commands for the changed run `[start_col, end_col)` of
  /// `row`, splitting it into style groups.
  fn _make_print_shaders(&self, shader: &mut Shader, row: u16, start_col: u16, end_col: u16) {
    debug_assert!(end_col > start_col);
    let mut col = start_col as usize;
    while col < end_col as usize {
      let style = self.frame.get_cell(col, row as usize).style();
      let mut text = CompactString::new("");
      let group_start = col;
      while col < end_col as usize {
        let cell = self.frame.get_cell(col, row as usize);
        if cell.style() != style {
          break;
        }
        // Continuation cells of wide symbols print nothing themselves.
        text.push_str(cell.symbol());
        col += 1;
      }
      shader.push(ShaderCommand::StyleResetAttributes(
        crossterm::style::SetAttribute(Attribute::Reset),
      ));
      shader.push(ShaderCommand::StyleSetForegroundColor(
        crossterm::style::SetForegroundColor(style.fg),
      ));
      shader.push(ShaderCommand::StyleSetBackgroundColor(
        crossterm::style::SetBackgroundColor(style.bg),
      ));
      shader.push(ShaderCommand::StyleSetAttributes(
        crossterm::style::SetAttributes(style.attrs),
      ));
      shader.push(ShaderCommand::CursorMoveTo(crossterm::cursor::MoveTo(
        group_start as u16,
        row,
      )));
      shader.push(ShaderCommand::StylePrintString(crossterm::style::Print(
        text.to_string(),
      )));
    }
  }

  /// Row-based diff against the previous frame.
  fn _diff_rows(&self, shader: &mut Shader) {
    let size = self.frame.size();
    for row in 0..size.height() {
      let mut col = 0u16;
      while col < size.width() {
        let cell = self.frame.get_cell(col as usize, row as usize);
        let prev_cell = self.prev_frame.get_cell(col as usize, row as usize);
        if cell == prev_cell {
          col += 1;
          continue;
        }
        let col_end_at = self._next_same_cell_in_row(row, col);
        if col_end_at > col {
          self._make_print_shaders(shader, row, col, col_end_at);
          col = col_end_at;
        }
      }
    }
  }

  /// Print every row, used when the terminal size changed.
  fn _repaint_all(&self, shader: &mut Shader) {
    let size = self.frame.size();
    for row in 0..size.height() {
      if size.width() > 0 {
        self._make_print_shaders(shader, row, 0, size.width());
      }
    }
  }
}
