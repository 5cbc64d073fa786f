//! The form runtime.
//!
//! A form wraps one widget tree plus its runtime state behind a single
//! mutex: the pending-event FIFO, the current focus id, the latched current
//! event and the canvas. One step of the polling loop prepares and draws the
//! tree, waits for a keystroke, dispatches it, and pops at most one event
//! for the host.
//!
//! The mutex is released across the blocking keystroke read so other
//! threads can enqueue events, request redraws or free the form; the
//! focused widget is re-resolved by id afterwards because the tree may have
//! mutated meanwhile.

use crate::flock;
use crate::irect;
use crate::prelude::*;
use crate::ui::canvas::{Canvas, Frame, ShaderCommand};
use crate::ui::event::EventQueue;
use crate::ui::focus;
use crate::ui::key::{FuncKey, Key, keyname};
use crate::ui::term;
use crate::ui::tree::{INVALID_WIDGET_ID, Tree, WidgetId};
use crate::ui::widget;

use compact_str::CompactString;
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::trace;


/// `run` timeout: prepare and draw only, read no input.
pub const RUN_DRAW_ONLY: i32 = -1;
/// `run` timeout: no redraw, just dequeue the next pending event.
pub const RUN_DRAIN: i32 = -2;
/// `run` timeout: layout only, painting into a throwaway off-screen frame.
pub const RUN_PROBE: i32 = -3;

#[derive(Debug)]
/// The mutable runtime state of a form, everything the form mutex guards.
pub struct FormState {
  pub(crate) tree: Tree,
  pub(crate) event_queue: EventQueue,
  pub(crate) current_focus_id: WidgetId,
  pub(crate) event: Option<CompactString>,
  pub(crate) canvas: Canvas,
  pub(crate) full_redraw: bool,
}

#[derive(Debug)]
/// One top-level interactive widget tree plus runtime state.
pub struct Form {
  state: Mutex<FormState>,
}

/// Thread-shared form handle.
pub type FormArc = Arc<Form>;

impl Form {
  /// Make a form owning `tree`.
  pub fn new(tree: Tree) -> Self {
    Form {
      state: Mutex::new(FormState {
        tree,
        event_queue: EventQueue::new(),
        current_focus_id: INVALID_WIDGET_ID,
        event: None,
        canvas: Canvas::new(U16Size::new(0, 0)),
        full_redraw: false,
      }),
    }
  }

  /// Convert `Form` struct to [`FormArc`] pointer.
  pub fn to_arc(form: Form) -> FormArc {
    Arc::new(form)
  }

  /// Run the tree operation `op` under the form mutex.
  pub fn with_tree<R>(&self, op: impl FnOnce(&mut Tree) -> R) -> R {
    let mut state = flock!(self.state);
    op(&mut state.tree)
  }

  /// Externally enqueue an event. Delivered in enqueue order, before events
  /// synthesized by a later step.
  pub fn event(&self, event: impl Into<CompactString>) {
    let mut state = flock!(self.state);
    state.event_queue.push(event);
  }

  /// Mark the next step as requiring a full repaint.
  pub fn redraw(&self) {
    let mut state = flock!(self.state);
    state.full_redraw = true;
  }

  /// The latched current event of the last step, if any.
  pub fn current_event(&self) -> Option<CompactString> {
    let state = flock!(self.state);
    state.event.clone()
  }

  /// Run one step of the polling loop.
  ///
  /// | `timeout` | behavior |
  /// |---|---|
  /// | `> 0` | prepare, draw, wait for a key up to `timeout` milliseconds |
  /// | `0` | same, but wait indefinitely |
  /// | [`RUN_DRAW_ONLY`] | prepare and draw only, read no input |
  /// | [`RUN_DRAIN`] | no redraw, just dequeue the next pending event |
  /// | [`RUN_PROBE`] | layout only, into a throwaway off-screen frame |
  ///
  /// Returns the latched event popped by this step, if any.
  pub fn run(&self, timeout: i32) -> Option<CompactString> {
    let mut state = flock!(self.state);

    state.event = None;

    if timeout >= 0 && !state.event_queue.is_empty() {
      return Self::unshift(&mut state);
    }
    if timeout == RUN_DRAIN {
      return Self::unshift(&mut state);
    }

    let root = match state.tree.root_id() {
      Some(root) => root,
      None => panic!("Fatal: form run without root widget"),
    };

    if let Err(e) = term::init_terminal() {
      panic!("Fatal: terminal initialization failed: {e}");
    }

    widget::prepare(&mut state.tree, root);
    focus::check_setfocus(&mut state);

    let fw = Self::gather_focus(&mut state);
    state.current_focus_id = fw.unwrap_or(INVALID_WIDGET_ID);

    let size = term::screen_size().unwrap_or_else(|_| state.canvas.size());
    if let Some(node) = state.tree.node_mut(root) {
      node.set_rect(irect!(0, 0, size.width() as isize, size.height() as isize));
    }

    if timeout == RUN_PROBE {
      let mut probe = Frame::new(size);
      let FormState {
        tree,
        current_focus_id,
        ..
      } = &mut *state;
      widget::draw(tree, *current_focus_id, &mut probe, root);
      return None;
    }

    if state.full_redraw {
      state.canvas.reset_prev();
      state.full_redraw = false;
    }
    state.canvas.set_size(size);
    state.canvas.frame_mut().erase();
    {
      let FormState {
        tree,
        canvas,
        current_focus_id,
        ..
      } = &mut *state;
      widget::draw(tree, *current_focus_id, canvas.frame_mut(), root);
    }

    let hint = fw
      .and_then(|id| state.tree.node(id))
      .and_then(|node| node.cursor());
    let mut shader = state.canvas.shade();
    match hint {
      Some(pos) => {
        shader.push(ShaderCommand::CursorMoveTo(crossterm::cursor::MoveTo(
          pos.x(),
          pos.y(),
        )));
        shader.push(ShaderCommand::CursorShow(crossterm::cursor::Show));
      }
      None => shader.push(ShaderCommand::CursorHide(crossterm::cursor::Hide)),
    }
    if let Err(e) = term::flush(shader) {
      trace!("flush failed: {e:?}");
    }

    if timeout < 0 {
      // RUN_DRAW_ONLY
      return None;
    }

    // The blocking read is the only suspension point; release the form
    // mutex across it.
    drop(state);
    let read = term::read_key(timeout);
    let mut state = flock!(self.state);

    // The tree may have been mutated while unlocked, regather the focused
    // widget by id.
    let fw = Self::gather_focus(&mut state);
    state.current_focus_id = fw.unwrap_or(INVALID_WIDGET_ID);

    let key = match read {
      Ok(Some(key)) => key,
      Ok(None) | Err(_) => {
        state.event_queue.push("TIMEOUT");
        return Self::unshift(&mut state);
      }
    };

    Self::dispatch_key(&mut state, fw, key);
    Self::unshift(&mut state)
  }

  /// Dispatch one keystroke: from the focused widget upward consult the
  /// authored `on_<EVENT>` handler, then the widget's own process operation;
  /// a modal widget stops the ascent. Unconsumed TAB and BTAB fall back to
  /// global focus traversal, everything else enqueues its raw event name.
  fn dispatch_key(state: &mut FormState, fw: Option<WidgetId>, key: Key) {
    let event = keyname(key);
    let on_handler = format!("on_{event}");
    trace!("key {key:?} -> {event}");

    let mut cur = fw;
    while let Some(wid) = cur {
      let handler = state.tree.getkv(wid, &on_handler).map(CompactString::new);
      if let Some(value) = handler {
        state.event_queue.push(value);
        return;
      }

      if state.tree.getkv_int(wid, "process", 1) != 0
        && widget::process(state, wid, fw.unwrap_or(INVALID_WIDGET_ID), key)
      {
        return;
      }

      if state.tree.getkv_int(wid, "modal", 0) != 0 {
        state.event_queue.push(event);
        return;
      }

      cur = state.tree.parent_id(wid);
    }

    if key == Key::Char('\t') {
      if !focus::tab_forward(state) {
        state.event_queue.push(event);
      }
      return;
    }
    if key == Key::Func(FuncKey::BackTab) {
      focus::tab_backward(state);
      return;
    }

    state.event_queue.push(event);
  }

  /// Pop one pending event into the latched current-event slot.
  fn unshift(state: &mut FormState) -> Option<CompactString> {
    if let Some(event) = state.event_queue.pop() {
      state.event = Some(event);
    }
    state.event.clone()
  }

  /// The focused widget, re-resolved by id. Falls back to the first
  /// focusable widget of the tree, synthesizing its `enter`.
  fn gather_focus(state: &mut FormState) -> Option<WidgetId> {
    let root = state.tree.root_id()?;
    let cur = state.current_focus_id;
    if cur != INVALID_WIDGET_ID && state.tree.is_attached(cur) {
      return Some(cur);
    }
    let fw = focus::find_first_focusable(&state.tree, root);
    if let Some(id) = fw {
      widget::enter(state, id);
    }
    fw
  }
}

impl Drop for Form {
  /// Free the widget tree under the mutex, running the `done` hooks.
  fn drop(&mut self) {
    let mut state = flock!(self.state);
    if let Some(root) = state.tree.root_id() {
      state.tree.remove(root);
    }
  }
}

/// Tear down the terminal, if it is up. The next step of any form
/// re-initializes it.
pub fn form_reset() -> IoResult<()> {
  term::shutdown_terminal()
}
