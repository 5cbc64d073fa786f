//! One widget node of the form tree.

use crate::prelude::*;
use crate::ui::tree::WidgetId;
use crate::ui::tree::attr::AttrStore;
use crate::ui::widget::{WidgetKind, WidgetState};
use compact_str::CompactString;

#[derive(Debug, Clone)]
/// A widget: one node of the UI tree.
///
/// Geometry is assigned by the parent during draw, the minimum size is
/// computed during prepare. The cursor hint is the preferred hardware-cursor
/// cell inside the widget, if the widget wants one.
pub struct Widget {
  id: WidgetId,
  kind: WidgetKind,
  name: Option<CompactString>,
  cls: Option<CompactString>,
  allow_focus: bool,
  setfocus: bool,
  rect: IRect,
  min_size: ISize,
  cursor: Option<U16Pos>,
  attrs: AttrStore,
  state: WidgetState,
}

impl Widget {
  pub fn new(id: WidgetId, kind: WidgetKind, setfocus: bool) -> Self {
    Widget {
      id,
      kind,
      name: None,
      cls: None,
      allow_focus: kind.allow_focus(),
      setfocus,
      rect: IRect::new((0, 0), (0, 0)),
      min_size: ISize::new(0, 0),
      cursor: None,
      attrs: AttrStore::new(),
      state: WidgetState::None,
    }
  }

  pub fn id(&self) -> WidgetId {
    self.id
  }

  pub fn kind(&self) -> WidgetKind {
    self.kind
  }

  pub fn name(&self) -> Option<&str> {
    self.name.as_deref()
  }

  pub fn set_name(&mut self, name: impl Into<CompactString>) {
    self.name = Some(name.into());
  }

  pub fn cls(&self) -> Option<&str> {
    self.cls.as_deref()
  }

  pub fn set_cls(&mut self, cls: impl Into<CompactString>) {
    self.cls = Some(cls.into());
  }

  /// Whether the widget's type permits focus.
  pub fn allow_focus(&self) -> bool {
    self.allow_focus
  }

  /// One-shot request to receive focus on the next form step.
  pub fn setfocus(&self) -> bool {
    self.setfocus
  }

  pub fn set_setfocus(&mut self, setfocus: bool) {
    self.setfocus = setfocus;
  }

  pub fn rect(&self) -> &IRect {
    &self.rect
  }

  pub fn set_rect(&mut self, rect: IRect) {
    self.rect = rect;
  }

  pub fn min_size(&self) -> ISize {
    self.min_size
  }

  pub fn set_min_size(&mut self, min_size: ISize) {
    self.min_size = min_size;
  }

  pub fn cursor(&self) -> Option<U16Pos> {
    self.cursor
  }

  pub fn set_cursor(&mut self, cursor: Option<U16Pos>) {
    self.cursor = cursor;
  }

  pub fn attrs(&self) -> &AttrStore {
    &self.attrs
  }

  pub fn attrs_mut(&mut self) -> &mut AttrStore {
    &mut self.attrs
  }

  pub fn state(&self) -> &WidgetState {
    &self.state
  }

  pub fn state_mut(&mut self) -> &mut WidgetState {
    &mut self.state
  }

  pub fn set_state(&mut self, state: WidgetState) {
    self.state = state;
  }
}
