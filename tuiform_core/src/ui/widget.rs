//! Widget types.
//!
//! Each widget kind is one entry of a fixed, ordered registry and provides
//! up to seven operations: init, done, enter, leave, prepare, draw and
//! process. All of them are optional per kind; dispatch is a plain match so
//! a kind without an operation costs nothing.

use crate::ui::canvas::frame::Frame;
use crate::ui::canvas::style::Style;
use crate::ui::form::FormState;
use crate::ui::key::Key;
use crate::ui::tree::{Tree, WidgetId};

pub mod boxes;
pub mod checkbox;
pub mod label;

pub use boxes::BoxAxis;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Widget kind tag. Doubles as the registry descriptor.
pub enum WidgetKind {
  Label,
  Vbox,
  Hbox,
  Checkbox,
}

/// The widget type registry, in factory lookup order.
pub const WIDGET_TYPES: &[WidgetKind] = &[
  WidgetKind::Label,
  WidgetKind::Vbox,
  WidgetKind::Hbox,
  WidgetKind::Checkbox,
];

impl WidgetKind {
  /// Factory lookup: compare `name` against each registered type in order.
  pub fn by_name(name: &str) -> Option<WidgetKind> {
    WIDGET_TYPES.iter().copied().find(|t| t.type_name() == name)
  }

  pub fn type_name(self) -> &'static str {
    match self {
      WidgetKind::Label => "label",
      WidgetKind::Vbox => "vbox",
      WidgetKind::Hbox => "hbox",
      WidgetKind::Checkbox => "checkbox",
    }
  }

  /// Whether this kind is a focus candidate at all.
  pub fn allow_focus(self) -> bool {
    match self {
      WidgetKind::Checkbox => true,
      WidgetKind::Label | WidgetKind::Vbox | WidgetKind::Hbox => false,
    }
  }
}

#[derive(Debug, Clone, Default)]
/// Opaque per-kind widget state.
pub enum WidgetState {
  #[default]
  None,
  Box(boxes::BoxState),
}

/// Allocate per-kind state, right after widget creation.
pub fn init(tree: &mut Tree, id: WidgetId) {
  let kind = match tree.node(id) {
    Some(node) => node.kind(),
    None => return,
  };
  match kind {
    WidgetKind::Vbox => boxes::init(tree, id, BoxAxis::Vertical),
    WidgetKind::Hbox => boxes::init(tree, id, BoxAxis::Horizontal),
    WidgetKind::Label | WidgetKind::Checkbox => {}
  }
}

/// Release per-kind state, before widget destruction. The state itself is
/// dropped with the node; kinds holding external resources hook in here.
pub fn done(_tree: &mut Tree, _id: WidgetId) {}

/// Focus gained.
pub fn enter(_form: &mut FormState, _id: WidgetId) {}

/// Focus lost.
pub fn leave(_form: &mut FormState, _id: WidgetId) {}

/// First pass of each form step: compute the widget's minimum size.
pub fn prepare(tree: &mut Tree, id: WidgetId) {
  let kind = match tree.node(id) {
    Some(node) => node.kind(),
    None => return,
  };
  match kind {
    WidgetKind::Vbox | WidgetKind::Hbox => boxes::prepare(tree, id),
    WidgetKind::Label => label::prepare(tree, id),
    WidgetKind::Checkbox => checkbox::prepare(tree, id),
  }
}

/// Second pass of each form step: paint the widget (and its children) into
/// its assigned cell rectangle.
pub fn draw(tree: &mut Tree, focus_id: WidgetId, frame: &mut Frame, id: WidgetId) {
  let kind = match tree.node(id) {
    Some(node) => node.kind(),
    None => return,
  };
  match kind {
    WidgetKind::Vbox | WidgetKind::Hbox => boxes::draw(tree, focus_id, frame, id),
    WidgetKind::Label => label::draw(tree, focus_id, frame, id),
    WidgetKind::Checkbox => checkbox::draw(tree, focus_id, frame, id),
  }
}

/// Handle one keystroke. Returns whether the keystroke was consumed.
pub fn process(form: &mut FormState, id: WidgetId, fw: WidgetId, key: Key) -> bool {
  let kind = match form.tree.node(id) {
    Some(node) => node.kind(),
    None => return false,
  };
  match kind {
    WidgetKind::Vbox | WidgetKind::Hbox => boxes::process(form, id, fw, key),
    WidgetKind::Checkbox => checkbox::process(form, id, fw, key),
    WidgetKind::Label => false,
  }
}

/// The widget's own resolved style: `style_focus` when focused (falling back
/// to `style_normal` when unset), else `style_normal`.
pub fn widget_style(tree: &Tree, focus_id: WidgetId, id: WidgetId) -> Style {
  let mut descr = "";
  if focus_id == id {
    descr = tree.getkv_str(id, "style_focus", "");
  }
  if descr.is_empty() {
    descr = tree.getkv_str(id, "style_normal", "");
  }
  Style::parse(descr)
}
