//! A small interactive demo form: a title, a few checkboxes, a status line.

use tuiform_core::log;
use tuiform_core::res::AnyResult;
use tuiform_core::ui::form::{Form, form_reset};
use tuiform_core::ui::tree::Tree;

use clap::Parser;
use toml::Table;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "tuiform", disable_version_flag = true)]
/// Interactive demo for the tuiform forms engine.
struct CliOpt {
  /// Print version and exit.
  #[arg(short = 'V', long)]
  version: bool,

  /// Poll timeout per step in milliseconds, 0 waits indefinitely.
  #[arg(long, default_value_t = 1000)]
  timeout: i32,
}

/// Build the demo widget tree.
fn demo_tree() -> AnyResult<Tree> {
  let mut tree = Tree::new();

  let root = tree.new_widget("vbox")?;
  tree.set_root(root);
  tree.setkv(root, "on_ESC", "QUIT");
  tree.setkv(root, "on_q", "QUIT");

  let title = tree.new_widget("label")?;
  tree.setkv(title, "text", "<hi>tuiform</> demo, press q or ESC to quit");
  tree.setkv(title, "style_hi_normal", "fg=yellow,attr=bold");
  tree.setkv(title, ".expand", "h");
  tree.append_child(root, title);

  for (i, text) in ["coffee", "tea", "cake"].iter().enumerate() {
    let cb = tree.new_widget(if i == 0 { "!checkbox" } else { "checkbox" })?;
    tree.setkv(cb, "text", *text);
    tree.setkv(cb, "style_focus", "attr=reverse");
    tree.setkv(cb, ".expand", "h");
    tree.node_mut(cb).unwrap().set_name(*text);
    tree.append_child(root, cb);
  }

  let status = tree.new_widget("label")?;
  tree.setkv_named(status, "text", "TAB cycles, SPACE toggles", "status");
  tree.setkv(status, ".tie", "b");
  tree.append_child(root, status);

  Ok(tree)
}

fn main() -> AnyResult<()> {
  let _log_guard = log::init();
  let cli_opt = CliOpt::parse();
  debug!("cli_opt: {:?}", cli_opt);

  if cli_opt.version {
    let cargo_toml_meta = include_str!("../../../Cargo.toml");
    let cargo_toml_data = cargo_toml_meta.parse::<Table>().unwrap();
    println!(
      "tuiform {}",
      cargo_toml_data["workspace"]["package"]["version"]
        .as_str()
        .unwrap_or("dev"),
    );
    return Ok(());
  }

  let form = Form::new(demo_tree()?);

  loop {
    let event = form.run(cli_opt.timeout);
    debug!("event: {:?}", event);
    match event.as_deref() {
      Some("QUIT") => break,
      Some("TIMEOUT") | None => {}
      Some(name) => {
        let text = format!("last event: {name}");
        form.with_tree(|tree| {
          let root = tree.root_id().unwrap();
          tree.setkv_by_name(root, "status", text);
        });
      }
    }
  }

  form_reset()?;
  Ok(())
}
