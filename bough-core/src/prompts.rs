//! # Prompts Module
//!
//! Dialoguer theme and item labels for the interactive branch picker.

use console::{Style, style};
use dialoguer::theme::ColorfulTheme;

const CURRENT_MARKER: &str = "(current)";

/// Returns the dialoguer theme used by the branch picker.
///
/// The active row gets a green `⎇` prefix, inactive rows are indented to
/// line up with it, and the confirmed branch is echoed in bold magenta.
pub fn bough_theme() -> ColorfulTheme {
  ColorfulTheme {
    prompt_style: Style::new().cyan().bold(),
    active_item_prefix: style("⎇ ".to_string()).green().bold(),
    inactive_item_prefix: style("  ".to_string()),
    active_item_style: Style::new().green(),
    inactive_item_style: Style::new().dim(),
    picked_item_prefix: style("⎇ ".to_string()).magenta(),
    values_style: Style::new().magenta().bold(),
    ..ColorfulTheme::default()
  }
}

/// Menu labels for `names`, with the currently checked-out branch marked.
///
/// Labels keep the order of `names`, so a picked index maps straight back.
pub fn branch_labels<S: AsRef<str>>(names: &[S], current: &str) -> Vec<String> {
  names
    .iter()
    .map(|name| {
      let name = name.as_ref();
      if name == current {
        format!("{name} {CURRENT_MARKER}")
      } else {
        name.to_string()
      }
    })
    .collect()
}
