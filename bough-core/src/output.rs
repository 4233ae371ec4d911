//! # Output Formatting
//!
//! Colored, consistently prefixed terminal messages for user-facing output.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use owo_colors::{OwoColorize, Stream, Style};

/// Enum representing different color modes for output
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Always emit colors
  Always,
  /// Automatically detect if colors should be used based on terminal
  /// capabilities
  Auto,
  /// Disable colored output
  Never,
}

impl ColorMode {
  /// Apply this mode to owo-colors' global override.
  pub fn apply(self) {
    match self {
      Self::Always => owo_colors::set_override(true),
      Self::Never => owo_colors::set_override(false),
      Self::Auto => owo_colors::unset_override(),
    }
  }
}

/// Print a success message
pub fn print_success(message: &str) {
  println!("{}", status_line("✓", message, Stream::Stdout, Style::new().green().bold()));
}

/// Print an error message
pub fn print_error(message: &str) {
  eprintln!("{}", status_line("✗", message, Stream::Stderr, Style::new().red().bold()));
}

/// Print a warning message
pub fn print_warning(message: &str) {
  println!("{}", status_line("⚠", message, Stream::Stdout, Style::new().yellow().bold()));
}

/// Print an info message
pub fn print_info(message: &str) {
  println!("{}", status_line("ℹ", message, Stream::Stdout, Style::new().blue().bold()));
}

/// Print a warning message to stderr, keeping stdout free for command output
pub fn eprint_warning(message: &str) {
  eprintln!("{}", status_line("⚠", message, Stream::Stderr, Style::new().yellow().bold()));
}

/// Print an info message to stderr, keeping stdout free for command output
pub fn eprint_info(message: &str) {
  eprintln!("{}", status_line("ℹ", message, Stream::Stderr, Style::new().blue().bold()));
}

fn status_line(symbol: &str, message: &str, stream: Stream, style: Style) -> String {
  format!("{} {message}", paint(symbol, stream, style))
}

/// Format a branch name, highlighting the caller's current branch
pub fn format_branch_name(name: &str, is_current: bool) -> String {
  if is_current {
    paint(name, Stream::Stdout, Style::new().bright_green().bold())
  } else {
    name.to_string()
  }
}

/// Format an abbreviated commit hash
pub fn format_sha(sha: &str) -> String {
  paint(sha, Stream::Stdout, Style::new().yellow())
}

/// Style text when the target stream supports colors (or the override says so)
fn paint(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |t| t.style(style)).to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_format_functions_keep_text() {
    owo_colors::set_override(false);
    assert_eq!(format_branch_name("main", true), "main");
    assert_eq!(format_branch_name("dev", false), "dev");
    assert_eq!(format_sha("abc1234"), "abc1234");
  }

  #[test]
  fn test_status_line_without_colors() {
    owo_colors::set_override(false);
    let line = status_line("ℹ", "Will use: main", Stream::Stderr, Style::new().blue().bold());
    assert_eq!(line, "ℹ Will use: main");
  }
}
