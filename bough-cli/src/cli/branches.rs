//! # Branches Command
//!
//! Resolves the branch list of a repository once and prints it as a table
//! or as JSON.

use anyhow::{Context, Result};
use bough_core::output::{format_branch_name, format_sha, print_error, print_info, print_warning};
use bough_core::{BranchRecord, ErrorKind, ResolutionResult, get_config_dirs};
use bough_providers::BranchClient;
use clap::{Args, ValueEnum};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use tokio::runtime::Runtime;

use super::identity::IdentityArgs;

/// Output format of the branch list
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
  #[default]
  Table,
  Json,
}

/// List the branches of a repository
#[derive(Args, Debug)]
pub struct BranchesArgs {
  #[command(flatten)]
  pub identity: IdentityArgs,

  /// Output format
  #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Table)]
  pub format: OutputFormat,
}

/// JSON shape printed by `bough branches --format json`
#[derive(Serialize, Debug)]
struct BranchListing<'a> {
  status: &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  error_kind: Option<ErrorKind>,
  #[serde(skip_serializing_if = "Option::is_none")]
  error: Option<String>,
  branches: &'a [BranchRecord],
  selected: &'a str,
}

#[derive(Tabled)]
struct BranchRow {
  #[tabled(rename = "")]
  marker: &'static str,
  #[tabled(rename = "Branch")]
  name: String,
  #[tabled(rename = "Commit")]
  commit: String,
}

pub fn handle_branches_command(args: BranchesArgs) -> Result<()> {
  let config = get_config_dirs()?.load_config()?;
  let identity = args.identity.to_identity()?;
  let client = BranchClient::from_config(&config);

  let rt = Runtime::new().context("Failed to start async runtime")?;
  let result = rt.block_on(client.resolve_branches(&identity));

  match args.format {
    OutputFormat::Table => print_table_report(&result, &args.identity.current),
    OutputFormat::Json => print_json_report(&result, &args.identity.current)?,
  }
  Ok(())
}

/// Render `branches` as a table, marking `current`.
pub fn render_branch_table(branches: &[BranchRecord], current: &str) -> String {
  let rows = branches.iter().map(|branch| {
    let is_current = branch.name == current;
    BranchRow {
      marker: if is_current { "*" } else { "" },
      name: format_branch_name(&branch.name, is_current),
      commit: branch.short_sha().map(format_sha).unwrap_or_default(),
    }
  });
  Table::new(rows).with(Style::sharp()).to_string()
}

#[allow(clippy::print_stdout)]
fn print_table_report(result: &ResolutionResult, current: &str) {
  match result {
    ResolutionResult::Success(branches) if branches.is_empty() => {
      print_info(&format!("No branches found, using default: {current}"));
    }
    ResolutionResult::Success(branches) => {
      println!("{}", render_branch_table(branches, current));
    }
    ResolutionResult::Failure { error, fallback } => {
      print_error(&error.to_string());
      if !fallback.is_empty() {
        print_warning("Showing default branches:");
        println!("{}", render_branch_table(fallback, current));
      }
      print_info(&format!("Will use: {current}"));
    }
    ResolutionResult::Idle | ResolutionResult::Loading => {}
  }
}

#[allow(clippy::print_stdout)]
fn print_json_report(result: &ResolutionResult, current: &str) -> Result<()> {
  let listing = BranchListing {
    status: match result {
      ResolutionResult::Success(_) => "success",
      ResolutionResult::Failure { .. } => "failure",
      ResolutionResult::Idle => "idle",
      ResolutionResult::Loading => "loading",
    },
    error_kind: result.error_kind(),
    error: result.error().map(ToString::to_string),
    branches: result.branches(),
    selected: current,
  };
  println!(
    "{}",
    serde_json::to_string_pretty(&listing).context("Failed to serialize branch list")?
  );
  Ok(())
}
