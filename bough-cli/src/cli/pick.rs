//! # Pick Command
//!
//! Drives a [`SelectionState`] through resolution and lets the user choose a
//! branch interactively. The chosen name is the only thing written to
//! stdout; status messages go to stderr.

use anyhow::{Context, Result};
use bough_core::output::{eprint_info, eprint_warning, print_error};
use bough_core::prompts::{bough_theme, branch_labels};
use bough_core::{ResolutionResult, SelectionState, get_config_dirs};
use bough_providers::BranchClient;
use clap::Args;
use dialoguer::Select;
use tokio::runtime::Runtime;
use tracing::debug;

use super::identity::IdentityArgs;

/// Interactively pick a branch
#[derive(Args, Debug)]
pub struct PickArgs {
  #[command(flatten)]
  pub identity: IdentityArgs,
}

/// What the picker should do with the current resolution result.
#[derive(Debug, PartialEq, Eq)]
enum Step {
  Choose(Vec<String>),
  KeepCurrent,
  OfferRetry(String),
  Done(String),
}

fn next_step(state: &SelectionState) -> Step {
  match state.result() {
    ResolutionResult::Success(branches) if branches.is_empty() => Step::KeepCurrent,
    ResolutionResult::Success(branches) => Step::Choose(branches.iter().map(|b| b.name.clone()).collect()),
    ResolutionResult::Failure { error, .. } if error.is_short_circuit() => Step::Done(error.to_string()),
    ResolutionResult::Failure { error, .. } => Step::OfferRetry(error.to_string()),
    ResolutionResult::Idle | ResolutionResult::Loading => Step::KeepCurrent,
  }
}

pub fn handle_pick_command(args: PickArgs) -> Result<()> {
  let config = get_config_dirs()?.load_config()?;
  let identity = args.identity.to_identity()?;
  let client = BranchClient::from_config(&config);
  let current = args.identity.current.clone();

  let mut state = SelectionState::new(current.clone());
  state.subscribe(|change| debug!(?change, "Selection state changed"));

  let rt = Runtime::new().context("Failed to start async runtime")?;
  rt.block_on(client.refresh(&mut state, identity));

  loop {
    match next_step(&state) {
      Step::Choose(names) => {
        state.open_menu();
        let default = names.iter().position(|name| *name == current).unwrap_or(0);
        let choice = Select::with_theme(&bough_theme())
          .with_prompt("Select a branch")
          .items(&branch_labels(&names, &current))
          .default(default)
          .interact_opt()
          .context("Failed to read branch selection")?;

        match choice {
          Some(index) => {
            state.select_branch(&names[index]);
          }
          None => state.close_menu(),
        }
        break;
      }
      Step::KeepCurrent => {
        eprint_info(&format!("No branches found, using default: {current}"));
        break;
      }
      Step::Done(message) => {
        print_error(&message);
        eprint_info(&format!("Will use: {current}"));
        break;
      }
      Step::OfferRetry(message) => {
        print_error(&message);
        let keep = format!("Keep {current}");
        let choice = Select::with_theme(&bough_theme())
          .with_prompt("Branch list unavailable")
          .items(&["Retry", keep.as_str()])
          .default(0)
          .interact_opt()
          .context("Failed to read retry choice")?;

        if choice == Some(0) {
          eprint_warning("Retrying...");
          rt.block_on(client.retry(&mut state));
          continue;
        }
        eprint_info(&format!("Will use: {current}"));
        break;
      }
    }
  }

  print_selected(state.selected_branch());
  Ok(())
}

#[allow(clippy::print_stdout)]
fn print_selected(branch: &str) {
  println!("{branch}");
}

#[cfg(test)]
mod tests {
  use bough_core::{BranchRecord, RepositoryIdentity, ResolveError};

  use super::*;

  fn settled(result: ResolutionResult) -> SelectionState {
    let mut state = SelectionState::new("main");
    let ticket = state
      .set_identity(RepositoryIdentity::new("o", "r", "github", None))
      .unwrap();
    assert!(state.complete(&ticket, result));
    state
  }

  #[test]
  fn test_next_step() {
    let state = settled(ResolutionResult::Success(vec![BranchRecord::new("dev", "abc", "")]));
    assert_eq!(next_step(&state), Step::Choose(vec!["dev".into()]));

    let state = settled(ResolutionResult::Success(Vec::new()));
    assert_eq!(next_step(&state), Step::KeepCurrent);

    let state = settled(ResolutionResult::from_error(ResolveError::RateLimited));
    assert!(matches!(next_step(&state), Step::OfferRetry(msg) if msg.starts_with("Rate limit exceeded")));
  }

  #[test]
  fn test_short_circuit_is_not_retried() {
    let mut state = SelectionState::new("main");
    assert!(state.set_identity(RepositoryIdentity::new("", "r", "github", None)).is_none());
    assert_eq!(
      next_step(&state),
      Step::Done("Repository information is incomplete".into())
    );
  }
}
