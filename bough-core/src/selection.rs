//! # Branch Selection State
//!
//! The state a branch picker owns while it resolves and presents branches
//! for one repository identity at a time.
//!
//! Resolution runs outside this type. A consumer calls
//! [`SelectionState::set_identity`] (or [`SelectionState::retry`]) to obtain a
//! [`ResolutionTicket`], runs the fetch for the ticket's identity, and hands
//! the outcome back through [`SelectionState::complete`]. Every new attempt
//! bumps a generation counter; outcomes whose ticket is not the current
//! generation are discarded, so a slow response for a superseded identity can
//! never overwrite the state of the identity that replaced it.

use std::fmt;

use tracing::{debug, warn};

use crate::branch::{BranchRecord, fallback_branches};
use crate::error::{ErrorKind, ResolveError};
use crate::identity::RepositoryIdentity;

/// Outcome of resolving the branches of one identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionResult {
  /// No identity has been supplied yet.
  Idle,
  /// A resolution attempt is in flight.
  Loading,
  /// Branches in provider response order.
  Success(Vec<BranchRecord>),
  /// Resolution failed; `fallback` is what the picker should offer instead.
  Failure {
    error: ResolveError,
    fallback: Vec<BranchRecord>,
  },
}

impl ResolutionResult {
  /// Build the failure state for an error.
  ///
  /// An incomplete identity has nothing sensible to fall back to, so its
  /// fallback list is empty; every other error offers the default branches.
  pub fn from_error(error: ResolveError) -> Self {
    let fallback = match error {
      ResolveError::IncompleteIdentity => Vec::new(),
      _ => fallback_branches(),
    };
    Self::Failure { error, fallback }
  }

  /// Whether this is a terminal outcome (success or failure).
  pub const fn is_settled(&self) -> bool {
    matches!(self, Self::Success(_) | Self::Failure { .. })
  }

  pub const fn is_loading(&self) -> bool {
    matches!(self, Self::Loading)
  }

  /// The branches a picker should list: the resolved list on success, the
  /// fallback list on failure, nothing otherwise.
  pub fn branches(&self) -> &[BranchRecord] {
    match self {
      Self::Success(branches) => branches,
      Self::Failure { fallback, .. } => fallback,
      Self::Idle | Self::Loading => &[],
    }
  }

  pub const fn error(&self) -> Option<&ResolveError> {
    match self {
      Self::Failure { error, .. } => Some(error),
      _ => None,
    }
  }

  pub fn error_kind(&self) -> Option<ErrorKind> {
    self.error().map(ResolveError::kind)
  }
}

impl From<Result<Vec<BranchRecord>, ResolveError>> for ResolutionResult {
  fn from(result: Result<Vec<BranchRecord>, ResolveError>) -> Self {
    match result {
      Ok(branches) => Self::Success(branches),
      Err(error) => Self::from_error(error),
    }
  }
}

/// Proof that a resolution attempt was started for a given identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionTicket {
  generation: u64,
  identity: RepositoryIdentity,
}

impl ResolutionTicket {
  pub const fn generation(&self) -> u64 {
    self.generation
  }

  /// The identity the attempt must resolve.
  pub const fn identity(&self) -> &RepositoryIdentity {
    &self.identity
  }
}

/// A change observers are told about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateChange {
  Result(ResolutionResult),
  SelectedBranch(String),
  MenuOpen(bool),
}

type Observer = Box<dyn FnMut(&StateChange) + Send>;

/// Resolution result, current selection and menu visibility for one picker.
pub struct SelectionState {
  identity: Option<RepositoryIdentity>,
  generation: u64,
  result: ResolutionResult,
  selected_branch: String,
  menu_open: bool,
  observers: Vec<Observer>,
}

impl SelectionState {
  /// Create an idle state whose selection defaults to the caller's branch.
  pub fn new(current_branch: impl Into<String>) -> Self {
    Self {
      identity: None,
      generation: 0,
      result: ResolutionResult::Idle,
      selected_branch: current_branch.into(),
      menu_open: false,
      observers: Vec::new(),
    }
  }

  pub const fn identity(&self) -> Option<&RepositoryIdentity> {
    self.identity.as_ref()
  }

  pub const fn result(&self) -> &ResolutionResult {
    &self.result
  }

  pub fn selected_branch(&self) -> &str {
    &self.selected_branch
  }

  pub const fn is_menu_open(&self) -> bool {
    self.menu_open
  }

  pub const fn generation(&self) -> u64 {
    self.generation
  }

  /// Register an observer that is called after every state change.
  pub fn subscribe<F>(&mut self, observer: F)
  where
    F: FnMut(&StateChange) + Send + 'static,
  {
    self.observers.push(Box::new(observer));
  }

  /// Supply the identity to resolve.
  ///
  /// Returns a ticket when a network resolution should be started. An
  /// identity equal to the current one does not start a new attempt; use
  /// [`Self::retry`] for that.
  pub fn set_identity(&mut self, identity: RepositoryIdentity) -> Option<ResolutionTicket> {
    if self.identity.as_ref() == Some(&identity) {
      debug!(%identity, "Identity unchanged; keeping current resolution");
      return None;
    }
    self.begin(identity)
  }

  /// Re-run resolution for the current identity.
  pub fn retry(&mut self) -> Option<ResolutionTicket> {
    let identity = self.identity.clone()?;
    self.begin(identity)
  }

  fn begin(&mut self, identity: RepositoryIdentity) -> Option<ResolutionTicket> {
    // Any attempt still in flight becomes stale from here on.
    self.generation = self.generation.wrapping_add(1);
    self.identity = Some(identity.clone());

    if !identity.is_complete() {
      debug!(%identity, "Skipping fetch due to missing owner/repo");
      self.set_result(ResolutionResult::from_error(ResolveError::IncompleteIdentity));
      return None;
    }

    if let Err(error) = identity.provider_kind() {
      warn!(%identity, "{error}");
      self.set_result(ResolutionResult::from_error(error));
      return None;
    }

    self.set_result(ResolutionResult::Loading);
    Some(ResolutionTicket {
      generation: self.generation,
      identity,
    })
  }

  /// Apply the outcome of the attempt identified by `ticket`.
  ///
  /// Returns `false` and leaves the state untouched when the ticket has been
  /// superseded or the outcome is not terminal.
  pub fn complete(&mut self, ticket: &ResolutionTicket, result: ResolutionResult) -> bool {
    if ticket.generation != self.generation || self.identity.as_ref() != Some(&ticket.identity) {
      debug!(
        identity = %ticket.identity,
        ticket = ticket.generation,
        current = self.generation,
        "Discarding stale resolution"
      );
      return false;
    }
    if !result.is_settled() {
      return false;
    }
    self.set_result(result);
    true
  }

  /// Select a branch from the resolved list and close the menu.
  ///
  /// Only names present in a `Success` list are accepted; anything else is a
  /// no-op that returns `false`.
  pub fn select_branch(&mut self, name: &str) -> bool {
    let ResolutionResult::Success(branches) = &self.result else {
      return false;
    };
    if !branches.iter().any(|branch| branch.name == name) {
      return false;
    }

    if self.selected_branch != name {
      self.selected_branch = name.to_string();
      self.notify(&StateChange::SelectedBranch(self.selected_branch.clone()));
    }
    self.set_menu_open(false);
    true
  }

  pub fn open_menu(&mut self) {
    self.set_menu_open(true);
  }

  pub fn close_menu(&mut self) {
    self.set_menu_open(false);
  }

  pub fn toggle_menu(&mut self) {
    self.set_menu_open(!self.menu_open);
  }

  fn set_menu_open(&mut self, open: bool) {
    if self.menu_open != open {
      self.menu_open = open;
      self.notify(&StateChange::MenuOpen(open));
    }
  }

  fn set_result(&mut self, result: ResolutionResult) {
    if self.result != result {
      self.result = result;
      self.notify(&StateChange::Result(self.result.clone()));
    }
  }

  fn notify(&mut self, change: &StateChange) {
    for observer in &mut self.observers {
      observer(change);
    }
  }
}

impl fmt::Debug for SelectionState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SelectionState")
      .field("identity", &self.identity)
      .field("generation", &self.generation)
      .field("result", &self.result)
      .field("selected_branch", &self.selected_branch)
      .field("menu_open", &self.menu_open)
      .field("observers", &self.observers.len())
      .finish()
  }
}
