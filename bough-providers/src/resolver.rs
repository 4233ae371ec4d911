//! # Branch Resolution
//!
//! Entry points that drive a [`BranchClient`] and feed the outcome into the
//! resolution state machine.

use bough_core::{RepositoryIdentity, ResolutionResult, ResolutionTicket, ResolveError, SelectionState};
use tracing::{debug, instrument};

use crate::client::BranchClient;

impl BranchClient {
  /// Resolve the branch list for `identity`.
  ///
  /// Never fails: every error becomes a `Failure` carrying the appropriate
  /// fallback list. An incomplete identity or unsupported provider is
  /// reported without touching the network.
  #[instrument(skip(self), fields(identity = %identity))]
  pub async fn resolve_branches(&self, identity: &RepositoryIdentity) -> ResolutionResult {
    if !identity.is_complete() {
      debug!("Skipping fetch due to missing owner/repo");
      return ResolutionResult::from_error(ResolveError::IncompleteIdentity);
    }
    self.list_branches(identity).await.into()
  }

  /// Run the attempt described by `ticket`, handing the ticket back with its
  /// outcome so the caller can apply it with [`SelectionState::complete`].
  pub async fn resolve_ticket(&self, ticket: ResolutionTicket) -> (ResolutionTicket, ResolutionResult) {
    let result = self.resolve_branches(ticket.identity()).await;
    (ticket, result)
  }

  /// Point `state` at `identity` and resolve it to completion.
  ///
  /// Returns `true` when a fetch was performed and its outcome applied.
  pub async fn refresh(&self, state: &mut SelectionState, identity: RepositoryIdentity) -> bool {
    match state.set_identity(identity) {
      Some(ticket) => self.settle(state, ticket).await,
      None => false,
    }
  }

  /// Re-run resolution for the identity `state` already holds.
  pub async fn retry(&self, state: &mut SelectionState) -> bool {
    match state.retry() {
      Some(ticket) => self.settle(state, ticket).await,
      None => false,
    }
  }

  async fn settle(&self, state: &mut SelectionState, ticket: ResolutionTicket) -> bool {
    let (ticket, result) = self.resolve_ticket(ticket).await;
    state.complete(&ticket, result)
  }
}
