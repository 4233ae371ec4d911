//! # Branch Normalization
//!
//! Converts a provider payload into canonical [`BranchRecord`]s using the
//! provider's strategy. Malformed elements are dropped with a warning unless
//! strict parsing is enabled.

use std::collections::HashSet;

use bough_core::{BranchRecord, MalformedBranchData, ProviderKind, ResolveError, UNKNOWN_SHA};
use serde_json::Value;
use tracing::{debug, warn};

use crate::providers::{ProviderStrategy, strategy_for};

/// Normalize a successful response body for `kind`.
///
/// The output keeps payload order and holds each branch name at most once.
/// A body that does not have the provider's top-level shape is rejected as a
/// whole.
pub fn normalize_branches(kind: ProviderKind, payload: &Value, strict: bool) -> Result<Vec<BranchRecord>, ResolveError> {
  let strategy = strategy_for(kind);
  let elements = strategy.branch_elements(payload).ok_or_else(|| {
    ResolveError::MalformedBranchData(format!("{kind} response does not contain a branch list"))
  })?;

  let mut records = Vec::with_capacity(elements.len());
  let mut seen = HashSet::new();

  for (index, element) in elements.iter().enumerate() {
    let record = match normalize_element(strategy, index, element) {
      Ok(record) => record,
      Err(err) if strict => return Err(err.into()),
      Err(err) => {
        warn!(provider = %kind, "Dropping {err}");
        continue;
      }
    };

    if !seen.insert(record.name.clone()) {
      warn!(provider = %kind, branch = %record.name, "Dropping duplicate branch #{index}");
      continue;
    }
    records.push(record);
  }

  debug!(
    provider = %kind,
    received = elements.len(),
    kept = records.len(),
    "Normalized branch list"
  );
  Ok(records)
}

fn normalize_element(
  strategy: &dyn ProviderStrategy,
  index: usize,
  element: &Value,
) -> Result<BranchRecord, MalformedBranchData> {
  let record = strategy.normalize_element(element).map_err(|e| MalformedBranchData {
    index,
    reason: e.to_string(),
  })?;

  let malformed = |reason: String| MalformedBranchData { index, reason };

  if record.name.trim().is_empty() {
    return Err(malformed("branch name is empty".to_string()));
  }
  // `unknown` is reserved for fallback records
  if record.commit_sha == UNKNOWN_SHA {
    return Err(malformed(format!("commit hash '{UNKNOWN_SHA}' is reserved")));
  }
  if !is_commit_hash(&record.commit_sha) {
    return Err(malformed(format!("commit hash '{}' is not hexadecimal", record.commit_sha)));
  }
  Ok(record)
}

fn is_commit_hash(sha: &str) -> bool {
  !sha.is_empty() && sha.bytes().all(|b| b.is_ascii_hexdigit())
}
