//! Golden payloads for each provider, each carrying one malformed element.

use std::fs;
use std::path::PathBuf;

use bough_core::{BranchRecord, ErrorKind, ProviderKind};
use bough_providers::normalize_branches;
use serde_json::Value;

fn fixture(name: &str) -> anyhow::Result<String> {
  let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
  Ok(fs::read_to_string(path)?)
}

fn load(kind: ProviderKind) -> anyhow::Result<(Value, Vec<BranchRecord>)> {
  let payload = serde_json::from_str(&fixture(&format!("{kind}_branches.json"))?)?;
  let expected = serde_json::from_str(&fixture(&format!("{kind}_expected.json"))?)?;
  Ok((payload, expected))
}

#[test]
fn test_golden_lenient() -> anyhow::Result<()> {
  for kind in ProviderKind::ALL {
    let (payload, expected) = load(kind)?;
    let records = normalize_branches(kind, &payload, false)?;
    assert_eq!(records, expected, "{kind} normalization drifted");
  }
  Ok(())
}

#[test]
fn test_golden_strict_rejects_malformed_element() -> anyhow::Result<()> {
  for kind in ProviderKind::ALL {
    let (payload, _) = load(kind)?;
    let err = normalize_branches(kind, &payload, true).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedBranchData, "{kind}");
  }
  Ok(())
}
