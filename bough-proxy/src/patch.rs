//! # Model Document Patching
//!
//! The only rewrite the proxy performs on an upstream document.

use serde_json::{Value, json};

/// Provider entry that must offer [`REQUIRED_MODEL_ID`].
pub const IFLOW_PROVIDER_ID: &str = "iflow";
/// Model guaranteed to be present for the `iflow` provider.
pub const REQUIRED_MODEL_ID: &str = "qwen3-coder-plus";

/// Prepend `qwen3-coder-plus` to the `iflow` provider's models if missing.
///
/// A missing `models` field counts as an empty list. Documents without an
/// `iflow` provider are left untouched. Returns whether the document changed.
pub fn ensure_iflow_model(document: &mut Value) -> bool {
  let Some(provider) = document
    .get_mut("providers")
    .and_then(Value::as_array_mut)
    .and_then(|providers| {
      providers
        .iter_mut()
        .find(|p| p.get("id").and_then(Value::as_str) == Some(IFLOW_PROVIDER_ID))
    })
  else {
    return false;
  };

  let Some(provider) = provider.as_object_mut() else {
    return false;
  };

  let models = provider
    .entry("models")
    .or_insert_with(|| Value::Array(Vec::new()));
  // `null` or any other non-list value counts as no models
  if !models.is_array() {
    *models = Value::Array(Vec::new());
  }
  let Some(models) = models.as_array_mut() else {
    return false;
  };

  if models
    .iter()
    .any(|m| m.get("id").and_then(Value::as_str) == Some(REQUIRED_MODEL_ID))
  {
    return false;
  }
  models.insert(0, json!({ "id": REQUIRED_MODEL_ID, "name": REQUIRED_MODEL_ID }));
  true
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_prepends_missing_model() {
    let mut doc = json!({
        "providers": [
            { "id": "openai", "models": [ { "id": "gpt-4o", "name": "GPT-4o" } ] },
            { "id": "iflow", "models": [ { "id": "kimi-k2", "name": "Kimi K2" } ] }
        ]
    });

    assert!(ensure_iflow_model(&mut doc));
    assert_eq!(
      doc["providers"][1]["models"],
      json!([
          { "id": "qwen3-coder-plus", "name": "qwen3-coder-plus" },
          { "id": "kimi-k2", "name": "Kimi K2" }
      ])
    );
    assert_eq!(doc["providers"][0]["models"].as_array().unwrap().len(), 1);
  }

  #[test]
  fn test_present_model_is_untouched() {
    let mut doc = json!({
        "providers": [
            { "id": "iflow", "models": [ { "id": "glm-4.5" }, { "id": "qwen3-coder-plus", "name": "Qwen3 Coder Plus" } ] }
        ]
    });
    let before = doc.clone();

    assert!(!ensure_iflow_model(&mut doc));
    assert_eq!(doc, before);
  }

  #[test]
  fn test_missing_models_field() {
    let mut doc = json!({ "providers": [ { "id": "iflow", "name": "iFlow" } ] });
    assert!(ensure_iflow_model(&mut doc));
    assert_eq!(
      doc["providers"][0]["models"],
      json!([ { "id": "qwen3-coder-plus", "name": "qwen3-coder-plus" } ])
    );
    assert_eq!(doc["providers"][0]["name"], "iFlow");
  }

  #[test]
  fn test_no_iflow_provider() {
    let mut doc = json!({ "providers": [ { "id": "anthropic", "models": [] } ], "default": "anthropic" });
    let before = doc.clone();
    assert!(!ensure_iflow_model(&mut doc));
    assert_eq!(doc, before);

    let mut doc = json!({ "version": 2 });
    assert!(!ensure_iflow_model(&mut doc));
    assert!(!ensure_iflow_model(&mut json!([])));
  }
}
