//! Render context shared by every template of a run.

use crate::bindings::Bindings;
use crate::constants::context_keys::{CURRENT_SHA, DEPLOYMENT_ID};
use sha2::{Digest, Sha256};

/// Number of characters of the revision kept in `deployment_id`.
const SHA_PREFIX_LEN: usize = 8;

/// Bindings plus the implicit `current_sha` and `deployment_id` values.
///
/// Built once per run and read-only afterwards.
#[derive(Debug, Clone)]
pub struct RenderContext {
    current_sha: String,
    deployment_id: String,
    value: serde_json::Value,
}

impl RenderContext {
    /// Builds the context. A missing revision becomes the empty string.
    /// Bindings named like an implicit value are overridden by it.
    pub fn new(bindings: Bindings, current_sha: Option<String>) -> Self {
        let current_sha = current_sha.unwrap_or_default();
        let deployment_id = deployment_id(&current_sha);

        let mut map: serde_json::Map<String, serde_json::Value> = bindings.into_iter().collect();
        map.insert(CURRENT_SHA.to_string(), current_sha.clone().into());
        map.insert(DEPLOYMENT_ID.to_string(), deployment_id.clone().into());

        Self { current_sha, deployment_id, value: serde_json::Value::Object(map) }
    }

    pub fn current_sha(&self) -> &str {
        &self.current_sha
    }

    pub fn deployment_id(&self) -> &str {
        &self.deployment_id
    }

    /// The context as handed to the template engine.
    pub fn as_value(&self) -> &serde_json::Value {
        &self.value
    }
}

/// `<first 8 chars of sha>-<8 hex chars>` unique per run, or empty when no
/// revision was given.
fn deployment_id(current_sha: &str) -> String {
    if current_sha.is_empty() {
        return String::new();
    }
    let prefix: String = current_sha.chars().take(SHA_PREFIX_LEN).collect();
    let now = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    let digest = Sha256::digest(format!("{current_sha}:{now}").as_bytes());
    let suffix = hex::encode(&digest[..4]);
    format!("{prefix}-{suffix}")
}
