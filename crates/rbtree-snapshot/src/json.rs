//! Thin JSON adapter over the serde derives.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SnapshotError;
use crate::types::Snapshot;

/// Renders a snapshot into its textual JSON shape.
pub fn to_json<K, V>(snapshot: &Snapshot<K, V>) -> Result<String, SnapshotError>
where
    K: Serialize,
    V: Serialize,
{
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parses a snapshot from JSON text.  Unknown colors and malformed node
/// references are rejected here; structural validity is only checked by
/// [`crate::restore`].
pub fn from_json<K, V>(text: &str) -> Result<Snapshot<K, V>, SnapshotError>
where
    K: DeserializeOwned,
    V: DeserializeOwned,
{
    Ok(serde_json::from_str(text)?)
}
