use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    /// A parent/left/right reference names a key with no node entry.
    #[error("snapshot references unknown key {0}")]
    UnknownKey(String),

    /// Two node entries carry the same key.
    #[error("snapshot contains key {0} more than once")]
    DuplicateKey(String),

    /// The node table does not describe a valid tree: count mismatch,
    /// multiple roots, links disagreeing with the structure, or a
    /// red-black invariant violation in the recorded colors.
    #[error("snapshot is corrupt: {0}")]
    Corrupt(String),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
