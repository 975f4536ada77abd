use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Records with a phi above this are flagged as witnesses: near-canonical
/// to the field.
pub const WITNESS_PHI_THRESHOLD: f64 = 0.95;

/// One immutable entry of the append-only registry. Created only by the
/// sealing pipeline; never rewritten or removed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SealedRecord {
    pub artefact_id: String,
    pub document_name: String,
    pub kind: String,
    pub session_id: String,
    pub field_id: String,
    pub phi: f64,
    pub dimension_names: Vec<String>,
    pub hash10: String,
    pub document_path: String,
    pub sealed_at_unix_ms: u64,
    pub is_witness: bool,
    /// Reserved for manual later assignment; nothing populates it here.
    pub witness_id: Option<String>,
}

pub(crate) fn unix_now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}
