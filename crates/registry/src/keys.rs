//! Metadata keys shared by the stamping and sealing pipelines.

pub const ID: &str = "id";
pub const SESSION_ID: &str = "session_id";
pub const FIELD_ID: &str = "field_id";
pub const PHI: &str = "phi";
pub const DIMENSION_NAMES: &str = "dimension_names";
pub const HASH10: &str = "hash10";
pub const KIND: &str = "kind";
pub const STAMPED_AT: &str = "stamped_at";

/// Keys a document must carry before it can be sealed.
pub const REQUIRED: [&str; 6] = [ID, SESSION_ID, FIELD_ID, PHI, DIMENSION_NAMES, HASH10];
