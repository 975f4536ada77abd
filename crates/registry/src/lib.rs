//! The append-only registry and the two pipelines that feed it: stamping
//! (embed computed values into a document) and sealing (verify a stamped
//! document and commit an immutable record).

pub mod error;
pub mod keys;
pub mod record;
pub mod registry;
pub mod seal;
pub mod stamp;

pub use error::{Result, SealError};
pub use record::{SealedRecord, WITNESS_PHI_THRESHOLD};
pub use registry::Registry;
pub use seal::{seal_document, PHI_TOLERANCE};
pub use stamp::{stamp_document, StampOutcome, StampRequest};
