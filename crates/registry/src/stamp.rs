//! Stamping: compute Φ and the body digest for a document and embed them
//! in its front matter, rewriting the file in place. The output is exactly
//! what the sealing pipeline consumes.

use crate::error::{Result, SealError};
use crate::keys;
use crate::record::unix_now_ms;
use resonance_catalog::Catalog;
use resonance_document::{compose, decode, digest10, Value};
use std::fs;
use std::path::Path;

/// Identifying fields merged into the document's metadata.
#[derive(Debug, Clone)]
pub struct StampRequest {
    pub artefact_id: String,
    pub session_id: String,
    pub field_id: String,
    pub kind: String,
}

/// What was written into the document.
#[derive(Debug, Clone, PartialEq)]
pub struct StampOutcome {
    pub phi: f64,
    pub hash10: String,
}

/// Stamp a document: decode any existing front matter (a bare document is
/// an empty map), merge the freshly computed fields plus a digest of the
/// current body, and rewrite the file with the body preserved verbatim.
pub fn stamp_document(
    catalog: &Catalog,
    path: impl AsRef<Path>,
    request: &StampRequest,
) -> Result<StampOutcome> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SealError::DocumentNotFound(path.to_path_buf()));
    }

    let phi = catalog.phi(&request.artefact_id)?;
    let raw = fs::read_to_string(path)?;
    let (metadata, body) = decode(&raw);
    let mut metadata = metadata.unwrap_or_default();

    metadata.set(keys::ID, Value::str(&request.artefact_id));
    metadata.set(keys::SESSION_ID, Value::str(&request.session_id));
    metadata.set(keys::FIELD_ID, Value::str(&request.field_id));
    metadata.set(keys::PHI, Value::float(phi));
    metadata.set(keys::DIMENSION_NAMES, Value::list(catalog.dimension_names()));
    metadata.set(keys::KIND, Value::str(&request.kind));
    metadata.set(
        keys::STAMPED_AT,
        Value::int(i64::try_from(unix_now_ms()).unwrap_or(i64::MAX)),
    );

    // Digest the body as a later decode will see it: compose() inserts a
    // newline in front of a flush body, and that newline is part of what
    // the sealer hashes.
    let sealed_body = if !body.is_empty() && !body.starts_with('\n') {
        format!("\n{body}")
    } else {
        body.to_string()
    };
    let hash10 = digest10(&sealed_body);
    metadata.set(keys::HASH10, Value::str(hash10.clone()));

    fs::write(path, compose(&metadata, body))?;
    log::info!(
        "stamped {} (id={}, phi={phi})",
        path.display(),
        request.artefact_id
    );
    Ok(StampOutcome { phi, hash10 })
}
