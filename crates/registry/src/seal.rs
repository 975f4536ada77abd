//! Sealing: verify a stamped document against freshly recomputed values and
//! commit an immutable record to the registry.
//!
//! The pipeline is terminal on the first failure and performs exactly one
//! mutation, the registry append, only after every check passes.

use crate::error::{Result, SealError};
use crate::keys;
use crate::record::{unix_now_ms, SealedRecord, WITNESS_PHI_THRESHOLD};
use crate::registry::Registry;
use resonance_catalog::Catalog;
use resonance_document::{decode, digest10, FrontMatter, Scalar, Value};
use std::fs;
use std::path::Path;

/// Absolute tolerance when comparing the stored phi against the recomputed
/// one. Stamped values are rounded to 4 decimal places.
pub const PHI_TOLERANCE: f64 = 1e-4;

/// Run the full sealing pipeline for one document.
///
/// Steps, in order: read and decode the document, check all required
/// metadata fields are present (missing ones are reported together),
/// recompute the body digest, recompute phi from the catalog, and on full
/// agreement append one [`SealedRecord`] to the registry.
pub fn seal_document(
    catalog: &Catalog,
    path: impl AsRef<Path>,
    registry: &Registry,
) -> Result<SealedRecord> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(SealError::DocumentNotFound(path.to_path_buf()));
    }

    let raw = fs::read_to_string(path)?;
    let (metadata, body) = decode(&raw);
    let metadata = metadata.ok_or(SealError::MissingMetadata)?;

    let missing: Vec<String> = keys::REQUIRED
        .iter()
        .filter(|key| !metadata.contains_key(key))
        .map(|key| (*key).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SealError::MissingFields(missing));
    }

    let artefact_id = scalar_string(&metadata, keys::ID)?;
    let session_id = scalar_string(&metadata, keys::SESSION_ID)?;
    let field_id = scalar_string(&metadata, keys::FIELD_ID)?;
    let stored_phi = scalar_number(&metadata, keys::PHI)?;
    let stored_hash = scalar_string(&metadata, keys::HASH10)?;
    let dimension_names = string_list(&metadata, keys::DIMENSION_NAMES)?;
    let kind = metadata
        .get(keys::KIND)
        .and_then(Value::as_scalar)
        .map(ToString::to_string)
        .unwrap_or_else(|| "text".to_string());

    let computed_hash = digest10(body);
    if computed_hash != stored_hash {
        return Err(SealError::IntegrityMismatch {
            stored: stored_hash,
            computed: computed_hash,
        });
    }

    let computed_phi = catalog.phi(&artefact_id)?;
    if (computed_phi - stored_phi).abs() > PHI_TOLERANCE {
        return Err(SealError::ScoreMismatch {
            stored: stored_phi,
            computed: computed_phi,
        });
    }

    let record = SealedRecord {
        artefact_id,
        document_name: path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
        kind,
        session_id,
        field_id,
        phi: stored_phi,
        dimension_names,
        hash10: stored_hash,
        document_path: path.display().to_string(),
        sealed_at_unix_ms: unix_now_ms(),
        is_witness: stored_phi > WITNESS_PHI_THRESHOLD,
        witness_id: None,
    };
    registry.append(&record)?;
    Ok(record)
}

fn scalar_string(metadata: &FrontMatter, key: &'static str) -> Result<String> {
    metadata
        .get(key)
        .and_then(Value::as_scalar)
        .map(ToString::to_string)
        .ok_or_else(|| SealError::InvalidField {
            key,
            reason: "expected a scalar value".to_string(),
        })
}

fn scalar_number(metadata: &FrontMatter, key: &'static str) -> Result<f64> {
    metadata
        .get(key)
        .and_then(Value::as_scalar)
        .and_then(Scalar::as_f64)
        .ok_or_else(|| SealError::InvalidField {
            key,
            reason: "expected a number".to_string(),
        })
}

fn string_list(metadata: &FrontMatter, key: &'static str) -> Result<Vec<String>> {
    metadata
        .get(key)
        .and_then(Value::as_list)
        .map(<[String]>::to_vec)
        .ok_or_else(|| SealError::InvalidField {
            key,
            reason: "expected a list".to_string(),
        })
}
