//! Vector derivation and Φ scoring.
//!
//! All vectors are unit-length under the Euclidean norm; Φ is the squared,
//! clamped dot product of an artefact vector against the field vector, so it
//! always lands in `[0, 1]`. Negative alignment is treated the same as zero
//! alignment: Φ is a one-sided resonance intensity, not a signed correlation.

use crate::error::{CatalogError, Result};
use crate::model::Catalog;
use std::collections::BTreeMap;

/// Divide each coordinate by the Euclidean norm.
///
/// Fails with [`CatalogError::ZeroVector`] when the norm is exactly zero,
/// which guards against all-zero score sets.
pub fn normalize(coords: &[f64]) -> Result<Vec<f64>> {
    let norm_sq: f64 = coords.iter().map(|c| c * c).sum();
    if norm_sq == 0.0 {
        return Err(CatalogError::ZeroVector);
    }
    let norm = norm_sq.sqrt();
    Ok(coords.iter().map(|c| c / norm).collect())
}

/// Convert integer scores in `0..=scale_max` into a unit vector, one
/// coordinate per dimension in `dim_order`. Missing dimensions score 0.
pub fn derive_artefact_vector(
    scores_raw: &BTreeMap<String, u32>,
    dim_order: &[String],
    scale_max: u32,
) -> Result<Vec<f64>> {
    let coords: Vec<f64> = dim_order
        .iter()
        .map(|dim| f64::from(scores_raw.get(dim).copied().unwrap_or(0)) / f64::from(scale_max))
        .collect();
    normalize(&coords)
}

/// Field vector: normalized coordinate-wise sum of the prototype vectors.
pub fn derive_field_vector(catalog: &Catalog, prototype_ids: &[String]) -> Result<Vec<f64>> {
    let dim_count = catalog.dimensions().len();
    let mut vectors = Vec::with_capacity(prototype_ids.len());
    for id in prototype_ids {
        let artefact = catalog
            .artefact(id)
            .ok_or_else(|| CatalogError::UnknownArtefact(id.clone()))?;
        if artefact.vector.len() != dim_count {
            return Err(CatalogError::DimensionMismatch {
                expected: dim_count,
                actual: artefact.vector.len(),
            });
        }
        vectors.push(&artefact.vector);
    }
    if vectors.is_empty() {
        return Err(CatalogError::EmptyPrototypeSet);
    }

    let mut summed = vec![0.0; dim_count];
    for vector in vectors {
        for (acc, c) in summed.iter_mut().zip(vector) {
            *acc += c;
        }
    }
    normalize(&summed)
}

/// Φ of an artefact against the catalog's field: `max(0, dot)^2`, rounded
/// to 4 decimal places.
pub fn compute_phi(catalog: &Catalog, artefact_id: &str) -> Result<f64> {
    let field = catalog.field().ok_or(CatalogError::FieldNotDefined)?;
    let artefact = catalog
        .artefact(artefact_id)
        .ok_or_else(|| CatalogError::UnknownArtefact(artefact_id.to_string()))?;
    if artefact.vector.len() != field.vector.len() {
        return Err(CatalogError::DimensionMismatch {
            expected: field.vector.len(),
            actual: artefact.vector.len(),
        });
    }

    let dot: f64 = artefact
        .vector
        .iter()
        .zip(&field.vector)
        .map(|(a, b)| a * b)
        .sum();
    let amplitude = dot.max(0.0);
    Ok(round4(amplitude * amplitude))
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
