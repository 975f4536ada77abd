use crate::error::{CatalogError, Result};
use crate::vector;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named axis of qualitative scoring shared by all artefacts in a catalog.
///
/// Dimensions are immutable once created and their order is significant: it
/// defines the coordinate order of every derived vector.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dimension {
    pub name: String,
    pub label: String,
    pub description: String,
}

/// A registered artefact with raw per-dimension scores and its derived
/// unit vector. `vector` is never set directly; the owning [`Catalog`]
/// re-derives it whenever `scores_raw` or the dimension set changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Artefact {
    pub id: String,
    pub name: String,
    pub kind: String,
    #[serde(default)]
    pub raw_path: Option<String>,
    pub notes: String,
    pub scores_raw: BTreeMap<String, u32>,
    pub vector: Vec<f64>,
}

/// The reference direction in scoring space: the normalized sum of the
/// chosen prototype artefacts' vectors. At most one per catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub prototype_ids: Vec<String>,
    pub vector: Vec<f64>,
}

/// Input for registering an artefact; the derived vector is computed by
/// [`Catalog::add_artefact`].
#[derive(Debug, Clone, Default)]
pub struct ArtefactSpec {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub raw_path: Option<String>,
    pub notes: String,
    pub scores_raw: BTreeMap<String, u32>,
}

/// The project catalog: dimensions, artefacts, and the optional field.
///
/// Fields are private so every mutation goes through an operation that
/// re-derives the dependent vectors; a stale `Artefact::vector` or
/// `Field::vector` cannot persist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    project_name: String,
    scale_max: u32,
    dimensions: Vec<Dimension>,
    artefacts: Vec<Artefact>,
    field: Option<Field>,
}

impl Catalog {
    pub fn new(project_name: impl Into<String>, scale_max: u32) -> Result<Self> {
        if scale_max == 0 {
            return Err(CatalogError::InvalidScaleMax(scale_max));
        }
        Ok(Self {
            project_name: project_name.into(),
            scale_max,
            dimensions: Vec::new(),
            artefacts: Vec::new(),
            field: None,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn scale_max(&self) -> u32 {
        self.scale_max
    }

    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    pub fn artefacts(&self) -> &[Artefact] {
        &self.artefacts
    }

    pub fn field(&self) -> Option<&Field> {
        self.field.as_ref()
    }

    pub fn artefact(&self, id: &str) -> Option<&Artefact> {
        self.artefacts.iter().find(|a| a.id == id)
    }

    #[must_use]
    pub fn dimension_names(&self) -> Vec<String> {
        self.dimensions.iter().map(|d| d.name.clone()).collect()
    }

    /// Append a dimension and re-derive every dependent vector, since the
    /// coordinate count of the whole catalog just changed.
    pub fn add_dimension(&mut self, dimension: Dimension) -> Result<()> {
        if self.dimensions.iter().any(|d| d.name == dimension.name) {
            return Err(CatalogError::DuplicateDimension(dimension.name));
        }
        self.dimensions.push(dimension);
        self.rederive_artefacts()?;
        self.rederive_field()
    }

    /// Register an artefact, deriving its unit vector from the raw scores.
    pub fn add_artefact(&mut self, spec: ArtefactSpec) -> Result<()> {
        if self.artefacts.iter().any(|a| a.id == spec.id) {
            return Err(CatalogError::DuplicateArtefact(spec.id));
        }
        self.validate_scores(&spec.scores_raw)?;

        let dims = self.dimension_names();
        let vector = vector::derive_artefact_vector(&spec.scores_raw, &dims, self.scale_max)?;
        log::debug!("registered artefact '{}' with {} coordinates", spec.id, vector.len());
        self.artefacts.push(Artefact {
            id: spec.id,
            name: spec.name,
            kind: spec.kind,
            raw_path: spec.raw_path,
            notes: spec.notes,
            scores_raw: spec.scores_raw,
            vector,
        });
        Ok(())
    }

    /// Replace an artefact's raw scores and re-derive its vector. If the
    /// artefact is a field prototype, the field vector is refreshed too.
    pub fn update_scores(&mut self, id: &str, scores_raw: BTreeMap<String, u32>) -> Result<()> {
        self.validate_scores(&scores_raw)?;
        let dims = self.dimension_names();
        let vector = vector::derive_artefact_vector(&scores_raw, &dims, self.scale_max)?;

        let artefact = self
            .artefacts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| CatalogError::UnknownArtefact(id.to_string()))?;
        artefact.scores_raw = scores_raw;
        artefact.vector = vector;

        let touches_field = self
            .field
            .as_ref()
            .is_some_and(|f| f.prototype_ids.iter().any(|p| p == id));
        if touches_field {
            self.rederive_field()?;
        }
        Ok(())
    }

    /// Define (or redefine) the field from the given prototype artefacts.
    pub fn define_field(&mut self, prototype_ids: Vec<String>) -> Result<()> {
        let vector = vector::derive_field_vector(self, &prototype_ids)?;
        self.field = Some(Field {
            prototype_ids,
            vector,
        });
        Ok(())
    }

    /// Resonance score of an artefact against the current field.
    pub fn phi(&self, artefact_id: &str) -> Result<f64> {
        vector::compute_phi(self, artefact_id)
    }

    fn validate_scores(&self, scores_raw: &BTreeMap<String, u32>) -> Result<()> {
        for (dim, &score) in scores_raw {
            if score > self.scale_max {
                return Err(CatalogError::ScoreOutOfRange {
                    dimension: dim.clone(),
                    score,
                    scale_max: self.scale_max,
                });
            }
            if !self.dimensions.iter().any(|d| &d.name == dim) {
                log::warn!("score for unknown dimension '{dim}' will be ignored");
            }
        }
        Ok(())
    }

    fn rederive_artefacts(&mut self) -> Result<()> {
        let dims = self.dimension_names();
        let scale_max = self.scale_max;
        for artefact in &mut self.artefacts {
            artefact.vector = vector::derive_artefact_vector(&artefact.scores_raw, &dims, scale_max)?;
        }
        Ok(())
    }

    fn rederive_field(&mut self) -> Result<()> {
        let Some(prototype_ids) = self.field.as_ref().map(|f| f.prototype_ids.clone()) else {
            return Ok(());
        };
        let vector = vector::derive_field_vector(self, &prototype_ids)?;
        self.field = Some(Field {
            prototype_ids,
            vector,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dim(name: &str) -> Dimension {
        Dimension {
            name: name.to_string(),
            label: name.to_string(),
            description: String::new(),
        }
    }

    fn catalog_lae() -> Catalog {
        let mut catalog = Catalog::new("test", 4).expect("valid scale");
        for name in ["L", "A", "E"] {
            catalog.add_dimension(dim(name)).expect("unique dimension");
        }
        catalog
    }

    fn spec(id: &str, scores: &[(&str, u32)]) -> ArtefactSpec {
        ArtefactSpec {
            id: id.to_string(),
            name: id.to_string(),
            kind: "text".to_string(),
            scores_raw: scores
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn scale_max_must_be_positive() {
        assert!(matches!(
            Catalog::new("p", 0),
            Err(CatalogError::InvalidScaleMax(0))
        ));
    }

    #[test]
    fn duplicate_dimension_rejected() {
        let mut catalog = catalog_lae();
        let err = catalog.add_dimension(dim("L")).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateDimension(name) if name == "L"));
    }

    #[test]
    fn duplicate_artefact_rejected() {
        let mut catalog = catalog_lae();
        catalog.add_artefact(spec("e1", &[("L", 4)])).unwrap();
        let err = catalog.add_artefact(spec("e1", &[("L", 2)])).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateArtefact(id) if id == "e1"));
    }

    #[test]
    fn score_above_scale_max_rejected() {
        let mut catalog = catalog_lae();
        let err = catalog.add_artefact(spec("e1", &[("L", 5)])).unwrap_err();
        assert!(matches!(err, CatalogError::ScoreOutOfRange { score: 5, .. }));
    }

    #[test]
    fn adding_dimension_rederives_artefact_vectors() {
        let mut catalog = catalog_lae();
        catalog.add_artefact(spec("e1", &[("L", 4)])).unwrap();
        assert_eq!(catalog.artefact("e1").unwrap().vector.len(), 3);

        catalog.add_dimension(dim("R")).unwrap();
        let artefact = catalog.artefact("e1").unwrap();
        assert_eq!(artefact.vector.len(), 4);
        assert_eq!(artefact.vector, vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn updating_prototype_scores_refreshes_field() {
        let mut catalog = catalog_lae();
        catalog.add_artefact(spec("e1", &[("L", 4)])).unwrap();
        catalog.define_field(vec!["e1".to_string()]).unwrap();
        assert_eq!(catalog.field().unwrap().vector, vec![1.0, 0.0, 0.0]);

        catalog
            .update_scores("e1", [("A".to_string(), 4u32)].into_iter().collect())
            .unwrap();
        assert_eq!(catalog.field().unwrap().vector, vec![0.0, 1.0, 0.0]);
    }

    #[test]
    fn update_scores_unknown_artefact_fails() {
        let mut catalog = catalog_lae();
        let err = catalog
            .update_scores("missing", [("L".to_string(), 1u32)].into_iter().collect())
            .unwrap_err();
        assert!(matches!(err, CatalogError::UnknownArtefact(id) if id == "missing"));
    }
}
