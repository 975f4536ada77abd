//! Catalog of scored artefacts and the vector model behind Φ.
//!
//! A catalog owns an ordered set of dimensions, the artefacts scored along
//! them, and at most one field (the reference direction derived from chosen
//! prototype artefacts). All derived vectors are kept in sync by the
//! catalog's mutators; the vector math itself lives in [`vector`].

pub mod error;
pub mod model;
pub mod store;
pub mod vector;

pub use error::{CatalogError, Result};
pub use model::{Artefact, ArtefactSpec, Catalog, Dimension, Field};
pub use vector::{compute_phi, derive_artefact_vector, derive_field_vector, normalize};
