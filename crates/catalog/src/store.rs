use crate::error::{CatalogError, Result};
use crate::model::Catalog;
use std::fs;
use std::path::Path;

/// Load the catalog file, failing with [`CatalogError::Missing`] when it
/// does not exist (initialize one with the interactive manager first).
pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogError::Missing(path.to_path_buf()));
    }
    let data = fs::read_to_string(path)?;
    let catalog = serde_json::from_str(&data)?;
    log::debug!("loaded catalog from {}", path.display());
    Ok(catalog)
}

/// Persist the whole catalog as pretty-printed JSON, creating parent
/// directories as needed.
pub fn save(catalog: &Catalog, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_json::to_string_pretty(catalog)?;
    fs::write(path, data)?;
    log::debug!("saved catalog to {}", path.display());
    Ok(())
}
