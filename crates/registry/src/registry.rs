use crate::error::Result;
use crate::record::SealedRecord;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// The append-only registry file: newline-delimited JSON, one sealed record
/// per line, in append order. The file is opened in append mode per write
/// and closed immediately after; prior lines are never touched.
#[derive(Debug, Clone)]
pub struct Registry {
    path: PathBuf,
}

impl Registry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the file and parent directories on first
    /// use. This is the only mutation the registry supports.
    pub fn append(&self, record: &SealedRecord) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        log::info!(
            "sealed '{}' into {}",
            record.artefact_id,
            self.path.display()
        );
        Ok(())
    }

    /// Read every record in append order. A registry that does not exist
    /// yet is simply empty.
    pub fn load(&self) -> Result<Vec<SealedRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let data = fs::read_to_string(&self.path)?;
        let mut records = Vec::new();
        for line in data.lines() {
            if line.trim().is_empty() {
                continue;
            }
            records.push(serde_json::from_str(line)?);
        }
        Ok(records)
    }
}
