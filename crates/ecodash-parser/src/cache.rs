use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::dataset::{parse_with_hash, EmissionsDataset};
use crate::errors::ParserError;

/// Memoizes dataset loads per path.
///
/// The file is re-read on every call so an edited file is noticed, but it is only re-parsed
/// when its blake3 content hash differs from the cached copy.
#[derive(Debug, Default)]
pub struct DatasetCache {
    entries: HashMap<PathBuf, Arc<EmissionsDataset>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<EmissionsDataset>, ParserError> {
        let bytes = fs::read(path).map_err(|source| ParserError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let hash = blake3::hash(&bytes).to_hex().to_string();

        if let Some(existing) = self.entries.get(path) {
            if existing.content_hash == hash {
                debug!(path = %path.display(), "Dataset cache hit");
                return Ok(Arc::clone(existing));
            }
        }

        let dataset = Arc::new(parse_with_hash(&bytes, hash)?);
        info!(
            path = %path.display(),
            rows = dataset.height(),
            hash = %dataset.content_hash,
            "Loaded emissions dataset"
        );
        self.entries
            .insert(path.to_path_buf(), Arc::clone(&dataset));
        Ok(dataset)
    }

    pub fn invalidate(&mut self, path: &Path) -> bool {
        self.entries.remove(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
