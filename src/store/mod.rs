//! Deterministic on-disk placement for captured proof images.
//!
//! Filenames are `hash(url)[..12]_hash(payload)[..12]_<unix-ts>.jpg` under a
//! per-format subdirectory of the proof root. The timestamp component makes
//! repeat validations of the same (url, payload) pair produce distinct
//! files; no locking is needed for concurrent writers.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::XsProofError;
use crate::utils::hashing::sha256_short;

pub struct ProofStore {
    root: PathBuf,
}

impl ProofStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist encoded proof bytes for a (url, payload) pair. The format
    /// subdirectory is created lazily; creating an existing directory is
    /// not an error.
    pub fn save(
        &self,
        target_url: &str,
        payload: &str,
        encoded: &[u8],
    ) -> Result<PathBuf, XsProofError> {
        let dir = self.root.join("jpg");
        std::fs::create_dir_all(&dir)
            .map_err(|e| XsProofError::Storage(format!("Failed to create {}: {}", dir.display(), e)))?;

        let path = dir.join(proof_filename(target_url, payload, chrono::Utc::now().timestamp()));
        std::fs::write(&path, encoded)
            .map_err(|e| XsProofError::Storage(format!("Failed to write {}: {}", path.display(), e)))?;

        debug!(path = %path.display(), bytes = encoded.len(), "Proof image saved");
        Ok(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Deterministic, collision-resistant proof filename.
pub fn proof_filename(target_url: &str, payload: &str, unix_ts: i64) -> String {
    format!(
        "{}_{}_{}.jpg",
        sha256_short(target_url),
        sha256_short(payload),
        unix_ts
    )
}
