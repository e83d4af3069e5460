//! Per-question `.npy` array files (one file per question id).

pub mod error;

#[cfg(test)]
mod tests;

pub use error::{StorageError, StorageResult};

use std::fs;
use std::path::{Path, PathBuf};

use candle_core::Tensor;
use tracing::debug;

use crate::constants::{EMBEDDING_FILE_EXTENSION, TEMP_FILE_EXTENSION};
use crate::dataset::QuestionId;

#[derive(Debug, Clone)]
/// Saves and loads `(sequence_len, embedding_dim)` arrays under a root directory.
pub struct EmbeddingStore {
    root: PathBuf,
}

impl EmbeddingStore {
    /// Creates a store rooted at `root`. Nothing is touched on disk until the first save.
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Ensures the root directory exists.
    pub fn ensure_root(&self) -> StorageResult<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(|source| StorageError::StorageUnavailable {
                path: self.root.clone(),
                source,
            })?;
        }
        Ok(())
    }

    /// Final path of the array for `id`: `<root>/<id>.npy`.
    pub fn path_for(&self, id: &QuestionId) -> PathBuf {
        self.root
            .join(format!("{}.{}", id, EMBEDDING_FILE_EXTENSION))
    }

    fn temp_path_for(&self, id: &QuestionId) -> PathBuf {
        self.root.join(format!("{}.{}", id, TEMP_FILE_EXTENSION))
    }

    /// Returns `true` if an array has been saved for `id`.
    pub fn exists(&self, id: &QuestionId) -> bool {
        self.path_for(id).is_file()
    }

    /// Writes `embedding` for `id`, replacing any previous file. Returns the final path.
    ///
    /// The array is written to a temp file and renamed into place.
    pub fn save(&self, id: &QuestionId, embedding: &Tensor) -> StorageResult<PathBuf> {
        let dims = embedding.dims();
        if dims.len() != 2 {
            return Err(StorageError::UnexpectedShape {
                path: self.path_for(id),
                dims: dims.to_vec(),
            });
        }

        self.ensure_root()?;

        let temp_path = self.temp_path_for(id);
        let final_path = self.path_for(id);

        if let Err(e) = embedding.write_npy(&temp_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Npy {
                path: temp_path,
                reason: e.to_string(),
            });
        }

        if let Err(e) = fs::rename(&temp_path, &final_path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StorageError::Io(e));
        }

        debug!(
            path = %final_path.display(),
            rows = dims[0],
            cols = dims[1],
            "Saved embedding array"
        );

        Ok(final_path)
    }

    /// Loads the array saved for `id`.
    pub fn load(&self, id: &QuestionId) -> StorageResult<Tensor> {
        let path = self.path_for(id);

        if !path.is_file() {
            return Err(StorageError::NotFound { path });
        }

        Tensor::read_npy(&path).map_err(|e| StorageError::Npy {
            path,
            reason: e.to_string(),
        })
    }

    /// Loads the array for `id` and returns its `(sequence_len, embedding_dim)` shape.
    pub fn shape_of(&self, id: &QuestionId) -> StorageResult<(usize, usize)> {
        let tensor = self.load(id)?;
        match *tensor.dims() {
            [rows, cols] => Ok((rows, cols)),
            ref dims => Err(StorageError::UnexpectedShape {
                path: self.path_for(id),
                dims: dims.to_vec(),
            }),
        }
    }

    /// Sequence length (first dimension) of the array saved for `id`.
    pub fn sequence_len(&self, id: &QuestionId) -> StorageResult<usize> {
        self.shape_of(id).map(|(rows, _)| rows)
    }
}
