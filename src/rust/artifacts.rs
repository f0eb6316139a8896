use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};

use crate::ClassifierError;

pub const LABELS_FILE: &str = "mushroom_names.json";
pub const MODEL_FILE: &str = "mushroom_model.onnx";
pub const IMAGE_FILE: &str = "1.png";

/// Environment variable overriding the directory the default artifacts are read from.
pub const HOME_ENV: &str = "SPOREPRINT_HOME";

/// Locations of the label map, model and input image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub labels: PathBuf,
    pub model: PathBuf,
    pub image: PathBuf,
}

impl ArtifactPaths {
    /// Resolves the default file names under [`ArtifactPaths::default_root`]
    pub fn new_default() -> Self {
        Self::in_dir(Self::default_root())
    }

    /// Returns the directory holding the default artifacts
    pub fn default_root() -> PathBuf {
        // 1. Check environment variable
        if let Ok(path) = env::var(HOME_ENV) {
            return PathBuf::from(path);
        }

        // 2. Paths are relative to wherever the binary is started from
        PathBuf::from(".")
    }

    pub fn in_dir<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref();
        Self {
            labels: root.join(LABELS_FILE),
            model: root.join(MODEL_FILE),
            image: root.join(IMAGE_FILE),
        }
    }

    pub fn with_labels(mut self, path: impl Into<PathBuf>) -> Self {
        self.labels = path.into();
        self
    }

    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model = path.into();
        self
    }

    pub fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image = path.into();
        self
    }

    /// Checks the model file against an expected SHA-256 hex digest.
    pub fn verify_model(&self, expected_hash: &str) -> Result<(), ClassifierError> {
        verify_file(&self.model, expected_hash)
    }
}

pub fn sha256_hex(path: &Path) -> Result<String, ClassifierError> {
    let bytes = fs::read(path)?;
    log::info!("Read {} bytes from {:?}", bytes.len(), path);
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}

fn verify_file(path: &Path, expected_hash: &str) -> Result<(), ClassifierError> {
    log::info!("Verifying file: {:?}", path);
    let hash = sha256_hex(path)?;
    log::info!("Calculated hash: {}", hash);
    log::info!("Expected hash:   {}", expected_hash);

    if !hash.eq_ignore_ascii_case(expected_hash.trim()) {
        log::error!("Hash mismatch for {:?}", path);
        return Err(ClassifierError::ChecksumMismatch {
            path: path.display().to_string(),
            expected: expected_hash.to_string(),
            actual: hash,
        });
    }
    Ok(())
}
