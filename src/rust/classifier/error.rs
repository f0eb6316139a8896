use ort::Error as OrtError;
use std::io;

/// Represents the different types of errors that can occur while classifying an image.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// The label map could not be read or did not contain the expected list
    #[error("Label error: {0}")]
    Labels(String),
    /// Error occurred while loading or validating the ONNX model
    #[error("Model error: {0}")]
    Model(String),
    /// The input image was missing or could not be decoded
    #[error("Image error: {0}")]
    Image(String),
    /// Error occurred while running inference or reading its output
    #[error("Prediction error: {0}")]
    Prediction(String),
    /// The model produced a class index with no matching label
    #[error("Predicted index {index} is out of range for {len} labels")]
    LabelOutOfRange { index: usize, len: usize },
    #[error("Hash mismatch for {path}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        path: String,
        expected: String,
        actual: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The ONNX Runtime environment could not be initialised
    #[error("Runtime error: {0}")]
    Runtime(String),
}

impl From<OrtError> for ClassifierError {
    fn from(err: OrtError) -> Self {
        ClassifierError::Model(err.to_string())
    }
}
