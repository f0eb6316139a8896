//! Mushroom species identification from a single photo, using a pre-trained
//! ONNX image classifier.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use sporeprint::{ArtifactPaths, Classifier, DEFAULT_LABELS_KEY};
//!
//! let paths = ArtifactPaths::new_default();
//! let classifier = Classifier::builder()
//!     .with_labels_file(&paths.labels, DEFAULT_LABELS_KEY)?
//!     .with_model_path(&paths.model)?
//!     .build()?;
//!
//! let prediction = classifier.classify(&paths.image)?;
//! println!("Predicted class: {}", prediction.label);
//! println!("Confidence: {}", prediction.confidence);
//! # Ok(())
//! # }
//! ```
//!
//! # Preprocessing
//!
//! Images are forced to RGB, resized (not cropped) to 128x128 and passed to
//! the model as raw `0..=255` values in a `(1, 128, 128, 3)` tensor. See
//! [`InputSpec`] to change the size or opt into `[0, 1]` scaling.

pub mod artifacts;
pub mod classifier;
pub mod cli;
pub mod labels;
pub mod preprocess;
pub mod report;
mod runtime;
pub mod versions;

pub use artifacts::ArtifactPaths;
pub use classifier::{Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo};
pub use labels::{LabelMap, DEFAULT_LABELS_KEY};
pub use preprocess::{InputSpec, Normalization};
pub use report::Prediction;
pub use runtime::{RuntimeConfig, create_session_builder};

pub fn init_logger() {
    env_logger::init();
}
