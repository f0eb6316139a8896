use std::path::PathBuf;

mod error;
#[allow(clippy::module_inception)]
mod classifier;
pub mod builder;

pub use error::ClassifierError;
pub use classifier::Classifier;
pub use builder::ClassifierBuilder;

use crate::InputSpec;

/// Information about the loaded model and its label map
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: PathBuf,
    /// Name of the model input the image tensor is bound to
    pub input_name: String,
    /// Name of the model output read as class scores
    pub output_name: String,
    /// Number of classes in the label map
    pub num_classes: usize,
    /// Labels of the classes, in model output order
    pub class_labels: Vec<String>,
    /// Shape and scaling of the image tensor
    pub input_spec: InputSpec,
}
