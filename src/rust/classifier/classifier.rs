use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use ort::session::Session;
use ort::value::Tensor;
use ndarray::{Array1, Array4, Axis};
use log::{info, warn};

use super::error::ClassifierError;
use crate::preprocess::load_image_tensor;
use crate::report::{top_n, Prediction};
use crate::{InputSpec, LabelMap};

/// An image classifier backed by an ONNX model and an ordered label map.
///
/// The model is expected to:
/// - Accept a single `f32` input of shape `[1, height, width, 3]`
/// - Output class scores of shape `[1, num_classes]` (or `[num_classes]`)
/// - Order its outputs the same way as the label map
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use sporeprint::{Classifier, DEFAULT_LABELS_KEY};
///
/// let classifier = Classifier::builder()
///     .with_labels_file("mushroom_names.json", DEFAULT_LABELS_KEY)?
///     .with_model_path("mushroom_model.onnx")?
///     .build()?;
///
/// let prediction = classifier.classify("1.png")?;
/// println!("Predicted class: {}", prediction.label);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Classifier {
    pub model_path: PathBuf,
    pub session: Arc<Session>,
    pub labels: Arc<LabelMap>,
    pub input_spec: InputSpec,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the loaded model and labels
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            input_name: self.session.inputs.first().map(|input| input.name.clone()).unwrap_or_default(),
            output_name: self.session.outputs.first().map(|output| output.name.clone()).unwrap_or_default(),
            num_classes: self.labels.len(),
            class_labels: self.labels.as_slice().to_vec(),
            input_spec: self.input_spec,
        }
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Runs the model on a preprocessed `(1, height, width, 3)` tensor and
    /// returns the scores of the first batch row.
    ///
    /// # Errors
    /// - `Prediction` if the tensor cannot be handed to ONNX Runtime
    /// - `Prediction` if the model rejects the input (e.g. shape mismatch)
    /// - `Prediction` if the first output is not an `f32` tensor
    pub fn predict_scores(&self, tensor: &Array4<f32>) -> Result<Array1<f32>, ClassifierError> {
        let input_name = self.session.inputs.first()
            .map(|input| input.name.clone())
            .ok_or_else(|| ClassifierError::Model("Model has no inputs".into()))?;

        let mut input_tensors = HashMap::new();
        input_tensors.insert(input_name, Tensor::from_array(tensor.clone())
            .map_err(|e| ClassifierError::Prediction(format!("Failed to create input tensor: {}", e)))?);

        let outputs = self.session.run(input_tensors)
            .map_err(|e| ClassifierError::Prediction(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>()
            .map_err(|e| ClassifierError::Prediction(format!("Failed to extract output tensor: {}", e)))?;

        let scores = match output_tensor.ndim() {
            0 => return Err(ClassifierError::Prediction("Model returned a scalar output".into())),
            1 => output_tensor.iter().copied().collect(),
            _ => output_tensor.index_axis(Axis(0), 0).iter().copied().collect(),
        };
        Ok(scores)
    }

    /// Preprocesses the image at `path` and returns the raw class scores
    pub fn score_image<P: AsRef<Path>>(&self, path: P) -> Result<Array1<f32>, ClassifierError> {
        let tensor = load_image_tensor(path, &self.input_spec)?;
        info!("Running inference on tensor of shape {:?}", tensor.shape());
        let scores = self.predict_scores(&tensor)?;

        if scores.len() != self.labels.len() {
            warn!(
                "Model returned {} scores but {} labels are loaded",
                scores.len(),
                self.labels.len()
            );
        }
        Ok(scores)
    }

    /// Classifies the image at `path`, returning the most likely class
    pub fn classify<P: AsRef<Path>>(&self, path: P) -> Result<Prediction, ClassifierError> {
        let scores = self.score_image(path)?.to_vec();
        Prediction::from_scores(&scores, &self.labels)
    }

    /// Classifies the image at `path`, returning the `n` most likely classes
    pub fn rank<P: AsRef<Path>>(&self, path: P, n: usize) -> Result<Vec<Prediction>, ClassifierError> {
        let scores = self.score_image(path)?.to_vec();
        top_n(&scores, &self.labels, n)
    }
}
