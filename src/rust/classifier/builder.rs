use std::path::{Path, PathBuf};
use std::sync::Arc;
use ort::session::Session;
use log::{info, error};

use super::error::ClassifierError;
use super::classifier::Classifier;
use crate::{InputSpec, LabelMap, runtime::{RuntimeConfig, create_session_builder}};

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    model_path: Option<PathBuf>,
    session: Option<Session>,
    labels: Option<LabelMap>,
    input_spec: InputSpec,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    ///
    /// # Example
    /// ```
    /// use sporeprint::ClassifierBuilder;
    ///
    /// let builder = ClassifierBuilder::new();
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the runtime configuration for ONNX model execution.
    ///
    /// Must be called before [`ClassifierBuilder::with_model_path`] to take effect.
    ///
    /// # Example
    /// ```
    /// use sporeprint::{ClassifierBuilder, RuntimeConfig};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_runtime_config(RuntimeConfig::default().with_intra_threads(2));
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the size and scaling of the image tensor fed to the model
    pub fn with_input_spec(mut self, spec: InputSpec) -> Self {
        self.input_spec = spec;
        self
    }

    pub fn with_labels(mut self, labels: LabelMap) -> Self {
        self.labels = Some(labels);
        self
    }

    /// Loads the label map from a JSON file, reading the list stored under `key`
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), sporeprint::ClassifierError> {
    /// use sporeprint::{ClassifierBuilder, DEFAULT_LABELS_KEY};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_labels_file("mushroom_names.json", DEFAULT_LABELS_KEY)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_labels_file<P: AsRef<Path>>(self, path: P, key: &str) -> Result<Self, ClassifierError> {
        let labels = LabelMap::from_file(path, key)?;
        Ok(self.with_labels(labels))
    }

    /// Loads the ONNX model at `model_path`
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful, or an error if:
    ///   - The path is empty or a model is already loaded
    ///   - The file does not exist
    ///   - ONNX Runtime cannot load the model
    ///   - The model has no inputs or no outputs
    pub fn with_model_path<P: AsRef<Path>>(mut self, model_path: P) -> Result<Self, ClassifierError> {
        let model_path = model_path.as_ref();
        if model_path.as_os_str().is_empty() {
            return Err(ClassifierError::Model("Model path cannot be empty".to_string()));
        }
        if self.model_path.is_some() {
            return Err(ClassifierError::Model("Model path already set".to_string()));
        }
        if !model_path.exists() {
            return Err(ClassifierError::Model(format!("Model file not found: {}", model_path.display())));
        }

        info!("Loading model from {:?}", model_path);
        let session = create_session_builder(&self.runtime_config)?
            .commit_from_file(model_path)
            .map_err(|e| {
                error!("Failed to load model: {}", e);
                ClassifierError::Model(format!("Failed to load {}: {}", model_path.display(), e))
            })?;

        Self::validate_model(&session)?;
        info!("Model structure validated successfully");

        self.model_path = Some(model_path.to_path_buf());
        self.session = Some(session);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier if successful, or an error if:
    ///   - No model has been loaded
    ///   - No labels have been set, or the label list is empty
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), sporeprint::ClassifierError> {
    /// use sporeprint::{ClassifierBuilder, DEFAULT_LABELS_KEY};
    ///
    /// let classifier = ClassifierBuilder::new()
    ///     .with_labels_file("mushroom_names.json", DEFAULT_LABELS_KEY)?
    ///     .with_model_path("mushroom_model.onnx")?
    ///     .build()?;
    /// let prediction = classifier.classify("1.png")?;
    /// println!("{}", prediction.label);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(mut self) -> Result<Classifier, ClassifierError> {
        let labels = self.labels.take()
            .ok_or_else(|| ClassifierError::Labels("Labels must be set".to_string()))?;
        if labels.is_empty() {
            return Err(ClassifierError::Labels("Label list cannot be empty".to_string()));
        }
        let session = self.session.take()
            .ok_or_else(|| ClassifierError::Model("No ONNX model loaded".to_string()))?;
        let model_path = self.model_path.take()
            .ok_or_else(|| ClassifierError::Model("Model path must be set".to_string()))?;

        Ok(Classifier {
            model_path,
            session: Arc::new(session),
            labels: Arc::new(labels),
            input_spec: self.input_spec,
        })
    }

    /// Validates that the model has at least one input and one output
    fn validate_model(session: &Session) -> Result<(), ClassifierError> {
        if session.inputs.is_empty() {
            return Err(ClassifierError::Model(
                "Model must have at least 1 input for the image tensor".to_string()
            ));
        }
        if session.outputs.is_empty() {
            return Err(ClassifierError::Model(
                "Model must have at least 1 output for class scores".to_string()
            ));
        }
        Ok(())
    }
}
