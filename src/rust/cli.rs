use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;

use crate::report::{self, Prediction};
use crate::{versions, ArtifactPaths, Classifier, ClassifierError, InputSpec, Normalization, RuntimeConfig, DEFAULT_LABELS_KEY};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON label map [default: $SPOREPRINT_HOME/mushroom_names.json]
    #[arg(long)]
    pub labels: Option<PathBuf>,

    /// Field of the label map holding the class list
    #[arg(long, default_value = DEFAULT_LABELS_KEY)]
    pub labels_key: String,

    /// ONNX model [default: $SPOREPRINT_HOME/mushroom_model.onnx]
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Image to classify [default: $SPOREPRINT_HOME/1.png]
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// Also list the N most likely classes
    #[arg(short = 'n', long, default_value_t = 1)]
    pub top: usize,

    /// Scale pixel values to [0, 1] before inference
    #[arg(long)]
    pub normalize: bool,

    /// Expected SHA-256 of the model file
    #[arg(long)]
    pub model_sha256: Option<String>,

    /// Threads used within a single operator (0 lets ONNX Runtime decide)
    #[arg(long, default_value_t = 0)]
    pub intra_threads: usize,
}

impl Args {
    pub fn artifact_paths(&self) -> ArtifactPaths {
        let mut paths = ArtifactPaths::new_default();
        if let Some(labels) = &self.labels {
            paths = paths.with_labels(labels);
        }
        if let Some(model) = &self.model {
            paths = paths.with_model(model);
        }
        if let Some(image) = &self.image {
            paths = paths.with_image(image);
        }
        paths
    }

    pub fn input_spec(&self) -> InputSpec {
        let normalization = if self.normalize {
            Normalization::UnitRange
        } else {
            Normalization::None
        };
        InputSpec::default().with_normalization(normalization)
    }
}

/// Loads labels and model, classifies one image and writes the result to `out`.
///
/// Nothing but the version banner is written unless every step succeeds.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<Prediction, ClassifierError> {
    versions::write_banner(out)?;

    let paths = args.artifact_paths();
    if let Some(expected) = &args.model_sha256 {
        paths.verify_model(expected)?;
    }

    let classifier = Classifier::builder()
        .with_runtime_config(RuntimeConfig::default().with_intra_threads(args.intra_threads))
        .with_input_spec(args.input_spec())
        .with_labels_file(&paths.labels, &args.labels_key)?
        .with_model_path(&paths.model)?
        .build()?;

    let scores = classifier.score_image(&paths.image)?.to_vec();
    let prediction = Prediction::from_scores(&scores, classifier.labels())?;
    let ranking = if args.top > 1 {
        Some(report::top_n(&scores, classifier.labels(), args.top)?)
    } else {
        None
    };
    info!("Predicted '{}' (index {})", prediction.label, prediction.index);

    report::write_prediction(out, &prediction)?;
    if let Some(ranking) = ranking {
        report::write_ranking(out, &ranking)?;
    }
    Ok(prediction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["sporeprint"]);
        assert_eq!(args.labels_key, "mushroom_classes");
        assert_eq!(args.top, 1);
        assert!(!args.normalize);
        assert_eq!(args.input_spec(), InputSpec::default());
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "sporeprint", "--image", "cap.jpg", "--model", "m.onnx", "--top", "3", "--normalize",
        ]);
        let paths = args.artifact_paths();
        assert_eq!(paths.image, PathBuf::from("cap.jpg"));
        assert_eq!(paths.model, PathBuf::from("m.onnx"));
        assert!(paths.labels.ends_with("mushroom_names.json"));
        assert_eq!(args.top, 3);
        assert_eq!(args.input_spec().normalization, Normalization::UnitRange);
    }
}
