use std::cmp::Ordering;
use std::io::{self, Write};

use crate::{ClassifierError, LabelMap};

/// A single class decision taken from the model's score vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub index: usize,
    pub label: String,
    pub confidence: f32,
}

impl Prediction {
    /// Picks the highest scoring class and looks up its label.
    ///
    /// # Errors
    /// - `Prediction` if `scores` is empty or holds only NaN
    /// - `LabelOutOfRange` if the winning index has no label
    pub fn from_scores(scores: &[f32], labels: &LabelMap) -> Result<Self, ClassifierError> {
        let (index, confidence) = argmax(scores).ok_or_else(|| unusable_scores(scores))?;
        Self::at(index, confidence, labels)
    }

    fn at(index: usize, confidence: f32, labels: &LabelMap) -> Result<Self, ClassifierError> {
        let label = labels.get(index).ok_or(ClassifierError::LabelOutOfRange {
            index,
            len: labels.len(),
        })?;
        Ok(Self {
            index,
            label: label.to_string(),
            confidence,
        })
    }
}

fn unusable_scores(scores: &[f32]) -> ClassifierError {
    if scores.is_empty() {
        ClassifierError::Prediction("Model returned no scores".into())
    } else {
        ClassifierError::Prediction(format!("All {} scores returned by the model are NaN", scores.len()))
    }
}

/// Index and value of the largest score. Ties go to the lowest index and NaN never wins.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .fold(None, |best, (i, score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((i, score)),
        })
}

/// The `n` best classes in descending order of confidence.
///
/// `n` is clamped to `[1, labels.len()]`. Scores without a label are left
/// out of the ranking; [`Prediction::from_scores`] reports those.
pub fn top_n(scores: &[f32], labels: &LabelMap, n: usize) -> Result<Vec<Prediction>, ClassifierError> {
    let mut ranked: Vec<(usize, f32)> = scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(i, score)| *i < labels.len() && !score.is_nan())
        .collect();
    if ranked.is_empty() {
        return Err(unusable_scores(scores));
    }
    // Stable sort keeps the lower index first on ties, matching `argmax`.
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    ranked
        .into_iter()
        .take(n.clamp(1, labels.len().max(1)))
        .map(|(index, confidence)| Prediction::at(index, confidence, labels))
        .collect()
}

/// Writes the two result lines. Confidence is widened to `f64` before
/// formatting, so `0.85f32` prints as `0.8500000238418579`.
pub fn write_prediction<W: Write>(out: &mut W, prediction: &Prediction) -> io::Result<()> {
    writeln!(out, "Predicted class: {}", prediction.label)?;
    writeln!(out, "Confidence: {}", f64::from(prediction.confidence))
}

pub fn write_ranking<W: Write>(out: &mut W, ranking: &[Prediction]) -> io::Result<()> {
    writeln!(out, "Top {} predictions:", ranking.len())?;
    for (rank, prediction) in ranking.iter().enumerate() {
        writeln!(out, "  {}. {}: {}", rank + 1, prediction.label, f64::from(prediction.confidence))?;
    }
    Ok(())
}
