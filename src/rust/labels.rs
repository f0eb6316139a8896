use std::fs;
use std::ops::Index;
use std::path::Path;

use log::info;
use serde_json::Value;

use crate::ClassifierError;

/// Key holding the class list in the bundled label file.
pub const DEFAULT_LABELS_KEY: &str = "mushroom_classes";

/// Ordered class names. Position `i` names output `i` of the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    labels: Vec<String>,
}

impl LabelMap {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    /// Reads a JSON object from `path` and returns the string array stored under `key`.
    ///
    /// # Errors
    /// - `Labels` if the file cannot be read
    /// - `Labels` if the contents are not valid JSON
    /// - `Labels` if `key` is absent or does not hold an array of strings
    pub fn from_file<P: AsRef<Path>>(path: P, key: &str) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        info!("Loading labels from {:?} (key: {})", path, key);
        let text = fs::read_to_string(path).map_err(|e| {
            ClassifierError::Labels(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let labels = Self::from_json_str(&text, key)?;
        info!("Loaded {} labels", labels.len());
        Ok(labels)
    }

    pub fn from_json_str(text: &str, key: &str) -> Result<Self, ClassifierError> {
        let root: Value = serde_json::from_str(text)
            .map_err(|e| ClassifierError::Labels(format!("Malformed label file: {}", e)))?;

        let entries = root
            .get(key)
            .ok_or_else(|| ClassifierError::Labels(format!("Missing field '{}'", key)))?
            .as_array()
            .ok_or_else(|| ClassifierError::Labels(format!("Field '{}' is not a list", key)))?;

        let labels = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                entry.as_str().map(str::to_owned).ok_or_else(|| {
                    ClassifierError::Labels(format!("Entry {} of '{}' is not a string", i, key))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}

impl Index<usize> for LabelMap {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.labels[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_classes_in_order() {
        let labels = LabelMap::from_json_str(r#"{"mushroom_classes": ["a","b","c"]}"#, DEFAULT_LABELS_KEY)
            .unwrap();
        assert_eq!(labels.as_slice(), &["a", "b", "c"]);
        assert_eq!(&labels[1], "b");
    }

    #[test]
    fn test_ignores_other_fields() {
        let text = r#"{"version": 2, "mushroom_classes": ["Amanita"], "extra": {}}"#;
        let labels = LabelMap::from_json_str(text, DEFAULT_LABELS_KEY).unwrap();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels.get(0), Some("Amanita"));
        assert_eq!(labels.get(1), None);
    }

    #[test]
    fn test_custom_key() {
        let labels = LabelMap::from_json_str(r#"{"classes": ["x"]}"#, "classes").unwrap();
        assert_eq!(labels.iter().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn test_missing_key() {
        let result = LabelMap::from_json_str(r#"{"classes": ["x"]}"#, DEFAULT_LABELS_KEY);
        assert!(matches!(result, Err(ClassifierError::Labels(_))));
    }

    #[test]
    fn test_malformed_json() {
        let result = LabelMap::from_json_str("{\"mushroom_classes\": [", DEFAULT_LABELS_KEY);
        assert!(matches!(result, Err(ClassifierError::Labels(_))));
    }

    #[test]
    fn test_non_string_entries() {
        let result = LabelMap::from_json_str(r#"{"mushroom_classes": ["a", 3]}"#, DEFAULT_LABELS_KEY);
        assert!(matches!(result, Err(ClassifierError::Labels(_))));

        let result = LabelMap::from_json_str(r#"{"mushroom_classes": "a"}"#, DEFAULT_LABELS_KEY);
        assert!(matches!(result, Err(ClassifierError::Labels(_))));
    }
}
