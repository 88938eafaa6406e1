//! Label dictionary loading utilities.
//!
//! This module provides the label dictionary used to name classification
//! results. A dictionary is line-oriented: line `i` of the file names the
//! class at index `i` of the model output, so order is significant and
//! must match the model the dictionary was shipped with.

use std::path::Path;
use std::sync::Arc;

use crate::core::errors::ClassifyResult;

/// An ordered, immutable set of class labels.
///
/// Labels are stored as `Arc<str>` so results can carry them without
/// copying the strings, and a single set can be shared across threads.
/// Empty lines are preserved as empty labels to keep indices aligned
/// with the model output.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelSet {
    labels: Vec<Arc<str>>,
}

impl LabelSet {
    /// Reads a label dictionary file.
    ///
    /// Each line in the file becomes one label in the resulting set.
    /// Empty lines are preserved.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the dictionary file
    ///
    /// # Returns
    ///
    /// A LabelSet with one label per line in the file.
    ///
    /// # Errors
    ///
    /// Returns a [`ClassifyError::Io`](crate::core::errors::ClassifyError::Io)
    /// if the file cannot be read.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use labelkit::utils::LabelSet;
    /// use std::path::Path;
    ///
    /// let labels = LabelSet::from_file(Path::new("path/to/labels.txt"))?;
    /// # Ok::<(), labelkit::core::ClassifyError>(())
    /// ```
    pub fn from_file(path: impl AsRef<Path>) -> ClassifyResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!("loaded label dictionary from {}", path.display());
        Ok(content.lines().collect())
    }

    /// Returns the label at the given class index.
    pub fn get(&self, index: usize) -> Option<&Arc<str>> {
        self.labels.get(index)
    }

    /// Returns the number of labels in the set.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if the set contains no labels.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns an iterator over the labels in class-index order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<str>> {
        self.labels.iter()
    }
}

impl From<Vec<String>> for LabelSet {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }
}

impl FromIterator<String> for LabelSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Arc::from).collect(),
        }
    }
}

impl<'a> FromIterator<&'a str> for LabelSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(Arc::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cat").unwrap();
        writeln!(file, "dog").unwrap();
        writeln!(file, "bird").unwrap();

        let labels = LabelSet::from_file(file.path()).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(0).map(|l| l.as_ref()), Some("cat"));
        assert_eq!(labels.get(2).map(|l| l.as_ref()), Some("bird"));
        assert_eq!(labels.get(3), None);
    }

    #[test]
    fn test_from_file_preserves_empty_lines() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "cat\n\ndog\n").unwrap();

        let labels = LabelSet::from_file(file.path()).unwrap();
        assert_eq!(labels.len(), 3);
        assert_eq!(labels.get(1).map(|l| l.as_ref()), Some(""));
        assert_eq!(labels.get(2).map(|l| l.as_ref()), Some("dog"));
    }

    #[test]
    fn test_from_file_preserves_order() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "zebra").unwrap();
        writeln!(file, "aardvark").unwrap();

        let labels = LabelSet::from_file(file.path()).unwrap();
        let collected: Vec<&str> = labels.iter().map(|l| l.as_ref()).collect();
        assert_eq!(collected, vec!["zebra", "aardvark"]);
    }

    #[test]
    fn test_from_nonexistent_file() {
        let result = LabelSet::from_file(Path::new("/nonexistent/path/labels.txt"));
        assert!(result.is_err());
    }

    #[test]
    fn test_from_vec() {
        let labels = LabelSet::from(vec!["cat".to_string(), "dog".to_string()]);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels.get(1).map(|l| l.as_ref()), Some("dog"));
    }
}
