//! The ordered label set mapping model output indexes to class names.
//!
//! Label files hold one class per line, optionally prefixed by its index:
//!
//! ```text
//! 0 Cat
//! 1 Dog
//! ```
//!
//! Line order is the index mapping and must match the model's output order.

use crate::core::{ClassifierError, ClassifierResult};
use std::path::Path;

/// Strips surrounding whitespace and a leading index token from a raw label line.
///
/// `"0 Cat\n"` becomes `"Cat"`. A line without an index token is only trimmed.
/// A line consisting of nothing but a number is kept as that number.
///
/// ```rust
/// use pet_classifier::domain::parse_label_line;
///
/// assert_eq!(parse_label_line("0 Cat\n"), "Cat");
/// assert_eq!(parse_label_line("12  Golden Retriever "), "Golden Retriever");
/// assert_eq!(parse_label_line("Cat"), "Cat");
/// ```
pub fn parse_label_line(line: &str) -> String {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) if is_index_token(head) => rest.trim().to_string(),
        _ => trimmed.to_string(),
    }
}

fn is_index_token(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Ordered class names, one per model output index. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<String>,
}

impl LabelSet {
    /// Builds a label set from already-clean names.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `labels` is empty.
    pub fn new(labels: Vec<String>) -> ClassifierResult<Self> {
        if labels.is_empty() {
            return Err(ClassifierError::config_error("label set is empty"));
        }
        Ok(Self { labels })
    }

    /// Parses label file content.
    ///
    /// Trailing blank lines are ignored. A blank line before the last label is
    /// rejected, since skipping it would shift every later index.
    pub fn parse(content: &str) -> ClassifierResult<Self> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines: Vec<&str> = content.lines().collect();
        while lines.last().is_some_and(|line| line.trim().is_empty()) {
            lines.pop();
        }

        let mut labels = Vec::with_capacity(lines.len());
        for (line_no, line) in lines.iter().enumerate() {
            if line.trim().is_empty() {
                return Err(ClassifierError::config_error(format!(
                    "label line {} is empty; blank lines would shift the index mapping",
                    line_no + 1
                )));
            }
            labels.push(parse_label_line(line));
        }

        Self::new(labels)
    }

    /// Reads and parses a label file.
    pub fn from_path(path: impl AsRef<Path>) -> ClassifierResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ClassifierError::labels_unavailable(path, e))?;
        let labels = Self::parse(&content).map_err(|e| match e {
            ClassifierError::ConfigError { message } => ClassifierError::config_error(format!(
                "{}: {}",
                path.display(),
                message
            )),
            other => other,
        })?;
        tracing::info!(count = labels.len(), "loaded labels from {}", path.display());
        Ok(labels)
    }

    /// Number of classes.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always false for a constructed set; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label for a class index.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Whether `label` is one of the class names.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Iterates the labels in index order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// The labels as a slice, in index order.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }
}
