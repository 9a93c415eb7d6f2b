//! Top-k selection over classification scores.

use crate::core::{ClassifierError, Tensor2D};
use std::cmp::Ordering;

/// Result of top-k selection over a batch of score rows.
#[derive(Debug, Clone, PartialEq)]
pub struct TopkResult {
    /// Class indexes for each row, best first.
    pub indexes: Vec<Vec<usize>>,
    /// Scores matching `indexes`.
    pub scores: Vec<Vec<f32>>,
}

/// Returns the index and value of the largest score.
///
/// Ties go to the lowest index. NaN never wins; a row of only NaN has no maximum.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (idx, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }
    best
}

/// Returns the `k` best `(index, score)` pairs of one row, best first.
///
/// The sort is stable, so equal scores keep index order. NaN sorts last.
pub fn topk(scores: &[f32], k: usize) -> Vec<(usize, f32)> {
    let mut indexed_scores: Vec<(usize, f32)> = scores.iter().copied().enumerate().collect();
    indexed_scores.sort_by(|a, b| match (a.1.is_nan(), b.1.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal),
    });
    indexed_scores.truncate(k);
    indexed_scores
}

/// Extracts the top-k classes for every row of a `(batch, classes)` tensor.
///
/// # Errors
///
/// Returns `InvalidInput` when `k` is 0 or the tensor has no classes.
pub fn process(predictions: &Tensor2D, k: usize) -> Result<TopkResult, ClassifierError> {
    if k == 0 {
        return Err(ClassifierError::invalid_input("k must be greater than 0"));
    }
    if predictions.nrows() > 0 && predictions.ncols() == 0 {
        return Err(ClassifierError::invalid_input("Empty prediction vector"));
    }

    let mut indexes = Vec::with_capacity(predictions.nrows());
    let mut scores = Vec::with_capacity(predictions.nrows());
    for row in predictions.outer_iter() {
        let row = row.to_vec();
        let (row_indexes, row_scores): (Vec<usize>, Vec<f32>) = topk(&row, k).into_iter().unzip();
        indexes.push(row_indexes);
        scores.push(row_scores);
    }

    Ok(TopkResult { indexes, scores })
}
