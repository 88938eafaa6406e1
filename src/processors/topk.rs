//! Top-k classification result selection.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;

use crate::core::constants::BYTE_SCORE_SCALE;
use crate::core::errors::{ClassifyError, ClassifyResult};
use crate::utils::LabelSet;

/// A class label paired with its confidence score.
///
/// Results are ordered best-first; `Display` renders the `label:score`
/// line format consumed by result overlays.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    /// The class label.
    pub label: Arc<str>,
    /// The confidence score for the label.
    pub score: f32,
}

impl fmt::Display for LabelScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.score)
    }
}

/// A candidate tracked by the selection heap.
///
/// Ordering is by rank: a greater entry outranks a lesser one. Scores
/// compare via `total_cmp` so the order is total even for NaN; equal
/// scores rank the earlier index higher. The label rides along and takes
/// no part in the ordering.
#[derive(Debug)]
struct HeapEntry {
    score: f32,
    index: usize,
    label: Arc<str>,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.score
            .total_cmp(&other.score)
            .then_with(|| other.index.cmp(&self.index))
    }
}

/// A selector for extracting the top-k results from classification outputs.
///
/// The selector pairs raw model scores with the labels of an immutable
/// [`LabelSet`] and returns the `k` best matches in descending order.
/// Every call works on a fresh, function-local heap: no selection state
/// survives between invocations, so a selector can be shared freely
/// across threads and requests.
#[derive(Debug, Clone)]
pub struct TopKSelector {
    labels: LabelSet,
}

impl TopKSelector {
    /// Creates a new TopKSelector over the given label set.
    ///
    /// # Arguments
    ///
    /// * `labels` - The labels to pair with scores, in class-index order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use labelkit::processors::TopKSelector;
    /// use labelkit::utils::LabelSet;
    ///
    /// let labels: LabelSet = ["cat", "dog", "bird"].into_iter().collect();
    /// let selector = TopKSelector::new(labels);
    /// ```
    pub fn new(labels: LabelSet) -> Self {
        Self { labels }
    }

    /// Creates a new TopKSelector from a vector of label strings.
    ///
    /// The vector index corresponds to the class ID.
    ///
    /// # Arguments
    ///
    /// * `labels` - Vector of labels where index = class ID.
    pub fn from_labels(labels: Vec<String>) -> Self {
        Self::new(LabelSet::from(labels))
    }

    /// Returns the label set this selector pairs scores with.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Selects the top-k results from a vector of confidence scores.
    ///
    /// Scores are matched with labels by index. Candidates are pushed
    /// through a bounded min-heap of capacity `k`: whenever the heap grows
    /// past `k` entries the current minimum is evicted, so memory stays
    /// proportional to `k` rather than to the number of classes. Equal
    /// scores rank by first-seen index, ascending, which makes the result
    /// equal to "sort by (score descending, index ascending), take k".
    ///
    /// # Arguments
    ///
    /// * `scores` - One confidence score per class, index-aligned with the labels.
    /// * `k` - Number of top results to select (must be > 0).
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LabelScore>)` - The top results in descending order, of
    ///   length `min(k, scores.len())`.
    /// * `Err(ClassifyError::InvalidArgument)` - If `k` is 0 or the score
    ///   count does not match the label count.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use labelkit::processors::TopKSelector;
    ///
    /// let selector = TopKSelector::from_labels(vec![
    ///     "cat".to_string(),
    ///     "dog".to_string(),
    ///     "bird".to_string(),
    /// ]);
    /// let top = selector.select(&[0.2, 0.9, 0.5], 2)?;
    /// assert_eq!(top[0].label.as_ref(), "dog");
    /// # Ok::<(), labelkit::core::ClassifyError>(())
    /// ```
    pub fn select(&self, scores: &[f32], k: usize) -> ClassifyResult<Vec<LabelScore>> {
        if k == 0 {
            return Err(ClassifyError::invalid_argument("k must be greater than 0"));
        }

        if scores.len() != self.labels.len() {
            return Err(ClassifyError::invalid_argument(format!(
                "score count {} does not match label count {}",
                scores.len(),
                self.labels.len()
            )));
        }

        // The heap lives and dies inside this call; no candidate carries
        // over to the next invocation.
        let mut heap: BinaryHeap<Reverse<HeapEntry>> = BinaryHeap::with_capacity(k + 1);
        for (index, (&score, label)) in scores.iter().zip(self.labels.iter()).enumerate() {
            heap.push(Reverse(HeapEntry {
                score,
                index,
                label: Arc::clone(label),
            }));
            if heap.len() > k {
                heap.pop();
            }
        }

        // Ascending order of Reverse<HeapEntry> is descending rank.
        let selected = heap
            .into_sorted_vec()
            .into_iter()
            .map(|Reverse(entry)| LabelScore {
                label: entry.label,
                score: entry.score,
            })
            .collect();

        Ok(selected)
    }

    /// Selects the top-k results from raw byte scores.
    ///
    /// Each byte is normalized into [0.0, 1.0] with [`normalize_scores`]
    /// before selection.
    ///
    /// # Arguments
    ///
    /// * `raw` - One score byte per class, index-aligned with the labels.
    /// * `k` - Number of top results to select (must be > 0).
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<LabelScore>)` - The top results in descending order.
    /// * `Err(ClassifyError::InvalidArgument)` - If `k` is 0 or the score
    ///   count does not match the label count.
    pub fn select_bytes(&self, raw: &[u8], k: usize) -> ClassifyResult<Vec<LabelScore>> {
        self.select(&normalize_scores(raw), k)
    }
}

/// Normalizes raw byte scores into confidence values in [0.0, 1.0].
///
/// # Arguments
///
/// * `raw` - Raw unsigned byte scores as delivered by a quantized model.
///
/// # Returns
///
/// One f32 per input byte, each divided by 255.
pub fn normalize_scores(raw: &[u8]) -> Vec<f32> {
    raw.iter()
        .map(|&byte| f32::from(byte) / BYTE_SCORE_SCALE)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector(labels: &[&str]) -> TopKSelector {
        TopKSelector::new(labels.iter().copied().collect())
    }

    #[test]
    fn test_select_descending_order() {
        let selector = selector(&["cat", "dog", "bird"]);

        let top = selector.select(&[0.2, 0.9, 0.5], 2).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label.as_ref(), "dog");
        assert_eq!(top[0].score, 0.9);
        assert_eq!(top[1].label.as_ref(), "bird");
        assert_eq!(top[1].score, 0.5);
    }

    #[test]
    fn test_select_many_classes_strictly_descending() {
        // 37 is coprime with 100, so the scores are a duplicate-free
        // permutation of 0.00..=0.99.
        let labels: LabelSet = (0..100).map(|i| format!("class_{}", i)).collect();
        let selector = TopKSelector::new(labels);
        let scores: Vec<f32> = (0..100).map(|i| (i * 37 % 100) as f32 / 100.0).collect();

        let top = selector.select(&scores, 10).unwrap();
        assert_eq!(top.len(), 10);
        assert_eq!(top[0].score, 0.99);
        for pair in top.windows(2) {
            assert!(pair[0].score > pair[1].score);
        }
    }

    #[test]
    fn test_select_tie_breaks_by_first_seen() {
        let selector = selector(&["a", "b"]);

        let top = selector.select(&[0.1, 0.1], 1).unwrap();
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].label.as_ref(), "a");

        let both = selector.select(&[0.1, 0.1], 2).unwrap();
        assert_eq!(both[0].label.as_ref(), "a");
        assert_eq!(both[1].label.as_ref(), "b");
    }

    #[test]
    fn test_select_k_larger_than_classes() {
        let selector = selector(&["cat", "dog"]);

        let top = selector.select(&[0.1, 0.8], 5).unwrap();
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].label.as_ref(), "dog");
        assert_eq!(top[1].label.as_ref(), "cat");
    }

    #[test]
    fn test_select_invalid_k() {
        let selector = selector(&["cat", "dog", "bird"]);

        let result = selector.select(&[0.1, 0.8, 0.1], 0);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_select_length_mismatch() {
        let selector = selector(&["cat", "dog", "bird"]);

        let result = selector.select(&[0.1, 0.8], 2);
        assert!(matches!(
            result.unwrap_err(),
            ClassifyError::InvalidArgument { .. }
        ));
    }

    #[test]
    fn test_select_empty() {
        let selector = TopKSelector::new(LabelSet::default());

        let top = selector.select(&[], 3).unwrap();
        assert!(top.is_empty());
    }

    #[test]
    fn test_select_no_state_across_calls() {
        // A selector that kept candidates between calls would let the
        // first call's high scores outrank everything in the second.
        let selector = selector(&["a", "b", "c", "d"]);

        let first = selector.select(&[0.9, 0.8, 0.7, 0.6], 2).unwrap();
        assert_eq!(first[0].score, 0.9);

        let second = selector.select(&[0.1, 0.2, 0.05, 0.06], 2).unwrap();
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].label.as_ref(), "b");
        assert_eq!(second[0].score, 0.2);
        assert_eq!(second[1].label.as_ref(), "a");
        assert_eq!(second[1].score, 0.1);
    }

    #[test]
    fn test_select_concurrent_calls() {
        let selector = selector(&["cat", "dog", "bird"]);

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        let top = selector.select(&[0.2, 0.9, 0.5], 2).unwrap();
                        assert_eq!(top[0].label.as_ref(), "dog");
                        assert_eq!(top[1].label.as_ref(), "bird");
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }
        });
    }

    #[test]
    fn test_select_bytes_normalizes() {
        let selector = selector(&["x", "y", "z"]);

        let top = selector.select_bytes(&[255, 0, 128], 3).unwrap();
        assert_eq!(top[0].label.as_ref(), "x");
        assert_eq!(top[0].score, 1.0);
        assert_eq!(top[1].label.as_ref(), "z");
        assert_eq!(top[1].score, 128.0 / 255.0);
        assert_eq!(top[2].score, 0.0);
    }

    #[test]
    fn test_normalize_scores() {
        let normalized = normalize_scores(&[0, 255, 51]);
        assert_eq!(normalized, vec![0.0, 1.0, 51.0 / 255.0]);
    }

    #[test]
    fn test_label_score_display() {
        let entry = LabelScore {
            label: Arc::from("dog"),
            score: 0.9,
        };
        assert_eq!(entry.to_string(), "dog:0.9");
    }
}
