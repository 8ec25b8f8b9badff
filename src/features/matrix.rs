// Feature matrix: one row per string, one column per vocabulary n-gram.

use std::collections::HashMap;

use nalgebra::DMatrix;

use super::ngrams::{for_each_ngram, Vocabulary};

/// Count every vocabulary n-gram in every corpus string.
///
/// Cell (i, j) is the number of overlapping occurrences of `vocab.grams()[j]`
/// in `corpus[i]`. Pure: the same corpus and vocabulary give the same matrix.
pub fn build_features(corpus: &[String], vocab: &Vocabulary) -> DMatrix<f64> {
    let mut features = DMatrix::zeros(corpus.len(), vocab.len());
    for (row, text) in corpus.iter().enumerate() {
        for (col, count) in ngram_counts(text, vocab) {
            features[(row, col)] = count as f64;
        }
    }
    features
}

/// Sparse counts for one string, keyed by vocabulary column.
fn ngram_counts(text: &str, vocab: &Vocabulary) -> HashMap<usize, usize> {
    let mut counts = HashMap::new();
    for_each_ngram(text, vocab.ngram_size(), |gram| {
        if let Some(col) = vocab.position(gram) {
            *counts.entry(col).or_insert(0) += 1;
        }
    });
    counts
}
