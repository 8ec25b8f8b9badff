// N-gram vocabulary.
//
// The vocabulary is every contiguous run of `n` characters found anywhere in
// the corpus. It is frozen into a sorted list so that column j of every
// feature row refers to the same n-gram.

use std::collections::{BTreeSet, HashMap};

/// Frozen, ordered set of n-grams. Position in `grams` is the column index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    ngram_size: usize,
    grams: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Collect every n-gram of length `ngram_size` from the corpus.
    ///
    /// Lengths are counted in chars, so multi-byte characters are never split.
    /// Strings shorter than `ngram_size` contribute nothing.
    pub fn build(corpus: &[String], ngram_size: usize) -> Self {
        let mut set = BTreeSet::new();
        for text in corpus {
            for_each_ngram(text, ngram_size, |gram| {
                if !set.contains(gram) {
                    set.insert(gram.to_string());
                }
            });
        }

        let grams: Vec<String> = set.into_iter().collect();
        let index = grams
            .iter()
            .enumerate()
            .map(|(i, g)| (g.clone(), i))
            .collect();

        Self {
            ngram_size,
            grams,
            index,
        }
    }

    pub fn ngram_size(&self) -> usize {
        self.ngram_size
    }

    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// The n-grams in column order.
    pub fn grams(&self) -> &[String] {
        &self.grams
    }

    /// Column index of an n-gram, if it is in the vocabulary.
    pub fn position(&self, gram: &str) -> Option<usize> {
        self.index.get(gram).copied()
    }
}

/// Call `f` with every (overlapping) n-gram of `text`, left to right.
pub fn for_each_ngram<F>(text: &str, n: usize, mut f: F)
where
    F: FnMut(&str),
{
    if n == 0 {
        return;
    }
    // Byte offsets of every char boundary, including the end of the string.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let char_count = bounds.len() - 1;
    if char_count < n {
        return;
    }
    for start in 0..=(char_count - n) {
        f(&text[bounds[start]..bounds[start + n]]);
    }
}
