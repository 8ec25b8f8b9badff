// Feature construction: character n-gram vocabulary and count matrix.

pub mod matrix;
pub mod ngrams;
