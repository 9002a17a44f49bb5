//! String similarity scoring used by the question matcher.

pub mod levenshtein;
