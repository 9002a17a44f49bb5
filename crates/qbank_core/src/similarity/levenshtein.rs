//! Edit distance and normalized similarity ratio.
//!
//! # Invariants
//! - Lengths are counted in Unicode scalar values, not bytes.
//! - `similarity` is symmetric and always inside `[0.0, 1.0]`.
//! - No shortcuts or approximations: every pair runs the full DP.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`.
///
/// Keeps two rows sized by the shorter input.
pub fn distance(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let (outer, inner) = if a_chars.len() >= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    let mut prev_row: Vec<usize> = (0..=inner.len()).collect();
    let mut current_row = vec![0usize; inner.len() + 1];
    for (i, outer_char) in outer.iter().enumerate() {
        current_row[0] = i + 1;
        for (j, inner_char) in inner.iter().enumerate() {
            let insertion = prev_row[j + 1] + 1;
            let deletion = current_row[j] + 1;
            let substitution = prev_row[j] + usize::from(outer_char != inner_char);
            current_row[j + 1] = insertion.min(deletion).min(substitution);
        }
        std::mem::swap(&mut prev_row, &mut current_row);
    }
    prev_row[inner.len()]
}

/// Returns `1 - distance / max_len`, or `1.0` when both inputs are empty.
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    1.0 - (distance(a, b) as f64 / max_len as f64)
}

#[cfg(test)]
mod tests {
    use super::{distance, similarity};

    #[test]
    fn distance_matches_classic_examples() {
        assert_eq!(distance("kitten", "sitting"), 3);
        assert_eq!(distance("sitting", "kitten"), 3);
        assert_eq!(distance("flaw", "lawn"), 2);
    }

    #[test]
    fn distance_base_cases() {
        assert_eq!(distance("", ""), 0);
        assert_eq!(distance("", "abc"), 3);
        assert_eq!(distance("abcd", ""), 4);
        assert_eq!(distance("same", "same"), 0);
    }

    #[test]
    fn distance_counts_characters_not_bytes() {
        assert_eq!(distance("강의", "강사"), 1);
        assert_eq!(distance("", "과정"), 2);
    }

    #[test]
    fn similarity_of_empty_strings_is_one() {
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("", "a"), 0.0);
    }

    #[test]
    fn similarity_properties_hold_on_samples() {
        let samples = [
            "",
            "a",
            "kitten",
            "sitting",
            "{{COURSE}} 과정의 난이도는 적절했나요?",
            "강의 시간은 적절했나요?",
            "교육 시간 배분은 적절했나요?",
        ];
        for a in samples {
            assert_eq!(similarity(a, a), 1.0);
            for b in samples {
                let forward = similarity(a, b);
                assert_eq!(forward, similarity(b, a), "asymmetric for `{a}` / `{b}`");
                assert!((0.0..=1.0).contains(&forward));
            }
        }
    }

    #[test]
    fn similarity_uses_longer_length_as_denominator() {
        let score = similarity("kitten", "sitting");
        assert_eq!(score, 1.0 - 3.0 / 7.0);
    }
}
