//! Fuzzy string similarity.
//!
//! [`token_set_ratio`] is the score the snatch thresholds were tuned
//! against: both inputs are reduced to lowercase alphanumeric words, the
//! word sets are intersected, and the best pairwise [`ratio`] of the
//! reconstructed strings wins. Word order never matters, and a title
//! whose words are a superset of the query scores 100.
//!
//! Scores are integers in `0..=100`.

use std::collections::{BTreeSet, HashMap};

/// Reduce a string for comparison: drop non-ASCII characters, replace
/// every non-alphanumeric character (underscore excepted) with a space,
/// lowercase, trim.
fn full_process(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if !ch.is_ascii() {
            continue;
        }
        if ch.is_ascii_alphanumeric() || ch == '_' {
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(' ');
        }
    }
    out.trim().to_string()
}

/// Similarity of two strings as a percentage.
///
/// Longest-matching-blocks similarity: with `M` the total length of the
/// matching blocks and `T` the combined length, the score is
/// `100 * 2M / T` rounded half away from zero. Two empty strings score
/// 100.
pub fn ratio(a: &str, b: &str) -> u32 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 100;
    }
    let matched = matching_len(&a, &b);
    (200.0 * matched as f64 / total as f64).round() as u32
}

/// Token-set similarity of two strings.
///
/// Inputs are preprocessed with [`full_process`]; an input that comes
/// back empty scores 0. The word sets are split into the sorted
/// intersection and the two sorted differences, and the best [`ratio`]
/// among the three reconstructed-string pairings is returned.
pub fn token_set_ratio(a: &str, b: &str) -> u32 {
    let p1 = full_process(a);
    let p2 = full_process(b);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let words1: BTreeSet<&str> = p1.split_whitespace().collect();
    let words2: BTreeSet<&str> = p2.split_whitespace().collect();

    let sect: Vec<&str> = words1.intersection(&words2).copied().collect();
    let diff1: Vec<&str> = words1.difference(&words2).copied().collect();
    let diff2: Vec<&str> = words2.difference(&words1).copied().collect();

    let sorted_sect = sect.join(" ");
    let combined_1to2 = format!("{} {}", sorted_sect, diff1.join(" "));
    let combined_2to1 = format!("{} {}", sorted_sect, diff2.join(" "));
    let combined_1to2 = combined_1to2.trim();
    let combined_2to1 = combined_2to1.trim();

    ratio(&sorted_sect, combined_1to2)
        .max(ratio(&sorted_sect, combined_2to1))
        .max(ratio(combined_1to2, combined_2to1))
}

/// Total length of the longest matching blocks between `a` and `b`.
///
/// Recursively takes the longest common block, then repeats on the
/// pieces to its left and right.
fn matching_len(a: &[char], b: &[char]) -> usize {
    let mut b_index: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, &ch) in b.iter().enumerate() {
        b_index.entry(ch).or_default().push(j);
    }

    let mut total = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, size) = longest_match(a, &b_index, alo, ahi, blo, bhi);
        if size > 0 {
            total += size;
            if alo < i && blo < j {
                pending.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                pending.push((i + size, ahi, j + size, bhi));
            }
        }
    }
    total
}

/// Longest block of `a[alo..ahi]` matching `b[blo..bhi]`, earliest in
/// `a` (then `b`) on ties.
fn longest_match(
    a: &[char],
    b_index: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let mut best_i = alo;
    let mut best_j = blo;
    let mut best_size = 0;

    // lengths[j] = length of the longest block ending at a[i], b[j]
    let mut lengths: HashMap<usize, usize> = HashMap::new();
    for i in alo..ahi {
        let mut next_lengths: HashMap<usize, usize> = HashMap::new();
        if let Some(positions) = b_index.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let size = if j == blo {
                    1
                } else {
                    lengths.get(&(j - 1)).copied().unwrap_or(0) + 1
                };
                next_lengths.insert(j, size);
                if size > best_size {
                    best_i = i + 1 - size;
                    best_j = j + 1 - size;
                    best_size = size;
                }
            }
        }
        lengths = next_lengths;
    }
    (best_i, best_j, best_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(token_set_ratio("The Long Road", "The Long Road"), 100);
        assert_eq!(ratio("hello world", "hello world"), 100);
    }

    #[test]
    fn test_word_superset_scores_100() {
        assert_eq!(
            token_set_ratio("The Long Road", "Jane Doe The Long Road 2020 EPUB"),
            100
        );
    }

    #[test]
    fn test_word_order_ignored() {
        assert_eq!(token_set_ratio("road long the", "the long road"), 100);
    }

    #[test]
    fn test_case_and_punctuation_folded() {
        assert_eq!(token_set_ratio("The-Long-Road!", "the long road"), 100);
    }

    #[test]
    fn test_empty_or_unprocessable_input_scores_0() {
        assert_eq!(token_set_ratio("", "anything"), 0);
        assert_eq!(token_set_ratio("anything", ""), 0);
        assert_eq!(token_set_ratio("!!!", "anything"), 0);
        assert_eq!(token_set_ratio("", ""), 0);
    }

    #[test]
    fn test_disjoint_similar_words() {
        assert_eq!(token_set_ratio("abcd", "bcde"), 75);
    }

    #[test]
    fn test_ratio_empty_strings() {
        assert_eq!(ratio("", ""), 100);
        assert_eq!(ratio("", "abc"), 0);
    }

    #[test]
    fn test_ratio_offset_overlap() {
        // "bcd" is the longest block: 2 * 3 / 8 = 75%.
        assert_eq!(ratio("abcd", "bcde"), 75);
    }

    #[test]
    fn test_ratio_no_overlap() {
        assert_eq!(ratio("abcd", "wxyz"), 0);
    }

    #[test]
    fn test_ratio_rounds_half_away_from_zero() {
        // One matching char out of 16 total: 12.5 rounds up to 13.
        assert_eq!(ratio("abcdefgh", "aqrstuvw"), 13);
    }

    #[test]
    fn test_ratio_splits_around_longest_block() {
        // Longest block "ab", then "c" matches on the right: M = 3, T = 7.
        assert_eq!(ratio("abc", "abxc"), 86);
    }

    #[test]
    fn test_partial_word_overlap() {
        let score = token_set_ratio("Jane Doe", "John Doe and the Suspicious Parcel");
        assert!(score < 100, "expected a partial score, got {}", score);
        assert!(score > 0, "expected a partial score, got {}", score);
    }

    #[test]
    fn test_underscores_survive_processing() {
        assert_eq!(full_process("Snake_Case TITLE"), "snake_case title");
    }

    #[test]
    fn test_full_process_strips_non_ascii() {
        assert_eq!(full_process("naïve café"), "nave caf");
    }
}
