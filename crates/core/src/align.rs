//! Line-level alignment
//!
//! Computes one longest common subsequence over two line sequences and
//! reports it as an ordered list of [`MatchPoint`]s, strictly
//! increasing in both coordinates. The result is a valid common
//! subsequence witness; everything between consecutive match points is
//! a diff interval for the renderers to classify.

use tracing::debug;

use crate::sequence::LineSequence;

/// An aligned pair of line indices belonging to the chosen LCS.
///
/// `left` indexes the left sequence, `right` the right sequence; the
/// lines at those positions are equal after preprocessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchPoint {
    pub left: usize,
    pub right: usize,
}

/// Compute one LCS alignment between two line sequences.
///
/// Always produces a result: empty or fully disjoint inputs yield an
/// empty list. O(n * m) time and space in the sequence lengths.
pub fn align(left: &LineSequence, right: &LineSequence) -> Vec<MatchPoint> {
    let lcs = longest_common_subsequence(left.as_slice(), right.as_slice());
    let points = recover_indices(left, right, &lcs);
    debug!(match_points = points.len(), "aligned line sequences");
    points
}

/// LCS over lines via dynamic programming, returned in forward order.
fn longest_common_subsequence<'a>(seq1: &'a [String], seq2: &[String]) -> Vec<&'a str> {
    let n = seq1.len();
    let m = seq2.len();

    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            if seq1[i - 1] == seq2[j - 1] {
                table[i][j] = table[i - 1][j - 1] + 1;
            } else {
                table[i][j] = table[i - 1][j].max(table[i][j - 1]);
            }
        }
    }

    // Backtrack from the lower right corner. Ties between the two
    // neighbors decrement `i`; a fixed policy so that inputs with
    // equally long alternatives always produce the same alignment.
    let mut lcs = Vec::new();
    let mut i = n;
    let mut j = m;
    while i > 0 && j > 0 {
        if seq1[i - 1] == seq2[j - 1] {
            lcs.push(seq1[i - 1].as_str());
            i -= 1;
            j -= 1;
        } else if table[i - 1][j] >= table[i][j - 1] {
            i -= 1;
        } else {
            j -= 1;
        }
    }

    lcs.reverse();
    lcs
}

/// Recover per-side indices by scanning each sequence forward in
/// lock-step with the LCS content.
///
/// A duplicated line binds to its first available occurrence, which
/// may differ from where the DP table actually matched it. This is
/// long-standing behavior that existing output depends on; see the
/// duplicate-binding test below.
fn recover_indices(left: &LineSequence, right: &LineSequence, lcs: &[&str]) -> Vec<MatchPoint> {
    let scan = |seq: &LineSequence| {
        let mut indices = Vec::with_capacity(lcs.len());
        let mut next = 0;
        for (i, line) in seq.iter().enumerate() {
            if next < lcs.len() && line == lcs[next] {
                indices.push(i);
                next += 1;
            }
        }
        indices
    };

    scan(left)
        .into_iter()
        .zip(scan(right))
        .map(|(left, right)| MatchPoint { left, right })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(lines: &[&str]) -> LineSequence {
        lines.iter().copied().collect()
    }

    /// Exhaustive LCS length for cross-checking maximality.
    fn brute_force_lcs_len(a: &[&str], b: &[&str]) -> usize {
        if a.is_empty() || b.is_empty() {
            0
        } else if a[0] == b[0] {
            1 + brute_force_lcs_len(&a[1..], &b[1..])
        } else {
            brute_force_lcs_len(&a[1..], b).max(brute_force_lcs_len(a, &b[1..]))
        }
    }

    fn assert_valid_alignment(left: &[&str], right: &[&str]) {
        let points = align(&seq(left), &seq(right));

        // Every pair is a real match.
        for p in &points {
            assert_eq!(left[p.left], right[p.right]);
        }

        // Strictly increasing in both coordinates.
        for w in points.windows(2) {
            assert!(w[0].left < w[1].left);
            assert!(w[0].right < w[1].right);
        }

        // Maximal among all common subsequences.
        assert_eq!(points.len(), brute_force_lcs_len(left, right));
    }

    #[test]
    fn test_alignment_properties() {
        let cases: &[(&[&str], &[&str])] = &[
            (&["a", "b", "c"], &["a", "b", "c"]),
            (&["a", "b", "c"], &["a", "x", "c"]),
            (&["a", "b"], &["b", "a"]),
            (&["a", "b", "c", "d"], &["b", "d"]),
            (&["x", "a", "x"], &["x"]),
            (&[], &["a"]),
            (&["a", "a", "b", "a"], &["a", "b", "b", "a"]),
        ];
        for (left, right) in cases {
            assert_valid_alignment(left, right);
        }
    }

    #[test]
    fn test_identical_sequences() {
        let s = seq(&["one", "two", "three"]);
        let points = align(&s, &s);
        assert_eq!(
            points,
            vec![
                MatchPoint { left: 0, right: 0 },
                MatchPoint { left: 1, right: 1 },
                MatchPoint { left: 2, right: 2 },
            ]
        );
    }

    #[test]
    fn test_disjoint_sequences() {
        let points = align(&seq(&["a", "b"]), &seq(&["x", "y"]));
        assert!(points.is_empty());
    }

    #[test]
    fn test_empty_sequences() {
        assert!(align(&seq(&[]), &seq(&[])).is_empty());
        assert!(align(&seq(&["a"]), &seq(&[])).is_empty());
    }

    #[test]
    fn test_single_insertion() {
        let points = align(&seq(&["a", "b"]), &seq(&["a", "infix", "b"]));
        assert_eq!(
            points,
            vec![
                MatchPoint { left: 0, right: 0 },
                MatchPoint { left: 1, right: 2 },
            ]
        );
    }

    #[test]
    fn test_changed_pair_scenario() {
        let points = align(
            &seq(&["start", "Lorem ipsum"]),
            &seq(&["prefix", "Lorem ipsum"]),
        );
        assert_eq!(points, vec![MatchPoint { left: 1, right: 1 }]);
    }

    #[test]
    fn test_tie_break_moves_up() {
        // Both "a" and "b" are equally long common subsequences; the
        // fixed tie policy keeps "a".
        let points = align(&seq(&["a", "b"]), &seq(&["b", "a"]));
        assert_eq!(points, vec![MatchPoint { left: 0, right: 1 }]);
    }

    #[test]
    fn test_duplicate_binds_to_first_occurrence() {
        // The forward scan binds the LCS element to the earliest "x"
        // on the left, not to a later occurrence a different valid
        // alignment could choose.
        let points = align(&seq(&["x", "a", "x"]), &seq(&["x"]));
        assert_eq!(points, vec![MatchPoint { left: 0, right: 0 }]);
    }
}
