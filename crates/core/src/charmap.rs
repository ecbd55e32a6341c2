//! Character-level match maps
//!
//! For a pair of differing lines, recursively decomposes both strings
//! around their longest common substring and marks the matched runs in
//! per-character boolean maps. Indexing is by code point throughout;
//! a map's length always equals the char count of its line.

/// Per-character boolean map marking membership in a matched run.
///
/// Only meaningful for a pair of lines compared against each other; a
/// line compared against nothing has no map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharMatchMap(Vec<bool>);

impl CharMatchMap {
    fn from_flags(flags: Vec<bool>) -> Self {
        Self(flags)
    }

    /// Number of characters covered by the map.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the character at `index` is part of a matched run.
    /// Out-of-range positions read as unmatched.
    pub fn is_match(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Count of matched characters.
    pub fn matched(&self) -> usize {
        self.0.iter().filter(|&&m| m).count()
    }

    /// Count of unmatched characters.
    pub fn mismatched(&self) -> usize {
        self.0.len() - self.matched()
    }

    /// The raw flags, one per character.
    pub fn flags(&self) -> &[bool] {
        &self.0
    }
}

/// Map the common substrings of `a` and `b` into one match map per
/// string.
///
/// Total and deterministic: an empty string or a fully disjoint pair
/// produces all-false maps. Invoked once per differing line pair; not
/// memoized.
pub fn map_common_substrings(a: &str, b: &str) -> (CharMatchMap, CharMatchMap) {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (map_a, map_b) = decompose(&a_chars, &b_chars);
    (CharMatchMap::from_flags(map_a), CharMatchMap::from_flags(map_b))
}

/// One recursive step over a pair of slices.
///
/// Pure: returns freshly allocated maps for exactly these slices; the
/// caller merges flank results back by range. Each step is O(|a|*|b|)
/// for the substring table.
fn decompose(a: &[char], b: &[char]) -> (Vec<bool>, Vec<bool>) {
    let mut map_a = vec![false; a.len()];
    let mut map_b = vec![false; b.len()];
    if a.is_empty() || b.is_empty() {
        return (map_a, map_b);
    }

    let Some(run) = longest_common_substring(a, b) else {
        return (map_a, map_b);
    };
    // The matched content is anchored at its first occurrence on each
    // side, which may be earlier than where the table found it.
    let (Some(pa), Some(pb)) = (find_first(a, run), find_first(b, run)) else {
        return (map_a, map_b);
    };

    for k in 0..run.len() {
        map_a[pa + k] = true;
        map_b[pb + k] = true;
    }

    // Left flank keeps the offset base; right flank advances past the
    // matched run. Left subtree first.
    let (left_a, left_b) = decompose(&a[..pa], &b[..pb]);
    map_a[..pa].copy_from_slice(&left_a);
    map_b[..pb].copy_from_slice(&left_b);

    let (right_a, right_b) = decompose(&a[pa + run.len()..], &b[pb + run.len()..]);
    map_a[pa + run.len()..].copy_from_slice(&right_a);
    map_b[pb + run.len()..].copy_from_slice(&right_b);

    (map_a, map_b)
}

/// Longest common contiguous run between two char slices, returned as
/// a subslice of `a`. Ties keep the run found first, i.e. the one
/// ending earliest in `a`.
fn longest_common_substring<'a>(a: &'a [char], b: &[char]) -> Option<&'a [char]> {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best_len = 0;
    let mut best_end = 0; // exclusive end in `a`

    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            curr[j + 1] = if x == y { prev[j] + 1 } else { 0 };
            if curr[j + 1] > best_len {
                best_len = curr[j + 1];
                best_end = i + 1;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    if best_len == 0 {
        None
    } else {
        Some(&a[best_end - best_len..best_end])
    }
}

/// Index of the first occurrence of `needle` in `haystack`.
fn find_first(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
