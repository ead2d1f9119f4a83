//! Approximate substring matching.
//!
//! The pattern is aligned against the best window of the text: the classic
//! Levenshtein table, except that skipping text before and after the window is
//! free. This makes matching location-independent.

use std::ops::Range;

/// Best placement of a pattern inside a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    /// Single-character edits between the pattern and the matched window
    pub errors: usize,
    /// Runs of text characters that matched exactly, as half-open char ranges
    pub ranges: Vec<Range<usize>>,
}

/// Lowercase a string one char at a time, keeping char positions aligned with
/// the original so match ranges can be applied to the display text.
pub fn fold_case(text: &str) -> Vec<char> {
    text.chars().map(fold_char).collect()
}

#[inline]
fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Align `pattern` against the best-matching window of `text`.
///
/// Returns `None` for an empty pattern. Ties between equally good windows go
/// to the one that ends first.
///
/// # Example
/// ```
/// use laserlookup_search::fuzzy::{best_alignment, fold_case};
///
/// let pattern = fold_case("gentlemx pro");
/// let alignment = best_alignment(&pattern, &fold_case("GentleMax Pro")).unwrap();
/// assert_eq!(alignment.errors, 1);
/// assert_eq!(alignment.ranges, vec![0..7, 8..13]);
/// ```
pub fn best_alignment(pattern: &[char], text: &[char]) -> Option<Alignment> {
    let m = pattern.len();
    let n = text.len();
    if m == 0 {
        return None;
    }

    // Full table, row-major; the first row stays zero so the window can start anywhere.
    let width = n + 1;
    let mut dist = vec![0usize; (m + 1) * width];
    for i in 1..=m {
        dist[i * width] = i;
        for j in 1..=n {
            let cost = usize::from(pattern[i - 1] != text[j - 1]);
            dist[i * width + j] = (dist[(i - 1) * width + j - 1] + cost)
                .min(dist[(i - 1) * width + j] + 1)
                .min(dist[i * width + j - 1] + 1);
        }
    }

    let (end, &errors) = dist[m * width..]
        .iter()
        .enumerate()
        .min_by_key(|&(_, d)| *d)?;

    let mut matched = Vec::with_capacity(m);
    let (mut i, mut j) = (m, end);
    while i > 0 {
        let here = dist[i * width + j];
        if j > 0 && pattern[i - 1] == text[j - 1] && here == dist[(i - 1) * width + j - 1] {
            matched.push(j - 1);
            i -= 1;
            j -= 1;
        } else if j > 0 && here == dist[(i - 1) * width + j - 1] + 1 {
            i -= 1;
            j -= 1;
        } else if here == dist[(i - 1) * width + j] + 1 {
            i -= 1;
        } else {
            j -= 1;
        }
    }
    matched.reverse();

    let mut ranges: Vec<Range<usize>> = Vec::new();
    for pos in matched {
        match ranges.last_mut() {
            Some(run) if run.end == pos => run.end += 1,
            _ => ranges.push(pos..pos + 1),
        }
    }

    Some(Alignment { errors, ranges })
}
