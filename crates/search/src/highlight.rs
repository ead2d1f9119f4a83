//! Split a matched field value into highlighted and plain pieces.

use std::ops::Range;

/// A contiguous slice of a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub highlighted: bool,
}

/// Cut `text` at the edges of `ranges` (char indices, half-open).
///
/// Ranges may overlap, come in any order or run past the end of the text.
///
/// # Example
/// ```
/// use laserlookup_search::highlight::segments;
///
/// let pieces: Vec<_> = segments("GentleMax Pro", &[0..7, 8..13])
///     .into_iter()
///     .map(|s| (s.text, s.highlighted))
///     .collect();
/// assert_eq!(pieces, [("GentleM", true), ("a", false), ("x Pro", true)]);
/// ```
pub fn segments<'a>(text: &'a str, ranges: &[Range<usize>]) -> Vec<Segment<'a>> {
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(text.len()))
        .collect();
    let chars = offsets.len() - 1;
    if chars == 0 {
        return Vec::new();
    }

    let mut marked = vec![false; chars];
    for range in ranges {
        let end = range.end.min(chars);
        if range.start < end {
            marked[range.start..end].fill(true);
        }
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    for idx in 1..=chars {
        if idx == chars || marked[idx] != marked[start] {
            pieces.push(Segment {
                text: &text[offsets[start]..offsets[idx]],
                highlighted: marked[start],
            });
            start = idx;
        }
    }
    pieces
}
