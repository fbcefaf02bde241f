// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Truncation point search against a width measurer.
//!
//! Given a maximum pixel width, [`truncation_index`] reports where a string
//! must be cut so the remaining prefix fits. Indices count `char`s, and a
//! prefix of `i` chars means the first `i` chars of the string.

use smallvec::SmallVec;
use typefit_text::{MeasureError, TextMeasurer, TextStyle};

/// Byte offsets of every `char`-count prefix of `text`.
///
/// `offsets[i]` is the byte length of the prefix holding the first `i`
/// chars, so `&text[..offsets[i]]` is always a valid slice.
fn prefix_offsets(text: &str) -> SmallVec<[usize; 32]> {
    let mut offsets = SmallVec::new();
    offsets.push(0);
    for (idx, ch) in text.char_indices() {
        offsets.push(idx + ch.len_utf8());
    }
    offsets
}

/// Finds the index at which `text` must be truncated to fit `max_width`.
///
/// Returns `Ok(None)` when the whole string fits (width `<= max_width`),
/// and `Ok(Some(0))` when even the first character overflows. Otherwise the
/// returned index is the last prefix length that still fit, except that a
/// prefix measuring exactly `max_width` reports its own length rather than
/// the previous one.
///
/// The search is two-phase: repeated halving of the prefix length until a
/// fitting prefix is found, then a linear scan of successively longer
/// prefixes from there. The scan's first probe re-measures the fitting
/// prefix, so an exact-width match at the halving result is reported too.
/// The scan only probes prefixes strictly shorter than the string; when
/// every one of those fits (the cut would land on the final character
/// without measuring exactly `max_width`), the scan runs off the end and
/// the result is `Ok(None)` even though the full string overflows.
///
/// Boundary inputs are not errors: an empty string has width 0 and is never
/// truncated, and a non-positive `max_width` flows through the normal
/// phases (typically yielding `Some(0)`).
pub fn truncation_index(
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    text: &str,
    max_width: f64,
) -> Result<Option<usize>, MeasureError> {
    let full_width = measurer.measure_width(text, style)?;
    if full_width <= max_width {
        return Ok(None);
    }

    let offsets = prefix_offsets(text);
    let char_count = offsets.len() - 1;

    // Halving phase: find some prefix length that fits.
    let mut length = char_count;
    loop {
        if length < 2 {
            // Even the first character overflows.
            return Ok(Some(0));
        }
        length /= 2;
        let width = measurer.measure_width(&text[..offsets[length]], style)?;
        if width <= max_width {
            break;
        }
    }

    // Linear scan from the fitting prefix upward.
    for i in length..char_count {
        let width = measurer.measure_width(&text[..offsets[i]], style)?;
        if width > max_width {
            return Ok(Some(i - 1));
        } else if width == max_width {
            // An exact fit reports this index, not the previous one.
            return Ok(Some(i));
        }
    }

    // Every prefix shorter than the string fit; the scan never probes the
    // full string, so this reports no truncation.
    Ok(None)
}

/// Binary-search variant of [`truncation_index`].
///
/// Valid only for measurers where prefix width is non-decreasing in prefix
/// length, which holds for ordinary left-to-right horizontal text. Probes
/// `O(log n)` prefixes instead of the halving-plus-scan sequence of
/// [`truncation_index`], and returns the same index for strictly increasing
/// prefix widths — except when the last fitting prefix is one char short of
/// the full string, where this reports that index while the scan reports no
/// truncation. On a plateau of equal-width prefixes it may also report a
/// longer (equally wide) prefix than the scan would.
pub fn truncation_index_bisect(
    measurer: &dyn TextMeasurer,
    style: &TextStyle,
    text: &str,
    max_width: f64,
) -> Result<Option<usize>, MeasureError> {
    let full_width = measurer.measure_width(text, style)?;
    if full_width <= max_width {
        return Ok(None);
    }

    let offsets = prefix_offsets(text);
    let char_count = offsets.len() - 1;

    // Invariant: prefixes of `lo` chars fit, prefixes of `hi` chars exceed.
    let mut lo = 0_usize;
    let mut hi = char_count;
    while hi - lo > 1 {
        let mid = lo + (hi - lo) / 2;
        let width = measurer.measure_width(&text[..offsets[mid]], style)?;
        if width <= max_width {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    Ok(Some(lo))
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    /// Every char measures the same fixed width.
    struct FixedCharWidth(f64);

    impl TextMeasurer for FixedCharWidth {
        fn measure_width(&self, text: &str, _style: &TextStyle) -> Result<f64, MeasureError> {
            Ok(self.0 * text.chars().count() as f64)
        }
    }

    /// Width looked up by char count; deliberately not monotonic.
    struct WidthByCount(&'static [f64]);

    impl TextMeasurer for WidthByCount {
        fn measure_width(&self, text: &str, _style: &TextStyle) -> Result<f64, MeasureError> {
            let n = text.chars().count();
            Ok(if n == 0 { 0.0 } else { self.0[n - 1] })
        }
    }

    struct FailingMeasurer;

    impl TextMeasurer for FailingMeasurer {
        fn measure_width(&self, _text: &str, _style: &TextStyle) -> Result<f64, MeasureError> {
            Err(MeasureError::Unavailable)
        }
    }

    #[test]
    fn fitting_string_is_never_truncated() {
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "ab", 100.0), Ok(None));
    }

    #[test]
    fn halving_then_scan_finds_the_last_fit() {
        // Full width 100 > 45; halving stops at 2 chars (width 20), the
        // scan walks 20, 30, 40, then 50 overflows.
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(
            truncation_index(&m, &style, "abcdefghij", 45.0),
            Ok(Some(4))
        );
    }

    #[test]
    fn overflowing_first_char_reports_index_zero() {
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "abc", 5.0), Ok(Some(0)));
    }

    #[test]
    fn empty_string_is_never_truncated() {
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "", 0.0), Ok(None));
    }

    #[test]
    fn nonpositive_max_width_truncates_to_zero() {
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "abc", 0.0), Ok(Some(0)));
        assert_eq!(truncation_index(&m, &style, "abc", -5.0), Ok(Some(0)));
    }

    #[test]
    fn exact_width_match_short_circuits_the_scan() {
        // Widths by prefix length: 20, 30, 50, 40, 100. The scan hits an
        // exact 50 at three chars and reports it; without the equality
        // short-circuit the dip at four chars would carry the scan to the
        // end and report no truncation.
        let m = WidthByCount(&[20.0, 30.0, 50.0, 40.0, 100.0]);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "abcde", 50.0), Ok(Some(3)));
    }

    #[test]
    fn nonmonotonic_scan_without_overflow_reports_no_truncation() {
        // Full width exceeds, but every scanned prefix fits without an
        // exact match, so the scan runs off the end.
        let m = WidthByCount(&[20.0, 30.0, 45.0, 48.0, 100.0]);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "abcde", 50.0), Ok(None));
    }

    #[test]
    fn cut_at_the_final_char_without_exact_match_reports_no_truncation() {
        // Full width 100 > 95, but the scan only probes prefixes shorter
        // than the string; the nine-char prefix (width 90) fits, so the
        // scan runs off the end. The bisect variant reports the cut.
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "abcdefghij", 95.0), Ok(None));
        assert_eq!(
            truncation_index_bisect(&m, &style, "abcdefghij", 95.0),
            Ok(Some(9))
        );
    }

    #[test]
    fn indices_count_chars_not_bytes() {
        // 'é' is two bytes; the index is still counted in chars and the
        // prefix slices stay on char boundaries.
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        assert_eq!(truncation_index(&m, &style, "héllo", 25.0), Ok(Some(2)));
    }

    #[test]
    fn measurement_failure_propagates() {
        let style = TextStyle::default();
        assert_eq!(
            truncation_index(&FailingMeasurer, &style, "abc", 10.0),
            Err(MeasureError::Unavailable)
        );
        assert_eq!(
            truncation_index_bisect(&FailingMeasurer, &style, "abc", 10.0),
            Err(MeasureError::Unavailable)
        );
    }

    #[test]
    fn bisect_agrees_with_the_scan_for_monotonic_widths() {
        let m = FixedCharWidth(10.0);
        let style = TextStyle::default();
        let text = "abcdefghij";
        for max_width in [-5.0, 0.0, 5.0, 15.0, 40.0, 45.0, 90.0, 100.0, 250.0] {
            assert_eq!(
                truncation_index(&m, &style, text, max_width),
                truncation_index_bisect(&m, &style, text, max_width),
                "diverged at max_width {max_width}"
            );
        }
    }
}
