// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Font size search against a metrics provider.
//!
//! The solver inverts the size-to-height relationship of a font: it probes
//! [`FontMetricsProvider`] at candidate sizes until the integer text height
//! (`ceil(descent - ascent)`) equals the requested target. It assumes the
//! relationship is monotonic (a larger size never renders shorter).

use typefit_text::{FontMetricsProvider, MeasureError, TextStyle};

/// Errors returned by [`FontSizeSolver::solve`].
#[derive(Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The metrics capability could not be queried.
    Measurement(MeasureError),
    /// The probe budget or bisection interval was exhausted without an
    /// exact height match.
    NoExactMatch {
        /// The candidate size whose height came closest to the target.
        nearest: f64,
    },
}

impl From<MeasureError> for SolveError {
    fn from(err: MeasureError) -> Self {
        Self::Measurement(err)
    }
}

/// The search strategy used by [`FontSizeSolver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SizeSearch {
    /// Hunt from the starting size in fixed steps, decreasing while the
    /// measured height overshoots and increasing while it undershoots.
    ///
    /// This is the default.
    FixedStep,
    /// Bisect a bracketing size range.
    ///
    /// Converges in `O(log(range / step))` probes, but requires the caller
    /// to supply bounds that bracket the answer.
    Bisect {
        /// Lower bound of the size range.
        lo: f64,
        /// Upper bound of the size range.
        hi: f64,
    },
}

/// Searches for the font size whose rendered text height equals a target.
///
/// The default configuration starts at size 90.0 and hunts in steps of 0.5
/// with no probe cap. An uncapped hunt only terminates when some size on
/// the step lattice produces exactly the target height; when none does
/// (the true answer falls between step boundaries, or heights skip the
/// target), it loops forever. Callers that cannot rule that out should set
/// [`with_max_probes`](Self::with_max_probes) or switch to
/// [`with_bisection`](Self::with_bisection); both fail with
/// [`SolveError::NoExactMatch`] instead of guessing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontSizeSolver {
    start: f64,
    step: f64,
    max_probes: Option<u32>,
    search: SizeSearch,
}

impl FontSizeSolver {
    /// Creates a solver with the default start size (90.0), step (0.5),
    /// fixed-step search, and no probe cap.
    #[must_use]
    pub fn new() -> Self {
        Self {
            start: 90.0,
            step: 0.5,
            max_probes: None,
            search: SizeSearch::FixedStep,
        }
    }

    /// Sets the starting candidate size for the fixed-step search.
    #[must_use]
    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Sets the step size (fixed-step mode) or interval resolution
    /// (bisection mode). Clamped to a small positive value.
    #[must_use]
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step.max(1.0e-6);
        self
    }

    /// Caps the number of metric probes.
    ///
    /// When the cap is reached, [`solve`](Self::solve) fails with
    /// [`SolveError::NoExactMatch`] carrying the closest candidate seen.
    #[must_use]
    pub fn with_max_probes(mut self, max_probes: u32) -> Self {
        self.max_probes = Some(max_probes);
        self
    }

    /// Switches to bisection over `[lo, hi]` (order-insensitive).
    #[must_use]
    pub fn with_bisection(mut self, lo: f64, hi: f64) -> Self {
        self.search = if lo <= hi {
            SizeSearch::Bisect { lo, hi }
        } else {
            SizeSearch::Bisect { lo: hi, hi: lo }
        };
        self
    }

    /// Solves for the font size whose text height equals `target_height`.
    ///
    /// `style` supplies the family/weight/style of the configuration being
    /// sized; its own `font_size` is ignored in favor of each probe's
    /// candidate size.
    pub fn solve(
        &self,
        metrics: &dyn FontMetricsProvider,
        style: &TextStyle,
        target_height: u32,
    ) -> Result<f64, SolveError> {
        match self.search {
            SizeSearch::FixedStep => self.solve_stepwise(metrics, style, target_height),
            SizeSearch::Bisect { lo, hi } => self.solve_bisect(metrics, style, target_height, lo, hi),
        }
    }

    fn height_at(
        metrics: &dyn FontMetricsProvider,
        style: &TextStyle,
        size: f64,
    ) -> Result<i64, SolveError> {
        let fm = metrics.font_metrics(&style.with_font_size(size))?;
        Ok(i64::from(fm.text_height()))
    }

    fn solve_stepwise(
        &self,
        metrics: &dyn FontMetricsProvider,
        style: &TextStyle,
        target_height: u32,
    ) -> Result<f64, SolveError> {
        let target = i64::from(target_height);
        let mut size = self.start;
        let mut probes = 0_u32;
        // (distance, candidate) of the best miss so far.
        let mut nearest: Option<(u64, f64)> = None;

        loop {
            if let Some(cap) = self.max_probes
                && probes >= cap
            {
                let nearest = nearest.map_or(self.start, |(_, s)| s);
                return Err(SolveError::NoExactMatch { nearest });
            }
            probes += 1;

            let height = Self::height_at(metrics, style, size)?;
            if height == target {
                return Ok(size);
            }
            let dist = height.abs_diff(target);
            if nearest.is_none_or(|(best, _)| dist < best) {
                nearest = Some((dist, size));
            }
            if height > target {
                size -= self.step;
            } else {
                size += self.step;
            }
        }
    }

    fn solve_bisect(
        &self,
        metrics: &dyn FontMetricsProvider,
        style: &TextStyle,
        target_height: u32,
        lo: f64,
        hi: f64,
    ) -> Result<f64, SolveError> {
        let target = i64::from(target_height);
        let (mut lo, mut hi) = (lo, hi);
        let mut probes = 0_u32;
        let mut nearest: Option<(u64, f64)> = None;

        while hi - lo > self.step {
            if let Some(cap) = self.max_probes
                && probes >= cap
            {
                break;
            }
            probes += 1;

            let mid = 0.5 * (lo + hi);
            let height = Self::height_at(metrics, style, mid)?;
            if height == target {
                return Ok(mid);
            }
            let dist = height.abs_diff(target);
            if nearest.is_none_or(|(best, _)| dist < best) {
                nearest = Some((dist, mid));
            }
            if height > target {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        let nearest = nearest.map_or(0.5 * (lo + hi), |(_, s)| s);
        Err(SolveError::NoExactMatch { nearest })
    }
}

impl Default for FontSizeSolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use typefit_text::FontMetrics;

    use super::*;

    /// `text_height(size) == 2 * size` exactly for sizes on the 0.5 lattice.
    struct DoublingMetrics;

    impl FontMetricsProvider for DoublingMetrics {
        fn font_metrics(&self, style: &TextStyle) -> Result<FontMetrics, MeasureError> {
            let size = style.font_size;
            Ok(FontMetrics {
                ascent: -1.5 * size,
                descent: 0.5 * size,
                top: -1.6 * size,
                bottom: 0.6 * size,
            })
        }
    }

    /// Heights are always odd on the 0.5 size lattice, so even targets
    /// never match exactly.
    struct OddHeights;

    impl FontMetricsProvider for OddHeights {
        fn font_metrics(&self, style: &TextStyle) -> Result<FontMetrics, MeasureError> {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Test sizes are tiny integers scaled by 2"
            )]
            let steps = (2.0 * style.font_size) as i64;
            let odd = if steps % 2 == 0 { steps + 1 } else { steps };
            #[allow(
                clippy::cast_precision_loss,
                reason = "Test heights are tiny integers"
            )]
            let h = odd as f64;
            Ok(FontMetrics {
                ascent: -h,
                descent: 0.0,
                top: -h,
                bottom: 0.0,
            })
        }
    }

    struct FailingMetrics;

    impl FontMetricsProvider for FailingMetrics {
        fn font_metrics(&self, _style: &TextStyle) -> Result<FontMetrics, MeasureError> {
            Err(MeasureError::Unavailable)
        }
    }

    #[test]
    fn stepwise_hunt_converges_on_an_exact_match() {
        let solver = FontSizeSolver::new();
        let size = solver
            .solve(&DoublingMetrics, &TextStyle::default(), 100)
            .unwrap();
        assert!((size - 50.0).abs() < 1e-9);
    }

    #[test]
    fn stepwise_hunt_can_climb_from_below() {
        let solver = FontSizeSolver::new().with_start(10.0);
        let size = solver
            .solve(&DoublingMetrics, &TextStyle::default(), 100)
            .unwrap();
        assert!((size - 50.0).abs() < 1e-9);
    }

    #[test]
    fn capped_hunt_reports_the_nearest_candidate() {
        let solver = FontSizeSolver::new().with_max_probes(200);
        let err = solver
            .solve(&OddHeights, &TextStyle::default(), 100)
            .unwrap_err();
        // Hunting down from 90, the first height within one pixel of the
        // target is 101 at size 50.5; the hunt then oscillates without
        // getting closer.
        match err {
            SolveError::NoExactMatch { nearest } => assert!((nearest - 50.5).abs() < 1e-9),
            other => panic!("expected NoExactMatch, got {other:?}"),
        }
    }

    #[test]
    fn bisection_finds_an_exact_match() {
        let solver = FontSizeSolver::new().with_bisection(0.0, 200.0);
        let size = solver
            .solve(&DoublingMetrics, &TextStyle::default(), 100)
            .unwrap();
        assert!((size - 50.0).abs() < 1e-9);
    }

    #[test]
    fn bisection_without_an_exact_match_fails_instead_of_guessing() {
        let solver = FontSizeSolver::new().with_bisection(0.0, 100.0);
        let err = solver
            .solve(&OddHeights, &TextStyle::default(), 100)
            .unwrap_err();
        assert!(matches!(err, SolveError::NoExactMatch { .. }));
    }

    #[test]
    fn measurement_failure_propagates() {
        let solver = FontSizeSolver::new();
        let err = solver
            .solve(&FailingMetrics, &TextStyle::default(), 100)
            .unwrap_err();
        assert_eq!(err, SolveError::Measurement(MeasureError::Unavailable));
    }
}
