// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text measurement hooks for text fitting.
//!
//! The solvers in `typefit_solve` answer questions like "what font size
//! produces this pixel height?" and "where must this label be cut to fit
//! this width?". Answering them needs two narrow capabilities: the advance
//! width of a string under a font configuration, and the font's vertical
//! metrics. This crate defines those capabilities as traits so shaping
//! engines and web canvas measurement can plug in behind the same interface.
//!
//! This crate is intentionally:
//! - small and dependency-light,
//! - `no_std`-friendly (it uses `alloc` for owned font family names), and
//! - backend-agnostic (native shaping engines and web canvas measurement can
//!   both implement the same traits).

#![no_std]

extern crate alloc;

use alloc::sync::Arc;

use kurbo::Rect;

#[cfg(not(feature = "std"))]
mod float;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Errors returned when querying a measurement capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MeasureError {
    /// The backing measurement capability could not be queried.
    ///
    /// Consumers propagate this; they never substitute a default
    /// measurement for a failed query.
    Unavailable,
}

/// Advance-width measurement for a single line of text.
///
/// `text` is treated as a single line; callers should split on `\n` if they
/// want multi-line behavior.
pub trait TextMeasurer {
    /// Returns the rendered advance width of `text` under `style`, in the
    /// same unit as `style.font_size`.
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<f64, MeasureError>;
}

/// Text-independent vertical font metrics for a font configuration.
pub trait FontMetricsProvider {
    /// Returns the [`FontMetrics`] for `style`.
    fn font_metrics(&self, style: &TextStyle) -> Result<FontMetrics, MeasureError>;
}

/// Text styling inputs relevant to measurement.
///
/// This is the resolved font configuration handle the solvers work with:
/// it's just enough to make width and metrics queries reproducible. More
/// detailed typography (attributed text, shaping options, fallback, etc.)
/// belongs in a higher-level text system.
#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in the caller's coordinate system (typically pixels).
    pub font_size: f64,
    /// The preferred font family.
    pub font_family: FontFamily,
    /// Font weight (e.g. `400` for normal, `700` for bold).
    pub font_weight: FontWeight,
    /// Font style (normal/italic/oblique).
    pub font_style: FontStyle,
}

impl TextStyle {
    /// Creates a default `TextStyle` with the given `font_size`.
    #[must_use]
    pub fn new(font_size: f64) -> Self {
        Self {
            font_size,
            font_family: FontFamily::SansSerif,
            font_weight: FontWeight::NORMAL,
            font_style: FontStyle::Normal,
        }
    }

    /// Returns this style with a different font size.
    ///
    /// The size solver probes many candidate sizes against one otherwise
    /// fixed configuration; this is the cheap way to derive each probe.
    #[must_use]
    pub fn with_font_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::new(12.0)
    }
}

/// Font family selection for measurement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum FontFamily {
    /// A generic serif family (CSS `serif`).
    Serif,
    /// A generic sans-serif family (CSS `sans-serif`).
    SansSerif,
    /// A generic monospace family (CSS `monospace`).
    Monospace,
    /// A named family (e.g. `"Inter"`, `"Helvetica Neue"`).
    Named(Arc<str>),
}

impl FontFamily {
    /// Returns the font family string for CSS-style font declarations.
    #[must_use]
    pub fn as_css_family(&self) -> &str {
        match self {
            Self::Serif => "serif",
            Self::SansSerif => "sans-serif",
            Self::Monospace => "monospace",
            Self::Named(name) => name,
        }
    }
}

/// CSS-style font weights.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontWeight(pub u16);

impl FontWeight {
    /// Normal weight (`400`).
    pub const NORMAL: Self = Self(400);
    /// Bold weight (`700`).
    pub const BOLD: Self = Self(700);
}

/// CSS-style font styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Normal style.
    Normal,
    /// Italic style.
    Italic,
    /// Oblique style.
    Oblique,
}

/// Vertical font metrics, as signed baseline-relative distances.
///
/// The coordinate system is y-down with the baseline at zero, so `ascent`
/// and `top` are negative for any ordinary font while `descent` and
/// `bottom` are positive. All values are in the same unit as the font size
/// that produced them.
///
/// `descent >= ascent` holds for any valid metrics; a provider returning
/// metrics that violate this is faulty, and the arithmetic below does not
/// try to repair it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontMetrics {
    /// Distance from the baseline to the recommended top of text (≤ 0).
    pub ascent: f64,
    /// Distance from the baseline to the recommended bottom of text (≥ 0).
    pub descent: f64,
    /// Distance from the baseline to the highest glyph extent (≤ `ascent`).
    pub top: f64,
    /// Distance from the baseline to the lowest glyph extent (≥ `descent`).
    pub bottom: f64,
}

impl FontMetrics {
    /// Returns the text height in whole pixels: `ceil(descent - ascent)`.
    #[must_use]
    pub fn text_height(&self) -> i32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Text heights are small pixel counts"
        )]
        {
            (self.descent - self.ascent).ceil() as i32
        }
    }

    /// Returns the gap between the glyph bounding top and the ascent line,
    /// in whole pixels: `ceil(|top| - |ascent|)`.
    #[must_use]
    pub fn top_offset(&self) -> i32 {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Top offsets are small pixel counts"
        )]
        {
            (self.top.abs() - self.ascent.abs()).ceil() as i32
        }
    }

    /// Returns the baseline y at which text drawn with these metrics is
    /// vertically centered within `rect`.
    ///
    /// Centering uses the glyph bounding extents (`top`..`bottom`), so the
    /// visual ink box (not the em box) ends up centered.
    #[must_use]
    pub fn centered_baseline(&self, rect: Rect) -> f64 {
        rect.y0 + 0.5 * (rect.y1 - rect.y0) - 0.5 * (self.bottom - self.top) - self.top
    }
}

/// A tiny heuristic measurer suitable for demos and early layout.
///
/// It assumes an average glyph width of ~0.6em, an ascent line at ~0.8em
/// above the baseline, and glyph bounding extents slightly beyond the
/// ascent/descent lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTextMeasurer;

impl TextMeasurer for HeuristicTextMeasurer {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<f64, MeasureError> {
        Ok(0.6 * style.font_size * text.chars().count() as f64)
    }
}

impl FontMetricsProvider for HeuristicTextMeasurer {
    fn font_metrics(&self, style: &TextStyle) -> Result<FontMetrics, MeasureError> {
        let size = style.font_size;
        Ok(FontMetrics {
            ascent: -0.8 * size,
            descent: 0.2 * size,
            top: -0.95 * size,
            bottom: 0.25 * size,
        })
    }
}
