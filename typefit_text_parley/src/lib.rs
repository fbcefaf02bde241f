// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parley-backed measurement adapter.
//!
//! This crate implements [`typefit_text::TextMeasurer`] and
//! [`typefit_text::FontMetricsProvider`] using Parley, giving the solvers
//! shaping-aware widths and real font metrics instead of heuristics.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::cell::RefCell;

use parley::style::{FontFamily as ParleyFontFamily, FontStack, GenericFamily, StyleProperty};
use parley::{Alignment, AlignmentOptions, FontContext, FontStyle as ParleyFontStyle, FontWeight};
use typefit_text::{
    FontFamily, FontMetrics, FontMetricsProvider, FontStyle, MeasureError, TextMeasurer, TextStyle,
};

/// Probe text used for text-independent font metrics.
///
/// Any non-empty string resolves the same font and therefore the same line
/// metrics; a short ASCII probe keeps shaping cheap.
const METRICS_PROBE: &str = "Ag";

/// A measurer backed by Parley.
///
/// Both capabilities shape through the same interior-mutable contexts, so
/// this type is not reentrant; callers needing shared access must wrap it.
pub struct ParleyTextMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<parley::LayoutContext<()>>,
    display_scale: f32,
    quantize: bool,
}

impl core::fmt::Debug for ParleyTextMeasurer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ParleyTextMeasurer")
            .field("display_scale", &self.display_scale)
            .field("quantize", &self.quantize)
            .finish_non_exhaustive()
    }
}

impl ParleyTextMeasurer {
    /// Creates a new Parley-backed measurer using Parley's default system
    /// font configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(parley::LayoutContext::new()),
            display_scale: 1.0,
            quantize: true,
        }
    }

    /// Sets the display scale passed to Parley.
    ///
    /// This is typically a device pixel ratio. Measurements returned by this
    /// measurer are scaled back into logical coordinates (divide by scale).
    #[must_use]
    pub fn with_display_scale(mut self, display_scale: f32) -> Self {
        self.display_scale = display_scale.max(0.0);
        self
    }

    /// Sets whether Parley should quantize layout coordinates to pixel boundaries.
    #[must_use]
    pub fn with_quantize(mut self, quantize: bool) -> Self {
        self.quantize = quantize;
        self
    }

    fn parley_font_stack<'a>(family: &'a FontFamily) -> FontStack<'a> {
        let family = match family {
            FontFamily::Serif => ParleyFontFamily::Generic(GenericFamily::Serif),
            FontFamily::SansSerif => ParleyFontFamily::Generic(GenericFamily::SansSerif),
            FontFamily::Monospace => ParleyFontFamily::Generic(GenericFamily::Monospace),
            FontFamily::Named(name) => ParleyFontFamily::Named(Cow::Borrowed(name.as_ref())),
        };
        FontStack::from(family)
    }

    fn parley_font_style(style: FontStyle) -> ParleyFontStyle {
        match style {
            FontStyle::Normal => ParleyFontStyle::Normal,
            FontStyle::Italic => ParleyFontStyle::Italic,
            FontStyle::Oblique => ParleyFontStyle::Oblique(None),
        }
    }

    fn font_size_f32(font_size: f64) -> f32 {
        if !font_size.is_finite() {
            return 0.0;
        }
        let font_size = font_size.max(0.0);
        if font_size >= f64::from(f32::MAX) {
            f32::MAX
        } else {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "Value is clamped to f32::MAX above"
            )]
            {
                font_size as f32
            }
        }
    }

    /// Shapes `text` as a single line and returns that line's metrics,
    /// already scaled back into logical coordinates.
    fn line_metrics(&self, text: &str, style: &TextStyle) -> Result<LineExtents, MeasureError> {
        let scale = self.display_scale.max(1.0e-6);

        let mut font_cx = self.font_cx.borrow_mut();
        let mut layout_cx = self.layout_cx.borrow_mut();

        let mut builder = layout_cx.ranged_builder(&mut font_cx, text, scale, self.quantize);
        builder.push_default(StyleProperty::FontSize(Self::font_size_f32(
            style.font_size,
        )));
        builder.push_default(StyleProperty::FontStack(Self::parley_font_stack(
            &style.font_family,
        )));
        builder.push_default(StyleProperty::FontStyle(Self::parley_font_style(
            style.font_style,
        )));
        builder.push_default(StyleProperty::FontWeight(FontWeight::new(
            style.font_weight.0 as f32,
        )));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);
        layout.align(None, Alignment::Start, AlignmentOptions::default());

        // A non-empty build that yields no line means font resolution failed.
        let Some(line) = layout.lines().next() else {
            return Err(MeasureError::Unavailable);
        };

        let m = line.metrics();
        let scale = f64::from(scale);
        Ok(LineExtents {
            advance: f64::from(m.advance) / scale,
            ascent: f64::from(m.ascent) / scale,
            descent: f64::from(m.descent) / scale,
            leading: f64::from(m.leading) / scale,
        })
    }
}

struct LineExtents {
    advance: f64,
    ascent: f64,
    descent: f64,
    leading: f64,
}

impl Default for ParleyTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for ParleyTextMeasurer {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<f64, MeasureError> {
        let text = text.split('\n').next().unwrap_or("");
        if text.is_empty() {
            return Ok(0.0);
        }
        Ok(self.line_metrics(text, style)?.advance)
    }
}

impl FontMetricsProvider for ParleyTextMeasurer {
    fn font_metrics(&self, style: &TextStyle) -> Result<FontMetrics, MeasureError> {
        let m = self.line_metrics(METRICS_PROBE, style)?;
        // Parley reports ascent/descent as positive distances; convert to
        // signed baseline-relative form and split the leading evenly to
        // approximate the bounding extents.
        let half_leading = 0.5 * m.leading;
        Ok(FontMetrics {
            ascent: -m.ascent,
            descent: m.descent,
            top: -(m.ascent + half_leading),
            bottom: m.descent + half_leading,
        })
    }
}
