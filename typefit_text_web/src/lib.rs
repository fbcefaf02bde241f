// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web/WASM measurement adapter.
//!
//! This crate implements [`typefit_text::TextMeasurer`] and
//! [`typefit_text::FontMetricsProvider`] for `wasm32-*` targets using HTML
//! Canvas `measureText`.
//!
//! Notes:
//! - This uses `web-sys`/`wasm-bindgen` only on `wasm32` targets.
//! - Non-`wasm32` builds fall back to a heuristic measurer (a platform
//!   property, not a failure).
//! - Canvas query failures surface as [`MeasureError::Unavailable`]; the
//!   solvers consuming these capabilities must not be fed guessed defaults.

#![no_std]

extern crate alloc;

#[cfg(target_arch = "wasm32")]
use alloc::{format, string::String};
use typefit_text::{
    FontMetrics, FontMetricsProvider, HeuristicTextMeasurer, MeasureError, TextMeasurer, TextStyle,
};

/// A `wasm32` measurer backed by HTML Canvas 2D text metrics.
///
/// On non-`wasm32` targets, this type is still available but always falls
/// back to [`HeuristicTextMeasurer`].
#[derive(Clone, Debug)]
pub struct WebTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    ctx: web_sys::CanvasRenderingContext2d,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for WebTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl WebTextMeasurer {
    #[cfg(target_arch = "wasm32")]
    fn css_font(style: &TextStyle) -> String {
        let family = style.font_family.as_css_family();
        let weight = style.font_weight.0;
        let font_style = match style.font_style {
            typefit_text::FontStyle::Normal => "normal",
            typefit_text::FontStyle::Italic => "italic",
            typefit_text::FontStyle::Oblique => "oblique",
        };
        format!("{font_style} {weight} {}px {family}", style.font_size)
    }

    /// Creates a web measurer using an offscreen canvas.
    ///
    /// This requires a browser-like environment with `window` and `document`.
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Result<Self, wasm_bindgen::JsValue> {
        use wasm_bindgen::JsCast as _;

        let window = web_sys::window()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("typefit_text_web: missing window"))?;
        let document = window
            .document()
            .ok_or_else(|| wasm_bindgen::JsValue::from_str("typefit_text_web: missing document"))?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| {
                wasm_bindgen::JsValue::from_str("typefit_text_web: missing 2d context")
            })?
            .dyn_into::<web_sys::CanvasRenderingContext2d>()?;
        Ok(Self { ctx })
    }

    /// Creates a web measurer that uses an existing canvas 2D context.
    ///
    /// This is useful for embedders that want to reuse an existing canvas
    /// (or an offscreen canvas) instead of having `typefit_text_web` create
    /// DOM nodes.
    #[cfg(target_arch = "wasm32")]
    #[must_use]
    pub fn from_canvas_context(ctx: web_sys::CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    /// Creates a non-web measurer that always falls back to heuristics.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn new() -> Self {
        Self {}
    }

    /// Queries canvas text metrics for `text` under `style`.
    #[cfg(target_arch = "wasm32")]
    fn canvas_metrics(
        &self,
        text: &str,
        style: &TextStyle,
    ) -> Result<web_sys::TextMetrics, MeasureError> {
        self.ctx.set_font(&Self::css_font(style));
        self.ctx
            .measure_text(text)
            .map_err(|_| MeasureError::Unavailable)
    }
}

impl TextMeasurer for WebTextMeasurer {
    fn measure_width(&self, text: &str, style: &TextStyle) -> Result<f64, MeasureError> {
        #[cfg(target_arch = "wasm32")]
        {
            Ok(self.canvas_metrics(text, style)?.width())
        }

        #[cfg(not(target_arch = "wasm32"))]
        HeuristicTextMeasurer.measure_width(text, style)
    }
}

impl FontMetricsProvider for WebTextMeasurer {
    fn font_metrics(&self, style: &TextStyle) -> Result<FontMetrics, MeasureError> {
        #[cfg(target_arch = "wasm32")]
        {
            // `width` is widely supported; the bounding box fields are
            // supported in modern browsers but may be 0 or absent in older
            // engines. Treat zeros as unknown and fall back to ratios.
            let metrics = self.canvas_metrics("Ag", style)?;
            let ascent = metrics.actual_bounding_box_ascent();
            let descent = metrics.actual_bounding_box_descent();

            let ascent = if ascent > 0.0 {
                ascent
            } else {
                0.8 * style.font_size
            };
            let descent = if descent > 0.0 {
                descent
            } else {
                0.2 * style.font_size
            };

            // Canvas exposes no glyph bounding extents beyond the probe's
            // ink box; pad the recommended lines by a small em fraction.
            Ok(FontMetrics {
                ascent: -ascent,
                descent,
                top: -(ascent + 0.1 * style.font_size),
                bottom: descent + 0.05 * style.font_size,
            })
        }

        #[cfg(not(target_arch = "wasm32"))]
        HeuristicTextMeasurer.font_metrics(style)
    }
}
