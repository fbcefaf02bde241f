// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Example binary for the typefit solvers.
//!
//! Runs against the heuristic measurer by default; build with
//! `--features parley` to measure through a real shaping engine.

use typefit_solve::{FontSizeSolver, truncation_index};
use typefit_text::{FontMetricsProvider, TextMeasurer, TextStyle};

fn main() {
    #[cfg(not(feature = "parley"))]
    demo(&typefit_text::HeuristicTextMeasurer);

    #[cfg(feature = "parley")]
    demo(&typefit_text_parley::ParleyTextMeasurer::new());
}

fn demo<M: TextMeasurer + FontMetricsProvider>(measurer: &M) {
    let style = TextStyle::new(12.0);

    let metrics = measurer.font_metrics(&style).unwrap();
    println!(
        "12px text: height {}px, top offset {}px",
        metrics.text_height(),
        metrics.top_offset()
    );

    // A probe cap keeps the hunt finite when the backend's heights skip the
    // target.
    let solver = FontSizeSolver::new().with_max_probes(500);
    match solver.solve(measurer, &style, 48) {
        Ok(size) => println!("48px-tall text wants font size {size}"),
        Err(err) => println!("no exact size for 48px: {err:?}"),
    }

    let label = "The quick brown fox jumps over the lazy dog";
    for max_width in [400.0, 120.0, 24.0] {
        match truncation_index(measurer, &style, label, max_width) {
            Ok(None) => println!("{max_width:>5}px: {label:?} fits"),
            Ok(Some(idx)) => {
                let kept: String = label.chars().take(idx).collect();
                println!("{max_width:>5}px: cut at {idx} -> {kept:?}");
            }
            Err(err) => println!("{max_width:>5}px: measurement failed: {err:?}"),
        }
    }
}
