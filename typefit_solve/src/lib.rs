// Copyright 2026 the Typefit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Solvers that fit text to pixel constraints.
//!
//! Given the measurement capabilities from `typefit_text`, this crate
//! answers two questions:
//! - [`FontSizeSolver`]: which font size renders at a target pixel height?
//! - [`truncation_index`]: where must a string be cut to fit a pixel width?
//!
//! Both are stateless, synchronous computations over the supplied measurer;
//! nothing here shapes or renders text. Measurement failures surface as
//! errors rather than being papered over with defaults.

#![no_std]

extern crate alloc;

mod size;
mod truncate;

pub use size::{FontSizeSolver, SizeSearch, SolveError};
pub use truncate::{truncation_index, truncation_index_bisect};
