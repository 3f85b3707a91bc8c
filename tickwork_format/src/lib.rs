// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locale-free tick label formatting.
//!
//! The building blocks used by `tickwork_axis` to turn tick values into strings:
//! - **Rendering primitives** with ECMAScript number layout (`1.5e+7`, `0.000001`).
//! - **Adaptive precision** inferred from a tick set, for linear and log scales.
//! - **Number specifiers** in the d3-format mini-language (`",.2f"`, `".3s"`, `"#x"`).
//! - **Date patterns** with d3-time-format directives, and multi-resolution date formats
//!   that pick the coarsest label that still distinguishes neighbouring ticks.
//!
//! Everything is `no_std` + `alloc`; dates are rendered in a fixed UTC offset.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod adaptive;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod render;
mod specifier;
mod time;

pub use adaptive::{AdaptiveFormat, Precision, digit_count, linear_precision, log_precision};
pub use error::FormatError;
pub use render::{strip_trailing_zeros, to_exponential, to_fixed, to_precision, to_string};
pub use specifier::{Align, FormatType, NumberFormat, Sign, Symbol};
pub use time::{
    DatePredicate, DateResolution, MultiTimeFormat, TimePattern, datetime_from_millis,
    is_time_format,
};
