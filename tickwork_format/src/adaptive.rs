// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive precision for continuous-scale tick labels.
//!
//! A label set is rendered with a single [`Precision`] inferred from the tick spacing and the
//! magnitude of the extreme ticks, so that neighbouring labels differ in their last shown
//! digit but never carry noise digits:
//!
//! - small integers (`maxDigits <= 6` with a spacing of at least one) render as integers,
//! - large values render with `|maxDigits - diffDigits| + 1` significant digits (capped),
//! - fractional spacings add the digits needed to resolve the step.
//!
//! Every rendering that reaches six digits switches to exponential notation.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::render::{strip_trailing_zeros, to_exponential, to_precision, to_string};

/// Renderings with at least this many digits are re-rendered exponentially.
const MAX_PLAIN_DIGITS: usize = 6;

/// Largest tick magnitude (in integer digits) still printed as a plain integer.
const MAX_INTEGER_DIGITS: i32 = 6;

/// Cap on the significant digits added by precision inference.
const MAX_INFERRED_DIGITS: i32 = 6;

/// Log ticks at least this far apart (in decades) are printed at natural precision.
///
/// `log10(2)` rounded down, so that `1, 2, 5, 10` ticks count as "far apart".
const LOG_NATURAL_THRESHOLD: f64 = 0.3010;

/// Significant digits used for closely spaced log ticks.
const LOG_DENSE_DIGITS: u8 = 3;

/// How many digits a label set is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precision {
    /// Round to the nearest integer.
    Integer,
    /// Shortest round-tripping representation.
    Natural,
    /// A fixed number of significant digits.
    Significant(u8),
}

/// Number of digits before the decimal point of `|x|`, as `floor(log10|x|) + 1`.
///
/// Zero counts as one digit. Values below one have zero or negative digit counts
/// (`0.05` has `-1`).
pub fn digit_count(x: f64) -> i32 {
    if x == 0.0 {
        return 1;
    }
    let d = x.abs().log10().floor();
    if !d.is_finite() {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite f64 lies well inside the i32 range"
    )]
    {
        d as i32 + 1
    }
}

/// Infers the precision for ticks of a linear scale.
///
/// Uses the spacing of the first two ticks and the larger magnitude of the first and last
/// tick. Fewer than two (finite) ticks yield [`Precision::Natural`].
pub fn linear_precision(ticks: &[f64]) -> Precision {
    let (Some(&t0), Some(&t1), Some(&last)) = (ticks.first(), ticks.get(1), ticks.last()) else {
        return Precision::Natural;
    };
    if !(t0.is_finite() && t1.is_finite() && last.is_finite()) {
        return Precision::Natural;
    }
    let max_digits = digit_count(t0.abs().max(last.abs()));
    let diff_digits = digit_count((t1 - t0).abs());

    if max_digits >= 0 && diff_digits > 0 {
        if max_digits <= MAX_INTEGER_DIGITS {
            Precision::Integer
        } else {
            significant((max_digits - diff_digits).abs().min(MAX_INFERRED_DIGITS) + 1)
        }
    } else if diff_digits <= 0 {
        significant((diff_digits.abs() + max_digits).min(MAX_INFERRED_DIGITS) + 1)
    } else {
        Precision::Natural
    }
}

/// Infers the precision for ticks of a log scale.
///
/// Ticks at least half a decade apart print naturally; denser ticks use three significant
/// digits.
pub fn log_precision(ticks: &[f64]) -> Precision {
    let (Some(&t0), Some(&t1)) = (ticks.first(), ticks.get(1)) else {
        return Precision::Natural;
    };
    let ratio = (t1 / t0).log10().abs();
    if ratio.is_nan() || ratio >= LOG_NATURAL_THRESHOLD {
        Precision::Natural
    } else {
        Precision::Significant(LOG_DENSE_DIGITS)
    }
}

fn significant(digits: i32) -> Precision {
    Precision::Significant(u8::try_from(digits.clamp(1, 21)).unwrap_or(1))
}

/// A number formatter that renders every value with one inferred [`Precision`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdaptiveFormat {
    precision: Precision,
}

impl AdaptiveFormat {
    /// Creates a formatter with an explicit precision.
    pub fn new(precision: Precision) -> Self {
        Self { precision }
    }

    /// Infers the precision from linear-scale ticks.
    pub fn linear(ticks: &[f64]) -> Self {
        Self::new(linear_precision(ticks))
    }

    /// Infers the precision from log-scale ticks.
    pub fn log(ticks: &[f64]) -> Self {
        Self::new(log_precision(ticks))
    }

    /// Returns the precision in use.
    pub fn precision(&self) -> Precision {
        self.precision
    }

    /// Formats a single value.
    pub fn format(&self, x: f64) -> String {
        match self.precision {
            Precision::Integer => to_string((x + 0.5).floor()),
            Precision::Natural => {
                let plain = to_string(x);
                if plain_digits(&plain) < MAX_PLAIN_DIGITS {
                    return strip_trailing_zeros(&plain);
                }
                let exp = to_exponential(x, None);
                if exp.len() > MAX_PLAIN_DIGITS {
                    strip_trailing_zeros(&to_exponential(x, Some(MAX_PLAIN_DIGITS)))
                } else {
                    strip_trailing_zeros(&exp)
                }
            }
            Precision::Significant(p) => {
                let plain = to_precision(x, usize::from(p));
                if plain_digits(&plain) < MAX_PLAIN_DIGITS {
                    strip_trailing_zeros(&plain)
                } else {
                    strip_trailing_zeros(&to_exponential(x, Some(usize::from(p))))
                }
            }
        }
    }
}

/// Counts the digits of a rendering, ignoring sign, point and exponent marker.
fn plain_digits(s: &str) -> usize {
    s.chars().filter(char::is_ascii_digit).count()
}
