// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Number rendering primitives with ECMAScript semantics.
//!
//! Tick labels are specified in terms of `Number.prototype.toString`, `toPrecision`,
//! `toExponential` and `toFixed`, so this module reproduces their layout rules on top of
//! `core::fmt` (which already provides correctly rounded scientific digits):
//! - exponents are written with an explicit sign (`1.5e+7`, `2e-9`),
//! - `to_string` switches to exponential form outside `[1e-7, 1e21)`,
//! - `to_precision` switches when the exponent is `< -6` or `>= precision`.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

/// A finite, non-zero magnitude split into significand digits and a decimal exponent.
///
/// The value is `d0.d1d2… × 10^exponent`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Decimal {
    pub(crate) digits: String,
    pub(crate) exponent: i32,
}

impl Decimal {
    /// Shortest digits that round-trip `x`.
    pub(crate) fn shortest(x: f64) -> Self {
        Self::from_scientific(&format!("{:e}", x.abs()))
    }

    /// Exactly `significant` digits (at least one), correctly rounded.
    pub(crate) fn with_digits(x: f64, significant: usize) -> Self {
        let fraction = significant.max(1) - 1;
        Self::from_scientific(&format!("{:.*e}", fraction, x.abs()))
    }

    fn from_scientific(s: &str) -> Self {
        let (mantissa, exponent) = s.split_once('e').unwrap_or((s, "0"));
        Self {
            digits: mantissa.chars().filter(char::is_ascii_digit).collect(),
            exponent: exponent.parse().unwrap_or_default(),
        }
    }

    fn exponential(&self) -> String {
        let (head, tail) = self.digits.split_at(1);
        let mut out = String::from(head);
        if !tail.is_empty() {
            out.push('.');
            out.push_str(tail);
        }
        push_exponent(&mut out, self.exponent);
        out
    }
}

fn push_exponent(out: &mut String, exponent: i32) {
    out.push('e');
    out.push(if exponent < 0 { '-' } else { '+' });
    out.push_str(&exponent.unsigned_abs().to_string());
}

pub(crate) fn zeros(n: usize) -> String {
    "0".repeat(n)
}

fn non_finite(x: f64) -> String {
    if x.is_nan() {
        String::from("NaN")
    } else if x > 0.0 {
        String::from("Infinity")
    } else {
        String::from("-Infinity")
    }
}

fn sign(x: f64) -> &'static str {
    if x < 0.0 { "-" } else { "" }
}

/// Renders `x` like `Number.prototype.toString()`.
pub fn to_string(x: f64) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    if x == 0.0 {
        return String::from("0");
    }
    let d = Decimal::shortest(x);
    let k = d.digits.len();
    let n = d.exponent + 1;
    let body = if n > 0 && n <= 21 {
        let n = n.unsigned_abs() as usize;
        if k <= n {
            let mut s = d.digits.clone();
            s.push_str(&zeros(n - k));
            s
        } else {
            let (int, frac) = d.digits.split_at(n);
            format!("{int}.{frac}")
        }
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", zeros(n.unsigned_abs() as usize), d.digits)
    } else {
        d.exponential()
    };
    format!("{}{body}", sign(x))
}

/// Renders `x` like `Number.prototype.toPrecision(precision)`.
///
/// `precision` is clamped to `1..=100`.
pub fn to_precision(x: f64, precision: usize) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    let p = precision.clamp(1, 100);
    if x == 0.0 {
        return if p == 1 {
            String::from("0")
        } else {
            format!("0.{}", zeros(p - 1))
        };
    }
    let d = Decimal::with_digits(x, p);
    let e = d.exponent;
    let p = i32::try_from(p).unwrap_or(100);
    let body = if e < -6 || e >= p {
        d.exponential()
    } else if e == p - 1 {
        d.digits.clone()
    } else if e >= 0 {
        let (int, frac) = d.digits.split_at(e.unsigned_abs() as usize + 1);
        format!("{int}.{frac}")
    } else {
        format!("0.{}{}", zeros((e + 1).unsigned_abs() as usize), d.digits)
    };
    format!("{}{body}", sign(x))
}

/// Renders `x` like `Number.prototype.toExponential(fraction_digits)`.
///
/// With `None`, as many digits as needed to round-trip are used.
pub fn to_exponential(x: f64, fraction_digits: Option<usize>) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    let d = match fraction_digits {
        Some(f) => Decimal::with_digits(x, f.min(100) + 1),
        None => Decimal::shortest(x),
    };
    format!("{}{}", sign(x), d.exponential())
}

/// Renders `x` like `Number.prototype.toFixed(fraction_digits)`.
pub fn to_fixed(x: f64, fraction_digits: usize) -> String {
    if !x.is_finite() {
        return non_finite(x);
    }
    if x.abs() >= 1e21 {
        return to_string(x);
    }
    let x = if x == 0.0 { 0.0 } else { x };
    format!("{:.*}", fraction_digits.min(100), x)
}

/// Removes insignificant trailing zeros from the fractional part, and a dangling point.
///
/// For exponential strings only the mantissa is touched: `"1.500e+7"` becomes `"1.5e+7"`.
pub fn strip_trailing_zeros(s: &str) -> String {
    match s.find('e') {
        Some(i) => {
            let (mantissa, exponent) = s.split_at(i);
            let mut out = String::from(strip_mantissa(mantissa));
            out.push_str(exponent);
            out
        }
        None => String::from(strip_mantissa(s)),
    }
}

fn strip_mantissa(m: &str) -> &str {
    let m = if m.contains('.') {
        m.trim_end_matches('0')
    } else {
        m
    };
    m.strip_suffix('.').unwrap_or(m)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn to_string_matches_ecmascript_layout() {
        assert_eq!(to_string(0.0), "0");
        assert_eq!(to_string(-0.0), "0");
        assert_eq!(to_string(1.5), "1.5");
        assert_eq!(to_string(-42.0), "-42");
        assert_eq!(to_string(1e21), "1e+21");
        assert_eq!(to_string(123_456_789.0), "123456789");
        assert_eq!(to_string(0.000_001), "0.000001");
        assert_eq!(to_string(0.000_000_1), "1e-7");
        assert_eq!(to_string(f64::NAN), "NaN");
    }

    #[test]
    fn to_precision_switches_to_exponential_on_large_exponents() {
        assert_eq!(to_precision(1_234_567.0, 3), "1.23e+6");
        assert_eq!(to_precision(123.456, 5), "123.46");
        assert_eq!(to_precision(0.000_123_456, 3), "0.000123");
        assert_eq!(to_precision(0.0, 3), "0.00");
        assert_eq!(to_precision(99.99, 2), "1.0e+2");
        assert_eq!(to_precision(-5.0, 1), "-5");
    }

    #[test]
    fn to_exponential_writes_signed_exponents() {
        assert_eq!(to_exponential(1_500_000.0, None), "1.5e+6");
        assert_eq!(to_exponential(1_500_000.0, Some(3)), "1.500e+6");
        assert_eq!(to_exponential(0.000_25, Some(1)), "2.5e-4");
        assert_eq!(to_exponential(0.0, None), "0e+0");
    }

    #[test]
    fn to_fixed_does_not_print_negative_zero() {
        assert_eq!(to_fixed(-0.0, 2), "0.00");
        assert_eq!(to_fixed(1.23456, 2), "1.23");
    }

    #[test]
    fn strip_trailing_zeros_only_touches_fractions() {
        assert_eq!(strip_trailing_zeros("1.50000"), "1.5");
        assert_eq!(strip_trailing_zeros("2.000"), "2");
        assert_eq!(strip_trailing_zeros("1000"), "1000");
        assert_eq!(strip_trailing_zeros("1.500e+7"), "1.5e+7");
        assert_eq!(strip_trailing_zeros("1.000e+10"), "1e+10");
    }
}
