// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! d3-style number format specifiers.
//!
//! The grammar is `[[fill]align][sign][symbol][0][width][,][.precision][~][type]`:
//!
//! - `align` is one of `<` (left), `>` (right), `^` (centre) or `=` (pad after the sign),
//! - `sign` is one of `-`, `+`, `(` or a space,
//! - `symbol` is `$` (currency) or `#` (radix prefix for `b`, `o`, `x`, `X`),
//! - `0` enables zero padding, `,` enables thousands grouping,
//! - `~` trims insignificant trailing zeros.
//!
//! Supported types are `e f g r s % p d x X o b c n` and none. The locale is fixed to
//! `en-US` conventions: `.` decimal point, `,` grouping every three digits, `$` currency.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;

use crate::error::FormatError;
#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::render::{
    Decimal, strip_trailing_zeros, to_exponential, to_fixed, to_precision, to_string, zeros,
};

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "\u{b5}", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// Padding alignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// `<`
    Left,
    /// `>`
    Right,
    /// `^`
    Center,
    /// `=`: padding goes between the sign/symbol and the digits.
    AfterSign,
}

/// How the sign of a value is shown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sign {
    /// Minus for negative values, nothing for positive ones.
    Minus,
    /// Minus for negative values, plus for positive ones.
    Plus,
    /// Parentheses around negative values.
    Parentheses,
    /// Minus for negative values, a space for positive ones.
    Space,
}

/// Prefix symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Symbol {
    /// `$`
    Currency,
    /// `#`: `0b`, `0o` or `0x` for the radix types.
    Radix,
}

/// Presentation type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatType {
    /// `e`: exponent notation.
    Exponent,
    /// `f`: fixed point.
    Fixed,
    /// `g`: decimal or exponent notation, rounded to significant digits.
    General,
    /// `r`: decimal notation, rounded to significant digits.
    Rounded,
    /// `s`: decimal notation with an SI prefix.
    Si,
    /// `%`: multiply by 100, fixed point, then `%`.
    Percent,
    /// `p`: multiply by 100, significant digits, then `%`.
    PercentRounded,
    /// `d`: integer, rounded.
    Integer,
    /// `b`
    Binary,
    /// `o`
    Octal,
    /// `x`
    HexLower,
    /// `X`
    HexUpper,
    /// `c`: the value as text, without sign handling.
    Character,
}

impl FormatType {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'e' => Self::Exponent,
            'f' => Self::Fixed,
            'g' => Self::General,
            'r' => Self::Rounded,
            's' => Self::Si,
            '%' => Self::Percent,
            'p' => Self::PercentRounded,
            'd' => Self::Integer,
            'b' => Self::Binary,
            'o' => Self::Octal,
            'x' => Self::HexLower,
            'X' => Self::HexUpper,
            'c' => Self::Character,
            _ => return None,
        })
    }

    fn counts_significant_digits(self) -> bool {
        matches!(
            self,
            Self::General | Self::Rounded | Self::Si | Self::PercentRounded
        )
    }

    fn splits_decimal_suffix(self) -> bool {
        matches!(
            self,
            Self::Integer
                | Self::Exponent
                | Self::Fixed
                | Self::General
                | Self::PercentRounded
                | Self::Rounded
                | Self::Si
                | Self::Percent
        )
    }

    fn radix_prefix(self) -> &'static str {
        match self {
            Self::Binary => "0b",
            Self::Octal => "0o",
            Self::HexLower | Self::HexUpper => "0x",
            _ => "",
        }
    }

    /// Renders a non-negative value, returning the SI prefix exponent for `s`.
    fn render(self, x: f64, precision: usize) -> (String, i32) {
        if !x.is_finite() {
            return (to_string(x), 0);
        }
        let text = match self {
            Self::Exponent => to_exponential(x, Some(precision)),
            Self::Fixed => to_fixed(x, precision),
            Self::General => to_precision(x, precision),
            Self::Rounded => rounded(x, precision),
            Self::Si => return si(x, precision),
            Self::Percent => to_fixed(x * 100.0, precision),
            Self::PercentRounded => rounded(x * 100.0, precision),
            Self::Integer => format!("{:.0}", x.round()),
            Self::Binary => format!("{:b}", to_integer(x)),
            Self::Octal => format!("{:o}", to_integer(x)),
            Self::HexLower => format!("{:x}", to_integer(x)),
            Self::HexUpper => format!("{:X}", to_integer(x)),
            Self::Character => to_string(x),
        };
        (text, 0)
    }
}

fn to_integer(x: f64) -> u64 {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "saturating conversion of a finite non-negative value"
    )]
    {
        x.round() as u64
    }
}

/// Significand digits and exponent of `x` rounded to `precision` digits (shortest when `0`).
fn decimal_parts(x: f64, precision: usize) -> Decimal {
    if precision == 0 {
        Decimal::shortest(x)
    } else {
        Decimal::with_digits(x, precision)
    }
}

fn len_i32(s: &str) -> i32 {
    i32::try_from(s.len()).unwrap_or(i32::MAX)
}

fn index(i: i32) -> usize {
    usize::try_from(i).unwrap_or_default()
}

/// Decimal notation rounded to `precision` significant digits.
fn rounded(x: f64, precision: usize) -> String {
    let d = decimal_parts(x, precision);
    let e = d.exponent;
    let n = len_i32(&d.digits);
    if e < 0 {
        format!("0.{}{}", zeros(index(-e - 1)), d.digits)
    } else if n > e + 1 {
        let (int, frac) = d.digits.split_at(index(e + 1));
        format!("{int}.{frac}")
    } else {
        format!("{}{}", d.digits, zeros(index(e - n + 1)))
    }
}

/// Decimal notation scaled to the nearest SI prefix, with the prefix exponent (in thousands).
fn si(x: f64, precision: usize) -> (String, i32) {
    let d = decimal_parts(x, precision);
    let prefix_exponent = d.exponent.div_euclid(3).clamp(-8, 8);
    let i = d.exponent - prefix_exponent * 3 + 1;
    let n = len_i32(&d.digits);
    let text = if i == n {
        d.digits
    } else if i > n {
        format!("{}{}", d.digits, zeros(index(i - n)))
    } else if i > 0 {
        let (int, frac) = d.digits.split_at(index(i));
        format!("{int}.{frac}")
    } else {
        let rest = decimal_parts(x, index(i32::try_from(precision).unwrap_or(0) + i - 1));
        format!("0.{}{}", zeros(index(1 - i)), rest.digits)
    };
    (text, prefix_exponent)
}

/// Inserts `,` every three digits from the right, stopping once `width` is reached.
fn group(value: &str, width: usize) -> String {
    let digits: Vec<char> = value.chars().collect();
    let mut parts: Vec<String> = Vec::new();
    let mut i = digits.len();
    let mut g = 3_usize;
    let mut length = 0_usize;
    while i > 0 && g > 0 {
        if length + g + 1 > width {
            g = width.saturating_sub(length).max(1);
        }
        let start = i.saturating_sub(g);
        parts.push(digits[start..i].iter().collect());
        i = start;
        length += g + 1;
        if length > width {
            break;
        }
        g = 3;
    }
    parts.reverse();
    parts.join(",")
}

/// A parsed number format specifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    fill: char,
    align: Align,
    sign: Sign,
    symbol: Option<Symbol>,
    zero: bool,
    width: usize,
    comma: bool,
    precision: usize,
    trim: bool,
    kind: FormatType,
}

impl NumberFormat {
    /// Parses a specifier such as `",.2f"` or `"+.1%"`.
    pub fn parse(specifier: &str) -> Result<Self, FormatError> {
        let invalid = || FormatError::InvalidSpecifier(String::from(specifier));
        let chars: Vec<char> = specifier.chars().collect();
        let mut pos = 0;

        let mut fill = ' ';
        let mut align = None;
        if let Some(a) = chars.get(1).copied().and_then(align_from_char) {
            fill = chars[0];
            align = Some(a);
            pos = 2;
        } else if let Some(a) = chars.first().copied().and_then(align_from_char) {
            align = Some(a);
            pos = 1;
        }

        let sign = match chars.get(pos) {
            Some('-') => Some(Sign::Minus),
            Some('+') => Some(Sign::Plus),
            Some('(') => Some(Sign::Parentheses),
            Some(' ') => Some(Sign::Space),
            _ => None,
        };
        if sign.is_some() {
            pos += 1;
        }

        let symbol = match chars.get(pos) {
            Some('$') => Some(Symbol::Currency),
            Some('#') => Some(Symbol::Radix),
            _ => None,
        };
        if symbol.is_some() {
            pos += 1;
        }

        let mut zero = chars.get(pos) == Some(&'0');
        if zero {
            pos += 1;
        }

        let width = take_number(&chars, &mut pos).map_err(|()| invalid())?;

        let mut comma = chars.get(pos) == Some(&',');
        if comma {
            pos += 1;
        }

        let mut precision = None;
        if chars.get(pos) == Some(&'.') {
            pos += 1;
            precision = Some(
                take_number(&chars, &mut pos)
                    .map_err(|()| invalid())?
                    .ok_or_else(invalid)?,
            );
        }

        let mut trim = chars.get(pos) == Some(&'~');
        if trim {
            pos += 1;
        }

        let kind = match chars.get(pos) {
            None => None,
            Some('n') => {
                comma = true;
                Some(FormatType::General)
            }
            Some(&c) => Some(FormatType::from_char(c).ok_or_else(invalid)?),
        };
        if kind.is_some() {
            pos += 1;
        }
        if pos != chars.len() {
            return Err(invalid());
        }

        let kind = match kind {
            Some(kind) => kind,
            None => {
                precision = precision.or(Some(12));
                trim = true;
                FormatType::General
            }
        };

        let mut align = align.unwrap_or(Align::Right);
        if zero || (fill == '0' && align == Align::AfterSign) {
            zero = true;
            fill = '0';
            align = Align::AfterSign;
        }

        let precision = match precision {
            None => 6,
            Some(p) if kind.counts_significant_digits() => p.clamp(1, 21),
            Some(p) => p.min(20),
        };

        Ok(Self {
            fill,
            align,
            sign: sign.unwrap_or(Sign::Minus),
            symbol,
            zero,
            width: width.unwrap_or(0),
            comma,
            precision,
            trim,
            kind,
        })
    }

    /// The presentation type.
    pub fn kind(&self) -> FormatType {
        self.kind
    }

    /// The effective precision after defaults and clamping.
    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Formats `x`.
    pub fn format(&self, x: f64) -> String {
        let mut prefix = String::new();
        let mut suffix = String::new();
        let symbol_prefix = match self.symbol {
            Some(Symbol::Currency) => "$",
            Some(Symbol::Radix) => self.kind.radix_prefix(),
            None => "",
        };
        let unit_suffix = match self.kind {
            FormatType::Percent | FormatType::PercentRounded => "%",
            _ => "",
        };

        let mut value;
        if self.kind == FormatType::Character {
            prefix.push_str(symbol_prefix);
            suffix.push_str(&to_string(x));
            suffix.push_str(unit_suffix);
            value = String::new();
        } else {
            let mut negative = x < 0.0 || (x == 0.0 && x.is_sign_negative());
            let (mut body, prefix_exponent) = if x.is_nan() {
                (String::from("NaN"), 0)
            } else {
                self.kind.render(x.abs(), self.precision)
            };
            if self.trim {
                body = strip_trailing_zeros(&body);
            }
            if negative && self.sign != Sign::Plus && body.parse::<f64>() == Ok(0.0) {
                negative = false;
            }

            prefix.push_str(match (negative, self.sign) {
                (true, Sign::Parentheses) => "(",
                (true, _) => "-",
                (false, Sign::Plus) => "+",
                (false, Sign::Space) => " ",
                (false, _) => "",
            });
            prefix.push_str(symbol_prefix);

            if self.kind == FormatType::Si {
                let slot = usize::try_from(prefix_exponent + 8).unwrap_or(8);
                suffix.push_str(SI_PREFIXES.get(slot).copied().unwrap_or_default());
            }
            suffix.push_str(unit_suffix);
            if negative && self.sign == Sign::Parentheses {
                suffix.push(')');
            }

            if self.kind.splits_decimal_suffix() {
                if let Some(i) = body.find(|c: char| !c.is_ascii_digit()) {
                    let tail = body.split_off(i);
                    suffix.insert_str(0, &tail);
                }
            }
            value = body;
        }

        if self.comma && !self.zero {
            value = group(&value, usize::MAX);
        }

        let suffix_len = suffix.chars().count();
        let length = prefix.chars().count() + value.chars().count() + suffix_len;
        let mut padding: String = if length < self.width {
            core::iter::repeat_n(self.fill, self.width - length).collect()
        } else {
            String::new()
        };

        if self.comma && self.zero {
            let limit = if padding.is_empty() {
                usize::MAX
            } else {
                self.width.saturating_sub(suffix_len)
            };
            padding.push_str(&value);
            value = group(&padding, limit);
            padding.clear();
        }

        match self.align {
            Align::Left => format!("{prefix}{value}{suffix}{padding}"),
            Align::AfterSign => format!("{prefix}{padding}{value}{suffix}"),
            Align::Center => {
                let half = padding.chars().count() / 2;
                let (before, after): (String, String) = {
                    let mut it = padding.chars();
                    let before = it.by_ref().take(half).collect();
                    (before, it.collect())
                };
                format!("{before}{prefix}{value}{suffix}{after}")
            }
            Align::Right => format!("{padding}{prefix}{value}{suffix}"),
        }
    }
}

impl FromStr for NumberFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn align_from_char(c: char) -> Option<Align> {
    match c {
        '<' => Some(Align::Left),
        '>' => Some(Align::Right),
        '^' => Some(Align::Center),
        '=' => Some(Align::AfterSign),
        _ => None,
    }
}

/// Reads a run of ASCII digits; `Err` on overflow.
fn take_number(chars: &[char], pos: &mut usize) -> Result<Option<usize>, ()> {
    let start = *pos;
    let mut n: usize = 0;
    while let Some(d) = chars.get(*pos).and_then(|c| c.to_digit(10)) {
        let d = usize::try_from(d).map_err(|_| ())?;
        n = n.checked_mul(10).and_then(|n| n.checked_add(d)).ok_or(())?;
        *pos += 1;
    }
    Ok((*pos > start).then_some(n))
}
