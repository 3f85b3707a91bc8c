// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Date patterns and multi-resolution date formats.
//!
//! Patterns use d3-time-format directives (`%Y-%m-%d`, `%I %p`, `%-d`, ...). They are
//! translated once into `chrono` strftime items and rendered in a fixed UTC offset, so the
//! output does not depend on the host's local time zone.

extern crate alloc;

use alloc::string::String;
use core::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Datelike, FixedOffset, Timelike};
use smallvec::SmallVec;

use crate::error::FormatError;

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;
/// Tick gaps shorter than this are labelled like day ticks.
const SHORT_MONTH_MS: i64 = 27 * DAY_MS;
/// Tick gaps shorter than this are labelled like month ticks.
const SHORT_YEAR_MS: i64 = 12 * SHORT_MONTH_MS;

/// Converts epoch milliseconds to a date-time in `offset`.
///
/// Returns `None` outside chrono's representable range.
pub fn datetime_from_millis(millis: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.with_timezone(&offset))
}

/// Returns `true` when `s` contains at least one recognised date directive.
///
/// Used to decide whether a format string attached to a categorical axis is a date
/// pattern or a number specifier.
pub fn is_time_format(s: &str) -> bool {
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            continue;
        }
        let mut d = chars.next();
        if matches!(d, Some('-' | '_' | '0')) {
            d = chars.next();
        }
        if d.is_some_and(|d| "aAbBcdeHIjLmMpSUwWxXyYZ".contains(d)) {
            return true;
        }
    }
    false
}

/// A compiled date pattern.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimePattern {
    source: String,
    strftime: String,
}

impl TimePattern {
    /// Parses a d3-time-format pattern.
    ///
    /// Unknown directives print their letter, as in d3.
    pub fn parse(pattern: &str) -> Result<Self, FormatError> {
        let compiled = Self::compile(pattern);
        if StrftimeItems::new(&compiled.strftime).any(|item| matches!(item, Item::Error)) {
            return Err(FormatError::InvalidPattern(String::from(pattern)));
        }
        Ok(compiled)
    }

    fn compile(pattern: &str) -> Self {
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let Some(mut d) = chars.next() else { break };
            let mut pad = None;
            if matches!(d, '-' | '_' | '0') {
                pad = Some(d);
                match chars.next() {
                    Some(next) => d = next,
                    None => break,
                }
            }
            match d {
                'd' | 'e' | 'H' | 'I' | 'j' | 'm' | 'M' | 'S' | 'U' | 'w' | 'W' | 'y' | 'Y' => {
                    out.push('%');
                    out.extend(pad);
                    out.push(d);
                }
                'a' | 'A' | 'b' | 'B' | 'p' => {
                    out.push('%');
                    out.push(d);
                }
                'Z' => out.push_str("%z"),
                'L' => out.push_str("%3f"),
                'c' => out.push_str("%a %b %e %H:%M:%S %Y"),
                'x' => out.push_str("%m/%d/%Y"),
                'X' => out.push_str("%H:%M:%S"),
                '%' => out.push_str("%%"),
                other => out.push(other),
            }
        }
        Self {
            source: String::from(pattern),
            strftime: out,
        }
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Formats a date-time.
    pub fn format(&self, dt: &DateTime<FixedOffset>) -> String {
        let mut out = String::new();
        let items = StrftimeItems::new(&self.strftime);
        if write!(out, "{}", dt.format_with_items(items)).is_err() {
            out.clear();
        }
        out
    }

    /// Formats epoch milliseconds in `offset`; out-of-range instants yield an empty string.
    pub fn format_millis(&self, millis: i64, offset: FixedOffset) -> String {
        datetime_from_millis(millis, offset)
            .map(|dt| self.format(&dt))
            .unwrap_or_default()
    }
}

/// The granularity of a date tick set, chosen from the gap between ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DateResolution {
    /// Gap below one second.
    SubSecond,
    /// Gap below one minute.
    Seconds,
    /// Gap below one hour.
    Minutes,
    /// Gap below one day.
    Hours,
    /// Gap below 27 days.
    Days,
    /// Gap below 324 days.
    Months,
    /// Anything longer.
    Years,
}

impl DateResolution {
    /// Picks the resolution for a gap in milliseconds.
    pub fn for_gap(gap_ms: i64) -> Self {
        let gap = gap_ms.saturating_abs();
        if gap < SECOND_MS {
            Self::SubSecond
        } else if gap < MINUTE_MS {
            Self::Seconds
        } else if gap < HOUR_MS {
            Self::Minutes
        } else if gap < DAY_MS {
            Self::Hours
        } else if gap < SHORT_MONTH_MS {
            Self::Days
        } else if gap < SHORT_YEAR_MS {
            Self::Months
        } else {
            Self::Years
        }
    }

    /// Picks the resolution from the first two ticks; fewer ticks select [`Self::Years`].
    pub fn for_ticks(ticks: &[i64]) -> Self {
        match ticks {
            [t0, t1, ..] => Self::for_gap(t1.saturating_sub(*t0)),
            _ => Self::Years,
        }
    }
}

/// Decides whether a rule of a [`MultiTimeFormat`] applies to a date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatePredicate {
    /// The millisecond field is non-zero.
    Millisecond,
    /// The second field is non-zero.
    Second,
    /// The minute field is non-zero.
    Minute,
    /// The hour field is non-zero.
    Hour,
    /// The day of month is not the first.
    NotFirstDay,
    /// The month is not January.
    NotJanuary,
    /// Always applies.
    Always,
}

impl DatePredicate {
    /// Evaluates the predicate.
    pub fn matches(self, dt: &DateTime<FixedOffset>) -> bool {
        match self {
            Self::Millisecond => dt.timestamp_subsec_millis() != 0,
            Self::Second => dt.second() != 0,
            Self::Minute => dt.minute() != 0,
            Self::Hour => dt.hour() != 0,
            Self::NotFirstDay => dt.day() != 1,
            Self::NotJanuary => dt.month0() != 0,
            Self::Always => true,
        }
    }
}

/// An ordered list of `(pattern, predicate)` rules; the first matching rule formats a date.
#[derive(Clone, Debug)]
pub struct MultiTimeFormat {
    resolution: DateResolution,
    rules: SmallVec<[(TimePattern, DatePredicate); 3]>,
    offset: FixedOffset,
}

impl MultiTimeFormat {
    /// The rule set for a resolution.
    pub fn new(resolution: DateResolution, offset: FixedOffset) -> Self {
        use DatePredicate::*;

        let rules: &[(&str, DatePredicate)] = match resolution {
            DateResolution::SubSecond => {
                &[(".%L", Millisecond), (":%S", Second), ("%I:%M", Always)]
            }
            DateResolution::Seconds => &[(":%S", Second), ("%I:%M", Always)],
            DateResolution::Minutes => &[("%I:%M", Minute), ("%I %p", Always)],
            DateResolution::Hours => &[("%I %p", Hour), ("%b %d", Always)],
            DateResolution::Days | DateResolution::Months => {
                &[("%b %d", NotFirstDay), ("%b %Y", Always)]
            }
            DateResolution::Years => &[
                ("%b %d", NotFirstDay),
                ("%b %Y", NotJanuary),
                ("%Y", Always),
            ],
        };
        Self {
            resolution,
            rules: rules
                .iter()
                .map(|&(pattern, predicate)| (TimePattern::compile(pattern), predicate))
                .collect(),
            offset,
        }
    }

    /// The rule set for a list of ticks (epoch milliseconds).
    pub fn for_ticks(ticks: &[i64], offset: FixedOffset) -> Self {
        Self::new(DateResolution::for_ticks(ticks), offset)
    }

    /// The resolution the rules were picked for.
    pub fn resolution(&self) -> DateResolution {
        self.resolution
    }

    /// Formats epoch milliseconds with the first rule whose predicate holds.
    pub fn format(&self, millis: i64) -> String {
        let Some(dt) = datetime_from_millis(millis, self.offset) else {
            return String::new();
        };
        self.rules
            .iter()
            .find(|(_, predicate)| predicate.matches(&dt))
            .map(|(pattern, _)| pattern.format(&dt))
            .unwrap_or_default()
    }
}
