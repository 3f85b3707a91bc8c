// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick label formatting.
//!
//! [`TickFormatter`] picks one formatting strategy per tick set: an explicit format string
//! when the axis has one, otherwise a strategy inferred from the scale kind and the ticks
//! themselves. Values the chosen strategy cannot handle fall back to
//! [`FormatStrategy::Identity`].

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::{FixedOffset, SecondsFormat};
use tickwork_format::{
    AdaptiveFormat, MultiTimeFormat, NumberFormat, TimePattern, datetime_from_millis,
    is_time_format,
};

use crate::scale::ScaleKind;
use crate::value::Value;

/// How a [`TickFormatter`] renders values.
#[derive(Clone, Debug)]
pub enum FormatStrategy {
    /// Text as-is, numbers in their shortest form, dates as RFC 3339.
    Identity,
    /// A d3-style number specifier.
    Number(NumberFormat),
    /// A fixed date pattern.
    Date(TimePattern),
    /// A multi-resolution date format.
    MultiDate(MultiTimeFormat),
    /// Precision inferred from the ticks.
    Adaptive(AdaptiveFormat),
}

/// A label formatter for one tick set.
#[derive(Clone, Debug)]
pub struct TickFormatter {
    strategy: FormatStrategy,
    time_zone: FixedOffset,
}

impl TickFormatter {
    /// Chooses the formatter for `ticks` on a scale of `kind`.
    ///
    /// `format` is the axis' explicit format string, if any: a date pattern for date scales,
    /// a number specifier for numeric scales, and either for ordinal scales depending on
    /// whether it contains a date directive. A string that does not parse yields the
    /// identity strategy. Dates are rendered in `time_zone` by every strategy.
    pub fn new(
        kind: ScaleKind,
        ticks: &[Value],
        format: Option<&str>,
        time_zone: FixedOffset,
    ) -> Self {
        let strategy = Self::strategy_for(kind, ticks, format, time_zone);
        Self {
            strategy,
            time_zone,
        }
    }

    fn strategy_for(
        kind: ScaleKind,
        ticks: &[Value],
        format: Option<&str>,
        time_zone: FixedOffset,
    ) -> FormatStrategy {
        if let Some(format) = format.filter(|f| !f.is_empty()) {
            let as_date = kind.is_date() || (kind == ScaleKind::Ordinal && is_time_format(format));
            let parsed = if as_date {
                TimePattern::parse(format).map(FormatStrategy::Date)
            } else {
                NumberFormat::parse(format).map(FormatStrategy::Number)
            };
            return parsed.unwrap_or_else(|err| {
                log::debug!("tick format {format:?} rejected: {err}");
                FormatStrategy::Identity
            });
        }

        match kind {
            ScaleKind::Ordinal => FormatStrategy::Identity,
            ScaleKind::Date | ScaleKind::DateColorLinear => {
                let millis: Vec<i64> = ticks.iter().filter_map(Value::as_millis).collect();
                FormatStrategy::MultiDate(MultiTimeFormat::for_ticks(&millis, time_zone))
            }
            ScaleKind::Linear | ScaleKind::ColorLinear => {
                FormatStrategy::Adaptive(AdaptiveFormat::linear(&numbers(ticks)))
            }
            ScaleKind::Log => FormatStrategy::Adaptive(AdaptiveFormat::log(&numbers(ticks))),
        }
    }

    /// The chosen strategy.
    pub fn strategy(&self) -> &FormatStrategy {
        &self.strategy
    }

    /// The offset dates are rendered in.
    pub fn time_zone(&self) -> FixedOffset {
        self.time_zone
    }

    /// Formats one value.
    pub fn format(&self, value: &Value) -> String {
        match (&self.strategy, value) {
            (FormatStrategy::Number(format), Value::Number(_) | Value::Date(_)) => {
                format.format(value.as_f64().unwrap_or(f64::NAN))
            }
            (FormatStrategy::Date(pattern), &Value::Date(ms)) => {
                pattern.format_millis(ms, self.time_zone)
            }
            (FormatStrategy::MultiDate(format), &Value::Date(ms)) => format.format(ms),
            (FormatStrategy::Adaptive(format), &Value::Number(x)) => format.format(x),
            _ => identity(value, self.time_zone),
        }
    }

    /// Formats every value, in order.
    pub fn format_all(&self, values: &[Value]) -> Vec<String> {
        values.iter().map(|v| self.format(v)).collect()
    }
}

pub(crate) fn utc() -> FixedOffset {
    use chrono::Offset;
    chrono::Utc.fix()
}

fn numbers(ticks: &[Value]) -> Vec<f64> {
    ticks.iter().filter_map(Value::as_number).collect()
}

fn identity(value: &Value, offset: FixedOffset) -> String {
    match value {
        Value::Text(text) => text.clone(),
        &Value::Number(x) => tickwork_format::to_string(x),
        &Value::Date(ms) => datetime_from_millis(ms, offset)
            .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
            .unwrap_or_else(|| ms.to_string()),
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use chrono::{NaiveDate, TimeZone};
    use tickwork_format::{DateResolution, Precision};

    use super::*;

    fn n(values: &[f64]) -> Vec<Value> {
        values.iter().copied().map(Value::Number).collect()
    }

    fn date(y: i32, m: u32, d: u32) -> Value {
        Value::Date(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
                .and_utc()
                .timestamp_millis(),
        )
    }

    #[test]
    fn linear_integer_ticks() {
        let ticks = n(&[0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
        let f = TickFormatter::new(ScaleKind::Linear, &ticks, None, utc());
        assert_eq!(f.format_all(&ticks), ["0", "20", "40", "60", "80", "100"]);
    }

    #[test]
    fn linear_fractional_ticks_drop_trailing_zeros() {
        let ticks = n(&[0.0, 0.5, 1.0, 1.5, 2.0]);
        let f = TickFormatter::new(ScaleKind::ColorLinear, &ticks, None, utc());
        assert_eq!(f.format_all(&ticks), ["0", "0.5", "1", "1.5", "2"]);
    }

    #[test]
    fn large_ticks_switch_to_exponent() {
        let ticks = n(&[0.0, 1_000_000.0]);
        let f = TickFormatter::new(ScaleKind::Linear, &ticks, None, utc());
        let FormatStrategy::Adaptive(adaptive) = f.strategy() else {
            panic!("expected adaptive formatter, got {f:?}");
        };
        assert!(matches!(adaptive.precision(), Precision::Significant(p) if p > 0));
        let labels = f.format_all(&ticks);
        assert_eq!(labels, ["0", "1e+6"]);
        assert!(labels.iter().all(|l| !l.ends_with('.')));
    }

    #[test]
    fn log_ticks_print_naturally_when_sparse() {
        let ticks = n(&[1.0, 10.0, 100.0]);
        let f = TickFormatter::new(ScaleKind::Log, &ticks, None, utc());
        assert_eq!(f.format_all(&ticks), ["1", "10", "100"]);
    }

    #[test]
    fn explicit_number_specifier() {
        let ticks = n(&[1.5, 2.0]);
        let f = TickFormatter::new(ScaleKind::Linear, &ticks, Some(".2f"), utc());
        assert_eq!(f.format_all(&ticks), ["1.50", "2.00"]);
    }

    #[test]
    fn invalid_specifier_falls_back_to_identity() {
        let ticks = n(&[1.5, 2.0]);
        let f = TickFormatter::new(ScaleKind::Linear, &ticks, Some("zz"), utc());
        assert!(matches!(f.strategy(), FormatStrategy::Identity));
        assert_eq!(f.format_all(&ticks), ["1.5", "2"]);
    }

    #[test]
    fn date_gap_selects_resolution() {
        let sub_second = [Value::Date(0), Value::Date(500)];
        let f = TickFormatter::new(ScaleKind::Date, &sub_second, None, utc());
        let FormatStrategy::MultiDate(multi) = f.strategy() else {
            panic!("expected multi-date formatter, got {f:?}");
        };
        assert_eq!(multi.resolution(), DateResolution::SubSecond);
        assert_eq!(f.format(&Value::Date(500)), ".500");
        assert_eq!(f.format(&Value::Date(1000)), ":01");

        let days = [date(2020, 2, 10), date(2020, 3, 21)];
        let f = TickFormatter::new(ScaleKind::DateColorLinear, &days, None, utc());
        let FormatStrategy::MultiDate(multi) = f.strategy() else {
            panic!("expected multi-date formatter, got {f:?}");
        };
        assert_eq!(multi.resolution(), DateResolution::Months);
        assert_eq!(f.format(&days[0]), "Feb 10");
        assert_eq!(f.format(&date(2020, 3, 1)), "Mar 2020");
    }

    #[test]
    fn explicit_date_pattern_uses_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let midnight = tz.with_ymd_and_hms(2021, 7, 4, 0, 30, 0).unwrap().timestamp_millis();
        let ticks = [Value::Date(midnight)];
        let f = TickFormatter::new(ScaleKind::Date, &ticks, Some("%Y-%m-%d %H:%M"), tz);
        assert_eq!(f.format_all(&ticks), ["2021-07-04 00:30"]);
    }

    #[test]
    fn ordinal_format_strings_pick_dates_or_numbers() {
        let dates = [date(2020, 1, 1)];
        let f = TickFormatter::new(ScaleKind::Ordinal, &dates, Some("%Y"), utc());
        assert_eq!(f.format_all(&dates), ["2020"]);

        let nums = n(&[3.0]);
        let f = TickFormatter::new(ScaleKind::Ordinal, &nums, Some(".1f"), utc());
        assert_eq!(f.format_all(&nums), ["3.0"]);

        let text = [Value::from("apples")];
        assert_eq!(f.format_all(&text), ["apples"]);
    }

    #[test]
    fn ordinal_identity() {
        let values = vec![Value::from("a"), Value::Number(0.1), date(2020, 1, 1)];
        let f = TickFormatter::new(ScaleKind::Ordinal, &values, None, utc());
        assert_eq!(
            f.format_all(&values),
            ["a", "0.1", "2020-01-01T00:00:00.000Z"]
        );
    }

    #[test]
    fn one_label_per_tick() {
        let ticks = n(&[1.0, f64::NAN, 3.0]);
        for kind in [ScaleKind::Linear, ScaleKind::Log, ScaleKind::ColorLinear] {
            let f = TickFormatter::new(kind, &ticks, None, utc());
            assert_eq!(f.format_all(&ticks).len(), ticks.len());
        }
    }

    #[test]
    fn fallback_dates_keep_the_configured_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let ticks = n(&[0.0, 1.0]);
        let f = TickFormatter::new(ScaleKind::Linear, &ticks, None, tz);
        assert!(matches!(f.strategy(), FormatStrategy::Adaptive(_)));
        assert_eq!(f.time_zone(), tz);
        assert_eq!(f.format(&Value::Date(0)), "1970-01-01T02:00:00.000+02:00");

        let f = TickFormatter::new(ScaleKind::Linear, &ticks, Some(".1f"), tz);
        assert_eq!(f.format(&Value::from("x")), "x");
        let f = TickFormatter::new(ScaleKind::Date, &[Value::Date(0)], None, tz);
        assert_eq!(f.format(&Value::Number(1.5)), "1.5");
    }
}
