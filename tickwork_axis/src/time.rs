// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Calendar-aware tick generation for date scales.
//!
//! Instants are epoch milliseconds. The tick interval is picked from a fixed ladder
//! (seconds up to quarters) by comparing it against `span / count`; longer spans step
//! through whole years. All intervals are aligned in UTC.

extern crate alloc;

use alloc::vec::Vec;

use chrono::{DateTime, Datelike, NaiveDate};

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::scale::{linear_ticks, nice_step};

const SECOND: i64 = 1000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;

/// Approximate lengths used only to pick an interval.
const MONTH_APPROX: i64 = 30 * DAY;
const YEAR_APPROX: i64 = 365 * DAY;

/// Upper bound on generated ticks, to keep degenerate inputs cheap.
const MAX_TICKS: usize = 10_000;

#[derive(Clone, Copy, Debug)]
enum Interval {
    /// A fixed duration, aligned so that `phase + k * step` are the ticks.
    Fixed { step: i64, phase: i64 },
    /// Every `n`-th month, starting in January.
    Months(i64),
}

const LADDER: &[(i64, Interval)] = &[
    (SECOND, Interval::Fixed { step: SECOND, phase: 0 }),
    (5 * SECOND, Interval::Fixed { step: 5 * SECOND, phase: 0 }),
    (15 * SECOND, Interval::Fixed { step: 15 * SECOND, phase: 0 }),
    (30 * SECOND, Interval::Fixed { step: 30 * SECOND, phase: 0 }),
    (MINUTE, Interval::Fixed { step: MINUTE, phase: 0 }),
    (5 * MINUTE, Interval::Fixed { step: 5 * MINUTE, phase: 0 }),
    (15 * MINUTE, Interval::Fixed { step: 15 * MINUTE, phase: 0 }),
    (30 * MINUTE, Interval::Fixed { step: 30 * MINUTE, phase: 0 }),
    (HOUR, Interval::Fixed { step: HOUR, phase: 0 }),
    (3 * HOUR, Interval::Fixed { step: 3 * HOUR, phase: 0 }),
    (6 * HOUR, Interval::Fixed { step: 6 * HOUR, phase: 0 }),
    (12 * HOUR, Interval::Fixed { step: 12 * HOUR, phase: 0 }),
    (DAY, Interval::Fixed { step: DAY, phase: 0 }),
    (2 * DAY, Interval::Fixed { step: 2 * DAY, phase: 0 }),
    // 1970-01-04 was a Sunday.
    (WEEK, Interval::Fixed { step: WEEK, phase: 3 * DAY }),
    (MONTH_APPROX, Interval::Months(1)),
    (3 * MONTH_APPROX, Interval::Months(3)),
];

/// Returns calendar-aligned ticks (epoch milliseconds) inside `[min, max]`.
pub(crate) fn time_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<i64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![to_millis(min)];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }

    let target = (max - min) / count as f64;
    let i = LADDER.partition_point(|&(len, _)| len as f64 <= target);
    if i == 0 {
        return linear_ticks(min, max, count)
            .into_iter()
            .map(|t| to_millis(t.round()))
            .collect();
    }
    // Years sit at the top of the ladder, after quarters.
    let next = LADDER.get(i).map_or(YEAR_APPROX, |&(len, _)| len) as f64;
    let i = if target / (LADDER[i - 1].0 as f64) < next / target {
        i - 1
    } else {
        i
    };
    if i == LADDER.len() {
        let years = nice_step(target / YEAR_APPROX as f64).round().max(1.0);
        return year_ticks(min, max, to_millis(years));
    }

    match LADDER[i].1 {
        Interval::Fixed { step, phase } => fixed_ticks(min, max, step, phase),
        Interval::Months(n) => month_ticks(min, max, n),
    }
}

fn to_millis(x: f64) -> i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "saturating conversion; callers pass finite values"
    )]
    {
        x as i64
    }
}

fn fixed_ticks(min: f64, max: f64, step: i64, phase: i64) -> Vec<i64> {
    let lo = to_millis(min.ceil());
    let hi = to_millis(max.floor());
    let mut out = Vec::new();
    let Some(mut t) = first_fixed_tick(lo, step, phase) else {
        return out;
    };
    while t <= hi && out.len() < MAX_TICKS {
        out.push(t);
        let Some(next) = t.checked_add(step) else {
            break;
        };
        t = next;
    }
    out
}

/// The first `phase + k * step` at or after `lo`, if it is representable.
fn first_fixed_tick(lo: i64, step: i64, phase: i64) -> Option<i64> {
    let (lo, step, phase) = (i128::from(lo), i128::from(step), i128::from(phase));
    let first = phase + (lo - phase).div_euclid(step) * step;
    let first = if first < lo { first + step } else { first };
    i64::try_from(first).ok()
}

/// Midnight UTC on the first day of month `index` (`year * 12 + month0`).
fn month_start(index: i64) -> Option<i64> {
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
}

fn month_index(millis: i64) -> Option<i64> {
    let dt = DateTime::from_timestamp_millis(millis)?;
    Some(i64::from(dt.year()) * 12 + i64::from(dt.month0()))
}

fn month_ticks(min: f64, max: f64, every: i64) -> Vec<i64> {
    let lo = to_millis(min.ceil());
    let hi = to_millis(max.floor());
    let Some(mut index) = month_index(lo) else {
        return Vec::new();
    };
    if month_start(index).is_some_and(|t| t < lo) {
        index += 1;
    }
    index += (every - index.rem_euclid(every)) % every;

    let mut out = Vec::new();
    while let Some(t) = month_start(index) {
        if t > hi || out.len() >= MAX_TICKS {
            break;
        }
        out.push(t);
        index += every;
    }
    out
}

fn year_ticks(min: f64, max: f64, every: i64) -> Vec<i64> {
    let every = every.max(1);
    let lo = to_millis(min.ceil());
    let hi = to_millis(max.floor());
    let Some(index) = month_index(lo) else {
        return Vec::new();
    };
    let mut year = index.div_euclid(12);
    if month_start(year * 12).is_some_and(|t| t < lo) {
        year += 1;
    }
    year += (every - year.rem_euclid(every)) % every;

    let mut out = Vec::new();
    while let Some(t) = month_start(year * 12) {
        if t > hi || out.len() >= MAX_TICKS {
            break;
        }
        out.push(t);
        year += every;
    }
    out
}
