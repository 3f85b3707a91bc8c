// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tick selection.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::scale::{DEFAULT_TICK_COUNT, Domain, Scale, ScaleKind};
use crate::value::Value;

/// Upper bound on interpolated ticks; larger requests are cut short at this many.
pub const MAX_INTERPOLATED: usize = 10_000;

/// Log tick fractions kept when a log domain spans two to seven decades: `1`, `2`, `5` (and `10`).
const HALF_DECADE_MARKS: [f64; 4] = [0.0, 1.0, 0.30103, 0.69897];

const MARK_TOLERANCE: f64 = 0.001;

/// Picks the values that become ticks.
///
/// In priority order:
/// - Ordinal scales always draw from their own domain; an explicit list is replaced by it.
/// - A non-empty explicit list is returned whole, or thinned to every `len / (n - 1)`-th
///   element when it holds more than `num_ticks` values.
/// - A tick count interpolates evenly between the domain extremes.
/// - Otherwise the scale's natural ticks are used, thinned by order of magnitude for log scales.
///
/// A `num_ticks` below two always yields no ticks.
pub fn select_ticks(
    scale: &Scale,
    explicit: Option<&[Value]>,
    num_ticks: Option<usize>,
) -> Vec<Value> {
    let explicit = explicit.filter(|list| !list.is_empty());
    let list = match scale.domain() {
        Domain::Ordinal(categories) if explicit.is_some() || num_ticks.is_some() => {
            Some(categories.as_slice())
        }
        _ => explicit,
    };

    if list.is_some() || num_ticks.is_some() {
        if num_ticks.is_some_and(|n| n < 2) {
            return Vec::new();
        }
        if let Some(list) = list {
            return thin(list, num_ticks);
        }
        if let (Some(n), &Domain::Continuous(d0, d1)) = (num_ticks, scale.domain()) {
            return interpolate(scale.kind(), d0, d1, n);
        }
    }

    match (scale.kind(), scale.domain()) {
        (_, Domain::Ordinal(categories)) => categories.clone(),
        (ScaleKind::Log, &Domain::Continuous(d0, d1)) => {
            thin_log(scale.ticks(DEFAULT_TICK_COUNT), d0, d1)
        }
        _ => scale.ticks(DEFAULT_TICK_COUNT),
    }
}

fn thin(list: &[Value], num_ticks: Option<usize>) -> Vec<Value> {
    match num_ticks {
        Some(n) if list.len() > n => {
            // Kept as is: the stride may skip or overshoot the last element.
            let stride = list.len() / (n - 1);
            list.iter().step_by(stride.max(1)).cloned().collect()
        }
        _ => list.to_vec(),
    }
}

/// `start + i * step` for `i = 0, 1, ...` while short of `end + step / 2`.
fn interpolate(kind: ScaleKind, start: f64, end: f64, count: usize) -> Vec<Value> {
    let to_value = |x: f64| {
        if kind.is_date() {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "dates are epoch milliseconds and drop their fraction"
            )]
            {
                Value::Date(x as i64)
            }
        } else {
            Value::Number(x)
        }
    };
    if !(start.is_finite() && end.is_finite()) {
        return Vec::new();
    }
    let step = (end - start) / (count - 1) as f64;
    if step == 0.0 {
        return alloc::vec![to_value(start)];
    }
    let stop = end + step * 0.5;
    let n = ((stop - start) / step).ceil().max(0.0);
    if n > MAX_INTERPOLATED as f64 {
        log::debug!("{n} interpolated ticks requested, keeping the first {MAX_INTERPOLATED}");
    }
    let n = n.min(MAX_INTERPOLATED as f64);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to MAX_INTERPOLATED")]
    let n = n as usize;
    (0..n).map(|i| to_value(start + i as f64 * step)).collect()
}

fn thin_log(ticks: Vec<Value>, d0: f64, d1: f64) -> Vec<Value> {
    let oom = (d1 / d0).log10().abs();
    if !oom.is_finite() || oom < 2.0 {
        return ticks;
    }
    let near = |r: f64, target: f64| (r - target).abs() < MARK_TOLERANCE;
    let s = (oom / 10.0).round();
    let keep = |t: f64| {
        if oom < 7.0 {
            let r = (t.log10() % 1.0).abs();
            HALF_DECADE_MARKS.iter().any(|&m| near(r, m))
        } else {
            let r = (t.log10() % s).abs();
            near(r, 0.0) || near(r, s)
        }
    };
    ticks
        .into_iter()
        .filter(|v| v.as_number().is_some_and(keep))
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::scale::ScaleDescriptor;

    fn nums(values: &[Value]) -> Vec<f64> {
        values.iter().filter_map(Value::as_f64).collect()
    }

    fn letters() -> Vec<Value> {
        ["a", "b", "c", "d", "e", "f"].map(Value::from).to_vec()
    }

    #[test]
    fn fewer_than_two_ticks_is_empty_for_every_kind() {
        let scales = [
            ScaleDescriptor::linear(0.0, 10.0),
            ScaleDescriptor::log(1.0, 1000.0),
            ScaleDescriptor::date(0, 86_400_000),
            ScaleDescriptor::ordinal(["a", "b", "c"]),
            ScaleDescriptor::new(ScaleKind::ColorLinear, Domain::Continuous(0.0, 1.0)),
        ];
        for descriptor in &scales {
            let scale = descriptor.build();
            for n in [0, 1] {
                assert!(select_ticks(&scale, None, Some(n)).is_empty(), "{descriptor:?} n={n}");
                let explicit = [Value::Number(1.0), Value::Number(2.0)];
                assert!(select_ticks(&scale, Some(&explicit), Some(n)).is_empty());
            }
        }
    }

    #[test]
    fn explicit_list_is_returned_whole_when_short_enough() {
        let scale = ScaleDescriptor::linear(0.0, 10.0).build();
        let explicit = [Value::Number(1.0), Value::Number(7.0), Value::Number(3.0)];
        assert_eq!(select_ticks(&scale, Some(&explicit), None), explicit);
        assert_eq!(select_ticks(&scale, Some(&explicit), Some(3)), explicit);
    }

    #[test]
    fn explicit_list_stride_is_literal() {
        let scale = ScaleDescriptor::linear(0.0, 10.0).build();
        let explicit: Vec<Value> = (0..10).map(|i| Value::Number(f64::from(i))).collect();
        // stride = floor(10 / 3) = 3, last element 9 is hit.
        assert_eq!(nums(&select_ticks(&scale, Some(&explicit), Some(4))), [0.0, 3.0, 6.0, 9.0]);
        // stride = floor(10 / 2) = 5, last element 9 is missed.
        assert_eq!(nums(&select_ticks(&scale, Some(&explicit), Some(3))), [0.0, 5.0]);
        // stride = floor(10 / 4) = 2 also misses it.
        assert_eq!(
            nums(&select_ticks(&scale, Some(&explicit), Some(5))),
            [0.0, 2.0, 4.0, 6.0, 8.0]
        );
        let explicit: Vec<Value> = (0..7).map(|i| Value::Number(f64::from(i))).collect();
        // stride = floor(7 / 2) = 3 yields three ticks for a request of three.
        assert_eq!(nums(&select_ticks(&scale, Some(&explicit), Some(3))), [0.0, 3.0, 6.0]);
        // stride = floor(7 / 5) = 1 keeps all seven for a request of six.
        assert_eq!(select_ticks(&scale, Some(&explicit), Some(6)).len(), 7);
    }

    #[test]
    fn empty_explicit_list_is_ignored() {
        let scale = ScaleDescriptor::linear(0.0, 10.0).build();
        assert_eq!(
            nums(&select_ticks(&scale, Some(&[]), Some(3))),
            [0.0, 5.0, 10.0]
        );
    }

    #[test]
    fn count_interpolates_between_extremes() {
        let scale = ScaleDescriptor::linear(0.0, 1.0).build();
        assert_eq!(
            nums(&select_ticks(&scale, None, Some(5))),
            [0.0, 0.25, 0.5, 0.75, 1.0]
        );
        let reversed = ScaleDescriptor::linear(10.0, 0.0).build();
        assert_eq!(nums(&select_ticks(&reversed, None, Some(3))), [10.0, 5.0, 0.0]);
        let flat = ScaleDescriptor::linear(4.0, 4.0).build();
        assert_eq!(nums(&select_ticks(&flat, None, Some(3))), [4.0]);
    }

    #[test]
    fn huge_counts_are_capped() {
        let scale = ScaleDescriptor::linear(0.0, 1.0).build();
        let ticks = select_ticks(&scale, None, Some(50_000));
        assert_eq!(ticks.len(), MAX_INTERPOLATED);
        assert_eq!(ticks[0], Value::Number(0.0));
    }

    #[test]
    fn date_interpolation_stays_in_dates() {
        let scale = ScaleDescriptor::date(0, 10).build();
        let ticks = select_ticks(&scale, None, Some(4));
        assert_eq!(
            ticks,
            [Value::Date(0), Value::Date(3), Value::Date(6), Value::Date(10)]
        );
    }

    #[test]
    fn ordinal_replaces_explicit_list_with_domain() {
        let domain = letters();
        let scale = ScaleDescriptor::ordinal(domain.clone()).build();
        assert_eq!(select_ticks(&scale, None, None), domain);
        let explicit = [Value::from("zz")];
        assert_eq!(select_ticks(&scale, Some(&explicit), None), domain);
        // stride = floor(6 / 2) = 3.
        assert_eq!(
            select_ticks(&scale, None, Some(3)),
            vec![domain[0].clone(), domain[3].clone()]
        );
    }

    #[test]
    fn log_ticks_keep_everything_under_two_decades() {
        let scale = ScaleDescriptor::log(1.0, 50.0).build();
        assert_eq!(select_ticks(&scale, None, None).len(), scale.ticks(10).len());
    }

    #[test]
    fn log_ticks_keep_one_two_five_up_to_seven_decades() {
        let scale = ScaleDescriptor::log(1.0, 1000.0).build();
        assert_eq!(
            nums(&select_ticks(&scale, None, None)),
            [1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0, 1000.0]
        );
    }

    #[test]
    fn log_ticks_keep_whole_decades_from_seven() {
        let scale = ScaleDescriptor::log(1.0, 1e7).build();
        // oom = 7, s = round(0.7) = 1: decades only.
        assert_eq!(
            nums(&select_ticks(&scale, None, None)),
            [1.0, 10.0, 100.0, 1e3, 1e4, 1e5, 1e6, 1e7]
        );
    }

    #[test]
    fn linear_natural_ticks() {
        let scale = ScaleDescriptor::linear(0.0, 100.0).build();
        assert_eq!(select_ticks(&scale, None, None).len(), 11);
    }
}
