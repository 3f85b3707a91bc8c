// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scales and shared scale handles.
//!
//! A [`Scale`] maps domain [`Value`]s into pixels. Scales are owned by whoever sets their
//! domain (a chart container, a data layer); the axis engine only ever holds a
//! [`ScaleHandle`], sets the pixel range and clamping, and listens for [`ScaleEvent`]s
//! through a [`Subscription`] that unregisters itself when dropped.

extern crate alloc;

use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use hashbrown::HashMap;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::time::time_ticks;
use crate::value::Value;

/// Default number of natural ticks requested from continuous scales.
pub const DEFAULT_TICK_COUNT: usize = 10;

/// The kind of a scale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaleKind {
    /// Continuous linear numbers.
    Linear,
    /// Continuous positive numbers on a logarithmic axis.
    Log,
    /// Discrete categories placed in bands.
    Ordinal,
    /// Continuous instants.
    Date,
    /// A linear colour scale shown on an axis (a legend bar).
    ColorLinear,
    /// A date colour scale shown on an axis.
    DateColorLinear,
}

impl ScaleKind {
    /// `Date` and `DateColorLinear`.
    pub fn is_date(self) -> bool {
        matches!(self, Self::Date | Self::DateColorLinear)
    }

    /// Everything except `Ordinal`.
    pub fn is_continuous(self) -> bool {
        !matches!(self, Self::Ordinal)
    }
}

/// The domain of a scale.
#[derive(Clone, Debug, PartialEq)]
pub enum Domain {
    /// Extremes of a continuous domain, as authored (dates in epoch milliseconds).
    Continuous(f64, f64),
    /// The ordered categories of an ordinal domain.
    Ordinal(Vec<Value>),
}

impl Domain {
    /// A continuous domain over two instants.
    pub fn dates(start: i64, end: i64) -> Self {
        Self::Continuous(start as f64, end as f64)
    }
}

/// Everything needed to construct a scale, minus the pixel range.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleDescriptor {
    /// Scale kind.
    pub kind: ScaleKind,
    /// Initial domain.
    pub domain: Domain,
    /// Whether mapped values are clamped to the range.
    pub clamp: bool,
    /// Inner and outer band padding for ordinal scales, in band units.
    pub padding: f64,
    /// Log base.
    pub base: f64,
}

impl ScaleDescriptor {
    /// Creates a descriptor with default options.
    pub fn new(kind: ScaleKind, domain: Domain) -> Self {
        Self {
            kind,
            domain,
            clamp: false,
            padding: 0.1,
            base: 10.0,
        }
    }

    /// A linear scale over `[min, max]`.
    pub fn linear(min: f64, max: f64) -> Self {
        Self::new(ScaleKind::Linear, Domain::Continuous(min, max))
    }

    /// A log scale over `[min, max]`.
    pub fn log(min: f64, max: f64) -> Self {
        Self::new(ScaleKind::Log, Domain::Continuous(min, max))
    }

    /// A date scale over two instants (epoch milliseconds).
    pub fn date(start: i64, end: i64) -> Self {
        Self::new(ScaleKind::Date, Domain::dates(start, end))
    }

    /// An ordinal scale over categories.
    pub fn ordinal(categories: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        Self::new(
            ScaleKind::Ordinal,
            Domain::Ordinal(categories.into_iter().map(Into::into).collect()),
        )
    }

    /// Enables or disables clamping.
    pub fn with_clamp(mut self, clamp: bool) -> Self {
        self.clamp = clamp;
        self
    }

    /// Sets band padding (ordinal scales).
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Sets the log base.
    pub fn with_base(mut self, base: f64) -> Self {
        self.base = base;
        self
    }

    /// Instantiates the scale with an empty pixel range.
    pub fn build(&self) -> Scale {
        Scale::new(self)
    }
}

/// A scale instance: domain, pixel range and options.
#[derive(Clone, Debug, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: Domain,
    range: (f64, f64),
    clamp: bool,
    padding: f64,
    base: f64,
}

impl Scale {
    /// Instantiates a descriptor with a `[0, 1]` range.
    pub fn new(descriptor: &ScaleDescriptor) -> Self {
        let base = if descriptor.base.is_finite() && descriptor.base > 1.0 {
            descriptor.base
        } else {
            10.0
        };
        Self {
            kind: descriptor.kind,
            domain: descriptor.domain.clone(),
            range: (0.0, 1.0),
            clamp: descriptor.clamp,
            padding: descriptor.padding.max(0.0),
            base,
        }
    }

    /// The scale kind.
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    /// The current domain.
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// The pixel range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Whether output is clamped to the range.
    pub fn clamped(&self) -> bool {
        self.clamp
    }

    /// Maps a value to a pixel position.
    ///
    /// Returns `None` for values the scale cannot place: categories outside an ordinal domain,
    /// non-positive values on a log scale, text on a continuous scale, or NaN.
    pub fn map(&self, value: &Value) -> Option<f64> {
        match (&self.domain, self.kind) {
            (Domain::Ordinal(categories), _) => {
                let index = categories.iter().position(|c| c == value)?;
                Some(self.band_start(index, categories.len()))
            }
            (&Domain::Continuous(d0, d1), ScaleKind::Log) => {
                let x = value.as_number()?;
                if !(x > 0.0 && d0 > 0.0 && d1 > 0.0) {
                    return None;
                }
                let (l0, l1) = (self.log(d0), self.log(d1));
                Some(self.interpolate((self.log(x) - l0) / (l1 - l0)))
            }
            (&Domain::Continuous(d0, d1), _) => {
                let x = value.as_f64()?;
                if x.is_nan() {
                    return None;
                }
                let denom = d1 - d0;
                if denom == 0.0 {
                    return Some(self.range.0);
                }
                Some(self.interpolate((x - d0) / denom))
            }
        }
    }

    fn interpolate(&self, t: f64) -> f64 {
        let t = if self.clamp { t.clamp(0.0, 1.0) } else { t };
        let (r0, r1) = self.range;
        r0 + t * (r1 - r0)
    }

    fn log(&self, x: f64) -> f64 {
        x.ln() / self.base.ln()
    }

    fn band_width(&self, count: usize) -> f64 {
        let n = count as f64;
        if n <= 0.0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        let denom = n + self.padding * (n - 1.0) + 2.0 * self.padding;
        if denom == 0.0 {
            0.0
        } else {
            (r1 - r0).abs() / denom
        }
    }

    fn band_start(&self, index: usize, count: usize) -> f64 {
        let (r0, r1) = self.range;
        let bw = self.band_width(count);
        let step = bw * (1.0 + self.padding);
        // Bands follow the range direction: index 0 sits at `r0`.
        let index = if r1 >= r0 { index } else { count - 1 - index };
        r0.min(r1) + bw * self.padding + step * index as f64
    }

    /// Offset from a mapped position to the visual centre of the value.
    ///
    /// Half the band width for ordinal scales, zero otherwise.
    pub fn range_offset(&self) -> f64 {
        match &self.domain {
            Domain::Ordinal(categories) => self.band_width(categories.len()) / 2.0,
            Domain::Continuous(..) => 0.0,
        }
    }

    /// The scale's natural ticks.
    ///
    /// Nice linear steps inside the domain, `k * base^i` marks for log scales, calendar
    /// intervals for date scales and the full domain for ordinal scales.
    pub fn ticks(&self, count: usize) -> Vec<Value> {
        match (&self.domain, self.kind) {
            (Domain::Ordinal(categories), _) => categories.clone(),
            (&Domain::Continuous(d0, d1), ScaleKind::Log) => log_ticks(d0, d1, self.base)
                .into_iter()
                .map(Value::Number)
                .collect(),
            (&Domain::Continuous(d0, d1), kind) if kind.is_date() => time_ticks(d0, d1, count)
                .into_iter()
                .map(Value::Date)
                .collect(),
            (&Domain::Continuous(d0, d1), _) => linear_ticks(d0, d1, count)
                .into_iter()
                .map(Value::Number)
                .collect(),
        }
    }

    pub(crate) fn set_range(&mut self, range: (f64, f64)) {
        self.range = range;
    }

    pub(crate) fn set_clamp(&mut self, clamp: bool) {
        self.clamp = clamp;
    }

    pub(crate) fn set_domain(&mut self, domain: Domain) -> bool {
        if self.domain == domain {
            return false;
        }
        self.domain = domain;
        true
    }
}

/// Nice linear ticks inside `[min, max]`, ascending.
pub(crate) fn linear_ticks(mut min: f64, mut max: f64, count: usize) -> Vec<f64> {
    if count == 0 || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    if min == max {
        return alloc::vec![min];
    }
    if min > max {
        core::mem::swap(&mut min, &mut max);
    }
    let step = nice_step((max - min) / count as f64);
    if step == 0.0 {
        return alloc::vec![min, max];
    }

    // Fractional steps are generated as `k / inc` to keep `0.3` from becoming
    // `0.30000000000000004`.
    let inc = if step >= 1.0 { None } else { Some((1.0 / step).round()) };
    let (start, stop) = match inc {
        None => ((min / step).ceil(), (max / step).floor()),
        Some(inc) => ((min * inc).ceil(), (max * inc).floor()),
    };
    let to_value = |k: f64| match inc {
        None => k * step,
        Some(inc) => k / inc,
    };

    let n_f = (stop - start).round();
    if !(n_f.is_finite() && n_f >= 0.0) {
        return Vec::new();
    }
    let n = {
        let n_f = n_f.min(10_000.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "guarded by finite/non-negative checks and capped at 10k"
        )]
        {
            n_f as u64
        }
    };
    (0..=n).map(|i| to_value(start + i as f64)).collect()
}

pub(crate) fn nice_step(step: f64) -> f64 {
    if !step.is_finite() || step <= 0.0 {
        return 0.0;
    }
    let power = step.log10().floor();
    #[allow(
        clippy::cast_possible_truncation,
        reason = "log10 of a finite f64 lies well inside the i32 range"
    )]
    let base = 10_f64.powi(power as i32);
    let error = step / base;
    let nice = if error >= 7.5 {
        10.0
    } else if error >= 3.5 {
        5.0
    } else if error >= 1.5 {
        2.0
    } else {
        1.0
    };
    nice * base
}

/// `k * base^i` for `k` in `1..base`, restricted to the domain.
///
/// Only positive domains produce ticks.
pub(crate) fn log_ticks(d0: f64, d1: f64, base: f64) -> Vec<f64> {
    let (min, max) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
    if !(min > 0.0 && min.is_finite() && max.is_finite()) {
        return Vec::new();
    }
    let log = |x: f64| x.ln() / base.ln();
    let exponent = |x: f64| {
        let e = x.clamp(-400.0, 400.0);
        #[allow(clippy::cast_possible_truncation, reason = "clamped to a small range")]
        {
            e as i32
        }
    };
    let i0 = exponent(log(min).floor());
    let i1 = exponent(log(max).ceil());
    let n = if base.fract() == 0.0 { base } else { 2.0 };

    // Negative powers divide, so `3 * 10^-1` comes out as `0.3`.
    let mark = |k: f64, i: i32| {
        if i < 0 {
            k / base.powi(-i)
        } else {
            k * base.powi(i)
        }
    };
    let mut out = Vec::new();
    for i in i0..i1 {
        let mut k = 1.0;
        while k < n {
            out.push(mark(k, i));
            k += 1.0;
        }
    }
    out.push(mark(1.0, i1));
    // Tolerate the rounding of `ln(x) / ln(base)` at the domain ends.
    let eps = 1e-12;
    out.retain(|&t| t >= min * (1.0 - eps) && t <= max * (1.0 + eps));
    out
}

/// Notifications a scale's owner sends to its observers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleEvent {
    /// The domain changed.
    DomainChanged,
    /// The owner asks axes drawn with this scale to emphasise themselves.
    HighlightAxis,
    /// The owner clears the emphasis.
    UnhighlightAxis,
}

type Listener = Rc<dyn Fn(ScaleEvent)>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: HashMap<u64, Listener>,
}

struct Shared {
    scale: RefCell<Scale>,
    registry: RefCell<Registry>,
}

/// A shared, reference-counted handle to a live scale and its observers.
#[derive(Clone)]
pub struct ScaleHandle {
    shared: Rc<Shared>,
}

impl core::fmt::Debug for ScaleHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScaleHandle")
            .field("scale", &self.shared.scale.borrow())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ScaleHandle {
    /// Wraps a scale.
    pub fn new(scale: Scale) -> Self {
        Self {
            shared: Rc::new(Shared {
                scale: RefCell::new(scale),
                registry: RefCell::new(Registry::default()),
            }),
        }
    }

    /// Builds a scale from a descriptor and wraps it.
    pub fn from_descriptor(descriptor: &ScaleDescriptor) -> Self {
        Self::new(descriptor.build())
    }

    /// Whether both handles refer to the same scale.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    /// The scale kind.
    pub fn kind(&self) -> ScaleKind {
        self.shared.scale.borrow().kind
    }

    /// A snapshot of the scale.
    pub fn get(&self) -> Scale {
        self.shared.scale.borrow().clone()
    }

    /// Runs `f` against the scale.
    pub fn with<R>(&self, f: impl FnOnce(&Scale) -> R) -> R {
        f(&self.shared.scale.borrow())
    }

    /// Maps a value through the scale.
    pub fn map(&self, value: &Value) -> Option<f64> {
        self.shared.scale.borrow().map(value)
    }

    /// Replaces the domain and notifies observers when it actually changed.
    pub fn set_domain(&self, domain: Domain) {
        let changed = self.shared.scale.borrow_mut().set_domain(domain);
        if changed {
            self.emit(ScaleEvent::DomainChanged);
        }
    }

    /// Sets the pixel range. Observers are not notified.
    pub fn set_range(&self, r0: f64, r1: f64) {
        self.shared.scale.borrow_mut().set_range((r0, r1));
    }

    /// Enables or disables clamping. Observers are not notified.
    pub fn set_clamp(&self, clamp: bool) {
        self.shared.scale.borrow_mut().set_clamp(clamp);
    }

    /// Delivers `event` to every observer, in subscription order.
    pub fn emit(&self, event: ScaleEvent) {
        let mut listeners: Vec<(u64, Listener)> = self
            .shared
            .registry
            .borrow()
            .listeners
            .iter()
            .map(|(id, l)| (*id, l.clone()))
            .collect();
        listeners.sort_unstable_by_key(|(id, _)| *id);
        for (_, listener) in listeners {
            listener(event);
        }
    }

    /// Registers an observer; it stays registered until the returned [`Subscription`] drops.
    pub fn subscribe(&self, listener: impl Fn(ScaleEvent) + 'static) -> Subscription {
        let mut registry = self.shared.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.listeners.insert(id, Rc::new(listener));
        Subscription {
            shared: Rc::downgrade(&self.shared),
            id,
        }
    }

    /// Number of registered observers.
    pub fn listener_count(&self) -> usize {
        self.shared.registry.borrow().listeners.len()
    }
}

/// An observer registration. Dropping it unregisters the observer.
#[must_use = "the observer is unregistered when the subscription is dropped"]
pub struct Subscription {
    shared: Weak<Shared>,
    id: u64,
}

impl core::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("live", &(self.shared.strong_count() > 0))
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.shared.upgrade() {
            shared.registry.borrow_mut().listeners.remove(&self.id);
        }
    }
}
