// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render-ready axis records.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::time::Duration;

use peniko::Color;

use crate::config::GridLines;
use crate::label::LabelAttributes;
use crate::transform::{AxisTransform, TickSize};
use crate::value::Value;

/// One tick mark.
#[derive(Clone, Debug, PartialEq)]
pub struct Tick {
    /// The domain value.
    pub value: Value,
    /// Position along the axis, including the scale's range offset.
    pub pixel: f64,
    /// The formatted label.
    pub label: String,
}

/// How tick lines are drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Grid mode.
    pub lines: GridLines,
    /// Whether ticks are short marks.
    pub short: bool,
    /// Shift of the tick line start across the axis (`y1` of horizontal axes, `x1` of
    /// vertical axes).
    pub cross_offset: Option<f64>,
    /// Stroke dash pattern.
    pub dash: Option<&'static str>,
    /// Tick line stroke colour.
    pub color: Option<Color>,
}

/// Whether the renderer should animate towards this record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transition {
    /// Zero for an immediate update.
    pub duration: Duration,
}

impl Transition {
    /// An immediate update.
    pub const NONE: Self = Self {
        duration: Duration::ZERO,
    };

    /// Whether the update is animated.
    pub fn is_animated(self) -> bool {
        !self.duration.is_zero()
    }
}

/// Everything a renderer needs to draw an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisOutput {
    /// Whether the axis is shown.
    pub visible: bool,
    /// Whether the axis is emphasised.
    pub emphasized: bool,
    /// Translation of the axis group.
    pub transform: AxisTransform,
    /// Ticks in selection order.
    pub ticks: Vec<Tick>,
    /// Tick lengths.
    pub tick_size: TickSize,
    /// Tick label rotation, in degrees.
    pub tick_rotate: f64,
    /// Grid line styling.
    pub grid: GridStyle,
    /// Axis line colour.
    pub line_color: Option<Color>,
    /// The axis title.
    pub label: LabelAttributes,
    /// Extra tick label style properties.
    pub tick_style: BTreeMap<String, String>,
    /// How to get from the previous record to this one.
    pub transition: Transition,
}

impl AxisOutput {
    /// The SVG transform for tick labels, if they are rotated.
    pub fn tick_label_transform(&self) -> Option<String> {
        (self.tick_rotate != 0.0)
            .then(|| format!("rotate({})", tickwork_format::to_string(self.tick_rotate)))
    }

    /// The tick labels, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.ticks.iter().map(|t| t.label.as_str())
    }
}
