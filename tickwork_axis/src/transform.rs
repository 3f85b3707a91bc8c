// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis placement and grid geometry.
//!
//! An axis sits on a baseline at the edge of the plot, or crosses a perpendicular
//! ("offset") scale at a chosen value. The same crossing point shifts and shortens grid
//! lines so that they still span the plot.

use core::fmt;

use kurbo::{Size, Vec2};

use crate::config::{GridLines, Orientation, Side};
use crate::scale::Scale;
use crate::value::Value;

/// Tick length used when grid lines are off, and for the outer ticks otherwise.
pub const DEFAULT_TICK_SIZE: f64 = 6.0;

/// Translation applied to the axis group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AxisTransform {
    /// Horizontal shift.
    pub x: f64,
    /// Vertical shift.
    pub y: f64,
}

impl AxisTransform {
    /// The translation as a vector.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl fmt::Display for AxisTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "translate({}, {})",
            tickwork_format::to_string(self.x),
            tickwork_format::to_string(self.y)
        )
    }
}

/// Where an offset value landed on its scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedOffset {
    /// The mapped pixel position.
    pub pixel: f64,
    /// The scale's range offset (half a band for ordinal scales).
    pub range_offset: f64,
}

/// Locates `value` on the offset scale; `None` when the scale cannot map it.
pub fn resolve_offset(scale: &Scale, value: &Value) -> Option<ResolvedOffset> {
    let pixel = scale.map(value).filter(|p| p.is_finite())?;
    Some(ResolvedOffset {
        pixel,
        range_offset: scale.range_offset(),
    })
}

/// The position of the axis line when it has no offset.
///
/// Vertical axes sit at `x = width` on the right and `0` on the left; horizontal axes at
/// `y = 0` on top and `height` at the bottom.
pub fn baseline(orientation: Orientation, side: Side, size: Size) -> f64 {
    match (orientation, side.normalized(orientation)) {
        (Orientation::Vertical, Side::Right) => size.width,
        (Orientation::Vertical, _) => 0.0,
        (Orientation::Horizontal, Side::Top) => 0.0,
        (Orientation::Horizontal, _) => size.height,
    }
}

/// The axis translation, falling back to the baseline for an unresolved offset.
pub fn axis_transform(
    orientation: Orientation,
    side: Side,
    size: Size,
    offset: Option<ResolvedOffset>,
) -> AxisTransform {
    let position = match offset {
        Some(o) => o.range_offset + o.pixel,
        None => baseline(orientation, side, size),
    };
    match orientation {
        Orientation::Vertical => AxisTransform { x: position, y: 0.0 },
        Orientation::Horizontal => AxisTransform { x: 0.0, y: position },
    }
}

/// Inner and outer tick lengths.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSize {
    /// Length of the ticks at each value (negative lengths point into the plot).
    pub inner: f64,
    /// Length of the end ticks.
    pub outer: f64,
}

/// Tick and grid line geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickGeometry {
    /// Tick lengths.
    pub size: TickSize,
    /// Shift of the tick line start across the axis, when grid lines cross an offset axis.
    pub cross_offset: Option<f64>,
    /// Whether ticks are short marks rather than grid lines.
    pub short: bool,
}

/// Computes tick lengths so that grid lines span the plot from wherever the axis sits.
///
/// Grid lines use the raw mapped offset pixel, without the range offset.
pub fn tick_geometry(
    orientation: Orientation,
    side: Side,
    size: Size,
    offset: Option<ResolvedOffset>,
    grid: GridLines,
) -> TickGeometry {
    if grid == GridLines::None {
        return TickGeometry {
            size: TickSize {
                inner: DEFAULT_TICK_SIZE,
                outer: DEFAULT_TICK_SIZE,
            },
            cross_offset: None,
            short: true,
        };
    }

    let span = match orientation {
        Orientation::Vertical => size.width,
        Orientation::Horizontal => size.height,
    };
    let (inner, cross_offset) = match offset {
        None => (-span, None),
        Some(ResolvedOffset { pixel, .. }) => {
            if side.normalized(orientation).is_leading() {
                (-span + pixel, Some(-pixel))
            } else {
                (-pixel, Some(span - pixel))
            }
        }
    };
    TickGeometry {
        size: TickSize {
            inner,
            outer: DEFAULT_TICK_SIZE,
        },
        cross_offset,
        short: false,
    }
}

/// Pixel ranges for the primary and offset scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleRanges {
    /// Range of the scale the axis draws.
    pub primary: (f64, f64),
    /// Range of the perpendicular offset scale.
    pub offset: (f64, f64),
}

/// Vertical axes run bottom-up; horizontal axes left to right. The offset scale runs across.
pub fn scale_ranges(orientation: Orientation, size: Size) -> ScaleRanges {
    match orientation {
        Orientation::Vertical => ScaleRanges {
            primary: (size.height, 0.0),
            offset: (0.0, size.width),
        },
        Orientation::Horizontal => ScaleRanges {
            primary: (0.0, size.width),
            offset: (size.height, 0.0),
        },
    }
}
