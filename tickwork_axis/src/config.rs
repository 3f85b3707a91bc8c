// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis configuration.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::FixedOffset;
use peniko::Color;

use crate::format::utc;
use crate::label::Length;
use crate::scale::ScaleDescriptor;
use crate::value::Value;

/// Whether the axis runs along x or y.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Along the x direction.
    #[default]
    Horizontal,
    /// Along the y direction.
    Vertical,
}

/// The side of the plot an axis sits on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above the plot.
    Top,
    /// Below the plot.
    #[default]
    Bottom,
    /// Left of the plot.
    Left,
    /// Right of the plot.
    Right,
}

impl Side {
    /// The side actually used for `orientation`.
    ///
    /// Vertical axes sit on the right only when asked to, otherwise on the left. Horizontal
    /// axes sit on top only when asked to, otherwise at the bottom.
    pub fn normalized(self, orientation: Orientation) -> Self {
        match (orientation, self) {
            (Orientation::Vertical, Self::Right) => Self::Right,
            (Orientation::Vertical, _) => Self::Left,
            (Orientation::Horizontal, Self::Top) => Self::Top,
            (Orientation::Horizontal, _) => Self::Bottom,
        }
    }

    /// `Top` and `Left`: the sides facing the origin.
    pub fn is_leading(self) -> bool {
        matches!(self, Self::Top | Self::Left)
    }
}

/// Grid line mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GridLines {
    /// Short tick marks only.
    #[default]
    None,
    /// Solid lines across the plot.
    Solid,
    /// Dashed lines across the plot.
    Dashed,
}

impl GridLines {
    /// The stroke dash pattern for grid lines.
    pub fn dash_pattern(self) -> Option<&'static str> {
        match self {
            Self::Dashed => Some("5, 5"),
            Self::None | Self::Solid => None,
        }
    }
}

/// Where the axis label sits along the axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LabelLocation {
    /// At the origin end.
    Start,
    /// Centred.
    #[default]
    Middle,
    /// At the far end.
    End,
}

impl LabelLocation {
    /// The SVG `text-anchor` keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// The axis title.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisLabel {
    /// Title text.
    pub text: String,
    /// Position along the axis.
    pub location: LabelLocation,
    /// Distance from the axis line. Defaults to `2em` (horizontal) or `4ex` (vertical).
    pub offset: Option<Length>,
    /// Text colour, if not inherited.
    pub color: Option<Color>,
}

/// Positions the axis at a domain value of a perpendicular scale.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OffsetSpec {
    /// The value to cross at. `None` disables the offset.
    pub value: Option<Value>,
    /// The scale to locate `value` on. `None` uses the container's perpendicular scale.
    pub scale: Option<ScaleDescriptor>,
}

impl OffsetSpec {
    /// Crosses the container's perpendicular scale at `value`.
    pub fn at(value: impl Into<Value>) -> Self {
        Self {
            value: Some(value.into()),
            scale: None,
        }
    }

    /// Crosses a dedicated scale at `value`.
    pub fn on(value: impl Into<Value>, scale: ScaleDescriptor) -> Self {
        Self {
            value: Some(value.into()),
            scale: Some(scale),
        }
    }
}

/// Everything the host configures on an axis.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisConfig {
    /// Horizontal or vertical.
    pub orientation: Orientation,
    /// Requested side; see [`Side::normalized`].
    pub side: Side,
    /// Requested tick count.
    ///
    /// Interpolated ticks are capped at [`MAX_INTERPOLATED`](crate::MAX_INTERPOLATED).
    pub num_ticks: Option<usize>,
    /// Explicit tick values.
    pub tick_values: Option<Vec<Value>>,
    /// Number specifier or date pattern for tick labels.
    pub tick_format: Option<String>,
    /// Tick label rotation, in degrees.
    pub tick_rotate: f64,
    /// Extra style properties for tick labels, passed through to the renderer.
    pub tick_style: BTreeMap<String, String>,
    /// Grid line mode.
    pub grid_lines: GridLines,
    /// Grid line colour.
    pub grid_color: Option<Color>,
    /// Axis line colour.
    pub color: Option<Color>,
    /// Axis title.
    pub label: AxisLabel,
    /// Whether the axis is shown.
    pub visible: bool,
    /// Optional crossing point on a perpendicular scale.
    pub offset: OffsetSpec,
    /// Offset used to render dates.
    pub time_zone: FixedOffset,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::new(Orientation::Horizontal)
    }
}

impl AxisConfig {
    /// A visible axis with no ticks configured, on its default side.
    pub fn new(orientation: Orientation) -> Self {
        let side = match orientation {
            Orientation::Horizontal => Side::Bottom,
            Orientation::Vertical => Side::Left,
        };
        Self {
            orientation,
            side,
            num_ticks: None,
            tick_values: None,
            tick_format: None,
            tick_rotate: 0.0,
            tick_style: BTreeMap::new(),
            grid_lines: GridLines::None,
            grid_color: None,
            color: None,
            label: AxisLabel::default(),
            visible: true,
            offset: OffsetSpec::default(),
            time_zone: utc(),
        }
    }

    /// A horizontal axis.
    pub fn horizontal() -> Self {
        Self::new(Orientation::Horizontal)
    }

    /// A vertical axis.
    pub fn vertical() -> Self {
        Self::new(Orientation::Vertical)
    }

    /// The normalized side.
    pub fn effective_side(&self) -> Side {
        self.side.normalized(self.orientation)
    }

    /// Whether the axis is vertical.
    pub fn is_vertical(&self) -> bool {
        self.orientation == Orientation::Vertical
    }

    /// Set the side.
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    /// Set the tick count.
    pub fn with_num_ticks(mut self, num_ticks: usize) -> Self {
        self.num_ticks = Some(num_ticks);
        self
    }

    /// Set explicit tick values.
    pub fn with_tick_values(mut self, values: impl IntoIterator<Item = impl Into<Value>>) -> Self {
        self.tick_values = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Set the tick label format.
    pub fn with_tick_format(mut self, format: impl Into<String>) -> Self {
        self.tick_format = Some(format.into());
        self
    }

    /// Set tick label rotation in degrees.
    pub fn with_tick_rotate(mut self, degrees: f64) -> Self {
        self.tick_rotate = degrees;
        self
    }

    /// Add a tick label style property.
    pub fn with_tick_style(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tick_style.insert(key.into(), value.into());
        self
    }

    /// Set the grid line mode.
    pub fn with_grid_lines(mut self, grid_lines: GridLines) -> Self {
        self.grid_lines = grid_lines;
        self
    }

    /// Set the grid line colour.
    pub fn with_grid_color(mut self, color: Color) -> Self {
        self.grid_color = Some(color);
        self
    }

    /// Set the axis line colour.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Set the axis title text.
    pub fn with_label(mut self, text: impl Into<String>) -> Self {
        self.label.text = text.into();
        self
    }

    /// Set the axis title position.
    pub fn with_label_location(mut self, location: LabelLocation) -> Self {
        self.label.location = location;
        self
    }

    /// Set the axis title offset.
    pub fn with_label_offset(mut self, offset: Length) -> Self {
        self.label.offset = Some(offset);
        self
    }

    /// Set the axis title colour.
    pub fn with_label_color(mut self, color: Color) -> Self {
        self.label.color = Some(color);
        self
    }

    /// Show or hide the axis.
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Set the crossing point.
    pub fn with_offset(mut self, offset: OffsetSpec) -> Self {
        self.offset = offset;
        self
    }

    /// Set the offset used to render dates.
    pub fn with_time_zone(mut self, time_zone: FixedOffset) -> Self {
        self.time_zone = time_zone;
        self
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn sides_normalize_against_orientation() {
        use Orientation::*;
        use Side::*;
        let cases = [
            (Vertical, Right, Right),
            (Vertical, Left, Left),
            (Vertical, Top, Left),
            (Vertical, Bottom, Left),
            (Horizontal, Top, Top),
            (Horizontal, Bottom, Bottom),
            (Horizontal, Left, Bottom),
            (Horizontal, Right, Bottom),
        ];
        for (orientation, side, expected) in cases {
            assert_eq!(side.normalized(orientation), expected, "{orientation:?} {side:?}");
        }
    }

    #[test]
    fn builders() {
        let config = AxisConfig::vertical()
            .with_num_ticks(4)
            .with_tick_values([1.0, 2.0])
            .with_tick_style("font-size", "9px")
            .with_grid_lines(GridLines::Dashed)
            .with_offset(OffsetSpec::at(0.0));
        assert_eq!(config.effective_side(), Side::Left);
        assert_eq!(config.num_ticks, Some(4));
        assert_eq!(config.tick_values.as_deref().map(<[_]>::len), Some(2));
        assert_eq!(config.grid_lines.dash_pattern(), Some("5, 5"));
        assert_eq!(config.offset.value, Some(Value::Number(0.0)));
        assert_eq!(config.tick_style.get("font-size").map(String::as_str), Some("9px"));
    }
}
