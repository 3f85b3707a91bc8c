// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis title placement.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use kurbo::Size;
use peniko::Color;

use crate::config::{AxisLabel, LabelLocation, Orientation, Side};

/// A CSS-like length unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LengthUnit {
    /// Font size.
    Em,
    /// x-height.
    Ex,
    /// Pixels.
    Px,
    /// No unit.
    None,
}

impl LengthUnit {
    fn suffix(self) -> &'static str {
        match self {
            Self::Em => "em",
            Self::Ex => "ex",
            Self::Px => "px",
            Self::None => "",
        }
    }
}

/// A signed length such as `2em`, `-4ex`, `12px` or `7`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    /// Magnitude.
    pub value: f64,
    /// Unit.
    pub unit: LengthUnit,
}

impl Length {
    /// A length in `em`.
    pub const fn em(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Em,
        }
    }

    /// A length in `ex`.
    pub const fn ex(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Ex,
        }
    }

    /// A length in pixels.
    pub const fn px(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::Px,
        }
    }

    /// A unitless length.
    pub const fn number(value: f64) -> Self {
        Self {
            value,
            unit: LengthUnit::None,
        }
    }

    /// The same length pointing the other way.
    pub fn negated(self) -> Self {
        Self {
            value: -self.value,
            ..self
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            tickwork_format::to_string(self.value),
            self.unit.suffix()
        )
    }
}

/// A string that is not a number with an optional `em`, `ex` or `px` suffix.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid length {0:?}")]
pub struct ParseLengthError(String);

impl FromStr for Length {
    type Err = ParseLengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (number, unit) = [LengthUnit::Em, LengthUnit::Ex, LengthUnit::Px]
            .into_iter()
            .find_map(|unit| trimmed.strip_suffix(unit.suffix()).map(|n| (n, unit)))
            .unwrap_or((trimmed, LengthUnit::None));
        let value = number
            .trim_end()
            .parse::<f64>()
            .map_err(|_| ParseLengthError(String::from(s)))?;
        if !value.is_finite() {
            return Err(ParseLengthError(String::from(s)));
        }
        Ok(Self { value, unit })
    }
}

/// Renderer-facing attributes of the axis title.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelAttributes {
    /// Title text.
    pub text: String,
    /// Position along the (rotated) axis.
    pub x: f64,
    /// Distance from the axis line.
    pub y: Length,
    /// Horizontal nudge.
    pub dx: Length,
    /// Vertical nudge.
    pub dy: Length,
    /// Text anchor.
    pub anchor: LabelLocation,
    /// Rotation in degrees, for vertical axes.
    pub rotation: Option<f64>,
    /// Fill colour, when set.
    pub color: Option<Color>,
}

impl LabelAttributes {
    /// The SVG transform for the rotation, if any.
    pub fn transform(&self) -> Option<String> {
        self.rotation
            .map(|r| format!("rotate({})", tickwork_format::to_string(r)))
    }
}

/// The title's distance from the axis line.
///
/// Positive values point away from the plot. Leading sides (top and left) flip the sign of
/// lengths that carry a unit; bare numbers are left alone.
pub fn label_offset(orientation: Orientation, side: Side, offset: Option<Length>) -> Length {
    let offset = offset.unwrap_or(match orientation {
        Orientation::Horizontal => Length::em(2.0),
        Orientation::Vertical => Length::ex(4.0),
    });
    if side.normalized(orientation).is_leading() && offset.unit != LengthUnit::None {
        offset.negated()
    } else {
        offset
    }
}

/// Places the title of an axis on a plot of `size`.
pub fn label_attributes(
    label: &AxisLabel,
    orientation: Orientation,
    side: Side,
    size: Size,
) -> LabelAttributes {
    let side = side.normalized(orientation);
    let y = label_offset(orientation, side, label.offset);
    let (x, dy, rotation) = match orientation {
        Orientation::Vertical => {
            let x = match label.location {
                LabelLocation::Start => -size.height,
                LabelLocation::Middle => -size.height / 2.0,
                LabelLocation::End => 0.0,
            };
            let dy = if side == Side::Right {
                Length::ex(1.0)
            } else {
                Length::em(0.0)
            };
            (x, dy, Some(-90.0))
        }
        Orientation::Horizontal => {
            let x = match label.location {
                LabelLocation::Start => 0.0,
                LabelLocation::Middle => size.width / 2.0,
                LabelLocation::End => size.width,
            };
            let dy = if side == Side::Top {
                Length::ex(0.75)
            } else {
                Length::ex(0.25)
            };
            (x, dy, None)
        }
    };
    LabelAttributes {
        text: label.text.clone(),
        x,
        y,
        dx: Length::em(0.0),
        dy,
        anchor: label.location,
        rotation,
        color: label.color,
    }
}
