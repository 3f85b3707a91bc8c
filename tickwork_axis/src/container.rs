// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! What an axis needs from the chart that hosts it.

use core::time::Duration;

use kurbo::{Insets, Size};

use crate::scale::ScaleHandle;

/// The host chart's layout and shared scales.
#[derive(Clone, Debug)]
pub struct ContainerState {
    /// Outer size of the chart.
    pub size: Size,
    /// Space reserved around the plot (`x0` left, `y0` top, `x1` right, `y1` bottom).
    pub margin: Insets,
    /// The chart's horizontal scale, used as the offset scale of vertical axes.
    pub scale_x: Option<ScaleHandle>,
    /// The chart's vertical scale, used as the offset scale of horizontal axes.
    pub scale_y: Option<ScaleHandle>,
    /// Duration of animated transitions.
    pub animation_duration: Duration,
}

impl Default for ContainerState {
    fn default() -> Self {
        Self {
            size: Size::new(800.0, 600.0),
            margin: Insets::new(60.0, 60.0, 60.0, 60.0),
            scale_x: None,
            scale_y: None,
            animation_duration: Duration::ZERO,
        }
    }
}

impl ContainerState {
    /// A container of `size` with `margin` around the plot.
    pub fn new(size: Size, margin: Insets) -> Self {
        Self {
            size,
            margin,
            ..Self::default()
        }
    }

    /// Sets the shared x and y scales.
    pub fn with_scales(
        mut self,
        scale_x: Option<ScaleHandle>,
        scale_y: Option<ScaleHandle>,
    ) -> Self {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self
    }

    /// Sets the transition duration.
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// The plot area: the outer size minus margins.
    pub fn plot_size(&self) -> Size {
        Size::new(
            self.size.width - self.margin.x_value(),
            self.size.height - self.margin.y_value(),
        )
    }
}

/// Recomputes scale domains whose extent depends on the plot size.
///
/// Charts with fixed-pixel padding around their data implement this; the axis calls it
/// whenever it recomputes domains, with the pixel length of the scale's range.
pub trait DomainSync {
    /// Updates `scale`'s domain for a range of `length` pixels.
    fn refresh_domain(&self, scale: &ScaleHandle, length: f64);
}

/// Leaves domains untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDomainSync;

impl DomainSync for NoDomainSync {
    fn refresh_domain(&self, _scale: &ScaleHandle, _length: f64) {}
}
