// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis rendering engine.
//!
//! Turns a scale and an axis configuration into a render-ready [`AxisOutput`]:
//! - **Tick selection** from explicit lists, counts, or a scale's natural ticks.
//! - **Label formatting** with precision inferred from the ticks, or an explicit
//!   number specifier / date pattern (see `tickwork_format`).
//! - **Placement**: baselines, offsets against a perpendicular scale, and grid lines
//!   that span the plot from wherever the axis sits.
//! - **Coordination**: an [`Axis`] binds scales (possibly asynchronously), listens to their
//!   notifications, and recomputes only what a change affects.
//!
//! Drawing is left to the caller; the output uses SVG-style transforms and lengths.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod axis;
#[cfg(test)]
mod axis_tests;
mod binding;
mod config;
mod container;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod label;
mod output;
mod scale;
mod ticks;
mod time;
mod transform;
mod value;

pub use axis::{Axis, AxisChange, OffsetRequest, OffsetStart, RedrawPlan};
pub use binding::{
    AxisEvent, BindError, BindOutcome, BindTicket, ImmediateFactory, OffsetBinding, OffsetTicket,
    ScaleBinding, ScaleFactory,
};
pub use config::{AxisConfig, AxisLabel, GridLines, LabelLocation, OffsetSpec, Orientation, Side};
pub use container::{ContainerState, DomainSync, NoDomainSync};
pub use format::{FormatStrategy, TickFormatter};
pub use label::{
    LabelAttributes, Length, LengthUnit, ParseLengthError, label_attributes, label_offset,
};
pub use output::{AxisOutput, GridStyle, Tick, Transition};
pub use scale::{
    DEFAULT_TICK_COUNT, Domain, Scale, ScaleDescriptor, ScaleEvent, ScaleHandle, ScaleKind,
    Subscription,
};
pub use ticks::{MAX_INTERPOLATED, select_ticks};
pub use transform::{
    AxisTransform, DEFAULT_TICK_SIZE, ResolvedOffset, ScaleRanges, TickGeometry, TickSize,
    axis_transform, baseline, resolve_offset, scale_ranges, tick_geometry,
};
pub use value::Value;
