// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The redraw coordinator.
//!
//! An [`Axis`] owns its configuration, the container layout it was given, and the scales it
//! is bound to. Every change is mapped to a [`RedrawPlan`], the smallest set of steps that
//! brings the last [`AxisOutput`] up to date. Scale notifications are queued and replayed by
//! [`Axis::process_events`] in arrival order, each fully applied before the next.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::future::Future;
use core::ops::{BitOr, BitOrAssign};

use chrono::FixedOffset;
use kurbo::Size;
use peniko::Color;

use crate::binding::{
    AxisEvent, BindError, BindOutcome, BindTicket, OffsetTicket, ScaleBinding, ScaleFactory,
};
use crate::config::{AxisConfig, GridLines, LabelLocation, OffsetSpec, Orientation, Side};
use crate::container::{ContainerState, DomainSync, NoDomainSync};
use crate::format::TickFormatter;
use crate::label::{Length, label_attributes};
use crate::output::{AxisOutput, GridStyle, Tick, Transition};
use crate::scale::{ScaleDescriptor, ScaleHandle};
use crate::ticks::select_ticks;
use crate::transform::{
    AxisTransform, DEFAULT_TICK_SIZE, TickSize, axis_transform, resolve_offset, scale_ranges,
    tick_geometry,
};
use crate::value::Value;

/// A set of redraw steps.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RedrawPlan(u16);

impl RedrawPlan {
    /// No steps.
    pub const EMPTY: Self = Self(0);
    /// Set the pixel ranges of the primary and offset scales.
    pub const RANGES: Self = Self(1 << 0);
    /// Let the domain owner refresh the primary domain.
    pub const DOMAINS: Self = Self(1 << 1);
    /// Let the domain owner refresh the offset domain.
    pub const OFFSET_DOMAIN: Self = Self(1 << 2);
    /// Select ticks and place them.
    pub const TICKS: Self = Self(1 << 3);
    /// Format tick labels.
    pub const LABELS: Self = Self(1 << 4);
    /// Position the axis line.
    pub const TRANSFORM: Self = Self(1 << 5);
    /// Compute tick lengths and grid styling.
    pub const GRID: Self = Self(1 << 6);
    /// Copy tick label rotation and style.
    pub const STYLING: Self = Self(1 << 7);
    /// Place the axis title.
    pub const AXIS_LABEL: Self = Self(1 << 8);
    /// Restyle the axis line.
    pub const LINE_COLOR: Self = Self(1 << 9);
    /// Show or hide.
    pub const VISIBILITY: Self = Self(1 << 10);
    /// Apply the emphasis flag.
    pub const EMPHASIS: Self = Self(1 << 11);
    /// Animate towards the result.
    pub const ANIMATED: Self = Self(1 << 12);

    /// Every step, not animated.
    pub const FULL: Self = Self((1 << 12) - 1);
    /// A new primary scale was bound.
    pub const SCALE_SWAPPED: Self = Self::RANGES
        .union(Self::DOMAINS)
        .union(Self::TICKS)
        .union(Self::LABELS)
        .union(Self::TRANSFORM)
        .union(Self::GRID)
        .union(Self::STYLING);
    /// The primary scale's domain changed.
    pub const DOMAIN_CHANGED: Self = Self::RANGES
        .union(Self::DOMAINS)
        .union(Self::TICKS)
        .union(Self::LABELS)
        .union(Self::TRANSFORM)
        .union(Self::GRID)
        .union(Self::ANIMATED);
    /// The offset was rebound.
    pub const OFFSET_CHANGED: Self = Self::RANGES
        .union(Self::OFFSET_DOMAIN)
        .union(Self::TRANSFORM)
        .union(Self::GRID);
    /// The offset scale's domain changed.
    pub const OFFSET_DOMAIN_CHANGED: Self = Self::OFFSET_DOMAIN
        .union(Self::TRANSFORM)
        .union(Self::GRID);

    const NAMES: [(Self, &'static str); 13] = [
        (Self::RANGES, "RANGES"),
        (Self::DOMAINS, "DOMAINS"),
        (Self::OFFSET_DOMAIN, "OFFSET_DOMAIN"),
        (Self::TICKS, "TICKS"),
        (Self::LABELS, "LABELS"),
        (Self::TRANSFORM, "TRANSFORM"),
        (Self::GRID, "GRID"),
        (Self::STYLING, "STYLING"),
        (Self::AXIS_LABEL, "AXIS_LABEL"),
        (Self::LINE_COLOR, "LINE_COLOR"),
        (Self::VISIBILITY, "VISIBILITY"),
        (Self::EMPHASIS, "EMPHASIS"),
        (Self::ANIMATED, "ANIMATED"),
    ];

    /// Both sets of steps.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every step of `other` is included.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether there is nothing to do.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for RedrawPlan {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for RedrawPlan {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl core::fmt::Debug for RedrawPlan {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut set = f.debug_set();
        for (step, name) in Self::NAMES {
            if self.contains(step) {
                set.entry(&format_args!("{name}"));
            }
        }
        set.finish()
    }
}

/// A change to one configuration field.
#[derive(Clone, Debug, PartialEq)]
pub enum AxisChange {
    /// See [`AxisConfig::orientation`].
    Orientation(Orientation),
    /// See [`AxisConfig::side`].
    Side(Side),
    /// See [`AxisConfig::num_ticks`].
    NumTicks(Option<usize>),
    /// See [`AxisConfig::tick_values`].
    TickValues(Option<Vec<Value>>),
    /// See [`AxisConfig::tick_format`].
    TickFormat(Option<String>),
    /// See [`AxisConfig::tick_rotate`].
    TickRotate(f64),
    /// See [`AxisConfig::tick_style`].
    TickStyle(BTreeMap<String, String>),
    /// See [`AxisConfig::grid_lines`].
    GridLines(GridLines),
    /// See [`AxisConfig::grid_color`].
    GridColor(Option<Color>),
    /// See [`AxisConfig::color`].
    Color(Option<Color>),
    /// The axis title text.
    Label(String),
    /// The axis title position.
    LabelLocation(LabelLocation),
    /// The axis title offset.
    LabelOffset(Option<Length>),
    /// The axis title colour.
    LabelColor(Option<Color>),
    /// See [`AxisConfig::visible`].
    Visible(bool),
    /// See [`AxisConfig::time_zone`].
    TimeZone(FixedOffset),
}

impl AxisChange {
    /// The steps needed after this change.
    pub fn plan(&self) -> RedrawPlan {
        match self {
            Self::Orientation(_) | Self::Side(_) => RedrawPlan::FULL,
            Self::NumTicks(_) | Self::TickValues(_) => {
                RedrawPlan::TICKS | RedrawPlan::LABELS | RedrawPlan::STYLING
            }
            Self::TickRotate(_) | Self::TickStyle(_) => RedrawPlan::STYLING,
            Self::TickFormat(_) => RedrawPlan::LABELS | RedrawPlan::STYLING,
            Self::TimeZone(_) => RedrawPlan::LABELS,
            Self::GridLines(_) | Self::GridColor(_) => RedrawPlan::GRID,
            Self::Color(_) => RedrawPlan::LINE_COLOR,
            Self::Label(_)
            | Self::LabelLocation(_)
            | Self::LabelOffset(_)
            | Self::LabelColor(_) => RedrawPlan::AXIS_LABEL,
            Self::Visible(_) => RedrawPlan::VISIBILITY,
        }
    }

    /// Writes the change into `config`; returns whether anything changed.
    fn write(self, config: &mut AxisConfig) -> bool {
        fn set<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }
        match self {
            Self::Orientation(v) => set(&mut config.orientation, v),
            Self::Side(v) => set(&mut config.side, v),
            Self::NumTicks(v) => set(&mut config.num_ticks, v),
            Self::TickValues(v) => set(&mut config.tick_values, v),
            Self::TickFormat(v) => set(&mut config.tick_format, v),
            Self::TickRotate(v) => set(&mut config.tick_rotate, v),
            Self::TickStyle(v) => set(&mut config.tick_style, v),
            Self::GridLines(v) => set(&mut config.grid_lines, v),
            Self::GridColor(v) => set(&mut config.grid_color, v),
            Self::Color(v) => set(&mut config.color, v),
            Self::Label(v) => set(&mut config.label.text, v),
            Self::LabelLocation(v) => set(&mut config.label.location, v),
            Self::LabelOffset(v) => set(&mut config.label.offset, v),
            Self::LabelColor(v) => set(&mut config.label.color, v),
            Self::Visible(v) => set(&mut config.visible, v),
            Self::TimeZone(v) => set(&mut config.time_zone, v),
        }
    }
}

/// A pending offset change started by [`Axis::begin_set_offset`].
#[derive(Debug)]
#[must_use = "the offset only changes once committed"]
pub struct OffsetRequest {
    ticket: OffsetTicket,
    spec: OffsetSpec,
}

/// The result of starting an offset change.
#[derive(Debug)]
pub enum OffsetStart<Fut> {
    /// The offset was cleared or bound to a container scale; the axis is already redrawn.
    Done,
    /// A dedicated scale is being built; await the future and pass its result to
    /// [`Axis::commit_offset`].
    Pending(OffsetRequest, Fut),
}

/// An axis: configuration, bound scales and the last computed output.
pub struct Axis {
    config: AxisConfig,
    container: ContainerState,
    binding: ScaleBinding,
    sync: Rc<dyn DomainSync>,
    emphasized: bool,
    rendered: bool,
    output: AxisOutput,
}

impl core::fmt::Debug for Axis {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Axis")
            .field("config", &self.config)
            .field("container", &self.container)
            .field("binding", &self.binding)
            .field("sync", &"<dyn DomainSync>")
            .field("emphasized", &self.emphasized)
            .field("rendered", &self.rendered)
            .field("output", &self.output)
            .finish()
    }
}

impl Axis {
    /// An axis with no scale bound yet.
    pub fn new(config: AxisConfig, container: ContainerState) -> Self {
        let output = blank_output(&config, container.plot_size());
        Self {
            config,
            container,
            binding: ScaleBinding::new(),
            sync: Rc::new(NoDomainSync),
            emphasized: false,
            rendered: false,
            output,
        }
    }

    /// Installs the hook that refreshes domains when they are recomputed.
    pub fn with_domain_sync(mut self, sync: Rc<dyn DomainSync>) -> Self {
        self.sync = sync;
        self
    }

    /// The current configuration.
    pub fn config(&self) -> &AxisConfig {
        &self.config
    }

    /// The current container state.
    pub fn container(&self) -> &ContainerState {
        &self.container
    }

    /// The bound scales.
    pub fn binding(&self) -> &ScaleBinding {
        &self.binding
    }

    /// Whether the axis is emphasised.
    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }

    /// The last computed output, once the axis has been drawn.
    pub fn output(&self) -> Option<&AxisOutput> {
        self.rendered.then_some(&self.output)
    }

    /// Runs the full cascade.
    pub fn render(&mut self) -> Result<&AxisOutput, BindError> {
        self.redraw(RedrawPlan::FULL)?;
        Ok(&self.output)
    }

    /// Applies a configuration change and redraws what it affects.
    ///
    /// Returns the steps that ran. Nothing runs when the value is unchanged, and while no
    /// scale is bound only the configuration is updated.
    pub fn apply(&mut self, change: AxisChange) -> RedrawPlan {
        let plan = change.plan();
        let moves = matches!(change, AxisChange::Orientation(_) | AxisChange::Side(_));
        if !change.write(&mut self.config) {
            return RedrawPlan::EMPTY;
        }
        if moves {
            self.rebind_shared_offset();
        }
        self.redraw_logged(plan)
    }

    /// Replaces the container layout and shared scales, and redraws everything.
    pub fn set_container(&mut self, container: ContainerState) -> RedrawPlan {
        self.container = container;
        self.rebind_shared_offset();
        self.redraw_logged(RedrawPlan::FULL)
    }

    /// Points a shared offset at the current perpendicular container scale.
    fn rebind_shared_offset(&mut self) {
        if let (Some(value), None) = (&self.config.offset.value, &self.config.offset.scale) {
            match self.perpendicular_scale() {
                Some(handle) => self.binding.set_shared_offset(handle, value.clone()),
                None => self.binding.clear_offset(),
            }
        }
    }

    /// Binds an already constructed scale.
    pub fn set_scale(&mut self, handle: ScaleHandle) -> RedrawPlan {
        self.binding.set_primary(handle);
        self.redraw_logged(RedrawPlan::SCALE_SWAPPED)
    }

    /// Starts binding a new primary scale. See [`ScaleBinding::begin_bind`].
    pub fn begin_bind<'f, F: ScaleFactory>(
        &mut self,
        factory: &'f F,
        descriptor: ScaleDescriptor,
    ) -> (
        BindTicket,
        impl Future<Output = Result<ScaleHandle, BindError>> + use<'f, F>,
    ) {
        self.binding.begin_bind(factory, descriptor)
    }

    /// Applies a finished primary bind and redraws.
    pub fn commit_bind(
        &mut self,
        ticket: BindTicket,
        result: Result<ScaleHandle, BindError>,
    ) -> Result<BindOutcome, BindError> {
        let outcome = self.binding.commit(ticket, result)?;
        if outcome == BindOutcome::Applied {
            self.redraw(RedrawPlan::SCALE_SWAPPED)?;
        }
        Ok(outcome)
    }

    /// Builds and binds a new primary scale.
    pub async fn bind_scale<F: ScaleFactory>(
        &mut self,
        factory: &F,
        descriptor: ScaleDescriptor,
    ) -> Result<BindOutcome, BindError> {
        let (ticket, build) = self.begin_bind(factory, descriptor);
        let result = build.await;
        self.commit_bind(ticket, result)
    }

    /// Starts changing the offset.
    ///
    /// Clearing the offset, or crossing the container's perpendicular scale, takes effect
    /// immediately. A dedicated scale has to be built first.
    pub fn begin_set_offset<'f, F: ScaleFactory>(
        &mut self,
        factory: &'f F,
        spec: OffsetSpec,
    ) -> Result<
        OffsetStart<impl Future<Output = Result<ScaleHandle, BindError>> + use<'f, F>>,
        BindError,
    > {
        let Some(value) = spec.value.clone() else {
            self.binding.clear_offset();
            self.finish_offset(spec);
            return Ok(OffsetStart::Done);
        };
        match &spec.scale {
            None => {
                let handle = self
                    .perpendicular_scale()
                    .ok_or(BindError::MissingContainerScale)?;
                self.binding.set_shared_offset(handle, value);
                self.finish_offset(spec);
                Ok(OffsetStart::Done)
            }
            Some(descriptor) => {
                let (ticket, build) =
                    self.binding
                        .begin_bind_offset(factory, descriptor.clone(), value);
                Ok(OffsetStart::Pending(OffsetRequest { ticket, spec }, build))
            }
        }
    }

    /// Applies a finished offset bind and redraws.
    pub fn commit_offset(
        &mut self,
        request: OffsetRequest,
        result: Result<ScaleHandle, BindError>,
    ) -> Result<BindOutcome, BindError> {
        let outcome = self.binding.commit_offset(request.ticket, result)?;
        if outcome == BindOutcome::Applied {
            self.finish_offset(request.spec);
        }
        Ok(outcome)
    }

    /// Changes the offset, building a dedicated scale when one is described.
    pub async fn set_offset<F: ScaleFactory>(
        &mut self,
        factory: &F,
        spec: OffsetSpec,
    ) -> Result<BindOutcome, BindError> {
        match self.begin_set_offset(factory, spec)? {
            OffsetStart::Done => Ok(BindOutcome::Applied),
            OffsetStart::Pending(request, build) => {
                let result = build.await;
                self.commit_offset(request, result)
            }
        }
    }

    fn finish_offset(&mut self, spec: OffsetSpec) {
        self.config.offset = spec;
        // While no scale is bound the first render picks the offset up.
        self.redraw_logged(RedrawPlan::OFFSET_CHANGED);
    }

    fn perpendicular_scale(&self) -> Option<ScaleHandle> {
        match self.config.orientation {
            Orientation::Vertical => self.container.scale_x.clone(),
            Orientation::Horizontal => self.container.scale_y.clone(),
        }
    }

    /// Replays queued scale notifications in arrival order; returns how many were handled.
    ///
    /// Redraws may refresh domains through [`DomainSync`], which can queue further
    /// notifications; those are handled in the same call.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.binding.next_event() {
            let plan = match event {
                AxisEvent::DomainChanged => RedrawPlan::DOMAIN_CHANGED,
                AxisEvent::OffsetDomainChanged => RedrawPlan::OFFSET_DOMAIN_CHANGED,
                AxisEvent::Highlight => {
                    self.emphasized = true;
                    RedrawPlan::EMPHASIS
                }
                AxisEvent::Unhighlight => {
                    self.emphasized = false;
                    RedrawPlan::EMPHASIS
                }
            };
            log::trace!("scale event {event:?}");
            self.redraw_logged(plan);
            handled += 1;
        }
        handled
    }

    /// Redraws where there is no caller to report to; returns the steps that ran.
    fn redraw_logged(&mut self, plan: RedrawPlan) -> RedrawPlan {
        self.redraw(plan).unwrap_or_else(|err| {
            log::debug!("redraw of {plan:?} skipped: {err}");
            RedrawPlan::EMPTY
        })
    }

    /// Runs `plan` against the current inputs; the first redraw always runs every step.
    fn redraw(&mut self, plan: RedrawPlan) -> Result<RedrawPlan, BindError> {
        let primary = self
            .binding
            .primary()
            .cloned()
            .ok_or(BindError::NoScaleBound)?;
        let plan = if self.rendered {
            plan
        } else {
            plan | RedrawPlan::FULL
        };
        log::trace!("redraw {plan:?}");

        let config = &self.config;
        let orientation = config.orientation;
        let side = config.side;
        let size = self.container.plot_size();
        let ranges = scale_ranges(orientation, size);
        let offset = self.binding.offset();

        if plan.contains(RedrawPlan::RANGES) {
            primary.set_range(ranges.primary.0, ranges.primary.1);
            if let Some(offset) = offset {
                offset.handle().set_range(ranges.offset.0, ranges.offset.1);
            }
        }
        if plan.contains(RedrawPlan::DOMAINS) {
            self.sync
                .refresh_domain(&primary, (ranges.primary.1 - ranges.primary.0).abs());
        }
        if plan.contains(RedrawPlan::OFFSET_DOMAIN) {
            if let Some(offset) = offset.filter(|o| o.is_dedicated()) {
                self.sync
                    .refresh_domain(offset.handle(), (ranges.offset.1 - ranges.offset.0).abs());
            }
        }

        let out = &mut self.output;
        if plan.contains(RedrawPlan::TICKS) {
            out.ticks = primary.with(|scale| {
                let shift = scale.range_offset();
                select_ticks(scale, config.tick_values.as_deref(), config.num_ticks)
                    .into_iter()
                    .filter_map(|value| {
                        let pixel = scale.map(&value)?;
                        Some(Tick {
                            value,
                            pixel: pixel + shift,
                            label: String::new(),
                        })
                    })
                    .collect()
            });
        }
        if plan.contains(RedrawPlan::LABELS) {
            let values: Vec<Value> = out.ticks.iter().map(|t| t.value.clone()).collect();
            let formatter = TickFormatter::new(
                primary.kind(),
                &values,
                config.tick_format.as_deref(),
                config.time_zone,
            );
            for tick in &mut out.ticks {
                tick.label = formatter.format(&tick.value);
            }
        }

        let resolved =
            offset.and_then(|o| o.handle().with(|scale| resolve_offset(scale, o.value())));
        if plan.contains(RedrawPlan::TRANSFORM) {
            out.transform = axis_transform(orientation, side, size, resolved);
        }
        if plan.contains(RedrawPlan::GRID) {
            let geometry = tick_geometry(orientation, side, size, resolved, config.grid_lines);
            out.tick_size = geometry.size;
            out.grid = GridStyle {
                lines: config.grid_lines,
                short: geometry.short,
                cross_offset: geometry.cross_offset,
                dash: config.grid_lines.dash_pattern(),
                color: config.grid_color,
            };
        }
        if plan.contains(RedrawPlan::STYLING) {
            out.tick_rotate = config.tick_rotate;
            out.tick_style = config.tick_style.clone();
        }
        if plan.contains(RedrawPlan::AXIS_LABEL) {
            out.label = label_attributes(&config.label, orientation, side, size);
        }
        if plan.contains(RedrawPlan::LINE_COLOR) {
            out.line_color = config.color;
        }
        if plan.contains(RedrawPlan::VISIBILITY) {
            out.visible = config.visible;
        }
        if plan.contains(RedrawPlan::EMPHASIS) {
            out.emphasized = self.emphasized;
        }
        out.transition = if plan.contains(RedrawPlan::ANIMATED) {
            Transition {
                duration: self.container.animation_duration,
            }
        } else {
            Transition::NONE
        };
        self.rendered = true;
        Ok(plan)
    }
}

fn blank_output(config: &AxisConfig, size: Size) -> AxisOutput {
    AxisOutput {
        visible: config.visible,
        emphasized: false,
        transform: AxisTransform::default(),
        ticks: Vec::new(),
        tick_size: TickSize {
            inner: DEFAULT_TICK_SIZE,
            outer: DEFAULT_TICK_SIZE,
        },
        tick_rotate: 0.0,
        grid: GridStyle {
            lines: GridLines::None,
            short: true,
            cross_offset: None,
            dash: None,
            color: None,
        },
        line_color: None,
        label: label_attributes(&config.label, config.orientation, config.side, size),
        tick_style: BTreeMap::new(),
        transition: Transition::NONE,
    }
}
