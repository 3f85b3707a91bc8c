// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

extern crate std;

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::Cell;
use core::future::Future;
use core::time::Duration;

use kurbo::{Insets, Size};
use pollster::block_on;

use crate::{
    Axis, AxisChange, AxisConfig, BindError, BindOutcome, ContainerState, Domain, DomainSync,
    GridLines, ImmediateFactory, LabelLocation, Length, OffsetSpec, OffsetStart, Orientation,
    RedrawPlan, ScaleDescriptor, ScaleEvent, ScaleFactory, ScaleHandle, ScaleKind, Side, Value,
};

/// A 500x400 chart with 50px margins: a 400x300 plot.
fn container() -> ContainerState {
    ContainerState::new(Size::new(500.0, 400.0), Insets::uniform(50.0))
        .with_animation_duration(Duration::from_millis(250))
}

fn bound(config: AxisConfig, descriptor: ScaleDescriptor) -> (Axis, ScaleHandle) {
    let mut axis = Axis::new(config, container());
    let handle = ScaleHandle::from_descriptor(&descriptor);
    axis.set_scale(handle.clone());
    (axis, handle)
}

fn labels(axis: &Axis) -> Vec<String> {
    axis.output()
        .unwrap()
        .labels()
        .map(ToString::to_string)
        .collect()
}

fn pixels(axis: &Axis) -> Vec<f64> {
    axis.output().unwrap().ticks.iter().map(|t| t.pixel).collect()
}

/// Counts builds and builds synchronously.
#[derive(Default)]
struct Counting {
    builds: Cell<usize>,
}

impl ScaleFactory for Counting {
    fn build(
        &self,
        descriptor: &ScaleDescriptor,
    ) -> impl Future<Output = Result<ScaleHandle, BindError>> {
        self.builds.set(self.builds.get() + 1);
        core::future::ready(Ok(ScaleHandle::from_descriptor(descriptor)))
    }
}

struct Rejecting;

impl ScaleFactory for Rejecting {
    fn build(
        &self,
        _descriptor: &ScaleDescriptor,
    ) -> impl Future<Output = Result<ScaleHandle, BindError>> {
        core::future::ready(Err(BindError::Rejected("unsupported".into())))
    }
}

/// Pads the domain so that it always spans one unit per ten pixels.
struct PixelDomain;

impl DomainSync for PixelDomain {
    fn refresh_domain(&self, scale: &ScaleHandle, length: f64) {
        scale.set_domain(Domain::Continuous(0.0, length / 10.0));
    }
}

#[test]
fn unbound_axis_cannot_render() {
    let mut axis = Axis::new(AxisConfig::horizontal(), container());
    assert_eq!(axis.render().unwrap_err(), BindError::NoScaleBound);
    assert!(axis.output().is_none());

    assert_eq!(axis.apply(AxisChange::TickRotate(30.0)), RedrawPlan::EMPTY);
    assert_eq!(axis.config().tick_rotate, 30.0);
}

#[test]
fn first_bind_draws_everything() {
    let mut axis = Axis::new(
        AxisConfig::horizontal()
            .with_tick_values([0.0, 20.0, 40.0, 60.0, 80.0, 100.0])
            .with_label("Speed"),
        container(),
    );
    let outcome = block_on(axis.bind_scale(&ImmediateFactory, ScaleDescriptor::linear(0.0, 100.0)));
    assert_eq!(outcome, Ok(BindOutcome::Applied));

    assert_eq!(labels(&axis), ["0", "20", "40", "60", "80", "100"]);
    assert_eq!(pixels(&axis), [0.0, 80.0, 160.0, 240.0, 320.0, 400.0]);

    let out = axis.output().unwrap();
    assert!(out.visible);
    assert_eq!(out.transform.to_string(), "translate(0, 300)");
    assert!(out.grid.short);
    assert!(!out.transition.is_animated());
    assert_eq!(out.label.text, "Speed");
    assert_eq!(out.label.x, 200.0);
    assert_eq!(out.label.y, Length::em(2.0));
    assert_eq!(out.label.anchor, LabelLocation::Middle);
}

#[test]
fn vertical_axes_run_bottom_up() {
    let (axis, _) = bound(
        AxisConfig::vertical().with_tick_values([0.0, 5.0, 10.0]),
        ScaleDescriptor::linear(0.0, 10.0),
    );
    assert_eq!(pixels(&axis), [300.0, 150.0, 0.0]);
    let out = axis.output().unwrap();
    assert_eq!(out.transform.to_string(), "translate(0, 0)");
    assert_eq!(out.label.rotation, Some(-90.0));
    assert_eq!(out.label.y, Length::ex(-4.0));
}

#[test]
fn rendering_twice_is_idempotent() {
    let (mut axis, _) = bound(
        AxisConfig::horizontal().with_grid_lines(GridLines::Dashed),
        ScaleDescriptor::linear(-3.0, 7.0),
    );
    let first = axis.render().unwrap().clone();
    let second = axis.render().unwrap().clone();
    assert_eq!(first, second);
}

#[test]
fn out_of_order_binds_keep_the_newest() {
    let factory = Counting::default();
    let mut axis = Axis::new(AxisConfig::horizontal(), container());
    let (older, older_fut) = axis.begin_bind(&factory, ScaleDescriptor::linear(0.0, 1.0));
    let (newer, newer_fut) = axis.begin_bind(&factory, ScaleDescriptor::log(1.0, 1000.0));

    // The newer request resolves first.
    assert_eq!(axis.commit_bind(newer, block_on(newer_fut)), Ok(BindOutcome::Applied));
    assert_eq!(
        axis.commit_bind(older, block_on(older_fut)),
        Ok(BindOutcome::Superseded)
    );
    assert_eq!(factory.builds.get(), 2);
    assert_eq!(axis.binding().primary().map(ScaleHandle::kind), Some(ScaleKind::Log));
}

#[test]
fn stale_binds_never_clobber_newer_ones() {
    let mut axis = Axis::new(AxisConfig::horizontal(), container());
    let (older, older_fut) = axis.begin_bind(&ImmediateFactory, ScaleDescriptor::linear(0.0, 1.0));
    let (newer, newer_fut) = axis.begin_bind(&ImmediateFactory, ScaleDescriptor::log(1.0, 1000.0));

    assert_eq!(
        axis.commit_bind(older, block_on(older_fut)),
        Ok(BindOutcome::Superseded)
    );
    assert!(axis.output().is_none());
    assert_eq!(axis.commit_bind(newer, block_on(newer_fut)), Ok(BindOutcome::Applied));
    assert_eq!(axis.binding().primary().map(ScaleHandle::kind), Some(ScaleKind::Log));

    // A stale failure is dropped too.
    let (stale, stale_fut) = axis.begin_bind(&Rejecting, ScaleDescriptor::linear(0.0, 1.0));
    axis.set_scale(ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 2.0)));
    assert_eq!(
        axis.commit_bind(stale, block_on(stale_fut)),
        Ok(BindOutcome::Superseded)
    );
}

#[test]
fn failed_bind_keeps_previous_output() {
    let (mut axis, handle) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 10.0));
    let before = axis.output().unwrap().clone();

    let result = block_on(axis.bind_scale(&Rejecting, ScaleDescriptor::log(1.0, 10.0)));
    assert_eq!(result, Err(BindError::Rejected("unsupported".into())));
    assert!(axis.binding().primary().unwrap().ptr_eq(&handle));
    assert_eq!(axis.output().unwrap(), &before);
}

#[test]
fn rebinding_and_dropping_release_subscriptions() {
    let (mut axis, old) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 10.0));
    assert_eq!(old.listener_count(), 1);

    let new = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 20.0));
    axis.set_scale(new.clone());
    assert_eq!(old.listener_count(), 0);
    assert_eq!(new.listener_count(), 1);

    old.set_domain(Domain::Continuous(5.0, 6.0));
    assert_eq!(axis.process_events(), 0);

    drop(axis);
    assert_eq!(new.listener_count(), 0);
}

#[test]
fn domain_changes_animate() {
    let (mut axis, handle) = bound(
        AxisConfig::horizontal().with_num_ticks(3),
        ScaleDescriptor::linear(0.0, 10.0),
    );
    assert_eq!(labels(&axis), ["0", "5", "10"]);

    handle.set_domain(Domain::Continuous(0.0, 100.0));
    assert_eq!(axis.process_events(), 1);
    let out = axis.output().unwrap();
    assert!(out.transition.is_animated());
    assert_eq!(out.transition.duration, Duration::from_millis(250));
    assert_eq!(labels(&axis), ["0", "50", "100"]);

    axis.apply(AxisChange::TickRotate(45.0));
    assert!(!axis.output().unwrap().transition.is_animated());
}

#[test]
fn highlight_events_toggle_emphasis() {
    let (mut axis, handle) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 1.0));
    handle.emit(ScaleEvent::HighlightAxis);
    assert_eq!(axis.process_events(), 1);
    assert!(axis.is_emphasized());
    assert!(axis.output().unwrap().emphasized);

    handle.emit(ScaleEvent::UnhighlightAxis);
    handle.emit(ScaleEvent::HighlightAxis);
    handle.emit(ScaleEvent::UnhighlightAxis);
    assert_eq!(axis.process_events(), 3);
    assert!(!axis.output().unwrap().emphasized);
}

#[test]
fn config_changes_run_only_their_steps() {
    let (mut axis, _) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 1.0));

    assert_eq!(axis.apply(AxisChange::TickRotate(45.0)), RedrawPlan::STYLING);
    assert_eq!(axis.apply(AxisChange::TickRotate(45.0)), RedrawPlan::EMPTY);
    assert_eq!(
        axis.output().unwrap().tick_label_transform().as_deref(),
        Some("rotate(45)")
    );

    let plan = axis.apply(AxisChange::NumTicks(Some(4)));
    assert!(plan.contains(RedrawPlan::TICKS | RedrawPlan::LABELS));
    assert!(!plan.contains(RedrawPlan::TRANSFORM));

    assert_eq!(
        axis.apply(AxisChange::Color(Some(peniko::color::palette::css::RED))),
        RedrawPlan::LINE_COLOR
    );
    assert_eq!(axis.apply(AxisChange::Visible(false)), RedrawPlan::VISIBILITY);
    assert!(!axis.output().unwrap().visible);
    assert_eq!(axis.apply(AxisChange::Label("Load".into())), RedrawPlan::AXIS_LABEL);
    assert_eq!(axis.output().unwrap().label.text, "Load");
    assert_eq!(axis.apply(AxisChange::Side(Side::Top)), RedrawPlan::FULL);
    assert_eq!(axis.output().unwrap().transform.to_string(), "translate(0, 0)");
}

#[test]
fn plan_table() {
    assert_eq!(AxisChange::GridLines(GridLines::Solid).plan(), RedrawPlan::GRID);
    assert_eq!(AxisChange::TickFormat(None).plan(), RedrawPlan::LABELS | RedrawPlan::STYLING);
    assert_eq!(AxisChange::TimeZone(crate::format::utc()).plan(), RedrawPlan::LABELS);
    assert_eq!(
        AxisChange::LabelLocation(LabelLocation::End).plan(),
        RedrawPlan::AXIS_LABEL
    );
    assert!(!RedrawPlan::FULL.contains(RedrawPlan::ANIMATED));
    assert!(RedrawPlan::DOMAIN_CHANGED.contains(RedrawPlan::ANIMATED));
    assert!(RedrawPlan::DOMAIN_CHANGED.contains(RedrawPlan::RANGES | RedrawPlan::TRANSFORM));
    assert!(RedrawPlan::EMPTY.is_empty());
    assert_eq!(
        alloc::format!("{:?}", RedrawPlan::GRID | RedrawPlan::LABELS),
        "{LABELS, GRID}"
    );
}

#[test]
fn one_label_per_tick_and_too_few_ticks() {
    let (mut axis, _) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 1.0));
    let out = axis.output().unwrap();
    assert!(!out.ticks.is_empty());
    assert_eq!(out.labels().count(), out.ticks.len());

    axis.apply(AxisChange::NumTicks(Some(1)));
    assert!(axis.output().unwrap().ticks.is_empty());
}

#[test]
fn large_values_switch_to_exponent() {
    let (axis, _) = bound(
        AxisConfig::horizontal().with_tick_values([0.0, 1_000_000.0]),
        ScaleDescriptor::linear(0.0, 1_000_000.0),
    );
    assert_eq!(labels(&axis), ["0", "1e+6"]);
}

#[test]
fn wide_log_domains_keep_decades() {
    let (axis, _) = bound(AxisConfig::horizontal(), ScaleDescriptor::log(1.0, 1e7));
    let values: Vec<f64> = axis
        .output()
        .unwrap()
        .ticks
        .iter()
        .filter_map(|t| t.value.as_number())
        .collect();
    assert_eq!(values, [1.0, 10.0, 100.0, 1e3, 1e4, 1e5, 1e6, 1e7]);
    assert_eq!(labels(&axis).len(), values.len());
}

#[test]
fn date_labels_follow_tick_spacing() {
    let (axis, _) = bound(
        AxisConfig::horizontal().with_tick_values([
            Value::Date(0),
            Value::Date(500),
            Value::Date(1000),
        ]),
        ScaleDescriptor::date(0, 1000),
    );
    let labels = labels(&axis);
    assert_eq!(labels[1], ".500");
    assert_eq!(labels[2], ":01");
}

#[test]
fn ordinal_ticks_sit_mid_band() {
    let (axis, _) = bound(
        AxisConfig::horizontal(),
        ScaleDescriptor::ordinal(["a", "b", "c", "d"]).with_padding(0.0),
    );
    assert_eq!(labels(&axis), ["a", "b", "c", "d"]);
    assert_eq!(pixels(&axis), [50.0, 150.0, 250.0, 350.0]);
}

#[test]
fn dedicated_offset_crosses_at_value() {
    let (mut axis, _) = bound(
        AxisConfig::vertical().with_grid_lines(GridLines::Solid),
        ScaleDescriptor::linear(0.0, 1.0),
    );
    let spec = OffsetSpec::on(0.0, ScaleDescriptor::linear(-1.0, 1.0));
    assert_eq!(
        block_on(axis.set_offset(&ImmediateFactory, spec.clone())),
        Ok(BindOutcome::Applied)
    );
    assert_eq!(axis.config().offset, spec);

    let out = axis.output().unwrap();
    assert_eq!(out.transform.to_string(), "translate(200, 0)");
    assert_eq!(out.tick_size.inner, -200.0);
    assert_eq!(out.grid.cross_offset, Some(-200.0));

    // Clamped: a value past the domain pins the axis to the plot edge.
    let (ticket, fut) = match axis
        .begin_set_offset(
            &ImmediateFactory,
            OffsetSpec::on(9.0, ScaleDescriptor::linear(-1.0, 1.0)),
        )
        .unwrap()
    {
        OffsetStart::Pending(request, fut) => (request, fut),
        OffsetStart::Done => panic!("dedicated offsets build a scale"),
    };
    axis.commit_offset(ticket, block_on(fut)).unwrap();
    assert_eq!(axis.output().unwrap().transform.x, 400.0);
}

#[test]
fn offset_domain_changes_move_the_axis() {
    let (mut axis, _) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 1.0));
    let spec = OffsetSpec::on(5.0, ScaleDescriptor::linear(0.0, 10.0));
    block_on(axis.set_offset(&ImmediateFactory, spec)).unwrap();
    assert_eq!(axis.output().unwrap().transform.y, 150.0);

    let offset = axis.binding().offset().unwrap().handle().clone();
    offset.set_domain(Domain::Continuous(0.0, 20.0));
    assert_eq!(axis.process_events(), 1);
    let out = axis.output().unwrap();
    assert_eq!(out.transform.y, 225.0);
    assert!(!out.transition.is_animated());
}

#[test]
fn ordinal_offset_miss_falls_back_to_baseline() {
    let (mut axis, _) = bound(AxisConfig::vertical(), ScaleDescriptor::linear(0.0, 1.0));
    let categories = ScaleDescriptor::ordinal(["a", "b"]).with_padding(0.0);

    block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::on("zz", categories.clone())))
        .unwrap();
    assert_eq!(axis.output().unwrap().transform.x, 0.0);

    block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::on("b", categories))).unwrap();
    assert_eq!(axis.output().unwrap().transform.x, 300.0);
}

#[test]
fn shared_offset_needs_a_container_scale() {
    let (mut axis, _) = bound(AxisConfig::vertical(), ScaleDescriptor::linear(0.0, 1.0));
    let result = block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::at(0.0)));
    assert_eq!(result, Err(BindError::MissingContainerScale));
    assert_eq!(axis.config().offset, OffsetSpec::default());

    let shared = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(-1.0, 1.0));
    axis.set_container(container().with_scales(Some(shared.clone()), None));
    block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::at(0.5))).unwrap();
    assert_eq!(axis.output().unwrap().transform.x, 300.0);
    assert_eq!(shared.listener_count(), 0);

    // A resized container moves the axis with the shared scale.
    let wider = ContainerState::new(Size::new(900.0, 400.0), Insets::uniform(50.0))
        .with_scales(Some(shared), None);
    axis.set_container(wider);
    assert_eq!(axis.output().unwrap().transform.x, 600.0);
}

#[test]
fn clearing_the_offset_returns_to_baseline() {
    let (mut axis, _) = bound(
        AxisConfig::horizontal().with_side(Side::Bottom),
        ScaleDescriptor::linear(0.0, 1.0),
    );
    let spec = OffsetSpec::on(5.0, ScaleDescriptor::linear(0.0, 10.0));
    block_on(axis.set_offset(&ImmediateFactory, spec)).unwrap();
    block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::default())).unwrap();
    assert!(axis.binding().offset().is_none());
    assert_eq!(axis.output().unwrap().transform.y, 300.0);
}

#[test]
fn domain_sync_settles() {
    let mut axis = Axis::new(AxisConfig::horizontal().with_num_ticks(5), container())
        .with_domain_sync(Rc::new(PixelDomain));
    let handle = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 1.0));
    axis.set_scale(handle.clone());

    assert_eq!(handle.with(|s| s.domain().clone()), Domain::Continuous(0.0, 40.0));
    assert_eq!(axis.process_events(), 1);
    assert_eq!(axis.process_events(), 0);
    assert_eq!(labels(&axis), ["0", "10", "20", "30", "40"]);
}

#[test]
fn domain_redraw_matches_a_full_render() {
    let shared = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(-1.0, 1.0));
    let mut axis = Axis::new(
        AxisConfig::vertical(),
        container().with_scales(Some(shared.clone()), None),
    );
    let handle = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 1.0));
    axis.set_scale(handle.clone());
    block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::at(0.0))).unwrap();
    assert_eq!(axis.output().unwrap().transform.to_string(), "translate(200, 0)");

    // The shared scale is not observed; the next domain redraw still picks it up.
    shared.set_domain(Domain::Continuous(0.0, 2.0));
    handle.set_domain(Domain::Continuous(0.0, 5.0));
    assert_eq!(axis.process_events(), 1);
    let incremental = axis.output().unwrap().clone();
    assert_eq!(incremental.transform.to_string(), "translate(0, 0)");

    let full = axis.render().unwrap().clone();
    assert_eq!(incremental.ticks, full.ticks);
    assert_eq!(incremental.transform, full.transform);
    assert_eq!(incremental.grid, full.grid);
    assert_eq!(incremental.tick_size, full.tick_size);
    assert_eq!(incremental.label, full.label);
}

#[test]
fn turning_the_axis_moves_its_shared_offset() {
    let sx = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(-1.0, 1.0));
    let sy = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(-1.0, 1.0));
    let mut axis = Axis::new(
        AxisConfig::vertical(),
        container().with_scales(Some(sx.clone()), Some(sy.clone())),
    );
    axis.set_scale(ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 10.0)));
    block_on(axis.set_offset(&ImmediateFactory, OffsetSpec::at(0.0))).unwrap();
    assert!(axis.binding().offset().unwrap().handle().ptr_eq(&sx));
    assert_eq!(sx.with(|s| s.range()), (0.0, 400.0));

    assert_eq!(axis.apply(AxisChange::Orientation(Orientation::Horizontal)), RedrawPlan::FULL);
    assert!(axis.binding().offset().unwrap().handle().ptr_eq(&sy));
    assert_eq!(sx.with(|s| s.range()), (0.0, 400.0));
    assert_eq!(sy.with(|s| s.range()), (300.0, 0.0));
    assert_eq!(axis.output().unwrap().transform.to_string(), "translate(0, 150)");

    // Without a perpendicular scale the axis falls back to its baseline.
    let mut lonely = Axis::new(
        AxisConfig::vertical(),
        container().with_scales(Some(sx.clone()), None),
    );
    lonely.set_scale(ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 10.0)));
    block_on(lonely.set_offset(&ImmediateFactory, OffsetSpec::at(0.0))).unwrap();
    lonely.apply(AxisChange::Orientation(Orientation::Horizontal));
    assert!(lonely.binding().offset().is_none());
    assert_eq!(sx.with(|s| s.range()), (0.0, 400.0));
    assert_eq!(lonely.output().unwrap().transform.to_string(), "translate(0, 300)");
}

#[test]
fn rebinding_discards_queued_notifications() {
    let (mut axis, old) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 1.0));
    old.emit(ScaleEvent::HighlightAxis);
    old.set_domain(Domain::Continuous(0.0, 3.0));

    axis.set_scale(ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 2.0)));
    assert_eq!(axis.process_events(), 0);
    assert!(!axis.is_emphasized());
    assert!(!axis.output().unwrap().emphasized);
    assert!(!axis.output().unwrap().transition.is_animated());
}

#[test]
fn domain_redraws_are_idempotent() {
    let (mut axis, handle) = bound(
        AxisConfig::vertical().with_grid_lines(GridLines::Solid),
        ScaleDescriptor::linear(0.0, 1.0),
    );
    handle.set_domain(Domain::Continuous(-4.0, 12.0));
    assert_eq!(axis.process_events(), 1);
    let first = axis.output().unwrap().clone();

    handle.emit(ScaleEvent::DomainChanged);
    assert_eq!(axis.process_events(), 1);
    assert_eq!(axis.output().unwrap(), &first);
}

#[test]
fn offset_redraws_are_idempotent() {
    let (mut axis, _) = bound(
        AxisConfig::horizontal().with_grid_lines(GridLines::Dashed),
        ScaleDescriptor::linear(0.0, 1.0),
    );
    let spec = OffsetSpec::on(2.5, ScaleDescriptor::linear(0.0, 10.0));
    block_on(axis.set_offset(&ImmediateFactory, spec.clone())).unwrap();
    let first = axis.output().unwrap().clone();

    block_on(axis.set_offset(&ImmediateFactory, spec)).unwrap();
    assert_eq!(axis.output().unwrap(), &first);

    let offset = axis.binding().offset().unwrap().handle().clone();
    offset.emit(ScaleEvent::DomainChanged);
    offset.emit(ScaleEvent::DomainChanged);
    assert_eq!(axis.process_events(), 2);
    assert_eq!(axis.output().unwrap(), &first);
}

#[test]
fn config_redraws_are_idempotent() {
    let (mut axis, _) = bound(AxisConfig::horizontal(), ScaleDescriptor::linear(0.0, 100.0));
    let changes = [
        (AxisChange::TickFormat(Some(".2f".to_string())), AxisChange::TickFormat(None)),
        (AxisChange::NumTicks(Some(3)), AxisChange::NumTicks(None)),
        (AxisChange::Label("Load".to_string()), AxisChange::Label(String::new())),
    ];
    for (change, undo) in changes {
        assert!(!axis.apply(change.clone()).is_empty());
        let first = axis.output().unwrap().clone();

        axis.apply(undo);
        axis.apply(change);
        assert_eq!(axis.output().unwrap(), &first);
    }
    assert_eq!(labels(&axis), ["0.00", "50.00", "100.00"]);
}

#[test]
fn offset_set_before_binding_waits_for_the_first_render() {
    let mut axis = Axis::new(AxisConfig::vertical(), container());
    let spec = OffsetSpec::on(0.0, ScaleDescriptor::linear(-1.0, 1.0));
    assert_eq!(
        block_on(axis.set_offset(&ImmediateFactory, spec)),
        Ok(BindOutcome::Applied)
    );
    assert!(axis.output().is_none());

    axis.set_scale(ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 1.0)));
    assert_eq!(axis.output().unwrap().transform.to_string(), "translate(200, 0)");
}
