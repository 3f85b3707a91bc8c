// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis demos for `tickwork_axis`, written as an HTML page of SVG charts.

mod svg;

use std::time::Duration;

use kurbo::{Insets, Size};
use peniko::color::palette::css;
use pollster::block_on;
use tickwork_axis::{
    Axis, AxisChange, AxisConfig, ContainerState, Domain, GridLines, ImmediateFactory,
    LabelLocation, Length, OffsetSpec, ScaleDescriptor, ScaleHandle, Side,
};

/// 2024-01-01T00:00:00Z.
const JAN_2024: i64 = 1_704_067_200_000;
const DAY: i64 = 86_400_000;

fn main() {
    simple_logger::init_with_level(log::Level::Debug).expect("install logger");

    let sections = vec![
        linear_demo(),
        log_and_time_demo(),
        offset_demo(),
        update_demo(),
    ];

    let mut html = String::from(
        "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\"><title>Tickwork axes</title></head><body>\n",
    );
    for (title, svg) in &sections {
        html.push_str(&format!("<h2>{title}</h2>\n{svg}"));
    }
    html.push_str("</body></html>\n");

    std::fs::write("tickwork_demo.html", html).expect("write tickwork_demo.html");
    println!("wrote tickwork_demo.html");
}

fn container() -> ContainerState {
    ContainerState::new(Size::new(640.0, 360.0), Insets::new(70.0, 40.0, 40.0, 50.0))
        .with_animation_duration(Duration::from_millis(300))
}

fn bind(config: AxisConfig, container: &ContainerState, descriptor: ScaleDescriptor) -> Axis {
    let mut axis = Axis::new(config, container.clone());
    block_on(axis.bind_scale(&ImmediateFactory, descriptor)).expect("bind scale");
    axis
}

fn linear_demo() -> (&'static str, String) {
    let container = container();
    let x = bind(
        AxisConfig::horizontal()
            .with_grid_lines(GridLines::Solid)
            .with_grid_color(css::DARK_GRAY)
            .with_label("Units shipped"),
        &container,
        ScaleDescriptor::linear(0.0, 2_500_000.0),
    );
    let y = bind(
        AxisConfig::vertical()
            .with_grid_lines(GridLines::Dashed)
            .with_tick_format("+.1f")
            .with_label("Change (%)")
            .with_label_location(LabelLocation::End),
        &container,
        ScaleDescriptor::linear(-20.0, 80.0),
    );
    ("Linear axes with grid lines", svg::chart_svg(&container, &[&x, &y]))
}

fn log_and_time_demo() -> (&'static str, String) {
    let container = container();
    let x = bind(
        AxisConfig::horizontal().with_label("Date"),
        &container,
        ScaleDescriptor::date(JAN_2024, JAN_2024 + 40 * DAY),
    );
    let y = bind(
        AxisConfig::vertical()
            .with_label("Requests")
            .with_label_offset(Length::ex(5.0)),
        &container,
        ScaleDescriptor::log(1.0, 1e7),
    );
    let top = bind(
        AxisConfig::horizontal()
            .with_side(Side::Top)
            .with_num_ticks(5)
            .with_tick_format("%b %d")
            .with_color(css::STEEL_BLUE),
        &container,
        ScaleDescriptor::date(JAN_2024, JAN_2024 + 40 * DAY),
    );
    (
        "Log and time axes",
        svg::chart_svg(&container, &[&x, &y, &top]),
    )
}

fn offset_demo() -> (&'static str, String) {
    let x_scale = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(-1.0, 1.0));
    let y_scale = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(-5.0, 5.0));
    let container = container().with_scales(Some(x_scale.clone()), Some(y_scale.clone()));

    // Crosses the container's y scale at zero.
    let mut x = Axis::new(
        AxisConfig::horizontal().with_grid_lines(GridLines::Solid),
        container.clone(),
    );
    x.set_scale(x_scale);
    block_on(x.set_offset(&ImmediateFactory, OffsetSpec::at(0.0))).expect("shared offset");

    let mut y = Axis::new(AxisConfig::vertical(), container.clone());
    y.set_scale(y_scale);
    block_on(y.set_offset(&ImmediateFactory, OffsetSpec::at(0.0))).expect("shared offset");

    // Sits in the middle of the "b" band of its own category scale.
    let mut categories = bind(
        AxisConfig::vertical()
            .with_side(Side::Right)
            .with_tick_values([0.0, 2.5, 5.0])
            .with_color(css::TOMATO)
            .with_label("Group b"),
        &container,
        ScaleDescriptor::linear(0.0, 5.0),
    );
    let spec = OffsetSpec::on("b", ScaleDescriptor::ordinal(["a", "b", "c"]));
    block_on(categories.set_offset(&ImmediateFactory, spec)).expect("dedicated offset");

    (
        "Axes crossing other scales",
        svg::chart_svg(&container, &[&x, &y, &categories]),
    )
}

fn update_demo() -> (&'static str, String) {
    let container = container();
    let scale = ScaleHandle::from_descriptor(&ScaleDescriptor::linear(0.0, 1.0));
    let mut axis = Axis::new(AxisConfig::horizontal().with_label("Load"), container.clone());
    axis.set_scale(scale.clone());

    scale.set_domain(Domain::Continuous(0.0, 0.05));
    let handled = axis.process_events();
    let animated = axis
        .output()
        .is_some_and(|out| out.transition.is_animated());
    log::info!("{handled} scale notification(s) handled, animated: {animated}");

    for change in [
        AxisChange::TickRotate(-30.0),
        AxisChange::TickStyle([("font-weight".to_string(), "bold".to_string())].into()),
        AxisChange::TickFormat(Some(".0%".to_string())),
        AxisChange::Side(Side::Top),
        AxisChange::LabelColor(Some(css::MEDIUM_SEA_GREEN)),
    ] {
        let plan = axis.apply(change);
        log::info!("redrew {plan:?}");
    }
    ("Incremental updates", svg::chart_svg(&container, &[&axis]))
}
