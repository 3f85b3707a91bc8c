// Copyright 2025 the Tickwork Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for `tickwork_demo`.

use kurbo::Size;
use peniko::Color;
use tickwork_axis::{Axis, AxisConfig, AxisOutput, ContainerState, LabelAttributes};

/// Gap between a tick and its label.
const LABEL_PADDING: f64 = 3.0;

/// Renders a chart frame with every drawn axis in `axes`.
pub(crate) fn chart_svg(container: &ContainerState, axes: &[&Axis]) -> String {
    let Size { width, height } = container.size;
    let plot = container.plot_size();
    let mut out = String::new();

    out.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif" font-size="10">"#
    ));
    out.push('\n');
    out.push_str(&format!(
        r#"<g transform="translate({}, {})">"#,
        container.margin.x0, container.margin.y0
    ));
    out.push('\n');
    out.push_str(&format!(
        r##"<rect width="{}" height="{}" fill="#f7f7f7"/>"##,
        plot.width, plot.height
    ));
    out.push('\n');
    for axis in axes {
        match axis.output() {
            Some(output) => write_axis(&mut out, axis.config(), output, plot),
            None => log::warn!("skipping an axis that was never drawn"),
        }
    }
    out.push_str("</g>\n</svg>\n");
    out
}

fn write_axis(out: &mut String, config: &AxisConfig, axis: &AxisOutput, plot: Size) {
    if !axis.visible {
        return;
    }
    let vertical = config.is_vertical();
    let k = if config.effective_side().is_leading() {
        -1.0
    } else {
        1.0
    };
    let stroke = axis.line_color.map_or_else(|| "currentColor".to_string(), hex);
    let stroke_width = if axis.emphasized { 2 } else { 1 };

    out.push_str(&format!(
        r#"<g transform="{}" stroke-width="{stroke_width}">"#,
        axis.transform
    ));
    out.push('\n');

    let outer = k * axis.tick_size.outer;
    let d = if vertical {
        format!("M{outer},{}H0V0H{outer}", plot.height)
    } else {
        format!("M0,{outer}V0H{}V{outer}", plot.width)
    };
    out.push_str(&format!(r#"<path d="{d}" fill="none" stroke="{stroke}"/>"#));
    out.push('\n');

    let tick_stroke = axis.grid.color.map_or_else(|| stroke.clone(), hex);
    let dash = axis
        .grid
        .dash
        .map(|d| format!(r#" stroke-dasharray="{d}""#))
        .unwrap_or_default();
    let start = axis.grid.cross_offset.unwrap_or(0.0);
    let end = k * axis.tick_size.inner;
    let spacing = k * (axis.tick_size.inner.max(0.0) + LABEL_PADDING);
    let label_transform = axis
        .tick_label_transform()
        .map(|t| format!(r#" transform="{t}""#))
        .unwrap_or_default();
    let style = tick_style(axis);

    for tick in &axis.ticks {
        let (translate, line, text) = if vertical {
            (
                format!("translate(0, {})", tick.pixel),
                format!(r#"x1="{start}" x2="{end}""#),
                format!(
                    r#"x="{spacing}" dy="0.32em" text-anchor="{}""#,
                    if k < 0.0 { "end" } else { "start" }
                ),
            )
        } else {
            (
                format!("translate({}, 0)", tick.pixel),
                format!(r#"y1="{start}" y2="{end}""#),
                format!(
                    r#"y="{spacing}" dy="{}" text-anchor="middle""#,
                    if k < 0.0 { "0em" } else { "0.71em" }
                ),
            )
        };
        out.push_str(&format!(
            r#"<g class="tick" transform="{translate}"><line {line} stroke="{tick_stroke}"{dash}/><text {text}{label_transform}{style}>{}</text></g>"#,
            escape_xml(&tick.label)
        ));
        out.push('\n');
    }

    write_title(out, &axis.label);
    out.push_str("</g>\n");
}

fn write_title(out: &mut String, label: &LabelAttributes) {
    if label.text.is_empty() {
        return;
    }
    out.push_str(&format!(
        r#"<text class="label" x="{}" y="{}" dx="{}" dy="{}" text-anchor="{}""#,
        label.x,
        label.y,
        label.dx,
        label.dy,
        label.anchor.as_str()
    ));
    if let Some(transform) = label.transform() {
        out.push_str(&format!(r#" transform="{transform}""#));
    }
    if let Some(color) = label.color {
        out.push_str(&format!(r#" fill="{}""#, hex(color)));
    }
    out.push('>');
    out.push_str(&escape_xml(&label.text));
    out.push_str("</text>\n");
}

fn tick_style(axis: &AxisOutput) -> String {
    if axis.tick_style.is_empty() {
        return String::new();
    }
    let body: Vec<String> = axis
        .tick_style
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect();
    format!(r#" style="{}""#, escape_xml(&body.join("; ")))
}

fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
