//! Pass rate by module (horizontal bars)
//!
//! Modules are listed top-down in dataset order. Bars are grouped into one
//! series per tier so the legend doubles as the colour key, and a dashed red
//! line marks the overall pass rate.

use super::{category_label, class_legend, module_bars, rgb, ChartKind, RenderOptions};
use crate::analytics::{AnalyticsSummary, ColorClass};
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const BAR_HALF_HEIGHT: f64 = 0.35;
const DASH: u32 = 10;
const DASH_GAP: u32 = 6;

/// Dash and gap length of the overall-rate line, in pixels.
pub(crate) fn reference_dash(options: &RenderOptions) -> (u32, u32) {
    (options.px(DASH), options.px(DASH_GAP))
}

/// Where the value label of a bar goes: inside the bar end, or just past it
/// when the bar is too short to hold the text.
pub(crate) fn value_label_anchor(rate: f64) -> (f64, HPos) {
    if rate >= 12.0 {
        (rate - 1.5, HPos::Right)
    } else {
        (rate + 1.0, HPos::Left)
    }
}

pub(crate) fn value_label_is_light(rate: f64) -> bool {
    (12.0..60.0).contains(&rate)
}

pub fn draw(path: &Path, summary: &AnalyticsSummary, options: &RenderOptions) -> Result<()> {
    let bars = module_bars(summary, &options.palette);
    if bars.is_empty() {
        anyhow::bail!("No modules to plot");
    }

    let n = bars.len();
    // Category i is drawn at y = n - 1 - i so the first module is on top
    let row = |i: usize| (n - 1 - i) as f64;
    let names: Vec<String> = (0..n).rev().map(|i| bars[i].0.label.clone()).collect();
    let overall = summary.pass_rate();

    let (width, height) = options.size(1200, 800);
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let area = root.titled(
        ChartKind::Modules.title(),
        options.font(24.0).style(FontStyle::Bold),
    )?;

    let mut chart = ChartBuilder::on(&area)
        .caption(format!("Overall Pass Rate: {:.1}%", overall), options.font(18.0))
        .margin(options.px(20))
        .x_label_area_size(options.px(40))
        .y_label_area_size(options.px(190))
        .build_cartesian_2d(0.0..100.0, -0.5..(n as f64 - 0.5))?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(n)
        .x_desc("Pass Rate (%)")
        .y_desc("Module")
        .axis_desc_style(options.font(16.0).style(FontStyle::Bold))
        .label_style(options.font(14.0))
        .y_label_formatter(&|y| category_label(&names, *y))
        .x_label_formatter(&|x| format!("{:.0}", x))
        .draw()?;

    let swatch = options.swatch();
    let legend = class_legend(&options.palette);
    for (class, entry) in ColorClass::ALL.iter().zip(legend.iter()) {
        let color = rgb(entry.color);
        chart
            .draw_series(
                bars.iter()
                    .enumerate()
                    .filter(|(_, (_, c))| c == class)
                    .flat_map(|(i, (bar, _))| {
                        let y = row(i);
                        let top = (bar.value, y + BAR_HALF_HEIGHT);
                        let bottom = (0.0, y - BAR_HALF_HEIGHT);
                        [
                            Rectangle::new([bottom, top], rgb(bar.color).filled()),
                            Rectangle::new([bottom, top], BLACK.stroke_width(1)),
                        ]
                    }),
            )?
            .label(entry.label.clone())
            .legend(move |pos| Rectangle::new(swatch.corners(pos), color.filled()));
    }

    let line_color = rgb(options.palette.reference_line);
    let line_width = options.px(2);
    let (dash, gap) = reference_dash(options);
    chart
        .draw_series(DashedLineSeries::new(
            vec![(overall, -0.5), (overall, n as f64 - 0.5)],
            dash,
            gap,
            line_color.stroke_width(line_width),
        ))?
        .label(format!("Overall: {:.1}%", overall))
        .legend(move |pos| PathElement::new(swatch.stroke(pos), line_color.stroke_width(line_width)));

    chart.draw_series(bars.iter().enumerate().map(|(i, (bar, _))| {
        let (x, h_pos) = value_label_anchor(bar.value);
        let color = if value_label_is_light(bar.value) { &WHITE } else { &BLACK };
        Text::new(
            format!("{}%", bar.value),
            (x, row(i)),
            options
                .font(14.0)
                .style(FontStyle::Bold)
                .color(color)
                .pos(Pos::new(h_pos, VPos::Center)),
        )
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(options.font(14.0))
        .draw()?;

    root.present()
        .context("failed to save module coverage chart")?;

    Ok(())
}
