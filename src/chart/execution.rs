//! Test case execution pie chart
//!
//! Slices start at 12 o'clock and run counter-clockwise. Each slice is pulled
//! out slightly from the centre; the legend on the right lists all five
//! execution categories including empty ones.

use super::{execution_legend, execution_slices, rgb, ChartKind, RenderOptions, Slice};
use crate::analytics::AnalyticsSummary;
use anyhow::{Context, Result};
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const START_ANGLE: f64 = 90.0;
const EXPLODE: f64 = 0.05;
const EXTENT: f64 = 1.5;
const LEGEND_SWATCH: u32 = 18;

/// Where a legend row's text starts, given the row's swatch corner.
pub(crate) fn legend_text_anchor(options: &RenderOptions, (x, y): (i32, i32)) -> (i32, i32) {
    let offset = options.px(LEGEND_SWATCH) + options.px(10);
    (x + offset as i32, y + options.px(1) as i32)
}

/// Polygon outline of a slice: the (offset) centre, then the arc.
pub(crate) fn wedge_points(center: (f64, f64), start_deg: f64, sweep_deg: f64) -> Vec<(f64, f64)> {
    let steps = sweep_deg.abs().ceil().max(1.0) as usize;
    std::iter::once(center)
        .chain((0..=steps).map(|i| {
            let angle = (start_deg + sweep_deg * i as f64 / steps as f64).to_radians();
            (center.0 + angle.cos(), center.1 + angle.sin())
        }))
        .collect()
}

/// Axis half-extents that keep a unit circle round in a `width`×`height` area.
pub(crate) fn square_extent(width: u32, height: u32) -> (f64, f64) {
    let (w, h) = (f64::from(width.max(1)), f64::from(height.max(1)));
    if w >= h {
        (EXTENT * w / h, EXTENT)
    } else {
        (EXTENT, EXTENT * h / w)
    }
}

pub fn draw(path: &Path, summary: &AnalyticsSummary, options: &RenderOptions) -> Result<()> {
    let (width, height) = options.size(1000, 800);
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let area = root.titled(
        ChartKind::Execution.title(),
        options.font(28.0).style(FontStyle::Bold),
    )?;
    let (pie_area, legend_area) = area.split_horizontally(width * 3 / 5);

    let margin = options.px(20);
    let (pie_w, pie_h) = pie_area.dim_in_pixel();
    let (x_ext, y_ext) = square_extent(
        pie_w.saturating_sub(2 * margin),
        pie_h.saturating_sub(2 * margin),
    );
    let mut chart = ChartBuilder::on(&pie_area)
        .margin(margin)
        .build_cartesian_2d(-x_ext..x_ext, -y_ext..y_ext)?;

    let slices = execution_slices(summary, &options.palette);
    let outcome_total: f64 = slices.iter().map(|s| s.value).sum();

    if outcome_total <= 0.0 {
        chart.draw_series(std::iter::once(Text::new(
            "No test case outcomes recorded",
            (0.0, 0.0),
            options
                .font(18.0)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;
    } else {
        draw_slices(&mut chart, &slices, outcome_total, options)?;
    }

    let legend = execution_legend(summary, &options.palette);
    let (_, legend_h) = legend_area.dim_in_pixel();
    let row = options.px(34) as i32;
    let swatch = options.px(LEGEND_SWATCH) as i32;
    let x = options.px(20) as i32;
    let mut y = legend_h as i32 / 2 - row * legend.len() as i32 / 2;
    let label_style = options.font(15.0).color(&BLACK);

    for entry in &legend {
        legend_area.draw(&Rectangle::new(
            [(x, y), (x + swatch, y + swatch)],
            rgb(entry.color).filled(),
        ))?;
        legend_area.draw(&Rectangle::new(
            [(x, y), (x + swatch, y + swatch)],
            BLACK.stroke_width(1),
        ))?;
        legend_area.draw_text(&entry.label, &label_style, legend_text_anchor(options, (x, y)))?;
        y += row;
    }

    legend_area.draw_text(
        &format!("Overall pass rate: {:.1}%", summary.pass_rate()),
        &options.font(16.0).style(FontStyle::Bold).color(&BLACK),
        (x, y + row / 2),
    )?;

    root.present()
        .context("failed to save execution pie chart")?;

    Ok(())
}

fn draw_slices<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    slices: &[Slice],
    outcome_total: f64,
    options: &RenderOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    let mut start = START_ANGLE;
    for slice in slices {
        let share = slice.value / outcome_total;
        let sweep = share * 360.0;
        let mid = (start + sweep / 2.0).to_radians();
        let center = (EXPLODE * mid.cos(), EXPLODE * mid.sin());

        chart.draw_series(std::iter::once(Polygon::new(
            wedge_points(center, start, sweep),
            rgb(slice.color).filled(),
        )))?;

        // Percentage of the pie inside the slice
        chart.draw_series(std::iter::once(Text::new(
            format!("{:.1}%", share * 100.0),
            (center.0 + 0.6 * mid.cos(), center.1 + 0.6 * mid.sin()),
            options
                .font(16.0)
                .style(FontStyle::Bold)
                .color(&BLACK)
                .pos(Pos::new(HPos::Center, VPos::Center)),
        )))?;

        let h_pos = if mid.cos() >= 0.0 { HPos::Left } else { HPos::Right };
        chart.draw_series(std::iter::once(Text::new(
            slice.label.clone(),
            (center.0 + 1.1 * mid.cos(), center.1 + 1.1 * mid.sin()),
            options
                .font(15.0)
                .style(FontStyle::Bold)
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Center)),
        )))?;

        start += sweep;
    }

    Ok(())
}
