//! Defect distribution by severity (stacked bars)

use super::{category_label, defect_bars, rgb, ChartKind, RenderOptions};
use crate::analytics::AnalyticsSummary;
use anyhow::{Context, Result};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

const BAR_HALF_WIDTH: f64 = 0.3;
const HEADROOM: f64 = 3.0;

pub fn draw(path: &Path, summary: &AnalyticsSummary, options: &RenderOptions) -> Result<()> {
    let bars = defect_bars(summary, &options.palette);
    if bars.is_empty() {
        anyhow::bail!("No defect buckets to plot");
    }

    let names: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
    let y_max = f64::from(summary.defects.max_bucket_total()) + HEADROOM;
    let x_max = bars.len() as f64 - 0.5;

    let (width, height) = options.size(1000, 600);
    let root = BitMapBackend::new(path, (width, height)).into_drawing_area();
    root.fill(&WHITE)?;

    let area = root.titled(
        ChartKind::Defects.title(),
        options.font(24.0).style(FontStyle::Bold),
    )?;

    let mut chart = ChartBuilder::on(&area)
        .caption(
            format!(
                "Total: {} Defects ({} Fixed, {} Open)",
                summary.defects.recorded(),
                summary.defects.total_fixed,
                summary.defects.total_defects
            ),
            options.font(18.0),
        )
        .margin(options.px(20))
        .x_label_area_size(options.px(40))
        .y_label_area_size(options.px(50))
        .build_cartesian_2d(-0.5..x_max, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_desc("Severity")
        .y_desc("Number of defects")
        .axis_desc_style(options.font(16.0).style(FontStyle::Bold))
        .label_style(options.font(14.0))
        .x_label_formatter(&|x| category_label(&names, *x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .draw()?;

    let swatch = options.swatch();
    let layer_count = bars.iter().map(|b| b.layers.len()).max().unwrap_or(0);
    for layer in 0..layer_count {
        let Some(first) = bars.iter().find_map(|b| b.layers.get(layer)) else {
            continue;
        };
        let legend_color = rgb(first.color);

        chart
            .draw_series(bars.iter().enumerate().filter_map(|(i, bar)| {
                let segment = bar.layers.get(layer)?;
                let base: f64 = bar.layers[..layer].iter().map(|l| l.value).sum();
                let x = i as f64;
                Some(Rectangle::new(
                    [(x - BAR_HALF_WIDTH, base), (x + BAR_HALF_WIDTH, base + segment.value)],
                    rgb(segment.color).filled(),
                ))
            }))?
            .label(first.label.clone())
            .legend(move |pos| Rectangle::new(swatch.corners(pos), legend_color.filled()));
    }

    let total_style = options
        .font(15.0)
        .style(FontStyle::Bold)
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            format!("Total: {}", bar.total()),
            (i as f64, bar.total() + 0.3),
            total_style.clone(),
        )
    }))?;

    // Open count in the middle of the open segment
    let count_style = options
        .font(16.0)
        .style(FontStyle::Bold)
        .color(&WHITE)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(bars.iter().enumerate().filter_map(|(i, bar)| {
        let open = bar.layers.last()?;
        if open.value <= 0.0 {
            return None;
        }
        let base = bar.total() - open.value;
        Some(Text::new(
            format!("{}", open.value),
            (i as f64, base + open.value / 2.0),
            count_style.clone(),
        ))
    }))?;

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(options.font(14.0))
        .draw()?;

    root.present()
        .context("failed to save defect distribution chart")?;

    Ok(())
}
