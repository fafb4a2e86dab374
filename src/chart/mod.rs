//! PNG chart rendering
//!
//! Rendering is split in two halves:
//!
//! - **Series builders** ([`execution_slices`], [`defect_bars`], [`module_bars`],
//!   ...) turn an [`AnalyticsSummary`] into `(label, value, colour)` triples.
//!   They are pure and carry every number and colour a chart shows.
//! - **Drawers** ([`execution`], [`defects`], [`modules`]) lay those triples out
//!   with `plotters` and write a PNG file.
//!
//! | Chart | File |
//! |-------|------|
//! | Test case execution summary (pie) | `test_execution_pie_chart.png` |
//! | Defect distribution by severity (stacked bars) | `defect_distribution_bar_chart.png` |
//! | Pass rate by module (horizontal bars) | `module_coverage_horizontal_chart.png` |

pub mod defects;
pub mod execution;
pub mod modules;

use crate::analytics::{AnalyticsSummary, ColorClass, ExecutionCategory};
use crate::palette::{Palette, Rgb};
use anyhow::{Context, Result};
use clap::ValueEnum;
use plotters::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum ChartKind {
    Execution,
    Defects,
    Modules,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Execution, ChartKind::Defects, ChartKind::Modules];

    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::Execution => "test_execution_pie_chart.png",
            ChartKind::Defects => "defect_distribution_bar_chart.png",
            ChartKind::Modules => "module_coverage_horizontal_chart.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Execution => "Test Case Execution Summary",
            ChartKind::Defects => "Defect Distribution by Severity",
            ChartKind::Modules => "Test Coverage by Module - Pass Rate",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// One labelled, coloured value handed to a drawer.
#[derive(Debug, Clone, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: f64,
    pub color: Rgb,
}

impl Slice {
    fn new(label: impl Into<String>, value: f64, color: Rgb) -> Self {
        Self {
            label: label.into(),
            value,
            color,
        }
    }
}

/// A bar made of stacked layers, bottom first.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedBar {
    pub label: String,
    pub layers: Vec<Slice>,
}

impl StackedBar {
    pub fn total(&self) -> f64 {
        self.layers.iter().map(|l| l.value).sum()
    }
}

pub const FIXED_LAYER: &str = "Number of defects fixed";
pub const OPEN_LAYER: &str = "Number of defects remain open";

/// Pie slices: every outcome with a non-zero count.
///
/// "Executed" is the whole and never becomes a slice of its own.
pub fn execution_slices(summary: &AnalyticsSummary, palette: &Palette) -> Vec<Slice> {
    summary
        .execution
        .outcomes()
        .filter(|s| s.count > 0)
        .map(|s| {
            Slice::new(
                format!("{} {} ({:.1}%)", s.category, s.count, s.percent),
                f64::from(s.count),
                palette.execution(s.category),
            )
        })
        .collect()
}

/// Legend rows for the pie: all five categories, zero counts included.
pub fn execution_legend(summary: &AnalyticsSummary, palette: &Palette) -> Vec<Slice> {
    ExecutionCategory::ALL
        .iter()
        .filter_map(|&category| summary.execution.share(category))
        .map(|s| {
            Slice::new(
                format!(
                    "Test cases {}: {} ({:.1}%)",
                    s.category.label().to_lowercase(),
                    s.count,
                    s.percent
                ),
                s.percent,
                palette.execution(s.category),
            )
        })
        .collect()
}

pub fn defect_bars(summary: &AnalyticsSummary, palette: &Palette) -> Vec<StackedBar> {
    summary
        .defects
        .buckets
        .iter()
        .map(|b| StackedBar {
            label: b.severity.label().to_string(),
            layers: vec![
                Slice::new(FIXED_LAYER, f64::from(b.fixed), palette.defect_fixed),
                Slice::new(OPEN_LAYER, f64::from(b.open), palette.defect_open),
            ],
        })
        .collect()
}

/// One bar per module, input order, coloured by tier.
pub fn module_bars(summary: &AnalyticsSummary, palette: &Palette) -> Vec<(Slice, ColorClass)> {
    summary
        .modules
        .standings
        .iter()
        .map(|m| {
            (
                Slice::new(m.name.clone(), m.pass_rate, palette.class(m.class)),
                m.class,
            )
        })
        .collect()
}

pub fn class_legend(palette: &Palette) -> Vec<Slice> {
    ColorClass::ALL
        .iter()
        .map(|c| Slice::new(c.legend(), 0.0, palette.class(*c)))
        .collect()
}

/// Rendering settings shared by all charts.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub output_dir: PathBuf,
    pub palette: Palette,
    /// Multiplies image size, fonts and margins
    pub scale: f64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("charts"),
            palette: Palette::default(),
            scale: 1.0,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return Err(format!("Scale must be a positive number, got {}", self.scale));
        }
        if self.scale > 8.0 {
            return Err(format!("Scale must be at most 8, got {}", self.scale));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err("Output directory cannot be empty".to_string());
        }
        Ok(())
    }

    pub fn path_for(&self, kind: ChartKind) -> PathBuf {
        self.output_dir.join(kind.file_name())
    }

    pub(crate) fn px(&self, value: u32) -> u32 {
        (f64::from(value) * self.scale).round().max(1.0) as u32
    }

    pub(crate) fn size(&self, width: u32, height: u32) -> (u32, u32) {
        (self.px(width), self.px(height))
    }

    pub(crate) fn swatch(&self) -> Swatch {
        Swatch {
            width: self.px(20) as i32,
            half_height: self.px(5) as i32,
        }
    }

    pub(crate) fn font(&self, size: f64) -> FontDesc<'static> {
        ("sans-serif", size * self.scale).into_font()
    }
}

/// Legend marker size in pixels, already scaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Swatch {
    pub width: i32,
    pub half_height: i32,
}

impl Swatch {
    /// Rectangle corners for a legend entry anchored at `(x, y)`.
    pub(crate) fn corners(&self, (x, y): (i32, i32)) -> [(i32, i32); 2] {
        [(x, y - self.half_height), (x + self.width, y + self.half_height)]
    }

    /// Horizontal stroke for line-series legend entries.
    pub(crate) fn stroke(&self, (x, y): (i32, i32)) -> Vec<(i32, i32)> {
        vec![(x, y), (x + self.width, y)]
    }
}

pub(crate) fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color.0, color.1, color.2)
}

/// Tick label on a category axis where category `i` sits at coordinate `i`.
pub(crate) fn category_label(names: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    names.get(index as usize).cloned().unwrap_or_default()
}

/// Requested kinds with repeats dropped, first occurrence order kept.
pub fn unique_kinds(kinds: &[ChartKind]) -> Vec<ChartKind> {
    let mut unique = Vec::with_capacity(kinds.len());
    for &kind in kinds {
        if !unique.contains(&kind) {
            unique.push(kind);
        }
    }
    unique
}

/// Render one chart into `options.output_dir`, returning the written path.
pub fn render(kind: ChartKind, summary: &AnalyticsSummary, options: &RenderOptions) -> Result<PathBuf> {
    let path = options.path_for(kind);
    debug!(chart = ?kind, path = %path.display(), "rendering chart");

    let drawn = match kind {
        ChartKind::Execution => execution::draw(&path, summary, options),
        ChartKind::Defects => defects::draw(&path, summary, options),
        ChartKind::Modules => modules::draw(&path, summary, options),
    };
    drawn.with_context(|| format!("failed to render {} chart", kind))?;

    Ok(path)
}

/// Render each requested chart once, in order, creating the output directory.
///
/// `on_rendered` is called after every chart that was written.
pub fn render_all<F>(
    kinds: &[ChartKind],
    summary: &AnalyticsSummary,
    options: &RenderOptions,
    mut on_rendered: F,
) -> Result<Vec<PathBuf>>
where
    F: FnMut(ChartKind, &Path),
{
    options
        .validate()
        .map_err(anyhow::Error::msg)
        .context("invalid render options")?;
    std::fs::create_dir_all(&options.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            options.output_dir.display()
        )
    })?;

    let mut written = Vec::new();
    for kind in unique_kinds(kinds) {
        let path = render(kind, summary, options)?;
        on_rendered(kind, &path);
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn sample_summary() -> AnalyticsSummary {
        AnalyticsSummary::compute(&Dataset::sample()).unwrap()
    }

    // ==========================================================================
    // SERIES BUILDER TESTS
    // ==========================================================================
    //
    // These are the values the drawers put on screen, so they are checked
    // here instead of by inspecting pixels.
    // ==========================================================================

    #[test]
    fn test_execution_slices_skip_zero_counts() {
        let slices = execution_slices(&sample_summary(), &Palette::office());
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].label, "Passed 107 (84.3%)");
        assert_eq!(slices[0].value, 107.0);
        assert_eq!(slices[0].color.hex(), "#90EE90");
        assert_eq!(slices[1].label, "Failed 20 (15.7%)");
        assert_eq!(slices[1].color.hex(), "#FF6B6B");
    }

    #[test]
    fn test_execution_slices_sum_to_outcomes() {
        let mut ds = Dataset::sample();
        ds.execution.passed = 100;
        ds.execution.blocked = 5;
        ds.execution.not_run = 2;
        let summary = AnalyticsSummary::compute(&ds).unwrap();
        let slices = execution_slices(&summary, &Palette::office());
        let sum: f64 = slices.iter().map(|s| s.value).sum();
        assert_eq!(slices.len(), 4);
        assert_eq!(sum, 127.0);
    }

    #[test]
    fn test_execution_legend_lists_every_category() {
        let legend = execution_legend(&sample_summary(), &Palette::office());
        let labels: Vec<&str> = legend.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "Test cases executed: 127 (100.0%)",
                "Test cases passed: 107 (84.3%)",
                "Test cases failed: 20 (15.7%)",
                "Test cases blocked: 0 (0.0%)",
                "Test cases not run: 0 (0.0%)",
            ]
        );
        assert_eq!(legend[0].color.hex(), "#DDA0DD");
    }

    #[test]
    fn test_defect_bars_stack_fixed_under_open() {
        let bars = defect_bars(&sample_summary(), &Palette::office());
        assert_eq!(bars.len(), 4);
        assert_eq!(bars[1].label, "High");
        assert_eq!(bars[1].layers[0].label, FIXED_LAYER);
        assert_eq!(bars[1].layers[0].value, 0.0);
        assert_eq!(bars[1].layers[1].label, OPEN_LAYER);
        assert_eq!(bars[1].layers[1].value, 8.0);
        assert_eq!(bars[1].total(), 8.0);
        assert_eq!(bars[1].layers[1].color.hex(), "#C55454");
    }

    #[test]
    fn test_module_bars_keep_input_order_and_tiers() {
        let bars = module_bars(&sample_summary(), &Palette::office());
        assert_eq!(bars.len(), 6);
        assert_eq!(bars[0].0.label, "Authorization Service");
        assert_eq!(bars[0].1, ColorClass::Excellent);
        assert_eq!(bars[0].0.color.hex(), "#92D050");
        assert_eq!(bars[5].0.label, "User Profile");
        assert_eq!(bars[5].0.color.hex(), "#FF6B6B");
    }

    #[test]
    fn test_class_legend_uses_palette() {
        let legend = class_legend(&Palette::classic());
        assert_eq!(legend.len(), 4);
        assert_eq!(legend[0].label, "Excellent (≥90%)");
        assert_eq!(legend[0].color.hex(), "#90EE90");
        assert_eq!(legend[3].label, "Needs Improvement (<70%)");
    }

    #[test]
    fn test_category_label_only_on_whole_positions() {
        let names = vec!["Critical".to_string(), "High".to_string()];
        assert_eq!(category_label(&names, 0.0), "Critical");
        assert_eq!(category_label(&names, 1.0000000001), "High");
        assert_eq!(category_label(&names, 0.5), "");
        assert_eq!(category_label(&names, -1.0), "");
        assert_eq!(category_label(&names, 2.0), "");
    }

    // ==========================================================================
    // OPTIONS TESTS
    // ==========================================================================

    #[test]
    fn test_options_defaults() {
        let opts = RenderOptions::new();
        assert_eq!(opts.output_dir, PathBuf::from("charts"));
        assert_eq!(opts.scale, 1.0);
        assert!(opts.validate().is_ok());
        assert_eq!(
            opts.path_for(ChartKind::Defects),
            PathBuf::from("charts/defect_distribution_bar_chart.png")
        );
    }

    #[test]
    fn test_options_validation() {
        assert!(RenderOptions::new().with_scale(0.0).validate().is_err());
        assert!(RenderOptions::new().with_scale(-1.0).validate().is_err());
        assert!(RenderOptions::new().with_scale(f64::NAN).validate().is_err());
        assert!(RenderOptions::new().with_scale(9.0).validate().is_err());
        assert!(RenderOptions::new().with_output_dir("").validate().is_err());
        assert!(RenderOptions::new().with_scale(2.0).validate().is_ok());
    }

    #[test]
    fn test_scaled_sizes() {
        let opts = RenderOptions::new().with_scale(1.5);
        assert_eq!(opts.size(1000, 600), (1500, 900));
        assert_eq!(RenderOptions::new().with_scale(0.001).px(10), 1);
    }

    #[test]
    fn test_legend_swatch_scales() {
        let swatch = RenderOptions::new().swatch();
        assert_eq!(swatch.corners((100, 50)), [(100, 45), (120, 55)]);

        let swatch = RenderOptions::new().with_scale(2.0).swatch();
        assert_eq!(swatch.corners((100, 50)), [(100, 40), (140, 60)]);
        assert_eq!(swatch.stroke((100, 50)), vec![(100, 50), (140, 50)]);
    }

    #[test]
    fn test_chart_file_names_are_unique() {
        let names: std::collections::HashSet<&str> =
            ChartKind::ALL.iter().map(|k| k.file_name()).collect();
        assert_eq!(names.len(), 3);
    }

    #[test]
    fn test_unique_kinds_drops_repeats_in_order() {
        let kinds = [
            ChartKind::Modules,
            ChartKind::Modules,
            ChartKind::Execution,
            ChartKind::Modules,
        ];
        assert_eq!(unique_kinds(&kinds), vec![ChartKind::Modules, ChartKind::Execution]);
        assert_eq!(unique_kinds(&ChartKind::ALL), ChartKind::ALL.to_vec());
        assert!(unique_kinds(&[]).is_empty());
    }

    #[test]
    fn test_render_all_rejects_bad_options_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("charts");
        let opts = RenderOptions::new().with_output_dir(&out).with_scale(0.0);
        let result = render_all(&ChartKind::ALL, &sample_summary(), &opts, |_, _| {});
        assert!(result.is_err());
        assert!(!out.exists());
    }

    // ==========================================================================
    // RENDERING TESTS
    // ==========================================================================
    //
    // Drawing text needs a system sans-serif font, which minimal CI images
    // lack. Run with `cargo test -- --ignored` on a desktop machine.
    // ==========================================================================

    #[test]
    #[ignore = "requires system fonts"]
    fn test_render_all_writes_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let opts = RenderOptions::new().with_output_dir(dir.path().join("out"));
        let mut seen = Vec::new();

        let written = render_all(
            &[ChartKind::Modules, ChartKind::Execution, ChartKind::Modules, ChartKind::Defects],
            &sample_summary(),
            &opts,
            |kind, _| seen.push(kind),
        )
        .unwrap();

        assert_eq!(written.len(), 3);
        assert_eq!(seen, vec![ChartKind::Modules, ChartKind::Execution, ChartKind::Defects]);
        for path in written {
            let bytes = std::fs::read(&path).unwrap();
            assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']), "{} is not a PNG", path.display());
        }
    }
}
