use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use testcharts::chart::{self, ChartKind, RenderOptions};
use testcharts::palette::{Palette, PaletteName};
use testcharts::{report, AnalyticsSummary, Dataset};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "testcharts")]
#[command(author, version, about = "Summarize test execution, defects and module pass rates as charts")]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// Dataset file (.toml, .json); the built-in sample is used when absent
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Directory for the rendered charts
    #[arg(short, long, default_value = "charts")]
    out_dir: PathBuf,

    /// Only render these charts (repeatable)
    #[arg(short, long, value_enum)]
    chart: Vec<ChartKind>,

    /// Colour preset
    #[arg(long, value_enum, default_value_t = PaletteName::Office)]
    palette: PaletteName,

    /// Image scale factor
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Output report file (.csv, .json, .txt)
    #[arg(long)]
    report: Option<PathBuf>,

    /// Don't render any charts
    #[arg(long)]
    no_charts: bool,

    /// Exit with code 1 when the overall pass rate is below this percentage
    #[arg(long)]
    fail_under: Option<f64>,

    /// Open the chart directory when done
    #[arg(long)]
    open: bool,

    /// Only show the summary report
    #[arg(short, long)]
    quiet: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the summary report only
    Summary,

    /// Write the built-in dataset as TOML
    Sample {
        /// Output path (stdout when absent)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {:#}", e);
            std::process::exit(2);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "testcharts=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<i32> {
    // Handle subcommands first
    if let Some(Command::Sample { output }) = &args.command {
        write_sample(output.as_ref())?;
        return Ok(0);
    }

    let dataset = match &args.data {
        Some(path) => Dataset::from_path(path)
            .with_context(|| format!("failed to load dataset {}", path.display()))?,
        None => Dataset::sample(),
    };
    let summary = AnalyticsSummary::compute(&dataset)?;

    let summary_only = matches!(args.command, Some(Command::Summary));
    let show_header = !args.quiet && !summary_only;

    if show_header {
        eprintln!("\x1b[1mTestcharts - Test Analytics Summary\x1b[0m");
        eprintln!("{}", "─".repeat(70));
        match &args.data {
            Some(path) => eprintln!("Dataset: {}\n", path.display()),
            None => eprintln!("Dataset: built-in sample\n"),
        }
    }

    report::print_summary(&summary).context("failed to print summary")?;

    if !summary_only && !args.no_charts {
        let kinds = if args.chart.is_empty() {
            ChartKind::ALL.to_vec()
        } else {
            args.chart.clone()
        };
        let options = RenderOptions::new()
            .with_output_dir(&args.out_dir)
            .with_palette(Palette::named(args.palette))
            .with_scale(args.scale);

        render_charts(&kinds, &summary, &options, args.quiet)?;

        if args.open {
            if let Err(e) = open::that(&args.out_dir) {
                eprintln!("Failed to open chart directory: {}", e);
            }
        }
    }

    if let Some(ref output_path) = args.report {
        report::generate(output_path, &summary)
            .with_context(|| format!("failed to write report {}", output_path.display()))?;
        if !args.quiet {
            eprintln!("\n\x1b[32mReport saved: {}\x1b[0m", output_path.display());
        }
    }

    if show_header {
        eprintln!("\n\x1b[90mDone.\x1b[0m");
    }

    // Exit with appropriate code
    if let Some(threshold) = args.fail_under {
        if summary.pass_rate() < threshold {
            eprintln!(
                "\x1b[31mPass rate {:.1}% is below {:.1}%\x1b[0m",
                summary.pass_rate(),
                threshold
            );
            return Ok(1);
        }
    }

    Ok(0)
}

fn render_charts(
    kinds: &[ChartKind],
    summary: &AnalyticsSummary,
    options: &RenderOptions,
    quiet: bool,
) -> Result<()> {
    // render_all skips repeats
    let kinds = chart::unique_kinds(kinds);
    let pb = if !quiet {
        let pb = ProgressBar::new(kinds.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let written = chart::render_all(&kinds, summary, options, |kind, _| {
        if let Some(ref pb) = pb {
            pb.inc(1);
            pb.set_message(kind.file_name());
        }
    })?;

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if !quiet {
        eprintln!();
        for path in &written {
            eprintln!("\x1b[32mChart saved: {}\x1b[0m", path.display());
        }
    }

    Ok(())
}

fn write_sample(output: Option<&PathBuf>) -> Result<()> {
    let toml = Dataset::sample().to_toml()?;
    match output {
        Some(path) => {
            std::fs::write(path, toml)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Sample dataset written: {}", path.display());
        }
        None => print!("{}", toml),
    }
    Ok(())
}
