//! Plain-text summary report

use crate::analytics::{AnalyticsSummary, ColorClass};
use std::io::{self, Write};

const RULE_WIDTH: usize = 50;

pub fn write<W: Write>(writer: &mut W, summary: &AnalyticsSummary) -> io::Result<()> {
    writeln!(writer, "SUMMARY REPORT: {}", summary.title)?;
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;

    let exec = &summary.execution;
    writeln!(writer, "TEST EXECUTION")?;
    writeln!(writer, "  {:<14} {:>5}", "Total tests:", exec.total)?;
    for share in exec.outcomes() {
        writeln!(
            writer,
            "  {:<14} {:>5} ({:.1}%)",
            format!("{}:", share.category),
            share.count,
            share.percent
        )?;
    }
    writeln!(writer, "  {:<14} {:>5.1}%", "Pass rate:", exec.pass_rate)?;
    writeln!(writer, "  {:<14} {:>5.1}%", "Failure rate:", exec.fail_rate)?;
    if !exec.consistent {
        writeln!(
            writer,
            "  note: outcome counts do not add up to the total of {}",
            exec.total
        )?;
    }

    let defects = &summary.defects;
    writeln!(writer)?;
    writeln!(writer, "DEFECT DISTRIBUTION")?;
    for bucket in &defects.buckets {
        writeln!(
            writer,
            "  {:<10} {:>3} defects ({:.0}%)",
            format!("{}:", bucket.severity),
            bucket.total,
            bucket.share
        )?;
    }
    writeln!(
        writer,
        "  {:<10} {:>3} defects ({} fixed, {} open)",
        "Total:",
        defects.recorded(),
        defects.total_fixed,
        defects.total_defects
    )?;

    let modules = &summary.modules;
    writeln!(writer)?;
    writeln!(writer, "MODULE PERFORMANCE")?;
    for (rank, standing) in modules.ranking().iter().enumerate() {
        writeln!(
            writer,
            "  {}. {:<24} {:>5.1}%  {}",
            rank + 1,
            standing.name,
            standing.pass_rate,
            standing.class
        )?;
    }
    writeln!(
        writer,
        "  Best module:  {} ({:.1}%)",
        modules.best.name, modules.best.pass_rate
    )?;
    writeln!(
        writer,
        "  Worst module: {} ({:.1}%)",
        modules.worst.name, modules.worst.pass_rate
    )?;

    let needs_work: Vec<&str> = modules
        .in_class(ColorClass::NeedsImprovement)
        .map(|s| s.name.as_str())
        .collect();
    if !needs_work.is_empty() {
        writeln!(writer, "  Needs improvement: {}", needs_work.join(", "))?;
    }
    if !modules.below_overall.is_empty() {
        writeln!(
            writer,
            "  Below overall pass rate ({:.1}%): {}",
            exec.pass_rate,
            modules.below_overall.join(", ")
        )?;
    }

    Ok(())
}

/// Print the summary to stdout.
pub fn print_summary(summary: &AnalyticsSummary) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    write(&mut lock, summary)?;
    lock.flush()
}
