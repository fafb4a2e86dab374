//! CSV report output
//!
//! One row per execution category, severity and module:
//!
//! ```text
//! section,name,count,percent,class
//! execution,Passed,107,84.3,
//! defects,Critical,4,20.0,
//! modules,Cart Controller,,89.7,good
//! ```
//!
//! For defects `count` is fixed + open and `percent` the share of all defects.

use crate::analytics::{AnalyticsSummary, ColorClass};
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, summary: &AnalyticsSummary) -> io::Result<()> {
    writeln!(writer, "section,name,count,percent,class")?;

    for share in &summary.execution.shares {
        writeln!(
            writer,
            "execution,{},{},{:.1},",
            escape(share.category.label()),
            share.count,
            share.percent
        )?;
    }

    for bucket in &summary.defects.buckets {
        writeln!(
            writer,
            "defects,{},{},{:.1},",
            escape(bucket.severity.label()),
            bucket.total,
            bucket.share
        )?;
    }

    for module in &summary.modules.standings {
        writeln!(
            writer,
            "modules,{},,{:.1},{}",
            escape(&module.name),
            module.pass_rate,
            class_key(module.class)
        )?;
    }

    Ok(())
}

fn class_key(class: ColorClass) -> &'static str {
    match class {
        ColorClass::Excellent => "excellent",
        ColorClass::Good => "good",
        ColorClass::Acceptable => "acceptable",
        ColorClass::NeedsImprovement => "needs_improvement",
    }
}

/// Quote a field if it contains a delimiter, quote or newline
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
