//! JSON report output

use crate::analytics::AnalyticsSummary;
use chrono::Local;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated: String,
    summary: &'a AnalyticsSummary,
}

pub fn write<W: Write>(writer: &mut W, summary: &AnalyticsSummary) -> io::Result<()> {
    let report = JsonReport {
        generated: Local::now().to_rfc3339(),
        summary,
    };
    serde_json::to_writer_pretty(&mut *writer, &report)?;
    writeln!(writer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn test_json_contains_derived_values() {
        let summary = AnalyticsSummary::compute(&Dataset::sample()).unwrap();
        let mut out = Vec::new();
        write(&mut out, &summary).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["generated"].is_string());

        let s = &value["summary"];
        assert_eq!(s["title"], "ktpm-webbansach");
        assert_eq!(s["execution"]["total"], 127);
        assert_eq!(s["execution"]["shares"][1]["category"], "passed");
        assert_eq!(s["modules"]["best"]["name"], "Authorization Service");
        assert_eq!(s["modules"]["worst"]["class"], "needs_improvement");
        assert_eq!(s["defects"]["buckets"][0]["severity"], "critical");
    }
}
