//! Report generation for analytics summaries
//!
//! This module provides output formatters for an [`AnalyticsSummary`]:
//!
//! - **Text**: the human-readable summary printed to the console
//! - **JSON**: machine-readable format with a generation timestamp
//! - **CSV**: spreadsheet-compatible rows for every category, severity and module
//!
//! # Usage
//!
//! ```ignore
//! use testcharts::report;
//!
//! // Automatically picks format based on extension
//! report::generate("summary.json", &summary)?; // JSON
//! report::generate("summary.txt", &summary)?;  // Text
//! report::generate("summary.csv", &summary)?;  // CSV
//! ```

pub mod csv;
pub mod json;
pub mod text;

pub use text::print_summary;

use crate::analytics::AnalyticsSummary;
use std::io;
use std::path::Path;

/// Generate a report in the appropriate format based on file extension
pub fn generate<P: AsRef<Path>>(path: P, summary: &AnalyticsSummary) -> io::Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::File::create(path)?;

    match ext.as_str() {
        "json" => json::write(&mut file, summary),
        "txt" | "text" => text::write(&mut file, summary),
        _ => csv::write(&mut file, summary),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    fn sample_summary() -> AnalyticsSummary {
        AnalyticsSummary::compute(&Dataset::sample()).unwrap()
    }

    // ==========================================================================
    // FORMAT DISPATCH TESTS
    // ==========================================================================
    //
    // The extension alone decides the format; unknown extensions fall back
    // to CSV.
    // ==========================================================================

    #[test]
    fn test_generate_json_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.JSON");
        generate(&path, &sample_summary()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["summary"]["defects"]["total_defects"], 20);
    }

    #[test]
    fn test_generate_text_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.txt");
        generate(&path, &sample_summary()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("SUMMARY REPORT"));
    }

    #[test]
    fn test_generate_falls_back_to_csv() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["summary.csv", "summary.dat", "summary"] {
            let path = dir.path().join(name);
            generate(&path, &sample_summary()).unwrap();
            let content = std::fs::read_to_string(&path).unwrap();
            assert!(content.starts_with("section,name,count,percent,class\n"), "{}", name);
        }
    }

    #[test]
    fn test_generate_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/2026/summary.json");
        generate(&path, &sample_summary()).unwrap();
        assert!(path.exists());
    }
}
