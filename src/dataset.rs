//! Test metrics dataset
//!
//! A [`Dataset`] bundles the three inputs every chart and summary is derived
//! from: overall execution counts, defects per severity and per-module pass
//! rates. It is built once (from the built-in sample or a TOML/JSON file),
//! validated, and then only ever borrowed.
//!
//! # File format
//!
//! ```toml
//! title = "ktpm-webbansach"
//!
//! [execution]
//! total = 127
//! passed = 107
//! failed = 20
//!
//! [[defects]]
//! severity = "critical"
//! open = 4
//!
//! [[modules]]
//! name = "Authorization Service"
//! pass_rate = 90.6
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use tracing::{debug, warn};

/// Defect priority, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestExecutionCounts {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    #[serde(default)]
    pub blocked: u32,
    #[serde(default)]
    pub not_run: u32,
}

impl TestExecutionCounts {
    /// Sum of the four outcome categories.
    pub fn executed_sum(&self) -> u32 {
        self.passed
            .saturating_add(self.failed)
            .saturating_add(self.blocked)
            .saturating_add(self.not_run)
    }

    pub fn is_consistent(&self) -> bool {
        self.executed_sum() == self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefectSeverityBucket {
    pub severity: Severity,
    #[serde(default)]
    pub fixed: u32,
    #[serde(default)]
    pub open: u32,
}

impl DefectSeverityBucket {
    pub fn new(severity: Severity, fixed: u32, open: u32) -> Self {
        Self { severity, fixed, open }
    }

    pub fn total(&self) -> u32 {
        self.fixed.saturating_add(self.open)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModulePassRate {
    pub name: String,
    /// Percentage in `[0, 100]`
    pub pass_rate: f64,
}

impl ModulePassRate {
    pub fn new(name: impl Into<String>, pass_rate: f64) -> Self {
        Self {
            name: name.into(),
            pass_rate,
        }
    }
}

fn default_title() -> String {
    "Test Analytics".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default = "default_title")]
    pub title: String,
    pub execution: TestExecutionCounts,
    #[serde(default)]
    pub defects: Vec<DefectSeverityBucket>,
    pub modules: Vec<ModulePassRate>,
}

impl Dataset {
    /// The project's recorded test run: 127 cases, 20 open defects, six modules.
    pub fn sample() -> Self {
        Self {
            title: "ktpm-webbansach".to_string(),
            execution: TestExecutionCounts {
                total: 127,
                passed: 107,
                failed: 20,
                blocked: 0,
                not_run: 0,
            },
            defects: vec![
                DefectSeverityBucket::new(Severity::Critical, 0, 4),
                DefectSeverityBucket::new(Severity::High, 0, 8),
                DefectSeverityBucket::new(Severity::Medium, 0, 6),
                DefectSeverityBucket::new(Severity::Low, 0, 2),
            ],
            modules: vec![
                ModulePassRate::new("Authorization Service", 90.6),
                ModulePassRate::new("Cart Controller", 89.7),
                ModulePassRate::new("Search Controller", 87.5),
                ModulePassRate::new("E2E Bookstore", 87.5),
                ModulePassRate::new("Order Controller", 84.6),
                ModulePassRate::new("User Profile", 46.2),
            ],
        }
    }

    /// Load and validate a dataset, picking the parser from the file extension.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let content = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading dataset");

        match ext.as_str() {
            "toml" => Self::from_toml_str(&content),
            "json" => Self::from_json_str(&content),
            _ => Err(Error::UnsupportedFormat(path.to_path_buf())),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let dataset: Dataset = toml::from_str(content)?;
        dataset.validate()
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(content)?;
        dataset.validate()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the dataset and bring it into canonical form.
    ///
    /// Defect buckets are reordered Critical→Low and missing severities are
    /// filled with empty buckets. An execution breakdown that does not add up
    /// to `total` is only warned about: `total` stays the denominator.
    pub fn validate(mut self) -> Result<Self> {
        if self.execution.total == 0 {
            return Err(Error::invalid("execution total must be greater than 0"));
        }
        if !self.execution.is_consistent() {
            warn!(
                total = self.execution.total,
                sum = self.execution.executed_sum(),
                "execution categories do not add up to the declared total"
            );
        }

        let mut seen = HashSet::new();
        for bucket in &self.defects {
            if !seen.insert(bucket.severity) {
                return Err(Error::invalid(format!(
                    "severity {} listed more than once",
                    bucket.severity
                )));
            }
        }
        let recorded = self
            .defects
            .iter()
            .try_fold(0u32, |sum, b| sum.checked_add(b.fixed)?.checked_add(b.open));
        if recorded.is_none() {
            return Err(Error::invalid(format!(
                "defect counts add up to more than {}",
                u32::MAX
            )));
        }
        for severity in Severity::ALL {
            if !seen.contains(&severity) {
                self.defects.push(DefectSeverityBucket::new(severity, 0, 0));
            }
        }
        self.defects.sort_by_key(|b| b.severity);

        if self.modules.is_empty() {
            return Err(Error::invalid("at least one module is required"));
        }
        let mut names = HashSet::new();
        for module in &self.modules {
            if module.name.trim().is_empty() {
                return Err(Error::invalid("module name cannot be empty"));
            }
            if !names.insert(module.name.as_str()) {
                return Err(Error::invalid(format!(
                    "module '{}' listed more than once",
                    module.name
                )));
            }
            if !module.pass_rate.is_finite() || !(0.0..=100.0).contains(&module.pass_rate) {
                return Err(Error::invalid(format!(
                    "pass rate of '{}' must be within 0-100, got {}",
                    module.name, module.pass_rate
                )));
            }
        }

        Ok(self)
    }
}
