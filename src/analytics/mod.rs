//! Derived statistics for the charts and the summary report
//!
//! Everything here is a pure function of a [`Dataset`]: percentages against
//! the declared execution total, defect totals, pass-rate tiers and the
//! best/worst module. [`AnalyticsSummary::compute`] bundles them into one
//! serialisable value that the renderers and reports consume.

pub mod classify;

pub use classify::{classify_pass_rate, ColorClass};

use crate::dataset::{Dataset, DefectSeverityBucket, ModulePassRate, Severity};
use crate::error::{Error, Result};
use serde::Serialize;
use std::fmt;

/// `100 * part / whole`, failing on a zero denominator.
pub fn percentage(part: u32, whole: u32) -> Result<f64> {
    if whole == 0 {
        return Err(Error::DivisionByZero { part });
    }
    Ok(100.0 * f64::from(part) / f64::from(whole))
}

/// Module with the highest pass rate. Ties go to the earliest entry.
pub fn best_module(modules: &[ModulePassRate]) -> Option<&ModulePassRate> {
    modules.iter().fold(None, |best, m| match best {
        Some(b) if b.pass_rate >= m.pass_rate => Some(b),
        _ => Some(m),
    })
}

/// Module with the lowest pass rate. Ties go to the earliest entry.
pub fn worst_module(modules: &[ModulePassRate]) -> Option<&ModulePassRate> {
    modules.iter().fold(None, |worst, m| match worst {
        Some(w) if w.pass_rate <= m.pass_rate => Some(w),
        _ => Some(m),
    })
}

/// Open defects across all severities.
pub fn total_defects(buckets: &[DefectSeverityBucket]) -> u32 {
    buckets.iter().fold(0, |sum, b| sum.saturating_add(b.open))
}

pub fn total_fixed(buckets: &[DefectSeverityBucket]) -> u32 {
    buckets.iter().fold(0, |sum, b| sum.saturating_add(b.fixed))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionCategory {
    Executed,
    Passed,
    Failed,
    Blocked,
    NotRun,
}

impl ExecutionCategory {
    pub const ALL: [ExecutionCategory; 5] = [
        ExecutionCategory::Executed,
        ExecutionCategory::Passed,
        ExecutionCategory::Failed,
        ExecutionCategory::Blocked,
        ExecutionCategory::NotRun,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExecutionCategory::Executed => "Executed",
            ExecutionCategory::Passed => "Passed",
            ExecutionCategory::Failed => "Failed",
            ExecutionCategory::Blocked => "Blocked",
            ExecutionCategory::NotRun => "Not Run",
        }
    }

    /// Executed is the whole, the rest are its parts.
    pub fn is_outcome(&self) -> bool {
        !matches!(self, ExecutionCategory::Executed)
    }
}

impl fmt::Display for ExecutionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExecutionShare {
    pub category: ExecutionCategory,
    pub count: u32,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionSummary {
    pub total: u32,
    pub shares: Vec<ExecutionShare>,
    pub pass_rate: f64,
    pub fail_rate: f64,
    /// Whether the outcome categories add up to `total`
    pub consistent: bool,
}

impl ExecutionSummary {
    pub fn share(&self, category: ExecutionCategory) -> Option<&ExecutionShare> {
        self.shares.iter().find(|s| s.category == category)
    }

    pub fn outcomes(&self) -> impl Iterator<Item = &ExecutionShare> {
        self.shares.iter().filter(|s| s.category.is_outcome())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DefectShare {
    pub severity: Severity,
    pub fixed: u32,
    pub open: u32,
    pub total: u32,
    /// Percentage of all recorded defects
    pub share: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefectSummary {
    pub buckets: Vec<DefectShare>,
    pub total_defects: u32,
    pub total_fixed: u32,
}

impl DefectSummary {
    /// Fixed and open defects together.
    pub fn recorded(&self) -> u32 {
        self.total_defects.saturating_add(self.total_fixed)
    }

    pub fn max_bucket_total(&self) -> u32 {
        self.buckets.iter().map(|b| b.total).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleStanding {
    pub name: String,
    pub pass_rate: f64,
    pub class: ColorClass,
}

impl From<&ModulePassRate> for ModuleStanding {
    fn from(m: &ModulePassRate) -> Self {
        Self {
            name: m.name.clone(),
            pass_rate: m.pass_rate,
            class: classify_pass_rate(m.pass_rate),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModuleSummary {
    /// Input order
    pub standings: Vec<ModuleStanding>,
    pub best: ModuleStanding,
    pub worst: ModuleStanding,
    /// Names of modules under the overall pass rate
    pub below_overall: Vec<String>,
}

impl ModuleSummary {
    /// Standings sorted by descending pass rate, input order kept on ties.
    pub fn ranking(&self) -> Vec<&ModuleStanding> {
        let mut ranked: Vec<_> = self.standings.iter().collect();
        ranked.sort_by(|a, b| b.pass_rate.total_cmp(&a.pass_rate));
        ranked
    }

    pub fn in_class(&self, class: ColorClass) -> impl Iterator<Item = &ModuleStanding> {
        self.standings.iter().filter(move |s| s.class == class)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub title: String,
    pub execution: ExecutionSummary,
    pub defects: DefectSummary,
    pub modules: ModuleSummary,
}

impl AnalyticsSummary {
    pub fn compute(dataset: &Dataset) -> Result<Self> {
        let execution = Self::execution(dataset)?;
        let defects = Self::defects(&dataset.defects)?;
        let modules = Self::modules(&dataset.modules, execution.pass_rate)?;

        Ok(Self {
            title: dataset.title.clone(),
            execution,
            defects,
            modules,
        })
    }

    pub fn pass_rate(&self) -> f64 {
        self.execution.pass_rate
    }

    fn execution(dataset: &Dataset) -> Result<ExecutionSummary> {
        let counts = &dataset.execution;
        let total = counts.total;

        let shares = ExecutionCategory::ALL
            .iter()
            .map(|&category| -> Result<ExecutionShare> {
                let count = match category {
                    ExecutionCategory::Executed => total,
                    ExecutionCategory::Passed => counts.passed,
                    ExecutionCategory::Failed => counts.failed,
                    ExecutionCategory::Blocked => counts.blocked,
                    ExecutionCategory::NotRun => counts.not_run,
                };
                Ok(ExecutionShare {
                    category,
                    count,
                    percent: percentage(count, total)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ExecutionSummary {
            total,
            shares,
            pass_rate: percentage(counts.passed, total)?,
            fail_rate: percentage(counts.failed, total)?,
            consistent: counts.is_consistent(),
        })
    }

    fn defects(buckets: &[DefectSeverityBucket]) -> Result<DefectSummary> {
        let open = total_defects(buckets);
        let fixed = total_fixed(buckets);
        let recorded = open.saturating_add(fixed);

        let buckets = buckets
            .iter()
            .map(|b| -> Result<DefectShare> {
                let share = if recorded == 0 {
                    0.0
                } else {
                    percentage(b.total(), recorded)?
                };
                Ok(DefectShare {
                    severity: b.severity,
                    fixed: b.fixed,
                    open: b.open,
                    total: b.total(),
                    share,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(DefectSummary {
            buckets,
            total_defects: open,
            total_fixed: fixed,
        })
    }

    fn modules(modules: &[ModulePassRate], overall: f64) -> Result<ModuleSummary> {
        let best = best_module(modules).ok_or_else(|| Error::invalid("no modules to rank"))?;
        let worst = worst_module(modules).ok_or_else(|| Error::invalid("no modules to rank"))?;

        Ok(ModuleSummary {
            standings: modules.iter().map(ModuleStanding::from).collect(),
            best: best.into(),
            worst: worst.into(),
            below_overall: modules
                .iter()
                .filter(|m| m.pass_rate < overall)
                .map(|m| m.name.clone())
                .collect(),
        })
    }
}
