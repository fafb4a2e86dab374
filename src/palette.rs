//! Colours for every chart element
//!
//! Two presets exist, matching the two colour schemes the project's charts
//! have been published with. The execution pie uses the same colours in both.

use crate::analytics::{ColorClass, ExecutionCategory};
use clap::ValueEnum;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PaletteName {
    #[default]
    Office,
    Classic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub executed: Rgb,
    pub passed: Rgb,
    pub failed: Rgb,
    pub blocked: Rgb,
    pub not_run: Rgb,
    pub defect_fixed: Rgb,
    pub defect_open: Rgb,
    pub excellent: Rgb,
    pub good: Rgb,
    pub acceptable: Rgb,
    pub needs_improvement: Rgb,
    pub reference_line: Rgb,
}

impl Palette {
    pub fn named(name: PaletteName) -> Self {
        match name {
            PaletteName::Office => Self::office(),
            PaletteName::Classic => Self::classic(),
        }
    }

    pub fn office() -> Self {
        Self {
            executed: Rgb(0xDD, 0xA0, 0xDD),
            passed: Rgb(0x90, 0xEE, 0x90),
            failed: Rgb(0xFF, 0x6B, 0x6B),
            blocked: Rgb(0xFF, 0xD7, 0x00),
            not_run: Rgb(0xFF, 0xA5, 0x00),
            defect_fixed: Rgb(0x5B, 0x9B, 0xD5),
            defect_open: Rgb(0xC5, 0x54, 0x54),
            excellent: Rgb(0x92, 0xD0, 0x50),
            good: Rgb(0xFF, 0xC0, 0x00),
            acceptable: Rgb(0xF7, 0x96, 0x46),
            needs_improvement: Rgb(0xFF, 0x6B, 0x6B),
            reference_line: Rgb(0xFF, 0x00, 0x00),
        }
    }

    pub fn classic() -> Self {
        Self {
            defect_fixed: Rgb(0x64, 0x95, 0xED),
            defect_open: Rgb(0xDC, 0x14, 0x3C),
            excellent: Rgb(0x90, 0xEE, 0x90),
            good: Rgb(0xFF, 0xD7, 0x00),
            acceptable: Rgb(0xFF, 0xA5, 0x00),
            needs_improvement: Rgb(0xFF, 0x6B, 0x6B),
            ..Self::office()
        }
    }

    pub fn class(&self, class: ColorClass) -> Rgb {
        match class {
            ColorClass::Excellent => self.excellent,
            ColorClass::Good => self.good,
            ColorClass::Acceptable => self.acceptable,
            ColorClass::NeedsImprovement => self.needs_improvement,
        }
    }

    pub fn execution(&self, category: ExecutionCategory) -> Rgb {
        match category {
            ExecutionCategory::Executed => self.executed,
            ExecutionCategory::Passed => self.passed,
            ExecutionCategory::Failed => self.failed,
            ExecutionCategory::Blocked => self.blocked,
            ExecutionCategory::NotRun => self.not_run,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::office()
    }
}
