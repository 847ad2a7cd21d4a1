//! # Worksheets
//!
//! A `Worksheet` is an ordered list of calculations saved as JSON, e.g. every
//! check for one sample batch. Evaluating it runs each item independently;
//! a failing item is reported in place and does not stop the others.
//!
//! ## Structure
//!
//! ```text
//! Worksheet
//! ├── version: schema version of the file
//! ├── title
//! └── items: Vec<CalculationItem> (evaluation order)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::{CalculationItem, SampleBox};
//! use metprep_core::worksheet::Worksheet;
//!
//! let mut sheet = Worksheet::new("Batch 17");
//! sheet.add_item(CalculationItem::MoldCompatibility(SampleBox {
//!     label: "Coupon A".to_string(),
//!     length_mm: 20.0,
//!     width_mm: 15.0,
//!     height_mm: 10.0,
//! }));
//!
//! let report = sheet.evaluate();
//! assert_eq!(report.failed(), 0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculations::{run, CalculationItem, CalculationOutput};
use crate::errors::CalcError;
use crate::format::ResultLine;
use crate::settings::Settings;

/// Current schema version for worksheet files
pub const SCHEMA_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Worksheet {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default)]
    pub title: String,

    pub items: Vec<CalculationItem>,
}

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

impl Worksheet {
    pub fn new(title: impl Into<String>) -> Self {
        Worksheet {
            version: default_version(),
            title: title.into(),
            items: Vec::new(),
        }
    }

    /// Append an item; returns its index
    pub fn add_item(&mut self, item: CalculationItem) -> usize {
        self.items.push(item);
        self.items.len() - 1
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Fill values the items left out from user settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        for item in &mut self.items {
            if let CalculationItem::GrainSize(input) = item {
                if input.magnification.map_or(true, |m| m == 0.0) {
                    input.magnification = Some(settings.default_magnification);
                }
            }
        }
    }

    /// Run every item in order
    pub fn evaluate(&self) -> WorksheetReport {
        let entries: Vec<ReportEntry> = self
            .items
            .iter()
            .map(|item| ReportEntry {
                label: item.label().to_string(),
                calc_type: item.calc_type().to_string(),
                outcome: run(item).into(),
            })
            .collect();
        let report = WorksheetReport {
            title: self.title.clone(),
            entries,
        };
        info!(
            title = self.title.as_str(),
            items = report.entries.len(),
            failed = report.failed(),
            "worksheet evaluated"
        );
        report
    }
}

impl Default for Worksheet {
    fn default() -> Self {
        Worksheet::new("")
    }
}

/// Success or failure of one worksheet item
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "result", rename_all = "lowercase")]
pub enum Outcome {
    Ok(CalculationOutput),
    Error(CalcError),
}

impl From<Result<CalculationOutput, CalcError>> for Outcome {
    fn from(result: Result<CalculationOutput, CalcError>) -> Self {
        match result {
            Ok(output) => Outcome::Ok(output),
            Err(e) => Outcome::Error(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub calc_type: String,
    pub outcome: Outcome,
}

impl ReportEntry {
    /// Display lines, or the single `Error` line on failure
    pub fn lines(&self) -> Vec<ResultLine> {
        match &self.outcome {
            Outcome::Ok(output) => output.lines(),
            Outcome::Error(e) => vec![e.to_result_line()],
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, Outcome::Ok(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorksheetReport {
    pub title: String,
    pub entries: Vec<ReportEntry>,
}

impl WorksheetReport {
    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| !e.is_ok()).count()
    }
}
