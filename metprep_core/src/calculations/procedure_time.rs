//! # Procedure Time Estimate
//!
//! Estimates the hands-on time of a complete preparation run: SiC grinding
//! from a chosen start grit, the diamond/oxide polishing sequence for the
//! material class, and optional mounting, etching and cleaning blocks.
//!
//! ## Time Model
//!
//! - Each grinding step takes 30-60 min. 800 and 1200 grit are skipped
//!   unless optional grinding is requested.
//! - Polishing steps use the per-class sequence in
//!   [`procedure_sequence`](crate::materials::polishing_data::procedure_sequence).
//! - Optional blocks add a single point estimate to both total bounds, while
//!   the breakdown shows their typical spread:
//!
//! | Block | Added | Shown |
//! |---|---|---|
//! | Mounting (compression) | 10 min | 5-15 min |
//! | Etching | 2 min | 1-3 min |
//! | Cleaning (between steps) | 5 min | 3-7 min |
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::procedure_time::{estimate, ProcedureSelection};
//! use metprep_core::materials::{GrindingGrit, MaterialClass};
//!
//! let selection = ProcedureSelection {
//!     label: String::new(),
//!     material: MaterialClass::Hard,
//!     start_grit: GrindingGrit::Grit240,
//!     include_optional_grinding: false,
//!     include_mounting: false,
//!     include_etching: false,
//!     include_cleaning: true,
//! };
//!
//! let est = estimate(&selection);
//! assert_eq!((est.total.min, est.total.max), (141.0, 272.0));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::CalcResult;
use crate::format::{format_range_short, plain_number, to_fixed, ResultLine};
use crate::materials::polishing_data::procedure_sequence;
use crate::materials::{GrindingGrit, MaterialClass};
use crate::units::TimeRange;

/// Minutes per grinding step
pub const GRINDING_STEP_TIME: TimeRange = TimeRange::new(30.0, 60.0);

/// An optional block: the minutes it adds and the spread it displays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionalBlock {
    pub kind: StepKind,
    pub step: &'static str,
    pub summary_label: &'static str,
    pub added_minutes: f64,
    pub shown: TimeRange,
    pub shown_text: &'static str,
}

pub const MOUNTING: OptionalBlock = OptionalBlock {
    kind: StepKind::Mounting,
    step: "Mounting (compression)",
    summary_label: "Mounting",
    added_minutes: 10.0,
    shown: TimeRange::new(5.0, 15.0),
    shown_text: "5-15 min",
};

pub const ETCHING: OptionalBlock = OptionalBlock {
    kind: StepKind::Etching,
    step: "Etching",
    summary_label: "Etching",
    added_minutes: 2.0,
    shown: TimeRange::new(1.0, 3.0),
    shown_text: "1-3 min",
};

pub const CLEANING: OptionalBlock = OptionalBlock {
    kind: StepKind::Cleaning,
    step: "Cleaning (between steps)",
    summary_label: "Cleaning",
    added_minutes: 5.0,
    shown: TimeRange::new(3.0, 7.0),
    shown_text: "3-7 min",
};

/// Procedure options.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Duplex weld",
///   "material": "multi-phase",
///   "start_grit": "240",
///   "include_optional_grinding": true,
///   "include_mounting": true,
///   "include_etching": true,
///   "include_cleaning": true
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcedureSelection {
    #[serde(default)]
    pub label: String,
    pub material: MaterialClass,
    pub start_grit: GrindingGrit,
    #[serde(default)]
    pub include_optional_grinding: bool,
    #[serde(default)]
    pub include_mounting: bool,
    #[serde(default)]
    pub include_etching: bool,
    #[serde(default)]
    pub include_cleaning: bool,
}

impl ProcedureSelection {
    /// Grinding grits that will run, in order
    pub fn grinding_steps(&self) -> Vec<GrindingGrit> {
        GrindingGrit::SEQUENCE
            .into_iter()
            .skip_while(|g| *g != self.start_grit)
            .filter(|g| !g.is_optional() || self.include_optional_grinding)
            .collect()
    }

    fn optional_blocks(&self) -> impl Iterator<Item = OptionalBlock> + '_ {
        [
            (self.include_mounting, MOUNTING),
            (self.include_etching, ETCHING),
            (self.include_cleaning, CLEANING),
        ]
        .into_iter()
        .filter_map(|(on, block)| on.then_some(block))
    }
}

/// What a breakdown entry is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Grinding,
    Polishing,
    Mounting,
    Etching,
    Cleaning,
}

/// One row of the step-by-step breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownStep {
    pub kind: StepKind,
    /// "Grinding 240 grit", "Polishing 0.05 μm", "Etching"
    pub step: String,
    /// Displayed window in minutes
    pub time: TimeRange,
    /// Displayed window as text ("30 min - 60 min", "5-15 min")
    pub time_text: String,
}

impl BreakdownStep {
    fn ranged(kind: StepKind, step: String, time: TimeRange) -> Self {
        BreakdownStep {
            kind,
            step,
            time,
            time_text: format_range_short(time.min, time.max),
        }
    }

    fn optional(block: OptionalBlock) -> Self {
        BreakdownStep {
            kind: block.kind,
            step: block.step.to_string(),
            time: block.shown,
            time_text: block.shown_text.to_string(),
        }
    }
}

/// Results from the procedure estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "hard",
///   "total": { "min": 141.0, "max": 272.0 },
///   "grinding": { "min": 120.0, "max": 240.0 },
///   "polishing": { "min": 16.0, "max": 27.0 },
///   "cleaning_min": 5.0,
///   "breakdown": [
///     { "kind": "grinding", "step": "Grinding 240 grit", "time": { "min": 30.0, "max": 60.0 }, "time_text": "30 min - 60 min" }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureEstimate {
    pub material: MaterialClass,
    pub total: TimeRange,
    pub grinding: TimeRange,
    pub polishing: TimeRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mounting_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etching_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleaning_min: Option<f64>,
    /// Execution order: grinding, polishing, mounting, etching, cleaning
    pub breakdown: Vec<BreakdownStep>,
}

impl ProcedureEstimate {
    pub fn lines(&self) -> Vec<ResultLine> {
        let mut lines = vec![
            ResultLine::new(
                "Total Estimated Time",
                format_range_short(self.total.min, self.total.max),
            ),
            ResultLine::new(
                "Total minutes",
                format!("{} - {} minutes", to_fixed(self.total.min, 1), to_fixed(self.total.max, 1)),
            ),
            ResultLine::new(
                "Grinding",
                format_range_short(self.grinding.min, self.grinding.max),
            ),
            ResultLine::new(
                "Polishing",
                format_range_short(self.polishing.min, self.polishing.max),
            ),
        ];
        for (block, minutes) in [
            (MOUNTING, self.mounting_min),
            (ETCHING, self.etching_min),
            (CLEANING, self.cleaning_min),
        ] {
            if let Some(m) = minutes {
                lines.push(ResultLine::new(block.summary_label, format!("~{} min", plain_number(m))));
            }
        }
        lines.extend(
            self.breakdown
                .iter()
                .map(|b| ResultLine::new(b.step.as_str(), b.time_text.as_str())),
        );
        lines
    }
}

/// Estimate total preparation time. Every selection is valid.
pub fn estimate(selection: &ProcedureSelection) -> ProcedureEstimate {
    let mut breakdown = Vec::new();

    // === Grinding ===
    let grits = selection.grinding_steps();
    let grinding: TimeRange = grits.iter().map(|_| GRINDING_STEP_TIME).sum();
    breakdown.extend(grits.iter().map(|g| {
        BreakdownStep::ranged(
            StepKind::Grinding,
            format!("Grinding {} grit", g.code()),
            GRINDING_STEP_TIME,
        )
    }));

    // === Polishing ===
    let sequence = procedure_sequence(selection.material);
    let polishing: TimeRange = sequence.iter().map(|(_, t)| *t).sum();
    breakdown.extend(sequence.iter().map(|(grit, t)| {
        BreakdownStep::ranged(StepKind::Polishing, format!("Polishing {} μm", grit.code()), *t)
    }));

    // === Optional blocks ===
    let mut extra = 0.0;
    for block in selection.optional_blocks() {
        extra += block.added_minutes;
        breakdown.push(BreakdownStep::optional(block));
    }

    let total = grinding + polishing + TimeRange::point(extra);
    debug!(
        material = selection.material.code(),
        grinding_steps = grits.len(),
        total_min = total.min,
        total_max = total.max,
        "procedure estimate"
    );

    ProcedureEstimate {
        material: selection.material,
        total,
        grinding,
        polishing,
        mounting_min: selection.include_mounting.then_some(MOUNTING.added_minutes),
        etching_min: selection.include_etching.then_some(ETCHING.added_minutes),
        cleaning_min: selection.include_cleaning.then_some(CLEANING.added_minutes),
        breakdown,
    }
}

/// [`estimate`] in the common calculator signature
pub fn calculate(selection: &ProcedureSelection) -> CalcResult<ProcedureEstimate> {
    Ok(estimate(selection))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(material: MaterialClass, start: GrindingGrit) -> ProcedureSelection {
        ProcedureSelection {
            label: String::new(),
            material,
            start_grit: start,
            include_optional_grinding: false,
            include_mounting: false,
            include_etching: false,
            include_cleaning: false,
        }
    }

    #[test]
    fn test_hard_240_with_cleaning() {
        let sel = ProcedureSelection {
            include_cleaning: true,
            ..selection(MaterialClass::Hard, GrindingGrit::Grit240)
        };
        let est = estimate(&sel);
        assert_eq!(est.grinding, TimeRange::new(120.0, 240.0));
        assert_eq!(est.polishing, TimeRange::new(16.0, 27.0));
        assert_eq!(est.total, TimeRange::new(141.0, 272.0));
        assert_eq!(est.cleaning_min, Some(5.0));
        assert_eq!(est.mounting_min, None);

        // 4 grinding + 7 polishing + cleaning
        assert_eq!(est.breakdown.len(), 12);
        assert_eq!(est.breakdown[0].step, "Grinding 240 grit");
        assert_eq!(est.breakdown[0].time_text, "30 min - 60 min");
        assert_eq!(est.breakdown[11].step, "Cleaning (between steps)");
        assert_eq!(est.breakdown[11].time_text, "3-7 min");
    }

    #[test]
    fn test_optional_grinding() {
        let mut sel = selection(MaterialClass::Soft, GrindingGrit::Grit120);
        assert_eq!(sel.grinding_steps().len(), 5);
        sel.include_optional_grinding = true;
        assert_eq!(sel.grinding_steps().len(), 7);
        assert_eq!(estimate(&sel).grinding, TimeRange::new(210.0, 420.0));
    }

    #[test]
    fn test_optional_start_grit_without_optional_grinding() {
        let sel = selection(MaterialClass::Hard, GrindingGrit::Grit800);
        let est = estimate(&sel);
        assert!(sel.grinding_steps().is_empty());
        assert_eq!(est.grinding, TimeRange::new(0.0, 0.0));
        assert_eq!(est.breakdown[0].kind, StepKind::Polishing);
    }

    #[test]
    fn test_soft_sequence_short_format() {
        let est = estimate(&selection(MaterialClass::Soft, GrindingGrit::Grit600));
        assert_eq!(est.polishing, TimeRange::new(7.5, 13.5));
        let steps: Vec<_> = est.breakdown.iter().map(|b| b.step.as_str()).collect();
        assert_eq!(steps[1], "Polishing 6 μm");
        let last = est.breakdown.last().unwrap();
        assert_eq!(last.step, "Polishing 0.05 μm");
        assert_eq!(last.time_text, "30 sec - 1 min");
        assert_eq!(est.breakdown[5].time_text, "1 min - 1m 30s");
    }

    #[test]
    fn test_point_estimates_not_ranges() {
        let sel = ProcedureSelection {
            include_mounting: true,
            include_etching: true,
            include_cleaning: true,
            ..selection(MaterialClass::MultiPhase, GrindingGrit::Grit600)
        };
        let est = estimate(&sel);
        // 30-60 grinding + 11-19.5 polishing + 17 point
        assert_eq!(est.total, TimeRange::new(58.0, 96.5));
        let tail: Vec<_> = est.breakdown.iter().rev().take(3).map(|b| b.time_text.as_str()).collect();
        assert_eq!(tail, vec!["3-7 min", "1-3 min", "5-15 min"]);

        let lines = est.lines();
        let summary: Vec<_> = lines[4..7].iter().map(|l| l.value.as_str()).collect();
        assert_eq!(summary, vec!["~10 min", "~2 min", "~5 min"]);
    }

    #[test]
    fn test_lines() {
        let sel = ProcedureSelection {
            include_cleaning: true,
            ..selection(MaterialClass::Hard, GrindingGrit::Grit240)
        };
        let lines = estimate(&sel).lines();
        assert_eq!(lines[0].value, "141 min - 272 min");
        assert_eq!(lines[1].value, "141.0 - 272.0 minutes");
        assert_eq!(lines[4].label, "Cleaning");
        assert_eq!(lines[4].value, "~5 min");
    }
}
