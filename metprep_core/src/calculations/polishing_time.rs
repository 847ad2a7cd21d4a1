//! # Polishing Time
//!
//! Per-step polishing recommendation for a material class and abrasive
//! size: time window, cloth, pressure and handling notes.
//!
//! The lookup is exact. A pair that is not in the table (soft material at
//! 9 μm) has no recommendation; no nearest entry is substituted.
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::polishing_time::lookup;
//! use metprep_core::materials::{AbrasiveSize, MaterialClass};
//!
//! let rec = lookup(MaterialClass::Hard, AbrasiveSize::Micron1).unwrap();
//! assert_eq!(rec.cloth_type, "GOLD PAD or ATLANTIS");
//! assert!(lookup(MaterialClass::Soft, AbrasiveSize::Micron9).is_none());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::{format_minutes_long, plain_number, ResultLine};
use crate::materials::polishing_data::{PolishingEntry, POLISHING_TABLE};
use crate::materials::{AbrasiveSize, MaterialClass};
use crate::units::TimeRange;

/// Input for a polishing step lookup.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Step 4", "material": "hard", "grit": "1" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolishingInput {
    #[serde(default)]
    pub label: String,
    pub material: MaterialClass,
    pub grit: AbrasiveSize,
}

/// Recommendation for a single polishing step.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "hard",
///   "grit": "1",
///   "time_range": { "min": 2.0, "max": 4.0 },
///   "cloth_type": "GOLD PAD or ATLANTIS",
///   "pressure": "Moderate (4-7 lbs)",
///   "notes": ["Fine diamond polishing stage", "Monitor for relief around inclusions"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolishingRecommendation {
    pub material: MaterialClass,
    pub grit: AbrasiveSize,
    /// Minutes per step
    pub time_range: TimeRange,
    pub cloth_type: String,
    pub pressure: String,
    pub notes: Vec<String>,
}

impl From<&PolishingEntry> for PolishingRecommendation {
    fn from(entry: &PolishingEntry) -> Self {
        PolishingRecommendation {
            material: entry.class,
            grit: entry.grit,
            time_range: entry.time,
            cloth_type: entry.cloth_type.to_string(),
            pressure: entry.pressure.to_string(),
            notes: entry.notes.iter().map(|n| n.to_string()).collect(),
        }
    }
}

impl PolishingRecommendation {
    /// "2 minutes - 4 minutes"
    pub fn time_text(&self) -> String {
        format!(
            "{} - {}",
            format_minutes_long(self.time_range.min),
            format_minutes_long(self.time_range.max)
        )
    }

    pub fn lines(&self) -> Vec<ResultLine> {
        let mut lines = vec![
            ResultLine::new("Material Type", self.material.display_name()),
            ResultLine::new("Grit/Abrasive Size", self.grit.label()),
            ResultLine::new("Polishing Time (for this step)", self.time_text()),
            ResultLine::new(
                "Minutes per step",
                format!(
                    "{} - {} minutes",
                    plain_number(self.time_range.min),
                    plain_number(self.time_range.max)
                ),
            ),
            ResultLine::new("Cloth Type", self.cloth_type.as_str()),
            ResultLine::new("Pressure", self.pressure.as_str()),
        ];
        lines.extend(self.notes.iter().map(|n| ResultLine::new("Note", n.as_str())));
        lines
    }
}

/// Exact table lookup
pub fn lookup(material: MaterialClass, grit: AbrasiveSize) -> Option<PolishingRecommendation> {
    let found = POLISHING_TABLE
        .iter()
        .find(|e| e.class == material && e.grit == grit)
        .map(PolishingRecommendation::from);
    debug!(material = material.code(), grit = grit.code(), found = found.is_some(), "polishing lookup");
    found
}

/// Lookup that reports a missing pair as a `NotFound` error
pub fn calculate(input: &PolishingInput) -> CalcResult<PolishingRecommendation> {
    lookup(input.material, input.grit).ok_or_else(|| {
        CalcError::not_found(
            "polishing recommendations",
            format!("{}/{}", input.material.code(), input.grit.code()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_one_micron() {
        let rec = lookup(MaterialClass::Hard, AbrasiveSize::Micron1).unwrap();
        assert_eq!(rec.time_range, TimeRange::new(2.0, 4.0));
        assert_eq!(rec.cloth_type, "GOLD PAD or ATLANTIS");
        assert_eq!(rec.pressure, "Moderate (4-7 lbs)");
        assert_eq!(rec.notes.len(), 2);
    }

    #[test]
    fn test_soft_nine_micron_missing() {
        assert!(lookup(MaterialClass::Soft, AbrasiveSize::Micron9).is_none());
        let input = PolishingInput {
            label: String::new(),
            material: MaterialClass::Soft,
            grit: AbrasiveSize::Micron9,
        };
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "NOT_FOUND");
        assert_eq!(err.user_message(), "Not found");
    }

    #[test]
    fn test_every_other_pair_present() {
        for class in MaterialClass::ALL {
            for grit in AbrasiveSize::ALL {
                let expected = !(class == MaterialClass::Soft && grit == AbrasiveSize::Micron9);
                assert_eq!(lookup(class, grit).is_some(), expected, "{class:?} {grit:?}");
            }
        }
    }

    #[test]
    fn test_time_text() {
        let rec = lookup(MaterialClass::Soft, AbrasiveSize::FinalOxide).unwrap();
        assert_eq!(rec.time_text(), "30 seconds - 1 minute");
        let rec = lookup(MaterialClass::Soft, AbrasiveSize::QuarterMicron).unwrap();
        assert_eq!(rec.time_text(), "1 minute - 1 min 30 sec");
    }

    #[test]
    fn test_lines() {
        let rec = lookup(MaterialClass::Hard, AbrasiveSize::Micron1).unwrap();
        let lines = rec.lines();
        assert_eq!(lines[0].value, "Hard Materials");
        assert_eq!(lines[1].value, "1 μm (Very Fine Diamond)");
        assert_eq!(lines[2].value, "2 minutes - 4 minutes");
        assert_eq!(lines[3].value, "2 - 4 minutes");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn test_input_json() {
        let input: PolishingInput =
            serde_json::from_str(r#"{ "material": "multi-phase", "grit": "0.25" }"#).unwrap();
        let rec = calculate(&input).unwrap();
        assert_eq!(rec.time_range, TimeRange::new(1.0, 1.5));
    }
}
