//! Standard Mounting Molds
//!
//! Cylindrical compression/castable mold sizes. All four standard molds
//! share a 19.05 mm (3/4") cavity height.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Standard mold size designation (nominal diameter in inches)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MoldSize {
    #[serde(rename = "1")]
    OneInch,
    #[serde(rename = "1.25")]
    OneAndQuarterInch,
    #[serde(rename = "1.5")]
    OneAndHalfInch,
    #[serde(rename = "2")]
    TwoInch,
}

impl MoldSize {
    /// Smallest to largest; the recommendation order
    pub const ALL: [MoldSize; 4] = [
        MoldSize::OneInch,
        MoldSize::OneAndQuarterInch,
        MoldSize::OneAndHalfInch,
        MoldSize::TwoInch,
    ];

    /// Identifier used in inputs and outputs ("1.25")
    pub fn id(&self) -> &'static str {
        match self {
            MoldSize::OneInch => "1",
            MoldSize::OneAndQuarterInch => "1.25",
            MoldSize::OneAndHalfInch => "1.5",
            MoldSize::TwoInch => "2",
        }
    }

    pub fn spec(&self) -> MoldSpec {
        match self {
            MoldSize::OneInch => MoldSpec::new(25.4, 19.05, "1 inch (25.4 mm)"),
            MoldSize::OneAndQuarterInch => MoldSpec::new(31.75, 19.05, "1.25 inch (31.75 mm)"),
            MoldSize::OneAndHalfInch => MoldSpec::new(38.1, 19.05, "1.5 inch (38.1 mm)"),
            MoldSize::TwoInch => MoldSpec::new(50.8, 19.05, "2 inch (50.8 mm)"),
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let code = s.trim().trim_end_matches('"').trim_end_matches("in").trim();
        MoldSize::ALL
            .into_iter()
            .find(|size| size.id() == code)
            .ok_or_else(|| CalcError::not_found("standard molds", s))
    }
}

impl std::fmt::Display for MoldSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec().label)
    }
}

/// Cavity dimensions of a mold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MoldSpec {
    pub diameter_mm: f64,
    pub height_mm: f64,
    pub label: &'static str,
}

impl MoldSpec {
    const fn new(diameter_mm: f64, height_mm: f64, label: &'static str) -> Self {
        MoldSpec {
            diameter_mm,
            height_mm,
            label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Inches, Millimeters};

    #[test]
    fn test_diameters_match_nominal_inches() {
        for (size, inches) in MoldSize::ALL.into_iter().zip([1.0, 1.25, 1.5, 2.0]) {
            let mm: Millimeters = Inches(inches).into();
            assert!((size.spec().diameter_mm - mm.0).abs() < 1e-9, "{size:?}");
            assert_eq!(size.spec().height_mm, 19.05);
        }
    }

    #[test]
    fn test_parse() {
        assert_eq!(MoldSize::from_str_flexible("1.25").unwrap(), MoldSize::OneAndQuarterInch);
        assert_eq!(MoldSize::from_str_flexible("2in").unwrap(), MoldSize::TwoInch);
        assert!(MoldSize::from_str_flexible("3").is_err());
    }

    #[test]
    fn test_serialization() {
        assert_eq!(serde_json::to_string(&MoldSize::OneAndHalfInch).unwrap(), "\"1.5\"");
    }
}
