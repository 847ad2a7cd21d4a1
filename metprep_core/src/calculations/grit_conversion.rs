//! # Grit Size Conversion
//!
//! Looks up the FEPA, ANSI and JIS designations and the median particle
//! size of a grinding abrasive from any one of them.
//!
//! - FEPA: exact match, `P` prefix optional, case-insensitive ("p120" = "P120")
//! - ANSI / JIS: exact match on the number
//! - Micron: the first (coarsest) row within 5% of the value
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::grit_conversion::convert;
//! use metprep_core::materials::GritScale;
//!
//! let row = convert(GritScale::Fepa, "120").unwrap();
//! assert_eq!(row.ansi, "150");
//! assert_eq!(row.micron, "125");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::ResultLine;
use crate::materials::abrasives::GRIT_CONVERSIONS;
use crate::materials::{GritConversion, GritScale};

/// Relative tolerance for a micron lookup
pub const MICRON_TOLERANCE: f64 = 0.05;

/// Input for a grit lookup.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Belt grinder", "scale": "fepa", "value": "P240" }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GritInput {
    #[serde(default)]
    pub label: String,
    pub scale: GritScale,
    pub value: String,
}

/// Find the conversion row for `value` on `scale`
pub fn convert(scale: GritScale, value: &str) -> Option<&'static GritConversion> {
    let raw = value.trim();
    let value = raw.to_uppercase();
    if value.is_empty() {
        return None;
    }

    let found = match scale {
        GritScale::Fepa => {
            let key = if value.starts_with('P') {
                value.clone()
            } else {
                format!("P{value}")
            };
            GRIT_CONVERSIONS.iter().find(|c| c.fepa == key)
        }
        GritScale::Ansi => GRIT_CONVERSIONS.iter().find(|c| c.ansi == value),
        GritScale::Jis => GRIT_CONVERSIONS.iter().find(|c| c.jis == value),
        GritScale::Micron => {
            let microns: f64 = raw
                .trim_end_matches("μm")
                .trim_end_matches("um")
                .trim()
                .parse()
                .ok()?;
            GRIT_CONVERSIONS.iter().find(|c| {
                let m = c.micron_value();
                (m - microns).abs() / m < MICRON_TOLERANCE
            })
        }
    };
    debug!(?scale, value = value.as_str(), found = found.is_some(), "grit lookup");
    found
}

/// Display lines: either the four designations, or "Not found" for each
pub fn lines(row: Option<&GritConversion>) -> Vec<ResultLine> {
    match row {
        Some(c) => vec![
            ResultLine::new("FEPA", c.fepa),
            ResultLine::new("ANSI", c.ansi),
            ResultLine::new("JIS", c.jis),
            ResultLine::new("Micron", format!("{} μm", c.micron)),
        ],
        None => ["FEPA", "ANSI", "JIS", "Micron"]
            .into_iter()
            .map(|label| ResultLine::new(label, "Not found"))
            .collect(),
    }
}

/// Lookup that reports a missing value as a `NotFound` error
pub fn calculate(input: &GritInput) -> CalcResult<GritConversion> {
    convert(input.scale, &input.value)
        .copied()
        .ok_or_else(|| CalcError::not_found("grit conversions", input.value.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fepa_prefix_optional() {
        let a = convert(GritScale::Fepa, "P240").unwrap();
        let b = convert(GritScale::Fepa, "240").unwrap();
        let c = convert(GritScale::Fepa, " p240 ").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
        assert_eq!(a.ansi, "280");
        assert_eq!(a.micron, "58.5");
    }

    #[test]
    fn test_ansi_and_jis() {
        assert_eq!(convert(GritScale::Ansi, "600").unwrap().fepa, "P500");
        assert_eq!(convert(GritScale::Jis, "1500").unwrap().fepa, "P1200");
        assert!(convert(GritScale::Ansi, "P600").is_none());
    }

    #[test]
    fn test_micron_tolerance() {
        // 35.0 row: 36 is within 5%, 37 is not (and 40.5 is 9% away)
        assert_eq!(convert(GritScale::Micron, "36").unwrap().fepa, "P400");
        assert!(convert(GritScale::Micron, "37").is_none());
        assert_eq!(convert(GritScale::Micron, "125").unwrap().fepa, "P120");
        assert!(convert(GritScale::Micron, "fine").is_none());
        assert_eq!(convert(GritScale::Micron, "8.4 μm").unwrap().fepa, "P2500");
    }

    #[test]
    fn test_not_found_lines() {
        assert!(convert(GritScale::Fepa, "P9999").is_none());
        assert!(convert(GritScale::Fepa, "").is_none());
        let lines = lines(None);
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.value == "Not found"));
    }

    #[test]
    fn test_found_lines() {
        let lines = lines(convert(GritScale::Fepa, "P2500"));
        assert_eq!(lines[3].value, "8.4 μm");
    }

    #[test]
    fn test_calculate_not_found() {
        let input = GritInput {
            label: String::new(),
            scale: GritScale::Jis,
            value: "17".to_string(),
        };
        assert_eq!(calculate(&input).unwrap_err().error_code(), "NOT_FOUND");
    }
}
