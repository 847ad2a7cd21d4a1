//! # Mold Compatibility
//!
//! Checks a rectangular sample against the four standard mounting molds.
//!
//! The sample's footprint diagonal must clear the mold diameter and its
//! height must clear the mold height, each by 4 mm (2 mm per side) so the
//! mounting material can flow around the edges.
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::mold_compatibility::{calculate, SampleBox};
//! use metprep_core::materials::MoldSize;
//!
//! let sample = SampleBox { label: String::new(), length_mm: 20.0, width_mm: 15.0, height_mm: 10.0 };
//! let result = calculate(&sample).unwrap();
//!
//! assert_eq!(result.recommended, Some(MoldSize::OneAndQuarterInch));
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::{to_fixed, ResultLine};
use crate::materials::MoldSize;

/// Total clearance required across a dimension (2 mm each side)
pub const REQUIRED_CLEARANCE_MM: f64 = 4.0;

/// Shown when no standard mold fits
pub const OVERSIZE_SUGGESTIONS: [&str; 3] = [
    "Using a larger custom mold",
    "Sectioning the sample to a smaller size",
    "Using castable mounting with a custom mold",
];

/// Sample bounding box.
///
/// ## JSON Example
///
/// ```json
/// { "label": "Weld coupon", "length_mm": 20.0, "width_mm": 15.0, "height_mm": 10.0 }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SampleBox {
    #[serde(default)]
    pub label: String,
    pub length_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

impl SampleBox {
    pub fn validate(&self) -> CalcResult<()> {
        for (field, value) in [
            ("length_mm", self.length_mm),
            ("width_mm", self.width_mm),
            ("height_mm", self.height_mm),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CalcError::invalid_input(
                    field,
                    value.to_string(),
                    "Sample dimensions must be greater than 0",
                ));
            }
        }
        Ok(())
    }

    /// Footprint diagonal sqrt(l² + w²)
    pub fn diagonal_mm(&self) -> f64 {
        (self.length_mm * self.length_mm + self.width_mm * self.width_mm).sqrt()
    }
}

/// Fit of the sample in one mold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldFit {
    pub size: MoldSize,
    pub diameter_clearance_mm: f64,
    pub height_clearance_mm: f64,
    /// The smaller of the two clearances
    pub clearance_mm: f64,
    pub fits: bool,
}

/// Results from the mold check.
///
/// ## JSON Example
///
/// ```json
/// {
///   "diagonal_mm": 25.0,
///   "height_mm": 10.0,
///   "fits": [
///     { "size": "1", "diameter_clearance_mm": -3.6, "height_clearance_mm": 5.05, "clearance_mm": -3.6, "fits": false }
///   ],
///   "recommended": "1.25"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoldCompatibilityResult {
    pub diagonal_mm: f64,
    pub height_mm: f64,
    /// One entry per standard mold, smallest first
    pub fits: Vec<MoldFit>,
    /// Smallest mold that fits, if any
    pub recommended: Option<MoldSize>,
}

impl MoldCompatibilityResult {
    pub fn recommended_fit(&self) -> Option<&MoldFit> {
        let size = self.recommended?;
        self.fits.iter().find(|f| f.size == size)
    }

    /// Remediation suggestions; empty when a standard mold fits
    pub fn suggestions(&self) -> &'static [&'static str] {
        if self.recommended.is_some() {
            &[]
        } else {
            &OVERSIZE_SUGGESTIONS
        }
    }

    pub fn lines(&self) -> Vec<ResultLine> {
        let mut lines = Vec::with_capacity(self.fits.len() + 4);
        match self.recommended_fit() {
            Some(fit) => {
                lines.push(ResultLine::new("Recommended Mold Size", fit.size.spec().label));
                lines.push(ResultLine::new(
                    "Minimum clearance",
                    format!("{} mm", to_fixed(fit.clearance_mm, 1)),
                ));
            }
            None => {
                lines.push(ResultLine::new(
                    "Sample Too Large",
                    format!(
                        "diagonal: {} mm, height: {} mm",
                        to_fixed(self.diagonal_mm, 1),
                        to_fixed(self.height_mm, 1)
                    ),
                ));
                for suggestion in OVERSIZE_SUGGESTIONS {
                    lines.push(ResultLine::new("Consider", suggestion));
                }
            }
        }
        for fit in &self.fits {
            let value = if fit.fits {
                format!("✓ Fits (clearance {} mm)", to_fixed(fit.clearance_mm, 1))
            } else {
                "✗ Too Small".to_string()
            };
            lines.push(ResultLine::new(fit.size.spec().label, value));
        }
        lines
    }
}

/// Check the sample against every standard mold.
///
/// # Errors
///
/// "Sample dimensions must be greater than 0" for any non-positive or
/// non-finite dimension.
pub fn calculate(sample: &SampleBox) -> CalcResult<MoldCompatibilityResult> {
    sample.validate()?;

    let diagonal = sample.diagonal_mm();
    let fits: Vec<MoldFit> = MoldSize::ALL
        .into_iter()
        .map(|size| {
            let spec = size.spec();
            let diameter_clearance_mm = spec.diameter_mm - diagonal - REQUIRED_CLEARANCE_MM;
            let height_clearance_mm = spec.height_mm - sample.height_mm - REQUIRED_CLEARANCE_MM;
            MoldFit {
                size,
                diameter_clearance_mm,
                height_clearance_mm,
                clearance_mm: diameter_clearance_mm.min(height_clearance_mm),
                fits: diameter_clearance_mm >= 0.0 && height_clearance_mm >= 0.0,
            }
        })
        .collect();
    let recommended = fits.iter().find(|f| f.fits).map(|f| f.size);
    debug!(diagonal, ?recommended, "mold compatibility");

    Ok(MoldCompatibilityResult {
        diagonal_mm: diagonal,
        height_mm: sample.height_mm,
        fits,
        recommended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample(l: f64, w: f64, h: f64) -> SampleBox {
        SampleBox {
            label: String::new(),
            length_mm: l,
            width_mm: w,
            height_mm: h,
        }
    }

    #[test]
    fn test_three_four_five_sample() {
        let r = calculate(&sample(20.0, 15.0, 10.0)).unwrap();
        assert_relative_eq!(r.diagonal_mm, 25.0);

        let one = &r.fits[0];
        assert!(!one.fits);
        assert_relative_eq!(one.diameter_clearance_mm, -3.6, epsilon = 1e-9);
        assert_relative_eq!(one.height_clearance_mm, 5.05, epsilon = 1e-9);
        assert_relative_eq!(one.clearance_mm, -3.6, epsilon = 1e-9);

        let quarter = &r.fits[1];
        assert!(quarter.fits);
        assert_relative_eq!(quarter.clearance_mm, 2.75, epsilon = 1e-9);

        assert_eq!(r.recommended, Some(MoldSize::OneAndQuarterInch));
        assert!(r.suggestions().is_empty());
    }

    #[test]
    fn test_lines_for_recommendation() {
        let r = calculate(&sample(20.0, 15.0, 10.0)).unwrap();
        let lines = r.lines();
        assert_eq!(lines[0].value, "1.25 inch (31.75 mm)");
        assert_eq!(lines[1].value, "2.8 mm");
        assert_eq!(lines[2].value, "✗ Too Small");
        assert_eq!(lines[3].value, "✓ Fits (clearance 2.8 mm)");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_tall_sample_fits_nothing() {
        // 15.05 mm is the tallest sample any standard mold accepts
        let r = calculate(&sample(10.0, 10.0, 15.1)).unwrap();
        assert!(r.fits.iter().all(|f| !f.fits));
        assert_eq!(r.recommended, None);
        assert_eq!(r.suggestions().len(), 3);
        let lines = r.lines();
        assert_eq!(lines[0].label, "Sample Too Large");
        assert_eq!(lines[0].value, "diagonal: 14.1 mm, height: 15.1 mm");
    }

    #[test]
    fn test_invalid_dimensions() {
        for s in [sample(0.0, 1.0, 1.0), sample(1.0, -1.0, 1.0), sample(1.0, 1.0, f64::NAN)] {
            let err = calculate(&s).unwrap_err();
            assert_eq!(err.user_message(), "Sample dimensions must be greater than 0");
        }
    }

    #[test]
    fn test_recommended_is_smallest_fit() {
        let r = calculate(&sample(25.0, 20.0, 5.0)).unwrap();
        let first_fit = r.fits.iter().position(|f| f.fits);
        assert_eq!(first_fit, Some(2));
        assert_eq!(r.recommended, Some(MoldSize::OneAndHalfInch));
    }
}
