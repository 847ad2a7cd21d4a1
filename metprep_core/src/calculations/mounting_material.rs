//! # Mounting Material
//!
//! Resin quantity needed to fill a cylindrical mold around a sample.
//!
//! ```text
//! V_mold     = π (D/2)² H
//! V_sample   = l·w·h            (all three > 0)
//!            = 0.05 · V_mold    (otherwise)
//! V_material = (V_mold - V_sample) · margin
//! ```
//!
//! The margin is 1.10 for compression pellets and 1.15 for castable
//! resin, which also shrinks while curing. Mass assumes 1 g/cm³.
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::mounting_material::{calculate, MoldChoice, MountingInput, MountingType};
//! use metprep_core::materials::MoldSize;
//!
//! let input = MountingInput {
//!     label: String::new(),
//!     mounting_type: MountingType::Compression,
//!     mold: MoldChoice::Standard(MoldSize::OneInch),
//!     sample: None,
//! };
//! let result = calculate(&input).unwrap();
//! assert!((result.material_cm3 - 10.087).abs() < 1e-3);
//! ```

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::mold_compatibility::SampleBox;
use crate::errors::{CalcError, CalcResult};
use crate::format::{to_fixed, ResultLine};
use crate::materials::MoldSize;
use crate::units::{CubicCm, CubicMm, FlOz};

/// Share of the mold volume assumed for a sample of unknown size
pub const DEFAULT_SAMPLE_FRACTION: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MountingType {
    /// Hot compression mounting with resin pellets
    Compression,
    /// Cold mounting with liquid resin
    Castable,
}

impl MountingType {
    pub const ALL: [MountingType; 2] = [MountingType::Compression, MountingType::Castable];

    pub fn safety_margin(&self) -> f64 {
        match self {
            MountingType::Compression => 1.10,
            MountingType::Castable => 1.15,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MountingType::Compression => "compression",
            MountingType::Castable => "castable",
        }
    }

    pub fn note(&self) -> &'static str {
        match self {
            MountingType::Compression => {
                "Uses resin pellets. Includes 10% safety margin for material loss."
            }
            MountingType::Castable => {
                "Uses liquid resin. Includes 15% safety margin for shrinkage and material loss."
            }
        }
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "compression" | "hot" => Ok(MountingType::Compression),
            "castable" | "cold" | "cast" => Ok(MountingType::Castable),
            _ => Err(CalcError::not_found("mounting types", s)),
        }
    }
}

/// A standard mold by size or a custom cavity.
///
/// ```json
/// "1.25"
/// ```
///
/// ```json
/// { "diameter_mm": 40.0, "height_mm": 25.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MoldChoice {
    Standard(MoldSize),
    Custom { diameter_mm: f64, height_mm: f64 },
}

impl MoldChoice {
    /// Cavity (diameter, height) in mm
    pub fn dimensions_mm(&self) -> (f64, f64) {
        match *self {
            MoldChoice::Standard(size) => {
                let spec = size.spec();
                (spec.diameter_mm, spec.height_mm)
            }
            MoldChoice::Custom {
                diameter_mm,
                height_mm,
            } => (diameter_mm, height_mm),
        }
    }
}

/// Input for a mounting material estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Bracket section",
///   "mounting_type": "castable",
///   "mold": "1.25",
///   "sample": { "length_mm": 20.0, "width_mm": 15.0, "height_mm": 10.0 }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MountingInput {
    #[serde(default)]
    pub label: String,
    pub mounting_type: MountingType,
    pub mold: MoldChoice,
    /// Sample bounding box; 5% of the mold volume is assumed when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<SampleBox>,
}

impl MountingInput {
    pub fn validate(&self) -> CalcResult<()> {
        let (d, h) = self.mold.dimensions_mm();
        if !(d.is_finite() && d > 0.0 && h.is_finite() && h > 0.0) {
            return Err(CalcError::invalid_input(
                "mold",
                format!("{d}x{h}"),
                "Mold diameter and height must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Results from the mounting material estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "mounting_type": "compression",
///   "mold_volume_mm3": 9652.78,
///   "sample_volume_mm3": 482.64,
///   "sample_volume_estimated": true,
///   "material_mm3": 10087.15,
///   "material_cm3": 10.087,
///   "material_grams": 10.087,
///   "material_fl_oz": 0.341
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MountingResult {
    pub mounting_type: MountingType,
    pub mold_volume_mm3: f64,
    pub sample_volume_mm3: f64,
    /// True when the sample volume is the 5% default
    pub sample_volume_estimated: bool,
    pub material_mm3: f64,
    /// Also the volume in ml
    pub material_cm3: f64,
    pub material_grams: f64,
    pub material_fl_oz: f64,
}

impl MountingResult {
    pub fn lines(&self) -> Vec<ResultLine> {
        let mold_cm3: CubicCm = CubicMm(self.mold_volume_mm3).into();
        let sample_cm3: CubicCm = CubicMm(self.sample_volume_mm3).into();
        vec![
            ResultLine::new(
                "Material Needed (with safety margin)",
                format!("{} fl oz", to_fixed(self.material_fl_oz, 2)),
            ),
            ResultLine::new(
                "Material Needed (mass/volume)",
                format!(
                    "{} g or {} ml",
                    to_fixed(self.material_grams, 1),
                    to_fixed(self.material_cm3, 1)
                ),
            ),
            ResultLine::new("Mold Volume", format!("{} cm³", to_fixed(mold_cm3.value(), 2))),
            ResultLine::new("Sample Volume", format!("{} cm³", to_fixed(sample_cm3.value(), 2))),
            ResultLine::new("Note", self.mounting_type.note()),
        ]
    }
}

/// Estimate resin needed for one mount.
///
/// # Errors
///
/// - "Mold diameter and height must be greater than 0"
/// - "Sample volume exceeds mold volume"
pub fn calculate(input: &MountingInput) -> CalcResult<MountingResult> {
    input.validate()?;

    let (diameter, height) = input.mold.dimensions_mm();
    let mold_volume = CubicMm(PI * (diameter / 2.0).powi(2) * height);

    let measured = input
        .sample
        .as_ref()
        .filter(|s| s.length_mm > 0.0 && s.width_mm > 0.0 && s.height_mm > 0.0)
        .map(|s| CubicMm(s.length_mm * s.width_mm * s.height_mm));
    let sample_volume_estimated = measured.is_none();
    let sample_volume = measured.unwrap_or(mold_volume * DEFAULT_SAMPLE_FRACTION);

    if sample_volume > mold_volume {
        return Err(CalcError::out_of_range(
            "sample_volume_mm3",
            to_fixed(sample_volume.value(), 1),
            "Sample volume exceeds mold volume",
        ));
    }

    let material = (mold_volume - sample_volume) * input.mounting_type.safety_margin();
    let cm3: CubicCm = material.into();
    let oz: FlOz = cm3.into();
    debug!(
        mold_mm3 = mold_volume.value(),
        sample_mm3 = sample_volume.value(),
        material_cm3 = cm3.value(),
        "mounting material"
    );

    Ok(MountingResult {
        mounting_type: input.mounting_type,
        mold_volume_mm3: mold_volume.value(),
        sample_volume_mm3: sample_volume.value(),
        sample_volume_estimated,
        material_mm3: material.value(),
        material_cm3: cm3.value(),
        material_grams: cm3.value(),
        material_fl_oz: oz.value(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn input(mounting_type: MountingType, mold: MoldChoice, sample: Option<SampleBox>) -> MountingInput {
        MountingInput {
            label: String::new(),
            mounting_type,
            mold,
            sample,
        }
    }

    fn sample_box(l: f64, w: f64, h: f64) -> SampleBox {
        SampleBox {
            label: String::new(),
            length_mm: l,
            width_mm: w,
            height_mm: h,
        }
    }

    #[test]
    fn test_one_inch_compression_default_sample() {
        let r = calculate(&input(
            MountingType::Compression,
            MoldChoice::Standard(MoldSize::OneInch),
            None,
        ))
        .unwrap();
        assert_relative_eq!(r.mold_volume_mm3, 9652.777476807332, epsilon = 1e-6);
        assert!(r.sample_volume_estimated);
        assert_relative_eq!(r.material_cm3, 10.087152463263665, epsilon = 1e-9);
        assert_eq!(r.material_grams, r.material_cm3);

        let lines = r.lines();
        assert_eq!(lines[0].value, "0.34 fl oz");
        assert_eq!(lines[1].value, "10.1 g or 10.1 ml");
        assert_eq!(lines[2].value, "9.65 cm³");
        assert_eq!(lines[3].value, "0.48 cm³");
    }

    #[test]
    fn test_castable_with_sample() {
        let r = calculate(&input(
            MountingType::Castable,
            MoldChoice::Standard(MoldSize::OneAndQuarterInch),
            Some(sample_box(20.0, 15.0, 10.0)),
        ))
        .unwrap();
        assert!(!r.sample_volume_estimated);
        assert_eq!(r.sample_volume_mm3, 3000.0);
        assert_relative_eq!(r.material_cm3, 13.894834528638174, epsilon = 1e-9);
        assert_relative_eq!(r.material_fl_oz, 0.46984071985521414, epsilon = 1e-9);
    }

    #[test]
    fn test_partial_sample_falls_back_to_estimate() {
        let r = calculate(&input(
            MountingType::Compression,
            MoldChoice::Standard(MoldSize::TwoInch),
            Some(sample_box(20.0, 0.0, 10.0)),
        ))
        .unwrap();
        assert!(r.sample_volume_estimated);
        assert_relative_eq!(r.sample_volume_mm3, r.mold_volume_mm3 * 0.05, epsilon = 1e-9);
    }

    #[test]
    fn test_custom_mold_errors() {
        let bad = input(
            MountingType::Castable,
            MoldChoice::Custom {
                diameter_mm: 0.0,
                height_mm: 20.0,
            },
            None,
        );
        assert_eq!(
            calculate(&bad).unwrap_err().user_message(),
            "Mold diameter and height must be greater than 0"
        );

        let oversized = input(
            MountingType::Castable,
            MoldChoice::Custom {
                diameter_mm: 10.0,
                height_mm: 10.0,
            },
            Some(sample_box(10.0, 10.0, 10.0)),
        );
        assert_eq!(
            calculate(&oversized).unwrap_err().user_message(),
            "Sample volume exceeds mold volume"
        );
    }

    #[test]
    fn test_mold_choice_json() {
        let standard: MoldChoice = serde_json::from_str("\"1.5\"").unwrap();
        assert_eq!(standard, MoldChoice::Standard(MoldSize::OneAndHalfInch));
        let custom: MoldChoice =
            serde_json::from_str(r#"{ "diameter_mm": 40.0, "height_mm": 25.0 }"#).unwrap();
        assert_eq!(custom.dimensions_mm(), (40.0, 25.0));
    }
}
