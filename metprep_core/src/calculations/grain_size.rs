//! # Grain Size Conversion (ASTM E112)
//!
//! Converts between the ASTM grain size number G, the number of grains per
//! square inch at 100x (N), and the mean grain diameter.
//!
//! ## Methods
//!
//! | Method | Given | Relation |
//! |---|---|---|
//! | Number → diameter | G | N = 2^(G-1), d₁₀₀ = 1 / 2^((G-1)/2) mm |
//! | Diameter → number | d | G = 2·log₂(1/d₁₀₀) + 1 |
//! | Intercept | count, line length | G = -3.2877 + 6.6439·log₁₀(L₁₀₀) |
//! | Planimetric | count, test area | N = count / area_in², G = log₂(N) + 1 |
//!
//! Values measured at magnification M are referred to 100x before the
//! ASTM relation is applied. Any G outside 0-14 is an error, never clamped.
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::calculations::grain_size::{calculate, GrainMethod, GrainSizeInput};
//!
//! let input = GrainSizeInput {
//!     label: "Heat 4471".to_string(),
//!     method: GrainMethod::NumberToDiameter { astm_number: 5.0 },
//!     magnification: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.grains_per_in2, 16.0);
//! assert_eq!(result.lines()[0].value, "5.0");
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{CalcError, CalcResult};
use crate::format::{plain_number, to_fixed, ResultLine};
use crate::units::{Micrometers, Millimeters, SqIn, SqMm};

/// Magnification assumed when none is given
pub const DEFAULT_MAGNIFICATION: f64 = 100.0;

/// Valid ASTM E112 grain size numbers
pub const ASTM_RANGE: std::ops::RangeInclusive<f64> = 0.0..=14.0;

/// Below this value a diameter is read as millimeters, otherwise micrometers
pub const DIAMETER_UNIT_THRESHOLD: f64 = 0.1;

// ASTM E112 intercept regression
const INTERCEPT_OFFSET: f64 = -3.2877;
const INTERCEPT_SLOPE: f64 = 6.6439;

const MSG_NUMBER_RANGE: &str = "Grain size number must be between 0 and 14";
const MSG_DIAMETER: &str = "Diameter must be greater than 0";
const MSG_INTERCEPT: &str = "Intercept count and length must be greater than 0";
const MSG_PLANIMETRIC: &str = "Grain count and test area must be greater than 0";
const MSG_OUT_OF_RANGE: &str = "Calculated grain size number is outside ASTM E112 range (0-14)";
const MSG_MAGNIFICATION: &str = "Magnification must be greater than 0";

/// Measurement method and its method-specific inputs.
///
/// ## JSON Example
///
/// ```json
/// { "method": "intercept", "intercept_count": 100, "intercept_length_mm": 25.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "kebab-case")]
pub enum GrainMethod {
    /// ASTM number G to diameter
    NumberToDiameter { astm_number: f64 },
    /// Mean diameter to G. Values below 0.1 are millimeters, others micrometers.
    DiameterToNumber { diameter: f64 },
    /// Heyn lineal intercept count along a test line
    Intercept {
        intercept_count: f64,
        intercept_length_mm: f64,
    },
    /// Jeffries planimetric count inside a test area
    Planimetric { grain_count: f64, test_area_mm2: f64 },
}

impl GrainMethod {
    pub fn kind(&self) -> GrainMethodKind {
        match self {
            GrainMethod::NumberToDiameter { .. } => GrainMethodKind::NumberToDiameter,
            GrainMethod::DiameterToNumber { .. } => GrainMethodKind::DiameterToNumber,
            GrainMethod::Intercept { .. } => GrainMethodKind::Intercept,
            GrainMethod::Planimetric { .. } => GrainMethodKind::Planimetric,
        }
    }
}

/// Method tag carried on results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GrainMethodKind {
    NumberToDiameter,
    DiameterToNumber,
    Intercept,
    Planimetric,
}

/// Input for a grain size calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Heat 4471",
///   "method": "number-to-diameter",
///   "astm_number": 5.0,
///   "magnification": 200
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrainSizeInput {
    /// User label for this measurement
    #[serde(default)]
    pub label: String,

    #[serde(flatten)]
    pub method: GrainMethod,

    /// Magnification of the measurement; 100x when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub magnification: Option<f64>,
}

impl GrainSizeInput {
    /// Magnification after applying the 100x default. Zero counts as
    /// not given; negative or non-finite values are rejected.
    pub fn resolved_magnification(&self) -> CalcResult<f64> {
        let m = self
            .magnification
            .filter(|m| *m != 0.0)
            .unwrap_or(DEFAULT_MAGNIFICATION);
        check_magnification(m)?;
        Ok(m)
    }
}

/// Result of a grain size calculation.
///
/// Optional fields are present only for the methods that report them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainSizeResult {
    pub method: GrainMethodKind,

    /// Magnification the inputs were measured at
    pub magnification: f64,

    /// ASTM grain size number G
    pub astm_number: f64,

    /// Grains per square inch at 100x, N = 2^(G-1)
    pub grains_per_in2: f64,

    /// Mean grain diameter referred to 100x (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_100x_mm: Option<f64>,

    /// Mean grain diameter at the measurement magnification (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_mm: Option<f64>,

    /// Same as `diameter_mm`, in micrometers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diameter_micron: Option<f64>,

    /// Mean lineal intercept referred to 100x (mm)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_intercept_100x_mm: Option<f64>,
}

impl GrainSizeResult {
    /// Display lines. G has one decimal for number → diameter and two
    /// otherwise; N has none; diameters have three (mm) or one (μm).
    pub fn lines(&self) -> Vec<ResultLine> {
        let g_digits = match self.method {
            GrainMethodKind::NumberToDiameter => 1,
            _ => 2,
        };
        let g_line = ResultLine::new("ASTM Grain Size Number (G)", to_fixed(self.astm_number, g_digits));
        let n_line = ResultLine::new("Grains per square inch at 100x", to_fixed(self.grains_per_in2, 0));
        let d100_line = |d: f64| {
            ResultLine::new("Average grain diameter at 100x", format!("{} mm", to_fixed(d, 3)))
        };

        let mut lines = vec![g_line];
        match self.method {
            GrainMethodKind::NumberToDiameter => {
                lines.push(n_line);
                if let Some(d) = self.diameter_100x_mm {
                    lines.push(d100_line(d));
                }
                let at_m = format!("Average grain diameter at {}x", plain_number(self.magnification));
                if let Some(d) = self.diameter_mm {
                    lines.push(ResultLine::new(at_m.clone(), format!("{} mm", to_fixed(d, 3))));
                }
                if let Some(um) = self.diameter_micron {
                    lines.push(ResultLine::new(at_m, format!("{} μm", to_fixed(um, 1))));
                }
            }
            GrainMethodKind::Intercept => {
                if let Some(l) = self.mean_intercept_100x_mm {
                    lines.push(ResultLine::new(
                        "Mean intercept length at 100x",
                        format!("{} mm", to_fixed(l, 3)),
                    ));
                }
                lines.push(n_line);
            }
            GrainMethodKind::DiameterToNumber | GrainMethodKind::Planimetric => {
                lines.push(n_line);
                if let Some(d) = self.diameter_100x_mm {
                    lines.push(d100_line(d));
                }
            }
        }
        lines
    }
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn check_magnification(m: f64) -> CalcResult<()> {
    if !is_positive(m) {
        return Err(CalcError::invalid_input("magnification", m.to_string(), MSG_MAGNIFICATION));
    }
    Ok(())
}

fn check_computed_range(g: f64) -> CalcResult<()> {
    if !ASTM_RANGE.contains(&g) {
        debug!(astm_number = g, "computed grain size outside ASTM E112 range");
        return Err(CalcError::out_of_range("astm_number", format!("{g:.2}"), MSG_OUT_OF_RANGE));
    }
    Ok(())
}

/// N = 2^(G-1)
fn grains_per_in2(g: f64) -> f64 {
    2f64.powf(g - 1.0)
}

/// d₁₀₀ = 1 / 2^((G-1)/2), in mm
fn diameter_100x_mm(g: f64) -> f64 {
    1.0 / 2f64.powf((g - 1.0) / 2.0)
}

/// Grain size number → grains per in² and mean diameter.
///
/// # Errors
///
/// "Grain size number must be between 0 and 14" when `astm_number` is
/// outside 0-14 or NaN.
pub fn number_to_diameter(astm_number: f64, magnification: f64) -> CalcResult<GrainSizeResult> {
    check_magnification(magnification)?;
    if !ASTM_RANGE.contains(&astm_number) {
        return Err(CalcError::invalid_input(
            "astm_number",
            astm_number.to_string(),
            MSG_NUMBER_RANGE,
        ));
    }

    let n = grains_per_in2(astm_number);
    let d_100 = diameter_100x_mm(astm_number);
    let d_m = Millimeters(d_100) * (DEFAULT_MAGNIFICATION / magnification);
    let d_um: Micrometers = d_m.into();
    debug!(astm_number, n, d_100, d_m = d_m.value(), "number_to_diameter");

    Ok(GrainSizeResult {
        method: GrainMethodKind::NumberToDiameter,
        magnification,
        astm_number,
        grains_per_in2: n,
        diameter_100x_mm: Some(d_100),
        diameter_mm: Some(d_m.value()),
        diameter_micron: Some(d_um.value()),
        mean_intercept_100x_mm: None,
    })
}

/// Mean diameter → grain size number.
///
/// `diameter` below 0.1 is taken as millimeters; anything else is taken as
/// micrometers and divided by 1000. A 0.09 mm grain and a 90 μm grain
/// therefore cannot both be entered as-is.
///
/// # Errors
///
/// - "Diameter must be greater than 0"
/// - "Calculated grain size number is outside ASTM E112 range (0-14)"
pub fn diameter_to_number(diameter: f64, magnification: f64) -> CalcResult<GrainSizeResult> {
    check_magnification(magnification)?;
    if !is_positive(diameter) {
        return Err(CalcError::invalid_input("diameter", diameter.to_string(), MSG_DIAMETER));
    }

    let d_mm = if diameter < DIAMETER_UNIT_THRESHOLD {
        Millimeters(diameter)
    } else {
        Micrometers(diameter).into()
    };
    let d_100 = d_mm * (magnification / DEFAULT_MAGNIFICATION);
    let g = 2.0 * (1.0 / d_100.value()).log2() + 1.0;
    let n = grains_per_in2(g);
    debug!(diameter, d_100 = d_100.value(), astm_number = g, "diameter_to_number");
    check_computed_range(g)?;

    Ok(GrainSizeResult {
        method: GrainMethodKind::DiameterToNumber,
        magnification,
        astm_number: g,
        grains_per_in2: n,
        diameter_100x_mm: Some(d_100.value()),
        diameter_mm: None,
        diameter_micron: None,
        mean_intercept_100x_mm: None,
    })
}

/// Lineal intercept method.
///
/// # Errors
///
/// - "Intercept count and length must be greater than 0"
/// - "Calculated grain size number is outside ASTM E112 range (0-14)"
pub fn intercept(intercept_count: f64, intercept_length_mm: f64, magnification: f64) -> CalcResult<GrainSizeResult> {
    check_magnification(magnification)?;
    if !is_positive(intercept_count) || !is_positive(intercept_length_mm) {
        return Err(CalcError::invalid_input(
            "intercept_count/intercept_length_mm",
            format!("{intercept_count}/{intercept_length_mm}"),
            MSG_INTERCEPT,
        ));
    }

    let l_m = Millimeters(intercept_length_mm / intercept_count);
    let l_100 = l_m * (DEFAULT_MAGNIFICATION / magnification);
    let g = INTERCEPT_OFFSET + INTERCEPT_SLOPE * l_100.value().log10();
    let n = grains_per_in2(g);
    debug!(l_m = l_m.value(), l_100 = l_100.value(), astm_number = g, "intercept");
    check_computed_range(g)?;

    Ok(GrainSizeResult {
        method: GrainMethodKind::Intercept,
        magnification,
        astm_number: g,
        grains_per_in2: n,
        diameter_100x_mm: None,
        diameter_mm: None,
        diameter_micron: None,
        mean_intercept_100x_mm: Some(l_100.value()),
    })
}

/// Planimetric (Jeffries) method.
///
/// # Errors
///
/// - "Grain count and test area must be greater than 0"
/// - "Calculated grain size number is outside ASTM E112 range (0-14)"
pub fn planimetric(grain_count: f64, test_area_mm2: f64, magnification: f64) -> CalcResult<GrainSizeResult> {
    check_magnification(magnification)?;
    if !is_positive(grain_count) || !is_positive(test_area_mm2) {
        return Err(CalcError::invalid_input(
            "grain_count/test_area_mm2",
            format!("{grain_count}/{test_area_mm2}"),
            MSG_PLANIMETRIC,
        ));
    }

    let area_100x = SqMm(test_area_mm2) * (DEFAULT_MAGNIFICATION / magnification).powi(2);
    let area_in2: SqIn = area_100x.into();
    let n = grain_count / area_in2.value();
    let g = n.log2() + 1.0;
    debug!(area_in2 = area_in2.value(), n, astm_number = g, "planimetric");
    check_computed_range(g)?;

    Ok(GrainSizeResult {
        method: GrainMethodKind::Planimetric,
        magnification,
        astm_number: g,
        grains_per_in2: n,
        diameter_100x_mm: Some(diameter_100x_mm(g)),
        diameter_mm: None,
        diameter_micron: None,
        mean_intercept_100x_mm: None,
    })
}

/// Run the method selected in `input`.
pub fn calculate(input: &GrainSizeInput) -> CalcResult<GrainSizeResult> {
    let m = input.resolved_magnification()?;
    match input.method {
        GrainMethod::NumberToDiameter { astm_number } => number_to_diameter(astm_number, m),
        GrainMethod::DiameterToNumber { diameter } => diameter_to_number(diameter, m),
        GrainMethod::Intercept {
            intercept_count,
            intercept_length_mm,
        } => intercept(intercept_count, intercept_length_mm, m),
        GrainMethod::Planimetric {
            grain_count,
            test_area_mm2,
        } => planimetric(grain_count, test_area_mm2, m),
    }
}
