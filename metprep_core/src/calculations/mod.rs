//! # Preparation Calculators
//!
//! Each calculator follows the same pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! Results also render to display lines (`lines()`), whose rounding is
//! fixed so every front end shows the same text.
//!
//! ## Available Calculations
//!
//! - [`grain_size`] - ASTM E112 grain size conversions (four methods)
//! - [`mold_compatibility`] - Sample fit in standard mounting molds
//! - [`polishing_time`] - Per-step polishing recommendation
//! - [`procedure_time`] - Full preparation time estimate
//! - [`mounting_material`] - Resin quantity for a mount
//! - [`grit_conversion`] - FEPA / ANSI / JIS / micron grit lookup
//!
//! ## Batch Evaluation
//!
//! [`CalculationItem`] wraps any calculator input so a heterogeneous list can
//! be read from JSON and evaluated with [`run`]:
//!
//! ```json
//! { "type": "MoldCompatibility", "length_mm": 20.0, "width_mm": 15.0, "height_mm": 10.0 }
//! ```

pub mod grain_size;
pub mod grit_conversion;
pub mod mold_compatibility;
pub mod mounting_material;
pub mod polishing_time;
pub mod procedure_time;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::CalcResult;
use crate::format::ResultLine;
use crate::materials::GritConversion;

// Re-export commonly used types
pub use grain_size::{GrainMethod, GrainSizeInput, GrainSizeResult};
pub use grit_conversion::GritInput;
pub use mold_compatibility::{MoldCompatibilityResult, SampleBox};
pub use mounting_material::{MoldChoice, MountingInput, MountingResult, MountingType};
pub use polishing_time::{PolishingInput, PolishingRecommendation};
pub use procedure_time::{ProcedureEstimate, ProcedureSelection};

/// Enum wrapper for all calculation types.
///
/// This allows storing heterogeneous calculations in a single collection
/// while maintaining type safety and clean serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    GrainSize(GrainSizeInput),
    MoldCompatibility(SampleBox),
    PolishingTime(PolishingInput),
    ProcedureTime(ProcedureSelection),
    MountingMaterial(MountingInput),
    GritConversion(GritInput),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::GrainSize(i) => &i.label,
            CalculationItem::MoldCompatibility(i) => &i.label,
            CalculationItem::PolishingTime(i) => &i.label,
            CalculationItem::ProcedureTime(i) => &i.label,
            CalculationItem::MountingMaterial(i) => &i.label,
            CalculationItem::GritConversion(i) => &i.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::GrainSize(_) => "Grain Size",
            CalculationItem::MoldCompatibility(_) => "Mold Compatibility",
            CalculationItem::PolishingTime(_) => "Polishing Time",
            CalculationItem::ProcedureTime(_) => "Procedure Time",
            CalculationItem::MountingMaterial(_) => "Mounting Material",
            CalculationItem::GritConversion(_) => "Grit Conversion",
        }
    }
}

/// Result of any calculator, tagged like [`CalculationItem`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    GrainSize(GrainSizeResult),
    MoldCompatibility(MoldCompatibilityResult),
    PolishingTime(PolishingRecommendation),
    ProcedureTime(ProcedureEstimate),
    MountingMaterial(MountingResult),
    GritConversion(GritConversion),
}

impl CalculationOutput {
    pub fn lines(&self) -> Vec<ResultLine> {
        match self {
            CalculationOutput::GrainSize(r) => r.lines(),
            CalculationOutput::MoldCompatibility(r) => r.lines(),
            CalculationOutput::PolishingTime(r) => r.lines(),
            CalculationOutput::ProcedureTime(r) => r.lines(),
            CalculationOutput::MountingMaterial(r) => r.lines(),
            CalculationOutput::GritConversion(r) => grit_conversion::lines(Some(r)),
        }
    }
}

/// Evaluate one calculation item.
///
/// # Example
///
/// ```rust
/// use metprep_core::calculations::{run, CalculationItem};
///
/// let item: CalculationItem = serde_json::from_str(
///     r#"{ "type": "PolishingTime", "material": "hard", "grit": "1" }"#,
/// ).unwrap();
/// let output = run(&item).unwrap();
/// assert_eq!(output.lines()[2].value, "2 minutes - 4 minutes");
/// ```
pub fn run(item: &CalculationItem) -> CalcResult<CalculationOutput> {
    let output = match item {
        CalculationItem::GrainSize(i) => grain_size::calculate(i).map(CalculationOutput::GrainSize),
        CalculationItem::MoldCompatibility(i) => {
            mold_compatibility::calculate(i).map(CalculationOutput::MoldCompatibility)
        }
        CalculationItem::PolishingTime(i) => polishing_time::calculate(i).map(CalculationOutput::PolishingTime),
        CalculationItem::ProcedureTime(i) => procedure_time::calculate(i).map(CalculationOutput::ProcedureTime),
        CalculationItem::MountingMaterial(i) => {
            mounting_material::calculate(i).map(CalculationOutput::MountingMaterial)
        }
        CalculationItem::GritConversion(i) => grit_conversion::calculate(i).map(CalculationOutput::GritConversion),
    };
    if let Err(e) = &output {
        warn!(
            calc_type = item.calc_type(),
            label = item.label(),
            code = e.error_code(),
            "calculation rejected: {}",
            e.user_message()
        );
    }
    output
}
