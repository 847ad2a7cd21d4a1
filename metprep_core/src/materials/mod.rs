//! # Materials and Consumables
//!
//! Material classes, abrasive sizes, standard mounting molds and the
//! literal preparation tables the calculators read from.
//!
//! ## Material Classes
//!
//! - **Hard**: hardened and tool steels, ceramics, titanium alloys
//! - **Soft**: aluminum, copper, lead, tin, pure metals
//! - **Work-hardening**: stainless and nickel alloys
//! - **Multi-phase**: cast iron, duplex steels, inclusion-bearing alloys
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::materials::{AbrasiveSize, MaterialClass};
//!
//! let class = MaterialClass::from_str_flexible("work hardening").unwrap();
//! assert_eq!(class, MaterialClass::WorkHardening);
//! assert_eq!(class.display_name(), "Work-Hardening Materials");
//!
//! let grit = AbrasiveSize::from_str_flexible("0.25").unwrap();
//! assert_eq!(grit.label(), "0.25 μm (Ultra Fine Diamond)");
//! ```

pub mod abrasives;
pub mod molds;
pub mod polishing_data;

pub use abrasives::{AbrasiveSize, GrindingGrit, GritConversion, GritScale};
pub use molds::{MoldSize, MoldSpec};

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Material class used to pick polishing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MaterialClass {
    Hard,
    Soft,
    WorkHardening,
    MultiPhase,
}

impl MaterialClass {
    /// All material classes for UI selection
    pub const ALL: [MaterialClass; 4] = [
        MaterialClass::Hard,
        MaterialClass::Soft,
        MaterialClass::WorkHardening,
        MaterialClass::MultiPhase,
    ];

    /// Get the code string (e.g., "work-hardening")
    pub fn code(&self) -> &'static str {
        match self {
            MaterialClass::Hard => "hard",
            MaterialClass::Soft => "soft",
            MaterialClass::WorkHardening => "work-hardening",
            MaterialClass::MultiPhase => "multi-phase",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "hard" => Ok(MaterialClass::Hard),
            "soft" => Ok(MaterialClass::Soft),
            "work-hardening" | "workhardening" => Ok(MaterialClass::WorkHardening),
            "multi-phase" | "multiphase" => Ok(MaterialClass::MultiPhase),
            _ => Err(CalcError::not_found("material classes", s)),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            MaterialClass::Hard => "Hard Materials",
            MaterialClass::Soft => "Soft Materials",
            MaterialClass::WorkHardening => "Work-Hardening Materials",
            MaterialClass::MultiPhase => "Multi-Phase Materials",
        }
    }

    /// Typical materials that belong to this class
    pub fn examples(&self) -> &'static [&'static str] {
        match self {
            MaterialClass::Hard => &[
                "Hardened Steels",
                "Tool Steels",
                "Ceramics",
                "Titanium Alloys",
                "Hardened Cast Iron",
            ],
            MaterialClass::Soft => &["Aluminum", "Copper", "Lead", "Tin", "Soft Brass", "Pure Metals"],
            MaterialClass::WorkHardening => &[
                "Stainless Steel",
                "Nickel Alloys",
                "Austenitic Steels",
                "Work-Hardened Materials",
            ],
            MaterialClass::MultiPhase => &[
                "Cast Iron",
                "Duplex Stainless Steel",
                "Multi-Phase Alloys",
                "Materials with Inclusions",
            ],
        }
    }
}

impl std::fmt::Display for MaterialClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
