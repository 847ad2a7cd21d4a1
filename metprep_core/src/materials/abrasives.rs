//! Abrasive Sizes
//!
//! Diamond/oxide polishing sizes in micrometers, SiC grinding paper grits,
//! and the FEPA / ANSI / JIS grit equivalence table.

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

/// Polishing abrasive size in micrometers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbrasiveSize {
    /// 9 μm diamond
    #[serde(rename = "9")]
    Micron9,
    /// 6 μm diamond
    #[serde(rename = "6")]
    Micron6,
    /// 3 μm diamond
    #[serde(rename = "3")]
    Micron3,
    /// 1 μm diamond
    #[serde(rename = "1")]
    Micron1,
    /// 0.5 μm diamond
    #[serde(rename = "0.5")]
    HalfMicron,
    /// 0.25 μm diamond
    #[serde(rename = "0.25")]
    QuarterMicron,
    /// 0.05 μm colloidal silica or alumina
    #[serde(rename = "0.05")]
    FinalOxide,
}

impl AbrasiveSize {
    /// Coarsest to finest
    pub const ALL: [AbrasiveSize; 7] = [
        AbrasiveSize::Micron9,
        AbrasiveSize::Micron6,
        AbrasiveSize::Micron3,
        AbrasiveSize::Micron1,
        AbrasiveSize::HalfMicron,
        AbrasiveSize::QuarterMicron,
        AbrasiveSize::FinalOxide,
    ];

    /// Size as written on the consumable ("9", "0.25")
    pub fn code(&self) -> &'static str {
        match self {
            AbrasiveSize::Micron9 => "9",
            AbrasiveSize::Micron6 => "6",
            AbrasiveSize::Micron3 => "3",
            AbrasiveSize::Micron1 => "1",
            AbrasiveSize::HalfMicron => "0.5",
            AbrasiveSize::QuarterMicron => "0.25",
            AbrasiveSize::FinalOxide => "0.05",
        }
    }

    pub fn microns(&self) -> f64 {
        match self {
            AbrasiveSize::Micron9 => 9.0,
            AbrasiveSize::Micron6 => 6.0,
            AbrasiveSize::Micron3 => 3.0,
            AbrasiveSize::Micron1 => 1.0,
            AbrasiveSize::HalfMicron => 0.5,
            AbrasiveSize::QuarterMicron => 0.25,
            AbrasiveSize::FinalOxide => 0.05,
        }
    }

    /// Display label, e.g. "3 μm (Fine Diamond)"
    pub fn label(&self) -> &'static str {
        match self {
            AbrasiveSize::Micron9 => "9 μm (Coarse Diamond)",
            AbrasiveSize::Micron6 => "6 μm (Diamond)",
            AbrasiveSize::Micron3 => "3 μm (Fine Diamond)",
            AbrasiveSize::Micron1 => "1 μm (Very Fine Diamond)",
            AbrasiveSize::HalfMicron => "0.5 μm (Ultra Fine Diamond)",
            AbrasiveSize::QuarterMicron => "0.25 μm (Ultra Fine Diamond)",
            AbrasiveSize::FinalOxide => "0.05 μm (Colloidal Silica/Alumina)",
        }
    }

    /// Parse "9", "9um", "0.05 μm", ".5"
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let trimmed = s
            .trim()
            .trim_end_matches("μm")
            .trim_end_matches("um")
            .trim();
        let microns: f64 = trimmed
            .parse()
            .map_err(|_| CalcError::not_found("abrasive sizes", s))?;
        AbrasiveSize::ALL
            .into_iter()
            .find(|size| (size.microns() - microns).abs() < 1e-9)
            .ok_or_else(|| CalcError::not_found("abrasive sizes", s))
    }
}

impl std::fmt::Display for AbrasiveSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// SiC grinding paper grit used in the planar grinding sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GrindingGrit {
    #[serde(rename = "120")]
    Grit120,
    #[serde(rename = "240")]
    Grit240,
    #[serde(rename = "320")]
    Grit320,
    #[serde(rename = "400")]
    Grit400,
    #[serde(rename = "600")]
    Grit600,
    #[serde(rename = "800")]
    Grit800,
    #[serde(rename = "1200")]
    Grit1200,
}

impl GrindingGrit {
    /// Coarsest to finest, in grinding order
    pub const SEQUENCE: [GrindingGrit; 7] = [
        GrindingGrit::Grit120,
        GrindingGrit::Grit240,
        GrindingGrit::Grit320,
        GrindingGrit::Grit400,
        GrindingGrit::Grit600,
        GrindingGrit::Grit800,
        GrindingGrit::Grit1200,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GrindingGrit::Grit120 => "120",
            GrindingGrit::Grit240 => "240",
            GrindingGrit::Grit320 => "320",
            GrindingGrit::Grit400 => "400",
            GrindingGrit::Grit600 => "600",
            GrindingGrit::Grit800 => "800",
            GrindingGrit::Grit1200 => "1200",
        }
    }

    /// 800 and 1200 are only run when fine grinding is requested
    pub fn is_optional(&self) -> bool {
        matches!(self, GrindingGrit::Grit800 | GrindingGrit::Grit1200)
    }

    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        let code = s.trim().trim_start_matches(['P', 'p']);
        GrindingGrit::SEQUENCE
            .into_iter()
            .find(|grit| grit.code() == code)
            .ok_or_else(|| CalcError::not_found("grinding grits", s))
    }
}

/// Grit designation system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GritScale {
    /// European FEPA P-scale (P120)
    Fepa,
    /// US ANSI/CAMI
    Ansi,
    /// Japanese JIS
    Jis,
    /// Median particle size in micrometers
    Micron,
}

impl GritScale {
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "fepa" | "p" => Ok(GritScale::Fepa),
            "ansi" | "cami" => Ok(GritScale::Ansi),
            "jis" => Ok(GritScale::Jis),
            "micron" | "um" | "μm" => Ok(GritScale::Micron),
            _ => Err(CalcError::not_found("grit scales", s)),
        }
    }
}

/// One row of the grit equivalence chart
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GritConversion {
    pub fepa: &'static str,
    pub ansi: &'static str,
    pub jis: &'static str,
    /// Kept as the printed string so "35.0" stays "35.0"
    pub micron: &'static str,
}

impl GritConversion {
    pub fn micron_value(&self) -> f64 {
        self.micron.parse().unwrap_or(f64::NAN)
    }
}

const fn row(fepa: &'static str, ansi: &'static str, jis: &'static str, micron: &'static str) -> GritConversion {
    GritConversion {
        fepa,
        ansi,
        jis,
        micron,
    }
}

/// FEPA / ANSI / JIS / micron equivalents, coarse to fine
pub const GRIT_CONVERSIONS: &[GritConversion] = &[
    row("P12", "16", "16", "1815"),
    row("P16", "20", "20", "1324"),
    row("P20", "24", "24", "1000"),
    row("P24", "30", "30", "764"),
    row("P30", "36", "36", "642"),
    row("P36", "40", "40", "538"),
    row("P40", "50", "50", "425"),
    row("P50", "60", "60", "336"),
    row("P60", "80", "80", "269"),
    row("P80", "100", "100", "201"),
    row("P100", "120", "120", "162"),
    row("P120", "150", "150", "125"),
    row("P150", "180", "180", "100"),
    row("P180", "220", "220", "82"),
    row("P220", "240", "240", "68"),
    row("P240", "280", "280", "58.5"),
    row("P280", "320", "320", "52.2"),
    row("P320", "360", "360", "46.2"),
    row("P360", "400", "400", "40.5"),
    row("P400", "500", "500", "35.0"),
    row("P500", "600", "600", "30.2"),
    row("P600", "800", "800", "25.8"),
    row("P800", "1000", "1000", "21.8"),
    row("P1000", "1200", "1200", "18.3"),
    row("P1200", "1500", "1500", "15.3"),
    row("P1500", "2000", "2000", "12.6"),
    row("P2000", "2500", "2500", "10.3"),
    row("P2500", "3000", "3000", "8.4"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abrasive_serialization() {
        let json = serde_json::to_string(&AbrasiveSize::HalfMicron).unwrap();
        assert_eq!(json, "\"0.5\"");
        let roundtrip: AbrasiveSize = serde_json::from_str("\"0.05\"").unwrap();
        assert_eq!(roundtrip, AbrasiveSize::FinalOxide);
    }

    #[test]
    fn test_abrasive_parse() {
        assert_eq!(AbrasiveSize::from_str_flexible("9").unwrap(), AbrasiveSize::Micron9);
        assert_eq!(AbrasiveSize::from_str_flexible(".5").unwrap(), AbrasiveSize::HalfMicron);
        assert_eq!(AbrasiveSize::from_str_flexible("0.05 μm").unwrap(), AbrasiveSize::FinalOxide);
        assert!(AbrasiveSize::from_str_flexible("2").is_err());
    }

    #[test]
    fn test_grinding_sequence() {
        let optional: Vec<_> = GrindingGrit::SEQUENCE
            .iter()
            .filter(|g| g.is_optional())
            .map(|g| g.code())
            .collect();
        assert_eq!(optional, vec!["800", "1200"]);
        assert_eq!(GrindingGrit::from_str_flexible("P240").unwrap(), GrindingGrit::Grit240);
    }

    #[test]
    fn test_conversion_table_shape() {
        assert_eq!(GRIT_CONVERSIONS.len(), 28);
        assert!(GRIT_CONVERSIONS
            .windows(2)
            .all(|w| w[0].micron_value() > w[1].micron_value()));
    }
}
