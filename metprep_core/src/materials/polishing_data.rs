//! Polishing Reference Tables
//!
//! Two literal tables:
//!
//! - [`POLISHING_TABLE`]: per-step recommendation (time, cloth, pressure,
//!   notes) for each material class and abrasive size. Soft materials
//!   have no 9 μm row; their sequence starts at 6 μm.
//! - [`procedure_sequence`]: the polishing steps the procedure estimator
//!   runs for a material class, with its own per-step times.
//!
//! The two tables agree everywhere except soft 6 μm (2-3 min per step in
//! the recommendation table, 2-4 min in the procedure sequence).

use crate::materials::{AbrasiveSize, MaterialClass};
use crate::units::TimeRange;

use crate::materials::AbrasiveSize::{FinalOxide, HalfMicron, Micron1, Micron3, Micron6, Micron9, QuarterMicron};
use crate::materials::MaterialClass::{Hard, MultiPhase, Soft, WorkHardening};

/// One row of the polishing recommendation table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolishingEntry {
    pub class: MaterialClass,
    pub grit: AbrasiveSize,
    pub time: TimeRange,
    pub cloth_type: &'static str,
    pub pressure: &'static str,
    pub notes: &'static [&'static str],
}

const fn entry(
    class: MaterialClass,
    grit: AbrasiveSize,
    min: f64,
    max: f64,
    cloth_type: &'static str,
    pressure: &'static str,
    notes: &'static [&'static str],
) -> PolishingEntry {
    PolishingEntry {
        class,
        grit,
        time: TimeRange::new(min, max),
        cloth_type,
        pressure,
        notes,
    }
}

pub const POLISHING_TABLE: &[PolishingEntry] = &[
    // ------------------------------------------------------------------ hard
    entry(Hard, Micron9, 4.0, 6.0, "CERMESH or TEXPAN", "Moderate to high (5-10 lbs)", &[
        "Hard materials can tolerate longer polishing times",
        "Use polycrystalline diamond for aggressive cutting",
        "Monitor for complete scratch removal",
    ]),
    entry(Hard, Micron6, 3.0, 5.0, "POLYPAD or TEXPAN", "Moderate to high (5-10 lbs)", &[
        "Continue until previous scratches are removed",
        "May require longer time if previous step was insufficient",
    ]),
    entry(Hard, Micron3, 3.0, 5.0, "TEXPAN or Black CHEM 2", "Moderate (5-8 lbs)", &[
        "Critical step for removing coarser scratches",
        "Ensure uniform scratch pattern before proceeding",
    ]),
    entry(Hard, Micron1, 2.0, 4.0, "GOLD PAD or ATLANTIS", "Moderate (4-7 lbs)", &[
        "Fine diamond polishing stage",
        "Monitor for relief around inclusions",
    ]),
    entry(Hard, HalfMicron, 2.0, 3.0, "ATLANTIS or MICROPAD", "Light to moderate (3-6 lbs)", &[
        "Pre-final polishing stage",
        "Shorter time to avoid over-polishing",
    ]),
    entry(Hard, QuarterMicron, 1.0, 2.0, "MICROPAD or TRICOTE", "Light (2-4 lbs)", &[
        "Fine polishing before final oxide step",
        "Monitor carefully for surface quality",
    ]),
    entry(Hard, FinalOxide, 1.0, 2.0, "MICROPAD or MOLTEC 2", "Very light (1-3 lbs)", &[
        "Final polishing with colloidal silica or alumina",
        "Short time to achieve mirror finish without relief",
    ]),
    // ------------------------------------------------------------------ soft
    entry(Soft, Micron6, 2.0, 3.0, "DACRON II or NYPAD", "Light to moderate (3-6 lbs)", &[
        "Shorter times prevent deformation",
        "Check frequently for scratch removal",
    ]),
    entry(Soft, Micron3, 2.0, 3.0, "DACRON II or Black CHEM 2", "Light (3-5 lbs)", &[
        "Gentle polishing to avoid deformation",
        "May need multiple short sessions",
    ]),
    entry(Soft, Micron1, 1.0, 2.0, "GOLD PAD or ATLANTIS", "Light (2-4 lbs)", &[
        "Very gentle polishing required",
        "Monitor for smearing or deformation",
    ]),
    entry(Soft, HalfMicron, 1.0, 2.0, "MICROPAD or NAPPAD", "Very light (2-3 lbs)", &[
        "Minimal time to avoid over-polishing",
        "Check surface quality frequently",
    ]),
    entry(Soft, QuarterMicron, 1.0, 1.5, "NAPPAD or MICROPAD", "Very light (1-3 lbs)", &[
        "Brief polishing before final step",
        "Avoid excessive material removal",
    ]),
    entry(Soft, FinalOxide, 0.5, 1.0, "NAPPAD or MOLTEC 2", "Very light (1-2 lbs)", &[
        "Short final polish to achieve finish",
        "Over-polishing can introduce artifacts",
    ]),
    // -------------------------------------------------------- work-hardening
    entry(WorkHardening, Micron9, 3.0, 5.0, "TEXPAN or POLYPAD", "Moderate (4-7 lbs)", &[
        "Consistent, moderate pressure is key",
        "Avoid excessive time to prevent work-hardening",
        "Progress systematically through grits",
    ]),
    entry(WorkHardening, Micron6, 3.0, 4.0, "TEXPAN or Black CHEM 2", "Moderate (4-7 lbs)", &[
        "Maintain consistent technique",
        "Don't over-polish at any stage",
    ]),
    entry(WorkHardening, Micron3, 3.0, 5.0, "Black CHEM 2 or GOLD PAD", "Moderate (4-7 lbs)", &[
        "Critical intermediate step",
        "Ensure complete scratch removal",
    ]),
    entry(WorkHardening, Micron1, 2.0, 3.0, "GOLD PAD or ATLANTIS", "Moderate (3-6 lbs)", &[
        "Fine polishing stage",
        "Monitor for deformation",
    ]),
    entry(WorkHardening, HalfMicron, 1.0, 2.0, "ATLANTIS or MICROPAD", "Light to moderate (3-5 lbs)", &[
        "Pre-final stage",
        "Consider vibratory polishing for final step",
    ]),
    entry(WorkHardening, QuarterMicron, 1.0, 2.0, "MICROPAD or TRICOTE", "Light (2-4 lbs)", &[
        "Fine polishing before final oxide",
        "Avoid excessive time",
    ]),
    entry(WorkHardening, FinalOxide, 1.0, 2.0, "MICROPAD or MOLTEC 2", "Light (2-3 lbs)", &[
        "Final polish with colloidal silica",
        "Consider vibratory polishing for best results",
    ]),
    // ----------------------------------------------------------- multi-phase
    entry(MultiPhase, Micron9, 3.0, 4.0, "TEXPAN or Black CHEM 2", "Moderate (4-7 lbs)", &[
        "Use softer cloths to minimize relief",
        "Shorter times prevent over-polishing",
        "Monitor for relief around different phases",
    ]),
    entry(MultiPhase, Micron6, 2.0, 3.0, "DACRON II or Black CHEM 2", "Moderate (4-6 lbs)", &[
        "Balance between scratch removal and relief",
        "Check for phase contrast",
    ]),
    entry(MultiPhase, Micron3, 2.0, 4.0, "Black CHEM 2 or GOLD PAD", "Moderate (3-6 lbs)", &[
        "Important for removing scratches",
        "Watch for relief development",
    ]),
    entry(MultiPhase, Micron1, 1.0, 3.0, "GOLD PAD or ATLANTIS", "Light to moderate (3-5 lbs)", &[
        "Fine polishing with minimal relief",
        "Monitor phase boundaries carefully",
    ]),
    entry(MultiPhase, HalfMicron, 1.0, 2.0, "ATLANTIS or MICROPAD", "Light (2-4 lbs)", &[
        "Gentle polishing to minimize relief",
        "Short time to prevent over-polishing",
    ]),
    entry(MultiPhase, QuarterMicron, 1.0, 1.5, "MICROPAD or TRICOTE", "Light (2-3 lbs)", &[
        "Fine polishing before final step",
        "Minimize relief around phases",
    ]),
    entry(MultiPhase, FinalOxide, 1.0, 2.0, "MICROPAD or MOLTEC 2", "Very light (1-3 lbs)", &[
        "Final polish with minimal relief",
        "May require specialized techniques for some materials",
    ]),
];

const HARD_SEQUENCE: &[(AbrasiveSize, TimeRange)] = &[
    (Micron9, TimeRange::new(4.0, 6.0)),
    (Micron6, TimeRange::new(3.0, 5.0)),
    (Micron3, TimeRange::new(3.0, 5.0)),
    (Micron1, TimeRange::new(2.0, 4.0)),
    (HalfMicron, TimeRange::new(2.0, 3.0)),
    (QuarterMicron, TimeRange::new(1.0, 2.0)),
    (FinalOxide, TimeRange::new(1.0, 2.0)),
];

const SOFT_SEQUENCE: &[(AbrasiveSize, TimeRange)] = &[
    (Micron6, TimeRange::new(2.0, 4.0)),
    (Micron3, TimeRange::new(2.0, 3.0)),
    (Micron1, TimeRange::new(1.0, 2.0)),
    (HalfMicron, TimeRange::new(1.0, 2.0)),
    (QuarterMicron, TimeRange::new(1.0, 1.5)),
    (FinalOxide, TimeRange::new(0.5, 1.0)),
];

const WORK_HARDENING_SEQUENCE: &[(AbrasiveSize, TimeRange)] = &[
    (Micron9, TimeRange::new(3.0, 5.0)),
    (Micron6, TimeRange::new(3.0, 4.0)),
    (Micron3, TimeRange::new(3.0, 5.0)),
    (Micron1, TimeRange::new(2.0, 3.0)),
    (HalfMicron, TimeRange::new(1.0, 2.0)),
    (QuarterMicron, TimeRange::new(1.0, 2.0)),
    (FinalOxide, TimeRange::new(1.0, 2.0)),
];

const MULTI_PHASE_SEQUENCE: &[(AbrasiveSize, TimeRange)] = &[
    (Micron9, TimeRange::new(3.0, 4.0)),
    (Micron6, TimeRange::new(2.0, 3.0)),
    (Micron3, TimeRange::new(2.0, 4.0)),
    (Micron1, TimeRange::new(1.0, 3.0)),
    (HalfMicron, TimeRange::new(1.0, 2.0)),
    (QuarterMicron, TimeRange::new(1.0, 1.5)),
    (FinalOxide, TimeRange::new(1.0, 2.0)),
];

/// Polishing steps run by the procedure estimator, in order
pub fn procedure_sequence(class: MaterialClass) -> &'static [(AbrasiveSize, TimeRange)] {
    match class {
        Hard => HARD_SEQUENCE,
        Soft => SOFT_SEQUENCE,
        WorkHardening => WORK_HARDENING_SEQUENCE,
        MultiPhase => MULTI_PHASE_SEQUENCE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_size() {
        assert_eq!(POLISHING_TABLE.len(), 27);
    }

    #[test]
    fn test_soft_has_no_nine_micron_row() {
        assert!(!POLISHING_TABLE
            .iter()
            .any(|e| e.class == Soft && e.grit == Micron9));
        assert_eq!(procedure_sequence(Soft).first().map(|s| s.0), Some(Micron6));
    }

    #[test]
    fn test_no_duplicate_keys() {
        for (i, a) in POLISHING_TABLE.iter().enumerate() {
            for b in &POLISHING_TABLE[i + 1..] {
                assert!(!(a.class == b.class && a.grit == b.grit), "{:?} {:?}", a.class, a.grit);
            }
        }
    }

    #[test]
    fn test_sequences_are_coarse_to_fine() {
        for class in MaterialClass::ALL {
            let seq = procedure_sequence(class);
            assert!(seq.windows(2).all(|w| w[0].0.microns() > w[1].0.microns()));
            assert!(seq.iter().all(|(_, t)| t.min <= t.max));
        }
    }
}
