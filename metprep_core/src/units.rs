//! # Unit Types
//!
//! Type-safe wrappers for the units used in sample preparation. These are
//! plain f64 newtypes that serialize as bare numbers.
//!
//! ## Conventions
//!
//! - Length and diameter: millimeters (mm); micrometers (μm) for display
//!   and abrasive sizes
//! - Area: square millimeters; square inches for ASTM E112 grain counts
//! - Volume: cubic millimeters internally; cm³ (= ml) and US fluid ounces
//!   for resin quantities
//! - Time: minutes
//!
//! ## Example
//!
//! ```rust
//! use metprep_core::units::{Millimeters, Micrometers, SqMm, SqIn};
//!
//! let d: Micrometers = Millimeters(0.25).into();
//! assert_eq!(d.0, 250.0);
//!
//! let area: SqIn = SqMm(645.16).into();
//! assert!((area.0 - 1.0).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Square millimeters per square inch
pub const MM2_PER_IN2: f64 = 645.16;

/// Millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Cubic centimeters per US fluid ounce
pub const CM3_PER_FL_OZ: f64 = 29.5735;

// ============================================================================
// Length Units
// ============================================================================

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in micrometers
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Micrometers(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Millimeters> for Micrometers {
    fn from(mm: Millimeters) -> Self {
        Micrometers(mm.0 * 1000.0)
    }
}

impl From<Micrometers> for Millimeters {
    fn from(um: Micrometers) -> Self {
        Millimeters(um.0 / 1000.0)
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(inches.0 * MM_PER_INCH)
    }
}

// ============================================================================
// Area Units
// ============================================================================

/// Area in square millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqMm(pub f64);

/// Area in square inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SqIn(pub f64);

impl From<SqMm> for SqIn {
    fn from(mm2: SqMm) -> Self {
        SqIn(mm2.0 / MM2_PER_IN2)
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in cubic millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicMm(pub f64);

/// Volume in cubic centimeters (milliliters)
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CubicCm(pub f64);

/// Volume in US fluid ounces
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FlOz(pub f64);

impl From<CubicMm> for CubicCm {
    fn from(mm3: CubicMm) -> Self {
        CubicCm(mm3.0 / 1000.0)
    }
}

impl From<CubicCm> for FlOz {
    fn from(cm3: CubicCm) -> Self {
        FlOz(cm3.0 / CM3_PER_FL_OZ)
    }
}

// ============================================================================
// Time
// ============================================================================

/// A time window in minutes, e.g. "3-5 min" for a polishing step
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimeRange {
    pub min: f64,
    pub max: f64,
}

impl TimeRange {
    pub const fn new(min: f64, max: f64) -> Self {
        TimeRange { min, max }
    }

    /// A zero-width range where both bounds equal `minutes`
    pub const fn point(minutes: f64) -> Self {
        TimeRange {
            min: minutes,
            max: minutes,
        }
    }
}

impl Add for TimeRange {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        TimeRange::new(self.min + rhs.min, self.max + rhs.max)
    }
}

impl std::iter::Sum for TimeRange {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TimeRange::default(), |acc, r| acc + r)
    }
}

// ============================================================================
// Arithmetic Implementations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Millimeters);
impl_arithmetic!(Micrometers);
impl_arithmetic!(Inches);
impl_arithmetic!(SqMm);
impl_arithmetic!(SqIn);
impl_arithmetic!(CubicMm);
impl_arithmetic!(CubicCm);
impl_arithmetic!(FlOz);
