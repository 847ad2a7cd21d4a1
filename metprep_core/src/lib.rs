//! # metprep_core - Metallographic Sample Preparation Calculators
//!
//! `metprep_core` holds the calculators behind the metprep tools: ASTM E112
//! grain size conversion, mounting mold checks, polishing and procedure time
//! estimates, resin quantities and abrasive grit conversion. All inputs and
//! outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize (and inputs Deserialize)
//! - **Rich Errors**: Structured error types carrying the user-facing message
//! - **Fixed Display**: Rounding of displayed values is part of each result
//!
//! ## Quick Start
//!
//! ```rust
//! use metprep_core::calculations::grain_size::{calculate, GrainMethod, GrainSizeInput};
//!
//! let input = GrainSizeInput {
//!     label: "Heat 4471".to_string(),
//!     method: GrainMethod::NumberToDiameter { astm_number: 8.0 },
//!     magnification: Some(100.0),
//! };
//! let result = calculate(&input).unwrap();
//!
//! for line in result.lines() {
//!     println!("{}: {}", line.label, line.value);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - All calculators and the tagged item/output enums
//! - [`materials`] - Material classes, abrasives, molds and reference tables
//! - [`worksheet`] - Ordered lists of calculations evaluated together
//! - [`settings`] - User defaults
//! - [`units`] - Type-safe unit wrappers
//! - [`format`] - Display rounding and time formatting
//! - [`errors`] - Structured error types
//! - [`file_io`] - JSON files with atomic saves

pub mod calculations;
pub mod errors;
pub mod file_io;
pub mod format;
pub mod materials;
pub mod settings;
pub mod units;
pub mod worksheet;

// Re-export commonly used types at crate root for convenience
pub use calculations::{run, CalculationItem, CalculationOutput};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_worksheet, save_worksheet};
pub use format::ResultLine;
pub use settings::{OutputFormat, Settings};
pub use worksheet::{Worksheet, WorksheetReport};
