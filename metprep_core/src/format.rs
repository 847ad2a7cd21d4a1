//! # Display Formatting
//!
//! Helpers that turn calculation results into the strings shown to users.
//! The rounding here is part of the output contract: a grain size number
//! shown as "5.0" or a time shown as "1m 30s" must not drift between
//! front ends, so every renderer goes through these functions.

use serde::{Deserialize, Serialize};

/// One labelled value in a rendered result.
///
/// ```json
/// { "label": "ASTM Grain Size Number (G)", "value": "5.0" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultLine {
    pub label: String,
    pub value: String,
}

impl ResultLine {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        ResultLine {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Fixed-point rendering with `digits` decimals.
///
/// Rounds the stored binary value, so 0.0885 (held as 0.08849999...) shows
/// as "0.088". Only an exact half, where `value * 10^digits` ends in .5
/// with no representation error, rounds away from zero.
///
/// ```rust
/// use metprep_core::format::to_fixed;
///
/// assert_eq!(to_fixed(0.5, 0), "1");
/// assert_eq!(to_fixed(0.0625, 3), "0.063");
/// assert_eq!(to_fixed(0.08838834764831845, 3), "0.088");
/// ```
pub fn to_fixed(value: f64, digits: usize) -> String {
    let factor = 10f64.powi(digits as i32);
    let scaled = value * factor;
    // fma gives the exact residual of the product; zero means no rounding happened
    let exact_half = scaled.fract().abs() == 0.5 && value.mul_add(factor, -scaled) == 0.0;
    if exact_half {
        format!("{:.*}", digits, scaled.round() / factor)
    } else {
        format!("{:.*}", digits, value)
    }
}

/// Shortest decimal form of a number ("100", "0.5", "1.25")
pub fn plain_number(value: f64) -> String {
    format!("{}", value)
}

/// Long time style used for a single polishing step.
///
/// "30 seconds", "1 minute", "4 minutes", "1 min 30 sec"
pub fn format_minutes_long(minutes: f64) -> String {
    if minutes < 1.0 {
        format!("{} seconds", (minutes * 60.0).round())
    } else if minutes == minutes.floor() {
        let plural = if minutes != 1.0 { "s" } else { "" };
        format!("{} minute{}", plain_number(minutes), plural)
    } else {
        let whole = minutes.floor();
        let seconds = ((minutes - whole) * 60.0).round();
        format!("{} min {} sec", plain_number(whole), seconds)
    }
}

/// Short time style used by the procedure breakdown.
///
/// "30 sec", "4 min", "1m 30s"
pub fn format_minutes_short(minutes: f64) -> String {
    if minutes < 1.0 {
        format!("{} sec", (minutes * 60.0).round())
    } else if minutes == minutes.floor() {
        format!("{} min", plain_number(minutes))
    } else {
        let whole = minutes.floor();
        let seconds = ((minutes - whole) * 60.0).round();
        format!("{}m {}s", plain_number(whole), seconds)
    }
}

/// "30 min - 60 min"
pub fn format_range_short(min: f64, max: f64) -> String {
    format!("{} - {}", format_minutes_short(min), format_minutes_short(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_fixed_rounds_half_up() {
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(16.0, 0), "16");
        assert_eq!(to_fixed(5.0, 1), "5.0");
        assert_eq!(to_fixed(0.25, 3), "0.250");
        assert_eq!(to_fixed(88.388, 1), "88.4");
        assert_eq!(to_fixed(0.0625, 3), "0.063");
        assert_eq!(to_fixed(2.75, 1), "2.8");
    }

    #[test]
    fn test_to_fixed_uses_stored_value() {
        // Decimal literals just below a half stay below it
        assert_eq!(to_fixed(0.0885, 3), "0.088");
        assert_eq!(to_fixed(4.35, 1), "4.3");
        assert_eq!(to_fixed(1.005, 2), "1.00");
        assert_eq!(to_fixed(-3.6, 1), "-3.6");
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(100.0), "100");
        assert_eq!(plain_number(0.05), "0.05");
        assert_eq!(plain_number(1.25), "1.25");
    }

    #[test]
    fn test_long_format() {
        assert_eq!(format_minutes_long(0.5), "30 seconds");
        assert_eq!(format_minutes_long(1.0), "1 minute");
        assert_eq!(format_minutes_long(4.0), "4 minutes");
        assert_eq!(format_minutes_long(1.5), "1 min 30 sec");
    }

    #[test]
    fn test_short_format() {
        assert_eq!(format_minutes_short(0.5), "30 sec");
        assert_eq!(format_minutes_short(30.0), "30 min");
        assert_eq!(format_minutes_short(1.5), "1m 30s");
        assert_eq!(format_range_short(30.0, 60.0), "30 min - 60 min");
    }
}
