//! Weight unit conversion.
//!
//! Conversions happen before any cross-entry comparison so that mixed-unit
//! logs compare correctly.

use crate::models::WeightUnit;

const KG_TO_LB: f64 = 2.20462;
const LB_TO_KG: f64 = 0.453592;

/// Convert a weight scalar between mass units, rounded to one decimal place.
///
/// Identity when `from == to`. Pure and total, no error cases.
pub fn convert(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    match (from, to) {
        (WeightUnit::Kg, WeightUnit::Lb) => round_tenth(value * KG_TO_LB),
        (WeightUnit::Lb, WeightUnit::Kg) => round_tenth(value * LB_TO_KG),
        _ => value,
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
