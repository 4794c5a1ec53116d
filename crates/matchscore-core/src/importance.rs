use crate::model::{DEFAULT_EXPONENT, MAX_IMPORTANCE};

// The essential level weighs 1 + 2^exponent, the largest weight any level gets.
pub fn is_usable_exponent(exponent: f64) -> bool {
    exponent >= 0.0 && (1.0 + 2.0_f64.powf(exponent)).is_finite()
}

pub fn importance_factor(level: f64, exponent: f64) -> f64 {
    let level = if level.is_finite() && level > 0.0 {
        level.min(f64::from(MAX_IMPORTANCE))
    } else {
        1.0
    };
    let exponent = if is_usable_exponent(exponent) {
        exponent
    } else {
        DEFAULT_EXPONENT
    };

    if level <= 1.0 {
        0.0
    } else if level < 3.0 {
        0.5
    } else if level < 4.0 {
        1.0
    } else {
        1.0 + (level - 3.0).powf(exponent)
    }
}
