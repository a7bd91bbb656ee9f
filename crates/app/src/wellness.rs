//! Body-mass-index helper for the nutrition screens.

use thiserror::Error;

/// Errors for invalid BMI inputs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum BmiError {
    #[error("weight must be positive")]
    NonPositiveWeight,
    #[error("height must be positive")]
    NonPositiveHeight,
}

/// WHO weight classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Display label, as the app shows it.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Underweight => "Bajo peso",
            Self::Normal => "Peso normal",
            Self::Overweight => "Sobrepeso",
            Self::Obese => "Obesidad",
        }
    }
}

/// A computed BMI with its classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BmiReport {
    pub value: f64,
    pub category: BmiCategory,
}

/// Compute BMI from weight in kilograms and height in centimeters.
///
/// # Errors
///
/// Returns an error when either input is zero, negative, or not finite.
pub fn bmi(weight_kg: f64, height_cm: f64) -> Result<BmiReport, BmiError> {
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(BmiError::NonPositiveWeight);
    }
    if !height_cm.is_finite() || height_cm <= 0.0 {
        return Err(BmiError::NonPositiveHeight);
    }

    let height_m = height_cm / 100.0;
    let value = weight_kg / (height_m * height_m);

    let category = if value < 18.5 {
        BmiCategory::Underweight
    } else if value < 25.0 {
        BmiCategory::Normal
    } else if value < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    };

    Ok(BmiReport { value, category })
}
