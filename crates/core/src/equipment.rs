//! Field limits and input validators for equipment, sensor readings and
//! maintenance logs.
//!
//! The limits match the column widths in the `db/migrations` schema so a
//! request that passes validation never fails on a length constraint.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum length of an equipment display name.
pub const MAX_EQUIPMENT_NAME_LEN: usize = 255;
/// Maximum length of an equipment category.
pub const MAX_EQUIPMENT_TYPE_LEN: usize = 50;
/// Maximum length of a sensor reading category.
pub const MAX_SENSOR_TYPE_LEN: usize = 50;
/// Maximum length of a maintenance log description.
pub const MAX_DESCRIPTION_LEN: usize = 10_000;

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate an equipment display name: non-blank, at most
/// [`MAX_EQUIPMENT_NAME_LEN`] characters.
pub fn validate_equipment_name(name: &str) -> Result<(), CoreError> {
    validate_text("name", name, MAX_EQUIPMENT_NAME_LEN)
}

/// Validate an equipment category: non-blank, at most
/// [`MAX_EQUIPMENT_TYPE_LEN`] characters.
pub fn validate_equipment_type(equipment_type: &str) -> Result<(), CoreError> {
    validate_text("type", equipment_type, MAX_EQUIPMENT_TYPE_LEN)
}

/// Validate a sensor reading category: non-blank, at most
/// [`MAX_SENSOR_TYPE_LEN`] characters.
pub fn validate_sensor_type(sensor_type: &str) -> Result<(), CoreError> {
    validate_text("type", sensor_type, MAX_SENSOR_TYPE_LEN)
}

/// Validate a sensor value. NaN and infinities are rejected because they
/// have no defined position in the sorted history the median is taken from.
pub fn validate_reading_value(value: f64) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(
            "value must be a finite number".to_string(),
        ));
    }
    Ok(())
}

/// Validate a maintenance log description.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    validate_text("description", description, MAX_DESCRIPTION_LEN)
}

fn validate_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters, got {len}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn name_accepts_regular_text() {
        assert!(validate_equipment_name("Compressor #4").is_ok());
    }

    #[test]
    fn name_rejects_blank() {
        assert_matches!(
            validate_equipment_name("   "),
            Err(CoreError::Validation(msg)) if msg == "name must not be empty"
        );
    }

    #[test]
    fn name_length_limit_counts_characters() {
        let at_limit = "é".repeat(MAX_EQUIPMENT_NAME_LEN);
        assert!(validate_equipment_name(&at_limit).is_ok());

        let over = "a".repeat(MAX_EQUIPMENT_NAME_LEN + 1);
        assert_matches!(validate_equipment_name(&over), Err(CoreError::Validation(_)));
    }

    #[test]
    fn type_limits() {
        assert!(validate_equipment_type("pump").is_ok());
        assert!(validate_sensor_type(&"t".repeat(MAX_SENSOR_TYPE_LEN)).is_ok());
        assert!(validate_sensor_type(&"t".repeat(MAX_SENSOR_TYPE_LEN + 1)).is_err());
        assert!(validate_equipment_type("").is_err());
    }

    #[test]
    fn reading_value_must_be_finite() {
        assert!(validate_reading_value(72.5).is_ok());
        assert!(validate_reading_value(-40.0).is_ok());
        assert!(validate_reading_value(f64::NAN).is_err());
        assert!(validate_reading_value(f64::INFINITY).is_err());
        assert!(validate_reading_value(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn description_rejects_blank() {
        assert!(validate_description("Replaced bearing").is_ok());
        assert!(validate_description("\n\t").is_err());
    }
}
