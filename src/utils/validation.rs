//! Custom field validators for `validator` derived forms.

use validator::ValidationError;

use crate::models::grade::{Grade, GradeError};
use crate::models::rut::validate_rut;

pub fn validate_rut_field(rut: &str) -> Result<(), ValidationError> {
    if rut.trim().is_empty() {
        return Err(ValidationError::new("rut_required"));
    }

    if !validate_rut(rut) {
        return Err(ValidationError::new("rut_invalid"));
    }

    Ok(())
}

/// A grade must be present and within the scale.
pub fn validate_required_grade_field(grade: &str) -> Result<(), ValidationError> {
    match Grade::parse(grade) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(ValidationError::new("grade_required")),
        Err(GradeError::Unparsable(_)) => Err(ValidationError::new("grade_unparsable")),
        Err(GradeError::OutOfRange(_)) => Err(ValidationError::new("grade_out_of_range")),
    }
}
