use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::grade::{format_grade, is_valid_grade};
use crate::models::rut::format_rut;
use crate::utils::validation::{validate_required_grade_field, validate_rut_field};

// request dto
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GradeEntryRequest {
    #[validate(custom = "validate_rut_field")]
    pub rut: String,

    #[validate(custom = "validate_required_grade_field")]
    pub grade: String,

    #[validate(range(min = 1, message = "Evaluation number starts at 1"))]
    pub evaluation_number: u32,

    #[validate(length(max = 200, message = "Description must be at most 200 characters"))]
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(max = 12, message = "RUT must look like 12.345.678-9"))]
    #[validate(custom = "validate_rut_field")]
    pub rut: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("Validation error: {0}")]
    ValidationError(#[from] validator::ValidationErrors),
}

impl GradeEntryRequest {
    /// Normalizes the RUT and grade to their display forms, then validates.
    ///
    /// Grades outside the scale are kept as typed so validation rejects them
    /// instead of silently clamping.
    pub fn new(
        rut: &str,
        grade: &str,
        evaluation_number: u32,
        description: &str,
    ) -> Result<Self, EntryError> {
        let grade = if is_valid_grade(grade) {
            format_grade(grade)
        } else {
            grade.trim().to_string()
        };

        let request = Self {
            rut: format_rut(rut),
            grade,
            evaluation_number,
            description: description.trim().to_string(),
        };

        request.validate()?;
        Ok(request)
    }
}

impl ProfileRequest {
    pub fn new(rut: &str) -> Result<Self, EntryError> {
        let request = Self {
            rut: format_rut(rut),
        };

        request.validate()?;
        Ok(request)
    }
}
