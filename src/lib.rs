pub mod models;
pub mod services;
pub mod cli;
pub mod utils;

pub use anyhow::{Error, Result};
pub use models::grade::{format_grade, is_valid_grade, Grade, GradeError};
pub use models::rut::{compute_check_digit, format_rut, validate_rut, Rut, RutError};
