pub mod check_service;
pub mod field_service;

pub use check_service::*;
pub use field_service::*;
