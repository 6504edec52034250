pub mod entry;
pub mod grade;
pub mod rut;
