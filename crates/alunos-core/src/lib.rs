// ABOUTME: Domain types and field validation for alunos student records.
// ABOUTME: Exposes the Status sum type, raw request input, and the ordered validation chain.

pub mod student;
pub mod validation;

pub use student::{NewStudent, Status, Student, StudentInput, UnknownStatus};
pub use validation::{Field, ValidationError};
