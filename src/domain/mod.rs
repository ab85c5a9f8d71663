// src/domain/mod.rs
pub mod catalog;
pub mod error;
pub mod grades;
pub mod note;
pub mod student;

pub use catalog::Course;
pub use error::DomainError;
pub use grades::{GradeSummary, GradeTracker};
pub use note::{Note, NoteDraft};
pub use student::{RegistrationRequest, Student};
