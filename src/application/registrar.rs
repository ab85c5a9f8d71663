// src/application/registrar.rs
use tracing::{info, warn};

use crate::domain::{DomainError, RegistrationRequest, Student};

/// Storage port for registrations. Append-only.
pub trait StudentRepository {
    fn insert_student(&mut self, request: &RegistrationRequest) -> Result<Student, DomainError>;

    fn list_students(&mut self) -> Result<Vec<Student>, DomainError>;
}

/// Server-side registration use case.
///
/// Only checks that every field is present. Course/group consistency is the
/// form's job and is not re-validated here.
pub struct Registrar<R: StudentRepository> {
    repository: R,
}

impl<R: StudentRepository> Registrar<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn register(&mut self, request: &RegistrationRequest) -> Result<Student, DomainError> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            warn!(?missing, "Rejected registration with blank fields");
            return Err(DomainError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let student = self.repository.insert_student(request)?;
        info!(student_id = student.id, group = %student.group_name, "Registered student");
        Ok(student)
    }

    pub fn students(&mut self) -> Result<Vec<Student>, DomainError> {
        self.repository.list_students()
    }
}
