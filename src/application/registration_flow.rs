// src/application/registration_flow.rs
use tracing::{info, warn};

use crate::application::client::{KeyValueStorage, RegistrationApi};
use crate::constants::{STUDENT_HOME_PATH, STUDENT_SNAPSHOT_KEY};
use crate::domain::{Course, DomainError, RegistrationRequest};

/// Onboarding form state. Choosing a course repopulates the group options
/// and clears any group picked for the previous course.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub first_name: String,
    pub last_name: String,
    course: Option<Course>,
    group: Option<String>,
}

impl RegistrationForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn course(&self) -> Option<Course> {
        self.course
    }

    pub fn group(&self) -> Option<&str> {
        self.group.as_deref()
    }

    pub fn set_course(&mut self, course: Course) {
        self.course = Some(course);
        self.group = None;
    }

    /// Groups offered for the chosen course; empty until a course is chosen
    pub fn group_options(&self) -> &'static [&'static str] {
        self.course.map(Course::groups).unwrap_or(&[])
    }

    pub fn set_group(&mut self, group: &str) -> Result<(), DomainError> {
        let course = self
            .course
            .ok_or_else(|| DomainError::Validation("Choose a course before a group".to_string()))?;
        if !course.has_group(group) {
            return Err(DomainError::Validation(format!(
                "Group {} does not belong to course {}",
                group, course
            )));
        }
        self.group = Some(group.to_string());
        Ok(())
    }

    /// Build the payload, rejecting blank fields and inconsistent course/group pairs
    pub fn validate(&self) -> Result<RegistrationRequest, DomainError> {
        let course = self
            .course
            .ok_or_else(|| DomainError::Validation("Course is required".to_string()))?;
        let group = self
            .group
            .as_deref()
            .ok_or_else(|| DomainError::Validation("Group is required".to_string()))?;
        if !course.has_group(group) {
            return Err(DomainError::Validation(format!(
                "Group {} does not belong to course {}",
                group, course
            )));
        }

        let request = RegistrationRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            course: course.to_string(),
            group: group.to_string(),
        };
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(DomainError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(request)
    }
}

/// Single-shot registration: snapshot locally, submit once, move on.
pub struct RegistrationFlow<A: RegistrationApi, S: KeyValueStorage> {
    api: A,
    storage: S,
}

impl<A: RegistrationApi, S: KeyValueStorage> RegistrationFlow<A, S> {
    pub fn new(api: A, storage: S) -> Self {
        Self { api, storage }
    }

    /// Submit the form and return the page to navigate to.
    ///
    /// Only an invalid form stops the flow. Snapshot and network failures are
    /// logged and the follow-up page is returned anyway.
    pub fn submit(&mut self, form: &RegistrationForm) -> Result<&'static str, DomainError> {
        let request = form.validate()?;

        match serde_json::to_string(&request) {
            Ok(json) => {
                if let Err(err) = self.storage.set_item(STUDENT_SNAPSHOT_KEY, &json) {
                    warn!(error = %err, "Failed to store registration snapshot");
                }
            }
            Err(err) => warn!(error = %err, "Failed to serialize registration snapshot"),
        }

        match self.api.register(&request) {
            Ok(()) => info!(group = %request.group, "Registration submitted"),
            Err(err) => warn!(error = %err, "Registration request failed"),
        }

        Ok(STUDENT_HOME_PATH)
    }

    /// Last submitted form, as left in local storage
    pub fn snapshot(&self) -> Option<RegistrationRequest> {
        let json = self.storage.get_item(STUDENT_SNAPSHOT_KEY)?;
        serde_json::from_str(&json).ok()
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::client::ClientError;
    use crate::infrastructure::MemoryStorage;
    use crate::util::testing::RecordingRegistrationApi;

    fn filled_form() -> RegistrationForm {
        let mut form = RegistrationForm::new();
        form.first_name = " Ann ".to_string();
        form.last_name = "Lee".to_string();
        form.set_course(Course::First);
        form.set_group("ЛХ02-25").expect("Group belongs to course 1");
        form
    }

    #[test]
    fn given_no_course_when_listing_groups_then_returns_empty() {
        let form = RegistrationForm::new();

        assert!(form.group_options().is_empty());
    }

    #[test]
    fn given_course_when_listing_groups_then_returns_catalog_entries() {
        let mut form = RegistrationForm::new();

        form.set_course(Course::Second);

        assert_eq!(form.group_options(), Course::Second.groups());
    }

    #[test]
    fn given_group_selected_when_changing_course_then_group_is_reset() {
        // Arrange
        let mut form = filled_form();

        // Act
        form.set_course(Course::Third);

        // Assert
        assert_eq!(form.group(), None);
        assert_eq!(form.course(), Some(Course::Third));
    }

    #[test]
    fn given_course_two_when_setting_course_one_group_then_rejects() {
        // Arrange
        let mut form = RegistrationForm::new();
        form.set_course(Course::Second);

        // Act
        let result = form.set_group("ЛХ02-25");

        // Assert
        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert_eq!(form.group(), None);
    }

    #[test]
    fn given_no_course_when_setting_group_then_rejects() {
        let mut form = RegistrationForm::new();

        assert!(form.set_group("ЛХ02-25").is_err());
    }

    #[test]
    fn given_blank_first_name_when_validating_then_rejects() {
        let mut form = filled_form();
        form.first_name = "   ".to_string();

        match form.validate().expect_err("Should reject") {
            DomainError::Validation(msg) => assert!(msg.contains("firstName")),
            _ => panic!("Expected Validation error"),
        }
    }

    #[test]
    fn given_complete_form_when_validating_then_trims_names() {
        let request = filled_form().validate().expect("Form is valid");

        assert_eq!(request.first_name, "Ann");
        assert_eq!(request.course, "1");
        assert_eq!(request.group, "ЛХ02-25");
    }

    #[test]
    fn given_valid_form_when_submitting_then_stores_snapshot_and_sends_once() {
        // Arrange
        let mut flow = RegistrationFlow::new(RecordingRegistrationApi::new(), MemoryStorage::new());

        // Act
        let target = flow.submit(&filled_form()).expect("Submit should succeed");

        // Assert
        assert_eq!(target, STUDENT_HOME_PATH);
        assert_eq!(flow.api().submitted().len(), 1);
        let snapshot = flow.snapshot().expect("Snapshot stored");
        assert_eq!(snapshot.first_name, "Ann");
        assert_eq!(snapshot.group, "ЛХ02-25");
        let raw = flow.storage().get_item(STUDENT_SNAPSHOT_KEY).unwrap();
        assert!(raw.contains(r#""firstName":"Ann""#));
    }

    #[test]
    fn given_network_failure_when_submitting_then_still_navigates() {
        // Arrange
        let api = RecordingRegistrationApi::failing(ClientError::Network("offline".to_string()));
        let mut flow = RegistrationFlow::new(api, MemoryStorage::new());

        // Act
        let result = flow.submit(&filled_form());

        // Assert
        assert_eq!(result, Ok(STUDENT_HOME_PATH));
        assert!(flow.snapshot().is_some());
    }

    #[test]
    fn given_invalid_form_when_submitting_then_sends_nothing() {
        // Arrange
        let mut flow = RegistrationFlow::new(RecordingRegistrationApi::new(), MemoryStorage::new());
        let mut form = RegistrationForm::new();
        form.first_name = "Ann".to_string();

        // Act
        let result = flow.submit(&form);

        // Assert
        assert!(result.is_err());
        assert!(flow.api().submitted().is_empty());
        assert!(flow.snapshot().is_none());
    }
}
