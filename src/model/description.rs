// Step descriptions delivered by the event source

use serde::{Deserialize, Serialize};

/// Status a test method is declared with, independent of how it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodStatus {
    #[default]
    Normal,
    Pending,
    Ignored,
}

/// The test method a description originates from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestMethod {
    pub name: String,
    #[serde(default)]
    pub status: MethodStatus,
}

impl TestMethod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: MethodStatus::Normal,
        }
    }

    pub fn with_status(mut self, status: MethodStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_pending(&self) -> bool {
        self.status == MethodStatus::Pending
    }

    pub fn is_ignored(&self) -> bool {
        self.status == MethodStatus::Ignored
    }
}

/// The class (or file) declaring the steps of a test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepClass {
    pub simple_name: String,
    pub qualified_name: String,
}

impl StepClass {
    pub fn new(simple_name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            simple_name: simple_name.into(),
            qualified_name: qualified_name.into(),
        }
    }
}

/// Describes a step, group or test run as reported by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedStepDescription {
    pub name: String,
    #[serde(default)]
    pub group: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_class: Option<StepClass>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_method: Option<TestMethod>,
}

impl ExecutedStepDescription {
    /// A bare description carrying only a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            name: title.into(),
            group: false,
            step_class: None,
            test_method: None,
        }
    }

    pub fn for_method(step_class: StepClass, test_method: TestMethod) -> Self {
        Self {
            name: test_method.name.clone(),
            group: false,
            step_class: Some(step_class),
            test_method: Some(test_method),
        }
    }

    /// Copy of this description flagged as a group.
    pub fn as_group(&self) -> Self {
        Self {
            group: true,
            ..self.clone()
        }
    }

    pub fn is_group(&self) -> bool {
        self.group
    }

    pub fn is_pending(&self) -> bool {
        self.test_method.as_ref().is_some_and(TestMethod::is_pending)
    }

    pub fn is_ignored(&self) -> bool {
        self.test_method.as_ref().is_some_and(TestMethod::is_ignored)
    }
}

/// A failed step: what went wrong and where.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub description: ExecutedStepDescription,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

impl StepFailure {
    pub fn new(description: ExecutedStepDescription, message: impl Into<String>) -> Self {
        Self {
            description,
            message: message.into(),
            cause: None,
        }
    }

    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_group_keeps_name() {
        let description = ExecutedStepDescription::with_title("Given a widget");
        let group = description.as_group();
        assert!(group.is_group());
        assert!(!description.is_group());
        assert_eq!(group.name, "Given a widget");
    }

    #[test]
    fn test_method_status_flags() {
        let description = ExecutedStepDescription::for_method(
            StepClass::new("WhenBuying", "shop.WhenBuying"),
            TestMethod::new("buy_widget").with_status(MethodStatus::Pending),
        );
        assert!(description.is_pending());
        assert!(!description.is_ignored());
        assert_eq!(description.name, "buy_widget");
    }

    #[test]
    fn test_bare_description_is_neither_pending_nor_ignored() {
        let description = ExecutedStepDescription::with_title("step");
        assert!(!description.is_pending());
        assert!(!description.is_ignored());
    }

    #[test]
    fn test_deserialize_minimal() {
        let description: ExecutedStepDescription =
            serde_json::from_str(r#"{"name": "open the page"}"#).unwrap();
        assert_eq!(description, ExecutedStepDescription::with_title("open the page"));
    }
}
