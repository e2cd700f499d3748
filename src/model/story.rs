use serde::{Deserialize, Serialize};

/// The narrative a test run belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStory {
    name: String,
    description: String,
    source: String,
}

impl UserStory {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            source: source.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Where the story came from, usually the qualified name of the step class.
    pub fn source(&self) -> &str {
        &self.source
    }
}
