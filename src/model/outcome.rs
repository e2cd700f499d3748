// Outcome tree: leaf steps and groups

use super::TestResult;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::path::{Path, PathBuf};

/// Handle to a captured image or page-source snapshot.
///
/// Created by a screenshot capturer; outcome nodes only reference it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ArtifactRef(PathBuf);

impl ArtifactRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

/// Why a step or group failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureDetails {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<String>,
}

/// One atomic test action.
#[derive(Debug, Clone, Serialize)]
pub struct TestStep {
    pub description: String,
    result: TestResult,
    #[serde(skip)]
    resulted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<ArtifactRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_snapshot: Option<ArtifactRef>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl Default for TestStep {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStep {
    pub fn new() -> Self {
        Self {
            description: String::new(),
            result: TestResult::Success,
            resulted: false,
            failure: None,
            screenshot: None,
            source_snapshot: None,
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub fn with_description(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Self::new()
        }
    }

    /// SUCCESS until something marks the step otherwise.
    pub fn result(&self) -> TestResult {
        self.result
    }

    /// Whether a result was ever set explicitly.
    pub fn is_resulted(&self) -> bool {
        self.resulted
    }

    pub fn set_result(&mut self, result: TestResult) {
        self.result = result;
        self.resulted = true;
    }

    pub fn failed_with(&mut self, message: impl Into<String>, cause: Option<String>) {
        self.set_result(TestResult::Failure);
        self.failure = Some(FailureDetails {
            message: message.into(),
            cause,
        });
    }

    pub fn record_duration(&mut self) {
        self.duration_ms = elapsed_ms(self.started_at);
    }
}

/// A nested phase (e.g. a narrative clause) holding child outcomes.
#[derive(Debug, Clone)]
pub struct TestStepGroup {
    pub description: String,
    children: Vec<OutcomeNode>,
    default_result: Option<TestResult>,
    failure: Option<FailureDetails>,
    pub screenshot: Option<ArtifactRef>,
    pub source_snapshot: Option<ArtifactRef>,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
}

impl TestStepGroup {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            children: Vec::new(),
            default_result: None,
            failure: None,
            screenshot: None,
            source_snapshot: None,
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub fn children(&self) -> &[OutcomeNode] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<OutcomeNode> {
        &mut self.children
    }

    pub fn add_child(&mut self, node: OutcomeNode) {
        self.children.push(node);
    }

    pub fn default_result(&self) -> Option<TestResult> {
        self.default_result
    }

    /// Result used only when no child outcome was recorded.
    pub fn set_default_result(&mut self, result: TestResult) {
        self.default_result = Some(result);
    }

    pub fn failure(&self) -> Option<&FailureDetails> {
        self.failure.as_ref()
    }

    /// Records a failure reported against the group itself.
    pub fn failed_with(&mut self, message: impl Into<String>, cause: Option<String>) {
        self.failure = Some(FailureDetails {
            message: message.into(),
            cause,
        });
    }

    /// Highest child result, else the default result, raised to FAILURE if
    /// a failure was recorded on the group itself.
    pub fn result(&self) -> TestResult {
        let derived = derive_result(&self.children, self.default_result);
        if self.failure.is_some() {
            derived.max(TestResult::Failure)
        } else {
            derived
        }
    }

    /// True once the group itself or any of its children has failed.
    pub fn has_failed(&self) -> bool {
        self.failure.is_some() || self.children.iter().any(|c| c.result().is_failure())
    }

    pub fn record_duration(&mut self) {
        self.duration_ms = elapsed_ms(self.started_at);
    }
}

impl Serialize for TestStepGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TestStepGroup", 8)?;
        state.serialize_field("description", &self.description)?;
        state.serialize_field("result", &self.result())?;
        if let Some(failure) = &self.failure {
            state.serialize_field("failure", failure)?;
        } else {
            state.skip_field("failure")?;
        }
        if let Some(screenshot) = &self.screenshot {
            state.serialize_field("screenshot", screenshot)?;
        } else {
            state.skip_field("screenshot")?;
        }
        if let Some(source) = &self.source_snapshot {
            state.serialize_field("source_snapshot", source)?;
        } else {
            state.skip_field("source_snapshot")?;
        }
        state.serialize_field("started_at", &self.started_at)?;
        state.serialize_field("duration_ms", &self.duration_ms)?;
        state.serialize_field("children", &self.children)?;
        state.end()
    }
}

/// A node of the outcome tree.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OutcomeNode {
    Step(TestStep),
    Group(TestStepGroup),
}

impl OutcomeNode {
    pub fn description(&self) -> &str {
        match self {
            OutcomeNode::Step(step) => &step.description,
            OutcomeNode::Group(group) => &group.description,
        }
    }

    pub fn result(&self) -> TestResult {
        match self {
            OutcomeNode::Step(step) => step.result(),
            OutcomeNode::Group(group) => group.result(),
        }
    }

    pub fn screenshot(&self) -> Option<&ArtifactRef> {
        match self {
            OutcomeNode::Step(step) => step.screenshot.as_ref(),
            OutcomeNode::Group(group) => group.screenshot.as_ref(),
        }
    }

    pub fn source_snapshot(&self) -> Option<&ArtifactRef> {
        match self {
            OutcomeNode::Step(step) => step.source_snapshot.as_ref(),
            OutcomeNode::Group(group) => group.source_snapshot.as_ref(),
        }
    }

    pub fn duration_ms(&self) -> u64 {
        match self {
            OutcomeNode::Step(step) => step.duration_ms,
            OutcomeNode::Group(group) => group.duration_ms,
        }
    }

    /// Children of a group; `None` for a leaf step.
    pub fn children(&self) -> Option<&[OutcomeNode]> {
        match self {
            OutcomeNode::Step(_) => None,
            OutcomeNode::Group(group) => Some(group.children()),
        }
    }

    pub fn as_step(&self) -> Option<&TestStep> {
        match self {
            OutcomeNode::Step(step) => Some(step),
            OutcomeNode::Group(_) => None,
        }
    }

    pub fn as_group(&self) -> Option<&TestStepGroup> {
        match self {
            OutcomeNode::Step(_) => None,
            OutcomeNode::Group(group) => Some(group),
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, OutcomeNode::Group(_))
    }

    /// Number of leaf steps at or below this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            OutcomeNode::Step(_) => 1,
            OutcomeNode::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
        }
    }

    /// Overrides the result of the most recently recorded leaf at or below
    /// this node. An empty group takes it as its default result.
    pub(crate) fn override_latest_result(&mut self, result: TestResult) {
        match self {
            OutcomeNode::Step(step) => step.set_result(result),
            OutcomeNode::Group(group) => match group.children.last_mut() {
                Some(child) => child.override_latest_result(result),
                None => group.set_default_result(result),
            },
        }
    }
}

/// Highest-precedence child result, else `default`, else SUCCESS.
pub fn derive_result(children: &[OutcomeNode], default: Option<TestResult>) -> TestResult {
    TestResult::aggregate(children.iter().map(OutcomeNode::result))
        .or(default)
        .unwrap_or_default()
}

pub(crate) fn elapsed_ms(since: DateTime<Utc>) -> u64 {
    (Utc::now() - since).num_milliseconds().max(0) as u64
}
