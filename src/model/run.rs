// Test run: root record for one acceptance test

use super::outcome::{derive_result, elapsed_ms};
use super::{OutcomeNode, TestResult, TestStepGroup, UserStory};
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Everything recorded for one test, from its first event onwards.
#[derive(Debug, Clone)]
pub struct TestRun {
    title: String,
    user_story: UserStory,
    method_name: Option<String>,
    steps: Vec<OutcomeNode>,
    started_at: DateTime<Utc>,
    duration_ms: u64,
}

impl TestRun {
    /// New run titled after its user story.
    pub fn new(user_story: UserStory) -> Self {
        Self {
            title: user_story.name().to_string(),
            user_story,
            method_name: None,
            steps: Vec::new(),
            started_at: Utc::now(),
            duration_ms: 0,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn user_story(&self) -> &UserStory {
        &self.user_story
    }

    pub fn method_name(&self) -> Option<&str> {
        self.method_name.as_deref()
    }

    pub fn set_method_name(&mut self, method_name: impl Into<String>) {
        self.method_name = Some(method_name.into());
    }

    /// Top-level steps and groups, in recording order.
    pub fn steps(&self) -> &[OutcomeNode] {
        &self.steps
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Highest-precedence top-level result; SUCCESS for a run with no steps.
    pub fn result(&self) -> TestResult {
        derive_result(&self.steps, None)
    }

    pub fn is_successful(&self) -> bool {
        self.result() == TestResult::Success
    }

    /// Number of leaf steps anywhere in the run.
    pub fn nested_step_count(&self) -> usize {
        self.steps.iter().map(OutcomeNode::leaf_count).sum()
    }

    pub fn record_duration(&mut self) {
        self.duration_ms = elapsed_ms(self.started_at);
    }

    pub(crate) fn steps_mut(&mut self) -> &mut Vec<OutcomeNode> {
        &mut self.steps
    }

    /// Group reached by following child indices from the top level.
    pub(crate) fn group_at_mut(&mut self, path: &[usize]) -> Option<&mut TestStepGroup> {
        let (first, rest) = path.split_first()?;
        let mut group = match self.steps.get_mut(*first)? {
            OutcomeNode::Group(group) => group,
            OutcomeNode::Step(_) => return None,
        };
        for index in rest {
            group = match group.children_mut().get_mut(*index)? {
                OutcomeNode::Group(group) => group,
                OutcomeNode::Step(_) => return None,
            };
        }
        Some(group)
    }

    /// Node reached by following child indices from the top level.
    pub(crate) fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut OutcomeNode> {
        let (last, parents) = path.split_last()?;
        let container = if parents.is_empty() {
            &mut self.steps
        } else {
            self.group_at_mut(parents)?.children_mut()
        };
        container.get_mut(*last)
    }
}

impl Serialize for TestRun {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TestRun", 7)?;
        state.serialize_field("title", &self.title)?;
        state.serialize_field("user_story", &self.user_story)?;
        state.serialize_field("method_name", &self.method_name)?;
        state.serialize_field("result", &self.result())?;
        state.serialize_field("started_at", &self.started_at)?;
        state.serialize_field("duration_ms", &self.duration_ms)?;
        state.serialize_field("steps", &self.steps)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestStep;

    fn run() -> TestRun {
        TestRun::new(UserStory::new("Buying widgets", "", "shop.WhenBuyingWidgets"))
    }

    #[test]
    fn test_title_follows_story() {
        let run = run();
        assert_eq!(run.title(), "Buying widgets");
        assert_eq!(run.user_story().source(), "shop.WhenBuyingWidgets");
        assert!(run.method_name().is_none());
    }

    #[test]
    fn test_empty_run_is_successful() {
        let run = run();
        assert_eq!(run.result(), TestResult::Success);
        assert_eq!(run.nested_step_count(), 0);
    }

    #[test]
    fn test_group_at_mut_follows_path() {
        let mut run = run();
        let mut outer = TestStepGroup::new("outer");
        outer.add_child(OutcomeNode::Step(TestStep::with_description("leaf")));
        outer.add_child(OutcomeNode::Group(TestStepGroup::new("inner")));
        run.steps_mut().push(OutcomeNode::Group(outer));

        assert_eq!(run.group_at_mut(&[0]).unwrap().description, "outer");
        assert_eq!(run.group_at_mut(&[0, 1]).unwrap().description, "inner");
        assert!(run.group_at_mut(&[0, 0]).is_none());
        assert!(run.group_at_mut(&[]).is_none());
        assert!(run.group_at_mut(&[3]).is_none());

        assert_eq!(run.node_at_mut(&[0, 0]).unwrap().description(), "leaf");
        assert!(run.node_at_mut(&[0, 1]).unwrap().is_group());
        assert!(run.node_at_mut(&[0, 2]).is_none());
        assert!(run.node_at_mut(&[]).is_none());
    }

    #[test]
    fn test_serialized_run_carries_result() {
        let mut run = run();
        let mut step = TestStep::with_description("leaf");
        step.set_result(TestResult::Pending);
        run.steps_mut().push(OutcomeNode::Step(step));

        let value = serde_json::to_value(&run).unwrap();
        assert_eq!(value["title"], "Buying widgets");
        assert_eq!(value["result"], "PENDING");
        assert_eq!(value["steps"][0]["description"], "leaf");
    }
}
