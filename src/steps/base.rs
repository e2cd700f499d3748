// Base step listener - records test runs for later reporting

use super::{StepDelay, StepListener};
use crate::model::{
    ExecutedStepDescription, OutcomeNode, StepClass, StepFailure, TestResult, TestRun, TestStep,
    TestStepGroup, UserStory,
};
use crate::screenshots::{Capture, NoScreenshots, ScreenshotCapturer};
use crate::utils::humanize;
use tracing::{debug, error, warn};

/// Observes test runs and stores what happened in [`TestRun`] records,
/// taking screenshots at group entry, at each finished step and on failure.
///
/// Not thread safe: events for one listener must be delivered sequentially.
pub struct BaseStepListener<C = NoScreenshots> {
    test_runs: Vec<TestRun>,
    photographer: C,
    /// Child indices from the run's top level down to the innermost open group.
    open_groups: Vec<usize>,
    current_step: Option<TestStep>,
    /// Child indices from the run's top level down to the last recorded leaf.
    last_recorded: Option<Vec<usize>>,
    step_delay: StepDelay,
}

impl Default for BaseStepListener<NoScreenshots> {
    fn default() -> Self {
        Self::new(NoScreenshots)
    }
}

impl<C: ScreenshotCapturer> BaseStepListener<C> {
    pub fn new(photographer: C) -> Self {
        Self {
            test_runs: Vec::new(),
            photographer,
            open_groups: Vec::new(),
            current_step: None,
            last_recorded: None,
            step_delay: StepDelay::disabled(),
        }
    }

    pub fn with_step_delay(mut self, step_delay: StepDelay) -> Self {
        self.step_delay = step_delay;
        self
    }

    /// Every run started so far, including one still in progress.
    pub fn test_run_results(&self) -> &[TestRun] {
        &self.test_runs
    }

    pub fn into_test_run_results(self) -> Vec<TestRun> {
        self.test_runs
    }

    pub fn photographer(&self) -> &C {
        &self.photographer
    }

    pub fn step_delay_mut(&mut self) -> &mut StepDelay {
        &mut self.step_delay
    }

    /// Depth of group nesting at this point of the run.
    pub fn open_group_count(&self) -> usize {
        self.open_groups.len()
    }

    pub fn has_pending_step(&self) -> bool {
        self.current_step.is_some()
    }

    fn test_group_started(&mut self, name: &str) {
        let run = active_run(&mut self.test_runs);
        let container = container_mut(run, &self.open_groups);
        container.push(OutcomeNode::Group(TestStepGroup::new(name)));
        let index = container.len() - 1;
        self.open_groups.push(index);
        debug!("Group started: {} (depth {})", name, self.open_groups.len());

        let capture = self.grab_screenshot_for(name);
        if let Some(group) = self.current_group_mut() {
            group.screenshot = capture.screenshot;
            group.source_snapshot = capture.source;
        }
    }

    fn end_group(&mut self, default_result: Option<TestResult>) {
        let Some(group) = self.current_group_mut() else {
            panic!("step group finished with no open group: the event source is not well nested");
        };
        if let Some(result) = default_result {
            group.set_default_result(result);
        }
        group.record_duration();
        debug!("Group finished: {} ({})", group.description, group.result());

        self.open_groups.pop();
        active_run(&mut self.test_runs).record_duration();
    }

    fn current_group_mut(&mut self) -> Option<&mut TestStepGroup> {
        if self.open_groups.is_empty() {
            return None;
        }
        active_run(&mut self.test_runs).group_at_mut(&self.open_groups)
    }

    fn start_new_test_step(&mut self) {
        if self.current_step.is_none() {
            self.current_step = Some(TestStep::new());
        }
    }

    fn mark_current_test_as(&mut self, result: TestResult) {
        self.current_step
            .get_or_insert_with(TestStep::new)
            .set_result(result);
    }

    /// Attaches the pending step to the innermost open container.
    fn record_current_test_step(&mut self, description: &ExecutedStepDescription) {
        let mut step = self.current_step.take().unwrap_or_default();
        step.description = description.name.clone();
        step.record_duration();

        let run = active_run(&mut self.test_runs);
        let container = container_mut(run, &self.open_groups);
        container.push(OutcomeNode::Step(step));
        let mut path = self.open_groups.clone();
        path.push(container.len() - 1);
        self.last_recorded = Some(path);
        run.record_duration();
    }

    fn grab_screenshot_for(&mut self, name: &str) -> Capture {
        match self.photographer.capture(name) {
            Ok(capture) => capture,
            Err(e) => {
                error!("Failed to save screenshot file for '{}': {}", name, e);
                Capture::default()
            }
        }
    }

    fn take_screenshot_for_current_step(&mut self, name: &str) {
        let capture = self.grab_screenshot_for(name);
        let step = self.current_step.get_or_insert_with(TestStep::new);
        step.screenshot = capture.screenshot;
        step.source_snapshot = capture.source;
    }

    fn pause_if_required(&self) {
        self.step_delay.pause();
    }
}

impl<C: ScreenshotCapturer> StepListener for BaseStepListener<C> {
    fn test_run_started(&mut self, description: &ExecutedStepDescription) {
        if !self.open_groups.is_empty() {
            warn!(
                "Test run started with {} group(s) still open in the previous run",
                self.open_groups.len()
            );
        }
        self.open_groups.clear();
        self.current_step = None;
        self.last_recorded = None;

        let user_story = match (&description.test_method, &description.step_class) {
            (Some(_), Some(step_class)) => user_story_from_test_case(step_class),
            _ => user_story_from(description),
        };

        let mut run = TestRun::new(user_story);
        if let Some(test_method) = &description.test_method {
            run.set_method_name(&test_method.name);
        }
        debug!("Test run started: {}", run.title());
        self.test_runs.push(run);
    }

    fn step_group_started(&mut self, description: &ExecutedStepDescription) {
        self.test_group_started(&description.as_group().name);
    }

    fn step_group_finished(&mut self) {
        self.end_group(None);
    }

    fn step_group_finished_with(&mut self, result: TestResult) {
        self.end_group(Some(result));
    }

    fn step_started(&mut self, description: &ExecutedStepDescription) {
        if description.is_group() {
            self.test_group_started(&description.name);
        } else {
            active_run(&mut self.test_runs);
            self.start_new_test_step();
        }
    }

    fn step_finished(&mut self, description: &ExecutedStepDescription) {
        if description.is_group() {
            self.end_group(None);
            return;
        }

        let earlier_failure = container_has_failed(active_run(&mut self.test_runs), &self.open_groups);
        let step = self.current_step.get_or_insert_with(TestStep::new);
        if !step.is_resulted() {
            step.set_result(if earlier_failure {
                TestResult::Skipped
            } else {
                TestResult::Success
            });
        }

        self.take_screenshot_for_current_step(&description.name);
        self.record_current_test_step(description);
        self.pause_if_required();
    }

    fn step_failed(&mut self, failure: &StepFailure) {
        active_run(&mut self.test_runs);
        let capture = self.grab_screenshot_for(&failure.description.name);

        if self.current_step.is_some() || self.open_groups.is_empty() {
            let step = self.current_step.get_or_insert_with(TestStep::new);
            step.failed_with(&failure.message, failure.cause.clone());
            step.screenshot = capture.screenshot;
            step.source_snapshot = capture.source;
            self.record_current_test_step(&failure.description);
        } else if let Some(group) = self.current_group_mut() {
            group.failed_with(&failure.message, failure.cause.clone());
            group.screenshot = capture.screenshot;
            group.source_snapshot = capture.source;
        }
    }

    fn step_ignored(&mut self, description: &ExecutedStepDescription) {
        active_run(&mut self.test_runs);
        let result = if description.is_pending() {
            TestResult::Pending
        } else if description.is_ignored() {
            TestResult::Ignored
        } else {
            TestResult::Skipped
        };
        self.mark_current_test_as(result);
        self.record_current_test_step(description);
    }

    fn step_succeeded(&mut self) {
        self.set_default_status(TestResult::Success);
    }

    fn set_default_status(&mut self, result: TestResult) {
        self.update_current_step_status(result);
    }

    fn update_current_step_status(&mut self, result: TestResult) {
        match self.current_step.as_mut() {
            Some(step) => step.set_result(result),
            None => self.update_most_recent_step_status(result),
        }
    }

    fn update_most_recent_step_status(&mut self, result: TestResult) {
        let run = active_run(&mut self.test_runs);
        if let Some(path) = &self.last_recorded {
            match run.node_at_mut(path) {
                Some(node) => node.override_latest_result(result),
                None => panic!("recorded step path {path:?} does not lead to a step"),
            }
            return;
        }
        match run.group_at_mut(&self.open_groups) {
            Some(group) => group.set_default_result(result),
            None => warn!("No recorded step to mark as {}", result),
        }
    }

    fn test_run_finished(&mut self, result: TestResult) {
        if let Some(run) = self.test_runs.last_mut() {
            run.record_duration();
            debug!("Test run finished: {} ({})", run.title(), result);
        }
    }
}

fn active_run(test_runs: &mut [TestRun]) -> &mut TestRun {
    match test_runs.last_mut() {
        Some(run) => run,
        None => panic!("step event received with no test run active: start a test run first"),
    }
}

fn container_mut<'a>(run: &'a mut TestRun, open_groups: &[usize]) -> &'a mut Vec<OutcomeNode> {
    if open_groups.is_empty() {
        return run.steps_mut();
    }
    match run.group_at_mut(open_groups) {
        Some(group) => group.children_mut(),
        None => panic!("open group path {open_groups:?} does not lead to a group"),
    }
}

fn container_has_failed(run: &mut TestRun, open_groups: &[usize]) -> bool {
    if open_groups.is_empty() {
        return run.steps().iter().any(|node| node.result().is_failure());
    }
    run.group_at_mut(open_groups)
        .is_some_and(|group| group.has_failed())
}

fn user_story_from_test_case(step_class: &StepClass) -> UserStory {
    UserStory::new(
        humanize(&step_class.simple_name),
        "",
        step_class.qualified_name.clone(),
    )
}

fn user_story_from(description: &ExecutedStepDescription) -> UserStory {
    UserStory::new(humanize(&description.name), "", "")
}
