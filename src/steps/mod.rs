// Steps module - Turns step lifecycle events into outcome trees

pub mod base;
pub mod event;
pub mod pause;

use crate::model::{ExecutedStepDescription, StepFailure, TestResult};

pub use base::BaseStepListener;
pub use event::StepEvent;
pub use pause::{DelayInterrupt, PauseOutcome, StepDelay};

/// Receives step lifecycle events from a test framework adapter.
///
/// Events must arrive sequentially and well nested: a run is started before
/// any step, and every group start is matched by a group finish.
pub trait StepListener {
    /// Called when a test starts.
    fn test_run_started(&mut self, description: &ExecutedStepDescription);

    fn test_run_started_with_title(&mut self, title: &str) {
        self.test_run_started(&ExecutedStepDescription::with_title(title));
    }

    /// Opens a group, whatever the description's group flag says.
    fn step_group_started(&mut self, description: &ExecutedStepDescription);

    fn step_group_started_with_title(&mut self, title: &str) {
        self.step_group_started(&ExecutedStepDescription::with_title(title));
    }

    /// Closes the innermost open group.
    fn step_group_finished(&mut self);

    /// Closes the innermost open group, giving it `result` if no child
    /// outcome was recorded in it.
    fn step_group_finished_with(&mut self, result: TestResult);

    fn step_started(&mut self, description: &ExecutedStepDescription);

    fn step_finished(&mut self, description: &ExecutedStepDescription);

    fn step_failed(&mut self, failure: &StepFailure);

    fn step_ignored(&mut self, description: &ExecutedStepDescription);

    fn step_succeeded(&mut self);

    /// Marks the current step without finishing it.
    fn set_default_status(&mut self, result: TestResult);

    /// Marks the pending step, or the most recently recorded one if none is pending.
    fn update_current_step_status(&mut self, result: TestResult);

    /// Overrides the result of the most recently recorded step.
    fn update_most_recent_step_status(&mut self, result: TestResult);

    /// Called when a test finishes.
    fn test_run_finished(&mut self, _result: TestResult) {}
}
