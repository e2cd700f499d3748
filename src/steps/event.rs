// Recorded step events that can be replayed into any listener

use super::StepListener;
use crate::model::{ExecutedStepDescription, StepFailure, TestResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One step lifecycle event, as written to an event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StepEvent {
    TestRunStarted {
        description: ExecutedStepDescription,
    },
    GroupStarted {
        description: ExecutedStepDescription,
    },
    GroupFinished {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        result: Option<TestResult>,
    },
    StepStarted {
        description: ExecutedStepDescription,
    },
    StepFinished {
        description: ExecutedStepDescription,
    },
    StepFailed {
        failure: StepFailure,
    },
    StepIgnored {
        description: ExecutedStepDescription,
    },
    StepSucceeded,
    DefaultStatus {
        result: TestResult,
    },
    UpdateMostRecentStatus {
        result: TestResult,
    },
    TestRunFinished {
        #[serde(default)]
        result: TestResult,
    },
}

impl StepEvent {
    /// Delivers this event to `listener`.
    pub fn apply<L: StepListener + ?Sized>(&self, listener: &mut L) {
        match self {
            StepEvent::TestRunStarted { description } => listener.test_run_started(description),
            StepEvent::GroupStarted { description } => listener.step_group_started(description),
            StepEvent::GroupFinished { result: None } => listener.step_group_finished(),
            StepEvent::GroupFinished {
                result: Some(result),
            } => listener.step_group_finished_with(*result),
            StepEvent::StepStarted { description } => listener.step_started(description),
            StepEvent::StepFinished { description } => listener.step_finished(description),
            StepEvent::StepFailed { failure } => listener.step_failed(failure),
            StepEvent::StepIgnored { description } => listener.step_ignored(description),
            StepEvent::StepSucceeded => listener.step_succeeded(),
            StepEvent::DefaultStatus { result } => listener.set_default_status(*result),
            StepEvent::UpdateMostRecentStatus { result } => {
                listener.update_most_recent_step_status(*result)
            }
            StepEvent::TestRunFinished { result } => listener.test_run_finished(*result),
        }
    }

    /// Parses a JSON array of events.
    pub fn parse_all(content: &str) -> Result<Vec<StepEvent>> {
        serde_json::from_str(content).context("Failed to parse step events")
    }

    /// Reads a JSON event log from disk.
    pub fn load_all(path: &Path) -> Result<Vec<StepEvent>> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event log: {}", path.display()))?;
        Self::parse_all(&content).with_context(|| format!("Invalid event log: {}", path.display()))
    }
}

/// Delivers `events` to `listener` in order.
pub fn replay<'a, L, I>(events: I, listener: &mut L)
where
    L: StepListener + ?Sized,
    I: IntoIterator<Item = &'a StepEvent>,
{
    for event in events {
        event.apply(listener);
    }
}
