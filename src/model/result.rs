// Test result precedence

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of a step, group or whole test run.
///
/// Variants are declared in ascending precedence, so `Ord` gives the
/// aggregation order directly: the highest result among children wins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestResult {
    #[default]
    Success,
    Skipped,
    Ignored,
    Pending,
    Failure,
    Error,
}

impl TestResult {
    /// Highest-precedence result in `results`, or `None` if there are none.
    pub fn aggregate<I>(results: I) -> Option<TestResult>
    where
        I: IntoIterator<Item = TestResult>,
    {
        results.into_iter().max()
    }

    /// True for FAILURE and ERROR.
    pub fn is_failure(self) -> bool {
        self >= TestResult::Failure
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TestResult::Success => "SUCCESS",
            TestResult::Skipped => "SKIPPED",
            TestResult::Ignored => "IGNORED",
            TestResult::Pending => "PENDING",
            TestResult::Failure => "FAILURE",
            TestResult::Error => "ERROR",
        }
    }
}

impl fmt::Display for TestResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
