// Model module - Outcome tree built from step events

pub mod description;
pub mod outcome;
pub mod result;
pub mod run;
pub mod story;

pub use description::{ExecutedStepDescription, MethodStatus, StepClass, StepFailure, TestMethod};
pub use outcome::{ArtifactRef, FailureDetails, OutcomeNode, TestStep, TestStepGroup, derive_result};
pub use result::TestResult;
pub use run::TestRun;
pub use story::UserStory;
