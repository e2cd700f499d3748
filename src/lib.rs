pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod report;
pub mod screenshots;
pub mod steps;
pub mod utils;

pub use error::{CaptureError, ReportError};
pub use model::{OutcomeNode, TestResult, TestRun};
pub use report::{ReportService, Reporter, ReporterRegistry};
pub use steps::{BaseStepListener, StepListener};
