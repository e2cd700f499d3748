// Report module - Fans finished test runs out to reporters

pub mod json;
pub mod registry;

use crate::error::ReportError;
use crate::model::TestRun;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

pub use json::JsonReporter;
pub use registry::{ReporterFactory, ReporterRegistry};

/// Writes a durable report for one finished test run.
pub trait Reporter: Send {
    /// Name used in logs and error messages.
    fn name(&self) -> &str;

    /// Directory the report files go to.
    fn set_output_directory(&mut self, output_directory: &Path);

    /// Distinguishes reports of data-driven runs sharing a title.
    fn set_qualifier(&mut self, qualifier: &str);

    /// Writes the report and returns where it went.
    fn generate_report_for(&mut self, outcome: &TestRun) -> io::Result<PathBuf>;
}

/// Generates every subscribed report format in one output directory.
pub struct ReportService {
    output_directory: PathBuf,
    subscribed_reporters: Vec<Box<dyn Reporter>>,
}

impl ReportService {
    pub fn new<I>(output_directory: impl Into<PathBuf>, subscribed_reporters: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn Reporter>>,
    {
        Self {
            output_directory: output_directory.into(),
            subscribed_reporters: subscribed_reporters.into_iter().collect(),
        }
    }

    /// Reporters discovered in `registry`; empty if nothing is registered.
    pub fn default_reporters(registry: &ReporterRegistry) -> Vec<Box<dyn Reporter>> {
        registry.default_reporters()
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn subscribed_reporters(&self) -> &[Box<dyn Reporter>] {
        &self.subscribed_reporters
    }

    /// Adds a reporter. The same format may be subscribed more than once.
    pub fn subscribe(&mut self, reporter: Box<dyn Reporter>) {
        self.subscribed_reporters.push(reporter);
    }

    pub fn use_qualifier(&mut self, qualifier: &str) {
        for reporter in &mut self.subscribed_reporters {
            reporter.set_qualifier(qualifier);
        }
    }

    /// Runs every reporter over every outcome, reporter by reporter.
    ///
    /// The first reporter failure aborts the whole batch: nothing after it is
    /// generated, and the error names the reporter and outcome involved.
    pub fn generate_reports_for(&mut self, outcomes: &[TestRun]) -> Result<Vec<PathBuf>, ReportError> {
        let mut written = Vec::with_capacity(self.subscribed_reporters.len() * outcomes.len());
        for reporter in &mut self.subscribed_reporters {
            for outcome in outcomes {
                written.push(generate_report_for(
                    reporter.as_mut(),
                    outcome,
                    &self.output_directory,
                )?);
            }
        }
        Ok(written)
    }
}

fn generate_report_for(
    reporter: &mut dyn Reporter,
    outcome: &TestRun,
    output_directory: &Path,
) -> Result<PathBuf, ReportError> {
    info!("Generating reports for test results: {}", outcome.title());
    reporter.set_output_directory(output_directory);
    reporter
        .generate_report_for(outcome)
        .map_err(|source| ReportError::GenerationFailed {
            reporter: reporter.name().to_string(),
            outcome: outcome.title().to_string(),
            source,
        })
}
