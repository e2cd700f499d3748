// JSON reporter - dumps one test run to a JSON file

use super::Reporter;
use crate::model::TestRun;
use crate::utils::underscore;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// JSON reporter
#[derive(Debug, Clone)]
pub struct JsonReporter {
    output_directory: PathBuf,
    qualifier: Option<String>,
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonReporter {
    pub const FORMAT: &'static str = "json";

    /// Create new JSON reporter writing to the current directory
    pub fn new() -> Self {
        Self {
            output_directory: PathBuf::from("."),
            qualifier: None,
        }
    }

    /// `<title>[_<qualifier>].json`, underscored.
    pub fn report_file_name(&self, outcome: &TestRun) -> String {
        let mut stem = underscore(outcome.title());
        if stem.is_empty() {
            stem.push_str("test_run");
        }
        if let Some(qualifier) = self.qualifier.as_deref().map(underscore)
            && !qualifier.is_empty()
        {
            stem.push('_');
            stem.push_str(&qualifier);
        }
        format!("{stem}.json")
    }
}

impl Reporter for JsonReporter {
    fn name(&self) -> &str {
        Self::FORMAT
    }

    fn set_output_directory(&mut self, output_directory: &Path) {
        self.output_directory = output_directory.to_path_buf();
    }

    fn set_qualifier(&mut self, qualifier: &str) {
        self.qualifier = Some(qualifier.to_string());
    }

    fn generate_report_for(&mut self, outcome: &TestRun) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.output_directory)?;
        let path = self.output_directory.join(self.report_file_name(outcome));

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, outcome)?;
        writer.write_all(b"\n")?;
        writer.flush()?;

        Ok(path)
    }
}
