// Reporter registry - format identifiers mapped to reporter factories

use super::{JsonReporter, Reporter};
use crate::error::ReportError;
use std::collections::BTreeMap;

/// Builds a fresh reporter instance.
pub type ReporterFactory = Box<dyn Fn() -> Box<dyn Reporter> + Send + Sync>;

/// Known report formats, populated at startup.
#[derive(Default)]
pub struct ReporterRegistry {
    factories: BTreeMap<String, ReporterFactory>,
}

impl ReporterRegistry {
    /// Registry with no formats at all.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the built-in formats.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(JsonReporter::FORMAT, || Box::new(JsonReporter::new()));
        registry
    }

    /// Registers `factory` under `format`, replacing any earlier registration.
    pub fn register<F>(&mut self, format: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Reporter> + Send + Sync + 'static,
    {
        let format = format.into();
        if self.factories.insert(format.clone(), Box::new(factory)).is_some() {
            tracing::debug!("Replaced reporter registration for format '{}'", format);
        }
    }

    pub fn contains(&self, format: &str) -> bool {
        self.factories.contains_key(format)
    }

    pub fn formats(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn create(&self, format: &str) -> Option<Box<dyn Reporter>> {
        self.factories.get(format).map(|factory| factory())
    }

    /// One instance of every registered reporter, ordered by format.
    pub fn default_reporters(&self) -> Vec<Box<dyn Reporter>> {
        self.factories.values().map(|factory| factory()).collect()
    }

    /// Instances for the requested formats, in request order.
    pub fn reporters_for<S: AsRef<str>>(
        &self,
        formats: &[S],
    ) -> Result<Vec<Box<dyn Reporter>>, ReportError> {
        formats
            .iter()
            .map(|format| {
                let format = format.as_ref();
                self.create(format)
                    .ok_or_else(|| ReportError::UnknownFormat(format.to_string()))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_has_no_reporters() {
        let registry = ReporterRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.default_reporters().is_empty());
    }

    #[test]
    fn test_defaults_include_json() {
        let registry = ReporterRegistry::with_defaults();
        assert!(registry.contains("json"));
        assert_eq!(registry.formats(), vec!["json"]);
        let reporters = registry.default_reporters();
        assert_eq!(reporters.len(), 1);
        assert_eq!(reporters[0].name(), "json");
    }

    #[test]
    fn test_reporters_for_unknown_format() {
        let registry = ReporterRegistry::with_defaults();
        let error = registry.reporters_for(&["json", "pdf"]).err().unwrap();
        assert!(matches!(error, ReportError::UnknownFormat(ref f) if f == "pdf"));
    }

    #[test]
    fn test_reporters_for_keeps_request_order_and_duplicates() {
        let mut registry = ReporterRegistry::with_defaults();
        registry.register("json-copy", || Box::new(JsonReporter::new()));
        let reporters = registry.reporters_for(&["json-copy", "json", "json"]).unwrap();
        assert_eq!(reporters.len(), 3);
    }
}
