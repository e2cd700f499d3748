// Filesystem screenshot capturer

use super::{Capture, ScreenshotCapturer};
use crate::error::CaptureError;
use crate::model::ArtifactRef;
use crate::utils::underscore;
use std::fs;
use std::path::{Path, PathBuf};

/// Something that can be photographed, typically a browser driver.
pub trait ScreenSource {
    /// Current screen as PNG bytes.
    fn screenshot_png(&mut self) -> std::io::Result<Vec<u8>>;

    /// Markup of the current page.
    fn page_source(&mut self) -> std::io::Result<String>;
}

/// Saves numbered screenshots and their page sources in an output directory.
pub struct Photographer<S> {
    source: S,
    output_dir: PathBuf,
    sequence: usize,
}

impl<S: ScreenSource> Photographer<S> {
    pub fn new(source: S, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source,
            output_dir: output_dir.into(),
            sequence: 0,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Page-source file stored alongside a screenshot.
    pub fn matching_source_for(screenshot: &ArtifactRef) -> ArtifactRef {
        ArtifactRef::new(screenshot.path().with_extension("html"))
    }

    fn next_file_stem(&mut self, name: &str) -> String {
        self.sequence += 1;
        let name = underscore(name);
        if name.is_empty() {
            format!("{:04}_screenshot", self.sequence)
        } else {
            format!("{:04}_{}", self.sequence, name)
        }
    }

    fn save_page_source(&mut self, screenshot: &ArtifactRef) -> Option<ArtifactRef> {
        let html = match self.source.page_source() {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Page source unavailable for {}: {}", screenshot.path().display(), e);
                return None;
            }
        };

        let source = Self::matching_source_for(screenshot);
        match fs::write(source.path(), html) {
            Ok(()) => Some(source),
            Err(e) => {
                tracing::warn!("Failed to save page source {}: {}", source.path().display(), e);
                None
            }
        }
    }
}

impl<S: ScreenSource> ScreenshotCapturer for Photographer<S> {
    fn capture(&mut self, name: &str) -> Result<Capture, CaptureError> {
        let png = self
            .source
            .screenshot_png()
            .map_err(|e| CaptureError::Unavailable(e.to_string()))?;

        fs::create_dir_all(&self.output_dir).map_err(|source| CaptureError::Io {
            path: self.output_dir.clone(),
            source,
        })?;

        let stem = self.next_file_stem(name);
        let image_path = self.output_dir.join(format!("{stem}.png"));
        fs::write(&image_path, png).map_err(|source| CaptureError::Io {
            path: image_path.clone(),
            source,
        })?;

        let screenshot = ArtifactRef::new(image_path);
        let source = self.save_page_source(&screenshot);

        Ok(Capture {
            screenshot: Some(screenshot),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_source_for() {
        let screenshot = ArtifactRef::new("/tmp/shots/0001_open_page.png");
        let source = Photographer::<NullSource>::matching_source_for(&screenshot);
        assert_eq!(source.path(), Path::new("/tmp/shots/0001_open_page.html"));
    }

    struct NullSource;

    impl ScreenSource for NullSource {
        fn screenshot_png(&mut self) -> std::io::Result<Vec<u8>> {
            Ok(Vec::new())
        }

        fn page_source(&mut self) -> std::io::Result<String> {
            Ok(String::new())
        }
    }

    #[test]
    fn test_file_stems_are_numbered() {
        let mut photographer = Photographer::new(NullSource, "/tmp/unused");
        assert_eq!(photographer.next_file_stem("Open the page"), "0001_open_the_page");
        assert_eq!(photographer.next_file_stem("???"), "0002_screenshot");
    }
}
