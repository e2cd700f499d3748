// Screenshots module - best-effort capture at step and group boundaries

pub mod photographer;

use crate::error::CaptureError;
use crate::model::ArtifactRef;

pub use photographer::{Photographer, ScreenSource};

/// Artifacts produced by one capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub screenshot: Option<ArtifactRef>,
    pub source: Option<ArtifactRef>,
}

/// Takes a screenshot (and page source, when available) tagged with a name.
pub trait ScreenshotCapturer {
    fn capture(&mut self, name: &str) -> Result<Capture, CaptureError>;
}

/// Capturer for runs without a screen: every capture is empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoScreenshots;

impl ScreenshotCapturer for NoScreenshots {
    fn capture(&mut self, _name: &str) -> Result<Capture, CaptureError> {
        Ok(Capture::default())
    }
}

impl<C: ScreenshotCapturer + ?Sized> ScreenshotCapturer for Box<C> {
    fn capture(&mut self, name: &str) -> Result<Capture, CaptureError> {
        (**self).capture(name)
    }
}
