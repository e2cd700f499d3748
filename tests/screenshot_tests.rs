// Tests for the filesystem photographer

use std::io;

use steptrace::error::CaptureError;
use steptrace::model::{ExecutedStepDescription, TestResult};
use steptrace::screenshots::{Photographer, ScreenSource, ScreenshotCapturer};
use steptrace::steps::{BaseStepListener, StepListener};

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[derive(Default)]
struct FakeBrowser {
    screenshot_fails: bool,
    page_source_fails: bool,
}

impl ScreenSource for FakeBrowser {
    fn screenshot_png(&mut self) -> io::Result<Vec<u8>> {
        if self.screenshot_fails {
            return Err(io::Error::other("browser closed"));
        }
        Ok(PNG_MAGIC.to_vec())
    }

    fn page_source(&mut self) -> io::Result<String> {
        if self.page_source_fails {
            return Err(io::Error::other("no DOM"));
        }
        Ok("<html><body>shop</body></html>".to_string())
    }
}

#[test]
fn test_capture_writes_image_and_source() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut photographer = Photographer::new(FakeBrowser::default(), temp_dir.path().join("shots"));

    // Act
    let capture = photographer.capture("Open the shop").expect("capture");

    // Assert
    let screenshot = capture.screenshot.expect("screenshot");
    assert_eq!(screenshot.path(), temp_dir.path().join("shots/0001_open_the_shop.png"));
    assert_eq!(std::fs::read(screenshot.path()).unwrap(), PNG_MAGIC);

    let source = capture.source.expect("page source");
    assert_eq!(source, Photographer::<FakeBrowser>::matching_source_for(&screenshot));
    assert!(std::fs::read_to_string(source.path()).unwrap().contains("shop"));
}

#[test]
fn test_capture_without_page_source_keeps_image() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let browser = FakeBrowser {
        page_source_fails: true,
        ..FakeBrowser::default()
    };
    let mut photographer = Photographer::new(browser, temp_dir.path());

    // Act
    let capture = photographer.capture("step").expect("capture");

    // Assert
    assert!(capture.screenshot.is_some());
    assert!(capture.source.is_none());
}

#[test]
fn test_capture_fails_when_screen_unavailable() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let browser = FakeBrowser {
        screenshot_fails: true,
        ..FakeBrowser::default()
    };
    let mut photographer = Photographer::new(browser, temp_dir.path());

    // Act
    let error = photographer.capture("step").unwrap_err();

    // Assert
    assert!(matches!(error, CaptureError::Unavailable(_)));
}

#[test]
fn test_listener_with_photographer_numbers_screenshots() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let mut listener =
        BaseStepListener::new(Photographer::new(FakeBrowser::default(), temp_dir.path()));

    // Act
    listener.test_run_started_with_title("R1");
    listener.step_group_started_with_title("Given a shop");
    listener.step_started(&ExecutedStepDescription::with_title("open it"));
    listener.step_finished(&ExecutedStepDescription::with_title("open it"));
    listener.step_group_finished();

    // Assert
    let group = listener.test_run_results()[0].steps()[0].as_group().unwrap();
    assert_eq!(
        group.screenshot.as_ref().unwrap().path(),
        temp_dir.path().join("0001_given_a_shop.png")
    );
    let leaf = &group.children()[0];
    assert_eq!(leaf.result(), TestResult::Success);
    assert_eq!(
        leaf.source_snapshot().unwrap().path(),
        temp_dir.path().join("0002_open_it.html")
    );
}

#[test]
fn test_listener_survives_unwritable_screenshot_directory() {
    // Arrange
    let temp_dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let blocker = temp_dir.path().join("blocker");
    std::fs::write(&blocker, "not a directory").unwrap();
    let mut listener = BaseStepListener::new(Photographer::new(FakeBrowser::default(), &blocker));

    // Act
    listener.test_run_started_with_title("R1");
    listener.step_started(&ExecutedStepDescription::with_title("click"));
    listener.step_finished(&ExecutedStepDescription::with_title("click"));

    // Assert
    let step = &listener.test_run_results()[0].steps()[0];
    assert_eq!(step.result(), TestResult::Success);
    assert!(step.screenshot().is_none());
}
