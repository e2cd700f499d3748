// Fixed delay between finished steps

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

/// How a pause ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseOutcome {
    /// No delay configured.
    Skipped,
    Completed,
    Interrupted,
}

/// Cuts a running (or the next) step delay short from another thread.
#[derive(Debug, Clone)]
pub struct DelayInterrupt(Sender<()>);

impl DelayInterrupt {
    /// Returns false if the delay it belongs to is gone.
    pub fn interrupt(&self) -> bool {
        self.0.send(()).is_ok()
    }
}

/// Throttle applied after each finished leaf step, e.g. to let a UI settle.
#[derive(Debug)]
pub struct StepDelay {
    delay: Duration,
    interrupts: Option<Receiver<()>>,
}

impl Default for StepDelay {
    fn default() -> Self {
        Self::disabled()
    }
}

impl StepDelay {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            interrupts: None,
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Handle that interrupts this delay. Replaces any handle issued before.
    pub fn interrupt_handle(&mut self) -> DelayInterrupt {
        let (tx, rx) = mpsc::channel();
        self.interrupts = Some(rx);
        DelayInterrupt(tx)
    }

    /// Blocks the calling thread for the configured delay.
    pub fn pause(&self) -> PauseOutcome {
        if self.delay.is_zero() {
            return PauseOutcome::Skipped;
        }

        let Some(interrupts) = &self.interrupts else {
            thread::sleep(self.delay);
            return PauseOutcome::Completed;
        };

        let started = Instant::now();
        match interrupts.recv_timeout(self.delay) {
            Ok(()) => {
                tracing::warn!("Wait interrupted after {:?}", started.elapsed());
                PauseOutcome::Interrupted
            }
            Err(RecvTimeoutError::Timeout) => PauseOutcome::Completed,
            Err(RecvTimeoutError::Disconnected) => {
                thread::sleep(self.delay.saturating_sub(started.elapsed()));
                PauseOutcome::Completed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_delay_skips() {
        assert_eq!(StepDelay::disabled().pause(), PauseOutcome::Skipped);
    }

    #[test]
    fn test_delay_completes() {
        let delay = StepDelay::from_millis(5);
        let started = Instant::now();
        assert_eq!(delay.pause(), PauseOutcome::Completed);
        assert!(started.elapsed() >= Duration::from_millis(5));
    }

    #[test]
    fn test_pending_interrupt_cuts_pause_short() {
        let mut delay = StepDelay::from_millis(10_000);
        let handle = delay.interrupt_handle();
        assert!(handle.interrupt());

        let started = Instant::now();
        assert_eq!(delay.pause(), PauseOutcome::Interrupted);
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_interrupt_from_another_thread() {
        let mut delay = StepDelay::from_millis(10_000);
        let handle = delay.interrupt_handle();
        let worker = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            handle.interrupt()
        });

        assert_eq!(delay.pause(), PauseOutcome::Interrupted);
        assert!(worker.join().unwrap());
    }

    #[test]
    fn test_dropped_handle_still_waits() {
        let mut delay = StepDelay::from_millis(5);
        drop(delay.interrupt_handle());
        let started = Instant::now();
        assert_eq!(delay.pause(), PauseOutcome::Completed);
        assert!(started.elapsed() >= Duration::from_millis(5));
    }
}
