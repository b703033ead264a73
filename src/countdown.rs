//! Resume countdown - shows 3-2-1-GO! before play continues
//!
//! Driven by elapsed milliseconds from the host frame loop; owns no timers.

use crate::consts::{COUNTDOWN_FROM, COUNTDOWN_STEP_MS};

/// Countdown state
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    /// Number currently shown (0 means "GO!")
    count: u32,
    /// Time spent on the current step
    step_elapsed_ms: f64,
    /// Whether the countdown is currently running
    active: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            count: COUNTDOWN_FROM,
            step_elapsed_ms: 0.0,
            active: false,
        }
    }
}

impl Countdown {
    /// Start a new countdown from 3
    pub fn start(&mut self) {
        self.count = COUNTDOWN_FROM;
        self.step_elapsed_ms = 0.0;
        self.active = true;
    }

    /// Abandon a running countdown (e.g. exiting to the menu)
    pub fn cancel(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Text for the overlay, None when hidden
    pub fn display_text(&self) -> Option<String> {
        if !self.active {
            return None;
        }
        if self.count > 0 {
            Some(self.count.to_string())
        } else {
            Some("GO!".to_string())
        }
    }

    /// Advance by `elapsed_ms`. Returns true on the update that finishes it.
    pub fn update(&mut self, elapsed_ms: f64) -> bool {
        if !self.active {
            return false;
        }
        self.step_elapsed_ms += elapsed_ms.max(0.0);
        while self.step_elapsed_ms >= COUNTDOWN_STEP_MS {
            self.step_elapsed_ms -= COUNTDOWN_STEP_MS;
            if self.count == 0 {
                self.active = false;
                return true;
            }
            self.count -= 1;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_sequence() {
        let mut countdown = Countdown::default();
        assert_eq!(countdown.display_text(), None);
        assert!(!countdown.update(10_000.0));

        countdown.start();
        let mut shown = vec![countdown.display_text().unwrap()];
        let mut finished = false;
        for _ in 0..100 {
            if countdown.update(100.0) {
                finished = true;
                break;
            }
            let text = countdown.display_text().unwrap();
            if shown.last() != Some(&text) {
                shown.push(text);
            }
        }
        assert!(finished);
        assert_eq!(shown, vec!["3", "2", "1", "GO!"]);
        assert!(!countdown.is_active());
        assert_eq!(countdown.display_text(), None);
    }

    #[test]
    fn test_countdown_takes_four_steps() {
        let mut countdown = Countdown::default();
        countdown.start();
        assert!(!countdown.update(700.0 * 3.0));
        assert_eq!(countdown.display_text().as_deref(), Some("GO!"));
        assert!(!countdown.update(699.0));
        assert!(countdown.update(1.0));
    }

    #[test]
    fn test_large_frame_finishes_at_once() {
        let mut countdown = Countdown::default();
        countdown.start();
        assert!(countdown.update(5_000.0));
        assert!(!countdown.is_active());
    }

    #[test]
    fn test_cancel() {
        let mut countdown = Countdown::default();
        countdown.start();
        countdown.update(800.0);
        countdown.cancel();
        assert!(!countdown.update(5_000.0));
        assert_eq!(countdown.display_text(), None);
    }
}
