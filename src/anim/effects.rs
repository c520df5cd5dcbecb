//! Counters, one-shot triggers and the hero typewriter.

use rustc_hash::FxHashSet;
use std::time::Duration;

/// `1 - (1 - t)^3`, for `t` in `0..=1`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Fires at most once per key, e.g. per counter scrolled into view.
#[derive(Debug, Default)]
pub struct OnceTrigger {
    fired: FxHashSet<String>,
}

impl OnceTrigger {
    /// `true` the first time `key` is seen.
    pub fn fire(&mut self, key: &str) -> bool {
        if self.fired.contains(key) {
            return false;
        }
        self.fired.insert(key.to_owned())
    }

    pub fn has_fired(&self, key: &str) -> bool {
        self.fired.contains(key)
    }
}

/// Number counting from `start` to `end` over `duration`.
#[derive(Debug, Clone, Copy)]
pub struct Counter {
    start: u64,
    end: u64,
    duration: Duration,
}

impl Counter {
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(2000);

    pub fn new(start: u64, end: u64, duration: Duration) -> Self {
        Self { start, end, duration }
    }

    pub fn to(end: u64) -> Self {
        Self::new(0, end, Self::DEFAULT_DURATION)
    }

    /// Displayed value after `elapsed`, floored.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn value_at(&self, elapsed: Duration) -> u64 {
        if self.is_done(elapsed) {
            return self.end;
        }
        let progress = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        let span = self.end as f64 - self.start as f64;
        (self.start as f64 + span * ease_out_cubic(progress)).floor() as u64
    }

    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.duration
    }
}

// ============================================================================
// Typewriter
// ============================================================================

const TYPE_DELAY: Duration = Duration::from_millis(100);
const DELETE_DELAY: Duration = Duration::from_millis(50);
const HOLD_DELAY: Duration = Duration::from_millis(2000);
const NEXT_DELAY: Duration = Duration::from_millis(500);

const DEFAULT_MESSAGES: &[&str] = &[
    "Welcome to ByCh4n-Group...",
    "Independent Cybersecurity Community",
    "Penetration Testing • Security Research",
    "Free Software Advocates",
    "Building a Secure Digital Future",
    "cat /etc/passwd | grep freedom",
    "sudo rm -rf /surveillance",
    "Knowledge should be free...",
    "We are ByCh4n-Group.",
    "We are independent.",
    "We are unstoppable.",
];

/// Types each message out, holds it, deletes it, then moves to the next.
#[derive(Debug, Clone)]
pub struct Typewriter {
    messages: Vec<Vec<char>>,
    message: usize,
    chars: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn default_messages() -> Vec<String> {
        DEFAULT_MESSAGES.iter().map(|&m| m.to_owned()).collect()
    }

    /// Empty messages are skipped; with none left the default list is used.
    pub fn new(messages: impl IntoIterator<Item = String>) -> Self {
        let mut messages: Vec<Vec<char>> = messages
            .into_iter()
            .filter(|m| !m.is_empty())
            .map(|m| m.chars().collect())
            .collect();
        if messages.is_empty() {
            messages = DEFAULT_MESSAGES.iter().map(|m| m.chars().collect()).collect();
        }
        Self {
            messages,
            message: 0,
            chars: 0,
            deleting: false,
        }
    }

    /// Currently visible text.
    pub fn text(&self) -> String {
        self.messages[self.message][..self.chars].iter().collect()
    }

    pub fn message_index(&self) -> usize {
        self.message
    }

    /// Advance one character; returns the delay before the next step.
    pub fn step(&mut self) -> Duration {
        let len = self.messages[self.message].len();
        if self.deleting {
            self.chars = self.chars.saturating_sub(1);
            if self.chars == 0 {
                self.deleting = false;
                self.message = (self.message + 1) % self.messages.len();
                return NEXT_DELAY;
            }
            DELETE_DELAY
        } else {
            self.chars = (self.chars + 1).min(len);
            if self.chars == len {
                self.deleting = true;
                return HOLD_DELAY;
            }
            TYPE_DELAY
        }
    }
}

impl Default for Typewriter {
    fn default() -> Self {
        Self::new(Self::default_messages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert!((ease_out_cubic(0.5) - 0.875).abs() < 1e-9);
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn test_counter_values() {
        let counter = Counter::to(100);
        assert_eq!(counter.value_at(Duration::ZERO), 0);
        assert_eq!(counter.value_at(Duration::from_millis(1000)), 87);
        assert_eq!(counter.value_at(Duration::from_millis(2000)), 100);
        assert_eq!(counter.value_at(Duration::from_secs(10)), 100);
        assert!(!counter.is_done(Duration::from_millis(1999)));
    }

    #[test]
    fn test_once_trigger() {
        let mut trigger = OnceTrigger::default();
        assert!(trigger.fire("stat-posts"));
        assert!(!trigger.fire("stat-posts"));
        assert!(trigger.fire("stat-docs"));
        assert!(trigger.has_fired("stat-posts"));
    }

    #[test]
    fn test_typewriter_cycle() {
        let mut writer = Typewriter::new(["ab".to_owned(), String::new(), "ç".to_owned()]);
        assert_eq!(writer.step(), TYPE_DELAY);
        assert_eq!(writer.text(), "a");
        assert_eq!(writer.step(), HOLD_DELAY);
        assert_eq!(writer.text(), "ab");
        assert_eq!(writer.step(), DELETE_DELAY);
        assert_eq!(writer.text(), "a");
        assert_eq!(writer.step(), NEXT_DELAY);
        assert_eq!(writer.text(), "");
        assert_eq!(writer.message_index(), 1);

        assert_eq!(writer.step(), HOLD_DELAY);
        assert_eq!(writer.text(), "ç");
        assert_eq!(writer.step(), NEXT_DELAY);
        assert_eq!(writer.message_index(), 0);
    }

    #[test]
    fn test_typewriter_defaults() {
        let writer = Typewriter::new(Vec::new());
        assert_eq!(writer.messages.len(), DEFAULT_MESSAGES.len());
        assert_eq!(Typewriter::default_messages()[0], "Welcome to ByCh4n-Group...");
    }
}
