//! Parent gate in front of the settings modal.
//!
//! Two steps: a burst of taps on the title, then a small sum to solve.

use crate::config::*;
use crate::error::{Result, SlowtideError};
use rand::Rng;

/// Counts title taps; a pause longer than the window starts over.
#[derive(Clone, Debug, Default)]
pub struct TitleTapCounter {
    count: u32,
    last_tap_ms: Option<f64>,
}

impl TitleTapCounter {
    /// Register a tap. Returns true when this tap completes the sequence.
    pub fn tap(&mut self, now_ms: f64) -> bool {
        let in_window = self
            .last_tap_ms
            .map_or(false, |last| now_ms - last <= TITLE_TAP_WINDOW_MS);
        self.count = if in_window { self.count + 1 } else { 1 };
        self.last_tap_ms = Some(now_ms);
        if self.count >= TITLE_TAPS_TO_UNLOCK {
            self.reset();
            return true;
        }
        false
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.last_tap_ms = None;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Question {
    pub a: u32,
    pub b: u32,
}

impl Question {
    pub fn answer(&self) -> u32 {
        self.a + self.b
    }

    pub fn prompt(&self) -> String {
        format!("What is {} + {}?", self.a, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    /// Wrong answer; a fresh question has been drawn.
    Wrong,
}

#[derive(Clone, Debug, Default)]
pub struct MathsChallenge {
    question: Option<Question>,
}

impl MathsChallenge {
    pub fn is_active(&self) -> bool {
        self.question.is_some()
    }

    pub fn question(&self) -> Option<Question> {
        self.question
    }

    /// Draw a new question with operands in 1..=9.
    pub fn begin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Question {
        let q = Question {
            a: rng.gen_range(1..=9),
            b: rng.gen_range(1..=9),
        };
        self.question = Some(q);
        q
    }

    /// Check a typed answer. Text that is not a number is an error and leaves
    /// the question unchanged.
    pub fn submit<R: Rng + ?Sized>(&mut self, input: &str, rng: &mut R) -> Result<Verdict> {
        let trimmed = input.trim();
        let answer: u32 = trimmed
            .parse()
            .map_err(|_| SlowtideError::InvalidAnswer(trimmed.to_string()))?;
        match self.question {
            Some(q) if q.answer() == answer => {
                self.question = None;
                Ok(Verdict::Correct)
            }
            _ => {
                self.begin(rng);
                Ok(Verdict::Wrong)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.question = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_quick_taps_unlock() {
        let mut taps = TitleTapCounter::default();
        for i in 0..4 {
            assert!(!taps.tap(i as f64 * 100.0));
        }
        assert!(taps.tap(400.0));
        assert_eq!(taps.count(), 0);
    }
}
