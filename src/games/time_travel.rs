//! Time Travel Questions: past answers steer future difficulty.
//!
//! The last three answers pick the difficulty bucket for the next question:
//! two or more correct climbs to hard, exactly one stays medium, none drops
//! to easy. Harder questions pay proportionally more.

use super::{GameError, Phase, RoundOutcome};
use crate::content::QuizQuestion;
use crate::domain::Skill;

/// Questions per run
pub const TOTAL_QUESTIONS: u32 = 15;

/// How many recent answers steer the difficulty
const HISTORY_WINDOW: usize = 3;

#[derive(Debug, Clone)]
pub struct TimeTravelGame {
  pub phase: Phase,
  /// 0-based question counter
  pub question_number: u32,
  pub score: i64,
  /// Whether each past answer was correct, oldest first
  pub history: Vec<bool>,
  pub last: Option<RoundOutcome>,
}

impl Default for TimeTravelGame {
  fn default() -> Self {
    Self::new()
  }
}

impl TimeTravelGame {
  pub fn new() -> Self {
    Self {
      phase: Phase::Answering,
      question_number: 0,
      score: 0,
      history: Vec::new(),
      last: None,
    }
  }

  /// Difficulty for the next question, from the recent answer window.
  pub fn difficulty(&self) -> u8 {
    let recent = self.history.iter().rev().take(HISTORY_WINDOW);
    let correct = recent.filter(|&&c| c).count();
    match correct {
      n if n >= 2 => 3,
      1 => 2,
      _ => 1,
    }
  }

  /// The question presented right now. Falls back to the whole table when
  /// the difficulty bucket has no rows.
  pub fn current<'a>(&self, content: &'a [QuizQuestion]) -> Option<&'a QuizQuestion> {
    if content.is_empty() {
      return None;
    }
    let difficulty = self.difficulty();
    let bucket: Vec<&QuizQuestion> =
      content.iter().filter(|q| q.difficulty == difficulty).collect();
    if bucket.is_empty() {
      content.get(self.question_number as usize % content.len())
    } else {
      bucket.get(self.question_number as usize % bucket.len()).copied()
    }
  }

  /// Submit the index of the chosen option.
  pub fn submit(&mut self, option_index: usize, content: &[QuizQuestion]) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let difficulty = self.difficulty();
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.question_number + 1 })?;

    let correct = option_index == question.correct_index;
    let outcome = RoundOutcome {
      correct,
      verdict: None,
      score_delta: if correct { i64::from(difficulty) * 10 } else { 0 },
      skill: Skill::Logic,
      skill_delta: if correct { i32::from(difficulty) } else { 0 },
      completed_day: None,
    };

    self.history.push(correct);
    self.score += outcome.score_delta;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// Always moves on - in this timeline there is no retrying the past.
  pub fn acknowledge(&mut self) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    self.question_number += 1;
    if self.question_number >= TOTAL_QUESTIONS {
      self.phase = Phase::Complete;
    } else {
      self.phase = Phase::Answering;
    }
    Ok(())
  }
}
