//! Error Detective: spot the mistake and type the corrected sentence.
//!
//! Free-text entry straight into the validator, so small typos in an
//! otherwise right correction still pass.

use super::{GameError, Phase, RoundOutcome};
use crate::content::ErrorQuestion;
use crate::domain::Skill;
use crate::validation;

const FIX_SCORE: i64 = 15;
const FIX_SKILL_POINTS: i32 = 3;

#[derive(Debug, Clone)]
pub struct ErrorDetectiveGame {
  pub phase: Phase,
  pub day: u32,
  pub score: i64,
  pub last: Option<RoundOutcome>,
}

impl Default for ErrorDetectiveGame {
  fn default() -> Self {
    Self::new()
  }
}

impl ErrorDetectiveGame {
  pub fn new() -> Self {
    Self { phase: Phase::Answering, day: 1, score: 0, last: None }
  }

  pub fn current<'a>(&self, content: &'a [ErrorQuestion]) -> Option<&'a ErrorQuestion> {
    content.get(self.day as usize - 1)
  }

  /// Submit the corrected sentence.
  pub fn submit(&mut self, correction: &str, content: &[ErrorQuestion]) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let verdict = validation::validate_default(correction, &[question.correct_sentence.as_str()])?;
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: if verdict.is_match { FIX_SCORE } else { 0 },
      skill: Skill::Logic,
      skill_delta: if verdict.is_match { FIX_SKILL_POINTS } else { 0 },
      completed_day: verdict.is_match.then_some(self.day),
      verdict: Some(verdict),
    };

    self.score += outcome.score_delta;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// A solved case advances to the next sentence; a miss allows a retry.
  pub fn acknowledge(&mut self, content: &[ErrorQuestion]) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    let correct = self.last.as_ref().is_some_and(|o| o.correct);
    if correct {
      if (self.day as usize) < content.len() {
        self.day += 1;
        self.phase = Phase::Answering;
      } else {
        self.phase = Phase::Complete;
      }
    } else {
      self.phase = Phase::Answering;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::builtin;

  fn content() -> Vec<ErrorQuestion> {
    builtin::library().error_questions
  }

  #[test]
  fn test_exact_correction_advances() {
    let content = content();
    let mut game = ErrorDetectiveGame::new();

    let outcome = game
      .submit(&content[0].correct_sentence.clone(), &content)
      .expect("submit");
    assert!(outcome.correct);
    assert!(outcome.verdict.as_ref().is_some_and(|v| v.is_exact));
    assert_eq!(outcome.score_delta, FIX_SCORE);
    assert_eq!(outcome.completed_day, Some(1));

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 2);
    assert_eq!(game.phase, Phase::Answering);
  }

  #[test]
  fn test_close_correction_accepted() {
    let content = content();
    let mut game = ErrorDetectiveGame::new();

    // "She goes to school daily." with a dropped period
    let answer = content[0].correct_sentence.trim_end_matches('.').to_string();
    let outcome = game.submit(&answer, &content).expect("submit");
    assert!(outcome.correct);
    assert!(outcome.verdict.as_ref().is_some_and(|v| !v.is_exact));
  }

  #[test]
  fn test_unfixed_sentence_is_not_enough() {
    let content = content();
    let mut game = ErrorDetectiveGame::new();

    // Submitting the faulty sentence unchanged must not pass as exact
    let outcome = game
      .submit(&content[0].incorrect_sentence.clone(), &content)
      .expect("submit");
    assert!(outcome.verdict.as_ref().is_some_and(|v| !v.is_exact));
  }

  #[test]
  fn test_wrong_correction_allows_retry() {
    let content = content();
    let mut game = ErrorDetectiveGame::new();

    let outcome = game.submit("completely unrelated words", &content).expect("submit");
    assert!(!outcome.correct);
    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 1);
    assert_eq!(game.phase, Phase::Answering);
  }

  #[test]
  fn test_all_cases_solved_completes() {
    let content: Vec<ErrorQuestion> = content().into_iter().take(2).collect();
    let mut game = ErrorDetectiveGame::new();

    for day in 1..=2 {
      let fix = content[day - 1].correct_sentence.clone();
      game.submit(&fix, &content).expect("submit");
      game.acknowledge(&content).expect("acknowledge");
    }
    assert_eq!(game.phase, Phase::Complete);
    assert_eq!(game.score, 2 * FIX_SCORE);
  }
}
