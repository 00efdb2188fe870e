//! Visual to Word: pick the word that matches the image cue.
//!
//! Options come straight from the content table; the image itself is a
//! placeholder cue (no asset pipeline), so the machine only cares about the
//! chosen word.

use super::{GameError, Phase, RoundOutcome};
use crate::content::VisualWord;
use crate::domain::Skill;
use crate::validation;

const WORD_SCORE: i64 = 10;
const WORD_SKILL_POINTS: i32 = 2;

#[derive(Debug, Clone)]
pub struct VisualWordGame {
  pub phase: Phase,
  pub day: u32,
  pub score: i64,
  pub last: Option<RoundOutcome>,
}

impl Default for VisualWordGame {
  fn default() -> Self {
    Self::new()
  }
}

impl VisualWordGame {
  pub fn new() -> Self {
    Self { phase: Phase::Answering, day: 1, score: 0, last: None }
  }

  pub fn current<'a>(&self, content: &'a [VisualWord]) -> Option<&'a VisualWord> {
    content.get(self.day as usize - 1)
  }

  pub fn submit(&mut self, word: &str, content: &[VisualWord]) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let verdict = validation::validate_default(word, &[question.correct_word.as_str()])?;
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: if verdict.is_match { WORD_SCORE } else { 0 },
      skill: Skill::Vocabulary,
      skill_delta: if verdict.is_match { WORD_SKILL_POINTS } else { 0 },
      completed_day: verdict.is_match.then_some(self.day),
      verdict: Some(verdict),
    };

    self.score += outcome.score_delta;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  pub fn acknowledge(&mut self, content: &[VisualWord]) -> Result<(), GameError> {
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

  fn content() -> Vec<VisualWord> {
    builtin::library().visual_words
  }

  #[test]
  fn test_correct_word_advances() {
    let content = content();
    let mut game = VisualWordGame::new();

    let outcome = game
      .submit(&content[0].correct_word.clone(), &content)
      .expect("submit");
    assert!(outcome.correct);
    assert_eq!(outcome.score_delta, WORD_SCORE);
    assert_eq!(outcome.completed_day, Some(1));

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 2);
  }

  #[test]
  fn test_wrong_word_allows_retry() {
    let content = content();
    let mut game = VisualWordGame::new();

    // Pick a distractor option
    let wrong = content[0]
      .options
      .iter()
      .find(|o| **o != content[0].correct_word)
      .expect("distractor")
      .clone();
    let outcome = game.submit(&wrong, &content).expect("submit");
    assert!(!outcome.correct);
    assert_eq!(game.score, 0);

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 1);
    assert_eq!(game.phase, Phase::Answering);
  }

  #[test]
  fn test_last_image_completes_run() {
    let content: Vec<VisualWord> = content().into_iter().take(1).collect();
    let mut game = VisualWordGame::new();
    game.submit(&content[0].correct_word.clone(), &content).expect("submit");
    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.phase, Phase::Complete);
  }
}
