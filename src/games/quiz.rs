//! Quiz Battle Arena: ten questions against the clock and a rival.
//!
//! The UI owns the countdown and reports the seconds left with each
//! submission; the machine turns that into a time bonus. Versus-rival mode
//! gives a simulated opponent a 60% hit rate with random points, driven by
//! the caller's RNG. A timeout is submitted as a blank answer.

use rand::Rng;

use super::{GameError, Phase, RoundOutcome};
use crate::content::QuizQuestion;
use crate::domain::Skill;
use crate::validation;

/// Questions per battle
pub const TOTAL_QUESTIONS: u32 = 10;

/// Seconds on the clock per question
pub const QUESTION_SECONDS: u32 = 15;

/// Floor for the time-bonus formula
const MIN_POINTS: i64 = 5;

const SPEED_SKILL_POINTS: i32 = 2;

/// Rival answers correctly with this probability
const RIVAL_HIT_RATE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleMode {
  /// Against the simulated rival
  VersusRival,
  /// Pass-and-play against another learner on the same device
  VersusPlayer,
}

#[derive(Debug, Clone)]
pub struct QuizBattleGame {
  pub phase: Phase,
  pub mode: Option<BattleMode>,
  /// Index into the question table, wraps around
  pub question_index: usize,
  pub questions_answered: u32,
  pub player_score: i64,
  pub rival_score: i64,
  pub last: Option<RoundOutcome>,
}

impl Default for QuizBattleGame {
  fn default() -> Self {
    Self::new()
  }
}

impl QuizBattleGame {
  pub fn new() -> Self {
    Self {
      phase: Phase::Selecting,
      mode: None,
      question_index: 0,
      questions_answered: 0,
      player_score: 0,
      rival_score: 0,
      last: None,
    }
  }

  pub fn select_mode(&mut self, mode: BattleMode) -> Result<(), GameError> {
    if self.phase != Phase::Selecting {
      return Err(GameError::Phase { expected: Phase::Selecting, actual: self.phase });
    }
    self.mode = Some(mode);
    self.phase = Phase::Answering;
    Ok(())
  }

  pub fn current<'a>(&self, content: &'a [QuizQuestion]) -> Option<&'a QuizQuestion> {
    if content.is_empty() {
      return None;
    }
    content.get(self.question_index % content.len())
  }

  /// Time bonus: answering fast pays more, floor of 5.
  fn points_for(time_left: u32) -> i64 {
    MIN_POINTS.max(i64::from(time_left / 3) * 5)
  }

  /// Submit an answer, or `None` when the clock ran out. `time_left` is the
  /// seconds remaining as reported by the UI.
  pub fn submit(
    &mut self,
    answer: Option<&str>,
    time_left: u32,
    content: &[QuizQuestion],
    rng: &mut impl Rng,
  ) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.questions_answered + 1 })?;
    let correct_option = question
      .options
      .get(question.correct_index)
      .ok_or(GameError::MissingContent { day: question.day })?;

    let verdict = validation::validate_default(answer.unwrap_or(""), &[correct_option.as_str()])?;
    let points = if verdict.is_match { Self::points_for(time_left) } else { 0 };
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: points,
      skill: Skill::Speed,
      skill_delta: if verdict.is_match { SPEED_SKILL_POINTS } else { 0 },
      completed_day: None,
      verdict: Some(verdict),
    };

    self.player_score += points;

    // The rival scores independently of the player's result
    if self.mode == Some(BattleMode::VersusRival) && rng.random::<f64>() < RIVAL_HIT_RATE {
      self.rival_score += rng.random_range(5..15);
    }

    self.questions_answered += 1;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// Move on: next question, or the final scoreboard after the last one.
  pub fn acknowledge(&mut self) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    if self.questions_answered >= TOTAL_QUESTIONS {
      self.phase = Phase::Complete;
    } else {
      self.question_index += 1;
      self.phase = Phase::Answering;
    }
    Ok(())
  }

  /// Did the player beat the rival? Only meaningful once complete.
  pub fn player_won(&self) -> bool {
    self.player_score > self.rival_score
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::builtin;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn rng() -> StdRng {
    StdRng::seed_from_u64(3)
  }

  fn content() -> Vec<QuizQuestion> {
    builtin::library().quiz_questions
  }

  fn correct_option(game: &QuizBattleGame, content: &[QuizQuestion]) -> String {
    let q = game.current(content).expect("question");
    q.options[q.correct_index].clone()
  }

  #[test]
  fn test_time_bonus_formula() {
    assert_eq!(QuizBattleGame::points_for(15), 25);
    assert_eq!(QuizBattleGame::points_for(9), 15);
    assert_eq!(QuizBattleGame::points_for(3), 5);
    // Floor: even a last-second answer pays
    assert_eq!(QuizBattleGame::points_for(1), 5);
    assert_eq!(QuizBattleGame::points_for(0), 5);
  }

  #[test]
  fn test_correct_answer_scores_with_bonus() {
    let content = content();
    let mut game = QuizBattleGame::new();
    game.select_mode(BattleMode::VersusPlayer).expect("mode");

    let answer = correct_option(&game, &content);
    let outcome = game.submit(Some(&answer), 12, &content, &mut rng()).expect("submit");
    assert!(outcome.correct);
    assert_eq!(outcome.score_delta, 20);
    assert_eq!(game.player_score, 20);
    // No rival in pass-and-play
    assert_eq!(game.rival_score, 0);
  }

  #[test]
  fn test_timeout_counts_as_blank_answer() {
    let content = content();
    let mut game = QuizBattleGame::new();
    game.select_mode(BattleMode::VersusRival).expect("mode");

    let outcome = game.submit(None, 0, &content, &mut rng()).expect("submit");
    assert!(!outcome.correct);
    assert_eq!(outcome.score_delta, 0);
    assert_eq!(game.questions_answered, 1);
  }

  #[test]
  fn test_rival_scoring_is_seed_deterministic() {
    let content = content();
    let mut a = QuizBattleGame::new();
    let mut b = QuizBattleGame::new();
    a.select_mode(BattleMode::VersusRival).expect("mode");
    b.select_mode(BattleMode::VersusRival).expect("mode");

    let mut rng_a = rng();
    let mut rng_b = rng();
    for _ in 0..5 {
      a.submit(None, 0, &content, &mut rng_a).expect("submit");
      a.acknowledge().expect("acknowledge");
      b.submit(None, 0, &content, &mut rng_b).expect("submit");
      b.acknowledge().expect("acknowledge");
    }
    assert_eq!(a.rival_score, b.rival_score);
  }

  #[test]
  fn test_battle_ends_after_total_questions() {
    let content = content();
    let mut game = QuizBattleGame::new();
    game.select_mode(BattleMode::VersusRival).expect("mode");
    let mut battle_rng = rng();

    for i in 0..TOTAL_QUESTIONS {
      let answer = correct_option(&game, &content);
      game.submit(Some(&answer), QUESTION_SECONDS, &content, &mut battle_rng).expect("submit");
      game.acknowledge().expect("acknowledge");
      if i < TOTAL_QUESTIONS - 1 {
        assert_eq!(game.phase, Phase::Answering);
      }
    }
    assert_eq!(game.phase, Phase::Complete);
    // Every answer at full clock: 10 * 25
    assert_eq!(game.player_score, 250);
  }

  #[test]
  fn test_question_index_wraps_over_table() {
    let content: Vec<QuizQuestion> = content().into_iter().take(3).collect();
    let mut game = QuizBattleGame::new();
    game.select_mode(BattleMode::VersusPlayer).expect("mode");
    let mut battle_rng = rng();

    for _ in 0..5 {
      game.submit(None, 0, &content, &mut battle_rng).expect("submit");
      game.acknowledge().expect("acknowledge");
    }
    // Index 5 wraps to question 5 % 3
    assert!(game.current(&content).is_some());
  }

  #[test]
  fn test_submit_requires_mode_selection() {
    let content = content();
    let mut game = QuizBattleGame::new();
    let err = game.submit(Some("21"), 10, &content, &mut rng()).expect_err("no mode");
    assert!(matches!(err, GameError::Phase { .. }));
  }
}
