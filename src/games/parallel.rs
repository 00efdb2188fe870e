//! Parallel Sentence: recognize or rebuild a sentence with the same meaning.
//!
//! Two modes. *Match* shows the English prompt and a handful of candidate
//! parallels - pick the one that means the same. *Rearrange* hands out the
//! parallel's words shuffled - rebuild the sentence. Both submit through the
//! validator, so a near-miss ("very close") still counts.

use rand::Rng;

use super::{shuffle, GameError, Phase, RoundOutcome};
use crate::config;
use crate::content::SentencePair;
use crate::domain::Skill;
use crate::validation;

/// Points for a correct pick in match mode
const MATCH_SCORE: i64 = 10;
const MATCH_SKILL_POINTS: i32 = 2;

/// Rearranging is harder and pays more
const REARRANGE_SCORE: i64 = 15;
const REARRANGE_SKILL_POINTS: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParallelMode {
  Match,
  Rearrange,
}

#[derive(Debug, Clone)]
pub struct ParallelSentenceGame {
  pub phase: Phase,
  pub mode: Option<ParallelMode>,
  /// 1-based day, doubles as the question index
  pub day: u32,
  pub score: i64,
  /// Match mode: candidate sentences, shuffled
  pub choices: Vec<String>,
  /// Rearrange mode: words still available to pick
  pub word_bank: Vec<String>,
  /// Rearrange mode: words picked so far, in order
  pub picked: Vec<String>,
  /// Verdict of the last submission, for the feedback screen
  pub last: Option<RoundOutcome>,
}

impl Default for ParallelSentenceGame {
  fn default() -> Self {
    Self::new()
  }
}

impl ParallelSentenceGame {
  pub fn new() -> Self {
    Self {
      phase: Phase::Selecting,
      mode: None,
      day: 1,
      score: 0,
      choices: Vec::new(),
      word_bank: Vec::new(),
      picked: Vec::new(),
      last: None,
    }
  }

  pub fn current<'a>(&self, content: &'a [SentencePair]) -> Option<&'a SentencePair> {
    content.get(self.day as usize - 1)
  }

  /// Pick a mode and deal the first round.
  pub fn select_mode(
    &mut self,
    mode: ParallelMode,
    content: &[SentencePair],
    rng: &mut impl Rng,
  ) -> Result<(), GameError> {
    if self.phase != Phase::Selecting {
      return Err(GameError::Phase { expected: Phase::Selecting, actual: self.phase });
    }
    self.mode = Some(mode);
    self.phase = Phase::Advancing;
    self.deal(content, rng)
  }

  /// Prepare the current day's round: choices for match mode, a shuffled
  /// word bank for rearrange mode.
  pub fn deal(&mut self, content: &[SentencePair], rng: &mut impl Rng) -> Result<(), GameError> {
    if self.phase != Phase::Advancing {
      return Err(GameError::Phase { expected: Phase::Advancing, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    match self.mode {
      Some(ParallelMode::Match) => {
        let mut choices = vec![question.parallel.clone()];
        // Parallels from other days act as distractors
        let mut others: Vec<&SentencePair> =
          content.iter().filter(|s| s.day != question.day).collect();
        shuffle(&mut others, rng);
        choices.extend(
          others
            .iter()
            .take(config::DISTRACTOR_COUNT)
            .map(|s| s.parallel.clone()),
        );
        shuffle(&mut choices, rng);
        self.choices = choices;
      }
      Some(ParallelMode::Rearrange) => {
        let mut bank = question.words.clone();
        shuffle(&mut bank, rng);
        self.word_bank = bank;
        self.picked.clear();
      }
      None => {
        return Err(GameError::Phase { expected: Phase::Selecting, actual: self.phase });
      }
    }

    self.phase = Phase::Answering;
    Ok(())
  }

  /// Match mode: submit the chosen sentence.
  pub fn submit_match(
    &mut self,
    answer: &str,
    content: &[SentencePair],
  ) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering || self.mode != Some(ParallelMode::Match) {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let verdict = validation::validate_default(answer, &[question.parallel.as_str()])?;
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: if verdict.is_match { MATCH_SCORE } else { 0 },
      skill: Skill::Vocabulary,
      skill_delta: if verdict.is_match { MATCH_SKILL_POINTS } else { 0 },
      completed_day: verdict.is_match.then_some(self.day),
      verdict: Some(verdict),
    };

    if outcome.correct {
      self.score += outcome.score_delta;
    }
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// Rearrange mode: move a word from the bank into the sentence.
  pub fn pick_word(&mut self, index: usize) -> Result<(), GameError> {
    if self.phase != Phase::Answering || self.mode != Some(ParallelMode::Rearrange) {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    if index < self.word_bank.len() {
      let word = self.word_bank.remove(index);
      self.picked.push(word);
    }
    Ok(())
  }

  /// Rearrange mode: put a picked word back into the bank.
  pub fn unpick_word(&mut self, index: usize) -> Result<(), GameError> {
    if self.phase != Phase::Answering || self.mode != Some(ParallelMode::Rearrange) {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    if index < self.picked.len() {
      let word = self.picked.remove(index);
      self.word_bank.push(word);
    }
    Ok(())
  }

  /// Rearrange mode: submit the sentence built so far.
  pub fn submit_rearranged(&mut self, content: &[SentencePair]) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering || self.mode != Some(ParallelMode::Rearrange) {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let built = self.picked.join(" ");
    let expected = question.words.join(" ");
    let verdict = validation::validate_default(&built, &[expected.as_str()])?;
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: if verdict.is_match { REARRANGE_SCORE } else { 0 },
      skill: Skill::Vocabulary,
      skill_delta: if verdict.is_match { REARRANGE_SKILL_POINTS } else { 0 },
      completed_day: verdict.is_match.then_some(self.day),
      verdict: Some(verdict),
    };

    if outcome.correct {
      self.score += outcome.score_delta;
    }
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// Leave the feedback screen. A correct answer advances to the next day
  /// (or completes the run); a wrong one returns to the same question.
  pub fn acknowledge(&mut self, content: &[SentencePair]) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    let correct = self.last.as_ref().is_some_and(|o| o.correct);
    if !correct {
      // Retry the same question; match choices stay on screen
      self.phase = Phase::Answering;
      if self.mode == Some(ParallelMode::Rearrange) {
        // Put the attempt back in the bank, order preserved
        self.word_bank.append(&mut self.picked);
      }
      return Ok(());
    }

    if (self.day as usize) < content.len() {
      self.day += 1;
      self.phase = Phase::Advancing;
    } else {
      self.phase = Phase::Complete;
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::content::builtin;
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
  }

  fn content() -> Vec<crate::content::SentencePair> {
    builtin::library().sentences
  }

  #[test]
  fn test_starts_selecting() {
    let game = ParallelSentenceGame::new();
    assert_eq!(game.phase, Phase::Selecting);
    assert_eq!(game.day, 1);
  }

  #[test]
  fn test_match_mode_deals_choices() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");

    assert_eq!(game.phase, Phase::Answering);
    assert_eq!(game.choices.len(), 1 + config::DISTRACTOR_COUNT);
    assert!(game.choices.contains(&content[0].parallel));
  }

  #[test]
  fn test_deal_is_deterministic_with_seed() {
    let content = content();
    let mut a = ParallelSentenceGame::new();
    let mut b = ParallelSentenceGame::new();
    a.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");
    b.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");
    assert_eq!(a.choices, b.choices);
  }

  #[test]
  fn test_correct_match_scores_and_advances() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");

    let outcome = game.submit_match(&content[0].parallel.clone(), &content).expect("submit");
    assert!(outcome.correct);
    assert!(outcome.verdict.as_ref().is_some_and(|v| v.is_exact));
    assert_eq!(outcome.score_delta, MATCH_SCORE);
    assert_eq!(outcome.completed_day, Some(1));
    assert_eq!(game.score, MATCH_SCORE);
    assert_eq!(game.phase, Phase::Feedback);

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 2);
    assert_eq!(game.phase, Phase::Advancing);
  }

  #[test]
  fn test_near_miss_still_matches() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");

    // Typo in the day-1 parallel
    let answer = content[0].parallel.replace("eastern", "eastren");
    let outcome = game.submit_match(&answer, &content).expect("submit");
    assert!(outcome.correct);
    assert!(outcome.verdict.as_ref().is_some_and(|v| !v.is_exact));
  }

  #[test]
  fn test_wrong_match_keeps_day_for_retry() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");

    let outcome = game.submit_match("something else entirely", &content).expect("submit");
    assert!(!outcome.correct);
    assert_eq!(outcome.completed_day, None);
    assert_eq!(game.score, 0);

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 1);
    assert_eq!(game.phase, Phase::Answering);
  }

  #[test]
  fn test_rearrange_flow() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Rearrange, &content, &mut rng()).expect("select");

    let expected = content[0].words.clone();
    assert_eq!(game.word_bank.len(), expected.len());

    // Pick words back into the correct order
    for word in &expected {
      let index = game.word_bank.iter().position(|w| w == word).expect("word in bank");
      game.pick_word(index).expect("pick");
    }
    assert!(game.word_bank.is_empty());

    let outcome = game.submit_rearranged(&content).expect("submit");
    assert!(outcome.correct);
    assert_eq!(outcome.score_delta, REARRANGE_SCORE);
    assert_eq!(outcome.skill_delta, REARRANGE_SKILL_POINTS);
  }

  #[test]
  fn test_unpick_returns_word_to_bank() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Rearrange, &content, &mut rng()).expect("select");

    let bank_size = game.word_bank.len();
    game.pick_word(0).expect("pick");
    assert_eq!(game.picked.len(), 1);
    game.unpick_word(0).expect("unpick");
    assert!(game.picked.is_empty());
    assert_eq!(game.word_bank.len(), bank_size);
  }

  #[test]
  fn test_failed_rearrange_refills_bank_on_acknowledge() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Rearrange, &content, &mut rng()).expect("select");

    game.pick_word(0).expect("pick");
    let outcome = game.submit_rearranged(&content).expect("submit");
    assert!(!outcome.correct);

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.word_bank.len(), content[0].words.len());
    assert!(game.picked.is_empty());
  }

  #[test]
  fn test_run_completes_after_last_day() {
    let content: Vec<_> = content().into_iter().take(2).collect();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");

    for day in 1..=2 {
      let parallel = content[day - 1].parallel.clone();
      game.submit_match(&parallel, &content).expect("submit");
      game.acknowledge(&content).expect("acknowledge");
      if day < 2 {
        game.deal(&content, &mut rng()).expect("deal");
      }
    }
    assert_eq!(game.phase, Phase::Complete);
    assert_eq!(game.score, 2 * MATCH_SCORE);
  }

  #[test]
  fn test_submit_outside_answering_is_rejected() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    let err = game.submit_match("anything", &content).expect_err("wrong phase");
    assert!(matches!(err, GameError::Phase { .. }));
  }

  #[test]
  fn test_select_mode_twice_is_rejected() {
    let content = content();
    let mut game = ParallelSentenceGame::new();
    game.select_mode(ParallelMode::Match, &content, &mut rng()).expect("select");
    let err = game
      .select_mode(ParallelMode::Rearrange, &content, &mut rng())
      .expect_err("already selected");
    assert!(matches!(err, GameError::Phase { .. }));
  }
}
