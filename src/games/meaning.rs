//! Match the Meaning: pair a word with its meaning among distractors.
//!
//! The day's meaning is shuffled in with its distractors; picking the right
//! one advances, a wrong pick just clears the selection for another try.

use rand::Rng;

use super::{shuffle, GameError, Phase, RoundOutcome};
use crate::content::MeaningPair;
use crate::domain::Skill;
use crate::validation;

const MATCH_SCORE: i64 = 10;
const MATCH_SKILL_POINTS: i32 = 2;

#[derive(Debug, Clone)]
pub struct MatchMeaningGame {
  pub phase: Phase,
  pub day: u32,
  pub score: i64,
  /// Meaning cards on the table, shuffled
  pub choices: Vec<String>,
  pub last: Option<RoundOutcome>,
}

impl Default for MatchMeaningGame {
  fn default() -> Self {
    Self::new()
  }
}

impl MatchMeaningGame {
  /// Starts in `Advancing`: the first day's cards still need a deal.
  pub fn new() -> Self {
    Self {
      phase: Phase::Advancing,
      day: 1,
      score: 0,
      choices: Vec::new(),
      last: None,
    }
  }

  pub fn current<'a>(&self, content: &'a [MeaningPair]) -> Option<&'a MeaningPair> {
    content.get(self.day as usize - 1)
  }

  /// Lay out the day's meaning cards, shuffled.
  pub fn deal(&mut self, content: &[MeaningPair], rng: &mut impl Rng) -> Result<(), GameError> {
    if self.phase != Phase::Advancing {
      return Err(GameError::Phase { expected: Phase::Advancing, actual: self.phase });
    }
    let pair = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let mut choices = vec![pair.meaning.clone()];
    choices.extend(pair.distractors.iter().cloned());
    shuffle(&mut choices, rng);
    self.choices = choices;
    self.phase = Phase::Answering;
    Ok(())
  }

  /// Submit the chosen meaning card.
  pub fn submit(&mut self, meaning: &str, content: &[MeaningPair]) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let pair = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let verdict = validation::validate_default(meaning, &[pair.meaning.as_str()])?;
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: if verdict.is_match { MATCH_SCORE } else { 0 },
      skill: Skill::Vocabulary,
      skill_delta: if verdict.is_match { MATCH_SKILL_POINTS } else { 0 },
      completed_day: verdict.is_match.then_some(self.day),
      verdict: Some(verdict),
    };

    self.score += outcome.score_delta;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// A correct match deals the next word; a miss returns to the same cards.
  pub fn acknowledge(&mut self, content: &[MeaningPair]) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    let correct = self.last.as_ref().is_some_and(|o| o.correct);
    if correct {
      if (self.day as usize) < content.len() {
        self.day += 1;
        self.phase = Phase::Advancing;
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
  use rand::SeedableRng;
  use rand::rngs::StdRng;

  fn rng() -> StdRng {
    StdRng::seed_from_u64(23)
  }

  fn content() -> Vec<MeaningPair> {
    builtin::library().meaning_pairs
  }

  #[test]
  fn test_deal_includes_meaning_and_distractors() {
    let content = content();
    let mut game = MatchMeaningGame::new();
    game.deal(&content, &mut rng()).expect("deal");

    assert_eq!(game.choices.len(), 1 + content[0].distractors.len());
    assert!(game.choices.contains(&content[0].meaning));
    for d in &content[0].distractors {
      assert!(game.choices.contains(d));
    }
  }

  #[test]
  fn test_correct_match_advances_day() {
    let content = content();
    let mut game = MatchMeaningGame::new();
    game.deal(&content, &mut rng()).expect("deal");

    let outcome = game.submit(&content[0].meaning.clone(), &content).expect("submit");
    assert!(outcome.correct);
    assert_eq!(outcome.score_delta, MATCH_SCORE);
    assert_eq!(outcome.completed_day, Some(1));

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 2);
    assert_eq!(game.phase, Phase::Advancing);
  }

  #[test]
  fn test_wrong_match_keeps_cards_for_retry() {
    let content = content();
    let mut game = MatchMeaningGame::new();
    game.deal(&content, &mut rng()).expect("deal");

    let wrong = content[0].distractors[0].clone();
    let outcome = game.submit(&wrong, &content).expect("submit");
    assert!(!outcome.correct);

    let cards_before = game.choices.clone();
    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 1);
    assert_eq!(game.phase, Phase::Answering);
    assert_eq!(game.choices, cards_before);
  }

  #[test]
  fn test_all_words_matched_completes() {
    let content: Vec<MeaningPair> = content().into_iter().take(3).collect();
    let mut game = MatchMeaningGame::new();

    for day in 1..=3 {
      game.deal(&content, &mut rng()).expect("deal");
      let meaning = content[day - 1].meaning.clone();
      game.submit(&meaning, &content).expect("submit");
      game.acknowledge(&content).expect("acknowledge");
    }
    assert_eq!(game.phase, Phase::Complete);
    assert_eq!(game.score, 3 * MATCH_SCORE);
  }
}
