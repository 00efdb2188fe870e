//! Story Builder Quest: put a story's sentences back in order.
//!
//! Scoring is positional partial credit - every sentence in its original
//! slot counts. A perfect ordering clears the day; anything less lets the
//! player reshuffle and try the same story again.

use rand::Rng;

use super::{shuffle, GameError, Phase, RoundOutcome};
use crate::content::Story;
use crate::domain::Skill;

/// Points per 10% of sentences placed correctly
const POINTS_PER_TENTH: i64 = 5;

#[derive(Debug, Clone)]
pub struct StoryBuilderGame {
  pub phase: Phase,
  /// 1-based day, doubles as the story index
  pub day: u32,
  pub score: i64,
  /// Sentences not yet placed, shuffled
  pub shuffled: Vec<String>,
  /// The player's ordering so far
  pub ordered: Vec<String>,
  pub last: Option<RoundOutcome>,
}

impl Default for StoryBuilderGame {
  fn default() -> Self {
    Self::new()
  }
}

impl StoryBuilderGame {
  /// Starts in `Advancing`: the first story still needs a deal.
  pub fn new() -> Self {
    Self {
      phase: Phase::Advancing,
      day: 1,
      score: 0,
      shuffled: Vec::new(),
      ordered: Vec::new(),
      last: None,
    }
  }

  pub fn current<'a>(&self, content: &'a [Story]) -> Option<&'a Story> {
    content.get(self.day as usize - 1)
  }

  /// Shuffle the current story's sentences into the pick pool.
  pub fn deal(&mut self, content: &[Story], rng: &mut impl Rng) -> Result<(), GameError> {
    if self.phase != Phase::Advancing {
      return Err(GameError::Phase { expected: Phase::Advancing, actual: self.phase });
    }
    let story = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let mut pool = story.sentences.clone();
    shuffle(&mut pool, rng);
    self.shuffled = pool;
    self.ordered.clear();
    self.phase = Phase::Answering;
    Ok(())
  }

  /// Append a sentence from the pool to the ordering.
  pub fn pick_sentence(&mut self, index: usize) -> Result<(), GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    if index < self.shuffled.len() {
      let sentence = self.shuffled.remove(index);
      self.ordered.push(sentence);
    }
    Ok(())
  }

  /// Remove a sentence from the ordering back into the pool.
  pub fn unpick_sentence(&mut self, index: usize) -> Result<(), GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    if index < self.ordered.len() {
      let sentence = self.ordered.remove(index);
      self.shuffled.push(sentence);
    }
    Ok(())
  }

  /// Score the ordering: positional partial credit.
  pub fn submit(&mut self, content: &[Story]) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let story = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let correct_positions = story
      .sentences
      .iter()
      .zip(self.ordered.iter())
      .filter(|(expected, placed)| expected == placed)
      .count();
    let total = story.sentences.len();
    let percentage = if total > 0 { (correct_positions * 100) / total } else { 0 };
    let points = (percentage as i64 / 10) * POINTS_PER_TENTH;
    let perfect = correct_positions == total && total > 0;

    let outcome = RoundOutcome {
      correct: perfect,
      verdict: None,
      score_delta: points,
      skill: Skill::Creativity,
      // Partial credit: creativity tracks earned points even on a miss
      skill_delta: (points / POINTS_PER_TENTH) as i32,
      completed_day: perfect.then_some(self.day),
    };

    self.score += outcome.score_delta;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// A perfect story advances the day; otherwise the same story is redealt.
  pub fn acknowledge(&mut self, content: &[Story]) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    let perfect = self.last.as_ref().is_some_and(|o| o.correct);
    if perfect {
      if (self.day as usize) < content.len() {
        self.day += 1;
        self.phase = Phase::Advancing;
      } else {
        self.phase = Phase::Complete;
      }
    } else {
      self.phase = Phase::Advancing;
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
    StdRng::seed_from_u64(11)
  }

  fn content() -> Vec<Story> {
    builtin::library().stories
  }

  fn order_correctly(game: &mut StoryBuilderGame, story: &Story) {
    for sentence in &story.sentences {
      let index = game
        .shuffled
        .iter()
        .position(|s| s == sentence)
        .expect("sentence in pool");
      game.pick_sentence(index).expect("pick");
    }
  }

  #[test]
  fn test_deal_shuffles_all_sentences() {
    let content = content();
    let mut game = StoryBuilderGame::new();
    game.deal(&content, &mut rng()).expect("deal");
    assert_eq!(game.phase, Phase::Answering);
    assert_eq!(game.shuffled.len(), content[0].sentences.len());

    let mut sorted_pool = game.shuffled.clone();
    let mut sorted_story = content[0].sentences.clone();
    sorted_pool.sort();
    sorted_story.sort();
    assert_eq!(sorted_pool, sorted_story);
  }

  #[test]
  fn test_perfect_order_full_credit() {
    let content = content();
    let mut game = StoryBuilderGame::new();
    game.deal(&content, &mut rng()).expect("deal");
    order_correctly(&mut game, &content[0]);

    let outcome = game.submit(&content).expect("submit");
    assert!(outcome.correct);
    // 100% -> 10 tenths * 5 points
    assert_eq!(outcome.score_delta, 50);
    assert_eq!(outcome.skill_delta, 10);
    assert_eq!(outcome.completed_day, Some(1));

    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.day, 2);
    assert_eq!(game.phase, Phase::Advancing);
  }

  #[test]
  fn test_partial_order_partial_credit() {
    let content = content();
    let mut game = StoryBuilderGame::new();
    game.deal(&content, &mut rng()).expect("deal");

    // Place only the first half correctly, then the rest in pool order
    let story = &content[0];
    for sentence in story.sentences.iter().take(3) {
      let index = game.shuffled.iter().position(|s| s == sentence).expect("in pool");
      game.pick_sentence(index).expect("pick");
    }
    while !game.shuffled.is_empty() {
      game.pick_sentence(0).expect("pick");
    }

    let outcome = game.submit(&content).expect("submit");
    assert!(outcome.score_delta >= 25);
    assert!(outcome.skill_delta >= 5);
    if !outcome.correct {
      assert_eq!(outcome.completed_day, None);
      // Imperfect story is redealt, same day
      game.acknowledge(&content).expect("acknowledge");
      assert_eq!(game.day, 1);
      assert_eq!(game.phase, Phase::Advancing);
    }
  }

  #[test]
  fn test_empty_ordering_scores_zero() {
    let content = content();
    let mut game = StoryBuilderGame::new();
    game.deal(&content, &mut rng()).expect("deal");

    let outcome = game.submit(&content).expect("submit");
    assert!(!outcome.correct);
    assert_eq!(outcome.score_delta, 0);
    assert_eq!(outcome.skill_delta, 0);
  }

  #[test]
  fn test_unpick_restores_pool() {
    let content = content();
    let mut game = StoryBuilderGame::new();
    game.deal(&content, &mut rng()).expect("deal");

    game.pick_sentence(0).expect("pick");
    game.pick_sentence(0).expect("pick");
    assert_eq!(game.ordered.len(), 2);

    game.unpick_sentence(1).expect("unpick");
    assert_eq!(game.ordered.len(), 1);
    assert_eq!(game.shuffled.len(), content[0].sentences.len() - 1);
  }

  #[test]
  fn test_completes_after_last_story() {
    let content: Vec<Story> = content().into_iter().take(1).collect();
    let mut game = StoryBuilderGame::new();
    game.deal(&content, &mut rng()).expect("deal");
    order_correctly(&mut game, &content[0]);
    game.submit(&content).expect("submit");
    game.acknowledge(&content).expect("acknowledge");
    assert_eq!(game.phase, Phase::Complete);
  }

  #[test]
  fn test_submit_before_deal_is_rejected() {
    let content = content();
    let mut game = StoryBuilderGame::new();
    let err = game.submit(&content).expect_err("not dealt yet");
    assert!(matches!(err, GameError::Phase { .. }));
  }
}
