//! Concept Ladder: climb subject questions step by step.
//!
//! Pick science or math, then answer the day's questions in step order. A
//! correct answer climbs one rung, a wrong one slides down (never below the
//! first rung). Topping out a day's ladder clears the day.

use super::{GameError, Phase, RoundOutcome};
use crate::content::{ConceptQuestion, ContentLibrary, Subject};
use crate::domain::Skill;
use crate::validation;

const STEP_SCORE: i64 = 10;
const STEP_SKILL_POINTS: i32 = 2;

#[derive(Debug, Clone)]
pub struct ConceptLadderGame {
  pub phase: Phase,
  pub subject: Option<Subject>,
  pub day: u32,
  pub step: u32,
  pub score: i64,
  pub last: Option<RoundOutcome>,
}

impl Default for ConceptLadderGame {
  fn default() -> Self {
    Self::new()
  }
}

impl ConceptLadderGame {
  pub fn new() -> Self {
    Self {
      phase: Phase::Selecting,
      subject: None,
      day: 1,
      step: 1,
      score: 0,
      last: None,
    }
  }

  pub fn select_subject(&mut self, subject: Subject) -> Result<(), GameError> {
    if self.phase != Phase::Selecting {
      return Err(GameError::Phase { expected: Phase::Selecting, actual: self.phase });
    }
    self.subject = Some(subject);
    self.phase = Phase::Answering;
    Ok(())
  }

  fn subject_or_err(&self) -> Result<Subject, GameError> {
    self
      .subject
      .ok_or(GameError::Phase { expected: Phase::Selecting, actual: self.phase })
  }

  /// The question at the current (day, step), if authored.
  pub fn current<'a>(&self, content: &'a ContentLibrary) -> Option<&'a ConceptQuestion> {
    let subject = self.subject?;
    content
      .concept_questions
      .iter()
      .find(|q| q.subject == subject && q.day == self.day && q.step == self.step)
  }

  /// Number of rungs authored for the current day.
  pub fn max_step(&self, content: &ContentLibrary) -> u32 {
    match self.subject {
      Some(subject) => content
        .concept_questions
        .iter()
        .filter(|q| q.subject == subject && q.day == self.day)
        .count() as u32,
      None => 0,
    }
  }

  /// Submit the chosen option text.
  pub fn submit(&mut self, answer: &str, content: &ContentLibrary) -> Result<RoundOutcome, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current(content)
      .ok_or(GameError::MissingContent { day: self.day })?;
    let correct_option = question
      .options
      .get(question.correct_index)
      .ok_or(GameError::MissingContent { day: self.day })?;

    let verdict = validation::validate_default(answer, &[correct_option.as_str()])?;
    let at_top = self.step >= self.max_step(content);
    let outcome = RoundOutcome {
      correct: verdict.is_match,
      score_delta: if verdict.is_match { STEP_SCORE } else { 0 },
      skill: Skill::Logic,
      skill_delta: if verdict.is_match { STEP_SKILL_POINTS } else { 0 },
      completed_day: (verdict.is_match && at_top).then_some(self.day),
      verdict: Some(verdict),
    };

    self.score += outcome.score_delta;
    self.phase = Phase::Feedback;
    self.last = Some(outcome.clone());
    Ok(outcome)
  }

  /// Climb or slide, then return to answering (or finish the ladder).
  pub fn acknowledge(&mut self, content: &ContentLibrary) -> Result<(), GameError> {
    if self.phase != Phase::Feedback {
      return Err(GameError::Phase { expected: Phase::Feedback, actual: self.phase });
    }
    let subject = self.subject_or_err()?;
    let correct = self.last.as_ref().is_some_and(|o| o.correct);

    if correct {
      if self.step < self.max_step(content) {
        self.step += 1;
      } else {
        // Reached the top: next day's ladder
        let last_day = content
          .concept_questions
          .iter()
          .filter(|q| q.subject == subject)
          .map(|q| q.day)
          .max()
          .unwrap_or(0);
        if self.day < last_day {
          self.day += 1;
          self.step = 1;
        } else {
          self.phase = Phase::Complete;
          return Ok(());
        }
      }
    } else if self.step > 1 {
      self.step -= 1;
    }

    self.phase = Phase::Answering;
    Ok(())
  }
}
