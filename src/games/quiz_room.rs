//! Teacher quiz room: a shared quiz with a live scoreboard.
//!
//! Local simulation only - the roster's other "students" are driven by the
//! caller's RNG standing in for a future real-time backend. Scores update
//! per question and the board reorders as answers come in.

use rand::Rng;

use super::{GameError, Phase};
use crate::content::QuizQuestion;

/// Points per correct answer on the board
const ANSWER_POINTS: i64 = 10;

/// Simulated classmates answer correctly at this rate
const CLASSMATE_HIT_RATE: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreboardEntry {
  pub student: String,
  pub score: i64,
}

#[derive(Debug, Clone)]
pub struct QuizRoom {
  pub phase: Phase,
  pub title: String,
  pub questions: Vec<QuizQuestion>,
  pub current: usize,
  /// Names on the roster besides the live student
  pub classmates: Vec<String>,
  scores: Vec<ScoreboardEntry>,
  /// Who has answered the current question
  answered: Vec<String>,
}

impl QuizRoom {
  pub fn new(title: &str, questions: Vec<QuizQuestion>, classmates: Vec<String>) -> Self {
    Self {
      phase: if questions.is_empty() { Phase::Complete } else { Phase::Answering },
      title: title.to_string(),
      questions,
      current: 0,
      classmates,
      scores: Vec::new(),
      answered: Vec::new(),
    }
  }

  pub fn current_question(&self) -> Option<&QuizQuestion> {
    self.questions.get(self.current)
  }

  fn add_points(&mut self, student: &str, points: i64) {
    match self.scores.iter_mut().find(|e| e.student == student) {
      Some(entry) => entry.score += points,
      None => self.scores.push(ScoreboardEntry { student: student.to_string(), score: points }),
    }
  }

  /// Record one student's answer to the current question. A student only
  /// answers once per question.
  pub fn record_answer(&mut self, student: &str, option_index: usize) -> Result<bool, GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    if self.answered.iter().any(|s| s == student) {
      return Ok(false);
    }
    let question = self
      .current_question()
      .ok_or(GameError::MissingContent { day: self.current as u32 + 1 })?;
    let correct = option_index == question.correct_index;

    self.answered.push(student.to_string());
    self.add_points(student, if correct { ANSWER_POINTS } else { 0 });
    Ok(correct)
  }

  /// Let every classmate who has not answered yet take their shot.
  pub fn simulate_classmates(&mut self, rng: &mut impl Rng) -> Result<(), GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    let question = self
      .current_question()
      .ok_or(GameError::MissingContent { day: self.current as u32 + 1 })?;
    let correct_index = question.correct_index;
    let option_count = question.options.len().max(1);

    let pending: Vec<String> = self
      .classmates
      .iter()
      .filter(|c| !self.answered.iter().any(|a| a == *c))
      .cloned()
      .collect();
    for classmate in pending {
      let pick = if rng.random::<f64>() < CLASSMATE_HIT_RATE {
        correct_index
      } else {
        rng.random_range(0..option_count)
      };
      let correct = pick == correct_index;
      self.answered.push(classmate.clone());
      self.add_points(&classmate, if correct { ANSWER_POINTS } else { 0 });
    }
    Ok(())
  }

  /// Scoreboard, highest first; ties keep join order.
  pub fn scoreboard(&self) -> Vec<ScoreboardEntry> {
    let mut board = self.scores.clone();
    board.sort_by_key(|e| std::cmp::Reverse(e.score));
    board
  }

  /// Close the current question and move to the next, or end the quiz.
  pub fn advance(&mut self) -> Result<(), GameError> {
    if self.phase != Phase::Answering {
      return Err(GameError::Phase { expected: Phase::Answering, actual: self.phase });
    }
    self.answered.clear();
    if self.current + 1 < self.questions.len() {
      self.current += 1;
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

  fn room() -> QuizRoom {
    let questions: Vec<QuizQuestion> =
      builtin::library().quiz_questions.into_iter().take(3).collect();
    QuizRoom::new(
      "Friday Quiz",
      questions,
      vec!["Asha".to_string(), "Ravi".to_string()],
    )
  }

  #[test]
  fn test_correct_answer_scores_ten() {
    let mut room = room();
    let correct_index = room.current_question().expect("question").correct_index;

    let correct = room.record_answer("Student", correct_index).expect("record");
    assert!(correct);
    assert_eq!(room.scoreboard()[0].score, ANSWER_POINTS);
  }

  #[test]
  fn test_wrong_answer_scores_zero_but_joins_board() {
    let mut room = room();
    let question = room.current_question().expect("question");
    let wrong = (question.correct_index + 1) % question.options.len();

    let correct = room.record_answer("Student", wrong).expect("record");
    assert!(!correct);
    let board = room.scoreboard();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].score, 0);
  }

  #[test]
  fn test_student_answers_once_per_question() {
    let mut room = room();
    let correct_index = room.current_question().expect("question").correct_index;

    room.record_answer("Student", correct_index).expect("record");
    let second = room.record_answer("Student", correct_index).expect("record");
    assert!(!second);
    assert_eq!(room.scoreboard()[0].score, ANSWER_POINTS);
  }

  #[test]
  fn test_classmates_fill_the_board() {
    let mut room = room();
    room.simulate_classmates(&mut StdRng::seed_from_u64(5)).expect("simulate");
    // Both classmates answered, scores are 0 or 10
    assert_eq!(room.scoreboard().len(), 2);
    for entry in room.scoreboard() {
      assert!(entry.score == 0 || entry.score == ANSWER_POINTS);
    }
  }

  #[test]
  fn test_scoreboard_sorted_descending() {
    let mut room = room();
    let correct_index = room.current_question().expect("question").correct_index;
    let wrong = (correct_index + 1) % room.current_question().expect("question").options.len();

    room.record_answer("Asha", wrong).expect("record");
    room.record_answer("Student", correct_index).expect("record");

    let board = room.scoreboard();
    assert_eq!(board[0].student, "Student");
    assert!(board[0].score >= board[1].score);
  }

  #[test]
  fn test_quiz_ends_after_last_question() {
    let mut room = room();
    for _ in 0..3 {
      let correct_index = room.current_question().expect("question").correct_index;
      room.record_answer("Student", correct_index).expect("record");
      room.advance().expect("advance");
    }
    assert_eq!(room.phase, Phase::Complete);
    assert_eq!(room.scoreboard()[0].score, 3 * ANSWER_POINTS);
    assert!(room.record_answer("Student", 0).is_err());
  }

  #[test]
  fn test_advance_resets_answered_set() {
    let mut room = room();
    let correct_index = room.current_question().expect("question").correct_index;
    room.record_answer("Student", correct_index).expect("record");
    room.advance().expect("advance");

    // Same student can answer the next question
    let correct_index = room.current_question().expect("question").correct_index;
    let answered = room.record_answer("Student", correct_index).expect("record");
    assert!(answered);
  }
}
