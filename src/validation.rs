//! Answer validation with fuzzy matching for game submissions.
//!
//! Every mini-game funnels its answers through [`validate`]: sentence
//! matching, error correction, concept quizzes and vocabulary all share the
//! same notion of "correct", "letter-perfect" and "close enough". The games
//! own scoring and persistence; this module only produces a verdict.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

/// Minimum similarity for a non-exact answer to be accepted.
///
/// Raising this only ever turns accepted answers into rejected ones.
pub const DEFAULT_THRESHOLD: f64 = 0.7;

// ============================================================================
// Result types
// ============================================================================

/// Verdict for a single answer submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchVerdict {
  /// Accepted, either exactly or fuzzily
  pub is_match: bool,
  /// Letter-perfect after normalization (implies `is_match`)
  pub is_exact: bool,
  /// The normalized acceptable answer judged closest
  pub best_match: String,
  /// Other acceptable answers clearing the threshold, best first.
  /// Never contains `best_match`.
  pub suggestions: Vec<String>,
}

/// A malformed validation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
  /// The question has no acceptable answers - a content-authoring bug.
  /// Callers should fail the question load, not the whole session.
  EmptyAcceptable,
}

impl std::fmt::Display for ValidateError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ValidateError::EmptyAcceptable => write!(f, "question has no acceptable answers"),
    }
  }
}

impl std::error::Error for ValidateError {}

// ============================================================================
// Normalization
// ============================================================================

/// Normalize an answer for comparison: trim, NFC, lowercase.
///
/// NFC keeps composed and decomposed input (IMEs disagree here) from
/// defeating the exact-equality check.
fn normalize(input: &str) -> String {
  input.trim().nfc().collect::<String>().to_lowercase()
}

// ============================================================================
// Similarity
// ============================================================================

/// Multiset of character bigrams for a normalized string.
///
/// Each word is padded with a boundary marker so first and last letters
/// carry weight and one-letter words still produce bigrams. Counts are kept
/// so repeated bigrams ("banana") are not collapsed.
fn bigram_counts(s: &str) -> HashMap<[char; 2], u32> {
  const BOUNDARY: char = '\0';
  let mut counts = HashMap::new();
  for word in s.split_whitespace() {
    let mut prev = BOUNDARY;
    for c in word.chars() {
      *counts.entry([prev, c]).or_insert(0) += 1;
      prev = c;
    }
    *counts.entry([prev, BOUNDARY]).or_insert(0) += 1;
  }
  counts
}

/// Dice coefficient over word-boundary-padded character bigrams.
///
/// Symmetric and deterministic, 1.0 for identical strings, 0.0 when nothing
/// is shared. Tolerates typos and word-order variance better than raw edit
/// distance: "teh dog runs" vs "the dog runs" keeps every word-boundary
/// bigram even though the "the" trigram is scrambled.
pub fn similarity(a: &str, b: &str) -> f64 {
  let counts_a = bigram_counts(a);
  let counts_b = bigram_counts(b);

  let total: u32 = counts_a.values().sum::<u32>() + counts_b.values().sum::<u32>();
  if total == 0 {
    return 0.0;
  }

  let shared: u32 = counts_a
    .iter()
    .filter_map(|(bigram, n)| counts_b.get(bigram).map(|m| (*n).min(*m)))
    .sum();

  f64::from(2 * shared) / f64::from(total)
}

// ============================================================================
// Validation
// ============================================================================

/// Validate a learner's answer against the acceptable answers for a question.
///
/// Normalization (trim + NFC + lowercase) is applied to the candidate and
/// every acceptable entry before any comparison. An exact hit always wins
/// over fuzzy scores. Ties on score go to the earliest entry.
///
/// `threshold` is the minimum similarity for fuzzy acceptance, in (0, 1].
pub fn validate(
  candidate: &str,
  acceptable: &[impl AsRef<str>],
  threshold: f64,
) -> Result<MatchVerdict, ValidateError> {
  if acceptable.is_empty() {
    return Err(ValidateError::EmptyAcceptable);
  }

  let cleaned = normalize(candidate);
  let normalized: Vec<String> = acceptable.iter().map(|a| normalize(a.as_ref())).collect();

  // Exact equality short-circuits fuzzy scoring. An empty submission is
  // never exact, even against an empty acceptable entry.
  if !cleaned.is_empty() && normalized.iter().any(|a| *a == cleaned) {
    return Ok(MatchVerdict {
      is_match: true,
      is_exact: true,
      best_match: cleaned,
      suggestions: Vec::new(),
    });
  }

  let scores: Vec<f64> = normalized.iter().map(|a| similarity(&cleaned, a)).collect();

  // First entry wins ties, so only a strictly better score moves `best`.
  let mut best = 0;
  for (i, score) in scores.iter().enumerate().skip(1) {
    if *score > scores[best] {
      best = i;
    }
  }

  let mut ranked: Vec<usize> = (0..normalized.len())
    .filter(|&i| i != best && scores[i] >= threshold)
    .collect();
  // Stable sort keeps original order between equal scores
  ranked.sort_by(|&a, &b| scores[b].partial_cmp(&scores[a]).unwrap_or(Ordering::Equal));

  Ok(MatchVerdict {
    is_match: scores[best] >= threshold,
    is_exact: false,
    best_match: normalized[best].clone(),
    suggestions: ranked.into_iter().map(|i| normalized[i].clone()).collect(),
  })
}

/// [`validate`] with the standard threshold.
pub fn validate_default(
  candidate: &str,
  acceptable: &[impl AsRef<str>],
) -> Result<MatchVerdict, ValidateError> {
  validate(candidate, acceptable, DEFAULT_THRESHOLD)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn verdict(candidate: &str, acceptable: &[&str]) -> MatchVerdict {
    validate_default(candidate, acceptable).expect("acceptable set is non-empty")
  }

  #[test]
  fn test_exact_match() {
    let v = verdict("Paris", &["Paris", "Lutetia"]);
    assert!(v.is_match);
    assert!(v.is_exact);
    assert_eq!(v.best_match, "paris");
    assert!(v.suggestions.is_empty());
  }

  #[test]
  fn test_exact_precedes_fuzzy() {
    // A verbatim hit wins even when another entry would fuzzily score high
    let v = verdict("cat", &["cats and dogs", "cat"]);
    assert!(v.is_exact);
    assert_eq!(v.best_match, "cat");
    assert!(v.suggestions.is_empty());
  }

  #[test]
  fn test_case_and_whitespace_invariance() {
    let padded = verdict("  Paris ", &["paris"]);
    let plain = verdict("paris", &["paris"]);
    assert_eq!(padded, plain);
    assert!(plain.is_exact);
  }

  #[test]
  fn test_typo_is_close_enough() {
    let v = verdict("Pari", &["Paris"]);
    assert!(v.is_match);
    assert!(!v.is_exact);
    assert_eq!(v.best_match, "paris");
    assert!(v.suggestions.is_empty());
  }

  #[test]
  fn test_unrelated_answer_rejected() {
    let v = verdict("banana", &["Paris"]);
    assert!(!v.is_match);
    assert!(!v.is_exact);
    assert_eq!(v.best_match, "paris");
    assert!(v.suggestions.is_empty());
  }

  #[test]
  fn test_runner_up_becomes_suggestion() {
    let v = verdict("teh dog runs", &["the dog runs", "a dog runs"]);
    assert!(v.is_match);
    assert!(!v.is_exact);
    assert_eq!(v.best_match, "the dog runs");
    assert_eq!(v.suggestions, vec!["a dog runs".to_string()]);
  }

  #[test]
  fn test_suggestions_exclude_best_match() {
    let v = verdict("the sun rises", &["the sun rises.", "the sun rises!", "the moon sets"]);
    assert!(!v.suggestions.contains(&v.best_match));
  }

  #[test]
  fn test_suggestions_sorted_descending() {
    let v = verdict(
      "she enjoys reading",
      &["she enjoys reading books", "she enjoys to read", "he hates writing"],
    );
    let scores: Vec<f64> = v
      .suggestions
      .iter()
      .map(|s| similarity("she enjoys reading", s))
      .collect();
    for pair in scores.windows(2) {
      assert!(pair[0] >= pair[1]);
    }
  }

  #[test]
  fn test_empty_candidate_never_matches() {
    let v = verdict("", &["paris"]);
    assert!(!v.is_match);
    assert!(!v.is_exact);
    assert_eq!(v.best_match, "paris");

    // Not even against an empty acceptable entry
    let v = verdict("   ", &[""]);
    assert!(!v.is_exact);
  }

  #[test]
  fn test_empty_acceptable_is_an_error() {
    let acceptable: [&str; 0] = [];
    assert_eq!(
      validate_default("paris", &acceptable),
      Err(ValidateError::EmptyAcceptable)
    );
  }

  #[test]
  fn test_tie_break_keeps_first_entry() {
    // Both entries are equidistant from the candidate
    let v = verdict("ab", &["abc", "abd"]);
    assert_eq!(v.best_match, "abc");
  }

  #[test]
  fn test_threshold_monotonicity() {
    let acceptable = ["the dog runs"];
    let mut was_match = true;
    for threshold in [0.1, 0.3, 0.5, 0.7, 0.9, 1.0] {
      let v = validate("teh dog runs", &acceptable, threshold).expect("non-empty");
      // Raising the threshold can only flip true -> false
      assert!(was_match || !v.is_match);
      was_match = v.is_match;
    }
  }

  #[test]
  fn test_weak_first_entry_loses_to_qualifying_entry() {
    let v = validate("paris", &["zzzz", "pari"], 0.7).expect("non-empty");
    assert_eq!(v.best_match, "pari");
    assert!(v.is_match);
    assert!(v.suggestions.is_empty());
  }

  #[test]
  fn test_similarity_symmetry() {
    let pairs = [
      ("paris", "pari"),
      ("the dog runs", "a dog runs"),
      ("banana", "bandana"),
      ("", "word"),
    ];
    for (a, b) in pairs {
      assert_eq!(similarity(a, b), similarity(b, a));
    }
  }

  #[test]
  fn test_similarity_range_and_identity() {
    assert_eq!(similarity("hello world", "hello world"), 1.0);
    assert_eq!(similarity("abc", "xyz"), 0.0);
    let s = similarity("banana", "bandana");
    assert!(s > 0.0 && s < 1.0);
  }

  #[test]
  fn test_repeated_bigrams_are_counted() {
    // Multiset semantics: "banana" has an/na twice; collapsing them would
    // overrate a string containing each bigram only once
    assert!(similarity("banana", "banana") > similarity("banana", "bana"));
  }

  #[test]
  fn test_unicode_nfc_equality() {
    // "é" composed vs "e" + combining acute
    let v = verdict("caf\u{e9}", &["cafe\u{301}"]);
    assert!(v.is_exact);
  }

  #[test]
  fn test_devanagari_answers() {
    let v = verdict("नमस्ते", &["नमस्ते"]);
    assert!(v.is_exact);

    let v = verdict("धन्यवाद", &["नमस्ते"]);
    assert!(!v.is_match);
  }

  #[test]
  fn test_word_reordering_scores_high() {
    let v = verdict("runs the dog", &["the dog runs"]);
    assert!(v.is_match);
    assert!(!v.is_exact);
  }
}
