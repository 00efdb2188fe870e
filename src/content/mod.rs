//! Static game content: questions, stories and word lists keyed by day.
//!
//! The tables ship compiled into the binary; a JSON content pack in the
//! data directory overrides any table it names. Content is read-only input
//! to the games - nothing here carries behavior.

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A prompt sentence with an equivalent-meaning counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentencePair {
    pub day: u32,
    pub english: String,
    pub parallel: String,
    /// Word bank for rearrange mode, in correct order
    #[serde(default)]
    pub words: Vec<String>,
    pub difficulty: u8,
}

/// A short story whose sentences must be put back in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub day: u32,
    pub title: String,
    pub sentences: Vec<String>,
    pub theme: String,
    pub difficulty: u8,
}

/// Subject track for the concept ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Science,
    Math,
}

impl Subject {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "science" => Some(Self::Science),
            "math" => Some(Self::Math),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Science => "science",
            Self::Math => "math",
        }
    }
}

/// One rung of the concept ladder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConceptQuestion {
    pub day: u32,
    pub subject: Subject,
    pub step: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

/// A timed quiz question (quiz battle, time travel).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub day: u32,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub subject: String,
    pub difficulty: u8,
}

/// A sentence containing a deliberate mistake to correct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorQuestion {
    pub day: u32,
    pub incorrect_sentence: String,
    pub correct_sentence: String,
    pub error_type: String,
    pub explanation: String,
}

/// A word, its meaning, and plausible wrong meanings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeaningPair {
    pub day: u32,
    pub word: String,
    pub meaning: String,
    pub distractors: Vec<String>,
}

/// An image cue with word choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisualWord {
    pub day: u32,
    pub image_query: String,
    pub correct_word: String,
    pub options: Vec<String>,
    pub difficulty: u8,
}

/// Every content table the games read.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentLibrary {
    pub sentences: Vec<SentencePair>,
    pub stories: Vec<Story>,
    pub concept_questions: Vec<ConceptQuestion>,
    pub quiz_questions: Vec<QuizQuestion>,
    pub error_questions: Vec<ErrorQuestion>,
    pub meaning_pairs: Vec<MeaningPair>,
    pub visual_words: Vec<VisualWord>,
}

/// Content loading errors.
#[derive(Debug)]
pub enum ContentLoadError {
    IoError(String, String),
    ParseError(String, String),
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentLoadError::IoError(path, e) => write!(f, "IO error reading {}: {}", path, e),
            ContentLoadError::ParseError(path, e) => write!(f, "Parse error in {}: {}", path, e),
        }
    }
}

impl std::error::Error for ContentLoadError {}

impl ContentLibrary {
    /// Built-in tables plus any `content.json` pack in the content
    /// directory. A missing pack is the normal case; a broken pack logs a
    /// warning and falls back to the builtin data.
    pub fn load(content_dir: &Path) -> Self {
        let pack_path = content_dir.join("content.json");
        if !pack_path.exists() {
            return builtin::library();
        }

        match Self::load_pack(&pack_path) {
            Ok(pack) => {
                tracing::info!("Loaded content pack from {}", pack_path.display());
                builtin::library().merged_with(pack)
            }
            Err(e) => {
                tracing::warn!("Content pack unusable, using builtin tables: {}", e);
                builtin::library()
            }
        }
    }

    /// Parse a single pack file.
    pub fn load_pack(path: &Path) -> Result<Self, ContentLoadError> {
        let display = path.display().to_string();
        let contents = fs::read_to_string(path)
            .map_err(|e| ContentLoadError::IoError(display.clone(), e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| ContentLoadError::ParseError(display, e.to_string()))
    }

    /// Non-empty tables in `pack` replace the corresponding builtin table.
    fn merged_with(mut self, pack: ContentLibrary) -> Self {
        if !pack.sentences.is_empty() {
            self.sentences = pack.sentences;
        }
        if !pack.stories.is_empty() {
            self.stories = pack.stories;
        }
        if !pack.concept_questions.is_empty() {
            self.concept_questions = pack.concept_questions;
        }
        if !pack.quiz_questions.is_empty() {
            self.quiz_questions = pack.quiz_questions;
        }
        if !pack.error_questions.is_empty() {
            self.error_questions = pack.error_questions;
        }
        if !pack.meaning_pairs.is_empty() {
            self.meaning_pairs = pack.meaning_pairs;
        }
        if !pack.visual_words.is_empty() {
            self.visual_words = pack.visual_words;
        }
        self
    }

    /// Concept questions for one subject, ordered by (day, step).
    pub fn concept_track(&self, subject: Subject) -> Vec<&ConceptQuestion> {
        let mut track: Vec<&ConceptQuestion> = self
            .concept_questions
            .iter()
            .filter(|q| q.subject == subject)
            .collect();
        track.sort_by_key(|q| (q.day, q.step));
        track
    }

    /// Quiz questions in one difficulty bucket.
    pub fn quiz_by_difficulty(&self, difficulty: u8) -> Vec<&QuizQuestion> {
        self.quiz_questions.iter().filter(|q| q.difficulty == difficulty).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tables_are_populated() {
        let library = builtin::library();
        assert!(!library.sentences.is_empty());
        assert!(!library.stories.is_empty());
        assert!(!library.concept_questions.is_empty());
        assert!(!library.quiz_questions.is_empty());
        assert!(!library.error_questions.is_empty());
        assert!(!library.meaning_pairs.is_empty());
        assert!(!library.visual_words.is_empty());
    }

    #[test]
    fn test_builtin_indices_in_range() {
        let library = builtin::library();
        for q in &library.concept_questions {
            assert!(q.correct_index < q.options.len(), "concept day {}", q.day);
        }
        for q in &library.quiz_questions {
            assert!(q.correct_index < q.options.len(), "quiz day {}", q.day);
        }
        for v in &library.visual_words {
            assert!(v.options.contains(&v.correct_word), "visual day {}", v.day);
        }
    }

    #[test]
    fn test_builtin_days_start_at_one() {
        let library = builtin::library();
        assert_eq!(library.sentences.first().map(|s| s.day), Some(1));
        assert_eq!(library.stories.first().map(|s| s.day), Some(1));
    }

    #[test]
    fn test_concept_track_ordered() {
        let library = builtin::library();
        let track = library.concept_track(Subject::Science);
        assert!(!track.is_empty());
        for pair in track.windows(2) {
            assert!((pair[0].day, pair[0].step) < (pair[1].day, pair[1].step));
        }
        for q in track {
            assert_eq!(q.subject, Subject::Science);
        }
    }

    #[test]
    fn test_missing_pack_falls_back_to_builtin() {
        let temp = tempfile::tempdir().expect("tempdir");
        let library = ContentLibrary::load(temp.path());
        assert_eq!(library.sentences.len(), builtin::library().sentences.len());
    }

    #[test]
    fn test_pack_overrides_named_tables_only() {
        let temp = tempfile::tempdir().expect("tempdir");
        let pack = r#"{
            "sentences": [
                { "day": 1, "english": "Hello.", "parallel": "Hi.", "words": ["Hi"], "difficulty": 1 }
            ]
        }"#;
        fs::write(temp.path().join("content.json"), pack).expect("write pack");

        let library = ContentLibrary::load(temp.path());
        assert_eq!(library.sentences.len(), 1);
        assert_eq!(library.sentences[0].parallel, "Hi.");
        // Tables the pack does not name keep the builtin rows
        assert!(!library.stories.is_empty());
    }

    #[test]
    fn test_broken_pack_falls_back() {
        let temp = tempfile::tempdir().expect("tempdir");
        fs::write(temp.path().join("content.json"), "{ not json").expect("write pack");
        let library = ContentLibrary::load(temp.path());
        assert!(!library.sentences.is_empty());
    }

    #[test]
    fn test_subject_string_mapping() {
        assert_eq!(Subject::from_str("science"), Some(Subject::Science));
        assert_eq!(Subject::from_str("math"), Some(Subject::Math));
        assert_eq!(Subject::from_str("history"), None);
        assert_eq!(Subject::Math.as_str(), "math");
    }
}
