use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
  Vocabulary,
  Logic,
  Creativity,
  Speed,
}

impl Skill {
  pub fn from_str(s: &str) -> Option<Self> {
    match s {
      "vocabulary" => Some(Self::Vocabulary),
      "logic" => Some(Self::Logic),
      "creativity" => Some(Self::Creativity),
      "speed" => Some(Self::Speed),
      _ => None,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Vocabulary => "vocabulary",
      Self::Logic => "logic",
      Self::Creativity => "creativity",
      Self::Speed => "speed",
    }
  }
}

/// The four proficiency tracks, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSet {
  pub vocabulary: u8,
  pub logic: u8,
  pub creativity: u8,
  pub speed: u8,
}

impl SkillSet {
  pub fn get(&self, skill: Skill) -> u8 {
    match skill {
      Skill::Vocabulary => self.vocabulary,
      Skill::Logic => self.logic,
      Skill::Creativity => self.creativity,
      Skill::Speed => self.speed,
    }
  }

  pub fn set(&mut self, skill: Skill, value: u8) {
    let slot = match skill {
      Skill::Vocabulary => &mut self.vocabulary,
      Skill::Logic => &mut self.logic,
      Skill::Creativity => &mut self.creativity,
      Skill::Speed => &mut self.speed,
    };
    *slot = value.min(config::SKILL_MAX);
  }

  pub fn total(&self) -> u32 {
    u32::from(self.vocabulary)
      + u32::from(self.logic)
      + u32::from(self.creativity)
      + u32::from(self.speed)
  }
}

/// Per-game progress entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameProgress {
  pub current_level: u32,
  pub high_score: i64,
  pub completed: bool,
  pub last_played: DateTime<Utc>,
}

impl GameProgress {
  pub fn new(now: DateTime<Utc>) -> Self {
    Self {
      current_level: 1,
      high_score: 0,
      completed: false,
      last_played: now,
    }
  }
}

/// The single persisted learner profile.
///
/// Serialized as one JSON blob; unknown or missing fields fall back to
/// defaults so an older record survives an upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgress {
  pub user_id: String,
  pub name: String,
  pub avatar: u8,
  pub daily_streak: u32,
  /// Calendar date of the last recorded login, None before first login
  pub last_login_date: Option<NaiveDate>,
  pub total_score: i64,
  pub level: u32,
  pub skills: SkillSet,
  pub badges: Vec<String>,
  /// Keyed by game id (see the game registry in `config`)
  pub games_progress: HashMap<String, GameProgress>,
  pub completed_days: Vec<u32>,
}

impl Default for UserProgress {
  fn default() -> Self {
    Self::new(config::DEFAULT_USER_ID, config::DEFAULT_USER_NAME)
  }
}

impl UserProgress {
  pub fn new(user_id: &str, name: &str) -> Self {
    Self {
      user_id: user_id.to_string(),
      name: name.to_string(),
      avatar: 1,
      daily_streak: 0,
      last_login_date: None,
      total_score: 0,
      level: 1,
      skills: SkillSet::default(),
      badges: Vec::new(),
      games_progress: HashMap::new(),
      completed_days: Vec::new(),
    }
  }

  /// Level follows total skill points: one level per 50 points, floor 1.
  pub fn recompute_level(&mut self) {
    self.level = self.skills.total() / config::LEVEL_STEP_POINTS + 1;
  }

  /// A stored avatar outside the configured range is repaired, never fatal.
  pub fn clamp_avatar(&mut self) {
    if self.avatar < 1 || self.avatar > config::AVATAR_COUNT {
      self.avatar = 1;
    }
  }
}
