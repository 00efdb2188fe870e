pub mod progress;

pub use progress::{GameProgress, Skill, SkillSet, UserProgress};
