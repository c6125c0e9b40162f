use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::Serialize;
use uuid::Uuid;

use crate::models::store::Record;

#[derive(Serialize, Debug, Clone)]
pub struct Skill {
    /// UUID to identify the skill
    pub id: Uuid,
    /// Stable lookup handle, derived from the name
    pub slug: String,
    /// Display name of the skill
    pub name: String,
    /// Self-assessed proficiency
    pub level: SkillLevel,
    /// What the experience with this skill looks like
    pub description: String,
    /// Day the skill entered the portfolio; never changes on edit
    pub date_added: Date,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl SkillLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            SkillLevel::Beginner => "Beginner",
            SkillLevel::Intermediate => "Intermediate",
            SkillLevel::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown skill level '{0}'. Expected Beginner, Intermediate or Advanced")]
pub struct UnknownLevel(pub String);

impl FromStr for SkillLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(SkillLevel::Beginner),
            "intermediate" => Ok(SkillLevel::Intermediate),
            "advanced" => Ok(SkillLevel::Advanced),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl Record for Skill {
    fn id(&self) -> Uuid {
        self.id
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_parses_case_insensitively() {
        assert_eq!("advanced".parse::<SkillLevel>().ok(), Some(SkillLevel::Advanced));
        assert_eq!("Beginner".parse::<SkillLevel>().ok(), Some(SkillLevel::Beginner));
        assert_eq!("INTERMEDIATE".parse::<SkillLevel>().ok(), Some(SkillLevel::Intermediate));
        assert!("expert".parse::<SkillLevel>().is_err());
    }
}
