use serde::{Deserialize, Serialize};

use crate::analysis::tier::Tier;

/// One row of the marks table: identifier, display name, then marks in column order.
#[derive(Debug, Clone, Serialize)]
pub struct StudentRecord {
    pub user_id: String,
    pub name: String,
    pub marks: Vec<SubjectMark>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubjectMark {
    pub subject: String,
    pub mark: f64,
}

/// A curriculum row linking a subject unit/topic to a resource and tier guidance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurriculumRow {
    #[serde(rename(deserialize = "SUBJECT"))]
    pub subject: String,
    #[serde(rename(deserialize = "UNIT"))]
    pub unit: String,
    #[serde(rename(deserialize = "TOPIC"))]
    pub topic: String,
    #[serde(rename(deserialize = "YOUTUBE LINK"))]
    pub resource_link: String,
    #[serde(rename(deserialize = "FAST BLOOMER"))]
    pub fast_bloomer: String,
    #[serde(rename(deserialize = "MEDIUM BLOOMER"))]
    pub medium_bloomer: String,
    #[serde(rename(deserialize = "SLOW BLOOMER"))]
    pub slow_bloomer: String,
}

impl CurriculumRow {
    /// Guidance text written for students in `tier`.
    pub fn guidance_for(&self, tier: Tier) -> &str {
        match tier {
            Tier::High => &self.fast_bloomer,
            Tier::Medium => &self.medium_bloomer,
            Tier::Low => &self.slow_bloomer,
        }
    }
}

/// Login allow-list entry. Never serialized back out.
#[derive(Clone, Deserialize)]
pub struct Credential {
    #[serde(rename = "UserID")]
    pub user_id: String,
    #[serde(rename = "Password")]
    pub password: String,
}

/// Peer contact from the skill directory. Headers are matched lowercased.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillContact {
    pub name: String,
    #[serde(rename(deserialize = "skill1"))]
    pub primary_skill: String,
    #[serde(rename(deserialize = "skill2"), default)]
    pub secondary_skill: String,
    #[serde(rename(deserialize = "linkedin"))]
    pub link: String,
}

impl SkillContact {
    pub fn has_skill(&self, skill: &str) -> bool {
        self.primary_skill == skill || self.secondary_skill == skill
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WellKnownSkill {
    #[serde(rename(deserialize = "SUBJECT"))]
    pub subject: String,
    #[serde(rename(deserialize = "SKILL"))]
    pub skill: String,
}
