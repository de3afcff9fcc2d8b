use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const SUGGESTED_CATEGORIES: [&str; 10] = [
    "Frontend",
    "Backend",
    "Full Stack",
    "Mobile",
    "Data Science",
    "DevOps",
    "Cloud Computing",
    "Cybersecurity",
    "Artificial Intelligence",
    "Blockchain",
];

/// Largest course id, the top of the JSON safe-integer range. Ids read from
/// storage, the remote or an import must stay below it.
pub const MAX_COURSE_ID: u64 = (1 << 53) - 1;

/// A catalog entry. Deserialization goes through [`CourseRecord`] so that
/// timestamps coming from storage or the remote are always revived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "CourseRecord")]
pub struct Course {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub description: String,
    pub workload: u32,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseDraft {
    pub name: String,
    pub category: String,
    pub description: String,
    pub workload: u32,
}

/// Wire/storage shape of a course, timestamps still raw. Timestamps of any JSON
/// type are accepted; only strings can be revived.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub id: u64,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub workload: u32,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub updated_at: Option<Value>,
}

impl From<CourseRecord> for Course {
    fn from(record: CourseRecord) -> Self {
        let now = Utc::now();
        let created_at = revive_timestamp(record.created_at.as_ref().and_then(Value::as_str))
            .unwrap_or(now);
        let updated_at = revive_timestamp(record.updated_at.as_ref().and_then(Value::as_str))
            .unwrap_or(now)
            .max(created_at);

        Course {
            id: record.id,
            name: record.name,
            category: record.category,
            description: record.description,
            workload: record.workload,
            created_at,
            updated_at,
        }
    }
}

impl Course {
    pub fn from_draft(id: u64, draft: CourseDraft, now: DateTime<Utc>) -> Self {
        Course {
            id,
            name: draft.name,
            category: draft.category,
            description: draft.description,
            workload: draft.workload,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn to_draft(&self) -> CourseDraft {
        CourseDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            description: self.description.clone(),
            workload: self.workload,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        Difficulty::from_workload(self.workload)
    }

    pub fn estimated_weeks(&self) -> u32 {
        self.workload.div_ceil(5)
    }
}

impl CourseDraft {
    /// Form rules for drafts submitted over HTTP. Lengths count characters of
    /// the raw value, without trimming.
    pub fn validate(&self) -> Result<(), AppError> {
        let name_len = self.name.chars().count();
        if !(3..=100).contains(&name_len) {
            return Err(AppError::Validation(
                "name must be between 3 and 100 characters".to_string(),
            ));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::Validation("category is required".to_string()));
        }
        let description_len = self.description.chars().count();
        if !(10..=500).contains(&description_len) {
            return Err(AppError::Validation(
                "description must be between 10 and 500 characters".to_string(),
            ));
        }
        if !(1..=1000).contains(&self.workload) {
            return Err(AppError::Validation(
                "workload must be between 1 and 1000 hours".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn from_workload(workload: u32) -> Self {
        match workload {
            0..=30 => Difficulty::Basic,
            31..=60 => Difficulty::Intermediate,
            _ => Difficulty::Advanced,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Difficulty::Basic => "Ideal for newcomers to the subject",
            Difficulty::Intermediate => "Requires basic prior knowledge",
            Difficulty::Advanced => "Aimed at advanced students",
        }
    }
}

/// Parses RFC 3339 timestamps and bare `YYYY-MM-DD` dates (midnight UTC).
pub fn revive_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn serialize_timestamp<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}
