//! Records produced by structured resume extraction.
//!
//! Every text field is free text exactly as the resume wrote it. Models often
//! emit `null` or bare numbers for these, so text fields go through
//! `lenient_text` and default to an empty string.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One candidate-stated skill. Never mutated once extracted; skill filtering
/// selects a subset of these records by `skill_name`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub skillset_type: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub skill_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub years: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_used: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub degree: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub subject: String,
    /// A single year or a full range, as written.
    #[serde(default, deserialize_with = "lenient_text")]
    pub year_passed: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub result: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub college_university: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub percentage: String,
    #[serde(default)]
    pub is_highest: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub project_details: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub organization: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub job_title: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date: String,
    /// "Present" only when the resume says so.
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_pay_rate: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub pay_uom: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub last_hike_date: String,
    #[serde(default)]
    pub projects: Vec<ProjectRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub start_date_active: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub end_date_active: String,
}

/// The LLM's structured view of a resume. Missing sections deserialize empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredResume {
    #[serde(default)]
    pub education: Vec<EducationRecord>,
    #[serde(default)]
    pub experience: Vec<ExperienceRecord>,
    #[serde(default)]
    pub skills: Vec<SkillRecord>,
    #[serde(default)]
    pub addresses: Vec<AddressRecord>,
}

/// Accepts a string, `null`, a number, or a boolean and yields text.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
