//! Document and request models
//!
//! Each persisted type maps to one collection named after it in lowercase
//! (`candidate`, `interview`, `answer`). Request payloads carry their own
//! [`Schema`] so bodies can be validated before they are deserialized.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ValidationErrors;
use super::types::{FieldDef, FieldType, Schema};
use super::validator::SchemaValidator;

/// A persisted document type and the collection holding it
pub trait Collection {
    const COLLECTION: &'static str;
}

/// A request body with a declared shape
pub trait RequestSchema {
    fn schema() -> Schema;

    /// Validates a decoded body against [`RequestSchema::schema`]
    fn validate(body: &Value) -> Result<(), ValidationErrors> {
        let schema = Self::schema();
        SchemaValidator::new(&schema).validate(body)
    }
}

// ==================
// Documents
// ==================

/// Candidate profile.
///
/// `email` is meant to identify a candidate but uniqueness is not enforced;
/// duplicates can exist and lookups take the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

impl Collection for Candidate {
    const COLLECTION: &'static str = "candidate";
}

impl Candidate {
    /// Placeholder profile for an email seen only on an interview
    pub fn from_email(email: &str) -> Self {
        Self {
            name: display_name_from_email(email),
            email: email.to_string(),
            role: None,
            experience: None,
        }
    }
}

/// Interview lifecycle.
///
/// Only `Scheduled` is ever written; no operation moves an interview along.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

/// Interview session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interview {
    pub title: String,
    pub candidate_email: String,
    #[serde(default)]
    pub status: InterviewStatus,
    #[serde(default)]
    pub questions: Vec<String>,
}

impl Collection for Interview {
    const COLLECTION: &'static str = "interview";
}

/// One answer to one interview question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub interview_id: String,
    pub question_index: u64,
    pub transcript: String,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl Collection for Answer {
    const COLLECTION: &'static str = "answer";
}

// ==================
// Request payloads
// ==================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateCandidate {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
}

impl RequestSchema for CreateCandidate {
    fn schema() -> Schema {
        Schema::new(
            "CreateCandidate",
            vec![
                FieldDef::required_string("name"),
                FieldDef::required_string("email"),
                FieldDef::optional_string("role"),
                FieldDef::optional_string("experience"),
            ],
        )
    }
}

impl From<CreateCandidate> for Candidate {
    fn from(payload: CreateCandidate) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
            role: payload.role,
            experience: payload.experience,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateInterview {
    pub title: String,
    pub candidate_email: String,
    pub questions: Vec<String>,
}

impl RequestSchema for CreateInterview {
    fn schema() -> Schema {
        Schema::new(
            "CreateInterview",
            vec![
                FieldDef::required_string("title"),
                FieldDef::required_string("candidate_email"),
                FieldDef::required_array("questions", FieldType::String),
            ],
        )
    }
}

impl From<CreateInterview> for Interview {
    fn from(payload: CreateInterview) -> Self {
        Self {
            title: payload.title,
            candidate_email: payload.candidate_email,
            status: InterviewStatus::Scheduled,
            questions: payload.questions,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitAnswer {
    pub interview_id: String,
    pub question_index: u64,
    pub transcript: String,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl RequestSchema for SubmitAnswer {
    fn schema() -> Schema {
        Schema::new(
            "SubmitAnswer",
            vec![
                FieldDef::required_string("interview_id"),
                FieldDef::required_int_at_least("question_index", 0),
                FieldDef::required_string("transcript"),
                FieldDef::optional_string("sentiment"),
            ],
        )
    }
}

impl From<SubmitAnswer> for Answer {
    fn from(payload: SubmitAnswer) -> Self {
        Self {
            interview_id: payload.interview_id,
            question_index: payload.question_index,
            transcript: payload.transcript,
            sentiment: payload.sentiment,
        }
    }
}

/// Derives a display name from the local part of an email address.
///
/// `"jane.doe@example.com"` becomes `"Jane.Doe"`. Without an `@` the whole
/// string is used.
pub fn display_name_from_email(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    title_case(local)
}

/// Title-cases `s` the way Python's `str.title()` does.
///
/// A cased character (upper or lower case) that follows another cased
/// character is lowercased; any other cased character starts a word and is
/// titlecased. Uncased characters (digits, punctuation, CJK) pass through and
/// end the current word. Titlecase is approximated as the uppercase mapping
/// with every character after the first lowercased, so `ß` becomes `Ss`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;

    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if !cased {
            out.push(c);
        } else if prev_cased {
            out.extend(c.to_lowercase());
        } else {
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        }
        prev_cased = cased;
    }

    out
}
