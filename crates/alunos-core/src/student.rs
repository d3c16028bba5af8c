// ABOUTME: Defines the Student record, its Status enumeration, and the raw input shape.
// ABOUTME: Wire names (nome, data_nascimento, matricula) are kept for client compatibility.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Enrollment status of a student. Each variant carries its wire string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "ATIVO")]
    Active,
    #[serde(rename = "INATIVO")]
    Inactive,
    #[serde(rename = "FORMADO")]
    Graduated,
    #[serde(rename = "GRADUANDO")]
    InProgress,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Active,
        Status::Inactive,
        Status::Graduated,
        Status::InProgress,
    ];

    /// The string stored in the database and sent over the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "ATIVO",
            Status::Inactive => "INATIVO",
            Status::Graduated => "FORMADO",
            Status::InProgress => "GRADUANDO",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string is not one of the four wire values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// A persisted student record, as returned by list and get.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: i64,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "data_nascimento")]
    pub birth_date: NaiveDate,
    #[serde(rename = "matricula")]
    pub enrollment_code: String,
    pub status: Status,
    pub email: String,
}

/// Raw request body for create and update. Every field is an untyped string
/// that may be absent; nothing is trusted until it passes validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub name: Option<String>,
    pub birth_date: Option<String>,
    pub enrollment_code: Option<String>,
    pub status: Option<String>,
    pub email: Option<String>,
}

impl StudentInput {
    /// Pick the five fields out of a JSON body by their wire names.
    ///
    /// Only objects carry fields: arrays, scalars and `null` yield an input
    /// with every field absent. A field holding anything but a string is
    /// treated as absent too.
    pub fn from_json(body: &Value) -> Self {
        let Some(object) = body.as_object() else {
            return Self::default();
        };
        let field = |key: &str| object.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            name: field("nome"),
            birth_date: field("data_nascimento"),
            enrollment_code: field("matricula"),
            status: field("status"),
            email: field("email"),
        }
    }
}

/// A validated student without an id, ready to be inserted or written over
/// an existing row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub birth_date: NaiveDate,
    pub enrollment_code: String,
    pub status: Status,
    pub email: String,
}

impl NewStudent {
    /// Attach a storage-assigned id.
    pub fn with_id(self, id: i64) -> Student {
        Student {
            id,
            name: self.name,
            birth_date: self.birth_date,
            enrollment_code: self.enrollment_code,
            status: self.status,
            email: self.email,
        }
    }
}
