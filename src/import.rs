//! Parsing and validating uploaded lead files.
//!
//! The accepted wire format is a non-empty JSON array of lead objects:
//!
//! ```json
//! [
//!   {
//!     "id": "1",
//!     "name": "John Doe",
//!     "email": "john@example.com",
//!     "company": "Example Corp",
//!     "source": "Website",
//!     "status": "New",
//!     "score": 85
//!   }
//! ]
//! ```
//!
//! `id` may also be a number; it is stored as text.

use crate::error::{ConsoleError, Result};
use crate::model::{Lead, LeadStatus};
use serde_json::{Map, Value};
use std::path::Path;

const REQUIRED_FIELDS: &str = "id, name, email, company, status, source, score";

/// An uploaded file before it has been parsed.
#[derive(Debug, Clone)]
pub struct ImportFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImportFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Read a file from disk. Files without a `.json` name are rejected unread.
    pub fn read(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        if !accepts_file(&file_name, None) {
            return Err(ConsoleError::UnsupportedFile(file_name));
        }
        let bytes = std::fs::read(path)?;
        Ok(Self::new(file_name, None, bytes))
    }

    pub fn parse(&self) -> Result<Vec<Lead>> {
        if !accepts_file(&self.file_name, self.content_type.as_deref()) {
            return Err(ConsoleError::UnsupportedFile(self.file_name.clone()));
        }
        parse_leads(&self.bytes)
    }
}

/// Cheap pre-check that a file is meant to be JSON.
pub fn accepts_file(file_name: &str, content_type: Option<&str>) -> bool {
    content_type == Some("application/json") || file_name.ends_with(".json")
}

/// Parse and validate a lead payload. The first bad element fails the whole payload.
pub fn parse_leads(bytes: &[u8]) -> Result<Vec<Lead>> {
    let data: Value =
        serde_json::from_slice(bytes).map_err(|e| ConsoleError::Parse(e.to_string()))?;

    let items = match data {
        Value::Array(items) => items,
        _ => return Err(ConsoleError::schema("JSON must contain an array of leads")),
    };
    if items.is_empty() {
        return Err(ConsoleError::schema("JSON array cannot be empty"));
    }

    let leads = items
        .iter()
        .enumerate()
        .map(|(index, item)| validate_item(index, item))
        .collect::<Result<Vec<_>>>()?;

    let out_of_range = leads
        .iter()
        .filter(|l| !(0.0..=100.0).contains(&l.score))
        .count();
    if out_of_range > 0 {
        tracing::debug!(count = out_of_range, "Imported scores outside 0-100");
    }

    Ok(leads)
}

fn validate_item(index: usize, item: &Value) -> Result<Lead> {
    let structure_error = || {
        ConsoleError::schema_at(
            index,
            format!(
                "Invalid lead structure at index {}. Required fields: {}",
                index, REQUIRED_FIELDS
            ),
        )
    };

    let obj = item.as_object().ok_or_else(structure_error)?;

    let required = ["id", "name", "email", "company", "status", "source"];
    if required.iter().any(|field| !is_truthy(obj.get(*field))) {
        return Err(structure_error());
    }
    let score = match obj.get("score") {
        Some(Value::Number(n)) => n.as_f64().ok_or_else(structure_error)?,
        _ => return Err(structure_error()),
    };

    let status = match obj.get("status") {
        Some(Value::String(s)) => LeadStatus::from_wire(s),
        _ => None,
    }
    .ok_or_else(|| {
        let shown = obj
            .get("status")
            .map(display_value)
            .unwrap_or_default();
        ConsoleError::schema_at(
            index,
            format!(
                "Invalid status \"{}\" at index {}. Must be one of: New, Contacted, Qualified, Unqualified",
                shown, index
            ),
        )
    })?;

    Ok(Lead {
        id: text_field(index, obj, "id")?,
        name: text_field(index, obj, "name")?,
        company: text_field(index, obj, "company")?,
        email: text_field(index, obj, "email")?,
        source: text_field(index, obj, "source")?,
        score,
        status,
    })
}

/// Missing, null, false, zero and the empty string are all falsy.
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

fn text_field(index: usize, obj: &Map<String, Value>, field: &str) -> Result<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => Ok(display_value(v)),
        _ => Err(ConsoleError::schema_at(
            index,
            format!(
                "Invalid lead structure at index {}. Field '{}' must be text",
                index, field
            ),
        )),
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (None, Some(u), _) => u.to_string(),
            (None, None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}
