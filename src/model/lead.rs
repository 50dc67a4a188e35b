use super::types::LeadStatus;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Sources may send numeric ids; they are stored as text.
    #[serde(deserialize_with = "text_or_number")]
    pub id: String,
    pub name: String,
    pub company: String,
    pub email: String,
    pub source: String,
    pub score: f64,
    pub status: LeadStatus,
}

impl Lead {
    pub fn new(id: impl Into<String>, name: impl Into<String>, company: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            company: company.into(),
            email: String::new(),
            source: String::new(),
            score: 0.0,
            status: LeadStatus::default(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = score;
        self
    }

    pub fn with_status(mut self, status: LeadStatus) -> Self {
        self.status = status;
        self
    }

    /// True when every one of the seven fields matches.
    ///
    /// Scores compare numerically, so `0.0` and `-0.0` are the same lead.
    pub fn same_record(&self, other: &Lead) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.email == other.email
            && self.company == other.company
            && self.source == other.source
            && self.status == other.status
            && self.score == other.score
    }
}

fn text_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Signed(i64),
        Unsigned(u64),
        Float(f64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Signed(i) => i.to_string(),
        RawId::Unsigned(u) => u.to_string(),
        RawId::Float(f) => f.to_string(),
    })
}

/// Email and status changes applied to the lead with `id`.
#[derive(Debug, Clone, PartialEq)]
pub struct LeadEdit {
    pub id: String,
    pub email: String,
    pub status: LeadStatus,
}

impl LeadEdit {
    pub fn apply_to(&self, lead: &mut Lead) {
        lead.email = self.email.clone();
        lead.status = self.status;
    }
}
