use crate::error::{ConsoleError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Unqualified,
}

impl LeadStatus {
    /// Exact, case-sensitive match against the wire spelling.
    pub fn from_wire(s: &str) -> Option<Self> {
        match s {
            "New" => Some(LeadStatus::New),
            "Contacted" => Some(LeadStatus::Contacted),
            "Qualified" => Some(LeadStatus::Qualified),
            "Unqualified" => Some(LeadStatus::Unqualified),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::Unqualified => "Unqualified",
        }
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeadStatus {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "qualified" => Ok(LeadStatus::Qualified),
            "unqualified" => Ok(LeadStatus::Unqualified),
            _ => Err(ConsoleError::Validation(format!(
                "Invalid status \"{}\". Must be one of: New, Contacted, Qualified, Unqualified",
                s
            ))),
        }
    }
}

/// Status filter for the lead list: every status, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(LeadStatus),
}

impl StatusFilter {
    pub fn allows(&self, status: LeadStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(s) => *s == status,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("All"),
            StatusFilter::Only(s) => s.fmt(f),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self> {
        if s.eq_ignore_ascii_case("all") {
            return Ok(StatusFilter::All);
        }
        s.parse().map(StatusFilter::Only)
    }
}

impl Serialize for StatusFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for StatusFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "All" {
            return Ok(StatusFilter::All);
        }
        LeadStatus::from_wire(&raw)
            .map(StatusFilter::Only)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown status filter: {}", raw)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OpportunityStage {
    #[default]
    Prospecting,
    Proposal,
    Closed,
}

impl fmt::Display for OpportunityStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpportunityStage::Prospecting => write!(f, "Prospecting"),
            OpportunityStage::Proposal => write!(f, "Proposal"),
            OpportunityStage::Closed => write!(f, "Closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_spelling_is_case_sensitive() {
        assert_eq!(LeadStatus::from_wire("Qualified"), Some(LeadStatus::Qualified));
        assert_eq!(LeadStatus::from_wire("qualified"), None);
    }

    #[test]
    fn test_status_cli_parse_is_case_insensitive() {
        assert_eq!("contacted".parse::<LeadStatus>().unwrap(), LeadStatus::Contacted);
        assert!("lost".parse::<LeadStatus>().is_err());
    }

    #[test]
    fn test_status_filter_serde() {
        let all = serde_json::to_string(&StatusFilter::All).unwrap();
        assert_eq!(all, "\"All\"");

        let only: StatusFilter = serde_json::from_str("\"New\"").unwrap();
        assert_eq!(only, StatusFilter::Only(LeadStatus::New));

        assert!(serde_json::from_str::<StatusFilter>("\"Lost\"").is_err());
    }

    #[test]
    fn test_status_filter_allows() {
        assert!(StatusFilter::All.allows(LeadStatus::Unqualified));
        assert!(StatusFilter::Only(LeadStatus::New).allows(LeadStatus::New));
        assert!(!StatusFilter::Only(LeadStatus::New).allows(LeadStatus::Contacted));
    }
}
