//! Combining imported leads with the current lead set.

use crate::model::Lead;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImportMode {
    /// Discard the current leads and keep only the imported ones.
    Replace,
    /// Append imported leads that are not exact copies of a current lead.
    #[default]
    Merge,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportMode::Replace => write!(f, "replace"),
            ImportMode::Merge => write!(f, "merge"),
        }
    }
}

impl std::str::FromStr for ImportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "replace" => Ok(ImportMode::Replace),
            "merge" => Ok(ImportMode::Merge),
            _ => Err(format!("Unknown import mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub leads: Vec<Lead>,
    pub added: usize,
    pub skipped: usize,
}

/// Stable sort, highest score first.
pub fn sort_by_score_desc(leads: &mut [Lead]) {
    leads.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

pub fn apply_import(existing: Vec<Lead>, incoming: Vec<Lead>, mode: ImportMode) -> ImportOutcome {
    match mode {
        ImportMode::Replace => {
            let added = incoming.len();
            let mut leads = incoming;
            sort_by_score_desc(&mut leads);
            ImportOutcome {
                leads,
                added,
                skipped: 0,
            }
        }
        ImportMode::Merge => {
            let offered = incoming.len();
            let fresh: Vec<Lead> = incoming
                .into_iter()
                .filter(|candidate| !existing.iter().any(|lead| lead.same_record(candidate)))
                .collect();
            let added = fresh.len();
            let mut leads = existing;
            leads.extend(fresh);
            sort_by_score_desc(&mut leads);
            ImportOutcome {
                leads,
                added,
                skipped: offered - added,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeadStatus;

    fn lead(id: &str, name: &str, score: f64) -> Lead {
        Lead::new(id, name, "C")
            .with_email(format!("{}@x.com", name.to_lowercase()))
            .with_source("S")
            .with_score(score)
    }

    fn ids(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn test_replace_discards_existing() {
        let existing = vec![lead("1", "A", 99.0), lead("2", "B", 10.0)];
        let incoming = vec![lead("3", "C", 20.0), lead("4", "D", 80.0)];

        let outcome = apply_import(existing, incoming, ImportMode::Replace);
        assert_eq!(ids(&outcome.leads), vec!["4", "3"]);
        assert_eq!(outcome.added, 2);
    }

    #[test]
    fn test_merge_drops_exact_duplicate_keeps_score_variant() {
        let existing = vec![
            Lead::new("1", "A", "C")
                .with_email("a@x.com")
                .with_source("S")
                .with_status(LeadStatus::New)
                .with_score(10.0),
        ];
        let incoming = vec![existing[0].clone(), existing[0].clone().with_score(11.0)];

        let outcome = apply_import(existing, incoming, ImportMode::Merge);
        assert_eq!(outcome.leads.len(), 2);
        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.leads[0].score, 11.0);
    }

    #[test]
    fn test_merge_different_id_is_distinct() {
        let existing = vec![lead("1", "A", 10.0)];
        let incoming = vec![lead("2", "A", 10.0)];

        let outcome = apply_import(existing, incoming, ImportMode::Merge);
        assert_eq!(outcome.leads.len(), 2);
    }

    #[test]
    fn test_merge_ties_keep_existing_first() {
        let existing = vec![lead("e1", "A", 50.0), lead("e2", "B", 50.0)];
        let incoming = vec![lead("n1", "C", 50.0), lead("n2", "D", 70.0)];

        let outcome = apply_import(existing, incoming, ImportMode::Merge);
        assert_eq!(ids(&outcome.leads), vec!["n2", "e1", "e2", "n1"]);
    }

    #[test]
    fn test_merge_twice_is_idempotent() {
        let existing = vec![lead("1", "A", 10.0)];
        let incoming = vec![lead("2", "B", 30.0), lead("3", "C", 20.0)];

        let once = apply_import(existing, incoming.clone(), ImportMode::Merge);
        let twice = apply_import(once.leads.clone(), incoming, ImportMode::Merge);

        assert_eq!(once.leads, twice.leads);
        assert_eq!(twice.added, 0);
        assert_eq!(twice.skipped, 2);
    }

    #[test]
    fn test_negative_zero_score_is_duplicate() {
        let existing = vec![lead("1", "A", 0.0)];
        let incoming = vec![lead("1", "A", -0.0)];

        let outcome = apply_import(existing, incoming, ImportMode::Merge);
        assert_eq!(outcome.leads.len(), 1);
    }
}
