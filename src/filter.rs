use crate::error::Result;
use crate::merge::sort_by_score_desc;
use crate::model::{Lead, StatusFilter};
use crate::storage::LocalStore;
use std::path::Path;

pub const SEARCH_TERM_KEY: &str = "searchTerm";
pub const STATUS_FILTER_KEY: &str = "statusFilter";

/// Free-text search over name and company, plus a status filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadQuery {
    pub query: String,
    pub status: StatusFilter,
}

impl LeadQuery {
    pub fn new(query: impl Into<String>, status: StatusFilter) -> Self {
        Self {
            query: query.into(),
            status,
        }
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        let matches_search = if self.query.is_empty() {
            true
        } else {
            let query_lower = self.query.to_lowercase();
            lead.name.to_lowercase().contains(&query_lower)
                || lead.company.to_lowercase().contains(&query_lower)
        };
        matches_search && self.status.allows(lead.status)
    }

    /// Matching leads, highest score first.
    pub fn apply(&self, leads: &[Lead]) -> Vec<Lead> {
        let mut results: Vec<Lead> = leads.iter().filter(|l| self.matches(l)).cloned().collect();
        sort_by_score_desc(&mut results);
        results
    }
}

/// The persisted search term and status filter.
pub struct FilterState {
    search_term: LocalStore<String>,
    status_filter: LocalStore<StatusFilter>,
}

impl FilterState {
    pub fn new(store_dir: &Path) -> Result<Self> {
        Ok(Self {
            search_term: LocalStore::new(store_dir, SEARCH_TERM_KEY, String::new())?,
            status_filter: LocalStore::new(store_dir, STATUS_FILTER_KEY, StatusFilter::All)?,
        })
    }

    pub async fn hydrate(&mut self) {
        tokio::join!(self.search_term.hydrate(), self.status_filter.hydrate());
    }

    pub fn is_hydrated(&self) -> bool {
        self.search_term.get().1 && self.status_filter.get().1
    }

    /// The query to filter with. Until both values have loaded this is the
    /// show-everything default, so a stale default never filters rows.
    pub fn effective_query(&self) -> LeadQuery {
        if !self.is_hydrated() {
            return LeadQuery::default();
        }
        self.stored_query()
    }

    /// The stored values, regardless of hydration.
    pub fn stored_query(&self) -> LeadQuery {
        LeadQuery::new(self.search_term.value().clone(), *self.status_filter.value())
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.search_term.set(query.into());
    }

    pub fn set_status(&mut self, status: StatusFilter) {
        self.status_filter.set(status);
    }

    pub fn clear(&mut self) {
        self.set_query(String::new());
        self.set_status(StatusFilter::All);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LeadStatus;
    use tempfile::TempDir;

    fn ann_and_bob() -> Vec<Lead> {
        vec![
            Lead::new("1", "Ann", "Acme")
                .with_status(LeadStatus::New)
                .with_score(50.0),
            Lead::new("2", "Bob", "Beta")
                .with_status(LeadStatus::Qualified)
                .with_score(90.0),
        ]
    }

    fn names(leads: &[Lead]) -> Vec<&str> {
        leads.iter().map(|l| l.name.as_str()).collect()
    }

    #[test]
    fn test_empty_query_shows_all_sorted() {
        let results = LeadQuery::default().apply(&ann_and_bob());
        assert_eq!(names(&results), vec!["Bob", "Ann"]);
    }

    #[test]
    fn test_query_matches_name_substring() {
        let results = LeadQuery::new("ann", StatusFilter::All).apply(&ann_and_bob());
        assert_eq!(names(&results), vec!["Ann"]);
    }

    #[test]
    fn test_query_matches_company_case_insensitive() {
        let results = LeadQuery::new("AC", StatusFilter::All).apply(&ann_and_bob());
        assert_eq!(names(&results), vec!["Ann"]);
    }

    #[test]
    fn test_single_letter_query_matches_both() {
        let results = LeadQuery::new("a", StatusFilter::All).apply(&ann_and_bob());
        assert_eq!(names(&results), vec!["Bob", "Ann"]);
    }

    #[test]
    fn test_status_filter() {
        let query = LeadQuery::new("", StatusFilter::Only(LeadStatus::Qualified));
        assert_eq!(names(&query.apply(&ann_and_bob())), vec!["Bob"]);

        let query = LeadQuery::new("ann", StatusFilter::Only(LeadStatus::Qualified));
        assert!(query.apply(&ann_and_bob()).is_empty());
    }

    #[test]
    fn test_output_is_subset_and_non_increasing() {
        let mut leads = ann_and_bob();
        for (i, score) in [10.0, 70.0, 70.0, 5.0, 95.0].into_iter().enumerate() {
            leads.push(
                Lead::new(format!("x{}", i), format!("Xa{}", i), "Axiom").with_score(score),
            );
        }
        let query = LeadQuery::new("a", StatusFilter::Only(LeadStatus::New));
        let results = query.apply(&leads);

        assert!(results.iter().all(|r| leads.contains(r)));
        assert!(results.iter().all(|r| query.matches(r)));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[tokio::test]
    async fn test_filter_state_defaults_before_hydration() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut state = FilterState::new(temp_dir.path()).unwrap();
            state.hydrate().await;
            state.set_query("acme");
            state.set_status(StatusFilter::Only(LeadStatus::New));
        }

        let mut state = FilterState::new(temp_dir.path()).unwrap();
        assert_eq!(state.effective_query(), LeadQuery::default());

        state.hydrate().await;
        assert_eq!(
            state.effective_query(),
            LeadQuery::new("acme", StatusFilter::Only(LeadStatus::New))
        );

        state.clear();
        assert_eq!(state.effective_query(), LeadQuery::default());
    }
}
