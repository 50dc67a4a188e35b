//! The seller console session: one lead set, one opportunity list, one filter.

use crate::{
    config::ConsoleConfig,
    error::{ConsoleError, Result},
    filter::{FilterState, LeadQuery},
    import,
    merge::{ImportMode, ImportOutcome},
    model::{Lead, LeadEdit, Opportunity, StatusFilter},
    source::LeadSource,
    storage::{LeadSetHandle, LocalStore},
    validation,
};
use std::path::Path;
use std::time::Duration;

pub const OPPORTUNITIES_KEY: &str = "opportunities";

const ID_ALPHABET: [char; 36] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i',
    'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];

pub struct Session {
    source: LeadSource,
    leads: LeadSetHandle,
    opportunities: LocalStore<Vec<Opportunity>>,
    filter: FilterState,
    load_error: Option<String>,
    opportunity_prefix: String,
    id_length: usize,
    default_import_mode: ImportMode,
    mutation_delay: Duration,
}

impl Session {
    /// Hydrate persisted state and fetch the initial leads.
    ///
    /// A failed fetch leaves the lead set empty and is reported through
    /// [`Session::load_error`] instead of failing the session.
    pub async fn open(config: &ConsoleConfig, store_dir: &Path, source: LeadSource) -> Result<Self> {
        let mut opportunities = LocalStore::new(store_dir, OPPORTUNITIES_KEY, Vec::new())?;
        let mut filter = FilterState::new(store_dir)?;

        let ((), (), fetched) = tokio::join!(
            opportunities.hydrate(),
            filter.hydrate(),
            source.fetch_all()
        );

        let (initial, load_error) = match fetched {
            Ok(leads) => (leads, None),
            Err(e) => {
                tracing::warn!(error = %e, "Initial lead fetch failed");
                (Vec::new(), Some(e.to_string()))
            }
        };

        Ok(Self {
            source,
            leads: LeadSetHandle::spawn(initial),
            opportunities,
            filter,
            load_error,
            opportunity_prefix: config.console.opportunity_prefix.clone(),
            id_length: config.console.id_length,
            default_import_mode: config.console.import_mode,
            mutation_delay: config.console.mutation_delay(),
        })
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn source(&self) -> &LeadSource {
        &self.source
    }

    pub fn default_import_mode(&self) -> ImportMode {
        self.default_import_mode
    }

    /// Fetch again and replace the lead set. On failure the current set is kept.
    pub async fn reload(&mut self) -> Result<usize> {
        match self.source.fetch_all().await {
            Ok(leads) => {
                self.load_error = None;
                self.leads.load(leads).await
            }
            Err(e) => {
                self.load_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub async fn all_leads(&self) -> Result<Vec<Lead>> {
        self.leads.snapshot().await
    }

    pub async fn find_lead(&self, id: &str) -> Result<Lead> {
        self.leads
            .snapshot()
            .await?
            .into_iter()
            .find(|l| l.id == id)
            .ok_or_else(|| ConsoleError::NotFound(id.to_string()))
    }

    /// Leads as they should be displayed right now.
    pub async fn displayed(&self) -> Result<Vec<Lead>> {
        let leads = self.leads.snapshot().await?;
        Ok(self.filter.effective_query().apply(&leads))
    }

    pub fn query(&self) -> LeadQuery {
        self.filter.effective_query()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.filter.set_query(query);
    }

    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.filter.set_status(status);
    }

    pub fn clear_filter(&mut self) {
        self.filter.clear();
    }

    pub async fn save_lead(&self, edit: LeadEdit) -> Result<Lead> {
        validation::validate_email(&edit.email)?;
        tokio::time::sleep(self.mutation_delay).await;

        tracing::info!(id = %edit.id, status = %edit.status, "Saving lead");
        self.leads.save(edit).await
    }

    /// Turn a lead into a new opportunity. There is no way back.
    pub async fn convert(&mut self, id: &str, amount: Option<f64>) -> Result<Opportunity> {
        tokio::time::sleep(self.mutation_delay).await;

        let lead = self.leads.remove(id).await?;
        let opportunity = Opportunity::from_lead(self.generate_opportunity_id(), &lead)
            .with_amount(amount);
        tracing::info!(lead = %lead.id, opportunity = %opportunity.id, "Converted lead");

        let created = opportunity.clone();
        self.opportunities.update(|list| list.push(opportunity));
        Ok(created)
    }

    /// Validate a payload and fold it into the lead set. Nothing changes on error.
    pub async fn import(&self, bytes: &[u8], mode: ImportMode) -> Result<ImportOutcome> {
        let incoming = import::parse_leads(bytes)?;
        self.apply_import(incoming, mode).await
    }

    /// Fold already validated leads into the lead set.
    pub async fn apply_import(&self, leads: Vec<Lead>, mode: ImportMode) -> Result<ImportOutcome> {
        self.leads.import(leads, mode).await
    }

    pub fn opportunities(&self) -> &[Opportunity] {
        self.opportunities.value()
    }

    fn generate_opportunity_id(&self) -> String {
        let suffix = nanoid::format(nanoid::rngs::default, &ID_ALPHABET, self.id_length);
        format!("{}{}", self.opportunity_prefix, suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LeadStatus, OpportunityStage};
    use tempfile::TempDir;

    fn sample_leads() -> Vec<Lead> {
        vec![
            Lead::new("1", "Ann", "Acme")
                .with_email("ann@acme.com")
                .with_source("Web")
                .with_score(50.0),
            Lead::new("7", "Sam", "Foo")
                .with_email("sam@foo.com")
                .with_source("Referral")
                .with_status(LeadStatus::Qualified)
                .with_score(70.0),
        ]
    }

    fn static_source(leads: Vec<Lead>) -> LeadSource {
        LeadSource::Static {
            leads,
            delay: Duration::ZERO,
        }
    }

    async fn open_session(dir: &Path) -> Session {
        Session::open(&ConsoleConfig::default(), dir, static_source(sample_leads()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_convert_creates_opportunity_and_removes_lead() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(temp_dir.path()).await;

        let opp = session.convert("7", None).await.unwrap();
        assert_eq!(opp.account_name, "Foo");
        assert_eq!(opp.name, "Sam's Opportunity");
        assert_eq!(opp.stage, OpportunityStage::Prospecting);
        assert!(opp.id.starts_with("opp-"));

        assert_eq!(session.opportunities().len(), 1);
        assert!(session.find_lead("7").await.is_err());
        assert_eq!(session.all_leads().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_opportunities_survive_new_session() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut session = open_session(temp_dir.path()).await;
            session.convert("7", Some(5000.0)).await.unwrap();
        }

        let session = open_session(temp_dir.path()).await;
        assert_eq!(session.opportunities().len(), 1);
        assert_eq!(session.opportunities()[0].amount, Some(5000.0));
    }

    #[tokio::test]
    async fn test_convert_unknown_lead_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(temp_dir.path()).await;

        assert!(matches!(
            session.convert("404", None).await,
            Err(ConsoleError::NotFound(_))
        ));
        assert!(session.opportunities().is_empty());
        assert_eq!(session.all_leads().await.unwrap(), sample_leads());
    }

    #[tokio::test]
    async fn test_save_rejects_bad_email() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(temp_dir.path()).await;

        let edit = LeadEdit {
            id: "1".to_string(),
            email: "not-an-email".to_string(),
            status: LeadStatus::Contacted,
        };
        assert!(matches!(
            session.save_lead(edit).await,
            Err(ConsoleError::Validation(_))
        ));
        assert_eq!(session.all_leads().await.unwrap(), sample_leads());
    }

    #[tokio::test]
    async fn test_save_changes_only_email_and_status() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(temp_dir.path()).await;

        let edit = LeadEdit {
            id: "1".to_string(),
            email: "a@b.co".to_string(),
            status: LeadStatus::Contacted,
        };
        session.save_lead(edit).await.unwrap();

        let leads = session.all_leads().await.unwrap();
        let mut expected = sample_leads();
        expected[0].email = "a@b.co".to_string();
        expected[0].status = LeadStatus::Contacted;
        assert_eq!(leads, expected);
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_session_usable() {
        let temp_dir = TempDir::new().unwrap();
        let source = LeadSource::Fixture {
            path: temp_dir.path().join("missing.json"),
            delay: Duration::ZERO,
        };
        let session = Session::open(&ConsoleConfig::default(), temp_dir.path(), source)
            .await
            .unwrap();

        assert!(session.load_error().is_some());
        assert!(session.displayed().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_import_bad_payload_leaves_leads() {
        let temp_dir = TempDir::new().unwrap();
        let session = open_session(temp_dir.path()).await;

        assert!(session.import(b"[]", ImportMode::Replace).await.is_err());
        assert_eq!(session.all_leads().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_import_replace_then_display_filtered() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = open_session(temp_dir.path()).await;
        let payload = br#"[
            {"id": 10, "name": "Zed", "email": "z@zeta.io", "company": "Zeta",
             "source": "Event", "status": "New", "score": 15},
            {"id": 11, "name": "Yas", "email": "y@yotta.io", "company": "Yotta",
             "source": "Event", "status": "Contacted", "score": 85}
        ]"#;

        let outcome = session.import(payload, ImportMode::Replace).await.unwrap();
        assert_eq!(outcome.added, 2);

        session.set_status_filter(StatusFilter::Only(LeadStatus::New));
        let shown = session.displayed().await.unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].id, "10");
    }
}
