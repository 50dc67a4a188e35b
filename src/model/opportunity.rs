use super::lead::Lead;
use super::types::OpportunityStage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: String,
    pub name: String,

    #[serde(default)]
    pub stage: OpportunityStage,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    pub account_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Opportunity {
    /// Derive the opportunity a lead turns into when it is converted.
    pub fn from_lead(id: String, lead: &Lead) -> Self {
        Self {
            id,
            name: format!("{}'s Opportunity", lead.name),
            stage: OpportunityStage::Prospecting,
            amount: None,
            account_name: lead.company.clone(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn with_amount(mut self, amount: Option<f64>) -> Self {
        self.amount = amount;
        self
    }
}
