//! Data models for the seller console.
//!
//! - [`Lead`]: a prospective customer with a qualification score
//! - [`LeadStatus`]: New, Contacted, Qualified, Unqualified
//! - [`StatusFilter`]: every status or exactly one
//! - [`Opportunity`]: a pipeline record created by converting a lead
//! - [`OpportunityStage`]: Prospecting, Proposal, Closed

mod lead;
mod opportunity;
mod types;

pub use lead::{Lead, LeadEdit};
pub use opportunity::Opportunity;
pub use types::{LeadStatus, OpportunityStage, StatusFilter};
