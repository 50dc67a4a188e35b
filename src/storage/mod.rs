//! Storage for the seller console.
//!
//! Two kinds of state live here:
//!
//! - [`LocalStore`]: a typed value mirrored to `<store>/<key>.json`, loaded
//!   asynchronously at session start. Opportunities and the list filter are
//!   kept this way and survive between runs.
//! - [`LeadSetHandle`]: the session's lead set, owned by a single writer task.
//!   It lives only as long as the process.

mod lead_set;
mod local_store;

pub use lead_set::LeadSetHandle;
pub use local_store::{Hydration, LocalStore};
