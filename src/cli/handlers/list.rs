use crate::cli::commands::StatusFilterArg;
use crate::filter::{FilterState, LeadQuery};
use anyhow::Result;

use super::utils::print_lead_list;
use super::{CommandContext, block_on};

/// Parameters for list operation
pub struct ListParams {
    pub query: Option<String>,
    pub status: Option<StatusFilterArg>,
    pub json: bool,
}

pub fn handle_list(ctx: &CommandContext, params: ListParams) -> Result<()> {
    let source = ctx.source()?;

    let (fetched, query) = block_on(async {
        let mut saved = FilterState::new(&ctx.store_dir)?;
        let (fetched, ()) = tokio::join!(source.fetch_all(), saved.hydrate());
        let saved_query = saved.effective_query();

        // Explicit flags win over the saved filter, field by field.
        let query = LeadQuery::new(
            params.query.clone().unwrap_or(saved_query.query),
            params.status.map(Into::into).unwrap_or(saved_query.status),
        );
        anyhow::Ok((fetched, query))
    })??;

    let leads = query.apply(&fetched?);

    if params.json {
        println!("{}", serde_json::to_string_pretty(&leads)?);
    } else {
        print_lead_list(&leads);
    }
    Ok(())
}
