use crate::model::Opportunity;
use crate::session::OPPORTUNITIES_KEY;
use crate::storage::LocalStore;
use anyhow::Result;

use super::utils::print_opportunity_list;
use super::{CommandContext, block_on};

pub fn handle_opportunities(ctx: &CommandContext, json: bool) -> Result<()> {
    let mut store: LocalStore<Vec<Opportunity>> =
        LocalStore::new(&ctx.store_dir, OPPORTUNITIES_KEY, Vec::new())?;
    block_on(store.hydrate())?;

    let opportunities = store.value();
    if json {
        println!("{}", serde_json::to_string_pretty(opportunities)?);
    } else {
        print_opportunity_list(opportunities);
    }
    Ok(())
}
