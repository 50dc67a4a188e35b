use crate::cli::commands::StatusFilterArg;
use crate::filter::FilterState;
use anyhow::Result;
use colored::Colorize;

use super::{CommandContext, block_on};

pub fn handle_filter(
    ctx: &CommandContext,
    query: Option<String>,
    status: Option<StatusFilterArg>,
    clear: bool,
) -> Result<()> {
    let mut state = FilterState::new(&ctx.store_dir)?;
    block_on(state.hydrate())?;

    let changed = clear || query.is_some() || status.is_some();
    if clear {
        state.clear();
    }
    if let Some(q) = query {
        state.set_query(q);
    }
    if let Some(s) = status {
        state.set_status(s.into());
    }

    let current = state.effective_query();
    let label = if changed { "Saved filter" } else { "Filter" };
    let search = if current.query.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        format!("\"{}\"", current.query)
    };
    println!("{}: search {} status {}", label.green(), search, current.status.to_string().cyan());
    Ok(())
}
