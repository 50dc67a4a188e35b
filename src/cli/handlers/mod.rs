mod check;
mod console;
mod filter;
mod init;
mod list;
mod opportunities;
mod utils;

pub use check::handle_check;
pub use console::handle_console;
pub use filter::handle_filter;
pub use init::handle_init;
pub use list::{ListParams, handle_list};
pub use opportunities::handle_opportunities;

use crate::config::ConsoleConfig;
use crate::source::LeadSource;
use anyhow::Result;
use std::path::PathBuf;

/// Common context passed to all command handlers
pub struct CommandContext {
    pub config: ConsoleConfig,
    pub root: PathBuf,
    pub store_dir: PathBuf,
}

impl CommandContext {
    pub fn new(config: ConsoleConfig, root: PathBuf) -> Result<Self> {
        let store_dir = config.store_path(&root)?;
        Ok(Self {
            config,
            root,
            store_dir,
        })
    }

    pub fn source(&self) -> Result<LeadSource> {
        Ok(LeadSource::from_config(&self.config, &self.root)?)
    }
}

/// Run an async handler body on a fresh runtime.
fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    Ok(tokio::runtime::Runtime::new()?.block_on(future))
}
