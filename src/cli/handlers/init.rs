use crate::config::{CONFIG_FILE, ConsoleConfig, SourceSettings, StoreSettings};
use crate::error::ConsoleError;
use anyhow::Result;
use colored::Colorize;

const STARTER_LEADS: &str = include_str!("../../../demos/leads.json");

pub fn handle_init(fixture: String, store_path: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(ConsoleError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let config = ConsoleConfig {
        console: Default::default(),
        source: SourceSettings {
            fixture,
            ..Default::default()
        },
        store: StoreSettings { path: store_path },
    };

    let fixture_path = config.fixture_path(&cwd);
    if !fixture_path.exists() {
        if let Some(parent) = fixture_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&fixture_path, STARTER_LEADS)?;
    }

    config.save(&config_path)?;

    println!(
        "{} seller console in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config: {}", config_path.display());
    println!("  Leads:  {}", fixture_path.display());
    println!("  Store:  {}", config.store_path(&cwd)?.display());

    Ok(())
}
