use crate::import::ImportFile;
use crate::merge::ImportMode;
use crate::model::{Lead, LeadEdit, LeadStatus, StatusFilter};
use crate::session::Session;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{IsTerminal, Write};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::utils::{print_lead, print_lead_list, print_opportunity_list};
use super::{CommandContext, block_on};

const HELP: &str = "\
Commands:
  list                          Show leads with the current filter
  search <text>                 Search name and company (no text clears)
  status <status|all>           Filter by status
  filter                        Show the current filter
  clear                         Show every lead again
  show <id>                     Show one lead
  save <id> <email> <status>    Update a lead's email and status
  convert <id> [amount]         Convert a lead into an opportunity
  import <file> [merge|replace] Check a JSON file and stage its leads
  confirm                       Apply the staged import
  cancel                        Discard the staged import
  opps                          List opportunities
  reload                        Fetch leads again
  help                          Show this help
  quit                          Leave the console";

#[derive(Debug, Clone, PartialEq)]
enum ConsoleCommand {
    List,
    Search(String),
    Status(StatusFilter),
    Filter,
    Clear,
    Show(String),
    Save(LeadEdit),
    Convert { id: String, amount: Option<f64> },
    Import { file: PathBuf, mode: Option<ImportMode> },
    Confirm,
    Cancel,
    Opportunities,
    Reload,
    Help,
    Quit,
}

impl ConsoleCommand {
    fn parse(line: &str) -> std::result::Result<Option<Self>, String> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let args: Vec<&str> = rest.split_whitespace().collect();

        let command = match word.to_lowercase().as_str() {
            "" => return Ok(None),
            "list" | "ls" => ConsoleCommand::List,
            "search" => ConsoleCommand::Search(rest.to_string()),
            "status" => {
                let raw = args.first().ok_or("usage: status <status|all>")?;
                ConsoleCommand::Status(raw.parse().map_err(|e: crate::error::ConsoleError| e.to_string())?)
            }
            "filter" => ConsoleCommand::Filter,
            "clear" => ConsoleCommand::Clear,
            "show" => ConsoleCommand::Show(args.first().ok_or("usage: show <id>")?.to_string()),
            "save" => match args.as_slice() {
                [id, email, status] => ConsoleCommand::Save(LeadEdit {
                    id: id.to_string(),
                    email: email.to_string(),
                    status: status
                        .parse::<LeadStatus>()
                        .map_err(|e| e.to_string())?,
                }),
                _ => return Err("usage: save <id> <email> <status>".to_string()),
            },
            "convert" => match args.as_slice() {
                [id] => ConsoleCommand::Convert {
                    id: id.to_string(),
                    amount: None,
                },
                [id, amount] => ConsoleCommand::Convert {
                    id: id.to_string(),
                    amount: Some(
                        amount
                            .parse()
                            .map_err(|_| format!("Invalid amount: {}", amount))?,
                    ),
                },
                _ => return Err("usage: convert <id> [amount]".to_string()),
            },
            "import" => match args.as_slice() {
                [file] => ConsoleCommand::Import {
                    file: PathBuf::from(file),
                    mode: None,
                },
                [file, mode] => ConsoleCommand::Import {
                    file: PathBuf::from(file),
                    mode: Some(mode.parse()?),
                },
                _ => return Err("usage: import <file> [merge|replace]".to_string()),
            },
            "confirm" => ConsoleCommand::Confirm,
            "cancel" => ConsoleCommand::Cancel,
            "opps" | "opportunities" => ConsoleCommand::Opportunities,
            "reload" => ConsoleCommand::Reload,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };
        Ok(Some(command))
    }
}

/// Leads that passed validation and wait for `confirm` or `cancel`.
#[derive(Debug)]
struct PendingImport {
    file: PathBuf,
    mode: ImportMode,
    leads: Vec<Lead>,
}

impl PendingImport {
    fn summary(&self) -> String {
        let count = self.leads.len();
        match self.mode {
            ImportMode::Replace => format!(
                "This will replace all existing leads with {} new leads from your file.",
                count
            ),
            ImportMode::Merge => format!(
                "This will add {} new leads to your existing data. Duplicates will be removed based on matching all fields.",
                count
            ),
        }
    }
}

pub fn handle_console(ctx: &CommandContext, mode: Option<ImportMode>) -> Result<()> {
    let source = ctx.source()?;
    block_on(async {
        let mut session = Session::open(&ctx.config, &ctx.store_dir, source)
            .await
            .context("Failed to start console session")?;
        run_session(&mut session, mode).await
    })?
}

async fn run_session(session: &mut Session, mode: Option<ImportMode>) -> Result<()> {
    let default_mode = mode.unwrap_or(session.default_import_mode());
    let interactive = std::io::stdin().is_terminal();

    if let Some(err) = session.load_error() {
        println!("{} {}", "Error:".red(), err);
    } else {
        let count = session.all_leads().await?.len();
        println!("Loaded {} leads from {}", count, session.source().describe());
    }
    if interactive {
        println!("Type 'help' for commands.");
    }

    let mut pending: Option<PendingImport> = None;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        if interactive {
            print!("{} ", ">".cyan());
            std::io::stdout().flush()?;
        }
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match ConsoleCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                println!("{} {}", "Error:".red(), msg);
                continue;
            }
        };
        if command == ConsoleCommand::Quit {
            break;
        }
        if let Err(e) = execute(session, &mut pending, command, default_mode).await {
            println!("{} {}", "Error:".red(), e);
        }
    }
    Ok(())
}

async fn execute(
    session: &mut Session,
    pending: &mut Option<PendingImport>,
    command: ConsoleCommand,
    default_mode: ImportMode,
) -> Result<()> {
    match command {
        ConsoleCommand::List => print_lead_list(&session.displayed().await?),
        ConsoleCommand::Search(text) => {
            session.set_search(text);
            print_lead_list(&session.displayed().await?);
        }
        ConsoleCommand::Status(status) => {
            session.set_status_filter(status);
            print_lead_list(&session.displayed().await?);
        }
        ConsoleCommand::Filter => {
            let query = session.query();
            println!("Filter: search \"{}\" status {}", query.query, query.status);
        }
        ConsoleCommand::Clear => {
            session.clear_filter();
            print_lead_list(&session.displayed().await?);
        }
        ConsoleCommand::Show(id) => print_lead(&session.find_lead(&id).await?),
        ConsoleCommand::Save(edit) => {
            let lead = session.save_lead(edit).await?;
            println!("{} {} {} [{}]", "Saved".green(), lead.id.cyan(), lead.email, lead.status);
        }
        ConsoleCommand::Convert { id, amount } => {
            let opp = session.convert(&id, amount).await?;
            println!(
                "{} {} -> {} {}",
                "Converted".green(),
                id.cyan(),
                opp.id.cyan(),
                opp.name
            );
        }
        ConsoleCommand::Import { file, mode } => {
            let leads = ImportFile::read(&file).and_then(|f| f.parse())?;
            let staged = PendingImport {
                file,
                mode: mode.unwrap_or(default_mode),
                leads,
            };
            if pending.is_some() {
                println!("{}", "Replacing the previously staged import.".dimmed());
            }
            println!(
                "{} {} leads ready to import from {}",
                "Valid:".green(),
                staged.leads.len(),
                staged.file.display()
            );
            println!("{}", staged.summary());
            println!("Type 'confirm' to apply or 'cancel' to discard.");
            *pending = Some(staged);
        }
        ConsoleCommand::Confirm => {
            let staged = pending
                .take()
                .ok_or_else(|| anyhow::anyhow!("No import pending. Use 'import <file>' first."))?;
            let outcome = session.apply_import(staged.leads, staged.mode).await?;
            match staged.mode {
                ImportMode::Replace => println!(
                    "{} replaced all leads with {} leads",
                    "Imported:".green(),
                    outcome.added
                ),
                ImportMode::Merge => println!(
                    "{} added {} leads, skipped {} duplicates",
                    "Imported:".green(),
                    outcome.added,
                    outcome.skipped
                ),
            }
        }
        ConsoleCommand::Cancel => match pending.take() {
            Some(staged) => println!(
                "Discarded import of {} leads from {}",
                staged.leads.len(),
                staged.file.display()
            ),
            None => println!("No import pending."),
        },
        ConsoleCommand::Opportunities => print_opportunity_list(session.opportunities()),
        ConsoleCommand::Reload => {
            let count = session.reload().await?;
            println!("Loaded {} leads", count);
        }
        ConsoleCommand::Help => println!("{}", HELP),
        ConsoleCommand::Quit => {}
    }
    Ok(())
}
