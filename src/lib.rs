//! # Seller Console - triage leads and convert them into opportunities
//!
//! The console loads a list of sales leads from a JSON fixture or an HTTP
//! endpoint, lets a seller search, filter, and edit them, and converts
//! qualified leads into opportunities. Filter settings and opportunities
//! persist between runs; the lead list itself lives only for the session.
//!
//! ## Quick Start
//!
//! ```bash
//! # Create .seller.toml and a starter leads.json
//! seller init
//!
//! # List leads, highest score first
//! seller list -q acme -s qualified
//!
//! # Check an import file
//! seller check new-leads.json
//!
//! # Interactive session: edit, convert, import
//! seller console
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading and management
//! - [`error`]: Error types and result aliases
//! - [`model`]: Data models (Lead, Opportunity, LeadStatus, etc.)
//! - [`import`]: Lead import files and their validation
//! - [`session`]: One console session over the lead set and its stores
//! - [`source`]: Where leads are fetched from
//! - [`storage`]: Persisted values and the in-memory lead set

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.seller.toml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `ConsoleError` enum and `Result<T>` type alias.
pub mod error;

/// Search and status filtering of the lead list.
///
/// Holds the persisted search term and status filter.
pub mod filter;

/// Lead import files.
///
/// Accepts `.json` uploads and validates them into leads.
pub mod import;

/// Tracing subscriber setup for stderr and optional JSON log files.
pub mod logging;

/// Merge and replace policies for imported leads.
pub mod merge;

/// Data models for the console.
///
/// Includes `Lead`, `Opportunity`, `LeadStatus`, and `StatusFilter`.
pub mod model;

/// One console session over the lead set and its persisted stores.
///
/// Saves, conversions and imports go through here.
pub mod session;

/// Lead sources: fixture files, HTTP endpoints, static lists.
pub mod source;

/// Storage layer.
///
/// Persisted key/value stores and the single-writer lead set.
pub mod storage;

/// Input validation utilities.
///
/// Validates edited emails and store keys.
pub mod validation;
