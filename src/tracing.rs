//! Tracing infrastructure for development diagnostics
//!
//! Provides structured logging plus a coordinator state snapshot that debug
//! builds diff around every update.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=knobs::entry=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/knobs/logs/knobs.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::entry::EntryId;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/knobs/logs/knobs.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender =
                tracing_appender::rolling::daily(logs_dir, crate::config_paths::LOG_FILE_PREFIX);
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A host may already own the global subscriber
    if let Err(e) = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()
    {
        eprintln!("Warning: Tracing already initialized: {}", e);
    }
}

/// Lightweight snapshot of coordinator state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct StateSnapshot {
    pub dirty: Vec<EntryId>,
    pub current_category: Option<String>,
    pub menu_open: bool,
    pub show_advanced: bool,
    pub filter: String,
}

impl StateSnapshot {
    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &StateSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.dirty != other.dirty {
            changes.push(format!(
                "dirty: {} → {}",
                self.dirty.len(),
                other.dirty.len()
            ));
        }
        if self.current_category != other.current_category {
            changes.push(format!(
                "category: {} → {}",
                self.current_category.as_deref().unwrap_or("none"),
                other.current_category.as_deref().unwrap_or("none")
            ));
        }
        if self.menu_open != other.menu_open {
            changes.push(format!("menu open: {}", other.menu_open));
        }
        if self.show_advanced != other.show_advanced {
            changes.push(format!("show advanced: {}", other.show_advanced));
        }
        if self.filter != other.filter {
            changes.push(format!("filter: {:?} → {:?}", self.filter, other.filter));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}
