//! CSV export of the triage collections.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use neurolab_admin::export::ExportError;
use neurolab_admin::{Config, ConsoleError, export};
use thiserror::Error;

use super::build_console;

/// Which collection to export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Requests,
    Contacts,
    Whitelist,
}

/// Errors that can occur during an export.
#[derive(Debug, Error)]
pub enum ExportCommandError {
    /// Loading the collections failed.
    #[error(transparent)]
    Console(#[from] ConsoleError),

    /// CSV serialization failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// The output file could not be created.
    #[error("Failed to create output file: {0}")]
    Output(#[from] io::Error),
}

/// Export one collection as CSV to a file or stdout.
pub async fn run(
    config: &Config,
    target: Target,
    output: Option<PathBuf>,
) -> Result<(), ExportCommandError> {
    let mut console = build_console(config)?;
    console.load_all().await?;
    let store = console.store();

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };

    let rows = match target {
        Target::Requests => {
            let requests = store.partner_requests();
            export::write_partner_requests(&mut out, requests)?;
            requests.len()
        }
        Target::Contacts => {
            let contacts = store.contacts();
            export::write_contacts(&mut out, contacts)?;
            contacts.len()
        }
        Target::Whitelist => {
            let entries = store.whitelist();
            export::write_whitelist(&mut out, entries)?;
            entries.len()
        }
    };

    if let Some(path) = output {
        tracing::info!("Exported {rows} rows to {}", path.display());
    }
    Ok(())
}
