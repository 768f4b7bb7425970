// Output variables
// ----------------
// The runner collects step outputs from a dotenv-style file whose path it
// passes in `DRONE_OUTPUT`. The plugin publishes a single variable,
// `UPLOAD_STATUS`: `Success`, or the JSON list of failed artifacts.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::ledger::Ledger;

/// Name of the variable carrying the run result.
pub const UPLOAD_STATUS: &str = "UPLOAD_STATUS";

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("could not serialize UPLOAD_STATUS: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("could not write output file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Append `KEY=value` to the output file, creating it if needed.
pub fn write_variable(path: &Path, key: &str, value: &str) -> Result<(), OutputError> {
    let write = || -> io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}={}", key, value)
    };
    write().map_err(|source| OutputError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// Publish `UPLOAD_STATUS` for this run's ledger.
pub fn write_upload_status(path: &Path, ledger: &Ledger) -> Result<(), OutputError> {
    let value = ledger.status().render()?;
    write_variable(path, UPLOAD_STATUS, &value)
}
