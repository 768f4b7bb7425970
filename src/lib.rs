// Library root
// ------------
// This crate uploads build artifacts to a Nexus repository from a CI
// step. The binary (`main.rs`) only parses settings and wires these
// modules together.
//
// Module responsibilities:
// - `args`, `mode`, `validate`: turn raw `PLUGIN_*` settings into an
//   `UploadSession`, rejecting bad input before anything is sent.
// - `session`, `ledger`: the normalized run model and the per-artifact
//   failure record.
// - `api`: the HTTP transport seam and its reqwest implementation.
// - `nexus`: the Nexus 2 (PUT) and Nexus 3 (multipart POST) uploaders.
// - `dispatch`: runs the uploads one by one and fills the ledger.
// - `observer`, `ui`: lifecycle reporting (tracing records, progress bar).
// - `output`: publishes `UPLOAD_STATUS` for later pipeline steps.
// - `cli`: command line definition, logging setup and the top-level run.
pub mod api;
pub mod args;
pub mod cli;
pub mod dispatch;
pub mod error;
pub mod ledger;
pub mod mode;
pub mod nexus;
pub mod observer;
pub mod output;
pub mod session;
pub mod ui;
pub mod validate;

pub use dispatch::dispatch;
pub use error::{ArtifactError, ConfigError, UploadError};
pub use validate::{prepare, Prepared};
