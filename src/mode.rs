// Input mode selection
// --------------------
// The plugin accepts either a declarative list of artifacts or the legacy
// single-file attribute string, never both.

use crate::args::PluginInput;
use crate::error::ConfigError;

/// How the artifacts to upload were described.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One file described by `filename` plus the attribute flag-string.
    Single,
    /// A structured list of artifacts.
    Multi,
}

/// Decide the input mode from which of the two fields is populated.
pub fn resolve(input: &PluginInput) -> Result<Mode, ConfigError> {
    match (input.attributes.is_empty(), input.artifacts.is_empty()) {
        (false, true) => Ok(Mode::Single),
        (true, false) => Ok(Mode::Multi),
        (true, true) => Err(ConfigError::NoArtifacts),
        (false, false) => Err(ConfigError::AmbiguousMode),
    }
}
