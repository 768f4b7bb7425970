// Plugin inputs
// -------------
// The raw, unvalidated settings handed to the plugin by the CI runner.
// Drone exposes step settings as `PLUGIN_*` environment variables; each
// one can also be given as a long flag for local runs. Everything is a
// plain string and may be empty: deciding what is required is the job of
// `validate`, not of the argument parser.

use clap::Args;

/// Flat bag of settings as supplied by the pipeline.
#[derive(Args, Debug, Clone, Default)]
#[command(next_help_heading = "Nexus Options")]
pub struct PluginInput {
    /// Nexus protocol generation (`nexus2` or `nexus3`)
    #[arg(long, env = "PLUGIN_NEXUS_VERSION", default_value = "")]
    pub nexus_version: String,

    /// Scheme prepended to the server URL in multi-file mode
    #[arg(long, env = "PLUGIN_PROTOCOL", default_value = "")]
    pub protocol: String,

    /// Default group id for artifacts that do not set one
    #[arg(long, env = "PLUGIN_GROUP_ID", default_value = "")]
    pub group_id: String,

    /// Target repository name
    #[arg(long, env = "PLUGIN_REPOSITORY", default_value = "")]
    pub repository: String,

    /// YAML or JSON list of artifacts to upload (multi-file mode)
    #[arg(long, env = "PLUGIN_ARTIFACTS", default_value = "")]
    pub artifacts: String,

    /// User for basic authentication against Nexus
    #[arg(long, env = "PLUGIN_USERNAME", default_value = "")]
    pub username: String,

    /// Password for basic authentication; never printed in help or logs
    #[arg(
        long,
        env = "PLUGIN_PASSWORD",
        default_value = "",
        hide_env_values = true,
        hide_default_value = true
    )]
    pub password: String,

    /// Nexus base URL
    ///
    /// In multi-file mode this is a host (and optional path) without a
    /// scheme; in single-file mode it must be absolute.
    #[arg(long, env = "PLUGIN_SERVER_URL", default_value = "")]
    pub server_url: String,

    /// File to upload (single-file mode)
    #[arg(long, env = "PLUGIN_FILENAME", default_value = "")]
    pub filename: String,

    /// Repository format, e.g. `maven2` or `raw`
    #[arg(long, env = "PLUGIN_FORMAT", default_value = "")]
    pub format: String,

    /// Legacy coordinates for single-file mode
    ///
    /// Space separated `-C<key>=<value>` and `-A<key>=<value>` tokens, e.g.
    /// `-CgroupId=com.acme -CartifactId=app -Cversion=1.0 -Aextension=jar -Aclassifier=bin`.
    #[arg(long, env = "PLUGIN_ATTRIBUTES", default_value = "", allow_hyphen_values = true)]
    pub attributes: String,
}
