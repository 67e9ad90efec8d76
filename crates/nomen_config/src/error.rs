//! Errors raised while reading `nomen.toml`.

use std::path::PathBuf;

/// Why a project configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `nomen.toml` could not be read from disk.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        /// The file that was opened.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or has a field of the wrong shape.
    #[error("malformed nomen.toml: {0}")]
    Parse(#[from] toml::de::Error),

    /// A key every project must set is absent or empty.
    #[error("`{0}` must not be empty")]
    MissingField(&'static str),

    /// The same rule appears in both `lint.allow` and `lint.deny`.
    #[error("rule '{0}' is both allowed and denied")]
    ConflictingRule(String),
}
