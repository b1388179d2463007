/// Error types shared across MCP server crates.
///
/// These errors represent failures in infrastructure components (currently the
/// filesystem backing a document corpus) that are common to multiple MCP servers.
/// Application-specific errors should be defined in each server crate and wrap
/// `CommonError` via `#[from]`.
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("io error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("walk error under {}: {message}", .root.display())]
    Walk { root: PathBuf, message: String },
}

impl CommonError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
