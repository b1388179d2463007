use std::path::{Path, PathBuf};

use crate::error::AppError;

const DEFAULT_DOCS_PATH: &str = "docs";

/// Application configuration loaded explicitly from environment variables.
///
/// The corpus root is the only input the retrieval engine needs. A root that
/// does not exist is tolerated here; requests then see an empty catalog.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the markdown corpus.
    pub docs_path: String,
    /// Address to accept MCP clients on over TCP. `None` serves on stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Optional:
    /// - `MEMBERSTACK_DOCS_PATH`: corpus root (default: "docs")
    /// - `MCP_TCP_LISTEN_ADDR`: serve over TCP instead of stdio
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_vars(
            std::env::var("MEMBERSTACK_DOCS_PATH").ok(),
            std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        )
    }

    fn from_vars(
        docs_path: Option<String>,
        tcp_listen_addr: Option<String>,
    ) -> Result<Self, AppError> {
        let docs_path = match docs_path {
            Some(path) if path.trim().is_empty() => {
                return Err(AppError::Config(
                    "MEMBERSTACK_DOCS_PATH must not be empty".to_string(),
                ));
            }
            Some(path) => path,
            None => DEFAULT_DOCS_PATH.to_string(),
        };

        Ok(Self {
            docs_path,
            tcp_listen_addr: tcp_listen_addr.filter(|addr| !addr.trim().is_empty()),
        })
    }

    pub fn docs_path(&self) -> PathBuf {
        Path::new(&self.docs_path).to_path_buf()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_docs_directory_on_stdio() {
        let config = Config::from_vars(None, None).unwrap();
        assert_eq!(config.docs_path(), PathBuf::from("docs"));
        assert!(config.tcp_listen_addr.is_none());
    }

    #[test]
    fn rejects_blank_docs_path() {
        let err = Config::from_vars(Some("   ".to_string()), None).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn blank_listen_addr_means_stdio() {
        let config = Config::from_vars(Some("/srv/docs".to_string()), Some(String::new())).unwrap();
        assert_eq!(config.docs_path, "/srv/docs");
        assert!(config.tcp_listen_addr.is_none());
    }
}
