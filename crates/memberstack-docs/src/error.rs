/// Request-level failures. Filesystem problems stay as
/// `mcp_common::error::CommonError` and are logged where the catalog is built.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),
}
