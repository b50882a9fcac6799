// Error types for the container core

use thiserror::Error;

use crate::config::ConfigError;

/// Fatal startup errors. Any of these aborts the bootstrap sequence;
/// none are recoverable in-process.
#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("base namespace is empty")]
    EmptyNamespace,

    #[error("namespace not found: {0}")]
    NamespaceNotFound(String),

    #[error("failed to instantiate {component}: {detail}")]
    Instantiation { component: String, detail: String },

    #[error("invalid descriptor for {component}: {detail}")]
    InvalidDescriptor { component: String, detail: String },

    #[error("registry key `{key}` already taken by {existing}, rejected {incoming}")]
    DuplicateKey {
        key: String,
        existing: &'static str,
        incoming: &'static str,
    },

    #[error("capability `{interface}` already provided by {existing}, rejected {incoming}")]
    DuplicateCapability {
        interface: String,
        existing: &'static str,
        incoming: &'static str,
    },
}

/// Per-request invocation failures. The dispatcher converts these into a
/// structured server-error outcome; they never cross the dispatch boundary
/// as faults.
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("missing required parameter `{0}`")]
    MissingParameter(&'static str),

    #[error("handler bound to wrong receiver type: expected {0}")]
    ReceiverMismatch(&'static str),

    #[error("{0}")]
    Failed(String),
}
