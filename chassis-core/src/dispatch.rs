// Per-request dispatch

use tracing::{debug, warn};

use crate::routing::RouteTable;

/// Outcome of dispatching one request, handed back to the transport layer
/// for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The handler ran and returned a body.
    Success(String),
    /// No route matches the request path.
    NotFound,
    /// The handler could not be invoked, or failed internally.
    ServerError(String),
}

impl DispatchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The response body, for successful outcomes.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Success(body) => Some(body),
            _ => None,
        }
    }
}

/// Resolve `path` against the route table and invoke the bound handler
/// with the optional `id` parameter.
///
/// This is the failure boundary for per-request errors: unknown paths and
/// handler failures come back as data and never affect other requests or
/// the startup structures.
pub fn dispatch(routes: &RouteTable, path: &str, id: Option<&str>) -> DispatchOutcome {
    let Some(binding) = routes.get(path) else {
        debug!(path, "no route mapped");
        return DispatchOutcome::NotFound;
    };

    match binding.invoke(id) {
        Ok(body) => DispatchOutcome::Success(body),
        Err(error) => {
            warn!(
                path,
                owner = %binding.owner,
                handler = binding.handler_name,
                error = %error,
                "handler invocation failed"
            );
            DispatchOutcome::ServerError(error.to_string())
        }
    }
}
