// Bootstrap sequence and the assembled application

use std::path::Path;

use tracing::info;

use crate::config;
use crate::container::Container;
use crate::discovery;
use crate::dispatch::{self, DispatchOutcome};
use crate::error::Error;
use crate::routing::RouteTable;
use crate::wiring;

/// The immutable result of a completed bootstrap: the container and the
/// route table, read concurrently by dispatch for the process lifetime.
pub struct Application {
    container: Container,
    routes: RouteTable,
}

impl Application {
    /// Run the startup sequence over `base_package`: scan the descriptor
    /// registry, build the container, wire dependencies, build the route
    /// table. Each stage completes fully before the next begins; any
    /// failure aborts the whole sequence.
    pub fn bootstrap(base_package: &str) -> Result<Self, Error> {
        info!(base_package, "bootstrapping application container");

        let units = discovery::scan(base_package)?;
        info!(units = units.len(), "component scan complete");

        let container = Container::build(&units)?;
        info!(
            components = container.component_count(),
            keys = container.key_count(),
            "container initialized"
        );

        wiring::wire(&container);
        info!("dependency wiring complete");

        let routes = RouteTable::build(&container);
        info!(routes = routes.len(), "route table built");

        Ok(Self { container, routes })
    }

    /// Load the configuration blob at `path`, then bootstrap from its
    /// `basePackage` value.
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let config = config::load_file(path)?;
        Self::bootstrap(&config.base_package)
    }

    /// Dispatch one request against the built structures.
    pub fn dispatch(&self, path: &str, id: Option<&str>) -> DispatchOutcome {
        dispatch::dispatch(&self.routes, path, id)
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }
}
