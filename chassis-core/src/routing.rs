//! Route table construction.
//!
//! Handler-marked units with a declared class-level path prefix contribute
//! one route per path-tagged method: `normalize(prefix + "/" + suffix)`,
//! where `normalize` collapses every run of `/` into one. Each route stores
//! a callable already bound to the owning instance, so dispatch never does
//! name-based lookup.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::component::{HandlerFn, Role, SharedComponent};
use crate::container::Container;
use crate::error::HandlerError;

/// A committed handler: the owning instance and the method bound to it.
pub struct RouteBinding {
    /// Canonical key of the owning component.
    pub owner: String,
    /// Method identifier, for diagnostics.
    pub handler_name: &'static str,
    instance: SharedComponent,
    handler: HandlerFn,
}

impl RouteBinding {
    /// Invoke the bound method with the optional `id` parameter.
    pub fn invoke(&self, id: Option<&str>) -> Result<String, HandlerError> {
        (self.handler)(self.instance.as_ref(), id)
    }
}

/// Immutable path to handler index, built once at startup.
pub struct RouteTable {
    routes: HashMap<String, RouteBinding>,
}

impl RouteTable {
    /// Index the tagged methods of every handler unit that declares a base
    /// path. Later registrations of the same normalized path win.
    pub fn build(container: &Container) -> Self {
        let mut routes: HashMap<String, RouteBinding> = HashMap::new();

        for entry in container.canonical_entries() {
            let descriptor = entry.descriptor;
            if !descriptor.has_role(Role::Handler) {
                continue;
            }
            let Some(prefix) = descriptor.base_path else {
                continue;
            };
            for route in &descriptor.routes {
                let path = join_paths(prefix, route.path);
                let binding = RouteBinding {
                    owner: descriptor.canonical_key(),
                    handler_name: route.name,
                    instance: entry.instance.clone(),
                    handler: route.invoke,
                };
                match routes.insert(path.clone(), binding) {
                    Some(previous) => debug!(
                        path = %path,
                        replaced = previous.handler_name,
                        by = route.name,
                        "route overwritten"
                    ),
                    None => trace!(
                        path = %path,
                        unit = descriptor.type_name,
                        method = route.name,
                        "route mapped"
                    ),
                }
            }
        }

        Self { routes }
    }

    pub fn get(&self, path: &str) -> Option<&RouteBinding> {
        self.routes.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.routes.contains_key(path)
    }

    /// Every mapped path, in no particular order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Join a class-level prefix and a method-level suffix into one route
/// path, collapsing repeated separators.
pub fn join_paths(prefix: &str, suffix: &str) -> String {
    normalize(&format!("{prefix}/{suffix}"))
}

fn normalize(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut previous_was_separator = false;
    for c in path.chars() {
        if c == '/' {
            if previous_was_separator {
                continue;
            }
            previous_was_separator = true;
        } else {
            previous_was_separator = false;
        }
        out.push(c);
    }
    out
}
