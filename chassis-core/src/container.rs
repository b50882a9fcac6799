// String-keyed IoC container

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::component::{ComponentDescriptor, ComponentView, SharedComponent};
use crate::error::Error;

/// One registered instance as seen through a particular key.
#[derive(Clone)]
pub struct Entry {
    pub descriptor: &'static ComponentDescriptor,
    pub instance: SharedComponent,
    /// Concrete-typed view, shared by every key of this instance.
    pub(crate) concrete: ComponentView,
    /// View this key was registered under: the concrete view for canonical
    /// and alias keys, the trait-object view for capability keys.
    pub(crate) view: ComponentView,
}

impl Entry {
    /// Extract a typed handle from this entry: the key's own view first,
    /// then the concrete view, then every declared interface view.
    pub fn extract<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + 'static,
    {
        if let Some(value) = self.view.downcast_ref::<Arc<T>>() {
            return Some(value.clone());
        }
        if let Some(value) = self.concrete.downcast_ref::<Arc<T>>() {
            return Some(value.clone());
        }
        for binding in &self.descriptor.interfaces {
            if let Some(view) = (binding.cast)(&self.concrete) {
                if let Some(value) = view.downcast_ref::<Arc<T>>() {
                    return Some(value.clone());
                }
            }
        }
        None
    }

    /// Whether this entry and `other` hold the same live instance.
    pub fn same_instance(&self, other: &Entry) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

/// The IoC container: string key to live instance.
///
/// Built once at startup and immutable afterwards; safe to read from
/// concurrent dispatch operations.
pub struct Container {
    entries: HashMap<String, Entry>,
    /// Canonical keys in registration order, one per instance.
    canonical: Vec<String>,
}

impl Container {
    /// Instantiate and register every marked unit, in discovery order.
    ///
    /// Units without a capability marker are ignored. Instantiation
    /// failure, canonical-key collision, and capability-key collision are
    /// fatal. An occupied alias key is skipped, never overwritten.
    pub fn build(units: &[&'static ComponentDescriptor]) -> Result<Self, Error> {
        let mut entries: HashMap<String, Entry> = HashMap::new();
        let mut canonical = Vec::new();

        for &descriptor in units {
            if descriptor.roles.is_empty() {
                trace!(unit = descriptor.type_name, "no capability marker, ignored");
                continue;
            }

            let built = (descriptor.construct)().map_err(|e| Error::Instantiation {
                component: descriptor.type_name.to_string(),
                detail: e.to_string(),
            })?;
            let entry = Entry {
                descriptor,
                instance: built.instance,
                concrete: built.concrete.clone(),
                view: built.concrete,
            };

            let key = descriptor.canonical_key();
            if let Some(existing) = entries.get(&key) {
                return Err(Error::DuplicateKey {
                    key,
                    existing: existing.descriptor.type_name,
                    incoming: descriptor.type_name,
                });
            }
            debug!(unit = descriptor.type_name, key = %key, "component registered");
            canonical.push(key.clone());
            entries.insert(key, entry.clone());

            if let Some(alias) = descriptor.alias {
                if entries.contains_key(alias) {
                    warn!(unit = descriptor.type_name, alias, "alias key occupied, skipped");
                } else {
                    debug!(unit = descriptor.type_name, alias, "alias registered");
                    entries.insert(alias.to_string(), entry.clone());
                }
            }

            for binding in &descriptor.interfaces {
                if let Some(existing) = entries.get(binding.name) {
                    return Err(Error::DuplicateCapability {
                        interface: binding.name.to_string(),
                        existing: existing.descriptor.type_name,
                        incoming: descriptor.type_name,
                    });
                }
                let view =
                    (binding.cast)(&entry.concrete).ok_or_else(|| Error::InvalidDescriptor {
                        component: descriptor.type_name.to_string(),
                        detail: format!("cast for `{}` rejected its own component", binding.name),
                    })?;
                debug!(
                    unit = descriptor.type_name,
                    interface = binding.name,
                    "capability registered"
                );
                entries.insert(
                    binding.name.to_string(),
                    Entry {
                        view,
                        ..entry.clone()
                    },
                );
            }
        }

        Ok(Self { entries, canonical })
    }

    /// Look up an entry by any of its keys.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Every key in the container, in no particular order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Canonical keys in registration order.
    pub fn canonical_keys(&self) -> impl Iterator<Item = &str> {
        self.canonical.iter().map(String::as_str)
    }

    /// Registered instances in registration order, one entry per instance.
    pub fn canonical_entries(&self) -> impl Iterator<Item = &Entry> {
        self.canonical.iter().filter_map(|key| self.entries.get(key))
    }

    /// Number of distinct registered instances.
    pub fn component_count(&self) -> usize {
        self.canonical.len()
    }

    /// Number of keys: canonical, alias, and capability together.
    pub fn key_count(&self) -> usize {
        self.entries.len()
    }
}
