//! Component descriptors collected at compile time.
//!
//! Every discoverable unit submits one [`ComponentDescriptor`] to a
//! process-wide `inventory` registry. The descriptor carries everything
//! runtime introspection would have answered about the unit: its capability
//! markers, alias, class-level path prefix, implemented capability
//! interfaces, dependency slots, and path-tagged methods. Each declaration
//! is paired with the function that performs the corresponding cast,
//! assignment, or invocation on the concrete type.

use std::any::Any;
use std::sync::Arc;

use crate::container::Entry;
use crate::error::HandlerError;

/// Marker trait for instantiable, registrable units.
pub trait Component: Any + Send + Sync {}

/// A live component instance shared by the container.
pub type SharedComponent = Arc<dyn Component>;

/// Type-erased view of a component: an `Arc<Concrete>` or an
/// `Arc<dyn SomeCapability>` stored behind `Any`.
pub type ComponentView = Arc<dyn Any + Send + Sync>;

/// A bound handler method: concrete receiver plus the optional `id`.
pub type HandlerFn = fn(&dyn Component, Option<&str>) -> Result<String, HandlerError>;

/// Produces the trait-object view stored under an interface key, given the
/// concrete view of the implementing component.
pub type CastFn = fn(&ComponentView) -> Option<ComponentView>;

/// Default construction protocol of a unit.
pub type ConstructFn = fn() -> Result<Instantiated, Box<dyn std::error::Error + Send + Sync>>;

/// Capability markers a unit can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Service,
    Handler,
}

/// Result of running a unit's construction protocol: the shared instance
/// and its concrete-typed view.
pub struct Instantiated {
    pub instance: SharedComponent,
    pub concrete: ComponentView,
}

impl Instantiated {
    /// Wrap a freshly constructed component.
    pub fn of<C: Component>(component: C) -> Self {
        let concrete = Arc::new(component);
        Self {
            instance: concrete.clone(),
            concrete: Arc::new(concrete),
        }
    }
}

/// Binds an implemented capability interface to the cast producing its
/// trait-object view.
pub struct InterfaceBinding {
    /// Fully-qualified name of the capability interface.
    pub name: &'static str,
    pub cast: CastFn,
}

/// An injectable field of a component.
pub struct DependencySlot {
    pub field: &'static str,
    /// Explicit registry key, when declared.
    pub qualifier: Option<&'static str>,
    /// Declared-type key used when no qualifier is given.
    pub type_key: &'static str,
    /// Fills the slot on the receiver from the entry's views. Returns
    /// false when no view matches the slot's type.
    pub assign: fn(&dyn Component, &Entry) -> bool,
}

/// A method carrying a path tag.
pub struct HandlerRoute {
    pub name: &'static str,
    pub path: &'static str,
    pub invoke: HandlerFn,
}

/// Everything introspection would have answered about one unit.
pub struct ComponentDescriptor {
    /// Fully-qualified identifier, e.g. `user_app::UserController`.
    pub type_name: &'static str,
    pub roles: Vec<Role>,
    pub alias: Option<&'static str>,
    /// Class-level path prefix, handler units only.
    pub base_path: Option<&'static str>,
    pub interfaces: Vec<InterfaceBinding>,
    pub slots: Vec<DependencySlot>,
    pub routes: Vec<HandlerRoute>,
    pub construct: ConstructFn,
}

inventory::collect!(ComponentDescriptor);

impl ComponentDescriptor {
    /// A descriptor with no markers; builder methods declare the rest.
    pub fn new(type_name: &'static str, construct: ConstructFn) -> Self {
        Self {
            type_name,
            roles: Vec::new(),
            alias: None,
            base_path: None,
            interfaces: Vec::new(),
            slots: Vec::new(),
            routes: Vec::new(),
            construct,
        }
    }

    /// Declare a capability marker.
    pub fn role(mut self, role: Role) -> Self {
        if !self.roles.contains(&role) {
            self.roles.push(role);
        }
        self
    }

    /// Declare an explicit registry alias.
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Declare the class-level path prefix.
    pub fn base_path(mut self, prefix: &'static str) -> Self {
        self.base_path = Some(prefix);
        self
    }

    /// Declare an implemented capability interface.
    pub fn implements(mut self, name: &'static str, cast: CastFn) -> Self {
        self.interfaces.push(InterfaceBinding { name, cast });
        self
    }

    /// Declare an injectable field.
    pub fn wires(
        mut self,
        field: &'static str,
        qualifier: Option<&'static str>,
        type_key: &'static str,
        assign: fn(&dyn Component, &Entry) -> bool,
    ) -> Self {
        self.slots.push(DependencySlot {
            field,
            qualifier,
            type_key,
            assign,
        });
        self
    }

    /// Declare a path-tagged method.
    pub fn route(mut self, name: &'static str, path: &'static str, invoke: HandlerFn) -> Self {
        self.routes.push(HandlerRoute { name, path, invoke });
        self
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Simple identifier: the last `::` segment of the type name.
    pub fn simple_name(&self) -> &'static str {
        self.type_name.rsplit("::").next().unwrap_or(self.type_name)
    }

    /// Default registry key: the simple name with its first character
    /// ASCII-lowercased. Exact, not locale-aware.
    pub fn canonical_key(&self) -> String {
        decapitalize(self.simple_name())
    }
}

impl std::fmt::Debug for ComponentDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentDescriptor")
            .field("type_name", &self.type_name)
            .field("roles", &self.roles)
            .field("alias", &self.alias)
            .field("base_path", &self.base_path)
            .finish()
    }
}

/// Downcast a borrowed component to its concrete type.
pub fn downcast<C: Component>(component: &dyn Component) -> Option<&C> {
    let any: &dyn Any = component;
    any.downcast_ref::<C>()
}

pub(crate) fn decapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut key = String::with_capacity(name.len());
            key.push(first.to_ascii_lowercase());
            key.push_str(chars.as_str());
            key
        }
        None => String::new(),
    }
}
