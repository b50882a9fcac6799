// Chassis - a teaching-scale application container
//
// Compile-time component descriptors stand in for runtime introspection;
// bootstrap discovers them, builds a string-keyed IoC container, wires
// declared dependencies, and indexes path-tagged handler methods into an
// immutable route table consulted by the dispatcher.

// Re-export core functionality
pub use chassis_core::*;
