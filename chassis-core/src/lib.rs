// Core library for the Chassis application container
// Descriptor collection, registration, dependency wiring, routing, dispatch

pub mod application;
pub mod component;
pub mod config;
pub mod container;
pub mod discovery;
pub mod dispatch;
pub mod error;
pub mod inject;
pub mod logging;
pub mod routing;
pub mod wiring;

// Re-export commonly used types
pub use application::*;
pub use component::*;
pub use config::*;
pub use container::*;
pub use discovery::*;
pub use dispatch::*;
pub use error::*;
pub use inject::*;
pub use logging::*;
pub use routing::*;
pub use wiring::*;
