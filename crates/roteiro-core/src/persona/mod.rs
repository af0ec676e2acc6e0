//! Persona lookup.

pub mod registry;

pub use registry::PersonaRegistry;
