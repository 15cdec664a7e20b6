//! Core building blocks for the libris service: layered settings, the
//! module contract, and the registry that wires modules into the
//! application lifecycle.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Migration, Module};
pub use registry::ModuleRegistry;
