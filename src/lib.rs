//! libris application library
//!
//! Provides the application modules mounted by the libris service binary.

pub mod modules;

pub use modules::*;
