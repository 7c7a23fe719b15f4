//! Small generic building blocks used by the symbolic parts of the crate.

/// **(internal)** Utility structures and functions.
pub mod structs;
/// Abstract set and transition system traits.
pub mod traits;
