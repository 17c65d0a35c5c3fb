//! Administration console flows over a shared store.

pub mod console;
pub mod resources;
