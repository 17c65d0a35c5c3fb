//! Request validation against the embedded resource types.

pub mod requests;
pub mod search;
