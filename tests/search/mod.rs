//! Search control applied to resource collections.

pub mod end_to_end;
pub mod filters;
