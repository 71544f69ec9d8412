//! Command implementations

pub mod package;
pub mod validate;
