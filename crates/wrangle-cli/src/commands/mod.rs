//! Command implementations.

pub mod apply;
pub mod profile;
pub mod suggest;
