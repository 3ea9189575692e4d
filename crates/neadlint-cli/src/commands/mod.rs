//! Command implementations.

pub mod check;
pub mod extract;
pub mod schema;
