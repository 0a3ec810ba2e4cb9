//! Game implementations.

pub mod territory;
