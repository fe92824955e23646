//! Game implementations.

pub mod fifteen;
