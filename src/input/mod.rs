//! Data read from outside the crate.
pub mod translation;
