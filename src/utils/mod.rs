//! Utility functions

pub mod hash;

pub use hash::hash_string_djb2;
