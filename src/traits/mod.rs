//! Trait definitions for GitHub collection operations.
//!
//! Each model type implements the traits it supports, encapsulating
//! endpoint differences in the implementations.

mod list;

pub use list::{List, DEFAULT_PAGE_SIZE};
