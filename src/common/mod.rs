//! Common types, traits, and error definitions
//!
//! This module provides the foundational building blocks shared by the
//! geometry kernel, the visibility graph, and the search engine.

pub mod types;
pub mod traits;
pub mod error;

pub use types::*;
pub use traits::*;
pub use error::*;
