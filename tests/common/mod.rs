//! Common test infrastructure
//!
//! Fake model backends and shared sample texts for the integration tests.
//! Tests should only import from this module, not from internal submodules.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::{pipeline_with, KeywordEmbedder, FixedSentiment};
//!
//! #[test]
//! fn test_something() {
//!     let pipeline = pipeline_with(KeywordEmbedder, FixedSentiment::positive());
//!     let result = pipeline.analyze("a happy tune").unwrap();
//! }
//! ```

mod constants;
mod fixtures;

// Public API - this is what tests import
#[allow(unused_imports)]
pub use constants::*;
#[allow(unused_imports)]
pub use fixtures::*;
