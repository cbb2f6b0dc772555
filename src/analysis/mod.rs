//! Analysis modules.
//!
//! Pure functions shared by the providers and the orchestrators:
//! normalization of provider output, JSON extraction from model text,
//! and the fixed fallback results.

pub mod defaults;
pub mod extract;
pub mod normalizer;

pub use defaults::*;
pub use extract::*;
pub use normalizer::*;
