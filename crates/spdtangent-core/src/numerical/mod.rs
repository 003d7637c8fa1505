//! Numerical utilities: spectral matrix functions and stability checks.

pub mod stability;
pub mod symmetric;

// Re-export numerical utilities
pub use stability::*;
pub use symmetric::*;
