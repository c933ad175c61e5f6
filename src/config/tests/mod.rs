//! Unit tests for configuration loading and resolution.
//!
//! - `helpers`: Shared test utilities
//! - `precedence`: Layer precedence tests
//! - `resolution`: Actions fallbacks, validation, and pull request sources

mod helpers;
