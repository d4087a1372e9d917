//! Test modules for the IR portal
//!
//! ## Test Categories
//!
//! - **Unit Tests**: Individual module functionality
//!   - `api_test` - wire types and client construction
//!   - `app_test` - navigation and client selection
//!
//! - **Integration Tests**: Cross-module functionality
//!   - `integration_test` - fetch lifecycle and assistant cycles driven by
//!     scripted and demo backends
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test
//! cargo test integration_test
//! ```



#[cfg(test)]
pub mod integration_test;
