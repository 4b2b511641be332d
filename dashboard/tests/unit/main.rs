//! Unit tests for the NLQ dashboard.
//!
//! These tests drive the application services through mocked ports and run
//! without network or filesystem side effects.

mod port_allocation;
mod property_tests;
