//! Test fixtures for tripcop.
//!
//! Provides a realistic Los Angeles -> Phoenix -> Dallas trip response as
//! the planning API returns it, plus scripted API and notifier doubles.

pub mod la_to_dallas;

pub use la_to_dallas::*;
