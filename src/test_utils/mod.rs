//! Test utilities.
//!
//! - In-memory repository implementations standing in for Postgres
//! - Capturing and failing email senders and notifiers
//! - `TestAppStateBuilder` for HTTP-level tests

mod app_state_builder;
mod auth_mocks;
mod factories;
mod feedback_mocks;

pub use app_state_builder::*;
pub use auth_mocks::*;
pub use factories::*;
pub use feedback_mocks::*;
