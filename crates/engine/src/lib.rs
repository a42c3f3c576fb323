//! VillageSim Engine library.
//!
//! Generates two-character village events with an LLM and stores the
//! resulting transcripts.
//!
//! ## Structure
//!
//! - `use_cases/` - Event generation, the turn driver and stored-event queries
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `config` - Environment-driven settings
//! - `app` - Application composition

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod use_cases;

/// Test fixtures module for integration testing.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
