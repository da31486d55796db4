//! Terminal output formatting
//!
//! Display utilities for boards, guess results and daily history.

pub mod display;
pub mod formatters;

pub use display::{print_history, print_report, print_session, print_summary};
