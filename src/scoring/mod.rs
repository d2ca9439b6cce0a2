//! Scoring module.
//!
//! Pure aggregations over the session history. Scores are recomputed on
//! demand from the current session list, never stored.

pub mod calculator;

pub use calculator::{calculate_compliance_score, calculate_confidence_score};
