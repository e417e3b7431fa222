//! Damage severity scoring and the narrative report codec behind Claim Insight.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
