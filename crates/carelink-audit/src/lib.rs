//! carelink-audit
//!
//! Application-level audit events. The database keeps the rows; these events
//! record who derived which GIR, and how, for the legal audit trail.

pub mod error;
pub mod events;
