//! carelink-aggir
//!
//! AGGIR autonomy scoring. Pure computation, no database and no I/O.
//! Turns the four yes/no answers recorded for each variable of the grid into
//! A/B/C letters, combines sub-variables, and walks the eight weighted groups
//! of the official algorithm to assign a GIR from 1 (most dependent) to 6.

pub mod combine;
pub mod config;
pub mod engine;
pub mod error;
pub mod evaluation;
pub mod item;
pub mod parser;
pub mod rating;
pub mod tables;

use carelink_core::models::evaluation::EvaluationDocument;

pub use config::{MissingItemPolicy, ScoringConfig};
pub use engine::{DependencyLevel, Engine, ScoringResult, evaluate, score_group};
pub use error::AggirError;
pub use evaluation::Evaluation;
pub use item::Item;
pub use rating::{Rating, Response, classify};
pub use tables::RuleGroup;

/// Parse a stored document and score it.
pub fn score_document(
    engine: &Engine,
    document: &EvaluationDocument,
) -> Result<ScoringResult, AggirError> {
    engine.evaluate(&parser::parse(document))
}
