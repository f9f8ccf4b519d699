use carelink_core::error::CoreError;
use thiserror::Error;

use crate::item::Item;

#[derive(Debug, Error)]
pub enum AggirError {
    #[error("invalid evaluation document: {0}")]
    Document(#[from] CoreError),

    #[error("evaluation is missing {} item(s): {}", missing.len(), format_items(missing))]
    IncompleteEvaluation { missing: Vec<Item> },

    #[error("no item with code '{0}' in the evaluation document")]
    UnknownItem(String),

    #[error("GIR must be between 1 and 6, got {0}")]
    InvalidLevel(u8),
}

fn format_items(items: &[Item]) -> String {
    items
        .iter()
        .map(|i| i.code())
        .collect::<Vec<_>>()
        .join(", ")
}
