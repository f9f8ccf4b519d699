//! carelink-core
//!
//! Pure domain types shared by the CareLink services. No database or HTTP
//! dependency; this is the stored shape of patient evaluation documents.

pub mod error;
pub mod models;
