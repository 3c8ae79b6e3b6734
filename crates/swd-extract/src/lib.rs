//! swd-extract
//!
//! Stage 1 — Device-Price Extractor.
//!
//! Architectural decisions:
//! - One ProcessedOrder per device that has a matching price line
//! - A device without a matching price line is dropped, surfaced as a
//!   returned diagnostic (accepted data loss, never an error)
//! - Absent optional data (settlement, ticket mirror, catalog name)
//!   degrades to None/0/false
//!
//! Deterministic, pure logic. No IO. No logging.

mod extractor;
mod types;

pub use extractor::{extract_all, extract_order};
pub use types::*;
