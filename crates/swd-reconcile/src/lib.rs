//! swd-reconcile
//!
//! Stage 2 — Reconciler.
//!
//! Architectural decisions:
//! - Every external ticket yields exactly one classified item
//! - Every internal record yields at most one item (matched or only-internal)
//! - Serial index is multi-valued; duplicate serials surface a diagnostic
//!   instead of overwriting silently
//! - Tie-break is explicit: lowest order id, then earliest creation time,
//!   then lowest DTA serial
//!
//! Deterministic, pure logic. No IO. No logging.

mod engine;
mod types;

pub use engine::reconcile;
pub use types::*;
