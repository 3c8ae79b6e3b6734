//! swd-stats
//!
//! Stage 3 — Aggregator. Pure reductions over the classified item list:
//! - Status counts, split live vs test
//! - Revenue/tax sums over priced items (matched or only-internal)
//! - Stripe settlement sums over positive-amount settlements
//! - Channel split (kiosk vs online) with nested Stripe sums
//!
//! All sums are order-independent. No IO.

mod channel;
mod metrics;

pub use channel::{channel_stats, Channel, ChannelSets, ChannelStats};
pub use metrics::{
    reconciliation_stats, revenue_stats, stripe_stats, ReconciliationStats, RevenueStats,
    StripeStats, Subset,
};
