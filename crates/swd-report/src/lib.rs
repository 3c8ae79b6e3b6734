//! swd-report
//!
//! Runs the three reconciliation stages for one resort/date window and
//! assembles the report: classified items, aggregate statistics, and the
//! diagnostics collected along the way.
//!
//! Pure and synchronous. The caller fetches orders and the ticketing export
//! before invoking this; a failed fetch means the report is not built at all
//! rather than built on partial data.

use serde::{Deserialize, Serialize};
use swd_extract::{extract_all, ExtractDiag};
use swd_reconcile::{reconcile, ReconcileDiag, ReconciliationItem};
use swd_schemas::{Catalog, ExternalTicketItem, Order};
use swd_stats::{
    channel_stats, reconciliation_stats, revenue_stats, Channel, ChannelSets, ChannelStats,
    ReconciliationStats, RevenueStats, Subset,
};

/// Already-fetched inputs for one report window.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub orders: &'a [Order],
    pub tickets: &'a [ExternalTicketItem],
    pub catalog: &'a Catalog,
    pub channels: ChannelSets,
}

/// Diagnostics from any stage, in stage order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportDiag {
    Extract(ExtractDiag),
    Reconcile(ReconcileDiag),
}

/// The aggregate statistics of one report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTotals {
    pub recon_live: ReconciliationStats,
    pub recon_test: ReconciliationStats,
    pub revenue_live: RevenueStats,
    pub revenue_test: RevenueStats,
    pub online: ChannelStats,
    pub kiosk: ChannelStats,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub items: Vec<ReconciliationItem>,
    pub totals: ReportTotals,
    pub diags: Vec<ReportDiag>,
}

/// Extract → reconcile → aggregate.
pub fn build_report(input: ReportInput<'_>) -> ReconciliationReport {
    let extracted = extract_all(input.orders, input.catalog);
    let reconciled = reconcile(&extracted.records, input.tickets, input.catalog);

    let totals = ReportTotals {
        recon_live: reconciliation_stats(&reconciled.items, Subset::Live),
        recon_test: reconciliation_stats(&reconciled.items, Subset::Test),
        revenue_live: revenue_stats(&reconciled.items, Subset::Live),
        revenue_test: revenue_stats(&reconciled.items, Subset::Test),
        online: channel_stats(&reconciled.items, &input.channels, Channel::Online),
        kiosk: channel_stats(&reconciled.items, &input.channels, Channel::Kiosk),
    };

    let mut diags: Vec<ReportDiag> = Vec::new();
    diags.extend(extracted.diags.into_iter().map(ReportDiag::Extract));
    diags.extend(reconciled.diags.into_iter().map(ReportDiag::Reconcile));

    ReconciliationReport {
        items: reconciled.items,
        totals,
        diags,
    }
}
