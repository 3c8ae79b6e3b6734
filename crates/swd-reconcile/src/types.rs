use serde::{Deserialize, Serialize};
use swd_extract::ProcessedOrder;

/// Where a record exists: both systems, only internally, only in the
/// external export, or linked internally without its device record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconciliationStatus {
    Matched,
    OnlyInternal,
    OnlySkidata,
    MissingDevice,
}

impl ReconciliationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReconciliationStatus::Matched => "matched",
            ReconciliationStatus::OnlyInternal => "only-internal",
            ReconciliationStatus::OnlySkidata => "only-skidata",
            ReconciliationStatus::MissingDevice => "missing-device",
        }
    }
}

/// How a matched ticket found its internal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchStrategy {
    /// A candidate serial of the ticket hit the serial index.
    Serial,
    /// No serial hit; matched on order id + product + consumer category.
    OrderFallback,
}

/// One classified row of the reconciliation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationItem {
    pub record: ProcessedOrder,
    pub status: ReconciliationStatus,
    pub has_order_id: bool,
    /// Present on matched items only.
    pub strategy: Option<MatchStrategy>,
}

impl ReconciliationItem {
    /// Real internal pricing exists only for items that originate from an
    /// internal record.
    pub fn is_priced(&self) -> bool {
        matches!(
            self.status,
            ReconciliationStatus::Matched | ReconciliationStatus::OnlyInternal
        )
    }
}

/// Evidence of data anomalies observed while indexing. Returned, never logged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ReconcileDiag {
    /// One normalized serial spans records of more than one order.
    SerialConflict {
        serial: String,
        order_ids: Vec<String>,
    },
}

/// Full classified list plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub items: Vec<ReconciliationItem>,
    pub diags: Vec<ReconcileDiag>,
}

impl ReconcileOutcome {
    pub fn count_with_status(&self, status: ReconciliationStatus) -> usize {
        self.items.iter().filter(|i| i.status == status).count()
    }
}
