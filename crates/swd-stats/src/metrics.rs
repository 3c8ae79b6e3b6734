use serde::{Deserialize, Serialize};
use swd_reconcile::{ReconciliationItem, ReconciliationStatus};

/// Which half of the live/test split a reduction covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Subset {
    Live,
    Test,
}

impl Subset {
    fn covers(&self, item: &ReconciliationItem) -> bool {
        match self {
            Subset::Live => !item.record.test_order,
            Subset::Test => item.record.test_order,
        }
    }
}

/// Item counts per reconciliation status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationStats {
    pub matched: usize,
    pub only_internal: usize,
    pub only_skidata: usize,
    pub missing_device: usize,
}

impl ReconciliationStats {
    pub fn total(&self) -> usize {
        self.matched + self.only_internal + self.only_skidata + self.missing_device
    }
}

/// Revenue and tax sums over priced items. Cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueStats {
    pub total_items: usize,
    pub skipass_gross_cents: i64,
    pub skipass_tax_cents: i64,
    pub lifepass_gross_cents: i64,
    pub lifepass_tax_cents: i64,
    pub insurance_gross_cents: i64,
    pub insurance_tax_cents: i64,
}

/// Settlement sums over positive-amount settlements. Cents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripeStats {
    pub amount_cents: i64,
    pub fee_cents: i64,
    pub processing_fee_cents: i64,
    pub fee_tax_cents: i64,
    pub net_cents: i64,
    pub transaction_count: usize,
}

/// Count items per status for one half of the live/test split.
pub fn reconciliation_stats(items: &[ReconciliationItem], subset: Subset) -> ReconciliationStats {
    let mut out = ReconciliationStats::default();
    for item in items.iter().filter(|i| subset.covers(i)) {
        match item.status {
            ReconciliationStatus::Matched => out.matched += 1,
            ReconciliationStatus::OnlyInternal => out.only_internal += 1,
            ReconciliationStatus::OnlySkidata => out.only_skidata += 1,
            ReconciliationStatus::MissingDevice => out.missing_device += 1,
        }
    }
    out
}

/// Sum the six revenue/tax fields over priced items of one subset.
/// Priced means real internal pricing exists (matched or only-internal).
pub fn revenue_stats(items: &[ReconciliationItem], subset: Subset) -> RevenueStats {
    let mut out = RevenueStats::default();
    for item in items.iter().filter(|i| i.is_priced() && subset.covers(i)) {
        let r = &item.record;
        out.total_items += 1;
        out.skipass_gross_cents += r.skipass_gross_cents;
        out.skipass_tax_cents += r.skipass_tax_cents;
        out.lifepass_gross_cents += r.lifepass_gross_cents;
        out.lifepass_tax_cents += r.lifepass_tax_cents;
        out.insurance_gross_cents += r.insurance_gross_cents;
        out.insurance_tax_cents += r.insurance_tax_cents;
    }
    out
}

/// Sum settlement figures over items carrying a positive-amount settlement.
pub fn stripe_stats<'a, I>(items: I) -> StripeStats
where
    I: IntoIterator<Item = &'a ReconciliationItem>,
{
    let mut out = StripeStats::default();
    for item in items {
        let s = match &item.record.settlement {
            Some(s) if s.amount_cents > 0 => s,
            _ => continue,
        };
        out.amount_cents += s.amount_cents;
        out.fee_cents += s.fee_cents;
        out.processing_fee_cents += s.processing_fee_cents;
        out.fee_tax_cents += s.fee_tax_cents;
        out.net_cents += s.net_cents;
        out.transaction_count += 1;
    }
    out
}
