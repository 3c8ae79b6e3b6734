use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fee breakdown line description for the Stripe processing fee.
pub const STRIPE_PROCESSING_FEE_DESC: &str = "Stripe processing fees";

/// Fee breakdown line description for the VAT charged on the fee.
pub const STRIPE_FEE_VAT_DESC: &str = "VAT";

/// Settlement figures taken from the order's first transaction's first
/// charge. All amounts in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub amount_cents: i64,
    pub fee_cents: i64,
    /// Fee breakdown line matched by [`STRIPE_PROCESSING_FEE_DESC`]; 0 if absent.
    pub processing_fee_cents: i64,
    /// Fee breakdown line matched by [`STRIPE_FEE_VAT_DESC`]; 0 if absent.
    pub fee_tax_cents: i64,
    pub net_cents: i64,
    pub paid: bool,
    pub refunded: bool,
    pub captured: bool,
}

/// One flattened record per physical device of an internal order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedOrder {
    pub order_id: String,
    pub created_at: DateTime<Utc>,
    pub sales_channel: String,

    pub product_id: String,
    pub product_name: Option<String>,
    pub consumer_category_id: String,
    pub consumer_category_name: Option<String>,

    pub skipass_gross_cents: i64,
    pub skipass_tax_cents: i64,
    pub lifepass_gross_cents: i64,
    pub lifepass_tax_cents: i64,
    pub insurance_gross_cents: i64,
    pub insurance_tax_cents: i64,

    /// Serial derived from the device's DTA code. Empty when the code had no
    /// second segment.
    pub dta_serial: String,
    /// Serial recovered from the order's embedded external-ticket mirror.
    pub skidata_serial: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,

    pub settlement: Option<Settlement>,
    pub test_order: bool,
}

impl ProcessedOrder {
    /// Serial used for composite-key identity: the mirror-recovered serial
    /// when present, else the DTA-derived one.
    pub fn effective_serial(&self) -> &str {
        self.skidata_serial.as_deref().unwrap_or(&self.dta_serial)
    }
}

/// Evidence for the lossy paths of extraction. Returned, never logged.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExtractDiag {
    /// Device had no price line with matching product, category and
    /// insurance flag. The device contributes no output record.
    DeviceWithoutPriceLine {
        order_id: String,
        device_code: String,
        product_id: String,
        consumer_category_id: String,
        insured: bool,
    },
}

/// Extraction result: flattened records plus diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractOutcome {
    pub records: Vec<ProcessedOrder>,
    pub diags: Vec<ExtractDiag>,
}

impl ExtractOutcome {
    pub fn is_lossless(&self) -> bool {
        self.diags.is_empty()
    }
}
