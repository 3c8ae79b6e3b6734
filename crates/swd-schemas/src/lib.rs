//! swd-schemas
//!
//! Input entity shapes shared by the reconciliation stages.
//!
//! Conventions:
//! - Money is i64 cents. Stripe charge amounts already arrive in cents and are
//!   carried through unchanged.
//! - Timestamps are `chrono::DateTime<Utc>`.
//! - Absent optional sub-objects (settlement, ticket mirror, catalog names)
//!   degrade to `None`/defaults; nothing in this crate panics or errors.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One gross+tax pair on a calculated price line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceComponent {
    pub gross_cents: i64,
    pub tax_cents: i64,
}

/// One calculated price line of an order: per product/category, the three
/// revenue components (skipass, lifepass rental, insurance). A sub-price may
/// be absent entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLine {
    pub product_id: String,
    pub consumer_category_id: String,
    pub skipass: Option<PriceComponent>,
    pub lifepass: Option<PriceComponent>,
    pub insurance: Option<PriceComponent>,
}

impl PriceLine {
    /// A line "has insurance" when an insurance sub-price exists with a
    /// non-zero gross. A zero-priced insurance line counts as no insurance.
    pub fn has_insurance(&self) -> bool {
        self.insurance
            .as_ref()
            .map(|c| c.gross_cents != 0)
            .unwrap_or(false)
    }
}

/// A physical device (lifepass wearable) allocated to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDevice {
    pub device_code: String,
    pub product_id: String,
    pub consumer_category_id: String,
    pub insured: bool,
    /// Structured identifier encoding the serial as the second "-" segment.
    pub dta_code: String,
}

/// One entry of the order's embedded external-ticket mirror.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorTicket {
    /// Identification serials carried by the mirrored ticket.
    pub serials: Vec<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
}

/// One fee breakdown line on a charge ("Stripe processing fees", "VAT", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeDetail {
    pub description: String,
    pub amount_cents: i64,
}

/// Settlement charge as reported by the payment gateway. Amounts in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Charge {
    pub amount_cents: i64,
    pub fee_cents: i64,
    pub net_cents: i64,
    pub paid: bool,
    pub refunded: bool,
    pub captured: bool,
    #[serde(default)]
    pub fee_details: Vec<FeeDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentTransaction {
    #[serde(default)]
    pub charges: Vec<Charge>,
}

/// Internal purchase record (read-only input; fetched upstream of the core).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub resort_id: String,
    pub created_at: DateTime<Utc>,
    pub sales_channel: String,
    pub test_order: bool,
    #[serde(default)]
    pub price_lines: Vec<PriceLine>,
    #[serde(default)]
    pub devices: Vec<OrderDevice>,
    /// Embedded mirror of the external ticketing system, when the order has
    /// already been pushed there. Absent on fresh or failed orders.
    pub ticket_mirror: Option<Vec<MirrorTicket>>,
    #[serde(default)]
    pub transactions: Vec<PaymentTransaction>,
}

/// One row of the external ticketing export (read-only input).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalTicketItem {
    /// Originating internal order id; absent means "no linked order".
    pub order_id: Option<String>,
    pub product_id: String,
    pub consumer_category_id: String,
    pub gross_cents: i64,
    pub issued_at: DateTime<Utc>,
    pub test_ticket: bool,
    /// Serial-bearing identifier strings of the form "<prefix>-<serial>".
    #[serde(default)]
    pub dta_codes: Vec<String>,
}

/// Display-name lookups for products and consumer categories.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub products: BTreeMap<String, String>,
    #[serde(default)]
    pub categories: BTreeMap<String, String>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn product_name(&self, product_id: &str) -> Option<String> {
        self.products.get(product_id).cloned()
    }

    pub fn category_name(&self, category_id: &str) -> Option<String> {
        self.categories.get(category_id).cloned()
    }
}

/// Extract the serial from a DTA code: second "-"-delimited segment,
/// whitespace-trimmed. `None` when the code has no non-empty second segment.
pub fn dta_serial(code: &str) -> Option<String> {
    let seg = code.split('-').nth(1)?.trim();
    if seg.is_empty() {
        None
    } else {
        Some(seg.to_string())
    }
}
