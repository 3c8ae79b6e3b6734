//! swd-testkit
//!
//! Fixture builders and loaders for reconciliation scenario tests. The
//! cross-crate scenarios live under this crate's tests/ directory.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::fs;

use swd_schemas::{
    Catalog, Charge, ExternalTicketItem, FeeDetail, MirrorTicket, Order, OrderDevice,
    PaymentTransaction, PriceComponent, PriceLine,
};

/// Fixed timestamp helper: 2026-01-<day> <hour>:00 UTC.
pub fn ts(day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
}

pub fn component(gross_cents: i64, tax_cents: i64) -> Option<PriceComponent> {
    Some(PriceComponent {
        gross_cents,
        tax_cents,
    })
}

/// Incremental order fixture. Starts live, kiosk channel, no lines/devices.
pub struct OrderBuilder {
    order: Order,
}

pub fn order(order_id: &str) -> OrderBuilder {
    OrderBuilder {
        order: Order {
            order_id: order_id.to_string(),
            resort_id: "R1".to_string(),
            created_at: ts(10, 9),
            sales_channel: "kiosk".to_string(),
            test_order: false,
            price_lines: Vec::new(),
            devices: Vec::new(),
            ticket_mirror: None,
            transactions: Vec::new(),
        },
    }
}

impl OrderBuilder {
    pub fn channel(mut self, channel: &str) -> Self {
        self.order.sales_channel = channel.to_string();
        self
    }

    pub fn test_order(mut self) -> Self {
        self.order.test_order = true;
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.order.created_at = at;
        self
    }

    pub fn skipass_line(mut self, product: &str, category: &str, gross: i64, tax: i64) -> Self {
        self.order.price_lines.push(PriceLine {
            product_id: product.to_string(),
            consumer_category_id: category.to_string(),
            skipass: component(gross, tax),
            lifepass: None,
            insurance: None,
        });
        self
    }

    pub fn full_line(
        mut self,
        product: &str,
        category: &str,
        skipass: (i64, i64),
        lifepass: (i64, i64),
        insurance: Option<(i64, i64)>,
    ) -> Self {
        self.order.price_lines.push(PriceLine {
            product_id: product.to_string(),
            consumer_category_id: category.to_string(),
            skipass: component(skipass.0, skipass.1),
            lifepass: component(lifepass.0, lifepass.1),
            insurance: insurance.and_then(|(g, t)| component(g, t)),
        });
        self
    }

    pub fn device(mut self, product: &str, category: &str, insured: bool, dta_code: &str) -> Self {
        let n = self.order.devices.len() + 1;
        self.order.devices.push(OrderDevice {
            device_code: format!("DEV-{n}"),
            product_id: product.to_string(),
            consumer_category_id: category.to_string(),
            insured,
            dta_code: dta_code.to_string(),
        });
        self
    }

    pub fn mirror(mut self, serial: &str) -> Self {
        self.order
            .ticket_mirror
            .get_or_insert_with(Vec::new)
            .push(MirrorTicket {
                serials: vec![serial.to_string()],
                valid_from: Some(ts(10, 0)),
                valid_until: Some(ts(11, 0)),
            });
        self
    }

    pub fn stripe_charge(mut self, amount: i64, fee: i64, processing: i64, vat: i64) -> Self {
        self.order.transactions.push(PaymentTransaction {
            charges: vec![Charge {
                amount_cents: amount,
                fee_cents: fee,
                net_cents: amount - fee,
                paid: true,
                refunded: false,
                captured: true,
                fee_details: vec![
                    FeeDetail {
                        description: "Stripe processing fees".to_string(),
                        amount_cents: processing,
                    },
                    FeeDetail {
                        description: "VAT".to_string(),
                        amount_cents: vat,
                    },
                ],
            }],
        });
        self
    }

    pub fn build(self) -> Order {
        self.order
    }
}

/// External ticket fixture with one DTA code per serial-bearing identifier.
pub fn ticket(
    order_id: Option<&str>,
    product: &str,
    category: &str,
    gross_cents: i64,
    dta_codes: &[&str],
) -> ExternalTicketItem {
    ExternalTicketItem {
        order_id: order_id.map(|s| s.to_string()),
        product_id: product.to_string(),
        consumer_category_id: category.to_string(),
        gross_cents,
        issued_at: ts(10, 12),
        test_ticket: false,
        dta_codes: dta_codes.iter().map(|s| s.to_string()).collect(),
    }
}

/// Catalog fixture from (product id, name) and (category id, name) pairs.
pub fn catalog(products: &[(&str, &str)], categories: &[(&str, &str)]) -> Catalog {
    let mut c = Catalog::empty();
    for (id, name) in products {
        c.products.insert(id.to_string(), name.to_string());
    }
    for (id, name) in categories {
        c.categories.insert(id.to_string(), name.to_string());
    }
    c
}

pub fn load_orders_json(path: &str) -> Result<Vec<Order>> {
    let s = fs::read_to_string(path).with_context(|| format!("read orders: {path}"))?;
    serde_json::from_str(&s).context("parse orders json")
}

pub fn load_tickets_json(path: &str) -> Result<Vec<ExternalTicketItem>> {
    let s = fs::read_to_string(path).with_context(|| format!("read tickets: {path}"))?;
    serde_json::from_str(&s).context("parse tickets json")
}

pub fn load_catalog_json(path: &str) -> Result<Catalog> {
    let s = fs::read_to_string(path).with_context(|| format!("read catalog: {path}"))?;
    serde_json::from_str(&s).context("parse catalog json")
}
