use swd_schemas::{dta_serial, Catalog, Charge, Order, OrderDevice, PriceComponent, PriceLine};

use crate::{
    ExtractDiag, ExtractOutcome, ProcessedOrder, Settlement, STRIPE_FEE_VAT_DESC,
    STRIPE_PROCESSING_FEE_DESC,
};

fn gross(c: &Option<PriceComponent>) -> i64 {
    c.as_ref().map(|x| x.gross_cents).unwrap_or(0)
}

fn tax(c: &Option<PriceComponent>) -> i64 {
    c.as_ref().map(|x| x.tax_cents).unwrap_or(0)
}

/// Locate the price line for a device: product and category must equal the
/// device's, and the line's insurance presence must equal the device's
/// insured flag.
fn price_line_for<'a>(order: &'a Order, device: &OrderDevice) -> Option<&'a PriceLine> {
    order.price_lines.iter().find(|line| {
        line.product_id == device.product_id
            && line.consumer_category_id == device.consumer_category_id
            && line.has_insurance() == device.insured
    })
}

/// Settlement from the first transaction's first charge, if any.
fn settlement_of(order: &Order) -> Option<Settlement> {
    let charge: &Charge = order.transactions.first()?.charges.first()?;

    let fee_line = |desc: &str| -> i64 {
        charge
            .fee_details
            .iter()
            .find(|d| d.description == desc)
            .map(|d| d.amount_cents)
            .unwrap_or(0)
    };

    Some(Settlement {
        amount_cents: charge.amount_cents,
        fee_cents: charge.fee_cents,
        processing_fee_cents: fee_line(STRIPE_PROCESSING_FEE_DESC),
        fee_tax_cents: fee_line(STRIPE_FEE_VAT_DESC),
        net_cents: charge.net_cents,
        paid: charge.paid,
        refunded: charge.refunded,
        captured: charge.captured,
    })
}

/// Recover the mirrored ticket for a device serial, if the order carries a
/// ticket mirror. Matching is serial equality against the mirrored ticket's
/// identification serials.
fn mirror_ticket_for<'a>(
    order: &'a Order,
    serial: &str,
) -> Option<&'a swd_schemas::MirrorTicket> {
    if serial.is_empty() {
        return None;
    }
    order
        .ticket_mirror
        .as_ref()?
        .iter()
        .find(|t| t.serials.iter().any(|s| s == serial))
}

/// Flatten one order into per-device records.
///
/// Devices without a matching price line are skipped and reported in
/// `diags` — the only lossy path of this stage.
pub fn extract_order(order: &Order, catalog: &Catalog) -> ExtractOutcome {
    let mut out = ExtractOutcome::default();
    let settlement = settlement_of(order);

    for device in &order.devices {
        let line = match price_line_for(order, device) {
            Some(l) => l,
            None => {
                out.diags.push(ExtractDiag::DeviceWithoutPriceLine {
                    order_id: order.order_id.clone(),
                    device_code: device.device_code.clone(),
                    product_id: device.product_id.clone(),
                    consumer_category_id: device.consumer_category_id.clone(),
                    insured: device.insured,
                });
                continue;
            }
        };

        let serial = dta_serial(&device.dta_code).unwrap_or_default();
        let mirror = mirror_ticket_for(order, &serial);

        out.records.push(ProcessedOrder {
            order_id: order.order_id.clone(),
            created_at: order.created_at,
            sales_channel: order.sales_channel.clone(),

            product_id: device.product_id.clone(),
            product_name: catalog.product_name(&device.product_id),
            consumer_category_id: device.consumer_category_id.clone(),
            consumer_category_name: catalog.category_name(&device.consumer_category_id),

            skipass_gross_cents: gross(&line.skipass),
            skipass_tax_cents: tax(&line.skipass),
            lifepass_gross_cents: gross(&line.lifepass),
            lifepass_tax_cents: tax(&line.lifepass),
            insurance_gross_cents: gross(&line.insurance),
            insurance_tax_cents: tax(&line.insurance),

            skidata_serial: mirror.map(|_| serial.clone()),
            valid_from: mirror.and_then(|t| t.valid_from),
            valid_until: mirror.and_then(|t| t.valid_until),
            dta_serial: serial,

            settlement: settlement.clone(),
            test_order: order.test_order,
        });
    }

    out
}

/// Flatten a whole order collection, concatenating records and diagnostics
/// in input order.
pub fn extract_all(orders: &[Order], catalog: &Catalog) -> ExtractOutcome {
    let mut out = ExtractOutcome::default();
    for order in orders {
        let mut one = extract_order(order, catalog);
        out.records.append(&mut one.records);
        out.diags.append(&mut one.diags);
    }
    out
}
