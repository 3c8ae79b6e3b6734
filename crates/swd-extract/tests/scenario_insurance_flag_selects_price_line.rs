use chrono::{TimeZone, Utc};
use swd_extract::extract_order;
use swd_schemas::{Catalog, Order, OrderDevice, PriceComponent, PriceLine};

fn component(gross: i64, tax: i64) -> Option<PriceComponent> {
    Some(PriceComponent {
        gross_cents: gross,
        tax_cents: tax,
    })
}

fn order_with_two_lines() -> Order {
    Order {
        order_id: "200".to_string(),
        resort_id: "R1".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 11, 10, 0, 0).unwrap(),
        sales_channel: "online".to_string(),
        test_order: false,
        price_lines: vec![
            PriceLine {
                product_id: "P1".to_string(),
                consumer_category_id: "C1".to_string(),
                skipass: component(5000, 1000),
                lifepass: component(500, 100),
                insurance: None,
            },
            PriceLine {
                product_id: "P1".to_string(),
                consumer_category_id: "C1".to_string(),
                skipass: component(5000, 1000),
                lifepass: component(500, 100),
                insurance: component(900, 150),
            },
        ],
        devices: Vec::new(),
        ticket_mirror: None,
        transactions: Vec::new(),
    }
}

fn device(insured: bool) -> OrderDevice {
    OrderDevice {
        device_code: "DEV-1".to_string(),
        product_id: "P1".to_string(),
        consumer_category_id: "C1".to_string(),
        insured,
        dta_code: "AB-111111-0".to_string(),
    }
}

#[test]
fn scenario_insured_device_binds_to_insurance_line() {
    let mut order = order_with_two_lines();
    order.devices.push(device(true));

    let out = extract_order(&order, &Catalog::empty());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].insurance_gross_cents, 900);
    assert_eq!(out.records[0].insurance_tax_cents, 150);
}

#[test]
fn scenario_uninsured_device_binds_to_plain_line() {
    let mut order = order_with_two_lines();
    order.devices.push(device(false));

    let out = extract_order(&order, &Catalog::empty());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].insurance_gross_cents, 0);
    assert_eq!(out.records[0].lifepass_gross_cents, 500);
}

#[test]
fn scenario_zero_gross_insurance_counts_as_uninsured() {
    let mut order = order_with_two_lines();
    // Replace the insurance line's sub-price with a zero gross: the line no
    // longer "has insurance" and must bind to the uninsured device instead.
    order.price_lines[1].insurance = component(0, 0);
    order.price_lines.remove(0);
    order.devices.push(device(false));

    let out = extract_order(&order, &Catalog::empty());
    assert_eq!(out.records.len(), 1);
    assert_eq!(out.records[0].insurance_gross_cents, 0);
}
