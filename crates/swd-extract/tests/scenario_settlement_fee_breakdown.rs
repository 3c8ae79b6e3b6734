use chrono::{TimeZone, Utc};
use swd_extract::extract_order;
use swd_schemas::{
    Catalog, Charge, FeeDetail, Order, OrderDevice, PaymentTransaction, PriceComponent, PriceLine,
};

fn order_with_charge(charge: Option<Charge>) -> Order {
    Order {
        order_id: "300".to_string(),
        resort_id: "R1".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 2, 1, 8, 30, 0).unwrap(),
        sales_channel: "kiosk".to_string(),
        test_order: false,
        price_lines: vec![PriceLine {
            product_id: "P1".to_string(),
            consumer_category_id: "C1".to_string(),
            skipass: Some(PriceComponent {
                gross_cents: 4500,
                tax_cents: 900,
            }),
            lifepass: None,
            insurance: None,
        }],
        devices: vec![OrderDevice {
            device_code: "DEV-1".to_string(),
            product_id: "P1".to_string(),
            consumer_category_id: "C1".to_string(),
            insured: false,
            dta_code: "AB-777777-0".to_string(),
        }],
        ticket_mirror: None,
        transactions: charge
            .map(|c| vec![PaymentTransaction { charges: vec![c] }])
            .unwrap_or_default(),
    }
}

#[test]
fn scenario_fee_lines_matched_by_exact_description() {
    let charge = Charge {
        amount_cents: 4500,
        fee_cents: 160,
        net_cents: 4340,
        paid: true,
        refunded: false,
        captured: true,
        fee_details: vec![
            FeeDetail {
                description: "Stripe processing fees".to_string(),
                amount_cents: 130,
            },
            FeeDetail {
                description: "VAT".to_string(),
                amount_cents: 30,
            },
        ],
    };

    let out = extract_order(&order_with_charge(Some(charge)), &Catalog::empty());
    let s = out.records[0].settlement.as_ref().unwrap();
    assert_eq!(s.amount_cents, 4500);
    assert_eq!(s.fee_cents, 160);
    assert_eq!(s.processing_fee_cents, 130);
    assert_eq!(s.fee_tax_cents, 30);
    assert_eq!(s.net_cents, 4340);
    assert!(s.paid && s.captured && !s.refunded);
}

#[test]
fn scenario_unrecognized_fee_descriptions_default_to_zero() {
    let charge = Charge {
        amount_cents: 4500,
        fee_cents: 160,
        net_cents: 4340,
        paid: true,
        refunded: false,
        captured: true,
        fee_details: vec![FeeDetail {
            description: "stripe processing fees".to_string(), // wrong case
            amount_cents: 130,
        }],
    };

    let out = extract_order(&order_with_charge(Some(charge)), &Catalog::empty());
    let s = out.records[0].settlement.as_ref().unwrap();
    assert_eq!(s.processing_fee_cents, 0);
    assert_eq!(s.fee_tax_cents, 0);
}

#[test]
fn scenario_missing_settlement_degrades_to_none() {
    let out = extract_order(&order_with_charge(None), &Catalog::empty());
    assert_eq!(out.records.len(), 1);
    assert!(out.records[0].settlement.is_none());
}
