use chrono::{TimeZone, Utc};
use swd_extract::extract_order;
use swd_schemas::{Catalog, MirrorTicket, Order, OrderDevice, PriceComponent, PriceLine};

fn order(mirror: Option<Vec<MirrorTicket>>) -> Order {
    Order {
        order_id: "400".to_string(),
        resort_id: "R1".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 2, 2, 9, 0, 0).unwrap(),
        sales_channel: "online".to_string(),
        test_order: false,
        price_lines: vec![PriceLine {
            product_id: "P1".to_string(),
            consumer_category_id: "C1".to_string(),
            skipass: Some(PriceComponent {
                gross_cents: 6000,
                tax_cents: 1200,
            }),
            lifepass: None,
            insurance: None,
        }],
        devices: vec![OrderDevice {
            device_code: "DEV-1".to_string(),
            product_id: "P1".to_string(),
            consumer_category_id: "C1".to_string(),
            insured: false,
            dta_code: "AB-555555-0".to_string(),
        }],
        ticket_mirror: mirror,
        transactions: Vec::new(),
    }
}

#[test]
fn scenario_mirror_match_captures_serial_and_validity() {
    let from = Utc.with_ymd_and_hms(2026, 2, 2, 0, 0, 0).unwrap();
    let until = Utc.with_ymd_and_hms(2026, 2, 3, 0, 0, 0).unwrap();
    let mirror = vec![MirrorTicket {
        serials: vec!["555555".to_string()],
        valid_from: Some(from),
        valid_until: Some(until),
    }];

    let out = extract_order(&order(Some(mirror)), &Catalog::empty());
    let rec = &out.records[0];
    assert_eq!(rec.skidata_serial.as_deref(), Some("555555"));
    assert_eq!(rec.valid_from, Some(from));
    assert_eq!(rec.valid_until, Some(until));
    assert_eq!(rec.effective_serial(), "555555");
}

#[test]
fn scenario_mirror_without_matching_serial_leaves_none() {
    let mirror = vec![MirrorTicket {
        serials: vec!["999999".to_string()],
        valid_from: None,
        valid_until: None,
    }];

    let out = extract_order(&order(Some(mirror)), &Catalog::empty());
    let rec = &out.records[0];
    assert!(rec.skidata_serial.is_none());
    // Falls back to the DTA-derived serial for identity.
    assert_eq!(rec.effective_serial(), "555555");
}

#[test]
fn scenario_absent_mirror_degrades_to_none() {
    let out = extract_order(&order(None), &Catalog::empty());
    assert!(out.records[0].skidata_serial.is_none());
    assert!(out.records[0].valid_from.is_none());
}
