//! Fixture files written to disk must load back into the same inputs and
//! produce the same report as the in-memory originals.

use std::fs;

use swd_report::{build_report, ReportInput};
use swd_stats::ChannelSets;
use swd_testkit::{
    catalog, load_catalog_json, load_orders_json, load_tickets_json, order, ticket,
};

#[test]
fn scenario_report_identical_after_json_round_trip() -> anyhow::Result<()> {
    let orders = vec![order("100")
        .skipass_line("P1", "C1", 5000, 1000)
        .device("P1", "C1", false, "AB-123456-0")
        .stripe_charge(5000, 180, 150, 30)
        .build()];
    let tickets = vec![ticket(Some("100"), "P1", "C1", 5000, &["AB-123456-0"])];
    let cat = catalog(&[("P1", "Day Pass")], &[("C1", "Adult")]);

    let dir = tempfile::tempdir()?;
    let orders_path = dir.path().join("orders.json");
    let tickets_path = dir.path().join("tickets.json");
    let catalog_path = dir.path().join("catalog.json");
    fs::write(&orders_path, serde_json::to_string(&orders)?)?;
    fs::write(&tickets_path, serde_json::to_string(&tickets)?)?;
    fs::write(&catalog_path, serde_json::to_string(&cat)?)?;

    let loaded_orders = load_orders_json(&orders_path.to_string_lossy())?;
    let loaded_tickets = load_tickets_json(&tickets_path.to_string_lossy())?;
    let loaded_catalog = load_catalog_json(&catalog_path.to_string_lossy())?;
    assert_eq!(loaded_orders, orders);
    assert_eq!(loaded_tickets, tickets);
    assert_eq!(loaded_catalog, cat);

    let direct = build_report(ReportInput {
        orders: &orders,
        tickets: &tickets,
        catalog: &cat,
        channels: ChannelSets::default(),
    });
    let via_files = build_report(ReportInput {
        orders: &loaded_orders,
        tickets: &loaded_tickets,
        catalog: &loaded_catalog,
        channels: ChannelSets::default(),
    });
    assert_eq!(direct, via_files);
    assert_eq!(direct.totals.kiosk.stripe.amount_cents, 5000);
    Ok(())
}
