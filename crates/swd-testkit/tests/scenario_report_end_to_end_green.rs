use swd_reconcile::ReconciliationStatus;
use swd_report::{build_report, ReportDiag, ReportInput};
use swd_stats::ChannelSets;
use swd_testkit::{catalog, order, ticket};

#[test]
fn scenario_full_report_over_mixed_window() {
    let orders = vec![
        // Kiosk order, matched by serial, with a Stripe charge.
        order("100")
            .full_line("P1", "C1", (5000, 1000), (500, 100), None)
            .device("P1", "C1", false, "AB-111111-0")
            .stripe_charge(5500, 200, 160, 40)
            .build(),
        // Online order, matched by fallback (serial drifted).
        order("200")
            .channel("online")
            .skipass_line("P1", "C2", 4000, 800)
            .device("P1", "C2", false, "AB-222222-0")
            .build(),
        // Test order, stays internal-only.
        order("300")
            .test_order()
            .skipass_line("P1", "C1", 1000, 200)
            .device("P1", "C1", false, "AB-333333-0")
            .build(),
    ];
    let tickets = vec![
        ticket(Some("100"), "P1", "C1", 5000, &["AB-111111-0"]),
        ticket(Some("200"), "P1", "C2", 4000, &["AB-888888-0"]),
        // Unlinked ticket, nothing internal to bind to.
        ticket(None, "P9", "C9", 2500, &["ZZ-444444-0"]),
    ];
    let cat = catalog(&[("P1", "Day Pass")], &[("C1", "Adult"), ("C2", "Child")]);

    let report = build_report(ReportInput {
        orders: &orders,
        tickets: &tickets,
        catalog: &cat,
        channels: ChannelSets::default(),
    });

    // Completeness: 3 tickets + 1 unmatched internal record (the test order).
    assert_eq!(report.items.len(), 4);
    assert!(report.diags.is_empty());

    let live = report.totals.recon_live;
    assert_eq!(live.matched, 2);
    assert_eq!(live.only_skidata, 1);
    assert_eq!(live.only_internal, 0);
    let test = report.totals.recon_test;
    assert_eq!(test.only_internal, 1);

    // Aggregation consistency: live+test priced totals match the item list.
    let priced = report.items.iter().filter(|i| i.is_priced()).count();
    assert_eq!(
        report.totals.revenue_live.total_items + report.totals.revenue_test.total_items,
        priced
    );
    assert_eq!(report.totals.revenue_live.skipass_gross_cents, 9000);
    assert_eq!(report.totals.revenue_live.skipass_tax_cents, 1800);
    assert_eq!(report.totals.revenue_test.skipass_gross_cents, 1000);

    // Channel split: one kiosk item (with the Stripe charge), one online.
    assert_eq!(report.totals.kiosk.item_count, 1);
    assert_eq!(report.totals.kiosk.stripe.amount_cents, 5500);
    assert_eq!(report.totals.kiosk.stripe.processing_fee_cents, 160);
    assert_eq!(report.totals.kiosk.stripe.transaction_count, 1);
    assert_eq!(report.totals.online.item_count, 1);
    assert_eq!(report.totals.online.stripe.transaction_count, 0);
}

#[test]
fn scenario_extraction_loss_surfaces_in_report_diags() {
    // Device references product P2 but the order only prices P1: the device
    // is dropped and the report says so.
    let orders = vec![order("100")
        .skipass_line("P1", "C1", 5000, 1000)
        .device("P2", "C1", false, "AB-111111-0")
        .build()];

    let report = build_report(ReportInput {
        orders: &orders,
        tickets: &[],
        catalog: &catalog(&[], &[]),
        channels: ChannelSets::default(),
    });

    assert!(report.items.is_empty());
    assert_eq!(report.diags.len(), 1);
    assert!(matches!(report.diags[0], ReportDiag::Extract(_)));
}

#[test]
fn scenario_no_double_match_across_pipeline() {
    // Two tickets carry the same serial; only one internal device exists.
    let orders = vec![order("100")
        .skipass_line("P1", "C1", 5000, 1000)
        .device("P1", "C1", false, "AB-111111-0")
        .build()];
    let tickets = vec![
        ticket(Some("100"), "P1", "C1", 5000, &["AB-111111-0"]),
        ticket(Some("100"), "P1", "C1", 5000, &["AB-111111-0"]),
    ];
    let cat = catalog(&[], &[]);

    let report = build_report(ReportInput {
        orders: &orders,
        tickets: &tickets,
        catalog: &cat,
        channels: ChannelSets::default(),
    });

    let matched: Vec<_> = report
        .items
        .iter()
        .filter(|i| i.status == ReconciliationStatus::Matched)
        .collect();
    assert_eq!(matched.len(), 1);
    // The second ticket still links the order, so it degrades to
    // missing-device rather than disappearing.
    assert_eq!(
        report
            .items
            .iter()
            .filter(|i| i.status == ReconciliationStatus::MissingDevice)
            .count(),
        1
    );
}
