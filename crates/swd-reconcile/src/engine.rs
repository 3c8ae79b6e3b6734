use std::collections::{BTreeMap, BTreeSet};

use swd_extract::ProcessedOrder;
use swd_schemas::{dta_serial, Catalog, ExternalTicketItem};

use crate::{
    MatchStrategy, ReconcileDiag, ReconcileOutcome, ReconciliationItem, ReconciliationStatus,
};

/// Composite key of an internal record: order id + effective serial.
/// Matching consumes keys, so of two records sharing one key at most one can
/// be matched; the twin still surfaces as only-internal.
fn composite_key(rec: &ProcessedOrder) -> (String, String) {
    (rec.order_id.clone(), rec.effective_serial().to_string())
}

/// Indices into the internal slice, in canonical tie-break order:
/// lowest order id, then earliest creation time, then lowest DTA serial.
fn canonical_order(internal: &[ProcessedOrder]) -> Vec<usize> {
    let mut idxs: Vec<usize> = (0..internal.len()).collect();
    idxs.sort_by(|&a, &b| {
        let ra = &internal[a];
        let rb = &internal[b];
        (&ra.order_id, ra.created_at, &ra.dta_serial)
            .cmp(&(&rb.order_id, rb.created_at, &rb.dta_serial))
    });
    idxs
}

struct Indexes {
    /// serial -> internal record indices, buckets in canonical order.
    /// Keyed by both the mirror-recovered serial and the DTA-derived one.
    by_serial: BTreeMap<String, Vec<usize>>,
    /// order id -> internal record indices, in canonical order.
    by_order: BTreeMap<String, Vec<usize>>,
    diags: Vec<ReconcileDiag>,
}

fn build_indexes(internal: &[ProcessedOrder], canonical: &[usize]) -> Indexes {
    let mut by_serial: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    let mut by_order: BTreeMap<String, Vec<usize>> = BTreeMap::new();

    for &idx in canonical {
        let rec = &internal[idx];

        let mut serials: Vec<&str> = Vec::new();
        if let Some(s) = rec.skidata_serial.as_deref() {
            if !s.is_empty() {
                serials.push(s);
            }
        }
        if !rec.dta_serial.is_empty() && Some(rec.dta_serial.as_str()) != serials.first().copied()
        {
            serials.push(&rec.dta_serial);
        }
        for s in serials {
            by_serial.entry(s.to_string()).or_default().push(idx);
        }

        by_order.entry(rec.order_id.clone()).or_default().push(idx);
    }

    // One normalized serial spanning two different orders is a data anomaly
    // worth surfacing (the upstream system overwrote it silently). Several
    // devices of a single order sharing a serial is not a conflict.
    let mut diags = Vec::new();
    for (serial, bucket) in &by_serial {
        let mut order_ids: Vec<String> = bucket
            .iter()
            .map(|&i| internal[i].order_id.clone())
            .collect();
        order_ids.sort();
        order_ids.dedup();
        if order_ids.len() > 1 {
            diags.push(ReconcileDiag::SerialConflict {
                serial: serial.clone(),
                order_ids,
            });
        }
    }
    diags.sort();

    Indexes {
        by_serial,
        by_order,
        diags,
    }
}

/// Record built from ticket fields alone, for tickets with no internal
/// counterpart. Internal pricing is unavailable: the export gross lands on
/// the skipass component with a zero tax breakdown.
fn synthesize(
    ticket: &ExternalTicketItem,
    candidates: &[String],
    catalog: &Catalog,
) -> ProcessedOrder {
    ProcessedOrder {
        order_id: ticket.order_id.clone().unwrap_or_default(),
        created_at: ticket.issued_at,
        sales_channel: String::new(),

        product_id: ticket.product_id.clone(),
        product_name: catalog.product_name(&ticket.product_id),
        consumer_category_id: ticket.consumer_category_id.clone(),
        consumer_category_name: catalog.category_name(&ticket.consumer_category_id),

        skipass_gross_cents: ticket.gross_cents,
        skipass_tax_cents: 0,
        lifepass_gross_cents: 0,
        lifepass_tax_cents: 0,
        insurance_gross_cents: 0,
        insurance_tax_cents: 0,

        dta_serial: String::new(),
        skidata_serial: candidates.first().cloned(),
        valid_from: None,
        valid_until: None,

        settlement: None,
        test_order: ticket.test_ticket,
    }
}

/// Classify every external ticket against the internal record set, then
/// append unmatched internal records as only-internal.
///
/// Guarantees:
/// - |items| = |tickets| + |unmatched internal records|; every internal
///   record is emitted exactly once (merged into a match or as leftover)
/// - a ticket without an order id is always only-skidata, never matched
/// - no internal composite key is consumed twice (the serial path also
///   checks consumption, so two tickets cannot match the same record)
/// - output order: tickets in export order, then leftovers in canonical
///   (order id, created at, serial) order
pub fn reconcile(
    internal: &[ProcessedOrder],
    tickets: &[ExternalTicketItem],
    catalog: &Catalog,
) -> ReconcileOutcome {
    let canonical = canonical_order(internal);
    let idx = build_indexes(internal, &canonical);

    let mut used_keys: BTreeSet<(String, String)> = BTreeSet::new();
    let mut merged: BTreeSet<usize> = BTreeSet::new();
    let mut items: Vec<ReconciliationItem> = Vec::with_capacity(tickets.len() + internal.len());

    for ticket in tickets {
        let candidates: Vec<String> = ticket
            .dta_codes
            .iter()
            .filter_map(|c| dta_serial(c))
            .collect();

        // A ticket without an order id has no internal counterpart by
        // definition; it never enters matching.
        let Some(ticket_order) = ticket.order_id.as_deref() else {
            items.push(ReconciliationItem {
                record: synthesize(ticket, &candidates, catalog),
                status: ReconciliationStatus::OnlySkidata,
                has_order_id: false,
                strategy: None,
            });
            continue;
        };

        // Serial match first: earliest candidate serial with an unconsumed
        // record wins; within a bucket the canonical order decides.
        let mut matched: Option<(usize, MatchStrategy)> = None;
        'serials: for cand in &candidates {
            if let Some(bucket) = idx.by_serial.get(cand) {
                for &i in bucket {
                    if !used_keys.contains(&composite_key(&internal[i])) {
                        matched = Some((i, MatchStrategy::Serial));
                        break 'serials;
                    }
                }
            }
        }

        // Fallback: same order, same product and consumer category.
        if matched.is_none() {
            if let Some(bucket) = idx.by_order.get(ticket_order) {
                for &i in bucket {
                    let rec = &internal[i];
                    if rec.product_id == ticket.product_id
                        && rec.consumer_category_id == ticket.consumer_category_id
                        && !used_keys.contains(&composite_key(rec))
                    {
                        matched = Some((i, MatchStrategy::OrderFallback));
                        break;
                    }
                }
            }
        }

        match matched {
            Some((i, strategy)) => {
                used_keys.insert(composite_key(&internal[i]));
                merged.insert(i);
                let mut rec = internal[i].clone();
                if rec.skidata_serial.is_none() {
                    rec.skidata_serial = candidates.first().cloned();
                }
                items.push(ReconciliationItem {
                    record: rec,
                    status: ReconciliationStatus::Matched,
                    has_order_id: true,
                    strategy: Some(strategy),
                });
            }
            None => {
                items.push(ReconciliationItem {
                    record: synthesize(ticket, &candidates, catalog),
                    status: ReconciliationStatus::MissingDevice,
                    has_order_id: true,
                    strategy: None,
                });
            }
        }
    }

    // Leftovers go by record identity, not composite key: a record whose key
    // was consumed by a twin is itself unmatched and must still be emitted.
    for &i in &canonical {
        if !merged.contains(&i) {
            items.push(ReconciliationItem {
                record: internal[i].clone(),
                status: ReconciliationStatus::OnlyInternal,
                has_order_id: true,
                strategy: None,
            });
        }
    }

    ReconcileOutcome {
        items,
        diags: idx.diags,
    }
}
